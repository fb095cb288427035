//! Routing of the library's own diagnostics.
//!
//! Only the logging build of FMOD (`libfmodL`) honours these calls; the
//! release build answers `ErrUnsupported`, which is passed through.

use std::ffi::CString;
use std::path::Path;
use std::ptr;

use libc::{c_char, c_int};

use crate::enums::DebugMode;
use crate::error::{Error, Result};
use crate::ffi::{self, fmod_call, to_bool, FMOD_DEBUG_CALLBACK, FMOD_DEBUG_FLAGS, FMOD_OK, FMOD_RESULT};
use crate::flags::DebugFlags;
use crate::structures::MemoryStats;
use crate::util::ptr_to_string;

/// Log target used for forwarded native messages.
pub const TARGET: &str = "fmod";

/// Select which native messages are produced and where they go.
///
/// `Tty` and `File` are handled natively (`File` writes `fmod.log` in the
/// working directory); `Callback` forwards to the `log` crate.
pub fn initialize(flags: DebugFlags, mode: DebugMode) -> Result<()> {
    let callback: FMOD_DEBUG_CALLBACK = match mode {
        DebugMode::Callback => Some(debug_callback),
        DebugMode::Tty | DebugMode::File => None,
    };
    install(flags, mode, callback, ptr::null())
}

/// Write native messages to `path`.
pub fn initialize_file(flags: DebugFlags, path: &Path) -> Result<()> {
    let path = path
        .to_str()
        .ok_or_else(|| Error::InvalidArgument(format!("non UTF-8 log path: {}", path.display())))?;
    let path = CString::new(path)?;
    install(flags, DebugMode::File, None, path.as_ptr())
}

fn install(flags: DebugFlags, mode: DebugMode, callback: FMOD_DEBUG_CALLBACK, file: *const c_char) -> Result<()> {
    let api = ffi::api()?;
    fmod_call!(api.global, debug_initialize(flags.bits(), mode.as_raw(), callback, file))?;
    log::debug!("native debug output: {:?} via {:?}", flags, mode);
    Ok(())
}

/// Current and peak bytes allocated by the library.
///
/// `blocking` waits for pending asynchronous frees to be counted.
pub fn memory_stats(blocking: bool) -> Result<MemoryStats> {
    let api = ffi::api()?;
    let (mut current, mut max) = (0, 0);
    fmod_call!(api.global, memory_get_stats(&mut current, &mut max, to_bool(blocking)))?;
    Ok(MemoryStats {
        current_allocated: current,
        max_allocated: max,
    })
}

/// The `log` level a native message is reported at.
pub fn level_for(flags: DebugFlags) -> log::Level {
    if flags.contains(DebugFlags::LEVEL_ERROR) {
        log::Level::Error
    } else if flags.contains(DebugFlags::LEVEL_WARNING) {
        log::Level::Warn
    } else if flags.contains(DebugFlags::LEVEL_LOG) {
        log::Level::Debug
    } else {
        log::Level::Trace
    }
}

unsafe extern "C" fn debug_callback(
    flags: FMOD_DEBUG_FLAGS,
    file: *const c_char,
    line: c_int,
    func: *const c_char,
    message: *const c_char,
) -> FMOD_RESULT {
    let outcome = std::panic::catch_unwind(|| {
        let flags = DebugFlags::from_bits_retain(flags);
        let message = ptr_to_string(message).unwrap_or_default();
        let message = message.trim_end();
        let func = ptr_to_string(func).unwrap_or_default();
        match ptr_to_string(file) {
            Some(file) if line > 0 => {
                log::log!(target: TARGET, level_for(flags), "{}:{} {} {}", file, line, func, message)
            }
            _ => log::log!(target: TARGET, level_for(flags), "{} {}", func, message),
        }
    });
    if outcome.is_err() {
        log::error!("panic while forwarding native debug output");
    }
    FMOD_OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DebugFlags::LEVEL_ERROR, log::Level::Error)]
    #[case(DebugFlags::LEVEL_ERROR | DebugFlags::LEVEL_WARNING, log::Level::Error)]
    #[case(DebugFlags::LEVEL_WARNING | DebugFlags::TYPE_FILE, log::Level::Warn)]
    #[case(DebugFlags::LEVEL_LOG, log::Level::Debug)]
    #[case(DebugFlags::TYPE_TRACE, log::Level::Trace)]
    fn test_level_mapping(#[case] flags: DebugFlags, #[case] expected: log::Level) {
        assert_eq!(level_for(flags), expected);
    }

    #[test]
    fn test_callback_tolerates_null_strings() {
        let status = unsafe {
            debug_callback(
                DebugFlags::LEVEL_WARNING.bits(),
                ptr::null(),
                0,
                ptr::null(),
                ptr::null(),
            )
        };
        assert_eq!(status, FMOD_OK);
    }

    #[test]
    fn test_callback_with_location() {
        let file = CString::new("fmod_codec.cpp").unwrap();
        let func = CString::new("CodecWav::openInternal").unwrap();
        let message = CString::new("unsupported chunk\n").unwrap();
        let status = unsafe {
            debug_callback(
                DebugFlags::LEVEL_LOG.bits(),
                file.as_ptr(),
                212,
                func.as_ptr(),
                message.as_ptr(),
            )
        };
        assert_eq!(status, FMOD_OK);
    }
}
