//! String and list marshalling shared by the proxy types.

use std::ffi::{CStr, CString};
use std::ptr;

use libc::{c_char, c_int};

use crate::error::{Error, Result};

/// Declare a copyable proxy around a native handle.
macro_rules! handle {
    ($(#[$meta:meta])* $name:ident => $raw:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            raw: *mut $raw,
        }

        // SAFETY: the native API serialises calls on its objects internally
        // unless the owning system was initialised with THREAD_UNSAFE.
        unsafe impl Send for $name {}
        unsafe impl Sync for $name {}

        impl $name {
            /// Wrap a handle obtained elsewhere.
            ///
            /// # Safety
            /// `raw` must be a live handle of this type created by the loaded library.
            pub unsafe fn from_raw(raw: *mut $raw) -> Self {
                $name { raw }
            }

            pub fn as_raw(&self) -> *mut $raw {
                self.raw
            }

            pub(crate) fn wrap(raw: *mut $raw) -> Self {
                $name { raw }
            }
        }
    };
}
pub(crate) use handle;

/// Buffer size used for fixed-length name getters.
pub(crate) const NAME_BUFFER_LEN: usize = 256;

pub(crate) fn to_cstring(s: &str) -> Result<CString> {
    Ok(CString::new(s)?)
}

/// Decode a NUL-terminated buffer, stopping at the first NUL.
pub(crate) fn buffer_to_string(buf: &[c_char]) -> String {
    let bytes: Vec<u8> = buf
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn ptr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

/// Run a `(buffer, length)` getter against a name-sized buffer.
pub(crate) fn read_string<F>(mut fill: F) -> Result<String>
where
    F: FnMut(*mut c_char, c_int) -> Result<()>,
{
    let mut buf = [0 as c_char; NAME_BUFFER_LEN];
    fill(buf.as_mut_ptr(), buf.len() as c_int)?;
    Ok(buffer_to_string(&buf))
}

/// Run a `(buffer, size, retrieved)` getter twice: once for the size,
/// once to fill.
pub(crate) fn read_sized_string<F>(mut fill: F) -> Result<String>
where
    F: FnMut(*mut c_char, c_int, *mut c_int) -> Result<()>,
{
    let mut retrieved: c_int = 0;
    fill(ptr::null_mut(), 0, &mut retrieved)?;
    if retrieved <= 0 {
        return Ok(String::new());
    }
    let mut buf = vec![0 as c_char; retrieved as usize];
    fill(buf.as_mut_ptr(), retrieved, &mut retrieved)?;
    Ok(buffer_to_string(&buf))
}

/// Fill a list of native handles after a count query.
pub(crate) fn read_handles<H, F>(count: c_int, mut fill: F) -> Result<Vec<*mut H>>
where
    F: FnMut(*mut *mut H, c_int, *mut c_int) -> Result<()>,
{
    if count <= 0 {
        return Ok(Vec::new());
    }
    let mut handles = vec![ptr::null_mut(); count as usize];
    let mut written: c_int = 0;
    fill(handles.as_mut_ptr(), count, &mut written)?;
    handles.truncate(written.clamp(0, count) as usize);
    Ok(handles)
}

/// Reject a null handle returned by a successful factory call.
pub(crate) fn non_null<H>(ptr: *mut H, what: &'static str) -> Result<*mut H> {
    if ptr.is_null() {
        Err(Error::NullHandle(what))
    } else {
        Ok(ptr)
    }
}

pub(crate) fn to_c_int(value: usize, what: &str) -> Result<c_int> {
    c_int::try_from(value)
        .map_err(|_| Error::InvalidArgument(format!("{} too large: {}", what, value)))
}

/// Gains, pitches and fade times must be finite and not negative.
pub(crate) fn non_negative(value: f32, what: &str) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!("{} must be finite and not negative: {}", what, value)))
    }
}

pub(crate) fn check_index(index: i32, what: &str) -> Result<c_int> {
    if index < 0 {
        return Err(Error::InvalidArgument(format!("negative {} index: {}", what, index)));
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_from(text: &str, buf: *mut c_char, len: c_int) {
        let bytes = text.as_bytes();
        let n = bytes.len().min(len as usize - 1);
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr() as *const c_char, buf, n);
            *buf.add(n) = 0;
        }
    }

    #[test]
    fn test_buffer_to_string_stops_at_nul() {
        let buf = [b'a' as c_char, b'b' as c_char, 0, b'c' as c_char];
        assert_eq!(buffer_to_string(&buf), "ab");
        let full = [b'x' as c_char; 4];
        assert_eq!(buffer_to_string(&full), "xxxx");
    }

    #[test]
    fn test_read_string() {
        let name = read_string(|buf, len| {
            fill_from("Master", buf, len);
            Ok(())
        })
        .unwrap();
        assert_eq!(name, "Master");
    }

    #[test]
    fn test_read_sized_string_queries_then_fills() {
        let path = "event:/Music/Level 01";
        let mut calls = 0;
        let result = read_sized_string(|buf, size, retrieved| {
            calls += 1;
            unsafe { *retrieved = path.len() as c_int + 1 };
            if buf.is_null() {
                assert_eq!(size, 0);
            } else {
                assert_eq!(size as usize, path.len() + 1);
                fill_from(path, buf, size);
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(result, path);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_read_sized_string_propagates_errors() {
        let result = read_sized_string(|_, _, _| Err(Error::NullHandle("bank")));
        assert!(matches!(result, Err(Error::NullHandle("bank"))));
    }

    #[test]
    fn test_read_handles_truncates_to_written() {
        let mut storage = [1u8, 2, 3];
        let base = storage.as_mut_ptr();
        let handles = read_handles::<u8, _>(3, |out, capacity, written| {
            assert_eq!(capacity, 3);
            unsafe {
                *out = base;
                *out.add(1) = base.add(1);
                *written = 2;
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(handles, vec![base, unsafe { base.add(1) }]);
        assert!(read_handles::<u8, _>(0, |_, _, _| panic!("not called")).unwrap().is_empty());
    }

    #[test]
    fn test_to_cstring_rejects_interior_nul() {
        assert!(matches!(to_cstring("a\0b"), Err(Error::InvalidString(_))));
        assert_eq!(to_cstring("sfx.wav").unwrap().as_bytes(), b"sfx.wav");
    }

    #[test]
    fn test_non_null() {
        let mut value = 0u8;
        assert!(non_null(&mut value as *mut u8, "sound").is_ok());
        assert!(matches!(
            non_null(ptr::null_mut::<u8>(), "sound"),
            Err(Error::NullHandle("sound"))
        ));
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(0.0, "volume").unwrap(), 0.0);
        assert_eq!(non_negative(2.5, "pitch").unwrap(), 2.5);
        for bad in [-0.1, f32::NAN, f32::INFINITY] {
            assert!(matches!(non_negative(bad, "volume"), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_check_index() {
        assert_eq!(check_index(0, "group").unwrap(), 0);
        assert_eq!(check_index(7, "group").unwrap(), 7);
        let err = check_index(-1, "group").unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: negative group index: -1");
    }
}
