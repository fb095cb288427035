//! Native status codes and the crate error type.
//!
//! Every exported FMOD function returns an `FMOD_RESULT`. Anything other
//! than `FMOD_OK` is surfaced immediately as [`Error::Fmod`], carrying the
//! code and the name of the function that produced it.

use std::ffi::NulError;
use std::fmt;

use crate::ffi::FMOD_RESULT;

macro_rules! result_codes {
    ($( $variant:ident = $value:literal, $name:literal, $desc:literal; )*) => {
        /// Result code returned by every native call.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum FmodResult {
            $( $variant, )*
            /// A code this crate does not know about (newer library).
            Unknown(i32),
        }

        impl FmodResult {
            /// Map a raw status code.
            pub fn from_raw(code: FMOD_RESULT) -> Self {
                match code {
                    $( $value => FmodResult::$variant, )*
                    other => FmodResult::Unknown(other),
                }
            }

            /// The raw status code.
            pub fn as_raw(self) -> FMOD_RESULT {
                match self {
                    $( FmodResult::$variant => $value, )*
                    FmodResult::Unknown(other) => other,
                }
            }

            /// Symbolic name as spelled in the C header.
            pub fn name(self) -> &'static str {
                match self {
                    $( FmodResult::$variant => $name, )*
                    FmodResult::Unknown(_) => "FMOD_ERR_UNKNOWN",
                }
            }

            /// Human readable description.
            pub fn description(self) -> &'static str {
                match self {
                    $( FmodResult::$variant => $desc, )*
                    FmodResult::Unknown(_) => "Unknown error code.",
                }
            }
        }
    };
}

result_codes! {
    Ok = 0, "FMOD_OK", "No errors.";
    ErrBadCommand = 1, "FMOD_ERR_BADCOMMAND", "Tried to call a function on a data type that does not allow this type of functionality.";
    ErrChannelAlloc = 2, "FMOD_ERR_CHANNEL_ALLOC", "Error trying to allocate a channel.";
    ErrChannelStolen = 3, "FMOD_ERR_CHANNEL_STOLEN", "The specified channel has been reused to play another sound.";
    ErrDma = 4, "FMOD_ERR_DMA", "DMA Failure.";
    ErrDspConnection = 5, "FMOD_ERR_DSP_CONNECTION", "DSP connection error. Connection possibly caused a cyclic dependency or connected dsps with incompatible buffer counts.";
    ErrDspDontProcess = 6, "FMOD_ERR_DSP_DONTPROCESS", "DSP return code from a DSP process query callback. Tells mixer not to call the process callback and therefore not consume CPU.";
    ErrDspFormat = 7, "FMOD_ERR_DSP_FORMAT", "DSP Format error. A DSP unit may have attempted to connect to this network with the wrong format.";
    ErrDspInUse = 8, "FMOD_ERR_DSP_INUSE", "DSP is already in the mixer's DSP network. It must be removed before being reinserted or released.";
    ErrDspNotFound = 9, "FMOD_ERR_DSP_NOTFOUND", "DSP connection error. Couldn't find the DSP unit specified.";
    ErrDspReserved = 10, "FMOD_ERR_DSP_RESERVED", "DSP operation error. Cannot perform operation on this DSP as it is reserved by the system.";
    ErrDspSilence = 11, "FMOD_ERR_DSP_SILENCE", "DSP return code from a DSP process query callback. Tells mixer silence would be produced from read.";
    ErrDspType = 12, "FMOD_ERR_DSP_TYPE", "DSP operation cannot be performed on a DSP of this type.";
    ErrFileBad = 13, "FMOD_ERR_FILE_BAD", "Error loading file.";
    ErrFileCouldNotSeek = 14, "FMOD_ERR_FILE_COULDNOTSEEK", "Couldn't perform seek operation. This is a limitation of the medium or the file format.";
    ErrFileDiskEjected = 15, "FMOD_ERR_FILE_DISKEJECTED", "Media was ejected while reading.";
    ErrFileEof = 16, "FMOD_ERR_FILE_EOF", "End of file unexpectedly reached while trying to read essential data.";
    ErrFileEndOfData = 17, "FMOD_ERR_FILE_ENDOFDATA", "End of current chunk reached while trying to read data.";
    ErrFileNotFound = 18, "FMOD_ERR_FILE_NOTFOUND", "File not found.";
    ErrFormat = 19, "FMOD_ERR_FORMAT", "Unsupported file or audio format.";
    ErrHeaderMismatch = 20, "FMOD_ERR_HEADER_MISMATCH", "There is a version mismatch between the FMOD header and either the FMOD Studio library or the FMOD Core library.";
    ErrHttp = 21, "FMOD_ERR_HTTP", "A HTTP error occurred. This is a catch-all for HTTP errors not listed elsewhere.";
    ErrHttpAccess = 22, "FMOD_ERR_HTTP_ACCESS", "The specified resource requires authentication or is forbidden.";
    ErrHttpProxyAuth = 23, "FMOD_ERR_HTTP_PROXY_AUTH", "Proxy authentication is required to access the specified resource.";
    ErrHttpServerError = 24, "FMOD_ERR_HTTP_SERVER_ERROR", "A HTTP server error occurred.";
    ErrHttpTimeout = 25, "FMOD_ERR_HTTP_TIMEOUT", "The HTTP request timed out.";
    ErrInitialization = 26, "FMOD_ERR_INITIALIZATION", "FMOD was not initialized correctly to support this function.";
    ErrInitialized = 27, "FMOD_ERR_INITIALIZED", "Cannot call this command after System::init.";
    ErrInternal = 28, "FMOD_ERR_INTERNAL", "An error occurred in the FMOD system. Use the logging version of FMOD for more information.";
    ErrInvalidFloat = 29, "FMOD_ERR_INVALID_FLOAT", "Value passed in was a NaN, Inf or denormalized float.";
    ErrInvalidHandle = 30, "FMOD_ERR_INVALID_HANDLE", "An invalid object handle was used.";
    ErrInvalidParam = 31, "FMOD_ERR_INVALID_PARAM", "An invalid parameter was passed to this function.";
    ErrInvalidPosition = 32, "FMOD_ERR_INVALID_POSITION", "An invalid seek position was passed to this function.";
    ErrInvalidSpeaker = 33, "FMOD_ERR_INVALID_SPEAKER", "An invalid speaker was passed to this function based on the current speaker mode.";
    ErrInvalidSyncPoint = 34, "FMOD_ERR_INVALID_SYNCPOINT", "The syncpoint did not come from this sound handle.";
    ErrInvalidThread = 35, "FMOD_ERR_INVALID_THREAD", "Tried to call a function on a thread that is not supported.";
    ErrInvalidVector = 36, "FMOD_ERR_INVALID_VECTOR", "The vectors passed in are not unit length, or perpendicular.";
    ErrMaxAudible = 37, "FMOD_ERR_MAXAUDIBLE", "Reached maximum audible playback count for this sound's soundgroup.";
    ErrMemory = 38, "FMOD_ERR_MEMORY", "Not enough memory or resources.";
    ErrMemoryCantPoint = 39, "FMOD_ERR_MEMORY_CANTPOINT", "Can't use FMOD_OPENMEMORY_POINT on non PCM source data, or non mp3/xma/adpcm data if FMOD_CREATECOMPRESSEDSAMPLE was used.";
    ErrNeeds3d = 40, "FMOD_ERR_NEEDS3D", "Tried to call a command on a 2d sound when the command was meant for 3d sound.";
    ErrNeedsHardware = 41, "FMOD_ERR_NEEDSHARDWARE", "Tried to use a feature that requires hardware support.";
    ErrNetConnect = 42, "FMOD_ERR_NET_CONNECT", "Couldn't connect to the specified host.";
    ErrNetSocketError = 43, "FMOD_ERR_NET_SOCKET_ERROR", "A socket error occurred. This is a catch-all for socket-related errors not listed elsewhere.";
    ErrNetUrl = 44, "FMOD_ERR_NET_URL", "The specified URL couldn't be resolved.";
    ErrNetWouldBlock = 45, "FMOD_ERR_NET_WOULD_BLOCK", "Operation on a non-blocking socket could not complete immediately.";
    ErrNotReady = 46, "FMOD_ERR_NOTREADY", "Operation could not be performed because specified sound/DSP connection is not ready.";
    ErrOutputAllocated = 47, "FMOD_ERR_OUTPUT_ALLOCATED", "Error initializing output device, but more specifically, the output device is already in use and cannot be reused.";
    ErrOutputCreateBuffer = 48, "FMOD_ERR_OUTPUT_CREATEBUFFER", "Error creating hardware sound buffer.";
    ErrOutputDriverCall = 49, "FMOD_ERR_OUTPUT_DRIVERCALL", "A call to a standard soundcard driver failed, which could possibly mean a bug in the driver or resources were missing or exhausted.";
    ErrOutputFormat = 50, "FMOD_ERR_OUTPUT_FORMAT", "Soundcard does not support the specified format.";
    ErrOutputInit = 51, "FMOD_ERR_OUTPUT_INIT", "Error initializing output device.";
    ErrOutputNoDrivers = 52, "FMOD_ERR_OUTPUT_NODRIVERS", "The output device has no drivers installed.";
    ErrPlugin = 53, "FMOD_ERR_PLUGIN", "An unspecified error has been returned from a plugin.";
    ErrPluginMissing = 54, "FMOD_ERR_PLUGIN_MISSING", "A requested output, dsp unit type or codec was not available.";
    ErrPluginResource = 55, "FMOD_ERR_PLUGIN_RESOURCE", "A resource that the plugin requires cannot be allocated or found.";
    ErrPluginVersion = 56, "FMOD_ERR_PLUGIN_VERSION", "A plugin was built with an unsupported SDK version.";
    ErrRecord = 57, "FMOD_ERR_RECORD", "An error occurred trying to initialize the recording device.";
    ErrReverbChannelGroup = 58, "FMOD_ERR_REVERB_CHANNELGROUP", "Reverb properties cannot be set on this channel because a parent channelgroup owns the reverb connection.";
    ErrReverbInstance = 59, "FMOD_ERR_REVERB_INSTANCE", "Specified instance in FMOD_REVERB_PROPERTIES couldn't be set. Most likely because it is an invalid instance number or the reverb doesn't exist.";
    ErrSubsounds = 60, "FMOD_ERR_SUBSOUNDS", "The error occurred because the sound referenced contains subsounds when it shouldn't have, or it doesn't contain subsounds when it should have.";
    ErrSubsoundAllocated = 61, "FMOD_ERR_SUBSOUND_ALLOCATED", "This subsound is already being used by another sound, you cannot have more than one parent to a sound.";
    ErrSubsoundCantMove = 62, "FMOD_ERR_SUBSOUND_CANTMOVE", "Shared subsounds cannot be replaced or moved from their parent stream, such as when the parent stream is an FSB file.";
    ErrTagNotFound = 63, "FMOD_ERR_TAGNOTFOUND", "The specified tag could not be found or there are no tags.";
    ErrTooManyChannels = 64, "FMOD_ERR_TOOMANYCHANNELS", "The sound created exceeds the allowable input channel count.";
    ErrTruncated = 65, "FMOD_ERR_TRUNCATED", "The retrieved string is too long to fit in the supplied buffer and has been truncated.";
    ErrUnimplemented = 66, "FMOD_ERR_UNIMPLEMENTED", "Something in FMOD hasn't been implemented when it should be.";
    ErrUninitialized = 67, "FMOD_ERR_UNINITIALIZED", "This command failed because System::init or System::setDriver was not called.";
    ErrUnsupported = 68, "FMOD_ERR_UNSUPPORTED", "A command issued was not supported by this object.";
    ErrVersion = 69, "FMOD_ERR_VERSION", "The version number of this file format is not supported.";
    ErrEventAlreadyLoaded = 70, "FMOD_ERR_EVENT_ALREADY_LOADED", "The specified bank has already been loaded.";
    ErrEventLiveUpdateBusy = 71, "FMOD_ERR_EVENT_LIVEUPDATE_BUSY", "The live update connection failed due to the game already being connected.";
    ErrEventLiveUpdateMismatch = 72, "FMOD_ERR_EVENT_LIVEUPDATE_MISMATCH", "The live update connection failed due to the game data being out of sync with the tool.";
    ErrEventLiveUpdateTimeout = 73, "FMOD_ERR_EVENT_LIVEUPDATE_TIMEOUT", "The live update connection timed out.";
    ErrEventNotFound = 74, "FMOD_ERR_EVENT_NOTFOUND", "The requested event, parameter, bus or vca could not be found.";
    ErrStudioUninitialized = 75, "FMOD_ERR_STUDIO_UNINITIALIZED", "The Studio::System object is not yet initialized.";
    ErrStudioNotLoaded = 76, "FMOD_ERR_STUDIO_NOT_LOADED", "The specified resource is not loaded, so it can't be unloaded.";
    ErrInvalidString = 77, "FMOD_ERR_INVALID_STRING", "An invalid string was passed to this function.";
    ErrAlreadyLocked = 78, "FMOD_ERR_ALREADY_LOCKED", "The specified resource is already locked.";
    ErrNotLocked = 79, "FMOD_ERR_NOT_LOCKED", "The specified resource is not locked, so it can't be unlocked.";
    ErrRecordDisconnected = 80, "FMOD_ERR_RECORD_DISCONNECTED", "The specified recording driver has been disconnected.";
    ErrTooManySamples = 81, "FMOD_ERR_TOOMANYSAMPLES", "The length provided exceeds the allowable limit.";
}

impl FmodResult {
    pub fn is_ok(self) -> bool {
        self == FmodResult::Ok
    }
}

impl fmt::Display for FmodResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FmodResult::Unknown(code) => write!(f, "FMOD_ERR_UNKNOWN ({})", code),
            other => write!(f, "{} ({})", other.name(), other.as_raw()),
        }
    }
}

/// Errors produced by the binding layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{function} failed with {code}: {}", .code.description())]
    Fmod {
        code: FmodResult,
        function: &'static str,
    },

    #[error("native function {0} is not exported by the loaded library")]
    MissingFunction(&'static str),

    #[error("could not load the FMOD library (tried {paths:?})")]
    Library {
        paths: Vec<String>,
        #[source]
        source: libloading::Error,
    },

    #[error("string contains an interior NUL byte")]
    InvalidString(#[from] NulError),

    #[error("{0} returned a null handle")]
    NullHandle(&'static str),

    #[error("unexpected {kind} value {value} from the native library")]
    UnexpectedValue { kind: &'static str, value: i64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Native status code, if this error came from a native call.
    pub fn code(&self) -> Option<FmodResult> {
        match self {
            Error::Fmod { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True when the native call failed with exactly `code`.
    pub fn is(&self, code: FmodResult) -> bool {
        self.code() == Some(code)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Turn a native status into a `Result`.
pub fn check(raw: FMOD_RESULT, function: &'static str) -> Result<()> {
    match FmodResult::from_raw(raw) {
        FmodResult::Ok => Ok(()),
        code => Err(Error::Fmod { code, function }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, FmodResult::Ok, "FMOD_OK")]
    #[case(18, FmodResult::ErrFileNotFound, "FMOD_ERR_FILE_NOTFOUND")]
    #[case(30, FmodResult::ErrInvalidHandle, "FMOD_ERR_INVALID_HANDLE")]
    #[case(68, FmodResult::ErrUnsupported, "FMOD_ERR_UNSUPPORTED")]
    #[case(74, FmodResult::ErrEventNotFound, "FMOD_ERR_EVENT_NOTFOUND")]
    #[case(81, FmodResult::ErrTooManySamples, "FMOD_ERR_TOOMANYSAMPLES")]
    fn test_result_code_mapping(
        #[case] raw: i32,
        #[case] expected: FmodResult,
        #[case] name: &str,
    ) {
        let code = FmodResult::from_raw(raw);
        assert_eq!(code, expected);
        assert_eq!(code.as_raw(), raw);
        assert_eq!(code.name(), name);
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let code = FmodResult::from_raw(500);
        assert_eq!(code, FmodResult::Unknown(500));
        assert_eq!(code.as_raw(), 500);
        assert_eq!(code.name(), "FMOD_ERR_UNKNOWN");
    }

    #[test]
    fn test_check_ok_and_err() {
        assert!(check(0, "FMOD_System_Update").is_ok());

        let err = check(18, "FMOD_System_CreateSound").unwrap_err();
        assert!(err.is(FmodResult::ErrFileNotFound));
        assert_eq!(
            err.to_string(),
            "FMOD_System_CreateSound failed with FMOD_ERR_FILE_NOTFOUND (18): File not found."
        );
    }

    #[test]
    fn test_non_native_errors_have_no_code() {
        let err = Error::MissingFunction("FMOD_System_GetCPUUsage");
        assert_eq!(err.code(), None);
        assert_eq!(
            err.to_string(),
            "native function FMOD_System_GetCPUUsage is not exported by the loaded library"
        );
    }

    #[test]
    fn test_every_known_code_has_a_distinct_name() {
        let mut names = std::collections::HashSet::new();
        for raw in 0..=81 {
            let code = FmodResult::from_raw(raw);
            assert!(!matches!(code, FmodResult::Unknown(_)), "code {} unmapped", raw);
            assert!(names.insert(code.name()));
        }
    }

    proptest! {
        #[test]
        fn prop_any_code_maps_back(raw in any::<i32>()) {
            prop_assert_eq!(FmodResult::from_raw(raw).as_raw(), raw);
        }

        #[test]
        fn prop_check_fails_for_every_nonzero(raw in any::<i32>().prop_filter("non-ok", |r| *r != 0)) {
            let err = check(raw, "FMOD_Test").unwrap_err();
            prop_assert_eq!(err.code().map(|c| c.as_raw()), Some(raw));
        }
    }
}
