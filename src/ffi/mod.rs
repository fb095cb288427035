//! Raw declarations matching the FMOD 2.02 C headers.
//!
//! Nothing in here is linked at build time. Function pointers are resolved
//! from the shared library at runtime by [`library`].

#![allow(non_camel_case_types, non_snake_case)]

use libc::{c_char, c_float, c_int, c_short, c_uint, c_void};

/// Declare a table of native functions sharing one symbol prefix.
///
/// Each entry names the field, the symbol suffix and the argument list;
/// every function returns `FMOD_RESULT`.
macro_rules! function_table {
    (
        $(#[$meta:meta])*
        pub struct $name:ident $(<$g:ident>)? {
            $( $field:ident = $symbol:literal : fn( $($arg:ty),* $(,)? ); )*
        }
    ) => {
        $(#[$meta])*
        pub struct $name $(<$g>)? {
            $( pub $field: Func<unsafe extern "C" fn($($arg),*) -> FMOD_RESULT>, )*
        }

        impl $(<$g>)? $name $(<$g>)? {
            /// # Safety
            /// `lib` must export these symbols with exactly these signatures.
            pub(crate) unsafe fn load(lib: &Library, prefix: &str) -> Self {
                Self {
                    $( $field: resolve(lib, prefix, $symbol), )*
                }
            }
        }
    };
}

/// Invoke a table entry and check its status.
///
/// Expands to a `Result<()>`; the missing-symbol case returns early.
macro_rules! fmod_call {
    ($table:expr, $func:ident ( $($arg:expr),* $(,)? )) => {{
        let func = &$table.$func;
        let f = func.get()?;
        let status = unsafe { f($($arg),*) };
        $crate::error::check(status, func.name())
    }};
}
pub(crate) use fmod_call;

pub mod library;
pub mod studio_tables;
pub mod tables;

pub use library::{api, load, studio_api, Api, LibraryConfig, StudioApi};

macro_rules! opaque {
    ($($name:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
            }
        )*
    };
}

opaque!(
    FMOD_SYSTEM,
    FMOD_SOUND,
    FMOD_CHANNELCONTROL,
    FMOD_CHANNEL,
    FMOD_CHANNELGROUP,
    FMOD_SOUNDGROUP,
    FMOD_REVERB3D,
    FMOD_DSP,
    FMOD_DSPCONNECTION,
    FMOD_GEOMETRY,
    FMOD_SYNCPOINT,
    FMOD_STUDIO_SYSTEM,
    FMOD_STUDIO_EVENTDESCRIPTION,
    FMOD_STUDIO_EVENTINSTANCE,
    FMOD_STUDIO_BUS,
    FMOD_STUDIO_VCA,
    FMOD_STUDIO_BANK,
);

pub type FMOD_RESULT = c_int;
pub type FMOD_BOOL = c_int;
pub type FMOD_MODE = c_uint;
pub type FMOD_TIMEUNIT = c_uint;
pub type FMOD_INITFLAGS = c_uint;
pub type FMOD_DEBUG_FLAGS = c_uint;
pub type FMOD_CHANNELMASK = c_uint;
pub type FMOD_DRIVER_STATE = c_uint;
pub type FMOD_STUDIO_INITFLAGS = c_uint;
pub type FMOD_STUDIO_LOAD_BANK_FLAGS = c_uint;
pub type FMOD_STUDIO_PARAMETER_FLAGS = c_uint;

pub type FMOD_OUTPUTTYPE = c_int;
pub type FMOD_SPEAKERMODE = c_int;
pub type FMOD_SOUND_TYPE = c_int;
pub type FMOD_SOUND_FORMAT = c_int;
pub type FMOD_OPENSTATE = c_int;
pub type FMOD_SOUNDGROUP_BEHAVIOR = c_int;
pub type FMOD_CHANNELCONTROL_TYPE = c_int;
pub type FMOD_CHANNELCONTROL_CALLBACK_TYPE = c_int;
pub type FMOD_DSP_TYPE = c_int;
pub type FMOD_DSPCONNECTION_TYPE = c_int;
pub type FMOD_DSP_PARAMETER_TYPE = c_int;
pub type FMOD_TAGTYPE = c_int;
pub type FMOD_TAGDATATYPE = c_int;
pub type FMOD_CHANNELORDER = c_int;
pub type FMOD_DEBUG_MODE = c_int;
pub type FMOD_STUDIO_LOADING_STATE = c_int;
pub type FMOD_STUDIO_LOAD_MEMORY_MODE = c_int;
pub type FMOD_STUDIO_PLAYBACK_STATE = c_int;
pub type FMOD_STUDIO_STOP_MODE = c_int;
pub type FMOD_STUDIO_PARAMETER_TYPE = c_int;
pub type FMOD_STUDIO_EVENT_PROPERTY = c_int;

pub const FMOD_OK: FMOD_RESULT = 0;
pub const FMOD_TRUE: FMOD_BOOL = 1;
pub const FMOD_FALSE: FMOD_BOOL = 0;

/// Header version this crate's layouts were written against.
pub const FMOD_VERSION: c_uint = 0x0002_0222;
pub const FMOD_MAX_CHANNEL_WIDTH: usize = 32;
pub const FMOD_MAX_LISTENERS: usize = 8;
pub const FMOD_REVERB_MAXINSTANCES: usize = 4;
pub const FMOD_DSP_GETPARAM_VALUESTR_LENGTH: usize = 32;

pub type FMOD_CHANNELCONTROL_CALLBACK = Option<
    unsafe extern "C" fn(
        channelcontrol: *mut FMOD_CHANNELCONTROL,
        controltype: FMOD_CHANNELCONTROL_TYPE,
        callbacktype: FMOD_CHANNELCONTROL_CALLBACK_TYPE,
        commanddata1: *mut c_void,
        commanddata2: *mut c_void,
    ) -> FMOD_RESULT,
>;

pub type FMOD_DEBUG_CALLBACK = Option<
    unsafe extern "C" fn(
        flags: FMOD_DEBUG_FLAGS,
        file: *const c_char,
        line: c_int,
        func: *const c_char,
        message: *const c_char,
    ) -> FMOD_RESULT,
>;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FMOD_VECTOR {
    pub x: c_float,
    pub y: c_float,
    pub z: c_float,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FMOD_3D_ATTRIBUTES {
    pub position: FMOD_VECTOR,
    pub velocity: FMOD_VECTOR,
    pub forward: FMOD_VECTOR,
    pub up: FMOD_VECTOR,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FMOD_GUID {
    pub Data1: c_uint,
    pub Data2: u16,
    pub Data3: u16,
    pub Data4: [u8; 8],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FMOD_REVERB_PROPERTIES {
    pub DecayTime: c_float,
    pub EarlyDelay: c_float,
    pub LateDelay: c_float,
    pub HFReference: c_float,
    pub HFDecayRatio: c_float,
    pub Diffusion: c_float,
    pub Density: c_float,
    pub LowShelfFrequency: c_float,
    pub LowShelfGain: c_float,
    pub HighCut: c_float,
    pub EarlyLateMix: c_float,
    pub WetLevel: c_float,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FMOD_TAG {
    pub type_: FMOD_TAGTYPE,
    pub datatype: FMOD_TAGDATATYPE,
    pub name: *mut c_char,
    pub data: *mut c_void,
    pub datalen: c_uint,
    pub updated: FMOD_BOOL,
}

impl Default for FMOD_TAG {
    fn default() -> Self {
        FMOD_TAG {
            type_: 0,
            datatype: 0,
            name: std::ptr::null_mut(),
            data: std::ptr::null_mut(),
            datalen: 0,
            updated: FMOD_FALSE,
        }
    }
}

/// Extended sound creation info.
///
/// Callback slots are declared as untyped pointers; this crate never
/// installs file system or PCM callbacks and always leaves them null.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FMOD_CREATESOUNDEXINFO {
    pub cbsize: c_int,
    pub length: c_uint,
    pub fileoffset: c_uint,
    pub numchannels: c_int,
    pub defaultfrequency: c_int,
    pub format: FMOD_SOUND_FORMAT,
    pub decodebuffersize: c_uint,
    pub initialsubsound: c_int,
    pub numsubsounds: c_int,
    pub inclusionlist: *mut c_int,
    pub inclusionlistnum: c_int,
    pub pcmreadcallback: *mut c_void,
    pub pcmsetposcallback: *mut c_void,
    pub nonblockcallback: *mut c_void,
    pub dlsname: *const c_char,
    pub encryptionkey: *const c_char,
    pub maxpolyphony: c_int,
    pub userdata: *mut c_void,
    pub suggestedsoundtype: FMOD_SOUND_TYPE,
    pub fileuseropen: *mut c_void,
    pub fileuserclose: *mut c_void,
    pub fileuserread: *mut c_void,
    pub fileuserseek: *mut c_void,
    pub fileuserasyncread: *mut c_void,
    pub fileuserasynccancel: *mut c_void,
    pub fileuserdata: *mut c_void,
    pub filebuffersize: c_int,
    pub channelorder: FMOD_CHANNELORDER,
    pub initialsoundgroup: *mut FMOD_SOUNDGROUP,
    pub initialseekposition: c_uint,
    pub initialseekpostype: FMOD_TIMEUNIT,
    pub ignoresetfilesystem: c_int,
    pub audioqueuepolicy: c_uint,
    pub minmidigranularity: c_uint,
    pub nonblockthreadid: c_int,
    pub fsbguid: *mut FMOD_GUID,
}

impl Default for FMOD_CREATESOUNDEXINFO {
    fn default() -> Self {
        use std::ptr::{null, null_mut};
        FMOD_CREATESOUNDEXINFO {
            cbsize: std::mem::size_of::<FMOD_CREATESOUNDEXINFO>() as c_int,
            length: 0,
            fileoffset: 0,
            numchannels: 0,
            defaultfrequency: 0,
            format: 0,
            decodebuffersize: 0,
            initialsubsound: 0,
            numsubsounds: 0,
            inclusionlist: null_mut(),
            inclusionlistnum: 0,
            pcmreadcallback: null_mut(),
            pcmsetposcallback: null_mut(),
            nonblockcallback: null_mut(),
            dlsname: null(),
            encryptionkey: null(),
            maxpolyphony: 0,
            userdata: null_mut(),
            suggestedsoundtype: 0,
            fileuseropen: null_mut(),
            fileuserclose: null_mut(),
            fileuserread: null_mut(),
            fileuserseek: null_mut(),
            fileuserasyncread: null_mut(),
            fileuserasynccancel: null_mut(),
            fileuserdata: null_mut(),
            filebuffersize: 0,
            channelorder: 0,
            initialsoundgroup: null_mut(),
            initialseekposition: 0,
            initialseekpostype: 0,
            ignoresetfilesystem: 0,
            audioqueuepolicy: 0,
            minmidigranularity: 0,
            nonblockthreadid: 0,
            fsbguid: null_mut(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FMOD_CPU_USAGE {
    pub dsp: c_float,
    pub stream: c_float,
    pub geometry: c_float,
    pub update: c_float,
    pub convolution1: c_float,
    pub convolution2: c_float,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FMOD_DSP_METERING_INFO {
    pub numsamples: c_int,
    pub peaklevel: [c_float; FMOD_MAX_CHANNEL_WIDTH],
    pub rmslevel: [c_float; FMOD_MAX_CHANNEL_WIDTH],
    pub numchannels: c_short,
}

impl Default for FMOD_DSP_METERING_INFO {
    fn default() -> Self {
        FMOD_DSP_METERING_INFO {
            numsamples: 0,
            peaklevel: [0.0; FMOD_MAX_CHANNEL_WIDTH],
            rmslevel: [0.0; FMOD_MAX_CHANNEL_WIDTH],
            numchannels: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FMOD_DSP_PARAMETER_FLOAT_MAPPING_PIECEWISE_LINEAR {
    pub numpoints: c_int,
    pub pointparamvalues: *mut c_float,
    pub pointpositions: *mut c_float,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FMOD_DSP_PARAMETER_FLOAT_MAPPING {
    pub type_: c_int,
    pub piecewiselinearmapping: FMOD_DSP_PARAMETER_FLOAT_MAPPING_PIECEWISE_LINEAR,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FMOD_DSP_PARAMETER_DESC_FLOAT {
    pub min: c_float,
    pub max: c_float,
    pub defaultval: c_float,
    pub mapping: FMOD_DSP_PARAMETER_FLOAT_MAPPING,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FMOD_DSP_PARAMETER_DESC_INT {
    pub min: c_int,
    pub max: c_int,
    pub defaultval: c_int,
    pub goestoinf: FMOD_BOOL,
    pub valuenames: *const *const c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FMOD_DSP_PARAMETER_DESC_BOOL {
    pub defaultval: FMOD_BOOL,
    pub valuenames: *const *const c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FMOD_DSP_PARAMETER_DESC_DATA {
    pub datatype: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union FMOD_DSP_PARAMETER_DESC_UNION {
    pub floatdesc: FMOD_DSP_PARAMETER_DESC_FLOAT,
    pub intdesc: FMOD_DSP_PARAMETER_DESC_INT,
    pub booldesc: FMOD_DSP_PARAMETER_DESC_BOOL,
    pub datadesc: FMOD_DSP_PARAMETER_DESC_DATA,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct FMOD_DSP_PARAMETER_DESC {
    pub type_: FMOD_DSP_PARAMETER_TYPE,
    pub name: [c_char; 16],
    pub label: [c_char; 16],
    pub description: *const c_char,
    pub desc: FMOD_DSP_PARAMETER_DESC_UNION,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FMOD_STUDIO_PARAMETER_ID {
    pub data1: c_uint,
    pub data2: c_uint,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FMOD_STUDIO_PARAMETER_DESCRIPTION {
    pub name: *const c_char,
    pub id: FMOD_STUDIO_PARAMETER_ID,
    pub minimum: c_float,
    pub maximum: c_float,
    pub defaultvalue: c_float,
    pub type_: FMOD_STUDIO_PARAMETER_TYPE,
    pub flags: FMOD_STUDIO_PARAMETER_FLAGS,
    pub guid: FMOD_GUID,
}

impl Default for FMOD_STUDIO_PARAMETER_DESCRIPTION {
    fn default() -> Self {
        FMOD_STUDIO_PARAMETER_DESCRIPTION {
            name: std::ptr::null(),
            id: FMOD_STUDIO_PARAMETER_ID::default(),
            minimum: 0.0,
            maximum: 0.0,
            defaultvalue: 0.0,
            type_: 0,
            flags: 0,
            guid: FMOD_GUID::default(),
        }
    }
}

/// Convert a Rust bool to the native boolean.
pub fn to_bool(value: bool) -> FMOD_BOOL {
    if value {
        FMOD_TRUE
    } else {
        FMOD_FALSE
    }
}

/// Convert a native boolean to a Rust bool. Any non-zero value is true.
pub fn from_bool(value: FMOD_BOOL) -> bool {
    value != FMOD_FALSE
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoffset::offset_of;
    use std::mem::size_of;

    #[test]
    fn test_vector_layouts() {
        assert_eq!(size_of::<FMOD_VECTOR>(), 12);
        assert_eq!(size_of::<FMOD_3D_ATTRIBUTES>(), 48);
        assert_eq!(offset_of!(FMOD_3D_ATTRIBUTES, up), 36);
    }

    #[test]
    fn test_guid_layout() {
        assert_eq!(size_of::<FMOD_GUID>(), 16);
        assert_eq!(offset_of!(FMOD_GUID, Data4), 8);
    }

    #[test]
    fn test_reverb_properties_layout() {
        assert_eq!(size_of::<FMOD_REVERB_PROPERTIES>(), 48);
        assert_eq!(offset_of!(FMOD_REVERB_PROPERTIES, WetLevel), 44);
    }

    #[test]
    fn test_metering_info_layout() {
        assert_eq!(offset_of!(FMOD_DSP_METERING_INFO, rmslevel), 4 + 32 * 4);
        assert_eq!(offset_of!(FMOD_DSP_METERING_INFO, numchannels), 4 + 64 * 4);
    }

    #[test]
    fn test_parameter_desc_layout() {
        assert_eq!(offset_of!(FMOD_DSP_PARAMETER_DESC, name), 4);
        assert_eq!(offset_of!(FMOD_DSP_PARAMETER_DESC, label), 20);
        assert_eq!(
            offset_of!(FMOD_DSP_PARAMETER_DESC, description),
            if size_of::<usize>() == 8 { 40 } else { 36 }
        );
    }

    #[test]
    fn test_createsoundexinfo_default_sets_cbsize() {
        let info = FMOD_CREATESOUNDEXINFO::default();
        assert_eq!(info.cbsize as usize, size_of::<FMOD_CREATESOUNDEXINFO>());
        assert!(info.dlsname.is_null());
        assert!(info.fsbguid.is_null());
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(to_bool(true), FMOD_TRUE);
        assert_eq!(to_bool(false), FMOD_FALSE);
        assert!(from_bool(1));
        assert!(from_bool(-1));
        assert!(!from_bool(0));
    }
}
