//! Bit-flag newtypes for the native flag words.
//!
//! Each type wraps the raw `c_uint` and keeps unknown bits intact, so a
//! value read back from the library always round-trips.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not, Sub};

use libc::c_uint;

macro_rules! flags {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* const $flag:ident = $value:expr; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(c_uint);

        impl $name {
            $( $(#[$fmeta])* pub const $flag: $name = $name($value); )*

            const NAMED: &'static [(&'static str, c_uint)] = &[
                $( (stringify!($flag), $value), )*
            ];

            pub const fn empty() -> Self {
                $name(0)
            }

            pub const fn bits(self) -> c_uint {
                self.0
            }

            /// Wrap raw bits, keeping any the crate has no name for.
            pub const fn from_bits_retain(bits: c_uint) -> Self {
                $name(bits)
            }

            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            pub fn remove(&mut self, other: Self) {
                self.0 &= !other.0;
            }

            pub fn set(&mut self, other: Self, value: bool) {
                if value {
                    self.insert(other);
                } else {
                    self.remove(other);
                }
            }
        }

        impl BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                $name(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl BitAnd for $name {
            type Output = Self;
            fn bitand(self, rhs: Self) -> Self {
                $name(self.0 & rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                $name(self.0 & !rhs.0)
            }
        }

        impl Not for $name {
            type Output = Self;
            fn not(self) -> Self {
                $name(!self.0)
            }
        }

        impl From<$name> for c_uint {
            fn from(flags: $name) -> c_uint {
                flags.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_flags(f, stringify!($name), self.0, Self::NAMED)
            }
        }
    };
}

/// `Name(A | B | 0x40)`; zero-valued names are only printed for an empty set.
fn write_flags(
    f: &mut fmt::Formatter<'_>,
    type_name: &str,
    bits: c_uint,
    named: &[(&str, c_uint)],
) -> fmt::Result {
    if bits == 0 {
        let zero = named.iter().find(|(_, v)| *v == 0).map(|(n, _)| *n);
        return write!(f, "{}({})", type_name, zero.unwrap_or("empty"));
    }
    let mut remaining = bits;
    let mut parts = Vec::new();
    for (name, value) in named {
        if *value != 0 && bits & value == *value && remaining & value != 0 {
            parts.push((*name).to_string());
            remaining &= !value;
        }
    }
    if remaining != 0 {
        parts.push(format!("{:#x}", remaining));
    }
    write!(f, "{}({})", type_name, parts.join(" | "))
}

flags! {
    /// Sound and channel behaviour bits (`FMOD_MODE`).
    pub struct Mode {
        const DEFAULT = 0x0000_0000;
        const LOOP_OFF = 0x0000_0001;
        const LOOP_NORMAL = 0x0000_0002;
        const LOOP_BIDI = 0x0000_0004;
        const TWO_D = 0x0000_0008;
        const THREE_D = 0x0000_0010;
        const CREATE_STREAM = 0x0000_0080;
        const CREATE_SAMPLE = 0x0000_0100;
        const CREATE_COMPRESSED_SAMPLE = 0x0000_0200;
        const OPEN_USER = 0x0000_0400;
        const OPEN_MEMORY = 0x0000_0800;
        const OPEN_MEMORY_POINT = 0x1000_0000;
        const OPEN_RAW = 0x0000_1000;
        const OPEN_ONLY = 0x0000_2000;
        const ACCURATE_TIME = 0x0000_4000;
        const MPEG_SEARCH = 0x0000_8000;
        const NONBLOCKING = 0x0001_0000;
        const UNIQUE = 0x0002_0000;
        const THREE_D_HEAD_RELATIVE = 0x0004_0000;
        const THREE_D_WORLD_RELATIVE = 0x0008_0000;
        const THREE_D_INVERSE_ROLLOFF = 0x0010_0000;
        const THREE_D_LINEAR_ROLLOFF = 0x0020_0000;
        const THREE_D_LINEAR_SQUARE_ROLLOFF = 0x0040_0000;
        const THREE_D_INVERSE_TAPERED_ROLLOFF = 0x0080_0000;
        const THREE_D_CUSTOM_ROLLOFF = 0x0400_0000;
        const THREE_D_IGNORE_GEOMETRY = 0x4000_0000;
        const IGNORE_TAGS = 0x0200_0000;
        const LOWMEM = 0x0800_0000;
        const VIRTUAL_PLAY_FROM_START = 0x8000_0000;
    }
}

impl Mode {
    /// Any of the three loop bits.
    pub fn loop_mode(self) -> Mode {
        self & (Mode::LOOP_OFF | Mode::LOOP_NORMAL | Mode::LOOP_BIDI)
    }
}

flags! {
    /// `FMOD_INITFLAGS` for `System::init`.
    pub struct InitFlags {
        const NORMAL = 0x0000_0000;
        const STREAM_FROM_UPDATE = 0x0000_0001;
        const MIX_FROM_UPDATE = 0x0000_0002;
        const THREE_D_RIGHT_HANDED = 0x0000_0004;
        const CLIP_OUTPUT = 0x0000_0008;
        const CHANNEL_LOWPASS = 0x0000_0100;
        const CHANNEL_DISTANCE_FILTER = 0x0000_0200;
        const PROFILE_ENABLE = 0x0001_0000;
        const VOL0_BECOMES_VIRTUAL = 0x0002_0000;
        const GEOMETRY_USE_CLOSEST = 0x0004_0000;
        const PREFER_DOLBY_DOWNMIX = 0x0008_0000;
        const THREAD_UNSAFE = 0x0010_0000;
        const PROFILE_METER_ALL = 0x0020_0000;
        const MEMORY_TRACKING = 0x0040_0000;
    }
}

flags! {
    /// Units for positions and lengths (`FMOD_TIMEUNIT`).
    pub struct TimeUnit {
        const MS = 0x0000_0001;
        const PCM = 0x0000_0002;
        const PCM_BYTES = 0x0000_0004;
        const RAW_BYTES = 0x0000_0008;
        const PCM_FRACTION = 0x0000_0010;
        const MOD_ORDER = 0x0000_0100;
        const MOD_ROW = 0x0000_0200;
        const MOD_PATTERN = 0x0000_0400;
    }
}

flags! {
    /// `FMOD_DEBUG_FLAGS`: severity, message type and display options.
    pub struct DebugFlags {
        const LEVEL_NONE = 0x0000_0000;
        const LEVEL_ERROR = 0x0000_0001;
        const LEVEL_WARNING = 0x0000_0002;
        const LEVEL_LOG = 0x0000_0004;
        const TYPE_MEMORY = 0x0000_0100;
        const TYPE_FILE = 0x0000_0200;
        const TYPE_CODEC = 0x0000_0400;
        const TYPE_TRACE = 0x0000_0800;
        const DISPLAY_TIMESTAMPS = 0x0001_0000;
        const DISPLAY_LINE_NUMBERS = 0x0002_0000;
        const DISPLAY_THREAD = 0x0004_0000;
    }
}

flags! {
    /// Speaker channels present in a signal (`FMOD_CHANNELMASK`).
    pub struct ChannelMask {
        const FRONT_LEFT = 0x0000_0001;
        const FRONT_RIGHT = 0x0000_0002;
        const FRONT_CENTER = 0x0000_0004;
        const LOW_FREQUENCY = 0x0000_0008;
        const SURROUND_LEFT = 0x0000_0010;
        const SURROUND_RIGHT = 0x0000_0020;
        const BACK_LEFT = 0x0000_0040;
        const BACK_RIGHT = 0x0000_0080;
        const BACK_CENTER = 0x0000_0100;
    }
}

impl ChannelMask {
    pub const MONO: ChannelMask = ChannelMask::FRONT_LEFT;
    pub const STEREO: ChannelMask = ChannelMask(0x0000_0003);
    pub const FIVE_POINT_ONE: ChannelMask = ChannelMask(0x0000_003F);
    pub const SEVEN_POINT_ONE: ChannelMask = ChannelMask(0x0000_00FF);
}

flags! {
    /// State bits reported for recording drivers.
    pub struct DriverState {
        const CONNECTED = 0x0000_0001;
        const DEFAULT = 0x0000_0002;
    }
}

flags! {
    /// `FMOD_STUDIO_INITFLAGS`.
    pub struct StudioInitFlags {
        const NORMAL = 0x0000_0000;
        const LIVE_UPDATE = 0x0000_0001;
        const ALLOW_MISSING_PLUGINS = 0x0000_0002;
        const SYNCHRONOUS_UPDATE = 0x0000_0004;
        const DEFERRED_CALLBACKS = 0x0000_0008;
        const LOAD_FROM_UPDATE = 0x0000_0010;
        const MEMORY_TRACKING = 0x0000_0020;
    }
}

flags! {
    /// `FMOD_STUDIO_LOAD_BANK_FLAGS`.
    pub struct LoadBankFlags {
        const NORMAL = 0x0000_0000;
        const NONBLOCKING = 0x0000_0001;
        const DECOMPRESS_SAMPLES = 0x0000_0002;
        const UNENCRYPTED = 0x0000_0004;
    }
}

flags! {
    /// `FMOD_STUDIO_PARAMETER_FLAGS`.
    pub struct ParameterFlags {
        const READONLY = 0x0000_0001;
        const AUTOMATIC = 0x0000_0002;
        const GLOBAL = 0x0000_0004;
        const DISCRETE = 0x0000_0008;
        const LABELED = 0x0000_0010;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bitor_and_contains() {
        let mode = Mode::LOOP_NORMAL | Mode::TWO_D | Mode::CREATE_STREAM;
        assert_eq!(mode.bits(), 0x2 | 0x8 | 0x80);
        assert!(mode.contains(Mode::TWO_D));
        assert!(mode.contains(Mode::LOOP_NORMAL | Mode::CREATE_STREAM));
        assert!(!mode.contains(Mode::THREE_D));
        assert!(mode.intersects(Mode::THREE_D | Mode::TWO_D));
    }

    #[test]
    fn test_remove_and_set() {
        let mut flags = InitFlags::PROFILE_ENABLE | InitFlags::CHANNEL_LOWPASS;
        flags.remove(InitFlags::PROFILE_ENABLE);
        assert_eq!(flags, InitFlags::CHANNEL_LOWPASS);
        flags.set(InitFlags::THREAD_UNSAFE, true);
        assert!(flags.contains(InitFlags::THREAD_UNSAFE));
        flags.set(InitFlags::THREAD_UNSAFE, false);
        assert_eq!(flags - InitFlags::CHANNEL_LOWPASS, InitFlags::empty());
    }

    #[test]
    fn test_loop_mode_extracts_loop_bits() {
        let mode = Mode::LOOP_BIDI | Mode::THREE_D | Mode::NONBLOCKING;
        assert_eq!(mode.loop_mode(), Mode::LOOP_BIDI);
        assert_eq!(Mode::TWO_D.loop_mode(), Mode::DEFAULT);
    }

    #[test]
    fn test_debug_lists_names() {
        assert_eq!(
            format!("{:?}", TimeUnit::MS | TimeUnit::PCM),
            "TimeUnit(MS | PCM)"
        );
        assert_eq!(format!("{:?}", Mode::DEFAULT), "Mode(DEFAULT)");
        assert_eq!(format!("{:?}", ParameterFlags::empty()), "ParameterFlags(empty)");
    }

    #[test]
    fn test_debug_keeps_unknown_bits() {
        let mask = ChannelMask::from_bits_retain(0x1 | 0x8000);
        assert_eq!(format!("{:?}", mask), "ChannelMask(FRONT_LEFT | 0x8000)");
    }

    #[test]
    fn test_channel_mask_layouts() {
        assert!(ChannelMask::FIVE_POINT_ONE.contains(ChannelMask::LOW_FREQUENCY));
        assert!(!ChannelMask::FIVE_POINT_ONE.contains(ChannelMask::BACK_LEFT));
        assert!(ChannelMask::SEVEN_POINT_ONE.contains(ChannelMask::FIVE_POINT_ONE));
    }

    #[test]
    fn test_vendor_values() {
        assert_eq!(Mode::OPEN_MEMORY_POINT.bits(), 0x1000_0000);
        assert_eq!(Mode::VIRTUAL_PLAY_FROM_START.bits(), 0x8000_0000);
        assert_eq!(InitFlags::MEMORY_TRACKING.bits(), 0x0040_0000);
        assert_eq!(DebugFlags::DISPLAY_THREAD.bits(), 0x0004_0000);
        assert_eq!(StudioInitFlags::MEMORY_TRACKING.bits(), 0x20);
        assert_eq!(LoadBankFlags::UNENCRYPTED.bits(), 4);
    }

    proptest! {
        #[test]
        fn prop_bits_round_trip(bits in any::<u32>()) {
            prop_assert_eq!(Mode::from_bits_retain(bits).bits(), bits);
            prop_assert_eq!(c_uint::from(InitFlags::from_bits_retain(bits)), bits);
        }

        #[test]
        fn prop_union_contains_both(a in any::<u32>(), b in any::<u32>()) {
            let (a, b) = (TimeUnit::from_bits_retain(a), TimeUnit::from_bits_retain(b));
            prop_assert!((a | b).contains(a));
            prop_assert!((a | b).contains(b));
            prop_assert_eq!((a | b) & a, a);
        }
    }
}
