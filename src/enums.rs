//! Closed enumerations mirroring the native enum types.

use std::fmt;
use std::str::FromStr;

use libc::c_int;

use crate::error::{Error, Result};

macro_rules! ffi_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn from_raw(raw: c_int) -> Option<Self> {
                match raw {
                    $( $value => Some($name::$variant), )*
                    _ => None,
                }
            }

            pub fn as_raw(self) -> c_int {
                self as c_int
            }

            /// Like `from_raw`, but an unknown value is an error.
            pub(crate) fn try_from_raw(raw: c_int) -> Result<Self> {
                Self::from_raw(raw).ok_or(Error::UnexpectedValue {
                    kind: stringify!($name),
                    value: raw as i64,
                })
            }
        }

        impl From<$name> for c_int {
            fn from(value: $name) -> c_int {
                value.as_raw()
            }
        }
    };
}

ffi_enum! {
    /// Output backend (`FMOD_OUTPUTTYPE`).
    pub enum OutputType {
        AutoDetect = 0,
        Unknown = 1,
        NoSound = 2,
        WavWriter = 3,
        NoSoundNrt = 4,
        WavWriterNrt = 5,
        Wasapi = 6,
        Asio = 7,
        PulseAudio = 8,
        Alsa = 9,
        CoreAudio = 10,
        AudioTrack = 11,
        OpenSl = 12,
        AudioOut = 13,
        Audio3d = 14,
        WebAudio = 15,
        NnAudio = 16,
        WinSonic = 17,
        AAudio = 18,
        AudioWorklet = 19,
        Phase = 20,
        OhAudio = 21,
    }
}

impl OutputType {
    /// Lowercase name accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            OutputType::AutoDetect => "auto",
            OutputType::Unknown => "unknown",
            OutputType::NoSound => "nosound",
            OutputType::WavWriter => "wavwriter",
            OutputType::NoSoundNrt => "nosound_nrt",
            OutputType::WavWriterNrt => "wavwriter_nrt",
            OutputType::Wasapi => "wasapi",
            OutputType::Asio => "asio",
            OutputType::PulseAudio => "pulseaudio",
            OutputType::Alsa => "alsa",
            OutputType::CoreAudio => "coreaudio",
            OutputType::AudioTrack => "audiotrack",
            OutputType::OpenSl => "opensl",
            OutputType::AudioOut => "audioout",
            OutputType::Audio3d => "audio3d",
            OutputType::WebAudio => "webaudio",
            OutputType::NnAudio => "nnaudio",
            OutputType::WinSonic => "winsonic",
            OutputType::AAudio => "aaudio",
            OutputType::AudioWorklet => "audioworklet",
            OutputType::Phase => "phase",
            OutputType::OhAudio => "ohaudio",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase().replace('-', "_");
        let alias = match lower.as_str() {
            "autodetect" | "default" => Some(OutputType::AutoDetect),
            "none" | "null" => Some(OutputType::NoSound),
            "nrt" => Some(OutputType::NoSoundNrt),
            "wav" => Some(OutputType::WavWriter),
            "pulse" => Some(OutputType::PulseAudio),
            _ => None,
        };
        alias
            .or_else(|| OutputType::ALL.iter().copied().find(|o| o.name() == lower))
            .ok_or_else(|| Error::InvalidArgument(format!("unknown output type: {}", s)))
    }
}

ffi_enum! {
    /// Speaker layout (`FMOD_SPEAKERMODE`).
    pub enum SpeakerMode {
        Default = 0,
        Raw = 1,
        Mono = 2,
        Stereo = 3,
        Quad = 4,
        Surround = 5,
        FivePointOne = 6,
        SevenPointOne = 7,
        SevenPointOneFour = 8,
    }
}

impl SpeakerMode {
    pub fn name(self) -> &'static str {
        match self {
            SpeakerMode::Default => "default",
            SpeakerMode::Raw => "raw",
            SpeakerMode::Mono => "mono",
            SpeakerMode::Stereo => "stereo",
            SpeakerMode::Quad => "quad",
            SpeakerMode::Surround => "surround",
            SpeakerMode::FivePointOne => "5.1",
            SpeakerMode::SevenPointOne => "7.1",
            SpeakerMode::SevenPointOneFour => "7.1.4",
        }
    }
}

impl fmt::Display for SpeakerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpeakerMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        let alias = match lower.as_str() {
            "5point1" | "51" => Some(SpeakerMode::FivePointOne),
            "7point1" | "71" => Some(SpeakerMode::SevenPointOne),
            "7point1point4" | "714" => Some(SpeakerMode::SevenPointOneFour),
            _ => None,
        };
        alias
            .or_else(|| SpeakerMode::ALL.iter().copied().find(|m| m.name() == lower))
            .ok_or_else(|| Error::InvalidArgument(format!("unknown speaker mode: {}", s)))
    }
}

ffi_enum! {
    /// Container or codec a sound was opened with.
    pub enum SoundType {
        Unknown = 0,
        Aiff = 1,
        Asf = 2,
        Dls = 3,
        Flac = 4,
        Fsb = 5,
        It = 6,
        Midi = 7,
        Mod = 8,
        Mpeg = 9,
        OggVorbis = 10,
        Playlist = 11,
        Raw = 12,
        S3m = 13,
        User = 14,
        Wav = 15,
        Xm = 16,
        Xma = 17,
        AudioQueue = 18,
        At9 = 19,
        Vorbis = 20,
        MediaFoundation = 21,
        MediaCodec = 22,
        Fadpcm = 23,
        Opus = 24,
    }
}

ffi_enum! {
    /// Sample format of decoded data.
    pub enum SoundFormat {
        None = 0,
        Pcm8 = 1,
        Pcm16 = 2,
        Pcm24 = 3,
        Pcm32 = 4,
        PcmFloat = 5,
        Bitstream = 6,
    }
}

impl SoundFormat {
    /// Bytes per sample per channel, `None` for non-PCM formats.
    pub fn bytes_per_sample(self) -> Option<usize> {
        match self {
            SoundFormat::Pcm8 => Some(1),
            SoundFormat::Pcm16 => Some(2),
            SoundFormat::Pcm24 => Some(3),
            SoundFormat::Pcm32 | SoundFormat::PcmFloat => Some(4),
            SoundFormat::None | SoundFormat::Bitstream => None,
        }
    }
}

ffi_enum! {
    pub enum OpenState {
        Ready = 0,
        Loading = 1,
        Error = 2,
        Connecting = 3,
        Buffering = 4,
        Seeking = 5,
        Playing = 6,
        SetPosition = 7,
    }
}

ffi_enum! {
    /// What a sound group does when its audible limit is reached.
    pub enum SoundGroupBehavior {
        Fail = 0,
        Mute = 1,
        StealLowest = 2,
    }
}

ffi_enum! {
    /// Built-in effect types for `System::create_dsp_by_type`.
    pub enum DspType {
        Unknown = 0,
        Mixer = 1,
        Oscillator = 2,
        Lowpass = 3,
        ItLowpass = 4,
        Highpass = 5,
        Echo = 6,
        Fader = 7,
        Flange = 8,
        Distortion = 9,
        Normalize = 10,
        Limiter = 11,
        ParamEq = 12,
        PitchShift = 13,
        Chorus = 14,
        VstPlugin = 15,
        WinampPlugin = 16,
        ItEcho = 17,
        Compressor = 18,
        SfxReverb = 19,
        LowpassSimple = 20,
        Delay = 21,
        Tremolo = 22,
        LadspaPlugin = 23,
        Send = 24,
        Return = 25,
        HighpassSimple = 26,
        Pan = 27,
        ThreeEq = 28,
        Fft = 29,
        LoudnessMeter = 30,
        EnvelopeFollower = 31,
        ConvolutionReverb = 32,
        ChannelMix = 33,
        Transceiver = 34,
        ObjectPan = 35,
        MultibandEq = 36,
    }
}

ffi_enum! {
    pub enum DspConnectionType {
        Standard = 0,
        Sidechain = 1,
        Send = 2,
        SendSidechain = 3,
    }
}

ffi_enum! {
    pub enum DspParameterType {
        Float = 0,
        Int = 1,
        Bool = 2,
        Data = 3,
    }
}

ffi_enum! {
    /// Where a sound tag came from.
    pub enum TagType {
        Unknown = 0,
        Id3v1 = 1,
        Id3v2 = 2,
        VorbisComment = 3,
        Shoutcast = 4,
        Icecast = 5,
        Asf = 6,
        Midi = 7,
        Playlist = 8,
        Fmod = 9,
        User = 10,
    }
}

ffi_enum! {
    /// Encoding of a tag's payload.
    pub enum TagDataType {
        Binary = 0,
        Int = 1,
        Float = 2,
        String = 3,
        StringUtf16 = 4,
        StringUtf16Be = 5,
        StringUtf8 = 6,
    }
}

ffi_enum! {
    pub enum ChannelControlType {
        Channel = 0,
        ChannelGroup = 1,
    }
}

ffi_enum! {
    pub enum ChannelControlCallbackType {
        End = 0,
        VirtualVoice = 1,
        SyncPoint = 2,
        Occlusion = 3,
    }
}

ffi_enum! {
    /// Destination of native debug output.
    pub enum DebugMode {
        Tty = 0,
        File = 1,
        Callback = 2,
    }
}

ffi_enum! {
    /// Loading state of a bank or of sample data.
    pub enum LoadingState {
        Unloading = 0,
        Unloaded = 1,
        Loading = 2,
        Loaded = 3,
        Error = 4,
    }
}

ffi_enum! {
    pub enum PlaybackState {
        Playing = 0,
        Sustaining = 1,
        Stopped = 2,
        Starting = 3,
        Stopping = 4,
    }
}

ffi_enum! {
    pub enum StopMode {
        AllowFadeout = 0,
        Immediate = 1,
    }
}

ffi_enum! {
    /// Whether `load_bank_memory` copies the buffer or points into it.
    pub enum LoadMemoryMode {
        Memory = 0,
        MemoryPoint = 1,
    }
}

ffi_enum! {
    pub enum ParameterType {
        GameControlled = 0,
        AutomaticDistance = 1,
        AutomaticEventConeAngle = 2,
        AutomaticEventOrientation = 3,
        AutomaticDirection = 4,
        AutomaticElevation = 5,
        AutomaticListenerOrientation = 6,
        AutomaticSpeed = 7,
        AutomaticSpeedAbsolute = 8,
        AutomaticDistanceNormalized = 9,
    }
}

ffi_enum! {
    /// Per-instance overrides for `EventInstance::set_property`.
    pub enum EventProperty {
        ChannelPriority = 0,
        ScheduleDelay = 1,
        ScheduleLookahead = 2,
        MinimumDistance = 3,
        MaximumDistance = 4,
        Cooldown = 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, OutputType::AutoDetect)]
    #[case(4, OutputType::NoSoundNrt)]
    #[case(9, OutputType::Alsa)]
    #[case(19, OutputType::AudioWorklet)]
    #[case(20, OutputType::Phase)]
    #[case(21, OutputType::OhAudio)]
    fn test_output_type_mapping(#[case] raw: c_int, #[case] expected: OutputType) {
        assert_eq!(OutputType::from_raw(raw), Some(expected));
        assert_eq!(expected.as_raw(), raw);
    }

    #[test]
    fn test_enum_values() {
        assert_eq!(c_int::from(SoundType::OggVorbis), 10);
        assert_eq!(c_int::from(SoundType::Wav), 15);
        assert_eq!(c_int::from(SoundType::Opus), 24);
        assert_eq!(DspType::MultibandEq.as_raw(), 36);
        assert_eq!(EventProperty::Cooldown.as_raw(), 5);
    }

    #[test]
    fn test_out_of_range_is_none() {
        assert_eq!(OutputType::from_raw(22), None);
        assert_eq!(SpeakerMode::from_raw(-1), None);
        assert_eq!(DspType::from_raw(37), None);
        assert_eq!(PlaybackState::from_raw(5), None);
    }

    #[test]
    fn test_try_from_raw_reports_kind() {
        match OpenState::try_from_raw(42) {
            Err(Error::UnexpectedValue { kind, value }) => {
                assert_eq!(kind, "OpenState");
                assert_eq!(value, 42);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_all_variants_round_trip() {
        for dsp in DspType::ALL {
            assert_eq!(DspType::from_raw(dsp.as_raw()), Some(*dsp));
        }
        assert_eq!(DspType::ALL.len(), 37);
        assert_eq!(SoundType::ALL.len(), 25);
        assert_eq!(ParameterType::ALL.len(), 10);
    }

    #[rstest]
    #[case("auto", OutputType::AutoDetect)]
    #[case("NOSOUND", OutputType::NoSound)]
    #[case("nosound-nrt", OutputType::NoSoundNrt)]
    #[case("pulse", OutputType::PulseAudio)]
    #[case("alsa", OutputType::Alsa)]
    #[case("wavwriter", OutputType::WavWriter)]
    #[case("Phase", OutputType::Phase)]
    #[case("ohaudio", OutputType::OhAudio)]
    fn test_parse_output(#[case] input: &str, #[case] expected: OutputType) {
        assert_eq!(input.parse::<OutputType>().unwrap(), expected);
    }

    #[test]
    fn test_parse_output_invalid() {
        assert!("jack".parse::<OutputType>().is_err());
    }

    #[rstest]
    #[case("stereo", SpeakerMode::Stereo)]
    #[case("5.1", SpeakerMode::FivePointOne)]
    #[case("71", SpeakerMode::SevenPointOne)]
    #[case("7.1.4", SpeakerMode::SevenPointOneFour)]
    #[case("Mono", SpeakerMode::Mono)]
    fn test_parse_speaker_mode(#[case] input: &str, #[case] expected: SpeakerMode) {
        assert_eq!(input.parse::<SpeakerMode>().unwrap(), expected);
    }

    #[test]
    fn test_names_parse_back() {
        for output in OutputType::ALL {
            assert_eq!(output.name().parse::<OutputType>().unwrap(), *output);
        }
        for mode in SpeakerMode::ALL {
            assert_eq!(mode.to_string().parse::<SpeakerMode>().unwrap(), *mode);
        }
    }

    #[test]
    fn test_bytes_per_sample() {
        assert_eq!(SoundFormat::Pcm16.bytes_per_sample(), Some(2));
        assert_eq!(SoundFormat::Pcm24.bytes_per_sample(), Some(3));
        assert_eq!(SoundFormat::Bitstream.bytes_per_sample(), None);
    }
}
