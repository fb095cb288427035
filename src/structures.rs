//! Value types passed to and returned from the native API.

use std::ffi::CString;
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use libc::{c_int, c_uint};

use crate::enums::{SoundFormat, SoundType, SpeakerMode};
use crate::error::{Error, Result};
use crate::ffi::{
    FMOD_3D_ATTRIBUTES, FMOD_CPU_USAGE, FMOD_CREATESOUNDEXINFO, FMOD_DSP_METERING_INFO, FMOD_GUID,
    FMOD_REVERB_PROPERTIES, FMOD_VECTOR,
};
use crate::flags::{DriverState, TimeUnit};
use crate::util::to_cstring;

/// A position or direction in FMOD's left-handed coordinate space.
///
/// Laid out like `FMOD_VECTOR` so slices can be handed to the library.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0.0, 0.0, 0.0);
    pub const FORWARD: Vector = Vector::new(0.0, 0.0, 1.0);
    pub const UP: Vector = Vector::new(0.0, 1.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector { x, y, z }
    }

    pub(crate) fn to_raw(self) -> FMOD_VECTOR {
        FMOD_VECTOR {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

impl From<FMOD_VECTOR> for Vector {
    fn from(v: FMOD_VECTOR) -> Self {
        Vector::new(v.x, v.y, v.z)
    }
}

impl From<Vector> for FMOD_VECTOR {
    fn from(v: Vector) -> Self {
        v.to_raw()
    }
}

impl From<[f32; 3]> for Vector {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vector::new(x, y, z)
    }
}

impl From<(f32, f32, f32)> for Vector {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Vector::new(x, y, z)
    }
}

impl From<Vector> for [f32; 3] {
    fn from(v: Vector) -> Self {
        [v.x, v.y, v.z]
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f32) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Position, velocity and orientation of an emitter or listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attributes3d {
    pub position: Vector,
    /// Units per second.
    pub velocity: Vector,
    /// Must be unit length and perpendicular to `up`.
    pub forward: Vector,
    pub up: Vector,
}

impl Default for Attributes3d {
    fn default() -> Self {
        Attributes3d {
            position: Vector::ZERO,
            velocity: Vector::ZERO,
            forward: Vector::FORWARD,
            up: Vector::UP,
        }
    }
}

impl Attributes3d {
    pub fn at(position: Vector) -> Self {
        Attributes3d {
            position,
            ..Default::default()
        }
    }
}

impl From<FMOD_3D_ATTRIBUTES> for Attributes3d {
    fn from(a: FMOD_3D_ATTRIBUTES) -> Self {
        Attributes3d {
            position: a.position.into(),
            velocity: a.velocity.into(),
            forward: a.forward.into(),
            up: a.up.into(),
        }
    }
}

impl From<Attributes3d> for FMOD_3D_ATTRIBUTES {
    fn from(a: Attributes3d) -> Self {
        FMOD_3D_ATTRIBUTES {
            position: a.position.into(),
            velocity: a.velocity.into(),
            forward: a.forward.into(),
            up: a.up.into(),
        }
    }
}

/// 128-bit identifier used by drivers and Studio objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl From<FMOD_GUID> for Guid {
    fn from(g: FMOD_GUID) -> Self {
        Guid {
            data1: g.Data1,
            data2: g.Data2,
            data3: g.Data3,
            data4: g.Data4,
        }
    }
}

impl From<Guid> for FMOD_GUID {
    fn from(g: Guid) -> Self {
        FMOD_GUID {
            Data1: g.data1,
            Data2: g.data2,
            Data3: g.data3,
            Data4: g.data4,
        }
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{{{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}}}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl FromStr for Guid {
    type Err = Error;

    /// Accepts `{xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx}` with or without braces.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidArgument(format!("invalid GUID: {}", s));
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .unwrap_or(trimmed);

        let groups: Vec<&str> = inner.split('-').collect();
        let lengths = [8, 4, 4, 4, 12];
        if groups.len() != lengths.len()
            || groups
                .iter()
                .zip(lengths.iter())
                .any(|(g, &len)| g.len() != len || !g.chars().all(|c| c.is_ascii_hexdigit()))
        {
            return Err(invalid());
        }

        let data1 = u32::from_str_radix(groups[0], 16).map_err(|_| invalid())?;
        let data2 = u16::from_str_radix(groups[1], 16).map_err(|_| invalid())?;
        let data3 = u16::from_str_radix(groups[2], 16).map_err(|_| invalid())?;
        let tail = format!("{}{}", groups[3], groups[4]);
        let mut data4 = [0u8; 8];
        for (i, byte) in data4.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&tail[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Guid {
            data1,
            data2,
            data3,
            data4,
        })
    }
}

/// Parameters of the environmental reverb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbProperties {
    /// Milliseconds.
    pub decay_time: f32,
    /// Milliseconds.
    pub early_delay: f32,
    /// Milliseconds.
    pub late_delay: f32,
    /// Hz.
    pub hf_reference: f32,
    /// Percent.
    pub hf_decay_ratio: f32,
    /// Percent.
    pub diffusion: f32,
    /// Percent.
    pub density: f32,
    /// Hz.
    pub low_shelf_frequency: f32,
    /// dB.
    pub low_shelf_gain: f32,
    /// Hz.
    pub high_cut: f32,
    /// Percent.
    pub early_late_mix: f32,
    /// dB.
    pub wet_level: f32,
}

macro_rules! reverb_presets {
    ($( $name:ident = [$($v:expr),* $(,)?]; )*) => {
        impl ReverbProperties {
            $(
                pub const $name: ReverbProperties = ReverbProperties::from_array([$($v as f32),*]);
            )*

            /// Every preset with its upper-case name.
            pub const PRESETS: &'static [(&'static str, ReverbProperties)] = &[
                $( (stringify!($name), ReverbProperties::$name), )*
            ];
        }
    };
}

impl ReverbProperties {
    const fn from_array(v: [f32; 12]) -> Self {
        ReverbProperties {
            decay_time: v[0],
            early_delay: v[1],
            late_delay: v[2],
            hf_reference: v[3],
            hf_decay_ratio: v[4],
            diffusion: v[5],
            density: v[6],
            low_shelf_frequency: v[7],
            low_shelf_gain: v[8],
            high_cut: v[9],
            early_late_mix: v[10],
            wet_level: v[11],
        }
    }

    /// Look up a preset by name, ignoring case.
    pub fn preset(name: &str) -> Option<ReverbProperties> {
        let upper = name.to_uppercase();
        Self::PRESETS
            .iter()
            .find(|(preset, _)| *preset == upper)
            .map(|(_, props)| *props)
    }
}

reverb_presets! {
    OFF = [1000, 7, 11, 5000, 100, 100, 100, 250, 0, 20, 96, -80.0];
    GENERIC = [1500, 7, 11, 5000, 83, 100, 100, 250, 0, 14500, 96, -8.0];
    PADDEDCELL = [170, 1, 2, 5000, 10, 100, 100, 250, 0, 160, 84, -7.8];
    ROOM = [400, 2, 3, 5000, 83, 100, 100, 250, 0, 6050, 88, -9.4];
    BATHROOM = [1500, 7, 11, 5000, 54, 100, 60, 250, 0, 2900, 83, 0.5];
    LIVINGROOM = [500, 3, 4, 5000, 10, 100, 100, 250, 0, 160, 58, -19.0];
    STONEROOM = [2300, 12, 17, 5000, 64, 100, 100, 250, 0, 7800, 71, -8.5];
    AUDITORIUM = [4300, 20, 30, 5000, 59, 100, 100, 250, 0, 5850, 64, -11.7];
    CONCERTHALL = [3900, 20, 29, 5000, 70, 100, 100, 250, 0, 5650, 80, -9.8];
    CAVE = [2900, 15, 22, 5000, 100, 100, 100, 250, 0, 20000, 59, -11.3];
    ARENA = [7200, 20, 30, 5000, 33, 100, 100, 250, 0, 4500, 80, -9.6];
    HANGAR = [10000, 20, 30, 5000, 23, 100, 100, 250, 0, 3400, 72, -7.4];
    CARPETTEDHALLWAY = [300, 2, 30, 5000, 10, 100, 100, 250, 0, 500, 56, -24.0];
    HALLWAY = [1500, 7, 11, 5000, 59, 100, 100, 250, 0, 7800, 87, -5.5];
    STONECORRIDOR = [270, 13, 20, 5000, 79, 100, 100, 250, 0, 9000, 86, -6.0];
    ALLEY = [1500, 7, 11, 5000, 86, 100, 100, 250, 0, 8300, 80, -9.8];
    FOREST = [1500, 162, 88, 5000, 54, 79, 100, 250, 0, 760, 94, -12.3];
    CITY = [1500, 7, 11, 5000, 67, 50, 100, 250, 0, 4050, 66, -26.0];
    MOUNTAINS = [1500, 300, 100, 5000, 21, 27, 100, 250, 0, 1220, 82, -24.0];
    QUARRY = [1500, 61, 25, 5000, 83, 100, 100, 250, 0, 3400, 100, -5.0];
    PLAIN = [1500, 179, 100, 5000, 50, 21, 100, 250, 0, 1670, 65, -28.0];
    PARKINGLOT = [1700, 8, 12, 5000, 100, 100, 100, 250, 0, 20000, 56, -19.5];
    SEWERPIPE = [2800, 14, 21, 5000, 14, 80, 60, 250, 0, 3400, 66, 1.2];
    UNDERWATER = [1500, 7, 11, 5000, 10, 100, 100, 250, 0, 500, 92, 7.0];
}

impl Default for ReverbProperties {
    fn default() -> Self {
        ReverbProperties::GENERIC
    }
}

impl From<FMOD_REVERB_PROPERTIES> for ReverbProperties {
    fn from(r: FMOD_REVERB_PROPERTIES) -> Self {
        ReverbProperties {
            decay_time: r.DecayTime,
            early_delay: r.EarlyDelay,
            late_delay: r.LateDelay,
            hf_reference: r.HFReference,
            hf_decay_ratio: r.HFDecayRatio,
            diffusion: r.Diffusion,
            density: r.Density,
            low_shelf_frequency: r.LowShelfFrequency,
            low_shelf_gain: r.LowShelfGain,
            high_cut: r.HighCut,
            early_late_mix: r.EarlyLateMix,
            wet_level: r.WetLevel,
        }
    }
}

impl From<ReverbProperties> for FMOD_REVERB_PROPERTIES {
    fn from(r: ReverbProperties) -> Self {
        FMOD_REVERB_PROPERTIES {
            DecayTime: r.decay_time,
            EarlyDelay: r.early_delay,
            LateDelay: r.late_delay,
            HFReference: r.hf_reference,
            HFDecayRatio: r.hf_decay_ratio,
            Diffusion: r.diffusion,
            Density: r.density,
            LowShelfFrequency: r.low_shelf_frequency,
            LowShelfGain: r.low_shelf_gain,
            HighCut: r.high_cut,
            EarlyLateMix: r.early_late_mix,
            WetLevel: r.wet_level,
        }
    }
}

/// Sound projection cone, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeSettings {
    pub inside_angle: f32,
    pub outside_angle: f32,
    pub outside_volume: f32,
}

impl Default for ConeSettings {
    fn default() -> Self {
        ConeSettings {
            inside_angle: 360.0,
            outside_angle: 360.0,
            outside_volume: 1.0,
        }
    }
}

/// Per-channel override of the distance filter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceFilter {
    pub custom: bool,
    pub custom_level: f32,
    /// Hz; 0 selects the default of 1500.
    pub center_freq: f32,
}

/// Mixer CPU time, as percentages of one core.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuUsage {
    pub dsp: f32,
    pub stream: f32,
    pub geometry: f32,
    pub update: f32,
    pub convolution1: f32,
    pub convolution2: f32,
}

impl CpuUsage {
    pub fn total(&self) -> f32 {
        self.dsp + self.stream + self.geometry + self.update + self.convolution1 + self.convolution2
    }
}

impl From<FMOD_CPU_USAGE> for CpuUsage {
    fn from(c: FMOD_CPU_USAGE) -> Self {
        CpuUsage {
            dsp: c.dsp,
            stream: c.stream,
            geometry: c.geometry,
            update: c.update,
            convolution1: c.convolution1,
            convolution2: c.convolution2,
        }
    }
}

/// An output driver as enumerated by `System::driver_info`.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverInfo {
    pub name: String,
    pub guid: Guid,
    pub system_rate: i32,
    pub speaker_mode: SpeakerMode,
    pub speaker_mode_channels: i32,
}

/// A recording driver as enumerated by `System::record_driver_info`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDriverInfo {
    pub name: String,
    pub guid: Guid,
    pub system_rate: i32,
    pub speaker_mode: SpeakerMode,
    pub speaker_mode_channels: i32,
    pub state: DriverState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundFormatInfo {
    pub sound_type: SoundType,
    pub format: SoundFormat,
    pub channels: i32,
    pub bits: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenStateInfo {
    pub state: crate::enums::OpenState,
    pub percent_buffered: u32,
    pub starving: bool,
    pub disk_busy: bool,
}

/// Peak and RMS levels of the last processed block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeteringInfo {
    pub num_samples: i32,
    /// One entry per channel.
    pub peak_level: Vec<f32>,
    pub rms_level: Vec<f32>,
}

impl From<&FMOD_DSP_METERING_INFO> for MeteringInfo {
    fn from(m: &FMOD_DSP_METERING_INFO) -> Self {
        let channels = (m.numchannels.max(0) as usize).min(m.peaklevel.len());
        MeteringInfo {
            num_samples: m.numsamples,
            peak_level: m.peaklevel[..channels].to_vec(),
            rms_level: m.rmslevel[..channels].to_vec(),
        }
    }
}

/// Bytes read from disk or network since the system was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileUsage {
    pub sample_bytes_read: i64,
    pub stream_bytes_read: i64,
    pub other_bytes_read: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub current_allocated: i32,
    pub max_allocated: i32,
}

/// Extra information for `System::create_sound_ex`.
///
/// Strings handed to the library are owned here and stay valid for as
/// long as the builder lives.
#[derive(Debug)]
pub struct CreateSoundExInfo {
    raw: FMOD_CREATESOUNDEXINFO,
    dls_name: Option<CString>,
    encryption_key: Option<CString>,
}

impl Default for CreateSoundExInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateSoundExInfo {
    pub fn new() -> Self {
        CreateSoundExInfo {
            raw: FMOD_CREATESOUNDEXINFO::default(),
            dls_name: None,
            encryption_key: None,
        }
    }

    /// Bytes to read, or the size of the buffer for `OPEN_MEMORY`.
    pub fn length(mut self, length: u32) -> Self {
        self.raw.length = length;
        self
    }

    pub fn file_offset(mut self, offset: u32) -> Self {
        self.raw.fileoffset = offset;
        self
    }

    pub fn num_channels(mut self, channels: i32) -> Self {
        self.raw.numchannels = channels;
        self
    }

    pub fn default_frequency(mut self, frequency: i32) -> Self {
        self.raw.defaultfrequency = frequency;
        self
    }

    pub fn format(mut self, format: SoundFormat) -> Self {
        self.raw.format = format.as_raw();
        self
    }

    pub fn decode_buffer_size(mut self, size: u32) -> Self {
        self.raw.decodebuffersize = size;
        self
    }

    pub fn initial_subsound(mut self, index: i32) -> Self {
        self.raw.initialsubsound = index;
        self
    }

    /// Number of subsounds for a user-created sound.
    pub fn num_subsounds(mut self, count: i32) -> Self {
        self.raw.numsubsounds = count;
        self
    }

    pub fn suggested_sound_type(mut self, sound_type: SoundType) -> Self {
        self.raw.suggestedsoundtype = sound_type.as_raw();
        self
    }

    pub fn file_buffer_size(mut self, size: i32) -> Self {
        self.raw.filebuffersize = size;
        self
    }

    pub fn max_polyphony(mut self, voices: i32) -> Self {
        self.raw.maxpolyphony = voices;
        self
    }

    pub fn initial_seek_position(mut self, position: u32, unit: TimeUnit) -> Self {
        self.raw.initialseekposition = position;
        self.raw.initialseekpostype = unit.bits();
        self
    }

    /// DLS sound bank used when opening MIDI files.
    pub fn dls_name(mut self, path: &str) -> Result<Self> {
        let name = to_cstring(path)?;
        self.raw.dlsname = name.as_ptr();
        self.dls_name = Some(name);
        Ok(self)
    }

    /// Key for FSB banks built with encryption.
    pub fn encryption_key(mut self, key: &str) -> Result<Self> {
        let key = to_cstring(key)?;
        self.raw.encryptionkey = key.as_ptr();
        self.encryption_key = Some(key);
        Ok(self)
    }

    pub fn raw(&self) -> &FMOD_CREATESOUNDEXINFO {
        &self.raw
    }

    pub(crate) fn raw_mut(&mut self) -> *mut FMOD_CREATESOUNDEXINFO {
        &mut self.raw
    }

    pub(crate) fn length_is_set(&self) -> bool {
        self.raw.length != 0
    }
}

/// A non-zero `c_uint` length.
pub(crate) fn memory_length(data: &[u8]) -> Result<c_uint> {
    c_uint::try_from(data.len())
        .ok()
        .filter(|&len| len > 0)
        .ok_or_else(|| {
            Error::InvalidArgument(format!("memory buffer of {} bytes", data.len()))
        })
}

pub(crate) fn vectors_to_raw(vectors: &[Vector]) -> Vec<FMOD_VECTOR> {
    vectors.iter().map(|v| v.to_raw()).collect()
}

pub(crate) fn count(len: usize) -> Result<c_int> {
    crate::util::to_c_int(len, "element count")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::ffi::CStr;
    use std::mem::size_of;

    #[test]
    fn test_vector_conversions() {
        let v: Vector = [1.0, 2.0, 3.0].into();
        assert_eq!(v, Vector::new(1.0, 2.0, 3.0));
        assert_eq!(Vector::from((1.0, 2.0, 3.0)), v);
        let raw: FMOD_VECTOR = v.into();
        assert_eq!((raw.x, raw.y, raw.z), (1.0, 2.0, 3.0));
        assert_eq!(<[f32; 3]>::from(v + Vector::UP), [1.0, 3.0, 3.0]);
        assert_eq!(v - v, Vector::ZERO);
        assert_eq!(v * 2.0, Vector::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_vector_matches_native_layout() {
        assert_eq!(size_of::<Vector>(), size_of::<FMOD_VECTOR>());
        assert_eq!(std::mem::align_of::<Vector>(), std::mem::align_of::<FMOD_VECTOR>());
        assert_eq!(memoffset::offset_of!(Vector, z), memoffset::offset_of!(FMOD_VECTOR, z));
    }

    #[test]
    fn test_attributes_default_orientation() {
        let attrs = Attributes3d::at(Vector::new(5.0, 0.0, 0.0));
        assert_eq!(attrs.forward, Vector::FORWARD);
        assert_eq!(attrs.up, Vector::UP);
        let raw: FMOD_3D_ATTRIBUTES = attrs.into();
        assert_eq!(Attributes3d::from(raw), attrs);
    }

    #[test]
    fn test_guid_display() {
        let guid = Guid {
            data1: 0x0123_4567,
            data2: 0x89ab,
            data3: 0xcdef,
            data4: [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef],
        };
        assert_eq!(guid.to_string(), "{01234567-89ab-cdef-0123-456789abcdef}");
    }

    #[rstest]
    #[case("{01234567-89ab-cdef-0123-456789abcdef}")]
    #[case("01234567-89AB-CDEF-0123-456789ABCDEF")]
    #[case("  {01234567-89ab-cdef-0123-456789abcdef}  ")]
    fn test_guid_parse(#[case] input: &str) {
        let guid: Guid = input.parse().unwrap();
        assert_eq!(guid.data1, 0x0123_4567);
        assert_eq!(guid.data2, 0x89ab);
        assert_eq!(guid.data3, 0xcdef);
        assert_eq!(guid.data4, [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef]);
    }

    #[rstest]
    #[case("")]
    #[case("{01234567-89ab-cdef-0123}")]
    #[case("{0123456g-89ab-cdef-0123-456789abcdef}")]
    #[case("{01234567-89ab-cdef-0123-456789abcdef0}")]
    #[case("{01234567+89ab-cdef-0123-456789abcdef}")]
    fn test_guid_parse_invalid(#[case] input: &str) {
        assert!(input.parse::<Guid>().is_err());
    }

    #[test]
    fn test_guid_raw_round_trip() {
        let guid: Guid = "{ffffffff-0000-1111-2222-333344445555}".parse().unwrap();
        let raw: FMOD_GUID = guid.into();
        assert_eq!(raw.Data1, 0xffff_ffff);
        assert_eq!(Guid::from(raw), guid);
    }

    #[test]
    fn test_reverb_presets() {
        assert_eq!(ReverbProperties::PRESETS.len(), 24);
        assert_eq!(ReverbProperties::OFF.wet_level, -80.0);
        assert_eq!(ReverbProperties::CAVE.high_cut, 20000.0);
        assert_eq!(ReverbProperties::FOREST.early_delay, 162.0);
        assert_eq!(ReverbProperties::UNDERWATER.wet_level, 7.0);
        assert_eq!(ReverbProperties::preset("concerthall"), Some(ReverbProperties::CONCERTHALL));
        assert_eq!(ReverbProperties::preset("nowhere"), None);
        assert_eq!(ReverbProperties::default(), ReverbProperties::GENERIC);
    }

    #[test]
    fn test_reverb_raw_field_order() {
        let raw: FMOD_REVERB_PROPERTIES = ReverbProperties::SEWERPIPE.into();
        assert_eq!(raw.DecayTime, 2800.0);
        assert_eq!(raw.HFDecayRatio, 14.0);
        assert_eq!(raw.Density, 60.0);
        assert_eq!(raw.WetLevel, 1.2);
        assert_eq!(ReverbProperties::from(raw), ReverbProperties::SEWERPIPE);
    }

    #[test]
    fn test_metering_truncates_to_channel_count() {
        let mut raw = FMOD_DSP_METERING_INFO::default();
        raw.numsamples = 1024;
        raw.numchannels = 2;
        raw.peaklevel[0] = 0.5;
        raw.peaklevel[1] = 0.25;
        raw.peaklevel[2] = 9.0;
        let info = MeteringInfo::from(&raw);
        assert_eq!(info.num_samples, 1024);
        assert_eq!(info.peak_level, vec![0.5, 0.25]);
        assert_eq!(info.rms_level.len(), 2);
    }

    #[test]
    fn test_create_sound_ex_info_packing() {
        let info = CreateSoundExInfo::new()
            .length(4410)
            .num_channels(2)
            .default_frequency(44100)
            .format(SoundFormat::Pcm16)
            .suggested_sound_type(SoundType::Wav)
            .initial_seek_position(100, TimeUnit::MS)
            .dls_name("gm.dls")
            .unwrap();
        let raw = info.raw();
        assert_eq!(raw.cbsize as usize, size_of::<FMOD_CREATESOUNDEXINFO>());
        assert_eq!(raw.length, 4410);
        assert_eq!(raw.numchannels, 2);
        assert_eq!(raw.defaultfrequency, 44100);
        assert_eq!(raw.format, 2);
        assert_eq!(raw.suggestedsoundtype, 15);
        assert_eq!(raw.initialseekposition, 100);
        assert_eq!(raw.initialseekpostype, 1);
        assert!(raw.encryptionkey.is_null());
        let dls = unsafe { CStr::from_ptr(raw.dlsname) };
        assert_eq!(dls.to_str().unwrap(), "gm.dls");
        assert!(info.length_is_set());
    }

    #[test]
    fn test_create_sound_ex_info_survives_move() {
        let info = CreateSoundExInfo::new().encryption_key("secret").unwrap();
        let moved = Box::new(info);
        let key = unsafe { CStr::from_ptr(moved.raw().encryptionkey) };
        assert_eq!(key.to_str().unwrap(), "secret");
    }

    #[test]
    fn test_create_sound_ex_info_rejects_nul() {
        assert!(CreateSoundExInfo::new().dls_name("bad\0name").is_err());
    }

    #[test]
    fn test_memory_length() {
        assert_eq!(memory_length(&[0u8; 44]).unwrap(), 44);
        assert!(memory_length(&[]).is_err());
    }
}
