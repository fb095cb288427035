//! Sample data containers: loaded samples, streams and subsounds.

use std::ptr;
use std::slice;

use libc::{c_char, c_int, c_uint, c_void};

use crate::channel::LoopPoints;
use crate::channel_control::copy_points;
use crate::enums::{SoundFormat, SoundType, TagDataType, TagType};
use crate::error::{Error, FmodResult, Result};
use crate::ffi::tables::SoundFns;
use crate::ffi::{self, fmod_call, from_bool, FMOD_SOUND, FMOD_SYNCPOINT, FMOD_TAG, FMOD_VECTOR};
use crate::flags::{Mode, TimeUnit};
use crate::sound_group::SoundGroup;
use crate::structures::{count, ConeSettings, OpenStateInfo, SoundFormatInfo, Vector};
use crate::system::System;
use crate::util::{handle, non_null, ptr_to_string, read_string, to_cstring};

handle! {
    /// A sample, stream or subsound created by a `System`.
    Sound => FMOD_SOUND
}

handle! {
    /// A named marker inside a sound. Owned by its sound.
    SyncPoint => FMOD_SYNCPOINT
}

fn fns() -> Result<&'static SoundFns> {
    Ok(&ffi::api()?.sound)
}

/// Decoded payload of a [`Tag`].
#[derive(Debug, Clone, PartialEq)]
pub enum TagData {
    Binary(Vec<u8>),
    Int(i64),
    Float(f64),
    String(String),
}

impl TagData {
    /// Decode a raw tag payload according to its declared encoding.
    ///
    /// Integers and floats of an unexpected width fall back to `Binary`.
    pub fn decode(data_type: TagDataType, bytes: &[u8]) -> TagData {
        match data_type {
            TagDataType::Binary => TagData::Binary(bytes.to_vec()),
            TagDataType::Int => match bytes.len() {
                1 => TagData::Int(bytes[0] as i8 as i64),
                2 => TagData::Int(i16::from_ne_bytes([bytes[0], bytes[1]]) as i64),
                4 => TagData::Int(i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as i64),
                8 => {
                    let mut word = [0u8; 8];
                    word.copy_from_slice(bytes);
                    TagData::Int(i64::from_ne_bytes(word))
                }
                _ => TagData::Binary(bytes.to_vec()),
            },
            TagDataType::Float => match bytes.len() {
                4 => TagData::Float(f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64),
                8 => {
                    let mut word = [0u8; 8];
                    word.copy_from_slice(bytes);
                    TagData::Float(f64::from_ne_bytes(word))
                }
                _ => TagData::Binary(bytes.to_vec()),
            },
            // Plain strings are ISO-8859-1.
            TagDataType::String => TagData::String(
                trim_nul(bytes).iter().map(|&b| b as char).collect(),
            ),
            TagDataType::StringUtf8 => {
                let text = trim_nul(bytes);
                let text = text.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(text);
                TagData::String(String::from_utf8_lossy(text).into_owned())
            }
            TagDataType::StringUtf16 => TagData::String(decode_utf16(bytes, false)),
            TagDataType::StringUtf16Be => TagData::String(decode_utf16(bytes, true)),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagData::String(s) => Some(s),
            _ => None,
        }
    }
}

fn trim_nul(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    &bytes[..end]
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> String {
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .take_while(|&unit| unit != 0)
        .collect();
    if units.first() == Some(&0xFEFF) {
        units.remove(0);
    }
    String::from_utf16_lossy(&units)
}

/// Metadata attached to a sound (ID3, Vorbis comments, stream titles...).
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub tag_type: TagType,
    pub data_type: TagDataType,
    pub name: String,
    pub data: TagData,
    /// Set when the tag changed since it was last read (net streams).
    pub updated: bool,
}

impl Tag {
    /// # Safety
    /// `raw.name` and `raw.data` must be valid for the duration of the call.
    unsafe fn from_raw(raw: &FMOD_TAG) -> Result<Tag> {
        let data_type = TagDataType::try_from_raw(raw.datatype)?;
        let bytes = if raw.data.is_null() || raw.datalen == 0 {
            &[][..]
        } else {
            slice::from_raw_parts(raw.data as *const u8, raw.datalen as usize)
        };
        Ok(Tag {
            tag_type: TagType::try_from_raw(raw.type_)?,
            data_type,
            name: ptr_to_string(raw.name).unwrap_or_default(),
            data: TagData::decode(data_type, bytes),
            updated: from_bool(raw.updated),
        })
    }
}

/// Count of tags on a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCount {
    pub total: i32,
    /// Tags updated since the last `tag` call.
    pub updated: i32,
}

/// Default playback frequency and priority for new channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundDefaults {
    pub frequency: f32,
    pub priority: i32,
}

impl Sound {
    pub fn release(self) -> Result<()> {
        fmod_call!(fns()?, release(self.raw))
    }

    /// The system that created this sound.
    ///
    /// The returned value aliases the owner; releasing it releases the
    /// owner's system.
    pub fn system(&self) -> Result<System> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_system_object(self.raw, &mut raw))?;
        Ok(unsafe { System::from_raw(non_null(raw, "FMOD_Sound_GetSystemObject")?) })
    }

    pub fn name(&self) -> Result<String> {
        let fns = fns()?;
        read_string(|buf, len| fmod_call!(fns, get_name(self.raw, buf, len)))
    }

    pub fn format(&self) -> Result<SoundFormatInfo> {
        let (mut sound_type, mut format, mut channels, mut bits) = (0, 0, 0, 0);
        fmod_call!(
            fns()?,
            get_format(self.raw, &mut sound_type, &mut format, &mut channels, &mut bits)
        )?;
        Ok(SoundFormatInfo {
            sound_type: SoundType::try_from_raw(sound_type)?,
            format: SoundFormat::try_from_raw(format)?,
            channels,
            bits,
        })
    }

    pub fn length(&self, unit: TimeUnit) -> Result<u32> {
        let mut length = 0;
        fmod_call!(fns()?, get_length(self.raw, &mut length, unit.bits()))?;
        Ok(length)
    }

    pub fn num_subsounds(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_sub_sounds(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn subsound(&self, index: i32) -> Result<Sound> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_sub_sound(self.raw, index, &mut raw))?;
        Ok(Sound::wrap(non_null(raw, "FMOD_Sound_GetSubSound")?))
    }

    /// `None` when this is not a subsound.
    pub fn subsound_parent(&self) -> Result<Option<Sound>> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_sub_sound_parent(self.raw, &mut raw))?;
        Ok((!raw.is_null()).then(|| Sound::wrap(raw)))
    }

    pub fn num_tags(&self) -> Result<TagCount> {
        let (mut total, mut updated) = (0, 0);
        fmod_call!(fns()?, get_num_tags(self.raw, &mut total, &mut updated))?;
        Ok(TagCount { total, updated })
    }

    /// Read a tag by index, or the `index`th tag called `name`.
    ///
    /// An index of -1 returns the next updated tag.
    pub fn tag(&self, name: Option<&str>, index: i32) -> Result<Tag> {
        let name = name.map(to_cstring).transpose()?;
        let name_ptr = name.as_ref().map_or(ptr::null(), |n| n.as_ptr());
        let mut raw = FMOD_TAG::default();
        fmod_call!(fns()?, get_tag(self.raw, name_ptr, index, &mut raw))?;
        unsafe { Tag::from_raw(&raw) }
    }

    /// Every tag, by index.
    pub fn tags(&self) -> Result<Vec<Tag>> {
        let total = self.num_tags()?.total;
        (0..total).map(|i| self.tag(None, i)).collect()
    }

    pub fn open_state(&self) -> Result<OpenStateInfo> {
        let mut state = 0;
        let mut percent: c_uint = 0;
        let (mut starving, mut disk_busy) = (0, 0);
        fmod_call!(
            fns()?,
            get_open_state(self.raw, &mut state, &mut percent, &mut starving, &mut disk_busy)
        )?;
        Ok(OpenStateInfo {
            state: crate::enums::OpenState::try_from_raw(state)?,
            percent_buffered: percent,
            starving: from_bool(starving),
            disk_busy: from_bool(disk_busy),
        })
    }

    /// Decode raw sample data into `buffer`, returning the bytes written.
    ///
    /// End of data yields a short count, then 0.
    pub fn read_data(&self, buffer: &mut [u8]) -> Result<usize> {
        let len = c_uint::try_from(buffer.len())
            .map_err(|_| Error::InvalidArgument(format!("read buffer too large: {}", buffer.len())))?;
        let mut read: c_uint = 0;
        match fmod_call!(
            fns()?,
            read_data(self.raw, buffer.as_mut_ptr() as *mut c_void, len, &mut read)
        ) {
            Ok(()) => Ok(read as usize),
            Err(e) if e.is(FmodResult::ErrFileEof) => Ok(read as usize),
            Err(e) => Err(e),
        }
    }

    /// Seek the decoder used by `read_data` to a PCM offset.
    pub fn seek_data(&self, pcm: u32) -> Result<()> {
        fmod_call!(fns()?, seek_data(self.raw, pcm))
    }

    pub fn set_sound_group(&self, group: &SoundGroup) -> Result<()> {
        fmod_call!(fns()?, set_sound_group(self.raw, group.as_raw()))
    }

    pub fn sound_group(&self) -> Result<SoundGroup> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_sound_group(self.raw, &mut raw))?;
        Ok(SoundGroup::wrap(non_null(raw, "FMOD_Sound_GetSoundGroup")?))
    }

    pub fn num_sync_points(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_sync_points(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn sync_point(&self, index: i32) -> Result<SyncPoint> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_sync_point(self.raw, index, &mut raw))?;
        Ok(SyncPoint::wrap(non_null(raw, "FMOD_Sound_GetSyncPoint")?))
    }

    /// Name and offset of a sync point.
    pub fn sync_point_info(&self, point: &SyncPoint, unit: TimeUnit) -> Result<(String, u32)> {
        let fns = fns()?;
        let mut offset = 0;
        let name = read_string(|buf: *mut c_char, len: c_int| {
            fmod_call!(
                fns,
                get_sync_point_info(self.raw, point.raw, buf, len, &mut offset, unit.bits())
            )
        })?;
        Ok((name, offset))
    }

    pub fn add_sync_point(&self, offset: u32, unit: TimeUnit, name: &str) -> Result<SyncPoint> {
        let name = to_cstring(name)?;
        let mut raw = ptr::null_mut();
        fmod_call!(
            fns()?,
            add_sync_point(self.raw, offset, unit.bits(), name.as_ptr(), &mut raw)
        )?;
        Ok(SyncPoint::wrap(non_null(raw, "FMOD_Sound_AddSyncPoint")?))
    }

    pub fn delete_sync_point(&self, point: SyncPoint) -> Result<()> {
        fmod_call!(fns()?, delete_sync_point(self.raw, point.raw))
    }

    pub fn set_mode(&self, mode: Mode) -> Result<()> {
        fmod_call!(fns()?, set_mode(self.raw, mode.bits()))
    }

    pub fn mode(&self) -> Result<Mode> {
        let mut mode = 0;
        fmod_call!(fns()?, get_mode(self.raw, &mut mode))?;
        Ok(Mode::from_bits_retain(mode))
    }

    pub fn set_loop_count(&self, count: i32) -> Result<()> {
        fmod_call!(fns()?, set_loop_count(self.raw, count))
    }

    pub fn loop_count(&self) -> Result<i32> {
        let mut count = 0;
        fmod_call!(fns()?, get_loop_count(self.raw, &mut count))?;
        Ok(count)
    }

    pub fn set_loop_points(&self, points: LoopPoints) -> Result<()> {
        fmod_call!(
            fns()?,
            set_loop_points(
                self.raw,
                points.start,
                points.start_unit.bits(),
                points.end,
                points.end_unit.bits()
            )
        )
    }

    pub fn loop_points(&self, unit: TimeUnit) -> Result<LoopPoints> {
        let (mut start, mut end) = (0, 0);
        fmod_call!(
            fns()?,
            get_loop_points(self.raw, &mut start, unit.bits(), &mut end, unit.bits())
        )?;
        Ok(LoopPoints::new(start, end, unit))
    }

    /// Channels in a MOD/S3M/XM/IT/MIDI song.
    pub fn music_num_channels(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_music_num_channels(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn set_music_channel_volume(&self, channel: i32, volume: f32) -> Result<()> {
        fmod_call!(fns()?, set_music_channel_volume(self.raw, channel, volume))
    }

    pub fn music_channel_volume(&self, channel: i32) -> Result<f32> {
        let mut volume = 0.0;
        fmod_call!(fns()?, get_music_channel_volume(self.raw, channel, &mut volume))?;
        Ok(volume)
    }

    pub fn set_music_speed(&self, speed: f32) -> Result<()> {
        fmod_call!(fns()?, set_music_speed(self.raw, speed))
    }

    pub fn music_speed(&self) -> Result<f32> {
        let mut speed = 0.0;
        fmod_call!(fns()?, get_music_speed(self.raw, &mut speed))?;
        Ok(speed)
    }

    pub fn set_defaults(&self, defaults: SoundDefaults) -> Result<()> {
        fmod_call!(fns()?, set_defaults(self.raw, defaults.frequency, defaults.priority))
    }

    pub fn defaults(&self) -> Result<SoundDefaults> {
        let (mut frequency, mut priority) = (0.0, 0);
        fmod_call!(fns()?, get_defaults(self.raw, &mut frequency, &mut priority))?;
        Ok(SoundDefaults { frequency, priority })
    }

    pub fn set_three_d_min_max_distance(&self, min: f32, max: f32) -> Result<()> {
        fmod_call!(fns()?, set_3d_min_max_distance(self.raw, min, max))
    }

    pub fn three_d_min_max_distance(&self) -> Result<(f32, f32)> {
        let (mut min, mut max) = (0.0, 0.0);
        fmod_call!(fns()?, get_3d_min_max_distance(self.raw, &mut min, &mut max))?;
        Ok((min, max))
    }

    pub fn set_three_d_cone_settings(&self, cone: ConeSettings) -> Result<()> {
        fmod_call!(
            fns()?,
            set_3d_cone_settings(self.raw, cone.inside_angle, cone.outside_angle, cone.outside_volume)
        )
    }

    pub fn three_d_cone_settings(&self) -> Result<ConeSettings> {
        let (mut inside, mut outside, mut volume) = (0.0, 0.0, 0.0);
        fmod_call!(
            fns()?,
            get_3d_cone_settings(self.raw, &mut inside, &mut outside, &mut volume)
        )?;
        Ok(ConeSettings {
            inside_angle: inside,
            outside_angle: outside,
            outside_volume: volume,
        })
    }

    /// Rolloff curve for channels playing this sound. The points are
    /// referenced, not copied, so they must be `'static`.
    pub fn set_three_d_custom_rolloff(&self, points: &'static [Vector]) -> Result<()> {
        let num = count(points.len())?;
        fmod_call!(
            fns()?,
            set_3d_custom_rolloff(self.raw, points.as_ptr() as *mut FMOD_VECTOR, num)
        )
    }

    pub fn three_d_custom_rolloff(&self) -> Result<Vec<Vector>> {
        let mut points = ptr::null_mut();
        let mut num = 0;
        fmod_call!(fns()?, get_3d_custom_rolloff(self.raw, &mut points, &mut num))?;
        Ok(unsafe { copy_points(points, num) })
    }

    /// Lock `length` bytes of sample memory starting at `offset`.
    ///
    /// The region may wrap, in which case the lock exposes two slices.
    /// Unlocks on drop.
    pub fn lock(&self, offset: u32, length: u32) -> Result<SoundLock<'_>> {
        let (mut ptr1, mut ptr2) = (ptr::null_mut(), ptr::null_mut());
        let (mut len1, mut len2) = (0, 0);
        fmod_call!(
            fns()?,
            lock(self.raw, offset, length, &mut ptr1, &mut ptr2, &mut len1, &mut len2)
        )?;
        Ok(SoundLock {
            sound: self,
            ptr1,
            ptr2,
            len1,
            len2,
        })
    }
}

/// Locked sample memory of a [`Sound`].
#[derive(Debug)]
pub struct SoundLock<'a> {
    sound: &'a Sound,
    ptr1: *mut c_void,
    ptr2: *mut c_void,
    len1: c_uint,
    len2: c_uint,
}

impl SoundLock<'_> {
    pub fn first(&self) -> &[u8] {
        unsafe { bytes(self.ptr1, self.len1) }
    }

    /// The wrapped-around part, empty when the region did not wrap.
    pub fn second(&self) -> &[u8] {
        unsafe { bytes(self.ptr2, self.len2) }
    }

    pub fn first_mut(&mut self) -> &mut [u8] {
        unsafe { bytes_mut(self.ptr1, self.len1) }
    }

    pub fn second_mut(&mut self) -> &mut [u8] {
        unsafe { bytes_mut(self.ptr2, self.len2) }
    }

    pub fn len(&self) -> usize {
        self.len1 as usize + self.len2 as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unlock now and report the result.
    pub fn unlock(self) -> Result<()> {
        let result = self.release_lock();
        std::mem::forget(self);
        result
    }

    fn release_lock(&self) -> Result<()> {
        fmod_call!(
            fns()?,
            unlock(self.sound.raw, self.ptr1, self.ptr2, self.len1, self.len2)
        )
    }
}

impl Drop for SoundLock<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.release_lock() {
            log::warn!("failed to unlock sound {:p}: {}", self.sound.raw, e);
        }
    }
}

/// # Safety
/// `ptr` must be null or valid for `len` bytes for the returned lifetime.
unsafe fn bytes<'a>(ptr: *mut c_void, len: c_uint) -> &'a [u8] {
    if ptr.is_null() || len == 0 {
        &[]
    } else {
        slice::from_raw_parts(ptr as *const u8, len as usize)
    }
}

/// # Safety
/// As for [`bytes`], with exclusive access.
unsafe fn bytes_mut<'a>(ptr: *mut c_void, len: c_uint) -> &'a mut [u8] {
    if ptr.is_null() || len == 0 {
        &mut []
    } else {
        slice::from_raw_parts_mut(ptr as *mut u8, len as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::ffi::CString;

    #[rstest]
    #[case(vec![0x7f], 127)]
    #[case(vec![0xff], -1)]
    #[case(2024i16.to_ne_bytes().to_vec(), 2024)]
    #[case((-5i32).to_ne_bytes().to_vec(), -5)]
    #[case(1_i64.wrapping_shl(40).to_ne_bytes().to_vec(), 1 << 40)]
    fn test_decode_int(#[case] bytes: Vec<u8>, #[case] expected: i64) {
        assert_eq!(TagData::decode(TagDataType::Int, &bytes), TagData::Int(expected));
    }

    #[test]
    fn test_decode_int_odd_width_is_binary() {
        assert_eq!(
            TagData::decode(TagDataType::Int, &[1, 2, 3]),
            TagData::Binary(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_decode_float() {
        let bytes = 0.5f32.to_ne_bytes();
        assert_eq!(TagData::decode(TagDataType::Float, &bytes), TagData::Float(0.5));
        let bytes = 128.25f64.to_ne_bytes();
        assert_eq!(TagData::decode(TagDataType::Float, &bytes), TagData::Float(128.25));
    }

    #[test]
    fn test_decode_latin1_string() {
        let data = TagData::decode(TagDataType::String, b"Caf\xe9\0junk");
        assert_eq!(data.as_str(), Some("Café"));
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let data = TagData::decode(TagDataType::StringUtf8, "\u{feff}Ünïcode\0".as_bytes());
        assert_eq!(data.as_str(), Some("Ünïcode"));
    }

    #[test]
    fn test_decode_utf16_both_orders() {
        let le: Vec<u8> = [0xFEFFu16, 'h' as u16, 'i' as u16, 0]
            .iter()
            .flat_map(|u| u.to_le_bytes())
            .collect();
        let be: Vec<u8> = ['o' as u16, 'k' as u16].iter().flat_map(|u| u.to_be_bytes()).collect();
        assert_eq!(TagData::decode(TagDataType::StringUtf16, &le).as_str(), Some("hi"));
        assert_eq!(TagData::decode(TagDataType::StringUtf16Be, &be).as_str(), Some("ok"));
    }

    #[test]
    fn test_tag_from_raw() {
        let name = CString::new("TITLE").unwrap();
        let mut payload = b"Level 1\0".to_vec();
        let raw = FMOD_TAG {
            type_: TagType::VorbisComment.as_raw(),
            datatype: TagDataType::StringUtf8.as_raw(),
            name: name.as_ptr() as *mut c_char,
            data: payload.as_mut_ptr() as *mut c_void,
            datalen: payload.len() as c_uint,
            updated: 1,
        };
        let tag = unsafe { Tag::from_raw(&raw) }.unwrap();
        assert_eq!(tag.name, "TITLE");
        assert_eq!(tag.tag_type, TagType::VorbisComment);
        assert_eq!(tag.data, TagData::String("Level 1".to_string()));
        assert!(tag.updated);
    }

    #[test]
    fn test_tag_from_raw_rejects_unknown_type() {
        let raw = FMOD_TAG {
            type_: 77,
            ..FMOD_TAG::default()
        };
        assert!(matches!(
            unsafe { Tag::from_raw(&raw) },
            Err(Error::UnexpectedValue { kind: "TagType", .. })
        ));
    }

    #[test]
    fn test_lock_slices_handle_null() {
        assert!(unsafe { bytes(ptr::null_mut(), 16) }.is_empty());
        let mut data = [1u8, 2, 3, 4];
        let view = unsafe { bytes(data.as_mut_ptr() as *mut c_void, 3) };
        assert_eq!(view, &[1, 2, 3]);
    }
}
