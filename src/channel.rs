//! A playing instance of a sound or DSP.

use std::ptr;

use crate::channel_control::ChannelControl;
use crate::channel_group::ChannelGroup;
use crate::enums::ChannelControlType;
use crate::error::Result;
use crate::ffi::tables::{ChannelFns, ControlFns};
use crate::ffi::{self, fmod_call, from_bool, FMOD_CHANNEL};
use crate::flags::TimeUnit;
use crate::sound::Sound;
use crate::util::{handle, non_null};

handle! {
    /// A voice returned by `System::play_sound` or `System::play_dsp`.
    ///
    /// Channels are recycled by the mixer: once stolen or finished, calls
    /// fail with `ErrInvalidHandle` or `ErrChannelStolen`.
    Channel => FMOD_CHANNEL
}

fn fns() -> Result<&'static ChannelFns> {
    Ok(&ffi::api()?.channel)
}

impl ChannelControl for Channel {
    type Raw = FMOD_CHANNEL;

    fn raw_control(&self) -> *mut FMOD_CHANNEL {
        self.raw
    }

    fn control_fns() -> Result<&'static ControlFns<FMOD_CHANNEL>> {
        Ok(&ffi::api()?.channel_control)
    }

    fn control_type() -> ChannelControlType {
        ChannelControlType::Channel
    }
}

/// Loop region of a channel or sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopPoints {
    pub start: u32,
    pub start_unit: TimeUnit,
    pub end: u32,
    pub end_unit: TimeUnit,
}

impl LoopPoints {
    /// Both ends measured in the same unit.
    pub fn new(start: u32, end: u32, unit: TimeUnit) -> Self {
        LoopPoints {
            start,
            start_unit: unit,
            end,
            end_unit: unit,
        }
    }
}

impl Channel {
    /// Playback frequency in Hz.
    pub fn set_frequency(&self, frequency: f32) -> Result<()> {
        fmod_call!(fns()?, set_frequency(self.raw, frequency))
    }

    pub fn frequency(&self) -> Result<f32> {
        let mut frequency = 0.0;
        fmod_call!(fns()?, get_frequency(self.raw, &mut frequency))?;
        Ok(frequency)
    }

    /// 0 is the most important, 256 the least.
    pub fn set_priority(&self, priority: i32) -> Result<()> {
        fmod_call!(fns()?, set_priority(self.raw, priority))
    }

    pub fn priority(&self) -> Result<i32> {
        let mut priority = 0;
        fmod_call!(fns()?, get_priority(self.raw, &mut priority))?;
        Ok(priority)
    }

    pub fn set_position(&self, position: u32, unit: TimeUnit) -> Result<()> {
        fmod_call!(fns()?, set_position(self.raw, position, unit.bits()))
    }

    pub fn position(&self, unit: TimeUnit) -> Result<u32> {
        let mut position = 0;
        fmod_call!(fns()?, get_position(self.raw, &mut position, unit.bits()))?;
        Ok(position)
    }

    pub fn set_channel_group(&self, group: &ChannelGroup) -> Result<()> {
        fmod_call!(fns()?, set_channel_group(self.raw, group.as_raw()))
    }

    pub fn channel_group(&self) -> Result<ChannelGroup> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_channel_group(self.raw, &mut raw))?;
        Ok(ChannelGroup::wrap(non_null(raw, "FMOD_Channel_GetChannelGroup")?))
    }

    /// -1 loops forever, 0 plays once.
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

    pub fn is_virtual(&self) -> Result<bool> {
        let mut virtual_ = 0;
        fmod_call!(fns()?, is_virtual(self.raw, &mut virtual_))?;
        Ok(from_bool(virtual_))
    }

    /// The sound being played, or `None` for a DSP-driven channel.
    pub fn current_sound(&self) -> Result<Option<Sound>> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_current_sound(self.raw, &mut raw))?;
        Ok((!raw.is_null()).then(|| Sound::wrap(raw)))
    }

    /// Index of this channel in the system's channel pool.
    pub fn index(&self) -> Result<i32> {
        let mut index = 0;
        fmod_call!(fns()?, get_index(self.raw, &mut index))?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_points_share_unit() {
        let points = LoopPoints::new(10, 4410, TimeUnit::PCM);
        assert_eq!(points.start_unit, TimeUnit::PCM);
        assert_eq!(points.end_unit, TimeUnit::PCM);
        assert_eq!(points.end, 4410);
    }

    #[test]
    fn test_channel_handle_is_plain_data() {
        let raw = 0x40usize as *mut FMOD_CHANNEL;
        let channel = unsafe { Channel::from_raw(raw) };
        let copy = channel;
        assert_eq!(copy.as_raw(), raw);
        assert_eq!(copy.raw_control(), raw);
        assert_eq!(Channel::control_type(), ChannelControlType::Channel);
    }
}
