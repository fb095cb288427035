use std::ptr;

use super::{EventDescription, ParameterId, ParameterValue};
use crate::channel_group::ChannelGroup;
use crate::enums::{EventProperty, PlaybackState, StopMode};
use crate::error::Result;
use crate::ffi::studio_tables::EventInstanceFns;
use crate::ffi::{self, fmod_call, from_bool, to_bool, FMOD_3D_ATTRIBUTES, FMOD_STUDIO_EVENTINSTANCE};
use crate::structures::Attributes3d;
use crate::system::check_reverb_instance;
use crate::util::{handle, non_negative, non_null, to_cstring};

handle! {
    /// A playable instance of an event.
    ///
    /// Instances stay valid after `release` until they stop.
    EventInstance => FMOD_STUDIO_EVENTINSTANCE
}

fn fns() -> Result<&'static EventInstanceFns> {
    Ok(&ffi::studio_api()?.event_instance)
}

impl EventInstance {
    pub fn description(&self) -> Result<EventDescription> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_description(self.raw, &mut raw))?;
        Ok(EventDescription::wrap(non_null(raw, "FMOD_Studio_EventInstance_GetDescription")?))
    }

    /// `(volume, final_volume)`; the final value includes automation.
    pub fn volume(&self) -> Result<(f32, f32)> {
        let (mut volume, mut final_volume) = (0.0, 0.0);
        fmod_call!(fns()?, get_volume(self.raw, &mut volume, &mut final_volume))?;
        Ok((volume, final_volume))
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        let volume = non_negative(volume, "volume")?;
        fmod_call!(fns()?, set_volume(self.raw, volume))
    }

    pub fn pitch(&self) -> Result<(f32, f32)> {
        let (mut pitch, mut final_pitch) = (0.0, 0.0);
        fmod_call!(fns()?, get_pitch(self.raw, &mut pitch, &mut final_pitch))?;
        Ok((pitch, final_pitch))
    }

    pub fn set_pitch(&self, pitch: f32) -> Result<()> {
        let pitch = non_negative(pitch, "pitch")?;
        fmod_call!(fns()?, set_pitch(self.raw, pitch))
    }

    pub fn three_d_attributes(&self) -> Result<Attributes3d> {
        let mut raw = FMOD_3D_ATTRIBUTES::default();
        fmod_call!(fns()?, get_3d_attributes(self.raw, &mut raw))?;
        Ok(raw.into())
    }

    pub fn set_three_d_attributes(&self, attributes: &Attributes3d) -> Result<()> {
        let raw: FMOD_3D_ATTRIBUTES = (*attributes).into();
        fmod_call!(fns()?, set_3d_attributes(self.raw, &raw))
    }

    /// Bit `n` set means listener `n` hears this instance.
    pub fn listener_mask(&self) -> Result<u32> {
        let mut mask = 0;
        fmod_call!(fns()?, get_listener_mask(self.raw, &mut mask))?;
        Ok(mask)
    }

    pub fn set_listener_mask(&self, mask: u32) -> Result<()> {
        fmod_call!(fns()?, set_listener_mask(self.raw, mask))
    }

    pub fn property(&self, property: EventProperty) -> Result<f32> {
        let mut value = 0.0;
        fmod_call!(fns()?, get_property(self.raw, property.as_raw(), &mut value))?;
        Ok(value)
    }

    /// Override a property; -1 restores the authored value.
    pub fn set_property(&self, property: EventProperty, value: f32) -> Result<()> {
        fmod_call!(fns()?, set_property(self.raw, property.as_raw(), value))
    }

    pub fn reverb_level(&self, index: i32) -> Result<f32> {
        check_reverb_instance(index)?;
        let mut level = 0.0;
        fmod_call!(fns()?, get_reverb_level(self.raw, index, &mut level))?;
        Ok(level)
    }

    pub fn set_reverb_level(&self, index: i32, level: f32) -> Result<()> {
        check_reverb_instance(index)?;
        fmod_call!(fns()?, set_reverb_level(self.raw, index, level))
    }

    pub fn paused(&self) -> Result<bool> {
        let mut paused = 0;
        fmod_call!(fns()?, get_paused(self.raw, &mut paused))?;
        Ok(from_bool(paused))
    }

    pub fn set_paused(&self, paused: bool) -> Result<()> {
        fmod_call!(fns()?, set_paused(self.raw, to_bool(paused)))
    }

    pub fn start(&self) -> Result<()> {
        fmod_call!(fns()?, start(self.raw))
    }

    pub fn stop(&self, mode: StopMode) -> Result<()> {
        fmod_call!(fns()?, stop(self.raw, mode.as_raw()))
    }

    /// Milliseconds.
    pub fn timeline_position(&self) -> Result<i32> {
        let mut position = 0;
        fmod_call!(fns()?, get_timeline_position(self.raw, &mut position))?;
        Ok(position)
    }

    pub fn set_timeline_position(&self, position: i32) -> Result<()> {
        fmod_call!(fns()?, set_timeline_position(self.raw, position))
    }

    pub fn playback_state(&self) -> Result<PlaybackState> {
        let mut state = 0;
        fmod_call!(fns()?, get_playback_state(self.raw, &mut state))?;
        PlaybackState::try_from_raw(state)
    }

    /// The core group this instance mixes into. Only available once the
    /// instance has been created by a studio update.
    pub fn channel_group(&self) -> Result<ChannelGroup> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_channel_group(self.raw, &mut raw))?;
        Ok(ChannelGroup::wrap(non_null(raw, "FMOD_Studio_EventInstance_GetChannelGroup")?))
    }

    /// Mark for release once stopped.
    pub fn release(self) -> Result<()> {
        fmod_call!(fns()?, release(self.raw))
    }

    pub fn is_virtual(&self) -> Result<bool> {
        let mut virtual_ = 0;
        fmod_call!(fns()?, is_virtual(self.raw, &mut virtual_))?;
        Ok(from_bool(virtual_))
    }

    pub fn parameter_by_name(&self, name: &str) -> Result<ParameterValue> {
        let name = to_cstring(name)?;
        let (mut value, mut final_value) = (0.0, 0.0);
        fmod_call!(
            fns()?,
            get_parameter_by_name(self.raw, name.as_ptr(), &mut value, &mut final_value)
        )?;
        Ok(ParameterValue { value, final_value })
    }

    pub fn set_parameter_by_name(&self, name: &str, value: f32, ignore_seek_speed: bool) -> Result<()> {
        let name = to_cstring(name)?;
        fmod_call!(
            fns()?,
            set_parameter_by_name(self.raw, name.as_ptr(), value, to_bool(ignore_seek_speed))
        )
    }

    pub fn parameter_by_id(&self, id: ParameterId) -> Result<ParameterValue> {
        let (mut value, mut final_value) = (0.0, 0.0);
        fmod_call!(
            fns()?,
            get_parameter_by_id(self.raw, id.into(), &mut value, &mut final_value)
        )?;
        Ok(ParameterValue { value, final_value })
    }

    pub fn set_parameter_by_id(&self, id: ParameterId, value: f32, ignore_seek_speed: bool) -> Result<()> {
        fmod_call!(
            fns()?,
            set_parameter_by_id(self.raw, id.into(), value, to_bool(ignore_seek_speed))
        )
    }

    /// Move the timeline cursor past the current sustain point.
    pub fn key_off(&self) -> Result<()> {
        fmod_call!(fns()?, key_off(self.raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn instance() -> EventInstance {
        unsafe { EventInstance::from_raw(0x80usize as *mut FMOD_STUDIO_EVENTINSTANCE) }
    }

    #[test]
    fn test_volume_and_pitch_are_checked() {
        assert!(matches!(instance().set_volume(-0.5), Err(Error::InvalidArgument(_))));
        assert!(matches!(instance().set_pitch(f32::NAN), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_reverb_index_is_bounded() {
        assert!(matches!(instance().reverb_level(4), Err(Error::InvalidArgument(_))));
        assert!(matches!(instance().set_reverb_level(-1, 0.5), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_parameter_names_with_nul_are_rejected() {
        assert!(matches!(instance().parameter_by_name("RPM\0"), Err(Error::InvalidString(_))));
        assert!(matches!(
            instance().set_parameter_by_name("RPM\0", 1000.0, true),
            Err(Error::InvalidString(_))
        ));
    }
}
