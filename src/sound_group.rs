//! Sound groups: shared volume and voice limits for a set of sounds.

use std::ptr;

use crate::enums::SoundGroupBehavior;
use crate::error::{Error, Result};
use crate::ffi::tables::SoundGroupFns;
use crate::ffi::{self, fmod_call, FMOD_SOUNDGROUP};
use crate::sound::Sound;
use crate::system::System;
use crate::util::{check_index, handle, non_null, non_negative, read_string};

handle! {
    SoundGroup => FMOD_SOUNDGROUP
}

fn fns() -> Result<&'static SoundGroupFns> {
    Ok(&ffi::api()?.sound_group)
}

impl SoundGroup {
    /// Release the group. Its sounds move to the master sound group.
    pub fn release(self) -> Result<()> {
        fmod_call!(fns()?, release(self.raw))
    }

    /// The owning system. Releasing the returned value releases the owner.
    pub fn system(&self) -> Result<System> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_system_object(self.raw, &mut raw))?;
        Ok(unsafe { System::from_raw(non_null(raw, "FMOD_SoundGroup_GetSystemObject")?) })
    }

    /// Limit on simultaneously audible sounds; -1 is unlimited.
    pub fn set_max_audible(&self, max: i32) -> Result<()> {
        if max < -1 {
            return Err(Error::InvalidArgument(format!("max audible must be -1 or more: {}", max)));
        }
        fmod_call!(fns()?, set_max_audible(self.raw, max))
    }

    pub fn max_audible(&self) -> Result<i32> {
        let mut max = 0;
        fmod_call!(fns()?, get_max_audible(self.raw, &mut max))?;
        Ok(max)
    }

    pub fn set_max_audible_behavior(&self, behavior: SoundGroupBehavior) -> Result<()> {
        fmod_call!(fns()?, set_max_audible_behavior(self.raw, behavior.as_raw()))
    }

    pub fn max_audible_behavior(&self) -> Result<SoundGroupBehavior> {
        let mut raw = 0;
        fmod_call!(fns()?, get_max_audible_behavior(self.raw, &mut raw))?;
        SoundGroupBehavior::try_from_raw(raw)
    }

    /// Seconds to fade when muted by the audible limit.
    pub fn set_mute_fade_speed(&self, speed: f32) -> Result<()> {
        let speed = non_negative(speed, "mute fade speed")?;
        fmod_call!(fns()?, set_mute_fade_speed(self.raw, speed))
    }

    pub fn mute_fade_speed(&self) -> Result<f32> {
        let mut speed = 0.0;
        fmod_call!(fns()?, get_mute_fade_speed(self.raw, &mut speed))?;
        Ok(speed)
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        let volume = non_negative(volume, "volume")?;
        fmod_call!(fns()?, set_volume(self.raw, volume))
    }

    pub fn volume(&self) -> Result<f32> {
        let mut volume = 0.0;
        fmod_call!(fns()?, get_volume(self.raw, &mut volume))?;
        Ok(volume)
    }

    /// Stop every channel playing a sound in this group.
    pub fn stop(&self) -> Result<()> {
        fmod_call!(fns()?, stop(self.raw))
    }

    pub fn name(&self) -> Result<String> {
        let fns = fns()?;
        read_string(|buf, len| fmod_call!(fns, get_name(self.raw, buf, len)))
    }

    pub fn num_sounds(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_sounds(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn sound(&self, index: i32) -> Result<Sound> {
        let index = check_index(index, "sound")?;
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_sound(self.raw, index, &mut raw))?;
        Ok(Sound::wrap(non_null(raw, "FMOD_SoundGroup_GetSound")?))
    }

    pub fn num_playing(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_playing(self.raw, &mut num))?;
        Ok(num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> SoundGroup {
        unsafe { SoundGroup::from_raw(0x80usize as *mut FMOD_SOUNDGROUP) }
    }

    #[test]
    fn test_max_audible_below_unlimited_is_rejected() {
        assert!(matches!(group().set_max_audible(-2), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_float_arguments_are_checked() {
        assert!(matches!(group().set_volume(f32::NAN), Err(Error::InvalidArgument(_))));
        assert!(matches!(group().set_volume(-1.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            group().set_mute_fade_speed(f32::INFINITY),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_negative_sound_index_is_rejected() {
        assert!(matches!(group().sound(-1), Err(Error::InvalidArgument(_))));
    }
}
