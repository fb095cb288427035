use std::ptr;

use crate::channel_group::ChannelGroup;
use crate::enums::StopMode;
use crate::error::Result;
use crate::ffi::studio_tables::BusFns;
use crate::ffi::{self, fmod_call, from_bool, to_bool, FMOD_GUID, FMOD_STUDIO_BUS};
use crate::structures::Guid;
use crate::util::{handle, non_negative, non_null, read_sized_string};

handle! {
    /// A mixing bus from the Studio project (`bus:/...`).
    Bus => FMOD_STUDIO_BUS
}

fn fns() -> Result<&'static BusFns> {
    Ok(&ffi::studio_api()?.bus)
}

impl Bus {
    pub fn id(&self) -> Result<Guid> {
        let mut id = FMOD_GUID::default();
        fmod_call!(fns()?, get_id(self.raw, &mut id))?;
        Ok(id.into())
    }

    pub fn path(&self) -> Result<String> {
        let fns = fns()?;
        read_sized_string(|buf, size, retrieved| fmod_call!(fns, get_path(self.raw, buf, size, retrieved)))
    }

    /// `(volume, final_volume)`.
    pub fn volume(&self) -> Result<(f32, f32)> {
        let (mut volume, mut final_volume) = (0.0, 0.0);
        fmod_call!(fns()?, get_volume(self.raw, &mut volume, &mut final_volume))?;
        Ok((volume, final_volume))
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        let volume = non_negative(volume, "bus volume")?;
        fmod_call!(fns()?, set_volume(self.raw, volume))
    }

    pub fn paused(&self) -> Result<bool> {
        let mut paused = 0;
        fmod_call!(fns()?, get_paused(self.raw, &mut paused))?;
        Ok(from_bool(paused))
    }

    pub fn set_paused(&self, paused: bool) -> Result<()> {
        fmod_call!(fns()?, set_paused(self.raw, to_bool(paused)))
    }

    pub fn mute(&self) -> Result<bool> {
        let mut mute = 0;
        fmod_call!(fns()?, get_mute(self.raw, &mut mute))?;
        Ok(from_bool(mute))
    }

    pub fn set_mute(&self, mute: bool) -> Result<()> {
        fmod_call!(fns()?, set_mute(self.raw, to_bool(mute)))
    }

    pub fn stop_all_events(&self, mode: StopMode) -> Result<()> {
        fmod_call!(fns()?, stop_all_events(self.raw, mode.as_raw()))
    }

    /// Keep the underlying channel group alive while no events use it.
    pub fn lock_channel_group(&self) -> Result<()> {
        fmod_call!(fns()?, lock_channel_group(self.raw))
    }

    pub fn unlock_channel_group(&self) -> Result<()> {
        fmod_call!(fns()?, unlock_channel_group(self.raw))
    }

    pub fn channel_group(&self) -> Result<ChannelGroup> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_channel_group(self.raw, &mut raw))?;
        Ok(ChannelGroup::wrap(non_null(raw, "FMOD_Studio_Bus_GetChannelGroup")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_set_volume_rejects_unusable_gain() {
        let bus = unsafe { Bus::from_raw(0x80usize as *mut FMOD_STUDIO_BUS) };
        assert!(matches!(bus.set_volume(-1.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(bus.set_volume(f32::INFINITY), Err(Error::InvalidArgument(_))));
    }
}
