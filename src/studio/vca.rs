use crate::error::Result;
use crate::ffi::studio_tables::VcaFns;
use crate::ffi::{self, fmod_call, FMOD_GUID, FMOD_STUDIO_VCA};
use crate::structures::Guid;
use crate::util::{handle, non_negative, read_sized_string};

handle! {
    /// A voltage-controlled amplifier (`vca:/...`) scaling several buses.
    Vca => FMOD_STUDIO_VCA
}

fn fns() -> Result<&'static VcaFns> {
    Ok(&ffi::studio_api()?.vca)
}

impl Vca {
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
        let volume = non_negative(volume, "VCA volume")?;
        fmod_call!(fns()?, set_volume(self.raw, volume))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_set_volume_rejects_unusable_gain() {
        let vca = unsafe { Vca::from_raw(0x80usize as *mut FMOD_STUDIO_VCA) };
        assert!(matches!(vca.set_volume(f32::NAN), Err(Error::InvalidArgument(_))));
        assert!(matches!(vca.set_volume(-0.25), Err(Error::InvalidArgument(_))));
    }
}
