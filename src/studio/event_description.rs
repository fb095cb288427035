use std::ptr;

use super::{EventInstance, ParameterDescription};
use crate::enums::LoadingState;
use crate::error::Result;
use crate::ffi::studio_tables::EventDescriptionFns;
use crate::ffi::{
    self, fmod_call, from_bool, FMOD_GUID, FMOD_STUDIO_EVENTDESCRIPTION,
    FMOD_STUDIO_PARAMETER_DESCRIPTION,
};
use crate::structures::Guid;
use crate::util::{check_index, handle, non_null, read_handles, read_sized_string, to_cstring};

handle! {
    /// The static definition of an event, shared by all its instances.
    EventDescription => FMOD_STUDIO_EVENTDESCRIPTION
}

fn fns() -> Result<&'static EventDescriptionFns> {
    Ok(&ffi::studio_api()?.event_description)
}

impl EventDescription {
    pub fn id(&self) -> Result<Guid> {
        let mut id = FMOD_GUID::default();
        fmod_call!(fns()?, get_id(self.raw, &mut id))?;
        Ok(id.into())
    }

    pub fn path(&self) -> Result<String> {
        let fns = fns()?;
        read_sized_string(|buf, size, retrieved| fmod_call!(fns, get_path(self.raw, buf, size, retrieved)))
    }

    pub fn parameter_description_count(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_parameter_description_count(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn parameter_description_by_index(&self, index: i32) -> Result<ParameterDescription> {
        let index = check_index(index, "parameter")?;
        let mut raw = FMOD_STUDIO_PARAMETER_DESCRIPTION::default();
        fmod_call!(fns()?, get_parameter_description_by_index(self.raw, index, &mut raw))?;
        unsafe { ParameterDescription::from_raw(&raw) }
    }

    pub fn parameter_description_by_name(&self, name: &str) -> Result<ParameterDescription> {
        let name = to_cstring(name)?;
        let mut raw = FMOD_STUDIO_PARAMETER_DESCRIPTION::default();
        fmod_call!(
            fns()?,
            get_parameter_description_by_name(self.raw, name.as_ptr(), &mut raw)
        )?;
        unsafe { ParameterDescription::from_raw(&raw) }
    }

    pub fn parameter_descriptions(&self) -> Result<Vec<ParameterDescription>> {
        (0..self.parameter_description_count()?)
            .map(|i| self.parameter_description_by_index(i))
            .collect()
    }

    /// Timeline length in milliseconds; 0 for events without a timeline.
    pub fn length(&self) -> Result<i32> {
        let mut length = 0;
        fmod_call!(fns()?, get_length(self.raw, &mut length))?;
        Ok(length)
    }

    pub fn min_max_distance(&self) -> Result<(f32, f32)> {
        let (mut min, mut max) = (0.0, 0.0);
        fmod_call!(fns()?, get_min_max_distance(self.raw, &mut min, &mut max))?;
        Ok((min, max))
    }

    pub fn sound_size(&self) -> Result<f32> {
        let mut size = 0.0;
        fmod_call!(fns()?, get_sound_size(self.raw, &mut size))?;
        Ok(size)
    }

    pub fn is_snapshot(&self) -> Result<bool> {
        let mut value = 0;
        fmod_call!(fns()?, is_snapshot(self.raw, &mut value))?;
        Ok(from_bool(value))
    }

    /// True when the event stops by itself.
    pub fn is_oneshot(&self) -> Result<bool> {
        let mut value = 0;
        fmod_call!(fns()?, is_oneshot(self.raw, &mut value))?;
        Ok(from_bool(value))
    }

    pub fn is_stream(&self) -> Result<bool> {
        let mut value = 0;
        fmod_call!(fns()?, is_stream(self.raw, &mut value))?;
        Ok(from_bool(value))
    }

    pub fn is_3d(&self) -> Result<bool> {
        let mut value = 0;
        fmod_call!(fns()?, is_3d(self.raw, &mut value))?;
        Ok(from_bool(value))
    }

    pub fn is_doppler_enabled(&self) -> Result<bool> {
        let mut value = 0;
        fmod_call!(fns()?, is_doppler_enabled(self.raw, &mut value))?;
        Ok(from_bool(value))
    }

    pub fn create_instance(&self) -> Result<EventInstance> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, create_instance(self.raw, &mut raw))?;
        Ok(EventInstance::wrap(non_null(raw, "FMOD_Studio_EventDescription_CreateInstance")?))
    }

    pub fn instance_count(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_instance_count(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn instance_list(&self) -> Result<Vec<EventInstance>> {
        let fns = fns()?;
        let raw = read_handles(self.instance_count()?, |out, capacity, written| {
            fmod_call!(fns, get_instance_list(self.raw, out, capacity, written))
        })?;
        Ok(raw.into_iter().map(EventInstance::wrap).collect())
    }

    pub fn load_sample_data(&self) -> Result<()> {
        fmod_call!(fns()?, load_sample_data(self.raw))
    }

    pub fn unload_sample_data(&self) -> Result<()> {
        fmod_call!(fns()?, unload_sample_data(self.raw))
    }

    pub fn sample_loading_state(&self) -> Result<LoadingState> {
        let mut state = 0;
        fmod_call!(fns()?, get_sample_loading_state(self.raw, &mut state))?;
        LoadingState::try_from_raw(state)
    }

    /// Release every instance immediately.
    pub fn release_all_instances(&self) -> Result<()> {
        fmod_call!(fns()?, release_all_instances(self.raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn description() -> EventDescription {
        unsafe { EventDescription::from_raw(0x80usize as *mut FMOD_STUDIO_EVENTDESCRIPTION) }
    }

    #[test]
    fn test_parameter_lookups_validate_arguments() {
        assert!(matches!(
            description().parameter_description_by_index(-1),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            description().parameter_description_by_name("Speed\0"),
            Err(Error::InvalidString(_))
        ));
    }
}
