//! FMOD Studio: banks, events, buses and VCAs authored in FMOD Studio.
//!
//! The studio library is loaded next to the core library on first use
//! (see [`crate::ffi::studio_api`]).

mod bank;
mod bus;
mod event_description;
mod event_instance;
mod system;
mod vca;

pub use bank::Bank;
pub use bus::Bus;
pub use event_description::EventDescription;
pub use event_instance::EventInstance;
pub use system::StudioSystem;
pub use vca::Vca;

use crate::enums::ParameterType;
use crate::error::Result;
use crate::ffi::{FMOD_STUDIO_PARAMETER_DESCRIPTION, FMOD_STUDIO_PARAMETER_ID};
use crate::flags::ParameterFlags;
use crate::structures::Guid;
use crate::util::ptr_to_string;

/// Fast lookup key for a parameter, valid across all instances of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParameterId {
    pub data1: u32,
    pub data2: u32,
}

impl From<FMOD_STUDIO_PARAMETER_ID> for ParameterId {
    fn from(id: FMOD_STUDIO_PARAMETER_ID) -> Self {
        ParameterId {
            data1: id.data1,
            data2: id.data2,
        }
    }
}

impl From<ParameterId> for FMOD_STUDIO_PARAMETER_ID {
    fn from(id: ParameterId) -> Self {
        FMOD_STUDIO_PARAMETER_ID {
            data1: id.data1,
            data2: id.data2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescription {
    pub name: String,
    pub id: ParameterId,
    pub minimum: f32,
    pub maximum: f32,
    pub default_value: f32,
    pub parameter_type: ParameterType,
    pub flags: ParameterFlags,
    pub guid: Guid,
}

impl ParameterDescription {
    /// # Safety
    /// `raw.name` must be null or a valid C string.
    pub(crate) unsafe fn from_raw(raw: &FMOD_STUDIO_PARAMETER_DESCRIPTION) -> Result<Self> {
        Ok(ParameterDescription {
            name: ptr_to_string(raw.name).unwrap_or_default(),
            id: raw.id.into(),
            minimum: raw.minimum,
            maximum: raw.maximum,
            default_value: raw.defaultvalue,
            parameter_type: ParameterType::try_from_raw(raw.type_)?,
            flags: ParameterFlags::from_bits_retain(raw.flags),
            guid: raw.guid.into(),
        })
    }

    pub fn is_global(&self) -> bool {
        self.flags.contains(ParameterFlags::GLOBAL)
    }
}

/// A parameter's value as set, and after automation and modulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterValue {
    pub value: f32,
    pub final_value: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_parameter_description_from_raw() {
        let name = CString::new("Intensity").unwrap();
        let raw = FMOD_STUDIO_PARAMETER_DESCRIPTION {
            name: name.as_ptr(),
            id: FMOD_STUDIO_PARAMETER_ID { data1: 7, data2: 9 },
            minimum: 0.0,
            maximum: 10.0,
            defaultvalue: 2.5,
            type_: ParameterType::GameControlled.as_raw(),
            flags: ParameterFlags::GLOBAL.bits(),
            ..FMOD_STUDIO_PARAMETER_DESCRIPTION::default()
        };
        let desc = unsafe { ParameterDescription::from_raw(&raw) }.unwrap();
        assert_eq!(desc.name, "Intensity");
        assert_eq!(desc.id, ParameterId { data1: 7, data2: 9 });
        assert_eq!(desc.default_value, 2.5);
        assert_eq!(desc.parameter_type, ParameterType::GameControlled);
        assert!(desc.is_global());
    }

    #[test]
    fn test_parameter_description_rejects_unknown_type() {
        let raw = FMOD_STUDIO_PARAMETER_DESCRIPTION {
            type_: 99,
            ..FMOD_STUDIO_PARAMETER_DESCRIPTION::default()
        };
        assert!(unsafe { ParameterDescription::from_raw(&raw) }.is_err());
    }
}
