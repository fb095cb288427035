use std::ptr;

use libc::c_char;

use super::{Bank, Bus, EventDescription, ParameterDescription, ParameterValue, Vca};
use crate::channel_control;
use crate::enums::LoadMemoryMode;
use crate::error::{Error, Result};
use crate::ffi::studio_tables::StudioSystemFns;
use crate::ffi::{
    self, fmod_call, to_bool, FMOD_3D_ATTRIBUTES, FMOD_GUID, FMOD_STUDIO_PARAMETER_DESCRIPTION,
    FMOD_STUDIO_SYSTEM, FMOD_VECTOR,
};
use crate::flags::{InitFlags, LoadBankFlags, StudioInitFlags};
use crate::structures::{count, Attributes3d, Guid, Vector};
use crate::system::{format_version, System};
use crate::util::{non_null, read_handles, read_sized_string, to_cstring};

fn fns() -> Result<&'static StudioSystemFns> {
    Ok(&ffi::studio_api()?.system)
}

/// The Studio runtime. Owns the core [`System`] it creates.
///
/// Not `Copy`: `release` consumes it, and invalidates every bank, event
/// and bus obtained from it.
#[derive(Debug)]
pub struct StudioSystem {
    raw: *mut FMOD_STUDIO_SYSTEM,
}

// SAFETY: Studio API calls are queued to its command buffer and are safe
// from any thread unless SYNCHRONOUS_UPDATE is combined with a
// THREAD_UNSAFE core system.
unsafe impl Send for StudioSystem {}
unsafe impl Sync for StudioSystem {}

fn listener_index(listener: i32) -> Result<i32> {
    if !(0..ffi::FMOD_MAX_LISTENERS as i32).contains(&listener) {
        return Err(Error::InvalidArgument(format!(
            "listener index must be below {}, got {}",
            ffi::FMOD_MAX_LISTENERS,
            listener
        )));
    }
    Ok(listener)
}

impl StudioSystem {
    pub fn new() -> Result<StudioSystem> {
        let header_version = ffi::api()?.header_version();
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, create(&mut raw, header_version))?;
        let raw = non_null(raw, "FMOD_Studio_System_Create")?;
        log::debug!(
            "created FMOD Studio system {:p} (header version {})",
            raw,
            format_version(header_version)
        );
        Ok(StudioSystem { raw })
    }

    /// # Safety
    /// `raw` must be a live studio system handle from the loaded library.
    pub unsafe fn from_raw(raw: *mut FMOD_STUDIO_SYSTEM) -> StudioSystem {
        StudioSystem { raw }
    }

    pub fn as_raw(&self) -> *mut FMOD_STUDIO_SYSTEM {
        self.raw
    }

    pub fn initialize(&self, max_channels: i32, studio_flags: StudioInitFlags, core_flags: InitFlags) -> Result<()> {
        fmod_call!(
            fns()?,
            initialize(self.raw, max_channels, studio_flags.bits(), core_flags.bits(), ptr::null_mut())
        )?;
        log::debug!(
            "initialised FMOD Studio with {} channels, {:?}, {:?}",
            max_channels,
            studio_flags,
            core_flags
        );
        Ok(())
    }

    /// Release the studio system, its banks and its core system.
    pub fn release(self) -> Result<()> {
        let core = self.core_system().ok();
        fmod_call!(fns()?, release(self.raw))?;
        if let Some(core) = core {
            channel_control::drop_subscribers_of(core.as_raw() as usize);
        }
        log::debug!("released FMOD Studio system {:p}", self.raw);
        Ok(())
    }

    pub fn update(&self) -> Result<()> {
        fmod_call!(fns()?, update(self.raw))
    }

    /// Block until queued commands have been executed.
    pub fn flush_commands(&self) -> Result<()> {
        fmod_call!(fns()?, flush_commands(self.raw))
    }

    /// Block until pending sample loads have finished.
    pub fn flush_sample_loading(&self) -> Result<()> {
        fmod_call!(fns()?, flush_sample_loading(self.raw))
    }

    /// The core system underneath.
    ///
    /// The studio system owns it: configure it before `initialize`, and
    /// never release it directly.
    pub fn core_system(&self) -> Result<System> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_core_system(self.raw, &mut raw))?;
        Ok(unsafe { System::from_raw(non_null(raw, "FMOD_Studio_System_GetCoreSystem")?) })
    }

    /// Look up an event by path (`event:/...`) or GUID string.
    pub fn event(&self, path: &str) -> Result<EventDescription> {
        let path = to_cstring(path)?;
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_event(self.raw, path.as_ptr(), &mut raw))?;
        Ok(EventDescription::wrap(non_null(raw, "FMOD_Studio_System_GetEvent")?))
    }

    pub fn event_by_id(&self, id: &Guid) -> Result<EventDescription> {
        let id: FMOD_GUID = (*id).into();
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_event_by_id(self.raw, &id, &mut raw))?;
        Ok(EventDescription::wrap(non_null(raw, "FMOD_Studio_System_GetEventByID")?))
    }

    pub fn bus(&self, path: &str) -> Result<Bus> {
        let path = to_cstring(path)?;
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_bus(self.raw, path.as_ptr(), &mut raw))?;
        Ok(Bus::wrap(non_null(raw, "FMOD_Studio_System_GetBus")?))
    }

    pub fn vca(&self, path: &str) -> Result<Vca> {
        let path = to_cstring(path)?;
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_vca(self.raw, path.as_ptr(), &mut raw))?;
        Ok(Vca::wrap(non_null(raw, "FMOD_Studio_System_GetVCA")?))
    }

    pub fn bank(&self, path: &str) -> Result<Bank> {
        let path = to_cstring(path)?;
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_bank(self.raw, path.as_ptr(), &mut raw))?;
        Ok(Bank::wrap(non_null(raw, "FMOD_Studio_System_GetBank")?))
    }

    /// Resolve a path to its GUID. Needs the strings bank loaded.
    pub fn lookup_id(&self, path: &str) -> Result<Guid> {
        let path = to_cstring(path)?;
        let mut id = FMOD_GUID::default();
        fmod_call!(fns()?, lookup_id(self.raw, path.as_ptr(), &mut id))?;
        Ok(id.into())
    }

    /// Resolve a GUID to its path. Needs the strings bank loaded.
    pub fn lookup_path(&self, id: &Guid) -> Result<String> {
        let fns = fns()?;
        let id: FMOD_GUID = (*id).into();
        read_sized_string(|buf: *mut c_char, size, retrieved| {
            fmod_call!(fns, lookup_path(self.raw, &id, buf, size, retrieved))
        })
    }

    pub fn set_num_listeners(&self, num: i32) -> Result<()> {
        if !(1..=ffi::FMOD_MAX_LISTENERS as i32).contains(&num) {
            return Err(Error::InvalidArgument(format!(
                "listener count must be 1..={}, got {}",
                ffi::FMOD_MAX_LISTENERS,
                num
            )));
        }
        fmod_call!(fns()?, set_num_listeners(self.raw, num))
    }

    pub fn num_listeners(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_listeners(self.raw, &mut num))?;
        Ok(num)
    }

    /// Place a listener. `attenuation` overrides the position used for
    /// distance attenuation.
    pub fn set_listener_attributes(
        &self,
        listener: i32,
        attributes: &Attributes3d,
        attenuation: Option<Vector>,
    ) -> Result<()> {
        let listener = listener_index(listener)?;
        let raw: FMOD_3D_ATTRIBUTES = (*attributes).into();
        let attenuation = attenuation.map(Vector::to_raw);
        fmod_call!(
            fns()?,
            set_listener_attributes(
                self.raw,
                listener,
                &raw,
                attenuation.as_ref().map_or(ptr::null(), |v| v as *const FMOD_VECTOR)
            )
        )
    }

    /// `(attributes, attenuation_position)`.
    pub fn listener_attributes(&self, listener: i32) -> Result<(Attributes3d, Vector)> {
        let listener = listener_index(listener)?;
        let mut raw = FMOD_3D_ATTRIBUTES::default();
        let mut attenuation = FMOD_VECTOR::default();
        fmod_call!(
            fns()?,
            get_listener_attributes(self.raw, listener, &mut raw, &mut attenuation)
        )?;
        Ok((raw.into(), attenuation.into()))
    }

    pub fn load_bank_file(&self, path: &str, flags: LoadBankFlags) -> Result<Bank> {
        let c_path = to_cstring(path)?;
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, load_bank_file(self.raw, c_path.as_ptr(), flags.bits(), &mut raw))?;
        log::debug!("loaded bank {}", path);
        Ok(Bank::wrap(non_null(raw, "FMOD_Studio_System_LoadBankFile")?))
    }

    /// Load a bank from memory. The bytes are copied.
    pub fn load_bank_memory(&self, data: &[u8], flags: LoadBankFlags) -> Result<Bank> {
        if data.is_empty() {
            return Err(Error::InvalidArgument("empty bank buffer".to_string()));
        }
        let len = count(data.len())?;
        let mut raw = ptr::null_mut();
        fmod_call!(
            fns()?,
            load_bank_memory(
                self.raw,
                data.as_ptr() as *const c_char,
                len,
                LoadMemoryMode::Memory.as_raw(),
                flags.bits(),
                &mut raw
            )
        )?;
        log::debug!("loaded bank from {} bytes", data.len());
        Ok(Bank::wrap(non_null(raw, "FMOD_Studio_System_LoadBankMemory")?))
    }

    pub fn unload_all(&self) -> Result<()> {
        fmod_call!(fns()?, unload_all(self.raw))
    }

    pub fn bank_count(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_bank_count(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn bank_list(&self) -> Result<Vec<Bank>> {
        let fns = fns()?;
        let raw = read_handles(self.bank_count()?, |out, capacity, written| {
            fmod_call!(fns, get_bank_list(self.raw, out, capacity, written))
        })?;
        Ok(raw.into_iter().map(Bank::wrap).collect())
    }

    /// A global parameter's value.
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

    pub fn parameter_description_count(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_parameter_description_count(self.raw, &mut num))?;
        Ok(num)
    }

    /// Descriptions of every global parameter.
    pub fn parameter_description_list(&self) -> Result<Vec<ParameterDescription>> {
        let fns = fns()?;
        let capacity = self.parameter_description_count()?;
        if capacity <= 0 {
            return Ok(Vec::new());
        }
        let mut raw = vec![FMOD_STUDIO_PARAMETER_DESCRIPTION::default(); capacity as usize];
        let mut written = 0;
        fmod_call!(
            fns,
            get_parameter_description_list(self.raw, raw.as_mut_ptr(), capacity, &mut written)
        )?;
        raw.truncate(written.clamp(0, capacity) as usize);
        raw.iter()
            .map(|desc| unsafe { ParameterDescription::from_raw(desc) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn studio() -> StudioSystem {
        unsafe { StudioSystem::from_raw(0x80usize as *mut FMOD_STUDIO_SYSTEM) }
    }

    #[test]
    fn test_listener_count_is_bounded() {
        assert!(matches!(studio().set_num_listeners(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(studio().set_num_listeners(9), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_listener_index_is_bounded() {
        assert_eq!(listener_index(0).unwrap(), 0);
        assert_eq!(listener_index(7).unwrap(), 7);
        assert!(matches!(studio().listener_attributes(8), Err(Error::InvalidArgument(_))));
        let attributes = Attributes3d::at(Vector::ZERO);
        assert!(matches!(
            studio().set_listener_attributes(-1, &attributes, None),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_bank_memory_is_rejected() {
        let result = studio().load_bank_memory(&[], LoadBankFlags::NORMAL);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_paths_with_nul_are_rejected() {
        assert!(matches!(studio().event("event:/a\0b"), Err(Error::InvalidString(_))));
        assert!(matches!(studio().bus("bus:/\0"), Err(Error::InvalidString(_))));
        assert!(matches!(studio().vca("vca:/\0"), Err(Error::InvalidString(_))));
        assert!(matches!(studio().bank("bank:/\0"), Err(Error::InvalidString(_))));
        assert!(matches!(studio().lookup_id("event:/\0"), Err(Error::InvalidString(_))));
        assert!(matches!(
            studio().load_bank_file("Master\0.bank", LoadBankFlags::NORMAL),
            Err(Error::InvalidString(_))
        ));
        assert!(matches!(
            studio().set_parameter_by_name("Wind\0", 1.0, false),
            Err(Error::InvalidString(_))
        ));
    }
}
