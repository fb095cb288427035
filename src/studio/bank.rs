use libc::c_char;

use super::{Bus, EventDescription, Vca};
use crate::enums::LoadingState;
use crate::error::Result;
use crate::ffi::studio_tables::BankFns;
use crate::ffi::{self, fmod_call, FMOD_GUID, FMOD_STUDIO_BANK};
use crate::structures::Guid;
use crate::util::{check_index, handle, read_handles, read_sized_string};

handle! {
    /// A loaded Studio bank.
    Bank => FMOD_STUDIO_BANK
}

fn fns() -> Result<&'static BankFns> {
    Ok(&ffi::studio_api()?.bank)
}

impl Bank {
    pub fn id(&self) -> Result<Guid> {
        let mut id = FMOD_GUID::default();
        fmod_call!(fns()?, get_id(self.raw, &mut id))?;
        Ok(id.into())
    }

    /// `bank:/Name`. Needs the strings bank loaded.
    pub fn path(&self) -> Result<String> {
        let fns = fns()?;
        read_sized_string(|buf, size, retrieved| fmod_call!(fns, get_path(self.raw, buf, size, retrieved)))
    }

    /// Unload the bank; its events and buses become invalid.
    pub fn unload(self) -> Result<()> {
        fmod_call!(fns()?, unload(self.raw))
    }

    /// Load the sample data of every event in the bank.
    pub fn load_sample_data(&self) -> Result<()> {
        fmod_call!(fns()?, load_sample_data(self.raw))
    }

    pub fn unload_sample_data(&self) -> Result<()> {
        fmod_call!(fns()?, unload_sample_data(self.raw))
    }

    pub fn loading_state(&self) -> Result<LoadingState> {
        let mut state = 0;
        fmod_call!(fns()?, get_loading_state(self.raw, &mut state))?;
        LoadingState::try_from_raw(state)
    }

    pub fn sample_loading_state(&self) -> Result<LoadingState> {
        let mut state = 0;
        fmod_call!(fns()?, get_sample_loading_state(self.raw, &mut state))?;
        LoadingState::try_from_raw(state)
    }

    pub fn event_count(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_event_count(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn event_list(&self) -> Result<Vec<EventDescription>> {
        let fns = fns()?;
        let raw = read_handles(self.event_count()?, |out, capacity, written| {
            fmod_call!(fns, get_event_list(self.raw, out, capacity, written))
        })?;
        Ok(raw.into_iter().map(EventDescription::wrap).collect())
    }

    pub fn bus_count(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_bus_count(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn bus_list(&self) -> Result<Vec<Bus>> {
        let fns = fns()?;
        let raw = read_handles(self.bus_count()?, |out, capacity, written| {
            fmod_call!(fns, get_bus_list(self.raw, out, capacity, written))
        })?;
        Ok(raw.into_iter().map(Bus::wrap).collect())
    }

    pub fn vca_count(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_vca_count(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn vca_list(&self) -> Result<Vec<Vca>> {
        let fns = fns()?;
        let raw = read_handles(self.vca_count()?, |out, capacity, written| {
            fmod_call!(fns, get_vca_list(self.raw, out, capacity, written))
        })?;
        Ok(raw.into_iter().map(Vca::wrap).collect())
    }

    /// Entries in a strings bank; 0 for other banks.
    pub fn string_count(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_string_count(self.raw, &mut num))?;
        Ok(num)
    }

    /// GUID and path of one strings-bank entry.
    pub fn string_info(&self, index: i32) -> Result<(Guid, String)> {
        let index = check_index(index, "string")?;
        let fns = fns()?;
        let mut id = FMOD_GUID::default();
        let path = read_sized_string(|buf: *mut c_char, size, retrieved| {
            fmod_call!(fns, get_string_info(self.raw, index, &mut id, buf, size, retrieved))
        })?;
        Ok((id.into(), path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_negative_string_index_is_rejected() {
        let bank = unsafe { Bank::from_raw(0x80usize as *mut FMOD_STUDIO_BANK) };
        assert!(matches!(bank.string_info(-1), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_banks_compare_by_handle() {
        let a = unsafe { Bank::from_raw(0x80usize as *mut FMOD_STUDIO_BANK) };
        let b = unsafe { Bank::from_raw(0x88usize as *mut FMOD_STUDIO_BANK) };
        let copy = a;
        assert_eq!(copy, a);
        assert_ne!(a, b);
        let banks: std::collections::HashSet<Bank> = [a, b, copy].into_iter().collect();
        assert_eq!(banks.len(), 2);
    }
}
