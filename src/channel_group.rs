//! Submix buses.

use std::ptr;

use crate::channel::Channel;
use crate::channel_control::ChannelControl;
use crate::dsp_connection::DspConnection;
use crate::enums::ChannelControlType;
use crate::error::Result;
use crate::ffi::tables::{ChannelGroupFns, ControlFns};
use crate::ffi::{self, fmod_call, to_bool, FMOD_CHANNELGROUP};
use crate::util::{check_index, handle, non_null, read_string};

handle! {
    /// A group of channels and child groups mixed together.
    ChannelGroup => FMOD_CHANNELGROUP
}

fn fns() -> Result<&'static ChannelGroupFns> {
    Ok(&ffi::api()?.channel_group)
}

impl ChannelControl for ChannelGroup {
    type Raw = FMOD_CHANNELGROUP;

    fn raw_control(&self) -> *mut FMOD_CHANNELGROUP {
        self.raw
    }

    fn control_fns() -> Result<&'static ControlFns<FMOD_CHANNELGROUP>> {
        Ok(&ffi::api()?.group_control)
    }

    fn control_type() -> ChannelControlType {
        ChannelControlType::ChannelGroup
    }
}

impl ChannelGroup {
    /// Release the group. Its channels move to the master group.
    pub fn release(self) -> Result<()> {
        crate::channel_control::unregister(self.raw as usize);
        fmod_call!(fns()?, release(self.raw))
    }

    /// Route `child` into this group.
    pub fn add_group(&self, child: &ChannelGroup, propagate_dsp_clock: bool) -> Result<DspConnection> {
        let mut connection = ptr::null_mut();
        fmod_call!(
            fns()?,
            add_group(self.raw, child.raw, to_bool(propagate_dsp_clock), &mut connection)
        )?;
        Ok(DspConnection::wrap(non_null(connection, "FMOD_ChannelGroup_AddGroup")?))
    }

    pub fn num_groups(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_groups(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn group(&self, index: i32) -> Result<ChannelGroup> {
        let index = check_index(index, "group")?;
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_group(self.raw, index, &mut raw))?;
        Ok(ChannelGroup::wrap(non_null(raw, "FMOD_ChannelGroup_GetGroup")?))
    }

    /// `None` for the master group.
    pub fn parent_group(&self) -> Result<Option<ChannelGroup>> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_parent_group(self.raw, &mut raw))?;
        Ok((!raw.is_null()).then(|| ChannelGroup::wrap(raw)))
    }

    pub fn name(&self) -> Result<String> {
        let fns = fns()?;
        read_string(|buf, len| fmod_call!(fns, get_name(self.raw, buf, len)))
    }

    pub fn num_channels(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_channels(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn channel(&self, index: i32) -> Result<Channel> {
        let index = check_index(index, "channel")?;
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_channel(self.raw, index, &mut raw))?;
        Ok(Channel::wrap(non_null(raw, "FMOD_ChannelGroup_GetChannel")?))
    }

    /// Child groups in index order.
    pub fn groups(&self) -> Result<Vec<ChannelGroup>> {
        (0..self.num_groups()?).map(|i| self.group(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel_control::MixMatrix;
    use crate::error::Error;

    fn group() -> ChannelGroup {
        unsafe { ChannelGroup::from_raw(0x80usize as *mut FMOD_CHANNELGROUP) }
    }

    #[test]
    fn test_negative_indices_are_rejected() {
        assert!(matches!(group().group(-1), Err(Error::InvalidArgument(_))));
        assert!(matches!(group().channel(-3), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_mix_matrix_shape_is_checked_before_the_call() {
        let matrix = MixMatrix {
            out_channels: 1,
            in_channels: 2,
            levels: vec![0.5],
        };
        assert!(matches!(group().set_mix_matrix(&matrix), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_fresh_group_has_no_subscription() {
        assert!(!group().is_subscribed());
        assert_eq!(ChannelGroup::control_type(), ChannelControlType::ChannelGroup);
        assert_eq!(group().raw_control(), group().as_raw());
    }
}
