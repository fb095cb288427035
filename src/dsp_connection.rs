//! Edges of the DSP graph.

use std::ptr;

use crate::channel_control::MixMatrix;
use crate::dsp::Dsp;
use crate::enums::DspConnectionType;
use crate::error::Result;
use crate::ffi::tables::DspConnectionFns;
use crate::ffi::{self, fmod_call, FMOD_DSPCONNECTION};
use crate::util::{handle, non_null};

handle! {
    /// A connection from an input DSP to an output DSP.
    DspConnection => FMOD_DSPCONNECTION
}

fn fns() -> Result<&'static DspConnectionFns> {
    Ok(&ffi::api()?.dsp_connection)
}

impl DspConnection {
    /// The DSP feeding this connection.
    pub fn input(&self) -> Result<Dsp> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_input(self.raw, &mut raw))?;
        Ok(Dsp::wrap(non_null(raw, "FMOD_DSPConnection_GetInput")?))
    }

    pub fn output(&self) -> Result<Dsp> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_output(self.raw, &mut raw))?;
        Ok(Dsp::wrap(non_null(raw, "FMOD_DSPConnection_GetOutput")?))
    }

    pub fn set_mix(&self, volume: f32) -> Result<()> {
        fmod_call!(fns()?, set_mix(self.raw, volume))
    }

    pub fn mix(&self) -> Result<f32> {
        let mut volume = 0.0;
        fmod_call!(fns()?, get_mix(self.raw, &mut volume))?;
        Ok(volume)
    }

    /// Per-channel levels across the connection. Takes precedence over
    /// [`set_mix`](Self::set_mix) scaling.
    pub fn set_mix_matrix(&self, matrix: &MixMatrix) -> Result<()> {
        matrix.write(|levels, out_channels, in_channels, hop| {
            fmod_call!(
                fns()?,
                set_mix_matrix(self.raw, levels, out_channels, in_channels, hop)
            )
        })
    }

    /// An empty matrix when none was set.
    pub fn mix_matrix(&self) -> Result<MixMatrix> {
        let fns = fns()?;
        MixMatrix::read(|levels, out_channels, in_channels, hop| {
            fmod_call!(fns, get_mix_matrix(self.raw, levels, out_channels, in_channels, hop))
        })
    }

    pub fn connection_type(&self) -> Result<DspConnectionType> {
        let mut raw = 0;
        fmod_call!(fns()?, get_type(self.raw, &mut raw))?;
        DspConnectionType::try_from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn connection() -> DspConnection {
        unsafe { DspConnection::from_raw(0x80usize as *mut FMOD_DSPCONNECTION) }
    }

    #[test]
    fn test_set_mix_matrix_checks_shape_first() {
        let matrix = MixMatrix {
            out_channels: 2,
            in_channels: 1,
            levels: vec![1.0, 1.0, 1.0],
        };
        let result = connection().set_mix_matrix(&matrix);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let wide = MixMatrix {
            out_channels: 64,
            in_channels: 1,
            levels: vec![0.0; 64],
        };
        assert!(matches!(connection().set_mix_matrix(&wide), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_handles_compare_by_pointer() {
        let a = connection();
        let b = unsafe { DspConnection::from_raw(0x90usize as *mut FMOD_DSPCONNECTION) };
        assert_eq!(a, connection());
        assert_ne!(a, b);
        assert_eq!(a.as_raw() as usize, 0x80);
    }
}
