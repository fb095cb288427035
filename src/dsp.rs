//! DSP units and the parameter model they expose.

use std::ptr;

use libc::{c_char, c_int, c_uint, c_void};

use crate::dsp_connection::DspConnection;
use crate::enums::{DspConnectionType, DspParameterType, DspType, SpeakerMode};
use crate::error::Result;
use crate::ffi::tables::DspFns;
use crate::ffi::{
    self, fmod_call, from_bool, to_bool, FMOD_DSP, FMOD_DSP_GETPARAM_VALUESTR_LENGTH,
    FMOD_DSP_METERING_INFO, FMOD_DSP_PARAMETER_DESC,
};
use crate::flags::ChannelMask;
use crate::structures::{count, MeteringInfo};
use crate::system::System;
use crate::util::{buffer_to_string, handle, non_null, ptr_to_string};

handle! {
    /// A DSP unit: a built-in effect, a mixer node or a channel's fader.
    Dsp => FMOD_DSP
}

fn fns() -> Result<&'static DspFns> {
    Ok(&ffi::api()?.dsp)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WetDryMix {
    pub pre_wet: f32,
    pub post_wet: f32,
    pub dry: f32,
}

impl Default for WetDryMix {
    fn default() -> Self {
        WetDryMix {
            pre_wet: 1.0,
            post_wet: 1.0,
            dry: 0.0,
        }
    }
}

/// Channel layout a DSP processes in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelFormat {
    pub mask: ChannelMask,
    pub num_channels: i32,
    pub speaker_mode: SpeakerMode,
}

/// Identification returned by `Dsp::info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DspInfo {
    pub name: String,
    pub version: u32,
    pub channels: i32,
    /// Size of the configuration dialog, 0 when there is none.
    pub config_width: i32,
    pub config_height: i32,
}

/// Value range and defaults of one DSP parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum DspParameterKind {
    Float {
        min: f32,
        max: f32,
        default: f32,
    },
    Int {
        min: i32,
        max: i32,
        default: i32,
        goes_to_infinity: bool,
        value_names: Vec<String>,
    },
    Bool {
        default: bool,
        value_names: Vec<String>,
    },
    /// Opaque blob; the data type is one of the native
    /// `FMOD_DSP_PARAMETER_DATA_TYPE` codes or a user value.
    Data {
        data_type: i32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DspParameterDesc {
    pub name: String,
    /// Unit label such as "dB" or "Hz".
    pub label: String,
    pub description: String,
    pub kind: DspParameterKind,
}

impl DspParameterDesc {
    pub fn parameter_type(&self) -> DspParameterType {
        match self.kind {
            DspParameterKind::Float { .. } => DspParameterType::Float,
            DspParameterKind::Int { .. } => DspParameterType::Int,
            DspParameterKind::Bool { .. } => DspParameterType::Bool,
            DspParameterKind::Data { .. } => DspParameterType::Data,
        }
    }

    /// # Safety
    /// `raw` must come from the library; the union member selected by
    /// `type_` is read, and its name arrays must hold `count` strings.
    pub(crate) unsafe fn from_raw(raw: &FMOD_DSP_PARAMETER_DESC) -> Result<Self> {
        let kind = match DspParameterType::try_from_raw(raw.type_)? {
            DspParameterType::Float => {
                let desc = raw.desc.floatdesc;
                DspParameterKind::Float {
                    min: desc.min,
                    max: desc.max,
                    default: desc.defaultval,
                }
            }
            DspParameterType::Int => {
                let desc = raw.desc.intdesc;
                let names = (desc.max as i64 - desc.min as i64 + 1).max(0) as usize;
                DspParameterKind::Int {
                    min: desc.min,
                    max: desc.max,
                    default: desc.defaultval,
                    goes_to_infinity: from_bool(desc.goestoinf),
                    value_names: string_array(desc.valuenames, names),
                }
            }
            DspParameterType::Bool => {
                let desc = raw.desc.booldesc;
                DspParameterKind::Bool {
                    default: from_bool(desc.defaultval),
                    value_names: string_array(desc.valuenames, 2),
                }
            }
            DspParameterType::Data => DspParameterKind::Data {
                data_type: raw.desc.datadesc.datatype,
            },
        };
        Ok(DspParameterDesc {
            name: buffer_to_string(&raw.name),
            label: buffer_to_string(&raw.label),
            description: ptr_to_string(raw.description).unwrap_or_default(),
            kind,
        })
    }
}

/// # Safety
/// `names` must be null or point to `len` string pointers.
unsafe fn string_array(names: *const *const c_char, len: usize) -> Vec<String> {
    if names.is_null() {
        return Vec::new();
    }
    (0..len)
        .map(|i| ptr_to_string(*names.add(i)).unwrap_or_default())
        .collect()
}

impl Dsp {
    pub fn release(self) -> Result<()> {
        fmod_call!(fns()?, release(self.raw))
    }

    /// The owning system. Releasing the returned value releases the owner.
    pub fn system(&self) -> Result<System> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_system_object(self.raw, &mut raw))?;
        Ok(unsafe { System::from_raw(non_null(raw, "FMOD_DSP_GetSystemObject")?) })
    }

    /// Connect `input` so its output feeds this unit.
    pub fn add_input(&self, input: &Dsp, connection_type: DspConnectionType) -> Result<DspConnection> {
        let mut connection = ptr::null_mut();
        fmod_call!(
            fns()?,
            add_input(self.raw, input.raw, &mut connection, connection_type.as_raw())
        )?;
        Ok(DspConnection::wrap(non_null(connection, "FMOD_DSP_AddInput")?))
    }

    /// Remove connections to `target`, or only `connection` when given.
    /// With neither, disconnects everything.
    pub fn disconnect_from(&self, target: Option<&Dsp>, connection: Option<&DspConnection>) -> Result<()> {
        fmod_call!(
            fns()?,
            disconnect_from(
                self.raw,
                target.map_or(ptr::null_mut(), |d| d.raw),
                connection.map_or(ptr::null_mut(), |c| c.as_raw())
            )
        )
    }

    pub fn disconnect_all(&self, inputs: bool, outputs: bool) -> Result<()> {
        fmod_call!(fns()?, disconnect_all(self.raw, to_bool(inputs), to_bool(outputs)))
    }

    pub fn num_inputs(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_inputs(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn num_outputs(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_outputs(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn input(&self, index: i32) -> Result<(Dsp, DspConnection)> {
        let (mut dsp, mut connection) = (ptr::null_mut(), ptr::null_mut());
        fmod_call!(fns()?, get_input(self.raw, index, &mut dsp, &mut connection))?;
        Ok((
            Dsp::wrap(non_null(dsp, "FMOD_DSP_GetInput")?),
            DspConnection::wrap(non_null(connection, "FMOD_DSP_GetInput")?),
        ))
    }

    pub fn output(&self, index: i32) -> Result<(Dsp, DspConnection)> {
        let (mut dsp, mut connection) = (ptr::null_mut(), ptr::null_mut());
        fmod_call!(fns()?, get_output(self.raw, index, &mut dsp, &mut connection))?;
        Ok((
            Dsp::wrap(non_null(dsp, "FMOD_DSP_GetOutput")?),
            DspConnection::wrap(non_null(connection, "FMOD_DSP_GetOutput")?),
        ))
    }

    pub fn set_active(&self, active: bool) -> Result<()> {
        fmod_call!(fns()?, set_active(self.raw, to_bool(active)))
    }

    pub fn active(&self) -> Result<bool> {
        let mut active = 0;
        fmod_call!(fns()?, get_active(self.raw, &mut active))?;
        Ok(from_bool(active))
    }

    pub fn set_bypass(&self, bypass: bool) -> Result<()> {
        fmod_call!(fns()?, set_bypass(self.raw, to_bool(bypass)))
    }

    pub fn bypass(&self) -> Result<bool> {
        let mut bypass = 0;
        fmod_call!(fns()?, get_bypass(self.raw, &mut bypass))?;
        Ok(from_bool(bypass))
    }

    pub fn set_wet_dry_mix(&self, mix: WetDryMix) -> Result<()> {
        fmod_call!(fns()?, set_wet_dry_mix(self.raw, mix.pre_wet, mix.post_wet, mix.dry))
    }

    pub fn wet_dry_mix(&self) -> Result<WetDryMix> {
        let (mut pre_wet, mut post_wet, mut dry) = (0.0, 0.0, 0.0);
        fmod_call!(fns()?, get_wet_dry_mix(self.raw, &mut pre_wet, &mut post_wet, &mut dry))?;
        Ok(WetDryMix {
            pre_wet,
            post_wet,
            dry,
        })
    }

    pub fn set_channel_format(&self, format: ChannelFormat) -> Result<()> {
        fmod_call!(
            fns()?,
            set_channel_format(
                self.raw,
                format.mask.bits(),
                format.num_channels,
                format.speaker_mode.as_raw()
            )
        )
    }

    pub fn channel_format(&self) -> Result<ChannelFormat> {
        let (mut mask, mut num_channels, mut speaker_mode) = (0, 0, 0);
        fmod_call!(
            fns()?,
            get_channel_format(self.raw, &mut mask, &mut num_channels, &mut speaker_mode)
        )?;
        Ok(ChannelFormat {
            mask: ChannelMask::from_bits_retain(mask),
            num_channels,
            speaker_mode: SpeakerMode::try_from_raw(speaker_mode)?,
        })
    }

    /// The format this unit would output given `input`.
    pub fn output_channel_format(&self, input: ChannelFormat) -> Result<ChannelFormat> {
        let (mut mask, mut num_channels, mut speaker_mode) = (0, 0, 0);
        fmod_call!(
            fns()?,
            get_output_channel_format(
                self.raw,
                input.mask.bits(),
                input.num_channels,
                input.speaker_mode.as_raw(),
                &mut mask,
                &mut num_channels,
                &mut speaker_mode
            )
        )?;
        Ok(ChannelFormat {
            mask: ChannelMask::from_bits_retain(mask),
            num_channels,
            speaker_mode: SpeakerMode::try_from_raw(speaker_mode)?,
        })
    }

    /// Clear internal state such as delay lines.
    pub fn reset(&self) -> Result<()> {
        fmod_call!(fns()?, reset(self.raw))
    }

    pub fn set_parameter_float(&self, index: i32, value: f32) -> Result<()> {
        fmod_call!(fns()?, set_parameter_float(self.raw, index, value))
    }

    pub fn set_parameter_int(&self, index: i32, value: i32) -> Result<()> {
        fmod_call!(fns()?, set_parameter_int(self.raw, index, value))
    }

    pub fn set_parameter_bool(&self, index: i32, value: bool) -> Result<()> {
        fmod_call!(fns()?, set_parameter_bool(self.raw, index, to_bool(value)))
    }

    /// The library copies `data`.
    pub fn set_parameter_data(&self, index: i32, data: &[u8]) -> Result<()> {
        let mut data = data.to_vec();
        let len = c_uint::try_from(data.len()).map_err(|_| {
            crate::error::Error::InvalidArgument(format!("parameter data of {} bytes", data.len()))
        })?;
        fmod_call!(
            fns()?,
            set_parameter_data(self.raw, index, data.as_mut_ptr() as *mut c_void, len)
        )
    }

    /// Value and its display string, e.g. `(-6.0, "-6.00")`.
    pub fn parameter_float(&self, index: i32) -> Result<(f32, String)> {
        let mut value = 0.0;
        let text = value_string(|buf, len| {
            fmod_call!(fns()?, get_parameter_float(self.raw, index, &mut value, buf, len))
        })?;
        Ok((value, text))
    }

    pub fn parameter_int(&self, index: i32) -> Result<(i32, String)> {
        let mut value = 0;
        let text = value_string(|buf, len| {
            fmod_call!(fns()?, get_parameter_int(self.raw, index, &mut value, buf, len))
        })?;
        Ok((value, text))
    }

    pub fn parameter_bool(&self, index: i32) -> Result<(bool, String)> {
        let mut value = 0;
        let text = value_string(|buf, len| {
            fmod_call!(fns()?, get_parameter_bool(self.raw, index, &mut value, buf, len))
        })?;
        Ok((from_bool(value), text))
    }

    /// A copy of the parameter's data block.
    pub fn parameter_data(&self, index: i32) -> Result<(Vec<u8>, String)> {
        let mut data: *mut c_void = ptr::null_mut();
        let mut length: c_uint = 0;
        let text = value_string(|buf, len| {
            fmod_call!(
                fns()?,
                get_parameter_data(self.raw, index, &mut data, &mut length, buf, len)
            )
        })?;
        let bytes = if data.is_null() || length == 0 {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(data as *const u8, length as usize) }.to_vec()
        };
        Ok((bytes, text))
    }

    pub fn num_parameters(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_parameters(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn parameter_info(&self, index: i32) -> Result<DspParameterDesc> {
        let mut desc = ptr::null_mut();
        fmod_call!(fns()?, get_parameter_info(self.raw, index, &mut desc))?;
        let desc = non_null(desc, "FMOD_DSP_GetParameterInfo")?;
        unsafe { DspParameterDesc::from_raw(&*desc) }
    }

    /// Descriptions of every parameter, by index.
    pub fn parameters(&self) -> Result<Vec<DspParameterDesc>> {
        (0..self.num_parameters()?).map(|i| self.parameter_info(i)).collect()
    }

    /// Index of the first data parameter of a given data type.
    pub fn data_parameter_index(&self, data_type: i32) -> Result<i32> {
        let mut index = 0;
        fmod_call!(fns()?, get_data_parameter_index(self.raw, data_type, &mut index))?;
        Ok(index)
    }

    pub fn info(&self) -> Result<DspInfo> {
        let mut name = [0 as c_char; 32];
        let mut version = 0;
        let (mut channels, mut config_width, mut config_height) = (0, 0, 0);
        fmod_call!(
            fns()?,
            get_info(
                self.raw,
                name.as_mut_ptr(),
                &mut version,
                &mut channels,
                &mut config_width,
                &mut config_height
            )
        )?;
        Ok(DspInfo {
            name: buffer_to_string(&name),
            version,
            channels,
            config_width,
            config_height,
        })
    }

    pub fn dsp_type(&self) -> Result<DspType> {
        let mut raw = 0;
        fmod_call!(fns()?, get_type(self.raw, &mut raw))?;
        DspType::try_from_raw(raw)
    }

    /// True when the unit has had no input long enough to stop processing.
    pub fn idle(&self) -> Result<bool> {
        let mut idle = 0;
        fmod_call!(fns()?, get_idle(self.raw, &mut idle))?;
        Ok(from_bool(idle))
    }

    pub fn set_metering_enabled(&self, input: bool, output: bool) -> Result<()> {
        fmod_call!(fns()?, set_metering_enabled(self.raw, to_bool(input), to_bool(output)))
    }

    /// `(input, output)` metering switches.
    pub fn metering_enabled(&self) -> Result<(bool, bool)> {
        let (mut input, mut output) = (0, 0);
        fmod_call!(fns()?, get_metering_enabled(self.raw, &mut input, &mut output))?;
        Ok((from_bool(input), from_bool(output)))
    }

    /// `(input, output)` levels; enable metering first.
    pub fn metering_info(&self) -> Result<(MeteringInfo, MeteringInfo)> {
        let mut input = FMOD_DSP_METERING_INFO::default();
        let mut output = FMOD_DSP_METERING_INFO::default();
        fmod_call!(fns()?, get_metering_info(self.raw, &mut input, &mut output))?;
        Ok(((&input).into(), (&output).into()))
    }

    /// `(exclusive, inclusive)` processing time in microseconds.
    pub fn cpu_usage(&self) -> Result<(u32, u32)> {
        let (mut exclusive, mut inclusive) = (0, 0);
        fmod_call!(fns()?, get_cpu_usage(self.raw, &mut exclusive, &mut inclusive))?;
        Ok((exclusive, inclusive))
    }
}

fn value_string<F>(mut fill: F) -> Result<String>
where
    F: FnMut(*mut c_char, c_int) -> Result<()>,
{
    let mut buf = [0 as c_char; FMOD_DSP_GETPARAM_VALUESTR_LENGTH];
    let len = count(buf.len())?;
    fill(buf.as_mut_ptr(), len)?;
    Ok(buffer_to_string(&buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{
        FMOD_DSP_PARAMETER_DESC_BOOL, FMOD_DSP_PARAMETER_DESC_INT, FMOD_DSP_PARAMETER_DESC_UNION,
    };
    use std::ffi::CString;

    fn name_array(text: &str) -> [c_char; 16] {
        let mut out = [0 as c_char; 16];
        for (slot, byte) in out.iter_mut().zip(text.bytes()) {
            *slot = byte as c_char;
        }
        out
    }

    #[test]
    fn test_int_parameter_desc_reads_value_names() {
        let names: Vec<CString> = ["Off", "Low", "High"]
            .iter()
            .map(|n| CString::new(*n).unwrap())
            .collect();
        let pointers: Vec<*const c_char> = names.iter().map(|n| n.as_ptr()).collect();
        let description = CString::new("Filter quality").unwrap();
        let raw = FMOD_DSP_PARAMETER_DESC {
            type_: DspParameterType::Int.as_raw(),
            name: name_array("Quality"),
            label: name_array(""),
            description: description.as_ptr(),
            desc: FMOD_DSP_PARAMETER_DESC_UNION {
                intdesc: FMOD_DSP_PARAMETER_DESC_INT {
                    min: 0,
                    max: 2,
                    defaultval: 1,
                    goestoinf: 0,
                    valuenames: pointers.as_ptr(),
                },
            },
        };
        let desc = unsafe { DspParameterDesc::from_raw(&raw) }.unwrap();
        assert_eq!(desc.name, "Quality");
        assert_eq!(desc.description, "Filter quality");
        assert_eq!(desc.parameter_type(), DspParameterType::Int);
        assert_eq!(
            desc.kind,
            DspParameterKind::Int {
                min: 0,
                max: 2,
                default: 1,
                goes_to_infinity: false,
                value_names: vec!["Off".into(), "Low".into(), "High".into()],
            }
        );
    }

    #[test]
    fn test_bool_parameter_desc_without_names() {
        let raw = FMOD_DSP_PARAMETER_DESC {
            type_: DspParameterType::Bool.as_raw(),
            name: name_array("Enabled"),
            label: name_array(""),
            description: ptr::null(),
            desc: FMOD_DSP_PARAMETER_DESC_UNION {
                booldesc: FMOD_DSP_PARAMETER_DESC_BOOL {
                    defaultval: 1,
                    valuenames: ptr::null(),
                },
            },
        };
        let desc = unsafe { DspParameterDesc::from_raw(&raw) }.unwrap();
        assert_eq!(desc.description, "");
        assert_eq!(
            desc.kind,
            DspParameterKind::Bool {
                default: true,
                value_names: Vec::new(),
            }
        );
    }

    #[test]
    fn test_wet_dry_default_is_fully_wet() {
        let mix = WetDryMix::default();
        assert_eq!((mix.pre_wet, mix.post_wet, mix.dry), (1.0, 1.0, 0.0));
    }
}
