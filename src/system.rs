//! The core `System` object: device setup, factories and global state.

use std::ptr;

use libc::{c_float, c_int, c_longlong, c_uint, c_void};

use crate::channel::Channel;
use crate::channel_control;
use crate::channel_group::ChannelGroup;
use crate::config::Options;
use crate::dsp::Dsp;
use crate::enums::{DspType, OutputType, SpeakerMode};
use crate::error::{Error, Result};
use crate::ffi::tables::SystemFns;
use crate::ffi::{self, fmod_call, from_bool, to_bool, FMOD_SYSTEM};
use crate::flags::{DriverState, InitFlags, Mode, TimeUnit};
use crate::geometry::Geometry;
use crate::reverb::Reverb3D;
use crate::sound::Sound;
use crate::sound_group::SoundGroup;
use crate::structures::{
    count, memory_length, Attributes3d, CpuUsage, CreateSoundExInfo, DriverInfo, FileUsage,
    RecordDriverInfo, ReverbProperties, Vector,
};
use crate::util::{non_null, read_string, to_cstring};

fn fns() -> Result<&'static SystemFns> {
    Ok(&ffi::api()?.system)
}

/// Format a packed `0xaaaabbcc` version as `a.bb.cc`.
pub fn format_version(version: u32) -> String {
    format!(
        "{:x}.{:02x}.{:02x}",
        version >> 16,
        (version >> 8) & 0xff,
        version & 0xff
    )
}

/// Doppler, distance and rolloff scaling for 3D sounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings3d {
    pub doppler_scale: f32,
    pub distance_factor: f32,
    pub rolloff_scale: f32,
}

impl Default for Settings3d {
    fn default() -> Self {
        Settings3d {
            doppler_scale: 1.0,
            distance_factor: 1.0,
            rolloff_scale: 1.0,
        }
    }
}

/// Output format of the software mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftwareFormat {
    pub sample_rate: i32,
    pub speaker_mode: SpeakerMode,
    pub num_raw_speakers: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DspBufferSize {
    /// Samples per buffer.
    pub length: u32,
    pub count: i32,
}

/// Owner of the mixer, output device and every object created from it.
///
/// `System` is not `Copy`: `release` consumes it. Objects created by a
/// system become invalid once it is released.
#[derive(Debug)]
pub struct System {
    raw: *mut FMOD_SYSTEM,
}

// SAFETY: FMOD Core serialises calls on the system object unless it was
// initialised with InitFlags::THREAD_UNSAFE.
unsafe impl Send for System {}
unsafe impl Sync for System {}

impl System {
    /// Create an uninitialised system with the configured header version.
    pub fn new() -> Result<System> {
        let api = ffi::api()?;
        let mut raw = ptr::null_mut();
        fmod_call!(api.system, create(&mut raw, api.header_version()))?;
        let raw = non_null(raw, "FMOD_System_Create")?;
        log::debug!(
            "created FMOD system {:p} (header version {})",
            raw,
            format_version(api.header_version())
        );
        Ok(System { raw })
    }

    /// Create, configure and initialise a system from `options`.
    ///
    /// The system is released again if any step after creation fails.
    pub fn with_options(options: &Options) -> Result<System> {
        if options.fmod_debug {
            if let Err(e) = crate::debug::initialize(
                crate::logging::debug_flags(options.log_level),
                crate::enums::DebugMode::Callback,
            ) {
                log::debug!("native debug routing unavailable: {}", e);
            }
        }

        let system = System::new()?;
        match system.configure(options) {
            Ok(()) => Ok(system),
            Err(e) => {
                if let Err(release_error) = system.release() {
                    log::warn!("releasing half-initialised system failed: {}", release_error);
                }
                Err(e)
            }
        }
    }

    fn configure(&self, options: &Options) -> Result<()> {
        if let Some(output) = options.output {
            self.set_output(output)?;
        }
        if options.sample_rate.is_some() || options.speaker_mode.is_some() {
            let mut format = self.software_format()?;
            if let Some(rate) = options.sample_rate {
                format.sample_rate = rate;
            }
            if let Some(mode) = options.speaker_mode {
                format.speaker_mode = mode;
            }
            self.set_software_format(format)?;
        }
        if let Some((length, count)) = options.dsp_buffer {
            self.set_dsp_buffer_size(length, count)?;
        }
        self.init(options.max_channels, options.init_flags)
    }

    /// # Safety
    /// `raw` must be a live system handle from the loaded library. The
    /// returned value releases it when `release` is called.
    pub unsafe fn from_raw(raw: *mut FMOD_SYSTEM) -> System {
        System { raw }
    }

    pub fn as_raw(&self) -> *mut FMOD_SYSTEM {
        self.raw
    }

    pub fn init(&self, max_channels: i32, flags: InitFlags) -> Result<()> {
        fmod_call!(fns()?, init(self.raw, max_channels, flags.bits(), ptr::null_mut()))?;
        log::debug!("initialised FMOD system with {} channels, {:?}", max_channels, flags);
        Ok(())
    }

    /// Close the output device. The system can be initialised again.
    pub fn close(&self) -> Result<()> {
        fmod_call!(fns()?, close(self.raw))?;
        channel_control::drop_subscribers_of(self.raw as usize);
        Ok(())
    }

    /// Close and free the system and everything created from it.
    pub fn release(self) -> Result<()> {
        fmod_call!(fns()?, release(self.raw))?;
        channel_control::drop_subscribers_of(self.raw as usize);
        log::debug!("released FMOD system {:p}", self.raw);
        Ok(())
    }

    /// Advance the engine. Call once per frame.
    pub fn update(&self) -> Result<()> {
        fmod_call!(fns()?, update(self.raw))
    }

    pub fn set_output(&self, output: OutputType) -> Result<()> {
        fmod_call!(fns()?, set_output(self.raw, output.as_raw()))
    }

    pub fn output(&self) -> Result<OutputType> {
        let mut raw = 0;
        fmod_call!(fns()?, get_output(self.raw, &mut raw))?;
        OutputType::try_from_raw(raw)
    }

    pub fn num_drivers(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_drivers(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn driver_info(&self, id: i32) -> Result<DriverInfo> {
        let mut guid = ffi::FMOD_GUID::default();
        let (mut rate, mut mode, mut channels) = (0, 0, 0);
        let name = read_string(|buf, len| {
            fmod_call!(
                fns()?,
                get_driver_info(self.raw, id, buf, len, &mut guid, &mut rate, &mut mode, &mut channels)
            )
        })?;
        Ok(DriverInfo {
            name,
            guid: guid.into(),
            system_rate: rate,
            speaker_mode: SpeakerMode::try_from_raw(mode)?,
            speaker_mode_channels: channels,
        })
    }

    /// Every output driver, in driver index order.
    pub fn drivers(&self) -> Result<Vec<DriverInfo>> {
        (0..self.num_drivers()?).map(|id| self.driver_info(id)).collect()
    }

    pub fn set_driver(&self, driver: i32) -> Result<()> {
        fmod_call!(fns()?, set_driver(self.raw, driver))
    }

    pub fn driver(&self) -> Result<i32> {
        let mut driver = 0;
        fmod_call!(fns()?, get_driver(self.raw, &mut driver))?;
        Ok(driver)
    }

    pub fn set_software_channels(&self, num: i32) -> Result<()> {
        fmod_call!(fns()?, set_software_channels(self.raw, num))
    }

    pub fn software_channels(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_software_channels(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn set_software_format(&self, format: SoftwareFormat) -> Result<()> {
        fmod_call!(
            fns()?,
            set_software_format(
                self.raw,
                format.sample_rate,
                format.speaker_mode.as_raw(),
                format.num_raw_speakers
            )
        )
    }

    pub fn software_format(&self) -> Result<SoftwareFormat> {
        let (mut rate, mut mode, mut raw_speakers) = (0, 0, 0);
        fmod_call!(fns()?, get_software_format(self.raw, &mut rate, &mut mode, &mut raw_speakers))?;
        Ok(SoftwareFormat {
            sample_rate: rate,
            speaker_mode: SpeakerMode::try_from_raw(mode)?,
            num_raw_speakers: raw_speakers,
        })
    }

    pub fn set_dsp_buffer_size(&self, length: u32, count: i32) -> Result<()> {
        fmod_call!(fns()?, set_dsp_buffer_size(self.raw, length, count))
    }

    pub fn dsp_buffer_size(&self) -> Result<DspBufferSize> {
        let (mut length, mut count) = (0, 0);
        fmod_call!(fns()?, get_dsp_buffer_size(self.raw, &mut length, &mut count))?;
        Ok(DspBufferSize { length, count })
    }

    pub fn set_stream_buffer_size(&self, size: u32, unit: TimeUnit) -> Result<()> {
        fmod_call!(fns()?, set_stream_buffer_size(self.raw, size, unit.bits()))
    }

    pub fn stream_buffer_size(&self) -> Result<(u32, TimeUnit)> {
        let (mut size, mut unit) = (0, 0);
        fmod_call!(fns()?, get_stream_buffer_size(self.raw, &mut size, &mut unit))?;
        Ok((size, TimeUnit::from_bits_retain(unit)))
    }

    pub fn speaker_mode_channels(&self, mode: SpeakerMode) -> Result<i32> {
        let mut channels = 0;
        fmod_call!(fns()?, get_speaker_mode_channels(self.raw, mode.as_raw(), &mut channels))?;
        Ok(channels)
    }

    pub fn mixer_suspend(&self) -> Result<()> {
        fmod_call!(fns()?, mixer_suspend(self.raw))
    }

    pub fn mixer_resume(&self) -> Result<()> {
        fmod_call!(fns()?, mixer_resume(self.raw))
    }

    /// Packed library version, e.g. `0x00020222`.
    pub fn version(&self) -> Result<u32> {
        let mut version: c_uint = 0;
        fmod_call!(fns()?, get_version(self.raw, &mut version))?;
        Ok(version)
    }

    /// `(channels, real_channels)` currently playing.
    pub fn channels_playing(&self) -> Result<(i32, i32)> {
        let (mut channels, mut real) = (0, 0);
        fmod_call!(fns()?, get_channels_playing(self.raw, &mut channels, &mut real))?;
        Ok((channels, real))
    }

    pub fn cpu_usage(&self) -> Result<CpuUsage> {
        let mut usage = ffi::FMOD_CPU_USAGE::default();
        fmod_call!(fns()?, get_cpu_usage(self.raw, &mut usage))?;
        Ok(usage.into())
    }

    pub fn file_usage(&self) -> Result<FileUsage> {
        let (mut sample, mut stream, mut other): (c_longlong, c_longlong, c_longlong) = (0, 0, 0);
        fmod_call!(fns()?, get_file_usage(self.raw, &mut sample, &mut stream, &mut other))?;
        Ok(FileUsage {
            sample_bytes_read: sample,
            stream_bytes_read: stream,
            other_bytes_read: other,
        })
    }

    pub fn set_three_d_settings(&self, settings: Settings3d) -> Result<()> {
        fmod_call!(
            fns()?,
            set_3d_settings(
                self.raw,
                settings.doppler_scale,
                settings.distance_factor,
                settings.rolloff_scale
            )
        )
    }

    pub fn three_d_settings(&self) -> Result<Settings3d> {
        let (mut doppler, mut distance, mut rolloff): (c_float, c_float, c_float) = (0.0, 0.0, 0.0);
        fmod_call!(fns()?, get_3d_settings(self.raw, &mut doppler, &mut distance, &mut rolloff))?;
        Ok(Settings3d {
            doppler_scale: doppler,
            distance_factor: distance,
            rolloff_scale: rolloff,
        })
    }

    pub fn set_num_listeners(&self, num: i32) -> Result<()> {
        if !(1..=ffi::FMOD_MAX_LISTENERS as i32).contains(&num) {
            return Err(Error::InvalidArgument(format!(
                "listener count {} outside 1..={}",
                num,
                ffi::FMOD_MAX_LISTENERS
            )));
        }
        fmod_call!(fns()?, set_3d_num_listeners(self.raw, num))
    }

    pub fn num_listeners(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_3d_num_listeners(self.raw, &mut num))?;
        Ok(num)
    }

    pub fn set_listener_attributes(&self, listener: i32, attributes: &Attributes3d) -> Result<()> {
        let raw: ffi::FMOD_3D_ATTRIBUTES = (*attributes).into();
        fmod_call!(
            fns()?,
            set_3d_listener_attributes(
                self.raw,
                listener,
                &raw.position,
                &raw.velocity,
                &raw.forward,
                &raw.up
            )
        )
    }

    pub fn listener_attributes(&self, listener: i32) -> Result<Attributes3d> {
        let mut raw = ffi::FMOD_3D_ATTRIBUTES::default();
        fmod_call!(
            fns()?,
            get_3d_listener_attributes(
                self.raw,
                listener,
                &mut raw.position,
                &mut raw.velocity,
                &mut raw.forward,
                &mut raw.up
            )
        )?;
        Ok(raw.into())
    }

    /// Accessor for one listener's attributes.
    pub fn listener(&self, index: i32) -> Listener<'_> {
        Listener {
            system: self,
            index,
        }
    }

    pub fn set_geometry_settings(&self, max_world_size: f32) -> Result<()> {
        fmod_call!(fns()?, set_geometry_settings(self.raw, max_world_size))
    }

    pub fn geometry_settings(&self) -> Result<f32> {
        let mut size = 0.0;
        fmod_call!(fns()?, get_geometry_settings(self.raw, &mut size))?;
        Ok(size)
    }

    /// `(direct, reverb)` occlusion between a listener and a source.
    pub fn geometry_occlusion(&self, listener: Vector, source: Vector) -> Result<(f32, f32)> {
        let (listener, source) = (listener.to_raw(), source.to_raw());
        let (mut direct, mut reverb) = (0.0, 0.0);
        fmod_call!(
            fns()?,
            get_geometry_occlusion(self.raw, &listener, &source, &mut direct, &mut reverb)
        )?;
        Ok((direct, reverb))
    }

    /// Load a sample from a file or URL.
    pub fn create_sound(&self, name: &str, mode: Mode) -> Result<Sound> {
        let name = to_cstring(name)?;
        let mut raw = ptr::null_mut();
        fmod_call!(
            fns()?,
            create_sound(self.raw, name.as_ptr(), mode.bits(), ptr::null_mut(), &mut raw)
        )?;
        Ok(Sound::wrap(non_null(raw, "FMOD_System_CreateSound")?))
    }

    /// Open a file or URL for streaming.
    pub fn create_stream(&self, name: &str, mode: Mode) -> Result<Sound> {
        let name = to_cstring(name)?;
        let mut raw = ptr::null_mut();
        fmod_call!(
            fns()?,
            create_stream(self.raw, name.as_ptr(), mode.bits(), ptr::null_mut(), &mut raw)
        )?;
        Ok(Sound::wrap(non_null(raw, "FMOD_System_CreateStream")?))
    }

    /// Decode a sound from an in-memory file image. The data is copied.
    pub fn create_sound_from_memory(&self, data: &[u8], mode: Mode) -> Result<Sound> {
        if mode.contains(Mode::OPEN_MEMORY_POINT) {
            return Err(Error::InvalidArgument(
                "OPEN_MEMORY_POINT needs a buffer that outlives the sound".to_string(),
            ));
        }
        let mut info = CreateSoundExInfo::new().length(memory_length(data)?);
        let mut raw = ptr::null_mut();
        fmod_call!(
            fns()?,
            create_sound(
                self.raw,
                data.as_ptr().cast(),
                (mode | Mode::OPEN_MEMORY).bits(),
                info.raw_mut(),
                &mut raw
            )
        )?;
        Ok(Sound::wrap(non_null(raw, "FMOD_System_CreateSound")?))
    }

    /// Create a sound with explicit creation info.
    ///
    /// `name` may be `None` only for `OPEN_USER` sounds.
    pub fn create_sound_ex(
        &self,
        name: Option<&str>,
        mode: Mode,
        info: &mut CreateSoundExInfo,
    ) -> Result<Sound> {
        if mode.intersects(Mode::OPEN_MEMORY | Mode::OPEN_MEMORY_POINT) {
            return Err(Error::InvalidArgument(
                "use create_sound_from_memory for in-memory data".to_string(),
            ));
        }
        if name.is_none() && !mode.contains(Mode::OPEN_USER) {
            return Err(Error::InvalidArgument("a name is required unless OPEN_USER is set".to_string()));
        }
        if mode.contains(Mode::OPEN_USER) && !info.length_is_set() {
            log::debug!("creating OPEN_USER sound without an explicit length");
        }
        let name = name.map(to_cstring).transpose()?;
        let name_ptr = name.as_ref().map_or(ptr::null(), |n| n.as_ptr());
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, create_sound(self.raw, name_ptr, mode.bits(), info.raw_mut(), &mut raw))?;
        Ok(Sound::wrap(non_null(raw, "FMOD_System_CreateSound")?))
    }

    pub fn create_dsp_by_type(&self, dsp_type: DspType) -> Result<Dsp> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, create_dsp_by_type(self.raw, dsp_type.as_raw(), &mut raw))?;
        Ok(Dsp::wrap(non_null(raw, "FMOD_System_CreateDSPByType")?))
    }

    pub fn create_channel_group(&self, name: &str) -> Result<ChannelGroup> {
        let name = to_cstring(name)?;
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, create_channel_group(self.raw, name.as_ptr(), &mut raw))?;
        Ok(ChannelGroup::wrap(non_null(raw, "FMOD_System_CreateChannelGroup")?))
    }

    pub fn create_sound_group(&self, name: &str) -> Result<SoundGroup> {
        let name = to_cstring(name)?;
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, create_sound_group(self.raw, name.as_ptr(), &mut raw))?;
        Ok(SoundGroup::wrap(non_null(raw, "FMOD_System_CreateSoundGroup")?))
    }

    pub fn create_reverb_3d(&self) -> Result<Reverb3D> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, create_reverb_3d(self.raw, &mut raw))?;
        Ok(Reverb3D::wrap(non_null(raw, "FMOD_System_CreateReverb3D")?))
    }

    pub fn create_geometry(&self, max_polygons: i32, max_vertices: i32) -> Result<Geometry> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, create_geometry(self.raw, max_polygons, max_vertices, &mut raw))?;
        Ok(Geometry::wrap(non_null(raw, "FMOD_System_CreateGeometry")?))
    }

    /// Recreate geometry from bytes produced by `Geometry::save`.
    pub fn load_geometry(&self, data: &[u8]) -> Result<Geometry> {
        let size = count(data.len())?;
        let mut raw = ptr::null_mut();
        fmod_call!(
            fns()?,
            load_geometry(self.raw, data.as_ptr() as *const c_void, size, &mut raw)
        )?;
        Ok(Geometry::wrap(non_null(raw, "FMOD_System_LoadGeometry")?))
    }

    /// Start `sound` on a free channel, routed to `group` or the master group.
    pub fn play_sound(
        &self,
        sound: &Sound,
        group: Option<&ChannelGroup>,
        paused: bool,
    ) -> Result<Channel> {
        let group = group.map_or(ptr::null_mut(), |g| g.as_raw());
        let mut raw = ptr::null_mut();
        fmod_call!(
            fns()?,
            play_sound(self.raw, sound.as_raw(), group, to_bool(paused), &mut raw)
        )?;
        Ok(Channel::wrap(non_null(raw, "FMOD_System_PlaySound")?))
    }

    pub fn play_dsp(&self, dsp: &Dsp, group: Option<&ChannelGroup>, paused: bool) -> Result<Channel> {
        let group = group.map_or(ptr::null_mut(), |g| g.as_raw());
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, play_dsp(self.raw, dsp.as_raw(), group, to_bool(paused), &mut raw))?;
        Ok(Channel::wrap(non_null(raw, "FMOD_System_PlayDSP")?))
    }

    pub fn channel(&self, id: i32) -> Result<Channel> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_channel(self.raw, id, &mut raw))?;
        Ok(Channel::wrap(non_null(raw, "FMOD_System_GetChannel")?))
    }

    pub fn master_channel_group(&self) -> Result<ChannelGroup> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_master_channel_group(self.raw, &mut raw))?;
        Ok(ChannelGroup::wrap(non_null(raw, "FMOD_System_GetMasterChannelGroup")?))
    }

    pub fn master_sound_group(&self) -> Result<SoundGroup> {
        let mut raw = ptr::null_mut();
        fmod_call!(fns()?, get_master_sound_group(self.raw, &mut raw))?;
        Ok(SoundGroup::wrap(non_null(raw, "FMOD_System_GetMasterSoundGroup")?))
    }

    pub fn set_reverb_properties(&self, instance: i32, properties: &ReverbProperties) -> Result<()> {
        check_reverb_instance(instance)?;
        let raw: ffi::FMOD_REVERB_PROPERTIES = (*properties).into();
        fmod_call!(fns()?, set_reverb_properties(self.raw, instance, &raw))
    }

    pub fn reverb_properties(&self, instance: i32) -> Result<ReverbProperties> {
        check_reverb_instance(instance)?;
        let mut raw = ffi::FMOD_REVERB_PROPERTIES::default();
        fmod_call!(fns()?, get_reverb_properties(self.raw, instance, &mut raw))?;
        Ok(raw.into())
    }

    pub fn lock_dsp(&self) -> Result<()> {
        fmod_call!(fns()?, lock_dsp(self.raw))
    }

    pub fn unlock_dsp(&self) -> Result<()> {
        fmod_call!(fns()?, unlock_dsp(self.raw))
    }

    /// Lock the mixer thread until the guard is dropped.
    pub fn dsp_lock(&self) -> Result<DspLock<'_>> {
        self.lock_dsp()?;
        Ok(DspLock { system: self })
    }

    /// `(drivers, connected)` recording driver counts.
    pub fn record_num_drivers(&self) -> Result<(i32, i32)> {
        let (mut drivers, mut connected) = (0, 0);
        fmod_call!(fns()?, get_record_num_drivers(self.raw, &mut drivers, &mut connected))?;
        Ok((drivers, connected))
    }

    pub fn record_driver_info(&self, id: i32) -> Result<RecordDriverInfo> {
        let mut guid = ffi::FMOD_GUID::default();
        let (mut rate, mut mode, mut channels, mut state) = (0, 0, 0, 0);
        let name = read_string(|buf, len| {
            fmod_call!(
                fns()?,
                get_record_driver_info(
                    self.raw,
                    id,
                    buf,
                    len,
                    &mut guid,
                    &mut rate,
                    &mut mode,
                    &mut channels,
                    &mut state
                )
            )
        })?;
        Ok(RecordDriverInfo {
            name,
            guid: guid.into(),
            system_rate: rate,
            speaker_mode: SpeakerMode::try_from_raw(mode)?,
            speaker_mode_channels: channels,
            state: DriverState::from_bits_retain(state),
        })
    }

    /// Write cursor of the recording buffer, in PCM samples.
    pub fn record_position(&self, id: i32) -> Result<u32> {
        let mut position = 0;
        fmod_call!(fns()?, get_record_position(self.raw, id, &mut position))?;
        Ok(position)
    }

    pub fn record_start(&self, id: i32, sound: &Sound, looping: bool) -> Result<()> {
        fmod_call!(fns()?, record_start(self.raw, id, sound.as_raw(), to_bool(looping)))
    }

    pub fn record_stop(&self, id: i32) -> Result<()> {
        fmod_call!(fns()?, record_stop(self.raw, id))
    }

    pub fn is_recording(&self, id: i32) -> Result<bool> {
        let mut recording = 0;
        fmod_call!(fns()?, is_recording(self.raw, id, &mut recording))?;
        Ok(from_bool(recording))
    }

    pub fn set_network_proxy(&self, proxy: &str) -> Result<()> {
        let proxy = to_cstring(proxy)?;
        fmod_call!(fns()?, set_network_proxy(self.raw, proxy.as_ptr()))
    }

    pub fn network_proxy(&self) -> Result<String> {
        read_string(|buf, len| fmod_call!(fns()?, get_network_proxy(self.raw, buf, len)))
    }

    /// Timeout for network streams, in milliseconds.
    pub fn set_network_timeout(&self, timeout: i32) -> Result<()> {
        fmod_call!(fns()?, set_network_timeout(self.raw, timeout))
    }

    pub fn network_timeout(&self) -> Result<i32> {
        let mut timeout: c_int = 0;
        fmod_call!(fns()?, get_network_timeout(self.raw, &mut timeout))?;
        Ok(timeout)
    }
}

pub(crate) fn check_reverb_instance(instance: i32) -> Result<()> {
    if (0..ffi::FMOD_REVERB_MAXINSTANCES as i32).contains(&instance) {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "reverb instance {} outside 0..{}",
            instance,
            ffi::FMOD_REVERB_MAXINSTANCES
        )))
    }
}

/// One listener of a [`System`].
///
/// Each setter reads the current attributes, replaces one field and
/// writes them back.
#[derive(Debug, Clone, Copy)]
pub struct Listener<'a> {
    system: &'a System,
    index: i32,
}

impl Listener<'_> {
    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn attributes(&self) -> Result<Attributes3d> {
        self.system.listener_attributes(self.index)
    }

    pub fn set_attributes(&self, attributes: &Attributes3d) -> Result<()> {
        self.system.set_listener_attributes(self.index, attributes)
    }

    fn modify(&self, edit: impl FnOnce(&mut Attributes3d)) -> Result<()> {
        let mut attributes = self.attributes()?;
        edit(&mut attributes);
        self.set_attributes(&attributes)
    }

    pub fn position(&self) -> Result<Vector> {
        Ok(self.attributes()?.position)
    }

    pub fn set_position(&self, position: Vector) -> Result<()> {
        self.modify(|a| a.position = position)
    }

    pub fn velocity(&self) -> Result<Vector> {
        Ok(self.attributes()?.velocity)
    }

    pub fn set_velocity(&self, velocity: Vector) -> Result<()> {
        self.modify(|a| a.velocity = velocity)
    }

    pub fn forward(&self) -> Result<Vector> {
        Ok(self.attributes()?.forward)
    }

    pub fn set_forward(&self, forward: Vector) -> Result<()> {
        self.modify(|a| a.forward = forward)
    }

    pub fn up(&self) -> Result<Vector> {
        Ok(self.attributes()?.up)
    }

    pub fn set_up(&self, up: Vector) -> Result<()> {
        self.modify(|a| a.up = up)
    }
}

/// Holds the mixer lock; unlocks on drop.
#[derive(Debug)]
pub struct DspLock<'a> {
    system: &'a System,
}

impl DspLock<'_> {
    /// Unlock now and report any error.
    pub fn unlock(self) -> Result<()> {
        let system = self.system;
        std::mem::forget(self);
        system.unlock_dsp()
    }
}

impl Drop for DspLock<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.system.unlock_dsp() {
            log::warn!("FMOD_System_UnlockDSP failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x0002_0222, "2.02.22")]
    #[case(0x0002_0100, "2.01.00")]
    #[case(0x0004_4464, "4.44.64")]
    fn test_format_version(#[case] version: u32, #[case] expected: &str) {
        assert_eq!(format_version(version), expected);
    }

    #[test]
    fn test_reverb_instance_range() {
        assert!(check_reverb_instance(0).is_ok());
        assert!(check_reverb_instance(3).is_ok());
        assert!(matches!(check_reverb_instance(4), Err(Error::InvalidArgument(_))));
        assert!(check_reverb_instance(-1).is_err());
    }

    #[test]
    fn test_settings_default_is_unit_scale() {
        let settings = Settings3d::default();
        assert_eq!(settings.doppler_scale, 1.0);
        assert_eq!(settings.distance_factor, 1.0);
        assert_eq!(settings.rolloff_scale, 1.0);
    }
}
