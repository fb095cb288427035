//! Operations shared by [`Channel`](crate::Channel) and
//! [`ChannelGroup`](crate::ChannelGroup), plus callback delivery.
//!
//! Callbacks are delivered as [`ControlEvent`]s on a crossbeam channel.
//! A process-wide registry maps each native handle to the sender of its
//! subscriber; the native trampoline looks the handle up and forwards.

use std::collections::HashMap;
use std::ptr;
use std::sync::OnceLock;

use crossbeam::channel::{unbounded, Receiver, Sender};
use libc::{c_float, c_int, c_uint, c_ulonglong, c_void};
use parking_lot::Mutex;

use crate::dsp::Dsp;
use crate::enums::{ChannelControlCallbackType, ChannelControlType};
use crate::error::{Error, Result};
use crate::ffi::tables::ControlFns;
use crate::ffi::{
    fmod_call, from_bool, to_bool, FMOD_CHANNELCONTROL, FMOD_CHANNELCONTROL_CALLBACK_TYPE,
    FMOD_CHANNELCONTROL_TYPE, FMOD_MAX_CHANNEL_WIDTH, FMOD_OK, FMOD_RESULT, FMOD_VECTOR,
};
use crate::flags::Mode;
use crate::structures::{count, ConeSettings, DistanceFilter, Vector};
use crate::system::System;
use crate::util::non_null;

/// DSP chain index of the head unit.
pub const DSP_HEAD: i32 = -1;
/// DSP chain index of the built-in fader.
pub const DSP_FADER: i32 = -2;
/// DSP chain index of the tail unit.
pub const DSP_TAIL: i32 = -3;

/// A callback raised by the mixer for a channel or channel group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// The channel finished playing or was stopped.
    End,
    /// `true` when the voice became virtual, `false` when it became real.
    VirtualVoice(bool),
    /// A sync point was passed; carries its index.
    SyncPoint(i32),
    /// Geometry occlusion was computed for this update.
    Occlusion { direct: f32, reverb: f32 },
}

/// Output/input mix matrix, row-major with one row per output channel.
#[derive(Debug, Clone, PartialEq)]
pub struct MixMatrix {
    pub out_channels: i32,
    pub in_channels: i32,
    pub levels: Vec<f32>,
}

impl MixMatrix {
    pub fn new(out_channels: i32, in_channels: i32, levels: Vec<f32>) -> Result<Self> {
        let matrix = MixMatrix {
            out_channels,
            in_channels,
            levels,
        };
        matrix.check()?;
        Ok(matrix)
    }

    pub fn level(&self, out_channel: i32, in_channel: i32) -> Option<f32> {
        if !(0..self.out_channels).contains(&out_channel) || !(0..self.in_channels).contains(&in_channel) {
            return None;
        }
        self.levels
            .get((out_channel * self.in_channels + in_channel) as usize)
            .copied()
    }

    fn check(&self) -> Result<()> {
        let width = 0..=FMOD_MAX_CHANNEL_WIDTH as i32;
        if !width.contains(&self.out_channels) || !width.contains(&self.in_channels) {
            return Err(Error::InvalidArgument(format!(
                "{}x{} mix matrix exceeds {} channels",
                self.out_channels, self.in_channels, FMOD_MAX_CHANNEL_WIDTH
            )));
        }
        let expected = self.out_channels as usize * self.in_channels as usize;
        if self.levels.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "{}x{} mix matrix needs {} levels, got {}",
                self.out_channels,
                self.in_channels,
                expected,
                self.levels.len()
            )));
        }
        Ok(())
    }

    /// Fetch a matrix through a native getter taking
    /// `(levels, out_channels, in_channels, hop)`.
    ///
    /// The first call passes a null buffer to learn the shape.
    pub(crate) fn read<F>(mut get: F) -> Result<MixMatrix>
    where
        F: FnMut(*mut c_float, &mut c_int, &mut c_int, c_int) -> Result<()>,
    {
        let (mut out_channels, mut in_channels) = (0, 0);
        get(ptr::null_mut(), &mut out_channels, &mut in_channels, 0)?;
        let mut levels = vec![0.0; out_channels.max(0) as usize * in_channels.max(0) as usize];
        if !levels.is_empty() {
            let hop = in_channels;
            get(levels.as_mut_ptr(), &mut out_channels, &mut in_channels, hop)?;
        }
        MixMatrix::new(out_channels, in_channels, levels)
    }

    /// Hand the levels to a native setter taking
    /// `(levels, out_channels, in_channels, hop)`.
    pub(crate) fn write<F>(&self, set: F) -> Result<()>
    where
        F: FnOnce(*mut c_float, c_int, c_int, c_int) -> Result<()>,
    {
        self.check()?;
        let mut levels = self.levels.clone();
        set(levels.as_mut_ptr(), self.out_channels, self.in_channels, self.in_channels)
    }
}

/// Scheduled start and end of playback, in parent DSP clocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delay {
    pub start: u64,
    pub end: u64,
    pub stop_channels: bool,
}

struct Subscriber {
    /// Raw handle of the owning system.
    owner: usize,
    sender: Sender<ControlEvent>,
}

type Registry = Mutex<HashMap<usize, Subscriber>>;

fn registry() -> &'static Registry {
    static SUBSCRIBERS: OnceLock<Registry> = OnceLock::new();
    SUBSCRIBERS.get_or_init(|| Mutex::new(HashMap::new()))
}

pub(crate) fn register(key: usize, owner: usize) -> Receiver<ControlEvent> {
    let (sender, receiver) = unbounded();
    if registry().lock().insert(key, Subscriber { owner, sender }).is_some() {
        log::debug!("replacing callback subscriber for {:#x}", key);
    }
    receiver
}

pub(crate) fn unregister(key: usize) -> bool {
    registry().lock().remove(&key).is_some()
}

pub(crate) fn is_registered(key: usize) -> bool {
    registry().lock().contains_key(&key)
}

/// Drop every subscription on objects of the system `owner`.
///
/// Handles are freed with their system and may be reused by the next one.
pub(crate) fn drop_subscribers_of(owner: usize) -> usize {
    let mut subscribers = registry().lock();
    let before = subscribers.len();
    subscribers.retain(|_, subscriber| subscriber.owner != owner);
    let dropped = before - subscribers.len();
    if dropped > 0 {
        log::debug!("dropped {} callback subscribers of system {:#x}", dropped, owner);
    }
    dropped
}

/// Decode the native callback arguments.
///
/// # Safety
/// For occlusion callbacks `data1`/`data2` must be null or point to floats.
unsafe fn decode_event(
    callback_type: ChannelControlCallbackType,
    data1: *mut c_void,
    data2: *mut c_void,
) -> ControlEvent {
    match callback_type {
        ChannelControlCallbackType::End => ControlEvent::End,
        ChannelControlCallbackType::VirtualVoice => ControlEvent::VirtualVoice(data1 as usize != 0),
        ChannelControlCallbackType::SyncPoint => ControlEvent::SyncPoint(data1 as usize as c_int),
        ChannelControlCallbackType::Occlusion => {
            let read = |p: *mut c_void| {
                if p.is_null() {
                    1.0
                } else {
                    *(p as *const c_float)
                }
            };
            ControlEvent::Occlusion {
                direct: read(data1),
                reverb: read(data2),
            }
        }
    }
}

fn dispatch(key: usize, event: ControlEvent) {
    let mut subscribers = registry().lock();
    let Some(subscriber) = subscribers.get(&key) else {
        return;
    };
    if subscriber.sender.send(event).is_err() {
        log::warn!("dropping {:?} for {:#x}: receiver is gone", event, key);
        subscribers.remove(&key);
        return;
    }
    if event == ControlEvent::End {
        subscribers.remove(&key);
    }
}

/// Native entry point for channel and channel group callbacks.
pub(crate) unsafe extern "C" fn control_callback(
    control: *mut FMOD_CHANNELCONTROL,
    control_type: FMOD_CHANNELCONTROL_TYPE,
    callback_type: FMOD_CHANNELCONTROL_CALLBACK_TYPE,
    data1: *mut c_void,
    data2: *mut c_void,
) -> FMOD_RESULT {
    let outcome = std::panic::catch_unwind(|| {
        let Some(kind) = ChannelControlCallbackType::from_raw(callback_type) else {
            log::warn!("ignoring unknown channel callback type {}", callback_type);
            return;
        };
        if ChannelControlType::from_raw(control_type).is_none() {
            log::warn!("ignoring callback for unknown control type {}", control_type);
            return;
        }
        let event = decode_event(kind, data1, data2);
        dispatch(control as usize, event);
    });
    if outcome.is_err() {
        log::error!("panic in channel callback for {:p}", control);
    }
    FMOD_OK
}

/// The shared channel / channel group surface.
///
/// Implementors supply the raw handle and their function table; every
/// operation is a provided method.
pub trait ChannelControl: Copy {
    type Raw: 'static;

    fn raw_control(&self) -> *mut Self::Raw;

    fn control_fns() -> Result<&'static ControlFns<Self::Raw>>;

    fn control_type() -> ChannelControlType;

    /// The owning system.
    ///
    /// The returned value aliases the owner; releasing it releases the
    /// owner's system.
    fn system(&self) -> Result<System> {
        let mut raw = ptr::null_mut();
        fmod_call!(Self::control_fns()?, get_system_object(self.raw_control(), &mut raw))?;
        let raw = non_null(raw, "GetSystemObject")?;
        Ok(unsafe { System::from_raw(raw) })
    }

    fn stop(&self) -> Result<()> {
        fmod_call!(Self::control_fns()?, stop(self.raw_control()))
    }

    fn set_paused(&self, paused: bool) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_paused(self.raw_control(), to_bool(paused)))
    }

    fn paused(&self) -> Result<bool> {
        let mut paused = 0;
        fmod_call!(Self::control_fns()?, get_paused(self.raw_control(), &mut paused))?;
        Ok(from_bool(paused))
    }

    /// Linear volume; 1.0 is unity, negative values invert the signal.
    fn set_volume(&self, volume: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_volume(self.raw_control(), volume))
    }

    fn volume(&self) -> Result<f32> {
        let mut volume = 0.0;
        fmod_call!(Self::control_fns()?, get_volume(self.raw_control(), &mut volume))?;
        Ok(volume)
    }

    fn set_volume_ramp(&self, ramp: bool) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_volume_ramp(self.raw_control(), to_bool(ramp)))
    }

    fn volume_ramp(&self) -> Result<bool> {
        let mut ramp = 0;
        fmod_call!(Self::control_fns()?, get_volume_ramp(self.raw_control(), &mut ramp))?;
        Ok(from_bool(ramp))
    }

    /// Combined volume after 3D, group and occlusion attenuation.
    fn audibility(&self) -> Result<f32> {
        let mut audibility = 0.0;
        fmod_call!(Self::control_fns()?, get_audibility(self.raw_control(), &mut audibility))?;
        Ok(audibility)
    }

    fn set_pitch(&self, pitch: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_pitch(self.raw_control(), pitch))
    }

    fn pitch(&self) -> Result<f32> {
        let mut pitch = 0.0;
        fmod_call!(Self::control_fns()?, get_pitch(self.raw_control(), &mut pitch))?;
        Ok(pitch)
    }

    fn set_mute(&self, mute: bool) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_mute(self.raw_control(), to_bool(mute)))
    }

    fn mute(&self) -> Result<bool> {
        let mut mute = 0;
        fmod_call!(Self::control_fns()?, get_mute(self.raw_control(), &mut mute))?;
        Ok(from_bool(mute))
    }

    /// Send level to one of the system reverb instances.
    fn set_reverb_wet(&self, instance: i32, wet: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_reverb_properties(self.raw_control(), instance, wet))
    }

    fn reverb_wet(&self, instance: i32) -> Result<f32> {
        let mut wet = 0.0;
        fmod_call!(
            Self::control_fns()?,
            get_reverb_properties(self.raw_control(), instance, &mut wet)
        )?;
        Ok(wet)
    }

    fn set_low_pass_gain(&self, gain: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_low_pass_gain(self.raw_control(), gain))
    }

    fn low_pass_gain(&self) -> Result<f32> {
        let mut gain = 0.0;
        fmod_call!(Self::control_fns()?, get_low_pass_gain(self.raw_control(), &mut gain))?;
        Ok(gain)
    }

    fn set_mode(&self, mode: Mode) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_mode(self.raw_control(), mode.bits()))
    }

    fn mode(&self) -> Result<Mode> {
        let mut mode = 0;
        fmod_call!(Self::control_fns()?, get_mode(self.raw_control(), &mut mode))?;
        Ok(Mode::from_bits_retain(mode))
    }

    fn is_playing(&self) -> Result<bool> {
        let mut playing = 0;
        fmod_call!(Self::control_fns()?, is_playing(self.raw_control(), &mut playing))?;
        Ok(from_bool(playing))
    }

    /// Stereo pan, -1.0 (left) to 1.0 (right).
    fn set_pan(&self, pan: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_pan(self.raw_control(), pan))
    }

    /// Levels for FL, FR, C, LFE, SL, SR, BL, BR.
    fn set_mix_levels_output(&self, levels: [f32; 8]) -> Result<()> {
        let [fl, fr, c, lfe, sl, sr, bl, br] = levels;
        fmod_call!(
            Self::control_fns()?,
            set_mix_levels_output(self.raw_control(), fl, fr, c, lfe, sl, sr, bl, br)
        )
    }

    fn set_mix_levels_input(&self, levels: &[f32]) -> Result<()> {
        let mut levels = levels.to_vec();
        let num = count(levels.len())?;
        fmod_call!(
            Self::control_fns()?,
            set_mix_levels_input(self.raw_control(), levels.as_mut_ptr(), num)
        )
    }

    fn set_mix_matrix(&self, matrix: &MixMatrix) -> Result<()> {
        matrix.write(|levels, out_channels, in_channels, hop| {
            fmod_call!(
                Self::control_fns()?,
                set_mix_matrix(self.raw_control(), levels, out_channels, in_channels, hop)
            )
        })
    }

    fn mix_matrix(&self) -> Result<MixMatrix> {
        let fns = Self::control_fns()?;
        MixMatrix::read(|levels, out_channels, in_channels, hop| {
            fmod_call!(
                fns,
                get_mix_matrix(self.raw_control(), levels, out_channels, in_channels, hop)
            )
        })
    }

    /// `(clock, parent_clock)` in output samples.
    fn dsp_clock(&self) -> Result<(u64, u64)> {
        let (mut clock, mut parent): (c_ulonglong, c_ulonglong) = (0, 0);
        fmod_call!(Self::control_fns()?, get_dsp_clock(self.raw_control(), &mut clock, &mut parent))?;
        Ok((clock, parent))
    }

    fn set_delay(&self, delay: Delay) -> Result<()> {
        fmod_call!(
            Self::control_fns()?,
            set_delay(self.raw_control(), delay.start, delay.end, to_bool(delay.stop_channels))
        )
    }

    fn delay(&self) -> Result<Delay> {
        let (mut start, mut end, mut stop) = (0, 0, 0);
        fmod_call!(
            Self::control_fns()?,
            get_delay(self.raw_control(), &mut start, &mut end, &mut stop)
        )?;
        Ok(Delay {
            start,
            end,
            stop_channels: from_bool(stop),
        })
    }

    fn add_fade_point(&self, clock: u64, volume: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, add_fade_point(self.raw_control(), clock, volume))
    }

    /// Ramp to `volume` at `clock` from the current level.
    fn set_fade_point_ramp(&self, clock: u64, volume: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_fade_point_ramp(self.raw_control(), clock, volume))
    }

    fn remove_fade_points(&self, start: u64, end: u64) -> Result<()> {
        fmod_call!(Self::control_fns()?, remove_fade_points(self.raw_control(), start, end))
    }

    /// `(clock, volume)` pairs in clock order.
    fn fade_points(&self) -> Result<Vec<(u64, f32)>> {
        let fns = Self::control_fns()?;
        let mut num: c_uint = 0;
        fmod_call!(
            fns,
            get_fade_points(self.raw_control(), &mut num, ptr::null_mut(), ptr::null_mut())
        )?;
        if num == 0 {
            return Ok(Vec::new());
        }
        let mut clocks = vec![0; num as usize];
        let mut volumes = vec![0.0; num as usize];
        fmod_call!(
            fns,
            get_fade_points(self.raw_control(), &mut num, clocks.as_mut_ptr(), volumes.as_mut_ptr())
        )?;
        let len = (num as usize).min(clocks.len());
        Ok(clocks.into_iter().zip(volumes).take(len).collect())
    }

    /// DSP at `index` in the chain; see [`DSP_HEAD`], [`DSP_FADER`], [`DSP_TAIL`].
    fn dsp(&self, index: i32) -> Result<Dsp> {
        let mut raw = ptr::null_mut();
        fmod_call!(Self::control_fns()?, get_dsp(self.raw_control(), index, &mut raw))?;
        Ok(Dsp::wrap(non_null(raw, "GetDSP")?))
    }

    fn add_dsp(&self, index: i32, dsp: &Dsp) -> Result<()> {
        fmod_call!(Self::control_fns()?, add_dsp(self.raw_control(), index, dsp.as_raw()))
    }

    fn remove_dsp(&self, dsp: &Dsp) -> Result<()> {
        fmod_call!(Self::control_fns()?, remove_dsp(self.raw_control(), dsp.as_raw()))
    }

    fn num_dsps(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(Self::control_fns()?, get_num_dsps(self.raw_control(), &mut num))?;
        Ok(num)
    }

    fn set_dsp_index(&self, dsp: &Dsp, index: i32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_dsp_index(self.raw_control(), dsp.as_raw(), index))
    }

    fn dsp_index(&self, dsp: &Dsp) -> Result<i32> {
        let mut index = 0;
        fmod_call!(
            Self::control_fns()?,
            get_dsp_index(self.raw_control(), dsp.as_raw(), &mut index)
        )?;
        Ok(index)
    }

    /// Position and velocity; `None` leaves that value unchanged.
    fn set_three_d_attributes(&self, position: Option<Vector>, velocity: Option<Vector>) -> Result<()> {
        let position = position.map(Vector::to_raw);
        let velocity = velocity.map(Vector::to_raw);
        fmod_call!(
            Self::control_fns()?,
            set_3d_attributes(
                self.raw_control(),
                position.as_ref().map_or(ptr::null(), |p| p as *const FMOD_VECTOR),
                velocity.as_ref().map_or(ptr::null(), |v| v as *const FMOD_VECTOR)
            )
        )
    }

    /// `(position, velocity)`.
    fn three_d_attributes(&self) -> Result<(Vector, Vector)> {
        let (mut position, mut velocity) = (FMOD_VECTOR::default(), FMOD_VECTOR::default());
        fmod_call!(
            Self::control_fns()?,
            get_3d_attributes(self.raw_control(), &mut position, &mut velocity)
        )?;
        Ok((position.into(), velocity.into()))
    }

    fn set_three_d_min_max_distance(&self, min: f32, max: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_3d_min_max_distance(self.raw_control(), min, max))
    }

    fn three_d_min_max_distance(&self) -> Result<(f32, f32)> {
        let (mut min, mut max) = (0.0, 0.0);
        fmod_call!(
            Self::control_fns()?,
            get_3d_min_max_distance(self.raw_control(), &mut min, &mut max)
        )?;
        Ok((min, max))
    }

    fn set_three_d_cone_settings(&self, cone: ConeSettings) -> Result<()> {
        fmod_call!(
            Self::control_fns()?,
            set_3d_cone_settings(
                self.raw_control(),
                cone.inside_angle,
                cone.outside_angle,
                cone.outside_volume
            )
        )
    }

    fn three_d_cone_settings(&self) -> Result<ConeSettings> {
        let (mut inside, mut outside, mut volume) = (0.0, 0.0, 0.0);
        fmod_call!(
            Self::control_fns()?,
            get_3d_cone_settings(self.raw_control(), &mut inside, &mut outside, &mut volume)
        )?;
        Ok(ConeSettings {
            inside_angle: inside,
            outside_angle: outside,
            outside_volume: volume,
        })
    }

    fn set_three_d_cone_orientation(&self, orientation: Vector) -> Result<()> {
        let mut raw = orientation.to_raw();
        fmod_call!(Self::control_fns()?, set_3d_cone_orientation(self.raw_control(), &mut raw))
    }

    fn three_d_cone_orientation(&self) -> Result<Vector> {
        let mut raw = FMOD_VECTOR::default();
        fmod_call!(Self::control_fns()?, get_3d_cone_orientation(self.raw_control(), &mut raw))?;
        Ok(raw.into())
    }

    /// Rolloff curve points, sorted by distance.
    ///
    /// The library keeps the pointer rather than copying the points, so
    /// they must live for the rest of the program.
    fn set_three_d_custom_rolloff(&self, points: &'static [Vector]) -> Result<()> {
        let num = count(points.len())?;
        fmod_call!(
            Self::control_fns()?,
            set_3d_custom_rolloff(self.raw_control(), points.as_ptr() as *mut FMOD_VECTOR, num)
        )
    }

    fn three_d_custom_rolloff(&self) -> Result<Vec<Vector>> {
        let mut points = ptr::null_mut();
        let mut num = 0;
        fmod_call!(
            Self::control_fns()?,
            get_3d_custom_rolloff(self.raw_control(), &mut points, &mut num)
        )?;
        Ok(unsafe { copy_points(points, num) })
    }

    /// Occlusion factors, 0.0 (none) to 1.0 (full).
    fn set_three_d_occlusion(&self, direct: f32, reverb: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_3d_occlusion(self.raw_control(), direct, reverb))
    }

    fn three_d_occlusion(&self) -> Result<(f32, f32)> {
        let (mut direct, mut reverb) = (0.0, 0.0);
        fmod_call!(
            Self::control_fns()?,
            get_3d_occlusion(self.raw_control(), &mut direct, &mut reverb)
        )?;
        Ok((direct, reverb))
    }

    /// Speaker spread angle in degrees.
    fn set_three_d_spread(&self, angle: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_3d_spread(self.raw_control(), angle))
    }

    fn three_d_spread(&self) -> Result<f32> {
        let mut angle = 0.0;
        fmod_call!(Self::control_fns()?, get_3d_spread(self.raw_control(), &mut angle))?;
        Ok(angle)
    }

    /// Blend between 2D (0.0) and 3D (1.0) panning.
    fn set_three_d_level(&self, level: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_3d_level(self.raw_control(), level))
    }

    fn three_d_level(&self) -> Result<f32> {
        let mut level = 0.0;
        fmod_call!(Self::control_fns()?, get_3d_level(self.raw_control(), &mut level))?;
        Ok(level)
    }

    fn set_three_d_doppler_level(&self, level: f32) -> Result<()> {
        fmod_call!(Self::control_fns()?, set_3d_doppler_level(self.raw_control(), level))
    }

    fn three_d_doppler_level(&self) -> Result<f32> {
        let mut level = 0.0;
        fmod_call!(Self::control_fns()?, get_3d_doppler_level(self.raw_control(), &mut level))?;
        Ok(level)
    }

    fn set_three_d_distance_filter(&self, filter: DistanceFilter) -> Result<()> {
        fmod_call!(
            Self::control_fns()?,
            set_3d_distance_filter(
                self.raw_control(),
                to_bool(filter.custom),
                filter.custom_level,
                filter.center_freq
            )
        )
    }

    fn three_d_distance_filter(&self) -> Result<DistanceFilter> {
        let (mut custom, mut level, mut freq) = (0, 0.0, 0.0);
        fmod_call!(
            Self::control_fns()?,
            get_3d_distance_filter(self.raw_control(), &mut custom, &mut level, &mut freq)
        )?;
        Ok(DistanceFilter {
            custom: from_bool(custom),
            custom_level: level,
            center_freq: freq,
        })
    }

    /// Start delivering callbacks for this object.
    ///
    /// A second subscription replaces the first. For channels the
    /// subscription ends after the `End` event.
    fn subscribe(&self) -> Result<Receiver<ControlEvent>> {
        let key = self.raw_control() as usize;
        let owner = self.system()?.as_raw() as usize;
        let receiver = register(key, owner);
        let installed = fmod_call!(
            Self::control_fns()?,
            set_callback(self.raw_control(), Some(control_callback))
        );
        if let Err(e) = installed {
            unregister(key);
            return Err(e);
        }
        log::trace!("subscribed to {:?} callbacks for {:#x}", Self::control_type(), key);
        Ok(receiver)
    }

    /// Stop delivering callbacks. Pending events stay in the receiver.
    fn unsubscribe(&self) -> Result<()> {
        let key = self.raw_control() as usize;
        let cleared = fmod_call!(Self::control_fns()?, set_callback(self.raw_control(), None));
        unregister(key);
        cleared
    }

    /// True while a subscription is delivering events.
    fn is_subscribed(&self) -> bool {
        is_registered(self.raw_control() as usize)
    }
}

/// # Safety
/// `points` must be null or point to `num` vectors.
pub(crate) unsafe fn copy_points(points: *const FMOD_VECTOR, num: c_int) -> Vec<Vector> {
    if points.is_null() || num <= 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(points, num as usize)
        .iter()
        .map(|&p| p.into())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const OWNER: usize = 0x2000_0000;

    fn fake_handle(tag: usize) -> *mut FMOD_CHANNELCONTROL {
        (0x1000_0000 + tag * 0x10) as *mut FMOD_CHANNELCONTROL
    }

    fn fire(handle: *mut FMOD_CHANNELCONTROL, kind: i32, data1: *mut c_void, data2: *mut c_void) {
        let status = unsafe { control_callback(handle, 0, kind, data1, data2) };
        assert_eq!(status, FMOD_OK);
    }

    #[test]
    #[serial]
    fn test_trampoline_routes_events_to_subscriber() {
        let handle = fake_handle(1);
        let events = register(handle as usize, OWNER);
        fire(handle, 1, 1 as *mut c_void, ptr::null_mut());
        fire(handle, 2, 3 as *mut c_void, ptr::null_mut());
        fire(handle, 1, ptr::null_mut(), ptr::null_mut());
        assert_eq!(events.try_recv(), Ok(ControlEvent::VirtualVoice(true)));
        assert_eq!(events.try_recv(), Ok(ControlEvent::SyncPoint(3)));
        assert_eq!(events.try_recv(), Ok(ControlEvent::VirtualVoice(false)));
        assert!(unregister(handle as usize));
    }

    #[test]
    #[serial]
    fn test_end_event_drops_registration() {
        let handle = fake_handle(2);
        let events = register(handle as usize, OWNER);
        fire(handle, 0, ptr::null_mut(), ptr::null_mut());
        assert_eq!(events.try_recv(), Ok(ControlEvent::End));
        assert!(!is_registered(handle as usize));
        // Later events for the same handle go nowhere.
        fire(handle, 2, 7 as *mut c_void, ptr::null_mut());
        assert!(events.try_recv().is_err());
    }

    #[test]
    #[serial]
    fn test_occlusion_reads_float_pointers() {
        let handle = fake_handle(3);
        let events = register(handle as usize, OWNER);
        let mut direct: c_float = 0.25;
        let mut reverb: c_float = 0.75;
        fire(
            handle,
            3,
            &mut direct as *mut c_float as *mut c_void,
            &mut reverb as *mut c_float as *mut c_void,
        );
        assert_eq!(
            events.try_recv(),
            Ok(ControlEvent::Occlusion {
                direct: 0.25,
                reverb: 0.75
            })
        );
        unregister(handle as usize);
    }

    #[test]
    #[serial]
    fn test_dropped_receiver_unregisters() {
        let handle = fake_handle(4);
        drop(register(handle as usize, OWNER));
        fire(handle, 1, ptr::null_mut(), ptr::null_mut());
        assert!(!is_registered(handle as usize));
    }

    #[test]
    #[serial]
    fn test_unknown_callback_type_is_ignored() {
        let handle = fake_handle(5);
        let events = register(handle as usize, OWNER);
        fire(handle, 99, ptr::null_mut(), ptr::null_mut());
        assert!(events.try_recv().is_err());
        assert!(is_registered(handle as usize));
        unregister(handle as usize);
    }

    #[test]
    fn test_unregistered_handle_is_a_no_op() {
        fire(fake_handle(6), 0, ptr::null_mut(), ptr::null_mut());
    }

    #[test]
    fn test_mix_matrix_shape() {
        let matrix = MixMatrix::new(2, 1, vec![0.5, 1.0]).unwrap();
        assert_eq!(matrix.level(0, 0), Some(0.5));
        assert_eq!(matrix.level(1, 0), Some(1.0));
        assert_eq!(matrix.level(2, 0), None);
        assert!(MixMatrix::new(2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_mix_matrix_rejects_oversized_shape() {
        let err = MixMatrix::new(33, 1, vec![0.0; 33]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "{}", err);
        assert!(MixMatrix::new(-1, 2, Vec::new()).is_err());
        assert!(MixMatrix::new(0, 0, Vec::new()).is_ok());
    }

    #[test]
    fn test_mix_matrix_read_queries_shape_then_levels() {
        let native = [0.1f32, 0.2, 0.3, 0.4, 0.5, 0.6];
        let mut calls = Vec::new();
        let matrix = MixMatrix::read(|levels, out_channels, in_channels, hop| {
            calls.push((levels.is_null(), hop));
            *out_channels = 3;
            *in_channels = 2;
            if !levels.is_null() {
                unsafe { ptr::copy_nonoverlapping(native.as_ptr(), levels, native.len()) };
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, vec![(true, 0), (false, 2)]);
        assert_eq!(matrix.out_channels, 3);
        assert_eq!(matrix.level(2, 1), Some(0.6));
        assert_eq!(matrix.level(1, 0), Some(0.3));
    }

    #[test]
    fn test_mix_matrix_read_skips_fill_for_empty_matrix() {
        let mut calls = 0;
        let matrix = MixMatrix::read(|_, out_channels, in_channels, _| {
            calls += 1;
            *out_channels = 0;
            *in_channels = 2;
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert!(matrix.levels.is_empty());
    }

    #[test]
    fn test_mix_matrix_read_propagates_native_error() {
        let err = MixMatrix::read(|_, _, _, _| Err(Error::NullHandle("mix matrix"))).unwrap_err();
        assert!(matches!(err, Error::NullHandle(_)));
    }

    #[test]
    fn test_mix_matrix_write_passes_row_hop() {
        let matrix = MixMatrix::new(2, 3, vec![1.0, 0.0, 0.5, 0.0, 1.0, 0.5]).unwrap();
        let mut seen = None;
        matrix
            .write(|levels, out_channels, in_channels, hop| {
                let levels = unsafe { std::slice::from_raw_parts(levels, 6) }.to_vec();
                seen = Some((levels, out_channels, in_channels, hop));
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, Some((matrix.levels.clone(), 2, 3, 3)));
    }

    #[test]
    fn test_mix_matrix_write_checks_hand_built_matrix() {
        let matrix = MixMatrix {
            out_channels: 2,
            in_channels: 2,
            levels: vec![1.0],
        };
        let mut called = false;
        let result = matrix.write(|_, _, _, _| {
            called = true;
            Ok(())
        });
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert!(!called);
    }

    #[test]
    #[serial]
    fn test_drop_subscribers_of_only_touches_that_system() {
        let (a, b) = (fake_handle(7), fake_handle(8));
        let other = fake_handle(9);
        let events = register(a as usize, OWNER);
        register(b as usize, OWNER);
        let survivor = register(other as usize, OWNER + 1);

        assert_eq!(drop_subscribers_of(OWNER), 2);
        assert!(!is_registered(a as usize));
        assert!(!is_registered(b as usize));
        assert!(is_registered(other as usize));

        // A reused handle from the next system reaches nobody stale.
        fire(a, 0, ptr::null_mut(), ptr::null_mut());
        assert!(events.try_recv().is_err());
        fire(other, 2, 4 as *mut c_void, ptr::null_mut());
        assert_eq!(survivor.try_recv(), Ok(ControlEvent::SyncPoint(4)));

        assert_eq!(drop_subscribers_of(OWNER), 0);
        unregister(other as usize);
    }

    #[test]
    fn test_copy_points() {
        let raw = [
            FMOD_VECTOR { x: 0.0, y: 1.0, z: 0.0 },
            FMOD_VECTOR { x: 10.0, y: 0.0, z: 0.0 },
        ];
        let points = unsafe { copy_points(raw.as_ptr(), 2) };
        assert_eq!(points, vec![Vector::new(0.0, 1.0, 0.0), Vector::new(10.0, 0.0, 0.0)]);
        assert!(unsafe { copy_points(ptr::null(), 4) }.is_empty());
    }
}
