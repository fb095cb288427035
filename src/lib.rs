//! Bindings to the FMOD Core and FMOD Studio engines.
//!
//! The vendor libraries are opened at runtime (see [`ffi::load`]); every
//! proxy type forwards to one exported function per call and reports a
//! failing status as [`Error`].

pub mod channel;
pub mod channel_control;
pub mod channel_group;
pub mod cli;
pub mod config;
pub mod debug;
pub mod dsp;
pub mod dsp_connection;
pub mod enums;
pub mod error;
pub mod ffi;
pub mod flags;
pub mod geometry;
pub mod logging;
pub mod reverb;
pub mod sound;
pub mod sound_group;
pub mod structures;
pub mod studio;
pub mod system;
mod util;

pub use channel::Channel;
pub use channel_control::{ChannelControl, ControlEvent};
pub use channel_group::ChannelGroup;
pub use cli::Cli;
pub use config::Options;
pub use dsp::Dsp;
pub use dsp_connection::DspConnection;
pub use error::{Error, FmodResult, Result};
pub use geometry::Geometry;
pub use logging::LogLevel;
pub use reverb::Reverb3D;
pub use sound::Sound;
pub use sound_group::SoundGroup;
pub use structures::{Attributes3d, Guid, Vector};
pub use system::System;
