//! Tests against the real FMOD core library.
//!
//! They use the non-realtime silent output, so no audio device is needed,
//! and skip themselves when the library cannot be loaded.

use std::io::Write;

use serial_test::serial;

use fmodex::channel_control::{ControlEvent, MixMatrix};
use fmodex::dsp::WetDryMix;
use fmodex::enums::{DspConnectionType, DspType, OutputType, SoundFormat, SoundGroupBehavior, SoundType};
use fmodex::flags::{InitFlags, Mode, TimeUnit};
use fmodex::geometry::PolygonAttributes;
use fmodex::reverb::ReverbZone;
use fmodex::structures::ReverbProperties;
use fmodex::{ffi, ChannelControl, FmodResult, Options, System, Vector};

const SAMPLE_RATE: u32 = 8000;

fn system() -> Option<System> {
    if let Err(e) = ffi::api() {
        eprintln!("Skipping: FMOD library not available ({})", e);
        return None;
    }
    let options = Options {
        output: Some(OutputType::NoSoundNrt),
        max_channels: 32,
        init_flags: InitFlags::NORMAL,
        ..Default::default()
    };
    Some(System::with_options(&options).expect("system"))
}

/// A mono 16-bit WAV file holding `samples` frames of a square wave.
fn wav_bytes(samples: u32) -> Vec<u8> {
    let data_len = samples * 2;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for i in 0..samples {
        let value: i16 = if (i / 20) % 2 == 0 { 8000 } else { -8000 };
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

#[test]
#[serial]
fn test_system_reports_version_and_output() {
    let Some(system) = system() else { return };
    assert!(system.version().unwrap() >= 0x0002_0000);
    assert_eq!(system.output().unwrap(), OutputType::NoSoundNrt);
    let master = system.master_channel_group().unwrap();
    assert_eq!(master.name().unwrap(), "Master");
    assert!(master.parent_group().unwrap().is_none());
    system.release().unwrap();
}

#[test]
#[serial]
fn test_sound_from_memory() {
    let Some(system) = system() else { return };
    let sound = system
        .create_sound_from_memory(&wav_bytes(SAMPLE_RATE / 4), Mode::DEFAULT)
        .unwrap();
    let format = sound.format().unwrap();
    assert_eq!(format.sound_type, SoundType::Wav);
    assert_eq!(format.format, SoundFormat::Pcm16);
    assert_eq!(format.channels, 1);
    assert_eq!(sound.length(TimeUnit::PCM).unwrap(), SAMPLE_RATE / 4);
    assert_eq!(sound.length(TimeUnit::MS).unwrap(), 250);
    sound.release().unwrap();
    system.release().unwrap();
}

#[test]
#[serial]
fn test_sound_from_file_and_missing_file() {
    let Some(system) = system() else { return };
    let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
    file.write_all(&wav_bytes(SAMPLE_RATE / 10)).unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    let sound = system.create_sound(path, Mode::DEFAULT).unwrap();
    assert_eq!(sound.length(TimeUnit::PCM).unwrap(), SAMPLE_RATE / 10);
    sound.release().unwrap();

    let err = system
        .create_sound("/nonexistent/fmodex/missing.wav", Mode::DEFAULT)
        .unwrap_err();
    assert!(err.is(FmodResult::ErrFileNotFound), "{}", err);
    system.release().unwrap();
}

#[test]
#[serial]
fn test_channel_plays_to_end_and_reports_it() {
    let Some(system) = system() else { return };
    let sound = system
        .create_sound_from_memory(&wav_bytes(SAMPLE_RATE / 10), Mode::LOOP_OFF)
        .unwrap();
    let channel = system.play_sound(&sound, None, true).unwrap();
    channel.set_volume(0.5).unwrap();
    assert_eq!(channel.volume().unwrap(), 0.5);
    assert!(channel.paused().unwrap());

    let events = channel.subscribe().unwrap();
    channel.set_paused(false).unwrap();

    let mut ended = false;
    for _ in 0..1000 {
        system.update().unwrap();
        if let Ok(ControlEvent::End) = events.try_recv() {
            ended = true;
            break;
        }
    }
    assert!(ended, "channel never reported its end");
    assert!(!channel.is_subscribed());

    sound.release().unwrap();
    system.release().unwrap();
}

#[test]
#[serial]
fn test_channel_groups_and_dsp() {
    let Some(system) = system() else { return };
    let master = system.master_channel_group().unwrap();
    let music = system.create_channel_group("music").unwrap();
    master.add_group(&music, true).unwrap();
    assert_eq!(music.name().unwrap(), "music");
    assert_eq!(music.parent_group().unwrap(), Some(master));
    assert!(master.num_groups().unwrap() >= 1);

    let dsp = system.create_dsp_by_type(DspType::Lowpass).unwrap();
    assert_eq!(dsp.dsp_type().unwrap(), DspType::Lowpass);
    assert!(dsp.num_parameters().unwrap() > 0);
    assert!(!dsp.parameter_info(0).unwrap().name.is_empty());
    music.add_dsp(0, &dsp).unwrap();
    assert_eq!(music.dsp_index(&dsp).unwrap(), 0);
    dsp.set_wet_dry_mix(WetDryMix::default()).unwrap();
    music.remove_dsp(&dsp).unwrap();

    dsp.release().unwrap();
    music.release().unwrap();
    system.release().unwrap();
}

#[test]
#[serial]
fn test_geometry_save_and_load() {
    let Some(system) = system() else { return };
    let geometry = system.create_geometry(4, 16).unwrap();
    let attributes = PolygonAttributes {
        direct_occlusion: 1.0,
        reverb_occlusion: 0.5,
        double_sided: true,
    };
    let square = [
        Vector::new(-1.0, -1.0, 0.0),
        Vector::new(1.0, -1.0, 0.0),
        Vector::new(1.0, 1.0, 0.0),
        Vector::new(-1.0, 1.0, 0.0),
    ];
    let index = geometry.add_polygon(attributes, &square).unwrap();
    assert_eq!(geometry.num_polygons().unwrap(), 1);
    assert_eq!(geometry.polygon_num_vertices(index).unwrap(), 4);
    assert_eq!(geometry.polygon_attributes(index).unwrap(), attributes);

    let bytes = geometry.save().unwrap();
    assert!(!bytes.is_empty());
    let loaded = system.load_geometry(&bytes).unwrap();
    assert_eq!(loaded.num_polygons().unwrap(), 1);
    assert!(geometry.add_polygon(attributes, &square[..2]).is_err());

    loaded.release().unwrap();
    geometry.release().unwrap();
    system.release().unwrap();
}

#[test]
#[serial]
fn test_sound_group_settings_and_membership() {
    let Some(system) = system() else { return };
    let group = system.create_sound_group("sfx").unwrap();
    assert_eq!(group.name().unwrap(), "sfx");

    group.set_max_audible(2).unwrap();
    assert_eq!(group.max_audible().unwrap(), 2);
    group.set_max_audible_behavior(SoundGroupBehavior::Mute).unwrap();
    assert_eq!(group.max_audible_behavior().unwrap(), SoundGroupBehavior::Mute);
    group.set_mute_fade_speed(0.5).unwrap();
    assert_eq!(group.mute_fade_speed().unwrap(), 0.5);
    group.set_volume(0.25).unwrap();
    assert_eq!(group.volume().unwrap(), 0.25);

    let sound = system
        .create_sound_from_memory(&wav_bytes(SAMPLE_RATE / 10), Mode::DEFAULT)
        .unwrap();
    sound.set_sound_group(&group).unwrap();
    assert_eq!(sound.sound_group().unwrap(), group);
    assert_eq!(group.num_sounds().unwrap(), 1);
    assert_eq!(group.sound(0).unwrap(), sound);
    assert_eq!(group.num_playing().unwrap(), 0);
    group.stop().unwrap();

    sound.release().unwrap();
    group.release().unwrap();
    system.release().unwrap();
}

#[test]
#[serial]
fn test_reverb_zone_round_trip() {
    let Some(system) = system() else { return };
    let reverb = system.create_reverb_3d().unwrap();
    let zone = ReverbZone::new(Vector::new(1.0, 0.0, -2.0), 5.0, 20.0).unwrap();
    reverb.set_three_d_attributes(zone).unwrap();
    assert_eq!(reverb.three_d_attributes().unwrap(), zone);

    reverb.set_properties(&ReverbProperties::HALLWAY).unwrap();
    assert_eq!(reverb.properties().unwrap().decay_time, 1500.0);

    reverb.set_active(false).unwrap();
    assert!(!reverb.active().unwrap());
    reverb.set_active(true).unwrap();
    assert!(reverb.active().unwrap());

    reverb.release().unwrap();
    system.release().unwrap();
}

#[test]
#[serial]
fn test_dsp_connection_mix_and_matrix() {
    let Some(system) = system() else { return };
    let mixer = system.create_dsp_by_type(DspType::Mixer).unwrap();
    let source = system.create_dsp_by_type(DspType::Oscillator).unwrap();
    let connection = mixer.add_input(&source, DspConnectionType::Standard).unwrap();

    assert_eq!(connection.input().unwrap(), source);
    assert_eq!(connection.output().unwrap(), mixer);
    assert_eq!(connection.connection_type().unwrap(), DspConnectionType::Standard);
    assert_eq!(mixer.num_inputs().unwrap(), 1);
    assert_eq!(mixer.input(0).unwrap(), (source, connection));

    connection.set_mix(0.5).unwrap();
    assert_eq!(connection.mix().unwrap(), 0.5);

    let matrix = MixMatrix::new(2, 1, vec![1.0, 0.25]).unwrap();
    connection.set_mix_matrix(&matrix).unwrap();
    assert_eq!(connection.mix_matrix().unwrap(), matrix);

    mixer.disconnect_from(Some(&source), None).unwrap();
    assert_eq!(mixer.num_inputs().unwrap(), 0);
    source.release().unwrap();
    mixer.release().unwrap();
    system.release().unwrap();
}

#[test]
#[serial]
fn test_release_drops_channel_subscriptions() {
    let Some(system) = system() else { return };
    let sound = system
        .create_sound_from_memory(&wav_bytes(SAMPLE_RATE), Mode::LOOP_NORMAL)
        .unwrap();
    let channel = system.play_sound(&sound, None, true).unwrap();
    let _events = channel.subscribe().unwrap();
    assert!(channel.is_subscribed());

    system.release().unwrap();
    assert!(!channel.is_subscribed());
}
