use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam::channel::TryRecvError;

use fmodex::cli::{Action, Cli, Playback};
use fmodex::enums::{PlaybackState, StopMode};
use fmodex::flags::{LoadBankFlags, Mode, StudioInitFlags, TimeUnit};
use fmodex::studio::StudioSystem;
use fmodex::system::format_version;
use fmodex::{ffi, logging, ChannelControl, ControlEvent, FmodResult, Options, System};

const UPDATE_INTERVAL: Duration = Duration::from_millis(20);

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = Options::from_env()?;
    let options = cli.merge_into_options(options)?;
    logging::init(options.log_level, options.log_file.as_deref())?;

    let api = ffi::load(options.library_config()).context("Failed to load the FMOD library")?;
    log::info!("FMOD library: {}", api.path().display());

    match cli.action()? {
        Action::Info => print_info(&options),
        Action::ListDrivers => list_drivers(&options),
        Action::PlayFile(path) => play_file(&options, &path, cli.playback()?),
        Action::PlayEvent { banks, event } => play_event(&options, &banks, &event, cli.playback()?),
    }
}

fn print_info(options: &Options) -> Result<()> {
    let system = System::with_options(options)?;
    let version = system.version()?;
    println!("FMOD version {}", format_version(version));
    println!("Output: {}", system.output()?);
    let format = system.software_format()?;
    println!(
        "Mixer: {} Hz, {} ({} raw speakers)",
        format.sample_rate, format.speaker_mode, format.num_raw_speakers
    );
    system.release()?;
    Ok(())
}

fn list_drivers(options: &Options) -> Result<()> {
    let system = System::new()?;
    if let Some(output) = options.output {
        system.set_output(output)?;
    }
    let drivers = system.drivers()?;
    if drivers.is_empty() {
        println!("No output drivers");
    }
    for (id, driver) in drivers.iter().enumerate() {
        println!(
            "{:2}: {} ({} Hz, {}, {} channels) {}",
            id,
            driver.name,
            driver.system_rate,
            driver.speaker_mode,
            driver.speaker_mode_channels,
            driver.guid
        );
    }
    system.release()?;
    Ok(())
}

fn play_file(options: &Options, path: &Path, playback: Playback) -> Result<()> {
    let name = path
        .to_str()
        .with_context(|| format!("Path is not valid UTF-8: {}", path.display()))?;
    let system = System::with_options(options)?;

    let mode = if playback.looping {
        Mode::LOOP_NORMAL
    } else {
        Mode::LOOP_OFF
    };
    let sound = if playback.stream {
        system.create_stream(name, mode)
    } else {
        system.create_sound(name, mode)
    }
    .with_context(|| format!("Failed to open {}", path.display()))?;

    let length = sound.length(TimeUnit::MS).unwrap_or(0);
    println!("Playing {} ({}.{:03} s)", path.display(), length / 1000, length % 1000);

    let channel = system.play_sound(&sound, None, true)?;
    channel.set_volume(playback.volume)?;
    channel.set_pitch(playback.pitch)?;
    let events = channel.subscribe()?;
    channel.set_paused(false)?;

    loop {
        system.update()?;
        match events.try_recv() {
            Ok(ControlEvent::End) | Err(TryRecvError::Disconnected) => break,
            Ok(event) => log::debug!("channel event: {:?}", event),
            Err(TryRecvError::Empty) => {}
        }
        match channel.is_playing() {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is(FmodResult::ErrInvalidHandle) || e.is(FmodResult::ErrChannelStolen) => break,
            Err(e) => return Err(e.into()),
        }
        thread::sleep(UPDATE_INTERVAL);
    }

    sound.release()?;
    system.release()?;
    Ok(())
}

fn play_event(options: &Options, banks: &[PathBuf], event: &str, playback: Playback) -> Result<()> {
    let studio = StudioSystem::new()?;
    let core = studio.core_system()?;
    if let Some(output) = options.output {
        core.set_output(output)?;
    }
    studio.initialize(options.max_channels, StudioInitFlags::NORMAL, options.init_flags)?;

    for bank in banks {
        let name = bank
            .to_str()
            .with_context(|| format!("Path is not valid UTF-8: {}", bank.display()))?;
        studio
            .load_bank_file(name, LoadBankFlags::NORMAL)
            .with_context(|| format!("Failed to load bank {}", bank.display()))?;
    }

    let description = studio
        .event(event)
        .with_context(|| format!("Unknown event {}", event))?;
    let instance = description.create_instance()?;
    instance.set_volume(playback.volume)?;
    instance.set_pitch(playback.pitch)?;
    instance.start()?;
    println!("Playing {}", event);

    loop {
        studio.update()?;
        match instance.playback_state()? {
            PlaybackState::Stopped => break,
            PlaybackState::Sustaining if !playback.looping => instance.stop(StopMode::AllowFadeout)?,
            _ => {}
        }
        thread::sleep(UPDATE_INTERVAL);
    }

    instance.release()?;
    studio.unload_all()?;
    studio.release()?;
    Ok(())
}
