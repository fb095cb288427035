use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};

use crate::config::{parse_output, parse_speaker_mode, parse_volume, Options};
use crate::logging::LogLevel;

/// Play sounds and Studio events through a runtime-loaded FMOD library
#[derive(Parser, Debug, Default)]
#[command(name = "fmodex")]
#[command(version)]
#[command(about = "Play sounds and FMOD Studio events through the FMOD engine", long_about = None)]
pub struct Cli {
    /// Path to the FMOD core library
    #[arg(long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Path to the FMOD Studio library
    #[arg(long = "studio-library", value_name = "PATH")]
    pub studio_library: Option<PathBuf>,

    /// Output backend (auto, pulseaudio, alsa, wasapi, nosound, nosound_nrt, ...)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Mixer sample rate in Hz
    #[arg(short, long, value_name = "HZ")]
    pub rate: Option<i32>,

    /// Speaker layout (mono, stereo, quad, surround, 5.1, 7.1, 7.1.4)
    #[arg(long = "speaker-mode", value_name = "MODE")]
    pub speaker_mode: Option<String>,

    /// Playback volume as a percentage (0-100)
    #[arg(long, value_name = "VOLUME")]
    pub volume: Option<String>,

    /// Pitch multiplier (1.0 is unchanged)
    #[arg(short, long, value_name = "FACTOR")]
    pub pitch: Option<f32>,

    /// Loop the sound until interrupted
    #[arg(short, long = "loop")]
    pub looping: bool,

    /// Stream the file instead of decoding it up front
    #[arg(short, long)]
    pub stream: bool,

    /// List output drivers and exit
    #[arg(long)]
    pub drivers: bool,

    /// Studio bank to load (can be specified multiple times)
    #[arg(short, long, value_name = "BANK")]
    pub bank: Vec<PathBuf>,

    /// Studio event path to play, e.g. event:/Music/Level 01
    #[arg(short, long, value_name = "EVENT")]
    pub event: Option<String>,

    /// Increase logging (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log file path
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Sound file to play
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Print library and driver information.
    Info,
    ListDrivers,
    PlayFile(PathBuf),
    PlayEvent { banks: Vec<PathBuf>, event: String },
}

/// Per-playback settings applied to the channel or event instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub volume: f32,
    pub pitch: f32,
    pub looping: bool,
    pub stream: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            volume: 1.0,
            pitch: 1.0,
            looping: false,
            stream: false,
        }
    }
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref path) = self.library {
            opts.core_library = Some(path.clone());
        }

        if let Some(ref path) = self.studio_library {
            opts.studio_library = Some(path.clone());
        }

        if let Some(ref output) = self.output {
            opts.output = Some(parse_output(output)?);
        }

        if let Some(rate) = self.rate {
            if !(8_000..=192_000).contains(&rate) {
                anyhow::bail!("Sample rate out of range (8000 to 192000): {}", rate);
            }
            opts.sample_rate = Some(rate);
        }

        if let Some(ref mode) = self.speaker_mode {
            opts.speaker_mode = Some(parse_speaker_mode(mode)?);
        }

        if self.verbose > 0 {
            let level = opts.log_level.as_i32() + i32::from(self.verbose);
            opts.log_level = LogLevel::from_i32(level.min(LogLevel::All.as_i32()));
        }
        if self.verbose > 1 {
            opts.fmod_debug = true;
        }

        if let Some(ref log_file) = self.log_file {
            opts.log_file = Some(log_file.clone());
        }

        Ok(opts)
    }

    pub fn action(&self) -> Result<Action> {
        if self.drivers {
            return Ok(Action::ListDrivers);
        }
        match (&self.event, &self.file) {
            (Some(_), Some(_)) => anyhow::bail!("Give either a FILE or --event, not both"),
            (Some(event), None) => {
                if self.bank.is_empty() {
                    anyhow::bail!("--event needs at least one --bank");
                }
                Ok(Action::PlayEvent {
                    banks: self.bank.clone(),
                    event: event.clone(),
                })
            }
            (None, Some(file)) => Ok(Action::PlayFile(file.clone())),
            (None, None) => Ok(Action::Info),
        }
    }

    pub fn playback(&self) -> Result<Playback> {
        let mut playback = Playback {
            looping: self.looping,
            stream: self.stream,
            ..Default::default()
        };
        if let Some(ref vol) = self.volume {
            playback.volume = parse_volume(vol)?;
        }
        if let Some(pitch) = self.pitch {
            if !(pitch.is_finite() && pitch > 0.0) {
                anyhow::bail!("Pitch must be a positive number: {}", pitch);
            }
            playback.pitch = pitch;
        }
        Ok(playback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{OutputType, SpeakerMode};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fmodex").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_merge_library_and_output() {
        let cli = parse(&[
            "--library",
            "/opt/fmod/libfmod.so",
            "--output",
            "nosound_nrt",
            "--rate",
            "44100",
            "--speaker-mode",
            "stereo",
        ]);
        let opts = cli.merge_into_options(Options::default()).unwrap();
        assert_eq!(opts.core_library, Some(PathBuf::from("/opt/fmod/libfmod.so")));
        assert_eq!(opts.output, Some(OutputType::NoSoundNrt));
        assert_eq!(opts.sample_rate, Some(44100));
        assert_eq!(opts.speaker_mode, Some(SpeakerMode::Stereo));
    }

    #[test]
    fn test_merge_rejects_bad_values() {
        let cli = parse(&["--output", "gramophone"]);
        assert!(cli.merge_into_options(Options::default()).is_err());
        let cli = parse(&["--rate", "100"]);
        assert!(cli.merge_into_options(Options::default()).is_err());
    }

    #[test]
    fn test_verbose_raises_level() {
        let opts = parse(&["-v"]).merge_into_options(Options::default()).unwrap();
        assert_eq!(opts.log_level, LogLevel::Debug);
        assert!(!opts.fmod_debug);

        let opts = parse(&["-vvvv"]).merge_into_options(Options::default()).unwrap();
        assert_eq!(opts.log_level, LogLevel::All);
        assert!(opts.fmod_debug);
    }

    #[test]
    fn test_action() {
        assert_eq!(parse(&[]).action().unwrap(), Action::Info);
        assert_eq!(parse(&["--drivers"]).action().unwrap(), Action::ListDrivers);
        assert_eq!(
            parse(&["music.ogg"]).action().unwrap(),
            Action::PlayFile(PathBuf::from("music.ogg"))
        );
        assert_eq!(
            parse(&["--bank", "Master.bank", "-b", "Master.strings.bank", "--event", "event:/UI/Click"])
                .action()
                .unwrap(),
            Action::PlayEvent {
                banks: vec![
                    PathBuf::from("Master.bank"),
                    PathBuf::from("Master.strings.bank")
                ],
                event: "event:/UI/Click".to_string(),
            }
        );
        assert!(parse(&["--event", "event:/UI/Click"]).action().is_err());
        assert!(parse(&["-b", "Master.bank", "-e", "event:/A", "a.wav"]).action().is_err());
    }

    #[test]
    fn test_playback() {
        let playback = parse(&["--volume", "50", "--pitch", "2", "--loop", "--stream"])
            .playback()
            .unwrap();
        assert_eq!(
            playback,
            Playback {
                volume: 0.5,
                pitch: 2.0,
                looping: true,
                stream: true,
            }
        );
        assert_eq!(Cli::default().playback().unwrap(), Playback::default());
        assert_eq!(parse(&["--volume", "75%"]).playback().unwrap().volume, 0.75);
        assert!(parse(&["--volume", "loud"]).playback().is_err());
        assert!(parse(&["--pitch", "0"]).playback().is_err());
    }
}
