use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use libc::c_uint;

use crate::enums::{OutputType, SpeakerMode};
use crate::ffi::library::{HEADER_VERSION_ENV, LIBRARY_PATH_ENV, STUDIO_LIBRARY_PATH_ENV};
use crate::ffi::{LibraryConfig, FMOD_VERSION};
use crate::flags::InitFlags;
use crate::logging::LogLevel;

/// Environment variable holding the log level (name or number).
pub const LOG_LEVEL_ENV: &str = "FMODEX_LOG";

/// Settings used to load the libraries and bring up a system.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub core_library: Option<PathBuf>,
    pub studio_library: Option<PathBuf>,
    pub header_version: c_uint,
    pub max_channels: i32,
    pub init_flags: InitFlags,
    pub output: Option<OutputType>,
    pub sample_rate: Option<i32>,
    pub speaker_mode: Option<SpeakerMode>,
    /// `(buffer_length, num_buffers)`.
    pub dsp_buffer: Option<(u32, i32)>,
    pub log_level: LogLevel,
    pub log_file: Option<PathBuf>,
    /// Route the engine's own debug output into the logger.
    pub fmod_debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            core_library: None,
            studio_library: None,
            header_version: FMOD_VERSION,
            max_channels: 64,
            init_flags: InitFlags::NORMAL,
            output: None,
            sample_rate: None,
            speaker_mode: None,
            dsp_buffer: None,
            log_level: LogLevel::Info,
            log_file: None,
            fmod_debug: false,
        }
    }
}

impl Options {
    /// Defaults overridden by the `FMOD_*` and `FMODEX_LOG` variables.
    pub fn from_env() -> Result<Options> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Options>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Options::default();
        if let Some(path) = lookup(LIBRARY_PATH_ENV) {
            opts.core_library = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(STUDIO_LIBRARY_PATH_ENV) {
            opts.studio_library = Some(PathBuf::from(path));
        }
        if let Some(version) = lookup(HEADER_VERSION_ENV) {
            opts.header_version = parse_header_version(&version)
                .with_context(|| format!("Invalid {}", HEADER_VERSION_ENV))?;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            opts.log_level = LogLevel::parse(&level)
                .with_context(|| format!("Invalid {}: {}", LOG_LEVEL_ENV, level))?;
        }
        Ok(opts)
    }

    /// Where the loader should look for the libraries.
    pub fn library_config(&self) -> LibraryConfig {
        LibraryConfig {
            core_path: self.core_library.clone(),
            studio_path: self.studio_library.clone(),
            header_version: self.header_version,
        }
    }
}

pub fn parse_output(s: &str) -> Result<OutputType> {
    s.parse::<OutputType>()
        .with_context(|| format!("Invalid output type: {}", s))
}

pub fn parse_speaker_mode(s: &str) -> Result<SpeakerMode> {
    s.parse::<SpeakerMode>()
        .with_context(|| format!("Invalid speaker mode: {}", s))
}

/// Percentage such as `50` or `12.5%` to a linear gain, clamped to 0.0-1.0.
pub fn parse_volume(s: &str) -> Result<f32> {
    let s = s.trim();
    let percent: f32 = s
        .strip_suffix('%')
        .unwrap_or(s)
        .trim_end()
        .parse()
        .with_context(|| format!("Invalid volume: {}", s))?;
    if !percent.is_finite() {
        anyhow::bail!("Volume must be a finite percentage: {}", s);
    }
    Ok(percent.clamp(0.0, 100.0) / 100.0)
}

/// Parse a header version given as `0x00020222`, `20222` or `2.02.22`.
pub fn parse_header_version(s: &str) -> Result<c_uint> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return c_uint::from_str_radix(hex, 16).context("Invalid hexadecimal version");
    }

    let parts: Vec<&str> = s.split('.').collect();
    match parts.as_slice() {
        [major, minor, patch] => {
            let major: c_uint = major.parse().context("Invalid major version")?;
            let minor: c_uint = minor.parse().context("Invalid minor version")?;
            let patch: c_uint = patch.parse().context("Invalid patch version")?;
            if major > 0xFFFF || minor > 0xFF || patch > 0xFF {
                anyhow::bail!("Version component out of range: {}", s);
            }
            // Components are written in decimal but packed as BCD-style hex.
            let minor = c_uint::from_str_radix(&format!("{}", minor), 16)?;
            let patch = c_uint::from_str_radix(&format!("{}", patch), 16)?;
            if minor > 0xFF || patch > 0xFF {
                anyhow::bail!("Version component out of range: {}", s);
            }
            Ok((major << 16) | (minor << 8) | patch)
        }
        [single] => c_uint::from_str_radix(single, 16).context("Invalid version"),
        _ => anyhow::bail!("Version must be 0xMMMMmmpp or MAJOR.MINOR.PATCH"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[test]
    fn test_options_default() {
        let opts = Options::default();
        assert_eq!(opts.header_version, FMOD_VERSION);
        assert_eq!(opts.max_channels, 64);
        assert_eq!(opts.log_level, LogLevel::Info);
        assert!(opts.output.is_none());
        assert!(!opts.fmod_debug);
    }

    #[rstest]
    #[case("0x00020222", 0x0002_0222)]
    #[case("0X00020107", 0x0002_0107)]
    #[case("2.02.22", 0x0002_0222)]
    #[case("2.1.7", 0x0002_0107)]
    #[case("4.44.64", 0x0004_4464)]
    #[case("20222", 0x0002_0222)]
    fn test_parse_header_version(#[case] input: &str, #[case] expected: c_uint) {
        assert_eq!(parse_header_version(input).unwrap(), expected);
    }

    #[rstest]
    #[case("2.02")]
    #[case("2.x.22")]
    #[case("2.100.0")]
    #[case("0xZZ")]
    #[case("")]
    fn test_parse_header_version_invalid(#[case] input: &str) {
        assert!(parse_header_version(input).is_err());
    }

    #[rstest]
    #[case("0", 0.0)]
    #[case("50", 0.5)]
    #[case(" 25% ", 0.25)]
    #[case("12.5", 0.125)]
    #[case("-10", 0.0)]
    #[case("150", 1.0)]
    fn test_parse_volume(#[case] input: &str, #[case] expected: f32) {
        assert_eq!(parse_volume(input).unwrap(), expected);
    }

    #[rstest]
    #[case("loud")]
    #[case("")]
    #[case("%")]
    #[case("NaN")]
    #[case("inf")]
    fn test_parse_volume_invalid(#[case] input: &str) {
        assert!(parse_volume(input).is_err());
    }

    #[test]
    fn test_parse_output_and_speaker_mode() {
        assert_eq!(parse_output("nosound_nrt").unwrap(), OutputType::NoSoundNrt);
        assert_eq!(parse_output("pulse").unwrap(), OutputType::PulseAudio);
        assert!(parse_output("gramophone").is_err());
        assert_eq!(parse_speaker_mode("stereo").unwrap(), SpeakerMode::Stereo);
        assert!(parse_speaker_mode("13.1").is_err());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (LIBRARY_PATH_ENV, "/opt/fmod/libfmod.so"),
            (HEADER_VERSION_ENV, "2.02.20"),
            (LOG_LEVEL_ENV, "debug"),
        ]
        .into_iter()
        .collect();
        let opts = Options::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(opts.core_library, Some(PathBuf::from("/opt/fmod/libfmod.so")));
        assert!(opts.studio_library.is_none());
        assert_eq!(opts.header_version, 0x0002_0220);
        assert_eq!(opts.log_level, LogLevel::Debug);

        let config = opts.library_config();
        assert_eq!(config.core_path, opts.core_library);
        assert_eq!(config.header_version, 0x0002_0220);
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(Options::from_lookup(|k| (k == LOG_LEVEL_ENV).then(|| "loud".to_string())).is_err());
        assert!(
            Options::from_lookup(|k| (k == HEADER_VERSION_ENV).then(|| "two".to_string())).is_err()
        );
    }
}
