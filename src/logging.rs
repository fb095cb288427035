use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

use crate::flags::DebugFlags;

/// Verbosity levels accepted on the command line and in `FMODEX_LOG`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Nothing = 0,
    User = 1,
    Error = 2,
    Warning = 3,
    Info = 4,
    Debug = 5,
    All = 6,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl LogLevel {
    /// Out-of-range values fall back to `Info`.
    pub fn from_i32(level: i32) -> Self {
        match level {
            0 => LogLevel::Nothing,
            1 => LogLevel::User,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            6 => LogLevel::All,
            _ => LogLevel::Info,
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Accepts a number, a `log` level name, or one of the native names.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return Some(LogLevel::from_i32(n));
        }
        if let Ok(filter) = LevelFilter::from_str(s) {
            return Some(LogLevel::from_level_filter(filter));
        }
        match s.to_lowercase().as_str() {
            "nothing" | "none" => Some(LogLevel::Nothing),
            "user" => Some(LogLevel::User),
            "warning" => Some(LogLevel::Warning),
            "all" => Some(LogLevel::All),
            _ => None,
        }
    }

    pub fn from_level_filter(filter: LevelFilter) -> Self {
        match filter {
            LevelFilter::Off => LogLevel::Nothing,
            LevelFilter::Error => LogLevel::Error,
            LevelFilter::Warn => LogLevel::Warning,
            LevelFilter::Info => LogLevel::Info,
            LevelFilter::Debug => LogLevel::Debug,
            LevelFilter::Trace => LogLevel::All,
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Nothing => LevelFilter::Off,
            LogLevel::User | LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::All => LevelFilter::Trace,
        }
    }
}

/// Native debug flags matching a log level.
pub fn debug_flags(level: LogLevel) -> DebugFlags {
    match level {
        LogLevel::Nothing => DebugFlags::LEVEL_NONE,
        LogLevel::User | LogLevel::Error => DebugFlags::LEVEL_ERROR,
        LogLevel::Warning | LogLevel::Info => DebugFlags::LEVEL_WARNING,
        LogLevel::Debug => DebugFlags::LEVEL_LOG,
        LogLevel::All => DebugFlags::LEVEL_LOG | DebugFlags::TYPE_FILE | DebugFlags::TYPE_CODEC,
    }
}

fn builder(level: LogLevel, file: Option<File>) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(level.to_level_filter())
        .format(|buf, record| writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args()));
    if let Some(file) = file {
        builder.target(Target::Pipe(Box::new(file))).write_style(WriteStyle::Never);
    }
    builder
}

/// Install the process logger. Lines go to `path` when given, else stderr.
pub fn init(level: LogLevel, path: Option<&Path>) -> Result<()> {
    let file = match path {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?,
        ),
        None => None,
    };
    builder(level, file)
        .try_init()
        .context("Logger already installed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Log, Record};
    use rstest::rstest;

    #[test]
    fn test_log_level_from_i32() {
        assert_eq!(LogLevel::from_i32(0), LogLevel::Nothing);
        assert_eq!(LogLevel::from_i32(1), LogLevel::User);
        assert_eq!(LogLevel::from_i32(2), LogLevel::Error);
        assert_eq!(LogLevel::from_i32(3), LogLevel::Warning);
        assert_eq!(LogLevel::from_i32(4), LogLevel::Info);
        assert_eq!(LogLevel::from_i32(5), LogLevel::Debug);
        assert_eq!(LogLevel::from_i32(6), LogLevel::All);
    }

    #[test]
    fn test_log_level_as_i32() {
        assert_eq!(LogLevel::Nothing.as_i32(), 0);
        assert_eq!(LogLevel::Warning.as_i32(), 3);
        assert_eq!(LogLevel::All.as_i32(), 6);
    }

    #[test]
    fn test_log_level_invalid() {
        assert_eq!(LogLevel::from_i32(100), LogLevel::Info);
        assert_eq!(LogLevel::from_i32(-1), LogLevel::Info);
    }

    #[rstest]
    #[case("debug", Some(LogLevel::Debug))]
    #[case("WARN", Some(LogLevel::Warning))]
    #[case("5", Some(LogLevel::Debug))]
    #[case(" trace ", Some(LogLevel::All))]
    #[case("off", Some(LogLevel::Nothing))]
    #[case("Warning", Some(LogLevel::Warning))]
    #[case("user", Some(LogLevel::User))]
    #[case("loud", None)]
    fn test_log_level_parse(#[case] input: &str, #[case] expected: Option<LogLevel>) {
        assert_eq!(LogLevel::parse(input), expected);
    }

    #[rstest]
    #[case(LogLevel::Nothing, LevelFilter::Off)]
    #[case(LogLevel::User, LevelFilter::Error)]
    #[case(LogLevel::Warning, LevelFilter::Warn)]
    #[case(LogLevel::Info, LevelFilter::Info)]
    #[case(LogLevel::All, LevelFilter::Trace)]
    fn test_level_filter(#[case] level: LogLevel, #[case] expected: LevelFilter) {
        assert_eq!(level.to_level_filter(), expected);
    }

    #[test]
    fn test_debug_flags() {
        assert_eq!(debug_flags(LogLevel::Nothing), DebugFlags::LEVEL_NONE);
        assert_eq!(debug_flags(LogLevel::Error), DebugFlags::LEVEL_ERROR);
        assert!(debug_flags(LogLevel::All).contains(DebugFlags::LEVEL_LOG));
    }

    #[test]
    fn test_parse_round_trips_level_filters() {
        for filter in LevelFilter::iter() {
            let level = LogLevel::parse(&filter.to_string()).unwrap();
            assert_eq!(level.to_level_filter(), filter);
        }
    }

    #[test]
    fn test_builder_uses_level_filter() {
        assert_eq!(builder(LogLevel::Debug, None).build().filter(), LevelFilter::Debug);
        assert_eq!(builder(LogLevel::Nothing, None).build().filter(), LevelFilter::Off);
    }

    #[test]
    fn test_logger_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fmodex.log");
        let logger = builder(LogLevel::Info, Some(File::create(&path).unwrap())).build();
        logger.log(
            &Record::builder()
                .level(log::Level::Warn)
                .target("fmod")
                .args(format_args!("channel stolen"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(log::Level::Debug)
                .target("fmod")
                .args(format_args!("filtered"))
                .build(),
        );
        logger.flush();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "[WARN fmod] channel stolen\n");
    }
}
