//! Process logging for the lab tracker.
//!
//! # Responsibility
//! - Start the rolling file logger once per process.
//! - Mirror `info`+ records to stderr in a compact form when a server runs
//!   in a terminal ([`Console::Echo`]).
//! - Keep request events parseable: every record is one line of
//!   `event=<name> module=<module> status=<start|ok|error> key=value...`, and
//!   client-controlled values pass through [`log_field`] first.
//!
//! # Invariants
//! - A second init with the same level and directory is a no-op; any other
//!   combination is rejected with [`LoggingError::Conflict`].
//! - Initialization never panics.

use flexi_logger::{
    Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, LogSpecification, Logger,
    LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter, Record};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const FILE_BASENAME: &str = "labtrack";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_FILES: usize = 5;
const MAX_FIELD_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Whether records are mirrored to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    /// File only; used by one-shot commands whose stdout is the output.
    Quiet,
    /// File plus compact `LEVEL message` lines on stderr for `serve`.
    Echo,
}

/// Logger setup failures.
#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    RelativeDir(PathBuf),
    CreateDir { dir: PathBuf, source: std::io::Error },
    Backend(String),
    /// Logger already runs with a different level or directory.
    Conflict { active: String, requested: String },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute, got `{}`", dir.display())
            }
            Self::CreateDir { dir, source } => write!(
                f,
                "cannot create log directory `{}`: {source}",
                dir.display()
            ),
            Self::Backend(message) => write!(f, "logger backend failed to start: {message}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already runs as {active}; refusing to switch to {requested}"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Starts file logging under `log_dir` at `level`.
///
/// # Errors
/// - `UnsupportedLevel` for anything but trace/debug/info/warn(ing)/error.
/// - `RelativeDir` when `log_dir` is not absolute.
/// - `Conflict` when a logger with another level or directory is running.
pub fn init_logging(level: &str, log_dir: &Path, console: Console) -> Result<(), LoggingError> {
    let level = parse_level(level)?;
    if !log_dir.is_absolute() {
        return Err(LoggingError::RelativeDir(log_dir.to_path_buf()));
    }

    let active = ACTIVE.get_or_try_init(|| start(level, log_dir, console))?;
    if active.level != level || active.dir != log_dir {
        return Err(LoggingError::Conflict {
            active: describe(active.level, &active.dir),
            requested: describe(level, log_dir),
        });
    }
    Ok(())
}

/// Directory of the running file logger, if any.
pub fn active_log_dir() -> Option<&'static Path> {
    ACTIVE.get().map(|active| active.dir.as_path())
}

/// Default level: `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Makes a client-supplied value safe for a `key=value` event field.
///
/// Whitespace and control characters become `_`; long values are cut at
/// 160 characters with a trailing `...`.
pub fn log_field(value: &str) -> String {
    let mut out: String = value
        .chars()
        .take(MAX_FIELD_CHARS)
        .map(|ch| {
            if ch.is_whitespace() || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();
    if value.chars().nth(MAX_FIELD_CHARS).is_some() {
        out.push_str("...");
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}

fn start(level: LevelFilter, dir: &Path, console: Console) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let duplicate = match console {
        Console::Quiet => Duplicate::None,
        Console::Echo => Duplicate::Info,
    };
    let handle = Logger::with(LogSpecification::builder().default(level).build())
        .log_to_file(FileSpec::default().directory(dir).basename(FILE_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .duplicate_to_stderr(duplicate)
        .format_for_stderr(console_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook();
    info!(
        "event=logging_init module=logging status=ok level={} dir={} console={:?} version={}",
        level,
        log_field(&dir.display().to_string()),
        console,
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

fn describe(level: LevelFilter, dir: &Path) -> String {
    format!("level={level} dir=`{}`", dir.display())
}

// Terminal lines skip timestamps and source locations; the file has both.
fn console_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(w, "{:<5} {}", record.level(), record.args())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic module=logging status=error location={} payload={}",
            location,
            log_field(&payload)
        );
        previous(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::{active_log_dir, init_logging, log_field, parse_level, Console, LoggingError};
    use log::LevelFilter;
    use std::path::Path;

    #[test]
    fn parse_level_accepts_aliases_and_case() {
        assert_eq!(parse_level(" INFO ").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level("warning").unwrap(), LevelFilter::Warn);
        assert!(matches!(
            parse_level("verbose"),
            Err(LoggingError::UnsupportedLevel(level)) if level == "verbose"
        ));
    }

    #[test]
    fn log_field_keeps_request_lines_on_one_line() {
        assert_eq!(log_field("/scientists/abc"), "/scientists/abc");
        assert_eq!(
            log_field("/x status=ok\nevent=forged"),
            "/x_status=ok_event=forged"
        );
        assert_eq!(log_field(""), "-");

        let long = "a".repeat(200);
        let field = log_field(&long);
        assert!(field.ends_with("..."));
        assert_eq!(field.len(), 163);
    }

    #[test]
    fn init_rejects_relative_dir() {
        let err = init_logging("info", Path::new("log"), Console::Quiet)
            .expect_err("relative dir must be rejected");
        assert!(matches!(err, LoggingError::RelativeDir(_)));
    }

    #[test]
    fn init_is_idempotent_and_rejects_switching() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let other = tempfile::tempdir().expect("tempdir should be created");

        init_logging("info", dir.path(), Console::Quiet).expect("first init should succeed");
        init_logging("INFO", dir.path(), Console::Echo).expect("same config is a no-op");

        let err = init_logging("debug", dir.path(), Console::Quiet)
            .expect_err("level switch must be rejected");
        assert!(matches!(err, LoggingError::Conflict { .. }));
        let err = init_logging("info", other.path(), Console::Quiet)
            .expect_err("directory switch must be rejected");
        assert!(err.to_string().contains("refusing to switch"));

        assert_eq!(active_log_dir(), Some(dir.path()));
    }
}
