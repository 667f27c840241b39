use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Falls back to `info` when `level` is not a valid filter directive.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Routes `tracing` output to `path`. The terminal belongs to the UI, so
/// nothing is ever written to stdout or stderr.
pub fn init(level: &str, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn build_filter_accepts_directives() {
        assert_eq!(build_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            build_filter("typesprint=trace").max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn build_filter_falls_back_on_garbage() {
        assert_eq!(
            build_filter("typesprint=loud").max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("typesprint.log");
        // Another test may already own the global subscriber; the file must exist either way.
        let _ = init("info", &path);
        assert!(path.exists());
    }
}
