use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

use crate::config::{LoggingSettings, default_log_path};

/// Where log output goes. The terminal belongs to the UI, so logs only ever
/// go to a file.
fn log_path(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.file.clone().or_else(default_log_path)
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger. `RUST_LOG` overrides the configured level.
///
/// Logging stays off when no log file can be opened.
pub fn init(settings: &LoggingSettings) {
    let Some(path) = log_path(settings) else {
        return;
    };
    let file = match open_log_file(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("floatplay: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let env = Env::default().default_filter_or(settings.level.as_str());
    let result = Builder::from_env(env)
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    if let Err(e) = result {
        eprintln!("floatplay: logger already installed: {e}");
    }
}
