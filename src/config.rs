use std::path::PathBuf;

use clap::Parser;

use crate::store::DEFAULT_DATA_FILE;

#[derive(Debug, Parser)]
#[command(name = "studydesk", about = "Terminal study desk: calendar notes, to-dos and sketch canvases")]
pub struct Cli {
    /// JSON file holding tasks and schedules
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Where log output goes while the terminal is in use
    #[arg(long, default_value = "studydesk.log")]
    pub log_file: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            data_file: cli.data_file,
            log_file: cli.log_file,
            log_level: cli.log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from(Cli::parse_from(["studydesk"]));
        assert_eq!(config.data_file, PathBuf::from("learning_app_data.json"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn overrides() {
        let config = Config::from(Cli::parse_from([
            "studydesk",
            "--data-file",
            "/tmp/desk.json",
            "--log-level",
            "debug",
        ]));
        assert_eq!(config.data_file, PathBuf::from("/tmp/desk.json"));
        assert_eq!(config.log_level, "debug");
    }
}
