//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "study-tool")]
#[command(about = "A study-productivity service with a pomodoro timer, task list and flash cards")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "3005")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// JSON file the task list and flash cards are stored in
    #[arg(short, long, default_value = "study-tool.json")]
    pub data_file: PathBuf,

    /// Keep all data in memory instead of the data file
    #[arg(long)]
    pub in_memory: bool,

    /// Initial pomodoro duration in minutes
    #[arg(short = 'm', long, default_value = "25")]
    pub pomodoro_minutes: u64,

    /// Number of recent notifications kept for /notifications
    #[arg(long, default_value = "50")]
    pub notification_history: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_service() {
        let config = Config::try_parse_from(["study-tool"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:3005");
        assert_eq!(config.pomodoro_minutes, 25);
        assert_eq!(config.data_file, PathBuf::from("study-tool.json"));
        assert!(!config.in_memory);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "study-tool", "-p", "8080", "-m", "50", "--in-memory", "--verbose",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.pomodoro_minutes, 50);
        assert!(config.in_memory);
        assert_eq!(config.log_level(), "debug");
    }
}
