use std::path::Path;
use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{info, debug};

use crate::config::Config;
use crate::engine::Executor;
use crate::error::{FanJoinResult, FanJoinError};

use super::commands::{self, Args};

/// The main application struct
pub struct App {
    config: Option<Config>,
    executor: Option<Executor>,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        Self {
            config: None,
            executor: None,
        }
    }

    /// Load configuration and build the executor
    pub fn initialize_with_config(&mut self, config_path: Option<&Path>) -> FanJoinResult<()> {
        let config = Config::load(config_path)?;
        debug!("Executor settings: {:?}", config.executor);

        self.executor = Some(Executor::new(config.executor));
        self.config = Some(config);

        Ok(())
    }

    /// Parse the command line and run it
    pub async fn run(&mut self) -> Result<()> {
        let args = Args::parse();
        self.run_with_args(args).await
    }

    pub async fn run_with_args(&mut self, args: Args) -> Result<()> {
        if self.executor.is_none() {
            self.initialize_with_config(args.config.as_deref())?;
        }

        info!("Starting fanjoin v{}", env!("CARGO_PKG_VERSION"));

        match &args.command {
            Some(command) => {
                commands::execute_command(command, self.executor()?, self.config()?, args.json).await?;
            }
            None => {
                Args::command().print_help()?;
            }
        }

        Ok(())
    }

    pub fn config(&self) -> FanJoinResult<&Config> {
        self.config.as_ref().ok_or_else(|| FanJoinError::ConfigError("Application not initialized".to_string()))
    }

    pub fn executor(&self) -> FanJoinResult<&Executor> {
        self.executor.as_ref().ok_or_else(|| FanJoinError::ConfigError("Application not initialized".to_string()))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Keeps ~/.fanjoin/config.toml out of the picture.
    fn args(command: &[&str]) -> Args {
        let mut argv = vec!["fanjoin", "--config", "/nonexistent/fanjoin.toml"];
        argv.extend_from_slice(command);
        Args::parse_from(argv)
    }

    #[test]
    fn test_accessors_require_initialization() {
        let app = App::new();

        assert!(app.executor().is_err());
        assert!(app.config().is_err());
    }

    #[tokio::test]
    async fn test_runs_primes_command() {
        let mut app = App::new();
        let args = args(&["primes", "1,2,3,4,5,6,7"]);

        app.run_with_args(args).await.unwrap();

        assert_eq!(app.executor().unwrap().tasks_launched(), 7);
    }

    #[tokio::test]
    async fn test_runs_sample_matrix() {
        let mut app = App::new();
        let args = args(&["matrix", "--json"]);

        app.run_with_args(args).await.unwrap();

        assert_eq!(app.executor().unwrap().tasks_launched(), 2);
    }

    #[tokio::test]
    async fn test_incompatible_matrix_command_fails() {
        let mut app = App::new();
        let args = args(&["matrix", "--a", "[[1, 2]]", "--b", "[[1, 2]]"]);

        assert!(app.run_with_args(args).await.is_err());
        assert_eq!(app.executor().unwrap().tasks_launched(), 0);
    }

    #[tokio::test]
    async fn test_uses_builtin_defaults() {
        let mut app = App::new();

        app.run_with_args(args(&["primes", "2"])).await.unwrap();

        assert_eq!(app.config().unwrap().executor, crate::config::ExecutorSettings::default());
    }

    #[tokio::test]
    async fn test_tree_file_at_depth_limit() {
        let depth = crate::config::ExecutorSettings::default().max_tree_depth;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", "{\"value\": 1, \"right\": ".repeat(depth - 1)).unwrap();
        write!(file, "{{\"value\": 1}}{}", "}".repeat(depth - 1)).unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let mut app = App::new();

        app.run_with_args(args(&["tree", "--file", &path])).await.unwrap();
        assert_eq!(app.executor().unwrap().tasks_launched(), depth - 1);
    }

    #[tokio::test]
    async fn test_words_counts_file_with_comma_and_space() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my notes,v2.txt");
        std::fs::write(&path, "one two three").unwrap();
        let path = path.to_str().unwrap().to_string();

        let mut app = App::new();

        app.run_with_args(args(&["words", &path])).await.unwrap();
        assert_eq!(app.executor().unwrap().tasks_launched(), 1);
    }
}
