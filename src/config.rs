#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

/// # chatgate Configuration
///
/// Settings for the `chatgate` request checker, read from command-line
/// arguments, environment variables and an optional `.env` file.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "chatgate"))]
#[cfg_attr(feature = "cli", command(about = "Check chat completion requests against the supported subset before they reach an engine"))]
#[cfg_attr(feature = "cli", command(version))]
pub struct Config {
    /// Log level or filter directive (error, warn, info, debug, trace)
    #[cfg_attr(feature = "cli", arg(long, env = "RUST_LOG", default_value = "info", global = true))]
    pub log_level: String,

    /// Output format for results (text, json)
    #[cfg_attr(
        feature = "cli",
        arg(long, env = "CHATGATE_OUTPUT", default_value = "text", global = true)
    )]
    pub output: String,

    #[cfg_attr(feature = "cli", command(subcommand))]
    pub command: Command,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(Subcommand))]
pub enum Command {
    /// Parse and validate a request body read from a file, or stdin with `-`
    Check {
        #[cfg_attr(feature = "cli", arg(default_value = "-"))]
        input: String,
    },
    /// Print the request fields that are rejected as unsupported
    #[default]
    UnsupportedFields,
}

pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
pub const VALID_OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

impl Config {
    /// Parse configuration from command line arguments and environment variables.
    ///
    /// Loads `.env` first, sets up logging, then validates. An invalid
    /// configuration exits the process with status 2.
    #[cfg(feature = "cli")]
    pub fn parse_args() -> Self {
        let _ = dotenv::dotenv();

        let config = Self::parse();
        config.setup_logging();

        if let Err(err) = config.validate() {
            eprintln!("Configuration validation failed: {}", err);
            std::process::exit(2);
        }

        config
    }

    /// Configuration with defaults, for tests.
    pub fn for_test() -> Self {
        Self {
            log_level: "info".to_string(),
            output: "text".to_string(),
            command: Command::UnsupportedFields,
        }
    }

    pub fn json_output(&self) -> bool {
        self.output == "json"
    }

    /// Logs go to stderr so stdout only carries results.
    #[cfg(feature = "cli")]
    fn setup_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_level.as_str())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        // plain levels, or EnvFilter directives such as `chatgate=debug`
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) && !self.log_level.contains('=') {
            return Err(format!(
                "Invalid log level '{}'. Valid options are: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        if !VALID_OUTPUT_FORMATS.contains(&self.output.as_str()) {
            return Err(format!(
                "Invalid output format '{}'. Valid options are: {}",
                self.output,
                VALID_OUTPUT_FORMATS.join(", ")
            ));
        }

        if let Command::Check { input } = &self.command {
            if input.is_empty() {
                return Err("Input path cannot be empty. Use '-' to read from stdin.".to_string());
            }
        }

        Ok(())
    }
}
