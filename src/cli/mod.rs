//! CLI module for ROC Weather
//!
//! Provides command-line interface parsing for the roc-weather-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use crate::api::routes::Service;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ROC Weather - return-of-control weather bridge
///
/// Runs the weather service, the invocation bridge and the agent frontend.
#[derive(Parser, Debug)]
#[command(
    name = "roc-weather-server",
    version,
    about = "ROC Weather - return-of-control weather bridge",
    long_about = "ROC Weather - return-of-control weather bridge\n\n\
                  Serves a pluggable weather provider endpoint, a bridge that answers agent\n\
                  returnControl events with weather reports, and a frontend that drives\n\
                  the agent runtime through the delegation round trip.\n\n\
                  Run without arguments to start all three services.",
    after_help = "EXAMPLES:\n    \
                  roc-weather-server                      # Start weather, bridge and frontend\n    \
                  roc-weather-server serve weather        # Start only the weather service\n    \
                  roc-weather-server --config my.toml     # Use a custom config file\n    \
                  roc-weather-server config --validate    # Check the resolved configuration"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "roc.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start one or all of the HTTP services
    Serve {
        /// Which service to run
        #[arg(value_enum, default_value_t = ServeTarget::All)]
        target: ServeTarget,
    },

    /// Show the resolved configuration
    Config {
        /// Only validate, do not print
        #[arg(long)]
        validate: bool,
    },
}

/// Services selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeTarget {
    All,
    Weather,
    Bridge,
    Frontend,
}

impl ServeTarget {
    /// Services started for this target
    pub fn services(self) -> Vec<Service> {
        match self {
            ServeTarget::All => Service::ALL.to_vec(),
            ServeTarget::Weather => vec![Service::Weather],
            ServeTarget::Bridge => vec![Service::Bridge],
            ServeTarget::Frontend => vec![Service::Frontend],
        }
    }
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Command to run, `serve all` when none was given
    pub fn command(&self) -> Commands {
        match &self.command {
            Some(Commands::Serve { target }) => Commands::Serve { target: *target },
            Some(Commands::Config { validate }) => Commands::Config {
                validate: *validate,
            },
            None => Commands::Serve {
                target: ServeTarget::All,
            },
        }
    }
}
