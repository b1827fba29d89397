//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use infinistream_core::OperatingMode;
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "infinistream", version, about = "Infinistream shower status widget")]
pub struct Cli {
    /// Path to config TOML (missing file means defaults)
    #[arg(long, value_name = "FILE", default_value = "etc/infinistream.toml")]
    pub config: PathBuf,

    /// Emit JSON lines (renders, logs and errors) instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides [logging] level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Modes an operator may push by hand. CONNECTING is the widget's own
/// start-up state and is never sent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SendMode {
    Shower,
    Flush,
    Drain,
    Sanitize,
}

impl From<SendMode> for OperatingMode {
    fn from(m: SendMode) -> Self {
        match m {
            SendMode::Shower => OperatingMode::Shower,
            SendMode::Flush => OperatingMode::Flush,
            SendMode::Drain => OperatingMode::Drain,
            SendMode::Sanitize => OperatingMode::Sanitize,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the webhook listener and repaint on every update
    Serve {
        /// Listen port (takes precedence over webhook.port)
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,
        /// Listen address (takes precedence over webhook.bind)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
    /// Render one frame for the given mode and turbidity and exit
    Render {
        /// Mode name as the controller would send it (unknown names allowed)
        #[arg(long)]
        mode: String,
        /// Turbidity in NTU
        #[arg(long, default_value_t = 0.0)]
        turbidity: f64,
    },
    /// Post an update to a running widget
    Send {
        #[arg(long, value_enum, ignore_case = true, default_value = "shower")]
        mode: SendMode,
        /// Turbidity in NTU
        #[arg(long, default_value_t = 0.0)]
        turbidity: f64,
        /// Hostname or IP of the widget
        #[arg(long, default_value = "localhost")]
        host: String,
        /// Webhook port (defaults to webhook.port)
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,
    },
    /// Load and validate the config, then print the effective values
    CheckConfig,
}
