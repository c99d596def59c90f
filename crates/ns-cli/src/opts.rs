//! Global CLI options and home directory handling.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use ns_app::{AppConfig, FileApp};

/// Global options for CLI commands.
#[derive(Args, Debug, Clone)]
pub struct HomeOpts {
    /// State directory (env: NS_HOME)
    #[arg(long, global = true, env = "NS_HOME", default_value = ".ns")]
    pub home: PathBuf,

    /// JSON output envelope
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output (implies --json)
    #[arg(long, global = true)]
    pub pretty: bool,
}

impl HomeOpts {
    /// Open the home directory with configuration taken from the environment.
    pub fn open_app(&self) -> Result<FileApp> {
        let config = AppConfig::from_env().context("load configuration")?;
        FileApp::open(&self.home, config)
            .with_context(|| format!("open home {}", self.home.display()))
    }

    /// Like [`HomeOpts::open_app`] but refuses a home that was never initialized.
    pub fn open_initialized(&self) -> Result<FileApp> {
        let app = self.open_app()?;
        if !app.is_initialized()? {
            bail!(
                "home {} is not initialized (run `ns init --genesis <file>`)",
                self.home.display()
            );
        }
        Ok(app)
    }
}
