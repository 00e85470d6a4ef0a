use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{UnwrapOrExit, UsageError};
use crate::{
    config::{Config, GenerateSettings},
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Declaration file describing the host API
    #[arg(long)]
    pub sdk: Option<PathBuf>,

    /// Output module path [default: ./test-support/hostmock_generated.rs]
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Namespace whose functions are mocked [default: mod]
    #[arg(long)]
    pub namespace: Option<String>,

    /// Path to hostmock.toml (defaults to ./hostmock.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rust path of the runtime crate used by the generated module
    #[arg(long)]
    pub runtime_crate: Option<String>,

    /// Print the module to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let settings = self.settings()?;
        let Some(sdk) = settings.sdk else {
            return Err(UsageError::MissingSdk.into());
        };

        let model = hostmock_decl::extract_file(&sdk, &settings.namespace).unwrap_or_exit();
        let report = ops::generate(
            &model,
            GenerateOptions {
                sdk: &sdk,
                out: &settings.out,
                runtime_crate: &settings.runtime_crate,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    /// Flags over config over built-in defaults.
    fn settings(&self) -> Result<GenerateSettings> {
        let config = match &self.config {
            Some(path) => Config::open(path)?,
            None => Config::discover()?,
        };
        let mut settings = config.settings();
        if let Some(sdk) = &self.sdk {
            settings.sdk = Some(sdk.clone());
        }
        if let Some(out) = &self.out {
            settings.out = out.clone();
        }
        if let Some(namespace) = &self.namespace {
            settings.namespace = namespace.clone();
        }
        if let Some(runtime_crate) = &self.runtime_crate {
            settings.runtime_crate = runtime_crate.clone();
        }
        tracing::debug!(?settings, "resolved generate settings");
        Ok(settings)
    }
}
