mod generate;

use std::ffi::OsString;

use clap::{
    CommandFactory, Parser, Subcommand,
    error::{ContextKind, ContextValue, ErrorKind},
};
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on extraction errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for hostmock_decl::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Invocation problems reported together with the usage line.
#[derive(Debug, thiserror::Error)]
pub(crate) enum UsageError {
    #[error("no declaration file given; pass --sdk <path> or set `sdk` under [generate] in hostmock.toml")]
    MissingSdk,
}

#[derive(Parser)]
#[command(name = "hostmock")]
#[command(version)]
#[command(about = "Generate call-recording mocks and fakes from a .d.ts declaration file")]
pub(crate) struct Cli {
    /// Log at debug level (overrides HOSTMOCK_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// Parse `args`, dropping unrecognized flags with a warning.
    pub fn parse_lenient<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        loop {
            let err = match Self::try_parse_from(&args) {
                Ok(cli) => return Ok(cli),
                Err(err) => err,
            };
            let Some(index) = unknown_flag_index(&err, &args) else {
                return Err(err);
            };
            let flag = args.remove(index).to_string_lossy().into_owned();
            eprintln!("warning: ignoring unrecognized flag '{}'", flag);
            if !flag.contains('=')
                && let Some(value) = args.get(index).and_then(|a| a.to_str())
                && is_stray_value(value)
            {
                let value = args.remove(index);
                eprintln!(
                    "warning: ignoring value '{}' of unrecognized flag '{}'",
                    value.to_string_lossy(),
                    flag
                );
            }
        }
    }

    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Some(Commands::Generate(cmd)) => cmd.run(),
            None => {
                Self::command().print_help()?;
                Ok(())
            }
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a test-support module from a declaration file
    Generate(GenerateCommand),
}

/// Whether the token after an unknown flag is that flag's value rather than
/// another flag or a subcommand.
fn is_stray_value(token: &str) -> bool {
    !token.starts_with('-')
        && !Cli::command()
            .get_subcommands()
            .any(|sub| sub.get_name() == token)
}

/// Position of the flag clap rejected as unknown, if that is why it failed.
fn unknown_flag_index(err: &clap::Error, args: &[OsString]) -> Option<usize> {
    if err.kind() != ErrorKind::UnknownArgument {
        return None;
    }
    let Some(ContextValue::String(flag)) = err.get(ContextKind::InvalidArg) else {
        return None;
    };
    if !flag.starts_with('-') {
        return None;
    }
    let with_value = format!("{}=", flag);
    args.iter()
        .enumerate()
        .skip(1)
        .take_while(|(_, arg)| arg.to_str() != Some("--"))
        .find(|(_, arg)| {
            arg.to_str()
                .is_some_and(|a| a == flag || a.starts_with(&with_value))
        })
        .map(|(i, _)| i)
}
