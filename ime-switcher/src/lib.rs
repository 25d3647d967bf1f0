//! Command-line surface of `ime-switcher`.
//!
//! ```text
//! ime-switcher set zh|en [--key=shift|ctrl|auto]   prints "ok"
//! ime-switcher query                               prints "zh" or "en"
//! ```
//! Exit code 0 on success, 1 on any failure.

use std::ffi::OsString;
use std::io::Write;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use imeswitch_core::{
    CompartmentStore, ConversionMode, KeyInjector, Switcher, Timing, ToggleKeyMode, WindowSystem,
};
use log::debug;

#[derive(Parser, Debug)]
#[command(
    name = "ime-switcher",
    author,
    version,
    about = "Switch the Microsoft Pinyin IME between Chinese and English mode",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Upper bound for each message to the input-method window
    #[arg(long, global = true, value_name = "MS", default_value_t = Timing::DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Wait after an injected Shift before checking whether it worked
    #[arg(long, global = true, value_name = "MS", default_value_t = Timing::DEFAULT_SETTLE_MS)]
    pub settle_ms: u64,

    /// Log every strategy attempt to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Switch the focused window to Chinese (zh) or English (en) mode
    Set {
        /// Target mode: zh or en
        #[arg(value_name = "LANG", value_parser = str::parse::<ConversionMode>)]
        mode: ConversionMode,

        /// Toggle key the IME is configured with: shift, ctrl, or auto
        /// (Shift, then Ctrl if Shift had no effect)
        #[arg(long, value_name = "KEY", default_value = "auto", value_parser = str::parse::<ToggleKeyMode>)]
        key: ToggleKeyMode,
    },
    /// Print the current mode of the focused window: zh or en
    Query,
}

impl Cli {
    pub fn timing(&self) -> Timing {
        Timing::from_millis(self.timeout_ms, self.settle_ms)
    }
}

/// Parse arguments. Help and version go to `out` with exit code 0; every
/// other parse error (unknown language, unknown subcommand, none at all)
/// goes to `err` with exit code 1.
pub fn parse_args<I, T>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(out, "{}", e.render());
            0
        }
        _ => {
            let _ = write!(err, "{}", e.render());
            1
        }
    })
}

fn execute<P>(cli: &Cli, platform: &P, out: &mut dyn Write) -> Result<()>
where
    P: WindowSystem + KeyInjector + CompartmentStore + ?Sized,
{
    let switcher = Switcher::new(platform, cli.timing());
    match cli.command {
        Command::Set { mode, key } => {
            let applied = switcher.set(mode, key)?;
            debug!("applied by {}", applied);
            writeln!(out, "ok")?;
        }
        Command::Query => {
            writeln!(out, "{}", switcher.query())?;
        }
    }
    Ok(())
}

/// Run a parsed command and return the process exit code
pub fn run<P>(cli: &Cli, platform: &P, out: &mut dyn Write, err: &mut dyn Write) -> u8
where
    P: WindowSystem + KeyInjector + CompartmentStore + ?Sized,
{
    match execute(cli, platform, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Failed: {}", e);
            1
        }
    }
}

/// [`parse_args`] followed by [`run`]
pub fn run_from_args<I, T, P>(args: I, platform: &P, out: &mut dyn Write, err: &mut dyn Write) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    P: WindowSystem + KeyInjector + CompartmentStore + ?Sized,
{
    match parse_args(args, out, err) {
        Ok(cli) => run(&cli, platform, out, err),
        Err(code) => code,
    }
}
