use std::io::{self, Write};
use std::process::ExitCode;

use log::LevelFilter;

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let cli = match ime_switcher::parse_args(std::env::args_os(), &mut stdout, &mut stderr) {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };
    init_logging(cli.verbose);

    #[cfg(target_os = "windows")]
    {
        let platform = imeswitch_windows::Win32Platform::new();
        let code = ime_switcher::run(&cli, &platform, &mut stdout, &mut stderr);
        let _ = stdout.flush();
        ExitCode::from(code)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = cli;
        log::error!("ime-switcher only supports Windows.");
        ExitCode::from(1)
    }
}
