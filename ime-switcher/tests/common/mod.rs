#![allow(dead_code)]

use imeswitch_core::sim::SimulatedIme;

pub struct Output {
    pub code: u8,
    pub stdout: String,
    pub stderr: String,
}

/// Run the CLI against `ime`. `--settle-ms 0` is appended unless given.
pub fn invoke(args: &[&str], ime: &SimulatedIme) -> Output {
    let mut argv = vec!["ime-switcher"];
    argv.extend_from_slice(args);
    if !args.is_empty() && !args.iter().any(|a| a.starts_with("--settle-ms")) {
        argv.extend_from_slice(&["--settle-ms", "0"]);
    }

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = ime_switcher::run_from_args(argv, ime, &mut stdout, &mut stderr);

    Output {
        code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}
