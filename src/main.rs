mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::init();

    let err_exit = ExitCode::from(1);
    let ok_exit = ExitCode::from(0);

    match cli::cli() {
        cli::CliRes::Ok => ok_exit,
        cli::CliRes::Err => err_exit,
    }
}
