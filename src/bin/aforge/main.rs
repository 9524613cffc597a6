use std::process::ExitCode;

mod cli;
mod commands;
mod display;
mod logging;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();
    let quiet = cli.global.quiet;
    let _log_guard = logging::init(quiet);
    let ctx = display::Context::detect().with_quiet(quiet);

    if ctx.interactive {
        display::print_banner();
    }

    match commands::dispatch(cli, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
