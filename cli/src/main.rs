use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use clap::Parser;
use vin_cli::args::Cli;
use vin_cli::{logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        run(&cli, &mut io::stdout().lock(), &mut io::stderr().lock())
    }));

    match result {
        Ok(Ok(status)) => ExitCode::from(status.code()),
        Ok(Err(e)) => {
            eprintln!("Unexpected error: {e:#}");
            ExitCode::FAILURE
        }
        Err(_) => {
            eprintln!("Unexpected error: the decoder stopped abnormally");
            ExitCode::FAILURE
        }
    }
}
