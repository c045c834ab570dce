//! Nrdscan binary entry point.
//!
//! All orchestration lives in [`nrdscan::app::App`]; this entry point only
//! parses the command line, invokes the workflow and maps the outcome to a
//! process exit code.

use std::process;

use nrdscan::app::App;
use nrdscan::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::from_args();

    match App::run(&cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            if cli.error_enabled() {
                eprintln!("Error: {e}");
            }
            process::exit(1);
        }
    }
}
