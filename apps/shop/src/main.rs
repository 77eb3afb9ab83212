//! # Museum Shop Entry Point
//!
//! The actual setup is in lib.rs so commands can be tested.

use clap::Parser;
use std::process::ExitCode;

use museum_shop::cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    museum_shop::init_tracing(args.verbose);

    match museum_shop::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(code = ?e.code, "Command failed");
            eprintln!("error: {}", e.message);
            ExitCode::FAILURE
        }
    }
}
