//! `darb` - shop the Darb perfume store from the terminal.

use std::process::ExitCode;

use clap::Parser;

use darb_storefront::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    darb_storefront::init_tracing();

    match darb_storefront::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.message);
            ExitCode::FAILURE
        }
    }
}
