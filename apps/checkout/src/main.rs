//! # Rental Checkout CLI
//!
//! ```text
//! checkout summary
//! checkout order --change hewitt=+1 --change harper=-2 --submit
//! ```
//!
//! Prints the resulting checkout view as JSON on stdout. Errors are printed
//! as `ApiError` JSON on stderr.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use rental_checkout::cli::Cli;
use rental_checkout::config::CheckoutConfig;
use rental_checkout::error::ApiError;
use rental_checkout::session::CheckoutView;
use rental_checkout::{connect_store, init_tracing, load_catalog, open_session, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    info!("Starting rental checkout");

    match execute(cli).await {
        Ok(view) => {
            let submitted_ok = view
                .last_submission
                .as_ref()
                .map_or(true, |outcome| outcome.is_submitted());
            match serde_json::to_string_pretty(&view) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    error!("Could not render view: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            if submitted_ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!(code = ?err.code, "{}", err.message);
            match serde_json::to_string(&err) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{err}"),
            }
            ExitCode::from(2)
        }
    }
}

async fn execute(cli: Cli) -> Result<CheckoutView, ApiError> {
    let config = CheckoutConfig::load()?;
    info!(
        store = ?config.store,
        months = config.terms.rental_period_months(),
        delivery_fee = %config.terms.delivery_fee(),
        "Configuration loaded"
    );

    let catalog = load_catalog(&config)?;
    let store = connect_store(&config).await?;
    let mut session = open_session(&config, catalog, store)?;

    run(cli.command, &mut session).await
}
