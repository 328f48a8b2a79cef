pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{ConversionSession, CurrencyCode, RateResolver};
use crate::providers::{ExchangeRateApiProvider, ExchangeRateHostProvider, util::build_client};
use anyhow::Result;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<CurrencyCode>,
        to: Vec<CurrencyCode>,
    },
    Interactive,
    Currencies,
}

/// Wires the configured primary and fallback providers into a resolver.
pub fn build_resolver(config: &AppConfig) -> Result<RateResolver> {
    let client = build_client(config.request_timeout())?;
    let primary = ExchangeRateApiProvider::new(&config.providers.primary.base_url, client.clone());
    let fallback = ExchangeRateHostProvider::new(&config.providers.fallback.base_url, client);
    Ok(RateResolver::new(Arc::new(primary), Arc::new(fallback)))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Convert { amount, from, to } => {
            let resolver = build_resolver(&config)?;
            let from = from.unwrap_or_else(|| config.defaults.from.clone());
            let targets = if to.is_empty() {
                vec![config.defaults.to.clone()]
            } else {
                to
            };
            cli::convert::run(&resolver, &amount, &from, &targets).await?;
            Ok(())
        }
        AppCommand::Interactive => {
            let resolver = Arc::new(build_resolver(&config)?);
            let session = Arc::new(ConversionSession::new(
                resolver,
                Arc::new(cli::ui::TerminalSurface),
                config.defaults.from.clone(),
                config.defaults.to.clone(),
            ));
            cli::interactive::run(session, BufReader::new(tokio::io::stdin())).await
        }
        AppCommand::Currencies => {
            cli::currencies::run();
            Ok(())
        }
    }
}
