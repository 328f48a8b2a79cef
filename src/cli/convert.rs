use super::ui;
use crate::core::format::{IN_FLIGHT_MESSAGE, INVALID_AMOUNT_MESSAGE};
use crate::core::{
    ConversionRequest, CurrencyCode, DisplayMessage, RateQuoteResult, RateResolver, format,
};
use anyhow::{Context, Result};
use futures::future::join_all;
use tracing::warn;

/// Converts `amount` from `from` into each of `targets`.
///
/// Every target is an independent request; they are resolved concurrently.
/// The amount is validated once before anything is sent. Unresolved rates are
/// reported with the generic message and do not fail the command.
pub async fn run(
    resolver: &RateResolver,
    amount: &str,
    from: &CurrencyCode,
    targets: &[CurrencyCode],
) -> Result<Vec<DisplayMessage>> {
    let requests = targets
        .iter()
        .map(|to| ConversionRequest::parse(from.as_str(), to.as_str(), amount))
        .collect::<Result<Vec<_>, _>>();
    let requests = match requests {
        Ok(requests) => requests,
        Err(e) => {
            println!(
                "{}",
                ui::style_text(INVALID_AMOUNT_MESSAGE, ui::StyleType::Error)
            );
            return Err(e).context("Invalid conversion input");
        }
    };

    let pb = ui::new_progress_bar(requests.len() as u64, true);
    pb.set_message(IN_FLIGHT_MESSAGE);

    let futures = requests.iter().map(|request| {
        let pb_clone = pb.clone();
        async move {
            let result = resolver.resolve(request).await;
            pb_clone.inc(1);
            result
        }
    });
    let results = join_all(futures).await;
    pb.finish_and_clear();

    let messages = requests
        .iter()
        .zip(&results)
        .map(|(request, result)| {
            if let RateQuoteResult::Unresolved { reason } = result {
                warn!(
                    from = %request.source(),
                    to = %request.target(),
                    %reason,
                    "Exchange rate could not be resolved"
                );
            }
            let message = format(request, result);
            println!("{}", ui::style_message(&message));
            message
        })
        .collect();

    Ok(messages)
}
