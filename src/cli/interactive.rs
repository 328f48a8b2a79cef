//! Line oriented conversion session on the terminal.

use crate::core::{ConversionSession, CurrencyCode};
use anyhow::{Context, Result, anyhow, bail};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::debug;

use super::ui;

const HELP: &str = "\
Commands:
  amount <value>   set the amount to convert
  from <CODE>      set the source currency
  to <CODE>        set the target currency
  swap             swap source and target
  convert          convert the current selection
  show             print the current selection
  help             print this help
  quit             leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Amount(String),
    From(CurrencyCode),
    To(CurrencyCode),
    Swap,
    Convert,
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut parts = line.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Ok(None);
    };
    let argument = parts.next();
    if parts.next().is_some() {
        bail!("Too many arguments in {line:?}");
    }

    let code = |arg: Option<&str>| -> Result<CurrencyCode> {
        let arg = arg.ok_or_else(|| anyhow!("Missing currency code for {keyword:?}"))?;
        Ok(arg.parse()?)
    };

    let command = match (keyword.to_ascii_lowercase().as_str(), argument) {
        ("amount", arg) => Command::Amount(arg.unwrap_or_default().to_string()),
        ("from", arg) => Command::From(code(arg)?),
        ("to", arg) => Command::To(code(arg)?),
        ("swap", None) => Command::Swap,
        ("convert", None) => Command::Convert,
        ("show", None) => Command::Show,
        ("help", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        _ => bail!("Unknown command: {line:?} (type 'help')"),
    };
    Ok(Some(command))
}

/// Runs the session until `quit` or end of input. Conversions run in the
/// background so a new selection can be made while one is in flight.
pub async fn run<R>(session: Arc<ConversionSession>, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("{}\n", ui::style_text(HELP, ui::StyleType::Subtle));
    session.show_idle();

    let mut in_flight = JoinSet::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
                continue;
            }
        };
        debug!(?command, "Session command");

        let ticket = match command {
            Command::Amount(amount) => {
                session.set_amount(&amount);
                None
            }
            Command::From(code) => session.set_source(code),
            Command::To(code) => session.set_target(code),
            Command::Swap => session.swap(),
            Command::Convert => session.submit(),
            Command::Show => {
                let selection = session.selection();
                println!(
                    "{} -> {} (amount: {})",
                    selection.source,
                    selection.target,
                    if selection.amount.is_empty() {
                        "-"
                    } else {
                        selection.amount.as_str()
                    }
                );
                None
            }
            Command::Help => {
                println!("{HELP}");
                None
            }
            Command::Quit => break,
        };

        if let Some(ticket) = ticket {
            let session = Arc::clone(&session);
            in_flight.spawn(async move { session.complete(ticket).await });
        }
    }

    while let Some(outcome) = in_flight.join_next().await {
        outcome.context("Conversion task failed")?;
    }
    Ok(())
}
