//! `stockwatch` — line-driven inventory client.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use stockwatch_client::commands::{ClientCommand, HELP, parse_line};
use stockwatch_client::display::format_row;
use stockwatch_client::{ClientConfig, ConsoleDisplay, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    stockwatch_observability::tracing::init(config.log_format);
    tracing::info!(config = ?config, "starting stockwatch");

    let mut controller = app::build_controller(&config, ConsoleDisplay::stdout()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Ok(ClientCommand::Intent(intent)) => {
                // The controller has already reported the failure to the user.
                if let Err(err) = controller.dispatch(intent).await {
                    tracing::debug!("operation abandoned: {err}");
                }
            }
            Ok(ClientCommand::List) => {
                for (position, record) in controller.records().iter().enumerate() {
                    println!("{}", format_row(position, record));
                }
            }
            Ok(ClientCommand::Json) => {
                let json = serde_json::to_string_pretty(controller.records())
                    .context("failed to serialize inventory")?;
                println!("{json}");
            }
            Ok(ClientCommand::Show(part_number)) => match controller.lookup(&part_number).await {
                Ok(Some(record)) => match serde_json::to_string(&record) {
                    Ok(json) => println!("{json}"),
                    Err(err) => eprintln!("failed to serialize record: {err}"),
                },
                Ok(None) => println!("no such part: {part_number}"),
                Err(err) => eprintln!("lookup failed: {err}"),
            },
            Ok(ClientCommand::Help) => println!("{HELP}"),
            Ok(ClientCommand::Quit) => break,
            Err(err) => eprintln!("{err}"),
        }
    }

    tracing::info!("stockwatch exiting");
    Ok(())
}
