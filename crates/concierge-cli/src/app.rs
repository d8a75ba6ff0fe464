//! Subcommand implementations

use crate::chat::Chat;
use crate::render;
use anyhow::Context;
use concierge_core::Session;
use concierge_ledger::{JsonFileStore, StatusSummary, TicketLedger, TicketStore};
use concierge_source::{
    load_tree_with_origin, ConciergeConfig, GridSource, JsonFileSource, SheetsSource,
};
use concierge_tree::parse_with_report;
use std::path::Path;

/// Open the ticket ledger under the configured data directory
///
/// An unreadable snapshot is left untouched and tickets of this run are
/// kept in memory only.
pub(crate) fn open_ledger(config: &ConciergeConfig) -> TicketLedger {
    let store = JsonFileStore::in_dir(&config.storage.data_dir);
    let path = store.path().display().to_string();
    match TicketLedger::with_store(Box::new(store)) {
        Ok(ledger) => ledger,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "ticket snapshot unreadable, tickets will not be saved");
            TicketLedger::new()
        }
    }
}

/// Menu source: a local JSON grid if given, otherwise Google Sheets
pub(crate) fn grid_source(
    config: &ConciergeConfig,
    menu: Option<&Path>,
) -> anyhow::Result<Box<dyn GridSource>> {
    let source: Box<dyn GridSource> = match menu {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(
            SheetsSource::new(config.sheets.clone()).context("failed to build sheets client")?,
        ),
    };
    Ok(source)
}

/// `concierge chat`
pub(crate) async fn chat(config: &ConciergeConfig, menu: Option<&Path>) -> anyhow::Result<()> {
    let source = grid_source(config, menu)?;
    let loaded = load_tree_with_origin(source.as_ref()).await;
    if loaded.is_fallback() {
        eprintln!("Menu unavailable, using the built-in menu.");
    }

    let session = Session::new(loaded.tree, open_ledger(config))
        .with_prompts(config.prompts.clone())
        .with_pacing(config.pacing);

    let mut stdout = std::io::stdout();
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let session = Chat::new(session, source.as_ref(), &mut stdout)
        .run(stdin)
        .await?;

    tracing::info!(tickets = session.ledger().len(), "chat ended");
    Ok(())
}

/// `concierge parse <file>`
pub(crate) async fn parse(file: &Path, json: bool) -> anyhow::Result<()> {
    let grid = JsonFileSource::new(file)
        .fetch_grid()
        .await
        .with_context(|| format!("failed to read grid from {}", file.display()))?;
    let report = parse_with_report(&grid);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.tree)?);
        return Ok(());
    }

    print!("{}", report.tree.outline());
    for anomaly in &report.anomalies {
        println!("warning: {anomaly}");
    }
    println!(
        "{} nodes, {} roots, {} orphans, {} anomalies",
        report.tree.len(),
        report.tree.roots().len(),
        report.tree.orphans().count(),
        report.anomalies.len()
    );
    Ok(())
}

/// `concierge tickets`
pub(crate) fn tickets(config: &ConciergeConfig, json: bool) -> anyhow::Result<()> {
    let store = JsonFileStore::in_dir(&config.storage.data_dir);
    let tickets = store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tickets)?);
        return Ok(());
    }

    for ticket in &tickets {
        println!("{}", render::ticket_line(ticket));
    }
    println!("{}", render::status(StatusSummary::of(&tickets)));
    Ok(())
}
