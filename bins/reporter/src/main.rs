//! GigFlow history reporter
//!
//! Reads the exported proposal history named in the configuration and
//! prints it most recent first, followed by the totals of a blank estimate.

use std::path::Path;

use anyhow::Context;
use chrono::Local;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gigflow_core::Session;
use gigflow_core::proposal::ProposalStore;
use gigflow_shared::AppConfig;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gigflow=info,gigflow_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let store = load_history(Path::new(&config.history.path))?;
    let session = Session::with_store(config, store);

    print_history(&session);
    print_blank_estimate(&session);

    Ok(())
}

/// A missing or unreadable history is not fatal: start with an empty one.
fn load_history(path: &Path) -> anyhow::Result<ProposalStore> {
    let mut store = ProposalStore::new();
    if !path.exists() {
        info!(path = %path.display(), "No history file, starting empty");
        return Ok(store);
    }

    let document = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;

    match store.import(&document) {
        Ok(count) => info!(path = %path.display(), count, "History loaded"),
        Err(e) => warn!(path = %path.display(), error = %e, "Ignoring unreadable history"),
    }
    Ok(store)
}

fn print_history(session: &Session) {
    let rows = session.history();
    if rows.is_empty() {
        println!("Nenhuma proposta salva.");
        return;
    }

    println!(
        "{:<16}  {:<18}  {:<24}  {:<10}  {:<16}  {:<8}  {:>16}  {:>6}  {:>16}  {:<10}",
        "Criado em", "No Proposta", "Evento", "Data", "Cidade", "Status", "Custo Total", "Margem", "Cache", "Validade"
    );
    for row in rows {
        println!(
            "{:<16}  {:<18}  {:<24}  {:<10}  {:<16}  {:<8}  {:>16}  {:>6}  {:>16}  {:<10}",
            row.created_at,
            row.proposal_number,
            row.event,
            row.event_date,
            row.city,
            row.status,
            row.cost_total,
            row.margin,
            row.proposed_fee,
            row.valid_until
        );
    }
}

fn print_blank_estimate(session: &Session) {
    let quote = session.quote_document(Local::now().date_naive());
    println!();
    println!("Nova proposta {} ({})", quote.proposal_number, quote.status);
    println!("  Validade: {}", quote.validity);
    println!("  Custo Total: {}", quote.cost_total);
    println!("  {}: {}", quote.margin_label, quote.margin_amount);
    println!("  Cache Proposto: {}", quote.proposed_fee);
}
