use anyhow::Result;
use crowdfund_console::data::json_store::JsonStore;
use crowdfund_console::data::user_repository::InMemoryUserRepository;
use crowdfund_console::infrastructure::config::{AppConfig, DEFAULT_LOG_FILTER};
use crowdfund_console::infrastructure::logging::init_logging;
use crowdfund_console::presentation::shell::{AppState, Shell};
use std::io;
use std::sync::Arc;
use tracing::{info, instrument};

#[instrument]
fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(DEFAULT_LOG_FILTER);
    info!(data_file = %config.data_file.display(), "Configuration loaded");

    let store = JsonStore::new(config.data_file.clone());
    let outcome = store.load()?;

    info!(users = outcome.users().len(), "Creating in-memory user repository");
    let repository = Arc::new(InMemoryUserRepository::with_users(outcome.users().to_vec()));
    let state = AppState::new(repository, store);

    let mut shell = Shell::new(state, io::stdin().lock(), io::stdout().lock());
    shell.report_load(&outcome)?;
    shell.run()?;

    info!("Session ended");
    Ok(())
}
