//! Runs the terminal interface over the session's library

use crate::commands::Session;
use anyhow::{Context, Result};
use shelfwise_tui::{App, TuiApp};

/// Opens the TUI and blocks until the user quits
///
/// The draw loop polls the terminal synchronously, so it runs on a blocking
/// thread while catalog requests run on the runtime's workers.
pub async fn run(session: Session) -> Result<()> {
    let app = App::new(session.store.clone(), &session.config)
        .context("Failed to start the terminal interface")?;

    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut tui = TuiApp::new(app).context("Failed to set up the terminal")?;
        tui.run().context("Terminal interface failed")
    })
    .await
    .context("Terminal interface thread panicked")??;

    log::info!("Closed with {} books in the library", session.store.len());
    Ok(())
}
