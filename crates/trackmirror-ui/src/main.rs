use anyhow::{Context, Result};

use trackmirror_ui::{AppServices, SyncOrchestrator, UiState};

fn main() -> Result<()> {
    // Initialize core
    trackmirror_core::init()?;

    let (config, _validation) = trackmirror_core::Config::load_validated()?;
    let services = AppServices::new(config)?;
    let mut orchestrator = services.orchestrator();
    let mut state = UiState::new(Vec::<(trackmirror_services::IssueId, String)>::new());

    let full_sync = std::env::args().nth(1).as_deref() == Some("sync");
    tracing::info!(
        "trackmirror started against {}",
        services.tracker_client().base_url()
    );

    let started = if full_sync {
        orchestrator.sync_all(&mut state)
    } else {
        orchestrator.check_status(&mut state)
    };
    if !started {
        anyhow::bail!("Request could not be started");
    }
    print!("{}", state.results);

    wait_for_settle(&services, &mut orchestrator, &mut state)?;
    print!("{}", state.results);

    if state.results.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

/// Apply messages until the started request has settled.
fn wait_for_settle(
    services: &AppServices,
    orchestrator: &mut SyncOrchestrator,
    state: &mut UiState,
) -> Result<()> {
    loop {
        let msg = services
            .block_on(orchestrator.next_message())
            .context("Service channel closed before the request settled")?;
        orchestrator.apply(state, msg);
        if !state.check_status.is_in_flight() && !state.sync_all.is_in_flight() {
            return Ok(());
        }
    }
}
