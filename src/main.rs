use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use pokit::config::Config;
use pokit::environment::Environment;
use pokit::features::{RootReducer, RootState};
use pokit::logging::init_tracing;
use pokit::runtime::Store;
use pokit::shutdown::ShutdownCoordinator;

mod scenario;

use scenario::{summarize, Scenario};

/// Drive the Pokit feature tree against in-memory collaborators.
#[derive(Debug, Parser)]
#[command(name = "pokit", version, about)]
struct Cli {
    /// Config file (default: the platform config dir's pokit/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tracing filter; overrides RUST_LOG and the config file
    #[arg(long)]
    log: Option<String>,

    /// Scripted flow to run
    #[arg(long, value_enum, default_value_t = Scenario::Launch)]
    scenario: Scenario,

    /// Start with a session the auto login accepts
    #[arg(long)]
    signed_in: bool,

    /// Keep the store running after the scenario until Ctrl-C
    #[arg(long)]
    keep_running: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    init_tracing(cli.log.as_deref(), &config.logging.filter);
    tracing::info!(scenario = ?cli.scenario, signed_in = cli.signed_in, "starting");

    let coordinator = ShutdownCoordinator::new();
    let ctrl_c = {
        let handle = coordinator.handle();
        tokio::spawn(async move {
            if let Err(error) = tokio::signal::ctrl_c().await {
                tracing::warn!(%error, "cannot listen for Ctrl-C");
                return;
            }
            handle.signal();
        })
    };

    let mut store = Store::new(
        RootState::default(),
        RootReducer::new(&config.timing),
        Environment::preview(cli.signed_in),
    );
    let shutdown = coordinator.handle();

    for (name, step) in cli.scenario.steps() {
        if coordinator.is_shutting_down() {
            break;
        }
        let Some(action) = step(store.state()) else {
            tracing::warn!(step = name, "screen for step is not showing; stopping");
            break;
        };
        store.send(action);
        tokio::select! {
            _ = store.settle() => {}
            _ = shutdown.wait() => break,
        }
        tracing::info!(step = name, state = %summarize(store.state()), "settled");
    }

    let state = if cli.keep_running && !coordinator.is_shutting_down() {
        tracing::info!("scenario finished; press Ctrl-C to exit");
        store.run(shutdown).await
    } else {
        store.state().clone()
    };

    ctrl_c.abort();
    println!("{}", summarize(&state));
    Ok(())
}
