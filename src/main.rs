use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tokio::time::sleep_until;
use tracing::{info, warn};

use duckboard::app::action::Action;
use duckboard::app::effect::Effect;
use duckboard::app::effect_runner::EffectRunner;
use duckboard::app::ports::HistoryStore;
use duckboard::app::reducer::reduce;
use duckboard::app::render_schedule::next_animation_deadline;
use duckboard::app::state::AppState;
use duckboard::error;
use duckboard::infra::adapters::{DuckDbCliAdapter, JsonHistoryStore};
use duckboard::infra::config::load_config;
use duckboard::infra::config::paths::get_cache_dir;
use duckboard::infra::logging::init_logging;
use duckboard::ui::adapters::TuiRenderer;
use duckboard::ui::event::handler::handle_event;
use duckboard::ui::tui::TuiRunner;

/// Terminal dashboard for local DuckDB files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// DuckDB files to open at startup
    databases: Vec<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    error::install_hooks()?;

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let _log_guard = init_logging(&get_cache_dir()?.join("logs"))?;
    info!(
        debounce_ms = config.debounce_ms,
        max_concurrent_queries = config.query_slots(),
        "starting duckboard"
    );

    let (action_tx, mut action_rx) = mpsc::channel::<Action>(256);

    let adapter = Arc::new(DuckDbCliAdapter::from_config(&config));
    let history_store = Arc::new(JsonHistoryStore::new()?);

    let mut state = AppState::new(&config);
    match history_store.load() {
        Ok(entries) => state.restore_history(entries),
        Err(e) => warn!(error = %e, "query history unreadable, starting empty"),
    }

    let mut effect_runner = EffectRunner::new(
        Arc::clone(&adapter) as _,
        adapter as _,
        history_store as _,
        config.query_slots(),
        action_tx.clone(),
    );

    let mut tui = TuiRunner::new()?;
    tui.enter()?;

    let initial_size = tui.terminal().size()?;
    state.ui.terminal_height = initial_size.height;

    for path in &args.databases {
        let _ = action_tx
            .send(Action::OpenDatabase(path.to_string_lossy().into_owned()))
            .await;
    }

    loop {
        let now = Instant::now();
        let animation_deadline = next_animation_deadline(&state, now);
        let query_deadline = state.orchestrator.next_deadline();

        tokio::select! {
            Some(event) = tui.next_event() => {
                let action = handle_event(event, &state);
                if !action.is_none() {
                    let _ = action_tx.send(action).await;
                }
            }
            Some(action) = action_rx.recv() => {
                let now = Instant::now();
                let mut effects = reduce(&mut state, action, now);

                if state.render_dirty {
                    state.clear_expired_timers(now);
                    effects.push(Effect::Render);
                }

                let mut renderer = TuiRenderer::new(&mut tui);
                effect_runner.run(effects, &mut renderer, &state).await?;
                state.clear_dirty();
            }
            // Debounce window of at least one panel closed
            _ = async {
                match query_deadline {
                    Some(d) => sleep_until(d.into()).await,
                    None => std::future::pending::<()>().await,
                }
            } => {
                let now = Instant::now();
                let mut effects = reduce(&mut state, Action::DispatchDueQueries, now);
                effects.push(Effect::Render);
                let mut renderer = TuiRenderer::new(&mut tui);
                effect_runner.run(effects, &mut renderer, &state).await?;
                state.clear_dirty();
            }
            // Animation deadline reached (spinner, message timeout)
            _ = async {
                match animation_deadline {
                    Some(d) => sleep_until(d.into()).await,
                    None => std::future::pending::<()>().await,
                }
            } => {
                let now = Instant::now();
                let effects = reduce(&mut state, Action::Render, now);
                let mut renderer = TuiRenderer::new(&mut tui);
                effect_runner.run(effects, &mut renderer, &state).await?;
                state.clear_dirty();
            }
        }

        if state.should_quit {
            break;
        }
    }

    tui.exit()?;
    info!("duckboard exited");
    Ok(())
}
