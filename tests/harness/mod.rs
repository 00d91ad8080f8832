#![allow(dead_code, reason = "each integration test binary uses a different subset")]

pub mod fixtures;

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio::time::timeout;

use duckboard::app::action::Action;
use duckboard::app::config::AppConfig;
use duckboard::app::effect_runner::EffectRunner;
use duckboard::app::ports::{HistoryStore, MetadataProvider, QueryGateway, Renderer};
use duckboard::app::reducer::reduce;
use duckboard::app::state::AppState;
use duckboard::ui::components::layout::MainLayout;

pub const TEST_WIDTH: u16 = 100;
pub const TEST_HEIGHT: u16 = 30;

/// How long `settle` waits for a follow-up action before assuming quiet.
const SETTLE_TIMEOUT: Duration = Duration::from_millis(100);

pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn draw(&mut self, _state: &AppState) -> Result<()> {
        Ok(())
    }
}

/// Drives the reducer and the real effect runner against fake ports, the way
/// the main loop does, minus the terminal.
pub struct Harness {
    pub state: AppState,
    runner: EffectRunner,
    action_rx: mpsc::Receiver<Action>,
}

impl Harness {
    pub fn new(
        config: &AppConfig,
        gateway: Arc<dyn QueryGateway>,
        metadata: Arc<dyn MetadataProvider>,
        history_store: Arc<dyn HistoryStore>,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::channel(64);
        Self {
            state: AppState::new(config),
            runner: EffectRunner::new(
                gateway,
                metadata,
                history_store,
                config.query_slots(),
                action_tx,
            ),
            action_rx,
        }
    }

    pub async fn dispatch(&mut self, action: Action) {
        let effects = reduce(&mut self.state, action, Instant::now());
        self.runner
            .run(effects, &mut NoopRenderer, &self.state)
            .await
            .unwrap();
    }

    /// Feeds every action produced by effect tasks back into the reducer
    /// until nothing arrives for a while.
    pub async fn settle(&mut self) {
        while let Ok(Some(action)) = timeout(SETTLE_TIMEOUT, self.action_rx.recv()).await {
            self.dispatch(action).await;
        }
    }
}

pub fn create_test_state() -> AppState {
    AppState::new(&AppConfig::default())
}

pub fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(TEST_WIDTH, TEST_HEIGHT);
    Terminal::new(backend).unwrap()
}

const FIXED_TIME_MS: u128 = 0;

pub fn render_and_get_buffer(terminal: &mut Terminal<TestBackend>, state: &AppState) -> Buffer {
    terminal
        .draw(|frame| MainLayout::render(frame, state, Some(FIXED_TIME_MS)))
        .unwrap();

    terminal.backend().buffer().clone()
}

pub fn render_to_string(terminal: &mut Terminal<TestBackend>, state: &AppState) -> String {
    buffer_to_string(&render_and_get_buffer(terminal, state))
}

/// Renders a single component into a `width` x `height` buffer.
pub fn render_area(width: u16, height: u16, draw: impl FnOnce(&mut Frame, Rect)) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            draw(frame, area);
        })
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

/// Picks the given rows of a rendered buffer.
pub fn rows(output: &str, indices: &[usize]) -> String {
    let lines: Vec<&str> = output.split('\n').collect();
    indices
        .iter()
        .map(|&i| lines[i])
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per buffer row, trailing blanks trimmed.
fn buffer_to_string(buffer: &Buffer) -> String {
    let mut rows = Vec::with_capacity(buffer.area.height as usize);
    for y in 0..buffer.area.height {
        let mut row = String::new();
        for x in 0..buffer.area.width {
            row.push_str(buffer.cell((x, y)).unwrap().symbol());
        }
        rows.push(row.trim_end().to_string());
    }
    rows.join("\n")
}
