//! Event polling, the dispatch loop, and effect execution.
//!
//! One loop owns the state: terminal events become actions, actions go
//! through the store, and effects spawn tasks whose results come back as
//! actions on the same channel. Nothing else touches [`AppState`].

use std::io;
use std::time::Duration;

use crossterm::event::{self, KeyEvent};
use ratatui::backend::Backend;
use ratatui::Terminal;
use snowwatch_core::{
    reduce, Action, AppState, Effect, LoggingMiddleware, OpenWeatherClient, StoreWithMiddleware,
    TaskPool, Timers,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::ui::Ui;

/// Terminal events the app reacts to.
///
/// Mouse input is not part of the UI; the poller drops it at the source.
#[derive(Debug, Clone)]
pub enum EventKind {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Tick period driving the spinner and snowfall animation.
pub const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Timeout passed to each `crossterm::event::poll` call.
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Sleep between poll cycles.
const LOOP_SLEEP: Duration = Duration::from_millis(16);

/// Spawn a background task polling crossterm for input.
///
/// Events are forwarded over `tx`; the task stops when cancelled or when the
/// receiver is dropped. On cancellation it drains crossterm's buffer so
/// pending input does not leak into the shell after the app exits.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    // Process up to MAX_EVENTS_PER_BATCH events per iteration
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        if let Ok(evt) = event::read() {
                            let kind = match evt {
                                event::Event::Key(key) => Some(EventKind::Key(key)),
                                event::Event::Resize(w, h) => Some(EventKind::Resize(w, h)),
                                _ => None,
                            };
                            if let Some(kind) = kind {
                                if tx.send(kind).is_err() {
                                    debug!("event channel closed, stopping poller");
                                    return;
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Owns the store, the async plumbing, and the render loop.
pub struct Runtime {
    store: StoreWithMiddleware<LoggingMiddleware>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    tasks: TaskPool,
    timers: Timers,
    client: OpenWeatherClient,
    should_render: bool,
}

impl Runtime {
    pub fn new(state: AppState, client: OpenWeatherClient) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskPool::new(action_tx.clone());
        let timers = Timers::new(action_tx.clone());

        Self {
            store: StoreWithMiddleware::new(state, reduce, LoggingMiddleware::new()),
            action_tx,
            action_rx,
            tasks,
            timers,
            client,
            should_render: true,
        }
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    /// Access the current state.
    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Access the interval timers (tick, periodic refresh).
    pub fn timers(&mut self) -> &mut Timers {
        &mut self.timers
    }

    /// Run the event/action loop until a Quit action arrives.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        ui: &mut Ui,
    ) -> io::Result<()> {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<EventKind>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, POLL_TIMEOUT, LOOP_SLEEP, cancel_token.clone());

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| {
                    let area = frame.area();
                    ui.render(frame, area, state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    for action in ui.map_event(&event, self.store.state()) {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if matches!(action, Action::Quit) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    for effect in result.effects {
                        self.handle_effect(effect);
                    }
                    self.should_render = result.changed;
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.timers.cancel_all();
        self.tasks.cancel_all();
        Ok(())
    }

    /// Execute one effect by spawning the matching async task.
    ///
    /// Fetches share the "weather" task key, so issuing a new one aborts any
    /// fetch still in flight. Correctness does not depend on that: a result
    /// that outlives the abort window is discarded by the reducer's tag
    /// check.
    fn handle_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchWeather { city, tag } => {
                let client = self.client.clone();
                self.tasks.spawn("weather", async move {
                    match client.fetch_classification(city.lat, city.lon).await {
                        Ok(classification) => Action::WeatherDidLoad {
                            tag,
                            classification,
                        },
                        Err(error) => Action::WeatherDidError {
                            tag,
                            failure: error.to_failure(),
                        },
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use snowwatch_core::{FetchErrorKind, FetchTag, TaskKey, WeatherConfig};

    fn test_runtime() -> Runtime {
        // Points at a closed local port; tests that fetch expect an error.
        let mut config = WeatherConfig::new("test-key");
        config.api_base = "http://127.0.0.1:1".to_string();
        config.timeout = Duration::from_millis(500);
        let client = OpenWeatherClient::new(config).unwrap();
        Runtime::new(AppState::default(), client)
    }

    #[tokio::test]
    async fn test_run_exits_on_quit() {
        let mut runtime = test_runtime();
        let mut ui = Ui::new();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        runtime.enqueue(Action::Quit);

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            runtime.run(&mut terminal, &mut ui),
        )
        .await
        .expect("run should exit once Quit is processed");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_effect_reports_failure_as_action() {
        let mut runtime = test_runtime();
        let state = runtime.state();
        let city = state.selected_city().clone();
        let tag = FetchTag { seq: 1, city: 0 };

        runtime.handle_effect(Effect::FetchWeather { city, tag });
        assert!(runtime.tasks.is_running(&TaskKey::new("weather")));

        let action = tokio::time::timeout(Duration::from_secs(5), runtime.action_rx.recv())
            .await
            .expect("fetch against a closed port should resolve quickly")
            .expect("task should deliver its result");

        match action {
            Action::WeatherDidError {
                tag: result_tag,
                failure,
            } => {
                assert_eq!(result_tag, tag);
                assert_eq!(failure.kind, FetchErrorKind::Network);
            }
            other => panic!("expected WeatherDidError, got {:?}", other),
        }
    }
}
