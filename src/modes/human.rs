use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};
use tracing::{error, info};

use crate::game::{GameConfig, GameEngine, InputOutcome, TickResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// What the game loop should do with its tick timer after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickControl {
    Start,
    Stop,
    Keep,
}

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_period: Duration,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config).context("Failed to set up the game")?;
        Ok(Self::with_engine(engine))
    }

    pub fn with_engine(engine: GameEngine) -> Self {
        let tick_period = Duration::from_millis(engine.config().tick_interval_ms);

        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_period,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Only exists while the game is running
        let mut tick_timer: Option<Interval> = None;

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match self.handle_event(event) {
                            TickControl::Start => {
                                // first move lands one period after the key press
                                let first = Instant::now() + self.tick_period;
                                tick_timer = Some(interval_at(first, self.tick_period));
                            }
                            TickControl::Stop => tick_timer = None,
                            TickControl::Keep => {}
                        }
                    }
                }

                // Game logic tick
                _ = next_tick(&mut tick_timer) => {
                    if self.update_game() == TickControl::Stop {
                        tick_timer = None;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> TickControl {
        let Event::Key(key) = event else {
            return TickControl::Keep;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return TickControl::Keep;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => match self.engine.set_direction(direction) {
                InputOutcome::Started => {
                    self.metrics.on_game_start();
                    TickControl::Start
                }
                InputOutcome::Accepted | InputOutcome::Ignored(_) => TickControl::Keep,
            },
            KeyAction::Restart => {
                self.reset_game();
                TickControl::Stop
            }
            KeyAction::Quit => {
                self.should_quit = true;
                TickControl::Keep
            }
            KeyAction::None => TickControl::Keep,
        }
    }

    fn update_game(&mut self) -> TickControl {
        let result = self.engine.advance();

        if result.is_terminal() {
            self.metrics.on_game_over(self.engine.score());
            return TickControl::Stop;
        }

        match result {
            // a tick outside a running game means the timer outlived it
            TickResult::Ignored => TickControl::Stop,
            _ => TickControl::Keep,
        }
    }

    fn reset_game(&mut self) {
        // the configuration was validated when the engine was built
        if let Err(err) = self.engine.restart() {
            error!(%err, "restart failed");
            return;
        }
        self.metrics.on_reset();
        info!(games_played = self.metrics.games_played, "new game");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Wait for the next tick, or forever when no timer is running
async fn next_tick(timer: &mut Option<Interval>) -> Instant {
    match timer {
        Some(timer) => timer.tick().await,
        None => std::future::pending().await,
    }
}
