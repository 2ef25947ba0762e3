use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{FutureExt, StreamExt};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{
    Action, GameConfig, GameEngine, GameState, LogNotifier, Notifier, SessionEvent, StatusLine,
};
use crate::input::InputHandler;
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    log: LogNotifier,
    status: StatusLine,
}

impl HumanMode {
    /// Set up a session. `seed` makes food placement reproducible.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let renderer = Renderer::new(config.palette);
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        let state = engine.reset().context("Failed to place the first food")?;

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            log: LogNotifier,
            status: StatusLine::new(),
        })
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

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        self.publish(SessionEvent::Started);
        self.draw(terminal)?;

        loop {
            tokio::select! {
                _ = tick_timer.tick() => {}

                // Handle Ctrl+C
                _ = &mut ctrl_c => {
                    log::info!("Interrupted, leaving the game");
                    break;
                }
            }

            let actions = self.drain_input(&mut event_stream)?;
            if !self.tick(actions)? {
                break;
            }

            self.draw(terminal)?;
        }

        Ok(())
    }

    /// Collect every input event that is already waiting, without blocking
    fn drain_input(&self, event_stream: &mut EventStream) -> Result<Vec<Action>> {
        let mut actions = Vec::new();

        while let Some(next) = event_stream.next().now_or_never() {
            match next {
                Some(Ok(event)) => actions.extend(self.map_event(event)),
                Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                None => {
                    // Input is gone for good
                    actions.push(Action::Quit);
                    break;
                }
            }
        }

        Ok(actions)
    }

    fn map_event(&self, event: Event) -> Option<Action> {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            _ => None,
        }
    }

    /// Run one tick of game logic. Returns `false` once the player quits.
    fn tick(&mut self, actions: Vec<Action>) -> Result<bool> {
        let result = self
            .engine
            .step(&mut self.state, actions)
            .context("No room left on the grid for food")?;

        if result.terminated {
            log::info!(
                "Game over after {} ticks, final length {}",
                self.state.ticks,
                self.state.snake.length()
            );
            return Ok(false);
        }

        for event in &result.events {
            self.publish(*event);
        }
        self.metrics.update();

        Ok(true)
    }

    fn publish(&mut self, event: SessionEvent) {
        self.log.notify(&event);
        self.status.notify(&event);
        self.metrics.on_event(&event);
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, &self.state, &self.metrics, self.status.latest());
            })
            .context("Failed to draw frame")?;
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::default(), Some(11)).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.state.snake.len(), 1);
        assert_eq!(mode.state.ticks, 0);
        assert!(!mode.state.food_overlaps_snake());
        assert_eq!(mode.status.latest(), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mode = mode();

        let press = Event::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(mode.map_event(press), Some(Action::Turn(Direction::Up)));

        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(mode.map_event(release), None);
        assert_eq!(mode.map_event(Event::FocusLost), None);
    }

    #[test]
    fn test_tick_quit() {
        let mut mode = mode();
        let before = mode.state.clone();

        assert!(!mode.tick(vec![Action::Turn(Direction::Down), Action::Quit]).unwrap());
        assert_eq!(mode.state, before);
    }

    #[test]
    fn test_tick_reports_food_eaten() {
        let mut mode = mode();
        mode.state.food.place(Cell::new(17, 12));

        assert!(mode.tick(Vec::new()).unwrap());
        assert_eq!(mode.status.latest(), Some("Food eaten! Snake length: 2"));
        assert_eq!(mode.metrics.best_length, 2);
    }

    #[test]
    fn test_restart_starts_new_run() {
        let mut mode = mode();
        mode.state.food.place(Cell::new(0, 0));

        assert!(mode.tick(vec![Action::Restart]).unwrap());
        assert_eq!(mode.status.latest(), Some("Restarted."));
        assert_eq!(mode.metrics.runs, 2);
        assert_eq!(mode.state.resets, 1);
    }
}
