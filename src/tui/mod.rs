//! Terminal User Interface using ratatui

mod ui;
pub mod screens;

use crate::app::state::step_media;
use crate::app::{App, InputMode, Screen};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// TUI application wrapper
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Tui {
    /// Create a new TUI instance
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Set up the terminal
    fn setup(&mut self) -> Result<()> {
        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        Ok(())
    }

    /// Restore the terminal
    fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI main loop
    pub async fn run(&mut self, app: &mut App) -> Result<()> {
        self.setup()?;
        let result = self.event_loop(app).await;
        self.restore()?;
        result
    }

    /// Main event loop
    async fn event_loop(&mut self, app: &mut App) -> Result<()> {
        loop {
            // Draw UI
            {
                let state = app.state.read().await;
                self.terminal.draw(|f| ui::draw(f, app, &state))?;
            }

            // Check for quit
            if app.state.read().await.should_quit {
                break;
            }

            // Poll for events
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(app, key.code).await?;
                }
            }
        }

        Ok(())
    }

    /// Handle keyboard input
    async fn handle_key(&self, app: &mut App, key: KeyCode) -> Result<()> {
        let mut state = app.state.write().await;

        // Help overlay swallows everything
        if state.show_help {
            state.show_help = false;
            return Ok(());
        }

        // Live search: every keystroke updates the visible set
        if state.input_mode == InputMode::Search {
            match key {
                KeyCode::Enter => {
                    state.input_mode = InputMode::Normal;
                }
                KeyCode::Esc => {
                    state.input_mode = InputMode::Normal;
                    state.search_query.clear();
                    state.refresh_visible(&app.store);
                }
                KeyCode::Backspace => {
                    state.search_query.pop();
                    state.refresh_visible(&app.store);
                }
                KeyCode::Char(c) => {
                    state.search_query.push(c);
                    state.refresh_visible(&app.store);
                }
                _ => {}
            }
            return Ok(());
        }

        // Detail modal captures input while open
        if state.selection.is_open() {
            match key {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                    state.close_detail();
                }
                KeyCode::Left | KeyCode::Char('[') => {
                    if let Some(record) = state.selected_record(&app.store) {
                        let count = record.media.len();
                        state.media_index = step_media(state.media_index, count, false);
                    }
                }
                KeyCode::Right | KeyCode::Char(']') => {
                    if let Some(record) = state.selected_record(&app.store) {
                        let count = record.media.len();
                        state.media_index = step_media(state.media_index, count, true);
                    }
                }
                _ => {}
            }
            return Ok(());
        }

        // Global keys
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                state.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('?') => {
                state.show_help = true;
                return Ok(());
            }
            KeyCode::Char('1') => {
                state.goto(Screen::Dashboard);
                return Ok(());
            }
            KeyCode::Char('2') => {
                state.goto(Screen::Explorer);
                return Ok(());
            }
            KeyCode::Char('3') => {
                state.goto(Screen::Categories);
                return Ok(());
            }
            KeyCode::Tab => {
                let next = match state.current_screen {
                    Screen::Dashboard => Screen::Explorer,
                    Screen::Explorer => Screen::Categories,
                    Screen::Categories => Screen::Dashboard,
                };
                state.goto(next);
                return Ok(());
            }
            KeyCode::Char('m') => {
                drop(state);
                if let Err(e) = app.open_map().await {
                    let mut state = app.state.write().await;
                    state.set_status(format!("Could not open map: {}", e));
                } else {
                    let mut state = app.state.write().await;
                    state.set_status("Opened live map in browser");
                }
                return Ok(());
            }
            _ => {}
        }

        // Screen-specific keys
        let screen = state.current_screen;
        drop(state);
        match screen {
            Screen::Dashboard => {}
            Screen::Explorer => screens::explorer::handle_input(app, key).await?,
            Screen::Categories => screens::categories::handle_input(app, key).await?,
        }

        Ok(())
    }
}
