use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::state::{reducer, AppState};

/// Side effects of command execution (production = real loader + tasks, test = mock)
pub trait DataEventHandler {
    /// Execute a command with access to mutable state
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// Application core without terminal dependencies
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    pub fn new(handler: H) -> Self {
        Self::with_state(handler, AppState::new())
    }

    pub fn with_state(handler: H, ui_state: AppState) -> Self {
        Self { ui_state, handler }
    }

    /// Translate a key press to a command and execute it
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            self.handler.execute_with_context(command, &mut self.ui_state);
        }
    }

    /// Execute a command that did not come from a key press
    pub fn handle_command(&mut self, command: AppCommand) {
        self.handler.execute_with_context(command, &mut self.ui_state);
    }

    /// Apply a result coming back from a background task
    pub fn handle_data_event(&mut self, event: DataEvent) {
        reducer::reduce_data_event(&mut self.ui_state, event);
    }

    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.ui_state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
