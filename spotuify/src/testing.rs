use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent, DataRequest};
use crate::input::{Key, KeyEvent};
use crate::state::AppState;
use crate::ui::screens::Screen;

/// Runs commands synchronously and records the API work they ask for
/// instead of performing it
#[derive(Default)]
pub struct MockDataHandler {
    requests: Vec<DataRequest>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[DataRequest] {
        &self.requests
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        if let Some(request) = executor::execute_command_sync(command, state) {
            self.requests.push(request);
        }
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            core: AppCore::new(MockDataHandler::new()),
        }
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            core: AppCore::with_state(MockDataHandler::new(), state),
        }
    }

    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type text one character at a time
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    pub fn send_command(&mut self, command: AppCommand) {
        self.core.handle_command(command);
    }

    /// Inject a data event (simulate an API response)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// Every request issued so far, oldest first
    pub fn requests(&self) -> &[DataRequest] {
        self.core.handler().requests()
    }

    pub fn last_request(&self) -> Option<&DataRequest> {
        self.requests().last()
    }

    /// Assert that the app is on a specific screen type
    ///
    /// Uses discriminant comparison to check screen type without
    /// requiring full equality of state.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
