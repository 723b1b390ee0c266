use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use spotuify_auth::{Authenticator, OAuthClient, Settings, TokenRecord};
use std::time::{Duration, Instant};

use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::commands::{executor, handlers, AppCommand};
use crate::events::DataRequest;
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use crate::ui::screens::Screen;

const FRAME_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    auth: Authenticator<OAuthClient>,
    token: TokenRecord,
    settings: Settings,
    log_buffer: LogBuffer,
}

impl App {
    pub fn new(
        auth: Authenticator<OAuthClient>,
        token: TokenRecord,
        settings: Settings,
        log_buffer: LogBuffer,
    ) -> Self {
        Self {
            auth,
            token,
            settings,
            log_buffer,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        tracing::info!("spotuify starting");

        let mut terminal = Self::init()?;

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();

        let mut ui_state = AppState::new().with_volume_step(self.settings.volume_step);
        let mut task_manager = BackgroundTaskManager::new();
        let data_loader = DataLoader::new(&self.token.access_token, data_tx);

        let mut event_stream = EventStream::new();

        Self::init_data(&mut ui_state, &mut task_manager, &data_loader);

        tracing::info!("Entering main event loop");

        let mut frame_interval = tokio::time::interval(FRAME_INTERVAL);
        let mut poll_interval =
            tokio::time::interval(Duration::from_millis(self.settings.refresh_interval_ms.max(250)));
        // The first tick fires immediately and init_data already loaded playback
        poll_interval.reset();
        let mut last_frame = Instant::now();

        let result = loop {
            if let Screen::Logs(logs_state) = ui_state.current_screen_mut() {
                logs_state.total_entries = self.log_buffer.len();
            }

            if let Err(e) = terminal.draw(|f| {
                crate::ui::render_app(f, &ui_state, &self.log_buffer);
            }) {
                break Err(anyhow::Error::from(e));
            }

            tokio::select! {
                _ = frame_interval.tick() => {
                    if let Some(throbber_state) = ui_state.loading_state() {
                        throbber_state.calc_next();
                    }
                    let now = Instant::now();
                    ui_state.now_playing.tick(now - last_frame);
                    last_frame = now;
                }
                _ = poll_interval.tick() => {
                    self.refresh_token(&data_loader).await;
                    // Not routed through the executor so a pending key survives the poll
                    executor::spawn_request(DataRequest::Playback, &mut task_manager, &data_loader);
                }
                Some(Ok(event)) = event_stream.next() => {
                    match event {
                        Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => {
                            // Don't log when on logs screen to avoid feedback loop
                            let on_logs_screen = matches!(ui_state.current_screen(), Screen::Logs(_));
                            if !on_logs_screen {
                                tracing::debug!("Key press: {:?}", key);
                            }
                            let command = KeyEvent::from_crossterm(key)
                                .and_then(|key| handlers::handle_key_input(key, &ui_state));
                            if let Some(command) = command {
                                if !on_logs_screen {
                                    tracing::info!("Executing command: {:?}", command);
                                }
                                executor::execute_command(
                                    command,
                                    &mut ui_state,
                                    &mut task_manager,
                                    &data_loader,
                                );
                            }
                        }
                        _ => {}
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    crate::state::reducer::reduce_data_event(&mut ui_state, data_event);
                }
            }

            if ui_state.should_quit {
                tracing::info!("Quit requested, exiting event loop");
                break Ok(());
            }
        };

        tracing::info!("Cleaning up application");

        task_manager.cancel_all();
        Self::exit(terminal)?;

        result
    }

    /// Swap in a fresh access token shortly before the current one expires
    async fn refresh_token(&mut self, data_loader: &DataLoader) {
        let margin = self.auth.options().expiry_margin;
        if !self.token.is_expired(margin) {
            return;
        }

        match self.auth.cached_token().await {
            Some(token) => {
                tracing::info!(expires_at = %token.expires_at, "Access token refreshed");
                data_loader.set_access_token(&token.access_token);
                self.token = token;
            }
            None => {
                // Requests keep using the old token and surface 401s
                tracing::warn!("Could not refresh the access token");
            }
        }
    }

    fn init() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn init_data(
        ui_state: &mut AppState,
        task_manager: &mut BackgroundTaskManager,
        data_loader: &DataLoader,
    ) {
        tracing::info!("Loading library and playback");
        executor::execute_command(
            AppCommand::LoadLibrary {
                force_refresh: false,
            },
            ui_state,
            task_manager,
            data_loader,
        );
        executor::spawn_request(DataRequest::CurrentUser, task_manager, data_loader);
        executor::spawn_request(DataRequest::Playback, task_manager, data_loader);
    }

    fn exit(mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}
