//! Console application state and event handling

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use product_client::console;
use product_client::{Action, Completion, ConsoleState, FormField, ProductApi};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{mpsc, watch};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

use crate::ui;

const HEALTH_INTERVAL: Duration = Duration::from_secs(5);

/// Backend reachability as last seen by the poller
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    #[default]
    Unknown,
    Healthy,
    Unreachable,
}

pub struct App {
    api: Arc<dyn ProductApi>,
    /// Backend base URL, shown in the header
    pub base_url: String,
    /// Form, flash message and result table
    pub state: ConsoleState,
    /// Field being edited
    pub focus: FormField,
    /// Edit buffer for the focused field
    pub editor: Input,
    /// Requests sent but not yet applied
    pub pending: usize,
    pub health: Health,
    /// Logger Widget State
    pub logger_state: TuiWidgetState,
    /// Where Ctrl-E writes the result table
    pub export_path: PathBuf,
    completion_tx: mpsc::Sender<Completion>,
    completion_rx: mpsc::Receiver<Completion>,
    health_rx: Option<watch::Receiver<Health>>,
    should_quit: bool,
}

/// Action bound to a key: F1..F7 in button order, or a Ctrl shortcut
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::F(n) => (n as usize)
            .checked_sub(1)
            .and_then(|i| Action::ALL.get(i))
            .copied(),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
            'n' => Some(Action::Create),
            'u' => Some(Action::Update),
            'r' => Some(Action::Retrieve),
            'd' => Some(Action::Delete),
            's' => Some(Action::Search),
            'b' => Some(Action::Buy),
            'l' => Some(Action::Clear),
            _ => None,
        },
        _ => None,
    }
}

impl App {
    pub fn new(api: Arc<dyn ProductApi>, base_url: impl Into<String>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel(32);
        Self {
            api,
            base_url: base_url.into(),
            state: ConsoleState::new(),
            focus: FormField::Id,
            editor: Input::default(),
            pending: 0,
            health: Health::Unknown,
            logger_state: TuiWidgetState::new(),
            export_path: std::env::var("PRODUCT_CONSOLE_EXPORT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("product-results.html")),
            completion_tx,
            completion_rx,
            health_rx: None,
            should_quit: false,
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> io::Result<()> {
        self.spawn_health_poller();
        tracing::info!("Tab/Shift-Tab to move between fields, Esc to quit");

        while !self.should_quit() {
            terminal.draw(|f| ui::draw(f, self))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
                && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
            {
                self.handle_key(key);
            }

            // Apply whatever finished, in arrival order
            while let Ok(completion) = self.completion_rx.try_recv() {
                self.complete(completion);
            }

            if let Some(rx) = &mut self.health_rx
                && rx.has_changed().unwrap_or(false)
            {
                self.health = *rx.borrow_and_update();
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = action_for(&key) {
            self.trigger(action);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('e') if ctrl => self.export_results(),
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.focus_field(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.focus_field(self.focus.prev()),
            KeyCode::PageUp => self.logger_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => self.logger_state.transition(TuiWidgetEvent::NextPageKey),
            _ => {
                self.editor.handle_event(&Event::Key(key));
            }
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Send an action off with the current form values
    ///
    /// Clear is applied on the spot; everything else runs on a task and
    /// comes back through the completion channel.
    pub fn trigger(&mut self, action: Action) {
        self.commit_editor();

        if !action.is_remote() {
            self.complete(Completion::Cleared);
            return;
        }

        self.pending += 1;
        let api = Arc::clone(&self.api);
        let form = self.state.form.clone();
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let completion = console::execute(api.as_ref(), action, &form).await;
            if tx.send(completion).await.is_err() {
                tracing::debug!("Console closed before {} completed", action.label());
            }
        });
    }

    /// Apply a finished action
    ///
    /// The edit buffer is only reloaded when the form actually changed, so
    /// text typed while a request was in flight survives failures and empty
    /// searches. A failed retrieve keeps the id, so an id being typed stays.
    pub fn complete(&mut self, completion: Completion) {
        if completion != Completion::Cleared {
            self.pending = self.pending.saturating_sub(1);
        }
        let reload = match &completion {
            Completion::Failed {
                action: Action::Retrieve,
                ..
            } => self.focus != FormField::Id,
            other => other.touches_form(),
        };
        self.state.apply(completion);
        if reload {
            self.load_editor();
        }
    }

    pub fn focus_field(&mut self, field: FormField) {
        self.commit_editor();
        self.focus = field;
        self.load_editor();
    }

    /// Value shown for a field, live edit buffer included
    pub fn field_value(&self, field: FormField) -> &str {
        if field == self.focus {
            self.editor.value()
        } else {
            self.state.form.get(field)
        }
    }

    fn commit_editor(&mut self) {
        self.state.form.set(self.focus, self.editor.value());
    }

    fn load_editor(&mut self) {
        self.editor = Input::new(self.state.form.get(self.focus).to_string());
    }

    fn export_results(&self) {
        let Some(table) = &self.state.results else {
            tracing::warn!("Nothing to export, run a search first");
            return;
        };
        match std::fs::write(&self.export_path, table.to_html()) {
            Ok(()) => tracing::info!(
                "Exported {} rows to {}",
                table.len(),
                self.export_path.display()
            ),
            Err(e) => tracing::error!("Export to {} failed: {}", self.export_path.display(), e),
        }
    }

    fn spawn_health_poller(&mut self) {
        let (tx, rx) = watch::channel(Health::Unknown);
        self.health_rx = Some(rx);

        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            loop {
                let health = match api.health().await {
                    Ok(_) => Health::Healthy,
                    Err(e) => {
                        tracing::debug!("Health check failed: {}", e);
                        Health::Unreachable
                    }
                };
                if tx.send(health).is_err() {
                    break;
                }
                tokio::time::sleep(HEALTH_INTERVAL).await;
            }
        });
    }
}
