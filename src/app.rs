// /app.rs
use std::path::PathBuf;

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::context::Context;
use crate::message::Notice;
use crate::store::RoleStore;
use crate::transfer::{self, ImportError};
use crate::tui::{Tui, TuiEvent};
use crate::ui::{Component, ComponentEnum, Editor};

/// Intents a component hands back to the app, plus completions of the one
/// async step (the import file read) delivered over the action channel.
pub enum Action {
    Quit,
    SwitchComponent(ComponentEnum),
    SwitchInputMode(InputMode),
    ExportRoles,
    ConfirmImport(PathBuf),
    ImportRead {
        file_name: String,
        result: std::io::Result<String>,
    },
}

#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

pub struct App {
    // Application state and control flow
    running: bool,
    component: ComponentEnum,
    input_mode: InputMode,

    // --- Global state
    store: RoleStore,
    notice: Option<Notice>,

    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new() -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let store = RoleStore::default();
        let component = ComponentEnum::from(Editor::new(&store));
        Self {
            running: true,
            component,
            input_mode: InputMode::default(),
            store,
            notice: None,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(4.0) // 4 ticks per second
            .frame_rate(30.0); // 30 frames per second

        tui.enter()?; // Starts event handler, enters raw mode, enters alternate screen

        loop {
            tui.draw(|frame| {
                let context = Context {
                    store: &mut self.store,
                    notice: &mut self.notice,
                    input_mode: &self.input_mode,
                };
                self.component
                    .render(frame.area(), frame.buffer_mut(), &context)
            })?;

            tokio::select! {
                Some(event) = tui.next() => {
                    self.handle_tui_event(event)?;
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action)?;
                }
            }

            if !self.running {
                break;
            }
        }

        tui.exit()?; // Stops event handler, exits raw mode, exits alternate screen
        Ok(())
    }

    fn handle_tui_event(&mut self, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.on_key(key_event)?
            }
            TuiEvent::Tick => self.on_tick(),
            TuiEvent::Key(_) => {}
            TuiEvent::Paste(_) => {}
            TuiEvent::Mouse(_) => {}
            TuiEvent::Init => {}
            TuiEvent::Error => {}
            TuiEvent::Render => {}
            TuiEvent::FocusGained => {}
            TuiEvent::FocusLost => {}
            TuiEvent::Resize(_, _) => {}
        }
        Ok(())
    }

    fn on_key(&mut self, key_event: KeyEvent) -> Result<()> {
        let mut context = Context {
            store: &mut self.store,
            notice: &mut self.notice,
            input_mode: &self.input_mode,
        };
        if let Some(action) = self.component.on_key(key_event, &mut context) {
            self.handle_action(action)?
        };
        Ok(())
    }

    fn on_tick(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::expired) {
            self.notice = None;
        }
    }

    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.quit()?,
            Action::SwitchComponent(component) => self.component = component,
            Action::SwitchInputMode(input_mode) => self.input_mode = input_mode,
            Action::ExportRoles => self.export_roles(),
            Action::ConfirmImport(path) => self.spawn_import_read(path),
            Action::ImportRead { file_name, result } => self.finish_import(file_name, result),
        }

        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        self.running = false;
        Ok(())
    }

    // Best-effort path: a failed export is logged, never surfaced as a hard
    // error, and the app keeps running either way.
    fn export_roles(&mut self) {
        match transfer::export_roles(&self.store.roles, &transfer::data_dir()) {
            Ok(path) => {
                self.notice = Some(Notice::success(format!(
                    "Exported {} prompt(s) to {}",
                    self.store.roles.len(),
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Failed to export prompts: {e:#}");
            }
        }
    }

    // Only one read is ever in flight: the import menu disables confirm
    // until the matching ImportRead action comes back.
    fn spawn_import_read(&mut self, path: PathBuf) {
        let action_tx = self.action_tx.clone();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        tokio::spawn(async move {
            let result = tokio::fs::read_to_string(&path).await;
            let _ = action_tx.send(Action::ImportRead { file_name, result });
        });
    }

    fn finish_import(&mut self, file_name: String, result: std::io::Result<String>) {
        let text = match result {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Import read failed for {file_name}: {e:#}");
                self.fail_import(ImportError::Read(e).to_string());
                return;
            }
        };

        let batch = match transfer::parse_roles(&text) {
            Ok(batch) => batch,
            Err(e) => {
                log::warn!("Import rejected for {file_name}: {e:#}");
                self.fail_import(e.to_string());
                return;
            }
        };

        let Some(first) = batch.first().cloned() else {
            self.fail_import(ImportError::Empty.to_string());
            return;
        };

        let merged = transfer::merge_roles(&self.store.roles, &batch);
        self.store.apply_import(merged, first);
        self.notice = Some(Notice::success(format!(
            "Imported {} prompt(s) successfully from {}!",
            batch.len(),
            file_name
        )));
        self.component = ComponentEnum::from(Editor::new(&self.store));
    }

    fn fail_import(&mut self, message: String) {
        if let ComponentEnum::ImportMenu(menu) = &mut self.component {
            menu.fail(message);
        } else {
            // The user left the import screen while the read was in flight.
            self.notice = Some(Notice::error(message));
        }
    }
}
