//! Application orchestration layer
//!
//! Wires the input service, the session and the renderer together. All viewer state
//! lives in [`Session`]; this layer only translates input actions into session commands,
//! performs file I/O, and keeps the status line.

pub mod loader;

use crate::config::Config;
use crate::error::{LogscopeError, Result};
use crate::input::{InputAction, InputService, PromptKind, ScrollDirection};
use crate::render::ui::{StatusLine, UIRenderer};
use crate::session::{Command, Outcome, Session};
use crate::source::SYNTHETIC_SOURCE_NAME;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Application orchestrator - owns the session and drives the event loop
pub struct Application {
    session: Session,
    ui_renderer: Box<dyn UIRenderer>,
    input: InputService,
    status: StatusLine,
    export_dir: PathBuf,
}

impl Application {
    pub fn new(session: Session, ui_renderer: Box<dyn UIRenderer>, config: &Config) -> Self {
        Self {
            session,
            ui_renderer,
            input: InputService::new(config.mouse_scroll_lines),
            status: StatusLine::new(),
            export_dir: PathBuf::from("."),
        }
    }

    /// Directory exports are written to (the working directory by default)
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Run the application until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;
        let result = self.event_loop().await;
        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        let (_, height) = self.ui_renderer.get_terminal_size()?;
        let rows = self.ui_renderer.viewport_rows(height);
        self.session.execute(Command::Resize(u64::from(rows)))?;
        self.ui_renderer.render(&self.session, &self.status)?;

        loop {
            let actions = self.input.poll_actions(Some(POLL_TIMEOUT))?;
            if actions.is_empty() {
                continue;
            }
            for action in actions {
                if !self.handle_action(action).await? {
                    return Ok(());
                }
            }
            self.ui_renderer.render(&self.session, &self.status)?;
        }
    }

    /// Apply one input action - returns false if the application should quit
    pub async fn handle_action(&mut self, action: InputAction) -> Result<bool> {
        match action {
            InputAction::Quit => return Ok(false),

            InputAction::Scroll { direction, lines } => {
                let rows = lines as i64;
                let rows = match direction {
                    ScrollDirection::Up => -rows,
                    ScrollDirection::Down => rows,
                };
                self.dispatch(Command::Scroll(rows));
            }
            InputAction::PageUp => {
                self.dispatch(Command::PageUp);
            }
            InputAction::PageDown => {
                self.dispatch(Command::PageDown);
            }
            InputAction::GoToStart => {
                self.dispatch(Command::ScrollToTop);
            }
            InputAction::GoToEnd => {
                self.dispatch(Command::ScrollToBottom);
            }

            InputAction::NextSource => self.cycle_source(1),
            InputAction::PreviousSource => self.cycle_source(-1),

            InputAction::CloseSource => {
                if let Some(name) = self.active_name() {
                    self.dispatch(Command::Close(name.clone()));
                    self.status.info(format!("Closed {name}"));
                }
            }
            InputAction::ToggleChecked => match self.active_name() {
                Some(name) if name != SYNTHETIC_SOURCE_NAME => {
                    if let Some(Outcome::Checked(checked)) =
                        self.dispatch(Command::ToggleChecked(name.clone()))
                    {
                        let verb = if checked { "Checked" } else { "Unchecked" };
                        self.status.info(format!("{verb} {name}"));
                    }
                }
                Some(_) => self.status.error("The query tab cannot be checked"),
                None => self.report(&LogscopeError::NoActiveSource),
            },
            InputAction::ToggleErrorOnly => {
                self.dispatch(Command::ToggleErrorOnly);
            }

            InputAction::Export => {
                if let Some(Outcome::Exported(payload)) = self.dispatch(Command::Export) {
                    match loader::write_export(&self.export_dir, &payload).await {
                        Ok(path) => self.status.info(format!("Exported to {}", path.display())),
                        Err(err) => self.report(&err),
                    }
                }
            }

            InputAction::StartPrompt(kind) => {
                self.status.set_prompt(kind, String::new());
                if kind == PromptKind::ReplaceFind {
                    let prefill = self.session.replace_prefill().to_string();
                    if let Some(InputAction::UpdatePrompt { kind, buffer }) =
                        self.input.seed_prompt(&prefill)
                    {
                        self.status.set_prompt(kind, buffer);
                    }
                }
            }
            InputAction::UpdatePrompt { kind, buffer } => self.status.set_prompt(kind, buffer),
            InputAction::CancelPrompt => self.status.clear_prompt(),

            InputAction::Submit { kind, text } => {
                self.status.clear_prompt();
                self.submit(kind, text).await;
            }
            InputAction::Replace { find, replace } => {
                self.status.clear_prompt();
                if let Some(Outcome::Replaced(count)) =
                    self.dispatch(Command::Replace { find, replace })
                {
                    self.status.info(format!("Replace complete: {count} lines changed"));
                }
            }

            InputAction::Resize { height, .. } => {
                let rows = self.ui_renderer.viewport_rows(height);
                self.dispatch(Command::Resize(u64::from(rows)));
            }

            InputAction::NoAction | InputAction::InvalidInput => {}
        }
        Ok(true)
    }

    async fn submit(&mut self, kind: PromptKind, text: String) {
        match kind {
            PromptKind::Search => {
                if let Some(Outcome::Matches(count)) = self.dispatch(Command::Search(text)) {
                    self.status.info(format!("{count} matching lines"));
                }
            }
            PromptKind::MassSearch => {
                if let Some(Outcome::Matches(count)) = self.dispatch(Command::MassSearch(text)) {
                    self.status.info(format!("{count} hits"));
                }
            }
            PromptKind::Import => self.import(Path::new(text.trim())).await,
            // Replace prompts finish through `InputAction::Replace`
            PromptKind::ReplaceFind | PromptKind::ReplaceWith => {}
        }
    }

    /// Import a file from disk into the session
    pub async fn import(&mut self, path: &Path) {
        match loader::import_path(&mut self.session, path).await {
            Ok(name) => self.status.info(format!("Opened {name}")),
            Err(err) => self.report(&err),
        }
    }

    /// Open the next or previous tab, wrapping around. The query tab comes last.
    fn cycle_source(&mut self, step: isize) {
        let store = self.session.store();
        let mut tabs: Vec<String> = store.names().map(str::to_string).collect();
        if store.synthetic().is_some() {
            tabs.push(SYNTHETIC_SOURCE_NAME.to_string());
        }
        if tabs.is_empty() {
            return;
        }

        let len = tabs.len() as isize;
        let next = match self.active_name() {
            Some(active) => match tabs.iter().position(|name| *name == active) {
                Some(current) => (current as isize + step).rem_euclid(len),
                None => 0,
            },
            None => 0,
        };
        let target = tabs.swap_remove(next as usize);
        self.dispatch(Command::Open(target));
    }

    fn active_name(&self) -> Option<String> {
        self.session.view().active_source().map(str::to_string)
    }

    /// Run a command, turning failures into a status message.
    fn dispatch(&mut self, command: Command) -> Option<Outcome> {
        let refilters = command.refilters();
        match self.session.execute(command) {
            Ok(outcome) => {
                if refilters {
                    self.status.clear_message();
                }
                Some(outcome)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    fn report(&mut self, err: &LogscopeError) {
        if err.is_user_input() {
            debug!("rejected action: {err}");
        } else {
            warn!("action failed: {err}");
        }
        self.status.error(err.to_string());
    }
}
