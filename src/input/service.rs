//! High-level input service.
//!
//! Consumes coalesced raw events, runs the key state machine, and yields domain-level
//! `InputAction`s that the application maps onto session commands.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Direction for scroll actions emitted by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Text prompts shown on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    MassSearch,
    ReplaceFind,
    ReplaceWith,
    Import,
}

impl PromptKind {
    /// Label displayed before the prompt buffer.
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Search => "/",
            PromptKind::MassSearch => "mass search: ",
            PromptKind::ReplaceFind => "find: ",
            PromptKind::ReplaceWith => "replace with: ",
            PromptKind::Import => "open file: ",
        }
    }
}

/// Current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Navigation,
    Prompt(PromptKind),
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Scroll {
        direction: ScrollDirection,
        lines: u64,
    },
    PageUp,
    PageDown,
    GoToStart,
    GoToEnd,
    NextSource,
    PreviousSource,
    CloseSource,
    ToggleChecked,
    ToggleErrorOnly,
    Export,
    StartPrompt(PromptKind),
    UpdatePrompt {
        kind: PromptKind,
        buffer: String,
    },
    CancelPrompt,
    /// Enter pressed in a single-field prompt
    Submit {
        kind: PromptKind,
        text: String,
    },
    /// Both replace fields entered
    Replace {
        find: String,
        replace: String,
    },
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
    NoAction,
    InvalidInput,
}

fn plain(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Key state machine: `less`-style navigation plus status-line prompts.
pub struct InputStateMachine {
    state: InputState,
    buffer: String,
    /// Find text held while the replacement is being typed
    pending_find: Option<String>,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Navigation,
            buffer: String::new(),
            pending_find: None,
        }
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Pre-fill the open prompt, e.g. with the term that produced the current view.
    pub fn seed_prompt(&mut self, text: &str) -> Option<InputAction> {
        let InputState::Prompt(kind) = self.state else {
            return None;
        };
        self.buffer = text.to_string();
        Some(InputAction::UpdatePrompt {
            kind,
            buffer: self.buffer.clone(),
        })
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }
        match self.state {
            InputState::Navigation => self.handle_navigation(key_event),
            InputState::Prompt(kind) => self.handle_prompt(kind, key_event),
        }
    }

    fn handle_navigation(&mut self, key_event: KeyEvent) -> InputAction {
        let modifiers = key_event.modifiers;
        match key_event.code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
            KeyCode::Char('j') if plain(modifiers) => InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            },
            KeyCode::Down => InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            },
            KeyCode::Char('k') if plain(modifiers) => InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            },
            KeyCode::Up => InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            },
            KeyCode::Char(' ') | KeyCode::Char('f') if plain(modifiers) => InputAction::PageDown,
            KeyCode::PageDown => InputAction::PageDown,
            KeyCode::Char('b') if plain(modifiers) => InputAction::PageUp,
            KeyCode::PageUp => InputAction::PageUp,
            KeyCode::Char('g') if plain(modifiers) => InputAction::GoToStart,
            KeyCode::Home => InputAction::GoToStart,
            KeyCode::Char('G') if plain(modifiers) => InputAction::GoToEnd,
            KeyCode::End => InputAction::GoToEnd,
            KeyCode::Tab => InputAction::NextSource,
            KeyCode::BackTab => InputAction::PreviousSource,
            KeyCode::Char('x') if plain(modifiers) => InputAction::CloseSource,
            KeyCode::Char('c') if plain(modifiers) => InputAction::ToggleChecked,
            KeyCode::Char('e') if plain(modifiers) => InputAction::ToggleErrorOnly,
            KeyCode::Char('s') if plain(modifiers) => InputAction::Export,
            KeyCode::Char('q') if plain(modifiers) => InputAction::Quit,
            KeyCode::Char('/') if plain(modifiers) => self.start_prompt(PromptKind::Search),
            KeyCode::Char('m') if plain(modifiers) => self.start_prompt(PromptKind::MassSearch),
            KeyCode::Char('r') if plain(modifiers) => self.start_prompt(PromptKind::ReplaceFind),
            KeyCode::Char('o') if plain(modifiers) => self.start_prompt(PromptKind::Import),
            _ => InputAction::InvalidInput,
        }
    }

    fn handle_prompt(&mut self, kind: PromptKind, key_event: KeyEvent) -> InputAction {
        match key_event.code {
            KeyCode::Esc => self.cancel(),
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cancel()
            }
            KeyCode::Char(ch) if plain(key_event.modifiers) => {
                self.buffer.push(ch);
                InputAction::UpdatePrompt {
                    kind,
                    buffer: self.buffer.clone(),
                }
            }
            KeyCode::Backspace => {
                if self.buffer.pop().is_none() {
                    return self.cancel();
                }
                InputAction::UpdatePrompt {
                    kind,
                    buffer: self.buffer.clone(),
                }
            }
            KeyCode::Enter => self.submit(kind),
            _ => InputAction::NoAction,
        }
    }

    fn start_prompt(&mut self, kind: PromptKind) -> InputAction {
        self.state = InputState::Prompt(kind);
        self.buffer.clear();
        InputAction::StartPrompt(kind)
    }

    fn submit(&mut self, kind: PromptKind) -> InputAction {
        let text = std::mem::take(&mut self.buffer);
        match kind {
            PromptKind::ReplaceFind => {
                self.pending_find = Some(text);
                self.start_prompt(PromptKind::ReplaceWith)
            }
            PromptKind::ReplaceWith => {
                self.state = InputState::Navigation;
                InputAction::Replace {
                    find: self.pending_find.take().unwrap_or_default(),
                    replace: text,
                }
            }
            _ => {
                self.state = InputState::Navigation;
                InputAction::Submit { kind, text }
            }
        }
    }

    fn cancel(&mut self) -> InputAction {
        self.state = InputState::Navigation;
        self.buffer.clear();
        self.pending_find = None;
        InputAction::CancelPrompt
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new(mouse_scroll_lines: u64) -> Self {
        Self {
            state_machine: InputStateMachine::new(),
            raw_input: RawInputCollector::new(mouse_scroll_lines),
        }
    }

    pub fn state_machine(&self) -> &InputStateMachine {
        &self.state_machine
    }

    pub fn seed_prompt(&mut self, text: &str) -> Option<InputAction> {
        self.state_machine.seed_prompt(text)
    }

    /// Poll the terminal once and drain everything that became ready.
    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();
        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(self.process_raw_event(raw_event));
            while let Some(extra_event) = self.raw_input.try_flush() {
                actions.extend(self.process_raw_event(extra_event));
            }
        }
        Ok(actions)
    }

    /// Feed an event without touching the terminal.
    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        self.raw_input.process_event(event);
        let mut actions = Vec::new();
        while let Some(raw_event) = self.raw_input.try_flush() {
            actions.extend(self.process_raw_event(raw_event));
        }
        actions
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Scroll { direction, lines } => {
                // Wheel scrolling is ignored while typing into a prompt
                if self.state_machine.state() != InputState::Navigation {
                    return None;
                }
                InputAction::Scroll { direction, lines }
            }
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}
