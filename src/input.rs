//! Terminal input: raw event collection and the key state machine.

pub mod raw;
pub mod service;

// Modules outside this crate should prefer importing from `crate::input` rather than
// reaching into submodules.
pub use service::{
    InputAction, InputService, InputState, InputStateMachine, PromptKind, ScrollDirection,
};
