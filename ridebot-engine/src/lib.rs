//! # ridebot-engine
//!
//! The dialogue engine: per-chat conversation state, the (command, step)
//! state machine that turns free-text lines into validated field assignments
//! and record-store mutations, prompt texts, and entity card rendering.

pub mod commands;
mod dialogue;
mod render;
mod session;
pub mod texts;

pub use dialogue::DialogueEngine;
pub use session::{Command, Conversation, Sessions, Step};
