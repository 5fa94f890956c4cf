//! # ridebot-core
//!
//! Core types and traits for the booking bot: [`Bot`], [`Handler`], [`Middleware`],
//! inbound/outbound message types, error types, and tracing initialization.
//! Transport-agnostic; used by ridebot-chain, ridebot-engine and ridebot-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{HandlerError, Result, RideError};
pub use logger::init_tracing;
pub use types::{Handler, HandlerResponse, Message, Middleware, OutboundMessage};
