//! Core of a small arcade shooter: the player fires twin bullets upward at
//! enemies that drop in from the top of the field at a fixed cadence.
//!
//! Nothing in this library touches the terminal. Hosts feed commands into a
//! [`session::GameSession`] and render the [`session::Snapshot`] it returns.

pub mod commands;
pub mod compute;
pub mod config;
pub mod entities;
pub mod scheduler;
pub mod session;
pub mod store;
