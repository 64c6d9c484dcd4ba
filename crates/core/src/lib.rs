#![warn(clippy::all, missing_docs)]

//! Core domain logic for the Space Transport game.
//!
//! This crate hosts the data models, the ship catalog, configuration
//! handling, the session state with its purchase operation, and the
//! turn loop that drives a session through the console capabilities
//! supplied by the terminal frontend (or a scripted console in tests).

pub mod catalog;
pub mod config;
pub mod console;
pub mod models;
pub mod session;
pub mod turn;

pub use config::AppConfig;
pub use console::{Console, Menu, MenuAction, MenuEntry, TextStyle};
pub use models::{Location, Ship};
pub use session::{GameState, PurchaseError};
pub use turn::GameLoop;
