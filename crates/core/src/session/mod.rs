//! Session state and the purchase operation.

mod state;

pub use state::{GameState, PurchaseError};
