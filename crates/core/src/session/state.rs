use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Location, Ship};

/// Why a purchase attempt was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The named ship is not in the catalog. Unreachable through the menu
    /// path, which only ever offers catalog names.
    #[error("no ship named {name} is for sale")]
    UnknownShip {
        /// The name that matched nothing.
        name: String,
    },
    /// The player cannot afford the ship. The session state is unchanged.
    #[error("not enough credits for {name}: costs {cost}, have {credits}")]
    InsufficientCredits {
        /// Name of the ship the player tried to buy.
        name: String,
        /// Its purchase price.
        cost: u32,
        /// The player's balance at the time of the attempt.
        credits: u32,
    },
}

/// The single mutable aggregate for one game session.
///
/// Created once at session start, owned exclusively by the turn loop, and
/// discarded when the session ends. Fields stay private so the only credit
/// sink is [`GameState::purchase`] and ship names remain unique across the
/// catalog and the fleet.
#[derive(Debug, Clone)]
pub struct GameState {
    credits: u32,
    location: Location,
    available_ships: Vec<Ship>,
    ships: Vec<Ship>,
}

impl GameState {
    /// Start a session at the office with the given loan and catalog.
    pub fn new(starting_credits: u32, catalog: Vec<Ship>) -> Self {
        Self {
            credits: starting_credits,
            location: Location::Office,
            available_ships: catalog,
            ships: Vec::new(),
        }
    }

    /// Current credit balance.
    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Where the player currently is.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Ships still for sale, in catalog order.
    pub fn available_ships(&self) -> &[Ship] {
        &self.available_ships
    }

    /// Ships the player owns, in purchase order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Move the player to another location.
    pub fn navigate(&mut self, destination: Location) {
        if self.location != destination {
            info!(from = ?self.location, to = ?destination, "Location changed");
        }
        self.location = destination;
    }

    /// Buy the named ship from the catalog.
    ///
    /// On success the price is deducted, the ship moves from the catalog to
    /// the end of the fleet, and a copy of its record is returned. On any
    /// error the state is untouched.
    pub fn purchase(&mut self, name: &str) -> Result<Ship, PurchaseError> {
        let index = self
            .available_ships
            .iter()
            .position(|ship| ship.name == name)
            .ok_or_else(|| PurchaseError::UnknownShip {
                name: name.to_string(),
            })?;
        let cost = self.available_ships[index].cost;
        if self.credits < cost {
            debug!(ship = %name, cost, credits = self.credits, "Purchase rejected");
            return Err(PurchaseError::InsufficientCredits {
                name: name.to_string(),
                cost,
                credits: self.credits,
            });
        }

        let ship = self.available_ships.remove(index);
        self.credits -= cost;
        self.ships.push(ship.clone());
        info!(ship = %ship.name, cost, credits = self.credits, "Ship purchased");
        Ok(ship)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::starting_catalog;

    fn new_session() -> GameState {
        GameState::new(1_000, starting_catalog())
    }

    #[test]
    fn purchase_deducts_and_transfers() {
        let mut state = new_session();
        let bought = state.purchase("Cordo ST-9").expect("affordable ship");

        assert_eq!(bought.name, "Cordo ST-9");
        assert_eq!(state.credits(), 150);
        assert_eq!(state.ships().len(), 1);
        assert_eq!(state.ships()[0].name, "Cordo ST-9");
        assert!(state
            .available_ships()
            .iter()
            .all(|ship| ship.name != "Cordo ST-9"));
    }

    #[test]
    fn insufficient_credits_is_a_no_op() {
        let mut state = new_session();
        state.purchase("Cordo ST-9").expect("affordable ship");
        let before = state.clone();

        let err = state.purchase("Cordo ST-13").unwrap_err();
        assert_eq!(
            err,
            PurchaseError::InsufficientCredits {
                name: "Cordo ST-13".to_string(),
                cost: 950,
                credits: 150,
            }
        );
        assert_eq!(state.credits(), before.credits());
        assert_eq!(state.available_ships(), before.available_ships());
        assert_eq!(state.ships(), before.ships());
    }

    #[test]
    fn unknown_ship_is_rejected() {
        let mut state = new_session();
        let err = state.purchase("Cordo ST-99").unwrap_err();
        assert_eq!(
            err,
            PurchaseError::UnknownShip {
                name: "Cordo ST-99".to_string(),
            }
        );
        assert_eq!(state.credits(), 1_000);
        assert_eq!(state.available_ships().len(), 2);
    }

    #[test]
    fn names_stay_disjoint_across_purchases() {
        let mut state = GameState::new(10_000, starting_catalog());
        state.purchase("Cordo ST-9").expect("affordable ship");
        state.purchase("Cordo ST-13").expect("affordable ship");

        assert!(state.available_ships().is_empty());
        assert_eq!(state.ships().len(), 2);
        for owned in state.ships() {
            assert!(state
                .available_ships()
                .iter()
                .all(|ship| ship.name != owned.name));
        }
    }

    #[test]
    fn navigation_only_changes_location() {
        let mut state = new_session();
        state.navigate(Location::Shop);
        assert_eq!(state.location(), Location::Shop);
        assert_eq!(state.credits(), 1_000);
        state.navigate(Location::Office);
        assert_eq!(state.location(), Location::Office);
    }
}
