//! Shared domain models.

use serde::{Deserialize, Serialize};

/// A spaceship as listed in the shop catalog.
///
/// Records are immutable once created; purchasing moves a ship from the
/// catalog into the player's fleet without changing any of its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    /// Unique name, used as the identity key for purchase matching.
    pub name: String,
    /// Flavor text shown in the shop listing.
    pub description: String,
    /// Passenger capacity.
    pub max_passengers: u32,
    /// Cargo capacity.
    pub max_cargo: u32,
    /// Age in years.
    pub age: u32,
    /// Speed rating.
    pub speed: u32,
    /// Upkeep in credits per turn. Displayed only; never deducted.
    pub maintenance_cost: u32,
    /// Purchase price in credits.
    pub cost: u32,
}

/// The player's current location, which determines the menu shown each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    /// The player's office.
    Office,
    /// Mike's Used Spaceships.
    Shop,
    /// The hangar where owned ships are kept.
    Hangar,
}

impl Location {
    /// Short user-facing name for the location.
    pub fn title(&self) -> &'static str {
        match self {
            Location::Office => "Office",
            Location::Shop => "Mike's Used Spaceships",
            Location::Hangar => "Hangar",
        }
    }
}
