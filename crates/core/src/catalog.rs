//! The fixed starting catalog.

use crate::models::Ship;

/// Ships on sale when a session begins.
///
/// The catalog is static: nothing restocks it, and each ship can be bought
/// exactly once per session.
pub fn starting_catalog() -> Vec<Ship> {
    vec![
        Ship {
            name: "Cordo ST-9".to_string(),
            description: "In its heyday, the Cordo ST-9 was the pride of the fleet. \
                          These days, most ST-9s have been retired. Slow, low capacity, \
                          and expensive to maintain."
                .to_string(),
            max_passengers: 8,
            max_cargo: 100,
            age: 28,
            speed: 10,
            maintenance_cost: 25,
            cost: 850,
        },
        Ship {
            name: "Cordo ST-13".to_string(),
            description: "The ST-13 is an improved version of the ST-9, but design flaws \
                          doomed it from the start. You can get a bargain, but be prepared \
                          for a headache."
                .to_string(),
            max_passengers: 12,
            max_cargo: 150,
            age: 24,
            speed: 14,
            maintenance_cost: 35,
            cost: 950,
        },
    ]
}
