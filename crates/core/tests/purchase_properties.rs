use proptest::prelude::*;
use st_core::models::Ship;
use st_core::session::{GameState, PurchaseError};

fn ship(index: usize, cost: u32) -> Ship {
    Ship {
        name: format!("Hull {index}"),
        description: format!("Test hull number {index}."),
        max_passengers: 4,
        max_cargo: 50,
        age: 10,
        speed: 12,
        maintenance_cost: 5,
        cost,
    }
}

proptest! {
    /// Property: an affordable purchase conserves credits plus price and
    /// moves exactly one ship from the catalog to the fleet.
    #[test]
    fn purchase_deducts_and_transfers(credits in 0u32..10_000, cost in 0u32..10_000) {
        prop_assume!(credits >= cost);
        let mut state = GameState::new(credits, vec![ship(0, cost)]);

        let bought = state.purchase("Hull 0").expect("affordable purchase must succeed");

        prop_assert_eq!(bought.cost, cost);
        prop_assert_eq!(state.credits() + cost, credits);
        prop_assert_eq!(state.ships().len(), 1);
        prop_assert!(state.available_ships().is_empty());
    }

    /// Property: an unaffordable purchase changes nothing at all.
    #[test]
    fn insufficient_credits_is_a_strict_no_op(credits in 0u32..10_000, cost in 1u32..10_000) {
        prop_assume!(credits < cost);
        let mut state = GameState::new(credits, vec![ship(0, cost)]);

        let err = state.purchase("Hull 0").expect_err("unaffordable purchase must fail");

        prop_assert_eq!(err, PurchaseError::InsufficientCredits {
            name: "Hull 0".to_string(),
            cost,
            credits,
        });
        prop_assert_eq!(state.credits(), credits);
        prop_assert_eq!(state.available_ships().len(), 1);
        prop_assert!(state.ships().is_empty());
    }

    /// Property: across any purchase sequence, catalog and fleet names stay
    /// pairwise distinct and disjoint, and credits only ever go down by the
    /// price of what was actually bought.
    #[test]
    fn catalog_and_fleet_stay_disjoint(
        credits in 0u32..5_000,
        costs in prop::collection::vec(0u32..2_000, 1..6),
        picks in prop::collection::vec(0usize..6, 0..12),
    ) {
        let catalog: Vec<Ship> = costs
            .iter()
            .enumerate()
            .map(|(index, &cost)| ship(index, cost))
            .collect();
        let total = catalog.len();
        let mut state = GameState::new(credits, catalog);
        let mut spent = 0u32;

        for pick in picks {
            let name = format!("Hull {}", pick % total);
            if let Ok(bought) = state.purchase(&name) {
                spent += bought.cost;
            }
        }

        prop_assert_eq!(state.credits() + spent, credits);
        prop_assert_eq!(state.ships().len() + state.available_ships().len(), total);
        for owned in state.ships() {
            prop_assert!(state
                .available_ships()
                .iter()
                .all(|remaining| remaining.name != owned.name));
        }
        let mut names: Vec<&str> = state
            .ships()
            .iter()
            .chain(state.available_ships())
            .map(|entry| entry.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), total);
    }
}
