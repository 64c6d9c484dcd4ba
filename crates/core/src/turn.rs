//! The turn loop: render, choose, mutate, transition, pause.
//!
//! One turn is a full cycle of the loop. The driver owns the session state
//! and a [`Console`]; everything the player sees or selects goes through
//! that capability, so the loop itself stays free of terminal concerns.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::console::{Console, Menu, MenuAction, MenuEntry, TextStyle};
use crate::models::Location;
use crate::session::{GameState, PurchaseError};

/// Menu label for heading to the shop.
pub const GO_TO_SHOP: &str = "Go to Mike's Used Spaceships";
/// Menu label for heading to the hangar.
pub const GO_TO_HANGAR: &str = "Go to the hangar";
/// Menu label for returning to the office.
pub const GO_TO_OFFICE: &str = "Go to your office";
/// Menu label for asking to end the session.
pub const EXIT_GAME: &str = "Exit game";

const OFFICE_PROMPT: &str = "What would you like to do?";
const SHOP_PROMPT: &str = "Which would you like to purchase?";
const EXIT_PROMPT: &str = "Are you sure you want to exit?";

/// Build the menu for the player's current location.
///
/// Every entry carries its resolved [`MenuAction`], so a ship name can only
/// ever mean a purchase and the navigation labels can only ever mean a move.
pub fn menu_for(state: &GameState) -> Menu {
    match state.location() {
        Location::Office => Menu::new(
            OFFICE_PROMPT,
            vec![
                MenuEntry::new(GO_TO_SHOP, MenuAction::Navigate(Location::Shop)),
                MenuEntry::new(GO_TO_HANGAR, MenuAction::Navigate(Location::Hangar)),
                MenuEntry::new(EXIT_GAME, MenuAction::ExitGame),
            ],
        ),
        Location::Shop => {
            let mut entries: Vec<MenuEntry> = state
                .available_ships()
                .iter()
                .map(|ship| {
                    MenuEntry::new(ship.name.clone(), MenuAction::Purchase(ship.name.clone()))
                })
                .collect();
            entries.push(MenuEntry::new(
                GO_TO_OFFICE,
                MenuAction::Navigate(Location::Office),
            ));
            Menu::new(SHOP_PROMPT, entries)
        }
        Location::Hangar => Menu::new(
            OFFICE_PROMPT,
            vec![MenuEntry::new(
                GO_TO_OFFICE,
                MenuAction::Navigate(Location::Office),
            )],
        ),
    }
}

enum TurnOutcome {
    Continue,
    Exited,
}

/// Turn-based driver for one game session.
///
/// Owns the [`GameState`] for the lifetime of the session and mutates it in
/// place; the only way out of [`GameLoop::run`] is the player's confirmed
/// exit choice.
pub struct GameLoop<C> {
    state: GameState,
    console: C,
    turn_delay: Duration,
}

impl<C: Console> GameLoop<C> {
    /// Build a driver over a fresh session and a console capability.
    pub fn new(state: GameState, console: C, turn_delay: Duration) -> Self {
        Self {
            state,
            console,
            turn_delay,
        }
    }

    /// Borrow the session state, e.g. for assertions after a run.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Tear the driver apart into its state and console.
    pub fn into_parts(self) -> (GameState, C) {
        (self.state, self.console)
    }

    /// Play turns until the player confirms the exit choice.
    pub async fn run(&mut self) -> Result<()> {
        info!(credits = self.state.credits(), "Session started");
        loop {
            match self.play_turn().await? {
                TurnOutcome::Continue => {
                    self.console.pause(self.turn_delay).await;
                }
                TurnOutcome::Exited => {
                    info!(
                        credits = self.state.credits(),
                        fleet = self.state.ships().len(),
                        "Session ended"
                    );
                    return Ok(());
                }
            }
        }
    }

    async fn play_turn(&mut self) -> Result<TurnOutcome> {
        self.render_location()?;

        let menu = menu_for(&self.state);
        let action = self.console.choose(&menu).await?;
        debug!(?action, location = ?self.state.location(), "Turn selection");

        if let MenuAction::Purchase(name) = &action {
            self.attempt_purchase(name)?;
        }

        match action {
            MenuAction::ExitGame => {
                if self.console.confirm(EXIT_PROMPT).await? {
                    return Ok(TurnOutcome::Exited);
                }
                // Declined: stay where we are and take another turn.
            }
            MenuAction::Navigate(destination) => self.state.navigate(destination),
            MenuAction::Purchase(_) => {}
        }

        Ok(TurnOutcome::Continue)
    }

    fn attempt_purchase(&mut self, name: &str) -> Result<()> {
        match self.state.purchase(name) {
            Ok(ship) => self.console.line(
                TextStyle::Success,
                &format!(
                    "You are now the proud owner of a {} year old {}!",
                    ship.age, ship.name
                ),
            ),
            Err(PurchaseError::InsufficientCredits {
                name,
                cost,
                credits,
            }) => self.console.line(
                TextStyle::Error,
                &format!(
                    "You don't have enough money to buy the {name} for {cost}. You have {credits}."
                ),
            ),
            Err(err @ PurchaseError::UnknownShip { .. }) => {
                self.console.line(TextStyle::Error, &err.to_string())
            }
        }
    }

    fn render_location(&mut self) -> Result<()> {
        self.console.line(TextStyle::Info, "")?;
        match self.state.location() {
            Location::Office => {
                self.console.line(
                    TextStyle::Info,
                    "You are at your office. Your desk is bare and your inbox is empty.",
                )?;
            }
            Location::Shop => self.render_shop()?,
            Location::Hangar => self.render_hangar()?,
        }
        self.console.line(TextStyle::Info, "")?;
        self.console.line(
            TextStyle::Info,
            &format!("You have {} credits.", self.state.credits()),
        )?;
        Ok(())
    }

    fn render_shop(&mut self) -> Result<()> {
        self.console.line(
            TextStyle::Info,
            "You are at Mike's Used Spaceships, a dimly lit and busy store. Mike, a small and",
        )?;
        self.console.line(
            TextStyle::Info,
            "stressed-looking man, is busily working at a computer. He shouts over his shoulder,",
        )?;
        self.console.line(
            TextStyle::Info,
            "\"Let me know if you see something you like!\" and keeps typing away furiously.",
        )?;
        self.console.line(TextStyle::Info, "")?;
        self.console.line(
            TextStyle::Info,
            "A large screen with a crack running through it shows the available spaceships.",
        )?;

        let on_sale = self.state.available_ships().to_vec();
        for ship in &on_sale {
            self.console.line(TextStyle::Info, "")?;
            self.console
                .line(TextStyle::Accent, &format!("FOR SALE: {}", ship.name))?;
            self.console
                .line(TextStyle::Info, &format!("Cost: {}", ship.cost))?;
            self.console.line(
                TextStyle::Warning,
                &format!("Maintenance Cost: {}", ship.maintenance_cost),
            )?;
            self.console.line(
                TextStyle::Info,
                &format!(
                    "Age: {} Speed: {} Max Passengers: {} Max Cargo: {}",
                    ship.age, ship.speed, ship.max_passengers, ship.max_cargo
                ),
            )?;
            self.console.line(TextStyle::Muted, &ship.description)?;
        }
        Ok(())
    }

    fn render_hangar(&mut self) -> Result<()> {
        self.console
            .line(TextStyle::Info, "You are in the hangar.")?;
        if self.state.ships().is_empty() {
            self.console.line(
                TextStyle::Muted,
                "It is empty. You don't own a single ship yet.",
            )?;
            return Ok(());
        }
        self.console
            .line(TextStyle::Info, "Your fleet sits on the pads:")?;
        let fleet = self.state.ships().to_vec();
        for ship in &fleet {
            self.console.line(
                TextStyle::Accent,
                &format!(
                    "{} - age {}, speed {}, {} passengers, {} cargo, upkeep {}/turn",
                    ship.name,
                    ship.age,
                    ship.speed,
                    ship.max_passengers,
                    ship.max_cargo,
                    ship.maintenance_cost
                ),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::starting_catalog;
    use anyhow::anyhow;
    use std::collections::VecDeque;

    /// Console that follows a fixed script of menu labels and confirmation
    /// answers, recording every rendered line.
    struct ScriptedConsole {
        selections: VecDeque<&'static str>,
        confirmations: VecDeque<bool>,
        lines: Vec<(TextStyle, String)>,
    }

    impl ScriptedConsole {
        fn new(selections: Vec<&'static str>, confirmations: Vec<bool>) -> Self {
            Self {
                selections: selections.into(),
                confirmations: confirmations.into(),
                lines: Vec::new(),
            }
        }

        fn rendered(&self, style: TextStyle) -> Vec<&str> {
            self.lines
                .iter()
                .filter(|(s, _)| *s == style)
                .map(|(_, text)| text.as_str())
                .collect()
        }
    }

    impl Console for ScriptedConsole {
        fn line(&mut self, style: TextStyle, text: &str) -> Result<()> {
            self.lines.push((style, text.to_string()));
            Ok(())
        }

        async fn choose(&mut self, menu: &Menu) -> Result<MenuAction> {
            let label = self
                .selections
                .pop_front()
                .ok_or_else(|| anyhow!("selection script exhausted"))?;
            let entry = menu
                .entries
                .iter()
                .find(|entry| entry.label == label)
                .ok_or_else(|| anyhow!("label {label:?} was not offered"))?;
            Ok(entry.action.clone())
        }

        async fn confirm(&mut self, _prompt: &str) -> Result<bool> {
            self.confirmations
                .pop_front()
                .ok_or_else(|| anyhow!("confirmation script exhausted"))
        }

        async fn pause(&mut self, _delay: Duration) {}
    }

    fn new_loop(selections: Vec<&'static str>, confirmations: Vec<bool>) -> GameLoop<ScriptedConsole> {
        GameLoop::new(
            GameState::new(1_000, starting_catalog()),
            ScriptedConsole::new(selections, confirmations),
            Duration::ZERO,
        )
    }

    #[test]
    fn office_menu_is_ordered() {
        let state = GameState::new(1_000, starting_catalog());
        let menu = menu_for(&state);
        let labels: Vec<&str> = menu.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec![GO_TO_SHOP, GO_TO_HANGAR, EXIT_GAME]);
    }

    #[test]
    fn shop_menu_lists_ships_then_office() {
        let mut state = GameState::new(1_000, starting_catalog());
        state.navigate(Location::Shop);
        let menu = menu_for(&state);
        let labels: Vec<&str> = menu.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Cordo ST-9", "Cordo ST-13", GO_TO_OFFICE]);
        assert_eq!(
            menu.entries[0].action,
            MenuAction::Purchase("Cordo ST-9".to_string())
        );
        assert_eq!(
            menu.entries[2].action,
            MenuAction::Navigate(Location::Office)
        );
    }

    #[test]
    fn empty_shop_still_offers_the_way_out() {
        let mut state = GameState::new(10_000, starting_catalog());
        state.purchase("Cordo ST-9").expect("affordable");
        state.purchase("Cordo ST-13").expect("affordable");
        state.navigate(Location::Shop);
        let menu = menu_for(&state);
        assert_eq!(menu.entries.len(), 1);
        assert_eq!(menu.entries[0].label, GO_TO_OFFICE);
    }

    #[tokio::test]
    async fn full_session_scenario() -> Result<()> {
        // Buy the ST-9, fail on the ST-13, walk back, exit.
        let mut game = new_loop(
            vec![
                GO_TO_SHOP,
                "Cordo ST-9",
                "Cordo ST-13",
                GO_TO_OFFICE,
                EXIT_GAME,
            ],
            vec![true],
        );
        game.run().await?;

        let (state, console) = game.into_parts();
        assert_eq!(state.credits(), 150);
        assert_eq!(state.ships().len(), 1);
        assert_eq!(state.ships()[0].name, "Cordo ST-9");
        assert_eq!(state.available_ships().len(), 1);
        assert_eq!(state.available_ships()[0].name, "Cordo ST-13");
        assert_eq!(state.location(), Location::Office);

        let successes = console.rendered(TextStyle::Success);
        assert_eq!(
            successes,
            vec!["You are now the proud owner of a 28 year old Cordo ST-9!"]
        );
        let errors = console.rendered(TextStyle::Error);
        assert_eq!(
            errors,
            vec!["You don't have enough money to buy the Cordo ST-13 for 950. You have 150."]
        );
        Ok(())
    }

    #[tokio::test]
    async fn declined_exit_keeps_the_session_alive() -> Result<()> {
        let mut game = new_loop(vec![EXIT_GAME, EXIT_GAME], vec![false, true]);
        game.run().await?;
        assert_eq!(game.state().location(), Location::Office);
        assert_eq!(game.state().credits(), 1_000);
        Ok(())
    }

    #[tokio::test]
    async fn failed_purchase_keeps_the_player_in_the_shop() -> Result<()> {
        let mut game = GameLoop::new(
            GameState::new(100, starting_catalog()),
            ScriptedConsole::new(
                vec![GO_TO_SHOP, "Cordo ST-9", GO_TO_OFFICE, EXIT_GAME],
                vec![true],
            ),
            Duration::ZERO,
        );
        game.run().await?;

        let (state, console) = game.into_parts();
        assert_eq!(state.credits(), 100);
        assert!(state.ships().is_empty());
        assert_eq!(state.available_ships().len(), 2);
        assert_eq!(console.rendered(TextStyle::Success).len(), 0);
        assert_eq!(console.rendered(TextStyle::Error).len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn hangar_shows_the_fleet_and_returns_to_office() -> Result<()> {
        let mut game = new_loop(
            vec![
                GO_TO_SHOP,
                "Cordo ST-9",
                GO_TO_OFFICE,
                GO_TO_HANGAR,
                GO_TO_OFFICE,
                EXIT_GAME,
            ],
            vec![true],
        );
        game.run().await?;

        let (state, console) = game.into_parts();
        assert_eq!(state.location(), Location::Office);
        let fleet_lines = console.rendered(TextStyle::Accent);
        assert!(fleet_lines
            .iter()
            .any(|line| line.starts_with("Cordo ST-9 - age 28")));
        Ok(())
    }

    #[tokio::test]
    async fn empty_hangar_says_so() -> Result<()> {
        let mut game = new_loop(vec![GO_TO_HANGAR, GO_TO_OFFICE, EXIT_GAME], vec![true]);
        game.run().await?;
        let (_, console) = game.into_parts();
        let muted = console.rendered(TextStyle::Muted);
        assert!(muted
            .iter()
            .any(|line| line.contains("don't own a single ship")));
        Ok(())
    }
}
