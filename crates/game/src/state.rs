//! Game state machine: Normal, Superhuman and GameOver.
//!
//! Normal is the initial mode. A power-up pickup enters Superhuman for a
//! tick-counted duration; expiry returns to Normal. A creature reaching the
//! player in Normal mode ends the game, and GameOver is absorbing: nothing
//! here changes once it is entered.

use engine_core::{CharacterStyle, SceneGraph};

use crate::config::GameConfig;
use crate::creature::{set_all_behavior, Behavior};
use crate::registry::EntityRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Normal,
    Superhuman,
    GameOver,
}

/// A mode change reported by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    EnteredSuperhuman,
    /// Pickup while already superhuman; the countdown restarted.
    Refreshed,
    ReturnedToNormal,
    GameOver,
}

/// Mode-dependent multipliers and durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTuning {
    pub move_speed: f32,
    pub superhuman_speed_multiplier: f32,
    pub superhuman_scale: f32,
    pub character_radius: f32,
    pub normal_bubble_multiplier: f32,
    pub superhuman_bubble_multiplier: f32,
    pub superhuman_ticks: u32,
    pub tick_rate: u32,
}

impl From<&GameConfig> for ModeTuning {
    fn from(config: &GameConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            superhuman_speed_multiplier: config.superhuman_speed_multiplier,
            superhuman_scale: config.superhuman_scale,
            character_radius: config.character_radius,
            normal_bubble_multiplier: config.normal_bubble_multiplier,
            superhuman_bubble_multiplier: config.superhuman_bubble_multiplier,
            superhuman_ticks: config.superhuman_ticks(),
            tick_rate: config.tick_rate,
        }
    }
}

pub struct GameStateMachine {
    mode: GameMode,
    /// Ticks of superhuman time left; zero outside Superhuman.
    remaining_ticks: u32,
    score: u32,
    tuning: ModeTuning,
}

impl GameStateMachine {
    pub fn new(tuning: ModeTuning) -> Self {
        Self {
            mode: GameMode::Normal,
            remaining_ticks: 0,
            score: 0,
            tuning,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_game_over(&self) -> bool {
        self.mode == GameMode::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    /// Whole seconds of superhuman time left, rounded up.
    pub fn countdown_secs(&self) -> Option<u32> {
        (self.mode == GameMode::Superhuman)
            .then(|| self.remaining_ticks.div_ceil(self.tuning.tick_rate.max(1)))
    }

    /// Character movement per tick in the current mode.
    pub fn move_speed(&self) -> f32 {
        match self.mode {
            GameMode::Superhuman => self.tuning.move_speed * self.tuning.superhuman_speed_multiplier,
            _ => self.tuning.move_speed,
        }
    }

    /// Creature interaction radius in the current mode.
    pub fn bubble_radius(&self) -> f32 {
        let multiplier = match self.mode {
            GameMode::Superhuman => self.tuning.superhuman_bubble_multiplier,
            _ => self.tuning.normal_bubble_multiplier,
        };
        self.tuning.character_radius * multiplier
    }

    /// Behavior every creature should have in the current mode.
    pub fn creature_behavior(&self) -> Behavior {
        match self.mode {
            GameMode::Superhuman => Behavior::Fleeing,
            _ => Behavior::Pursuing,
        }
    }

    pub fn character_style(&self) -> CharacterStyle {
        match self.mode {
            GameMode::Superhuman => CharacterStyle {
                scale: self.tuning.superhuman_scale,
                empowered: true,
            },
            _ => CharacterStyle::default(),
        }
    }

    /// Power-up picked up. Enters Superhuman, or restarts the countdown if
    /// already there.
    pub fn power_up_collected(
        &mut self,
        registry: &mut EntityRegistry,
        scene: &mut dyn SceneGraph,
    ) -> Option<Transition> {
        match self.mode {
            GameMode::GameOver => None,
            GameMode::Superhuman => {
                self.remaining_ticks = self.tuning.superhuman_ticks;
                log::debug!("Superhuman refreshed");
                Some(Transition::Refreshed)
            }
            GameMode::Normal => {
                self.mode = GameMode::Superhuman;
                self.remaining_ticks = self.tuning.superhuman_ticks;
                let flipped = set_all_behavior(registry.world_mut(), Behavior::Fleeing);
                scene.set_character_style(self.character_style());
                log::info!(
                    "Superhuman for {} ticks, {} creatures fleeing",
                    self.remaining_ticks,
                    flipped
                );
                Some(Transition::EnteredSuperhuman)
            }
        }
    }

    /// A creature reached the player. Only ends the game in Normal mode.
    pub fn creature_contact(&mut self) -> Option<Transition> {
        if self.mode != GameMode::Normal {
            return None;
        }
        self.mode = GameMode::GameOver;
        log::info!("Game over, final score {}", self.score);
        Some(Transition::GameOver)
    }

    pub fn award(&mut self, points: u32) {
        if self.mode != GameMode::GameOver {
            self.score = self.score.saturating_add(points);
        }
    }

    /// Advance the superhuman countdown by one tick.
    pub fn tick(
        &mut self,
        registry: &mut EntityRegistry,
        scene: &mut dyn SceneGraph,
    ) -> Option<Transition> {
        if self.mode != GameMode::Superhuman {
            return None;
        }
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks > 0 {
            return None;
        }
        self.mode = GameMode::Normal;
        let flipped = set_all_behavior(registry.world_mut(), Behavior::Pursuing);
        scene.set_character_style(self.character_style());
        log::info!("Superhuman expired, {} creatures pursuing again", flipped);
        Some(Transition::ReturnedToNormal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneLedger;
    use engine_core::Vec3;
    use procgen::CreatureSpawn;

    fn machine() -> GameStateMachine {
        GameStateMachine::new(ModeTuning::from(&GameConfig::default()))
    }

    fn registry_with_creatures(n: usize) -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        for i in 0..n {
            registry.spawn_creature(
                &CreatureSpawn {
                    position: Vec3::new(10.0 + i as f32, 0.0, 0.0),
                    heading: 0.0,
                },
                0.05,
                Behavior::Pursuing,
            );
        }
        registry
    }

    fn behaviors(registry: &EntityRegistry) -> Vec<Behavior> {
        registry
            .creature_positions()
            .into_iter()
            .filter_map(|(e, _)| registry.creature(e))
            .map(|c| c.behavior)
            .collect()
    }

    #[test]
    fn starts_normal() {
        let state = machine();
        assert_eq!(state.mode(), GameMode::Normal);
        assert_eq!(state.score(), 0);
        assert_eq!(state.countdown_secs(), None);
        assert_eq!(state.bubble_radius(), 1.0);
        assert_eq!(state.move_speed(), 0.1);
    }

    #[test]
    fn pickup_enters_superhuman() {
        let mut state = machine();
        let mut registry = registry_with_creatures(4);
        let mut scene = SceneLedger::new();

        let transition = state.power_up_collected(&mut registry, &mut scene);
        assert_eq!(transition, Some(Transition::EnteredSuperhuman));
        assert_eq!(state.mode(), GameMode::Superhuman);
        assert!((state.move_speed() - 0.2).abs() < 1e-6);
        assert_eq!(state.bubble_radius(), 2.0);
        assert_eq!(state.countdown_secs(), Some(10));
        assert!(behaviors(&registry).iter().all(|b| *b == Behavior::Fleeing));
        assert_eq!(scene.character_style(), CharacterStyle { scale: 2.0, empowered: true });
    }

    #[test]
    fn superhuman_expires_after_six_hundred_ticks() {
        let mut state = machine();
        let mut registry = registry_with_creatures(3);
        let mut scene = SceneLedger::new();
        state.power_up_collected(&mut registry, &mut scene);

        for _ in 0..599 {
            assert_eq!(state.tick(&mut registry, &mut scene), None);
        }
        assert_eq!(state.mode(), GameMode::Superhuman);
        assert_eq!(state.countdown_secs(), Some(1));

        assert_eq!(state.tick(&mut registry, &mut scene), Some(Transition::ReturnedToNormal));
        assert_eq!(state.mode(), GameMode::Normal);
        assert_eq!(state.move_speed(), 0.1);
        assert_eq!(state.bubble_radius(), 1.0);
        assert!(behaviors(&registry).iter().all(|b| *b == Behavior::Pursuing));
        assert_eq!(scene.character_style(), CharacterStyle::default());
    }

    #[test]
    fn countdown_rounds_up_to_whole_seconds() {
        let mut state = machine();
        let mut registry = EntityRegistry::new();
        let mut scene = SceneLedger::new();
        state.power_up_collected(&mut registry, &mut scene);
        state.tick(&mut registry, &mut scene);
        assert_eq!(state.countdown_secs(), Some(10));
        for _ in 0..59 {
            state.tick(&mut registry, &mut scene);
        }
        assert_eq!(state.remaining_ticks(), 540);
        assert_eq!(state.countdown_secs(), Some(9));
    }

    #[test]
    fn second_pickup_refreshes_without_stacking() {
        let mut state = machine();
        let mut registry = EntityRegistry::new();
        let mut scene = SceneLedger::new();
        state.power_up_collected(&mut registry, &mut scene);
        for _ in 0..300 {
            state.tick(&mut registry, &mut scene);
        }
        assert_eq!(
            state.power_up_collected(&mut registry, &mut scene),
            Some(Transition::Refreshed)
        );
        assert_eq!(state.remaining_ticks(), 600);
        assert!((state.move_speed() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn contact_only_ends_game_in_normal_mode() {
        let mut state = machine();
        let mut registry = EntityRegistry::new();
        let mut scene = SceneLedger::new();
        state.power_up_collected(&mut registry, &mut scene);
        assert_eq!(state.creature_contact(), None);
        assert_eq!(state.mode(), GameMode::Superhuman);

        let mut state = machine();
        assert_eq!(state.creature_contact(), Some(Transition::GameOver));
        assert!(state.is_game_over());
    }

    #[test]
    fn game_over_is_absorbing() {
        let mut state = machine();
        let mut registry = registry_with_creatures(2);
        let mut scene = SceneLedger::new();
        state.award(50);
        state.creature_contact();

        assert_eq!(state.power_up_collected(&mut registry, &mut scene), None);
        assert_eq!(state.tick(&mut registry, &mut scene), None);
        assert_eq!(state.creature_contact(), None);
        state.award(100);
        assert_eq!(state.mode(), GameMode::GameOver);
        assert_eq!(state.score(), 50);
        assert!(behaviors(&registry).iter().all(|b| *b == Behavior::Pursuing));
    }
}
