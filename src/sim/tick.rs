//! Fixed timestep simulation tick
//!
//! Drives the phase state machine and runs one playing step in a fixed order:
//! timers, movement, upgrades, abilities, allies, enemies, then the end-of-tick
//! checks and spawning.

use super::autopilot;
use super::combat;
use super::entities::{move_player, tick_timers, update_allies, update_enemies};
use super::form::AbilitySlot;
use super::progression::{UpgradeIntent, try_upgrade};
use super::state::{GamePhase, GameState};
use super::wave;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal walk direction: -1, 0 or +1
    pub move_axis: f32,
    pub melee: bool,
    pub special: bool,
    pub secondary: bool,
    /// Evolve to the next form (richest affordable branch from TV Man)
    pub upgrade: bool,
    /// Evolve TV Man straight to Large Speakerman
    pub upgrade_alt: bool,
    /// Leave the menu
    pub start: bool,
    /// New session after game over or victory
    pub restart: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let input = if input.idle_mode {
        autopilot::drive(state)
    } else {
        input.clone()
    };

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.transition(GamePhase::Playing);
                state.reset();
            }
        }
        GamePhase::GameOver | GamePhase::Victory => {
            if input.restart {
                state.transition(GamePhase::Playing);
                state.reset();
            }
        }
        GamePhase::Intermission => tick_intermission(state, dt),
        GamePhase::Playing => tick_playing(state, &input, dt),
    }
}

/// Countdown between waves; timers run but the street is frozen
fn tick_intermission(state: &mut GameState, dt: f32) {
    tick_timers(state, dt);

    state.wave.intermission -= dt;
    if state.wave.intermission > 0.0 {
        return;
    }

    let next = state.wave.pending.unwrap_or(state.wave.number + 1);
    wave::start_wave(state, next);
    state.transition(GamePhase::Playing);
}

fn tick_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    tick_timers(state, dt);
    move_player(state, input.move_axis, dt);

    if input.upgrade_alt {
        try_upgrade(state, UpgradeIntent::Alternate);
    } else if input.upgrade {
        try_upgrade(state, UpgradeIntent::Primary);
    }

    for (slot, pressed) in [
        (AbilitySlot::Melee, input.melee),
        (AbilitySlot::Special, input.special),
        (AbilitySlot::Secondary, input.secondary),
    ] {
        if pressed {
            combat::activate(state, slot);
        }
    }

    update_allies(state, dt);
    update_enemies(state, dt);

    // Death wins over a simultaneous clear
    if state.player.is_dead() {
        log::info!(
            "Game over on wave {} with score {}",
            state.wave.number,
            state.score
        );
        state.transition(GamePhase::GameOver);
        return;
    }

    if state.wave.is_cleared(state.enemies.len()) {
        let cleared = state.wave.number;
        if state.wave.is_final(&state.tuning) {
            log::info!("Final wave cleared! Victory with score {}", state.score);
            state.transition(GamePhase::Victory);
        } else {
            state.wave.pending = Some(cleared + 1);
            state.wave.intermission = state.tuning.intermission_after(cleared);
            log::info!(
                "Wave {} cleared, next in {:.1}s",
                cleared,
                state.wave.intermission
            );
            state.transition(GamePhase::Intermission);
        }
        return;
    }

    let live = state.enemies.len();
    if state.wave.tick(dt, live, state.score, &state.tuning) {
        wave::spawn_enemy(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::form::Form;
    use crate::sim::state::{Archetype, District, Enemy};
    use glam::Vec2;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            SIM_DT,
        );
        state
    }

    fn push_enemy(state: &mut GameState, pos: Vec2, health: i32) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            health,
            speed: 72.0,
            archetype: Archetype::Default,
            scale: 1.0,
            contact_damage: 1,
            score_value: 1,
            stun: 0.0,
            wobble_phase: 0.0,
            wobble_amp: 2.0,
            enraged: false,
        });
    }

    #[test]
    fn test_menu_waits_for_start() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.wave.number, 0);

        let state = playing_state(12345);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.wave.number, 1);
        assert_eq!(state.wave.quota, 8);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_wave_clear_needs_empty_street() {
        let mut state = playing_state(1);
        state.wave.kills = state.wave.quota;
        push_enemy(&mut state, Vec2::new(900.0, 536.0), 3);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);

        state.enemies.clear();
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Intermission);
        assert_eq!(state.wave.pending, Some(2));
        assert!((state.wave.intermission - 2.2).abs() < 0.0001);
    }

    #[test]
    fn test_intermission_counts_down_to_next_wave() {
        let mut state = playing_state(1);
        state.wave.kills = state.wave.quota;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Intermission);

        let mut ticks = 0;
        while state.phase == GamePhase::Intermission && ticks < 200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!((131..=134).contains(&ticks), "took {} ticks", ticks);
        assert_eq!(state.wave.number, 2);
        assert_eq!(state.wave.kills, 0);
        assert_eq!(state.wave.pending, None);
    }

    #[test]
    fn test_late_intermission_is_longer() {
        let mut state = playing_state(1);
        wave::start_wave(&mut state, 6);
        state.wave.kills = state.wave.quota;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Intermission);
        assert!((state.wave.intermission - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_intermission_blocks_combat_and_spawns() {
        let mut state = playing_state(1);
        state.wave.kills = state.wave.quota;
        tick(&mut state, &TickInput::default(), SIM_DT);
        let input = TickInput {
            melee: true,
            special: true,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Intermission);
        assert_eq!(state.player.cooldown(AbilitySlot::Melee), 0.0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_player_frozen_during_intermission() {
        let mut state = playing_state(1);
        state.wave.kills = state.wave.quota;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Intermission);

        let before = state.player.pos;
        let facing = state.player.facing;
        let walk_left = TickInput {
            move_axis: -1.0,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &walk_left, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Intermission);
        assert_eq!(state.player.pos, before);
        assert_eq!(state.player.facing, facing);
    }

    #[test]
    fn test_boss_spawns_exactly_once() {
        let mut state = playing_state(5);
        wave::start_wave(&mut state, 5);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].archetype, Archetype::Saint);

        // boss gone without a kill: nothing replaces it
        state.enemies.clear();
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.enemies.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_final_wave_clear_is_victory() {
        let mut state = playing_state(2);
        wave::start_wave(&mut state, 8);
        assert_eq!(state.district, District::Street);
        state.wave.kills = state.wave.quota;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Victory);

        // terminal: only restart does anything
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.time_ticks, ticks);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.wave.number, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_contact_death_is_game_over() {
        let mut state = playing_state(3);
        state.player.health = 1;
        let p = state.player.pos;
        push_enemy(&mut state, p + Vec2::new(10.0, 0.0), 3);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_upgrade_intent() {
        let mut state = playing_state(4);
        state.score = 12;
        tick(
            &mut state,
            &TickInput {
                upgrade: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.player.form, Form::Speakerman);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_input_punch_kills() {
        let mut state = playing_state(4);
        let p = state.player.pos;
        push_enemy(&mut state, p + Vec2::new(58.0, 0.0), 2);
        tick(
            &mut state,
            &TickInput {
                melee: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(state.wave.kills, 1);
    }

    #[test]
    fn test_reset_restores_initial_snapshot() {
        let mut fresh = GameState::new(77);
        fresh.reset();
        let initial = fresh.snapshot();

        let mut state = GameState::new(77);
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..1200 {
            tick(&mut state, &idle, SIM_DT);
        }
        state.reset();
        assert_eq!(state.snapshot(), initial);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..3000 {
            tick(&mut state1, &idle, SIM_DT);
            tick(&mut state2, &idle, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    #[test]
    fn test_autopilot_makes_progress() {
        let mut state = GameState::new(2024);
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..(60 * 60) {
            tick(&mut state, &idle, SIM_DT);
        }
        assert_ne!(state.phase, GamePhase::Menu);
        assert!(state.wave.number >= 1);
    }
}
