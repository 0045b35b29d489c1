//! Demo AI that plays the game when idle mode is on

use glam::Vec2;

use super::form::{AbilitySlot, Form, LARGE_SPEAKERMAN_COST};
use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Closer than this the autopilot stops walking and lets melee work
const HOLD_DISTANCE: f32 = 60.0;

/// Build the intents for one tick from the current state
pub fn drive(state: &GameState) -> TickInput {
    let mut input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    match state.phase {
        GamePhase::Menu => {
            input.start = true;
            return input;
        }
        GamePhase::GameOver | GamePhase::Victory => {
            input.restart = true;
            return input;
        }
        GamePhase::Intermission => return input,
        GamePhase::Playing => {}
    }

    let player = &state.player;

    // Go for the nearest enemy; ties go to the lowest id
    let nearest = state.enemies.iter().min_by(|a, b| {
        let da = (a.pos.x - player.pos.x).abs();
        let db = (b.pos.x - player.pos.x).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut facing = player.facing;
    if let Some(enemy) = nearest {
        let dx = enemy.pos.x - player.pos.x;
        let toward = if dx >= 0.0 { 1.0 } else { -1.0 };
        // Walk in while far, and take one step to turn around when facing away
        if dx.abs() > HOLD_DISTANCE || facing.x * toward < 0.0 {
            input.move_axis = toward;
            facing = Vec2::new(toward, 0.0);
        }
    }

    // Fire anything ready whose region would catch someone
    for slot in AbilitySlot::ALL {
        let Some(spec) = player.form.ability_spec(slot) else {
            continue;
        };
        if player.cooldown(slot) > 0.0 {
            continue;
        }
        let region = spec.shape.resolve(player.pos, facing);
        if state.enemies.iter().any(|e| region.contains_point(e.pos)) {
            match slot {
                AbilitySlot::Melee => input.melee = true,
                AbilitySlot::Special => input.special = true,
                AbilitySlot::Secondary => input.secondary = true,
            }
        }
    }

    // Save up for the speaker branch once at TV Man
    if player.form == Form::TvMan {
        input.upgrade_alt = state.score >= LARGE_SPEAKERMAN_COST;
    } else {
        input.upgrade = player
            .form
            .successors()
            .iter()
            .any(|(_, cost)| state.score >= *cost);
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Archetype, Enemy};

    fn playing_state() -> GameState {
        let mut state = GameState::new(21);
        state.reset();
        state
    }

    fn push_enemy(state: &mut GameState, dx: f32) {
        let id = state.next_entity_id();
        let pos = state.player.pos + Vec2::new(dx, 0.0);
        state.enemies.push(Enemy {
            id,
            pos,
            health: 3,
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
    fn test_starts_and_restarts() {
        let state = GameState::new(1);
        assert!(drive(&state).start);

        let mut state = playing_state();
        state.transition(GamePhase::GameOver);
        assert!(drive(&state).restart);
    }

    #[test]
    fn test_walks_toward_far_enemy() {
        let mut state = playing_state();
        push_enemy(&mut state, -300.0);
        let input = drive(&state);
        assert_eq!(input.move_axis, -1.0);
    }

    #[test]
    fn test_punches_enemy_in_reach() {
        let mut state = playing_state();
        push_enemy(&mut state, 58.0);
        let input = drive(&state);
        assert_eq!(input.move_axis, 0.0);
        assert!(input.melee);
        assert!(input.special);
        assert!(!input.secondary);
    }

    #[test]
    fn test_turns_around_for_enemy_behind() {
        let mut state = playing_state();
        push_enemy(&mut state, -40.0);
        let input = drive(&state);
        assert_eq!(input.move_axis, -1.0);
    }

    #[test]
    fn test_holds_score_at_tv_man() {
        let mut state = playing_state();
        state.player.form = Form::TvMan;
        state.score = 30;
        let input = drive(&state);
        assert!(!input.upgrade);
        assert!(!input.upgrade_alt);
        state.score = 35;
        assert!(drive(&state).upgrade_alt);
    }
}
