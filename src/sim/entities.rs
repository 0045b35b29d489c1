//! Per-tick entity simulation
//!
//! Timers, walking, enemy steering with wobble, the allies' autonomous flash,
//! and contact damage.

use glam::Vec2;

use super::state::GameState;
use crate::consts::REFERENCE_FPS;
use crate::tick_down;
use crate::tuning::TargetMode;

/// Wobble phase advance (rad/s)
pub const WOBBLE_RATE: f32 = 10.0;
/// Fraction of the wobble amplitude applied as vertical drift per reference frame
pub const WOBBLE_DRIFT: f32 = 0.12;

/// Count down player cooldowns, immunity and active effects
pub fn tick_timers(state: &mut GameState, dt: f32) {
    state.player.tick_timers(dt);
    for effect in &mut state.effects {
        tick_down(&mut effect.remaining, dt);
    }
    state.effects.retain(|e| e.remaining > 0.0);
}

/// Walk the player along the ground line; `axis` is -1, 0 or +1
pub fn move_player(state: &mut GameState, axis: f32, dt: f32) {
    let (min_x, max_x) = state.tuning.player_x_bounds();
    let player = &mut state.player;
    if axis != 0.0 {
        let dir = axis.signum();
        player.pos.x = (player.pos.x + dir * state.tuning.player_speed * dt).clamp(min_x, max_x);
        player.facing = Vec2::new(dir, 0.0);
    }
    player.pos.y = state.tuning.ground_y;
}

/// Allies keep station beside the player and flash enemies ahead of them
pub fn update_allies(state: &mut GameState, dt: f32) {
    if state.allies.is_empty() {
        return;
    }
    let tuning = &state.tuning;
    let (min_x, max_x) = tuning.player_x_bounds();
    let max_step = tuning.player_speed * dt;
    let player_x = state.player.pos.x;

    for ally in &mut state.allies {
        let target_x = (player_x + ally.station).clamp(min_x, max_x);
        let dx = (target_x - ally.pos.x).clamp(-max_step, max_step);
        ally.pos.x += dx;
        ally.pos.y = tuning.ground_y;

        tick_down(&mut ally.cooldown, dt);
        if ally.cooldown > 0.0 {
            continue;
        }

        let mut fired = false;
        for enemy in &mut state.enemies {
            let ahead = enemy.pos.x > ally.pos.x && enemy.pos.distance(ally.pos) < tuning.ally_range;
            if ahead {
                enemy.take_damage(tuning.ally_damage);
                enemy.stun_for(tuning.ally_stun);
                fired = true;
            }
        }
        if fired {
            ally.cooldown = tuning.ally_cooldown;
            log::debug!("Ally {} flashed", ally.id);
        }
    }

    state.collect_kills();
}

/// Steer enemies toward their target, apply wobble and contact damage
pub fn update_enemies(state: &mut GameState, dt: f32) {
    let GameState {
        enemies,
        player,
        allies,
        tuning,
        ..
    } = state;

    let frames = dt * REFERENCE_FPS;

    for enemy in enemies.iter_mut() {
        if enemy.is_stunned() {
            tick_down(&mut enemy.stun, dt);
            enemy.wobble_phase = (enemy.wobble_phase + WOBBLE_RATE * dt) % std::f32::consts::TAU;
        } else {
            let target = match tuning.target_mode {
                TargetMode::Player => player.pos,
                TargetMode::Nearest => allies
                    .iter()
                    .filter(|a| !a.is_dead())
                    .map(|a| a.pos)
                    .chain(std::iter::once(player.pos))
                    .min_by(|a, b| {
                        a.distance_squared(enemy.pos)
                            .partial_cmp(&b.distance_squared(enemy.pos))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .unwrap_or(player.pos),
            };

            let to_target = target - enemy.pos;
            if to_target.length_squared() > 0.0 {
                enemy.check_enrage();
                enemy.pos += to_target.normalize() * enemy.current_speed() * dt;
            }

            enemy.wobble_phase = (enemy.wobble_phase + WOBBLE_RATE * dt) % std::f32::consts::TAU;
            enemy.pos.y += (enemy.wobble_phase * 0.6).sin() * WOBBLE_DRIFT * enemy.wobble_amp * frames;
        }

        if enemy.is_stunned() {
            continue;
        }

        // Contact with the player
        if enemy.pos.distance(player.pos) <= tuning.contact_distance {
            if player.take_damage(enemy.contact_damage, tuning.damage_immunity) {
                log::debug!(
                    "Player hit by enemy {} for {} ({} left)",
                    enemy.id,
                    enemy.contact_damage,
                    player.health
                );
            }
            let away = enemy.pos - player.pos;
            if away.length_squared() > 0.0 {
                enemy.pos += away.normalize() * tuning.contact_knockback_player;
            }
        }

        // Contact with allies
        for ally in allies.iter_mut() {
            if enemy.pos.distance(ally.pos) <= tuning.contact_distance {
                ally.take_damage(enemy.contact_damage);
                let repel = enemy.pos - ally.pos;
                if repel.length_squared() > 0.0 {
                    enemy.pos += repel.normalize() * tuning.contact_knockback_ally;
                }
            }
        }
    }

    allies.retain(|a| {
        if a.is_dead() {
            log::info!("Ally {} is down", a.id);
        }
        !a.is_dead()
    });
}
