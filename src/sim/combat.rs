//! Ability resolution
//!
//! One algorithm for every ability: gate on the slot's cooldown, start it,
//! resolve the hit region from the player's position and facing, apply
//! damage, stun and knockback to every enemy inside, then collect the dead.

use glam::Vec2;

use super::form::{AbilitySlot, Knockback};
use super::state::{ActiveEffect, GameState};

/// Outcome of an activation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The ability went off
    Fired { hits: u32, kills: u32 },
    /// Slot still cooling down; nothing happened
    OnCooldown,
    /// Current form has nothing in this slot; nothing happened
    NotGranted,
}

impl Activation {
    pub fn fired(&self) -> bool {
        matches!(self, Activation::Fired { .. })
    }
}

/// Try to fire the ability bound to `slot`
pub fn activate(state: &mut GameState, slot: AbilitySlot) -> Activation {
    let Some(spec) = state.player.form.ability_spec(slot) else {
        return Activation::NotGranted;
    };
    if state.player.cooldown(slot) > 0.0 {
        return Activation::OnCooldown;
    }

    state.player.cooldowns[slot.index()] = spec.cooldown;

    let pos = state.player.pos;
    let aim = state.player.facing.normalize_or(Vec2::X);
    let region = spec.shape.resolve(pos, aim);

    state.effects.retain(|e| e.slot != slot);
    state.effects.push(ActiveEffect {
        slot,
        ability: spec.ability,
        region,
        remaining: spec.active,
        duration: spec.active,
    });

    let mut hits = 0;
    for enemy in &mut state.enemies {
        if !region.contains_point(enemy.pos) {
            continue;
        }
        hits += 1;

        // damage before displacement so death is judged on final health
        if spec.damage > 0 {
            enemy.take_damage(spec.damage);
        }
        if spec.stun > 0.0 {
            enemy.stun_for(spec.stun);
        }

        let scale = enemy.archetype.knockback_scale(&state.tuning);
        match spec.knockback {
            Knockback::None => {}
            Knockback::Away(distance) => {
                let offset = enemy.pos - pos;
                if offset.length_squared() > 0.0 {
                    enemy.pos += offset.normalize() * distance * scale;
                }
            }
            Knockback::Along(distance) => {
                enemy.pos += aim * distance * scale;
            }
        }
    }

    let kills = state.collect_kills();
    if hits > 0 {
        log::debug!(
            "{} ({}) hit {} enemies, {} killed",
            spec.ability.label(),
            state.player.form.label(),
            hits,
            kills
        );
    }
    Activation::Fired { hits, kills }
}
