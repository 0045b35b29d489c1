//! Wave director
//!
//! Decides when and what to spawn, tracks the kill quota, and reports when a
//! wave is cleared. Phase changes themselves belong to the tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Ally, Archetype, District, Enemy, GameState};
use crate::per_second;
use crate::tuning::Tuning;

/// Boss starting health
pub const SAINT_HEALTH: i32 = 14;
/// Boss base speed (px/frame at the reference rate)
pub const SAINT_SPEED: f32 = 1.1;

/// Per-wave progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveState {
    /// Current wave (1-based, 0 before the first start)
    pub number: u32,
    /// Kills needed to clear this wave
    pub quota: u32,
    pub kills: u32,
    pub boss_spawned: bool,
    /// Seconds since the last spawn
    pub since_last_spawn: f32,
    /// Wave queued to start after the intermission
    pub pending: Option<u32>,
    /// Intermission time left (s)
    pub intermission: f32,
}

impl WaveState {
    pub fn is_boss_wave(&self, tuning: &Tuning) -> bool {
        self.number == tuning.boss_wave
    }

    pub fn is_final(&self, tuning: &Tuning) -> bool {
        self.number >= tuning.final_wave
    }

    pub fn quota_met(&self) -> bool {
        self.kills >= self.quota
    }

    /// Quota met, street empty, and no next wave already queued
    pub fn is_cleared(&self, live_enemies: usize) -> bool {
        self.quota_met() && live_enemies == 0 && self.pending.is_none()
    }

    /// Advance the spawn clock; true when an enemy should enter now
    pub fn tick(&mut self, dt: f32, live_enemies: usize, score: u32, tuning: &Tuning) -> bool {
        self.since_last_spawn += dt;

        if self.is_boss_wave(tuning) {
            if live_enemies == 0 && !self.boss_spawned {
                self.boss_spawned = true;
                self.since_last_spawn = 0.0;
                return true;
            }
            return false;
        }

        if self.quota_met() {
            return false;
        }
        if self.since_last_spawn >= spawn_interval(self.number, score, tuning) {
            self.since_last_spawn = 0.0;
            return true;
        }
        false
    }
}

/// Kill quota for a wave
pub fn quota_for_wave(wave: u32, tuning: &Tuning) -> u32 {
    if wave > tuning.final_wave {
        0
    } else if wave == tuning.boss_wave {
        1
    } else {
        (tuning.quota_base + wave.saturating_sub(1) * tuning.quota_per_wave).min(tuning.quota_cap)
    }
}

/// Seconds between stream spawns; shrinks with wave and score
pub fn spawn_interval(wave: u32, score: u32, tuning: &Tuning) -> f32 {
    let interval = tuning.spawn_interval_base
        - wave as f32 * tuning.spawn_interval_per_wave
        - score as f32 * tuning.spawn_interval_per_score;
    interval.max(tuning.spawn_interval_min)
}

/// Begin wave `n`: fresh counters, empty street, allies downtown
pub fn start_wave(state: &mut GameState, n: u32) {
    let quota = quota_for_wave(n, &state.tuning);
    state.wave = WaveState {
        number: n,
        quota,
        ..WaveState::default()
    };
    state.enemies.clear();

    if n == state.tuning.downtown_wave {
        state.district = District::Center;
        let ground = state.tuning.ground_y;
        let offset = state.tuning.ally_offset;
        for station in [-offset, offset] {
            let id = state.next_entity_id();
            state.allies.push(Ally {
                id,
                pos: Vec2::new(state.player.pos.x + station, ground),
                health: Ally::max_health(),
                cooldown: 0.0,
                station,
            });
        }
        log::info!("Wave {}: downtown, {} allies join", n, state.allies.len());
    }

    log::info!("Wave {} started (quota {})", n, quota);
}

/// Spawn whatever the current wave calls for
pub fn spawn_enemy(state: &mut GameState) {
    let id = state.next_entity_id();
    let enemy = if state.wave.is_boss_wave(&state.tuning) {
        let boss = make_saint(&mut state.rng, id, &state.tuning);
        log::info!("Saint boss {} enters with {} hp", id, boss.health);
        boss
    } else {
        roll_enemy(&mut state.rng, id, state.wave.number, &state.tuning)
    };
    log::debug!(
        "Spawned enemy {} {:?} hp={} speed={:.1}",
        enemy.id,
        enemy.archetype,
        enemy.health,
        enemy.speed
    );
    state.enemies.push(enemy);
}

fn spawn_position(rng: &mut Pcg32, tuning: &Tuning) -> Vec2 {
    let jitter = tuning.spawn_jitter_y;
    Vec2::new(
        tuning.screen_width + tuning.spawn_offset_x,
        tuning.ground_y + rng.random_range(-jitter..=jitter),
    )
}

/// The wave-5 boss
pub fn make_saint(rng: &mut Pcg32, id: u32, tuning: &Tuning) -> Enemy {
    Enemy {
        id,
        pos: spawn_position(rng, tuning),
        health: SAINT_HEALTH,
        speed: per_second(SAINT_SPEED),
        archetype: Archetype::Saint,
        scale: 1.35,
        contact_damage: 1,
        score_value: 5,
        stun: 0.0,
        wobble_phase: 0.0,
        wobble_amp: 2.6,
        enraged: false,
    }
}

/// Pick an archetype for a stream spawn; later waves unlock tougher ones
pub fn roll_archetype(rng: &mut Pcg32, wave: u32) -> Archetype {
    if wave >= 8 && rng.random::<f32>() < 0.38 {
        Archetype::Large
    } else if wave >= 6 && rng.random::<f32>() < 0.32 {
        Archetype::Police
    } else if wave >= 2 && rng.random::<f32>() < 0.35 {
        Archetype::Medium
    } else {
        Archetype::Default
    }
}

/// A randomised stream enemy for `wave`
pub fn roll_enemy(rng: &mut Pcg32, id: u32, wave: u32, tuning: &Tuning) -> Enemy {
    let steps = wave.saturating_sub(1) as f32;
    let base_health = 2.0 + steps * 0.2;
    let base_speed = 1.2 + steps * 0.08;

    let pos = spawn_position(rng, tuning);
    let wobble_amp: f32 = rng.random_range(2.0..3.5);
    // two in three spawns get no extra health
    let health_bonus: f32 = if rng.random_range(0..3u32) == 2 { 1.0 } else { 0.0 };
    let speed_jitter: f32 = rng.random_range(-0.05..0.25);

    let archetype = roll_archetype(rng, wave);
    let mods = archetype.modifiers();

    Enemy {
        id,
        pos,
        health: (base_health + health_bonus + mods.extra_health) as i32,
        speed: per_second(base_speed + speed_jitter + mods.speed_delta),
        archetype,
        scale: mods.scale,
        contact_damage: mods.contact_damage,
        score_value: mods.score_value,
        stun: 0.0,
        wobble_phase: 0.0,
        wobble_amp: wobble_amp + mods.wobble_delta,
        enraged: false,
    }
}
