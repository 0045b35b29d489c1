//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`]; components take it by
//! mutable reference and there is no other shared state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::form::{Ability, AbilitySlot, Form};
use super::region::Rect;
use super::wave::{self, WaveState};
use crate::per_second;
use crate::tick_down;
use crate::tuning::Tuning;

/// Boss health at or below which it enrages
pub const ENRAGE_HEALTH: i32 = 6;
/// Boss speed bonus once enraged (px/frame at the reference rate)
pub const ENRAGE_SPEED_BONUS: f32 = 0.7;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start intent
    Menu,
    /// Active wave
    Playing,
    /// Between-wave countdown
    Intermission,
    /// Player died
    GameOver,
    /// Final wave cleared
    Victory,
}

impl GamePhase {
    /// Whether the state machine may move from `self` to `next`
    pub fn can_transition_to(self, next: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, next),
            (Menu, Playing)
                | (Playing, Intermission)
                | (Intermission, Playing)
                | (Playing, Victory)
                | (Playing, GameOver)
                | (GameOver, Playing)
                | (Victory, Playing)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Part of the city the current wave is fought in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum District {
    #[default]
    Street,
    Center,
}

/// Additive stat changes a stream archetype applies on top of the wave's base enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeModifiers {
    pub extra_health: f32,
    /// px/frame at the reference rate
    pub speed_delta: f32,
    pub wobble_delta: f32,
    pub scale: f32,
    pub contact_damage: u32,
    pub score_value: u32,
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Archetype {
    #[default]
    Default,
    Medium,
    Police,
    Large,
    /// Boss
    Saint,
}

impl Archetype {
    pub fn is_boss(&self) -> bool {
        *self == Archetype::Saint
    }

    pub fn label(&self) -> &'static str {
        match self {
            Archetype::Default => "",
            Archetype::Medium => "Medium",
            Archetype::Police => "Police",
            Archetype::Large => "Large",
            Archetype::Saint => "Saint",
        }
    }

    /// Stat modifiers for a stream spawn; the boss has fixed stats and uses the plain row
    pub fn modifiers(&self) -> ArchetypeModifiers {
        let (extra_health, speed_delta, wobble_delta, scale, contact_damage, score_value) =
            match self {
                Archetype::Medium => (2.0, -0.05, 0.4, 1.25, 1, 2),
                Archetype::Police => (0.0, -0.02, 0.0, 1.1, 2, 1),
                Archetype::Large => (6.0, -0.4, -0.2, 1.6, 3, 4),
                Archetype::Default | Archetype::Saint => (0.0, 0.0, 0.0, 1.0, 1, 1),
            };
        ArchetypeModifiers {
            extra_health,
            speed_delta,
            wobble_delta,
            scale,
            contact_damage,
            score_value,
        }
    }

    /// Knockback multiplier for this archetype
    pub fn knockback_scale(&self, tuning: &Tuning) -> f32 {
        let scale = &tuning.knockback_scale;
        match self {
            Archetype::Default => scale.default,
            Archetype::Medium => scale.medium,
            Archetype::Police => scale.police,
            Archetype::Large => scale.large,
            Archetype::Saint => scale.saint,
        }
    }
}

/// The player avatar
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Unit vector of the last movement direction
    pub facing: Vec2,
    pub form: Form,
    pub health: u32,
    /// Remaining cooldown per slot (s), indexed by [`AbilitySlot::index`]
    pub cooldowns: [f32; 3],
    /// Remaining damage immunity (s)
    pub immunity: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        let form = Form::default();
        Self {
            pos,
            facing: Vec2::X,
            form,
            health: form.max_health(),
            cooldowns: [0.0; 3],
            immunity: 0.0,
        }
    }

    pub fn max_health(&self) -> u32 {
        self.form.max_health()
    }

    #[inline]
    pub fn cooldown(&self, slot: AbilitySlot) -> f32 {
        self.cooldowns[slot.index()]
    }

    pub fn is_immune(&self) -> bool {
        self.immunity > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Apply a hit unless immune; a landed hit starts a new immunity window
    pub fn take_damage(&mut self, amount: u32, immunity: f32) -> bool {
        if self.is_immune() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.immunity = immunity;
        true
    }

    pub fn tick_timers(&mut self, dt: f32) {
        for cd in &mut self.cooldowns {
            tick_down(cd, dt);
        }
        tick_down(&mut self.immunity, dt);
    }

    /// Switch to a higher form with a full heal
    pub fn evolve(&mut self, form: Form) {
        assert!(
            form.tier() > self.form.tier(),
            "form can only advance: {:?} -> {:?}",
            self.form,
            form
        );
        self.form = form;
        self.health = form.max_health();
    }
}

/// An advancing enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Goes to zero or below on the killing blow
    pub health: i32,
    /// Base walking speed (px/s)
    pub speed: f32,
    pub archetype: Archetype,
    /// Size relative to a default enemy
    pub scale: f32,
    pub contact_damage: u32,
    pub score_value: u32,
    /// Remaining stun (s)
    pub stun: f32,
    pub wobble_phase: f32,
    pub wobble_amp: f32,
    /// Sticky boss speed boost
    pub enraged: bool,
}

impl Enemy {
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_stunned(&self) -> bool {
        self.stun > 0.0
    }

    /// Stun for at least `duration`
    pub fn stun_for(&mut self, duration: f32) {
        self.stun = self.stun.max(duration);
    }

    /// Latch the enrage flag if the boss is hurt enough
    pub fn check_enrage(&mut self) {
        if self.archetype.is_boss() && (self.enraged || self.health <= ENRAGE_HEALTH) {
            if !self.enraged {
                log::info!("Saint {} is enraged!", self.id);
            }
            self.enraged = true;
        }
    }

    /// Walking speed including any enrage bonus (px/s)
    pub fn current_speed(&self) -> f32 {
        if self.enraged {
            self.speed + per_second(ENRAGE_SPEED_BONUS)
        } else {
            self.speed
        }
    }
}

/// A friendly cameraman fighting downtown
#[derive(Debug, Clone, PartialEq)]
pub struct Ally {
    pub id: u32,
    pub pos: Vec2,
    pub health: u32,
    /// Remaining ability cooldown (s)
    pub cooldown: f32,
    /// Horizontal offset from the player this ally holds
    pub station: f32,
}

impl Ally {
    pub fn max_health() -> u32 {
        Form::Cameraman.max_health()
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

/// A recently fired ability, kept for its visible window
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEffect {
    pub slot: AbilitySlot,
    pub ability: Ability,
    pub region: Rect,
    pub remaining: f32,
    pub duration: f32,
}

impl ActiveEffect {
    /// 1.0 when just fired, 0.0 when expired
    pub fn fade(&self) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else {
            (self.remaining / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Live enemies (ascending id)
    pub enemies: Vec<Enemy>,
    pub allies: Vec<Ally>,
    pub wave: WaveState,
    pub score: u32,
    pub effects: Vec<ActiveEffect>,
    pub district: District,
    /// Playing ticks since the last reset
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session waiting on the menu, with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(Self::player_start(&tuning));
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Menu,
            player,
            enemies: Vec::new(),
            allies: Vec::new(),
            wave: WaveState::default(),
            score: 0,
            effects: Vec::new(),
            district: District::Street,
            time_ticks: 0,
            next_id: 1,
        }
    }

    fn player_start(tuning: &Tuning) -> Vec2 {
        Vec2::new(tuning.screen_width / 2.0, tuning.ground_y)
    }

    /// Reinitialise everything and begin wave 1; legal from any phase
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.player = Player::new(Self::player_start(&self.tuning));
        self.enemies.clear();
        self.allies.clear();
        self.wave = WaveState::default();
        self.score = 0;
        self.effects.clear();
        self.district = District::Street;
        self.time_ticks = 0;
        self.next_id = 1;
        self.phase = GamePhase::Playing;
        wave::start_wave(self, 1);
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Move to `next`, panicking on any transition the state machine does not allow
    pub fn transition(&mut self, next: GamePhase) {
        assert!(
            self.phase.can_transition_to(next),
            "illegal phase transition {:?} -> {:?}",
            self.phase,
            next
        );
        log::info!("Phase {:?} -> {:?} (wave {})", self.phase, next, self.wave.number);
        self.phase = next;
    }

    /// Credit and remove every dead enemy; returns the number removed
    pub fn collect_kills(&mut self) -> u32 {
        let mut gained = 0;
        let mut kills = 0;
        self.enemies.retain(|e| {
            if e.is_dead() {
                log::debug!("Enemy {} ({:?}) destroyed, +{}", e.id, e.archetype, e.score_value);
                gained += e.score_value;
                kills += 1;
                false
            } else {
                true
            }
        });
        self.score += gained;
        self.wave.kills += kills;
        kills
    }
}
