//! Player forms and their ability tables
//!
//! Each form grants up to three abilities, one per slot. Everything an
//! activation needs (cooldown, hit shape, damage, knockback, stun) comes from
//! [`Form::ability_spec`], so the combat resolver never branches on form.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::region::Rect;

/// Score needed to evolve into Speakerman
pub const SPEAKERMAN_COST: u32 = 12;
/// Score needed to evolve into TV Man
pub const TVMAN_COST: u32 = 15;
/// Score needed to evolve into Large Cameraman
pub const LARGE_CAMERAMAN_COST: u32 = 25;
/// Score needed to evolve into Large Speakerman
pub const LARGE_SPEAKERMAN_COST: u32 = 35;

/// Player progression tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Form {
    #[default]
    Cameraman,
    Speakerman,
    TvMan,
    LargeCameraman,
    LargeSpeakerman,
}

impl Form {
    pub const ALL: [Form; 5] = [
        Form::Cameraman,
        Form::Speakerman,
        Form::TvMan,
        Form::LargeCameraman,
        Form::LargeSpeakerman,
    ];

    /// Progression depth (0 = base, 3 = terminal)
    pub fn tier(&self) -> u8 {
        match self {
            Form::Cameraman => 0,
            Form::Speakerman => 1,
            Form::TvMan => 2,
            Form::LargeCameraman | Form::LargeSpeakerman => 3,
        }
    }

    pub fn max_health(&self) -> u32 {
        match self {
            Form::Cameraman => 5,
            Form::Speakerman => 6,
            Form::TvMan => 8,
            Form::LargeCameraman => 9,
            Form::LargeSpeakerman => 10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Form::Cameraman => "Cameraman",
            Form::Speakerman => "Speakerman",
            Form::TvMan => "TV Man",
            Form::LargeCameraman => "Large Cameraman",
            Form::LargeSpeakerman => "Large Speakerman",
        }
    }

    /// Forms reachable in one step, with their score cost
    pub fn successors(&self) -> &'static [(Form, u32)] {
        match self {
            Form::Cameraman => &[(Form::Speakerman, SPEAKERMAN_COST)],
            Form::Speakerman => &[(Form::TvMan, TVMAN_COST)],
            Form::TvMan => &[
                (Form::LargeSpeakerman, LARGE_SPEAKERMAN_COST),
                (Form::LargeCameraman, LARGE_CAMERAMAN_COST),
            ],
            Form::LargeCameraman | Form::LargeSpeakerman => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }

    /// Ability granted in `slot`, if any
    pub fn ability(&self, slot: AbilitySlot) -> Option<Ability> {
        match (slot, self) {
            (AbilitySlot::Melee, _) => Some(Ability::Punch),
            (AbilitySlot::Special, Form::TvMan) => Some(Ability::StunScreen),
            (AbilitySlot::Special, _) => Some(Ability::Flash),
            (AbilitySlot::Secondary, Form::Speakerman) => Some(Ability::Soundwave),
            (AbilitySlot::Secondary, Form::TvMan) => Some(Ability::Stab),
            (AbilitySlot::Secondary, Form::LargeSpeakerman) => Some(Ability::Kick),
            (AbilitySlot::Secondary, _) => None,
        }
    }

    /// Full parameters of the ability in `slot` for this form
    pub fn ability_spec(&self, slot: AbilitySlot) -> Option<AbilitySpec> {
        let ability = self.ability(slot)?;
        let spec = match ability {
            Ability::Punch => AbilitySpec {
                ability,
                cooldown: 0.28,
                active: 0.28,
                shape: Shape::Ahead {
                    origin: 28.0,
                    reach: 30.0,
                    size: Vec2::new(26.0, 26.0),
                    lift: 0.0,
                },
                damage: match self {
                    Form::Cameraman => 2,
                    Form::Speakerman => 6,
                    Form::TvMan => 7,
                    Form::LargeCameraman => 8,
                    Form::LargeSpeakerman => 10,
                },
                knockback: match self {
                    Form::Speakerman | Form::TvMan => Knockback::Away(16.0),
                    _ => Knockback::Away(12.0),
                },
                stun: 0.0,
            },
            Ability::Flash => AbilitySpec {
                ability,
                cooldown: 6.5,
                active: 0.26,
                shape: Shape::Beam {
                    start: 20.0,
                    length: 260.0 + self.beam_bonus(),
                    height: 120.0,
                    lift: 4.0,
                },
                damage: match self {
                    Form::Speakerman => 4,
                    Form::LargeCameraman => 5,
                    Form::LargeSpeakerman => 7,
                    _ => 2,
                },
                knockback: match self {
                    Form::LargeSpeakerman => Knockback::Away(28.0),
                    _ => Knockback::Away(20.0),
                },
                stun: 0.0,
            },
            Ability::StunScreen => AbilitySpec {
                ability,
                cooldown: 3.6,
                active: 0.26,
                shape: Shape::Beam {
                    start: 20.0,
                    length: 260.0,
                    height: 120.0,
                    lift: 4.0,
                },
                damage: 0,
                knockback: Knockback::None,
                stun: 1.8,
            },
            Ability::Soundwave => AbilitySpec {
                ability,
                cooldown: 4.2,
                active: 0.24,
                shape: Shape::Beam {
                    start: 16.0,
                    length: 220.0,
                    height: 130.0,
                    lift: 0.0,
                },
                damage: 3,
                knockback: Knockback::Along(26.0),
                stun: 0.0,
            },
            Ability::Kick => AbilitySpec {
                ability,
                cooldown: 0.9,
                active: 0.18,
                shape: Shape::Ahead {
                    origin: 24.0,
                    reach: 42.0,
                    size: Vec2::new(84.0, 40.0),
                    lift: 6.0,
                },
                damage: 10,
                knockback: Knockback::Along(34.0),
                stun: 0.0,
            },
            Ability::Stab => AbilitySpec {
                ability,
                cooldown: 1.0,
                active: 0.15,
                shape: Shape::Ahead {
                    origin: 22.0,
                    reach: 35.0,
                    size: Vec2::new(70.0, 32.0),
                    lift: 0.0,
                },
                damage: 9,
                knockback: Knockback::None,
                stun: 0.24,
            },
        };
        Some(spec)
    }

    /// Extra flash beam length
    fn beam_bonus(&self) -> f32 {
        match self {
            Form::Speakerman => 30.0,
            Form::LargeCameraman => 50.0,
            Form::LargeSpeakerman => 70.0,
            _ => 0.0,
        }
    }
}

/// Input slot an ability is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilitySlot {
    Melee,
    Special,
    Secondary,
}

impl AbilitySlot {
    pub const ALL: [AbilitySlot; 3] = [AbilitySlot::Melee, AbilitySlot::Special, AbilitySlot::Secondary];

    #[inline]
    pub fn index(&self) -> usize {
        match self {
            AbilitySlot::Melee => 0,
            AbilitySlot::Special => 1,
            AbilitySlot::Secondary => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Punch,
    Flash,
    StunScreen,
    Soundwave,
    Kick,
    Stab,
}

impl Ability {
    pub fn label(&self) -> &'static str {
        match self {
            Ability::Punch => "Punch",
            Ability::Flash => "Flash",
            Ability::StunScreen => "Stun Screen",
            Ability::Soundwave => "Soundwave",
            Ability::Kick => "Kick",
            Ability::Stab => "Stab",
        }
    }
}

/// Where an ability's hit box sits relative to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Box of `size` centred `origin + reach` ahead along facing, raised by `lift`
    Ahead { origin: f32, reach: f32, size: Vec2, lift: f32 },
    /// Horizontal band starting `start` ahead of the player, `length` long in the
    /// facing direction, centred `lift` above the player
    Beam { start: f32, length: f32, height: f32, lift: f32 },
}

impl Shape {
    /// Resolve to a concrete region for a player at `pos` facing `facing`
    pub fn resolve(&self, pos: Vec2, facing: Vec2) -> Rect {
        match *self {
            Shape::Ahead { origin, reach, size, lift } => {
                let center = pos + facing * (origin + reach) - Vec2::new(0.0, lift);
                Rect::from_center(center, size)
            }
            Shape::Beam { start, length, height, lift } => {
                let dir = horizontal_sign(facing);
                Rect::extending(pos.x + start * dir, dir, length, pos.y - lift, height)
            }
        }
    }
}

/// How struck enemies are displaced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Knockback {
    None,
    /// Straight away from the player
    Away(f32),
    /// Along the player's facing
    Along(f32),
}

/// Everything needed to resolve one activation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilitySpec {
    pub ability: Ability,
    /// Seconds before the slot can fire again
    pub cooldown: f32,
    /// Seconds the effect stays visible
    pub active: f32,
    pub shape: Shape,
    pub damage: i32,
    pub knockback: Knockback,
    /// Minimum stun left on every enemy hit (0 = none)
    pub stun: f32,
}

/// +1 when facing right or straight up/down, -1 when facing left
#[inline]
pub fn horizontal_sign(facing: Vec2) -> f32 {
    if facing.x >= 0.0 { 1.0 } else { -1.0 }
}
