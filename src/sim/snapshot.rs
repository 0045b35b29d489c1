//! Read-only view of a session for renderers and tooling

use glam::Vec2;
use serde::Serialize;

use super::form::{Ability, AbilitySlot, Form};
use super::region::Rect;
use super::state::{Archetype, District, GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub facing: Vec2,
    pub form: Form,
    pub health: u32,
    pub max_health: u32,
    /// Remaining cooldown over full cooldown per slot; 0.0 when ready or not granted
    pub cooldown_ratios: [f32; 3],
    pub immune: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub health: i32,
    pub archetype: Archetype,
    pub scale: f32,
    pub stunned: bool,
    pub enraged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllyView {
    pub id: u32,
    pub pos: Vec2,
    pub health: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectView {
    pub ability: Ability,
    pub region: Rect,
    pub fade: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub wave: u32,
    pub score: u32,
    pub kills: u32,
    pub quota: u32,
    /// Seconds left before the next wave, 0.0 outside intermission
    pub intermission: f32,
    pub district: District,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub allies: Vec<AllyView>,
    pub effects: Vec<EffectView>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let player = &self.player;
        let cooldown_ratios = AbilitySlot::ALL.map(|slot| {
            match player.form.ability_spec(slot) {
                Some(spec) if spec.cooldown > 0.0 => {
                    (player.cooldown(slot) / spec.cooldown).clamp(0.0, 1.0)
                }
                _ => 0.0,
            }
        });

        Snapshot {
            phase: self.phase,
            wave: self.wave.number,
            score: self.score,
            kills: self.wave.kills,
            quota: self.wave.quota,
            intermission: if self.phase == GamePhase::Intermission {
                self.wave.intermission
            } else {
                0.0
            },
            district: self.district,
            player: PlayerView {
                pos: player.pos,
                facing: player.facing,
                form: player.form,
                health: player.health,
                max_health: player.max_health(),
                cooldown_ratios,
                immune: player.is_immune(),
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    health: e.health,
                    archetype: e.archetype,
                    scale: e.scale,
                    stunned: e.is_stunned(),
                    enraged: e.enraged,
                })
                .collect(),
            allies: self
                .allies
                .iter()
                .map(|a| AllyView {
                    id: a.id,
                    pos: a.pos,
                    health: a.health,
                })
                .collect(),
            effects: self
                .effects
                .iter()
                .map(|fx| EffectView {
                    ability: fx.ability,
                    region: fx.region,
                    fade: fx.fade(),
                })
                .collect(),
        }
    }
}
