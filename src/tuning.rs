//! Game balance tuning
//!
//! Every knob defaults to the value the game was balanced with. A JSON file can
//! override any subset of them; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Who advancing enemies walk toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TargetMode {
    /// Always the player
    #[default]
    Player,
    /// Nearest of the player and living allies
    Nearest,
}

impl TargetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetMode::Player => "Player",
            TargetMode::Nearest => "Nearest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "player" => Some(TargetMode::Player),
            "nearest" | "near" => Some(TargetMode::Nearest),
            _ => None,
        }
    }
}

/// Knockback multipliers per enemy archetype
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackScale {
    pub default: f32,
    pub medium: f32,
    pub police: f32,
    pub large: f32,
    pub saint: f32,
}

impl Default for KnockbackScale {
    fn default() -> Self {
        Self {
            default: 1.0,
            medium: 1.0,
            police: 1.0,
            large: 1.0,
            saint: 1.0,
        }
    }
}

/// Balance and layout parameters for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Street layout (pixels) ===
    /// Width of the playfield
    pub screen_width: f32,
    /// Y coordinate of the walking line
    pub ground_y: f32,
    /// How close the player may get to either screen edge
    pub player_margin: f32,
    /// Enemies enter this far past the right edge
    pub spawn_offset_x: f32,
    /// Vertical spread of spawn positions around the ground line
    pub spawn_jitter_y: f32,

    // === Player ===
    /// Walking speed (px/s)
    pub player_speed: f32,
    /// Immunity window after taking a hit (s)
    pub damage_immunity: f32,

    // === Contact ===
    /// Enemy-to-target distance that counts as contact (px)
    pub contact_distance: f32,
    /// Push applied to an enemy after it hits the player (px)
    pub contact_knockback_player: f32,
    /// Push applied to an enemy after it hits an ally (px)
    pub contact_knockback_ally: f32,
    pub target_mode: TargetMode,

    // === Spawning (s) ===
    pub spawn_interval_base: f32,
    /// Interval shrink per wave index
    pub spawn_interval_per_wave: f32,
    /// Interval shrink per point of score
    pub spawn_interval_per_score: f32,
    pub spawn_interval_min: f32,

    // === Waves ===
    pub final_wave: u32,
    pub boss_wave: u32,
    /// First wave fought downtown, with allies
    pub downtown_wave: u32,
    /// Waves from here on get the longer intermission
    pub late_wave: u32,
    pub quota_base: u32,
    pub quota_per_wave: u32,
    pub quota_cap: u32,
    /// Pause between waves (s)
    pub intermission: f32,
    /// Extra pause after late waves (s)
    pub intermission_late_bonus: f32,

    // === Allies ===
    /// Horizontal distance of each ally from the player
    pub ally_offset: f32,
    pub ally_range: f32,
    pub ally_cooldown: f32,
    pub ally_damage: i32,
    /// Minimum stun applied by an ally flash (s)
    pub ally_stun: f32,

    pub knockback_scale: KnockbackScale,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 960.0,
            ground_y: 536.0,
            player_margin: 26.0,
            spawn_offset_x: 40.0,
            spawn_jitter_y: 6.0,

            player_speed: 240.0,
            damage_immunity: 1.2,

            contact_distance: 26.0,
            contact_knockback_player: 16.0,
            contact_knockback_ally: 10.0,
            target_mode: TargetMode::Player,

            spawn_interval_base: 2.2,
            spawn_interval_per_wave: 0.08,
            spawn_interval_per_score: 0.02,
            spawn_interval_min: 0.65,

            final_wave: 8,
            boss_wave: 5,
            downtown_wave: 7,
            late_wave: 6,
            quota_base: 8,
            quota_per_wave: 2,
            quota_cap: 16,
            intermission: 2.2,
            intermission_late_bonus: 0.8,

            ally_offset: 90.0,
            ally_range: 260.0,
            ally_cooldown: 2.2,
            ally_damage: 2,
            ally_stun: 0.32,

            knockback_scale: KnockbackScale::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Ground-line x range the player is confined to
    pub fn player_x_bounds(&self) -> (f32, f32) {
        (self.player_margin, self.screen_width - self.player_margin)
    }

    /// Intermission that follows clearing `wave`
    pub fn intermission_after(&self, wave: u32) -> f32 {
        if wave < self.late_wave {
            self.intermission
        } else {
            self.intermission + self.intermission_late_bonus
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "final_wave": 3, "target_mode": "Nearest" }"#)
            .expect("valid tuning");
        assert_eq!(tuning.final_wave, 3);
        assert_eq!(tuning.target_mode, TargetMode::Nearest);
        assert_eq!(tuning.boss_wave, 5);
        assert!((tuning.damage_immunity - 1.2).abs() < 0.0001);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ final_wave: }").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default(Path::new("/definitely/not/here.json"));
        assert_eq!(tuning.final_wave, 8);
    }

    #[test]
    fn test_intermission_lengthens_late() {
        let tuning = Tuning::default();
        assert!((tuning.intermission_after(5) - 2.2).abs() < 0.0001);
        assert!((tuning.intermission_after(6) - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_target_mode_from_str() {
        assert_eq!(TargetMode::from_str("NEAREST"), Some(TargetMode::Nearest));
        assert_eq!(TargetMode::from_str("player"), Some(TargetMode::Player));
        assert_eq!(TargetMode::from_str("allies"), None);
        assert_eq!(TargetMode::Nearest.as_str(), "Nearest");
    }
}
