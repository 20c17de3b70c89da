//! Shared components, resources, events, and states for Driftline.
//!
//! This is the type contract. Every domain module imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Playing,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub cast: KeyCode,
    pub pause: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            cast: KeyCode::Space,
            pause: KeyCode::Escape,
        }
    }
}

/// Frame-level game actions derived from hardware input.
///
/// `cast_held` is a level signal (drives charging), `cast_pressed` is an
/// edge signal (starts a charge, reels in). Rebuilt every frame by the
/// input module; headless tests write it directly.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    pub cast_pressed: bool,
    pub cast_held: bool,
    pub pause: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// FISHING CONFIG
// ═══════════════════════════════════════════════════════════════════════

/// All tunables for the fishing action, loadable from RON.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FishingConfig {
    /// Seconds of hold time for the power curve to ramp 0 → 1. The curve
    /// ping-pongs with period `2 * max_charge_secs`.
    pub max_charge_secs: f32,
    /// Cast distance at power 0.0 (world units).
    pub min_cast_distance: f32,
    /// Cast distance at power 1.0.
    pub max_cast_distance: f32,
    /// Bite wait at power 0.0, in seconds. Shallow casts bite fast.
    pub min_bite_delay: f32,
    /// Bite wait at power 1.0. Deep casts bite slow but catch better.
    pub max_bite_delay: f32,
    /// Lower clamp on the effective bite wait after the tackle bonus.
    pub min_effective_delay: f32,
    /// Seconds the player has to reel once a fish bites.
    pub reaction_window: f32,
    /// Duration of the reel-in animation after a catch or miss.
    pub resolve_duration: f32,
    /// Seconds the rod stays broken before a replacement is granted.
    pub rod_repair_cooldown: f32,
    /// Duration of the forward rod swing after release.
    pub swing_duration: f32,
    /// Fraction of the swing at which the bobber leaves the rod tip.
    pub bobber_spawn_fraction: f32,
    /// Bobber flight time at power 0.0.
    pub min_flight_duration: f32,
    /// Bobber flight time at power 1.0.
    pub max_flight_duration: f32,
    /// Peak arc height at power 0.0 (world units above the endpoints).
    pub min_flight_peak: f32,
    /// Peak arc height at power 1.0.
    pub max_flight_peak: f32,
}

impl Default for FishingConfig {
    fn default() -> Self {
        Self {
            max_charge_secs: 1.5,
            min_cast_distance: 40.0,
            max_cast_distance: 220.0,
            min_bite_delay: 2.0,
            max_bite_delay: 8.0,
            min_effective_delay: 0.25,
            reaction_window: 1.0,
            resolve_duration: 0.6,
            rod_repair_cooldown: 3.0,
            swing_duration: 0.25,
            bobber_spawn_fraction: 0.4,
            min_flight_duration: 0.35,
            max_flight_duration: 0.8,
            min_flight_peak: 14.0,
            max_flight_peak: 52.0,
        }
    }
}

impl FishingConfig {
    /// Parse a config override from RON text (e.g. `assets/fishing.ron`).
    /// Missing fields fall back to defaults via `#[serde(default)]`.
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Fraction of the castable range a given distance represents.
    pub fn distance_fraction(&self, distance: f32) -> f32 {
        let span = self.max_cast_distance - self.min_cast_distance;
        if span <= f32::EPSILON {
            return 0.0;
        }
        ((distance - self.min_cast_distance) / span).clamp(0.0, 1.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TACKLE
// ═══════════════════════════════════════════════════════════════════════

/// Equipment bonuses supplied by tackle. `speed_bonus` shortens the bite
/// wait; the scheduler samples it once per cast when the wait begins.
#[derive(Resource, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TackleState {
    pub speed_bonus: f32,
}

impl TackleState {
    /// Bonus clamped so the effective wait can never invert.
    pub fn clamped_speed_bonus(&self) -> f32 {
        self.speed_bonus.clamp(0.0, 1.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SCENE MARKERS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

/// The casting rod entity, child of the player. Fishing animates its pose;
/// the break controller hides it while the rod is broken.
#[derive(Component, Debug, Clone)]
pub struct RodRig {
    /// Pose angle (radians) while idle.
    pub rest_angle: f32,
}

/// Background of the charge meter above the player.
#[derive(Component)]
pub struct ChargeMeterBg;

/// Fill bar of the charge meter; x-scale tracks current power.
#[derive(Component)]
pub struct ChargeMeterFill;

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// External break trigger. While Idle or already broken it is a no-op.
/// Anything may send it; the reward module does on a colossal strike.
#[derive(Event, Debug, Clone)]
pub struct RodBreakEvent;

/// Fired exactly once per resolved cast session. The reward module owns
/// everything downstream: what was caught, rarity, notifications.
#[derive(Event, Debug, Clone)]
pub struct CastResolvedEvent {
    pub caught: bool,
    pub cast_distance: f32,
}

/// Fired once per cast when a fish bites, independent of the eventual
/// outcome. Feeds the rare-catch tracker.
#[derive(Event, Debug, Clone)]
pub struct RareFishSightingEvent {
    pub cast_distance: f32,
}

/// The bobber hit the water. Consumed by effect generators.
#[derive(Event, Debug, Clone)]
pub struct SplashEvent {
    pub position: Vec2,
    pub power: f32,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

/// World-space y of the water surface. Every landing point is pinned here.
pub const WATER_SURFACE_Y: f32 = -60.0;

/// Where the angler stands on the pier.
pub const PLAYER_POS: Vec2 = Vec2::new(-280.0, -24.0);

/// Rod tip offset from the player origin while at rest. Doubles as the
/// cast origin when no rig entity exists (headless tests).
pub const ROD_TIP_OFFSET: Vec2 = Vec2::new(26.0, 34.0);

/// Local offset of the rod rig from the player origin.
pub const ROD_RIG_LOCAL: Vec2 = Vec2::new(12.0, 10.0);

// ═══════════════════════════════════════════════════════════════════════
// MATH HELPERS
// ═══════════════════════════════════════════════════════════════════════

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-out: fast start, soft landing. Used for the rod snap.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}
