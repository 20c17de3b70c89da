use bevy::prelude::*;

use crate::shared::*;

// ─── Sub-modules ────────────────────────────────────────────────────────────
pub mod bite;
pub mod cast;
pub mod charge;
pub mod render;
pub mod resolve;
pub mod tackle;

// ─── Plugin ─────────────────────────────────────────────────────────────────

pub struct FishingPlugin;

impl Plugin for FishingPlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<FishingState>()
            // Core state machine. Chained so no two phases of the same
            // session ever advance in the same frame: the swing finishes
            // before the flight, the flight before the bite wait, the wait
            // before the reaction window, and the break controller can
            // preempt everything at the end of the chain.
            .add_systems(
                Update,
                (
                    charge::update_charge,
                    cast::update_rod_swing,
                    cast::update_bobber_flight,
                    bite::update_bite_timer,
                    bite::update_reaction_window,
                    resolve::update_resolution,
                    tackle::handle_rod_break,
                    tackle::update_rod_recovery,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            // Visual side effects, decoupled from the state machine.
            .add_systems(
                Update,
                (
                    render::update_rod_pose,
                    render::update_rig_shake,
                    render::update_charge_meter,
                    render::animate_bobber,
                    render::update_fishing_line,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ─── Fishing State Resource ──────────────────────────────────────────────────

/// Phase of the fishing action.
///
/// `Broken` doubles as the equipment state: the rod is intact in every
/// other phase, and no new cast may start while broken.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FishingPhase {
    #[default]
    Idle,
    /// Cast button held — power is building along the ping-pong curve.
    Charging,
    /// Rod swing and bobber flight are playing out.
    Casting,
    /// Bobber is in the water, counting down to a bite.
    Waiting,
    /// A fish is on — the player must reel inside the reaction window.
    Biting,
    /// Reel-in animation after the session outcome is decided.
    Resolving { caught: bool },
    /// Rod snapped; waiting out the repair cooldown.
    Broken,
}

/// Everything about the cast currently in flight. Created when the charge
/// is released, dropped on resolution or interrupt.
#[derive(Debug, Clone)]
pub struct CastSession {
    pub power: f32,
    pub cast_distance: f32,
    pub landing_point: Vec2,
    /// Tackle speed bonus, sampled once when the bite wait begins.
    pub speed_bonus: f32,
    /// Forward rod swing, while casting.
    pub swing: Option<SwingAnim>,
    /// Counts down to the bite, while waiting.
    pub bite_timer: Option<Timer>,
    /// The single reaction deadline, while biting. The early-reel path
    /// does not get a second countdown of its own.
    pub reaction_timer: Option<Timer>,
    /// Reel-in animation, while resolving.
    pub resolve_timer: Option<Timer>,
}

/// Owns the active session and the exposed query surface. The sole writer
/// of fishing phase transitions; other modules communicate via events.
#[derive(Resource, Debug, Default)]
pub struct FishingState {
    pub phase: FishingPhase,
    /// Seconds the cast button has been held during the current charge.
    pub charge_held: f32,
    pub session: Option<CastSession>,
    /// Distance of the most recent completed cast. The reward module reads
    /// this to bias rarity.
    pub last_cast_distance: f32,
    /// Running while the rod is broken.
    pub repair_timer: Option<Timer>,
}

impl FishingState {
    /// Begin charging a cast. No-op (returns false) while already
    /// charging, while a line is out, or while the rod is broken.
    pub fn start_charge(&mut self) -> bool {
        if self.phase != FishingPhase::Idle {
            return false;
        }
        self.phase = FishingPhase::Charging;
        self.charge_held = 0.0;
        true
    }

    pub fn is_charging(&self) -> bool {
        self.phase == FishingPhase::Charging
    }

    /// True from release until the session resolves or is interrupted.
    pub fn is_line_out(&self) -> bool {
        matches!(
            self.phase,
            FishingPhase::Casting
                | FishingPhase::Waiting
                | FishingPhase::Biting
                | FishingPhase::Resolving { .. }
        )
    }

    pub fn is_biting(&self) -> bool {
        self.phase == FishingPhase::Biting
    }

    pub fn is_broken(&self) -> bool {
        self.phase == FishingPhase::Broken
    }

    /// Drop the session and return to Idle. Entity cleanup is the caller's
    /// job; this only clears the bookkeeping.
    pub fn reset(&mut self) {
        self.phase = FishingPhase::Idle;
        self.charge_held = 0.0;
        self.session = None;
        self.repair_timer = None;
    }
}

// ─── Animation task records ──────────────────────────────────────────────────

/// The forward rod swing, advanced once per tick by the orchestrator.
/// Explicit state instead of suspended control flow so interruption at any
/// frame boundary leaves nothing dangling.
#[derive(Debug, Clone)]
pub struct SwingAnim {
    pub elapsed: f32,
    pub duration: f32,
    pub from_angle: f32,
    pub to_angle: f32,
    /// The bobber leaves the rod tip partway through the swing; this keeps
    /// the spawn from firing twice.
    pub bobber_spawned: bool,
}

impl SwingAnim {
    /// Advance by `dt` and return raw progress in [0, 1].
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.progress()
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration.max(f32::EPSILON)).clamp(0.0, 1.0)
    }

    /// Current pose angle, eased.
    pub fn angle(&self) -> f32 {
        lerp(self.from_angle, self.to_angle, ease_out_quad(self.progress()))
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

// ─── Marker Components ───────────────────────────────────────────────────────

/// The floating marker where the line enters the water. At most one exists
/// at any instant.
#[derive(Component, Debug, Clone)]
pub struct Bobber {
    /// Water-surface position the idle bob oscillates around.
    pub rest_pos: Vec2,
}

/// The line sprite stretched between the rod tip and the bobber. Spawned
/// and despawned together with the bobber.
#[derive(Component)]
pub struct FishingLine;

/// Parabolic flight of the bobber from the rod tip to the landing point.
/// Removed once the bobber settles on the water.
#[derive(Component, Debug, Clone)]
pub struct BobberFlight {
    pub elapsed: f32,
    pub duration: f32,
    pub from: Vec2,
    pub to: Vec2,
    /// Arc height above the straight line between endpoints.
    pub peak: f32,
}

impl BobberFlight {
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration.max(f32::EPSILON)).clamp(0.0, 1.0)
    }

    /// Position along the arc at the current progress.
    pub fn position(&self) -> Vec2 {
        let t = self.progress();
        let base = self.from.lerp(self.to, t);
        // 4t(1-t) peaks at 1.0 when t = 0.5 and is zero at both endpoints.
        base + Vec2::Y * (self.peak * 4.0 * t * (1.0 - t))
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Short rod shake after a break. Removed (and the rig hidden) when done.
#[derive(Component, Debug, Clone)]
pub struct RigShake {
    pub timer: Timer,
}
