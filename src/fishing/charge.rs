//! Charge handling: the power curve sampler and the charging systems.

use bevy::prelude::*;

use super::{FishingPhase, FishingState};
use crate::shared::*;

// ─── Power curve ─────────────────────────────────────────────────────────────

/// Power for a given hold duration: a triangle wave that ramps 0 → 1 over
/// `[0, max_charge]`, then 1 → 0 over `[max_charge, 2 * max_charge]`, and
/// repeats for as long as the button stays down.
///
/// The ping-pong shape is deliberate: holding forever never overflows, and
/// timing the release near a peak is the skill expression. Pure function of
/// hold time and configuration; no error states.
pub fn charge_power(held: f32, max_charge: f32) -> f32 {
    let max_charge = max_charge.max(f32::EPSILON);
    let t = held.max(0.0).rem_euclid(2.0 * max_charge);
    if t <= max_charge {
        t / max_charge
    } else {
        2.0 - t / max_charge
    }
}

// ─── Systems ─────────────────────────────────────────────────────────────────

/// Start a charge on the press edge, accumulate hold time while the button
/// stays down, and hand off to the cast driver on release.
pub fn update_charge(
    mut fishing: ResMut<FishingState>,
    input: Res<PlayerInput>,
    config: Res<FishingConfig>,
    time: Res<Time>,
    rig_query: Query<&GlobalTransform, With<RodRig>>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    match fishing.phase {
        FishingPhase::Idle => {
            // Guarded inside start_charge: no-op while broken or line out.
            if input.cast_pressed && fishing.start_charge() {
                sfx_events.send(PlaySfxEvent {
                    sfx_id: "charge_start".to_string(),
                });
            }
        }
        FishingPhase::Charging => {
            if input.cast_held {
                fishing.charge_held += time.delta_secs();
            } else {
                let power = charge_power(fishing.charge_held, config.max_charge_secs);
                let origin = cast_origin(&rig_query);
                super::cast::begin_cast(&mut fishing, &config, origin, power);
                sfx_events.send(PlaySfxEvent {
                    sfx_id: "cast_whoosh".to_string(),
                });
            }
        }
        _ => {}
    }
}

/// World position of the rod tip, or the fixed fallback when no rig is
/// spawned (headless tests run without a scene).
pub fn cast_origin(rig_query: &Query<&GlobalTransform, With<RodRig>>) -> Vec2 {
    match rig_query.get_single() {
        Ok(rig) => rig.translation().truncate(),
        Err(_) => PLAYER_POS + ROD_TIP_OFFSET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: f32 = 1.5;

    #[test]
    fn test_power_bounds() {
        let mut t = 0.0;
        while t < 10.0 * M {
            let p = charge_power(t, M);
            assert!((0.0..=1.0).contains(&p), "power({}) = {} out of bounds", t, p);
            t += 0.013;
        }
    }

    #[test]
    fn test_power_ramps_to_peak_at_max_charge() {
        assert_eq!(charge_power(0.0, M), 0.0);
        assert!((charge_power(M / 2.0, M) - 0.5).abs() < 1e-6);
        assert!((charge_power(M, M) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_power_descends_after_peak() {
        assert!((charge_power(1.5 * M, M) - 0.5).abs() < 1e-6);
        assert!(charge_power(2.0 * M - 1e-4, M) < 1e-3);
    }

    #[test]
    fn test_power_period_is_twice_max_charge() {
        for &t in &[0.1, 0.7, 1.2, 1.49] {
            let a = charge_power(t, M);
            let b = charge_power(t + 2.0 * M, M);
            let c = charge_power(t + 6.0 * M, M);
            assert!((a - b).abs() < 1e-4, "period mismatch at t={}", t);
            assert!((a - c).abs() < 1e-4, "period mismatch at t={}", t);
        }
    }

    #[test]
    fn test_power_piecewise_linear() {
        // Midpoint of any two nearby samples on the same ramp lies on the line.
        for &(lo, hi) in &[(0.2, 0.4), (1.6, 1.9), (3.2, 3.4)] {
            let mid = charge_power((lo + hi) / 2.0, M);
            let avg = (charge_power(lo, M) + charge_power(hi, M)) / 2.0;
            assert!((mid - avg).abs() < 1e-5, "not linear on [{}, {}]", lo, hi);
        }
    }

    #[test]
    fn test_power_degenerate_max_charge_does_not_panic() {
        let p = charge_power(1.0, 0.0);
        assert!((0.0..=1.0).contains(&p));
    }
}
