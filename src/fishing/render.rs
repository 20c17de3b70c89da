//! Visual side effects of the fishing action: rod pose, charge meter,
//! bobber motion, and the line sprite. Nothing here mutates the state
//! machine; everything reads `FishingState` and draws.

use bevy::prelude::*;
use rand::Rng;

use super::{Bobber, BobberFlight, FishingLine, FishingPhase, FishingState, RigShake};
use crate::shared::*;

// ─── Bobber motion ────────────────────────────────────────────────────────────

/// Gentle idle bob while waiting; an aggressive jitter while a fish is
/// struggling on the line. Flight and reel-in own the transform in their
/// phases, so this only runs for a settled bobber.
pub fn animate_bobber(
    fishing: Res<FishingState>,
    time: Res<Time>,
    mut bobber_query: Query<(&mut Transform, &Bobber), Without<BobberFlight>>,
) {
    for (mut transform, bobber) in bobber_query.iter_mut() {
        match fishing.phase {
            FishingPhase::Waiting => {
                let bob = (time.elapsed_secs() * 1.8).sin() * 2.0;
                transform.translation.x = bobber.rest_pos.x;
                transform.translation.y = bobber.rest_pos.y + bob;
            }
            FishingPhase::Biting => {
                let mut rng = rand::thread_rng();
                transform.translation.x = bobber.rest_pos.x + rng.gen_range(-3.0..3.0);
                transform.translation.y = bobber.rest_pos.y + rng.gen_range(-5.0..1.5);
            }
            _ => {}
        }
    }
}

// ─── Rod pose ─────────────────────────────────────────────────────────────────

/// Pose the rig for the current phase: wound back proportionally to power
/// while charging, the eased swing while casting, rest otherwise. A rig
/// mid-shake is left to `update_rig_shake`.
pub fn update_rod_pose(
    fishing: Res<FishingState>,
    config: Res<FishingConfig>,
    mut rig_query: Query<(&mut Transform, &RodRig), Without<RigShake>>,
) {
    for (mut transform, rig) in rig_query.iter_mut() {
        let angle = match fishing.phase {
            FishingPhase::Charging => {
                let power =
                    super::charge::charge_power(fishing.charge_held, config.max_charge_secs);
                super::cast::charge_wind_angle(power)
            }
            FishingPhase::Casting => fishing
                .session
                .as_ref()
                .and_then(|s| s.swing.as_ref())
                .map(|swing| swing.angle())
                .unwrap_or(super::cast::ROD_SNAP_ANGLE),
            _ => rig.rest_angle,
        };
        transform.rotation = Quat::from_rotation_z(angle);
    }
}

/// Rattle the rig after a snap, then hide it for the repair cooldown.
pub fn update_rig_shake(
    time: Res<Time>,
    mut rig_query: Query<(Entity, &mut Transform, &mut Visibility, &mut RigShake)>,
    mut commands: Commands,
) {
    for (entity, mut transform, mut visibility, mut shake) in rig_query.iter_mut() {
        shake.timer.tick(time.delta());

        if shake.timer.just_finished() {
            transform.translation.x = ROD_RIG_LOCAL.x;
            *visibility = Visibility::Hidden;
            commands.entity(entity).remove::<RigShake>();
            continue;
        }

        let remaining = 1.0 - shake.timer.fraction();
        let offset = (shake.timer.elapsed_secs() * 55.0).sin() * 2.5 * remaining;
        transform.translation.x = ROD_RIG_LOCAL.x + offset;
    }
}

// ─── Charge meter ─────────────────────────────────────────────────────────────

/// Show the meter while charging and scale the fill with current power.
pub fn update_charge_meter(
    fishing: Res<FishingState>,
    config: Res<FishingConfig>,
    mut bg_query: Query<&mut Visibility, (With<ChargeMeterBg>, Without<ChargeMeterFill>)>,
    mut fill_query: Query<(&mut Transform, &mut Visibility), With<ChargeMeterFill>>,
) {
    let charging = fishing.is_charging();
    let power = super::charge::charge_power(fishing.charge_held, config.max_charge_secs);

    for mut visibility in bg_query.iter_mut() {
        *visibility = if charging {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for (mut transform, mut visibility) in fill_query.iter_mut() {
        *visibility = if charging {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        transform.scale.x = power.max(0.001);
    }
}

// ─── Line ─────────────────────────────────────────────────────────────────────

/// Stretch the line sprite from the rod tip to the bobber.
pub fn update_fishing_line(
    rig_query: Query<&GlobalTransform, With<RodRig>>,
    bobber_query: Query<&Transform, (With<Bobber>, Without<FishingLine>)>,
    mut line_query: Query<(&mut Transform, &mut Sprite), With<FishingLine>>,
) {
    let Ok(bobber) = bobber_query.get_single() else {
        return;
    };
    let tip = super::charge::cast_origin(&rig_query);
    let end = bobber.translation.truncate();

    let delta = end - tip;
    let length = delta.length().max(1.0);
    let midpoint = tip + delta / 2.0;

    for (mut transform, mut sprite) in line_query.iter_mut() {
        transform.translation.x = midpoint.x;
        transform.translation.y = midpoint.y;
        transform.rotation = Quat::from_rotation_z(delta.y.atan2(delta.x));
        sprite.custom_size = Some(Vec2::new(length, 1.0));
    }
}
