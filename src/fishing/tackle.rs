//! Rod break and recovery: the interrupt controller.
//!
//! A break may arrive at any frame boundary. It cancels whatever the
//! session was doing, releases the bobber and line in the same frame (a
//! new session could legally start on the very next tick), and holds the
//! machine in Broken until the repair cooldown grants a fresh rod.

use bevy::prelude::*;

use super::{Bobber, FishingLine, FishingPhase, FishingState, RigShake};
use crate::shared::*;

/// Duration of the snap feedback shake on the rig.
const BREAK_SHAKE_SECS: f32 = 0.4;

/// Handle external break triggers.
///
/// Idempotent: a trigger while Idle or already Broken is a no-op — no
/// entity is created or destroyed and no timer restarts.
pub fn handle_rod_break(
    mut break_events: EventReader<RodBreakEvent>,
    mut fishing: ResMut<FishingState>,
    config: Res<FishingConfig>,
    cleanup_query: Query<Entity, Or<(With<Bobber>, With<FishingLine>)>>,
    rig_query: Query<Entity, With<RodRig>>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
    mut commands: Commands,
) {
    for _ in break_events.read() {
        if matches!(fishing.phase, FishingPhase::Idle | FishingPhase::Broken) {
            continue;
        }

        // Cancel the in-flight session and release its entities now.
        super::cast::despawn_bobber(&mut commands, &cleanup_query);
        fishing.session = None;
        fishing.charge_held = 0.0;
        fishing.phase = FishingPhase::Broken;
        fishing.repair_timer = Some(Timer::from_seconds(
            config.rod_repair_cooldown,
            TimerMode::Once,
        ));

        if let Ok(rig) = rig_query.get_single() {
            commands.entity(rig).insert(RigShake {
                timer: Timer::from_seconds(BREAK_SHAKE_SECS, TimerMode::Once),
            });
        }
        sfx_events.send(PlaySfxEvent {
            sfx_id: "rod_snap".to_string(),
        });
    }
}

/// Count out the repair cooldown; when it elapses, grant a new rod and
/// return to Idle.
pub fn update_rod_recovery(
    mut fishing: ResMut<FishingState>,
    time: Res<Time>,
    mut rig_query: Query<&mut Visibility, With<RodRig>>,
    mut toast_events: EventWriter<ToastEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    if fishing.phase != FishingPhase::Broken {
        return;
    }

    let repaired = match fishing.repair_timer.as_mut() {
        Some(timer) => {
            timer.tick(time.delta());
            timer.just_finished()
        }
        None => {
            warn!("broken rod with no repair timer, recovering immediately");
            true
        }
    };
    if !repaired {
        return;
    }

    fishing.reset();

    for mut visibility in rig_query.iter_mut() {
        *visibility = Visibility::Inherited;
    }
    toast_events.send(ToastEvent {
        message: "You've been granted a new rod.".to_string(),
        duration_secs: 3.0,
    });
    sfx_events.send(PlaySfxEvent {
        sfx_id: "rod_granted".to_string(),
    });
}
