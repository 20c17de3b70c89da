//! Session resolution: outcome dispatch and the reel-in animation.
//!
//! All gameplay "failure" lands here as an ordinary Miss transition — there
//! is no exceptional path. A miss still notifies the reward sink (with a
//! negative outcome) so any cross-system "line is out" bookkeeping is
//! reliably reset.

use bevy::prelude::*;

use super::{Bobber, FishingLine, FishingPhase, FishingState};
use crate::shared::*;

/// Decide the session outcome and start the reel-in.
///
/// The reward sink is notified here, exactly once per session: this is the
/// only place a `CastResolvedEvent` is ever sent. An interrupted session
/// never reaches it.
pub fn begin_resolution(
    fishing: &mut FishingState,
    config: &FishingConfig,
    caught: bool,
    resolved_events: &mut EventWriter<CastResolvedEvent>,
) {
    let Some(session) = fishing.session.as_mut() else {
        return;
    };
    session.bite_timer = None;
    session.reaction_timer = None;
    session.resolve_timer = Some(Timer::from_seconds(config.resolve_duration, TimerMode::Once));

    resolved_events.send(CastResolvedEvent {
        caught,
        cast_distance: session.cast_distance,
    });
    fishing.phase = FishingPhase::Resolving { caught };
}

/// Play out the reel-in: drag the bobber back toward the rod tip, then
/// destroy it and return to Idle.
pub fn update_resolution(
    mut fishing: ResMut<FishingState>,
    time: Res<Time>,
    rig_query: Query<&GlobalTransform, With<RodRig>>,
    mut bobber_query: Query<&mut Transform, With<Bobber>>,
    cleanup_query: Query<Entity, Or<(With<Bobber>, With<FishingLine>)>>,
    mut commands: Commands,
) {
    if !matches!(fishing.phase, FishingPhase::Resolving { .. }) {
        return;
    }
    let origin = super::charge::cast_origin(&rig_query);
    let Some(session) = fishing.session.as_mut() else {
        fishing.reset();
        return;
    };

    let (fraction, done) = match session.resolve_timer.as_mut() {
        Some(timer) => {
            timer.tick(time.delta());
            (timer.fraction(), timer.just_finished())
        }
        None => (1.0, true),
    };

    let landing = session.landing_point;
    for mut transform in bobber_query.iter_mut() {
        let pos = landing.lerp(origin, ease_out_quad(fraction));
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
    }

    if done {
        super::cast::despawn_bobber(&mut commands, &cleanup_query);
        fishing.reset();
    }
}
