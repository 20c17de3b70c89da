//! Bite scheduler and reaction window.

use bevy::prelude::*;

use super::resolve::begin_resolution;
use super::{FishingPhase, FishingState};
use crate::shared::*;

/// Count down the bite wait; when it elapses, open the reaction window and
/// notify the rare-catch tracker (once per cast, whatever happens next).
pub fn update_bite_timer(
    mut fishing: ResMut<FishingState>,
    config: Res<FishingConfig>,
    time: Res<Time>,
    mut sighting_events: EventWriter<RareFishSightingEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    if fishing.phase != FishingPhase::Waiting {
        return;
    }
    let Some(session) = fishing.session.as_mut() else {
        return;
    };

    let bite = match session.bite_timer.as_mut() {
        Some(timer) => {
            timer.tick(time.delta());
            timer.just_finished()
        }
        None => false,
    };
    if !bite {
        return;
    }

    session.bite_timer = None;
    session.reaction_timer = Some(Timer::from_seconds(config.reaction_window, TimerMode::Once));
    let cast_distance = session.cast_distance;
    fishing.phase = FishingPhase::Biting;

    sighting_events.send(RareFishSightingEvent { cast_distance });
    sfx_events.send(PlaySfxEvent {
        sfx_id: "fish_bite".to_string(),
    });
}

/// Resolve the session from player input or window expiry.
///
/// A reel during Biting is a catch. A reel strictly during Waiting is the
/// early-reel action: it resolves immediately as "nothing caught" — a
/// deliberate tradeoff against waiting out the bite, not an ignored input.
/// Both miss paths funnel through the same resolution routine on the same
/// single deadline, so no tick can resolve a session twice.
pub fn update_reaction_window(
    mut fishing: ResMut<FishingState>,
    config: Res<FishingConfig>,
    input: Res<PlayerInput>,
    time: Res<Time>,
    mut resolved_events: EventWriter<CastResolvedEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    match fishing.phase {
        FishingPhase::Waiting => {
            if input.cast_pressed {
                begin_resolution(&mut fishing, &config, false, &mut resolved_events);
                sfx_events.send(PlaySfxEvent {
                    sfx_id: "reel_early".to_string(),
                });
            }
        }
        FishingPhase::Biting => {
            if input.cast_pressed {
                begin_resolution(&mut fishing, &config, true, &mut resolved_events);
                sfx_events.send(PlaySfxEvent {
                    sfx_id: "reel_catch".to_string(),
                });
                return;
            }

            let expired = match fishing
                .session
                .as_mut()
                .and_then(|s| s.reaction_timer.as_mut())
            {
                Some(timer) => {
                    timer.tick(time.delta());
                    timer.just_finished()
                }
                None => false,
            };
            if expired {
                begin_resolution(&mut fishing, &config, false, &mut resolved_events);
                sfx_events.send(PlaySfxEvent {
                    sfx_id: "fish_escape".to_string(),
                });
            }
        }
        _ => {}
    }
}
