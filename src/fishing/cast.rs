//! Cast trajectory driver: rod swing, bobber spawn, parabolic flight.

use bevy::prelude::*;

use super::{
    Bobber, BobberFlight, CastSession, FishingLine, FishingPhase, FishingState, SwingAnim,
};
use crate::shared::*;

// ─── Pose constants ──────────────────────────────────────────────────────────

/// Rig pose angles, radians. Positive winds the rod back over the
/// shoulder; the snap pose points it out over the water.
pub const ROD_REST_ANGLE: f32 = 0.5;
pub const ROD_WOUND_MAX_ANGLE: f32 = 1.6;
pub const ROD_SNAP_ANGLE: f32 = -0.35;

/// Wind-back pose while charging, proportional to current power.
pub fn charge_wind_angle(power: f32) -> f32 {
    lerp(ROD_REST_ANGLE, ROD_WOUND_MAX_ANGLE, power.clamp(0.0, 1.0))
}

// ─── Session creation ────────────────────────────────────────────────────────

/// Turn a released charge into a cast session and start the rod swing.
///
/// Distance scales linearly with power; the landing point sits straight
/// out over the water with its height pinned to the surface.
pub fn begin_cast(
    fishing: &mut FishingState,
    config: &FishingConfig,
    origin: Vec2,
    power: f32,
) {
    let cast_distance = lerp(config.min_cast_distance, config.max_cast_distance, power);
    let landing_point = Vec2::new(origin.x + cast_distance, WATER_SURFACE_Y);

    fishing.session = Some(CastSession {
        power,
        cast_distance,
        landing_point,
        speed_bonus: 0.0,
        swing: Some(SwingAnim {
            elapsed: 0.0,
            duration: config.swing_duration,
            from_angle: charge_wind_angle(power),
            to_angle: ROD_SNAP_ANGLE,
            bobber_spawned: false,
        }),
        bite_timer: None,
        reaction_timer: None,
        resolve_timer: None,
    });
    fishing.last_cast_distance = cast_distance;
    fishing.charge_held = 0.0;
    fishing.phase = FishingPhase::Casting;
}

// ─── Systems ─────────────────────────────────────────────────────────────────

/// Advance the rod swing; partway through, the bobber leaves the rod tip
/// and begins its arc toward the landing point.
pub fn update_rod_swing(
    mut fishing: ResMut<FishingState>,
    config: Res<FishingConfig>,
    time: Res<Time>,
    rig_query: Query<&GlobalTransform, With<RodRig>>,
    stale_query: Query<Entity, Or<(With<Bobber>, With<FishingLine>)>>,
    mut commands: Commands,
) {
    if fishing.phase != FishingPhase::Casting {
        return;
    }
    let origin = super::charge::cast_origin(&rig_query);
    let Some(session) = fishing.session.as_mut() else {
        return;
    };
    let Some(swing) = session.swing.as_mut() else {
        return;
    };

    let progress = swing.advance(time.delta_secs());

    if !swing.bobber_spawned && progress >= config.bobber_spawn_fraction {
        swing.bobber_spawned = true;

        let flight = BobberFlight {
            elapsed: 0.0,
            duration: lerp(
                config.min_flight_duration,
                config.max_flight_duration,
                session.power,
            ),
            from: origin,
            to: session.landing_point,
            peak: lerp(config.min_flight_peak, config.max_flight_peak, session.power),
        };
        spawn_bobber(&mut commands, &stale_query, session.landing_point, flight);
    }

    if swing.finished() {
        session.swing = None;
    }
}

/// Advance the bobber along its arc. On landing: snap to the landing
/// point, raise the splash, and open the bite wait.
pub fn update_bobber_flight(
    mut fishing: ResMut<FishingState>,
    config: Res<FishingConfig>,
    tackle: Res<TackleState>,
    time: Res<Time>,
    mut flight_query: Query<(Entity, &mut Transform, &mut BobberFlight)>,
    mut splash_events: EventWriter<SplashEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
    mut commands: Commands,
) {
    for (entity, mut transform, mut flight) in flight_query.iter_mut() {
        flight.elapsed += time.delta_secs();

        if !flight.finished() {
            let pos = flight.position();
            transform.translation.x = pos.x;
            transform.translation.y = pos.y;
            continue;
        }

        // Touchdown. The landing height is always the water surface.
        transform.translation.x = flight.to.x;
        transform.translation.y = flight.to.y;
        commands.entity(entity).remove::<BobberFlight>();

        if fishing.phase != FishingPhase::Casting {
            continue;
        }
        let speed_bonus = tackle.clamped_speed_bonus();
        if let Some(session) = fishing.session.as_mut() {
            splash_events.send(SplashEvent {
                position: flight.to,
                power: session.power,
            });
            sfx_events.send(PlaySfxEvent {
                sfx_id: "bobber_splash".to_string(),
            });

            // The tackle bonus is read once, here, and fixed for the cast.
            session.speed_bonus = speed_bonus;
            let delay = bite_delay(&config, session.power, speed_bonus);
            session.bite_timer = Some(Timer::from_seconds(delay, TimerMode::Once));
        }
        fishing.phase = FishingPhase::Waiting;
    }
}

/// Effective bite wait: deeper casts bite slower, tackle speeds the wait
/// back up, and the result is clamped strictly positive.
pub fn bite_delay(config: &FishingConfig, power: f32, speed_bonus: f32) -> f32 {
    let base = lerp(config.min_bite_delay, config.max_bite_delay, power);
    (base * (1.0 - speed_bonus)).max(config.min_effective_delay)
}

// ─── Entity management ───────────────────────────────────────────────────────

/// Spawn the bobber and its line. Any stale bobber or line is destroyed
/// first — at most one of each ever exists.
pub fn spawn_bobber(
    commands: &mut Commands,
    stale_query: &Query<Entity, Or<(With<Bobber>, With<FishingLine>)>>,
    landing_point: Vec2,
    flight: BobberFlight,
) {
    for entity in stale_query.iter() {
        commands.entity(entity).despawn_recursive();
    }

    let start = flight.from;
    commands.spawn((
        Sprite {
            color: Color::srgb(0.9, 0.25, 0.2),
            custom_size: Some(Vec2::new(7.0, 9.0)),
            ..default()
        },
        Transform::from_translation(Vec3::new(start.x, start.y, 5.0)),
        Bobber {
            rest_pos: landing_point,
        },
        flight,
    ));

    commands.spawn((
        Sprite {
            color: Color::srgba(0.95, 0.95, 0.9, 0.8),
            custom_size: Some(Vec2::new(1.0, 1.0)),
            ..default()
        },
        Transform::from_translation(Vec3::new(start.x, start.y, 4.0)),
        FishingLine,
    ));
}

/// Destroy the bobber/line pair, if present.
pub fn despawn_bobber(
    commands: &mut Commands,
    query: &Query<Entity, Or<(With<Bobber>, With<FishingLine>)>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_distance_monotone_and_bounded() {
        let config = FishingConfig::default();
        let mut prev = -1.0;
        for i in 0..=100 {
            let power = i as f32 / 100.0;
            let d = lerp(config.min_cast_distance, config.max_cast_distance, power);
            assert!(d >= prev, "distance must not decrease with power");
            assert!(d >= config.min_cast_distance && d <= config.max_cast_distance);
            prev = d;
        }
    }

    #[test]
    fn test_bite_delay_formula() {
        let config = FishingConfig::default();
        let expected = lerp(config.min_bite_delay, config.max_bite_delay, 0.3) * 0.75;
        assert!((bite_delay(&config, 0.3, 0.25) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_bite_delay_clamped_strictly_positive() {
        let config = FishingConfig::default();
        let d = bite_delay(&config, 0.0, 1.0);
        assert!(d >= config.min_effective_delay);
        assert!(d > 0.0);
    }

    #[test]
    fn test_flight_arc_endpoints_and_peak() {
        let mut flight = BobberFlight {
            elapsed: 0.0,
            duration: 1.0,
            from: Vec2::new(0.0, 10.0),
            to: Vec2::new(100.0, -60.0),
            peak: 40.0,
        };
        assert!(flight.position().abs_diff_eq(flight.from, 1e-4));

        flight.elapsed = 0.5;
        let mid = flight.position();
        let chord_mid = flight.from.lerp(flight.to, 0.5);
        assert!((mid.y - (chord_mid.y + 40.0)).abs() < 1e-3);

        flight.elapsed = 1.0;
        assert!(flight.position().abs_diff_eq(flight.to, 1e-4));
    }
}
