//! Scene scaffolding: the pier, the water, the angler, and the rod rig
//! that the fishing module animates.

use bevy::prelude::*;

use crate::shared::*;

const COLOR_WATER: Color = Color::srgb(0.15, 0.35, 0.55);
const COLOR_SKY: Color = Color::srgb(0.45, 0.62, 0.78);
const COLOR_PIER: Color = Color::srgb(0.45, 0.32, 0.2);
const COLOR_ANGLER: Color = Color::srgb(0.85, 0.7, 0.5);
const COLOR_ROD: Color = Color::srgb(0.3, 0.2, 0.12);
const COLOR_METER_BG: Color = Color::srgba(0.1, 0.1, 0.1, 0.8);
const COLOR_METER_FILL: Color = Color::srgb(0.95, 0.75, 0.15);

const METER_WIDTH: f32 = 36.0;
const METER_HEIGHT: f32 = 5.0;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scene);
    }
}

fn spawn_scene(mut commands: Commands) {
    // Backdrop: sky above the waterline, water below it.
    commands.spawn((
        Sprite {
            color: COLOR_SKY,
            custom_size: Some(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, WATER_SURFACE_Y + SCREEN_HEIGHT / 2.0, -2.0)),
    ));
    commands.spawn((
        Sprite {
            color: COLOR_WATER,
            custom_size: Some(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, WATER_SURFACE_Y - SCREEN_HEIGHT / 2.0, -1.0)),
    ));

    // The pier the angler stands on.
    commands.spawn((
        Sprite {
            color: COLOR_PIER,
            custom_size: Some(Vec2::new(180.0, 14.0)),
            ..default()
        },
        Transform::from_translation(Vec3::new(PLAYER_POS.x + 20.0, PLAYER_POS.y - 26.0, 0.0)),
    ));

    // The angler, with the rod rig and charge meter as children so they
    // follow without bookkeeping.
    commands
        .spawn((
            Sprite {
                color: COLOR_ANGLER,
                custom_size: Some(Vec2::new(14.0, 30.0)),
                ..default()
            },
            Transform::from_translation(Vec3::new(PLAYER_POS.x, PLAYER_POS.y, 1.0)),
            Player,
        ))
        .with_children(|parent| {
            parent.spawn((
                Sprite {
                    color: COLOR_ROD,
                    custom_size: Some(Vec2::new(34.0, 2.0)),
                    anchor: bevy::sprite::Anchor::CenterLeft,
                    ..default()
                },
                Transform::from_translation(Vec3::new(ROD_RIG_LOCAL.x, ROD_RIG_LOCAL.y, 2.0))
                    .with_rotation(Quat::from_rotation_z(crate::fishing::cast::ROD_REST_ANGLE)),
                RodRig {
                    rest_angle: crate::fishing::cast::ROD_REST_ANGLE,
                },
            ));

            // Charge meter above the angler's head; hidden until charging.
            parent.spawn((
                Sprite {
                    color: COLOR_METER_BG,
                    custom_size: Some(Vec2::new(METER_WIDTH, METER_HEIGHT)),
                    ..default()
                },
                Transform::from_translation(Vec3::new(0.0, 26.0, 2.0)),
                Visibility::Hidden,
                ChargeMeterBg,
            ));
            parent.spawn((
                Sprite {
                    color: COLOR_METER_FILL,
                    custom_size: Some(Vec2::new(METER_WIDTH, METER_HEIGHT - 2.0)),
                    anchor: bevy::sprite::Anchor::CenterLeft,
                    ..default()
                },
                Transform::from_translation(Vec3::new(-METER_WIDTH / 2.0, 26.0, 3.0))
                    .with_scale(Vec3::new(0.001, 1.0, 1.0)),
                Visibility::Hidden,
                ChargeMeterFill,
            ));
        });
}
