mod shared;
mod input;
mod player;
mod fishing;
mod rewards;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Driftline".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<KeyBindings>()
        .init_resource::<PlayerInput>()
        .insert_resource(load_fishing_config())
        .init_resource::<TackleState>()
        // Events
        .add_event::<RodBreakEvent>()
        .add_event::<CastResolvedEvent>()
        .add_event::<RareFishSightingEvent>()
        .add_event::<SplashEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<ToastEvent>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(fishing::FishingPlugin)
        .add_plugins(rewards::RewardsPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Tunables ship embedded; a broken edit falls back to defaults instead of
/// refusing to boot.
fn load_fishing_config() -> FishingConfig {
    match FishingConfig::from_ron(include_str!("../assets/fishing.ron")) {
        Ok(config) => config,
        Err(err) => {
            warn!("assets/fishing.ron did not parse ({}), using defaults", err);
            FishingConfig::default()
        }
    }
}
