use bevy::prelude::*;

use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, reset_and_read_input);
    }
}

/// The single point where hardware input becomes game actions.
///
/// Everything downstream reads `PlayerInput`; no gameplay system touches
/// `ButtonInput` directly, so headless tests can drive the whole machine by
/// writing this resource.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    game_state: Res<State<GameState>>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    input.pause = keys.just_pressed(bindings.pause);

    if *game_state.get() != GameState::Playing {
        return;
    }

    input.cast_pressed =
        keys.just_pressed(bindings.cast) || mouse.just_pressed(MouseButton::Left);
    input.cast_held = keys.pressed(bindings.cast) || mouse.pressed(MouseButton::Left);
}
