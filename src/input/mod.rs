//! Input module - ActionInput resource and capture_input system

use bevy::prelude::*;

use crate::constants::STICK_DEADZONE;

/// Buffered input for the player and the shot button
#[derive(Resource, Default, Debug)]
pub struct ActionInput {
    /// Continuous movement direction, each axis in [-1, 1], +y down
    pub move_dir: Vec2,
    pub action_held: bool,
    /// Edges accumulate until the shootout consumes them
    pub action_pressed: bool,
    pub action_released: bool,
    pub abort_pressed: bool,
}

impl ActionInput {
    /// Take the buffered edges, clearing them for the next frame
    pub fn take_edges(&mut self) -> (bool, bool, bool) {
        let edges = (self.action_pressed, self.action_released, self.abort_pressed);
        self.action_pressed = false;
        self.action_released = false;
        self.abort_pressed = false;
        edges
    }
}

/// Runs in Update to capture input state before it's cleared
pub fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut input: ResMut<ActionInput>,
) {
    // Movement (continuous - overwrite each frame)
    let mut move_dir = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        move_dir.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        move_dir.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        move_dir.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        move_dir.y += 1.0;
    }

    for gamepad in &gamepads {
        let stick = gamepad.left_stick();
        if stick.length() > STICK_DEADZONE {
            // Stick y is up-positive
            move_dir += Vec2::new(stick.x, -stick.y);
        }
    }
    input.move_dir = move_dir.clamp(Vec2::NEG_ONE, Vec2::ONE);

    // Shot button (Space / South)
    let held_now = keyboard.pressed(KeyCode::Space)
        || gamepads.iter().any(|gp| gp.pressed(GamepadButton::South));
    if held_now && !input.action_held {
        input.action_pressed = true;
    }
    if !held_now && input.action_held {
        input.action_released = true;
    }
    input.action_held = held_now;

    // Abort (Escape / East)
    if keyboard.just_pressed(KeyCode::Escape)
        || gamepads.iter().any(|gp| gp.just_pressed(GamepadButton::East))
    {
        input.abort_pressed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_edges_clears() {
        let mut input = ActionInput {
            action_pressed: true,
            abort_pressed: true,
            ..Default::default()
        };
        assert_eq!(input.take_edges(), (true, false, true));
        assert_eq!(input.take_edges(), (false, false, false));
    }
}
