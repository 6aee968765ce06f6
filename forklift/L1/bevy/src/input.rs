//! Keyboard and mouse input, reduced to logical actions.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use forklift_core::{Action, ActionSet, InputFrame, InputSource, LoadPreset};
use nalgebra::Vector2;

/// Keys that act while held.
pub const HELD_KEYS: [(KeyCode, Action); 8] = [
    (KeyCode::KeyW, Action::MoveForward),
    (KeyCode::KeyS, Action::MoveBack),
    (KeyCode::KeyA, Action::StrafeLeft),
    (KeyCode::KeyD, Action::StrafeRight),
    (KeyCode::KeyQ, Action::RotateLeft),
    (KeyCode::KeyE, Action::RotateRight),
    (KeyCode::KeyR, Action::LiftUp),
    (KeyCode::KeyF, Action::LiftDown),
];

/// Keys that act once per press.
pub const PRESS_KEYS: [(KeyCode, Action); 7] = [
    (KeyCode::Digit1, Action::SetLoadPreset(LoadPreset::Empty)),
    (KeyCode::Digit2, Action::SetLoadPreset(LoadPreset::Light)),
    (KeyCode::Digit3, Action::SetLoadPreset(LoadPreset::Medium)),
    (KeyCode::Digit4, Action::SetLoadPreset(LoadPreset::Heavy)),
    (KeyCode::Space, Action::Pickup),
    (KeyCode::KeyG, Action::Drop),
    (KeyCode::Escape, Action::Quit),
];

/// Maps the keyboard state to this tick's actions.
#[must_use]
pub fn actions_from_keys(keys: &ButtonInput<KeyCode>) -> ActionSet {
    let held = HELD_KEYS
        .iter()
        .filter(|(key, _)| keys.pressed(*key))
        .map(|&(_, action)| action);
    let pressed = PRESS_KEYS
        .iter()
        .filter(|(key, _)| keys.just_pressed(*key))
        .map(|&(_, action)| action);
    held.chain(pressed).collect()
}

/// Input gathered this frame, handed to the simulation as its
/// [`InputSource`].
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FrameInput(pub InputFrame);

impl InputSource for FrameInput {
    fn poll(&mut self) -> InputFrame {
        std::mem::take(&mut self.0)
    }
}

/// Reads keyboard and mouse into [`FrameInput`].
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters are passed by value
pub fn gather_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_button: Option<Res<ButtonInput<MouseButton>>>,
    mouse_motion: Option<Res<AccumulatedMouseMotion>>,
    mouse_scroll: Option<Res<AccumulatedMouseScroll>>,
    mut input: ResMut<FrameInput>,
) {
    let dragging = mouse_button.is_some_and(|b| b.pressed(MouseButton::Left));
    let orbit = match mouse_motion {
        Some(motion) if dragging => {
            Vector2::new(f64::from(motion.delta.x), f64::from(motion.delta.y))
        }
        _ => Vector2::zeros(),
    };
    let zoom = mouse_scroll.map_or(0.0, |s| f64::from(s.delta.y));

    input.0 = InputFrame {
        actions: actions_from_keys(&keys),
        orbit,
        zoom,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_repeat_every_tick() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::KeyR);
        let actions = actions_from_keys(&keys);
        assert!(actions.contains(Action::MoveForward));
        assert!(actions.contains(Action::LiftUp));

        keys.clear();
        let actions = actions_from_keys(&keys);
        assert!(actions.contains(Action::MoveForward), "still held after clear");
    }

    #[test]
    fn press_keys_fire_once() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Digit3);
        keys.press(KeyCode::Space);
        let actions = actions_from_keys(&keys);
        assert_eq!(actions.load_preset(), Some(LoadPreset::Medium));
        assert!(actions.contains(Action::Pickup));

        keys.clear();
        let actions = actions_from_keys(&keys);
        assert_eq!(actions.load_preset(), None);
        assert!(!actions.contains(Action::Pickup));
    }

    #[test]
    fn poll_drains_the_frame() {
        let mut input = FrameInput(InputFrame::from_actions(
            ActionSet::new().with(Action::Drop),
        ));
        assert!(input.poll().actions.contains(Action::Drop));
        assert!(input.poll().actions.is_empty());
    }
}
