//! Logical input actions.
//!
//! The input collaborator reduces whatever it polls (keys, gamepad, a test
//! script) to an [`ActionSet`] once per tick.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Manual load selections for the load cell when nothing is carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LoadPreset {
    /// 0 kg.
    #[default]
    Empty,
    /// 2 kg.
    Light,
    /// 5 kg.
    Medium,
    /// 10 kg.
    Heavy,
}

impl LoadPreset {
    /// All presets in key order (1–4).
    pub const ALL: [Self; 4] = [Self::Empty, Self::Light, Self::Medium, Self::Heavy];

    /// Returns the preset for a 1-based key index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Load in kilograms.
    #[must_use]
    pub const fn kilograms(self) -> f64 {
        match self {
            Self::Empty => 0.0,
            Self::Light => 2.0,
            Self::Medium => 5.0,
            Self::Heavy => 10.0,
        }
    }
}

/// A logical action requested for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Drive along the heading.
    MoveForward,
    /// Drive against the heading.
    MoveBack,
    /// Strafe to the left of the heading.
    StrafeLeft,
    /// Strafe to the right of the heading.
    StrafeRight,
    /// Turn in place, increasing the heading.
    RotateLeft,
    /// Turn in place, decreasing the heading.
    RotateRight,
    /// Raise the fork.
    LiftUp,
    /// Lower the fork.
    LiftDown,
    /// Select a manual load preset.
    SetLoadPreset(LoadPreset),
    /// Try to pick up cargo in front of the fork.
    Pickup,
    /// Try to drop the carried cargo in a destination zone.
    Drop,
    /// Leave the viewer. Ignored by the simulation.
    Quit,
}

impl Action {
    /// Movement actions in precedence order: when several are active, the
    /// last one determines the wheel steering preset.
    pub const MOVEMENT: [Self; 6] = [
        Self::MoveForward,
        Self::MoveBack,
        Self::StrafeLeft,
        Self::StrafeRight,
        Self::RotateLeft,
        Self::RotateRight,
    ];

    const fn bit(self) -> u16 {
        match self {
            Self::MoveForward => 1 << 0,
            Self::MoveBack => 1 << 1,
            Self::StrafeLeft => 1 << 2,
            Self::StrafeRight => 1 << 3,
            Self::RotateLeft => 1 << 4,
            Self::RotateRight => 1 << 5,
            Self::LiftUp => 1 << 6,
            Self::LiftDown => 1 << 7,
            Self::SetLoadPreset(_) => 1 << 8,
            Self::Pickup => 1 << 9,
            Self::Drop => 1 << 10,
            Self::Quit => 1 << 11,
        }
    }
}

/// The set of actions active during one tick.
///
/// At most one load preset is held; inserting another replaces it.
///
/// # Example
///
/// ```
/// use forklift_core::{Action, ActionSet, LoadPreset};
///
/// let actions: ActionSet = [Action::MoveForward, Action::LiftUp].into_iter().collect();
/// assert!(actions.contains(Action::LiftUp));
/// assert!(!actions.contains(Action::Pickup));
/// assert_eq!(actions.load_preset(), None);
///
/// let actions = actions.with(Action::SetLoadPreset(LoadPreset::Heavy));
/// assert_eq!(actions.load_preset(), Some(LoadPreset::Heavy));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionSet {
    bits: u16,
    preset: Option<LoadPreset>,
}

impl ActionSet {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bits: 0,
            preset: None,
        }
    }

    /// Adds an action.
    pub fn insert(&mut self, action: Action) {
        self.bits |= action.bit();
        if let Action::SetLoadPreset(preset) = action {
            self.preset = Some(preset);
        }
    }

    /// Returns the set with `action` added.
    #[must_use]
    pub fn with(mut self, action: Action) -> Self {
        self.insert(action);
        self
    }

    /// Returns true if `action` is active.
    ///
    /// For [`Action::SetLoadPreset`] the preset value must match too.
    #[must_use]
    pub fn contains(&self, action: Action) -> bool {
        match action {
            Action::SetLoadPreset(preset) => self.preset == Some(preset),
            other => self.bits & other.bit() != 0,
        }
    }

    /// Returns the selected load preset, if any.
    #[must_use]
    pub const fn load_preset(&self) -> Option<LoadPreset> {
        self.preset
    }

    /// Returns true if no action is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns the last active movement action in precedence order.
    #[must_use]
    pub fn dominant_movement(&self) -> Option<Action> {
        Action::MOVEMENT
            .iter()
            .rev()
            .copied()
            .find(|&a| self.contains(a))
    }

    /// Net lift direction: `1` up, `-1` down, `0` idle or cancelled.
    #[must_use]
    pub fn lift_direction(&self) -> i8 {
        i8::from(self.contains(Action::LiftUp)) - i8::from(self.contains(Action::LiftDown))
    }

    /// Iterates over the active actions.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        const PLAIN: [Action; 11] = [
            Action::MoveForward,
            Action::MoveBack,
            Action::StrafeLeft,
            Action::StrafeRight,
            Action::RotateLeft,
            Action::RotateRight,
            Action::LiftUp,
            Action::LiftDown,
            Action::Pickup,
            Action::Drop,
            Action::Quit,
        ];
        PLAIN
            .into_iter()
            .filter(|&a| self.contains(a))
            .chain(self.preset.map(Action::SetLoadPreset))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = Self::new();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

impl Extend<Action> for ActionSet {
    fn extend<I: IntoIterator<Item = Action>>(&mut self, iter: I) {
        for action in iter {
            self.insert(action);
        }
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_indices_map_to_kilograms() {
        let kg: Vec<f64> = (1..=4)
            .filter_map(LoadPreset::from_index)
            .map(LoadPreset::kilograms)
            .collect();
        assert_eq!(kg, vec![0.0, 2.0, 5.0, 10.0]);
        assert_eq!(LoadPreset::from_index(0), None);
        assert_eq!(LoadPreset::from_index(5), None);
    }

    #[test]
    fn last_movement_wins() {
        let set: ActionSet = [Action::RotateLeft, Action::MoveForward, Action::StrafeLeft]
            .into_iter()
            .collect();
        assert_eq!(set.dominant_movement(), Some(Action::RotateLeft));

        let set = ActionSet::new().with(Action::LiftUp);
        assert_eq!(set.dominant_movement(), None);
    }

    #[test]
    fn opposing_lift_actions_cancel() {
        let both: ActionSet = [Action::LiftUp, Action::LiftDown].into_iter().collect();
        assert_eq!(both.lift_direction(), 0);
        assert_eq!(ActionSet::new().with(Action::LiftDown).lift_direction(), -1);
    }

    #[test]
    fn preset_replaces_previous() {
        let set: ActionSet = [
            Action::SetLoadPreset(LoadPreset::Light),
            Action::SetLoadPreset(LoadPreset::Heavy),
        ]
        .into_iter()
        .collect();
        assert!(set.contains(Action::SetLoadPreset(LoadPreset::Heavy)));
        assert!(!set.contains(Action::SetLoadPreset(LoadPreset::Light)));
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn debug_lists_actions() {
        let set = ActionSet::new().with(Action::Pickup);
        assert_eq!(format!("{set:?}"), "{Pickup}");
        assert!(ActionSet::new().is_empty());
    }
}
