//! Key-to-action bindings
//!
//! The fixed, immutable mapping from physical keys to pad actions.
//! Built once at startup; duplicate key assignments are rejected
//! eagerly instead of silently overwriting an earlier entry.

use crate::pad::OutputChannel;
use evdev::{AbsoluteAxisType, Key};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from binding table construction
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Key {0:?} is bound more than once")]
    DuplicateKey(Key),
}

/// The two emulated movement axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadAxis {
    MoveX,
    MoveY,
}

/// Which flag of an axis a direction key drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDirection {
    Lo,
    Hi,
}

/// What a bound key does on press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit 1 on press and 0 on release to a fixed channel.
    Button(OutputChannel),
    /// Drive one direction flag of a shared axis state.
    Axis {
        axis: PadAxis,
        direction: AxisDirection,
    },
}

/// Immutable key-to-action lookup table.
pub struct BindingTable {
    map: HashMap<Key, Action>,
}

impl BindingTable {
    /// Build the table, rejecting any key that appears twice.
    pub fn build(
        entries: impl IntoIterator<Item = (Key, Action)>,
    ) -> Result<Self, BindingError> {
        let mut map = HashMap::new();
        for (key, action) in entries {
            if map.insert(key, action).is_some() {
                return Err(BindingError::DuplicateKey(key));
            }
        }
        Ok(Self { map })
    }

    /// Look up the action for a key. `None` means unbound: the event
    /// is to be ignored, not an error.
    pub fn lookup(&self, key: Key) -> Option<&Action> {
        self.map.get(&key)
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// The fixed binding configuration.
///
/// Note the Linux gamepad layout: BTN_NORTH is the "X" label and
/// BTN_WEST the "Y" label on an X-Box pad.
pub fn default_bindings() -> Vec<(Key, Action)> {
    use AxisDirection::{Hi, Lo};
    use PadAxis::{MoveX, MoveY};

    let button = |key, send| (key, Action::Button(OutputChannel::Button(send)));
    let trigger = |key, send| (key, Action::Button(OutputChannel::Axis(send)));

    vec![
        // Movement keys
        (
            Key::KEY_A,
            Action::Axis {
                axis: MoveX,
                direction: Lo,
            },
        ),
        (
            Key::KEY_D,
            Action::Axis {
                axis: MoveX,
                direction: Hi,
            },
        ),
        (
            Key::KEY_W,
            Action::Axis {
                axis: MoveY,
                direction: Lo,
            },
        ),
        (
            Key::KEY_S,
            Action::Axis {
                axis: MoveY,
                direction: Hi,
            },
        ),
        // Fire keys
        button(Key::KEY_DOWN, Key::BTN_SOUTH),
        button(Key::KEY_RIGHT, Key::BTN_EAST),
        button(Key::KEY_LEFT, Key::BTN_NORTH),
        button(Key::KEY_UP, Key::BTN_WEST),
        // Use keys
        button(Key::KEY_Q, Key::BTN_TR),
        button(Key::KEY_E, Key::BTN_TL),
        trigger(Key::KEY_SPACE, AbsoluteAxisType::ABS_Z),
        // Other action keys
        trigger(Key::KEY_LEFTCTRL, AbsoluteAxisType::ABS_RZ),
        // Joins multiplayer and interacts with the map
        button(Key::KEY_TAB, Key::BTN_SELECT),
        // Hold together with thumb-r to reset a run
        button(Key::KEY_J, Key::BTN_THUMBL),
        // Emote
        button(Key::KEY_K, Key::BTN_THUMBR),
        // Join game (local multiplayer)
        button(Key::KEY_4, Key::BTN_START),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_rejected() {
        let entries = vec![
            (Key::KEY_Q, Action::Button(OutputChannel::Button(Key::BTN_TR))),
            (Key::KEY_Q, Action::Button(OutputChannel::Button(Key::BTN_TL))),
        ];
        match BindingTable::build(entries) {
            Err(BindingError::DuplicateKey(key)) => assert_eq!(key, Key::KEY_Q),
            Ok(_) => panic!("Expected duplicate key error"),
        }
    }

    #[test]
    fn test_distinct_keys_all_lookup_able() {
        let entries = default_bindings();
        let keys: Vec<Key> = entries.iter().map(|(key, _)| *key).collect();
        let table = BindingTable::build(entries).unwrap();
        for key in keys {
            assert!(table.lookup(key).is_some(), "{key:?} not lookup-able");
        }
    }

    #[test]
    fn test_unbound_key_is_absent() {
        let table = BindingTable::build(default_bindings()).unwrap();
        assert!(table.lookup(Key::KEY_Z).is_none());
    }

    #[test]
    fn test_default_bindings_cover_all_inputs() {
        let table = BindingTable::build(default_bindings()).unwrap();
        assert_eq!(table.len(), 16);
    }

    #[test]
    fn test_default_bindings_compatibility_pairs() {
        let table = BindingTable::build(default_bindings()).unwrap();

        assert_eq!(
            table.lookup(Key::KEY_A),
            Some(&Action::Axis {
                axis: PadAxis::MoveX,
                direction: AxisDirection::Lo,
            })
        );
        assert_eq!(
            table.lookup(Key::KEY_S),
            Some(&Action::Axis {
                axis: PadAxis::MoveY,
                direction: AxisDirection::Hi,
            })
        );
        // X and Y labels land on BTN_NORTH and BTN_WEST
        assert_eq!(
            table.lookup(Key::KEY_LEFT),
            Some(&Action::Button(OutputChannel::Button(Key::BTN_NORTH)))
        );
        assert_eq!(
            table.lookup(Key::KEY_UP),
            Some(&Action::Button(OutputChannel::Button(Key::BTN_WEST)))
        );
        // Triggers are buttonized ABS channels
        assert_eq!(
            table.lookup(Key::KEY_SPACE),
            Some(&Action::Button(OutputChannel::Axis(AbsoluteAxisType::ABS_Z)))
        );
        assert_eq!(
            table.lookup(Key::KEY_LEFTCTRL),
            Some(&Action::Button(OutputChannel::Axis(
                AbsoluteAxisType::ABS_RZ
            )))
        );
        assert_eq!(
            table.lookup(Key::KEY_4),
            Some(&Action::Button(OutputChannel::Button(Key::BTN_START)))
        );
    }
}
