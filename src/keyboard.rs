//! Physical keyboard discovery and key-transition reading
//!
//! Wraps the evdev side of the world: finding keyboard-like devices
//! under /dev/input and reducing their event stream to clean key
//! down/up edges. Autorepeat and non-key events never leave this
//! module.

use evdev::{Device, EventType, InputEvent, InputEventKind, Key};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Errors from keyboard discovery and selection
#[derive(Debug, Error)]
pub enum KeyboardError {
    #[error("No keyboard-like device found under /dev/input (run as root or join the input group)")]
    NoneFound,
    #[error("{count} keyboard-like devices found, pass --device to pick one (see --list)")]
    Ambiguous { count: usize },
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One discrete key edge from the physical keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub key: Key,
    pub pressed: bool,
}

/// Reduce a raw input event to a key transition, if it is one.
///
/// Non-key events and autorepeat (value 2) yield `None`.
pub fn key_transition(event: &InputEvent) -> Option<KeyTransition> {
    let key = match event.kind() {
        InputEventKind::Key(key) => key,
        _ => return None,
    };

    let pressed = match event.value() {
        1 => true,
        0 => false,
        _ => return None,
    };

    Some(KeyTransition { key, pressed })
}

/// Enumerate devices that look like keyboards: they report EV_KEY and
/// carry a letter-key range, which rules out mice and gamepads.
pub fn list_keyboards() -> Vec<(PathBuf, Device)> {
    evdev::enumerate()
        .filter(|(_, device)| is_keyboard(device))
        .collect()
}

fn is_keyboard(device: &Device) -> bool {
    device.supported_events().contains(EventType::KEY)
        && device
            .supported_keys()
            .map_or(false, |keys| keys.contains(Key::KEY_A))
}

/// Pick the input keyboard.
///
/// With `--device N` this opens `/dev/input/eventN` directly; without
/// it, a single discovered keyboard is auto-selected and anything else
/// is an error asking the user to choose.
pub fn select(preferred: Option<usize>) -> Result<(PathBuf, Device), KeyboardError> {
    if let Some(number) = preferred {
        let path = PathBuf::from(format!("/dev/input/event{number}"));
        let device = Device::open(&path).map_err(|source| KeyboardError::Open {
            path: path.clone(),
            source,
        })?;
        return Ok((path, device));
    }

    let mut keyboards = list_keyboards();
    match keyboards.len() {
        0 => Err(KeyboardError::NoneFound),
        1 => {
            let (path, device) = keyboards.remove(0);
            debug!(path = %path.display(), "auto-selected only keyboard");
            Ok((path, device))
        }
        count => Err(KeyboardError::Ambiguous { count }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_edge() {
        let event = InputEvent::new(EventType::KEY, Key::KEY_A.code(), 1);
        assert_eq!(
            key_transition(&event),
            Some(KeyTransition {
                key: Key::KEY_A,
                pressed: true,
            })
        );
    }

    #[test]
    fn test_key_up_edge() {
        let event = InputEvent::new(EventType::KEY, Key::KEY_SPACE.code(), 0);
        assert_eq!(
            key_transition(&event),
            Some(KeyTransition {
                key: Key::KEY_SPACE,
                pressed: false,
            })
        );
    }

    #[test]
    fn test_autorepeat_dropped() {
        let event = InputEvent::new(EventType::KEY, Key::KEY_A.code(), 2);
        assert_eq!(key_transition(&event), None);
    }

    #[test]
    fn test_non_key_event_dropped() {
        let event = InputEvent::new(EventType::SYNCHRONIZATION, 0, 0);
        assert_eq!(key_transition(&event), None);
    }
}
