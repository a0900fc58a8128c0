//! Virtual gamepad device using evdev/uinput
//!
//! Registers a synthetic controller that identifies itself as a stock
//! X-Box 360 pad, and accepts button/axis emissions from the dispatcher.

use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AbsInfo, AbsoluteAxisType, AttributeSet, BusType, EventType, InputEvent, InputId, Key,
    UinputAbsSetup,
};
use thiserror::Error;
use tracing::debug;

/// Values for pressed and released buttons.
/// Also used for the buttonized analog shoulder triggers.
pub const BTN_PRESSED: i32 = 1;
pub const BTN_RELEASED: i32 = 0;

/// Movement axis values along one axis. Neutral is no deflection,
/// the other two are full deflection in opposite directions.
pub const AXIS_MIN: i32 = 0;
pub const AXIS_NEUTRAL: i32 = 128;
pub const AXIS_MAX: i32 = 255;

/// Identity reported to the host. Matches a well-known pad so games and
/// Steam recognize the device without a custom driver.
const VENDOR_ID: u16 = 0x045e;
const PRODUCT_ID: u16 = 0x028e;
const VERSION: u16 = 0x110;
const DEVICE_NAME: &str = "Microsoft X-Box 360 pad";

/// Errors from virtual pad operations
#[derive(Debug, Error)]
pub enum PadError {
    #[error("Failed to create virtual device: {0}")]
    CreateDevice(#[source] std::io::Error),
    #[error("Failed to emit event: {0}")]
    EmitEvent(#[source] std::io::Error),
}

/// One output channel on the virtual pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputChannel {
    /// EV_KEY channel (gamepad buttons).
    Button(Key),
    /// EV_ABS channel (movement axes and the buttonized triggers).
    Axis(AbsoluteAxisType),
}

/// Destination for (channel, value) emissions.
///
/// Implemented by [`VirtualGamepad`]; the dispatcher takes the sink by
/// value so tests can substitute a recording double.
pub trait EventSink {
    fn emit(&mut self, channel: OutputChannel, value: i32) -> Result<(), PadError>;
}

/// Virtual gamepad device
pub struct VirtualGamepad {
    device: VirtualDevice,
}

impl VirtualGamepad {
    /// Create the virtual pad with its fixed capability list.
    ///
    /// ABS_RX and ABS_RY stay registered even though nothing drives
    /// them: without them some hosts shift ABS_Z/ABS_RZ into their
    /// slots and the trigger channels stop lining up. Check the input
    /// test in the Steam controller settings before touching the list.
    pub fn create() -> Result<Self, PadError> {
        let movement = AbsInfo::new(AXIS_NEUTRAL, AXIS_MIN, AXIS_MAX, 0, 0, 0);
        let trigger = AbsInfo::new(BTN_RELEASED, BTN_RELEASED, BTN_PRESSED, 0, 0, 0);

        let mut keys = AttributeSet::<Key>::new();
        for key in [
            // ABXY
            Key::BTN_SOUTH,
            Key::BTN_EAST,
            Key::BTN_NORTH,
            Key::BTN_WEST,
            // shoulder buttons
            Key::BTN_TL,
            Key::BTN_TR,
            // "middle" buttons
            Key::BTN_START,
            Key::BTN_SELECT,
            // thumbpad presses
            Key::BTN_THUMBL,
            Key::BTN_THUMBR,
        ] {
            keys.insert(key);
        }

        let mut builder = VirtualDeviceBuilder::new()
            .map_err(PadError::CreateDevice)?
            .name(DEVICE_NAME)
            .input_id(InputId::new(
                BusType::BUS_USB,
                VENDOR_ID,
                PRODUCT_ID,
                VERSION,
            ))
            .with_keys(&keys)
            .map_err(PadError::CreateDevice)?;

        // Left and right thumbpad axes
        for axis in [
            AbsoluteAxisType::ABS_X,
            AbsoluteAxisType::ABS_Y,
            AbsoluteAxisType::ABS_RX,
            AbsoluteAxisType::ABS_RY,
        ] {
            builder = builder
                .with_absolute_axis(&UinputAbsSetup::new(axis, movement))
                .map_err(PadError::CreateDevice)?;
        }

        // Analog shoulder triggers, driven as buttons
        for axis in [AbsoluteAxisType::ABS_Z, AbsoluteAxisType::ABS_RZ] {
            builder = builder
                .with_absolute_axis(&UinputAbsSetup::new(axis, trigger))
                .map_err(PadError::CreateDevice)?;
        }

        let device = builder.build().map_err(PadError::CreateDevice)?;

        Ok(Self { device })
    }

    /// Get the device path (e.g., /dev/input/eventX)
    pub fn device_path(&mut self) -> Option<std::path::PathBuf> {
        self.device
            .enumerate_dev_nodes_blocking()
            .ok()?
            .next()?
            .ok()
    }
}

impl EventSink for VirtualGamepad {
    fn emit(&mut self, channel: OutputChannel, value: i32) -> Result<(), PadError> {
        debug!(?channel, value, "emit");

        let event = match channel {
            OutputChannel::Button(key) => InputEvent::new_now(EventType::KEY, key.code(), value),
            OutputChannel::Axis(axis) => InputEvent::new_now(EventType::ABSOLUTE, axis.0, value),
        };

        self.device.emit(&[event]).map_err(PadError::EmitEvent)
    }
}

/// Sink double that records emissions in arrival order.
#[cfg(test)]
pub(crate) struct RecordingSink {
    pub events: Vec<(OutputChannel, i32)>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

#[cfg(test)]
impl EventSink for RecordingSink {
    fn emit(&mut self, channel: OutputChannel, value: i32) -> Result<(), PadError> {
        self.events.push((channel, value));
        Ok(())
    }
}
