//! Keyboard-to-gamepad remapper
//!
//! Translates key down/up transitions from a physical keyboard into the
//! state of a virtual X-Box 360 style pad, including two-key analog
//! axis emulation with cancellation.

pub mod axis;
pub mod bindings;
pub mod dispatch;
pub mod keyboard;
pub mod pad;

pub use axis::AxisState;
pub use bindings::{
    default_bindings, Action, AxisDirection, BindingError, BindingTable, PadAxis,
};
pub use dispatch::Dispatcher;
pub use keyboard::{KeyTransition, KeyboardError};
pub use pad::{
    EventSink, OutputChannel, PadError, VirtualGamepad, AXIS_MAX, AXIS_MIN, AXIS_NEUTRAL,
    BTN_PRESSED, BTN_RELEASED,
};
