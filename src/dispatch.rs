//! Key-transition dispatch
//!
//! Routes each incoming key transition to its bound action: lookup,
//! effect, emission. Strictly in arrival order, one event at a time.

use crate::axis::AxisState;
use crate::bindings::{Action, AxisDirection, BindingTable, PadAxis};
use crate::pad::{EventSink, OutputChannel, PadError, BTN_PRESSED, BTN_RELEASED};
use evdev::{AbsoluteAxisType, Key};
use tracing::trace;

/// The remapping engine: binding table, per-axis state, and the sink
/// all emissions go to.
pub struct Dispatcher<S: EventSink> {
    table: BindingTable,
    move_x: AxisState,
    move_y: AxisState,
    sink: S,
}

impl<S: EventSink> Dispatcher<S> {
    pub fn new(table: BindingTable, sink: S) -> Self {
        Self {
            table,
            move_x: AxisState::new(OutputChannel::Axis(AbsoluteAxisType::ABS_X)),
            move_y: AxisState::new(OutputChannel::Axis(AbsoluteAxisType::ABS_Y)),
            sink,
        }
    }

    /// Process one key transition.
    ///
    /// Unbound keys are ignored. Sink failures propagate; there is no
    /// degraded mode for a remapper whose sole output is the device.
    pub fn handle(&mut self, key: Key, pressed: bool) -> Result<(), PadError> {
        let action = match self.table.lookup(key) {
            Some(action) => *action,
            None => {
                trace!(?key, "unbound key, ignoring");
                return Ok(());
            }
        };

        match action {
            Action::Button(channel) => {
                let value = if pressed { BTN_PRESSED } else { BTN_RELEASED };
                self.sink.emit(channel, value)
            }
            Action::Axis { axis, direction } => {
                let state = match axis {
                    PadAxis::MoveX => &mut self.move_x,
                    PadAxis::MoveY => &mut self.move_y,
                };
                match direction {
                    AxisDirection::Lo => state.set_lo(pressed, &mut self.sink),
                    AxisDirection::Hi => state.set_hi(pressed, &mut self.sink),
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn sink(&self) -> &S {
        &self.sink
    }
}
