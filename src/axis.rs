//! Two-key digital axis with cancellation
//!
//! One analog axis driven by two opposing digital keys ("lo" and "hi").
//! Opposing keys held together cancel to neutral rather than summing.

use crate::pad::{EventSink, OutputChannel, PadError, AXIS_MAX, AXIS_MIN, AXIS_NEUTRAL};

/// State of one bidirectional axis built from two digital inputs.
///
/// Created once per axis at startup and mutated only through the two
/// direction actions bound to it. The emitted value is a pure function
/// of the flag pair, see [`AxisState::value`].
#[derive(Debug)]
pub struct AxisState {
    channel: OutputChannel,
    lo_active: bool,
    hi_active: bool,
}

impl AxisState {
    pub fn new(channel: OutputChannel) -> Self {
        Self {
            channel,
            lo_active: false,
            hi_active: false,
        }
    }

    /// Current output value for the flag pair:
    /// both or neither active → neutral, only lo → min, only hi → max.
    pub fn value(&self) -> i32 {
        if self.lo_active == self.hi_active {
            AXIS_NEUTRAL
        } else if self.lo_active {
            AXIS_MIN
        } else {
            AXIS_MAX
        }
    }

    /// Update the "lo" flag and re-emit the axis value.
    ///
    /// Emits unconditionally, even if the flag did not change.
    pub fn set_lo<S: EventSink>(&mut self, active: bool, sink: &mut S) -> Result<(), PadError> {
        self.lo_active = active;
        sink.emit(self.channel, self.value())
    }

    /// Update the "hi" flag and re-emit the axis value.
    pub fn set_hi<S: EventSink>(&mut self, active: bool, sink: &mut S) -> Result<(), PadError> {
        self.hi_active = active;
        sink.emit(self.channel, self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pad::RecordingSink;
    use evdev::AbsoluteAxisType;

    fn axis() -> AxisState {
        AxisState::new(OutputChannel::Axis(AbsoluteAxisType::ABS_X))
    }

    #[test]
    fn test_neutral_at_rest() {
        assert_eq!(axis().value(), AXIS_NEUTRAL);
    }

    #[test]
    fn test_lo_only_deflects_to_min() {
        let mut state = axis();
        let mut sink = RecordingSink::new();
        state.set_lo(true, &mut sink).unwrap();
        assert_eq!(state.value(), AXIS_MIN);
    }

    #[test]
    fn test_hi_only_deflects_to_max() {
        let mut state = axis();
        let mut sink = RecordingSink::new();
        state.set_hi(true, &mut sink).unwrap();
        assert_eq!(state.value(), AXIS_MAX);
    }

    #[test]
    fn test_both_held_cancel_to_neutral() {
        let mut state = axis();
        let mut sink = RecordingSink::new();
        state.set_lo(true, &mut sink).unwrap();
        state.set_hi(true, &mut sink).unwrap();
        assert_eq!(state.value(), AXIS_NEUTRAL);
    }

    #[test]
    fn test_release_one_of_two_deflects_to_survivor() {
        let mut state = axis();
        let mut sink = RecordingSink::new();
        state.set_lo(true, &mut sink).unwrap();
        state.set_hi(true, &mut sink).unwrap();
        state.set_lo(false, &mut sink).unwrap();
        assert_eq!(state.value(), AXIS_MAX);
    }

    #[test]
    fn test_every_call_emits_once() {
        let mut state = axis();
        let mut sink = RecordingSink::new();
        // Redundant updates still emit, one event per call.
        state.set_lo(true, &mut sink).unwrap();
        state.set_lo(true, &mut sink).unwrap();
        state.set_lo(false, &mut sink).unwrap();
        let channel = OutputChannel::Axis(AbsoluteAxisType::ABS_X);
        assert_eq!(
            sink.events,
            vec![
                (channel, AXIS_MIN),
                (channel, AXIS_MIN),
                (channel, AXIS_NEUTRAL),
            ]
        );
    }

    #[test]
    fn test_value_tracks_flag_pair_over_any_sequence() {
        let mut state = axis();
        let mut sink = RecordingSink::new();
        let sequence = [
            (true, false),
            (true, true),
            (false, true),
            (false, false),
            (true, true),
        ];
        for (lo, hi) in sequence {
            state.set_lo(lo, &mut sink).unwrap();
            state.set_hi(hi, &mut sink).unwrap();
            let expected = if lo == hi {
                AXIS_NEUTRAL
            } else if lo {
                AXIS_MIN
            } else {
                AXIS_MAX
            };
            let (_, emitted) = *sink.events.last().unwrap();
            assert_eq!(emitted, expected);
        }
    }
}
