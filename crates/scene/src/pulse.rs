//! Click-feedback scale pulse.
//!
//! Clicking a decoration swells it to 1.2x its base scale over one phase and
//! shrinks it back over a second, each phase lasting [`PULSE_PHASE`]. The
//! animation is an explicit per-node state machine stepped from the session
//! clock. Restarting a pulse mid-flight snaps back to the recorded base
//! scale first, so repeated clicks never compound the swell.

use std::collections::HashMap;
use std::time::Duration;

use glam::Vec3;

use crate::node::NodeKey;

/// Duration of each pulse phase.
pub const PULSE_PHASE: Duration = Duration::from_millis(100);
/// Peak scale multiplier at the top of the pulse.
pub const PULSE_SCALE: f32 = 1.2;

/// Phase of one node's pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseState {
    /// Growing from base toward the peak.
    ScalingUp,
    /// Shrinking from the peak back to base.
    ScalingDown,
}

#[derive(Debug, Clone, Copy)]
struct Pulse {
    base: Vec3,
    state: PulseState,
    phase_start: Duration,
}

/// Steps every active pulse and reports the scales to write back.
#[derive(Debug, Default)]
pub struct PulseSystem {
    pulses: HashMap<NodeKey, Pulse>,
}

impl PulseSystem {
    /// Create an empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a pulse for `key`.
    ///
    /// `base` must be the node's resting scale. On restart the previous
    /// pulse's base is kept and the phase rewinds to the start of the swell.
    pub fn start(&mut self, key: NodeKey, base: Vec3, now: Duration) {
        let base = match self.pulses.get(&key) {
            Some(active) => active.base,
            None => base,
        };
        self.pulses.insert(
            key,
            Pulse {
                base,
                state: PulseState::ScalingUp,
                phase_start: now,
            },
        );
    }

    /// True when `key` has a pulse in flight.
    pub fn is_active(&self, key: NodeKey) -> bool {
        self.pulses.contains_key(&key)
    }

    /// Phase of `key`'s pulse, if one is active.
    pub fn state(&self, key: NodeKey) -> Option<PulseState> {
        self.pulses.get(&key).map(|p| p.state)
    }

    /// Step every pulse to `now` and return the `(key, scale)` writes the
    /// caller should apply to the scene graph. Finished pulses emit their
    /// base scale once and are removed.
    pub fn advance(&mut self, now: Duration) -> Vec<(NodeKey, Vec3)> {
        let mut writes = Vec::new();
        let mut finished = Vec::new();

        for (key, pulse) in &mut self.pulses {
            let elapsed = now.saturating_sub(pulse.phase_start);
            if elapsed >= PULSE_PHASE {
                match pulse.state {
                    PulseState::ScalingUp => {
                        pulse.state = PulseState::ScalingDown;
                        pulse.phase_start += PULSE_PHASE;
                        let t = phase_fraction(now.saturating_sub(pulse.phase_start));
                        writes.push((*key, pulse.base * lerp(PULSE_SCALE, 1.0, t)));
                    }
                    PulseState::ScalingDown => {
                        writes.push((*key, pulse.base));
                        finished.push(*key);
                    }
                }
            } else {
                let t = phase_fraction(elapsed);
                let factor = match pulse.state {
                    PulseState::ScalingUp => lerp(1.0, PULSE_SCALE, t),
                    PulseState::ScalingDown => lerp(PULSE_SCALE, 1.0, t),
                };
                writes.push((*key, pulse.base * factor));
            }
        }

        for key in finished {
            self.pulses.remove(&key);
        }
        writes
    }

    /// Cancel a pulse, returning the base scale to restore if one was active.
    pub fn cancel(&mut self, key: NodeKey) -> Option<Vec3> {
        self.pulses.remove(&key).map(|p| p.base)
    }

    /// Number of pulses in flight.
    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    /// True when no pulses are in flight.
    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }
}

fn phase_fraction(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() / PULSE_PHASE.as_secs_f32()).clamp(0.0, 1.0)
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
