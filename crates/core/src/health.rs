//! Bounded health state with passive decay.
//!
//! Health is an integer clamped to `[0, max]`. It decays by a fixed amount
//! once per second (driven by the session clock, not a detached timer) and is
//! restored by successful interactions. Every mutation synchronously notifies
//! the registered [`MeterSink`] with the new fill percentage so the UI meter
//! can never lag behind the model.

/// Maximum (and starting) health.
pub const MAX_HEALTH: i32 = 100;

/// Units removed per decay tick (one tick per second).
pub const DECAY_PER_TICK: i32 = 1;

/// Collaborator notified after every health mutation.
pub trait MeterSink {
    /// Called with the new fill percentage in `[0.0, 100.0]`.
    fn health_changed(&mut self, percent: f32);
}

/// Sink that discards notifications (headless runs without a meter).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMeter;

impl MeterSink for NullMeter {
    fn health_changed(&mut self, _percent: f32) {}
}

/// Clamped health model.
pub struct HealthModel {
    current: i32,
    max: i32,
    decay_per_tick: i32,
    sink: Box<dyn MeterSink>,
}

impl std::fmt::Debug for HealthModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthModel")
            .field("current", &self.current)
            .field("max", &self.max)
            .field("decay_per_tick", &self.decay_per_tick)
            .finish()
    }
}

impl HealthModel {
    /// Create a model at full health with the given sink.
    pub fn new(sink: Box<dyn MeterSink>) -> Self {
        Self::with_limits(MAX_HEALTH, DECAY_PER_TICK, sink)
    }

    /// Create a model with explicit limits (tests and config overrides).
    pub fn with_limits(max: i32, decay_per_tick: i32, mut sink: Box<dyn MeterSink>) -> Self {
        let max = max.max(1);
        sink.health_changed(100.0);
        Self {
            current: max,
            max,
            decay_per_tick: decay_per_tick.max(0),
            sink,
        }
    }

    /// Current health value.
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Maximum health value.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Current fill percentage in `[0.0, 100.0]`.
    pub fn percent(&self) -> f32 {
        self.current as f32 / self.max as f32 * 100.0
    }

    /// Apply a signed delta, clamping to `[0, max]`, and notify the meter.
    pub fn apply_delta(&mut self, amount: i32) {
        self.set(self.current.saturating_add(amount));
    }

    /// Apply one passive decay tick.
    pub fn tick(&mut self) {
        self.set(self.current - self.decay_per_tick);
    }

    fn set(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
        let percent = self.percent();
        self.sink.health_changed(percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct SharedMeter(Rc<RefCell<Vec<f32>>>);

    impl MeterSink for SharedMeter {
        fn health_changed(&mut self, percent: f32) {
            self.0.borrow_mut().push(percent);
        }
    }

    fn recording_model() -> (HealthModel, Rc<RefCell<Vec<f32>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let model = HealthModel::new(Box::new(SharedMeter(seen.clone())));
        (model, seen)
    }

    #[test]
    fn starts_full_and_decays_by_one() {
        let (mut model, _) = recording_model();
        assert_eq!(model.current(), 100);
        model.tick();
        assert_eq!(model.current(), 99);
    }

    #[test]
    fn delta_clamps_at_max() {
        let (mut model, _) = recording_model();
        model.apply_delta(-10);
        assert_eq!(model.current(), 90);
        model.apply_delta(20);
        assert_eq!(model.current(), 100);
    }

    #[test]
    fn delta_clamps_at_zero() {
        let (mut model, _) = recording_model();
        model.apply_delta(-1000);
        assert_eq!(model.current(), 0);
        model.tick();
        assert_eq!(model.current(), 0);
    }

    #[test]
    fn every_mutation_notifies_the_meter() {
        let (mut model, seen) = recording_model();
        model.apply_delta(-25);
        model.tick();
        // Construction notifies once, then one notification per mutation.
        assert_eq!(seen.borrow().as_slice(), &[100.0, 75.0, 74.0]);
        assert!((model.percent() - 74.0).abs() < f32::EPSILON);
    }
}
