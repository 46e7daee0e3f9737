use crate::signal::WakeSignal;
use crate::state::SharedState;

/// Ranging collaborator. `measure` may take as long as the sensor needs; it
/// reports centimeters and never fails from the caller's point of view (a
/// driver that misses an echo returns its last good value or a sentinel).
#[allow(async_fn_in_trait)]
pub trait RangeSensor {
    async fn measure(&mut self) -> u32;
}

/// Sampling task: woken by timer A, stores one measurement per wake.
pub struct SamplingTask<'a, S> {
    state: &'a SharedState,
    wake: &'a WakeSignal,
    sensor: S,
}

impl<'a, S: RangeSensor> SamplingTask<'a, S> {
    pub fn new(state: &'a SharedState, wake: &'a WakeSignal, sensor: S) -> Self {
        Self {
            state,
            wake,
            sensor,
        }
    }

    /// One cycle after a wake. Returns the stored sample, or `None` when
    /// measurement is disabled and the sensor was left alone.
    pub async fn cycle(&mut self) -> Option<u32> {
        if !self.state.measurement_enabled() {
            return None;
        }
        let cm = self.sensor.measure().await;
        self.state.store_distance(cm);
        debug!("sample {} cm", cm);
        Some(cm)
    }

    pub async fn step(&mut self) -> Option<u32> {
        self.wake.wait().await;
        self.cycle().await
    }

    pub async fn run(mut self) -> ! {
        loop {
            self.step().await;
        }
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedSensor {
        readings: &'static [u32],
        calls: usize,
    }

    impl ScriptedSensor {
        fn new(readings: &'static [u32]) -> Self {
            Self { readings, calls: 0 }
        }
    }

    impl RangeSensor for ScriptedSensor {
        async fn measure(&mut self) -> u32 {
            let cm = self.readings[self.calls % self.readings.len()];
            self.calls += 1;
            cm
        }
    }

    #[futures_test::test]
    async fn stores_each_sample() {
        let state = SharedState::new();
        let wake = WakeSignal::new();
        let mut task = SamplingTask::new(&state, &wake, ScriptedSensor::new(&[12, 47]));

        wake.post();
        assert_eq!(task.step().await, Some(12));
        assert_eq!(state.last_distance(), 12);

        wake.post();
        assert_eq!(task.step().await, Some(47));
        assert_eq!(state.last_distance(), 47);
        assert_eq!(task.sensor().calls, 2);
    }

    #[futures_test::test]
    async fn disabled_never_touches_sensor() {
        let state = SharedState::new();
        state.store_distance(33);
        state.toggle_measurement();
        let wake = WakeSignal::new();
        let mut task = SamplingTask::new(&state, &wake, ScriptedSensor::new(&[5]));

        for _ in 0..10 {
            wake.post();
            assert_eq!(task.step().await, None);
        }
        assert_eq!(task.sensor().calls, 0);
        assert_eq!(state.last_distance(), 33);
    }

    #[futures_test::test]
    async fn resumes_after_reenable() {
        let state = SharedState::new();
        let wake = WakeSignal::new();
        let mut task = SamplingTask::new(&state, &wake, ScriptedSensor::new(&[8]));

        state.toggle_measurement();
        wake.post();
        task.step().await;
        assert_eq!(task.sensor().calls, 0);

        state.toggle_measurement();
        wake.post();
        assert_eq!(task.step().await, Some(8));
        assert_eq!(task.sensor().calls, 1);
    }

    #[futures_test::test]
    async fn merged_wakes_sample_once() {
        let state = SharedState::new();
        let wake = WakeSignal::new();
        let mut task = SamplingTask::new(&state, &wake, ScriptedSensor::new(&[21]));

        wake.post();
        wake.post();
        task.step().await;
        assert!(!wake.is_pending());
        assert_eq!(task.sensor().calls, 1);
    }
}
