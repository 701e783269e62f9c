// motorcar_core/src/controls/ignition.rs

use log::{debug, info};

use crate::{
    cues::{CueBuffer, VehicleCue},
    state::VehicleState,
};

/// The key switch and its two-phase start.
///
/// Turning the key plays the starter clip right away; the idle loop only takes
/// over once `start_clip_seconds` have elapsed. The wait is an explicit timer
/// advanced by [`Ignition::advance`], never a blocking call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ignition {
    start_clip_seconds: f32,
    remaining_startup_time: Option<f32>,
}

impl Ignition {
    pub fn new(start_clip_seconds: f32) -> Self {
        Self {
            start_clip_seconds: start_clip_seconds.max(0.0),
            remaining_startup_time: None,
        }
    }

    pub fn is_starting(&self) -> bool {
        self.remaining_startup_time.is_some()
    }

    pub fn remaining_startup_time(&self) -> Option<f32> {
        self.remaining_startup_time
    }

    /// The driver turned the key.
    ///
    /// Presses while the starter is still cranking are dropped.
    pub fn press(&mut self, state: &mut VehicleState, cues: &mut CueBuffer) {
        if self.is_starting() {
            debug!("Ignition press ignored while the starter is running.");
            return;
        }

        if state.engine_active {
            info!("Engine off.");
            state.engine_active = false;
            cues.push(VehicleCue::EngineStop);
            cues.push(VehicleCue::InsertKey);
        } else {
            info!("Engine starting.");
            state.engine_active = true;
            self.remaining_startup_time = Some(self.start_clip_seconds);
            cues.push(VehicleCue::EngineStart);
        }
    }

    /// Counts the startup timer down and switches to the idle loop when it expires.
    pub fn advance(&mut self, dt: f32, cues: &mut CueBuffer) {
        if let Some(remaining) = self.remaining_startup_time {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.remaining_startup_time = None;
                cues.push(VehicleCue::EngineIdleLoop);
            } else {
                self.remaining_startup_time = Some(remaining);
            }
        }
    }

    /// Drops a pending startup, e.g. because the engine stalled mid-crank.
    pub fn cancel_startup(&mut self) {
        self.remaining_startup_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_then_idle_loop_after_clip() {
        let mut ignition = Ignition::new(1.0);
        let mut state = VehicleState::default();
        let mut cues = CueBuffer::default();

        ignition.press(&mut state, &mut cues);
        assert!(state.engine_active);
        assert_eq!(cues.drain(), vec![VehicleCue::EngineStart]);

        for _ in 0..9 {
            ignition.advance(0.1, &mut cues);
        }
        assert!(ignition.is_starting());
        assert!(cues.is_empty());

        ignition.advance(0.2, &mut cues);
        assert!(!ignition.is_starting());
        assert_eq!(cues.drain(), vec![VehicleCue::EngineIdleLoop]);

        ignition.advance(0.2, &mut cues);
        assert!(cues.is_empty());
    }

    #[test]
    fn test_press_while_starting_is_ignored() {
        let mut ignition = Ignition::new(1.0);
        let mut state = VehicleState::default();
        let mut cues = CueBuffer::default();

        ignition.press(&mut state, &mut cues);
        ignition.advance(0.5, &mut cues);
        cues.drain();

        ignition.press(&mut state, &mut cues);
        assert!(state.engine_active);
        assert!(cues.is_empty());
        assert_eq!(ignition.remaining_startup_time(), Some(0.5));
    }

    #[test]
    fn test_stop_plays_stop_and_key_cues() {
        let mut ignition = Ignition::new(0.0);
        let mut state = VehicleState::default();
        let mut cues = CueBuffer::default();

        ignition.press(&mut state, &mut cues);
        ignition.advance(0.016, &mut cues);
        cues.drain();

        ignition.press(&mut state, &mut cues);
        assert!(!state.engine_active);
        assert_eq!(
            cues.drain(),
            vec![VehicleCue::EngineStop, VehicleCue::InsertKey]
        );
    }
}
