// motorcar_core/src/drivetrain.rs

use log::debug;

use crate::{
    config::GearTable,
    cues::{CueBuffer, VehicleCue},
    state::VehicleState,
};

/// Steering and the gear lever.
///
/// Shifts are instantaneous, need no clutch and are always legal except past the
/// ends of the gear table, where they are silently ignored.
#[derive(Debug, Clone)]
pub struct Drivetrain {
    gears: GearTable,
    max_steer_angle: f32,
}

impl Drivetrain {
    pub fn new(gears: GearTable, max_steer_angle: f32) -> Self {
        Self {
            gears,
            max_steer_angle,
        }
    }

    pub fn gears(&self) -> &GearTable {
        &self.gears
    }

    pub fn max_steer_angle(&self) -> f32 {
        self.max_steer_angle
    }

    /// Sets the front wheel angle from the horizontal axis in `[-1, 1]`.
    pub fn set_steer(&self, state: &mut VehicleState, horizontal: f32) {
        state.steer_angle = self.max_steer_angle * horizontal.clamp(-1.0, 1.0);
    }

    /// Moves one gear up. Returns `false` (and does nothing) in the top gear.
    pub fn shift_up(&self, state: &mut VehicleState, cues: &mut CueBuffer) -> bool {
        if state.current_gear + 1 >= self.gears.gear_count() {
            debug!("Shift up ignored, already in top gear {}.", state.current_gear);
            return false;
        }
        state.current_gear += 1;
        cues.push(VehicleCue::ShiftUp);
        true
    }

    /// Moves one gear down. Returns `false` (and does nothing) in reverse.
    pub fn shift_down(&self, state: &mut VehicleState, cues: &mut CueBuffer) -> bool {
        if state.current_gear == 0 {
            debug!("Shift down ignored, already in reverse.");
            return false;
        }
        state.current_gear -= 1;
        cues.push(VehicleCue::ShiftDown);
        true
    }

    pub fn gear_label(&self, gear: usize) -> String {
        self.gears.label(gear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn drivetrain() -> Drivetrain {
        Drivetrain::new(GearTable::default(), 30.0)
    }

    #[test]
    fn test_steer_scales_and_clamps() {
        let drivetrain = drivetrain();
        let mut state = VehicleState::default();

        drivetrain.set_steer(&mut state, -0.5);
        assert_abs_diff_eq!(state.steer_angle, -15.0);

        drivetrain.set_steer(&mut state, 2.0);
        assert_abs_diff_eq!(state.steer_angle, 30.0);
    }

    #[test]
    fn test_shift_up_stops_at_top_gear() {
        let drivetrain = drivetrain();
        let mut state = VehicleState::default();
        let mut cues = CueBuffer::default();
        let top = drivetrain.gears().gear_count() - 1;

        for _ in 0..20 {
            drivetrain.shift_up(&mut state, &mut cues);
            assert!(state.current_gear <= top);
        }
        assert_eq!(state.current_gear, top);

        let shifts = cues.drain();
        assert_eq!(shifts.len(), top - 1); // started in neutral
        assert!(!drivetrain.shift_up(&mut state, &mut cues));
        assert!(cues.is_empty());
    }

    #[test]
    fn test_shift_down_stops_at_reverse() {
        let drivetrain = drivetrain();
        let mut state = VehicleState::default();
        let mut cues = CueBuffer::default();

        assert!(drivetrain.shift_down(&mut state, &mut cues));
        assert_eq!(state.current_gear, 0);
        assert_eq!(cues.drain(), vec![VehicleCue::ShiftDown]);

        for _ in 0..5 {
            assert!(!drivetrain.shift_down(&mut state, &mut cues));
            assert_eq!(state.current_gear, 0);
        }
        assert!(cues.is_empty());
    }

    #[test]
    fn test_shifts_move_exactly_one_gear() {
        let drivetrain = drivetrain();
        let mut state = VehicleState::default();
        let mut cues = CueBuffer::default();

        drivetrain.shift_up(&mut state, &mut cues);
        assert_eq!(state.current_gear, 2);
        assert_eq!(drivetrain.gear_label(state.current_gear), "1");
        drivetrain.shift_down(&mut state, &mut cues);
        assert_eq!(state.current_gear, 1);
    }
}
