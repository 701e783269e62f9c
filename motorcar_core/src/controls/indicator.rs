// motorcar_core/src/controls/indicator.rs

use crate::cues::{CueBuffer, VehicleCue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IndicatorState {
    #[default]
    Off,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorSide {
    Left,
    Right,
}

impl From<IndicatorSide> for IndicatorState {
    fn from(side: IndicatorSide) -> Self {
        match side {
            IndicatorSide::Left => IndicatorState::Left,
            IndicatorSide::Right => IndicatorState::Right,
        }
    }
}

/// Which indicator bulbs are lit right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorLamps {
    pub front_left: bool,
    pub front_right: bool,
    pub rear_left: bool,
    pub rear_right: bool,
    /// The green arrow on the dashboard.
    pub dashboard: bool,
}

/// Turn signal lever plus the blink oscillator nested inside it.
///
/// Pushing a side selects it; pushing the selected side again returns to `Off`.
/// While a side is selected, `timer` accumulates `dt` and the lamp phase flips
/// every time it reaches `blink_interval` (inclusive), then restarts from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    state: IndicatorState,
    lamp_lit: bool,
    timer: f32,
    blink_interval: f32,
    changed_at: f32,
}

impl Indicator {
    pub fn new(blink_interval: f32) -> Self {
        Self {
            state: IndicatorState::Off,
            lamp_lit: false,
            timer: 0.0,
            blink_interval,
            changed_at: 0.0,
        }
    }

    pub fn state(&self) -> IndicatorState {
        self.state
    }

    pub fn changed_at(&self) -> f32 {
        self.changed_at
    }

    /// The lamp phase of the blink oscillator.
    pub fn is_lit(&self) -> bool {
        self.lamp_lit
    }

    pub fn press(&mut self, side: IndicatorSide, now: f32, cues: &mut CueBuffer) {
        let pressed = IndicatorState::from(side);
        let was_off = self.state == IndicatorState::Off;

        if self.state == pressed {
            self.state = IndicatorState::Off;
            self.lamp_lit = false;
            self.timer = 0.0;
            cues.push(VehicleCue::IndicatorLoopStop);
        } else {
            self.state = pressed;
            if was_off {
                cues.push(VehicleCue::IndicatorLoopStart);
            }
        }

        self.changed_at = now;
        cues.push(VehicleCue::LeverPull);
    }

    /// Advances the blink timer. Returns `true` if the lamps flipped this tick.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.state == IndicatorState::Off {
            return false;
        }
        self.timer += dt;
        if self.timer >= self.blink_interval {
            self.lamp_lit = !self.lamp_lit;
            self.timer = 0.0;
            return true;
        }
        false
    }

    pub fn lamps(&self) -> IndicatorLamps {
        let left = self.lamp_lit && self.state == IndicatorState::Left;
        let right = self.lamp_lit && self.state == IndicatorState::Right;
        IndicatorLamps {
            front_left: left,
            rear_left: left,
            front_right: right,
            rear_right: right,
            dashboard: left || right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_twice_returns_to_off() {
        let mut indicator = Indicator::new(0.35);
        let mut cues = CueBuffer::default();

        indicator.press(IndicatorSide::Left, 0.0, &mut cues);
        assert_eq!(indicator.state(), IndicatorState::Left);
        indicator.press(IndicatorSide::Left, 1.0, &mut cues);
        assert_eq!(indicator.state(), IndicatorState::Off);

        assert_eq!(
            cues.drain(),
            vec![
                VehicleCue::IndicatorLoopStart,
                VehicleCue::LeverPull,
                VehicleCue::IndicatorLoopStop,
                VehicleCue::LeverPull,
            ]
        );
    }

    #[test]
    fn test_left_then_right_lands_on_right() {
        let mut indicator = Indicator::new(0.35);
        let mut cues = CueBuffer::default();

        indicator.press(IndicatorSide::Left, 0.0, &mut cues);
        indicator.press(IndicatorSide::Right, 0.5, &mut cues);
        assert_eq!(indicator.state(), IndicatorState::Right);
        assert_eq!(indicator.changed_at(), 0.5);
        assert!(!cues.contains(VehicleCue::IndicatorLoopStop));
    }

    #[test]
    fn test_blink_flips_once_per_interval_inclusive() {
        let mut indicator = Indicator::new(0.35);
        let mut cues = CueBuffer::default();
        indicator.press(IndicatorSide::Left, 0.0, &mut cues);

        let flips: Vec<usize> = (1..=10)
            .filter(|_| indicator.advance(0.05))
            .collect();
        // The seventh tick lands exactly on 0.35 s.
        assert_eq!(flips, vec![7]);
        assert!(indicator.is_lit());
        assert!(indicator.lamps().front_left && indicator.lamps().rear_left);
        assert!(!indicator.lamps().front_right);
    }

    #[test]
    fn test_ten_flips_in_three_and_a_half_seconds() {
        let mut indicator = Indicator::new(0.35);
        let mut cues = CueBuffer::default();
        indicator.press(IndicatorSide::Right, 0.0, &mut cues);

        let flips = (0..70).filter(|_| indicator.advance(0.05)).count();
        assert_eq!(flips, 10);
        // An even number of flips leaves the lamps dark.
        assert!(!indicator.is_lit());
    }

    #[test]
    fn test_off_does_not_blink_and_clears_lamps() {
        let mut indicator = Indicator::new(0.35);
        let mut cues = CueBuffer::default();
        indicator.press(IndicatorSide::Left, 0.0, &mut cues);
        indicator.advance(0.4);
        assert!(indicator.lamps().dashboard);

        indicator.press(IndicatorSide::Left, 0.4, &mut cues);
        assert_eq!(indicator.lamps(), IndicatorLamps::default());
        assert!(!indicator.advance(1.0));
    }

    #[test]
    fn test_switching_side_moves_lit_lamps() {
        let mut indicator = Indicator::new(0.35);
        let mut cues = CueBuffer::default();
        indicator.press(IndicatorSide::Left, 0.0, &mut cues);
        indicator.advance(0.35);
        indicator.press(IndicatorSide::Right, 0.4, &mut cues);

        let lamps = indicator.lamps();
        assert!(lamps.front_right && lamps.rear_right);
        assert!(!lamps.front_left && !lamps.rear_left);
    }
}
