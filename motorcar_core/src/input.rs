// motorcar_core/src/input.rs

/// One tick's worth of driver input, already normalized by the host.
///
/// Axes are level values sampled this tick. Everything in [`ButtonPresses`] is an
/// edge: `true` only on the tick the button went down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Steering axis, -1.0 (full left) to 1.0 (full right).
    pub steer: f32,
    /// Gas pedal, 0.0 to 1.0.
    pub throttle: f32,
    /// Brake pedal, 0.0 to 1.0.
    pub brake: f32,
    /// Clutch pedal, 0.0 to 1.0. Only drives the pedal prop.
    pub clutch: f32,
    pub presses: ButtonPresses,
}

impl InputSnapshot {
    /// Copy of this snapshot with every axis clamped into its legal range.
    pub fn sanitized(&self) -> Self {
        Self {
            steer: finite_or_zero(self.steer).clamp(-1.0, 1.0),
            throttle: finite_or_zero(self.throttle).clamp(0.0, 1.0),
            brake: finite_or_zero(self.brake).clamp(0.0, 1.0),
            clutch: finite_or_zero(self.clutch).clamp(0.0, 1.0),
            presses: self.presses,
        }
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Buttons that went down this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonPresses {
    pub ignition: bool,
    pub shift_up: bool,
    pub shift_down: bool,
    pub indicator_left: bool,
    pub indicator_right: bool,
    pub headlights: bool,
    pub interior_light: bool,
    pub handbrake: bool,
    pub wiper: bool,
    pub door: bool,
    pub exit: bool,
}

impl ButtonPresses {
    pub fn any(&self) -> bool {
        *self != Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_clamps_axes() {
        let raw = InputSnapshot {
            steer: -3.0,
            throttle: 1.5,
            brake: f32::NAN,
            clutch: -0.2,
            presses: ButtonPresses::default(),
        };
        let clean = raw.sanitized();
        assert_eq!(clean.steer, -1.0);
        assert_eq!(clean.throttle, 1.0);
        assert_eq!(clean.brake, 0.0);
        assert_eq!(clean.clutch, 0.0);
    }

    #[test]
    fn test_any_press() {
        assert!(!ButtonPresses::default().any());
        let presses = ButtonPresses {
            wiper: true,
            ..Default::default()
        };
        assert!(presses.any());
    }
}
