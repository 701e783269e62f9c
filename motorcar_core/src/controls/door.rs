// motorcar_core/src/controls/door.rs

use crate::{
    config::DoorConfig,
    controls::toggle::Toggle,
    cues::{CueBuffer, VehicleCue},
    types::HingeCommand,
};

/// The driver's door, driven through a hinge motor owned by the physics host.
///
/// Opening plays its sound immediately. Closing only arms the close sound; it is
/// played on the first tick the hinge actually reports itself shut, which is
/// polled every tick in [`Door::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Door {
    config_open_angle: f32,
    open_speed: f32,
    close_speed: f32,
    motor_force: f32,
    closed_tolerance: f32,
    switch: Toggle,
    hinge: HingeCommand,
    close_sound_pending: bool,
}

impl Door {
    pub fn new(config: &DoorConfig) -> Self {
        Self {
            config_open_angle: config.open_angle,
            open_speed: config.open_speed,
            close_speed: config.close_speed,
            motor_force: config.motor_force,
            closed_tolerance: config.closed_tolerance,
            switch: Toggle::default(),
            hinge: HingeCommand::default(),
            close_sound_pending: false,
        }
    }

    /// The door's interaction flag. This is what "the door is open" means for exiting.
    pub fn is_open(&self) -> bool {
        self.switch.is_active()
    }

    pub fn switch(&self) -> &Toggle {
        &self.switch
    }

    /// What the hinge joint should currently be doing.
    pub fn hinge(&self) -> HingeCommand {
        self.hinge
    }

    pub fn is_close_sound_pending(&self) -> bool {
        self.close_sound_pending
    }

    pub fn toggle(&mut self, now: f32, cues: &mut CueBuffer) {
        if self.switch.toggle(now) {
            self.hinge = HingeCommand {
                limits: [0.0, self.config_open_angle],
                target_velocity: self.config_open_angle * self.open_speed,
                force: self.motor_force,
                use_motor: true,
            };
            self.close_sound_pending = false;
            cues.push(VehicleCue::DoorOpen);
        } else {
            self.hinge = HingeCommand {
                limits: [0.0, 0.0],
                target_velocity: -self.config_open_angle * self.close_speed,
                force: self.motor_force,
                use_motor: true,
            };
            self.close_sound_pending = true;
        }
    }

    /// Polls the real hinge angle reported by the physics host.
    pub fn advance(&mut self, hinge_angle: f32, cues: &mut CueBuffer) {
        if self.is_open() || !self.close_sound_pending {
            return;
        }
        if hinge_angle.abs() <= self.closed_tolerance {
            self.close_sound_pending = false;
            cues.push(VehicleCue::DoorClose);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_commands_hinge_and_plays_sound() {
        let mut door = Door::new(&DoorConfig::default());
        let mut cues = CueBuffer::default();

        door.toggle(0.0, &mut cues);
        assert!(door.is_open());
        assert_eq!(cues.drain(), vec![VehicleCue::DoorOpen]);

        let hinge = door.hinge();
        assert_eq!(hinge.limits, [0.0, 90.0]);
        assert_eq!(hinge.target_velocity, 180.0);
        assert!(hinge.use_motor);
    }

    #[test]
    fn test_close_sound_waits_for_hinge_to_shut() {
        let mut door = Door::new(&DoorConfig::default());
        let mut cues = CueBuffer::default();
        door.toggle(0.0, &mut cues);
        cues.drain();

        door.toggle(1.0, &mut cues);
        assert!(!door.is_open());
        assert!(cues.is_empty());
        assert!(door.hinge().target_velocity < 0.0);

        for angle in [80.0, 45.0, 10.0, 2.0] {
            door.advance(angle, &mut cues);
            assert!(cues.is_empty());
        }

        door.advance(0.0, &mut cues);
        assert_eq!(cues.drain(), vec![VehicleCue::DoorClose]);

        // Edge-detected: staying shut does not repeat the sound.
        door.advance(0.0, &mut cues);
        assert!(cues.is_empty());
    }

    #[test]
    fn test_reopening_before_shut_cancels_close_sound() {
        let mut door = Door::new(&DoorConfig::default());
        let mut cues = CueBuffer::default();
        door.toggle(0.0, &mut cues);
        door.toggle(0.5, &mut cues);
        door.toggle(0.7, &mut cues);
        cues.drain();

        door.advance(0.0, &mut cues);
        assert!(cues.is_empty());
        assert!(!door.is_close_sound_pending());
    }
}
