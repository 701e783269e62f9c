// motorcar_core/src/occupancy.rs

use log::{debug, info};

/// Who controls what: the walking player or the car.
///
/// The flags are read by the player-locomotion, camera and interaction
/// collaborators; the core never moves the player itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerBinding {
    driving: bool,
    /// Walking controller (character capsule) is allowed to move the player.
    pub locomotion_enabled: bool,
    /// Player camera is parented to the car's seat target.
    pub camera_parented: bool,
    /// The player's flashlight. Switched off on entry and left off.
    pub flashlight_enabled: bool,
    /// The trigger volume used to enter the car.
    pub entry_trigger_enabled: bool,
}

impl Default for PlayerBinding {
    fn default() -> Self {
        Self {
            driving: false,
            locomotion_enabled: true,
            camera_parented: false,
            flashlight_enabled: true,
            entry_trigger_enabled: true,
        }
    }
}

impl PlayerBinding {
    /// The occupancy flag.
    pub fn is_driving(&self) -> bool {
        self.driving
    }

    /// Hands control to the car. Rejected if the player is already driving.
    pub fn enter(&mut self) -> bool {
        if self.driving {
            debug!("Enter ignored, player is already driving.");
            return false;
        }
        info!("Player entered the vehicle.");
        self.driving = true;
        self.locomotion_enabled = false;
        self.camera_parented = true;
        self.flashlight_enabled = false;
        self.entry_trigger_enabled = false;
        true
    }

    /// Hands control back to walking. Needs the player to be driving and the
    /// exit door to be open.
    pub fn exit(&mut self, door_open: bool) -> bool {
        if !self.driving {
            debug!("Exit ignored, player is not driving.");
            return false;
        }
        if !door_open {
            debug!("Exit ignored, the door is shut.");
            return false;
        }
        info!("Player left the vehicle.");
        self.driving = false;
        self.locomotion_enabled = true;
        self.camera_parented = false;
        self.entry_trigger_enabled = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_binds_player_once() {
        let mut binding = PlayerBinding::default();
        assert!(binding.enter());
        assert!(binding.is_driving());
        assert!(!binding.locomotion_enabled);
        assert!(!binding.entry_trigger_enabled);
        assert!(!binding.flashlight_enabled);

        let snapshot = binding;
        assert!(!binding.enter());
        assert_eq!(binding, snapshot);
    }

    #[test]
    fn test_exit_requires_open_door() {
        let mut binding = PlayerBinding::default();
        assert!(!binding.exit(true));

        binding.enter();
        assert!(!binding.exit(false));
        assert!(binding.is_driving());

        assert!(binding.exit(true));
        assert!(!binding.is_driving());
        assert!(binding.locomotion_enabled);
        assert!(!binding.camera_parented);
        assert!(binding.entry_trigger_enabled);
    }
}
