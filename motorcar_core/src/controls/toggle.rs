// motorcar_core/src/controls/toggle.rs

/// A two-state switch that remembers when it last changed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Toggle {
    active: bool,
    changed_at: f32,
}

impl Toggle {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Simulation time of the last transition (0 if it never changed).
    pub fn changed_at(&self) -> f32 {
        self.changed_at
    }

    /// Flips the switch at time `now` and returns the new state.
    pub fn toggle(&mut self, now: f32) -> bool {
        self.set(!self.active, now);
        self.active
    }

    /// Sets the switch. Returns `true` if that was a transition.
    pub fn set(&mut self, active: bool, now: f32) -> bool {
        if self.active == active {
            return false;
        }
        self.active = active;
        self.changed_at = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_records_transition_time() {
        let mut toggle = Toggle::default();
        assert!(!toggle.is_active());

        assert!(toggle.toggle(1.5));
        assert_eq!(toggle.changed_at(), 1.5);

        assert!(!toggle.set(true, 3.0));
        assert_eq!(toggle.changed_at(), 1.5);

        assert!(!toggle.toggle(4.0));
        assert_eq!(toggle.changed_at(), 4.0);
    }
}
