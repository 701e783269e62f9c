// motorcar_core/src/fuel.rs

use std::fmt::Debug;

/// The car's tank, as seen by the engine. The container subsystem (jerry cans,
/// pumps, refuelling) lives outside the core and only has to expose these fields.
/// Implementations must be `Send + Sync` so a host ECS can own them.
pub trait FuelTank: Debug + Send + Sync {
    /// Litres currently in the tank.
    fn current_liquid(&self) -> f32;

    /// Capacity in litres.
    fn max_liquid(&self) -> f32;

    fn set_current_liquid(&mut self, litres: f32);

    /// Fill level in `[0, 1]`. An empty-capacity tank reads as empty.
    fn fraction(&self) -> f32 {
        let max = self.max_liquid();
        if max <= 0.0 {
            return 0.0;
        }
        (self.current_liquid() / max).clamp(0.0, 1.0)
    }

    fn is_empty(&self) -> bool {
        self.current_liquid() <= 0.0
    }

    /// Removes up to `litres`, never going below zero.
    fn draw(&mut self, litres: f32) {
        let remaining = (self.current_liquid() - litres.max(0.0)).max(0.0);
        self.set_current_liquid(remaining);
    }
}

/// A plain tank holding a level and a capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelCan {
    current: f32,
    capacity: f32,
}

impl FuelCan {
    pub fn new(current: f32, capacity: f32) -> Self {
        let capacity = capacity.max(0.0);
        Self {
            current: current.clamp(0.0, capacity),
            capacity,
        }
    }

    pub fn full(capacity: f32) -> Self {
        Self::new(capacity, capacity)
    }
}

impl FuelTank for FuelCan {
    fn current_liquid(&self) -> f32 {
        self.current
    }

    fn max_liquid(&self) -> f32 {
        self.capacity
    }

    fn set_current_liquid(&mut self, litres: f32) {
        self.current = litres.clamp(0.0, self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_draw_clamps_at_zero() {
        let mut can = FuelCan::new(0.5, 40.0);
        can.draw(2.0);
        assert_eq!(can.current_liquid(), 0.0);
        assert!(can.is_empty());
    }

    #[test]
    fn test_fraction() {
        let can = FuelCan::new(10.0, 40.0);
        assert_abs_diff_eq!(can.fraction(), 0.25);
        assert_eq!(FuelCan::new(3.0, 0.0).fraction(), 0.0);
    }
}
