// motorcar_core/src/controls/wiper.rs

use crate::{
    controls::toggle::Toggle,
    cues::{CueBuffer, VehicleCue},
};

/// Wiper switch and the arm oscillator.
///
/// While on, the arm sweeps a triangle wave between 0 and `sweep` degrees at a
/// constant `speed`. When switched off it keeps travelling back toward zero
/// instead of snapping, and parks there ready to sweep forward again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wiper {
    switch: Toggle,
    angle: f32,
    forward: bool,
    speed: f32,
    sweep: f32,
}

impl Wiper {
    pub fn new(speed: f32, sweep: f32) -> Self {
        Self {
            switch: Toggle::default(),
            angle: 0.0,
            forward: true,
            speed,
            sweep,
        }
    }

    pub fn is_on(&self) -> bool {
        self.switch.is_active()
    }

    pub fn switch(&self) -> &Toggle {
        &self.switch
    }

    /// Arm rotation in degrees, always in `[0, sweep]`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn press(&mut self, now: f32, cues: &mut CueBuffer) {
        if self.switch.toggle(now) {
            cues.push(VehicleCue::WiperLoopStart);
        } else {
            cues.push(VehicleCue::WiperLoopStop);
        }
        cues.push(VehicleCue::LeverPull);
    }

    pub fn advance(&mut self, dt: f32) {
        let step = self.speed * dt;
        if self.is_on() {
            if self.forward {
                self.angle += step;
                if self.angle >= self.sweep {
                    self.angle = self.sweep;
                    self.forward = false;
                }
            } else {
                self.angle -= step;
                if self.angle <= 0.0 {
                    self.angle = 0.0;
                    self.forward = true;
                }
            }
        } else if self.angle > 0.0 {
            self.angle -= step;
            if self.angle <= 0.0 {
                self.angle = 0.0;
                self.forward = true;
            }
        }
    }
}
