// motorcar_core/src/controls/mod.rs

//! The cabin's discrete controls.
//!
//! Every control here is edge-triggered: it changes only on the tick a button
//! goes down (or when something "uses" it), never because a button is held.
//! The two time-driven pieces, the ignition's startup timer and the indicator
//! blink, advance from [`Controls::advance`] with the tick's `dt`.

pub mod door;
pub mod ignition;
pub mod indicator;
pub mod pedals;
pub mod toggle;
pub mod wiper;

use log::debug;

use crate::{
    config::VehicleConfig,
    cues::{CueBuffer, VehicleCue},
    state::VehicleState,
};

pub use self::{
    door::Door,
    ignition::Ignition,
    indicator::{Indicator, IndicatorLamps, IndicatorSide, IndicatorState},
    pedals::Pedals,
    toggle::Toggle,
    wiper::Wiper,
};

/// All toggle states of one car, created with everything off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub ignition: Ignition,
    pub headlights: Toggle,
    pub interior_light: Toggle,
    pub handbrake: Toggle,
    pub indicator: Indicator,
    pub wiper: Wiper,
    pub door: Door,
    pub pedals: Pedals,
}

impl Controls {
    pub fn new(config: &VehicleConfig) -> Self {
        Self {
            ignition: Ignition::new(config.engine.start_clip_seconds),
            headlights: Toggle::default(),
            interior_light: Toggle::default(),
            handbrake: Toggle::default(),
            indicator: Indicator::new(config.cosmetics.blink_interval),
            wiper: Wiper::new(config.cosmetics.wiper_speed, config.cosmetics.wiper_sweep),
            door: Door::new(&config.door),
            pedals: Pedals::new(&config.chassis),
        }
    }

    pub fn toggle_headlights(&mut self, now: f32, cues: &mut CueBuffer) {
        let on = self.headlights.toggle(now);
        debug!("Headlights {}.", if on { "on" } else { "off" });
        cues.push(VehicleCue::LightSwitch);
    }

    pub fn toggle_interior_light(&mut self, now: f32, cues: &mut CueBuffer) {
        self.interior_light.toggle(now);
        cues.push(VehicleCue::LightSwitch);
    }

    pub fn toggle_handbrake(&mut self, now: f32, cues: &mut CueBuffer) {
        if self.handbrake.toggle(now) {
            cues.push(VehicleCue::HandbrakeOn);
        } else {
            cues.push(VehicleCue::HandbrakeOff);
        }
    }

    pub fn press_indicator(&mut self, side: IndicatorSide, now: f32, cues: &mut CueBuffer) {
        self.indicator.press(side, now, cues);
    }

    pub fn toggle_wiper(&mut self, now: f32, cues: &mut CueBuffer) {
        self.wiper.press(now, cues);
    }

    pub fn toggle_door(&mut self, now: f32, cues: &mut CueBuffer) {
        self.door.toggle(now, cues);
    }

    pub fn press_ignition(&mut self, state: &mut VehicleState, cues: &mut CueBuffer) {
        self.ignition.press(state, cues);
    }

    /// Advances the time-driven parts: startup timer, blink, wiper arm and the
    /// door close poll (`door_angle` comes from the hinge solver).
    pub fn advance(&mut self, dt: f32, door_angle: f32, cues: &mut CueBuffer) {
        self.ignition.advance(dt, cues);
        self.indicator.advance(dt);
        self.wiper.advance(dt);
        self.door.advance(door_angle, cues);
    }
}
