// motorcar_core/src/interaction.rs

//! Routing of "use" interactions and button presses onto vehicle actions.
//!
//! A use target is a clickable part of the car. Its primary use (left click)
//! and optional secondary use (right click) each resolve to one
//! [`VehicleAction`], the same vocabulary the driver's buttons map onto.

use serde::Deserialize;

use crate::{controls::IndicatorSide, input::ButtonPresses};

/// A discrete thing that can happen to the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleAction {
    Enter,
    Exit,
    Ignition,
    ShiftUp,
    ShiftDown,
    IndicatorLeft,
    IndicatorRight,
    Headlights,
    InteriorLight,
    Handbrake,
    Wiper,
    Door,
}

impl VehicleAction {
    pub fn indicator_side(self) -> Option<IndicatorSide> {
        match self {
            VehicleAction::IndicatorLeft => Some(IndicatorSide::Left),
            VehicleAction::IndicatorRight => Some(IndicatorSide::Right),
            _ => None,
        }
    }
}

/// Parts of the car that react to the player's use key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseTarget {
    /// The driver's seat trigger volume.
    Drive,
    Ignition,
    Handbrake,
    CarLights,
    InteriorLights,
    Shifter,
    Indicator,
    Wiper,
    Door,
}

impl UseTarget {
    pub fn primary_action(self) -> VehicleAction {
        match self {
            UseTarget::Drive => VehicleAction::Enter,
            UseTarget::Ignition => VehicleAction::Ignition,
            UseTarget::Handbrake => VehicleAction::Handbrake,
            UseTarget::CarLights => VehicleAction::Headlights,
            UseTarget::InteriorLights => VehicleAction::InteriorLight,
            UseTarget::Shifter => VehicleAction::ShiftUp,
            UseTarget::Indicator => VehicleAction::IndicatorLeft,
            UseTarget::Wiper => VehicleAction::Wiper,
            UseTarget::Door => VehicleAction::Door,
        }
    }

    /// Only the shifter and the indicator stalk have a second direction.
    pub fn secondary_action(self) -> Option<VehicleAction> {
        match self {
            UseTarget::Shifter => Some(VehicleAction::ShiftDown),
            UseTarget::Indicator => Some(VehicleAction::IndicatorRight),
            _ => None,
        }
    }
}

/// Turns one tick's button edges into actions, in the order the cabin handles them.
///
/// Shift up wins over shift down and left indicator over right when both went
/// down on the same tick.
pub fn actions_from_presses(presses: &ButtonPresses) -> Vec<VehicleAction> {
    let mut actions = Vec::new();

    if presses.ignition {
        actions.push(VehicleAction::Ignition);
    }
    if presses.exit {
        actions.push(VehicleAction::Exit);
    }

    if presses.shift_up {
        actions.push(VehicleAction::ShiftUp);
    } else if presses.shift_down {
        actions.push(VehicleAction::ShiftDown);
    }

    if presses.indicator_left {
        actions.push(VehicleAction::IndicatorLeft);
    } else if presses.indicator_right {
        actions.push(VehicleAction::IndicatorRight);
    }

    if presses.headlights {
        actions.push(VehicleAction::Headlights);
    }
    if presses.interior_light {
        actions.push(VehicleAction::InteriorLight);
    }
    if presses.handbrake {
        actions.push(VehicleAction::Handbrake);
    }
    if presses.wiper {
        actions.push(VehicleAction::Wiper);
    }
    if presses.door {
        actions.push(VehicleAction::Door);
    }

    actions
}

/// Sets the cabin button that triggers `action`, the inverse of
/// [`actions_from_presses`]. Returns `false` for [`VehicleAction::Enter`], which
/// has no button inside the car.
pub fn press_button(presses: &mut ButtonPresses, action: VehicleAction) -> bool {
    let button = match action {
        VehicleAction::Enter => return false,
        VehicleAction::Exit => &mut presses.exit,
        VehicleAction::Ignition => &mut presses.ignition,
        VehicleAction::ShiftUp => &mut presses.shift_up,
        VehicleAction::ShiftDown => &mut presses.shift_down,
        VehicleAction::IndicatorLeft => &mut presses.indicator_left,
        VehicleAction::IndicatorRight => &mut presses.indicator_right,
        VehicleAction::Headlights => &mut presses.headlights,
        VehicleAction::InteriorLight => &mut presses.interior_light,
        VehicleAction::Handbrake => &mut presses.handbrake,
        VehicleAction::Wiper => &mut presses.wiper,
        VehicleAction::Door => &mut presses.door,
    };
    *button = true;
    true
}
