// motorcar_sim/src/simulation/plugins/input.rs

//! Drivers that fill the `DriverInput` mailbox: the keyboard for windowed runs,
//! and a timed script from the scenario file for headless ones.

use motorcar_core::{
    input::{ButtonPresses, InputSnapshot},
    interaction::{actions_from_presses, press_button, UseTarget, VehicleAction},
};

use crate::{
    cli::Cli,
    prelude::*,
    simulation::core::{components::DriverInput, events::VehicleCommand},
};

// --- Keyboard tuning ---
const STEERING_RATE: f32 = 3.0; // Axis units per second toward full lock
const STEERING_RETURN_RATE: f32 = 2.0; // Axis units per second back to center
const PEDAL_PRESS_RATE: f32 = 4.0;
const PEDAL_RELEASE_RATE: f32 = 6.0;

// --- THE PLUGIN ---
pub struct DriverInputPlugin;

impl Plugin for DriverInputPlugin {
    fn build(&self, app: &mut App) {
        let world = app.world();
        let script = driver_script_for(
            world.get_resource::<ScenarioConfig>(),
            world.get_resource::<Cli>(),
        );
        if let Some(script) = script {
            info!("Driver script with {} entries loaded.", script.entries.len());
            app.insert_resource(script);
        }

        app.add_systems(
            Update,
            keyboard_driver
                .run_if(resource_exists::<ButtonInput<KeyCode>>)
                .run_if(not(resource_exists::<DriverScript>))
                .run_if(in_state(AppState::Running)),
        )
        .add_systems(
            FixedUpdate,
            scripted_driver
                .run_if(resource_exists::<DriverScript>)
                .in_set(SimulationSet::Input),
        );
    }
}

/// Picks the driver for this run. The script drives headless runs and hosts
/// without a CLI; a windowed run leaves the car to the keyboard.
pub fn driver_script_for(
    config: Option<&ScenarioConfig>,
    cli: Option<&Cli>,
) -> Option<DriverScript> {
    let script = &config?.script;
    if script.is_empty() {
        return None;
    }
    if cli.is_some_and(|cli| !cli.headless) {
        info!(
            "Windowed run: ignoring the {} scripted entries, the keyboard drives.",
            script.len()
        );
        return None;
    }
    Some(DriverScript::new(script.clone()))
}

// =========================================================================
// == Keyboard ==
// =========================================================================

/// Button edges for this frame from the cabin key bindings.
pub fn read_presses(keys: &ButtonInput<KeyCode>) -> ButtonPresses {
    ButtonPresses {
        ignition: keys.just_pressed(KeyCode::KeyI),
        shift_up: keys.just_pressed(KeyCode::KeyX),
        shift_down: keys.just_pressed(KeyCode::KeyZ),
        indicator_left: keys.just_pressed(KeyCode::KeyQ),
        indicator_right: keys.just_pressed(KeyCode::KeyE),
        headlights: keys.just_pressed(KeyCode::KeyL),
        interior_light: keys.just_pressed(KeyCode::KeyK),
        handbrake: keys.just_pressed(KeyCode::Space),
        wiper: keys.just_pressed(KeyCode::KeyV),
        door: false,
        exit: keys.just_pressed(KeyCode::KeyG),
    }
}

/// Moves `current` toward `target` by at most `max_step`.
fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    if current < target {
        (current + max_step).min(target)
    } else {
        (current - max_step).max(target)
    }
}

/// Steps the held axes for one frame. Steering and pedals are rate limited so
/// digital keys behave like analog axes.
pub fn step_axes(axes: &mut InputSnapshot, keys: &ButtonInput<KeyCode>, dt: f32) {
    let mut steer_direction = 0.0;
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        steer_direction -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        steer_direction += 1.0;
    }
    axes.steer = if steer_direction != 0.0 {
        approach(axes.steer, steer_direction, STEERING_RATE * dt)
    } else {
        approach(axes.steer, 0.0, STEERING_RETURN_RATE * dt)
    };

    let pedal = |value: f32, held: bool| {
        if held {
            approach(value, 1.0, PEDAL_PRESS_RATE * dt)
        } else {
            approach(value, 0.0, PEDAL_RELEASE_RATE * dt)
        }
    };
    axes.throttle = pedal(
        axes.throttle,
        keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp),
    );
    axes.brake = pedal(
        axes.brake,
        keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown),
    );
    axes.clutch = pedal(axes.clutch, keys.pressed(KeyCode::ShiftLeft));
}

/// RUNTIME: Reads the keyboard into every car's input mailbox.
///
/// Runs every rendered frame, so edges are OR-ed into the mailbox until the
/// next fixed tick consumes them.
fn keyboard_driver(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut commands: EventWriter<VehicleCommand>,
    mut query: Query<&mut DriverInput>,
) {
    let dt = time.delta_secs();
    let presses = read_presses(&keys);

    for mut input in &mut query {
        step_axes(&mut input.0, &keys, dt);
        for action in actions_from_presses(&presses) {
            press_button(&mut input.0.presses, action);
        }
    }

    // Interactions with the car body work from outside as well.
    if keys.just_pressed(KeyCode::KeyU) {
        commands.write(VehicleCommand::Use {
            target: UseTarget::Drive,
            secondary: false,
        });
    }
    if keys.just_pressed(KeyCode::KeyF) {
        commands.write(VehicleCommand::Use {
            target: UseTarget::Door,
            secondary: false,
        });
    }
}

// =========================================================================
// == Script ==
// =========================================================================

/// What the script wants this tick.
#[derive(Debug, Default, PartialEq)]
pub struct ScriptStep {
    /// Held axes plus the buttons that fire this tick.
    pub input: InputSnapshot,
    pub commands: Vec<VehicleCommand>,
}

/// Plays a sorted list of [`ScriptEntry`] against simulated time.
#[derive(Resource, Debug, Default)]
pub struct DriverScript {
    entries: Vec<ScriptEntry>,
    next: usize,
    held: InputSnapshot,
}

impl DriverScript {
    /// `entries` must be sorted by `at`; `load_scenario` already does that.
    pub fn new(entries: Vec<ScriptEntry>) -> Self {
        Self {
            entries,
            next: 0,
            held: InputSnapshot::default(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.entries.len()
    }

    /// Fires every entry due at or before `elapsed`.
    pub fn advance(&mut self, elapsed: f32) -> ScriptStep {
        let mut step = ScriptStep::default();

        while let Some(entry) = self.entries.get(self.next) {
            if entry.at > elapsed {
                break;
            }
            self.next += 1;
            debug!("Script entry at {:.2}s fired: {:?}", entry.at, entry);

            if let Some(target) = entry.use_target {
                step.commands.push(VehicleCommand::Use {
                    target,
                    secondary: entry.secondary,
                });
            }
            if let Some(action) = entry.action {
                if !press_button(&mut step.input.presses, action) {
                    // Entering has no cabin button; it is the seat's use.
                    step.commands.push(VehicleCommand::Perform(action));
                }
            }
            if let Some(value) = entry.throttle {
                self.held.throttle = value;
            }
            if let Some(value) = entry.brake {
                self.held.brake = value;
            }
            if let Some(value) = entry.clutch {
                self.held.clutch = value;
            }
            if let Some(value) = entry.steer {
                self.held.steer = value;
            }
        }

        step.input.steer = self.held.steer;
        step.input.throttle = self.held.throttle;
        step.input.brake = self.held.brake;
        step.input.clutch = self.held.clutch;
        step
    }
}

/// RUNTIME: Feeds the scenario script into every car.
fn scripted_driver(
    time: Res<Time>,
    mut script: ResMut<DriverScript>,
    mut commands: EventWriter<VehicleCommand>,
    mut query: Query<&mut DriverInput>,
) {
    let step = script.advance(time.elapsed_secs());

    for mut input in &mut query {
        input.0.steer = step.input.steer;
        input.0.throttle = step.input.throttle;
        input.0.brake = step.input.brake;
        input.0.clutch = step.input.clutch;
        for action in actions_from_presses(&step.input.presses) {
            press_button(&mut input.0.presses, action);
        }
    }
    commands.write_batch(step.commands);
}
