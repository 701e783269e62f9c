// motorcar_core/src/cues.rs

/// A one-shot trigger for the audio collaborator (and anything else that wants to
/// react to a transition). The core never plays sound itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleCue {
    // --- Motor ---
    EngineStart,
    /// The start clip has finished; switch the motor source to its idle loop.
    EngineIdleLoop,
    EngineStop,
    /// The fuel ran out while the motor was running.
    EngineStalled,
    InsertKey,

    // --- Cabin controls ---
    ShiftUp,
    ShiftDown,
    LeverPull,
    LightSwitch,
    HandbrakeOn,
    HandbrakeOff,
    IndicatorLoopStart,
    IndicatorLoopStop,
    WiperLoopStart,
    WiperLoopStop,
    BrakeSqueal,
    BrakeRelease,

    // --- Body ---
    DoorOpen,
    DoorClose,
    PlayerEntered,
    PlayerExited,
}

/// Cues raised during one tick, in the order the transitions happened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueBuffer(Vec<VehicleCue>);

impl CueBuffer {
    pub fn push(&mut self, cue: VehicleCue) {
        self.0.push(cue);
    }

    pub fn contains(&self, cue: VehicleCue) -> bool {
        self.0.contains(&cue)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[VehicleCue] {
        &self.0
    }

    /// Hands out everything collected so far and leaves the buffer empty.
    pub fn drain(&mut self) -> Vec<VehicleCue> {
        std::mem::take(&mut self.0)
    }
}
