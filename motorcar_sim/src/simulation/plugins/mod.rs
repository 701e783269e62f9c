// motorcar_sim/src/simulation/plugins/mod.rs

pub mod chassis;
pub mod input;
pub mod presentation;
pub mod vehicle;
