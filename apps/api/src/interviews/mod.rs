// Interview lifecycle: trigger, answer recording, completion, simulation.
// All answer writes go through lifecycle.rs under the per-interview lock.

pub mod handlers;
pub mod lifecycle;
pub mod locks;
pub mod simulate;
