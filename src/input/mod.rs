//! Input adapters for the simulator.
//!
//! Raw key names and typed lines are translated into session commands here;
//! capturing the keys themselves is left to the host terminal or window.

pub mod keymap;
