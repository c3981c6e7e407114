//! The core of a chip8 virtual machine: memory, registers, stack, timers, keypad and
//! framebuffer together with the instruction set. Windows, audio and rom files are up to
//! the host, it plugs in through the traits in [`devices`](devices).
pub mod chip8;
pub mod config;
pub mod definitions;
pub mod devices;
pub mod opcode;
pub mod resources;
pub mod timer;

mod error;
mod runner;

// reexporting for convinience
pub use error::*;
pub use runner::*;
