//! The full implementation of the chip8 machine, from the state and the opcodes to an
//! option to pretty print them.
mod chipset;
mod framebuffer;
mod opcodes;
mod print;

/// reexport chipset structs and data for simpler usage
pub use chipset::*;
pub use framebuffer::*;
