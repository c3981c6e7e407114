use thiserror::Error;

use crate::opcode::Opcode;

/// Every fault the machine can run into. All of them are fatal, the
/// host decides whether to stop or to reset the chipset.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ExecutionFault {
    #[error("An unsupported opcode {opcode:#06X} was used at {pc:#06X}.")]
    InvalidOpcode { opcode: Opcode, pc: usize },
    #[error("Stack is full, the call at {pc:#06X} can not be made.")]
    StackOverflow { pc: usize },
    #[error("Stack is empty, the return at {pc:#06X} has no caller.")]
    StackUnderflow { pc: usize },
    #[error("Address {address:#06X} is out of range (instruction at {pc:#06X}).")]
    AddressOutOfRange { address: usize, pc: usize },
    #[error("Invalid rom '{0}'.")]
    Rom(#[from] RomError),
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    Unknown(Opcode),
    #[error("Pointer location invalid there can not be an opcode at {pointer}, if data len is {len}")]
    MemoryInvalid { pointer: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Full,
    #[error("Stack is empty!")]
    Empty,
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum RomError {
    #[error("The rom {name} is {len} bytes long, but only {max} bytes fit into memory.")]
    TooLarge { name: String, len: usize, max: usize },
}

impl OpcodeError {
    /// Lifts the decoder error into the fault the host sees.
    pub(crate) fn at(self, pc: usize) -> ExecutionFault {
        match self {
            OpcodeError::Unknown(opcode) => ExecutionFault::InvalidOpcode { opcode, pc },
            // the first byte missing from the opcode
            OpcodeError::MemoryInvalid { pointer, len } => ExecutionFault::AddressOutOfRange {
                address: pointer.max(len),
                pc,
            },
        }
    }
}

impl StackError {
    pub(crate) fn at(self, pc: usize) -> ExecutionFault {
        match self {
            StackError::Full => ExecutionFault::StackOverflow { pc },
            StackError::Empty => ExecutionFault::StackUnderflow { pc },
        }
    }
}
