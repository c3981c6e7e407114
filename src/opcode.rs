//! Opcode abstractions, the canonical instruction table and the dispatcher.
use std::{
    convert::{TryFrom, TryInto},
    fmt,
};

use crate::{definitions::memory, ExecutionFault, OpcodeError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a single nibble
const NIBBLE_SIZE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::OpcodeError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 3;
/// # let err = OpcodeError::MemoryInvalid { pointer, len: SPLIT_OPCODE.len() };
/// # assert_eq!(Err(err), build_opcode(&SPLIT_OPCODE, pointer));
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, OpcodeError> {
    if pointer + 1 < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(OpcodeError::MemoryInvalid {
            pointer,
            len: data.len(),
        })
    }
}

/// Field extractors for the different opcode shapes.
pub trait OpcodeTrait {
    /// the opcode type, `T` of `TNNN`, shifted down to a single nibble
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> usize;

    /// the address of the opcode type `TNNN`
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> usize;

    /// the register index and constant of the opcode type `TXNN`
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xnn(), (0xE, 0xDA));
    /// ```
    fn xnn(&self) -> (usize, u8);

    /// the two register indexes and the sub type of the opcode type `TXYN`
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, usize);

    /// the first register index of any opcode
    fn x(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    fn t(&self) -> usize {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE_SIZE)) as usize
    }

    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }

    fn xnn(&self) -> (usize, u8) {
        (self.x(), (self & OPCODE_MASK_00FF) as u8)
    }

    fn xyn(&self) -> (usize, usize, usize) {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        let y = ((self & MASK) >> NIBBLE_SIZE) as usize;
        let n = (self & OPCODE_MASK_000F) as usize;
        (self.x(), y, n)
    }

    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE_SIZE)) as usize
    }
}

/// Generates the conversion from a sub discriminant into the given
/// enum, anything not listed is rejected.
macro_rules! sub_opcodes {
    ($type_name:ident : $type_from:ty : $( $key:literal => $val:ident ),+ $(,)? ) => {
        impl TryFrom<$type_from> for $type_name {
            type Error = ();

            fn try_from(value: $type_from) -> Result<Self, Self::Error> {
                match value {
                    $(
                        $key => Ok($type_name::$val),
                    )+
                    _ => Err(()),
                }
            }
        }
    };
}

/// The register to register operations of the `8XYN` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arithmetic {
    Assign,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReverse,
    ShiftLeft,
}

sub_opcodes!(Arithmetic : usize :
    0x0 => Assign,
    0x1 => Or,
    0x2 => And,
    0x3 => Xor,
    0x4 => Add,
    0x5 => Sub,
    0x6 => ShiftRight,
    0x7 => SubReverse,
    0xE => ShiftLeft,
);

/// The keyboard conditions of the `EXNN` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCondition {
    Pressed,
    NotPressed,
}

sub_opcodes!(KeyCondition : u8 :
    0x9E => Pressed,
    0xA1 => NotPressed,
);

/// The timer, keyboard and memory operations of the `FXNN` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misc {
    GetDelayTimer,
    AwaitKeyPress,
    SetDelayTimer,
    SetSoundTimer,
    AddToIndex,
    SetIndexToGlyph,
    StoreBcd,
    StoreRegisters,
    LoadRegisters,
}

sub_opcodes!(Misc : u8 :
    0x07 => GetDelayTimer,
    0x0A => AwaitKeyPress,
    0x15 => SetDelayTimer,
    0x18 => SetSoundTimer,
    0x1E => AddToIndex,
    0x29 => SetIndexToGlyph,
    0x33 => StoreBcd,
    0x55 => StoreRegisters,
    0x65 => LoadRegisters,
);

/// Every instruction the chipset understands, with its operands already
/// extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    ClearDisplay,
    /// `00EE`
    Return,
    /// `1NNN`
    Jump { nnn: usize },
    /// `2NNN`
    Call { nnn: usize },
    /// `3XNN`
    SkipIfEqual { x: usize, nn: u8 },
    /// `4XNN`
    SkipIfNotEqual { x: usize, nn: u8 },
    /// `5XY0`
    SkipIfRegistersEqual { x: usize, y: usize },
    /// `6XNN`
    Load { x: usize, nn: u8 },
    /// `7XNN`
    Add { x: usize, nn: u8 },
    /// `8XYN`
    Arithmetic { ops: Arithmetic, x: usize, y: usize },
    /// `9XY0`
    SkipIfRegistersNotEqual { x: usize, y: usize },
    /// `ANNN`
    SetIndex { nnn: usize },
    /// `BNNN`, the `x` is only used with the CHIP-48 jump quirk
    JumpWithOffset { x: usize, nnn: usize },
    /// `CXNN`
    Random { x: usize, nn: u8 },
    /// `DXYN`
    Draw { x: usize, y: usize, n: usize },
    /// `EX9E` / `EXA1`
    Key { ops: KeyCondition, x: usize },
    /// `FXNN`
    Misc { ops: Misc, x: usize },
}

impl TryFrom<Opcode> for Instruction {
    type Error = OpcodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let unknown = |_: ()| OpcodeError::Unknown(value);
        let (x, y, n) = value.xyn();
        let (_, nn) = value.xnn();
        let nnn = value.nnn();

        let res = match value.t() {
            0x0 => match value {
                0x00E0 => Instruction::ClearDisplay,
                0x00EE => Instruction::Return,
                _ => return Err(OpcodeError::Unknown(value)),
            },
            0x1 => Instruction::Jump { nnn },
            0x2 => Instruction::Call { nnn },
            0x3 => Instruction::SkipIfEqual { x, nn },
            0x4 => Instruction::SkipIfNotEqual { x, nn },
            0x5 if n == 0 => Instruction::SkipIfRegistersEqual { x, y },
            0x6 => Instruction::Load { x, nn },
            0x7 => Instruction::Add { x, nn },
            0x8 => Instruction::Arithmetic {
                ops: n.try_into().map_err(unknown)?,
                x,
                y,
            },
            0x9 if n == 0 => Instruction::SkipIfRegistersNotEqual { x, y },
            0xA => Instruction::SetIndex { nnn },
            0xB => Instruction::JumpWithOffset { x, nnn },
            0xC => Instruction::Random { x, nn },
            0xD => Instruction::Draw { x, y, n },
            0xE => Instruction::Key {
                ops: nn.try_into().map_err(unknown)?,
                x,
            },
            0xF => Instruction::Misc {
                ops: nn.try_into().map_err(unknown)?,
                x,
            },
            _ => return Err(OpcodeError::Unknown(value)),
        };
        Ok(res)
    }
}

impl fmt::Display for Instruction {
    /// Prints the instruction in the common assembler notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::ClearDisplay => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Instruction::Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            Instruction::SkipIfEqual { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            Instruction::SkipIfNotEqual { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            Instruction::SkipIfRegistersEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::Load { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Instruction::Add { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Instruction::Arithmetic { ops, x, y } => {
                let name = match ops {
                    Arithmetic::Assign => "LD",
                    Arithmetic::Or => "OR",
                    Arithmetic::And => "AND",
                    Arithmetic::Xor => "XOR",
                    Arithmetic::Add => "ADD",
                    Arithmetic::Sub => "SUB",
                    Arithmetic::ShiftRight => "SHR",
                    Arithmetic::SubReverse => "SUBN",
                    Arithmetic::ShiftLeft => "SHL",
                };
                write!(f, "{} V{:X}, V{:X}", name, x, y)
            }
            Instruction::SkipIfRegistersNotEqual { x, y } => {
                write!(f, "SNE V{:X}, V{:X}", x, y)
            }
            Instruction::SetIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            // the classic form, with the CHIP-48 jump quirk the offset is `VX` instead
            Instruction::JumpWithOffset { nnn, .. } => write!(f, "JP V0, {:#05X}", nnn),
            Instruction::Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:#X}", x, y, n),
            Instruction::Key { ops, x } => match ops {
                KeyCondition::Pressed => write!(f, "SKP V{:X}", x),
                KeyCondition::NotPressed => write!(f, "SKNP V{:X}", x),
            },
            Instruction::Misc { ops, x } => match ops {
                Misc::GetDelayTimer => write!(f, "LD V{:X}, DT", x),
                Misc::AwaitKeyPress => write!(f, "LD V{:X}, K", x),
                Misc::SetDelayTimer => write!(f, "LD DT, V{:X}", x),
                Misc::SetSoundTimer => write!(f, "LD ST, V{:X}", x),
                Misc::AddToIndex => write!(f, "ADD I, V{:X}", x),
                Misc::SetIndexToGlyph => write!(f, "LD F, V{:X}", x),
                Misc::StoreBcd => write!(f, "LD B, V{:X}", x),
                Misc::StoreRegisters => write!(f, "LD [I], V{:X}", x),
                Misc::LoadRegisters => write!(f, "LD V{:X}, [I]", x),
            },
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take.
pub enum ProgramCounterStep {
    /// Will not change the program counter
    None,
    /// Will move the program counter to the next instruction
    Next,
    /// Will skip the next instruction
    Skip,
    /// Will simply move the program counter to the given location.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// The address the program counter moves to, starting from `pc`.
    #[inline]
    pub fn target(&self, pc: usize) -> usize {
        match *self {
            ProgramCounterStep::None => pc,
            ProgramCounterStep::Next => pc + memory::opcodes::SIZE,
            ProgramCounterStep::Skip => pc + 2 * memory::opcodes::SIZE,
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }

    /// Calculates where the program counter ends up, starting from `pc`.
    ///
    /// The end of memory is a valid place to land on, so the last
    /// instruction at `0xFFE` can finish. Fetching there faults.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Skip.apply(0x200), Some(0x204));
    /// assert_eq!(ProgramCounterStep::Next.apply(0xFFE), Some(0x1000));
    /// assert_eq!(ProgramCounterStep::Jump(0x1001).apply(0x200), None);
    /// ```
    #[inline]
    pub fn apply(&self, pc: usize) -> Option<usize> {
        Some(self.target(pc)).filter(|next| *next <= memory::SIZE)
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter by a step, jumps outside of memory fault.
    fn step_counter(&mut self, step: ProgramCounterStep) -> Result<(), ExecutionFault>;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents a command from the interpreter up to the host.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The cpu is suspended until the next key press.
    Wait,
    /// The framebuffer changed and should be redrawn.
    Draw,
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// [`calc`](ChipOpcodes::calc) is the single dispatcher, every instruction
/// is routed from here into one of the handlers, after which the program
/// counter is moved by the step the handler returned.
pub trait ChipOpcodes: ProgramCounter {
    /// will execute a single decoded instruction
    fn calc(&mut self, instruction: &Instruction) -> Result<Operation, ExecutionFault> {
        let mut operation = Operation::None;
        let step_op = |(step, op)| {
            operation = op;
            step
        };

        let step = match *instruction {
            Instruction::ClearDisplay => self.clear_display().map(step_op),
            Instruction::Return => self.return_from_subroutine(),
            Instruction::Jump { nnn } => Ok(ProgramCounterStep::Jump(nnn)),
            Instruction::Call { nnn } => self.call_subroutine(nnn),
            Instruction::SkipIfEqual { x, nn } => Ok(self.skip_if_const(x, nn, true)),
            Instruction::SkipIfNotEqual { x, nn } => Ok(self.skip_if_const(x, nn, false)),
            Instruction::SkipIfRegistersEqual { x, y } => Ok(self.skip_if_registers(x, y, true)),
            Instruction::Load { x, nn } => Ok(self.load(x, nn)),
            Instruction::Add { x, nn } => Ok(self.add(x, nn)),
            Instruction::Arithmetic { ops, x, y } => Ok(self.arithmetic(ops, x, y)),
            Instruction::SkipIfRegistersNotEqual { x, y } => {
                Ok(self.skip_if_registers(x, y, false))
            }
            Instruction::SetIndex { nnn } => Ok(self.set_index(nnn)),
            Instruction::JumpWithOffset { x, nnn } => Ok(self.jump_with_offset(x, nnn)),
            Instruction::Random { x, nn } => Ok(self.random(x, nn)),
            Instruction::Draw { x, y, n } => self.draw(x, y, n).map(step_op),
            Instruction::Key { ops, x } => self.key(ops, x),
            Instruction::Misc { ops, x } => self.misc(ops, x).map(step_op),
        }?;

        self.step_counter(step)?;
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    fn clear_display(&mut self) -> Result<(ProgramCounterStep, Operation), ExecutionFault>;

    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn return_from_subroutine(&mut self) -> Result<ProgramCounterStep, ExecutionFault>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call_subroutine(&mut self, nnn: usize) -> Result<ProgramCounterStep, ExecutionFault>;

    /// - `3XNN` / `4XNN` - Cond - `if(Vx==NN)` / `if(Vx!=NN)` - Skips the next instruction
    /// if `VX` equals (or doesn't equal) `NN`.
    fn skip_if_const(&self, x: usize, nn: u8, equal: bool) -> ProgramCounterStep;

    /// - `5XY0` / `9XY0` - Cond - `if(Vx==Vy)` / `if(Vx!=Vy)` - Skips the next instruction
    /// if `VX` equals (or doesn't equal) `VY`.
    fn skip_if_registers(&self, x: usize, y: usize, equal: bool) -> ProgramCounterStep;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn load(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit in `VF` and shifts to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit in `VF` and shifts to the left by `1`.
    fn arithmetic(&mut self, ops: Arithmetic, x: usize, y: usize) -> ProgramCounterStep;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, nnn: usize) -> ProgramCounterStep;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_with_offset(&self, x: usize, nnn: usize) -> ProgramCounterStep;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random byte and `NN`.
    fn random(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws the `N` bytes high sprite found at `I`
    /// at `(VX, VY)`. `VF` is set to `1` if any pixel was flipped from set to unset.
    fn draw(
        &mut self,
        x: usize,
        y: usize,
        n: usize,
    ) -> Result<(ProgramCounterStep, Operation), ExecutionFault>;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, ops: KeyCondition, x: usize) -> Result<ProgramCounterStep, ExecutionFault>;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the glyph of the low nibble of `VX`.
    /// - `FX33` - BCD      - `set_BCD(Vx)`         - Stores the hundreds, tens and ones of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` in memory starting at address `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` from memory starting at address `I`.
    fn misc(
        &mut self,
        ops: Misc,
        x: usize,
    ) -> Result<(ProgramCounterStep, Operation), ExecutionFault>;
}

#[cfg(test)]
mod tests {
    use std::convert::TryInto;

    use super::*;

    #[test]
    fn test_tryfrom_opcode_simple() {
        let value: Opcode = 0x00E0;
        let conv = value.try_into();
        assert_eq!(conv, Ok(Instruction::ClearDisplay));
    }

    #[test]
    fn test_tryfrom_opcode_simple_fail() {
        let value: Opcode = 0x00E1;
        let conv: Result<Instruction, _> = value.try_into();
        assert_eq!(conv, Err(OpcodeError::Unknown(value)));
    }

    #[test]
    fn test_tryfrom_opcode_multiple() {
        let tests = [
            (0x00E0, Ok(Instruction::ClearDisplay)),
            (0x00EE, Ok(Instruction::Return)),
            (0x0123, Err(())),
            (0x1919, Ok(Instruction::Jump { nnn: 0x919 })),
            (0x2222, Ok(Instruction::Call { nnn: 0x222 })),
            (0x3123, Ok(Instruction::SkipIfEqual { x: 0x1, nn: 0x23 })),
            (0x4123, Ok(Instruction::SkipIfNotEqual { x: 0x1, nn: 0x23 })),
            (0x5120, Ok(Instruction::SkipIfRegistersEqual { x: 0x1, y: 0x2 })),
            (0x5001, Err(())),
            (0x6123, Ok(Instruction::Load { x: 0x1, nn: 0x23 })),
            (0x7123, Ok(Instruction::Add { x: 0x1, nn: 0x23 })),
            (
                0x8124,
                Ok(Instruction::Arithmetic {
                    ops: Arithmetic::Add,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x812E,
                Ok(Instruction::Arithmetic {
                    ops: Arithmetic::ShiftLeft,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (0x8128, Err(())),
            (0x9120, Ok(Instruction::SkipIfRegistersNotEqual { x: 0x1, y: 0x2 })),
            (0x9121, Err(())),
            (0xA222, Ok(Instruction::SetIndex { nnn: 0x222 })),
            (0xB222, Ok(Instruction::JumpWithOffset { x: 0x2, nnn: 0x222 })),
            (0xC123, Ok(Instruction::Random { x: 0x1, nn: 0x23 })),
            (0xD123, Ok(Instruction::Draw { x: 0x1, y: 0x2, n: 0x3 })),
            (
                0xE19E,
                Ok(Instruction::Key {
                    ops: KeyCondition::Pressed,
                    x: 0x1,
                }),
            ),
            (
                0xE1A1,
                Ok(Instruction::Key {
                    ops: KeyCondition::NotPressed,
                    x: 0x1,
                }),
            ),
            (0xE111, Err(())),
            (
                0xF00A,
                Ok(Instruction::Misc {
                    ops: Misc::AwaitKeyPress,
                    x: 0x0,
                }),
            ),
            (
                0xF533,
                Ok(Instruction::Misc {
                    ops: Misc::StoreBcd,
                    x: 0x5,
                }),
            ),
            (0xF0AA, Err(())),
        ];
        for (value, res) in tests.iter() {
            let conv: Result<Instruction, _> = (*value as Opcode).try_into();
            assert_eq!(conv, res.map_err(|_| OpcodeError::Unknown(*value)));
        }
    }

    #[test]
    fn test_every_arithmetic_sub_opcode() {
        let valid = [0x0, 0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0xE];
        for n in 0..=0xF {
            let conv: Result<Arithmetic, _> = (n as usize).try_into();
            assert_eq!(conv.is_ok(), valid.contains(&n), "sub opcode {:#X}", n);
        }
    }

    #[test]
    fn test_display_mnemonics() {
        let tests: [(Opcode, &str); 6] = [
            (0x00E0, "CLS"),
            (0x2345, "CALL 0x345"),
            (0x8AB5, "SUB VA, VB"),
            (0xDAB5, "DRW VA, VB, 0x5"),
            (0xF155, "LD [I], V1"),
            (0xB222, "JP V0, 0x222"),
        ];
        for (opcode, text) in tests.iter() {
            let instruction: Instruction = (*opcode).try_into().unwrap();
            assert_eq!(&instruction.to_string(), text);
        }
    }
}
