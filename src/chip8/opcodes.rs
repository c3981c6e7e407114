use crate::{
    definitions::{cpu, display, memory},
    opcode::{Arithmetic, ChipOpcodes, KeyCondition, Misc, Operation, ProgramCounterStep},
    ExecutionFault,
};

use super::{ChipSet, RunState};

impl ChipOpcodes for ChipSet {
    fn clear_display(&mut self) -> Result<(ProgramCounterStep, Operation), ExecutionFault> {
        self.display.clear();
        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn return_from_subroutine(&mut self) -> Result<ProgramCounterStep, ExecutionFault> {
        // the stack holds the address behind the call
        let pc = self.pop_stack().map_err(|err| err.at(self.program_counter))?;
        log::debug!("return to {:#06X}", pc);
        Ok(ProgramCounterStep::Jump(pc))
    }

    fn call_subroutine(&mut self, nnn: usize) -> Result<ProgramCounterStep, ExecutionFault> {
        let next = ProgramCounterStep::Next.target(self.program_counter);
        self.push_stack(next)
            .map_err(|err| err.at(self.program_counter))?;
        Ok(ProgramCounterStep::Jump(nnn))
    }

    fn skip_if_const(&self, x: usize, nn: u8, equal: bool) -> ProgramCounterStep {
        ProgramCounterStep::cond((self.registers[x] == nn) == equal)
    }

    fn skip_if_registers(&self, x: usize, y: usize, equal: bool) -> ProgramCounterStep {
        ProgramCounterStep::cond((self.registers[x] == self.registers[y]) == equal)
    }

    fn load(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        self.registers[x] = nn;
        ProgramCounterStep::Next
    }

    fn add(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // let VX overflow, but ignore carry
        self.registers[x] = self.registers[x].wrapping_add(nn);
        ProgramCounterStep::Next
    }

    fn arithmetic(&mut self, ops: Arithmetic, x: usize, y: usize) -> ProgramCounterStep {
        let vx = self.registers[x];
        let vy = self.registers[y];
        // the value that gets shifted
        let source = if self.config.quirks.shift_uses_vy {
            vy
        } else {
            vx
        };

        let (result, flag) = match ops {
            Arithmetic::Assign => (vy, None),
            Arithmetic::Or => (vx | vy, None),
            Arithmetic::And => (vx & vy, None),
            Arithmetic::Xor => (vx ^ vy, None),
            Arithmetic::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                (res, Some(carry as u8))
            }
            // VF is the "no borrow" flag
            Arithmetic::Sub => (vx.wrapping_sub(vy), Some((vx >= vy) as u8)),
            Arithmetic::SubReverse => (vy.wrapping_sub(vx), Some((vy >= vx) as u8)),
            Arithmetic::ShiftRight => (source >> 1, Some(source & 0x1)),
            Arithmetic::ShiftLeft => (source << 1, Some(source >> 7)),
        };

        self.registers[x] = result;
        // the flag wins if VF was the target
        if let Some(flag) = flag {
            self.registers[cpu::register::LAST] = flag;
        }
        ProgramCounterStep::Next
    }

    fn set_index(&mut self, nnn: usize) -> ProgramCounterStep {
        self.index_register = nnn;
        ProgramCounterStep::Next
    }

    fn jump_with_offset(&self, x: usize, nnn: usize) -> ProgramCounterStep {
        let offset = if self.config.quirks.jump_uses_vx {
            self.registers[x]
        } else {
            self.registers[0]
        };
        ProgramCounterStep::Jump(nnn + offset as usize)
    }

    fn random(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand = [0u8; 1];
        self.rng.fill_bytes(&mut rand);
        self.registers[x] = nn & rand[0];
        ProgramCounterStep::Next
    }

    fn draw(
        &mut self,
        x: usize,
        y: usize,
        n: usize,
    ) -> Result<(ProgramCounterStep, Operation), ExecutionFault> {
        let sprite = self.memory_range(self.index_register, n)?;
        let (vx, vy) = (self.registers[x], self.registers[y]);

        let collision = self.display.draw(
            vx,
            vy,
            &self.memory[sprite],
            self.config.quirks.clip_sprites,
        );
        self.registers[cpu::register::LAST] = collision as u8;

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key(&self, ops: KeyCondition, x: usize) -> Result<ProgramCounterStep, ExecutionFault> {
        let pressed = self.keyboard.is_pressed(self.registers[x]);
        let step = match ops {
            KeyCondition::Pressed => ProgramCounterStep::cond(pressed),
            KeyCondition::NotPressed => ProgramCounterStep::cond(!pressed),
        };
        Ok(step)
    }

    fn misc(
        &mut self,
        ops: Misc,
        x: usize,
    ) -> Result<(ProgramCounterStep, Operation), ExecutionFault> {
        let vx = self.registers[x];
        match ops {
            Misc::GetDelayTimer => self.registers[x] = self.delay_timer.get_value(),
            Misc::AwaitKeyPress => {
                // only presses from now on count
                self.keyboard.clear_pressed();
                self.state = RunState::WaitingForKey { x };
                log::debug!("Waiting for a key press to store in V{:X}.", x);
                // the counter moves once the key arrived
                return Ok((ProgramCounterStep::None, Operation::Wait));
            }
            Misc::SetDelayTimer => self.delay_timer.set_value(vx),
            Misc::SetSoundTimer => self.sound_timer.set_value(vx),
            Misc::AddToIndex => {
                let sum = self.index_register + vx as usize;
                if self.config.quirks.index_overflow_flag {
                    self.registers[cpu::register::LAST] = (sum > memory::ADDRESS_MASK) as u8;
                }
                self.index_register = sum & memory::ADDRESS_MASK;
            }
            Misc::SetIndexToGlyph => {
                let digit = (vx & 0xF) as usize;
                self.index_register =
                    display::fontset::LOCATION + display::fontset::GLYPH_SIZE * digit;
            }
            Misc::StoreBcd => {
                let range = self.writable_range(self.index_register, 3)?;
                let digits = [vx / 100, vx / 10 % 10, vx % 10];
                self.memory[range].copy_from_slice(&digits);
            }
            Misc::StoreRegisters => {
                let range = self.writable_range(self.index_register, x + 1)?;
                self.memory[range].copy_from_slice(&self.registers[..=x]);
            }
            Misc::LoadRegisters => {
                let range = self.memory_range(self.index_register, x + 1)?;
                self.registers[..=x].copy_from_slice(&self.memory[range]);
            }
        }
        Ok((ProgramCounterStep::Next, Operation::None))
    }
}
