//! The pretty print implementation of the [`ChipSet`](super::ChipSet), a full dump of the
//! machine state for debugging roms. Runs of empty memory are folded into a single row.

use {
    super::{ChipSet, RunState},
    crate::{definitions::cpu, opcode::Instruction},
    std::{
        convert::TryFrom,
        fmt::{self, Write},
    },
};

/// The amount of values printed per row, memory rows hold this many opcodes.
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT: &str = "\t\t";

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::{self, Write};

    pub(super) fn formatter(line: &mut String, from: usize, to: usize) -> fmt::Result {
        write!(line, "{:#06X} - {:#06X} :", from, to)
    }
}

/// handles printing of any and all unsigned integers.
mod integer_print {
    use {
        super::{pointer_print, END_OF_LINE, HEX_PRINT_STEP, INDENT},
        num_traits::Unsigned,
        once_cell::sync::Lazy,
        std::fmt::{self, Write},
    };

    /// The width of a single printed integer.
    pub(super) static INTEGER_LEN: Lazy<usize> = Lazy::new(|| format!("{:#06X}", 0u8).len());

    pub(super) fn formatter<T>(line: &mut String, data: T) -> fmt::Result
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, "{:#06X}", data)
    }

    /// Prints the data in rows of [`HEX_PRINT_STEP`](HEX_PRINT_STEP), each one
    /// prefixed with its offset.
    pub(super) fn printer<T>(data: &[T]) -> Result<String, fmt::Error>
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        let mut res = String::new();
        for (i, row) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = i * HEX_PRINT_STEP;
            res.push_str(INDENT);
            pointer_print::formatter(&mut res, from, from + row.len() - 1)?;
            for entry in row {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(END_OF_LINE);
        }
        res.pop();
        Ok(res)
    }
}

/// Handles all the boolean data types.
mod bool_print {
    use {
        super::{integer_print::INTEGER_LEN, pointer_print, END_OF_LINE, HEX_PRINT_STEP, INDENT},
        once_cell::sync::Lazy,
        std::fmt,
    };

    /// the prepared true string, as wide as an integer
    static TRUE: Lazy<String> = Lazy::new(|| format!("{:<1$}", "true", *INTEGER_LEN));
    /// the prepared false string, as wide as an integer
    static FALSE: Lazy<String> = Lazy::new(|| format!("{:<1$}", "false", *INTEGER_LEN));

    pub(super) fn printer(data: &[bool]) -> Result<String, fmt::Error> {
        let mut res = String::new();
        for (i, row) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = i * HEX_PRINT_STEP;
            res.push_str(INDENT);
            pointer_print::formatter(&mut res, from, from + row.len() - 1)?;
            for value in row {
                res.push(' ');
                res.push_str(if *value { &TRUE } else { &FALSE });
            }
            // the padding of the last entry is not needed
            let trimmed = res.trim_end().len();
            res.truncate(trimmed);
            res.push(END_OF_LINE);
        }
        res.pop();
        Ok(res)
    }
}

/// Handles the memory, which is printed as opcodes.
mod opcode_print {
    use {
        super::{integer_print, pointer_print, END_OF_LINE, HEX_PRINT_STEP, INDENT},
        crate::{definitions::memory, opcode::Opcode},
        once_cell::sync::Lazy,
        std::fmt,
    };

    /// The amount of bytes in a single row.
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE;
    const FILLER_BASE: &str = "...";

    /// Stands in for the opcodes of rows that are completely zero.
    static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let zero = format!("{:#06X}", 0u16);
        // as wide as the opcodes it replaces
        let width = zero.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 3);
        format!("{0} {1:^2$} {0}", zero, FILLER_BASE, width)
    });

    struct Row {
        from: usize,
        to: usize,
        data: Vec<Opcode>,
    }

    impl Row {
        fn only_null(&self) -> bool {
            self.data.iter().all(|opcode| *opcode == 0)
        }
    }

    /// will pretty print the content of the raw memory, the offsets are
    /// counted from the start of the given block
    pub(super) fn printer(memory: &[u8]) -> Result<String, fmt::Error> {
        let mut rows: Vec<Row> = Vec::with_capacity(memory.len() / POINTER_INCREMENT);

        for (i, chunk) in memory.chunks(POINTER_INCREMENT).enumerate() {
            let from = i * POINTER_INCREMENT;
            let row = Row {
                from,
                to: from + chunk.len() - 1,
                data: chunk
                    .chunks_exact(memory::opcodes::SIZE)
                    .map(|pair| Opcode::from_be_bytes([pair[0], pair[1]]))
                    .collect(),
            };

            // two empty rows in a row get merged
            match rows.last_mut() {
                Some(last) if last.only_null() && row.only_null() => last.to = row.to,
                _ => rows.push(row),
            }
        }

        let mut res = String::new();
        for row in rows {
            res.push_str(INDENT);
            pointer_print::formatter(&mut res, row.from, row.to)?;
            res.push(' ');
            if row.only_null() && row.data.len() == HEX_PRINT_STEP {
                res.push_str(&ZERO_FILLER);
            } else {
                for opcode in row.data {
                    integer_print::formatter(&mut res, opcode)?;
                    res.push(' ');
                }
                res.pop();
            }
            res.push(END_OF_LINE);
        }
        res.pop();
        Ok(res)
    }
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut opc = String::from(INDENT);
        integer_print::formatter(&mut opc, self.opcode)?;
        match Instruction::try_from(self.opcode) {
            Ok(instruction) => write!(opc, " {}", instruction)?,
            Err(_) => opc.push_str(" ???"),
        }

        let mut prc = String::from(INDENT);
        integer_print::formatter(&mut prc, self.program_counter)?;

        let mut idx = String::from(INDENT);
        integer_print::formatter(&mut idx, self.index_register)?;

        let mut tim = String::from(INDENT);
        write!(tim, "delay ")?;
        integer_print::formatter(&mut tim, self.delay_timer.get_value())?;
        write!(tim, " sound ")?;
        integer_print::formatter(&mut tim, self.sound_timer.get_value())?;

        let sta = match self.state {
            RunState::Running => format!("{}running", INDENT),
            RunState::WaitingForKey { x } => format!("{}waiting for a key (V{:X})", INDENT, x),
        };

        // the empty part of the stack is printed as zeros
        let mut stack = [0usize; cpu::stack::SIZE];
        stack[..self.stack.len()].copy_from_slice(&self.stack);

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}{}\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex Register :\n{}\n\
                \tTimers :\n{}\n\
                \tState :\n{}\n\
                \tMemory :\n{}\n\
                \tKeyboard :\n{}\n\
                \tStack :\n{}\n\
                \tRegister :\n{}\n\
                }}",
            INDENT,
            self.get_name(),
            opc,
            prc,
            idx,
            tim,
            sta,
            opcode_print::printer(&self.memory)?,
            bool_print::printer(self.keyboard.get_keys())?,
            integer_print::printer(&stack)?,
            integer_print::printer(&self.registers)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{get_default_chip, run_opcode};

    #[test]
    fn test_print_chipset() {
        let mut chip = get_default_chip();
        chip.registers = [0; 16];
        chip.registers[0x3] = 0xAB;
        chip.set_key(0x2, true);
        assert!(run_opcode(&mut chip, 0x6005).is_ok());

        let printed = chip.to_string();

        assert!(printed.starts_with("Chipset {\n\tProgram Name :\n\t\tLOOP\n"));
        assert!(printed.contains("\tOpcode :\n\t\t0x6005"));
        assert!(printed.contains("\tProgram Counter :\n\t\t0x0202\n"));
        assert!(printed.contains("\t\tdelay 0x0000 sound 0x0000\n"));
        assert!(printed.contains("\t\trunning\n"));
        // the rom itself
        assert!(printed.contains("\t\t0x0200 - 0x020F : 0x6005 0x1200 0x0000"));
        // the empty memory behind the rom is a single row
        assert!(printed.contains("\t\t0x0210 - 0x0FFF : 0x0000 "));
        assert!(printed.contains("..."));
        assert!(printed.contains("\t\t0x0000 - 0x0007 : false  false  true   false"));
        assert!(printed.contains("0x0000 - 0x0007 : 0x0005 0x0000 0x0000 0x00AB"));
        assert!(printed.ends_with("}"));
    }

    #[test]
    fn test_print_waiting() {
        let mut chip = get_default_chip();
        assert!(run_opcode(&mut chip, 0xF40A).is_ok());

        assert!(chip.to_string().contains("\t\twaiting for a key (V4)\n"));
    }
}
