use std::{convert::TryFrom, ops::Range};

use {
    super::Framebuffer,
    crate::{
        config::Config,
        definitions::{cpu, display, memory},
        devices::{Keyboard, Keys, Pixels},
        opcode::{
            self, ChipOpcodes, Instruction, Opcode, Operation, ProgramCounter, ProgramCounterStep,
        },
        resources::Rom,
        timer::{Clock, Timer},
        ExecutionFault, StackError,
    },
    rand::RngCore,
    tinyvec::ArrayVec,
};

/// Where the cpu currently is in its execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Every step executes the next instruction.
    Running,
    /// `FX0A` suspended the cpu, the next key press goes into `VX`.
    WaitingForKey { x: usize },
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
///
/// The chipset never talks to a window, an audio device or a keyboard
/// directly, the host hands the key states in and reads the display and
/// the timers out.
pub struct ChipSet {
    /// the loaded rom, kept around for resets
    pub(super) rom: Rom,
    pub(super) config: Config,
    /// all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
    /// - `0x050-0x0A0` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`, always kept inside of the address space.
    pub(super) index_register: usize,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; modern implementations usually have more.
    /// (here we are using `16`)
    pub(super) stack: ArrayVec<[usize; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    /// Counts down at 60 hertz, until it reaches 0.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    /// Counts down at 60 hertz, until it reaches 0.
    pub(super) sound_timer: Timer,
    /// Folds the timer ticks into the cpu cycles.
    pub(super) clock: Clock,
    pub(super) display: Framebuffer,
    pub(super) keyboard: Keyboard,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    pub(super) state: RunState,
}

impl ChipSet {
    /// will create a new chipset object with the default configuration
    pub fn new(rom: Rom) -> Self {
        Self::with_config(rom, Config::default())
    }

    /// will create a new chipset object
    pub fn with_config(rom: Rom, config: Config) -> Self {
        let mut chip = Self {
            rom,
            config,
            opcode: 0,
            memory: vec![0; memory::SIZE],
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
            delay_timer: Timer::new(0),
            sound_timer: Timer::new(0),
            clock: Clock::new(config.cpu_hertz, config.timer_hertz),
            display: Framebuffer::new(),
            keyboard: Keyboard::new(),
            rng: Box::new(rand::rngs::OsRng),
            state: RunState::Running,
        };
        chip.load();
        chip
    }

    /// Writes the font and the rom into the zeroed memory.
    fn load(&mut self) {
        let font = display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len());
        self.memory[font].copy_from_slice(&display::fontset::FONTSET);

        // the rom size has been checked during its creation
        let data = self.rom.get_data();
        self.memory[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + data.len())]
            .copy_from_slice(data);

        log::info!(
            "Loaded rom '{}' with {} bytes.",
            self.rom.get_name(),
            data.len()
        );
    }

    /// Puts the machine back into the state right after the rom was loaded.
    /// The random number generator is kept.
    pub fn reset(&mut self) {
        for cell in self.memory.iter_mut() {
            *cell = 0;
        }
        self.registers = [0; cpu::register::SIZE];
        self.opcode = 0;
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER;
        self.stack.clear();
        self.delay_timer.set_value(0);
        self.sound_timer.set_value(0);
        self.clock.reset();
        self.display.clear();
        self.keyboard.reset();
        self.state = RunState::Running;
        self.load();
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) -> Result<(), ExecutionFault> {
        let pc = self.program_counter;
        self.opcode = opcode::build_opcode(&self.memory, pc).map_err(|err| err.at(pc))?;
        Ok(())
    }

    /// will advance the program by a single instruction
    ///
    /// While an `FX0A` waits for a key, no instruction is executed and
    /// [`Operation::Wait`](Operation::Wait) is returned, until a key goes down.
    pub fn step(&mut self) -> Result<Operation, ExecutionFault> {
        if let RunState::WaitingForKey { x } = self.state {
            return self.resume_after_key(x);
        }

        self.set_opcode()?;
        let pc = self.program_counter;
        let instruction = Instruction::try_from(self.opcode).map_err(|err| err.at(pc))?;
        log::debug!("{:#06X}: {:#06X} {}", pc, self.opcode, instruction);

        self.calc(&instruction)
    }

    /// Finishes the `FX0A` instruction, if there was a key press.
    fn resume_after_key(&mut self, x: usize) -> Result<Operation, ExecutionFault> {
        match self.keyboard.take_pressed() {
            Some(key) => {
                log::debug!("Key {:#X} pressed, continuing.", key);
                self.step_counter(ProgramCounterStep::Next)?;
                self.registers[x] = key as u8;
                self.state = RunState::Running;
                Ok(Operation::None)
            }
            None => Ok(Operation::Wait),
        }
    }

    /// Will run a single cpu cycle, the timers are ticked as soon as enough
    /// cycles for a timer tick ran. The timers keep running while waiting
    /// for a key.
    pub fn cycle(&mut self) -> Result<Operation, ExecutionFault> {
        let operation = self.step()?;
        for _ in 0..self.clock.cycle() {
            self.tick_timers();
        }
        Ok(operation)
    }

    /// Counts both timers down by one.
    pub fn tick_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
        log::trace!(
            "timers delay {} sound {}",
            self.delay_timer.get_value(),
            self.sound_timer.get_value()
        );
    }

    /// Will write keyboard data into interncal keyboard representation.
    pub fn set_keyboard(&mut self, keys: &Keys) {
        self.keyboard.set_keys(keys);
    }

    /// Will set the value of the given key
    pub fn set_key(&mut self, key: usize, to: bool) {
        self.keyboard.set_key(key, to)
    }

    /// Will toggle the given key
    pub fn toggle_key(&mut self, key: usize) {
        self.keyboard.toggle_key(key)
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &Keys {
        self.keyboard.get_keys()
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// A tone should be playing as long as this is true.
    pub fn is_sound_active(&self) -> bool {
        self.sound_timer.is_running()
    }

    /// Checks if the cpu is suspended by `FX0A`.
    pub fn is_waiting(&self) -> bool {
        matches!(self.state, RunState::WaitingForKey { .. })
    }

    pub fn get_state(&self) -> RunState {
        self.state
    }

    /// Will return the current display configuration
    pub fn get_display(&self) -> &Pixels {
        self.display.get_pixels()
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_index_register(&self) -> usize {
        self.index_register
    }

    pub fn get_program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn get_memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn get_name(&self) -> &str {
        self.rom.get_name()
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// Replaces the random number generator, e.g. with a seeded one.
    pub fn set_rng(&mut self, rng: Box<dyn RngCore + Send>) {
        self.rng = rng;
    }

    /// Will push the current pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        match self.stack.try_push(pointer) {
            None => Ok(()),
            Some(_) => Err(StackError::Full),
        }
    }

    /// Will pop the last pointer from the stack
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }

    /// The memory range of `len` bytes starting at `from`, if it is fully
    /// inside of the memory.
    pub(super) fn memory_range(
        &self,
        from: usize,
        len: usize,
    ) -> Result<Range<usize>, ExecutionFault> {
        let to = from + len;
        if to > memory::SIZE {
            Err(ExecutionFault::AddressOutOfRange {
                address: to - 1,
                pc: self.program_counter,
            })
        } else {
            Ok(from..to)
        }
    }

    /// Same as [`memory_range`](Self::memory_range), but the font may not
    /// be overwritten.
    pub(super) fn writable_range(
        &self,
        from: usize,
        len: usize,
    ) -> Result<Range<usize>, ExecutionFault> {
        let range = self.memory_range(from, len)?;
        let font_end = display::fontset::LOCATION + display::fontset::FONTSET.len();
        if range.start < font_end && display::fontset::LOCATION < range.end {
            return Err(ExecutionFault::AddressOutOfRange {
                address: range.start.max(display::fontset::LOCATION),
                pc: self.program_counter,
            });
        }
        Ok(range)
    }
}

impl ProgramCounter for ChipSet {
    fn step_counter(&mut self, step: ProgramCounterStep) -> Result<(), ExecutionFault> {
        match step.apply(self.program_counter) {
            Some(next) => {
                self.program_counter = next;
                Ok(())
            }
            None => Err(ExecutionFault::AddressOutOfRange {
                address: step.target(self.program_counter),
                pc: self.program_counter,
            }),
        }
    }
}
