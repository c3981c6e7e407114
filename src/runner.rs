use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    chip8::ChipSet,
    devices::{DisplayCommands, KeyboardCommands, SoundCommands},
    opcode::Operation,
    timer::TimedWorker,
    ExecutionFault,
};

/// Connects a chipset to the host devices.
///
/// A frame polls the keyboard once, runs the cycles between two timer ticks
/// and then hands the display and the tone state to the host.
pub struct Runner<D, K, A> {
    chip: ChipSet,
    display: D,
    keyboard: K,
    sound: A,
    /// if the tone is currently playing
    sound_active: bool,
}

impl<D, K, A> Runner<D, K, A>
where
    D: DisplayCommands,
    K: KeyboardCommands,
    A: SoundCommands,
{
    pub fn new(chip: ChipSet, display: D, keyboard: K, sound: A) -> Self {
        Self {
            chip,
            display,
            keyboard,
            sound,
            sound_active: false,
        }
    }

    /// Will run a single frame. The display is only redrawn if one of the
    /// cycles changed it.
    pub fn run_frame(&mut self) -> Result<(), ExecutionFault> {
        let keys = self.keyboard.get_keyboard();
        self.chip.set_keyboard(&keys);

        let mut redraw = false;
        for _ in 0..self.chip.get_config().cycles_per_tick() {
            if let Operation::Draw = self.chip.cycle()? {
                redraw = true;
            }
        }

        if redraw {
            self.display.display(self.chip.get_display());
        }
        self.update_sound();

        Ok(())
    }

    /// Starts or stops the tone on a change of the sound timer.
    fn update_sound(&mut self) {
        let active = self.chip.is_sound_active();
        if active == self.sound_active {
            return;
        }
        if active {
            self.sound.start();
        } else {
            self.sound.stop();
        }
        self.sound_active = active;
    }

    pub fn get_chip(&self) -> &ChipSet {
        &self.chip
    }

    pub fn get_chip_mut(&mut self) -> &mut ChipSet {
        &mut self.chip
    }
}

/// The handle of a runner running on a [`TimedWorker`](TimedWorker).
pub struct RunHandle<W: TimedWorker> {
    worker: W,
    fault: Arc<Mutex<Option<ExecutionFault>>>,
}

impl<W: TimedWorker> RunHandle<W> {
    /// The fault that halted the chipset, if there was one.
    pub fn fault(&self) -> Option<ExecutionFault> {
        self.fault.lock().clone()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_alive()
    }

    pub fn stop(&mut self) {
        self.worker.stop();
    }
}

/// Will run the runner one frame per frame interval on a new worker.
///
/// This is a helper for hosts without a loop of their own, the chipset and
/// [`Runner::run_frame`](Runner::run_frame) never pace themselves.
/// The first fault halts the chipset, it is logged and kept in the handle.
/// The worker keeps on running until it is stopped, so the host can still
/// show the last state.
pub fn run<W, D, K, A>(runner: Runner<D, K, A>) -> RunHandle<W>
where
    W: TimedWorker,
    D: DisplayCommands + Send + 'static,
    K: KeyboardCommands + Send + 'static,
    A: SoundCommands + Send + 'static,
{
    let interval = runner.get_chip().get_config().frame_interval();
    let fault = Arc::new(Mutex::new(None));

    let shared = fault.clone();
    let mut runner = runner;
    let inner_run = move || {
        let mut fault = shared.lock();
        if fault.is_some() {
            return;
        }
        if let Err(err) = runner.run_frame() {
            log::error!("Halting '{}': {}", runner.get_chip().get_name(), err);
            *fault = Some(err);
        }
    };

    let mut worker = W::new();
    worker.start(inner_run, interval);

    RunHandle { worker, fault }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        definitions::{cpu, keyboard},
        devices::{MockDisplayCommands, MockKeyboardCommands, MockSoundCommands},
        resources::Rom,
        timer::Worker,
    };
    use std::{thread, time::Duration};

    /// sets up a sound, draws the glyph `0` and loops
    const DRAW_ROM: [u8; 10] = [0x60, 0x10, 0xF0, 0x18, 0xA0, 0x50, 0xD1, 0x15, 0x12, 0x08];
    const FAULT_ROM: [u8; 2] = [0xFF, 0xFF];

    fn get_chip(data: &[u8]) -> ChipSet {
        let rom = Rom::new("RUNNER", data.to_vec()).expect("The rom is small enough.");
        ChipSet::new(rom)
    }

    fn released_keyboard() -> MockKeyboardCommands {
        let mut input = MockKeyboardCommands::new();
        input
            .expect_get_keyboard()
            .returning(|| [false; keyboard::SIZE]);
        input
    }

    #[test]
    fn test_frame_draws_and_plays() {
        let mut display = MockDisplayCommands::new();
        display
            .expect_display()
            .withf(|pixels| pixels[0][0] && pixels[0][3] && !pixels[1][1])
            .times(1)
            .return_const(());

        let mut sound = MockSoundCommands::new();
        sound.expect_start().times(1).return_const(());
        sound.expect_stop().times(1).return_const(());

        let mut runner = Runner::new(get_chip(&DRAW_ROM), display, released_keyboard(), sound);

        assert_eq!(runner.run_frame(), Ok(()));
        assert!(runner.get_chip().is_sound_active());

        // the sound timer runs out after 16 ticks
        for _ in 0..30 {
            assert_eq!(runner.run_frame(), Ok(()));
        }
        assert!(!runner.get_chip().is_sound_active());
        assert_eq!(runner.get_chip().get_program_counter(), 0x208);
    }

    #[test]
    fn test_frame_awaits_key() {
        let mut display = MockDisplayCommands::new();
        display.expect_display().never();
        let mut sound = MockSoundCommands::new();
        sound.expect_start().never();

        // the key goes down in the second frame
        let mut calls = 0;
        let mut input = MockKeyboardCommands::new();
        input.expect_get_keyboard().returning(move || {
            calls += 1;
            let mut keys = [false; keyboard::SIZE];
            keys[0x5] = calls > 1;
            keys
        });

        let rom = [0xF3, 0x0A, 0x12, 0x02];
        let mut runner = Runner::new(get_chip(&rom), display, input, sound);

        assert_eq!(runner.run_frame(), Ok(()));
        assert!(runner.get_chip().is_waiting());
        assert_eq!(runner.get_chip().get_program_counter(), cpu::PROGRAM_COUNTER);

        assert_eq!(runner.run_frame(), Ok(()));
        assert!(!runner.get_chip().is_waiting());
        assert_eq!(runner.get_chip().get_registers()[0x3], 0x5);
    }

    #[test]
    fn test_frame_fault() {
        let mut display = MockDisplayCommands::new();
        display.expect_display().never();
        let mut sound = MockSoundCommands::new();
        sound.expect_start().never();
        sound.expect_stop().never();

        let mut runner = Runner::new(get_chip(&FAULT_ROM), display, released_keyboard(), sound);

        assert_eq!(
            runner.run_frame(),
            Err(ExecutionFault::InvalidOpcode {
                opcode: 0xFFFF,
                pc: cpu::PROGRAM_COUNTER
            })
        );
    }

    #[test]
    fn test_run_halts_on_fault() {
        let mut display = MockDisplayCommands::new();
        display.expect_display().never();
        let mut sound = MockSoundCommands::new();
        sound.expect_start().never();
        sound.expect_stop().never();

        let runner = Runner::new(get_chip(&FAULT_ROM), display, released_keyboard(), sound);
        let mut handle: RunHandle<Worker> = run(runner);
        assert!(handle.is_running());

        let mut fault = None;
        for _ in 0..100 {
            fault = handle.fault();
            if fault.is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(
            fault,
            Some(ExecutionFault::InvalidOpcode {
                opcode: 0xFFFF,
                pc: cpu::PROGRAM_COUNTER
            })
        );

        handle.stop();
        assert!(!handle.is_running());
    }
}
