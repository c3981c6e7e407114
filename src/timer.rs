use std::{
    sync::{
        mpsc::{self, RecvTimeoutError, SyncSender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// Represents a timer inside of the chip infrastruture, it counts down to
/// zero from what ever number given, once per tick, and then stays there.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    /// Checks if the timer has not yet reached zero.
    pub fn is_running(&self) -> bool {
        self.value > 0
    }

    /// Counts down by one, zero is held.
    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// Folds the slow timer clock into the cpu clock.
///
/// Every cpu cycle adds `timer_hertz` to the accumulator, each time it
/// passes `cpu_hertz` a timer tick is due. Over one second of cycles exactly
/// `timer_hertz` ticks are handed out, independent of the host's wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    cpu_hertz: u64,
    timer_hertz: u64,
    accumulator: u64,
}

impl Clock {
    pub fn new(cpu_hertz: u64, timer_hertz: u64) -> Self {
        Self {
            cpu_hertz: cpu_hertz.max(1),
            timer_hertz,
            accumulator: 0,
        }
    }

    /// Registers a single cpu cycle and returns the amount of timer ticks
    /// that became due with it.
    pub fn cycle(&mut self) -> u64 {
        self.accumulator += self.timer_hertz;
        let ticks = self.accumulator / self.cpu_hertz;
        self.accumulator %= self.cpu_hertz;
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
    }
}

/// A worker that calls a callback in a fixed interval, until it gets
/// stopped. The host supplies its own implementation (browser timers,
/// game loops), [`Worker`](Worker) is the thread based one.
pub trait TimedWorker {
    fn new() -> Self;
    fn start<T>(&mut self, callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static;
    fn stop(&mut self);
    fn is_alive(&self) -> bool;
}

/// Is the internal worker, that exists on a second thread.
pub struct Worker {
    /// Contains the actuall thread, that is running.
    thread: Option<JoinHandle<()>>,
    /// Contains the sync sender used to gracefull shutdown the thread.
    shutdown: Option<SyncSender<()>>,
    /// Counts the threads holding on to it, the worker thread keeps a clone
    /// for as long as it runs.
    alive: Arc<()>,
}

impl TimedWorker for Worker {
    fn new() -> Self {
        Self {
            thread: None,
            shutdown: None,
            alive: Arc::new(()),
        }
    }

    /// Will start the worker that will run the callback function
    /// every interval.
    /// Attention the worker assumes the callback will finish
    /// faster then the interval.
    fn start<T>(&mut self, mut callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static,
    {
        // only a single thread per worker
        self.stop();

        let (send, recv) = mpsc::sync_channel::<()>(1);
        let alive = self.alive.clone();
        let thread = thread::spawn(move || {
            let _alive = alive;
            let mut timeout = interval;
            loop {
                match recv.recv_timeout(timeout) {
                    Err(RecvTimeoutError::Timeout) => {
                        let start = Instant::now();

                        callback();

                        // make sure the system will at most wait the interval
                        timeout = interval
                            .checked_sub(start.elapsed())
                            .unwrap_or_else(|| Duration::from_secs(0));
                    }
                    Ok(_) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        self.thread = Some(thread);
        self.shutdown = Some(send);
    }

    /// Will stop the worker, first by sending the shutdown message and then
    /// by joining the thread.
    fn stop(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            // the thread might already be gone, dropping the sender is enough then
            let _ = sender.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("The worker thread panicked.");
            }
        }
    }

    /// Checks if the thread is alive.
    fn is_alive(&self) -> bool {
        Arc::strong_count(&self.alive) > 1
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{cpu, timer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_timer_decay() {
        let mut timer = Timer::new(0);
        timer.set_value(10);
        for _ in 0..10 {
            assert!(timer.is_running());
            timer.tick();
        }
        assert_eq!(timer.get_value(), 0);

        // never goes below zero
        timer.tick();
        assert_eq!(timer.get_value(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_clock_hands_out_timer_hertz_per_second() {
        let mut clock = Clock::new(cpu::HERTZ, timer::HERTZ);
        let ticks: u64 = (0..cpu::HERTZ).map(|_| clock.cycle()).sum();
        assert_eq!(ticks, timer::HERTZ);
    }

    #[test]
    fn test_clock_slower_cpu_than_timer() {
        let mut clock = Clock::new(30, 60);
        assert_eq!(clock.cycle(), 2);
        assert_eq!(clock.cycle(), 2);
    }

    #[test]
    fn test_worker() {
        let counter = Arc::new(AtomicUsize::new(0));
        let ccounter = counter.clone();

        let mut worker = Worker::new();
        assert!(!worker.is_alive());

        worker.start(
            move || {
                ccounter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_millis(timer::INTERVAL),
        );
        assert!(worker.is_alive());

        std::thread::sleep(Duration::from_millis(10 * timer::INTERVAL));
        worker.stop();
        assert!(!worker.is_alive());

        let count = counter.load(Ordering::SeqCst);
        assert!(count > 0);

        // nothing runs after the stop
        std::thread::sleep(Duration::from_millis(3 * timer::INTERVAL));
        assert_eq!(count, counter.load(Ordering::SeqCst));
    }
}
