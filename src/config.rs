//! Runtime configuration of the chipset.
use {
    crate::definitions::{cpu, timer},
    std::time::Duration,
};

/// The behaviours where the historical interpreters disagree. Each flag
/// pins down one policy, the defaults follow the original COSMAC VIP where
/// the test roms expect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY6` / `8XYE`: copy `VY` into `VX` before shifting. If false `VX` is
    /// shifted in place and `VY` is ignored.
    pub shift_uses_vy: bool,
    /// `BNNN`: jump to `XNN + VX` (CHIP-48) instead of `NNN + V0`.
    pub jump_uses_vx: bool,
    /// `DXYN`: clip sprites at the display edges. If false the pixels wrap
    /// around to the other side.
    pub clip_sprites: bool,
    /// `FX1E`: set `VF` to `1` if `I + VX` leaves the address space, and to
    /// `0` otherwise. If false `VF` is not touched.
    pub index_overflow_flag: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            shift_uses_vy: true,
            jump_uses_vx: false,
            clip_sprites: true,
            index_overflow_flag: true,
        }
    }
}

/// The configuration the chipset gets built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per second.
    pub cpu_hertz: u64,
    /// Timer decrements per second.
    pub timer_hertz: u64,
    pub quirks: Quirks,
}

impl Config {
    /// The amount of cpu cycles run between two timer ticks, at least one.
    pub fn cycles_per_tick(&self) -> u64 {
        (self.cpu_hertz / self.timer_hertz.max(1)).max(1)
    }

    /// The wall clock time a frame of [`cycles_per_tick`](Self::cycles_per_tick)
    /// cycles takes at `cpu_hertz`.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 * self.cycles_per_tick() / self.cpu_hertz.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cpu_hertz: cpu::HERTZ,
            timer_hertz: timer::HERTZ,
            quirks: Quirks::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_per_tick() {
        let config = Config::default();
        assert_eq!(config.cycles_per_tick(), 500 / 60);

        let slow = Config {
            cpu_hertz: 30,
            ..Config::default()
        };
        assert_eq!(slow.cycles_per_tick(), 1);
    }

    #[test]
    fn test_frame_interval() {
        let config = Config::default();
        // 8 cycles at 500 hertz
        assert_eq!(config.frame_interval(), Duration::from_millis(16));

        let fast = Config {
            cpu_hertz: 1200,
            ..Config::default()
        };
        assert_eq!(fast.frame_interval(), Duration::from_micros(16_666));
    }
}
