//! Tick-rate configuration
//!
//! The tick rate is the number of hardware ticks per second. It is also the
//! reset threshold of the scheduler's tick counter, so every slot period
//! must divide it exactly.

use crate::slot::{Slot, SLOT_COUNT};

/// Default tick rate: 1 ms hardware tick
pub const DEFAULT_TICK_HZ: u32 = 1000;

/// Rejected tick rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Tick rate is slower than the slot rate (period would be zero)
    #[error("tick rate {tick_hz}Hz is below the {slot} slot rate")]
    TickRateTooLow { tick_hz: u32, slot: Slot },
    /// Slot period would not divide the one-second window
    #[error("tick rate {tick_hz}Hz is not a multiple of the {slot} slot rate")]
    UnevenPeriod { tick_hz: u32, slot: Slot },
}

/// Immutable tick configuration with a precomputed period table
///
/// `period[slot] = tick_hz / slot_hz`, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConfig {
    tick_hz: u32,
    periods: [u32; SLOT_COUNT],
}

impl TickConfig {
    /// 1 kHz tick (1 ms period)
    pub const fn millisecond() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
            periods: periods_for(DEFAULT_TICK_HZ),
        }
    }

    /// Validate a tick rate and build its period table
    pub const fn new(tick_hz: u32) -> Result<Self, ConfigError> {
        let mut i = 0;
        while i < SLOT_COUNT {
            let slot = Slot::ALL[i];
            if tick_hz < slot.hz() {
                return Err(ConfigError::TickRateTooLow { tick_hz, slot });
            }
            if tick_hz % slot.hz() != 0 {
                return Err(ConfigError::UnevenPeriod { tick_hz, slot });
            }
            i += 1;
        }
        Ok(Self {
            tick_hz,
            periods: periods_for(tick_hz),
        })
    }

    /// Ticks per second (tick counter reset threshold)
    pub const fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    /// Period of a slot in ticks
    pub const fn period(&self, slot: Slot) -> u32 {
        self.periods[slot.index()]
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self::millisecond()
    }
}

const fn periods_for(tick_hz: u32) -> [u32; SLOT_COUNT] {
    let mut periods = [0u32; SLOT_COUNT];
    let mut i = 0;
    while i < SLOT_COUNT {
        periods[i] = tick_hz / Slot::ALL[i].hz();
        i += 1;
    }
    periods
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_millisecond_periods() {
        let config = TickConfig::millisecond();
        assert_eq!(config.tick_hz(), 1000);
        let expected = [1000, 500, 200, 100, 50, 20, 10, 5];
        for (slot, period) in Slot::ALL.iter().zip(expected) {
            assert_eq!(config.period(*slot), period);
        }
    }

    #[test]
    fn test_default_is_millisecond() {
        assert_eq!(TickConfig::default(), TickConfig::millisecond());
        assert_eq!(TickConfig::new(DEFAULT_TICK_HZ), Ok(TickConfig::millisecond()));
    }

    #[test]
    fn test_faster_tick() {
        let config = TickConfig::new(10_000).unwrap();
        assert_eq!(config.period(Slot::Hz1), 10_000);
        assert_eq!(config.period(Slot::Hz200), 50);
    }

    #[test]
    fn test_slowest_valid_tick() {
        // lcm(1, 2, 5, 10, 20, 50, 100, 200)
        let config = TickConfig::new(200).unwrap();
        assert_eq!(config.period(Slot::Hz200), 1);
        assert_eq!(config.period(Slot::Hz1), 200);
    }

    #[test]
    fn test_tick_too_low() {
        assert_eq!(
            TickConfig::new(100),
            Err(ConfigError::TickRateTooLow { tick_hz: 100, slot: Slot::Hz200 })
        );
        assert_eq!(
            TickConfig::new(0),
            Err(ConfigError::TickRateTooLow { tick_hz: 0, slot: Slot::Hz1 })
        );
    }

    #[test]
    fn test_uneven_period() {
        assert_eq!(
            TickConfig::new(1024),
            Err(ConfigError::UnevenPeriod { tick_hz: 1024, slot: Slot::Hz5 })
        );
        assert_eq!(
            TickConfig::new(300),
            Err(ConfigError::UnevenPeriod { tick_hz: 300, slot: Slot::Hz200 })
        );
    }

    #[test]
    fn test_error_message() {
        let err = TickConfig::new(1024).unwrap_err();
        assert_eq!(err.to_string(), "tick rate 1024Hz is not a multiple of the 5Hz slot rate");
    }

    #[test]
    fn test_periods_never_exceed_window() {
        for tick_hz in [200, 1000, 2000, 10_000] {
            let config = TickConfig::new(tick_hz).unwrap();
            for slot in Slot::ALL {
                assert!(config.period(slot) <= config.tick_hz());
                assert_eq!(config.tick_hz() % config.period(slot), 0);
            }
        }
    }
}
