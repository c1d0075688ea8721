//! Frequency slots: the fixed set of dispatch rates
//!
//! Each slot is one periodic rate with at most one handler bound to it.
//! Slot index order is the dispatch order: slowest rate first.

use core::fmt;

/// Number of frequency slots the scheduler manages
pub const SLOT_COUNT: usize = 8;

/// Handler callable, invoked from the main loop when its slot is due
///
/// Borrowed, not boxed: the scheduler never allocates. Plain `fn()` items
/// and closures over `Sync` state both coerce to this.
pub type Handler<'h> = &'h (dyn Fn() + Sync);

/// Dispatch rate
///
/// Discriminant = slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Slot {
    /// 1 Hz (housekeeping, heartbeat)
    Hz1 = 0,
    /// 2 Hz
    Hz2 = 1,
    /// 5 Hz
    Hz5 = 2,
    /// 10 Hz (telemetry)
    Hz10 = 3,
    /// 20 Hz
    Hz20 = 4,
    /// 50 Hz
    Hz50 = 5,
    /// 100 Hz (control loops)
    Hz100 = 6,
    /// 200 Hz (sensor sampling)
    Hz200 = 7,
}

impl Slot {
    /// All slots in dispatch order
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot::Hz1,
        Slot::Hz2,
        Slot::Hz5,
        Slot::Hz10,
        Slot::Hz20,
        Slot::Hz50,
        Slot::Hz100,
        Slot::Hz200,
    ];

    /// Rate in Hz
    pub const fn hz(self) -> u32 {
        match self {
            Slot::Hz1 => 1,
            Slot::Hz2 => 2,
            Slot::Hz5 => 5,
            Slot::Hz10 => 10,
            Slot::Hz20 => 20,
            Slot::Hz50 => 50,
            Slot::Hz100 => 100,
            Slot::Hz200 => 200,
        }
    }

    /// Table index
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot for a raw index, `None` past the last slot
    pub const fn from_index(index: usize) -> Option<Slot> {
        if index < SLOT_COUNT {
            Some(Slot::ALL[index])
        } else {
            None
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.hz())
    }
}
