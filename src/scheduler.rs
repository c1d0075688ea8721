//! Fixed-rate cooperative scheduler
//!
//! Two execution contexts share one [`Scheduler`]:
//!
//! - the tick source (timer ISR) calls [`Scheduler::advance_tick`] once per
//!   tick; it only raises pending flags and counts overflows
//! - the main loop calls [`Scheduler::run_ready_tasks`]; it drains pending
//!   flags in ascending slot order and runs the bound handlers
//!
//! No lock guards the flags. Each flag has one writer per transition: the
//! tick source raises, the main loop clears.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use critical_section::Mutex;

use crate::config::TickConfig;
use crate::slot::{Handler, Slot, SLOT_COUNT};

/// Fixed-rate scheduler state
///
/// No allocation. Lives in a `static` or any longer-lived owner; all
/// operations take `&self`.
pub struct Scheduler<'h> {
    /// Immutable tick rate and period table
    config: TickConfig,
    /// Ticks within the current one-second window
    tick: AtomicU32,
    /// Period elapsed, handler not yet run
    pending: [AtomicBool; SLOT_COUNT],
    /// Periods that elapsed while the previous one was still pending
    overflow: [AtomicU32; SLOT_COUNT],
    /// Bound handlers
    handlers: Mutex<[Cell<Option<Handler<'h>>>; SLOT_COUNT]>,
}

impl<'h> Scheduler<'h> {
    /// Scheduler for a 1 ms tick
    pub const fn new() -> Self {
        Self::with_config(TickConfig::millisecond())
    }

    /// Scheduler for an arbitrary validated tick rate
    pub const fn with_config(config: TickConfig) -> Self {
        Self {
            config,
            tick: AtomicU32::new(0),
            pending: [const { AtomicBool::new(false) }; SLOT_COUNT],
            overflow: [const { AtomicU32::new(0) }; SLOT_COUNT],
            handlers: Mutex::new([const { Cell::new(None) }; SLOT_COUNT]),
        }
    }

    /// Advance one tick and raise the flags of every slot whose period elapsed
    ///
    /// Call exactly once per hardware tick. Interrupt-safe: constant time,
    /// no allocation, never runs a handler, never logs.
    pub fn advance_tick(&self) {
        // Single writer of `tick` and `overflow`: load/store is enough and
        // keeps this usable on cores without atomic read-modify-write.
        let tick = self.tick.load(Ordering::Relaxed) + 1;

        for slot in Slot::ALL {
            let i = slot.index();
            if tick % self.config.period(slot) == 0 {
                if self.pending[i].load(Ordering::Acquire) {
                    let missed = self.overflow[i].load(Ordering::Relaxed);
                    self.overflow[i].store(missed.wrapping_add(1), Ordering::Relaxed);
                }
                self.pending[i].store(true, Ordering::Release);
            }
        }

        let tick = if tick >= self.config.tick_hz() { 0 } else { tick };
        self.tick.store(tick, Ordering::Relaxed);
    }

    /// Run the handler of every pending slot, slowest rate first
    ///
    /// Each flag is cleared before its handler runs, so a tick landing during
    /// a slow handler raises a fresh flag instead of being lost. Slots with
    /// no handler are drained silently. Must not be re-entered.
    pub fn run_ready_tasks(&self) {
        for slot in Slot::ALL {
            let i = slot.index();
            if !self.pending[i].load(Ordering::Acquire) {
                continue;
            }
            self.pending[i].store(false, Ordering::Release);

            if let Some(handler) = self.handler(slot) {
                log::trace!("dispatch {}", slot);
                handler();
            }
        }
    }

    /// Bind a handler to a slot, replacing any earlier one
    ///
    /// Binding after ticks have started may miss a period that was already
    /// pending and drained without a handler.
    pub fn register_handler(&self, slot: Slot, handler: Handler<'h>) {
        critical_section::with(|cs| {
            let previous = self.handlers.borrow(cs)[slot.index()].replace(Some(handler));
            if previous.is_some() {
                log::debug!("replaced {} handler", slot);
            } else {
                log::debug!("registered {} handler", slot);
            }
        });
    }

    /// Bind a handler by raw slot index
    ///
    /// Out-of-range indices are ignored; returns whether the handler was bound.
    pub fn register_index(&self, index: usize, handler: Handler<'h>) -> bool {
        match Slot::from_index(index) {
            Some(slot) => {
                self.register_handler(slot, handler);
                true
            }
            None => {
                log::warn!("ignored handler for slot index {} (max {})", index, SLOT_COUNT - 1);
                false
            }
        }
    }

    /// Unbind a slot's handler; its flag keeps being drained
    pub fn unregister_handler(&self, slot: Slot) {
        critical_section::with(|cs| {
            if self.handlers.borrow(cs)[slot.index()].take().is_some() {
                log::debug!("unregistered {} handler", slot);
            }
        });
    }

    /// Handler currently bound to a slot
    pub fn handler(&self, slot: Slot) -> Option<Handler<'h>> {
        critical_section::with(|cs| self.handlers.borrow(cs)[slot.index()].get())
    }

    /// Missed periods for a slot (wrapping)
    pub fn overflow_count(&self, slot: Slot) -> u32 {
        self.overflow[slot.index()].load(Ordering::Relaxed)
    }

    /// Snapshot of all overflow counters, indexed by slot
    pub fn overflow_counts(&self) -> [u32; SLOT_COUNT] {
        let mut counts = [0u32; SLOT_COUNT];
        for slot in Slot::ALL {
            counts[slot.index()] = self.overflow_count(slot);
        }
        counts
    }

    /// Is the slot's flag raised and not yet drained?
    pub fn is_pending(&self, slot: Slot) -> bool {
        self.pending[slot.index()].load(Ordering::Acquire)
    }

    /// Position within the current one-second window
    pub fn tick_count(&self) -> u32 {
        self.tick.load(Ordering::Relaxed)
    }

    /// Tick configuration
    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Memory footprint estimate
    pub fn memory_footprint(&self) -> usize {
        core::mem::size_of::<Self>()
    }
}

impl Default for Scheduler<'_> {
    fn default() -> Self {
        Self::new()
    }
}
