//! Host simulation: software tick source plus main loop
//!
//! Stands in for the timer interrupt and the firmware main loop so a
//! scheduler can be exercised on the host: every simulated tick calls
//! [`Scheduler::advance_tick`], and every `dispatch_interval` ticks the
//! main loop gets a turn at [`Scheduler::run_ready_tasks`].

use crate::config::TickConfig;
use crate::scheduler::Scheduler;
use crate::slot::{Handler, Slot, SLOT_COUNT};

/// Simulated controller
pub struct Simulator<'h> {
    /// Scheduler under test
    pub scheduler: Scheduler<'h>,
    /// Ticks between main-loop passes (1 = dispatch after every tick)
    dispatch_interval: u32,
    /// Total ticks simulated
    pub total_ticks: u64,
    /// Total main-loop passes
    pub dispatch_calls: u64,
}

impl<'h> Simulator<'h> {
    /// 1 ms tick, main loop after every tick
    pub const fn new() -> Self {
        Self::with_config(TickConfig::millisecond(), 1)
    }

    /// Custom tick rate and main-loop cadence
    ///
    /// A zero interval is treated as 1.
    pub const fn with_config(config: TickConfig, dispatch_interval: u32) -> Self {
        Self {
            scheduler: Scheduler::with_config(config),
            dispatch_interval: if dispatch_interval == 0 { 1 } else { dispatch_interval },
            total_ticks: 0,
            dispatch_calls: 0,
        }
    }

    /// Bind a handler on the underlying scheduler
    pub fn register_handler(&self, slot: Slot, handler: Handler<'h>) {
        self.scheduler.register_handler(slot, handler);
    }

    /// Simulate one tick, then a main-loop pass if one is due
    ///
    /// Returns whether the main loop ran.
    pub fn step(&mut self) -> bool {
        self.scheduler.advance_tick();
        self.total_ticks += 1;

        if self.total_ticks % u64::from(self.dispatch_interval) == 0 {
            self.scheduler.run_ready_tasks();
            self.dispatch_calls += 1;
            true
        } else {
            false
        }
    }

    /// Simulate `ticks` ticks
    pub fn run_for(&mut self, ticks: u64) -> RunStats {
        let start_ticks = self.total_ticks;
        let start_calls = self.dispatch_calls;
        let start_overflows = self.scheduler.overflow_counts();

        for _ in 0..ticks {
            self.step();
        }

        let mut overflows = self.scheduler.overflow_counts();
        for (now, before) in overflows.iter_mut().zip(start_overflows) {
            *now = now.wrapping_sub(before);
        }

        let stats = RunStats {
            ticks: self.total_ticks - start_ticks,
            dispatch_calls: self.dispatch_calls - start_calls,
            overflows,
        };
        log::info!(
            "simulated {} ticks, {} main-loop passes",
            stats.ticks,
            stats.dispatch_calls
        );
        if stats.total_overflows() > 0 {
            log::warn!("missed periods during run: {:?}", stats.overflows);
        }
        stats
    }

    /// Simulated time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.total_ticks * 1000 / u64::from(self.scheduler.config().tick_hz())
    }
}

impl Default for Simulator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one [`Simulator::run_for`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Ticks simulated
    pub ticks: u64,
    /// Main-loop passes
    pub dispatch_calls: u64,
    /// Missed periods per slot during this run
    pub overflows: [u32; SLOT_COUNT],
}

impl RunStats {
    /// Missed periods across all slots
    pub fn total_overflows(&self) -> u64 {
        self.overflows.iter().map(|&n| u64::from(n)).sum()
    }
}
