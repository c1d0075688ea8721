//! tick-dispatch: fixed-rate cooperative task dispatcher
//!
//! A hardware tick (nominally 1 ms) raises per-rate pending flags; the main
//! loop drains them and runs one handler per rate:
//!
//! ```text
//! timer ISR ──advance_tick()──▶ pending[slot] ──run_ready_tasks()──▶ handler
//! ```
//!
//! - Eight fixed rates, 1 Hz to 200 Hz, one handler each
//! - Static tables only: no heap, no allocation
//! - Lock-free flag hand-off between the ISR and the main loop
//! - Per-rate overflow counters for missed periods
//!
//! ```ignore
//! static SCHED: Scheduler<'static> = Scheduler::new();
//!
//! fn blink() { /* ... */ }
//!
//! SCHED.register_handler(Slot::Hz2, &blink);
//! // SysTick ISR:  SCHED.advance_tick();
//! // main loop:    loop { SCHED.run_ready_tasks(); }
//! ```

#![no_std]

pub mod slot;
pub mod config;
pub mod scheduler;
pub mod sim;

pub use slot::{Slot, Handler, SLOT_COUNT};
pub use config::{TickConfig, ConfigError, DEFAULT_TICK_HZ};
pub use scheduler::Scheduler;
pub use sim::{Simulator, RunStats};
