//! Async runtime: the session task and its draw cadence.

pub mod scheduler;
pub mod session;

pub use scheduler::{CancelHandle, ManualScheduler, Scheduler, TickFn, TokioScheduler};
pub use session::{Command, Notice, Session, SessionHandle};
