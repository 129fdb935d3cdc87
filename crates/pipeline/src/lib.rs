//! The job lifecycle and admission pipeline.
//!
//! Submissions flow: bus message → [`IntakeLoop`] → [`JobRunner`] →
//! [`SlotPool`] (blocks until a generation slot frees up) → the generation
//! backend → [`StatusSink`] on every transition. One failing generation
//! never corrupts another job's state or stops the intake loop.

pub mod intake;
pub mod runner;
pub mod sink;
pub mod slots;

pub use intake::IntakeLoop;
pub use runner::{AdmittedJob, JobRunner, SubmitError};
pub use sink::StatusSink;
pub use slots::{SlotPool, SlotPermit};
