#![forbid(unsafe_code)]

//! Host ports and canonical input events for segfield.
//!
//! This crate intentionally has no opinion about UI toolkits: the host
//! adapter implements [`host::TextField`] and [`host::Scheduler`] over its
//! widget and event loop, and translates input into [`event`] types. The
//! controller in the `segfield` crate consumes both.

pub mod event;
pub mod host;
pub mod text;

pub use event::{KeyCode, KeyDisposition, KeyEvent, Modifiers, PointerEvent};
pub use host::{Scheduler, TextField};

#[cfg(feature = "test-helpers")]
pub use host::{CountingScheduler, MemoryField};
