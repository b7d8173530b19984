#![forbid(unsafe_code)]

//! Segmented editing for single-line text fields.
//!
//! Turns a plain text field into a structured editor — the same feel as a
//! native date/time input — for any delimited format: IP addresses,
//! durations, colors, identifiers. The integrator supplies one
//! [`SegmentSpec`] per logical field plus a [`ValueCodec`] that formats and
//! parses the whole string; [`SegmentedInput`] does the rest: span
//! resolution, click-to-segment mapping, typed-digit accumulation with
//! auto-advance, Up/Down stepping, enum cycling, placeholder/validity
//! tracking, and zero-width guarding of non-editable action segments.
//!
//! The controller drives the host widget through the ports in
//! `segfield-core`; it never touches a UI toolkit directly.

pub mod codec;
pub mod controller;
pub mod descriptor;
pub mod guard;
pub mod notify;
pub mod range;

mod store;
mod validity;

pub use codec::{JoinCodec, ValueCodec};
pub use controller::{AttachError, DEFAULT_INVALID_MESSAGE, FieldConfig, SegmentedInput};
pub use descriptor::{ActionSpec, ChoiceSpec, NumericSpec, SegmentKind, SegmentSpec, TextSpec};
pub use guard::{GUARD, decode};
pub use notify::{FieldNotice, ListenerId};
pub use range::{SegmentRange, locate_values, resolve_ranges, segment_at};
