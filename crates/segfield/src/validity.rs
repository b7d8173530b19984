#![forbid(unsafe_code)]

//! Validity evaluator.
//!
//! Structural completeness only: a non-empty field is incomplete while any
//! editable segment still shows its placeholder. An empty field carries no
//! custom invalidity — native required-ness governs there.

use crate::descriptor::SegmentSpec;

/// True when some editable segment still equals its placeholder.
pub(crate) fn is_incomplete(specs: &[SegmentSpec], values: &[String]) -> bool {
    specs
        .iter()
        .zip(values)
        .any(|(spec, value)| spec.is_editable() && value == spec.placeholder())
}
