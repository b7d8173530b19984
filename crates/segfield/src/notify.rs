#![forbid(unsafe_code)]

//! Outbound notifications.
//!
//! Listeners mirror native text-field semantics (`Input`/`Change`) and add
//! three structured notices for segment-level state. Registration hands
//! back a [`ListenerId`] so `destroy` and selective unsubscription work
//! without holding references into the controller.

use std::fmt;

use ahash::AHashMap;

/// A notification emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNotice {
    /// The field text changed (mirrors a native `input` signal).
    Input,

    /// A value was committed (mirrors a native `change` signal).
    Change,

    /// Segment focus moved onto `index`.
    SegmentFocusGained {
        /// The newly active segment.
        index: usize,
    },

    /// Segment focus left `index`.
    SegmentFocusLost {
        /// The previously active segment.
        index: usize,
    },

    /// Segment `index` now holds `value`.
    SegmentValueChanged {
        /// The mutated segment.
        index: usize,
        /// Its committed value.
        value: String,
    },
}

/// Handle for one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&FieldNotice)>;

/// Listener registry.
#[derive(Default)]
pub(crate) struct Listeners {
    next: u64,
    map: AHashMap<u64, Listener>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: impl FnMut(&FieldNotice) + 'static) -> ListenerId {
        let id = self.next;
        self.next += 1;
        self.map.insert(id, Box::new(listener));
        ListenerId(id)
    }

    /// Returns false when the id was already gone.
    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.map.remove(&id.0).is_some()
    }

    pub(crate) fn emit(&mut self, notice: &FieldNotice) {
        for listener in self.map.values_mut() {
            listener(notice);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.map.len())
            .finish()
    }
}
