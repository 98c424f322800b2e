//! Request-scoped carrier: an immutable, chainable key-to-value association.
//!
//! A [`Carrier`] travels alongside a request through every layer that needs
//! it. Associating a value produces a *new* carrier layered on the previous
//! one; prior carriers are never mutated, so concurrent handlers deriving
//! from the same carrier never observe each other's attachments. Cloning is
//! cheap (one `Arc` bump).
//!
//! Keys are marker types: `with_value::<K, _>` files the value under
//! `TypeId::of::<K>()`. Lookup walks the chain newest-first, so a later
//! association shadows an earlier one under the same key. A value stored
//! under a matching key but with an unexpected concrete type is reported as
//! absent rather than an error, keeping lookups resilient against key
//! collisions between unrelated users of the same carrier.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// One link in the carrier chain.
struct Slot {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Slot>>,
}

/// An immutable key-to-value association propagated alongside a request.
#[derive(Clone, Default)]
pub struct Carrier {
    head: Option<Arc<Slot>>,
}

impl Carrier {
    /// Creates an empty carrier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new carrier with `value` associated under the marker key
    /// `K`, layered on top of `self`. Never fails; `self` is unaffected.
    #[must_use]
    pub fn with_value<K, V>(&self, value: V) -> Carrier
    where
        K: 'static,
        V: Any + Send + Sync,
    {
        Carrier {
            head: Some(Arc::new(Slot {
                key: TypeId::of::<K>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Looks up the most recent value associated under the marker key `K`.
    ///
    /// Returns `None` when no association exists, or when the stored value
    /// is not a `V` (treated as absent, not a fault).
    #[must_use]
    pub fn value<K, V>(&self) -> Option<&V>
    where
        K: 'static,
        V: Any + Send + Sync,
    {
        let key = TypeId::of::<K>();
        let mut current = self.head.as_ref();
        while let Some(slot) = current {
            if slot.key == key {
                return slot.value.as_ref().downcast_ref::<V>();
            }
            current = slot.parent.as_ref();
        }
        None
    }

    /// Number of associations in the chain, shadowed entries included.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut n = 0;
        let mut current = self.head.as_ref();
        while let Some(slot) = current {
            n += 1;
            current = slot.parent.as_ref();
        }
        n
    }

    /// True when the carrier holds no associations at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl fmt::Debug for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carrier").field("depth", &self.depth()).finish()
    }
}
