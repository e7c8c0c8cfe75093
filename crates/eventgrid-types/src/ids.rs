//! Type-safe identifier wrappers around `u32`.
//!
//! Tickets and events are numbered from 1 in creation order. The numbers are
//! handed out by the world generator's allocator, never by a global counter,
//! so a fixed random seed always yields the same identifiers.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// The first identifier handed out by an allocator.
            pub const FIRST: Self = Self(1);

            /// Wrap a raw identifier value.
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Return the inner `u32` value.
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Return the identifier that follows this one, or `None` if the
            /// `u32` space is exhausted.
            pub const fn next(self) -> Option<Self> {
                match self.0.checked_add(1) {
                    Some(value) => Some(Self(value)),
                    None => None,
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a ticket.
    TicketId
}

define_id! {
    /// Unique identifier for an event hosted at a cell.
    EventId
}
