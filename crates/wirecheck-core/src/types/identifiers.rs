//! Index-based ID types.
//!
//! Each ID wraps a `u32` arena index so a `SymbolId` cannot be used where
//! another kind of index is expected.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an ID from an arena index.
            pub fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            /// The arena index this ID points at.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Symbol identity inside one file's symbol arena.
    SymbolId
);
