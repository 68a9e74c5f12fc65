//! Compact identifiers for arena-allocated nodes, symbol table elements and
//! caller-supplied tags.
//!
//! All three are `u32` newtypes: equality is an integer compare and they are
//! cheap to use as hash map keys.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a new id from a raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Get the index into the owning table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Index into a [`SyntaxTree`](crate::SyntaxTree).
    NodeId
);

define_id!(
    /// Index into a [`SymbolTable`](crate::SymbolTable).
    ElementId
);

define_id!(
    /// Opaque caller-chosen identifier for a node whose emitted span should be
    /// reported back after printing.
    Tag
);

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ElementId, NodeId, Tag};
    crate::static_assert_size!(NodeId, 4);
    crate::static_assert_size!(ElementId, 4);
    crate::static_assert_size!(Tag, 4);
}
