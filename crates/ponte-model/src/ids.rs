//! Typed index newtypes.
//!
//! Every entity table is dense and append-only, so an index is a plain
//! u32 wrapped in a distinct type per entity class: a variable index can
//! never be handed to an API expecting a keeper index. Downstream crates
//! mint their own index types with [`define_id_type!`](crate::define_id_type).

/// Define a transparent u32 index type for one entity class.
#[macro_export]
macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            pub fn new(value: u32) -> Self {
                Self(value)
            }

            pub fn inner(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id_type!(VariableId);
