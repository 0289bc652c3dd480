#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(test)]
extern crate std;

/// Error types returned by checked lookups.
pub mod error;

/// A HashMap implementation using separate chaining.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers.
pub mod hash_map;

/// The raw separate-chaining table underneath [`HashMap`].
///
/// `HashTable` stores pre-hashed values and owns the bucket array, the
/// growth and shrink policy, cursors, and iterators.
pub mod hash_table;

#[cfg(test)]
mod hash_map_proptest;

pub use error::NotFound;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by [`HashMap`] when none is given.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used by [`HashMap`] when none is given.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// Placeholder hasher builder when neither the `foldhash` nor the
        /// `std` feature is enabled.
        ///
        /// It has no values, so maps using it cannot be constructed; supply
        /// a hasher with [`HashMap::with_hasher`] instead.
        #[derive(Clone, Debug)]
        pub enum DefaultHashBuilder {}

        impl core::hash::BuildHasher for DefaultHashBuilder {
            type Hasher = Self;

            fn build_hasher(&self) -> Self {
                match *self {}
            }
        }

        impl core::hash::Hasher for DefaultHashBuilder {
            fn finish(&self) -> u64 {
                match *self {}
            }

            fn write(&mut self, _bytes: &[u8]) {
                match *self {}
            }
        }
    }
}
