use core::fmt::Display;

/// Error returned by [`HashMap::at`](crate::HashMap::at) when the requested
/// key is not present in the map.
///
/// # Examples
///
/// ```rust
/// # #[cfg(any(feature = "std", feature = "foldhash"))]
/// # {
/// use chain_hash::HashMap;
/// use chain_hash::error::NotFound;
///
/// let map: HashMap<u32, &str> = HashMap::from([(1, "a")]);
/// assert_eq!(map.at(&1), Ok(&"a"));
/// assert_eq!(map.at(&2), Err(NotFound));
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotFound;

impl Display for NotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("key not found")
    }
}

impl core::error::Error for NotFound {}
