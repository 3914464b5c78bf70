use alloc::string::String;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

/// Set of item ids already merged into a list session.
#[cfg(feature = "std")]
pub(crate) type IdSet = HashSet<String>;
#[cfg(not(feature = "std"))]
pub(crate) type IdSet = BTreeSet<String>;
