//! Reserved keys of the search state schema.

/// Top-level key holding the per-index partitions of a multi-index state.
pub const INDICES_KEY: &str = "indices";

/// Pagination key. Lives at the top level of a flat state or of an index partition.
pub const PAGE_KEY: &str = "page";

/// Key whose presence marks a results payload as a single (non keyed) result.
pub const HITS_KEY: &str = "hits";

/// Page number written whenever pagination is reset.
pub const FIRST_PAGE: u64 = 1;
