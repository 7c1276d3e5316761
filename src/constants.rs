// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of how
//! the system operates: how much it fetches per round-trip, how deep it
//! recurses, how it retries, how it allocates memory.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many blocks the Notion API returns per page of results.
///
/// The API maximum is 100. We use the maximum to minimize round-trips
/// during recursive fetching.
pub const API_PAGE_SIZE: u32 = 100;

/// Maximum nesting depth when recursively fetching a block tree.
///
/// Notion content can nest arbitrarily deep. This limit prevents stack
/// overflow and runaway fetches; 50 levels is far deeper than any real
/// workspace.
pub const MAX_FETCH_DEPTH: u8 = 50;

// ---------------------------------------------------------------------------
// Retry policy for listing calls
// ---------------------------------------------------------------------------

/// Attempts per page-listing call before the failure becomes fatal.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// First backoff delay after a transient listing failure, in milliseconds.
pub const RETRY_INITIAL_DELAY_MS: u64 = 250;

/// Backoff delay cap, in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 4_000;

// ---------------------------------------------------------------------------
// Concurrency boundaries
// ---------------------------------------------------------------------------

/// Lower bound on the sibling-subtree fetch fan-out.
///
/// Fetch workers wait on network I/O, not CPU, so running more of them than
/// cores is safe and beneficial.
pub const MIN_FETCH_CONCURRENCY: usize = 4;

/// Upper bound on the sibling-subtree fetch fan-out.
pub const MAX_FETCH_CONCURRENCY: usize = 24;

// ---------------------------------------------------------------------------
// File resolution
// ---------------------------------------------------------------------------

/// Entries held by the in-memory source-URL → resolved-URL memo.
///
/// The memo fronts the durable store; it only saves repeated stat/HEAD
/// calls within one process, so a modest capacity suffices.
pub const RESOLUTION_MEMO_CAPACITY: usize = 1_024;

// ---------------------------------------------------------------------------
// Formatting boundaries
// ---------------------------------------------------------------------------

/// Number of spaces per indentation level in nested Markdown lists.
pub const INDENT_SPACES: usize = 2;

/// Estimated characters per block, used to pre-allocate output strings.
///
/// A performance hint, not a constraint. Over-estimating wastes a little
/// memory; under-estimating causes reallocation.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 160;
