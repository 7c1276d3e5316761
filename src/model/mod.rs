// src/model/mod.rs
//! The uniform in-memory representation of remote content.
//!
//! The remote API's duck-typed, `type`-keyed block objects become one closed
//! sum type here. Adding a block type is a compile-time-checked change
//! everywhere content is consumed; unrecognized wire types land in the
//! explicit `Unknown` variant rather than being dropped.

mod block;
pub mod blocks;
mod common;

pub use block::Block;
pub use blocks::*;
pub use common::BlockCommon;
