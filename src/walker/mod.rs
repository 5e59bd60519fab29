//! Filesystem traversal
//!
//! ```text
//!                     ┌─────────────────────────┐
//!                     │        Walker           │
//!                     │  - list_dir (names)     │
//!                     │  - lstat per entry      │
//!                     └───────────┬─────────────┘
//!                                 │ EntryStatus (pre-order)
//!                                 ▼
//!                     ┌─────────────────────────┐
//!                     │       Snapshot          │
//!                     │  path -> record/marker  │
//!                     └─────────────────────────┘
//! ```

pub mod recursive;
pub mod snapshot;

pub use recursive::{Walk, WalkResult, WalkStats, Walker};
pub use snapshot::Snapshot;
