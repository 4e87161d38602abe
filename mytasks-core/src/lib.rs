//! mytasks core - domain logic for a single-user task list
//!
//! Persistence goes through the [`KeyValueStore`] seam; this crate ships an
//! in-memory store only. File-backed stores live in consuming crates.

pub mod controller;
pub mod date;
pub mod error;
pub mod filter;
pub mod persistence;
pub mod preference;
pub mod store;
pub mod task;

pub use controller::{TaskList, ViewState};
pub use error::{CoreError, Result};
pub use filter::{TaskSort, ViewEntry, compute_view};
pub use preference::ColorScheme;
pub use store::{KeyValueStore, MemoryStore};
pub use task::{Draft, Task, TaskState};
