//! Shared building blocks used across features.

pub mod render_utils;
mod task;
mod text;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::{mask_secret, truncate_start_with_ellipsis, truncate_with_ellipsis};
