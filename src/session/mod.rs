//! Session persistence (save/restore) support.
//!
//! Converts in-memory annotation state into a serialised representation, writes
//! it to disk with locking, optional compression, and backup rotation, and
//! restores the state on startup when requested.

mod options;
mod snapshot;
mod storage;

#[allow(unused_imports)]
pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, SessionOptions, options_from_config,
};
#[allow(unused_imports)]
pub use snapshot::{
    SessionSnapshot, ToolStateSnapshot, apply_snapshot, load_snapshot, load_snapshot_from_path,
    save_snapshot, snapshot_from_canvas,
};
#[allow(unused_imports)]
pub use storage::{ClearOutcome, SessionInspection, StrokeCounts, clear_session, inspect_session};
