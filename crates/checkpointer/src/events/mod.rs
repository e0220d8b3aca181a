//! Lifecycle event observers.
//!
//! Provides:
//! - `CheckpointObserver` trait for save/evict/milestone/restore hooks
//! - `ConsoleObserver` for lightweight tracing output
//! - `CompositeObserver` for multi-backend fan-out

mod console;
mod observer;

pub use console::ConsoleObserver;
pub use observer::{CheckpointObserver, CompositeObserver, NoOpObserver};
