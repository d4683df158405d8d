//! Platform-agnostic core: stat extraction, distribution math, target
//! classification, settings persistence and the attach/refresh protocol.
//!
//! Everything here compiles natively so it can be exercised by plain
//! `cargo test`; DOM access is confined to [`dom`].

pub mod classify;
pub mod collapse;
pub mod distribution;
pub mod dom;
pub mod error;
pub mod extract;
pub mod form;
pub mod format;
pub mod platform;
pub mod refresh;
pub mod scheduler;
pub mod stats;
pub mod storage;
pub mod targets;
pub mod theme;
pub mod timing;
