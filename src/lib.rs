//! Hex Triad (workspace facade crate).
//!
//! Exposes `hex_triad::{types, core, session}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use hex_triad_core as core;
pub use hex_triad_session as session;
pub use hex_triad_types as types;
