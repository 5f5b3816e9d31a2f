//! Crypto Corruption Index Backend Library
//!
//! Exposes the index pipeline and its collaborators for use by binaries and
//! tests. The pipeline itself (`index`) is pure and synchronous; network
//! concerns live in `sources` and presentation concerns in `api`.

pub mod api;
pub mod events;
pub mod index;
pub mod models;
pub mod portfolio;
pub mod sources;
