//!
//! # Service Layer
//!
//! Per-entity functions performing store reads/writes and cache
//! population/invalidation. Route handlers stay thin: they authenticate,
//! validate, call into this layer, and map the result to a response.

pub mod lists;
pub mod tasks;
pub mod users;
