//! Batch Strategy Module
//!
//! - Parallel: rayon fan-out for many ranges over one document

pub mod parallel;

pub use parallel::normalize_parallel;
