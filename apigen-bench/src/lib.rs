//! # apigen Bench
//!
//! Benchmarking utilities for apigen performance testing.

pub mod documents;
