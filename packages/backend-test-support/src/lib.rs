//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing: unified
//! logging initialization, unique test data, and JSON error-body assertions.

pub mod logging;
pub mod responses;
pub mod unique_helpers;
