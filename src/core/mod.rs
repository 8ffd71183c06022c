//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Error taxonomy (ReadError, PatternError)
//! - Unified output model (Record)
//! - Rendering functions for different output formats
//! - Size and duration humanization
//! - Common utilities

pub mod error;
pub mod humanize;
pub mod model;
pub mod render;
pub mod util;
