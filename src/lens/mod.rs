//! Lens module
//!
//! This module provides high-level "lens" abstractions that combine business logic
//! with output formatting. Lenses are designed to be reusable across different
//! interfaces (CLI, library callers).
//!
//! # Feature Requirements
//!
//! | Lens | Feature Required | Dependencies |
//! |------|-----------------|--------------|
//! | `TimeLens` | `lens-core` | chrono |
//! | `TimeLens` UUID parser/output | `uuid` | uuid |
//!
//! # Architecture
//!
//! Each lens module exports:
//! - A **Lens struct** (e.g., `TimeLens`) - the main entry point for all operations
//! - **Args structs** - input arguments for lens methods
//! - **Output types** - return types and format enums
//!
//! # Usage
//!
//! ```rust,ignore
//! use reformat_time::lens::time::{TimeFormatArgs, TimeLens};
//! use reformat_time::lens::utils::OutputFormat;
//! ```

// =============================================================================
// Utility module (always available when any lens feature is enabled)
// =============================================================================
pub mod utils;

// =============================================================================
// Core lenses (lens-core feature)
// =============================================================================

// TimeLens - time parsing and formatting
pub mod time;
