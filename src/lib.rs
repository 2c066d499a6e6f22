#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! reformat-time - A tiny convenience tool to convert time formats
//!
//! reformat-time takes a single timestamp literal, works out which format it
//! is written in, and prints the same instant in one or more other formats.
//! It can be used as both a command-line application and a library.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `lens-core` | Timestamp parsing and formatting (`TimeLens`) | `chrono` |
//! | `uuid` | ULID-encoded UUID input and output | `uuid` |
//! | `cli` | The `reformat-time` binary | `clap`, `tracing-subscriber` |
//!
//! The default build enables `cli` and `uuid`. Building without `uuid` drops
//! the UUID parser from the chain and the `--uuid` output flag.
//!
//! # Accepted Input
//!
//! Inputs are tried against these parsers in order; the first match wins:
//!
//! 1. RFC3339 with nanosecond precision (`2023-10-11T00:00:00.5Z`)
//! 2. Unix date (`Mon Jan  2 15:04:05 UTC 2006`)
//! 3. Unix seconds (`1697043600`), unless that lands past year 10000
//! 4. Unix milliseconds (`1697043600123`)
//! 5. Fractional seconds (`1700000000.5`)
//! 6. A UUID whose first 48 bits hold a ULID millisecond timestamp (`uuid` feature)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use reformat_time::lens::time::{TimeFormatArgs, TimeLens};
//! use reformat_time::OutputFormat;
//!
//! let lens = TimeLens::new();
//! let args = TimeFormatArgs::default().with_unix(true).with_unix_float(true);
//!
//! let converted = lens.parse("1700000000.5", &args)?;
//! assert_eq!(converted.unix, Some(1700000000));
//! println!("{}", lens.format_results(&converted, &OutputFormat::Text));
//! ```

// Lens module - feature gated
#[cfg(feature = "lens-core")]
pub mod lens;

// =============================================================================
// Lens Module - Feature-gated exports
// =============================================================================

#[cfg(feature = "lens-core")]
pub use lens::time::{ConvertedTime, TimeFormatArgs, TimeLens};
#[cfg(feature = "lens-core")]
pub use lens::utils::OutputFormat;
