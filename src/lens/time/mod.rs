//! Time parsing and formatting lens
//!
//! This module converts a single timestamp literal between textual and
//! numeric representations. The input is tried against an ordered chain of
//! parsers (RFC3339, Unix date, Unix seconds, Unix milliseconds, fractional
//! seconds and, with the `uuid` feature, ULID-encoded UUIDs), and the parsed
//! instant is rendered in every requested output format.
//!
//! # Feature Requirements
//!
//! This module requires the `lens-core` feature. The UUID parser and output
//! require the `uuid` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use reformat_time::lens::time::{TimeFormatArgs, TimeLens};
//!
//! let lens = TimeLens::new();
//! let args = TimeFormatArgs::default().with_unix(true);
//! let converted = lens.parse("2023-10-11T00:00:00Z", &args)?;
//!
//! for line in converted.lines() {
//!     println!("{}", line);
//! }
//! ```

pub mod format;
pub mod parsers;
#[cfg(feature = "uuid")]
pub mod ulid;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lens::utils::OutputFormat;
pub use parsers::{TimeParser, MAX_UNIX_SECONDS_YEAR};

// =============================================================================
// Types
// =============================================================================

/// A parsed instant rendered in the selected formats
///
/// Unselected formats are `None` and are left out of JSON output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertedTime {
    /// RFC3339 in UTC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc3339_utc: Option<String>,
    /// RFC3339 in the local time zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc3339: Option<String>,
    /// Unix timestamp in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unix: Option<i64>,
    /// Unix timestamp in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unix_milli: Option<i64>,
    /// Unix timestamp as seconds with six decimal places
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unix_float: Option<String>,
    /// UUID holding the millisecond timestamp in ULID layout
    #[cfg(feature = "uuid")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl ConvertedTime {
    /// Labeled output lines, always in the same order
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(v) = &self.rfc3339_utc {
            lines.push(format!("RFC3339Nano UTC: {}", v));
        }
        if let Some(v) = &self.rfc3339 {
            lines.push(format!("RFC3339Nano: {}", v));
        }
        if let Some(v) = &self.unix {
            lines.push(format!("Unix: {}", v));
        }
        if let Some(v) = &self.unix_milli {
            lines.push(format!("UnixMilli: {}", v));
        }
        if let Some(v) = &self.unix_float {
            lines.push(format!("Float: {}", v));
        }
        #[cfg(feature = "uuid")]
        if let Some(v) = &self.uuid {
            lines.push(format!("ULID: {}", v));
        }
        lines
    }
}

// =============================================================================
// Args
// =============================================================================

/// Output formats to render, each independently selectable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[serde(default)]
pub struct TimeFormatArgs {
    /// Format time as RFC 3339 UTC (default)
    #[cfg_attr(feature = "cli", clap(long))]
    pub rfc3339_utc: bool,

    /// Format time as RFC 3339 in the local time zone
    #[cfg_attr(feature = "cli", clap(short = 'r', long))]
    pub rfc3339: bool,

    /// Format time as unix time
    #[cfg_attr(feature = "cli", clap(short = 'u', long))]
    pub unix: bool,

    /// Format time as unix milli
    #[cfg_attr(feature = "cli", clap(short = 'm', long))]
    pub unix_milli: bool,

    /// Format time as unix float
    #[cfg_attr(feature = "cli", clap(short = 'f', long))]
    pub unix_float: bool,

    /// Format time as UUID (ULID)
    #[cfg(feature = "uuid")]
    #[cfg_attr(feature = "cli", clap(long, visible_alias = "id"))]
    pub uuid: bool,
}

impl TimeFormatArgs {
    /// Check whether no output format is selected
    pub fn is_empty(&self) -> bool {
        let any =
            self.rfc3339_utc || self.rfc3339 || self.unix || self.unix_milli || self.unix_float;
        #[cfg(feature = "uuid")]
        let any = any || self.uuid;
        !any
    }

    /// The selection to render: RFC3339 UTC when nothing is selected
    pub fn effective(&self) -> Self {
        let mut args = self.clone();
        if args.is_empty() {
            args.rfc3339_utc = true;
        }
        args
    }

    pub fn with_rfc3339_utc(mut self, enabled: bool) -> Self {
        self.rfc3339_utc = enabled;
        self
    }

    pub fn with_rfc3339(mut self, enabled: bool) -> Self {
        self.rfc3339 = enabled;
        self
    }

    pub fn with_unix(mut self, enabled: bool) -> Self {
        self.unix = enabled;
        self
    }

    pub fn with_unix_milli(mut self, enabled: bool) -> Self {
        self.unix_milli = enabled;
        self
    }

    pub fn with_unix_float(mut self, enabled: bool) -> Self {
        self.unix_float = enabled;
        self
    }

    #[cfg(feature = "uuid")]
    pub fn with_uuid(mut self, enabled: bool) -> Self {
        self.uuid = enabled;
        self
    }
}

// =============================================================================
// Lens
// =============================================================================

/// Time parsing and formatting lens
///
/// # Example
///
/// ```rust,ignore
/// use reformat_time::lens::time::{TimeFormatArgs, TimeLens};
/// use reformat_time::OutputFormat;
///
/// let lens = TimeLens::new();
///
/// // Parse a Unix timestamp
/// let ts = lens.parse_time_string("1697043600")?;
///
/// // Render it
/// let args = TimeFormatArgs::default().with_rfc3339_utc(true).with_unix_milli(true);
/// let converted = lens.convert(&ts, &args)?;
/// println!("{}", lens.format_results(&converted, &OutputFormat::Json));
/// ```
#[derive(Debug)]
pub struct TimeLens;

impl TimeLens {
    /// Create a new time lens
    pub fn new() -> Self {
        Self
    }

    /// The parser chain, in the order it is tried
    pub fn parsers(&self) -> Vec<TimeParser> {
        parsers::parser_chain()
    }

    /// Parse a single time string into a `DateTime<Utc>`
    ///
    /// The first parser of the chain that accepts the input wins. Fails with
    /// the input named in the error when none does.
    pub fn parse_time_string(&self, time_string: &str) -> Result<DateTime<Utc>> {
        for parser in self.parsers() {
            match (parser.parse)(time_string) {
                Ok(ts) => {
                    debug!("parsed {:?} as {}", time_string, parser.name);
                    return Ok(ts);
                }
                Err(e) => {
                    debug!("{} parser rejected {:?}: {}", parser.name, time_string, e);
                }
            }
        }

        Err(anyhow!("failed to parse {}", time_string))
    }

    /// Render a parsed instant in every selected format
    ///
    /// Falls back to RFC3339 UTC when `args` selects nothing.
    pub fn convert(&self, ts: &DateTime<Utc>, args: &TimeFormatArgs) -> Result<ConvertedTime> {
        let args = args.effective();

        #[cfg(feature = "uuid")]
        let uuid = if args.uuid {
            let id = ulid::to_uuid(ts).map_err(|e| {
                anyhow!(
                    "failed to convert parsed timestamp {} to a ULID: {}",
                    format::format_rfc3339_utc(ts),
                    e
                )
            })?;
            Some(id.to_string())
        } else {
            None
        };

        Ok(ConvertedTime {
            rfc3339_utc: args.rfc3339_utc.then(|| format::format_rfc3339_utc(ts)),
            rfc3339: args.rfc3339.then(|| format::format_rfc3339_local(ts)),
            unix: args.unix.then(|| ts.timestamp()),
            unix_milli: args.unix_milli.then(|| ts.timestamp_millis()),
            unix_float: args.unix_float.then(|| format::format_unix_float(ts)),
            #[cfg(feature = "uuid")]
            uuid,
        })
    }

    /// Parse a time string and render it in the selected formats
    pub fn parse(&self, time_string: &str, args: &TimeFormatArgs) -> Result<ConvertedTime> {
        let ts = self.parse_time_string(time_string)?;
        self.convert(&ts, args)
    }

    /// Format a conversion result for output
    pub fn format_results(&self, converted: &ConvertedTime, format: &OutputFormat) -> String {
        match format {
            OutputFormat::Text => converted.lines().join("\n"),
            OutputFormat::Json => serde_json::to_string(converted).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(converted).unwrap_or_default(),
        }
    }
}

impl Default for TimeLens {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
