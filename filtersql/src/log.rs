//! Structured JSON log lines on stderr.
//!
//! One JSON object per line:
//!
//! ```json
//! {"level":"debug","msg":"filter rejected","kind":"unsupported_column","fragment":"c = 'x'","ts":"2025-01-16T10:30:00.000Z"}
//! ```
//!
//! Two styles are available:
//!
//! ```no_run
//! # use filtersql::log;
//! let kind = "invalid_right_hand_side";
//!
//! // key-value fields
//! log!(warn, "filter rejected", kind: kind, filter: "b = 3");
//!
//! // format string
//! log::info!("policy loaded with {} columns", 4);
//! log::debug!("only in debug builds");
//! ```
//!
//! `log::debug!` compiles to nothing in release builds. The structured
//! `log!(debug, ..)` is always emitted; the validator's debug hook relies on
//! that.

use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.sssZ`.
#[doc(hidden)]
#[must_use]
pub fn __timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    __timestamp_from(now.as_secs(), now.subsec_millis())
}

/// Format seconds since the Unix epoch plus milliseconds.
///
/// Date conversion is Howard Hinnant's `civil_from_days`
/// (<https://howardhinnant.github.io/date_algorithms.html#civil_from_days>).
#[doc(hidden)]
#[must_use]
#[allow(clippy::similar_names)] // doe/doy/yoe are the algorithm's names
pub fn __timestamp_from(secs: u64, millis: u32) -> String {
    const SECS_PER_DAY: u64 = 86_400;

    let days = secs / SECS_PER_DAY;
    let time_of_day = secs % SECS_PER_DAY;
    let (hours, minutes, seconds) = (time_of_day / 3600, time_of_day % 3600 / 60, time_of_day % 60);

    // Epoch shifted to 0000-03-01 so leap days fall at the end of the year.
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);

    format!("{year:04}-{month:02}-{day:02}T{hours:02}:{minutes:02}:{seconds:02}.{millis:03}Z")
}

/// Escape a string for use inside a JSON string literal.
#[doc(hidden)]
#[must_use]
pub fn __escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            },
            c => out.push(c),
        }
    }
    out
}

/// Build one log line with an explicit timestamp.
#[doc(hidden)]
#[must_use]
pub fn __render_line(level: &str, msg: &str, fields: &[(&str, &str)], ts: &str) -> String {
    let mut line = String::with_capacity(48 + msg.len() + fields.len() * 24);
    let _ = write!(
        line,
        r#"{{"level":"{}","msg":"{}""#,
        __escape_json(level),
        __escape_json(msg)
    );
    for (key, value) in fields {
        let _ = write!(line, r#","{}":"{}""#, __escape_json(key), __escape_json(value));
    }
    let _ = write!(line, r#","ts":"{ts}"}}"#);
    line
}

/// Write one log line to stderr. Write failures are ignored.
#[doc(hidden)]
pub fn __emit(level: &str, msg: &str, fields: &[(&str, &str)]) {
    use std::io::Write;

    let line = __render_line(level, msg, fields, &__timestamp());
    let _ = writeln!(std::io::stderr(), "{line}");
}

/// Log a formatted message at `info` level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::log::__emit("info", &format!($($arg)*), &[])
    };
}

/// Log a formatted message at `warn` level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::log::__emit("warn", &format!($($arg)*), &[])
    };
}

/// Log a formatted message at `error` level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log::__emit("error", &format!($($arg)*), &[])
    };
}

/// Log a formatted message at `debug` level. No-op in release builds.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        {
            $crate::log::__emit("debug", &format!($($arg)*), &[]);
        }
    }};
}

pub use log_debug as debug;
pub use log_error as error;
pub use log_info as info;
pub use log_warn as warn;

/// Log a message with key-value fields.
///
/// Field values are rendered with `Display`.
///
/// ```no_run
/// # use filtersql::log;
/// log!(info, "policy loaded", columns: 4, path: "policy.toml");
/// log!(error, "policy file unreadable");
/// ```
#[macro_export]
macro_rules! log {
    ($level:ident, $msg:expr $(, $key:ident : $value:expr)* $(,)?) => {{
        let fields: &[(&str, &str)] = &[
            $( (stringify!($key), &format!("{}", $value)) ),*
        ];
        $crate::log::__emit(stringify!($level), $msg, fields);
    }};
}
