//! Human-readable sizes and durations
//!
//! Both formatters produce compact strings without spaces or decimals,
//! e.g. `2K`, `450ms`.

/// Size suffixes, index `i` stands for `1024^i` bytes.
pub const SIZE_UNITS: [&str; 9] = ["B", "K", "M", "G", "T", "P", "E", "Z", "Y"];

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000 * NANOS_PER_MICRO;
const NANOS_PER_SECOND: i64 = 1_000 * NANOS_PER_MILLI;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;

/// Duration units, most significant first.
pub const DURATION_UNITS: [(i64, &str); 5] = [
    (NANOS_PER_HOUR, "h"),
    (NANOS_PER_MINUTE, "min"),
    (NANOS_PER_SECOND, "s"),
    (NANOS_PER_MILLI, "ms"),
    (NANOS_PER_MICRO, "μs"),
];

/// Format a byte count using binary (1024) units.
///
/// The value is rounded half away from zero to a whole number of the
/// largest unit that does not exceed it:
///
/// ```
/// use linewise::core::humanize::format_size;
/// assert_eq!(format_size(0), "0B");
/// assert_eq!(format_size(1536), "2K");
/// ```
pub fn format_size(bytes: i64) -> String {
    if bytes <= 0 {
        return "0B".to_string();
    }

    // floor(log1024(bytes)) in integers; float logs misjudge exact powers
    let mut i = 0usize;
    let mut rest = bytes as u64;
    while rest >= 1024 && i < SIZE_UNITS.len() - 1 {
        rest /= 1024;
        i += 1;
    }

    let scaled = (bytes as f64 / 1024.0_f64.powi(i as i32)).round();
    format!("{}{}", scaled as u64, SIZE_UNITS[i])
}

/// Format a duration given in nanoseconds.
///
/// The first unit whose whole count is strictly greater than one wins,
/// so exactly one hour renders as `60min`. Anything that does not reach
/// two microseconds falls back to nanoseconds.
pub fn format_duration(nanoseconds: i64) -> String {
    for (magnitude, suffix) in DURATION_UNITS {
        let value = nanoseconds / magnitude;
        if value > 1 {
            return format!("{}{}", value, suffix);
        }
    }

    format!("{}ns", nanoseconds)
}

/// [`format_duration`] for a [`std::time::Duration`], saturating at `i64::MAX` nanoseconds.
pub fn format_std_duration(duration: std::time::Duration) -> String {
    let nanos = i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX);
    format_duration(nanos)
}
