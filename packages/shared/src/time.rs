//! JST time helpers.

use chrono::{DateTime, FixedOffset, Utc};

/// Current time in JST (UTC+9).
pub fn now_jst() -> DateTime<FixedOffset> {
    let jst_offset = FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset");
    Utc::now().with_timezone(&jst_offset)
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    now_jst().timestamp_millis()
}
