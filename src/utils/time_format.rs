// Date/time layouts shared by the converter and config

use chrono::NaiveDateTime;

/// Default layout for date-only columns
pub const FORMAT_DATE: &str = "%Y-%m-%d";

/// Default layout for datetime columns
pub const FORMAT_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp with a chrono layout string
pub fn time_format(t: &NaiveDateTime, layout: &str) -> String {
    t.format(layout).to_string()
}
