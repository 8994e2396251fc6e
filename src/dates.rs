// src/dates.rs

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

use crate::{table::Value, TransferError};

/// Output format for every admission date.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Accepted date layouts, day-first before year-first.
const DATE_LAYOUTS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d"];
const TIME_LAYOUTS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's local date as `DD/MM/YYYY`.
pub fn today_string() -> String {
    format_date(Local::now().date_naive())
}

/// Reformat an existing cell value to `DD/MM/YYYY`.
///
/// Numbers are read as Excel serial days. Anything that does not parse is a
/// `DateParse` error; there is no fallback value.
pub fn normalize(value: &Value) -> Result<String, TransferError> {
    let date = match value {
        Value::Date(d) => Some(*d),
        Value::Number(n) => excel_serial_to_date(*n),
        Value::Text(s) => parse_text_date(s),
        Value::Empty => None,
    };
    date.map(format_date)
        .ok_or_else(|| TransferError::DateParse(value.to_string()))
}

/// Parse the common textual date layouts, with or without a time of day.
pub fn parse_text_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for layout in DATE_LAYOUTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, layout) {
            return Some(d);
        }
    }

    for layout in DATE_LAYOUTS {
        for time in TIME_LAYOUTS {
            for sep in [" ", "T"] {
                let fmt = format!("{layout}{sep}{time}");
                if let Ok(dt) = NaiveDateTime::parse_from_str(s, &fmt) {
                    return Some(dt.date());
                }
            }
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Excel 1900 date system: day 1 is 1900-01-01, with the fictitious
/// 1900-02-29 folded into the 1899-12-30 epoch.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::try_days(serial.trunc() as i64)?)
}
