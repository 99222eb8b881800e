//! Interpret the human-entered values posted by the busy-times form.

use chrono::{NaiveDate, NaiveTime};

use super::{DATE_FORMAT, DateSpan, WindowError};

// Tried in order after upper-casing so `am`/`pm` match `%p`
const TIME_FORMATS: [&str; 3] = ["%H:%M", "%I:%M%p", "%I:%M %p"];

/// Read a time of day such as `13:30`, `1:30pm`, `1:30 PM` or `9am`.
pub fn interpret_time(text: &str) -> Result<NaiveTime, WindowError> {
    tracing::debug!("Decoding time '{}'", text);
    let upper = text.trim().to_uppercase();

    for fmt in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(&upper, fmt) {
            return Ok(time);
        }
    }

    // Bare hour with a meridiem, e.g. `9am`
    for meridiem in ["AM", "PM"] {
        if let Some(hour) = upper.strip_suffix(meridiem) {
            let padded = format!("{}:00{}", hour.trim(), meridiem);
            if let Ok(time) = NaiveTime::parse_from_str(&padded, "%I:%M%p") {
                return Ok(time);
            }
        }
    }

    Err(WindowError::Time(text.to_string()))
}

/// Read a `MM/DD/YYYY` date.
pub fn interpret_date(text: &str) -> Result<NaiveDate, WindowError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| WindowError::Date(text.to_string()))
}

/// Read a `MM/DD/YYYY - MM/DD/YYYY` label into a date span.
pub fn interpret_daterange(text: &str) -> Result<DateSpan, WindowError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [begin, "-", end] = parts.as_slice() else {
        return Err(WindowError::DateRange(text.to_string()));
    };
    DateSpan::new(interpret_date(begin)?, interpret_date(end)?)
}
