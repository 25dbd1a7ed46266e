use crate::error::{AppError, AppResult};
use chrono::{DateTime, Datelike, Local, NaiveDate};

/// Accepts `YYYY-MM-DD`, falling back to a full RFC 3339 timestamp.
pub fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::ValidationError(format!("{field} must be a valid date (YYYY-MM-DD)")))
}

pub fn parse_optional_date(value: Option<&str>, field: &str) -> AppResult<Option<NaiveDate>> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_date(v, field))
        .transpose()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First and last day of the month containing `day`.
pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = day.with_day(1).unwrap_or(day);
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_first.and_then(|d| d.pred_opt()).unwrap_or(first);
    (first, last)
}

pub fn year_bounds(year: i32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    let last = NaiveDate::from_ymd_opt(year, 12, 31);
    first
        .zip(last)
        .ok_or_else(|| AppError::ValidationError(format!("Invalid year {year}")))
}

/// Window for a year, or a single month of it when `month` is given.
pub fn period_bounds(year: i32, month: Option<u32>) -> AppResult<(NaiveDate, NaiveDate)> {
    match month {
        None => year_bounds(year),
        Some(m) => NaiveDate::from_ymd_opt(year, m, 1)
            .map(month_bounds)
            .ok_or_else(|| AppError::ValidationError(format!("Invalid month {m}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-03-15", "date").unwrap(), ymd(2024, 3, 15));
        assert_eq!(
            parse_date("2024-03-15T10:30:00Z", "date").unwrap(),
            ymd(2024, 3, 15)
        );
        assert!(parse_date("15/03/2024", "date").is_err());
        assert_eq!(parse_optional_date(Some(""), "date").unwrap(), None);
        assert_eq!(parse_optional_date(None, "date").unwrap(), None);
    }

    #[test]
    fn test_month_bounds_handles_leap_years_and_december() {
        assert_eq!(month_bounds(ymd(2024, 2, 10)), (ymd(2024, 2, 1), ymd(2024, 2, 29)));
        assert_eq!(month_bounds(ymd(2023, 2, 28)), (ymd(2023, 2, 1), ymd(2023, 2, 28)));
        assert_eq!(month_bounds(ymd(2024, 12, 31)), (ymd(2024, 12, 1), ymd(2024, 12, 31)));
    }

    #[test]
    fn test_period_bounds() {
        assert_eq!(period_bounds(2024, None).unwrap(), (ymd(2024, 1, 1), ymd(2024, 12, 31)));
        assert_eq!(
            period_bounds(2024, Some(4)).unwrap(),
            (ymd(2024, 4, 1), ymd(2024, 4, 30))
        );
        assert!(period_bounds(2024, Some(13)).is_err());
    }
}
