//! 时间工具函数 - 业务时区与报表周期键
//!
//! Daily buckets are keyed `YYYY-MM-DD`, monthly buckets `"<Month> <YYYY>"`,
//! both computed in the business timezone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// Period keys for one save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodKeys {
    pub daily: String,
    pub monthly: String,
}

impl PeriodKeys {
    /// Keys for the given business-local date
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            daily: daily_key(date),
            monthly: monthly_key(date),
        }
    }

    /// Keys for an instant, seen from the business timezone
    pub fn at(now: DateTime<Utc>, tz: Tz) -> Self {
        Self::for_date(now.with_timezone(&tz).date_naive())
    }
}

/// Daily bucket key (YYYY-MM-DD)
pub fn daily_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Monthly bucket key ("October 2026")
pub fn monthly_key(date: NaiveDate) -> String {
    format!("{} {}", date.format("%B"), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_keys_for_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let keys = PeriodKeys::for_date(date);
        assert_eq!(keys.daily, "2026-10-16");
        assert_eq!(keys.monthly, "October 2026");
    }

    #[test]
    fn test_keys_follow_business_timezone() {
        // 2026-10-31 20:00 UTC is already November 1st in Kathmandu (+05:45)
        let now = Utc.with_ymd_and_hms(2026, 10, 31, 20, 0, 0).unwrap();
        let utc = PeriodKeys::at(now, Tz::UTC);
        assert_eq!(utc.daily, "2026-10-31");
        assert_eq!(utc.monthly, "October 2026");

        let ktm = PeriodKeys::at(now, chrono_tz::Asia::Kathmandu);
        assert_eq!(ktm.daily, "2026-11-01");
        assert_eq!(ktm.monthly, "November 2026");
    }

    #[test]
    fn test_single_digit_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2027, 1, 5).unwrap();
        assert_eq!(daily_key(date), "2027-01-05");
        assert_eq!(monthly_key(date), "January 2027");
    }
}
