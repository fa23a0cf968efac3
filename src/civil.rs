//! Proleptic Gregorian calendar on plain integers, used by the std probe.
//!
//! std only gives us `SystemTime`; everything calendar shaped is computed here.

use anyhow::{Result, anyhow};
use std::fmt::Display;

const DAYS_FROM_0000_03_01_TO_1970_01_01: i64 = 719_468;
const DAYS_IN_ERA: i64 = 146_097;
const SECONDS_PER_DAY: i64 = 86_400;

/// 公历日期, ordered by (year, month, day)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlainDateTime {
    pub date: PlainDate,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

impl PlainDate {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("month out of range: {}", month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(anyhow!("day out of range: {}-{:02}-{:02}", year, month, day));
        }
        Ok(Self { year, month, day })
    }

    /// 从1970-01-01开始的天数构造日期
    pub fn from_days_since_epoch(days_since_epoch: i64) -> Self {
        let days = days_since_epoch + DAYS_FROM_0000_03_01_TO_1970_01_01;
        let era = days.div_euclid(DAYS_IN_ERA);
        let day_of_era = days.rem_euclid(DAYS_IN_ERA);
        let year_of_era =
            (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / (DAYS_IN_ERA - 1))
                / 365;
        let year = year_of_era + era * 400;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let month = (day_of_year * 5 + 2) / 153;
        let day = day_of_year - (153 * month + 2) / 5 + 1;

        let month = if month < 10 { month + 3 } else { month - 9 };
        let year = if month <= 2 { year + 1 } else { year };

        Self {
            year: year as i32,
            month: month as u8,
            day: day as u8,
        }
    }

    /// 日期转为从1970-01-01以来的天数
    pub fn days_since_epoch(&self) -> i64 {
        let year = self.year as i64;
        let month = self.month as i64;
        let day = self.day as i64;

        let year = if month <= 2 { year - 1 } else { year };
        let month = if month > 2 { month - 3 } else { month + 9 };
        let era = year.div_euclid(400);
        let year_of_era = year.rem_euclid(400);
        let day_of_year = (153 * month + 2) / 5 + day - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
        era * DAYS_IN_ERA + day_of_era - DAYS_FROM_0000_03_01_TO_1970_01_01
    }

    /// 0 = Sunday
    pub fn weekday_from_sunday(&self) -> u8 {
        // 1970-01-01 was a Thursday
        (self.days_since_epoch() + 4).rem_euclid(7) as u8
    }

    pub fn in_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    pub fn add_days(&self, days: i64) -> Self {
        Self::from_days_since_epoch(self.days_since_epoch() + days)
    }

    /// strict `YYYY-MM-DD`
    pub fn parse_iso(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(anyhow!("expected YYYY-MM-DD, got {:?}", s));
        }
        let year: i32 = s[0..4]
            .parse()
            .map_err(|e| anyhow!("bad year in {:?}: {}", s, e))?;
        let month: u8 = s[5..7]
            .parse()
            .map_err(|e| anyhow!("bad month in {:?}: {}", s, e))?;
        let day: u8 = s[8..10]
            .parse()
            .map_err(|e| anyhow!("bad day in {:?}: {}", s, e))?;
        Self::new(year, month, day)
    }
}

impl Display for PlainDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl PlainDateTime {
    /// wall clock for `unix_seconds` shifted by `offset_seconds`
    pub fn from_unix(unix_seconds: i64, nanosecond: u32, offset_seconds: i32) -> Self {
        let local = unix_seconds + offset_seconds as i64;
        let days = local.div_euclid(SECONDS_PER_DAY);
        let secs = local.rem_euclid(SECONDS_PER_DAY);
        Self {
            date: PlainDate::from_days_since_epoch(days),
            hour: (secs / 3_600) as u8,
            minute: (secs % 3_600 / 60) as u8,
            second: (secs % 60) as u8,
            nanosecond,
        }
    }

    pub fn add_days(&self, days: i64) -> Self {
        Self {
            date: self.date.add_days(days),
            ..*self
        }
    }

    /// inverse of `from_unix` with a zero offset, sub-second part dropped
    pub fn local_seconds(&self) -> i64 {
        self.date.days_since_epoch() * SECONDS_PER_DAY
            + self.hour as i64 * 3_600
            + self.minute as i64 * 60
            + self.second as i64
    }
}

impl Display for PlainDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}T{:02}:{:02}:{:02}.{:09}",
            self.date, self.hour, self.minute, self.second, self.nanosecond
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_days() {
        let date = PlainDate::from_days_since_epoch(0);
        assert_eq!(date.to_string(), "1970-01-01");
        let date = PlainDate::from_days_since_epoch(19645);
        println!("by civil: {}, days {}", date, date.days_since_epoch());
        assert_eq!(date, PlainDate::new(2023, 10, 15).unwrap());
        assert_eq!(date.days_since_epoch(), 19645);
        assert_eq!(PlainDate::from_days_since_epoch(-1).to_string(), "1969-12-31");
    }

    #[test]
    fn round_trip() {
        for days in (-800_000..800_000).step_by(997) {
            let date = PlainDate::from_days_since_epoch(days);
            assert_eq!(date.days_since_epoch(), days, "{}", date);
        }
    }

    #[test]
    fn leap_rule() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
    }

    #[test]
    fn weekday_and_arith() {
        let monday = PlainDate::new(2023, 10, 16).unwrap();
        assert_eq!(monday.weekday_from_sunday(), 1);
        let next = monday.add_days(7);
        assert_eq!(next.to_string(), "2023-10-23");
        assert_eq!(next.weekday_from_sunday(), 1);
        assert_eq!(
            PlainDate::new(2023, 12, 28).unwrap().add_days(7).to_string(),
            "2024-01-04"
        );
    }

    #[test]
    fn parse_and_compare() {
        let d1 = PlainDate::parse_iso("2004-07-08").unwrap();
        let d2 = PlainDate::parse_iso("2005-07-08").unwrap();
        assert!(d1 < d2);
        assert!(PlainDate::parse_iso("2005-7-8").is_err());
        assert!(PlainDate::parse_iso("2005-02-30").is_err());
    }

    #[test]
    fn from_unix_with_offset() {
        // 2023-10-16T17:05:09Z at UTC-3
        let dt = PlainDateTime::from_unix(1_697_475_909, 123_000_000, -3 * 3600);
        assert_eq!(dt.to_string(), "2023-10-16T14:05:09.123000000");
        // crossing midnight backwards
        let dt = PlainDateTime::from_unix(0, 0, -3600);
        assert_eq!(dt.to_string(), "1969-12-31T23:00:00.000000000");
        assert_eq!(dt.local_seconds(), -3600);
        let dt = PlainDateTime::from_unix(1_697_475_909, 0, -3 * 3600);
        assert_eq!(dt.local_seconds(), 1_697_475_909 - 3 * 3600);
    }
}
