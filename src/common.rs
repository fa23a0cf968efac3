use anyhow::{Result, anyhow};
use serde::{Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use crate::locale::Locale;

pub const DEFAULT_ZONE: &str = "America/Chicago";
pub const NEXT_WEEK_DAYS: i64 = 7;

/// the formatted-date inputs, `first < second` is false
pub const PARSE_TEXT_INPUT: &str = "Jul 8, 2006";
pub const PARSE_ISO_INPUT: &str = "2005-07-08";
/// the std probe compares two ISO dates, `first < second` is true
pub const PARSE_ISO_EARLIER: &str = "2004-07-08";

/// The date libraries being compared, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Library {
    Chrono,
    Time,
    Jiff,
    Std,
}

impl Library {
    pub const ALL: [Library; 4] = [Library::Chrono, Library::Time, Library::Jiff, Library::Std];

    pub fn label(&self) -> &'static str {
        match self {
            Library::Chrono => "chrono",
            Library::Time => "time",
            Library::Jiff => "jiff",
            Library::Std => "std",
        }
    }

    /// whether the backend was compiled in, see the `with-*` features
    pub fn is_built(&self) -> bool {
        match self {
            Library::Chrono => cfg!(feature = "with-chrono"),
            Library::Time => cfg!(feature = "with-time"),
            Library::Jiff | Library::Std => true,
        }
    }

    pub fn built() -> Vec<Library> {
        Library::ALL.into_iter().filter(|lib| lib.is_built()).collect()
    }
}

impl Display for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Library {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Library::ALL
            .into_iter()
            .find(|lib| lib.label() == lower)
            .ok_or_else(|| anyhow!("unknown library: {}, expected one of chrono, time, jiff, std", s))
    }
}

/// Inputs shared by every probe.
#[derive(Debug, Clone)]
pub struct Settings {
    /// IANA zone "now" is converted into
    pub zone: String,
    /// IANA zone treated as local, system zone when `None`
    pub local_zone: Option<String>,
    pub locale: Locale,
    /// pinned instant, the system clock when `None`
    pub now: Option<SystemTime>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zone: DEFAULT_ZONE.to_owned(),
            local_zone: None,
            locale: Locale::default(),
            now: None,
        }
    }
}

impl Settings {
    pub fn now(&self) -> SystemTime {
        self.now.unwrap_or_else(SystemTime::now)
    }
}

/// What one probe produced.
#[derive(Debug, Clone, Serialize)]
pub struct DateReport {
    pub library: Library,
    pub hour: u8,
    pub next_week: String,
    pub zoned: String,
    pub is_before: bool,
    pub is_leap_year: bool,
    #[serde(rename = "elapsed_us", serialize_with = "serialize_micros")]
    pub elapsed: Duration,
}

fn serialize_micros<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX))
}

impl DateReport {
    /// the five `(key, value)` rows, keys as `|label| name:`
    pub fn rows(&self) -> Vec<(String, String)> {
        let label = self.library.label();
        vec![
            (format!("|{}| hour:", label), self.hour.to_string()),
            (format!("|{}| nextWeek:", label), self.next_week.clone()),
            (format!("|{}| zonedDateFormatted:", label), self.zoned.clone()),
            (format!("|{}| isDateBefore:", label), self.is_before.to_string()),
            (format!("|{}| isDateLeapYear:", label), self.is_leap_year.to_string()),
        ]
    }

    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

impl Display for DateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}",
            self.library,
            self.hour,
            self.next_week,
            self.zoned,
            if self.is_before { 1 } else { 0 },
            if self.is_leap_year { 1 } else { 0 },
        )
    }
}
