use anyhow::{Result, anyhow};
use std::fmt::Display;
use std::str::FromStr;

/// Locale passed through to the formatters.
///
/// chrono ships its own locale tables, the other backends have none,
/// so the names they need live here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    PtBr,
    En,
}

// index 0 is Sunday
const PT_BR_WEEKDAYS: [&str; 7] = [
    "domingo",
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
];

const EN_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

// index 0 is January
const PT_BR_MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-br",
            Locale::En => "en",
        }
    }

    /// `days_from_sunday` in 0..7
    pub fn weekday_name(&self, days_from_sunday: u8) -> &'static str {
        let idx = days_from_sunday as usize % 7;
        match self {
            Locale::PtBr => PT_BR_WEEKDAYS[idx],
            Locale::En => EN_WEEKDAYS[idx],
        }
    }

    /// `month` in 1..=12
    pub fn month_name(&self, month: u8) -> &'static str {
        debug_assert!((1..=12).contains(&month), "month out of range: {}", month);
        let idx = usize::from(month) - 1;
        match self {
            Locale::PtBr => PT_BR_MONTHS[idx],
            Locale::En => EN_MONTHS[idx],
        }
    }

    /// 12-hour clock with meridiem, `14` -> `2pm`
    pub fn hour12(&self, hour: u8, upper: bool) -> String {
        let h = match hour % 12 {
            0 => 12,
            h => h,
        };
        let mer = if hour < 12 { "am" } else { "pm" };
        if upper {
            format!("{}{}", h, mer.to_uppercase())
        } else {
            format!("{}{}", h, mer)
        }
    }

    #[cfg(feature = "with-chrono")]
    pub fn chrono_locale(&self) -> chrono::Locale {
        match self {
            Locale::PtBr => chrono::Locale::pt_BR,
            Locale::En => chrono::Locale::en_US,
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(anyhow!("unsupported locale: {}", other)),
        }
    }
}
