use anyhow::{Context, Result};
use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Timestamp, ToSpan, Zoned};
use std::time::Instant;

use crate::common::*;
use crate::locale::Locale;

const ENGLISH_FORMAT: &str = "%A, %B %-d, %-I%p";

pub(crate) fn get_tz(name: &str) -> Result<TimeZone> {
    TimeZone::get(name).with_context(|| format!("unknown time zone {}", name))
}

pub(crate) fn local_tz(settings: &Settings) -> Result<TimeZone> {
    match &settings.local_zone {
        Some(name) => get_tz(name),
        None => Ok(TimeZone::system()),
    }
}

/// `<weekday>, <month> <day>, <h><AM|PM>`
fn render(zdt: &Zoned, locale: Locale) -> String {
    match locale {
        Locale::En => zdt.strftime(ENGLISH_FORMAT).to_string(),
        Locale::PtBr => format!(
            "{}, {} {}, {}",
            locale.weekday_name(zdt.weekday().to_sunday_zero_offset() as u8),
            locale.month_name(zdt.month() as u8),
            zdt.day(),
            locale.hour12(zdt.hour() as u8, true)
        ),
    }
}

pub fn run(settings: &Settings) -> Result<DateReport> {
    let started = Instant::now();

    let now = Timestamp::try_from(settings.now())
        .context("system time out of range")?
        .to_zoned(local_tz(settings)?);
    let hour = now.hour() as u8;
    log::trace!("jiff now: {}", now);

    let next_week = now
        .checked_add(NEXT_WEEK_DAYS.days())
        .with_context(|| format!("adding {} days to {}", NEXT_WEEK_DAYS, now))?;
    let next_week = render(&next_week, settings.locale);

    let zoned = render(&now.with_time_zone(get_tz(&settings.zone)?), Locale::En);

    let first = Date::strptime("%b %d, %Y", PARSE_TEXT_INPUT)
        .with_context(|| format!("parse {}", PARSE_TEXT_INPUT))?;
    let second = Date::strptime("%Y-%m-%d", PARSE_ISO_INPUT)
        .with_context(|| format!("parse {}", PARSE_ISO_INPUT))?;
    let is_before = first < second;
    log::debug!("jiff parsed {} vs {}, before? {}", first, second, is_before);

    let is_leap_year = now.date().in_leap_year();

    Ok(DateReport {
        library: Library::Jiff,
        hour,
        next_week,
        zoned,
        is_before,
        is_leap_year,
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn render_both_locales() -> Result<()> {
        let zdt = date(2023, 10, 23).at(14, 5, 9, 0).in_tz("America/Sao_Paulo")?;
        assert_eq!(render(&zdt, Locale::PtBr), "segunda-feira, outubro 23, 2PM");
        assert_eq!(render(&zdt, Locale::En), "Monday, October 23, 2PM");
        Ok(())
    }

    #[test]
    fn immutable_add() -> Result<()> {
        let zdt = date(2024, 2, 26).at(9, 0, 0, 0).in_tz("America/Chicago")?;
        let later = zdt.checked_add(7.days())?;
        assert_eq!(zdt.date(), date(2024, 2, 26));
        assert_eq!(later.date(), date(2024, 3, 4));
        assert!(zdt.date().in_leap_year());
        Ok(())
    }
}
