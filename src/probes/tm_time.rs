use anyhow::{Context, Result, anyhow};
use std::time::Instant;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};
use time_tz::{OffsetDateTimeExt, Tz};

use crate::common::*;
use crate::locale::Locale;

fn get_tz(name: &str) -> Result<&'static Tz> {
    time_tz::timezones::get_by_name(name).ok_or_else(|| anyhow!("unknown time zone {}", name))
}

fn local_tz(settings: &Settings) -> Result<&'static Tz> {
    match &settings.local_zone {
        Some(name) => get_tz(name),
        None => time_tz::system::get_timezone().map_err(|e| anyhow!("system time zone: {}", e)),
    }
}

/// `<weekday>, <month> <day>, <h><am|pm>`
fn render(dt: &OffsetDateTime, locale: Locale) -> Result<String> {
    let hour = dt.format(&format_description!("[hour repr:12 padding:none][period case:lower]"))?;
    Ok(format!(
        "{}, {} {}, {}",
        locale.weekday_name(dt.weekday().number_days_from_sunday()),
        locale.month_name(u8::from(dt.month())),
        dt.day(),
        hour
    ))
}

pub fn run(settings: &Settings) -> Result<DateReport> {
    let started = Instant::now();

    let local = local_tz(settings)?;
    let now = OffsetDateTime::from(settings.now()).to_timezone(local);
    let hour = now.hour();
    log::trace!("time now: {}", now);

    let next_week = now
        .checked_add(Duration::days(NEXT_WEEK_DAYS))
        .ok_or_else(|| anyhow!("adding {} days to {} overflowed", NEXT_WEEK_DAYS, now))?
        // the add keeps the old offset, read it back in the zone
        .to_timezone(local);
    let next_week = render(&next_week, settings.locale)?;

    let zoned = render(&now.to_timezone(get_tz(&settings.zone)?), Locale::En)?;

    let first = Date::parse(
        PARSE_TEXT_INPUT,
        &format_description!("[month repr:short] [day padding:none], [year]"),
    )
    .with_context(|| format!("parse {}", PARSE_TEXT_INPUT))?;
    let second = Date::parse(PARSE_ISO_INPUT, &format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("parse {}", PARSE_ISO_INPUT))?;
    // same-or-before
    let is_before = first <= second;
    log::debug!("time parsed {} vs {}, before? {}", first, second, is_before);

    let is_leap_year = time::util::is_leap_year(now.year());

    Ok(DateReport {
        library: Library::Time,
        hour,
        next_week,
        zoned,
        is_before,
        is_leap_year,
        elapsed: started.elapsed(),
    })
}
