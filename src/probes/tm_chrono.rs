use anyhow::{Context, Result, anyhow};
use chrono::{
    DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;
use std::fmt::Display;
use std::time::Instant;

use crate::common::*;

const NEXT_WEEK_FORMAT: &str = "%A, %-d %B, %H:%M";
const ZONED_FORMAT: &str = "%-d.%-m.%Y %H:%M:%S%.3f GMT %:z (%Z)";

fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow!("unknown time zone {}: {}", name, e))
}

pub fn run(settings: &Settings) -> Result<DateReport> {
    let started = Instant::now();
    let now: DateTime<Utc> = settings.now().into();
    match &settings.local_zone {
        Some(name) => {
            let local = parse_tz(name)?;
            probe(settings, now.with_timezone(&local), started)
        }
        None => probe(settings, now.with_timezone(&Local), started),
    }
}

/// Wall clock to instant: a fold takes the earlier instant, a gap reads the
/// wall clock with the offset from before the gap (02:30 -> 03:30 on spring-forward).
fn resolve_local<Z: TimeZone>(tz: &Z, naive: &NaiveDateTime) -> Option<DateTime<Z>> {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return Some(dt);
    }
    let before = tz
        .offset_from_utc_datetime(&naive.checked_sub_signed(TimeDelta::days(1))?)
        .fix();
    let utc = naive.checked_sub_signed(TimeDelta::seconds(before.local_minus_utc() as i64))?;
    Some(tz.from_utc_datetime(&utc))
}

fn probe<Z>(settings: &Settings, now: DateTime<Z>, started: Instant) -> Result<DateReport>
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let hour = now.hour() as u8;
    log::trace!("chrono now: {}", now);

    let next_week = now
        .naive_local()
        .checked_add_days(Days::new(NEXT_WEEK_DAYS as u64))
        .ok_or_else(|| anyhow!("adding {} days to {} overflowed", NEXT_WEEK_DAYS, now))?;
    let next_week = resolve_local(&now.timezone(), &next_week)
        .ok_or_else(|| anyhow!("{} has no instant in the local zone", next_week))?;
    let next_week = next_week
        .format_localized(NEXT_WEEK_FORMAT, settings.locale.chrono_locale())
        .to_string();

    let zone = parse_tz(&settings.zone)?;
    let zoned = now.with_timezone(&zone).format(ZONED_FORMAT).to_string();

    let first = NaiveDate::parse_from_str(PARSE_TEXT_INPUT, "%b %d, %Y")
        .with_context(|| format!("parse {}", PARSE_TEXT_INPUT))?;
    let second = NaiveDate::parse_from_str(PARSE_ISO_INPUT, "%Y-%m-%d")
        .with_context(|| format!("parse {}", PARSE_ISO_INPUT))?;
    let is_before = first < second;
    log::debug!("chrono parsed {} vs {}, before? {}", first, second, is_before);

    // 2月29日存在即为闰年
    let is_leap_year = NaiveDate::from_ymd_opt(now.year(), 2, 29).is_some();

    Ok(DateReport {
        library: Library::Chrono,
        hour,
        next_week,
        zoned,
        is_before,
        is_leap_year,
        elapsed: started.elapsed(),
    })
}
