use anyhow::{Context, Result};
use jiff::Timestamp;
use jiff::tz::TimeZone;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use super::tm_jiff::{get_tz, local_tz};
use crate::civil::{PlainDate, PlainDateTime};
use crate::common::*;
use crate::locale::Locale;

/// offset in seconds and short name of `tz` at `unix_seconds`.
/// std has no zone database, so this is the only place jiff is touched.
fn zone_info(tz: &TimeZone, unix_seconds: i64) -> Result<(i32, String)> {
    let ts = Timestamp::from_second(unix_seconds)
        .with_context(|| format!("timestamp {} out of range", unix_seconds))?;
    let zdt = ts.to_zoned(tz.clone());
    let offset = zdt.offset().seconds();
    let abbr = zdt.strftime("%Z").to_string();
    Ok((offset, short_zone_name(&abbr, offset)))
}

/// Wall clock in `tz` to the wall clock that really exists there, plus its zone name.
/// `hint_offset` is the offset the wall clock came from.
/// Inside a gap the wall clock is read with the offset from before the gap,
/// so 02:30 on a spring-forward day becomes 03:30.
fn resolve_local(
    tz: &TimeZone,
    wall: &PlainDateTime,
    hint_offset: i32,
) -> Result<(PlainDateTime, String)> {
    let wall_secs = wall.local_seconds();
    let (guess, _) = zone_info(tz, wall_secs - hint_offset as i64)?;
    // equal to `guess` unless the wall clock is skipped
    let (actual, _) = zone_info(tz, wall_secs - guess as i64)?;
    let instant = wall_secs - actual as i64;
    let (offset, name) = zone_info(tz, instant)?;
    Ok((PlainDateTime::from_unix(instant, wall.nanosecond, offset), name))
}

/// numeric abbreviations like `-03` read as `GMT-3`
fn short_zone_name(abbr: &str, offset_seconds: i32) -> String {
    if !abbr.starts_with(['+', '-']) {
        return abbr.to_owned();
    }
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.unsigned_abs();
    let (hours, minutes) = (abs / 3_600, abs % 3_600 / 60);
    match (hours, minutes) {
        (0, 0) => "GMT".to_owned(),
        (h, 0) => format!("GMT{}{}", sign, h),
        (h, m) => format!("GMT{}{}:{:02}", sign, h, m),
    }
}

/// month numeric, day 2-digit, hour/minute 2-digit, 24h, short zone name
fn render(dt: &PlainDateTime, zone_name: &str, locale: Locale) -> String {
    match locale {
        Locale::PtBr => format!(
            "{:02}/{:02}, {:02}:{:02} {}",
            dt.date.day, dt.date.month, dt.hour, dt.minute, zone_name
        ),
        Locale::En => format!(
            "{}/{:02}, {:02}:{:02} {}",
            dt.date.month, dt.date.day, dt.hour, dt.minute, zone_name
        ),
    }
}

fn unix_parts(now: SystemTime) -> (i64, u32) {
    match now.duration_since(UNIX_EPOCH) {
        Ok(d) => (d.as_secs() as i64, d.subsec_nanos()),
        Err(e) => {
            // before 1970
            let d = e.duration();
            let nanos = d.subsec_nanos();
            if nanos == 0 {
                (-(d.as_secs() as i64), 0)
            } else {
                (-(d.as_secs() as i64) - 1, 1_000_000_000 - nanos)
            }
        }
    }
}

pub fn run(settings: &Settings) -> Result<DateReport> {
    let started = Instant::now();

    let (secs, nanos) = unix_parts(settings.now());
    let local = local_tz(settings)?;
    let (offset, _) = zone_info(&local, secs)?;
    let now = PlainDateTime::from_unix(secs, nanos, offset);
    let hour = now.hour;
    log::trace!("std now: {} (offset {}s)", now, offset);

    let (next_week, next_zone) = resolve_local(&local, &now.add_days(NEXT_WEEK_DAYS), offset)?;
    let next_week = render(&next_week, &next_zone, settings.locale);

    let (target_offset, target_zone) = zone_info(&get_tz(&settings.zone)?, secs)?;
    let zoned = render(
        &PlainDateTime::from_unix(secs, nanos, target_offset),
        &target_zone,
        Locale::En,
    );

    let first = PlainDate::parse_iso(PARSE_ISO_EARLIER)?;
    let second = PlainDate::parse_iso(PARSE_ISO_INPUT)?;
    let is_before = first.cmp(&second).is_lt();
    log::debug!("std parsed {} vs {}, before? {}", first, second, is_before);

    let is_leap_year = now.date.in_leap_year();

    Ok(DateReport {
        library: Library::Std,
        hour,
        next_week,
        zoned,
        is_before,
        is_leap_year,
        elapsed: started.elapsed(),
    })
}
