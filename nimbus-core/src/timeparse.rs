//! Parsing for the composite time encoding used by gridded forecast payloads.
//!
//! Each sample's validity is published as `"<RFC 3339 instant>/<duration
//! designator>"`, where the designator is the restricted ISO-8601 subset
//! `P[nD][T[nH][nM[nS]]]`. The resampler downstream operates at hourly
//! granularity only, so durations normalize to whole hours here: any nonzero
//! sub-hour remainder (minutes and seconds combined) rounds UP to the next
//! full hour, while instants truncate DOWN to the top of their hour.

use chrono::{DateTime, TimeDelta, Timelike, Utc};

use crate::NimbusError;
use crate::model::TimePoint;

const SECS_PER_HOUR: u64 = 3600;

/// Parse a duration designator into whole hours of wall-clock time.
///
/// The designator may be embedded in a composite `instant/designator` value;
/// scanning starts at the `P` marker. A day component always contributes
/// exactly 24 hours (wall-clock, not calendar arithmetic). Missing components
/// contribute zero; a nonzero minute/second remainder contributes one hour.
///
/// # Errors
/// Returns `NimbusError::MalformedDuration` if the `P` marker is absent, a
/// component is misordered, duplicated, or unit-less, a number fails to
/// parse, or the designator is empty.
pub fn parse_duration(raw: &str) -> Result<TimeDelta, NimbusError> {
    let body = raw
        .split_once('P')
        .ok_or_else(|| NimbusError::malformed_duration(raw))?
        .1;
    if body.is_empty() {
        return Err(NimbusError::malformed_duration(raw));
    }
    let (date_part, time_part) = match body.split_once('T') {
        Some((d, t)) => (d, Some(t)),
        None => (body, None),
    };
    if time_part.is_some_and(str::is_empty) {
        return Err(NimbusError::malformed_duration(raw));
    }

    let mut days = 0u64;
    for (unit, n) in
        scan_components(date_part, &['D']).ok_or_else(|| NimbusError::malformed_duration(raw))?
    {
        debug_assert_eq!(unit, 'D');
        days = n;
    }
    let mut hours = 0u64;
    let mut sub_hour_secs = 0u64;
    if let Some(t) = time_part {
        for (unit, n) in scan_components(t, &['H', 'M', 'S'])
            .ok_or_else(|| NimbusError::malformed_duration(raw))?
        {
            match unit {
                'H' => hours = n,
                'M' => sub_hour_secs += n.saturating_mul(60),
                _ => sub_hour_secs += n,
            }
        }
    }
    if sub_hour_secs > 0 {
        hours += sub_hour_secs.div_ceil(SECS_PER_HOUR);
    }

    days.checked_mul(24)
        .and_then(|d| d.checked_add(hours))
        .and_then(|h| i64::try_from(h).ok())
        .and_then(TimeDelta::try_hours)
        .ok_or_else(|| NimbusError::malformed_duration(raw))
}

/// Parse a composite `"<RFC 3339 instant>/<duration designator>"` value.
///
/// The instant is truncated down to the top of its hour: sub-hour components
/// are discarded, never rounded. The designator is handed to
/// [`parse_duration`].
///
/// # Errors
/// Returns `NimbusError::MalformedDuration` if the `/` separator is missing,
/// the left side is not a valid RFC 3339 instant, or the right side fails
/// duration parsing.
pub fn parse_valid_time(raw: &str) -> Result<TimePoint, NimbusError> {
    let (instant_raw, designator) = raw
        .split_once('/')
        .ok_or_else(|| NimbusError::malformed_duration(raw))?;
    let instant = DateTime::parse_from_rfc3339(instant_raw)
        .map_err(|_| NimbusError::malformed_duration(raw))?
        .with_timezone(&Utc);
    let instant = instant
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(|| NimbusError::malformed_duration(raw))?;
    let duration = parse_duration(designator)?;
    Ok(TimePoint::new(instant, duration))
}

/// Scan `part` as a sequence of `<digits><unit>` components whose units must
/// appear in the order given by `units`, each at most once. Returns `None`
/// on a unit-less number, an unknown/misordered/duplicated unit, or digits
/// that overflow.
fn scan_components(part: &str, units: &[char]) -> Option<Vec<(char, u64)>> {
    let mut out = Vec::new();
    let mut rest = part;
    let mut next_unit = 0usize;
    while !rest.is_empty() {
        let digits_end = rest.find(|c: char| !c.is_ascii_digit())?;
        if digits_end == 0 {
            return None;
        }
        let (digits, tail) = rest.split_at(digits_end);
        let unit = tail.chars().next()?;
        let pos = units.iter().position(|&u| u == unit)?;
        if pos < next_unit {
            return None;
        }
        next_unit = pos + 1;
        out.push((unit, digits.parse().ok()?));
        rest = &tail[1..];
    }
    Some(out)
}
