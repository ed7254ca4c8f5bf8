use std::time::Duration;

use crate::error::ValidationError;

pub(crate) fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        Some(_) | None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

pub(crate) fn parse_json_body(s: &str) -> Result<serde_json::Value, ValidationError> {
    serde_json::from_str(s).map_err(|err| ValidationError::InvalidJsonBody { source: err })
}

/// Parses `30`, `250ms`, `1m30s` or `1h2m3s`. A bare number is seconds;
/// otherwise every count needs one of `h`, `m`, `s`, `ms`, `us`/`µs`, `ns`.
pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }
    if value.bytes().all(|byte| byte.is_ascii_digit()) {
        return positive(Duration::from_secs(parse_count(value, value)?));
    }

    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let digits = rest
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(rest.len());
        let (count, tail) = rest.split_at(digits);
        let unit_len = tail
            .find(|ch: char| ch.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);
        if count.is_empty() || unit.is_empty() {
            return Err(ValidationError::InvalidDurationFormat {
                value: value.to_owned(),
            });
        }
        let part = component(parse_count(count, value)?, unit)?;
        total = total
            .checked_add(part)
            .ok_or(ValidationError::DurationOverflow)?;
        rest = next;
    }
    positive(total)
}

fn parse_count(count: &str, value: &str) -> Result<u64, ValidationError> {
    count
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })
}

fn component(count: u64, unit: &str) -> Result<Duration, ValidationError> {
    let seconds = |factor: u64| {
        count
            .checked_mul(factor)
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow)
    };
    match unit {
        "h" => seconds(3_600),
        "m" => seconds(60),
        "s" => Ok(Duration::from_secs(count)),
        "ms" => Ok(Duration::from_millis(count)),
        "us" | "µs" => Ok(Duration::from_micros(count)),
        "ns" => Ok(Duration::from_nanos(count)),
        other => Err(ValidationError::InvalidDurationUnit {
            unit: other.to_owned(),
        }),
    }
}

const fn positive(duration: Duration) -> Result<Duration, ValidationError> {
    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }
    Ok(duration)
}
