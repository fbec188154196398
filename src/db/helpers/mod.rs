use anyhow::{anyhow, bail, Result};

use crate::date_key::DateKey;

pub fn to_hour(value: i64, field: &str) -> Result<u8> {
    to_bounded(value, 23, field)
}

pub fn to_minute(value: i64, field: &str) -> Result<u8> {
    to_bounded(value, 59, field)
}

fn to_bounded(value: i64, max: u8, field: &str) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or_else(|| anyhow!("{field} contains out-of-range value {value}"))
}

pub fn parse_date_key(value: i64, field: &str) -> Result<DateKey> {
    DateKey::try_from(value).map_err(|err| anyhow!("{field}: {err}"))
}

/// Both end fields or neither; anything else is a corrupt row.
pub fn parse_end(hour: Option<i64>, minute: Option<i64>) -> Result<(Option<u8>, Option<u8>)> {
    match (hour, minute) {
        (Some(h), Some(m)) => Ok((Some(to_hour(h, "end_hour")?), Some(to_minute(m, "end_minute")?))),
        (None, None) => Ok((None, None)),
        _ => bail!("sleep window has only one of end_hour/end_minute"),
    }
}

pub fn check_score(score: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&score) {
        bail!("audio score {score} outside [0, 1]");
    }
    Ok(score)
}
