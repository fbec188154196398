//! Integer-encoded calendar dates (`YYYYMMDD`).
//!
//! Sleep windows and audio events are joined on this key. All arithmetic goes
//! through `chrono::NaiveDate`, so stepping a key backwards or forwards is
//! correct across month and year boundaries.

use std::fmt;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DateKey(u32);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        // Years outside 0..=9999 cannot be written as eight digits; the app never
        // produces them, so clamp instead of failing.
        let year = date.year().clamp(0, 9999) as u32;
        Self(year * 10_000 + date.month() * 100 + date.day())
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn to_date(self) -> NaiveDate {
        // Every constructed key is validated, so this cannot fall through.
        decode(self.0).unwrap_or(NaiveDate::MIN)
    }

    pub fn succ(self) -> Self {
        self.offset_days(1)
    }

    pub fn pred(self) -> Self {
        self.offset_days(-1)
    }

    pub fn offset_days(self, days: i64) -> Self {
        let date = self.to_date();
        let shifted = if days >= 0 {
            date.checked_add_days(Days::new(days as u64))
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        Self::from_date(shifted.unwrap_or(date))
    }

    /// Seven keys ending at (and including) `end`, oldest first.
    pub fn trailing_week(end: DateKey) -> [DateKey; DAYS_PER_WEEK] {
        let mut keys = [end; DAYS_PER_WEEK];
        for (index, key) in keys.iter_mut().enumerate() {
            *key = end.offset_days(index as i64 - (DAYS_PER_WEEK as i64 - 1));
        }
        keys
    }

    /// Sunday..Saturday of the week that contains `date`.
    pub fn sunday_week(date: NaiveDate) -> [DateKey; DAYS_PER_WEEK] {
        let sunday = DateKey::from_date(date)
            .offset_days(-(date.weekday().num_days_from_sunday() as i64));
        let mut keys = [sunday; DAYS_PER_WEEK];
        for (index, key) in keys.iter_mut().enumerate() {
            *key = sunday.offset_days(index as i64);
        }
        keys
    }

    /// 0 for Sunday through 6 for Saturday.
    pub fn weekday_index(self) -> usize {
        self.to_date().weekday().num_days_from_sunday() as usize
    }
}

fn decode(value: u32) -> Option<NaiveDate> {
    let year = (value / 10_000) as i32;
    let month = (value / 100) % 100;
    let day = value % 100;
    NaiveDate::from_ymd_opt(year, month, day)
}

impl TryFrom<u32> for DateKey {
    type Error = anyhow::Error;

    fn try_from(value: u32) -> Result<Self> {
        decode(value)
            .map(|_| Self(value))
            .ok_or_else(|| anyhow!("{value} is not a valid YYYYMMDD date key"))
    }
}

impl TryFrom<i64> for DateKey {
    type Error = anyhow::Error;

    fn try_from(value: i64) -> Result<Self> {
        let raw = u32::try_from(value).map_err(|_| anyhow!("date key {value} out of range"))?;
        DateKey::try_from(raw)
    }
}

impl From<DateKey> for u32 {
    fn from(key: DateKey) -> Self {
        key.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}
