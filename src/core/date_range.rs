use chrono::{NaiveDate, NaiveTime};

use crate::{prelude::*, quantity::interval::Interval};

/// Reporting period: `from` is inclusive, `to` is exclusive.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn try_new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        ensure!(from < to, "`from_date` ({from}) must be earlier than `to_date` ({to})");
        Ok(Self { from, to })
    }

    /// The period between the UTC midnights of both dates.
    pub fn interval(self) -> Interval {
        Interval::new(
            self.from.and_time(NaiveTime::MIN).and_utc(),
            self.to.and_time(NaiveTime::MIN).and_utc(),
        )
    }
}
