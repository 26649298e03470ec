//! Two-tier grid usage fee («nettleie»).

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

use crate::{core::TIME_ZONE, quantity::rate::KilowattHourRate};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tier {
    /// Nights and weekends.
    Low,

    /// Working days from 06:00 until 22:00.
    High,
}

impl Tier {
    pub fn at(time: DateTime<Utc>) -> Self {
        let local_time = time.with_timezone(&TIME_ZONE);
        match (local_time.weekday(), local_time.hour()) {
            (Weekday::Sat | Weekday::Sun, _) | (_, 0..6 | 22..) => Self::Low,
            _ => Self::High,
        }
    }
}

#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct FeeSchedule {
    pub low: KilowattHourRate,
    pub high: KilowattHourRate,
}

impl FeeSchedule {
    pub const fn rate(&self, tier: Tier) -> KilowattHourRate {
        match tier {
            Tier::Low => self.low,
            Tier::High => self.high,
        }
    }

    pub fn rate_at(&self, time: DateTime<Utc>) -> KilowattHourRate {
        self.rate(Tier::at(time))
    }
}
