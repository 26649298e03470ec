use chrono::{DateTime, NaiveDate, Utc};

use crate::{core::TIME_ZONE, quantity::energy::KilowattHours};

/// Energy drawn by a charging session during one hour.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct ChargingSessionSample {
    pub session_id: String,

    /// Start of the hour.
    pub timestamp: DateTime<Utc>,

    pub energy: KilowattHours,
}

impl ChargingSessionSample {
    /// Norwegian calendar date of the sample, which is the date its spot price is published under.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.with_timezone(&TIME_ZONE).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_local_date_crosses_midnight() {
        let sample = ChargingSessionSample {
            session_id: "session".to_owned(),
            timestamp: Utc.with_ymd_and_hms(2023, 10, 14, 22, 0, 0).unwrap(),
            energy: KilowattHours::from(1.0),
        };
        // 00:00 CEST on the next day:
        assert_eq!(sample.local_date(), NaiveDate::from_ymd_opt(2023, 10, 15).unwrap());
    }
}
