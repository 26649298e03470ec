use std::{
    fmt::{Debug, Formatter},
    str::FromStr,
};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de};
use serde_with::serde_as;

use crate::{
    core::sample::ChargingSessionSample,
    quantity::{energy::KilowattHours, interval::Interval},
};

#[derive(Deserialize)]
pub struct AccessToken {
    #[serde(rename = "access_token")]
    pub value: String,
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(…)")
    }
}

/// Single page of the charge history.
#[serde_as]
#[derive(Deserialize)]
pub struct ChargeHistory {
    #[serde(rename = "Pages")]
    pub n_pages: u32,

    #[serde_as(as = "serde_with::DefaultOnNull")]
    #[serde(rename = "Data", default)]
    pub sessions: Vec<ChargingSession>,
}

#[serde_as]
#[derive(Deserialize)]
pub struct ChargingSession {
    #[serde(rename = "Id")]
    pub id: String,

    /// Hourly breakdown, only present with `DetailLevel=1`.
    #[serde_as(as = "serde_with::DefaultOnNull")]
    #[serde(rename = "EnergyDetails", default)]
    pub energy_details: Vec<EnergyDetail>,
}

#[derive(Deserialize)]
pub struct EnergyDetail {
    #[serde(rename = "Timestamp", deserialize_with = "EnergyDetail::deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "Energy")]
    pub energy: KilowattHours,
}

impl EnergyDetail {
    /// Zaptec sometimes omits the offset, in which case the timestamp is in UTC.
    fn deserialize_timestamp<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let timestamp = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&timestamp)
            .map(|timestamp| timestamp.to_utc())
            .or_else(|_| NaiveDateTime::from_str(&timestamp).map(|timestamp| timestamp.and_utc()))
            .map_err(|_| {
                de::Error::invalid_value(de::Unexpected::Str(&timestamp), &"an ISO 8601 timestamp")
            })
    }
}

impl ChargingSession {
    /// Flatten the energy details into samples that fall within the interval.
    pub fn samples_within(
        &self,
        interval: Interval,
    ) -> impl Iterator<Item = ChargingSessionSample> + '_ {
        self.energy_details
            .iter()
            .filter(move |detail| interval.contains(detail.timestamp))
            .map(move |detail| ChargingSessionSample {
                session_id: self.id.clone(),
                timestamp: detail.timestamp,
                energy: detail.energy,
            })
    }
}
