//! [Hva koster strømmen](https://www.hvakosterstrommen.no/strompris-api) client.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::{
    api::{PriceProvider, client},
    cache::ResponseCache,
    core::{
        price_area::PriceArea,
        prices::{Currency, HourlySpotPrice},
    },
    prelude::*,
    quantity::{interval::Interval, rate::KilowattHourRate},
};

pub struct Api {
    client: Agent,

    /// Raw responses are cached as is.
    cache: Option<ResponseCache>,
}

impl Api {
    pub fn new(cache: Option<ResponseCache>) -> Self {
        Self { client: client::new(), cache }
    }

    fn url(on: NaiveDate, area: PriceArea) -> String {
        format!(
            "https://www.hvakosterstrommen.no/api/v1/prices/{}_{area}.json",
            on.format("%Y/%m-%d"),
        )
    }

    fn get_entries(&self, on: NaiveDate, area: PriceArea) -> Result<Vec<Entry>> {
        info!("Fetching…");
        let url = Self::url(on, area);
        let entries = self
            .client
            .get(url.as_str())
            .call()
            .with_context(|| format!("failed to call `{url}`"))?
            .body_mut()
            .read_json::<Vec<Entry>>()
            .context("failed to deserialize the response")?;
        info!(n_prices = entries.len(), "Fetched");
        Ok(entries)
    }
}

impl PriceProvider for Api {
    #[instrument(skip_all, fields(on = %on, area = %area))]
    fn get_prices(&self, on: NaiveDate, area: PriceArea) -> Result<Vec<HourlySpotPrice>> {
        let entries = match &self.cache {
            Some(cache) => cache.get_or_fetch(on, area, || self.get_entries(on, area))?,
            None => self.get_entries(on, area)?,
        };
        Ok(entries.into_iter().map(HourlySpotPrice::from).collect())
    }
}

/// Response entry, also the cached format.
#[derive(Deserialize, Serialize)]
struct Entry {
    #[serde(rename = "NOK_per_kWh")]
    nok_per_kwh: KilowattHourRate,

    #[serde(rename = "EUR_per_kWh")]
    eur_per_kwh: f64,

    #[serde(rename = "EXR")]
    exchange_rate: f64,

    time_start: DateTime<FixedOffset>,
    time_end: DateTime<FixedOffset>,
}

impl From<Entry> for HourlySpotPrice {
    fn from(entry: Entry) -> Self {
        Self {
            interval: Interval::new(entry.time_start.to_utc(), entry.time_end.to_utc()),
            rate: entry.nok_per_kwh,
            currency: Currency::Nok,
        }
    }
}
