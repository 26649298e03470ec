use chrono::{DateTime, NaiveDate, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    api::PriceProvider,
    core::price_area::PriceArea,
    prelude::*,
    quantity::{interval::Interval, rate::KilowattHourRate},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, Deserialize, Serialize)]
pub enum Currency {
    #[display("NOK")]
    #[serde(rename = "NOK")]
    Nok,
}

/// Spot price valid for one delivery hour.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct HourlySpotPrice {
    pub interval: Interval,
    pub rate: KilowattHourRate,
    pub currency: Currency,
}

/// Spot prices sorted by time, looked up by the hour they cover.
#[must_use]
#[derive(Debug)]
pub struct PriceBook(Vec<HourlySpotPrice>);

impl FromIterator<HourlySpotPrice> for PriceBook {
    fn from_iter<T: IntoIterator<Item = HourlySpotPrice>>(iter: T) -> Self {
        let mut prices = iter.into_iter().collect_vec();
        prices.sort_by_key(|price| price.interval.start);
        Self(prices)
    }
}

impl PriceBook {
    /// Fetch the prices for every listed date, one call per date.
    #[instrument(skip_all, fields(area = %area))]
    pub fn fetch(
        provider: &dyn PriceProvider,
        area: PriceArea,
        dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<Self> {
        let book = dates
            .into_iter()
            .map(|date| {
                provider
                    .get_prices(date, area)
                    .with_context(|| format!("failed to get the spot prices on {date} in {area}"))
            })
            .flatten_ok()
            .collect::<Result<Self>>()?;
        info!(n_prices = book.len(), "Collected");
        Ok(book)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Find the price whose interval contains the time.
    pub fn get(&self, time: DateTime<Utc>) -> Result<&HourlySpotPrice> {
        let index = self.0.partition_point(|price| price.interval.end <= time);
        self.0
            .get(index)
            .filter(|price| price.interval.contains(time))
            .with_context(|| format!("no spot price covers {time}"))
    }
}
