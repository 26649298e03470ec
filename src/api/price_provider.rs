use chrono::NaiveDate;

use crate::{
    core::{price_area::PriceArea, prices::HourlySpotPrice},
    prelude::*,
};

pub trait PriceProvider {
    /// Get all hourly spot prices of the Norwegian calendar day.
    fn get_prices(&self, on: NaiveDate, area: PriceArea) -> Result<Vec<HourlySpotPrice>>;
}
