use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::{
    core::{
        fee::FeeSchedule,
        prices::{Currency, PriceBook},
        sample::ChargingSessionSample,
    },
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Itemized cost of a single charging session sample.
///
/// Field order is the CSV column order.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CostRow {
    #[serde(rename = "SessionId")]
    pub session_id: String,

    #[serde(rename = "Timestamp", serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "Energy")]
    pub energy: KilowattHours,

    /// Spot price.
    #[serde(rename = "EnergyUsageFee")]
    pub energy_usage_fee: KilowattHourRate,

    /// Grid fee amount at the selected tier, equal to [`CostRow::net_usage_cost`].
    #[serde(rename = "NetUsageFee")]
    pub net_usage_fee: Cost,

    #[serde(rename = "EnergyCost")]
    pub energy_cost: Cost,

    #[serde(rename = "NetUsageCost")]
    pub net_usage_cost: Cost,

    #[serde(rename = "TotalCostNoVat")]
    pub total_cost_no_vat: Cost,

    #[serde(rename = "TotalCostWithVAT")]
    pub total_cost_with_vat: Cost,

    #[serde(rename = "CostCurrency")]
    pub currency: Currency,
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&timestamp.format("%Y-%m-%d %H:%M:%S%:z"))
}

#[derive(bon::Builder)]
pub struct Calculator<'a> {
    fees: FeeSchedule,

    /// Value-added tax as a fraction.
    vat_rate: f64,

    prices: &'a PriceBook,
}

impl Calculator<'_> {
    pub fn calculate(&self, sample: &ChargingSessionSample) -> Result<CostRow> {
        let spot_price = self.prices.get(sample.timestamp).with_context(|| {
            format!("cannot price session `{}` at {}", sample.session_id, sample.timestamp)
        })?;
        let energy_cost = sample.energy * spot_price.rate;
        let net_usage_cost = sample.energy * self.fees.rate_at(sample.timestamp);
        let total_cost_no_vat = energy_cost + net_usage_cost;
        Ok(CostRow {
            session_id: sample.session_id.clone(),
            timestamp: sample.timestamp,
            energy: sample.energy,
            energy_usage_fee: spot_price.rate,
            net_usage_fee: net_usage_cost,
            energy_cost,
            net_usage_cost,
            total_cost_no_vat,
            total_cost_with_vat: total_cost_no_vat.with_vat(self.vat_rate),
            currency: spot_price.currency,
        })
    }

    /// Price all the samples, keeping their order.
    #[instrument(skip_all, fields(n_samples = samples.len()))]
    pub fn calculate_all(&self, samples: &[ChargingSessionSample]) -> Result<Vec<CostRow>> {
        let rows =
            samples.iter().map(|sample| self.calculate(sample)).collect::<Result<Vec<_>>>()?;
        info!(n_rows = rows.len(), "Calculated");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, TimeZone};
    use itertools::Itertools;

    use super::*;
    use crate::core::{price_area::PriceArea, prices::tests::FakePriceProvider};

    fn fees() -> FeeSchedule {
        FeeSchedule::builder()
            .low(KilowattHourRate::from(0.2259))
            .high(KilowattHourRate::from(0.3059))
            .build()
    }

    fn price_book() -> Result<PriceBook> {
        PriceBook::fetch(
            &FakePriceProvider::new(),
            PriceArea::No2,
            [
                NaiveDate::from_ymd_opt(2023, 10, 14).unwrap(),
                NaiveDate::from_ymd_opt(2023, 10, 15).unwrap(),
                NaiveDate::from_ymd_opt(2023, 10, 16).unwrap(),
            ],
        )
    }

    fn sample(session_id: &str, timestamp: DateTime<Utc>, energy: f64) -> ChargingSessionSample {
        ChargingSessionSample {
            session_id: session_id.to_owned(),
            timestamp,
            energy: KilowattHours::from(energy),
        }
    }

    #[test]
    fn test_calculate_weekday_daytime() -> Result {
        let prices = price_book()?;
        let calculator = Calculator::builder().fees(fees()).vat_rate(0.25).prices(&prices).build();

        // Monday, 12:00 CEST:
        let timestamp = Utc.with_ymd_and_hms(2023, 10, 16, 10, 0, 0).unwrap();
        let row = calculator.calculate(&sample("a", timestamp, 7.0))?;

        assert_eq!(row.session_id, "a");
        assert_eq!(row.energy_usage_fee, KilowattHourRate::from(0.12));
        assert_abs_diff_eq!(row.energy_cost.0, 7.0 * 0.12);
        assert_abs_diff_eq!(row.net_usage_cost.0, 7.0 * 0.3059);
        assert_eq!(row.net_usage_fee, row.net_usage_cost);
        assert_eq!(row.total_cost_no_vat, row.energy_cost + row.net_usage_cost);
        assert_eq!(row.total_cost_with_vat, row.total_cost_no_vat * (1.0 + 0.25));
        assert_eq!(row.currency, Currency::Nok);
        Ok(())
    }

    #[test]
    fn test_net_usage_fee_column_holds_the_amount() -> Result {
        let prices = price_book()?;
        let calculator = Calculator::builder().fees(fees()).vat_rate(0.25).prices(&prices).build();
        let timestamp = Utc.with_ymd_and_hms(2023, 10, 16, 10, 0, 0).unwrap();
        let row = calculator.calculate(&sample("a", timestamp, 7.0))?;

        let mut buffer = Vec::new();
        crate::report::write_to(&[row], &mut buffer)?;
        let report = String::from_utf8(buffer)?;
        let fields = report.lines().nth(1).unwrap().split(',').collect_vec();
        assert_eq!(fields[4], fields[6]);
        assert_abs_diff_eq!(fields[4].parse::<f64>()?, 7.0 * 0.3059);
        Ok(())
    }

    #[test]
    fn test_calculate_weekend_uses_low_fee() -> Result {
        let prices = price_book()?;
        let calculator = Calculator::builder().fees(fees()).vat_rate(0.25).prices(&prices).build();

        // Saturday, 12:00 CEST:
        let timestamp = Utc.with_ymd_and_hms(2023, 10, 14, 10, 0, 0).unwrap();
        let row = calculator.calculate(&sample("b", timestamp, 3.5))?;
        assert_abs_diff_eq!(row.net_usage_fee.0, 3.5 * 0.2259);
        assert_eq!(row.total_cost_no_vat, row.energy_cost + row.net_usage_cost);
        Ok(())
    }

    #[test]
    fn test_calculate_all_preserves_order() -> Result {
        let prices = price_book()?;
        let calculator = Calculator::builder().fees(fees()).vat_rate(0.15).prices(&prices).build();
        let samples = [
            sample("b", Utc.with_ymd_and_hms(2023, 10, 16, 3, 0, 0).unwrap(), 1.0),
            sample("a", Utc.with_ymd_and_hms(2023, 10, 14, 1, 0, 0).unwrap(), 2.0),
            sample("b", Utc.with_ymd_and_hms(2023, 10, 15, 20, 0, 0).unwrap(), 0.0),
        ];
        let rows = calculator.calculate_all(&samples)?;
        assert_eq!(rows.len(), samples.len());
        for (row, sample) in rows.iter().zip(&samples) {
            assert_eq!(row.session_id, sample.session_id);
            assert_eq!(row.timestamp, sample.timestamp);
            assert_eq!(row.total_cost_with_vat, row.total_cost_no_vat * (1.0 + 0.15));
        }
        Ok(())
    }

    #[test]
    fn test_missing_price_is_an_error() -> Result {
        let prices = price_book()?;
        let calculator = Calculator::builder().fees(fees()).vat_rate(0.25).prices(&prices).build();
        let samples = [
            sample("a", Utc.with_ymd_and_hms(2023, 10, 16, 10, 0, 0).unwrap(), 1.0),
            sample("a", Utc.with_ymd_and_hms(2023, 10, 20, 10, 0, 0).unwrap(), 1.0),
        ];
        assert!(calculator.calculate_all(&samples).is_err());
        Ok(())
    }
}
