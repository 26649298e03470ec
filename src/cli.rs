use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::{
    api::hvakosterstrommen,
    cache::ResponseCache,
    core::{date_range::DateRange, fee::FeeSchedule, price_area::PriceArea},
    prelude::*,
    quantity::rate::KilowattHourRate,
};

pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";

/// Fetch Zaptec charging sessions and calculate their energy costs.
#[derive(Parser)]
#[command(author, version, about)]
#[must_use]
pub struct Args {
    /// Start date (inclusive) in format YYYY-MM-DD.
    #[clap(long = "from_date", value_name = "YYYY-MM-DD")]
    pub from_date: NaiveDate,

    /// End date (exclusive) in format YYYY-MM-DD.
    #[clap(long = "to_date", value_name = "YYYY-MM-DD")]
    pub to_date: NaiveDate,

    /// Path to the output CSV file, overwritten if it exists.
    #[clap(long = "output_file")]
    pub output_file: PathBuf,

    #[clap(flatten)]
    pub credentials: CredentialArgs,

    /// Price area to use for the spot prices.
    #[clap(long = "price_area", value_enum, ignore_case = true, default_value = "NO2")]
    pub price_area: PriceArea,

    #[clap(flatten)]
    pub fees: FeeArgs,

    #[clap(flatten)]
    pub cache: CacheArgs,
}

impl Args {
    pub fn date_range(&self) -> Result<DateRange> {
        DateRange::try_new(self.from_date, self.to_date)
    }
}

#[derive(Parser)]
pub struct CredentialArgs {
    /// Path to the TOML file with the `[zaptech]` username and password.
    #[clap(long = "secrets_file", default_value = DEFAULT_SECRETS_FILE)]
    pub secrets_file: PathBuf,

    /// Zaptec username, overrides the secrets file and the environment.
    #[clap(long)]
    pub username: Option<String>,

    /// Zaptec password, overrides the secrets file and the environment.
    #[clap(long)]
    pub password: Option<String>,
}

#[derive(Copy, Clone, Parser)]
pub struct FeeArgs {
    /// Net usage fee for nights and weekends, NOK/kWh.
    #[clap(long = "low_net_usage_fee", default_value = "0.2259")]
    pub low_net_usage_fee: KilowattHourRate,

    /// Net usage fee for working day time, NOK/kWh.
    #[clap(long = "high_net_usage_fee", default_value = "0.3059")]
    pub high_net_usage_fee: KilowattHourRate,

    /// Value-added tax as a fraction.
    #[clap(long = "vat_rate", default_value = "0.25")]
    pub vat_rate: f64,
}

impl FeeArgs {
    pub fn schedule(self) -> FeeSchedule {
        FeeSchedule::builder().low(self.low_net_usage_fee).high(self.high_net_usage_fee).build()
    }
}

#[derive(Parser)]
pub struct CacheArgs {
    /// Directory for the downloaded spot prices.
    #[clap(long = "cache_dir", default_value = "cache")]
    pub cache_dir: PathBuf,

    /// Always download the spot prices.
    #[clap(long = "no_cache")]
    pub no_cache: bool,
}

impl CacheArgs {
    pub fn price_provider(&self) -> hvakosterstrommen::Api {
        hvakosterstrommen::Api::new(
            (!self.no_cache).then(|| ResponseCache::new(self.cache_dir.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_verify() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() -> Result {
        let args = Args::try_parse_from([
            "zapcost",
            "--from_date",
            "2023-09-01",
            "--to_date",
            "2023-10-01",
            "--output_file",
            "costs.csv",
        ])?;
        assert_eq!(args.from_date, NaiveDate::from_ymd_opt(2023, 9, 1).unwrap());
        assert_eq!(args.credentials.secrets_file, PathBuf::from(DEFAULT_SECRETS_FILE));
        assert!(args.credentials.username.is_none());
        assert_eq!(args.price_area, PriceArea::No2);
        assert_abs_diff_eq!(args.fees.low_net_usage_fee.0, 0.2259);
        assert_abs_diff_eq!(args.fees.high_net_usage_fee.0, 0.3059);
        assert_abs_diff_eq!(args.fees.vat_rate, 0.25);
        assert_eq!(args.cache.cache_dir, PathBuf::from("cache"));
        assert!(!args.cache.no_cache);
        assert!(args.date_range().is_ok());
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result {
        let args = Args::try_parse_from([
            "zapcost",
            "--from_date=2023-09-01",
            "--to_date=2023-09-02",
            "--output_file=costs.csv",
            "--username=user",
            "--password=password",
            "--price_area=no4",
            "--low_net_usage_fee=0.1",
            "--high_net_usage_fee=0.2",
            "--no_cache",
        ])?;
        assert_eq!(args.credentials.username.as_deref(), Some("user"));
        assert_eq!(args.price_area, PriceArea::No4);
        assert_abs_diff_eq!(args.fees.schedule().low.0, 0.1);
        assert_abs_diff_eq!(args.fees.schedule().high.0, 0.2);
        assert!(args.cache.no_cache);
        Ok(())
    }

    #[test]
    fn test_required_arguments() {
        assert!(Args::try_parse_from(["zapcost", "--from_date=2023-09-01"]).is_err());
        assert!(
            Args::try_parse_from([
                "zapcost",
                "--from_date=2023-13-01",
                "--to_date=2023-09-02",
                "--output_file=costs.csv",
            ])
            .is_err()
        );
    }
}
