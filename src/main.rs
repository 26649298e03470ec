mod api;
mod cache;
mod cli;
mod core;
mod credentials;
mod prelude;
mod quantity;
mod report;
mod tables;

use clap::{Parser, crate_version};
use itertools::Itertools;

use crate::{
    api::zaptec,
    cli::Args,
    core::{calculator::Calculator, prices::PriceBook, sample::ChargingSessionSample},
    credentials::Credentials,
    prelude::*,
    tables::build_summary_table,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    run(&Args::parse())?;

    info!("done!");
    Ok(())
}

#[instrument(skip_all, fields(from = %args.from_date, to = %args.to_date))]
fn run(args: &Args) -> Result {
    let date_range = args.date_range()?;
    info!(n_days = date_range.interval().duration().num_days(), "Reporting period");
    let credentials = Credentials::resolve(&args.credentials, |key| std::env::var(key).ok())?;

    let zaptec = zaptec::Api::new();
    let token = zaptec.authenticate(&credentials)?;
    let samples = zaptec.get_samples(&token, date_range.interval())?;

    info!(area = %args.price_area, region = args.price_area.region(), "Fetching spot prices…");
    let dates = samples.iter().map(ChargingSessionSample::local_date).sorted().dedup();
    let prices = PriceBook::fetch(&args.cache.price_provider(), args.price_area, dates)?;
    if prices.is_empty() {
        warn!("No spot prices fetched");
    }

    let rows = Calculator::builder()
        .fees(args.fees.schedule())
        .vat_rate(args.fees.vat_rate)
        .prices(&prices)
        .build()
        .calculate_all(&samples)?;
    report::write_csv(&rows, &args.output_file)?;

    println!("{}", build_summary_table(&rows));
    Ok(())
}
