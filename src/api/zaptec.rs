//! [Zaptec](https://api.zaptec.com/help/index.html) charge history client.

mod models;

use chrono::SecondsFormat;
use ureq::Agent;

pub use self::models::AccessToken;
use self::models::ChargeHistory;
use crate::{
    api::client,
    core::sample::ChargingSessionSample,
    credentials::Credentials,
    prelude::*,
    quantity::interval::Interval,
};

const BASE_URL: &str = "https://api.zaptec.com";

pub struct Api {
    client: Agent,
    page_size: u32,
}

impl Api {
    pub fn new() -> Self {
        Self { client: client::new(), page_size: 500 }
    }

    /// Obtain the bearer token via the OAuth password grant.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken> {
        info!("Authenticating…");
        self.client
            .post(format!("{BASE_URL}/oauth/token"))
            .send_form([
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .context("Zaptec authentication failed")?
            .body_mut()
            .read_json::<AccessToken>()
            .context("failed to deserialize the token response")
    }

    /// Fetch the hourly samples of all the sessions in the interval, page by page.
    #[instrument(skip_all, fields(interval = ?interval))]
    pub fn get_samples(
        &self,
        token: &AccessToken,
        interval: Interval,
    ) -> Result<Vec<ChargingSessionSample>> {
        collect_samples(interval, |page_index| self.get_history_page(token, interval, page_index))
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(page_index = page_index))]
    fn get_history_page(
        &self,
        token: &AccessToken,
        interval: Interval,
        page_index: u32,
    ) -> Result<ChargeHistory> {
        let page = self
            .client
            .get(format!("{BASE_URL}/api/chargehistory"))
            .header("Authorization", format!("Bearer {}", token.value))
            .header("Accept", "application/json")
            .query("From", interval.start.to_rfc3339_opts(SecondsFormat::Secs, true))
            .query("To", interval.end.to_rfc3339_opts(SecondsFormat::Secs, true))
            .query("PageIndex", page_index.to_string())
            .query("PageSize", self.page_size.to_string())
            .query("DetailLevel", "1")
            .call()
            .with_context(|| format!("failed to fetch the charge history page #{page_index}"))?
            .body_mut()
            .read_json::<ChargeHistory>()
            .context("failed to deserialize the charge history")?;
        debug!(n_pages = page.n_pages, n_sessions = page.sessions.len(), "Fetched the page");
        Ok(page)
    }
}

/// Request the pages until `Pages` is exhausted, at least once.
fn collect_samples(
    interval: Interval,
    mut get_page: impl FnMut(u32) -> Result<ChargeHistory>,
) -> Result<Vec<ChargingSessionSample>> {
    let mut samples = Vec::new();
    let mut n_sessions = 0;
    let mut page_index = 0;
    loop {
        let page = get_page(page_index)?;
        n_sessions += page.sessions.len();
        samples.extend(page.sessions.iter().flat_map(|session| session.samples_within(interval)));
        page_index += 1;
        if page_index >= page.n_pages {
            break;
        }
    }
    info!(n_sessions, n_samples = samples.len(), "Fetched");
    Ok(samples)
}
