//! Zaptec credentials from the command line, the secrets file, or the environment, in that order.

use std::{
    fmt::{Debug, Formatter},
    fs,
    path::Path,
};

use serde::Deserialize;

use crate::{
    cli::{CredentialArgs, DEFAULT_SECRETS_FILE},
    prelude::*,
};

pub const USERNAME_VARIABLE: &str = "ZAPTECH_USERNAME";
pub const PASSWORD_VARIABLE: &str = "ZAPTECH_PASSWORD";

#[derive(Clone, Eq, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"…")
            .finish()
    }
}

impl Credentials {
    pub const fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Only a source that provides both non-empty values counts.
    fn from_pair(username: Option<String>, password: Option<String>) -> Option<Self> {
        let username = username.filter(|username| !username.is_empty())?;
        let password = password.filter(|password| !password.is_empty())?;
        Some(Self::new(username, password))
    }

    /// Resolve the credentials: command line, then the secrets file, then the environment.
    #[instrument(skip_all)]
    pub fn resolve(
        args: &CredentialArgs,
        environment: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if let Some(credentials) = Self::from_pair(args.username.clone(), args.password.clone()) {
            info!("Using the command line credentials");
            return Ok(credentials);
        }

        if let Some(secrets) = Secrets::read_from(&args.secrets_file)?
            && let Some(credentials) =
                Self::from_pair(secrets.zaptech.username, secrets.zaptech.password)
        {
            info!(path = %args.secrets_file.display(), "Using the secrets file credentials");
            return Ok(credentials);
        }

        if let Some(credentials) =
            Self::from_pair(environment(USERNAME_VARIABLE), environment(PASSWORD_VARIABLE))
        {
            info!("Using the environment credentials");
            return Ok(credentials);
        }

        bail!(
            "credentials are missing: provide them via `--username` and `--password`, a secrets file, or `{USERNAME_VARIABLE}` and `{PASSWORD_VARIABLE}`"
        )
    }
}

#[derive(Deserialize)]
struct Secrets {
    zaptech: ZaptechSecrets,
}

#[derive(Deserialize)]
struct ZaptechSecrets {
    username: Option<String>,
    password: Option<String>,
}

impl Secrets {
    /// A missing file is fine unless the user asked for it explicitly.
    fn read_from(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            ensure!(
                path == Path::new(DEFAULT_SECRETS_FILE),
                "secrets file `{}` does not exist",
                path.display(),
            );
            debug!(path = %path.display(), "No secrets file");
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let secrets = toml::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        Ok(Some(secrets))
    }
}
