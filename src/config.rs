use std::{io, path::PathBuf, time};

use derive_more::derive::{Display, Error, From};
use serde::{Deserialize, Deserializer};
use tokio::fs;
use url::Url;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub api: Api,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub dashboard: Dashboard,
    #[serde(default)]
    pub registration: Registration,
}

impl Config {
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|source| Error::Read { path, source })?;
        Ok(toml::from_str::<Self>(&raw)?)
    }
}

#[derive(Debug, Display, Error, From)]
pub enum Error {
    #[display("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[display("invalid config: {_0}")]
    #[from]
    Parse(toml::de::Error),
}

#[derive(Debug, Deserialize)]
pub struct Api {
    /// Endpoint paths are joined onto this, so it always ends in `/`.
    #[serde(deserialize_with = "Api::deserialize_base_url")]
    pub base_url: Url,
    #[serde(default = "Api::default_timeout", with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl Api {
    fn default_timeout() -> time::Duration {
        time::Duration::from_secs(30)
    }

    fn deserialize_base_url<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Url, D::Error> {
        let mut url = Url::deserialize(de)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Session {
    pub path: PathBuf,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            path: PathBuf::from("session.toml"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Dashboard {
    /// How long a status or error banner stays visible.
    #[serde(with = "humantime_serde")]
    pub banner_ttl: time::Duration,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            banner_ttl: time::Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Registration {
    /// Student emails must end with this domain.
    pub email_domain: String,
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            email_domain: "rishihood.edu.in".into(),
        }
    }
}
