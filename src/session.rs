//! Session context handed to everything that talks to the remote store.
//!
//! There is exactly one [`Session`] per process. It is read from [`Storage`]
//! at startup, written on login and removed on logout.

use std::{io, path::PathBuf};

use derive_more::derive::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::api::user::Role;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<Option<Session>, Error> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let session = toml::from_str::<Session>(&raw)?;
        tracing::debug!(role = %session.role, "restored session");
        Ok(Some(session))
    }

    pub async fn save(&self, session: &Session) -> Result<(), Error> {
        let raw = toml::to_string(session)?;
        fs::write(&self.path, raw).await?;
        tracing::info!(role = %session.role, "session stored");
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!("session cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Display, Error, From)]
pub enum Error {
    #[display("session storage: {_0}")]
    Io(io::Error),

    #[display("malformed session: {_0}")]
    Decode(toml::de::Error),

    #[display("cannot encode session: {_0}")]
    Encode(toml::ser::Error),
}
