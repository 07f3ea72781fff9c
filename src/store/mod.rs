//! Access to the remote ticket store.
//!
//! A [`RemoteStore`] is always scoped to one session: students see and
//! mutate their own tickets, staff see every ticket.

pub mod http;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use derive_more::derive::{Error, From};
use reqwest::StatusCode;

use crate::api::{
    ticket::{Id, ItemCounts, Status},
    Ticket,
};

#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch_own_tickets(&self) -> Result<Vec<Ticket>, Error>;

    async fn fetch_all_tickets(&self) -> Result<Vec<Ticket>, Error>;

    async fn create_ticket(&self, items: ItemCounts) -> Result<Ticket, Error>;

    async fn set_status(&self, id: Id, status: Status)
        -> Result<Ticket, Error>;

    /// Empty `issue` clears it.
    async fn set_issue(&self, id: Id, issue: &str) -> Result<Ticket, Error>;

    async fn delete_ticket(&self, id: Id) -> Result<(), Error>;
}

#[derive(Debug, Error, From)]
pub enum Error {
    /// The store refused the operation.
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[from]
    Transport(reqwest::Error),

    #[from]
    Url(url::ParseError),
}

impl Error {
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: Some(message.into()),
        }
    }

    /// Message supplied by the store, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Url(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::Url(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected {
                status,
                message: Some(message),
            } => write!(f, "rejected ({status}): {message}"),
            Self::Rejected {
                status,
                message: None,
            } => write!(f, "rejected ({status})"),
            Self::Transport(e) => write!(f, "transport error: {e}"),
            Self::Url(e) => write!(f, "invalid url: {e}"),
        }
    }
}
