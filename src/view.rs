//! Derived views over a ticket list: the sequence shown to the user and the
//! per-status summary counts.

use std::{cmp::Ordering, str::FromStr};

use derive_more::derive::{Display, Error};
use itertools::Itertools as _;
use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};

use crate::api::{ticket::Status, Ticket};

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Dashboard,
    /// Everything not yet collected.
    ActiveLaundry,
    /// Collected tickets only.
    History,
}

impl Section {
    fn admits(self, ticket: &Ticket) -> bool {
        match self {
            Self::Dashboard => true,
            Self::ActiveLaundry => ticket.status != Status::PickedUp,
            Self::History => ticket.status == Status::PickedUp,
        }
    }
}

impl FromStr for Section {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Self::Dashboard),
            "active-laundry" | "laundry" => Ok(Self::ActiveLaundry),
            "history" => Ok(Self::History),
            _ => Err(ParseError {
                expected: "`dashboard`, `active-laundry` or `history`",
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    fn admits(self, ticket: &Ticket) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => ticket.status == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only).map_err(|_| ParseError {
            expected: "`all` or a ticket status",
        })
    }
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    fn compare(self, a: &Ticket, b: &Ticket) -> Ordering {
        match self {
            Self::Newest => b.pickup_date.cmp(&a.pickup_date),
            Self::Oldest => a.pickup_date.cmp(&b.pickup_date),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            _ => Err(ParseError {
                expected: "`newest` or `oldest`",
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error)]
#[display("expected {expected}")]
pub struct ParseError {
    expected: &'static str,
}

/// Current UI selection the displayed sequence is derived from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
    pub section: Section,
    pub status: StatusFilter,
    pub query: String,
    pub sort: SortOrder,
}

impl Selection {
    fn matches_query(&self, ticket: &Ticket) -> bool {
        if self.query.is_empty() {
            return true;
        }
        ticket
            .bag_number
            .to_lowercase()
            .contains(&self.query.to_lowercase())
            || short_date(ticket.pickup_date).contains(self.query.as_str())
    }
}

/// Applies section, status filter, search and sort, in that order.
///
/// Tickets with equal pickup dates keep their relative input order.
pub fn derive<'t>(
    tickets: &'t [Ticket],
    selection: &Selection,
) -> Vec<&'t Ticket> {
    tickets
        .iter()
        .filter(|t| selection.section.admits(t))
        .filter(|t| selection.status.admits(t))
        .filter(|t| selection.matches_query(t))
        .sorted_by(|a, b| selection.sort.compare(a, b))
        .collect()
}

/// Short `M/D/YYYY` rendering of `at`, in its own offset.
pub fn short_date(at: OffsetDateTime) -> String {
    let format =
        format_description!("[month padding:none]/[day padding:none]/[year]");
    at.format(format).unwrap_or_else(|_| {
        format!("{}/{}/{}", u8::from(at.month()), at.day(), at.year())
    })
}

/// Ticket counts over the unfiltered collection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub pending: usize,
    pub picked_up: usize,
    pub washed: usize,
    pub delivered: usize,
    pub total: usize,
}

impl Summary {
    pub fn of(tickets: &[Ticket]) -> Self {
        let counts = tickets.iter().map(|t| t.status).counts();
        let count = |s: Status| counts.get(&s).copied().unwrap_or_default();
        Self {
            pending: count(Status::Pending),
            picked_up: count(Status::PickedUp),
            washed: count(Status::Washed),
            delivered: count(Status::Delivered),
            total: tickets.len(),
        }
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Pending => self.pending,
            Status::PickedUp => self.picked_up,
            Status::Washed => self.washed,
            Status::Delivered => self.delivered,
        }
    }
}
