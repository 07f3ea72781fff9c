use std::{fmt, str::FromStr};

use derive_more::derive::{Display, Error, From};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::api::user;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(u64);

impl Id {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Submitted by the student and waiting to be washed.
    Pending,

    /// Collected by the student after washing.
    PickedUp,

    /// Washed by staff and ready to be collected.
    Washed,

    /// Reserved: nothing transitions into this status.
    Delivered,
}

impl Status {
    pub const ALL: [Self; 4] =
        [Self::Pending, Self::PickedUp, Self::Washed, Self::Delivered];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::PickedUp => "PICKED_UP",
            Self::Washed => "WASHED",
            Self::Delivered => "DELIVERED",
        }
    }

    /// Human-readable badge text, e.g. `PICKED UP`.
    pub fn label(self) -> &'static str {
        match self {
            Self::PickedUp => "PICKED UP",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or(UnknownStatus)
    }
}

#[derive(Clone, Copy, Debug, Display, Error)]
#[display(
    "expected one of `pending`, `picked-up`, `washed` or `delivered`"
)]
pub struct UnknownStatus;

/// Per-category item counts of a laundry batch.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ItemCounts {
    pub shirts: u32,
    pub bottoms: u32,
    pub towels: u32,
    pub bedsheets: u32,
    pub others: u32,
}

impl ItemCounts {
    pub fn total(&self) -> u64 {
        [
            self.shirts,
            self.bottoms,
            self.towels,
            self.bedsheets,
            self.others,
        ]
        .into_iter()
        .map(u64::from)
        .sum()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "Wire", into = "Wire")]
pub struct Ticket {
    pub id: Id,
    pub bag_number: String,
    pub status: Status,
    pub items: ItemCounts,
    pub pickup_date: OffsetDateTime,
    pub delivery_date: Option<OffsetDateTime>,
    pub issue: Option<String>,
    pub student: user::Student,
}

impl Ticket {
    pub fn total_items(&self) -> u64 {
        self.items.total()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StatusUpdate {
    pub status: Status,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IssueUpdate {
    pub issue: String,
}

#[derive(Clone, Debug, Display, Error)]
pub enum DecodeError {
    #[display("`totalItems` is {found}, but item counts sum to {expected}")]
    TotalMismatch { expected: u64, found: u64 },
}

/// Ticket as the backend sends it.
///
/// Older backends nest the owner under `Student` instead of `student`;
/// both collapse into [`Ticket::student`].
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Wire {
    id: Id,
    #[serde(deserialize_with = "crate::api::bag_number::deserialize")]
    bag_number: String,
    status: Status,
    #[serde(flatten)]
    items: ItemCounts,
    #[serde(default)]
    total_items: Option<u64>,
    #[serde(with = "time::serde::rfc3339")]
    pickup_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    delivery_date: Option<OffsetDateTime>,
    #[serde(default)]
    issue: Option<String>,
    student_id: user::Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    student: Option<user::StudentDetails>,
    #[serde(default, rename = "Student", skip_serializing)]
    legacy_student: Option<user::StudentDetails>,
}

impl TryFrom<Wire> for Ticket {
    type Error = DecodeError;

    fn try_from(wire: Wire) -> Result<Self, Self::Error> {
        let expected = wire.items.total();
        if let Some(found) = wire.total_items.filter(|&t| t != expected) {
            return Err(DecodeError::TotalMismatch { expected, found });
        }

        Ok(Self {
            id: wire.id,
            bag_number: wire.bag_number,
            status: wire.status,
            items: wire.items,
            pickup_date: wire.pickup_date,
            delivery_date: wire.delivery_date,
            issue: wire.issue.filter(|text| !text.trim().is_empty()),
            student: user::Student {
                id: wire.student_id,
                details: wire.student.or(wire.legacy_student),
            },
        })
    }
}

impl From<Ticket> for Wire {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            bag_number: ticket.bag_number,
            status: ticket.status,
            total_items: Some(ticket.items.total()),
            items: ticket.items,
            pickup_date: ticket.pickup_date,
            delivery_date: ticket.delivery_date,
            issue: ticket.issue,
            student_id: ticket.student.id,
            student: ticket.student.details,
            legacy_student: None,
        }
    }
}
