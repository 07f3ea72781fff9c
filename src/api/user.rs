use std::str::FromStr;

use derive_more::derive::{Display, Error, From};
use serde::{Deserialize, Serialize};

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
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(u64);

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[display("student")]
    Student,
    #[display("staff")]
    Staff,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "staff",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "staff" => Ok(Self::Staff),
            _ => Err(UnknownRole),
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error)]
#[display("expected `student` or `staff`")]
pub struct UnknownRole;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            "OTHER" => Ok(Self::Other),
            _ => Err(UnknownGender),
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error)]
#[display("expected `male`, `female` or `other`")]
pub struct UnknownGender;

/// Student owning a ticket.
///
/// `details` is only present when the backend denormalizes the profile into
/// the ticket payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Student {
    pub id: Id,
    pub details: Option<StudentDetails>,
}

impl Student {
    pub fn name(&self) -> Option<&str> {
        self.details.as_ref().map(|d| d.name.as_str())
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    pub name: String,
    pub email: String,
    pub gender: Option<Gender>,
    #[serde(
        default,
        deserialize_with = "crate::api::bag_number::option::deserialize"
    )]
    pub bag_number: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub bag_number: String,
    pub gender: Gender,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StaffRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}
