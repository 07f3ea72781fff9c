pub mod ticket;
pub mod user;

use serde::{Deserialize, Serialize};

pub use self::{ticket::Ticket, user::Student};

/// Body the backend attaches to rejected requests.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Bag numbers arrive as text or as bare integers; both decode to text.
pub(crate) mod bag_number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(i64),
    }

    impl From<Label> for String {
        fn from(label: Label) -> Self {
            match label {
                Label::Text(text) => text,
                Label::Number(n) => n.to_string(),
            }
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<String, D::Error> {
        Label::deserialize(de).map(String::from)
    }

    pub(crate) mod option {
        use serde::{Deserialize, Deserializer};

        use super::Label;

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            de: D,
        ) -> Result<Option<String>, D::Error> {
            Ok(Option::<Label>::deserialize(de)?.map(String::from))
        }
    }
}
