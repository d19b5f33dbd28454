use serde::{Deserialize, Serialize};

const UNKNOWN_PARTY_TYPE: &str = "Unknown";

/// A party to a case (plaintiff, defendant, petitioner, ...).
///
/// Owned by its [`LegalCase`](crate::LegalCase); replaced wholesale with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PartyInput")]
pub struct Party {
    pub name: String,

    #[serde(rename = "type")]
    pub party_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attorney: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub atty_phone: Option<String>,
}

impl Party {
    pub fn new(name: impl Into<String>, party_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            party_type: party_type.into(),
            attorney: None,
            atty_phone: None,
        }
    }

    pub fn with_attorney(mut self, attorney: impl Into<String>, phone: Option<&str>) -> Self {
        self.attorney = non_blank(Some(attorney.into()));
        self.atty_phone = non_blank(phone.map(str::to_string));
        self
    }
}

/// Wire shape accepted for a party.
///
/// Crawled records sometimes split the name into parts and carry the role as
/// "Party Association" instead of `type`.
#[derive(Deserialize)]
struct PartyInput {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    party_type: Option<String>,
    #[serde(default)]
    attorney: Option<String>,
    #[serde(default)]
    atty_phone: Option<String>,
    #[serde(default, rename = "First Name", alias = "first_name")]
    first_name: Option<String>,
    #[serde(default, rename = "Middle Name", alias = "middle_name")]
    middle_name: Option<String>,
    #[serde(default, rename = "Last Name", alias = "last_name")]
    last_name: Option<String>,
    #[serde(default, rename = "Party Association", alias = "party_association")]
    party_association: Option<String>,
}

impl From<PartyInput> for Party {
    fn from(input: PartyInput) -> Self {
        let name = non_blank(input.name).unwrap_or_else(|| {
            [input.first_name, input.middle_name, input.last_name]
                .into_iter()
                .filter_map(non_blank)
                .collect::<Vec<_>>()
                .join(" ")
        });

        let party_type = non_blank(input.party_type)
            .or_else(|| non_blank(input.party_association))
            .unwrap_or_else(|| UNKNOWN_PARTY_TYPE.to_string());

        Self {
            name,
            party_type,
            attorney: non_blank(input.attorney),
            atty_phone: non_blank(input.atty_phone),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
