use serde::{Deserialize, Serialize};

/// A street address as supplied by the caller. Immutable once constructed;
/// all derived keys go through [`Address::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address_line: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
}

impl Address {
    #[must_use]
    pub fn new(address_line: &str, suburb: &str, state: &str, postcode: &str) -> Self {
        Self {
            address_line: address_line.to_owned(),
            suburb: suburb.to_owned(),
            state: state.to_owned(),
            postcode: postcode.to_owned(),
        }
    }

    /// Canonical form of the address: every field lower-cased and trimmed,
    /// internal whitespace runs collapsed to single spaces, fields joined
    /// with single spaces.
    ///
    /// Two addresses that differ only in case or surrounding/internal
    /// whitespace produce the same normalized string.
    #[must_use]
    pub fn normalized(&self) -> String {
        [
            &self.address_line,
            &self.suburb,
            &self.state,
            &self.postcode,
        ]
        .iter()
        .map(|field| collapse_whitespace(&field.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Cache key for one (address, source) pair: `normalized() + "::" + source_id`.
    #[must_use]
    pub fn cache_key(&self, source_id: &str) -> String {
        format!("{}::{source_id}", self.normalized())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.address_line, self.suburb, self.state, self.postcode
        )
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
