//! Data types and associated functions and methods

use hashbrown::HashMap;
use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum_macros::Display;
use validator::{Validate, ValidationError};

/// A single client of the registry.
///
/// Records are loaded once at startup and never mutated afterwards.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    /// Unique, opaque identifier
    pub id: String,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Mobile phone number, compared as raw text
    pub mobile_phone: String,
    /// Nationality, used to group statistics
    pub nationality: String,
    /// Race (display only)
    pub race: String,
    /// Postal address (display only)
    pub address: String,
    /// Account balance. Non-negative by convention.
    pub account_balance: f64,
}

/// Searchable fields of a [ClientRecord]
///
/// The `Display` form of each variant is the field's name in the JSON representation of a record.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "camelCase")]
pub enum ClientField {
    Id,
    Name,
    Email,
    MobilePhone,
    Nationality,
    Race,
    Address,
    AccountBalance,
}

impl ClientField {
    /// Every field, in record order.
    pub const ALL: [ClientField; 8] = [
        Self::Id,
        Self::Name,
        Self::Email,
        Self::MobilePhone,
        Self::Nationality,
        Self::Race,
        Self::Address,
        Self::AccountBalance,
    ];

    /// Returns the field with the given JSON name, if there is one.
    ///
    /// Names are matched exactly, e.g. `mobilePhone` rather than `mobilephone`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "mobilePhone" => Some(Self::MobilePhone),
            "nationality" => Some(Self::Nationality),
            "race" => Some(Self::Race),
            "address" => Some(Self::Address),
            "accountBalance" => Some(Self::AccountBalance),
            _ => None,
        }
    }

    /// Returns the string form of this field's value in `record`.
    ///
    /// Numeric fields use their shortest decimal form (`1500`, `1500.5`), not a currency format.
    pub fn value(self, record: &ClientRecord) -> Cow<'_, str> {
        match self {
            Self::Id => Cow::Borrowed(&record.id),
            Self::Name => Cow::Borrowed(&record.name),
            Self::Email => Cow::Borrowed(&record.email),
            Self::MobilePhone => Cow::Borrowed(&record.mobile_phone),
            Self::Nationality => Cow::Borrowed(&record.nationality),
            Self::Race => Cow::Borrowed(&record.race),
            Self::Address => Cow::Borrowed(&record.address),
            Self::AccountBalance => Cow::Owned(record.account_balance.to_string()),
        }
    }
}

/// Query string parameters of a simple search
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct SearchParams {
    /// Text to search for. Required and non-empty.
    pub query: Option<String>,
    /// Field to search. Absent or `all` searches every field.
    pub field: Option<String>,
}

/// Criteria of an advanced search
///
/// Every supplied criterion must hold for a record to match. Empty strings are treated as absent.
// NOTE: Balance bounds are accepted as JSON numbers or numeric strings, since browser forms submit
// numbers as text.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_criteria"))]
pub struct AdvancedSearchCriteria {
    /// Case-insensitive substring of the name
    #[serde(default)]
    pub name: Option<String>,
    /// Case-insensitive substring of the email address
    #[serde(default)]
    pub email: Option<String>,
    /// Exact substring of the mobile phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Case-insensitive substring of the nationality
    #[serde(default)]
    pub nationality: Option<String>,
    /// Inclusive lower bound on the account balance
    #[serde(default, deserialize_with = "deserialize_balance")]
    pub min_balance: Option<f64>,
    /// Inclusive upper bound on the account balance
    #[serde(default, deserialize_with = "deserialize_balance")]
    pub max_balance: Option<f64>,
}

impl AdvancedSearchCriteria {
    /// Returns true if no criterion constrains the search.
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.nationality]
            .iter()
            .all(|text| text.as_deref().map_or(true, str::is_empty))
            && self.min_balance.is_none()
            && self.max_balance.is_none()
    }
}

/// A balance bound as it may appear in a request body.
#[derive(Deserialize)]
#[serde(untagged)]
enum BalanceBound {
    Number(f64),
    Text(String),
}

/// Deserialise an optional balance bound from a number or numeric string.
///
/// An empty string is treated as an absent bound.
fn deserialize_balance<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BalanceBound>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BalanceBound::Number(value)) => Ok(Some(value)),
        Some(BalanceBound::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(BalanceBound::Text(text)) => text.trim().parse::<f64>().map(Some).map_err(|_| {
            de::Error::invalid_value(Unexpected::Str(&text), &"a number or numeric string")
        }),
    }
}

/// Validate advanced search criteria
fn validate_criteria(criteria: &AdvancedSearchCriteria) -> Result<(), ValidationError> {
    for (name, bound) in [
        ("minBalance", criteria.min_balance),
        ("maxBalance", criteria.max_balance),
    ] {
        if let Some(bound) = bound {
            if !bound.is_finite() {
                let mut error = ValidationError::new("Balance bounds must be finite numbers");
                error.add_param(name.into(), &name);
                return Err(error);
            }
        }
    }
    Ok(())
}

/// Aggregate statistics over the whole registry
#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of clients
    pub total_clients: usize,
    /// Sum of account balances, to two decimal places
    pub total_balance: String,
    /// Mean account balance, to two decimal places. `0.00` for an empty registry.
    pub average_balance: String,
    /// Number of clients of each nationality. Iteration order is unspecified.
    pub nationality_distribution: HashMap<String, usize>,
    /// True if the registry holds no clients
    pub is_empty: bool,
}

/// Successful response carrying a list of items
#[derive(Debug, Deserialize, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    /// Number of items in `data`
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Return a ListResponse wrapping `data`
    pub fn new(data: Vec<T>) -> Self {
        ListResponse {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Successful response carrying a single item
#[derive(Debug, Deserialize, Serialize)]
pub struct ItemResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ItemResponse<T> {
    /// Return an ItemResponse wrapping `data`
    pub fn new(data: T) -> Self {
        ItemResponse {
            success: true,
            data,
        }
    }
}
