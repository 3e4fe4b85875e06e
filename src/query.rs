//! Search and aggregation over a [ClientStore].
//!
//! All operations are pure reads: they never modify the store, preserve store order in their
//! results and allocate a fresh result sequence per call.

use crate::models::{AdvancedSearchCriteria, ClientField, ClientRecord, Stats};
use crate::store::ClientStore;

use hashbrown::HashMap;

/// Field name that selects every field of a record.
pub const ALL_FIELDS: &str = "all";

/// The field(s) a simple search looks at
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldSelector {
    /// Every field of the record
    All,
    /// A single known field
    Field(ClientField),
    /// A field name that records do not have. Never matches.
    Unknown,
}

impl FieldSelector {
    /// Resolve an optional field name from a request.
    ///
    /// An absent name or [ALL_FIELDS] selects every field.
    pub fn parse(field: Option<&str>) -> Self {
        match field {
            None | Some(ALL_FIELDS) => Self::All,
            Some(name) => ClientField::from_name(name).map_or(Self::Unknown, Self::Field),
        }
    }

    fn matches(self, record: &ClientRecord, needle: &str) -> bool {
        match self {
            Self::All => ClientField::ALL
                .iter()
                .any(|field| contains_ignore_case(&field.value(record), needle)),
            Self::Field(field) => contains_ignore_case(&field.value(record), needle),
            Self::Unknown => false,
        }
    }
}

/// Case-insensitive substring test. `needle` must already be lower case.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Returns a text criterion in lower case, or None if it imposes no constraint.
fn lowercase_criterion(criterion: &Option<String>) -> Option<String> {
    criterion
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(str::to_lowercase)
}

/// Format an amount with two decimal places.
///
/// Exact halves of a cent round away from zero, and negative zero renders as `0.00`.
fn format_amount(amount: f64) -> String {
    let amount = if amount == 0.0 { 0.0 } else { amount };
    let cents = amount * 100.0;
    // An exact half cent is an odd multiple of 1/8, so scaling it by 100 is exact.
    if (amount * 8.0).fract() == 0.0 && cents.fract().abs() == 0.5 {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{:.2}", sign, (cents.abs() + 0.5) / 100.0);
    }
    format!("{:.2}", amount)
}

/// Read-only query operations over a borrowed [ClientStore].
///
/// Engines are cheap to create; one is typically created per request.
#[derive(Clone, Copy, Debug)]
pub struct QueryEngine<'a> {
    store: &'a ClientStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a QueryEngine over `store`.
    pub fn new(store: &'a ClientStore) -> Self {
        Self { store }
    }

    /// Returns every record in store order.
    pub fn all(&self) -> Vec<&'a ClientRecord> {
        self.store.records().iter().collect()
    }

    /// Returns the record with identifier `id`, if any.
    pub fn find_by_id(&self, id: &str) -> Option<&'a ClientRecord> {
        self.store.records().iter().find(|record| record.id == id)
    }

    /// Simple search.
    ///
    /// Returns the records where the selected field (or any field, if `field` is absent or
    /// `all`) contains `query`, ignoring case. An unknown field name matches nothing.
    ///
    /// # Arguments
    ///
    /// * `query`: Text to search for. Callers reject empty queries.
    /// * `field`: Optional field name
    pub fn search(&self, query: &str, field: Option<&str>) -> Vec<&'a ClientRecord> {
        let selector = FieldSelector::parse(field);
        let needle = query.to_lowercase();
        self.store
            .records()
            .iter()
            .filter(|record| selector.matches(record, &needle))
            .collect()
    }

    /// Advanced search.
    ///
    /// Returns the records satisfying every supplied criterion. Absent criteria impose no
    /// constraint, so empty criteria match every record.
    pub fn advanced_search(&self, criteria: &AdvancedSearchCriteria) -> Vec<&'a ClientRecord> {
        let name = lowercase_criterion(&criteria.name);
        let email = lowercase_criterion(&criteria.email);
        let nationality = lowercase_criterion(&criteria.nationality);
        // Phone numbers have no case.
        let phone = criteria.phone.as_deref().filter(|phone| !phone.is_empty());

        self.store
            .records()
            .iter()
            .filter(|record| {
                name.as_deref()
                    .map_or(true, |name| contains_ignore_case(&record.name, name))
                    && email
                        .as_deref()
                        .map_or(true, |email| contains_ignore_case(&record.email, email))
                    && phone.map_or(true, |phone| record.mobile_phone.contains(phone))
                    && nationality.as_deref().map_or(true, |nationality| {
                        contains_ignore_case(&record.nationality, nationality)
                    })
                    && criteria
                        .min_balance
                        .map_or(true, |min| record.account_balance >= min)
                    && criteria
                        .max_balance
                        .map_or(true, |max| record.account_balance <= max)
            })
            .collect()
    }

    /// Compute aggregate statistics over the whole store.
    ///
    /// An empty store yields zero totals, an average of `0.00` and `is_empty` set.
    pub fn compute_stats(&self) -> Stats {
        let records = self.store.records();
        let total_balance = records
            .iter()
            .fold(0.0, |total, record| total + record.account_balance);
        let average_balance = if records.is_empty() {
            0.0
        } else {
            total_balance / records.len() as f64
        };

        let mut nationality_distribution = HashMap::new();
        for record in records {
            *nationality_distribution
                .entry(record.nationality.clone())
                .or_insert(0) += 1;
        }

        Stats {
            total_clients: records.len(),
            total_balance: format_amount(total_balance),
            average_balance: format_amount(average_balance),
            nationality_distribution,
            is_empty: records.is_empty(),
        }
    }
}
