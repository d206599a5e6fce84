use std::cmp::Reverse;
use std::collections::BTreeSet;

use reelshelf_model::Record;

/// Distinct filter values present in the loaded records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    /// Newest first
    pub years: Vec<i32>,
    /// Alphabetical
    pub directors: Vec<String>,
}

/// Derive filter options from the aggregated list. Blank directors and
/// unset (zero) years are left out.
pub fn derive_facets(records: &[Record]) -> Facets {
    let years: BTreeSet<Reverse<i32>> = records
        .iter()
        .filter_map(Record::year_facet)
        .map(Reverse)
        .collect();
    let directors: BTreeSet<&str> = records.iter().filter_map(Record::director_facet).collect();

    Facets {
        years: years.into_iter().map(|Reverse(y)| y).collect(),
        directors: directors.into_iter().map(str::to_string).collect(),
    }
}
