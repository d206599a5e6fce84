//! Client-side column sorting for the catalog table.
//!
//! Sorting never reorders the aggregated list itself; it produces a vector of
//! indices into it so fetch order stays intact underneath.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::media::Record;

/// Table columns a user can sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Id,
    Title,
    Director,
    ReleaseYear,
    MediaType,
}

impl SortColumn {
    pub fn all() -> &'static [SortColumn] {
        use SortColumn::*;
        &[Id, Title, Director, ReleaseYear, MediaType]
    }

    pub fn header(&self) -> &'static str {
        match self {
            SortColumn::Id => "ID",
            SortColumn::Title => "Title",
            SortColumn::Director => "Director",
            SortColumn::ReleaseYear => "Release Year",
            SortColumn::MediaType => "Type",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

impl FromStr for SortColumn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "id" => Ok(SortColumn::Id),
            "title" => Ok(SortColumn::Title),
            "director" => Ok(SortColumn::Director),
            "year" | "releaseyear" => Ok(SortColumn::ReleaseYear),
            "type" | "mediatype" => Ok(SortColumn::MediaType),
            _ => Err(ModelError::UnknownSortColumn(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Active sort of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    pub fn ascending(column: SortColumn) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: SortColumn) -> Self {
        Self::new(column, SortDirection::Descending)
    }

    /// Compare two records on this column. Ties fall back to id so the
    /// resulting order is total.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let primary = match self.column {
            SortColumn::Id => a.id.cmp(&b.id),
            SortColumn::Title => cmp_text(&a.title, &b.title),
            SortColumn::Director => cmp_text(&a.director, &b.director),
            SortColumn::ReleaseYear => a.release_year.cmp(&b.release_year),
            SortColumn::MediaType => a.media_type.cmp(&b.media_type),
        };
        let ordered = primary.then_with(|| a.id.cmp(&b.id));
        match self.direction {
            SortDirection::Ascending => ordered,
            SortDirection::Descending => ordered.reverse(),
        }
    }

    /// Indices into `records` in display order.
    pub fn sorted_indices(&self, records: &[Record]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..records.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&records[a], &records[b]));
        indices
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media_type::MediaKind;

    fn sample() -> Vec<Record> {
        vec![
            Record::new(3, "zebra", "Nolan", 2010, MediaKind::Movie),
            Record::new(1, "Alpha", "Bigelow", 2021, MediaKind::TvShow),
            Record::new(2, "beta", "Nolan", 1999, MediaKind::Movie),
        ]
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let records = sample();
        let order = SortSpec::ascending(SortColumn::Title).sorted_indices(&records);
        let titles: Vec<_> = order.iter().map(|&i| records[i].title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "beta", "zebra"]);
    }

    #[test]
    fn descending_year_sort() {
        let records = sample();
        let order = SortSpec::descending(SortColumn::ReleaseYear).sorted_indices(&records);
        let years: Vec<_> = order.iter().map(|&i| records[i].release_year).collect();
        assert_eq!(years, vec![2021, 2010, 1999]);
    }

    #[test]
    fn ties_break_on_id() {
        let records = sample();
        let order = SortSpec::ascending(SortColumn::Director).sorted_indices(&records);
        let ids: Vec<_> = order.iter().map(|&i| records[i].id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn parses_column_names() {
        assert_eq!("release_year".parse::<SortColumn>().unwrap(), SortColumn::ReleaseYear);
        assert_eq!("Type".parse::<SortColumn>().unwrap(), SortColumn::MediaType);
        assert!("rating".parse::<SortColumn>().is_err());
    }
}
