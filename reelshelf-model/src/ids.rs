use crate::error::ModelError;
use std::str::FromStr;

/// Server-assigned identity of a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn new(raw: i64) -> Self {
        RecordId(raw)
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// Ids issued by the backend are always positive.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for RecordId {
    fn from(raw: i64) -> Self {
        RecordId(raw)
    }
}

impl FromStr for RecordId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(RecordId)
            .map_err(|_| ModelError::InvalidRecord(format!("not a record id: {s:?}")))
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an uploaded image (poster or gallery entry).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ImageId(pub i64);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_parses_trimmed_input() {
        assert_eq!(" 42 ".parse::<RecordId>().unwrap(), RecordId(42));
        assert!("forty-two".parse::<RecordId>().is_err());
    }

    #[test]
    fn only_positive_ids_are_valid() {
        assert!(RecordId(1).is_valid());
        assert!(!RecordId(0).is_valid());
        assert!(!RecordId(-3).is_valid());
    }
}
