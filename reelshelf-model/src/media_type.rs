use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaKind {
    /// Feature film
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "MOVIE"))]
    Movie,
    /// Episodic series
    #[cfg_attr(feature = "serde", serde(rename = "TV_SHOW"))]
    TvShow,
}

impl MediaKind {
    pub fn all() -> &'static [MediaKind] {
        &[MediaKind::Movie, MediaKind::TvShow]
    }

    /// Value used on the wire and in the `type` query parameter
    pub fn api_name(&self) -> &'static str {
        match self {
            MediaKind::Movie => "MOVIE",
            MediaKind::TvShow => "TV_SHOW",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "Movie",
            MediaKind::TvShow => "TV Show",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MediaKind {
    type Err = ModelError;

    /// Accepts the wire names as well as the loose spellings a user types.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "MOVIE" | "MOVIES" | "FILM" => Ok(MediaKind::Movie),
            "TV_SHOW" | "TV" | "SHOW" | "SERIES" => Ok(MediaKind::TvShow),
            _ => Err(ModelError::UnknownMediaKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_and_loose_names() {
        assert_eq!("MOVIE".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("tv-show".parse::<MediaKind>().unwrap(), MediaKind::TvShow);
        assert_eq!("series".parse::<MediaKind>().unwrap(), MediaKind::TvShow);
        assert!("podcast".parse::<MediaKind>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&MediaKind::TvShow).unwrap();
        assert_eq!(json, "\"TV_SHOW\"");
    }
}
