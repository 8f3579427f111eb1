//! Listing order - a closed set of sort keys instead of a raw column
//! pass-through from the query string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Columns an article listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    CreatedAt,
    Views,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::CreatedAt => "created_at",
            SortKey::Views => "views",
        }
    }
}

/// A validated ordering for article listings.
///
/// Parsed from the `sort` query parameter; a leading `-` means descending,
/// e.g. `views` or `-created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleOrder {
    pub key: SortKey,
    pub descending: bool,
}

impl ArticleOrder {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            descending: true,
        }
    }
}

impl FromStr for ArticleOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, descending) = match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        let key = match field {
            "title" => SortKey::Title,
            "created_at" => SortKey::CreatedAt,
            "views" => SortKey::Views,
            other => {
                return Err(DomainError::Validation(format!(
                    "unknown sort field: {other}"
                )));
            }
        };

        Ok(Self { key, descending })
    }
}

impl fmt::Display for ArticleOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-")?;
        }
        f.write_str(self.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ascending_fields() {
        let order: ArticleOrder = "title".parse().unwrap();
        assert_eq!(order.key, SortKey::Title);
        assert!(!order.descending);
    }

    #[test]
    fn parses_descending_prefix() {
        let order: ArticleOrder = "-views".parse().unwrap();
        assert_eq!(order.key, SortKey::Views);
        assert!(order.descending);
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = "password_hash".parse::<ArticleOrder>();
        assert!(matches!(result, Err(DomainError::Validation(_))));

        // A bare "-" is not an ordering either.
        assert!("-".parse::<ArticleOrder>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for s in ["title", "-title", "created_at", "-views"] {
            let order: ArticleOrder = s.parse().unwrap();
            assert_eq!(order.to_string(), s);
        }
    }
}
