//! Query options understood by Nest Utilities backends.
//!
//! Every [`QueryOption`] expands into one or more `(name, value)` pairs via
//! [`ToQueryPairs`]. Pairs keep their emission order; list-valued options
//! (`populate[]`, `select[]`, `sort[]`) repeat the same name.
//!
//! # Example
//!
//! ```
//! use nest_client_core::{QueryOption, SortOrder, ToQueryPairs};
//!
//! let pairs = QueryOption::SortBy {
//!     field: "name".to_string(),
//!     order: SortOrder::Descending,
//! }
//! .to_query_pairs();
//! assert_eq!(pairs, vec![("sort[]".to_string(), "-name".to_string())]);
//! ```

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Trait for types that can be converted to query parameter pairs.
pub trait ToQueryPairs {
    /// Convert this value to an ordered list of `(name, value)` pairs.
    fn to_query_pairs(&self) -> Vec<(String, String)>;
}

// ============================================================================
// Sorting
// ============================================================================

/// Direction of a `sort[]` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Sort from low to high.
    #[default]
    Ascending,
    /// Sort from high to low; the field is sent with a `-` prefix.
    Descending,
}

// ============================================================================
// Matching
// ============================================================================

/// Set of regex flags for [`QueryOption::MatchRegex`].
///
/// Flags combine with `|`. The rendered flag string always lists them in the
/// order `g`, `i`, `m`, `s`, `u`, whatever order they were combined in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchingOptions(u8);

impl MatchingOptions {
    /// Find all matches rather than stopping at the first (`g`).
    pub const GLOBAL: Self = Self(1);
    /// Case-insensitive matching (`i`).
    pub const CASE_INSENSITIVE: Self = Self(1 << 1);
    /// `^` and `$` match at line boundaries (`m`).
    pub const MULTI_LINE: Self = Self(1 << 2);
    /// `.` also matches `\n` (`s`).
    pub const SINGLE_LINE: Self = Self(1 << 3);
    /// Full Unicode support (`u`).
    pub const UNICODE: Self = Self(1 << 4);

    const FLAGS: [(Self, char); 5] = [
        (Self::GLOBAL, 'g'),
        (Self::CASE_INSENSITIVE, 'i'),
        (Self::MULTI_LINE, 'm'),
        (Self::SINGLE_LINE, 's'),
        (Self::UNICODE, 'u'),
    ];

    /// No flags.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns `true` if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every flag of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Render the flag string sent as `$options`.
    #[must_use]
    pub fn flags(self) -> String {
        Self::FLAGS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, letter)| *letter)
            .collect()
    }
}

impl BitOr for MatchingOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MatchingOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for MatchingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MatchingOptions").field(&self.flags()).finish()
    }
}

// ============================================================================
// Query Options
// ============================================================================

/// A single query option of the Nest Utilities query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOption {
    /// Populate references to other collections.
    Populate(Vec<String>),
    /// Restrict the fields of the results; dots select nested fields
    /// (e.g. `brewers.name`).
    Select(Vec<String>),
    /// Sort ascending on each field, in order.
    Sort(Vec<String>),
    /// Sort on one field in the given direction.
    SortBy {
        /// Field to sort on.
        field: String,
        /// Direction.
        order: SortOrder,
    },
    /// Match a field against an exact, case-sensitive value.
    MatchExact {
        /// Field to match.
        field: String,
        /// Expected value.
        value: String,
    },
    /// Match a field against a regular expression.
    MatchRegex {
        /// Field to match.
        field: String,
        /// Regular expression.
        value: String,
        /// Regex flags; `None` sends no `$options` pair.
        options: Option<MatchingOptions>,
    },
    /// Skip the first `n` results.
    Offset(i64),
    /// Return at most `n` results.
    Limit(i64),
    /// Keep one result per distinct value of a field.
    Distinct(String),
    /// Randomize the order of the results; takes priority over sorting.
    Random,
}

fn repeated(name: &str, fields: &[String]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|field| (name.to_string(), field.clone()))
        .collect()
}

impl ToQueryPairs for QueryOption {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        match self {
            Self::Populate(fields) => repeated("populate[]", fields),
            Self::Select(fields) => repeated("select[]", fields),
            Self::Sort(fields) => repeated("sort[]", fields),
            Self::SortBy { field, order } => {
                let value = match order {
                    SortOrder::Ascending => field.clone(),
                    SortOrder::Descending => format!("-{field}"),
                };
                vec![("sort[]".to_string(), value)]
            }
            Self::MatchExact { field, value } => vec![(format!("match[{field}]"), value.clone())],
            Self::MatchRegex {
                field,
                value,
                options,
            } => {
                let mut pairs = Vec::with_capacity(2);
                if let Some(options) = options {
                    pairs.push((format!("match[{field}][$options]"), options.flags()));
                }
                pairs.push((format!("match[{field}][$regex]"), value.clone()));
                pairs
            }
            Self::Offset(amount) => vec![("offset".to_string(), amount.to_string())],
            Self::Limit(amount) => vec![("limit".to_string(), amount.to_string())],
            Self::Distinct(field) => vec![("distinct".to_string(), field.clone())],
            Self::Random => vec![("random".to_string(), "true".to_string())],
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Characters escaped in query names and values.
///
/// Brackets, `$` and `-` stay literal so the query language remains readable
/// on the wire (`sort[]=-name`, `match[name][$regex]=...`).
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Render pairs as a query string (without the leading `?`).
#[must_use]
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(name, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
