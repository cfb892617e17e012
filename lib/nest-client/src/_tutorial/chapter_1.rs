//! # Chapter 1: Query Options
//!
//! Nest backends read their query vocabulary from the query string. Each
//! chain method appends its parameters in call order; nothing is reordered
//! or deduplicated.
//!
//! | Method | Query |
//! |--------|-------|
//! | `.populate(["brewers"])` | `populate[]=brewers` |
//! | `.select(["name", "brewers.name"])` | `select[]=name&select[]=brewers.name` |
//! | `.sort(["name"])` | `sort[]=name` |
//! | `.sort_by("abv", SortOrder::Descending)` | `sort[]=-abv` |
//! | `.match_exact("style", "IPA")` | `match[style]=IPA` |
//! | `.match_regex("name", "^Du")` | `match[name][$regex]=^Du` |
//! | `.match_regex_with("name", "du", MatchingOptions::CASE_INSENSITIVE)` | `match[name][$options]=i&match[name][$regex]=du` |
//! | `.offset(20)` | `offset=20` |
//! | `.limit(10)` | `limit=10` |
//! | `.distinct("style")` | `distinct=style` |
//! | `.random()` | `random=true` |
//!
//! ## Example
//!
//! ```ignore
//! use nest_client::prelude::*;
//!
//! let page = beers
//!     .read()
//!     .populate(["brewers"])
//!     .match_regex_with(
//!         "name",
//!         "tripel",
//!         MatchingOptions::CASE_INSENSITIVE | MatchingOptions::MULTI_LINE,
//!     )
//!     .sort_by("name", SortOrder::Ascending)
//!     .offset(20)
//!     .limit(10)
//!     .fetch()
//!     .await?;
//! ```
//!
//! Regex flags are always rendered in the order `g`, `i`, `m`, `s`, `u`.
//! `offset` and `limit` are sent as given, negative values included.
//!
//! ## Keeping the Builder
//!
//! Use [`send`](crate::RequestBuilder::send) instead of `fetch` to keep the
//! builder and look at the raw body afterwards:
//!
//! ```ignore
//! let mut request = beers.read().limit(1);
//! let first = request.send().await?;
//! println!("{first:?} from {}", request.raw_response()?);
//! ```
//!
//! A builder sends once. Sending it again, or chaining on it after `send`,
//! fails with [`Misuse`](crate::Misuse).
//!
//! ## Next Steps
//!
//! - [Chapter 2: Errors & Middleware][super::chapter_2]
