//! # Tutorial: Talking to a Nest Utilities backend
//!
//! Learn to read and write documents step by step.
//!
//! ## Chapters
//!
//! 1. [Getting Started][chapter_0] - A service, a list and a single read
//! 2. [Query Options][chapter_1] - Populate, select, sort, match and paging
//! 3. [Errors & Middleware][chapter_2] - Failures, decode errors and hooks
//!
//! Ready? Start with [Chapter 0: Getting Started][chapter_0].

pub mod chapter_0;
pub mod chapter_1;
pub mod chapter_2;
