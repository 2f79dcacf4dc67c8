//! Expose docnav's internal API for use in integration tests. It is not meant
//! as a stable library surface; use `docnav-commonmark` for that.
pub mod cli;
pub mod error;
pub mod html;
pub mod pages;
