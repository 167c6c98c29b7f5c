//! Test module for annogen
//!
//! Registry, dispatch and merge behavior, plus property-based tests for the
//! directive parser.

#[cfg(test)]
pub mod support;
