//! quizkit-core — Quiz catalog, answer grading, and statistics.
//!
//! This crate defines the data model, the read-only quiz catalog, and the
//! pure grading functions that the rest of quizkit builds on.

pub mod answer;
pub mod attempt;
pub mod catalog;
pub mod error;
pub mod grading;
pub mod listing;
pub mod model;
pub mod parser;
pub mod progress;
pub mod statistics;
pub mod time;
pub mod user;

#[cfg(test)]
mod fixtures;
