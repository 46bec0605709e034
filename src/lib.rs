//! Paginated PDF reports for warehouse management records.
//!
//! The crate turns in-memory lists of [`model::User`], [`model::Product`],
//! [`model::Warehouse`] and [`model::Task`] records into complete PDF
//! documents through the entry points on [`report::ReportGenerator`].  The
//! task report can nest the records associated with each task and append a
//! pie chart of the task-state distribution.

pub mod builder;
pub mod chart;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod report;
pub mod table;
