//! Student profile dashboard: load a roster spreadsheet, check its headers,
//! search it, and turn one row into a profile with badges and charts.
//!
//! The `student-profile` binary wraps this library in an egui window.

pub mod config;
pub mod data;
pub mod state;
pub mod theme;
