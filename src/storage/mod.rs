//! Storage layer for pomoclock.
//!
//! `SQLite` persistence for the history of completed work sessions.

mod database;
mod migrations;

pub use database::Database;
