//! # drivetree-entity
//!
//! Domain entity models for DriveTree. Every struct in this crate
//! represents a database table row or a read view assembled from rows.
//! Row types additionally derive `sqlx::FromRow`.

pub mod file;
pub mod folder;
pub mod share;
