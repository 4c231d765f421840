//! # gw-core
//!
//! Core types and academic domain logic for gradewatch.
//!
//! This crate provides the foundational types shared across all gradewatch crates:
//! - Entity structs for students, subjects, periods, grades, tutors and appointments
//! - Status enums with state machine transitions
//! - National ID and new-record validation
//! - The academic-risk evaluator and grade aggregation
//! - The academic summary builder over the [`records::AcademicRecords`] store seam
//! - The access policy deciding who may read a student's data
//! - Response envelopes returned by the HTTP API

pub mod access;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod national_id;
pub mod records;
pub mod responses;
pub mod risk;
pub mod summary;
pub mod validation;
