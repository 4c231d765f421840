//! Repository modules implementing the store operations for every entity.
//!
//! Each module adds methods to `SchoolDb` via `impl SchoolDb` blocks.

pub mod appointment;
pub mod grade;
pub mod period;
pub mod student;
pub mod subject;
pub mod tutor;
