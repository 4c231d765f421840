mod catalog;
mod grade;
mod student;
mod tutor;

pub use catalog::{PeriodCommands, SubjectCommands};
pub use grade::GradeCommands;
pub use student::StudentCommands;
pub use tutor::TutorCommands;
