//! Entity structs for all gradewatch domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `gw-db` migrations).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip
//! and schema validation. `New*` structs are validated inputs for creation.

mod appointment;
mod grade;
mod period;
mod student;
mod subject;
mod tutor;

pub use appointment::{Appointment, AppointmentStats, NewAppointment};
pub use grade::{Grade, GradeRecord, NewGrade};
pub use period::{NewPeriod, Period};
pub use student::{LinkedStudent, MIN_PASSWORD_LEN, NewStudent, Student, StudentBrief};
pub use subject::{NewSubject, Subject};
pub use tutor::{LinkedTutor, NewTutor, Tutor, TutorLink, is_phone};
