//! [`AcademicRecords`] over the libSQL store.

use gw_core::entities::{GradeRecord, LinkedStudent, LinkedTutor, Student};
use gw_core::errors::CoreError;
use gw_core::records::{AcademicRecords, PeriodScope};

use crate::SchoolDb;

impl AcademicRecords for SchoolDb {
    async fn find_student(&self, student_id: i64) -> Result<Option<Student>, CoreError> {
        Ok(self.get_student(student_id).await?)
    }

    async fn grades_for(
        &self,
        student_id: i64,
        scope: PeriodScope,
    ) -> Result<Vec<GradeRecord>, CoreError> {
        Ok(self.grade_records(student_id, scope).await?)
    }

    async fn tutors_for(&self, student_id: i64) -> Result<Vec<LinkedTutor>, CoreError> {
        Ok(self.linked_tutors(student_id).await?)
    }

    async fn students_for_tutor(&self, tutor_id: i64) -> Result<Vec<LinkedStudent>, CoreError> {
        Ok(self.linked_students(tutor_id).await?)
    }

    async fn link_exists(&self, tutor_id: i64, student_id: i64) -> Result<bool, CoreError> {
        Ok(self.has_link(tutor_id, student_id).await?)
    }
}
