//! In-memory `AcademicRecords` used by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use gw_core::entities::{GradeRecord, LinkedStudent, LinkedTutor, Student};
use gw_core::errors::CoreError;
use gw_core::records::{AcademicRecords, PeriodScope};

pub struct FixtureGrade {
    pub student_id: i64,
    pub period_id: i64,
    pub record: GradeRecord,
}

pub struct FixtureLink {
    pub tutor_id: i64,
    pub student_id: i64,
    pub relation: &'static str,
}

#[derive(Default)]
pub struct MemoryRecords {
    pub students: Vec<Student>,
    pub grades: Vec<FixtureGrade>,
    pub tutors: Vec<LinkedTutor>,
    pub links: Vec<FixtureLink>,
    pub link_lookups: AtomicUsize,
}

pub fn student(id: i64, first_name: &str) -> Student {
    Student {
        id,
        national_id: format!("GOMJ0503{:02}HDFRRN09", id % 100),
        first_name: first_name.into(),
        paternal_surname: "Gomez".into(),
        maternal_surname: None,
        grade_level: 2,
        group: "A".into(),
        created_at: Utc::now(),
    }
}

pub fn tutor(id: i64) -> LinkedTutor {
    LinkedTutor {
        id,
        first_name: "Maria".into(),
        paternal_surname: "Lopez".into(),
        maternal_surname: None,
        phone: Some("5215512345678".into()),
        email: None,
        relation: String::new(),
    }
}

impl MemoryRecords {
    pub fn with_student(mut self, student: Student) -> Self {
        self.students.push(student);
        self
    }

    /// Add one grade per value, each in its own subject.
    pub fn with_grades(mut self, student_id: i64, period_id: i64, values: &[f64]) -> Self {
        for (i, value) in values.iter().enumerate() {
            let id = i64::try_from(self.grades.len()).unwrap() + 1;
            self.grades.push(FixtureGrade {
                student_id,
                period_id,
                record: GradeRecord {
                    id,
                    subject_name: format!("Subject {i}"),
                    subject_code: format!("S{i}"),
                    value: *value,
                    period_name: format!("Period {period_id}"),
                    period_number: u32::try_from(period_id).unwrap(),
                    recorded_at: Utc::now(),
                },
            });
        }
        self
    }

    pub fn with_link(mut self, tutor_id: i64, student_id: i64, relation: &'static str) -> Self {
        if !self.tutors.iter().any(|t| t.id == tutor_id) {
            self.tutors.push(tutor(tutor_id));
        }
        self.links.push(FixtureLink {
            tutor_id,
            student_id,
            relation,
        });
        self
    }

    pub fn lookups(&self) -> usize {
        self.link_lookups.load(Ordering::SeqCst)
    }
}

impl AcademicRecords for MemoryRecords {
    async fn find_student(&self, student_id: i64) -> Result<Option<Student>, CoreError> {
        Ok(self.students.iter().find(|s| s.id == student_id).cloned())
    }

    async fn grades_for(
        &self,
        student_id: i64,
        scope: PeriodScope,
    ) -> Result<Vec<GradeRecord>, CoreError> {
        Ok(self
            .grades
            .iter()
            .filter(|g| g.student_id == student_id)
            .filter(|g| scope.period_id().is_none_or(|p| p == g.period_id))
            .map(|g| g.record.clone())
            .collect())
    }

    async fn tutors_for(&self, student_id: i64) -> Result<Vec<LinkedTutor>, CoreError> {
        Ok(self
            .links
            .iter()
            .filter(|l| l.student_id == student_id)
            .filter_map(|l| {
                self.tutors.iter().find(|t| t.id == l.tutor_id).map(|t| LinkedTutor {
                    relation: l.relation.to_string(),
                    ..t.clone()
                })
            })
            .collect())
    }

    async fn students_for_tutor(&self, tutor_id: i64) -> Result<Vec<LinkedStudent>, CoreError> {
        Ok(self
            .links
            .iter()
            .filter(|l| l.tutor_id == tutor_id)
            .filter_map(|l| {
                self.students
                    .iter()
                    .find(|s| s.id == l.student_id)
                    .map(|s| LinkedStudent {
                        id: s.id,
                        national_id: s.national_id.clone(),
                        first_name: s.first_name.clone(),
                        paternal_surname: s.paternal_surname.clone(),
                        maternal_surname: s.maternal_surname.clone(),
                        grade_level: s.grade_level,
                        group: s.group.clone(),
                        relation: l.relation.to_string(),
                    })
            })
            .collect())
    }

    async fn link_exists(&self, tutor_id: i64, student_id: i64) -> Result<bool, CoreError> {
        self.link_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .links
            .iter()
            .any(|l| l.tutor_id == tutor_id && l.student_id == student_id))
    }
}
