//! Shared test utilities for gw-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use gw_core::entities::{NewPeriod, NewStudent, NewSubject};

    use crate::SchoolDb;

    /// Fresh in-memory store with the schema applied.
    pub async fn test_db() -> SchoolDb {
        SchoolDb::open_local(":memory:").await.unwrap()
    }

    pub fn new_student(national_id: &str, first_name: &str, grade_level: i64, group: &str) -> NewStudent {
        NewStudent {
            national_id: national_id.into(),
            first_name: first_name.into(),
            paternal_surname: "Gomez".into(),
            maternal_surname: None,
            grade_level,
            group: group.into(),
            password: "secreto1".into(),
        }
    }

    /// Insert a student and return its id.
    pub async fn seed_student(db: &SchoolDb, national_id: &str, first_name: &str) -> i64 {
        db.create_student(&new_student(national_id, first_name, 2, "A"), "hash")
            .await
            .unwrap()
            .id
    }

    /// Insert subjects and periods, returning `(subject_ids, period_ids)`.
    pub async fn seed_catalog(
        db: &SchoolDb,
        subjects: &[(&str, &str)],
        periods: u32,
    ) -> (Vec<i64>, Vec<i64>) {
        let mut subject_ids = Vec::new();
        for (name, code) in subjects {
            let subject = db
                .create_subject(&NewSubject {
                    name: (*name).into(),
                    code: (*code).into(),
                })
                .await
                .unwrap();
            subject_ids.push(subject.id);
        }
        let mut period_ids = Vec::new();
        for number in 1..=periods {
            let period = db
                .create_period(&NewPeriod {
                    number: i64::from(number),
                    name: format!("Period {number}"),
                })
                .await
                .unwrap();
            period_ids.push(period.id);
        }
        (subject_ids, period_ids)
    }
}
