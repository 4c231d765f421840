use clap::Subcommand;

/// Tutor commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TutorCommands {
    /// Register a tutor.
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        paternal_surname: String,
        #[arg(long)]
        maternal_surname: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Link a tutor to a student.
    Link {
        tutor_id: i64,
        student_id: i64,
        #[arg(long, default_value = "tutor")]
        relation: String,
    },
    /// Remove a tutor-student link.
    Unlink { tutor_id: i64, student_id: i64 },
    /// Students linked to a tutor.
    Students { tutor_id: i64 },
}
