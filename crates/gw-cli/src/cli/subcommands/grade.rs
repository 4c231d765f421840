use clap::Subcommand;

/// Grade commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GradeCommands {
    /// Record a grade for a student, subject and period. Corrections are new rows.
    Record {
        #[arg(long)]
        student: i64,
        #[arg(long)]
        subject: i64,
        #[arg(long)]
        period: i64,
        #[arg(long)]
        value: f64,
    },
}
