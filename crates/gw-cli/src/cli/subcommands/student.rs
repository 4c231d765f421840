use clap::Subcommand;

/// Student commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    /// Register a student.
    Create {
        #[arg(long)]
        national_id: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        paternal_surname: String,
        #[arg(long)]
        maternal_surname: Option<String>,
        #[arg(long)]
        grade_level: i64,
        #[arg(long)]
        group: String,
        #[arg(long)]
        password: String,
    },
    /// List students.
    List,
    /// Replace a student's password.
    ResetPassword {
        id: i64,
        #[arg(long)]
        password: String,
    },
}
