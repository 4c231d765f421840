use clap::Subcommand;

/// Subject catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SubjectCommands {
    /// Add a subject.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
    },
    /// List subjects.
    List,
}

/// Grading period commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PeriodCommands {
    /// Add a grading period.
    Create {
        #[arg(long)]
        number: i64,
        #[arg(long)]
        name: String,
    },
    /// List grading periods.
    List,
}
