use clap::{Args, Subcommand, ValueEnum};
use gw_core::enums::Role;

use crate::cli::subcommands::{
    GradeCommands, PeriodCommands, StudentCommands, SubjectCommands, TutorCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Create the database and print a fresh token secret.
    Init(InitArgs),
    /// Students.
    Student {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// Tutors and tutor-student links.
    Tutor {
        #[command(subcommand)]
        action: TutorCommands,
    },
    /// Subject catalog.
    Subject {
        #[command(subcommand)]
        action: SubjectCommands,
    },
    /// Grading periods.
    Period {
        #[command(subcommand)]
        action: PeriodCommands,
    },
    /// Grades.
    Grade {
        #[command(subcommand)]
        action: GradeCommands,
    },
    /// Full academic summary for a student.
    Summary(ReportArgs),
    /// Risk verdict for a student.
    Risk(ReportArgs),
    /// A tutor's students that are currently at risk.
    AtRisk(AtRiskArgs),
    /// Issue a session token for a tutor or administrator.
    Token(TokenArgs),
    /// Print the JSON schema of an API type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Bind address, overriding `server.bind`.
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Do not generate a token secret.
    #[arg(long)]
    pub no_secret: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    pub student_id: i64,
    /// Restrict to one grading period id.
    #[arg(long)]
    pub period: Option<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct AtRiskArgs {
    pub tutor_id: i64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RoleArg {
    Student,
    Tutor,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Student => Self::Student,
            RoleArg::Tutor => Self::Tutor,
            RoleArg::Admin => Self::Admin,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct TokenArgs {
    #[arg(long, value_enum)]
    pub role: RoleArg,
    /// Principal id (student, tutor or admin).
    #[arg(long)]
    pub id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: summary, risk-report, grade-report, at-risk, student, new-student,
    /// new-appointment, appointment, failure.
    pub type_name: String,
}
