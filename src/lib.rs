pub mod classify;
pub mod config;
pub mod error;
pub mod exec;
pub mod outcome;
pub mod render;
pub mod repo;
pub mod sync;

pub use classify::CommandResult;
pub use outcome::{Detail, Outcome, OutcomeCode, Severity};
pub use repo::RepoContext;
pub use sync::Syncer;
