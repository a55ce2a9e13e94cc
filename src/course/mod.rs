pub mod language;
pub mod topic;
