pub mod contribution;
pub mod project;
pub mod user;

pub use contribution::{Contribution, ContributionPublic, NewContribution};
pub use project::{NewProject, Project, ProjectPublic};
pub use user::{NewUserRecord, User, UserPublic};
