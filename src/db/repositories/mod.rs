pub mod contribution;
pub mod project;
pub mod user;

pub use contribution::ContributionRepository;
pub use project::ProjectRepository;
pub use user::{UserLookup, UserRepository};
