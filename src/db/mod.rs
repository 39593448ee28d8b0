pub mod repositories;
pub mod translate;
