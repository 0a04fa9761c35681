pub mod content_repo;
pub mod group_repo;

pub use content_repo::ContentRepo;
pub use group_repo::GroupRepo;
