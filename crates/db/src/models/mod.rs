pub mod content;
pub mod group;

pub use content::ContentEntry;
pub use group::Group;
