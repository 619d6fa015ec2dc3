pub mod errors;
pub mod persistence;
pub mod repository;
pub mod types;
pub mod validation;

pub use errors::GroupError;
pub use persistence::{groups_file_path, load_groups, save_groups};
pub use repository::GroupRepository;
pub use types::{Group, GroupUpdate, GroupsData};
pub use validation::validate_new_group;
