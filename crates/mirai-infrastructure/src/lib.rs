//! Infrastructure layer: filesystem persistence for the research project.

pub mod json_project_repository;
pub mod paths;

pub use json_project_repository::JsonProjectRepository;
pub use paths::MiraiPaths;
