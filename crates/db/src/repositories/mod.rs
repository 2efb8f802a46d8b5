//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or any executor) as the first argument.

pub mod project_repo;
pub mod template_attribute_repo;
pub mod template_repo;

pub use project_repo::ProjectRepo;
pub use template_attribute_repo::TemplateAttributeRepo;
pub use template_repo::TemplateRepo;
