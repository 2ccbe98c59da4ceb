//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod contact_repo;
pub mod page_visit_repo;
pub mod plot_repo;
pub mod quiz_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use contact_repo::ContactRepo;
pub use page_visit_repo::PageVisitRepo;
pub use plot_repo::PlotRepo;
pub use quiz_repo::QuizRepo;
pub use user_repo::UserRepo;
