//! HTTP handlers, one module per resource.

pub mod admin_applications;
pub mod admin_plots;
pub mod admin_quizzes;
pub mod applications;
pub mod auth;
pub mod contact;
pub mod plots;
pub mod quiz;
pub mod uploads;
pub mod visits;
