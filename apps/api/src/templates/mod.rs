// CV template catalogue: CRUD over the cv_templates table.

pub mod handlers;
pub mod repository;
pub mod validation;
