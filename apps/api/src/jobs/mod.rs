// Job search: CV -> profile -> model-generated query -> search engine -> filtered offers.

pub mod filter;
pub mod handlers;
pub mod prompts;
pub mod service;
