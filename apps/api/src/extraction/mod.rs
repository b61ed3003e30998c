// CV extraction: uploaded document -> vision model -> StructuredCv.
// The parser and profile derivation are pure; only service.rs talks to the model.

pub mod cv;
pub mod handlers;
pub mod profile;
pub mod prompts;
pub mod service;
pub mod upload;
