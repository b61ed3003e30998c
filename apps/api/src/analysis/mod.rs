// Skill-gap analysis: model verdict on CV vs. job description, reconciled into formation
// recommendations and improvement advice.
// Model calls go through llm_client; formation searches go through the FormationSearch seam.

pub mod formations;
pub mod handlers;
pub mod prompts;
pub mod reconcile;
pub mod service;
pub mod skills;
