// Prompt for generating a job-search engine query from a candidate profile.

use crate::extraction::profile::CvProfile;

pub const QUERY_GENERATION_PROMPT_TEMPLATE: &str = r#"Voici un CV :
{profile}
Génère une requête Google extrêmement optimisée pour trouver exactement des offres d'emploi correspondant à ce profil.
Utilise tous les opérateurs techniques disponibles pour Google Search afin d'améliorer la précision, notamment :
- `AND` pour combiner plusieurs compétences ou critères
- `OR` pour proposer plusieurs variantes de poste ou expressions
- `"` pour rechercher des expressions exactes
- Toute autre technique ou opérateur Google avancé pertinent pour maximiser la précision

La requête doit inclure :
- Poste adapté au CV
- Localisation : {location}
- Préciser si **présentiel** ou **remote/télétravail**, selon le type de travail
- Les compétences principales du CV
- Si le travail nécessite la présence physique (ex : commerce, vente, manutention), inclure explicitement `présentiel`
- {remote_instruction}
Ne donne **que la requête Google finale**, prête à copier-coller, sans aucune explication, et utilise si possible des parenthèses et opérateurs pour que Google interprète correctement les priorités (`AND`, `OR`, etc.)."#;

const INCLUDE_REMOTE: &str = "Si le travail peut être fait à distance (ex : développement, télétravail), \
    inclure `remote` ou `télétravail`";
const EXCLUDE_REMOTE: &str =
    "Exclure les postes en remote, se concentrer uniquement sur les postes présentiels";

/// One line per known profile field; empty fields are left out.
fn profile_lines(profile: &CvProfile) -> String {
    let mut lines = Vec::new();

    if let Some(name) = profile.name.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Nom: {name}"));
    }
    if let Some(title) = profile.title.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Titre professionnel: {title}"));
    }
    if !profile.experience.is_empty() {
        lines.push(format!("Expérience: {}", profile.experience));
    }
    if !profile.education.is_empty() {
        lines.push(format!("Formation: {}", profile.education));
    }
    if !profile.skills.is_empty() {
        lines.push(format!("Compétences: {}", profile.skills.join(", ")));
    }
    lines.push(format!(
        "Années d'expérience: {}",
        profile.years_of_experience
    ));

    lines.join("\n")
}

pub fn query_generation_prompt(profile: &CvProfile, location: &str, include_remote: bool) -> String {
    let remote_instruction = if include_remote {
        INCLUDE_REMOTE
    } else {
        EXCLUDE_REMOTE
    };

    QUERY_GENERATION_PROMPT_TEMPLATE
        .replace("{profile}", &profile_lines(profile))
        .replace("{location}", location)
        .replace("{remote_instruction}", remote_instruction)
}

/// Trims model output and strips one pair of surrounding double quotes.
pub fn clean_generated_query(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}
