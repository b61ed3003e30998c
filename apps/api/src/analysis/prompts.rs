// Prompt constants for skill-gap analysis.

/// System message for the skill-analysis call.
pub const SKILL_ANALYSIS_SYSTEM: &str = "Tu es un expert en analyse de compétences professionnelles. \
    Tu analyses les CV et offres d'emploi avec précision.";

/// Skill-analysis prompt. Replace `{job_description}` and `{cv_text}` before sending.
pub const SKILL_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Voici une offre d'emploi :
{job_description}

Voici le profil du candidat :
{cv_text}

INSTRUCTIONS IMPORTANTES :
1. Analyse uniquement les competences techniques essentielles dans l'offre d'emploi.
2. Analyse uniquement les competences techniques importantes du candidat.
3. Identifie les correspondances importantes (matching).
4. Identifie uniquement les competences techniques manquantes REELLEMENT importantes.
5. NE PAS suggerer les competences de base si une competence avancee est presente :
   - React/Next.js/Angular/Vue.js -> NE PAS HTML, CSS, JavaScript
   - Spring Boot -> NE PAS Java
   - Django/Flask -> NE PAS Python
   - Kubernetes -> NE PAS Docker
   - Machine Learning -> NE PAS Python, Data Analysis
   - Figma/Adobe XD -> NE PAS UI/UX Design de base
   - Google Analytics -> NE PAS Digital Marketing de base
   - Financial Modeling -> NE PAS Excel ou Financial Analysis de base
6. Limite a maximum 10 competences cles par categorie si la liste est longue.
7. Calcule le pourcentage de matching (competences matching / competences requises * 100).

Format JSON :
{
    "competences_requises": ["comp1", "comp2"],
    "competences_candidat": ["comp1", "comp3"],
    "competences_matching": ["comp1"],
    "competences_manquantes": ["comp2"],
    "pourcentage_matching": 75.5
}
"#;

pub fn skill_analysis_prompt(job_description: &str, cv_text: &str) -> String {
    let body = SKILL_ANALYSIS_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{cv_text}", cv_text);
    format!("{body}\n{}", crate::llm_client::prompts::JSON_ONLY_INSTRUCTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_inputs_and_json_instruction() {
        let prompt = skill_analysis_prompt("Backend Rust", "5 ans de Go");
        assert!(prompt.starts_with("Voici une offre d'emploi :\nBackend Rust\n"));
        assert!(prompt.contains("5 ans de Go"));
        assert!(prompt.contains("\"pourcentage_matching\""));
        assert!(prompt.ends_with(crate::llm_client::prompts::JSON_ONLY_INSTRUCTION));
        assert!(!prompt.contains("{cv_text}"));
    }
}
