// Prompt for the vision-model CV extraction.

/// Sent alongside the inline document. The JSON keys match what `parse_cv` reads.
pub const CV_EXTRACTION_PROMPT: &str = r#"Analyse ce CV et extrait TOUTES les informations en JSON structuré.

Structure JSON attendue :
{
  "personal_info": {
    "name": "Nom complet",
    "email": "email@example.com",
    "phone": "+261...",
    "location": "Ville, Pays",
    "linkedin": "URL LinkedIn (si présent)",
    "github": "URL GitHub (si présent)",
    "portfolio": "URL portfolio (si présent)"
  },
  "experiences": [
    {
      "title": "Titre du poste",
      "company": "Nom de l'entreprise",
      "location": "Lieu",
      "start_date": "MM/YYYY",
      "end_date": "MM/YYYY ou 'Présent'",
      "description": "Description des responsabilités et réalisations",
      "achievements": ["Réalisation 1", "Réalisation 2"]
    }
  ],
  "education": [
    {
      "degree": "Diplôme obtenu",
      "institution": "Nom de l'école/université",
      "location": "Lieu",
      "start_date": "YYYY",
      "end_date": "YYYY",
      "field_of_study": "Domaine d'étude",
      "grade": "Note/Mention (si présent)"
    }
  ],
  "skills": [
    {"category": "Langages de programmation", "items": ["Java", "Python", "JavaScript"]},
    {"category": "Frameworks", "items": ["Spring Boot", "React", "Django"]}
  ],
  "languages": [
    {"language": "Français", "level": "Langue maternelle"},
    {"language": "Anglais", "level": "Courant (C1)"}
  ],
  "certifications": [
    {"name": "Nom de la certification", "issuer": "Organisme émetteur", "date": "MM/YYYY", "credential_id": "ID (si présent)"}
  ],
  "projects": [
    {"name": "Nom du projet", "description": "Description", "technologies": ["Tech1", "Tech2"], "url": "URL (si présent)"}
  ],
  "summary": "Résumé professionnel (si présent sur le CV)"
}

INSTRUCTIONS :
- Extrait toutes les informations visibles sur le CV
- Si une information n'est pas présente, utilise null ou [] pour les listes
- Normalise les dates au format indiqué
- Groupe les compétences par catégories logiques
"#;

pub fn cv_extraction_prompt() -> String {
    format!(
        "{CV_EXTRACTION_PROMPT}\n{}",
        crate::llm_client::prompts::JSON_ONLY_INSTRUCTION
    )
}
