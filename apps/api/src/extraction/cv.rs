//! Structured CV Parser: converts the vision model's JSON into a `StructuredCv`.
//!
//! Parsing is permissive: absent fields become `None` / `""` / empty lists. Only a document whose
//! structures have the wrong kind is rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalization::fields::{
    object_list, optional_object, optional_text, required_text, root_object, string_list, Object,
};
use crate::normalization::{parse_model_json, ParseError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub field_of_study: Option<String>,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: Option<String>,
}

/// Everything extracted from one CV document. List fields are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredCv {
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub summary: Option<String>,
}

/// Parses raw model output (fences, typography and literal casing repaired first).
pub fn parse_cv_text(raw: &str) -> Result<StructuredCv, ParseError> {
    let document = parse_model_json(raw)?;
    parse_cv(&document)
}

/// Maps a JSON document onto a `StructuredCv`, one key per field.
pub fn parse_cv(document: &Value) -> Result<StructuredCv, ParseError> {
    let root = root_object(document)?;

    let personal_info = optional_object(root, "personal_info")?.map(parse_personal_info);

    let experiences = object_list(root, "experiences")?
        .into_iter()
        .map(parse_experience)
        .collect::<Result<Vec<_>, _>>()?;

    let education = object_list(root, "education")?
        .into_iter()
        .map(parse_education)
        .collect();

    let skills = object_list(root, "skills")?
        .into_iter()
        .map(|skill| {
            Ok(SkillCategory {
                category: required_text(skill, "category"),
                items: string_list(skill, "items")?,
            })
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    let languages = object_list(root, "languages")?
        .into_iter()
        .map(|lang| Language {
            language: required_text(lang, "language"),
            level: required_text(lang, "level"),
        })
        .collect();

    let certifications = object_list(root, "certifications")?
        .into_iter()
        .map(|cert| Certification {
            name: required_text(cert, "name"),
            issuer: required_text(cert, "issuer"),
            date: required_text(cert, "date"),
            credential_id: optional_text(cert, "credential_id"),
        })
        .collect();

    let projects = object_list(root, "projects")?
        .into_iter()
        .map(|proj| {
            Ok(Project {
                name: required_text(proj, "name"),
                description: required_text(proj, "description"),
                technologies: string_list(proj, "technologies")?,
                url: optional_text(proj, "url"),
            })
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    Ok(StructuredCv {
        personal_info,
        experiences,
        education,
        skills,
        languages,
        certifications,
        projects,
        summary: optional_text(root, "summary"),
    })
}

fn parse_personal_info(info: &Object) -> PersonalInfo {
    PersonalInfo {
        name: required_text(info, "name"),
        email: optional_text(info, "email"),
        phone: optional_text(info, "phone"),
        location: optional_text(info, "location"),
        linkedin: optional_text(info, "linkedin"),
        github: optional_text(info, "github"),
        portfolio: optional_text(info, "portfolio"),
    }
}

fn parse_experience(exp: &Object) -> Result<Experience, ParseError> {
    Ok(Experience {
        title: required_text(exp, "title"),
        company: required_text(exp, "company"),
        location: optional_text(exp, "location"),
        start_date: required_text(exp, "start_date"),
        end_date: required_text(exp, "end_date"),
        description: required_text(exp, "description"),
        achievements: string_list(exp, "achievements")?,
    })
}

fn parse_education(edu: &Object) -> Education {
    Education {
        degree: required_text(edu, "degree"),
        institution: required_text(edu, "institution"),
        location: optional_text(edu, "location"),
        start_date: required_text(edu, "start_date"),
        end_date: required_text(edu, "end_date"),
        field_of_study: optional_text(edu, "field_of_study"),
        grade: optional_text(edu, "grade"),
    }
}

impl StructuredCv {
    /// Fixed-section plain-text rendering used as analysis input.
    ///
    /// Order: personal info, summary, experiences, education, skills, languages.
    /// Empty sections are omitted, headers included. Same input, same bytes.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();

        if let Some(info) = &self.personal_info {
            out.push_str("===== INFORMATIONS PERSONNELLES =====\n");
            out.push_str(&format!("Nom: {}\n", info.name));
            if let Some(email) = &info.email {
                out.push_str(&format!("Email: {email}\n"));
            }
            if let Some(phone) = &info.phone {
                out.push_str(&format!("Téléphone: {phone}\n"));
            }
            if let Some(location) = &info.location {
                out.push_str(&format!("Localisation: {location}\n"));
            }
            out.push('\n');
        }

        if let Some(summary) = self.summary.as_deref().filter(|s| !s.is_empty()) {
            out.push_str("===== RÉSUMÉ =====\n");
            out.push_str(&format!("{summary}\n\n"));
        }

        if !self.experiences.is_empty() {
            out.push_str("===== EXPÉRIENCES PROFESSIONNELLES =====\n");
            for exp in &self.experiences {
                out.push_str(&format!("{} - {}\n", exp.title, exp.company));
                out.push_str(&format!("{} - {}\n", exp.start_date, exp.end_date));
                out.push_str(&format!("{}\n", exp.description));
                if !exp.achievements.is_empty() {
                    out.push_str(&format!("Réalisations: {}\n", exp.achievements.join(", ")));
                }
                out.push('\n');
            }
        }

        if !self.education.is_empty() {
            out.push_str("===== FORMATION =====\n");
            for edu in &self.education {
                out.push_str(&format!("{} - {}\n", edu.degree, edu.institution));
                out.push_str(&format!("{} - {}\n\n", edu.start_date, edu.end_date));
            }
        }

        if !self.skills.is_empty() {
            out.push_str("===== COMPÉTENCES =====\n");
            for category in &self.skills {
                out.push_str(&format!("{}: {}\n", category.category, category.items.join(", ")));
            }
            out.push('\n');
        }

        if !self.languages.is_empty() {
            out.push_str("===== LANGUES =====\n");
            for lang in &self.languages {
                out.push_str(&format!("{}: {}\n", lang.language, lang.level));
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FULL_CV: &str = r#"```json
    {
      "personal_info": {
        "name": "Rakoto  Andry",
        "email": "andry@example.com",
        "phone": "+261 34 00 000 00",
        "location": "Antananarivo, Madagascar",
        "linkedin": null
      },
      "experiences": [
        {
          "title": "Développeur Backend",
          "company": "Orange",
          "start_date": "03/2021",
          "end_date": "Présent",
          "description": "APIs REST — Spring Boot",
          "achievements": ["Latence divisée par 2", "CI/CD"]
        }
      ],
      "education": [
        {"degree": "Master", "institution": "ESTI", "start_date": "2016", "end_date": "2018", "field_of_study": "Informatique", "grade": None}
      ],
      "skills": [{"category": "Langages", "items": ["Java", "Rust"]}],
      "languages": [{"language": "Français", "level": "Natif"}],
      "certifications": [{"name": "AWS SAA", "issuer": "Amazon", "date": "05/2022"}],
      "projects": [{"name": "cvmatch", "description": "Analyse de CV", "technologies": ["Rust", "Axum"]}],
      "summary": "Ingénieur passionné"
    }
    ```"#;

    #[test]
    fn test_parse_full_document() {
        let cv = parse_cv_text(FULL_CV).unwrap();

        let info = cv.personal_info.as_ref().unwrap();
        assert_eq!(info.name, "Rakoto Andry");
        assert_eq!(info.linkedin, None);
        assert_eq!(info.github, None);

        assert_eq!(cv.experiences.len(), 1);
        assert_eq!(cv.experiences[0].description, "APIs REST - Spring Boot");
        assert_eq!(cv.experiences[0].achievements.len(), 2);
        assert_eq!(cv.experiences[0].location, None);

        assert_eq!(cv.education[0].field_of_study.as_deref(), Some("Informatique"));
        assert_eq!(cv.education[0].grade, None);
        assert_eq!(cv.skills[0].items, vec!["Java", "Rust"]);
        assert_eq!(cv.certifications[0].credential_id, None);
        assert_eq!(cv.projects[0].technologies, vec!["Rust", "Axum"]);
        assert_eq!(cv.projects[0].url, None);
        assert_eq!(cv.summary.as_deref(), Some("Ing\u{e9}nieur passionn\u{e9}"));
    }

    #[test]
    fn test_empty_experiences_is_empty_list() {
        let cv = parse_cv(&json!({"experiences": []})).unwrap();
        assert_eq!(cv.experiences, Vec::<Experience>::new());
    }

    #[test]
    fn test_absent_lists_default_to_empty() {
        let cv = parse_cv(&json!({})).unwrap();
        assert!(cv.personal_info.is_none());
        assert!(cv.experiences.is_empty());
        assert!(cv.education.is_empty());
        assert!(cv.skills.is_empty());
        assert!(cv.languages.is_empty());
        assert!(cv.certifications.is_empty());
        assert!(cv.projects.is_empty());
        assert!(cv.summary.is_none());

        let serialized = serde_json::to_value(&cv).unwrap();
        assert_eq!(serialized["experiences"], json!([]));
    }

    #[test]
    fn test_missing_required_text_defaults_to_empty() {
        let cv = parse_cv(&json!({"experiences": [{"company": "Acme"}]})).unwrap();
        assert_eq!(cv.experiences[0].title, "");
        assert_eq!(cv.experiences[0].company, "Acme");
        assert!(cv.experiences[0].achievements.is_empty());
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        assert!(matches!(parse_cv(&json!([])), Err(ParseError::Shape { .. })));
        assert!(matches!(parse_cv(&json!("cv")), Err(ParseError::Shape { .. })));
    }

    #[test]
    fn test_wrong_substructure_is_rejected() {
        assert!(parse_cv(&json!({"experiences": {"title": "x"}})).is_err());
        assert!(parse_cv(&json!({"personal_info": "Andry"})).is_err());
        assert!(parse_cv(&json!({"skills": ["Rust"]})).is_err());
    }

    #[test]
    fn test_invalid_json_propagates() {
        assert!(matches!(
            parse_cv_text("{\"experiences\": [}"),
            Err(ParseError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_plain_text_full_rendering() {
        let cv = parse_cv_text(FULL_CV).unwrap();
        let expected = "===== INFORMATIONS PERSONNELLES =====\n\
            Nom: Rakoto Andry\n\
            Email: andry@example.com\n\
            Téléphone: +261 34 00 000 00\n\
            Localisation: Antananarivo, Madagascar\n\
            \n\
            ===== RÉSUMÉ =====\n\
            Ingénieur passionné\n\
            \n\
            ===== EXPÉRIENCES PROFESSIONNELLES =====\n\
            Développeur Backend - Orange\n\
            03/2021 - Présent\n\
            APIs REST - Spring Boot\n\
            Réalisations: Latence divisée par 2, CI/CD\n\
            \n\
            ===== FORMATION =====\n\
            Master - ESTI\n\
            2016 - 2018\n\
            \n\
            ===== COMPÉTENCES =====\n\
            Langages: Java, Rust\n\
            \n\
            ===== LANGUES =====\n\
            Français: Natif\n\
            \n";
        assert_eq!(cv.to_plain_text(), expected);
    }

    #[test]
    fn test_plain_text_omits_empty_sections() {
        let cv = StructuredCv {
            skills: vec![SkillCategory {
                category: "Cloud".to_string(),
                items: vec!["AWS".to_string()],
            }],
            ..Default::default()
        };
        let text = cv.to_plain_text();
        assert_eq!(text, "===== COMPÉTENCES =====\nCloud: AWS\n\n");
        assert!(!text.contains("LANGUES"));
        assert!(!text.contains("INFORMATIONS PERSONNELLES"));
    }

    #[test]
    fn test_plain_text_is_stable() {
        let cv = parse_cv_text(FULL_CV).unwrap();
        assert_eq!(cv.to_plain_text(), cv.clone().to_plain_text());
    }

    #[test]
    fn test_empty_summary_is_omitted() {
        let cv = StructuredCv {
            summary: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(cv.to_plain_text(), "");
    }
}
