//! Condensed candidate profile derived from a `StructuredCv`, used to build job-search queries.

use serde::{Deserialize, Serialize};

use crate::extraction::cv::StructuredCv;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub skills: Vec<String>,
    pub experience: String,
    pub education: String,
    pub years_of_experience: u32,
    pub location: Option<String>,
}

impl CvProfile {
    /// `current_year` resolves open-ended ("Présent") experiences.
    pub fn from_cv(cv: &StructuredCv, current_year: i32) -> Self {
        let (name, location) = match &cv.personal_info {
            Some(info) => (Some(info.name.clone()), info.location.clone()),
            None => (None, None),
        };

        let title = match cv.experiences.first() {
            Some(exp) => Some(exp.title.clone()),
            None => cv
                .summary
                .as_deref()
                .filter(|s| !s.is_empty())
                .and_then(|s| s.lines().next())
                .map(|line| line.trim().to_string()),
        };

        let skills = cv
            .skills
            .iter()
            .flat_map(|category| category.items.iter().cloned())
            .collect();

        let experience = cv
            .experiences
            .iter()
            .map(|exp| {
                format!(
                    "{} chez {} ({} - {}). ",
                    exp.title, exp.company, exp.start_date, exp.end_date
                )
            })
            .collect::<String>()
            .trim()
            .to_string();

        let education = cv
            .education
            .iter()
            .map(|edu| {
                format!(
                    "{} en {} - {}. ",
                    edu.degree,
                    edu.field_of_study.as_deref().unwrap_or(""),
                    edu.institution
                )
            })
            .collect::<String>()
            .trim()
            .to_string();

        CvProfile {
            name,
            title,
            skills,
            experience,
            education,
            years_of_experience: years_of_experience(cv, current_year),
            location,
        }
    }
}

/// Career length estimate. Experiences are listed most recent first.
///
/// Span from the oldest start year to the latest end year; an open end ("Présent") counts to
/// `current_year`; when neither works, the number of experiences stands in.
pub fn years_of_experience(cv: &StructuredCv, current_year: i32) -> u32 {
    let (Some(latest), Some(oldest)) = (cv.experiences.first(), cv.experiences.last()) else {
        return 0;
    };

    let start_year = extract_year(&oldest.start_date);
    let end_year = extract_year(&latest.end_date);

    if let (Some(start), Some(end)) = (start_year, end_year) {
        return (end - start).max(0) as u32;
    }

    let end_lower = latest.end_date.to_lowercase();
    if end_lower.contains("présent") || end_lower.contains("present") {
        if let Some(start) = start_year {
            return (current_year - start).max(0) as u32;
        }
    }

    cv.experiences.len() as u32
}

/// First standalone 4-digit token of a `MM/YYYY`, `YYYY-MM` or `YYYY` style date.
pub fn extract_year(date: &str) -> Option<i32> {
    date.split(|c: char| c == '/' || c == '-' || c.is_whitespace())
        .find(|part| part.len() == 4 && part.chars().all(|c| c.is_ascii_digit()))
        .and_then(|part| part.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::cv::{Education, Experience, PersonalInfo, SkillCategory};

    fn experience(title: &str, start: &str, end: &str) -> Experience {
        Experience {
            title: title.to_string(),
            company: "Acme".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_year_formats() {
        assert_eq!(extract_year("03/2019"), Some(2019));
        assert_eq!(extract_year("2019-03"), Some(2019));
        assert_eq!(extract_year("Sept 2020"), Some(2020));
        assert_eq!(extract_year("Présent"), None);
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("12345"), None);
    }

    #[test]
    fn test_years_span_oldest_start_to_latest_end() {
        let cv = StructuredCv {
            experiences: vec![
                experience("Lead", "01/2020", "12/2023"),
                experience("Junior", "06/2015", "12/2019"),
            ],
            ..Default::default()
        };
        assert_eq!(years_of_experience(&cv, 2026), 8);
    }

    #[test]
    fn test_years_open_ended_uses_current_year() {
        let cv = StructuredCv {
            experiences: vec![experience("Dev", "2018", "Présent")],
            ..Default::default()
        };
        assert_eq!(years_of_experience(&cv, 2026), 8);
    }

    #[test]
    fn test_years_fallback_to_count() {
        let cv = StructuredCv {
            experiences: vec![experience("A", "", ""), experience("B", "", "")],
            ..Default::default()
        };
        assert_eq!(years_of_experience(&cv, 2026), 2);
        assert_eq!(years_of_experience(&StructuredCv::default(), 2026), 0);
    }

    #[test]
    fn test_years_never_negative() {
        let cv = StructuredCv {
            experiences: vec![experience("Dev", "2022", "2020")],
            ..Default::default()
        };
        assert_eq!(years_of_experience(&cv, 2026), 0);
    }

    #[test]
    fn test_profile_from_cv() {
        let cv = StructuredCv {
            personal_info: Some(PersonalInfo {
                name: "Andry".to_string(),
                location: Some("Antananarivo".to_string()),
                ..Default::default()
            }),
            experiences: vec![experience("Développeur Java", "2019", "2023")],
            education: vec![Education {
                degree: "Master".to_string(),
                institution: "ESTI".to_string(),
                field_of_study: Some("Informatique".to_string()),
                ..Default::default()
            }],
            skills: vec![
                SkillCategory {
                    category: "Langages".to_string(),
                    items: vec!["Java".to_string(), "SQL".to_string()],
                },
                SkillCategory {
                    category: "Outils".to_string(),
                    items: vec!["Docker".to_string()],
                },
            ],
            ..Default::default()
        };

        let profile = CvProfile::from_cv(&cv, 2026);
        assert_eq!(profile.name.as_deref(), Some("Andry"));
        assert_eq!(profile.location.as_deref(), Some("Antananarivo"));
        assert_eq!(profile.title.as_deref(), Some("Développeur Java"));
        assert_eq!(profile.skills, vec!["Java", "SQL", "Docker"]);
        assert_eq!(profile.experience, "Développeur Java chez Acme (2019 - 2023).");
        assert_eq!(profile.education, "Master en Informatique - ESTI.");
        assert_eq!(profile.years_of_experience, 4);
    }

    #[test]
    fn test_title_falls_back_to_summary() {
        let cv = StructuredCv {
            summary: Some("Data analyst\nSQL et Python".to_string()),
            ..Default::default()
        };
        let profile = CvProfile::from_cv(&cv, 2026);
        assert_eq!(profile.title.as_deref(), Some("Data analyst"));
        assert_eq!(profile.years_of_experience, 0);
    }
}
