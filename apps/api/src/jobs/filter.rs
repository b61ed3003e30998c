//! Job-Result Filter: turns raw search items into job postings, keeps only the ones that read
//! like offers, and drops repeated URLs.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::search_client::SearchItem;

pub const UNSPECIFIED_LOCATION: &str = "Non spécifiée";

/// Characters kept after a location pattern match.
const LOCATION_CONTEXT_CHARS: usize = 30;

const JOB_KEYWORDS: &[&str] = &[
    "emploi",
    "job",
    "poste",
    "recrutement",
    "offre",
    "candidature",
    "carrière",
    "recruitment",
    "hiring",
    "position",
    "opportunity",
    "career",
    "vacancy",
];

const REMOTE_KEYWORDS: &[&str] = &[
    "remote",
    "télétravail",
    "teletravail",
    "distance",
    "home office",
    "travail à distance",
    "100% remote",
    "full remote",
];

const LOCATION_PATTERNS: &[&str] = &[
    "à Antananarivo",
    "Antananarivo",
    "Madagascar",
    "à Tana",
    "Tana,",
    "location:",
    "lieu:",
];

const TITLE_SEPARATORS: &[&str] = &[" - ", " | ", " – "];

static LOCATION_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    LOCATION_PATTERNS
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", regex::escape(p))).expect("valid regex"))
        .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub description: String,
    pub is_remote: bool,
    pub published_date: Option<String>,
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

pub fn is_job_related(result: &JobResult) -> bool {
    contains_any(
        &format!("{} {}", result.title, result.description),
        JOB_KEYWORDS,
    )
}

pub fn detect_remote(title: &str, description: &str) -> bool {
    contains_any(&format!("{title} {description}"), REMOTE_KEYWORDS)
}

/// Company name guessed from the result's display domain.
///
/// The snippet is accepted but not consulted.
pub fn extract_company(display_link: &str, _snippet: &str) -> String {
    let domain = display_link.strip_prefix("www.").unwrap_or(display_link);
    let label = domain.split('.').next().unwrap_or_default();

    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First known location mention in the snippet, with a little trailing context.
pub fn extract_location(snippet: &str) -> String {
    let Some(found) = LOCATION_REGEXES.iter().find_map(|re| re.find(snippet)) else {
        return UNSPECIFIED_LOCATION.to_string();
    };

    let context: String = snippet[found.end()..]
        .chars()
        .take(LOCATION_CONTEXT_CHARS)
        .collect();
    let text = format!("{}{context}", found.as_str());

    let text = text.trim();
    let text = text.split('.').next().unwrap_or_default();
    let text = text.split(',').next().unwrap_or_default();
    text.to_string()
}

/// Drops site-name suffixes such as `" - Indeed"`.
pub fn clean_title(title: &str) -> String {
    let mut title = title;
    for separator in TITLE_SEPARATORS {
        if let Some(index) = title.find(separator) {
            if index > 0 {
                title = &title[..index];
            }
        }
    }
    title.trim().to_string()
}

/// Keeps the first result for each URL, preserving order.
pub fn remove_duplicates(results: Vec<JobResult>) -> Vec<JobResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.url.clone()))
        .collect()
}

pub fn job_from_search_item(item: &SearchItem) -> JobResult {
    JobResult {
        title: clean_title(&item.title),
        company: extract_company(&item.display_link, &item.snippet),
        location: extract_location(&item.snippet),
        url: item.link.clone(),
        description: item.snippet.clone(),
        is_remote: detect_remote(&item.title, &item.snippet),
        published_date: None,
    }
}

/// Builds job results from search items, keeps job-related ones and removes duplicate URLs.
pub fn filter_job_results(items: &[SearchItem]) -> Vec<JobResult> {
    let related = items
        .iter()
        .map(job_from_search_item)
        .filter(|result| {
            let keep = is_job_related(result);
            if !keep {
                debug!("Dropping non-job result: {}", result.url);
            }
            keep
        })
        .collect();
    remove_duplicates(related)
}
