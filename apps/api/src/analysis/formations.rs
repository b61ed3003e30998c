//! Formation Classifier & Ranker: decides which search results for a missing skill are real
//! courses, sorts them into free / free-with-certificate / paid, and names their platform.
//!
//! All tables are ordered: the first matching entry wins.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::errors::AppError;
use crate::normalization::normalize_text;
use crate::search_client::SearchItem;

/// Sentinel returned when no platform name can be derived from a URL.
pub const UNKNOWN_PLATFORM: &str = "Plateforme inconnue";

/// Cap per category for one skill.
pub const MAX_PER_CATEGORY: usize = 3;

/// Source of raw search results for a skill. The production implementation is
/// `SearchClient`; tests plug in fixtures.
#[async_trait]
pub trait FormationSearch: Send + Sync {
    async fn search_formations(&self, skill: &str) -> Result<Vec<SearchItem>, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationCategory {
    #[serde(rename = "gratuites_sans_certificat")]
    FreeNoCertificate,
    #[serde(rename = "gratuites_avec_certificat")]
    FreeWithCertificate,
    #[serde(rename = "payantes")]
    Paid,
}

impl FormationCategory {
    /// Priority order used for classification and output.
    pub const ALL: [FormationCategory; 3] = [
        FormationCategory::FreeNoCertificate,
        FormationCategory::FreeWithCertificate,
        FormationCategory::Paid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormationCategory::FreeNoCertificate => "gratuites_sans_certificat",
            FormationCategory::FreeWithCertificate => "gratuites_avec_certificat",
            FormationCategory::Paid => "payantes",
        }
    }

    pub fn is_free(&self) -> bool {
        !matches!(self, FormationCategory::Paid)
    }

    fn domains(&self) -> &'static [&'static str] {
        match self {
            FormationCategory::FreeNoCertificate => FREE_NO_CERTIFICATE_DOMAINS,
            FormationCategory::FreeWithCertificate => FREE_WITH_CERTIFICATE_DOMAINS,
            FormationCategory::Paid => PAID_DOMAINS,
        }
    }
}

/// An accepted search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationDetail {
    pub title: String,
    pub url: String,
    pub platform: String,
    pub category: FormationCategory,
}

/// Accepted formations for one skill, bucketed by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormationsByCategory {
    pub free_no_certificate: Vec<FormationDetail>,
    pub free_with_certificate: Vec<FormationDetail>,
    pub paid: Vec<FormationDetail>,
}

impl FormationsByCategory {
    pub fn bucket(&self, category: FormationCategory) -> &[FormationDetail] {
        match category {
            FormationCategory::FreeNoCertificate => &self.free_no_certificate,
            FormationCategory::FreeWithCertificate => &self.free_with_certificate,
            FormationCategory::Paid => &self.paid,
        }
    }

    fn bucket_mut(&mut self, category: FormationCategory) -> &mut Vec<FormationDetail> {
        match category {
            FormationCategory::FreeNoCertificate => &mut self.free_no_certificate,
            FormationCategory::FreeWithCertificate => &mut self.free_with_certificate,
            FormationCategory::Paid => &mut self.paid,
        }
    }

    /// Every formation, category by category in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &FormationDetail> {
        FormationCategory::ALL
            .into_iter()
            .flat_map(move |category| self.bucket(category).iter())
    }

    pub fn len(&self) -> usize {
        self.free_no_certificate.len() + self.free_with_certificate.len() + self.paid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lookup tables
// ────────────────────────────────────────────────────────────────────────────

const HOMEPAGE_DOMAINS: &[&str] = &[
    "udemy.com",
    "coursera.org",
    "edx.org",
    "pluralsight.com",
    "udacity.com",
    "skillshare.com",
    "datacamp.com",
    "codecademy.com",
    "freecodecamp.org",
    "khanacademy.org",
    "openclassrooms.com",
];

const NON_COURSE_PATTERNS: &[&str] = &[
    "/blog/",
    "/article/",
    "/forum/",
    "/discussion/",
    "/question/",
    "/news/",
    "/post/",
    "stackoverflow.com",
    "reddit.com",
    "quora.com",
    "/wiki/",
    "wikipedia.org",
    "/faq/",
];

const COURSE_PATH_SEGMENTS: &[&str] = &[
    "/course/",
    "/learn/",
    "/tutorial/",
    "/class/",
    "/training/",
    "/certification/",
    "/program/",
    "/nanodegree/",
    "/path/",
    "/bootcamp/",
    "/masterclass/",
    "/lesson/",
    "/workshop/",
];

const COURSE_KEYWORDS: &[&str] = &[
    "course",
    "tutorial",
    "learn",
    "training",
    "certification",
    "bootcamp",
    "masterclass",
    "formation",
    "clase",
    "cours",
];

const FREE_NO_CERTIFICATE_DOMAINS: &[&str] = &[
    "w3schools.com",
    "freecodecamp.org",
    "theodinproject.com",
    "developer.mozilla.org",
    "tutorialspoint.com",
    "geeksforgeeks.org",
    "javatpoint.com",
    "youtube.com",
    "medium.com",
    "hubspot.com/academy",
    "google.com/digitalgarage",
];

const FREE_WITH_CERTIFICATE_DOMAINS: &[&str] = &[
    "edx.org",
    "coursera.org",
    "khanacademy.org",
    "codecademy.com",
    "futurelearn.com",
    "alison.com",
    "linkedin.com/learning",
    "openclassrooms.com",
    "skillsbuild.org",
    "grow.google",
    "microsoft.com/learn",
];

const PAID_DOMAINS: &[&str] = &[
    "udemy.com",
    "pluralsight.com",
    "skillshare.com",
    "datacamp.com",
    "treehouse.com",
    "udacity.com",
    "masterclass.com",
    "domestika.com",
    "linkedin.com/premium",
];

const PLATFORM_NAMES: &[(&str, &str)] = &[
    ("w3schools.com", "W3Schools"),
    ("freecodecamp.org", "FreeCodeCamp"),
    ("theodinproject.com", "The Odin Project"),
    ("developer.mozilla.org", "MDN Web Docs"),
    ("coursera.org", "Coursera"),
    ("edx.org", "edX"),
    ("udemy.com", "Udemy"),
    ("codecademy.com", "Codecademy"),
    ("khanacademy.org", "Khan Academy"),
    ("linkedin.com/learning", "LinkedIn Learning"),
    ("pluralsight.com", "Pluralsight"),
    ("skillshare.com", "Skillshare"),
    ("datacamp.com", "DataCamp"),
    ("futurelearn.com", "FutureLearn"),
    ("tutorialspoint.com", "TutorialsPoint"),
    ("geeksforgeeks.org", "GeeksforGeeks"),
    ("openclassrooms.com", "OpenClassrooms"),
    ("youtube.com", "YouTube"),
    ("medium.com", "Medium"),
    ("hubspot.com", "HubSpot Academy"),
    ("google.com/digitalgarage", "Google Digital Garage"),
    ("masterclass.com", "MasterClass"),
    ("domestika.com", "Domestika"),
    ("microsoft.com/learn", "Microsoft Learn"),
    ("grow.google", "Google Grow"),
];

const STRIPPED_TLDS: &[&str] = &[".com", ".org", ".net"];

// ────────────────────────────────────────────────────────────────────────────
// Classification
// ────────────────────────────────────────────────────────────────────────────

/// Whether a search result points at an actual course rather than a homepage, blog post,
/// forum thread or wiki article.
pub fn is_formation_link(url: &str, title: &str, snippet: &str) -> bool {
    let lower_url = url.to_lowercase();

    if is_bare_homepage(&lower_url) {
        return false;
    }

    if NON_COURSE_PATTERNS.iter().any(|p| lower_url.contains(p)) {
        return false;
    }

    if COURSE_PATH_SEGMENTS.iter().any(|s| lower_url.contains(s)) {
        return true;
    }

    let lower_title = title.to_lowercase();
    let lower_snippet = snippet.to_lowercase();
    COURSE_KEYWORDS
        .iter()
        .any(|k| lower_title.contains(k) || lower_snippet.contains(k))
}

fn is_bare_homepage(lower_url: &str) -> bool {
    let Some(rest) = lower_url
        .strip_prefix("https://")
        .or_else(|| lower_url.strip_prefix("http://"))
    else {
        return false;
    };
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    HOMEPAGE_DOMAINS.contains(&rest)
}

/// Category of a formation URL. Unknown domains default to free without certificate.
pub fn classify_formation(url: &str) -> FormationCategory {
    FormationCategory::ALL
        .into_iter()
        .find(|category| category.domains().iter().any(|d| url.contains(d)))
        .unwrap_or(FormationCategory::FreeNoCertificate)
}

/// Host of `url`, or `""` when the URL cannot be parsed or has no host.
pub fn domain_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or_default().to_string(),
        Err(e) => {
            debug!("Unparseable URL {url:?}: {e}");
            String::new()
        }
    }
}

/// Display name of the platform hosting `url`.
pub fn extract_platform_name(url: &str) -> String {
    if let Some((_, name)) = PLATFORM_NAMES.iter().find(|(domain, _)| url.contains(domain)) {
        return name.to_string();
    }

    let host = domain_of(url);
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let host = STRIPPED_TLDS
        .iter()
        .find_map(|tld| host.strip_suffix(tld))
        .unwrap_or(host);

    let mut chars = host.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => UNKNOWN_PLATFORM.to_string(),
    }
}

/// Filters, classifies and buckets the search results for one skill.
///
/// At most `MAX_PER_CATEGORY` per category; stops as soon as every category holds at least
/// one formation and the category just filled has reached the cap.
pub fn collect_formations(items: &[SearchItem]) -> FormationsByCategory {
    let mut formations = FormationsByCategory::default();

    for item in items {
        if item.link.is_empty() {
            continue;
        }

        let title = normalize_text(&item.title);
        let snippet = normalize_text(&item.snippet);

        if !is_formation_link(&item.link, &title, &snippet) {
            debug!("Skipping non-formation link: {}", item.link);
            continue;
        }

        let category = classify_formation(&item.link);
        if formations.bucket(category).len() >= MAX_PER_CATEGORY {
            continue;
        }

        let platform = normalize_text(&extract_platform_name(&item.link));
        info!(
            "Formation found [{}]: {platform} - {title} ({})",
            category.as_str(),
            item.link
        );

        let bucket = formations.bucket_mut(category);
        bucket.push(FormationDetail {
            title,
            url: item.link.clone(),
            platform,
            category,
        });

        let current_full = bucket.len() >= MAX_PER_CATEGORY;
        let every_category_seeded = FormationCategory::ALL
            .into_iter()
            .all(|c| !formations.bucket(c).is_empty());
        if current_full && every_category_seeded {
            break;
        }
    }

    formations
}

/// Search-engine query used to find formations for `skill`.
pub fn formation_query(skill: &str) -> String {
    format!(
        "(intitle:\"formation\" OR intitle:\"cours\" OR intitle:\"tutoriel\" OR intitle:\"certification\" \
         OR intitle:\"programme\" OR intitle:\"bootcamp\") AND (\"{skill}\") -intitle:\"offre\" \
         (inurl:formation OR inurl:cours OR inurl:tutoriel OR inurl:certification OR inurl:programme \
         OR inurl:bootcamp) -site:\"linkedin.com\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, link: &str) -> SearchItem {
        SearchItem {
            title: title.to_string(),
            link: link.to_string(),
            snippet: String::new(),
            display_link: String::new(),
        }
    }

    #[test]
    fn test_classify_known_domains() {
        assert_eq!(
            classify_formation("https://www.udemy.com/course/x").as_str(),
            "payantes"
        );
        assert_eq!(
            classify_formation("https://freecodecamp.org/learn/y").as_str(),
            "gratuites_sans_certificat"
        );
        assert_eq!(
            classify_formation("https://www.coursera.org/learn/python"),
            FormationCategory::FreeWithCertificate
        );
    }

    #[test]
    fn test_classify_unknown_defaults_to_free() {
        assert_eq!(
            classify_formation("https://example.dev/course/rust"),
            FormationCategory::FreeNoCertificate
        );
    }

    #[test]
    fn test_classify_priority_order() {
        // linkedin.com/learning is free-with-certificate even though linkedin.com/premium is paid.
        assert_eq!(
            classify_formation("https://www.linkedin.com/learning/docker"),
            FormationCategory::FreeWithCertificate
        );
        assert_eq!(
            classify_formation("https://www.linkedin.com/premium/x"),
            FormationCategory::Paid
        );
    }

    #[test]
    fn test_category_serializes_to_wire_names() {
        let json = serde_json::to_string(&FormationCategory::Paid).unwrap();
        assert_eq!(json, "\"payantes\"");
        assert!(FormationCategory::FreeWithCertificate.is_free());
        assert!(!FormationCategory::Paid.is_free());
    }

    #[test]
    fn test_bare_homepages_rejected() {
        assert!(!is_formation_link("https://www.coursera.org", "Coursera course", ""));
        assert!(!is_formation_link("https://udemy.com/", "", ""));
        assert!(!is_formation_link("http://www.openclassrooms.com", "", "cours"));
    }

    #[test]
    fn test_non_course_links_rejected() {
        assert!(!is_formation_link("https://stackoverflow.com/questions/123", "", ""));
        assert!(!is_formation_link(
            "https://www.udemy.com/blog/learn-docker/",
            "Learn Docker",
            ""
        ));
        assert!(!is_formation_link("https://fr.wikipedia.org/wiki/Docker", "", ""));
    }

    #[test]
    fn test_course_path_accepted() {
        assert!(is_formation_link("https://www.coursera.org/learn/python", "", ""));
        assert!(is_formation_link("https://www.udacity.com/NanoDegree/x", "", ""));
    }

    #[test]
    fn test_keyword_in_title_or_snippet_accepted() {
        assert!(is_formation_link("https://example.com/docker", "Docker Training", ""));
        assert!(is_formation_link("https://example.com/docker", "", "Un COURS complet"));
        assert!(!is_formation_link("https://example.com/docker", "Docker", "containers"));
    }

    #[test]
    fn test_platform_name_from_table() {
        assert_eq!(extract_platform_name("https://www.udemy.com/course/x"), "Udemy");
        assert_eq!(
            extract_platform_name("https://www.linkedin.com/learning/docker"),
            "LinkedIn Learning"
        );
    }

    #[test]
    fn test_platform_name_derived_from_host() {
        assert_eq!(extract_platform_name("https://www.docker.com/training/"), "Docker");
        assert_eq!(extract_platform_name("https://learn.kodeco.net/x"), "Learn.kodeco");
        assert_eq!(extract_platform_name("https://simplilearn.io/x"), "Simplilearn.io");
    }

    #[test]
    fn test_platform_name_malformed_url() {
        assert_eq!(extract_platform_name("not a url"), UNKNOWN_PLATFORM);
        assert_eq!(extract_platform_name(""), UNKNOWN_PLATFORM);
        assert_eq!(domain_of("::::"), "");
    }

    #[test]
    fn test_collect_classifies_and_skips() {
        let items = vec![
            item("Docker pour débutants", "https://www.udemy.com/course/docker"),
            item("Learn Docker", "https://www.freecodecamp.org/learn/docker"),
            item("Docker question", "https://stackoverflow.com/questions/1"),
            item("", ""),
        ];
        let formations = collect_formations(&items);
        assert_eq!(formations.len(), 2);
        assert_eq!(formations.paid[0].platform, "Udemy");
        assert_eq!(formations.free_no_certificate[0].platform, "FreeCodeCamp");
        assert!(formations.free_with_certificate.is_empty());
        assert!(!formations.is_empty());
        assert!(collect_formations(&items[2..]).is_empty());
    }

    #[test]
    fn test_collect_caps_each_category() {
        let items: Vec<_> = (0..5)
            .map(|i| item("Course", &format!("https://www.udemy.com/course/{i}")))
            .collect();
        let formations = collect_formations(&items);
        assert_eq!(formations.paid.len(), MAX_PER_CATEGORY);
    }

    #[test]
    fn test_collect_stops_once_all_seeded_and_current_full() {
        let mut items = vec![
            item("Course", "https://www.coursera.org/learn/a"),
            item("Course", "https://www.w3schools.com/course/a"),
        ];
        items.extend((0..3).map(|i| item("Course", &format!("https://www.udemy.com/course/{i}"))));
        items.push(item("Course", "https://www.w3schools.com/course/b"));

        let formations = collect_formations(&items);
        assert_eq!(formations.paid.len(), 3);
        // The trailing W3Schools link comes after the early stop.
        assert_eq!(formations.free_no_certificate.len(), 1);
    }

    #[test]
    fn test_iter_follows_category_priority() {
        let items = vec![
            item("Course", "https://www.udemy.com/course/a"),
            item("Course", "https://www.coursera.org/learn/b"),
            item("Course", "https://www.w3schools.com/course/c"),
        ];
        let formations = collect_formations(&items);
        let order: Vec<_> = formations.iter().map(|f| f.category).collect();
        assert_eq!(order, FormationCategory::ALL.to_vec());
    }

    #[test]
    fn test_formation_query_embeds_skill() {
        let query = formation_query("Kubernetes");
        assert!(query.contains("(\"Kubernetes\")"));
        assert!(query.contains("-site:\"linkedin.com\""));
    }
}
