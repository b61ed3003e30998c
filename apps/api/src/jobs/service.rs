use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::profile::CvProfile;
use crate::extraction::service::extract_cv;
use crate::extraction::upload::UploadedFile;
use crate::jobs::filter::{filter_job_results, JobResult};
use crate::jobs::prompts::{clean_generated_query, query_generation_prompt};
use crate::llm_client::gemini::VisionClient;
use crate::llm_client::{CallOptions, LlmClient};
use crate::search_client::{SearchClient, MAX_RESULTS_PER_QUERY};

pub const DEFAULT_LOCATION: &str = "Antananarivo";

const QUERY_OPTIONS: CallOptions = CallOptions {
    temperature: Some(0.3),
    max_tokens: Some(200),
};

#[derive(Debug, Clone)]
pub struct JobSearchParams {
    pub location: String,
    pub include_remote: bool,
    pub max_results: u32,
}

impl Default for JobSearchParams {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            include_remote: true,
            max_results: MAX_RESULTS_PER_QUERY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchResponse {
    pub query: String,
    pub profile: CvProfile,
    pub results: Vec<JobResult>,
}

/// CV upload -> profile -> generated query -> search -> filtered job results.
pub async fn search_jobs(
    vision: &VisionClient,
    llm: &LlmClient,
    search: &SearchClient,
    cv: &UploadedFile,
    params: &JobSearchParams,
) -> Result<JobSearchResponse, AppError> {
    info!(
        "Job search: location={}, include_remote={}, max_results={}",
        params.location, params.include_remote, params.max_results
    );

    info!("Step 1/4: extracting CV profile");
    let structured = extract_cv(vision, cv).await?;
    let profile = CvProfile::from_cv(&structured, Utc::now().year());

    info!("Step 2/4: generating search query");
    let prompt = query_generation_prompt(&profile, &params.location, params.include_remote);
    let raw_query = llm.call_text(&prompt, None, QUERY_OPTIONS).await?;
    let query = clean_generated_query(&raw_query);
    if query.is_empty() {
        return Err(AppError::Internal(anyhow::anyhow!(
            "query generation returned an empty query"
        )));
    }
    info!("Generated query: {query}");

    info!("Step 3/4: searching");
    let items = search
        .search(&query, params.max_results.min(MAX_RESULTS_PER_QUERY))
        .await?;

    info!("Step 4/4: filtering {} items", items.len());
    let results = filter_job_results(&items);
    info!("Job search complete: {} results", results.len());

    Ok(JobSearchResponse {
        query,
        profile,
        results,
    })
}
