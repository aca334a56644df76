//! Dashboard summary assembly

use crate::repository::AnalyticsRepository;
use snippetlens_core::{DashboardSummary, LanguageDistribution, SnippetDocument};
use tracing::info;

/// Number of titles listed in a dashboard summary
pub const SAMPLE_TITLE_COUNT: usize = 5;

/// Sample titles are cut to this many characters, without an ellipsis
pub const SAMPLE_TITLE_MAX_CHARS: usize = 50;

/// Message returned when the store yields no snippets
pub const EMPTY_STORE_MESSAGE: &str =
    "No snippets found. Make sure the document store is running and has data.";

#[derive(Debug, Clone)]
pub struct DashboardAssembler {
    repository: AnalyticsRepository,
}

impl DashboardAssembler {
    pub fn new(repository: AnalyticsRepository) -> Self {
        Self { repository }
    }

    /// Build the dashboard summary.
    ///
    /// An empty or unreachable store is not an error: the summary comes back
    /// with zero counts and [`EMPTY_STORE_MESSAGE`].
    pub async fn assemble(&self) -> DashboardSummary {
        let snippets = self.repository.fetch_snippets().await;
        if snippets.is_empty() {
            info!("Dashboard requested with no snippets available");
            return empty_summary();
        }

        // Distribution covers the whole collection, not just the sample
        let distribution = self.repository.fetch_language_distribution().await;
        summarize(&snippets, distribution)
    }
}

/// Combine a snippet sample and a distribution into a summary
pub fn summarize(
    snippets: &[SnippetDocument],
    distribution: LanguageDistribution,
) -> DashboardSummary {
    if snippets.is_empty() {
        return empty_summary();
    }

    let sample_titles = snippets
        .iter()
        .take(SAMPLE_TITLE_COUNT)
        .map(|snippet| truncate_chars(snippet.display_title(), SAMPLE_TITLE_MAX_CHARS))
        .collect();

    DashboardSummary {
        total_snippets: snippets.len() as u64,
        language_distribution: distribution,
        sample_titles,
        message: format!("Successfully loaded {} snippets!", snippets.len()),
    }
}

fn empty_summary() -> DashboardSummary {
    DashboardSummary {
        total_snippets: 0,
        language_distribution: LanguageDistribution::empty(),
        sample_titles: Vec::new(),
        message: EMPTY_STORE_MESSAGE.to_string(),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
