//! News page

use tank01_client::endpoints;
use tank01_client::{NewsItem, Upstream};
use tracing::info;

use super::{param_text, Query};
use crate::config::PagesConfig;
use crate::error::{PageError, PageResult};

#[derive(Debug, Clone)]
pub struct NewsView {
    pub query: String,
    pub items: Vec<NewsItem>,
    /// Not-found message when a search matched nothing
    pub note: Option<String>,
}

pub async fn build(upstream: &dyn Upstream, config: &PagesConfig, query: &Query) -> PageResult<NewsView> {
    let search = param_text(query, "q");
    let items = endpoints::news(upstream, config.news_max_items, true).await?;
    let total = items.len();

    let items = filter_news(items, &search);
    info!("News: {} of {} headlines shown", items.len(), total);

    let note = (items.is_empty() && !search.is_empty())
        .then(|| PageError::NotFound(search.clone()).user_message());

    Ok(NewsView { query: search, items, note })
}

/// Headlines containing `query`, ignoring case; everything for an empty query
pub fn filter_news(items: Vec<NewsItem>, query: &str) -> Vec<NewsItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items.into_iter().filter(|item| item.headline.to_lowercase().contains(&needle)).collect()
}
