use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::debug;

use cookwise_core::backend::{ErrorBody, SearchQuery, SearchResponse};
use cookwise_core::error::BackendError;
use cookwise_core::service::RecipeSearchProvider;

pub struct RecipeApiClient {
    client: reqwest::Client,
    url: String,
    rt: tokio::runtime::Handle,
}

impl RecipeApiClient {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "cookwise-cli/{} (recipe finder)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(std::time::Duration::from_secs(10))
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.to_string(),
            rt: tokio::runtime::Handle::try_current()
                .context("Recipe client must be created inside a tokio runtime")?,
        })
    }

    /// One `GET` against the backend. 204 reads as an empty result set; a 400
    /// carrying an error message becomes [`BackendError::Rejected`].
    pub async fn search_async(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let mut params = vec![("ingredients", query.ingredients_param())];
        if let Some(portions) = &query.portions {
            params.push(("portions", portions.clone()));
        }
        debug!(url = %self.url, ?params, "requesting recipes");

        let resp = self
            .client
            .get(&self.url)
            .query(&params)
            .send()
            .await
            .context("Failed to reach the recipe backend")?;

        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(SearchResponse::default());
        }
        if !status.is_success() {
            let rejection = if status == StatusCode::BAD_REQUEST {
                resp.json::<ErrorBody>().await.ok().and_then(|b| b.error)
            } else {
                None
            };
            return Err(match rejection {
                Some(detail) => BackendError::Rejected {
                    message: detail.message,
                },
                None => BackendError::Status {
                    status: status.as_u16(),
                },
            }
            .into());
        }

        resp.json()
            .await
            .context("Failed to parse recipe backend response")
    }
}

impl RecipeSearchProvider for RecipeApiClient {
    fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        tokio::task::block_in_place(|| self.rt.block_on(self.search_async(query)))
    }
}
