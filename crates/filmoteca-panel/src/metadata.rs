//! Movie-metadata search client.
//!
//! Thin client over the third-party metadata API's movie search. Results are
//! reduced to what the form needs: a title, a release year, and a full
//! poster URL (the CDN prefix is joined here; results without art get the
//! placeholder).

use filmoteca_core::constants::{
    METADATA_API_BASE, METADATA_IMAGE_BASE, POSTER_PLACEHOLDER_URL,
};
use filmoteca_core::{AppError, AppResult};
use serde::Deserialize;

/// One search result, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataMovie {
    pub id: i64,
    pub title: String,
    /// Always a full URL: CDN-joined art or the placeholder.
    pub poster_url: String,
    /// Release year, when the API supplied a date.
    pub year: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct MetadataPage {
    pub results: Vec<MetadataMovie>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
    #[serde(default)]
    page: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: i64,
    title: String,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl MetadataClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, METADATA_API_BASE.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    /// Search movies by title. `page` is 1-based.
    #[tracing::instrument(skip(self), fields(api.operation = "search_movie"))]
    pub async fn search(&self, term: &str, page: u32) -> AppResult<MetadataPage> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(MetadataPage::default());
        }

        let response = self
            .client
            .get(format!("{}/search/movie", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", term),
                ("page", &page.max(1).to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Remote(format!(
                "metadata search failed with {}: {}",
                status, body
            )));
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(MetadataPage {
            results: parsed.results.into_iter().map(into_movie).collect(),
            page: parsed.page,
            total_pages: parsed.total_pages,
            total_results: parsed.total_results,
        })
    }
}

fn into_movie(result: SearchResult) -> MetadataMovie {
    let poster_url = match result.poster_path.as_deref() {
        Some(path) if !path.is_empty() => format!("{}{}", METADATA_IMAGE_BASE, path),
        _ => POSTER_PLACEHOLDER_URL.to_string(),
    };
    let year = result
        .release_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .filter(|y| !y.is_empty())
        .map(|y| y.to_string());
    MetadataMovie {
        id: result.id,
        title: result.title,
        poster_url,
        year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_joins_poster_paths_and_extracts_years() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search/movie")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("query".to_string(), "matrix".to_string()),
                mockito::Matcher::UrlEncoded("page".to_string(), "1".to_string()),
                mockito::Matcher::UrlEncoded("api_key".to_string(), "k".to_string()),
            ]))
            .with_status(200)
            .with_body(
                r#"{
                  "page": 1, "total_pages": 1, "total_results": 2,
                  "results": [
                    {"id": 603, "title": "The Matrix", "poster_path": "/abc.jpg", "release_date": "1999-03-31"},
                    {"id": 604, "title": "Obscure Matrix", "poster_path": null, "release_date": ""}
                  ]
                }"#,
            )
            .create_async()
            .await;

        let client = MetadataClient::with_base_url("k".to_string(), server.url());
        let page = client.search("matrix", 1).await.unwrap();
        mock.assert_async().await;

        assert_eq!(page.total_results, 2);
        assert_eq!(
            page.results[0].poster_url,
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(page.results[0].year.as_deref(), Some("1999"));
        assert_eq!(page.results[1].poster_url, POSTER_PLACEHOLDER_URL);
        assert_eq!(page.results[1].year, None);
    }

    #[tokio::test]
    async fn blank_term_short_circuits_without_a_request() {
        let client = MetadataClient::with_base_url(
            "k".to_string(),
            "http://127.0.0.1:1".to_string(),
        );
        let page = client.search("   ", 1).await.unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total_results, 0);
    }

    #[tokio::test]
    async fn non_success_status_surfaces_the_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search/movie")
            .match_query(mockito::Matcher::Any)
            .with_status(401)
            .with_body(r#"{"status_message":"Invalid API key"}"#)
            .create_async()
            .await;

        let client = MetadataClient::with_base_url("bad".to_string(), server.url());
        let err = client.search("matrix", 1).await.unwrap_err();
        assert!(err.to_string().contains("Invalid API key"));
    }
}
