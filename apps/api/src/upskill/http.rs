use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::ResourceError;
use crate::models::ResourceRef;
use crate::upskill::ResourceProvider;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Course-catalog service reached over HTTP.
/// `GET {base_url}/resources?skill=<name>` must return a JSON array of
/// `{title, platform, url}`.
#[derive(Clone)]
pub struct HttpResourceProvider {
    client: Client,
    base_url: String,
}

impl HttpResourceProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ResourceError> {
        let client = Client::builder().timeout(LOOKUP_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/resources", self.base_url)
    }
}

#[async_trait]
impl ResourceProvider for HttpResourceProvider {
    async fn lookup(&self, skill: &str) -> Result<Vec<ResourceRef>, ResourceError> {
        debug!("Looking up resources for '{skill}'");
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("skill", skill)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResourceError::Status(status.as_u16()));
        }
        Ok(response.json::<Vec<ResourceRef>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde::Deserialize;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let provider = HttpResourceProvider::new("http://courses.local/api/").unwrap();
        assert_eq!(provider.endpoint(), "http://courses.local/api/resources");
    }

    #[derive(Deserialize)]
    struct SkillQuery {
        skill: String,
    }

    /// Serves a course list for "sql" and 503 for every other skill.
    async fn course_service() -> String {
        let app = Router::new().route(
            "/resources",
            get(|Query(q): Query<SkillQuery>| async move {
                if q.skill == "sql" {
                    Ok(Json(vec![ResourceRef {
                        title: "SQL Basics".to_string(),
                        platform: "Udacity".to_string(),
                        url: "https://example.com/sql".to_string(),
                    }]))
                } else {
                    Err(StatusCode::SERVICE_UNAVAILABLE)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_lookup_parses_resource_list() {
        let provider = HttpResourceProvider::new(course_service().await).unwrap();
        let refs = provider.lookup("sql").await.unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].title, "SQL Basics");
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let provider = HttpResourceProvider::new(course_service().await).unwrap();
        let err = provider.lookup("cobol").await.unwrap_err();
        assert!(matches!(err, ResourceError::Status(503)));
    }
}
