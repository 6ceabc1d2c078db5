use super::{
    types::{ChannelResponse, DownloadUrlResponse, ResourcesResponse},
    ApiError, ChannelContent, ChannelNode, ContentKind, MediaServerApi, Resource,
};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

const API_PREFIX: &str = "api/v2/";

/// `MediaServerApi` over HTTP.
pub struct MediaServerClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl MediaServerClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = api_base_url(&config.server_url)
            .with_context(|| format!("Invalid server_url {}", config.server_url))?;

        let client = reqwest::Client::builder()
            .timeout(config.effective_timeout())
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(endpoint)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint_url(endpoint, params)?;
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("Api-Key", key);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_response(status, &body)
    }
}

fn api_base_url(server_url: &str) -> Result<Url, url::ParseError> {
    let root = format!("{}/", server_url.trim().trim_end_matches('/'));
    Url::parse(&root)?.join(API_PREFIX)
}

fn error_message(value: &Value) -> Option<String> {
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| body.trim().chars().take(200).collect());
        return Err(ApiError::Status { status, message });
    }

    let value: Value = serde_json::from_str(body)?;
    if value.get("success") == Some(&Value::Bool(false)) {
        let message = error_message(&value).unwrap_or_else(|| "unknown error".to_string());
        return Err(ApiError::Server(message));
    }

    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl MediaServerApi for MediaServerClient {
    async fn check_server(&self) -> Result<(), ApiError> {
        self.get::<Value>("", &[]).await.map(|_| ())
    }

    async fn get_channel(&self, oid: &str) -> Result<ChannelNode, ApiError> {
        let response: ChannelResponse = self.get("channels/get/", &[("oid", oid)]).await?;
        Ok(response.info)
    }

    async fn list_channel_content(
        &self,
        parent_oid: &str,
        kinds: &[ContentKind],
    ) -> Result<ChannelContent, ApiError> {
        let content = ContentKind::query_value(kinds);
        self.get(
            "channels/content/",
            &[("parent_oid", parent_oid), ("content", &content)],
        )
        .await
    }

    async fn list_resources(&self, oid: &str) -> Result<Vec<Resource>, ApiError> {
        let response: ResourcesResponse =
            self.get("medias/resources-list/", &[("oid", oid)]).await?;
        Ok(response.resources)
    }

    async fn get_download_url(&self, oid: &str, file: &str) -> Result<String, ApiError> {
        let response: DownloadUrlResponse = self
            .get(
                "download/",
                &[("oid", oid), ("url", file), ("redirect", "no")],
            )
            .await?;
        Ok(response.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(server_url: &str) -> MediaServerClient {
        let config = Config::from_toml(&format!("server_url = \"{}\"", server_url)).unwrap();
        MediaServerClient::new(&config).unwrap()
    }

    #[test]
    fn test_api_base_url() {
        assert_eq!(
            api_base_url("https://ms.example.com").unwrap().as_str(),
            "https://ms.example.com/api/v2/"
        );
        assert_eq!(
            api_base_url("https://ms.example.com/").unwrap().as_str(),
            "https://ms.example.com/api/v2/"
        );
        assert_eq!(
            api_base_url("https://example.com/mediaserver").unwrap().as_str(),
            "https://example.com/mediaserver/api/v2/"
        );
        assert!(api_base_url("not a url").is_err());
    }

    #[test]
    fn test_endpoint_url_encodes_params() {
        let client = test_client("https://ms.example.com");
        let url = client
            .endpoint_url(
                "download/",
                &[("oid", "v1"), ("url", "media/a b.mp4"), ("redirect", "no")],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://ms.example.com/api/v2/download/?oid=v1&url=media%2Fa+b.mp4&redirect=no"
        );

        let root = client.endpoint_url("", &[]).unwrap();
        assert_eq!(root.as_str(), "https://ms.example.com/api/v2/");
    }

    #[test]
    fn test_parse_success() {
        let response: DownloadUrlResponse =
            parse_response(200, r#"{"success": true, "url": "https://cdn/x.mp4"}"#).unwrap();
        assert_eq!(response.url, "https://cdn/x.mp4");
    }

    #[test]
    fn test_parse_application_error() {
        let err = parse_response::<Value>(200, r#"{"success": false, "error": "Access denied"}"#)
            .unwrap_err();
        assert!(matches!(err, ApiError::Server(ref m) if m == "Access denied"));
    }

    #[test]
    fn test_parse_http_error() {
        let err = parse_response::<Value>(404, r#"{"success": false, "message": "No channel"}"#)
            .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "No channel");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_response::<Value>(502, "Bad Gateway\n").unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 502, ref message } if message == "Bad Gateway"));
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = parse_response::<Value>(200, "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let err = parse_response::<DownloadUrlResponse>(200, r#"{"success": true}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
