use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;

use super::error::AniListError;
use super::types::{GraphQLResponse, MediaListResponse, MediaResponse, SaveMediaListEntryResponse};
use crate::traits::ProgressTracker;

pub const API_URL: &str = "https://graphql.anilist.co";

const GET_ID_QUERY: &str = r#"
query ($searchStr: String) {
    Media(search: $searchStr, type: ANIME) {
        id
    }
}
"#;

const GET_PROGRESS_QUERY: &str = r#"
query ($userName: String, $mediaId: Int) {
    MediaList(userName: $userName, mediaId: $mediaId) {
        progress
    }
}
"#;

const UPDATE_PROGRESS_MUTATION: &str = r#"
mutation ($mediaId: Int, $progress: Int) {
    SaveMediaListEntry(mediaId: $mediaId, progress: $progress) {
        progress
    }
}
"#;

/// AniList GraphQL API client.
///
/// Lookups are anonymous and read the configured user's public list; only
/// the progress mutation sends the access token.
pub struct AniListClient {
    endpoint: String,
    user_name: String,
    access_token: String,
    http: Client,
}

impl AniListClient {
    pub fn new(
        endpoint: impl Into<String>,
        user_name: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AniListError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, endpoint, user_name, access_token))
    }

    fn with_http(
        http: Client,
        endpoint: impl Into<String>,
        user_name: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_name: user_name.into(),
            access_token: access_token.into(),
            http,
        }
    }

    /// POST a query and return the decoded JSON body.
    ///
    /// AniList reports GraphQL errors with 4xx statuses and a JSON body, so
    /// any JSON body is returned regardless of status. A non-JSON body on an
    /// error status becomes [`AniListError::Api`].
    pub async fn call(
        &self,
        query: &str,
        variables: Value,
        authenticated: bool,
    ) -> Result<Value, AniListError> {
        let mut request = self.http.post(&self.endpoint);
        if authenticated {
            request = request
                .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json");
        }

        let resp = request
            .json(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(json) => {
                if !status.is_success() {
                    tracing::warn!(status = status.as_u16(), "AniList returned an error status");
                }
                Ok(json)
            }
            Err(_) if !status.is_success() => {
                tracing::warn!(status = status.as_u16(), "AniList API error");
                Err(AniListError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
            Err(e) => Err(AniListError::Parse(e.to_string())),
        }
    }

    async fn graphql_request<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
        authenticated: bool,
    ) -> Result<GraphQLResponse<T>, AniListError> {
        tracing::debug!(operation, authenticated, "AniList GraphQL request");
        let body = self.call(query, variables, authenticated).await?;
        serde_json::from_value(body).map_err(|e| AniListError::Parse(e.to_string()))
    }
}

impl ProgressTracker for AniListClient {
    type Error = AniListError;

    async fn get_id(&self, title: &str) -> Result<Option<u64>, AniListError> {
        let resp: GraphQLResponse<MediaResponse> = self
            .graphql_request(
                "GetId",
                GET_ID_QUERY,
                serde_json::json!({ "searchStr": title }),
                false,
            )
            .await?;
        Ok(media_id(resp))
    }

    async fn get_progress(&self, media_id: u64) -> Result<u32, AniListError> {
        let resp: GraphQLResponse<MediaListResponse> = self
            .graphql_request(
                "GetProgress",
                GET_PROGRESS_QUERY,
                serde_json::json!({
                    "userName": self.user_name,
                    "mediaId": media_id,
                }),
                false,
            )
            .await?;
        list_progress(resp, media_id)
    }

    async fn update_progress(&self, media_id: u64, progress: u32) -> Result<u32, AniListError> {
        let resp: GraphQLResponse<SaveMediaListEntryResponse> = self
            .graphql_request(
                "UpdateProgress",
                UPDATE_PROGRESS_MUTATION,
                serde_json::json!({
                    "mediaId": media_id,
                    "progress": progress,
                }),
                true,
            )
            .await?;
        saved_progress(resp, progress)
    }
}

/// Any reported error means "no match".
fn media_id(resp: GraphQLResponse<MediaResponse>) -> Option<u64> {
    if let Some(message) = resp.error_message() {
        tracing::debug!(%message, "AniList search returned no match");
        return None;
    }
    resp.data.and_then(|d| d.media).map(|m| m.id)
}

fn list_progress(
    resp: GraphQLResponse<MediaListResponse>,
    media_id: u64,
) -> Result<u32, AniListError> {
    if resp.has_errors() && !resp.is_not_found() {
        return Err(AniListError::GraphQl(resp.error_message().unwrap_or_default()));
    }
    resp.data
        .and_then(|d| d.media_list)
        .map(|entry| entry.progress.unwrap_or(0))
        .ok_or(AniListError::NotOnList(media_id))
}

fn saved_progress(
    resp: GraphQLResponse<SaveMediaListEntryResponse>,
    requested: u32,
) -> Result<u32, AniListError> {
    if let Some(message) = resp.error_message() {
        return Err(AniListError::GraphQl(message));
    }
    resp.data
        .and_then(|d| d.entry)
        .map(|entry| entry.progress.unwrap_or(requested))
        .ok_or_else(|| AniListError::Parse("SaveMediaListEntry returned no entry".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    fn fixture<T: serde::de::DeserializeOwned>(json: &str) -> GraphQLResponse<T> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_media_id_first_match() {
        assert_eq!(media_id(fixture(r#"{"data":{"Media":{"id":21}}}"#)), Some(21));
    }

    #[test]
    fn test_media_id_none_on_errors_or_no_media() {
        let not_found = r#"{"errors":[{"message":"Not Found.","status":404}],"data":{"Media":null}}"#;
        assert_eq!(media_id(fixture(not_found)), None);
        assert_eq!(media_id(fixture(r#"{"data":{"Media":null}}"#)), None);
        assert_eq!(media_id(fixture(r#"{"data":null}"#)), None);
    }

    #[test]
    fn test_list_progress() {
        let resp = fixture(r#"{"data":{"MediaList":{"progress":12}}}"#);
        assert_eq!(list_progress(resp, 1).unwrap(), 12);

        let resp = fixture(r#"{"data":{"MediaList":{"progress":null}}}"#);
        assert_eq!(list_progress(resp, 1).unwrap(), 0);
    }

    #[test]
    fn test_list_progress_missing_entry_is_not_on_list() {
        let resp = fixture(r#"{"data":{"MediaList":null}}"#);
        let err = list_progress(resp, 5114).unwrap_err();
        assert!(matches!(err, AniListError::NotOnList(5114)));
        assert_eq!(err.to_string(), "AniList ID 5114 is not on your AniList.");

        let resp = fixture(
            r#"{"errors":[{"message":"Not Found.","status":404}],"data":{"MediaList":null}}"#,
        );
        assert!(matches!(
            list_progress(resp, 5114),
            Err(AniListError::NotOnList(5114))
        ));
    }

    #[test]
    fn test_list_progress_other_errors_propagate() {
        let resp = fixture(r#"{"errors":[{"message":"Too Many Requests.","status":429}],"data":null}"#);
        assert!(matches!(
            list_progress(resp, 1),
            Err(AniListError::GraphQl(msg)) if msg == "Too Many Requests."
        ));
    }

    #[test]
    fn test_saved_progress() {
        let resp = fixture(r#"{"data":{"SaveMediaListEntry":{"progress":4}}}"#);
        assert_eq!(saved_progress(resp, 4).unwrap(), 4);

        let resp = fixture(r#"{"errors":[{"message":"Invalid token","status":400}],"data":null}"#);
        assert!(matches!(
            saved_progress(resp, 4),
            Err(AniListError::GraphQl(msg)) if msg == "Invalid token"
        ));
    }

    // ── Transport ────────────────────────────────────────────────

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{addr}/"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn test_client(endpoint: String) -> AniListClient {
        let http = Client::builder().no_proxy().build().unwrap();
        AniListClient::with_http(http, endpoint, "tormented", "secret-token")
    }

    #[tokio::test]
    async fn test_unauthenticated_call_has_no_bearer() {
        let (endpoint, server) = serve_once("200 OK", r#"{"data":{"Media":{"id":1}}}"#).await;
        let client = test_client(endpoint);

        assert_eq!(client.get_id("Cowboy Bebop").await.unwrap(), Some(1));

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("post "));
        assert!(!request.contains("authorization:"));
        assert!(request.contains("cowboy bebop"));
    }

    #[tokio::test]
    async fn test_mutation_sends_bearer_token() {
        let (endpoint, server) =
            serve_once("200 OK", r#"{"data":{"SaveMediaListEntry":{"progress":3}}}"#).await;
        let client = test_client(endpoint);

        assert_eq!(client.update_progress(1, 3).await.unwrap(), 3);

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(lower.contains("authorization: bearer secret-token"));
        assert!(lower.contains("accept: application/json"));
        assert!(request.contains("SaveMediaListEntry"));
    }

    #[tokio::test]
    async fn test_error_status_with_json_body_is_parsed() {
        let (endpoint, _server) = serve_once(
            "404 Not Found",
            r#"{"errors":[{"message":"Not Found.","status":404}],"data":{"MediaList":null}}"#,
        )
        .await;
        let client = test_client(endpoint);

        assert!(matches!(
            client.get_progress(42).await,
            Err(AniListError::NotOnList(42))
        ));
    }

    #[tokio::test]
    async fn test_error_status_without_json_is_api_error() {
        let (endpoint, _server) = serve_once("502 Bad Gateway", "upstream unavailable").await;
        let client = test_client(endpoint);

        match client.call("query { x }", serde_json::json!({}), false).await {
            Err(AniListError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
