use serde::Deserialize;

use crate::error::RelayError;

/// Number of entries requested by the sample listing
pub const SAMPLE_PAGE_SIZE: u32 = 10;

/// One file's metadata from a Drive listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Minimal Drive v3 client for the sample authenticated call.
#[derive(Debug, Clone)]
pub struct DriveClient {
    base_url: String,
    http: reqwest::Client,
}

impl DriveClient {
    /// Create a new Drive client sharing the given HTTP client
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// List file metadata (`id` and `name`), at most `page_size` entries.
    pub async fn list_files(
        &self,
        access_token: &str,
        page_size: u32,
    ) -> Result<Vec<DriveFile>, RelayError> {
        let mut url = url::Url::parse(&format!("{}/files", self.base_url.trim_end_matches('/')))?;
        url.query_pairs_mut()
            .append_pair("pageSize", &page_size.to_string())
            .append_pair("fields", "nextPageToken, files(id, name)");

        let response = self.http.get(url).bearer_auth(access_token).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(RelayError::ApiError { status, message });
        }

        let list: FileListResponse = response.json().await?;
        Ok(list.files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_list_files_parses_metadata() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/files")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pageSize".into(), "10".into()),
                Matcher::UrlEncoded("fields".into(), "nextPageToken, files(id, name)".into()),
            ]))
            .match_header("authorization", "Bearer access-123")
            .with_status(200)
            .with_body(
                r#"{"files":[{"id":"f1","name":"notes.txt"},{"id":"f2","name":"report.pdf"}]}"#,
            )
            .create_async()
            .await;

        let client = DriveClient::new(server.url(), reqwest::Client::new());
        let files = client
            .list_files("access-123", SAMPLE_PAGE_SIZE)
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].id, "f1");
        assert_eq!(files[0].name, "notes.txt");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_files_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/files")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error":{"message":"insufficient scopes"}}"#)
            .create_async()
            .await;

        let client = DriveClient::new(server.url(), reqwest::Client::new());
        let err = client
            .list_files("access-123", SAMPLE_PAGE_SIZE)
            .await
            .unwrap_err();

        match err {
            RelayError::ApiError { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("insufficient scopes"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
