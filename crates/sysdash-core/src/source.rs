//! Raw sources: where a stage gets its bytes from
//!
//! A source yields either the whole payload or `Unavailable` (the subsystem
//! answered, but not with success). Anything else is a propagated error.
use crate::error::{Result, SysdashError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePayload {
    Records(Vec<u8>),
    Unavailable { status: u16 },
}

#[async_trait]
pub trait RawRecordSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<SourcePayload>;
}

/// Whole-file source for the delimited text feeds.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RawRecordSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<SourcePayload> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SysdashError::Source {
                path: self.path.clone(),
                source,
            })?;
        Ok(SourcePayload::Records(bytes))
    }
}

/// JSON-over-HTTP source. One GET per fetch, no retry, no deadline.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RawRecordSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<SourcePayload> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SysdashError::transport(&self.url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(SourcePayload::Unavailable {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SysdashError::transport(&self.url, e))?;
        Ok(SourcePayload::Records(body.to_vec()))
    }
}

/// In-memory payload. Handy for fixtures.
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: SourcePayload,
}

impl StaticSource {
    pub fn records(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: SourcePayload::Records(bytes.into()),
        }
    }

    pub fn unavailable(status: u16) -> Self {
        Self {
            payload: SourcePayload::Unavailable { status },
        }
    }
}

#[async_trait]
impl RawRecordSource for StaticSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn fetch(&self) -> Result<SourcePayload> {
        Ok(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_source_reads_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "RU;41;1040;Topolo\nUS;36;1576;Rond").unwrap();

        let payload = FileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(
            payload,
            SourcePayload::Records(b"RU;41;1040;Topolo\nUS;36;1576;Rond".to_vec())
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_source_error() {
        let err = FileSource::new("/no/such/sms.data").fetch().await.unwrap_err();
        assert!(matches!(err, SysdashError::Source { .. }));
    }

    #[tokio::test]
    async fn test_http_source_success() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/mms");
            then.status(200).body(r#"[{"country":"US"}]"#);
        });

        let source = HttpSource::new(Client::new(), server.url("/mms"));
        let payload = source.fetch().await.unwrap();

        mock.assert();
        assert_eq!(payload, SourcePayload::Records(br#"[{"country":"US"}]"#.to_vec()));
    }

    #[tokio::test]
    async fn test_http_source_non_success_is_unavailable() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/support");
            then.status(500);
        });

        let source = HttpSource::new(Client::new(), server.url("/support"));
        assert_eq!(
            source.fetch().await.unwrap(),
            SourcePayload::Unavailable { status: 500 }
        );
    }

    #[tokio::test]
    async fn test_http_source_unreachable_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let source = HttpSource::new(Client::new(), "http://127.0.0.1:9/incident");
        let err = source.fetch().await.unwrap_err();
        assert!(err.to_string().starts_with("TRANSPORT/"));
    }
}
