//! Batch-lookup client for a remote dictionary service.
//!
//! Request: `POST <endpoint>` with `{"words": ["kitap", ...]}`.
//! Response: a JSON object mapping case-folded words to script strings;
//! words without an entry are simply absent.

use std::collections::HashMap;
use std::time::Duration;

use harf_core::dict::{DictionaryClient, DictionaryMapping, LookupError};
use harf_core::settings::LookupSettings;
use serde::Serialize;
use tracing::debug;
use ureq::Agent;

#[derive(Serialize)]
struct BatchRequest<'a> {
    words: &'a [String],
}

pub struct HttpDictionaryClient {
    agent: Agent,
    endpoint: String,
}

impl HttpDictionaryClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Client for the configured endpoint, or `None` if none is set.
    pub fn from_settings(settings: &LookupSettings) -> Option<Self> {
        settings
            .endpoint
            .as_ref()
            .map(|url| Self::new(url.clone(), settings.timeout()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(e: ureq::Error) -> LookupError {
    match e {
        ureq::Error::Timeout(_) => LookupError::Timeout,
        other => LookupError::Transport(other.to_string()),
    }
}

impl DictionaryClient for HttpDictionaryClient {
    fn batch_lookup(&self, words: &[String]) -> Result<DictionaryMapping, LookupError> {
        let mut response = self
            .agent
            .post(&self.endpoint)
            .send_json(&BatchRequest { words })
            .map_err(transport_error)?;

        let raw: HashMap<String, String> = response
            .body_mut()
            .read_json()
            .map_err(|e| match e {
                ureq::Error::Timeout(_) => LookupError::Timeout,
                other => LookupError::Decode(other.to_string()),
            })?;

        debug!(endpoint = %self.endpoint, requested = words.len(), hits = raw.len(), "http batch lookup");
        Ok(DictionaryMapping::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one request with `body`, returning the request body received.
    fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/dictionary/batch", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut content_length = 0usize;
            let mut chunked = false;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    } else if name.eq_ignore_ascii_case("transfer-encoding") {
                        chunked = value.trim().eq_ignore_ascii_case("chunked");
                    }
                }
            }
            let mut request_body = Vec::new();
            if chunked {
                loop {
                    let mut size_line = String::new();
                    reader.read_line(&mut size_line).unwrap();
                    let size = usize::from_str_radix(size_line.trim(), 16).unwrap();
                    let mut chunk = vec![0u8; size + 2];
                    reader.read_exact(&mut chunk).unwrap();
                    if size == 0 {
                        break;
                    }
                    request_body.extend_from_slice(&chunk[..size]);
                }
            } else {
                request_body.resize(content_length, 0);
                reader.read_exact(&mut request_body).unwrap();
            }
            let _ = tx.send(String::from_utf8(request_body).unwrap());

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });
        (url, rx)
    }

    #[test]
    fn test_batch_lookup_round_trip() {
        let (url, requests) = serve_once("200 OK", r#"{"Kitap": "كتاب"}"#);
        let client = HttpDictionaryClient::new(url, Duration::from_secs(5));
        let words = vec!["kitap".to_string(), "ev".to_string()];
        let mapping = client.batch_lookup(&words).unwrap();

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("kitap"), Some("كتاب"));
        assert_eq!(mapping.get("ev"), None);

        let sent: serde_json::Value =
            serde_json::from_str(&requests.recv_timeout(Duration::from_secs(5)).unwrap()).unwrap();
        assert_eq!(sent, serde_json::json!({"words": ["kitap", "ev"]}));
    }

    #[test]
    fn test_malformed_response_is_decode_error() {
        let (url, _requests) = serve_once("200 OK", r#"["not", "a", "map"]"#);
        let client = HttpDictionaryClient::new(url, Duration::from_secs(5));
        let err = client.batch_lookup(&["ev".to_string()]).unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_server_error_is_transport_error() {
        let (url, _requests) = serve_once("500 Internal Server Error", "{}");
        let client = HttpDictionaryClient::new(url, Duration::from_secs(5));
        let err = client.batch_lookup(&["ev".to_string()]).unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)), "got {err:?}");
    }

    #[test]
    fn test_unreachable_endpoint_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/batch", listener.local_addr().unwrap());
        drop(listener);
        let client = HttpDictionaryClient::new(url, Duration::from_millis(500));
        assert!(client.batch_lookup(&["ev".to_string()]).is_err());
    }

    #[test]
    fn test_from_settings() {
        assert!(HttpDictionaryClient::from_settings(&LookupSettings::default()).is_none());
        let settings = LookupSettings {
            timeout_ms: 100,
            endpoint: Some("http://127.0.0.1:9/batch".to_string()),
        };
        let client = HttpDictionaryClient::from_settings(&settings).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/batch");
    }
}
