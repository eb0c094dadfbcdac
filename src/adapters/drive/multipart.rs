use base64::{engine::general_purpose::STANDARD, Engine};
use rand::{distributions::Alphanumeric, Rng};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    pub name: String,
    pub parents: Vec<String>,
}

/// A `multipart/related` upload body: JSON metadata, then the base64 file content.
#[derive(Debug, Clone)]
pub struct MultipartRelated {
    pub boundary: String,
    pub body: String,
}

impl MultipartRelated {
    pub fn new(
        metadata: &FileMetadata,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<Self, serde_json::Error> {
        Self::with_boundary(random_boundary(), metadata, mime_type, bytes)
    }

    pub fn with_boundary(
        boundary: String,
        metadata: &FileMetadata,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<Self, serde_json::Error> {
        let delimiter = format!("\r\n--{}\r\n", boundary);
        let close_delimiter = format!("\r\n--{}--", boundary);

        let body = format!(
            "{delimiter}Content-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\
             {delimiter}Content-Type: {mime_type}\r\nContent-Transfer-Encoding: base64\r\n\r\n{content}\
             {close_delimiter}",
            metadata = serde_json::to_string(metadata)?,
            content = STANDARD.encode(bytes),
        );

        Ok(Self { boundary, body })
    }

    pub fn content_type(&self) -> String {
        format!("multipart/related; boundary={}", self.boundary)
    }
}

fn random_boundary() -> String {
    let suffix = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect::<String>();
    format!("inventory-{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> FileMetadata {
        FileMetadata {
            name: "asset_1_silla.png".into(),
            parents: vec!["folder-9".into()],
        }
    }

    #[test]
    fn test_body_layout() {
        let multipart =
            MultipartRelated::with_boundary("b0undary".into(), &metadata(), "image/png", b"png!")
                .unwrap();

        assert_eq!(
            multipart.body,
            "\r\n--b0undary\r\n\
             Content-Type: application/json; charset=UTF-8\r\n\r\n\
             {\"name\":\"asset_1_silla.png\",\"parents\":[\"folder-9\"]}\
             \r\n--b0undary\r\n\
             Content-Type: image/png\r\nContent-Transfer-Encoding: base64\r\n\r\n\
             cG5nIQ==\
             \r\n--b0undary--"
        );
        assert_eq!(
            multipart.content_type(),
            "multipart/related; boundary=b0undary"
        );
    }

    #[test]
    fn test_random_boundaries_differ() {
        let first = MultipartRelated::new(&metadata(), "image/png", b"x").unwrap();
        let second = MultipartRelated::new(&metadata(), "image/png", b"x").unwrap();
        assert_ne!(first.boundary, second.boundary);
        assert!(first.body.ends_with(&format!("--{}--", first.boundary)));
    }
}
