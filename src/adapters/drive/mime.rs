/// MIME type for an upload, by file extension. Unknown extensions are sent as
/// `application/octet-stream`.
pub fn guess_mime_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("foto.JPG"), "image/jpeg");
        assert_eq!(guess_mime_type("pic.jpe"), "image/jpeg");
        assert_eq!(guess_mime_type("/tmp/silla.png"), "image/png");
        assert_eq!(guess_mime_type("scan.webp"), "image/webp");
        assert_eq!(guess_mime_type("scan.avif"), "image/avif");
        assert_eq!(guess_mime_type("icon.ico"), "image/x-icon");
        assert_eq!(guess_mime_type("README"), "application/octet-stream");
    }
}
