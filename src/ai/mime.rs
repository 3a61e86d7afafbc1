/// Sniffs the raster format from the leading magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        _ => None,
    }
}

/// Picks the MIME type for a decoded payload.
///
/// A declared `image/*` type wins; otherwise the bytes are sniffed, falling
/// back to `image/png`.
pub fn resolve_image_mime(declared: Option<&str>, bytes: &[u8]) -> String {
    if let Some(declared) = declared.filter(|m| m.starts_with("image/")) {
        return declared.to_string();
    }

    match sniff_image_mime(bytes) {
        Some(mime) => mime.to_string(),
        None => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/png",
                &bytes[..bytes.len().min(4)]
            );
            "image/png".to_string()
        }
    }
}
