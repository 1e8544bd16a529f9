use filmoteca_core::models::SortKey;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Guess an image MIME type from a file extension. Defaults to JPEG.
pub fn content_type_for(path: &std::path::Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("avif") => "image/avif",
        _ => "image/jpeg",
    }
}

/// Parse a `--sort` flag: `column`, `column.asc`, or `column.desc`.
pub fn parse_sort(arg: &str) -> SortKey {
    match arg.rsplit_once('.') {
        Some((column, "desc")) => SortKey::desc(column),
        Some((column, "asc")) => SortKey::asc(column),
        _ => SortKey::asc(arg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn content_type_covers_the_common_image_formats() {
        assert_eq!(content_type_for(Path::new("poster.png")), "image/png");
        assert_eq!(content_type_for(Path::new("poster.WEBP")), "image/webp");
        assert_eq!(content_type_for(Path::new("poster.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("poster")), "image/jpeg");
    }

    #[test]
    fn sort_flags_parse_direction_suffixes() {
        assert_eq!(parse_sort("title"), SortKey::asc("title"));
        assert_eq!(parse_sort("title.asc"), SortKey::asc("title"));
        assert_eq!(parse_sort("year_film.desc"), SortKey::desc("year_film"));
        // An unknown suffix is part of the column name.
        assert_eq!(parse_sort("a.b"), SortKey::asc("a.b"));
    }
}
