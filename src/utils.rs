use url::Url;

/// How much of an extracted section is echoed into debug logs
pub const LOG_PREVIEW_CHARS: usize = 100;

/// Path of the recommendation endpoint relative to the backend base URL
pub const GENERATE_PATH: &str = "generate";

/// Returns at most `max_chars` characters of `text`, cut on a character boundary
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Builds `{base}/generate`, keeping any path prefix the base already carries
pub fn generate_endpoint(base_url: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(GENERATE_PATH)
}
