pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Extracts the value of the `list` query parameter from a playlist or watch URL.
pub(crate) fn playlist_id_from_url(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("list=")?;
    let id = rest.split(['&', '#']).next().unwrap_or_default();

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
