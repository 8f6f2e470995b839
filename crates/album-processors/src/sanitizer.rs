/// Maps arbitrary text to a name that is safe to use as a file or folder name.
///
/// Keeps alphanumeric characters (any script), spaces, hyphens and underscores,
/// drops everything else and trims the result. Distinct inputs may collapse to
/// the same name; whoever writes last wins.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim()
        .to_string()
}
