/// Replace HTML metacharacters with their named entities.
///
/// `&` is handled first; the entity text produced by the later
/// substitutions contains `&` and must not be escaped again.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}
