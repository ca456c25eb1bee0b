/// Canonicalize raw engine text: uppercase, with spaces and hyphens removed.
///
/// Total and idempotent; empty input yields empty output. Characters the
/// engine may have confused for look-alikes (O/0, I/1) are left as
/// recognized, and the grammar match runs on the text as-is.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}
