/// Canonical form used to join region names with demand tables:
/// trimmed, upper-cased, with acute-accented vowels folded to plain ASCII.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' => 'U',
            other => other,
        })
        .collect()
}
