/// Apply a description length limit.
///
/// `Some(0)` drops the description entirely. A description longer than
/// `max_len` bytes is cut at the last whitespace inside the limit and
/// suffixed with `...`; without any whitespace it is cut hard at the limit.
pub fn truncate_description(description: &str, max_len: Option<usize>) -> Option<String> {
    let max_len = match max_len {
        None => return Some(description.to_string()),
        Some(0) => return None,
        Some(n) => n,
    };
    if description.len() <= max_len {
        return Some(description.to_string());
    }

    let mut cut = max_len;
    while !description.is_char_boundary(cut) {
        cut -= 1;
    }
    let head = &description[..cut];
    match head.rfind(char::is_whitespace) {
        Some(n) if n > 0 => Some(format!("{}...", &head[..n])),
        _ => Some(head.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_description;

    #[test]
    fn unlimited_keeps_text() {
        assert_eq!(
            truncate_description("A widget.", None).as_deref(),
            Some("A widget.")
        );
    }

    #[test]
    fn zero_drops_text() {
        assert_eq!(truncate_description("A widget.", Some(0)), None);
    }

    #[test]
    fn long_text_is_cut_at_word_boundary() {
        assert_eq!(
            truncate_description("Widget spec describes the desired state", Some(14)).as_deref(),
            Some("Widget spec...")
        );
        assert_eq!(
            truncate_description("Supercalifragilistic", Some(5)).as_deref(),
            Some("Super")
        );
    }
}
