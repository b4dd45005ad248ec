/// Remove every Unicode whitespace character from `raw`.
///
/// All other characters are kept in their original order. Users tend to
/// paste VAT numbers in printed form ("DE 123 456 789"); the service only
/// accepts the compact form.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ascii_spaces() {
        assert_eq!(normalize(" DE 1234 56789 "), "DE123456789");
    }

    #[test]
    fn strips_tabs_newlines_and_nbsp() {
        assert_eq!(normalize("LU\t263\n752\u{00A0}45"), "LU26375245");
    }

    #[test]
    fn keeps_punctuation() {
        assert_eq!(normalize("CHE-123.456.789"), "CHE-123.456.789");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
