//! TEXT value escaping for the properties we emit.

/// Escape a free-text value: `\` becomes `\\`, `,` becomes `\,` and line
/// breaks (LF, CRLF or a bare CR) become `\n`.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                escaped.push_str("\\n");
            }
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Reverse of [`escape_text`]. Unknown escape sequences are kept verbatim.
pub fn unescape_text(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.peek() {
            Some('\\') => {
                chars.next();
                unescaped.push('\\');
            }
            Some(',') => {
                chars.next();
                unescaped.push(',');
            }
            Some('n') | Some('N') => {
                chars.next();
                unescaped.push('\n');
            }
            _ => unescaped.push(c),
        }
    }

    unescaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_commas_and_newlines() {
        assert_eq!(escape_text("12 Farm Rd, Springfield"), "12 Farm Rd\\, Springfield");
        assert_eq!(escape_text("Name: Jane\nPhone: "), "Name: Jane\\nPhone: ");
        assert_eq!(escape_text("a\r\nb"), "a\\nb");
        assert_eq!(escape_text("a\rb"), "a\\nb");
        assert_eq!(escape_text("C:\\temp"), "C:\\\\temp");
        assert_eq!(escape_text("plain"), "plain");
    }

    #[test]
    fn unescape_recovers_commas_and_newlines() {
        let samples = [
            "",
            ",",
            "\n",
            ",\n,\n",
            "Provider: Dr. Smith\n\nNotes:\n---------------\nNote: Max, Bella\nAmy\n",
            "Patients: 4 patients in this appointment",
            "Zoë, Ünal\nCafé",
            "C:\\new folder, notes\nline",
            "\\,\\n\\",
        ];
        for sample in samples {
            assert_eq!(unescape_text(&escape_text(sample)), sample);
        }
    }

    #[test]
    fn escaped_text_has_no_raw_line_breaks() {
        let escaped = escape_text("one\ntwo\r\nthree\rfour");
        assert!(!escaped.contains('\n'));
        assert!(!escaped.contains('\r'));
    }

    #[test]
    fn unknown_escapes_are_kept() {
        assert_eq!(unescape_text("C:\\temp"), "C:\\temp");
        assert_eq!(unescape_text("a\\;b"), "a\\;b");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
    }
}
