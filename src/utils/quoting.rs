//! Rendering of tag name lists in the `['a', 'b']` style of the legacy output.

/// Quote a single item: single quotes unless the item contains `'` and no `"`.
pub fn quote_item(item: &str) -> String {
    let quote = if item.contains('\'') && !item.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(item.len() + 2);
    out.push(quote);
    for c in item.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_unprintable(c) => push_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Characters written as `\x`/`\u`/`\U` escapes: controls, separators other
/// than the ASCII space, and the common format and private-use characters.
fn is_unprintable(c: char) -> bool {
    if c == ' ' {
        return false;
    }
    c.is_control()
        || c.is_whitespace()
        || matches!(
            c,
            '\u{ad}'
                | '\u{600}'..='\u{605}'
                | '\u{61c}'
                | '\u{6dd}'
                | '\u{70f}'
                | '\u{180e}'
                | '\u{200b}'..='\u{200f}'
                | '\u{202a}'..='\u{202e}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{206f}'
                | '\u{e000}'..='\u{f8ff}'
                | '\u{feff}'
                | '\u{fff9}'..='\u{fffb}'
                | '\u{110bd}'
                | '\u{1d173}'..='\u{1d17a}'
                | '\u{e0001}'
                | '\u{e0020}'..='\u{e007f}'
                | '\u{f0000}'..='\u{10ffff}'
        )
}

fn push_escape(out: &mut String, c: char) {
    let code = u32::from(c);
    let escaped = if code < 0x100 {
        format!("\\x{code:02x}")
    } else if code < 0x10000 {
        format!("\\u{code:04x}")
    } else {
        format!("\\U{code:08x}")
    };
    out.push_str(&escaped);
}

/// Render a list as `['a', 'b']`.
pub fn quote_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote_item(item.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_list_plain_names() {
        assert_eq!(quote_list(&["a", "b"]), "['a', 'b']");
        assert_eq!(quote_list::<&str>(&[]), "[]");
    }

    #[test]
    fn test_quote_item_switches_to_double_quotes() {
        assert_eq!(quote_item("it's"), "\"it's\"");
    }

    #[test]
    fn test_quote_item_escapes_when_both_quotes_present() {
        assert_eq!(quote_item(r#"a'b"c"#), r#"'a\'b"c'"#);
        assert_eq!(quote_item(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn test_quote_item_escapes_unprintable_characters() {
        assert_eq!(quote_item("a\u{200b}"), r"'a\u200b'");
        assert_eq!(quote_item("a\0b"), r"'a\x00b'");
        assert_eq!(quote_item("a\u{7f}"), r"'a\x7f'");
        assert_eq!(quote_item("nb\u{a0}sp"), r"'nb\xa0sp'");
        assert_eq!(quote_item("\u{f0000}"), r"'\U000f0000'");
        assert_eq!(quote_item("héllo"), "'héllo'");
    }
}
