//! `strip_html_if_enabled`, per `spec.md` §4.3 and the `keep_html_tags`
//! configuration option (§6).

const ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&nbsp;", " "),
];

/// Remove HTML-like tags and decode the standard entities above, unless
/// `keep_html_tags` is set. Returns the cleaned string and whether anything
/// was actually stripped — the caller (the semantic lifter) turns that into
/// the `HtmlTagsRemoved` warning.
pub fn strip_html_if_enabled(raw: &str, keep_html_tags: bool) -> (String, bool) {
    if keep_html_tags {
        return (raw.to_string(), false);
    }

    let mut out = String::with_capacity(raw.len());
    let mut stripped_any = false;
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => {
                in_tag = true;
                stripped_any = true;
            }
            '>' if in_tag => {
                in_tag = false;
            }
            _ if in_tag => {}
            _ => out.push(c),
        }
    }

    let mut decoded = out;
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            stripped_any = true;
            decoded = decoded.replace(entity, replacement);
        }
    }

    (decoded, stripped_any)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_warns() {
        let (clean, stripped) = strip_html_if_enabled("<i>Bubo bubo</i>", false);
        assert_eq!(clean, "Bubo bubo");
        assert!(stripped);
    }

    #[test]
    fn keeps_tags_when_requested() {
        let (clean, stripped) = strip_html_if_enabled("<i>Bubo bubo</i>", true);
        assert_eq!(clean, "<i>Bubo bubo</i>");
        assert!(!stripped);
    }

    #[test]
    fn decodes_entities() {
        let (clean, stripped) = strip_html_if_enabled("Rock &amp; Roll", false);
        assert_eq!(clean, "Rock & Roll");
        assert!(stripped);
    }
}
