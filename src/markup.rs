use crate::style::{ITALIC, RESET};

/// Entities emitted by the feed, in decoding order. `&amp;` must stay last so
/// that an encoded entity such as `&amp;gt;` is unescaped exactly once.
const ENTITIES: [(&str, &str); 6] = [
    ("&#x27;", "'"),
    ("&gt;", ">"),
    ("&lt;", "<"),
    ("&#x2F;", "/"),
    ("&quot;", "\""),
    ("&amp;", "&"),
];

pub fn decode(raw: &str) -> String {
    decode_entities(&replace_tags(raw))
}

fn replace_tags(input: &str) -> String {
    // The leading paragraph marker would only produce an empty first line.
    let output = input.replacen("<p>", "", 1);
    output
        .replace("<p>", "\n")
        .replace("<i>", ITALIC)
        .replace("</i>", RESET)
}

pub fn decode_entities(input: &str) -> String {
    ENTITIES
        .iter()
        .fold(input.to_string(), |text, (entity, literal)| {
            text.replace(entity, literal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ampersand_is_decoded_last() {
        assert_eq!(decode("a &amp;&#x27;b&#x27;"), "a &'b'");
        assert_eq!(decode("&amp;gt;"), "&gt;");
    }

    #[test]
    fn decodes_all_entities() {
        assert_eq!(
            decode("&lt;a href=&quot;x&#x2F;y&quot;&gt;"),
            "<a href=\"x/y\">"
        );
    }

    #[test]
    fn idempotent_on_decoded_text() {
        let decoded = decode("it&#x27;s &quot;fine&quot; &amp; done");
        assert_eq!(decode(&decoded), decoded);
    }

    #[test]
    fn first_paragraph_marker_is_dropped() {
        assert_eq!(decode("<p>one<p>two<p>three"), "one\ntwo\nthree");
        assert_eq!(decode("one<p>two<p>three"), "onetwo\nthree");
    }

    #[test]
    fn italics_become_style_markers() {
        assert_eq!(
            decode("so <i>very</i> true"),
            format!("so {ITALIC}very{RESET} true")
        );
    }

    #[test]
    fn unknown_tags_pass_through() {
        assert_eq!(decode("<pre><code>x</code></pre>"), "<pre><code>x</code></pre>");
    }
}
