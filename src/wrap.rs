use textwrap::{wrap, Options as WrapOptions, WordSeparator, WordSplitter};

pub const RIGHT_MARGIN: usize = 3;

pub fn content_width(terminal_width: usize, indent: usize) -> usize {
    terminal_width
        .saturating_sub(indent)
        .saturating_sub(RIGHT_MARGIN)
        .max(1)
}

pub fn wrap_indented(text: &str, terminal_width: usize, indent: usize) -> String {
    let width = content_width(terminal_width, indent);
    let prefix = " ".repeat(indent);
    let options = WrapOptions::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation);

    text.split('\n')
        .map(|paragraph| {
            let lines = wrap(paragraph, &options);
            if lines.is_empty() {
                return prefix.clone();
            }
            lines
                .iter()
                .map(|line| format!("{prefix}{line}"))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;
    use unicode_width::UnicodeWidthStr;

    const SAMPLE: &str = "The quick brown fox jumps over the lazy dog while the \
        rest of the pack watches from a comfortable distance, unimpressed by \
        yet another demonstration of agility.";

    #[test]
    fn lines_fit_available_width() {
        for indent in [0, 1, 6, 11] {
            let wrapped = wrap_indented(SAMPLE, 40, indent);
            for line in wrapped.lines().filter(|line| !line.is_empty()) {
                let content = &line[indent..];
                assert!(
                    content.width() <= 40 - indent - RIGHT_MARGIN,
                    "line too wide at indent {indent}: {line:?}"
                );
            }
        }
    }

    #[test]
    fn words_are_never_split() {
        let wrapped = wrap_indented(SAMPLE, 30, 4);
        let original: Vec<&str> = SAMPLE.split_whitespace().collect();
        let produced: Vec<&str> = wrapped.split_whitespace().collect();
        assert_eq!(produced, original);
    }

    #[test]
    fn hyphenated_words_stay_whole() {
        let wrapped = wrap_indented("a well-known state-of-the-art idea", 14, 0);
        assert!(wrapped.lines().any(|line| line.contains("state-of-the-art")));
    }

    #[test]
    fn every_line_is_indented() {
        let wrapped = wrap_indented(SAMPLE, 35, 6);
        for line in wrapped.lines().filter(|line| !line.is_empty()) {
            assert!(line.starts_with("      "));
            assert!(!line[6..].starts_with(' '));
        }
    }

    #[test]
    fn explicit_newlines_become_separate_paragraphs() {
        let wrapped = wrap_indented("first\nsecond", 80, 2);
        assert_eq!(wrapped, "  first\n\n  second");
    }

    #[test]
    fn explicit_blank_line_is_preserved() {
        let wrapped = wrap_indented("first\n\nthird", 80, 1);
        assert_eq!(wrapped, " first\n\n \n\n third");
    }

    #[test]
    fn style_markers_do_not_count_toward_width() {
        let text = format!("{}emphasis{} and more words here", style::ITALIC, style::RESET);
        let wrapped = wrap_indented(&text, 3 + 8 + 4, 0);
        assert_eq!(style::strip(wrapped.lines().next().unwrap()), "emphasis and");
    }
}
