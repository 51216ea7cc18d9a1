pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIMMED: &str = "\x1b[2m";
pub const ITALIC: &str = "\x1b[3m";

pub fn bold(text: &str) -> String {
    format!("{BOLD}{text}{RESET}")
}

pub fn dimmed(text: &str) -> String {
    format!("{DIMMED}{text}{RESET}")
}

pub fn paren(text: &str) -> String {
    format!("({text})")
}

pub fn strip(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(ch);
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_removes_sgr_sequences() {
        let styled = format!("{} and {}text{}", bold("bold"), ITALIC, RESET);
        assert_eq!(strip(&styled), "bold and text");
    }
}
