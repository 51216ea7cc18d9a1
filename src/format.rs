use crate::hackernews::Submission;
use crate::markup;

pub const SECONDARY_INDENT: &str = "    ";

pub fn rank_label(rank: usize) -> String {
    let indent = if rank > 9 { " " } else { "  " };
    format!("{rank}.{indent}")
}

pub fn title(submission: &Submission) -> String {
    markup::decode_entities(&submission.title)
}

pub fn domain_suffix(submission: &Submission) -> String {
    if submission.domain.is_empty() {
        String::new()
    } else {
        format!(" ({})", submission.domain)
    }
}

pub fn main_text(rank: usize, submission: &Submission) -> String {
    format!(
        "{}{}{}",
        rank_label(rank),
        title(submission),
        domain_suffix(submission)
    )
}

pub fn secondary_text(submission: &Submission) -> String {
    format!(
        "{} points by {} {} | {} comments",
        submission.score, submission.author, submission.time_ago, submission.comments_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(domain: &str) -> Submission {
        Submission {
            id: 1,
            title: "Rust &amp; friends".into(),
            score: 42,
            author: "alice".into(),
            time_ago: "2 hours ago".into(),
            comments_count: 7,
            url: "https://example.com".into(),
            domain: domain.into(),
            kind: "link".into(),
        }
    }

    #[test]
    fn main_line_has_rank_title_and_domain() {
        assert_eq!(
            main_text(3, &submission("example.com")),
            "3.  Rust & friends (example.com)"
        );
        assert_eq!(main_text(12, &submission("")), "12. Rust & friends");
    }

    #[test]
    fn secondary_line_matches_contract() {
        assert_eq!(
            secondary_text(&submission("")),
            "42 points by alice 2 hours ago | 7 comments"
        );
    }
}
