use crate::format;
use crate::hackernews::{Comment, Submission};
use crate::markup;
use crate::style;
use crate::wrap;

pub const INITIAL_INDENT: usize = 1;
pub const INDENT_STEP: usize = 5;

const DELETED_AUTHOR: &str = "[deleted]";

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    width: usize,
    initial_indent: usize,
    step: usize,
}

impl Renderer {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            initial_indent: INITIAL_INDENT,
            step: INDENT_STEP,
        }
    }

    pub fn indent_for(&self, depth: usize) -> usize {
        self.initial_indent + depth * self.step
    }

    pub fn render_thread(&self, submission: &Submission, root: &Comment) -> String {
        let mut out = self.header(submission);
        out.push_str(&self.render(root));
        out
    }

    pub fn render(&self, root: &Comment) -> String {
        let mut out = String::new();
        let mut stack: Vec<(&Comment, usize)> = vec![(root, 0)];

        while let Some((comment, depth)) = stack.pop() {
            self.render_node(comment, self.indent_for(depth), &mut out);
            stack.extend(comment.replies.iter().rev().map(|reply| (reply, depth + 1)));
        }

        out
    }

    fn render_node(&self, comment: &Comment, indent: usize, out: &mut String) {
        let author = if comment.author.is_empty() {
            DELETED_AUTHOR
        } else {
            comment.author.as_str()
        };
        out.push_str(&" ".repeat(indent));
        out.push_str(&style::bold(author));
        out.push('\n');

        let body = markup::decode(&comment.text);
        out.push_str(&wrap::wrap_indented(&body, self.width, indent));
        out.push_str("\n\n");
    }

    fn header(&self, submission: &Submission) -> String {
        let indent = " ".repeat(self.initial_indent);
        let mut title = style::bold(&markup::decode_entities(&submission.title));
        if !submission.domain.is_empty() {
            title.push(' ');
            title.push_str(&style::dimmed(&style::paren(&submission.domain)));
        }

        let mut out = String::new();
        for line in [
            title,
            style::dimmed(&submission.link()),
            style::dimmed(&format::secondary_text(submission)),
        ] {
            out.push_str(&indent);
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
        out
    }
}
