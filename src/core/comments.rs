//! Translator comments preceding a call site.
//!
//! Comments are grouped the way the Go parser groups them: consecutive
//! comments separated by at most one line break form a group, and a comment
//! trailing code on the same line only groups with comments on that line.
//!
//! ```go
//! // TRANSLATORS: shown on the login page
//! // when the password is wrong.
//! i18n.G("Wrong password")
//! ```
//!
//! With the selection prefix `TRANSLATORS:` the entry for the call above is
//! annotated with both comment lines.

use std::collections::BTreeMap;

use tree_sitter::Node;

use crate::core::parser::ParsedFile;

/// A run of adjacent comments, normalised to text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    /// First line of the group (1-based).
    pub start_line: usize,
    /// Last line of the group (1-based).
    pub end_line: usize,
    /// Comment text with markers removed, as `go/ast.CommentGroup.Text`.
    pub lines: Vec<String>,
}

/// All comment groups of a file, keyed by the line they end on.
#[derive(Debug, Default)]
pub struct FileComments {
    by_end_line: BTreeMap<usize, CommentGroup>,
}

struct RawGroup<'a> {
    start_line: usize,
    end_line: usize,
    end_byte: usize,
    trailing: bool,
    comments: Vec<&'a str>,
}

impl FileComments {
    /// Collect every comment group of a parsed file in a single pass.
    pub fn collect(file: &ParsedFile) -> Self {
        let mut comments = Vec::new();
        collect_comment_nodes(file.root(), &mut comments);

        let source = file.source.as_str();
        let mut groups: Vec<RawGroup<'_>> = Vec::new();

        for node in comments {
            let start = node.start_byte();
            let text = &source[node.byte_range()];
            let start_line = node.start_position().row + 1;
            let end_line = node.end_position().row + 1;

            if let Some(group) = groups.last_mut() {
                let gap = &source[group.end_byte..start];
                let max_breaks = if group.trailing { 0 } else { 1 };
                if gap.chars().all(char::is_whitespace) && gap.matches('\n').count() <= max_breaks
                {
                    group.end_line = end_line;
                    group.end_byte = node.end_byte();
                    group.comments.push(text);
                    continue;
                }
            }

            let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
            groups.push(RawGroup {
                start_line,
                end_line,
                end_byte: node.end_byte(),
                trailing: !source[line_start..start].trim().is_empty(),
                comments: vec![text],
            });
        }

        let by_end_line = groups
            .into_iter()
            .map(|group| {
                (
                    group.end_line,
                    CommentGroup {
                        start_line: group.start_line,
                        end_line: group.end_line,
                        lines: comment_text(&group.comments),
                    },
                )
            })
            .collect();

        Self { by_end_line }
    }

    /// The group ending on the line immediately above `line`.
    pub fn preceding(&self, line: usize) -> Option<&CommentGroup> {
        self.by_end_line.get(&line.checked_sub(1)?)
    }

    pub fn len(&self) -> usize {
        self.by_end_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_end_line.is_empty()
    }
}

fn collect_comment_nodes<'t>(root: Node<'t>, out: &mut Vec<Node<'t>>) {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.kind() == "comment" {
            out.push(node);
        } else if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Strip comment markers and normalise blank lines.
///
/// Leading and trailing blank lines are dropped and runs of blank lines
/// collapse into one. `//` comments lose a single leading space, and tool
/// directives such as `//go:generate` are skipped.
fn comment_text(comments: &[&str]) -> Vec<String> {
    let mut raw = Vec::new();
    for comment in comments {
        let body = if let Some(body) = comment.strip_prefix("//") {
            if is_directive(body) {
                continue;
            }
            body.strip_prefix(' ').unwrap_or(body)
        } else {
            comment
                .strip_prefix("/*")
                .and_then(|c| c.strip_suffix("*/"))
                .unwrap_or(comment)
        };
        raw.extend(body.split('\n').map(|line| line.trim_end().to_string()));
    }

    let mut lines: Vec<String> = Vec::with_capacity(raw.len());
    for line in raw {
        let previous_blank = lines.last().is_none_or(|l| l.is_empty());
        if !line.is_empty() || !previous_blank {
            lines.push(line);
        }
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn is_directive(text: &str) -> bool {
    if ["line ", "extern ", "export "]
        .iter()
        .any(|prefix| text.starts_with(prefix))
    {
        return true;
    }
    let Some(colon) = text.find(':') else {
        return false;
    };
    if colon == 0 || colon + 1 >= text.len() {
        return false;
    }
    let lower_alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    text.as_bytes()[..colon].iter().all(|b| lower_alnum(*b)) && lower_alnum(text.as_bytes()[colon + 1])
}

/// What the comment block above a call means for its entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association {
    /// No comment to attach.
    None,
    /// The block carries the ignore marker.
    Ignored,
    /// Lines from the first prefix match to the end of the block.
    Comment(Vec<String>),
}

/// Associates comment blocks with matched calls.
///
/// Disabled when the selection prefix is empty.
#[derive(Debug, Clone, Default)]
pub struct CommentAssociator {
    prefix: String,
    ignore_marker: String,
}

impl CommentAssociator {
    pub fn new(prefix: impl Into<String>, ignore_marker: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ignore_marker: ignore_marker.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.prefix.is_empty()
    }

    pub fn ignore_marker(&self) -> &str {
        &self.ignore_marker
    }

    /// Look at the block ending right above `line`.
    pub fn associate(&self, comments: &FileComments, line: usize) -> Association {
        if !self.is_enabled() {
            return Association::None;
        }
        let Some(group) = comments.preceding(line) else {
            return Association::None;
        };
        self.select(&group.lines)
    }

    fn select(&self, lines: &[String]) -> Association {
        if !self.ignore_marker.is_empty()
            && lines.iter().any(|line| line.contains(&self.ignore_marker))
        {
            return Association::Ignored;
        }
        match lines.iter().position(|line| line.starts_with(&self.prefix)) {
            Some(start) => Association::Comment(lines[start..].to_vec()),
            None => Association::None,
        }
    }
}
