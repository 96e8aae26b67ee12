//! Tag balance scanner.
//!
//! A single forward pass over the source text that keeps a stack of open tag
//! names and records a [`Diagnostic`] for every closing tag that does not match
//! the top of the stack, plus one final diagnostic for tags left open.
//!
//! This is deliberately not a markup parser: no tree is built, attributes are
//! not validated, and `{...}` interpolations are only skipped when they appear
//! as a tag name. Every delimiter the scanner looks for is ASCII, so the cursor
//! moves over bytes and always lands on a character boundary.

use crate::diagnostic::{Diagnostic, DiagnosticKind};

/// Result of scanning one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Diagnostics in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
    /// Tag names still open at end of input, in opening order.
    pub open_tags: Vec<String>,
}

impl ScanOutcome {
    pub fn is_balanced(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Scan `content` for unbalanced tags.
pub fn scan(content: &str) -> ScanOutcome {
    TagScanner::new(content).run()
}

/// The construct starting at a `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Construct {
    Closing,
    Comment,
    Opening,
}

struct TagScanner<'a> {
    content: &'a str,
    stack: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    // Byte offset / char count pair of the last index computation.
    // The cursor never moves backwards, so counting resumes from here.
    counted: (usize, usize),
}

impl<'a> TagScanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            stack: Vec::new(),
            diagnostics: Vec::new(),
            counted: (0, 0),
        }
    }

    fn run(mut self) -> ScanOutcome {
        let content = self.content;
        let bytes = content.as_bytes();
        let mut cursor = 0;

        while cursor < bytes.len() {
            if bytes[cursor] != b'<' {
                cursor += 1;
                continue;
            }
            cursor = match self.classify(cursor) {
                Construct::Closing => self.closing_tag(cursor),
                Construct::Comment => self.comment(cursor),
                Construct::Opening => self.opening_tag(cursor),
            };
        }

        if !self.stack.is_empty() {
            let end = self.content.len();
            self.report(
                DiagnosticKind::UnclosedTags {
                    names: self.stack.clone(),
                },
                end,
            );
        }

        ScanOutcome {
            diagnostics: self.diagnostics,
            open_tags: self.stack,
        }
    }

    fn classify(&self, at: usize) -> Construct {
        let rest = &self.content[at..];
        if rest.starts_with("</") {
            Construct::Closing
        } else if rest.starts_with("<!--") {
            Construct::Comment
        } else {
            Construct::Opening
        }
    }

    /// Handle `</name ...>` at `start`; returns the next cursor position.
    fn closing_tag(&mut self, start: usize) -> usize {
        let content = self.content;
        let Some(end) = self.find_from(start, ">") else {
            let name = first_token(&content[start + 2..]).to_string();
            log::debug!("Closing tag </{name}> at byte {start} is never terminated; stopping scan");
            self.report(DiagnosticKind::UnterminatedClosingTag { name }, start);
            return content.len();
        };

        let name = first_token(&content[start + 2..end]);
        if name.is_empty() {
            // `</>` closes a fragment; `<>` is never pushed either.
            return end + 1;
        }

        if self.stack.last().is_some_and(|top| top == name) {
            self.stack.pop();
        } else {
            // The stack is left untouched on a mismatch.
            let kind = DiagnosticKind::MismatchedClosingTag {
                name: name.to_string(),
                last_opened: self.stack.last().cloned(),
            };
            self.report(kind, start);
        }

        end + 1
    }

    /// Skip `<!-- ... -->` at `start`, including any tags inside it.
    fn comment(&mut self, start: usize) -> usize {
        // The terminator search starts at the `<`, so `<!-->` closes itself.
        match self.find_from(start, "-->") {
            Some(end) => end + 3,
            None => {
                log::debug!("Comment at byte {start} is never terminated; stopping scan");
                self.report(DiagnosticKind::UnterminatedComment, start);
                self.content.len()
            }
        }
    }

    /// Handle an opening-tag-like construct at `start`.
    fn opening_tag(&mut self, start: usize) -> usize {
        let Some(end) = self.find_from(start, ">") else {
            return start + 1;
        };

        let content = self.content;
        let tag_line = &content[start + 1..end];
        if is_self_closing(tag_line) || is_declaration(tag_line) {
            return end + 1;
        }

        let name = first_token(tag_line);
        if !name.is_empty() && !is_interpolated(name) {
            self.stack.push(name.to_string());
        }

        end + 1
    }

    fn find_from(&self, start: usize, needle: &str) -> Option<usize> {
        self.content[start..].find(needle).map(|pos| start + pos)
    }

    fn report(&mut self, kind: DiagnosticKind, offset: usize) {
        let index = self.char_index(offset);
        self.diagnostics.push(Diagnostic::new(kind, offset, index));
    }

    /// Character index of `offset`, with `\r\n` counted as one character
    /// the way a text-mode read sees it.
    ///
    /// Reported offsets always sit on a `<` or the end of input, never between
    /// `\r` and `\n`, so counting can resume from the previous offset.
    fn char_index(&mut self, offset: usize) -> usize {
        let (byte, chars) = self.counted;
        let span = &self.content[byte..offset];
        let index = chars + span.chars().count() - span.matches("\r\n").count();
        self.counted = (offset, index);
        index
    }
}

/// Separators for tag tokens: Unicode whitespace plus the ASCII
/// file/group/record/unit separators.
fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// First separator-delimited token, or `""` when there is none.
fn first_token(s: &str) -> &str {
    s.split(is_token_separator).find(|token| !token.is_empty()).unwrap_or("")
}

fn is_self_closing(tag_line: &str) -> bool {
    tag_line.ends_with('/')
}

/// `<!doctype ...>`, `<![CDATA[...]]>` and friends.
fn is_declaration(tag_line: &str) -> bool {
    tag_line.starts_with('!')
}

fn is_interpolated(name: &str) -> bool {
    name.starts_with('{')
}
