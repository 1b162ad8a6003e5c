//! Reference-expression templates.
//!
//! Workflow text fields interpolate variables through placeholder expressions.
//! Two surface syntaxes exist for the same expression language: the stored
//! (spec) form `${name}` and the editor form `{{name}}`. This module parses
//! either form into a typed template (literal segments + variable references)
//! and renders it back in either syntax, making the translation between the
//! two an exact round-trip instead of a substring rewrite.
//!
//! Parsing is total: an opener with no matching closer, or any other malformed
//! sequence, is kept as literal text. The parser does not check that a
//! referenced variable exists; that is [`crate::spec::validate`]'s job.

pub mod autocomplete;

/// Which placeholder delimiters a piece of text uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefSyntax {
    /// `${expr}` — the stored (WorkflowSpec) form.
    Dollar,
    /// `{{expr}}` — the visual-editor form.
    Brace,
}

impl RefSyntax {
    fn opener(self) -> &'static str {
        match self {
            RefSyntax::Dollar => "${",
            RefSyntax::Brace => "{{",
        }
    }

    fn closer(self) -> &'static str {
        match self {
            RefSyntax::Dollar => "}",
            RefSyntax::Brace => "}}",
        }
    }
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Verbatim text, emitted unchanged.
    Literal(String),
    /// The expression between the delimiters, stored verbatim (untrimmed) so
    /// rendering reproduces the original spelling exactly.
    Reference(String),
}

/// A parsed reference-expression template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `text` in the given syntax. Never fails: malformed placeholder
    /// text stays literal.
    pub fn parse(text: &str, syntax: RefSyntax) -> Self {
        let opener = syntax.opener();
        let closer = syntax.closer();
        let mut segments = Vec::new();
        let mut rest = text;

        while let Some(open_at) = rest.find(opener) {
            let after_open = &rest[open_at + opener.len()..];
            match after_open.find(closer) {
                Some(close_at) => {
                    if open_at > 0 {
                        segments.push(Segment::Literal(rest[..open_at].to_string()));
                    }
                    segments.push(Segment::Reference(after_open[..close_at].to_string()));
                    rest = &after_open[close_at + closer.len()..];
                }
                None => {
                    // Unclosed opener: everything from here on is literal.
                    break;
                }
            }
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }
        Self { segments }
    }

    /// Renders the template back to text in the given syntax.
    pub fn render(&self, syntax: RefSyntax) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Reference(expr) => {
                    out.push_str(syntax.opener());
                    out.push_str(expr);
                    out.push_str(syntax.closer());
                }
            }
        }
        out
    }

    /// The trimmed reference expressions, in order of appearance.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Reference(expr) => Some(expr.trim()),
            Segment::Literal(_) => None,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Rewrites every placeholder in `text` from one syntax to the other, leaving
/// all literal text untouched. Total: malformed input comes back unchanged.
pub fn translate(text: &str, from: RefSyntax, to: RefSyntax) -> String {
    Template::parse(text, from).render(to)
}
