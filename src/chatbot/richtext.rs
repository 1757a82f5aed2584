//! Structured rich text for chatbot replies.
//!
//! Knowledge-table responses use `**bold**` markers and `\n` line breaks.
//! Rather than assembling raw markup strings, replies are parsed into runs
//! that the UI layer renders however it likes; `to_html()` reproduces the
//! legacy formatter (bold substitution first, then line breaks, nothing else
//! escaped — the source text is static and trusted).

use serde::Serialize;

/// A contiguous span of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub bold: bool,
    pub text: String,
}

impl Run {
    fn plain(text: &str) -> Self {
        Self {
            bold: false,
            text: text.to_string(),
        }
    }

    fn bold(text: &str) -> Self {
        Self {
            bold: true,
            text: text.to_string(),
        }
    }
}

/// A reply as lines of styled runs, with explicit breaks between lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichText {
    pub lines: Vec<Vec<Run>>,
}

impl RichText {
    /// Parse `**bold**` markers and `\n` breaks into structured runs.
    ///
    /// An unterminated `**` (or an empty `****` pair) is kept as literal
    /// text, matching the substitution-based formatter it replaces.
    pub fn parse(source: &str) -> Self {
        let lines = source.split('\n').map(parse_line).collect();
        Self { lines }
    }

    /// Render as an HTML fragment: `<b>…</b>` for bold runs, `<br/>` between
    /// lines. No escaping of other characters.
    pub fn to_html(&self) -> String {
        let rendered: Vec<String> = self
            .lines
            .iter()
            .map(|runs| {
                runs.iter()
                    .map(|run| {
                        if run.bold {
                            format!("<b>{}</b>", run.text)
                        } else {
                            run.text.clone()
                        }
                    })
                    .collect::<String>()
            })
            .collect();
        rendered.join("<br/>")
    }
}

/// Plain-text rendering: bold markers dropped, line breaks kept.
impl std::fmt::Display for RichText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, runs) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for run in runs {
                write!(f, "{}", run.text)?;
            }
        }
        Ok(())
    }
}

fn parse_line(line: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        let Some(start) = rest.find("**") else {
            runs.push(Run::plain(rest));
            break;
        };
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else {
            // Unterminated marker: literal.
            runs.push(Run::plain(rest));
            break;
        };
        if end == 0 {
            // `****` — nothing to embolden, keep literal.
            runs.push(Run::plain(&rest[..start + 4]));
            rest = &after[2..];
            continue;
        }
        if start > 0 {
            runs.push(Run::plain(&rest[..start]));
        }
        runs.push(Run::bold(&after[..end]));
        rest = &after[end + 2..];
    }

    runs
}
