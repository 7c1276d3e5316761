// src/formatting/rich_text.rs
//! Rendering of rich-text runs into plain text, Markdown, or HTML.
//!
//! Marks compose from the inside out: code first (it suppresses the other
//! emphasis marks in Markdown, since code spans do not compose with
//! emphasis there), then strikethrough, bold, italic, underline, with a
//! link applied outermost.

use crate::types::RichTextRun;
use once_cell::sync::Lazy;
use regex::Regex;

/// Output vocabulary for rich text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTarget {
    Plain,
    Markdown,
    Html,
}

/// Formats a run sequence for the given target. An empty sequence yields the
/// empty string.
pub fn format_rich_text(runs: &[RichTextRun], target: FormatTarget) -> String {
    match target {
        FormatTarget::Plain => crate::types::plain_text(runs),
        FormatTarget::Markdown => runs.iter().map(markdown_run).collect(),
        FormatTarget::Html => runs.iter().map(html_run).collect(),
    }
}

fn markdown_run(run: &RichTextRun) -> String {
    if run.text.is_empty() {
        return String::new();
    }

    let mut result = if run.annotations.code {
        // Code spans carry their text verbatim; emphasis marks are dropped.
        format!("`{}`", run.text)
    } else {
        let mut styled = escape_markdown(&run.text);
        if run.annotations.strikethrough {
            styled = format!("~~{}~~", styled);
        }
        if run.annotations.bold {
            styled = format!("**{}**", styled);
        }
        if run.annotations.italic {
            styled = format!("*{}*", styled);
        }
        // Underline has no Markdown spelling; the HTML tag is the
        // conventional fallback.
        if run.annotations.underline {
            styled = format!("<u>{}</u>", styled);
        }
        styled
    };

    if let Some(url) = &run.link {
        result = format!("[{}]({})", result, url.as_str());
    }
    result
}

fn html_run(run: &RichTextRun) -> String {
    if run.text.is_empty() {
        return String::new();
    }

    let mut result = escape_html(&run.text);
    if run.annotations.code {
        result = format!("<code>{}</code>", result);
    }
    if run.annotations.strikethrough {
        result = format!("<s>{}</s>", result);
    }
    if run.annotations.bold {
        result = format!("<strong>{}</strong>", result);
    }
    if run.annotations.italic {
        result = format!("<em>{}</em>", result);
    }
    if run.annotations.underline {
        result = format!("<u>{}</u>", result);
    }
    if let Some(url) = &run.link {
        result = format!("<a href=\"{}\">{}</a>", escape_html(url.as_str()), result);
    }
    result
}

/// A line-leading ordered-list marker like `1.`.
static LEADING_ORDERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.").expect("leading ordered-list pattern is valid"));

/// Escapes characters that Markdown would misread as syntax: emphasis and
/// link delimiters anywhere, plus heading/list markers at line start.
pub fn escape_markdown(text: &str) -> String {
    text.split_inclusive('\n').map(escape_markdown_line).collect()
}

fn escape_markdown_line(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len() + 4);
    for c in line.chars() {
        if matches!(c, '*' | '_' | '`' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    if escaped.starts_with('#') || escaped.starts_with('-') {
        escaped.insert(0, '\\');
    } else if LEADING_ORDERED.is_match(&escaped) {
        escaped = LEADING_ORDERED.replace(&escaped, "$1\\.").into_owned();
    }
    escaped
}

/// Escapes HTML reserved characters. Also used for attribute values, so the
/// double quote is included.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
