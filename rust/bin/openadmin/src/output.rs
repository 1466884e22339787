//! Table and JSON rendering.

use std::io::{self, Write};

use serde::Serialize;

use openadmin_core::{OutputFormat, ServiceError};
use openadmin_tree::{Highlight, HighlightedNode};

/// Writes command results in the selected format.
pub struct Output<W: Write> {
    format: OutputFormat,
    writer: W,
}

impl<W: Write> Output<W> {
    pub fn new(format: OutputFormat, writer: W) -> Self {
        Self { format, writer }
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Print `value` as JSON, or call `table` for the human-readable form.
    pub fn emit<T, F>(&mut self, value: &T, table: F) -> anyhow::Result<()>
    where
        T: Serialize,
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, value)?;
                writeln!(self.writer)?;
            }
            OutputFormat::Table => table(&mut self.writer)?,
        }
        Ok(())
    }

    /// One-line notice, e.g. "role deleted.".
    pub fn notice(&mut self, message: &str) -> anyhow::Result<()> {
        let value = serde_json::json!({ "notice": message });
        self.emit(&value, |w| writeln!(w, "{}", message))
    }

    /// Raw text regardless of format (help, version).
    pub fn text(&mut self, text: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", text.trim_end())?;
        Ok(())
    }

    /// Report a failed command.
    pub fn error(&mut self, err: &anyhow::Error) -> io::Result<()> {
        let service = err.downcast_ref::<ServiceError>();
        match self.format {
            OutputFormat::Json => {
                let value = match service {
                    Some(e) => e.to_json(),
                    None => ServiceError::Internal(err.to_string()).to_json(),
                };
                writeln!(self.writer, "{}", value)
            }
            OutputFormat::Table => match service {
                Some(e) => writeln!(self.writer, "error ({}): {}", e.error_code(), e),
                None => writeln!(self.writer, "error: {:#}", err),
            },
        }
    }
}

// ── Tree rendering ──────────────────────────────────────────────────

/// Indented tree. Children of collapsed nodes are hidden; a match is
/// shown as `before[matched]after`.
pub fn write_tree<W: Write>(
    w: &mut W,
    nodes: &[HighlightedNode],
    expanded: &[String],
    selected: Option<&str>,
) -> io::Result<()> {
    for node in nodes {
        write_node(w, node, expanded, selected, 0)?;
    }
    Ok(())
}

fn write_node<W: Write>(
    w: &mut W,
    node: &HighlightedNode,
    expanded: &[String],
    selected: Option<&str>,
    depth: usize,
) -> io::Result<()> {
    let children = node.children.as_deref().unwrap_or(&[]);
    let is_open = expanded.iter().any(|k| *k == node.key);
    let marker = match (children.is_empty(), is_open) {
        (true, _) => "·",
        (false, true) => "▾",
        (false, false) => "▸",
    };
    let mark = if selected == Some(node.key.as_str()) { "  *" } else { "" };
    writeln!(
        w,
        "{}{} {} ({}){}",
        "  ".repeat(depth),
        marker,
        title(&node.title),
        node.key,
        mark
    )?;
    if is_open {
        for child in children {
            write_node(w, child, expanded, selected, depth + 1)?;
        }
    }
    Ok(())
}

fn title(highlight: &Highlight) -> String {
    match highlight {
        Highlight::Plain { label } => label.clone(),
        Highlight::Match { before, matched, after, .. } => {
            format!("{}[{}]{}", before, matched, after)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(nodes: &[HighlightedNode], expanded: &[&str], selected: Option<&str>) -> String {
        let expanded: Vec<String> = expanded.iter().map(|k| k.to_string()).collect();
        let mut buf = Vec::new();
        write_tree(&mut buf, nodes, &expanded, selected).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> Vec<HighlightedNode> {
        vec![HighlightedNode {
            key: "0".into(),
            title: Highlight::Plain { label: "总公司".into() },
            children: Some(vec![HighlightedNode {
                key: "0-0".into(),
                title: Highlight::Match {
                    before: "研".into(),
                    matched: "发".into(),
                    after: "部".into(),
                    start: 3,
                },
                children: None,
            }]),
        }]
    }

    #[test]
    fn test_collapsed_hides_children() {
        assert_eq!(render(&sample(), &[], None), "▸ 总公司 (0)\n");
    }

    #[test]
    fn test_expanded_with_match_and_selection() {
        assert_eq!(
            render(&sample(), &["0"], Some("0-0")),
            "▾ 总公司 (0)\n  · 研[发]部 (0-0)  *\n"
        );
    }

    #[test]
    fn test_error_formats() {
        let err = anyhow::Error::from(ServiceError::NotFound("role '9' not found".into()));

        let mut out = Output::new(OutputFormat::Table, Vec::new());
        out.error(&err).unwrap();
        assert_eq!(
            String::from_utf8(out.into_inner()).unwrap(),
            "error (NOT_FOUND): role '9' not found\n"
        );

        let mut out = Output::new(OutputFormat::Json, Vec::new());
        out.error(&err).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out.into_inner()).unwrap();
        assert_eq!(value["code"], "NOT_FOUND");
    }

    #[test]
    fn test_notice_json() {
        let mut out = Output::new(OutputFormat::Json, Vec::new());
        out.notice("saved.").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out.into_inner()).unwrap();
        assert_eq!(value, serde_json::json!({"notice": "saved."}));
    }
}
