//! Format command: comment body in, HTML / JSON / terminal text out.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, instrument};

use comment_markup_core::config::{Config, OutputFormat};
use comment_markup_core::{FormattedBody, Node, Paragraph, format_comment, render};

use super::{read_input_file, read_input_stream};

/// Arguments for the `format` subcommand.
#[derive(Args, Debug, Default)]
pub struct FormatArgs {
    /// File holding the comment body (`-` or omitted reads stdin).
    pub file: Option<Utf8PathBuf>,

    /// Enable emphasis and blockquotes (overrides config).
    #[arg(long, overrides_with = "no_styling")]
    pub styling: bool,

    /// Only detect links and emails (overrides config).
    #[arg(long, overrides_with = "styling")]
    pub no_styling: bool,

    /// Output format (defaults to JSON with --json, else config).
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,
}

impl FormatArgs {
    fn styling(&self, config: &Config) -> bool {
        if self.styling {
            true
        } else if self.no_styling {
            false
        } else {
            config.apply_styling
        }
    }

    fn output(&self, global_json: bool, config: &Config) -> OutputFormat {
        match self.output {
            Some(output) => output,
            None if global_json => OutputFormat::Json,
            None => config.output,
        }
    }
}

/// Format one comment body and print it.
#[instrument(name = "cmd_format", skip_all, fields(file = ?args.file))]
pub fn cmd_format(args: FormatArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let styling = args.styling(config);
    let output = args.output(global_json, config);
    debug!(styling, %output, "executing format command");

    let body = match args.file {
        Some(ref path) if path.as_str() != "-" => read_input_file(path, config.input_limit())?,
        _ => read_input_stream(std::io::stdin().lock(), config.input_limit())?,
    };

    let formatted = format_comment(Some(&body), styling);
    match output {
        OutputFormat::Html => print!("{}", render::to_html(&formatted)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&formatted)?),
        OutputFormat::Terminal => print!("{}", to_terminal(&formatted)),
    }
    Ok(())
}

/// Render for a terminal: one line per paragraph, `│ ` per quote level.
fn to_terminal(body: &FormattedBody) -> String {
    match body {
        FormattedBody::Untouched => String::new(),
        FormattedBody::Verbatim(text) => format!("{text}\n"),
        FormattedBody::Paragraphs(paragraphs) => {
            paragraphs.iter().map(terminal_paragraph).collect()
        }
    }
}

fn terminal_paragraph(paragraph: &Paragraph) -> String {
    let depth = paragraph.quote_depth();
    let mut children = paragraph.children.as_slice();
    for _ in 0..depth {
        if let [Node::Quote(inner)] = children {
            children = inner.as_slice();
        }
    }

    let mut line = String::new();
    for _ in 0..depth {
        line.push_str(&format!(
            "{}",
            "│ ".if_supports_color(Stream::Stdout, |t| t.dimmed())
        ));
    }
    push_nodes(&mut line, children);
    line.push('\n');
    line
}

fn push_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Anchor { text, .. } => out.push_str(&format!(
                "{}",
                text.if_supports_color(Stream::Stdout, |t| t.underline())
            )),
            Node::Emphasis(children) => {
                let mut inner = String::new();
                push_nodes(&mut inner, children);
                out.push_str(&format!(
                    "{}",
                    inner.if_supports_color(Stream::Stdout, |t| t.italic())
                ));
            }
            Node::Quote(children) => push_nodes(out, children),
        }
    }
}
