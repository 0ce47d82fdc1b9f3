//! Show command implementation
//!
//! Prints the raw configuration file, with YAML syntax highlighting when a
//! highlighter is available.

use crate::cli::Output;
use anyhow::Result;
use std::fs;
use std::path::Path;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;

pub async fn execute(file: &Path, output: &Output) -> Result<()> {
    output.header("📄 Current Configuration");

    if !file.exists() {
        output.error("Configuration file not found");
        output.indent("Run 'confmend sanitize' to create one from the schema defaults");
        anyhow::bail!("no configuration file at {}", file.display());
    }

    let content = fs::read_to_string(file)?;

    output.blank_line();
    output.separator();
    if let Some(highlighted) = highlight_yaml(&content) {
        print!("{}", highlighted);
    } else {
        // Fallback to plain text
        println!("{}", content);
    }
    output.separator();
    output.blank_line();
    output.table_row("Config file", &file.display().to_string());

    Ok(())
}

/// Highlight YAML content using syntect
fn highlight_yaml(content: &str) -> Option<String> {
    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();

    let syntax = syntax_set.find_syntax_by_extension("yml")?;
    let theme = &theme_set.themes["base16-eighties.dark"];

    let mut highlighted = String::new();
    let mut highlighter = syntect::easy::HighlightLines::new(syntax, theme);

    for line in content.lines() {
        let ranges = highlighter.highlight_line(line, &syntax_set).ok()?;
        let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
        highlighted.push_str(&escaped);
        highlighted.push('\n');
    }

    Some(highlighted)
}
