//! gtkcolor CLI
//!
//! Converts GTK stylesheets into standard CSS.
//!
//! Usage:
//! - gtkcolor theme.css            # Convert a file to stdout
//! - gtkcolor -o out.css -         # Convert stdin to a file
//! - gtkcolor --expr 'mix(@a, red, 0.5)'
//! - gtkcolor --tokens theme.css   # Print the token stream

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gtkcolor_common::warning::warn_once;
use gtkcolor_css::{
    CSSTokenizer, ConvertOptions, Resolver, Warning, convert_stylesheet,
    parse_color_expression, serialize,
};
use serde_json::json;

/// gtkcolor: translate GTK color expressions into standard CSS
#[derive(Parser, Debug)]
#[command(name = "gtkcolor")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Convert a theme
    gtkcolor gtk.css -o theme.css

    # Convert from stdin
    cat gtk.css | gtkcolor

    # Resolve a single expression
    gtkcolor --expr 'shade(#ff0000, 0.5)'

    # Show the parsed expression and its canonical form
    gtkcolor --expr 'alpha(@accent, 0.5)' --json

    # Use a different rule for the defined colors
    gtkcolor --root-selector 'window' gtk.css
"#)]
struct Cli {
    /// Stylesheet to convert (stdin when absent or `-`)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short = 'o', long, value_name = "OUT")]
    output: Option<PathBuf>,

    /// Selector of the rule that receives `@define-color` properties
    #[arg(long, value_name = "SEL", default_value = ":root")]
    root_selector: String,

    /// Resolve one color expression instead of a stylesheet
    #[arg(long, value_name = "EXPR", conflicts_with = "tokens")]
    expr: Option<String>,

    /// Print the parsed expression and canonical color as JSON (with --expr)
    #[arg(long, requires = "expr")]
    json: bool,

    /// Print the token stream of the input
    #[arg(long)]
    tokens: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref expression) = cli.expr {
        let output = resolve_expression(expression, cli.json)?;
        return emit(&cli, &output);
    }

    let input = read_input(&cli)?;
    if cli.tokens {
        return emit(&cli, &token_listing(&input));
    }

    let options = ConvertOptions {
        root_selector: cli.root_selector.clone(),
    };
    let conversion = convert_stylesheet(&input, &options)
        .with_context(|| format!("failed to convert {}", input_name(&cli)))?;
    report(&conversion.warnings);
    emit(&cli, &conversion.css)
}

fn resolve_expression(expression: &str, as_json: bool) -> Result<String> {
    let color = parse_color_expression(expression)
        .with_context(|| format!("failed to parse `{expression}`"))?;
    let mut resolver = Resolver::new();
    let canonical = resolver
        .resolve(&color)
        .with_context(|| format!("failed to resolve `{expression}`"))?;
    report(&resolver.take_warnings());

    let css = serialize(&canonical);
    if !as_json {
        return Ok(format!("{css}\n"));
    }
    let document = json!({
        "expression": expression,
        "parsed": color,
        "canonical": canonical,
        "css": css,
    });
    let mut text = serde_json::to_string_pretty(&document).context("failed to encode JSON")?;
    text.push('\n');
    Ok(text)
}

fn token_listing(input: &str) -> String {
    let mut listing = String::new();
    for token in CSSTokenizer::tokenize(input) {
        let span = format!("{}..{}", token.span.start, token.span.end);
        listing.push_str(&format!(
            "{span:<12} {:<24} {:?}\n",
            token.token.to_string(),
            token.text(input)
        ));
    }
    listing
}

fn report(warnings: &[Warning]) {
    for warning in warnings {
        let _ = warn_once("resolve", &warning.to_string());
    }
}

fn input_name(cli: &Cli) -> String {
    match cli.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => path.display().to_string(),
        _ => "stdin".to_string(),
    }
}

fn read_input(cli: &Cli) -> Result<String> {
    match cli.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => io::read_to_string(io::stdin()).context("failed to read stdin"),
    }
}

fn emit(cli: &Cli, text: &str) -> Result<()> {
    if let Some(ref path) = cli.output {
        return fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()));
    }
    io::stdout()
        .lock()
        .write_all(text.as_bytes())
        .context("failed to write stdout")
}
