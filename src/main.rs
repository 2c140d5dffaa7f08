//! smaplink CLI
//!
//! Embeds external source maps into generated JS/CSS files and extracts
//! inline source maps into external files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tempfile::NamedTempFile;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use smaplink::{
    embed, extract, join_lines, last_comment, selftest, split_lines, CommentSyntax, EmbedOptions,
    SourceMapJson,
};

/// Move source maps between inline comments and external files
#[derive(Parser, Debug)]
#[command(name = "smaplink", version, about, long_about = None)]
struct Args {
    /// Log filter, e.g. `debug` or `smaplink=trace`
    #[arg(long, global = true, env = "SMAPLINK_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Embed an external source map as an inline comment
    Embed(EmbedArgs),
    /// Extract an inline source map into an external file
    Extract(ExtractArgs),
    /// Check the comment grammar against the built-in case table
    SelfTest,
}

#[derive(clap::Args, Debug)]
struct EmbedArgs {
    /// Generated file to read
    input: PathBuf,
    /// Source map file to embed
    map: PathBuf,
    /// Where to write the generated file with the inline map
    output: PathBuf,
    /// Comment syntax of the inline map
    #[arg(long, value_enum, default_value_t = SyntaxArg::Auto)]
    syntax: SyntaxArg,
    /// Do not end the file with a newline after the comment
    #[arg(long)]
    no_trailing_newline: bool,
}

#[derive(clap::Args, Debug)]
struct ExtractArgs {
    /// Generated file with an inline source map
    input: PathBuf,
    /// Where to write the generated file with the reference comment
    output: PathBuf,
    /// Where to write the extracted source map
    map_output: PathBuf,
    /// Name written into the reference comment (defaults to the file name of MAP_OUTPUT)
    reference: Option<String>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum SyntaxArg {
    /// Keep the syntax of the existing comment, else `block` for `.css` output
    Auto,
    /// `//# sourceMappingURL=...`
    Line,
    /// `/*# sourceMappingURL=... */`
    Block,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

/// Writes `text` to a temporary file next to `path`, to be persisted later.
fn stage_text(path: &Path, text: &str) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to write {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(file)
}

fn persist_text(file: NamedTempFile, path: &Path) -> Result<()> {
    file.persist(path).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn resolve_syntax(arg: SyntaxArg, lines: &[String], output: &Path) -> CommentSyntax {
    match arg {
        SyntaxArg::Line => CommentSyntax::Line,
        SyntaxArg::Block => CommentSyntax::Block,
        SyntaxArg::Auto => match last_comment(lines) {
            Some(comment) => comment.syntax,
            None if output.extension().is_some_and(|ext| ext == "css") => CommentSyntax::Block,
            None => CommentSyntax::Line,
        },
    }
}

fn run_embed(args: &EmbedArgs) -> Result<()> {
    let lines = split_lines(&read_text(&args.input)?);
    let mut map_buf = fs::read(&args.map)
        .with_context(|| format!("failed to read {}", args.map.display()))?;
    let map = SourceMapJson::from_slice(&mut map_buf)
        .with_context(|| format!("failed to parse source map {}", args.map.display()))?;

    let options = EmbedOptions::new()
        .with_syntax(resolve_syntax(args.syntax, &lines, &args.output))
        .with_trailing_newline(!args.no_trailing_newline);
    let lines = embed(lines, map, &options)
        .with_context(|| format!("cannot embed {}", args.map.display()))?;

    write_text(&args.output, &join_lines(&lines))?;
    info!(output = %args.output.display(), "wrote inline source map");
    Ok(())
}

fn default_reference(map_output: &Path) -> Result<String> {
    map_output
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .with_context(|| format!("cannot derive a reference from {}", map_output.display()))
}

fn run_extract(args: &ExtractArgs) -> Result<()> {
    let reference = match &args.reference {
        Some(reference) => reference.clone(),
        None => default_reference(&args.map_output)?,
    };
    let lines = split_lines(&read_text(&args.input)?);
    let extracted = extract(lines, &reference)
        .with_context(|| format!("cannot extract from {}", args.input.display()))?;
    let map = extracted.map.to_pretty()?;
    let artifact = join_lines(&extracted.lines);

    // both files are staged before either is renamed into place
    let map_file = stage_text(&args.map_output, &map)?;
    let artifact_file = stage_text(&args.output, &artifact)?;
    persist_text(map_file, &args.map_output)?;
    persist_text(artifact_file, &args.output)?;
    info!(
        output = %args.output.display(),
        map_output = %args.map_output.display(),
        "wrote external source map"
    );
    Ok(())
}

fn run_self_test() -> bool {
    let report = selftest::run();
    for case in &report.cases {
        println!("{case}");
    }
    let failed = report.failures().count();
    println!(
        "self-test finished: {} passed, {failed} failed",
        report.cases.len() - failed
    );
    report.passed()
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let result = match &args.command {
        Command::Embed(embed_args) => run_embed(embed_args),
        Command::Extract(extract_args) => run_extract(extract_args),
        Command::SelfTest => {
            return if run_self_test() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
