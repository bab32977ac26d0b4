//! notemark - render and search notes written in inline markup

use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use notemark::config::Config;
use notemark::markup::project;
use notemark::render::{ansi, html, render_text};
use notemark::search::{filter_notes, Highlighter, Note, NotePreview, PreviewOptions};
use notemark::{NotemarkError, Result};

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by NOTEMARK_LOG (default: warn)
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("NOTEMARK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let force_plain = take_flag(&mut args, "--plain");

    let Some((command, rest)) = args.split_first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "--help" | "-h" => print_usage(),
        "--version" | "-V" => print_version(),
        "render" => {
            let config = Config::load()?;
            let note = load_single(rest)?;
            let tree = render_text(note.content.as_deref().unwrap_or_default());
            let mut stdout = io::stdout().lock();
            ansi::write_tree(&mut stdout, &tree, use_colors(&config, force_plain))?;
            writeln!(stdout)?;
        }
        "plain" => {
            let note = load_single(rest)?;
            println!("{}", project(note.content.as_deref().unwrap_or_default()));
        }
        "html" => {
            let note = load_single(rest)?;
            let tree = render_text(note.content.as_deref().unwrap_or_default());
            println!("{}", html::to_html(&tree));
        }
        "search" => {
            let (query, paths) = rest
                .split_first()
                .ok_or_else(|| NotemarkError::Usage("search needs a QUERY".to_string()))?;
            let config = Config::load()?;
            search(query, paths, &config, force_plain)?;
        }
        other => {
            return Err(NotemarkError::Usage(format!(
                "unknown command `{}` (try --help)",
                other
            )));
        }
    }

    Ok(())
}

/// Remove a flag from the argument list, reporting whether it was present
fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != flag);
    args.len() != before
}

fn use_colors(config: &Config, force_plain: bool) -> bool {
    config.color && !force_plain && io::stdout().is_terminal()
}

fn load_single(args: &[String]) -> Result<Note> {
    match args {
        [path] => Note::from_path(Path::new(path)),
        _ => Err(NotemarkError::Usage("expected exactly one FILE".to_string())),
    }
}

fn search(query: &str, paths: &[String], config: &Config, force_plain: bool) -> Result<()> {
    if paths.is_empty() {
        return Err(NotemarkError::Usage("search needs at least one FILE".to_string()));
    }

    let notes = paths
        .iter()
        .map(|p| Note::from_path(Path::new(p)))
        .collect::<Result<Vec<_>>>()?;
    let matches = filter_notes(&notes, query);
    debug!(query, matches = matches.len(), "search finished");

    let highlighter = Highlighter::new(query);
    let options = PreviewOptions::from(config);
    let colors = use_colors(config, force_plain);
    let mut stdout = io::stdout().lock();

    for (i, note) in matches.iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }
        let preview = NotePreview::new(note, &options);
        ansi::write_tree(&mut stdout, &preview.render(&highlighter), colors)?;
        writeln!(stdout)?;
    }

    if matches.is_empty() {
        eprintln!("No notes match `{}`", highlighter.query());
    }
    Ok(())
}

fn print_usage() {
    println!("notemark {} - inline note markup", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: notemark [--plain] COMMAND [ARGS]");
    println!();
    println!("Commands:");
    println!("  render FILE            Render a note with terminal styling");
    println!("  plain FILE             Print the plain-text projection");
    println!("  html FILE              Print the note as an HTML fragment");
    println!("  search QUERY FILE...   List notes matching QUERY with highlights");
    println!();
    println!("Options:");
    println!("  --plain        Disable terminal styling");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Markup:");
    println!("  **bold** *bold* _italic_ ~strike~");
    println!("  #r(red) #b(blue) #g(green) #y(yellow)");
    println!();
    println!("Notes ending in .toml may set title, content and tags.");
    println!("Settings are read from ~/.notemark.toml; logging via NOTEMARK_LOG.");
}

fn print_version() {
    println!("notemark {}", env!("CARGO_PKG_VERSION"));
}
