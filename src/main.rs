use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use dtree::config::Config;
use dtree::document::tree::DecisionTree;
use dtree::editor::session::Session;
use dtree::file::loader::load_tree;
use dtree::repl::Repl;
use dtree::terminal::line_reader::LineReader;
use dtree::theme::{get_builtin_theme, Theme};

/// dtree - A terminal-based decision tree editor
#[derive(Parser)]
#[command(name = "dtree")]
#[command(version)]
#[command(about = "A terminal-based decision tree editor", long_about = None)]
struct Cli {
    /// Tree document to load at startup (JSON, optionally .gz)
    file: Option<PathBuf>,

    /// Open the full-screen browser before the command prompt
    #[arg(short, long)]
    browse: bool,

    /// Theme name (default: from config, or default-dark)
    #[arg(short, long)]
    theme: Option<String>,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Set up a panic hook that restores the terminal before displaying panic information.
///
/// A panic inside the browser would otherwise print onto the alternate screen
/// with the cursor hidden.
fn setup_panic_hook() {
    use std::panic;

    let default_panic = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = write!(io::stderr(), "{}", termion::screen::ToMainScreen);
        let _ = write!(io::stderr(), "{}", termion::cursor::Show);
        let _ = io::stderr().flush();

        default_panic(panic_info);
    }));
}

/// Installs the global subscriber. `RUST_LOG`, when set, overrides `-d`.
fn setup_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }

    tracing::debug!(?level, "logging initialised");
    Ok(())
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();
    setup_logging(cli.debug, cli.log_file.as_deref())?;

    let config = Config::load();

    // CLI theme overrides config theme
    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let theme = get_builtin_theme(theme_name).unwrap_or_else(|| {
        eprintln!(
            "Warning: Theme '{}' not found, using default-dark",
            theme_name
        );
        Theme::default()
    });

    let tree = match &cli.file {
        Some(path) => load_tree(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => DecisionTree::new(config.default_tree_name.clone()),
    };
    tracing::info!(name = %tree.name, nodes = tree.node_count(), "session started");

    let session = Session::with_undo_limit(tree, config.undo_limit);
    let mut reader =
        LineReader::with_history_size(io::stdin(), io::stdout(), config.input_history_size);
    let mut repl = Repl::new(session, config, theme);

    if cli.browse {
        repl.browse(&mut reader)?;
    }
    repl.run(&mut reader)
}
