//! logscope - Multi-Source Terminal Log Viewer
//!
//! Opens any number of log files as tabs, with per-file filtering and cross-file search.

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use logscope::app::loader;
use logscope::render::ui::{ColorTheme, TerminalUI};
use logscope::{Application, Config, Session};
use std::path::PathBuf;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let command = Command::new("logscope")
        .version(logscope::VERSION)
        .about("A terminal log viewer for filtering and searching several files at once")
        .long_about(
            "logscope opens each file as a tab. Filter a tab by a term or by error lines, \
             search every checked tab at once, replace text, and export what is shown.",
        )
        .arg(
            Arg::new("files")
                .help("Log files to open (.log or .txt)")
                .num_args(0..)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("errors-only")
                .long("errors-only")
                .short('e')
                .help("Start with only error lines shown")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable source colors")
                .action(ArgAction::SetTrue),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .short('c')
            .help("Path to a TOML config file")
            .value_parser(clap::value_parser!(PathBuf)),
    );

    let matches = command.get_matches();

    #[cfg(feature = "config")]
    let config = match matches
        .get_one::<PathBuf>("config")
        .cloned()
        .or_else(Config::default_path)
    {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    #[cfg(not(feature = "config"))]
    let config = Config::default();
    config.validate()?;

    // Viewport height is corrected from the terminal size once the UI starts
    let mut session = Session::new(&config, 24);
    session.set_error_only(matches.get_flag("errors-only"));

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default();
    for path in &files {
        if !path.is_file() {
            anyhow::bail!("Path is not a regular file: {}", path.display());
        }
        loader::import_path(&mut session, path).await?;
    }

    let theme = if matches.get_flag("no-color") {
        ColorTheme::monochrome()
    } else {
        ColorTheme::default()
    };
    let ui_renderer = Box::new(TerminalUI::with_theme(theme)?);
    let mut app = Application::new(session, ui_renderer, &config);

    app.run().await?;

    Ok(())
}
