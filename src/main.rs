// codesheet: token-entry coding worksheets in the terminal

use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use codesheet::catalog::{ExerciseKey, TokenCatalog};
use codesheet::config::Config;
use codesheet::execution::{ExecutionDispatcher, ProcessGateway};
use codesheet::session::Session;
use codesheet::ui::App;

#[derive(Parser)]
#[command(author, version, about = "Token-entry coding worksheets")]
struct Cli {
    /// Catalog file to use instead of the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Config file (defaults to $CODESHEET_CONFIG or ~/.codesheet/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "python")]
    language: String,

    /// Lesson number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    lesson: u32,

    /// Chapter number within the lesson, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    chapter: u32,

    /// Print the catalog's exercises and exit
    #[arg(long)]
    list: bool,
}

fn print_catalog(catalog: &TokenCatalog) {
    for language in catalog.languages() {
        println!("{}", language.name);
        for (l, lesson) in language.lessons.iter().enumerate() {
            println!("  {}. {}", l + 1, lesson.title);
            for (c, chapter) in lesson.chapters.iter().enumerate() {
                println!("     {}.{} {}", l + 1, c + 1, chapter.title);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let catalog_path = cli.catalog.or_else(|| config.catalog.clone());
    let catalog = match &catalog_path {
        Some(path) => {
            eprintln!("Loading catalog {}...", path.display());
            TokenCatalog::load(path)
        }
        None => TokenCatalog::bundled(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.list {
        print_catalog(&catalog);
        return Ok(());
    }

    let key = ExerciseKey::new(
        cli.language,
        cli.lesson as usize - 1,
        cli.chapter as usize - 1,
    );
    let session = match Session::open(&catalog, key) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --list to see the available exercises.");
            std::process::exit(1);
        }
    };

    let gateway = match ProcessGateway::new(&config.execution.command, config.timeout()) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    eprintln!(
        "Starting '{}' with {} as interpreter...",
        session.title(),
        gateway.program()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let dispatcher =
        ExecutionDispatcher::new(gateway, runtime.handle().clone(), config.tick_interval());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(
        session,
        dispatcher,
        config.source_mode(),
        config.blink_interval(),
    );
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
