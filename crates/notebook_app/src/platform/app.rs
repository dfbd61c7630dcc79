use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use cells_core::{CellNavigator, LanguageRegistry, HAS_CODE_CELLS_CONTEXT};
use notebook_logging::{notebook_debug, notebook_info, notebook_warn};
use results_core::ResultSettings;
use results_engine::{ChannelEvent, ChannelHandle, CloseReason, ResultChannel};

use super::config::{load_config, AppConfig, LoadedConfig};
use super::editor::FileEditor;
use super::render::{TerminalViewport, DEFAULT_VIEWPORT_HEIGHT};
use crate::cli::{Cli, Command, MoveArgs};

#[derive(Debug, Clone, Copy)]
enum Direction {
    Previous,
    Next,
}

pub fn run_app(cli: Cli) -> Result<()> {
    let LoadedConfig { config, source } = load_config(cli.config.as_deref())?;
    if !notebook_logging::initialize(config.log, cli.log_level) {
        eprintln!("Warning: logging could not be initialized for {:?}", config.log);
    }
    match &source {
        Some(path) => notebook_info!("Loaded configuration from {:?}", path),
        None => notebook_debug!("no configuration file, using defaults"),
    }

    match cli.command {
        Command::Cells { file, language } => {
            let registry = config.language_registry()?;
            print_cells(&file, language.as_deref(), &registry)
        }
        Command::Next(args) => move_cursor(&config, &args, Direction::Next),
        Command::Previous(args) => move_cursor(&config, &args, Direction::Previous),
        Command::View { addr, append } => {
            let mut settings = config.result_settings();
            settings.append_results |= append;
            view_results(&addr, settings)
        }
    }
}

fn print_cells(file: &Path, language: Option<&str>, registry: &LanguageRegistry) -> Result<()> {
    let mut editor = FileEditor::open(file, language, registry)?;
    let document = editor.document();
    let cells = CellNavigator::new(registry).cells(&mut editor, &document);
    if editor.context_flag(HAS_CODE_CELLS_CONTEXT) != Some(true) {
        notebook_warn!(
            "no cells found in {} as {} (languages with cell support: {})",
            document.file_name(),
            document.language_id(),
            registry.ids().join(", ")
        );
    }
    for cell in &cells {
        println!("{}-{}\t{}", cell.range.start + 1, cell.range.end + 1, cell.title);
    }
    Ok(())
}

fn move_cursor(config: &AppConfig, args: &MoveArgs, direction: Direction) -> Result<()> {
    let registry = config.language_registry()?;
    let navigator = CellNavigator::new(&registry);
    let mut editor = FileEditor::open(&args.file, args.language.as_deref(), &registry)?;
    let line = usize::try_from(args.line - 1).context("line number out of range")?;
    editor.place_cursor(line);

    let moved = match direction {
        Direction::Next => navigator.go_to_next_cell(&mut editor),
        Direction::Previous => navigator.go_to_previous_cell(&mut editor),
    };
    match moved {
        Some(position) => {
            notebook_debug!("revealed {:?}", editor.revealed());
            println!("{}", position.line + 1);
        }
        None => notebook_info!("no {:?} cell from line {}", direction, args.line),
    }
    Ok(())
}

fn view_results(addr: &str, settings: ResultSettings) -> Result<()> {
    let handle = ChannelHandle::connect(addr);
    let viewport = Arc::new(TerminalViewport::new(DEFAULT_VIEWPORT_HEIGHT));
    let channel = ResultChannel::new(settings, handle.emitter(), Arc::clone(&viewport));

    while let Some(event) = handle.recv() {
        match event {
            ChannelEvent::Signal(signal) => {
                if let Some(view) = channel.handle(signal) {
                    let stdout = io::stdout();
                    viewport
                        .draw(&view, &mut stdout.lock())
                        .context("failed to draw results")?;
                }
            }
            ChannelEvent::Closed(CloseReason::ConnectFailed(reason)) => {
                anyhow::bail!("could not connect to {addr}: {reason}");
            }
            ChannelEvent::Closed(reason) => {
                notebook_info!("result channel closed: {}", reason);
                break;
            }
        }
    }
    Ok(())
}
