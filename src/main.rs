use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use indoc::indoc;
use thiserror::Error;

use wiw::input::{self, Direction, GestureEvent, GestureKind, InputReconciler, Intent};
use wiw::persistence::{self, FileStorage, PersistError, WorkspaceStorage};
use wiw::theme::{Theme, UnknownTheme};
use wiw::tracing_sub;
use wiw::window::{PRESET_SIZES, WindowId, WindowOptions, preset_by_name};
use wiw::{CanvasRect, Store};

const AFTER_HELP: &str = indoc! {"
    The workspace lives in <DATA_DIR> as a single JSON record and is loaded
    before every command. Commands that change it save it afterwards.

    Coordinates given to `drop` are canvas pixels at the current zoom, the
    way a drag or resize gesture reports them; they are stored in model
    space.
"};

#[derive(Parser, Debug)]
#[command(name = "wiw", version, about = "Manage a multi-window web dashboard workspace")]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Directory holding the stored workspace.
    #[arg(long, default_value = ".wiw")]
    data_dir: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the workspace, windows listed bottom to top.
    Show,
    /// Open a new window.
    Open {
        url: String,
        #[arg(long)]
        title: Option<String>,
        /// Viewport preset, e.g. 390x844.
        #[arg(long)]
        preset: Option<String>,
    },
    /// Close a window.
    Close { id: String },
    /// Raise a window above all others and select it.
    Front { id: String },
    /// Finish a drag/resize at a canvas-space rectangle.
    Drop {
        id: String,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    /// Move a window by one nudge step.
    Nudge { id: String, direction: NudgeArg },
    /// Set the canvas zoom; snapped to the nearest supported level.
    Zoom { level: f64 },
    /// Switch between light and dark.
    Theme { theme: String },
    /// Resize a window to a viewport preset.
    Preset { id: String, name: String },
    /// List viewport presets.
    Presets,
    /// List the keyboard bindings the input layer understands.
    Keys,
    /// Write the workspace as pretty JSON.
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check an exported file and summarize it. Does not replace the workspace.
    Import { file: PathBuf },
    /// Delete the stored workspace.
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NudgeArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<NudgeArg> for Direction {
    fn from(arg: NudgeArg) -> Self {
        match arg {
            NudgeArg::Up => Direction::Up,
            NudgeArg::Down => Direction::Down,
            NudgeArg::Left => Direction::Left,
            NudgeArg::Right => Direction::Right,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("no window with id `{0}`")]
    UnknownWindow(String),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("`{0}` is not a valid http(s) url")]
    InvalidUrl(String),
    #[error(transparent)]
    Theme(#[from] UnknownTheme),
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid workspace file: {0}")]
    Import(#[from] PersistError),
    #[error("failed to encode workspace: {0}")]
    Export(#[from] serde_json::Error),
    #[error("workspace could not be saved")]
    Save,
    #[error("workspace could not be cleared")]
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_sub::init_with_level(tracing_sub::level_for_verbosity(cli.verbose));
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("wiw: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut storage = WorkspaceStorage::new(FileStorage::new(&cli.data_dir));
    let mut store = Store::new();
    store.initialize(&storage);
    // The host applies the palette once at startup.
    store.take_theme_change();

    let mutated = execute(&mut store, &mut storage, cli.command)?;
    if mutated {
        if let Some(theme) = store.take_theme_change() {
            for (name, value) in theme.palette().css_vars() {
                tracing::debug!(name, value, "theme variable");
            }
        }
        if !store.save(&mut storage) {
            return Err(CliError::Save);
        }
    }
    Ok(())
}

fn existing(store: &Store, raw: &str) -> Result<WindowId, CliError> {
    let id = WindowId::from(raw);
    if store.window(&id).is_some() {
        Ok(id)
    } else {
        Err(CliError::UnknownWindow(raw.to_string()))
    }
}

fn execute(
    store: &mut Store,
    storage: &mut WorkspaceStorage<FileStorage>,
    command: Command,
) -> Result<bool, CliError> {
    let reconciler = InputReconciler::default();
    match command {
        Command::Show => {
            print_workspace(store);
            Ok(false)
        }
        Command::Open { url, title, preset } => {
            let mut options = WindowOptions::default();
            if let Some(title) = title {
                options = options.with_title(title);
            }
            if let Some(name) = preset {
                let preset =
                    preset_by_name(&name).ok_or_else(|| CliError::UnknownPreset(name.clone()))?;
                options = options.with_preset(preset);
            }
            let id = store
                .add_window(&url, options)
                .ok_or_else(|| CliError::InvalidUrl(url.clone()))?;
            println!("{id}");
            Ok(true)
        }
        Command::Close { id } => {
            let id = existing(store, &id)?;
            Ok(store.remove_window(&id))
        }
        Command::Front { id } => {
            let id = existing(store, &id)?;
            let event = GestureEvent::new(id, GestureKind::PointerDown);
            Ok(reconciler.handle_gesture(store, &event))
        }
        Command::Drop { id, x, y, w, h } => {
            let id = existing(store, &id)?;
            let start = GestureEvent::new(id.clone(), GestureKind::ResizeStart);
            let stop = GestureEvent::new(id, GestureKind::ResizeStop(CanvasRect::new(x, y, w, h)));
            let raised = reconciler.handle_gesture(store, &start);
            let moved = reconciler.handle_gesture(store, &stop);
            Ok(raised || moved)
        }
        Command::Nudge { id, direction } => {
            let id = existing(store, &id)?;
            let intent = Intent::Nudge {
                id,
                direction: direction.into(),
            };
            Ok(input::apply(store, intent))
        }
        Command::Zoom { level } => {
            let before = store.zoom();
            let zoom = store.set_zoom(level);
            println!("{zoom}");
            Ok(zoom != before)
        }
        Command::Theme { theme } => {
            let theme: Theme = theme.parse()?;
            let before = store.theme();
            store.set_theme(theme);
            Ok(before != theme)
        }
        Command::Preset { id, name } => {
            let id = existing(store, &id)?;
            if preset_by_name(&name).is_none() {
                return Err(CliError::UnknownPreset(name));
            }
            Ok(store.resize_to_preset(&id, &name))
        }
        Command::Presets => {
            for preset in PRESET_SIZES {
                println!("{preset}");
            }
            Ok(false)
        }
        Command::Keys => {
            for (action, combos) in reconciler.bindings().help_entries() {
                println!("{:<28} {}", action.to_string(), combos.join(", "));
            }
            Ok(false)
        }
        Command::Export { out } => {
            let json = persistence::export_json(store.workspace())?;
            match out {
                Some(path) => fs::write(&path, json).map_err(|source| CliError::Write {
                    path: path.clone(),
                    source,
                })?,
                None => println!("{json}"),
            }
            Ok(false)
        }
        Command::Import { file } => {
            let text = fs::read_to_string(&file).map_err(|source| CliError::Read {
                path: file.clone(),
                source,
            })?;
            let workspace = persistence::import_workspace(&text)?;
            println!(
                "{} ({}): {} window(s), zoom {}, theme {}",
                workspace.name,
                workspace.workspace_id,
                workspace.windows.len(),
                workspace.zoom,
                workspace.theme
            );
            Ok(false)
        }
        Command::Reset => {
            if !storage.clear() {
                return Err(CliError::Clear);
            }
            Ok(false)
        }
    }
}

fn print_workspace(store: &Store) {
    let workspace = store.workspace();
    println!(
        "{} ({})  zoom {}  theme {}",
        workspace.name, workspace.workspace_id, workspace.zoom, workspace.theme
    );
    let selected = store.selected_window_id();
    for window in workspace.windows_by_stack() {
        let marker = if Some(&window.id) == selected { '*' } else { ' ' };
        println!(
            "{marker} {:<38} z={:<4} {:>6}x{:<6} @ ({}, {})  {}",
            window.id.as_str(),
            window.z,
            window.w,
            window.h,
            window.x,
            window.y,
            window.url
        );
    }
}
