use clap::Parser;
use flowdraft::prelude::*;
use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// --- Layout File Structs (Input Format Specific) ---
// These match the `layout.json` a renderer can dump after measuring the canvas.

#[derive(Deserialize)]
struct RawLayout {
    canvas: Rect,
    #[serde(default)]
    connectors: Vec<RawConnector>,
}

#[derive(Deserialize)]
struct RawConnector {
    block: String,
    endpoint: Endpoint,
    rect: Rect,
}

// Card geometry of the web front end, used when no layout file is given.
const CARD_WIDTH: f64 = 320.0;
const CARD_GAP: f64 = 128.0;
const CARD_TOP: f64 = 96.0;
const CARD_HEIGHT: f64 = 200.0;
const CANVAS_PADDING: f64 = 24.0;
const CONNECTOR_SIZE: f64 = 24.0;

/// Inspects automation drafts and renders their connection curves
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to an automation draft JSON file. A demo flow is used when omitted
    draft_path: Option<String>,

    /// Path to a layout JSON file with the canvas and connector rectangles
    #[arg(short, long)]
    layout: Option<String>,

    /// Path to an editor config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Pan the canvas by DX,DY pixels before computing curves
    #[arg(long, value_parser = parse_pan, allow_hyphen_values = true)]
    pan: Option<Point>,

    /// Directory of a local store to save the draft into
    #[arg(long)]
    save: Option<String>,

    /// Print curves as JSON instead of SVG path lines
    #[arg(long)]
    json: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowdraft=info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut cli = Cli::parse();

    if cli.human {
        prompt_missing(&mut cli);
    }
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Configuration ---
    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EditorConfig::instant(),
    };

    // --- 2. Draft Loading ---
    let draft = match &cli.draft_path {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read draft file '{}': {}", path, e))
            });
            AutomationDraft::from_json(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse draft JSON: {}", e)))
        }
        None => {
            println!("No draft file provided. Using the demo flow.");
            demo_draft(&config)
        }
    };
    let mut editor = AutomationEditor::from_draft(EditorContext::new(), config, draft);

    // --- 3. Layout ---
    match &cli.layout {
        Some(path) => apply_layout_file(&mut editor, path),
        None => apply_synthetic_layout(&mut editor),
    }

    if let Some(delta) = cli.pan {
        let start = Point::new(0.0, 0.0);
        editor.pointer_down(start, true);
        editor.pointer_move(start + delta);
        editor.pointer_up();
    }

    // --- 4. Summary ---
    print_summary(&editor);

    // --- 5. Curves ---
    let curves = editor.recompute_now().to_vec();
    if cli.json {
        let json = serde_json::to_string_pretty(&curves)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode curves: {}", e)));
        println!("{}", json);
    } else {
        println!("\n--- Connection Curves ---");
        if curves.is_empty() {
            println!("  (no measurable connections)");
        }
        for path in &curves {
            println!("  {:<12} {}", path.key, path.curve.to_svg_path());
        }
        let skipped = editor.connections().len() - curves.len();
        if skipped > 0 {
            println!("  {} connection(s) skipped: connector not measured", skipped);
        }
    }

    // --- 6. Save ---
    if let Some(dir) = &cli.save {
        let mut store = LocalStore::open(dir)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to open store: {}", e)));
        match editor.save(&mut store, false) {
            Ok(outcome) => println!(
                "\nSaved as '{}' in {} (next: {})",
                outcome.automation_id,
                store.root().display(),
                outcome.navigate_to
            ),
            Err(e) => exit_with_error(&format!("Save failed: {}", e)),
        }
    }

    println!("\nDone in {:?}", total_start.elapsed());
}

fn print_summary(editor: &AutomationEditor) {
    println!("\n--- Automation: {} ---", editor.name());
    for vocabulary in [Vocabulary::Entry, Vocabulary::Exclusion] {
        let list = editor.triggers(vocabulary);
        if list.is_empty() {
            println!("{}: (none)", vocabulary.title());
        } else {
            println!("{}: {}", vocabulary.title(), list.describe());
        }
    }

    println!("\nBlocks ({}):", editor.blocks().len());
    for (index, block) in editor.blocks().iter().enumerate() {
        let content = if block.content.is_empty() {
            "<empty>"
        } else {
            block.content.as_str()
        };
        println!(
            "  {:>2}. [{}] {} - {}",
            index + 1,
            block.id,
            block.block_type.heading(),
            content
        );
    }

    println!("\nConnections ({}):", editor.connections().len());
    for connection in editor.connections() {
        println!(
            "  {} -> {} ({})",
            connection.from, connection.to, connection.tipo
        );
    }
}

/// Reads measured rectangles from a layout file into the editor.
fn apply_layout_file(editor: &mut AutomationEditor, path: &str) {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read layout '{}': {}", path, e)));
    let layout: RawLayout = serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse layout JSON: {}", e)));

    editor.resize_canvas(layout.canvas);
    for connector in layout.connectors {
        editor.record_connector(BlockId::new(connector.block), connector.endpoint, connector.rect);
    }
}

/// Lays blocks out left to right after the trigger column, the way the web
/// front end does, and records their connectors.
fn apply_synthetic_layout(editor: &mut AutomationEditor) {
    let ids: Vec<BlockId> = editor.blocks().iter().map(|b| b.id.clone()).collect();
    let width = CANVAS_PADDING * 2.0 + (ids.len() as f64 + 1.0) * (CARD_WIDTH + CARD_GAP);
    editor.resize_canvas(Rect::new(0.0, 0.0, width, CARD_TOP + CARD_HEIGHT * 2.0));

    let connector_top = CARD_TOP + (CARD_HEIGHT - CONNECTOR_SIZE) / 2.0;
    for (index, id) in ids.into_iter().enumerate() {
        let left = CANVAS_PADDING + (index as f64 + 1.0) * (CARD_WIDTH + CARD_GAP);
        let half = CONNECTOR_SIZE / 2.0;
        editor.record_connector(
            id.clone(),
            Endpoint::Input,
            Rect::new(left - half, connector_top, CONNECTOR_SIZE, CONNECTOR_SIZE),
        );
        editor.record_connector(
            id,
            Endpoint::Output,
            Rect::new(left + CARD_WIDTH - half, connector_top, CONNECTOR_SIZE, CONNECTOR_SIZE),
        );
    }
}

/// Builds a small welcome flow: tag or form trigger, greeting, question, end.
fn demo_draft(config: &EditorConfig) -> AutomationDraft {
    let mut editor = AutomationEditor::new(EditorContext::new(), config.clone());
    editor.set_name("Boas-vindas");
    build_demo(&mut editor)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to build demo flow: {}", e)));
    editor.to_draft()
}

fn build_demo(editor: &mut AutomationEditor) -> Result<()> {
    for kind in [TriggerKind::Tag, TriggerKind::Form] {
        let id = editor
            .add_trigger(Vocabulary::Entry)
            .ok_or("entry trigger list is full")?;
        editor.set_trigger_type(Vocabulary::Entry, &id, Some(kind))?;
    }

    let greet = drop_demo(editor, ActionKind::SendMessage, DropTarget::Entry)?;
    editor.update_block(&greet, BlockPatch::content("Olá! Que bom ter você aqui."))?;

    let ask = drop_demo(
        editor,
        ActionKind::AskQuestion,
        DropTarget::Anchored {
            anchor: greet.clone(),
            after: true,
        },
    )?;
    editor.update_block(&ask, BlockPatch::content("Qual o seu orçamento?"))?;
    editor.update_block(
        &ask,
        BlockPatch::options(OptionsPatch {
            kind: Some(ResponseKind::Range),
            min: Some(100),
            max: Some(5000),
            ..OptionsPatch::default()
        }),
    )?;

    let end = drop_demo(
        editor,
        ActionKind::EndFlow,
        DropTarget::Anchored {
            anchor: ask.clone(),
            after: true,
        },
    )?;

    for (from, to) in [(&greet, &ask), (&ask, &end)] {
        editor.connector_click(from, Endpoint::Output)?;
        editor.connector_click(to, Endpoint::Input)?;
    }
    Ok(())
}

fn drop_demo(editor: &mut AutomationEditor, kind: ActionKind, target: DropTarget) -> Result<BlockId> {
    let id = editor
        .drop_action(kind, &target)?
        .ok_or("drop ignored: no entry trigger configured")?;
    Ok(id)
}

fn parse_pan(raw: &str) -> std::result::Result<Point, String> {
    let (dx, dy) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY but got '{}'", raw))?;
    let dx: f64 = dx
        .trim()
        .parse()
        .map_err(|e| format!("invalid DX '{}': {}", dx, e))?;
    let dy: f64 = dy
        .trim()
        .parse()
        .map_err(|e| format!("invalid DY '{}': {}", dy, e))?;
    Ok(Point::new(dx, dy))
}

/// Fills in any paths not given on the command line by prompting for them.
fn prompt_missing(cli: &mut Cli) {
    println!("--- flowdraft Interactive Mode ---");
    if cli.draft_path.is_none() {
        cli.draft_path = optional(prompt_for_input("Enter draft path (empty for demo)", None));
    }
    if cli.layout.is_none() {
        cli.layout = optional(prompt_for_input("Enter layout path (optional)", None));
    }
    if cli.save.is_none() {
        cli.save = optional(prompt_for_input("Enter store directory to save into (optional)", None));
    }
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to flush stdout: {}", e));
    }

    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
