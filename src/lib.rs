//! # flowdraft - Automation Flow Editor Model
//!
//! **flowdraft** is the headless editing model behind a visual marketing-automation
//! builder. It owns the state of one automation (entry and exclusion triggers,
//! the ordered block sequence, the connection graph, the canvas pan offset) and
//! derives the screen-space curves a renderer draws between connected blocks.
//! Any UI technology can sit on top: it forwards user events and connector
//! measurements, and reads state and curves back.
//!
//! ## Core Workflow
//!
//! 1.  **Open an editor**: Build an [`editor::EditorContext`] (automation id, session)
//!     and create an [`editor::AutomationEditor`], blank or loaded from a store.
//! 2.  **Configure triggers**: Add entry triggers and pick their kinds. Until one is
//!     set, the palette is disabled and drops are ignored.
//! 3.  **Build the flow**: Drop palette actions onto drop zones, edit block content
//!     and options, and wire blocks by clicking an output connector, then an input.
//! 4.  **Render**: Record connector rectangles as the layout is measured and call
//!     `on_animation_frame` once per refresh to get fresh curves.
//! 5.  **Save**: Hand the draft to an [`store::AutomationStore`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowdraft::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let context = EditorContext::new();
//!     let mut editor = AutomationEditor::new(context, EditorConfig::default());
//!
//!     // 1. An entry trigger unlocks the palette.
//!     let trigger = editor.add_trigger(Vocabulary::Entry).expect("list has room");
//!     editor.set_trigger_type(Vocabulary::Entry, &trigger, Some(TriggerKind::Tag))?;
//!
//!     // 2. Drop two actions and connect them.
//!     let greet = editor
//!         .drop_action(ActionKind::SendMessage, &DropTarget::Entry)?
//!         .expect("trigger is set");
//!     let ask = editor
//!         .drop_action(
//!             ActionKind::AskQuestion,
//!             &DropTarget::Anchored { anchor: greet.clone(), after: true },
//!         )?
//!         .expect("trigger is set");
//!     editor.update_block(&greet, BlockPatch::content("Olá!"))?;
//!     editor.connector_click(&greet, Endpoint::Output)?;
//!     editor.connector_click(&ask, Endpoint::Input)?;
//!
//!     // 3. The renderer reports where the connectors ended up.
//!     editor.resize_canvas(Rect::new(0.0, 0.0, 1200.0, 800.0));
//!     editor.record_connector(greet.clone(), Endpoint::Output, Rect::new(320.0, 100.0, 24.0, 24.0));
//!     editor.record_connector(ask.clone(), Endpoint::Input, Rect::new(500.0, 140.0, 24.0, 24.0));
//!     if let Some(curves) = editor.on_animation_frame() {
//!         for path in curves {
//!             println!("{} => {}", path.key, path.curve.to_svg_path());
//!         }
//!     }
//!
//!     // 4. Save through the mock backend.
//!     let mut store = MockStore::new(editor.config().save_delay());
//!     let outcome = editor.save(&mut store, true)?;
//!     println!("saved as {}, going to {}", outcome.automation_id, outcome.navigate_to);
//!     Ok(())
//! }
//! ```

pub mod automation;
pub mod blocks;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod palette;
pub mod prelude;
pub mod session;
pub mod store;
pub mod triggers;
pub mod viewport;
