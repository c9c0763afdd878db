use anyhow::Result;
use block_canvas::interaction::{handle_click, handle_drag_end, handle_style_edit};
use block_canvas::{
    write_export, DragSource, DropTarget, Document, ExportConfig, NodeId, NodeKind, NodePatch,
    Outcome, ValidatedDocument,
};
use serde_json::json;
use std::path::PathBuf;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Usage: block_canvas [OUT_DIR] [CONFIG_JSON]
    let mut args = std::env::args().skip(1);
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let config = match args.next() {
        Some(path) => ExportConfig::load(&PathBuf::from(path))?,
        None => ExportConfig::default(),
    };

    println!("Block Canvas - page builder core");
    println!("================================\n");

    let mut doc = Document::new();

    // Drop a hero block and a two-column layout on the empty canvas
    let hero = doc.add_block("hero", NodeId::ROOT)?;
    let columns = doc.add_block("two-columns", NodeId::ROOT)?;
    println!("✓ Added hero and two-column blocks");
    println!("  Nodes: {}", doc.node_count());

    // Drag a button from the palette onto the canvas, then restyle it
    let Outcome::Applied(button) = handle_drag_end(
        &mut doc,
        &DragSource::Palette(NodeKind::Button),
        Some(DropTarget::Canvas),
    ) else {
        anyhow::bail!("palette drop was not applied");
    };
    handle_style_edit(&mut doc, button, "backgroundColor", "#ff0000".into());
    doc.update_node(button, NodePatch::new().property("content", json!("Buy now")))?;
    println!("\n✓ Added a red call-to-action button");

    // Move the button into the left column
    let left_column = doc
        .get_node(columns)
        .and_then(|row| row.children.first())
        .map(|col| col.id);
    if let Some(left_column) = left_column {
        match handle_drag_end(&mut doc, &DragSource::Node(button), Some(left_column.into())) {
            Outcome::Applied(_) => println!("✓ Moved the button into the left column"),
            outcome => println!("✗ Button stayed in place ({:?})", outcome),
        }
    }

    if handle_click(&mut doc, Some(hero)) != Outcome::Applied(hero) {
        println!("✗ Could not select the hero block");
    }
    println!(
        "\n📐 Selection: {}",
        doc.selected_node().map(|n| n.name.as_str()).unwrap_or("none")
    );

    let result = doc.validate();
    println!("🔎 Validation: {} issue(s), valid = {}", result.issues.len(), result.is_valid());
    println!("🧾 Events logged: {}", doc.events().len());

    let path = write_export(&out_dir, &doc, &config)?;
    println!("\n✅ Exported {} nodes to {}", doc.node_count() - 1, path.display());

    Ok(())
}
