//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `mindmap_core` linkage with deterministic output.
//! - Optionally load a saved document and print its summary and preview.
//!
//! Usage: `mindmap_cli [document.json] [category|all]`

use mindmap_core::{read_document_file, CategoryFilter, MindMapSession};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("mindmap_core ping={}", mindmap_core::ping());
    println!("mindmap_core version={}", mindmap_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        return ExitCode::SUCCESS;
    };

    let document = match read_document_file(&path) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = MindMapSession::default();
    let report = session.load(&document);
    println!(
        "loaded nodes={} connections={} dropped={}",
        report.nodes_created, report.connections_created, report.connections_dropped
    );
    println!("categories={}", session.categories().join(","));

    if let Some(selector) = args.next() {
        session.set_category_filter(CategoryFilter::from_selector(&selector));
    }
    match session.preview_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to render preview: {err}");
            ExitCode::FAILURE
        }
    }
}
