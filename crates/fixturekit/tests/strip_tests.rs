//! End-to-end runs of the widget parameter stripper over a project tree.

mod common;

use std::path::PathBuf;

use common::{default_stripper, Workspace};
use fixturekit::config::StripperConfig;
use fixturekit::report::strip_report;
use fixturekit::strip::{AmbiguityReason, WidgetStripper};

fn run(ws: &Workspace, config: &StripperConfig) -> fixturekit::StripSummary {
    WidgetStripper::from_config(config)
        .unwrap()
        .run(ws.root(), config)
        .unwrap()
}

#[test]
fn test_modifies_only_matching_files() {
    let ws = Workspace::new();
    ws.write("lib/a.dart", "value: 5,\n");
    ws.write("lib/b.dart", "Text('no params here');\n");

    let summary = run(&ws, &default_stripper());

    assert_eq!(summary.fixed_count(), 1);
    assert!(!ws.read("lib/a.dart").contains("value: 5,"));
    assert_eq!(ws.read("lib/b.dart"), "Text('no params here');\n");

    let fixed: Vec<PathBuf> = summary.fixed_files().map(|p| p.to_path_buf()).collect();
    assert_eq!(fixed, vec![ws.path("lib/a.dart")]);
}

#[test]
fn test_many_matches_count_once() {
    let ws = Workspace::new();
    ws.write(
        "lib/form.dart",
        "Column(children: [\n  Input(\n    value: a,\n    label: 'A',\n  ),\n  Input(\n    value: b,\n    label: 'B',\n  ),\n  Input(\n    value: c,\n    label: 'C',\n  ),\n]);\n",
    );

    let summary = run(&ws, &default_stripper());

    assert_eq!(summary.fixed_count(), 1);
    let outcome = summary.outcomes().next().unwrap();
    assert_eq!(outcome.removed, 3);
    assert!(!ws.read("lib/form.dart").contains("value:"));
}

#[test]
fn test_nested_directories_and_other_extensions() {
    let ws = Workspace::new();
    ws.write("lib/widgets/forms/input.dart", "Input(value: 1, label: 'x')\n");
    ws.write("lib/notes.md", "Input(value: 1, label: 'x')\n");
    ws.write("test/input_test.dart", "Input(value: 1, label: 'x')\n");

    let summary = run(&ws, &default_stripper());

    assert_eq!(summary.fixed_count(), 1);
    assert_eq!(ws.read("lib/widgets/forms/input.dart"), "Input(label: 'x')\n");
    assert_eq!(ws.read("lib/notes.md"), "Input(value: 1, label: 'x')\n");
    assert_eq!(ws.read("test/input_test.dart"), "Input(value: 1, label: 'x')\n");
}

#[test]
fn test_ambiguous_occurrences_are_reported_not_edited() {
    let ws = Workspace::new();
    let original = "Input(\n  value: compute(a, b),\n  label: 'x',\n)\n";
    ws.write("lib/a.dart", original);

    let summary = run(&ws, &default_stripper());

    assert_eq!(summary.fixed_count(), 0);
    assert_eq!(ws.read("lib/a.dart"), original);

    let outcome = summary.outcomes().next().unwrap();
    assert_eq!(outcome.ambiguities.len(), 1);
    assert_eq!(outcome.ambiguities[0].line, 2);
    assert_eq!(outcome.ambiguities[0].reason, AmbiguityReason::UnbalancedValue);

    let lines = strip_report(&summary, ws.root(), "value");
    assert_eq!(
        lines,
        vec![
            "Warning: lib/a.dart:2: left 'value:' in place (value contains a nested comma or unbalanced delimiters)".to_string(),
            "Fixed 0 files".to_string(),
        ]
    );
}

#[test]
fn test_unreadable_file_does_not_stop_the_run() {
    let ws = Workspace::new();
    ws.write("lib/a.dart", "Input(value: 1, label: 'x')\n");
    std::fs::write(ws.path("lib/b.dart"), [0xff, 0xfe, 0x00, 0x76]).unwrap();
    ws.write("lib/c.dart", "Input(value: 2, label: 'y')\n");

    let summary = run(&ws, &default_stripper());

    assert_eq!(summary.fixed_count(), 2);
    assert_eq!(summary.errors().count(), 1);

    let lines = strip_report(&summary, ws.root(), "value");
    assert_eq!(lines[0], "Fixed: lib/a.dart");
    assert!(lines[1].starts_with("Error processing lib/b.dart: "));
    assert_eq!(lines[2], "Fixed: lib/c.dart");
    assert_eq!(lines[3], "Fixed 2 files");
}

#[test]
fn test_missing_source_directory_is_empty_run() {
    let ws = Workspace::new();
    let summary = run(&ws, &default_stripper());
    assert!(summary.entries.is_empty());
    assert_eq!(
        strip_report(&summary, ws.root(), "value"),
        vec!["Fixed 0 files".to_string()]
    );
}

#[test]
fn test_configured_target() {
    let ws = Workspace::new();
    ws.write("src/view.tsx", "<Input initial: 3, label=\"x\" />\n");
    ws.write("lib/a.dart", "Input(value: 1, label: 'x')\n");

    let config = StripperConfig {
        source_directory: PathBuf::from("src"),
        extension: "tsx".to_string(),
        parameter: "initial".to_string(),
    };
    let summary = run(&ws, &config);

    assert_eq!(summary.fixed_count(), 1);
    assert_eq!(ws.read("src/view.tsx"), "<Input label=\"x\" />\n");
    assert_eq!(ws.read("lib/a.dart"), "Input(value: 1, label: 'x')\n");
}
