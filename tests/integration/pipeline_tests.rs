//! Integration tests for the DeadResources pipeline
//!
//! These tests build small projects on disk and run discovery, scanning and
//! reporting end to end through the library API.

use deadresources::config::Config;
use deadresources::discovery;
use deadresources::report::{ReportFormat, Reporter, UnusedReport};
use deadresources::{load_catalog, ScanCoordinator};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"type": "Nav", "name": "Home", "value": "Home"},
    {"type": "Nav", "name": "About", "value": "About us"},
    {"type": "Cart", "name": "AddItem", "value": "Add to cart"}
]"#;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Run the whole pipeline and return the unused `(type, name)` pairs
fn unused_pairs(root: &Path, config: &Config, workers: usize) -> Vec<(String, String)> {
    let catalog = load_catalog(&root.join("Resources/Resource-en-GB.json")).unwrap();
    let files = discovery::discover(config, root).unwrap();
    let outcome = ScanCoordinator::new(workers).unwrap().run(catalog, &files).unwrap();

    UnusedReport::build(&outcome.catalog)
        .unused
        .into_iter()
        .map(|u| (u.resource_type, u.name))
        .collect()
}

fn sample_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "Resources/Resource-en-GB.json", CATALOG);
    write(
        root,
        "Web/Views/Shared/_Layout.cshtml",
        "<nav><a href=\"/\">@NavResourceDictionary.Home</a></nav>",
    );
    write(
        root,
        "Web/wwwroot/js/cart.js",
        "button.title = resources.get(\"Cart\",\"AddItem\");\n",
    );
    dir
}

#[test]
fn test_end_to_end_reports_only_unreferenced_entry() {
    let project = sample_project();
    let unused = unused_pairs(project.path(), &Config::default(), 4);

    assert_eq!(unused, vec![("Nav".to_string(), "About".to_string())]);
}

#[test]
fn test_end_to_end_writes_report_file() {
    let project = sample_project();
    let root = project.path();
    let output = root.join("results.csv");

    let catalog = load_catalog(&root.join("Resources/Resource-en-GB.json")).unwrap();
    let files = discovery::discover(&Config::default(), root).unwrap();
    let outcome = ScanCoordinator::new(2).unwrap().run(catalog, &files).unwrap();
    Reporter::new(ReportFormat::Text, output.clone())
        .report(&UnusedReport::build(&outcome.catalog))
        .unwrap();

    assert_eq!(fs::read_to_string(output).unwrap(), "Nav, About\n");
}

#[test]
fn test_repeated_runs_are_deterministic() {
    let project = sample_project();
    let root = project.path();
    for i in 0..30 {
        write(
            root,
            &format!("Web/Scripts/module{}.js", i),
            if i % 7 == 0 { "t('Nav', 'About')" } else { "noop();" },
        );
    }

    let first = unused_pairs(root, &Config::default(), 3);
    for workers in [1, 2, 4, 8] {
        assert_eq!(unused_pairs(root, &Config::default(), workers), first);
    }
    assert!(first.is_empty());
}

#[test]
fn test_generated_files_never_contribute() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "Resources/Resource-en-GB.json", CATALOG);
    write(root, "Web/Models/Order.generated.cs", "NavResourceDictionary.Home");
    write(root, "Web/Forms/Main.Designer.cs", "NavResourceDictionary.About");
    write(root, "Web/obj/Debug/Temp.cs", "CartResourceDictionary.AddItem");

    let unused = unused_pairs(root, &Config::default(), 2);
    assert_eq!(unused.len(), 3);
}

#[test]
fn test_ignore_listed_directories_never_contribute() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "Resources/Resource-en-GB.json", CATALOG);
    write(root, "Web/legacy/Old.cshtml", "@NavResourceDictionary.About");
    write(root, "Web/Current.cshtml", "@NavResourceDictionary.Home");
    write(root, "scan.ignore", "legacy/\n");

    let config = Config {
        ignore_file: Some(root.join("scan.ignore")),
        ..Config::default()
    };
    let unused = unused_pairs(root, &config, 2);

    assert_eq!(
        unused,
        vec![
            ("Nav".to_string(), "About".to_string()),
            ("Cart".to_string(), "AddItem".to_string()),
        ]
    );
}

#[test]
fn test_script_rule_forms_end_to_end() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "Resources/Resource-en-GB.json",
        r#"[
            {"type": "A", "name": "One"},
            {"type": "B", "name": "Two"},
            {"type": "C", "name": "Three"},
            {"type": "D", "name": "Four"},
            {"type": "E", "name": "Mixed"}
        ]"#,
    );
    write(
        root,
        "app.js",
        "f(\"A\",\"One\");\nf(\"B\", \"Two\");\nf('C','Three');\nf('D', 'Four');\nf(\"E\", 'Mixed');\n",
    );

    let unused = unused_pairs(root, &Config::default(), 2);
    assert_eq!(unused, vec![("E".to_string(), "Mixed".to_string())]);
}

#[test]
fn test_class_specific_rules() {
    // Accessors in scripts and quoted pairs in templates are not references
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "Resources/Resource-en-GB.json", CATALOG);
    write(root, "app.js", "var x = NavResourceDictionary.Home;");
    write(root, "View.cshtml", "@Html.Raw(T(\"Cart\", \"AddItem\"))");

    let unused = unused_pairs(root, &Config::default(), 1);
    assert_eq!(unused.len(), 3);
}
