//! End-to-end tests for definition resolution and materialization
//!
//! Prompts are answered by `StaticPrompter`, so every scenario runs
//! without a terminal.

use std::fs;
use std::path::{Path, PathBuf};

use create_project::{
    init_project, resolve, Bindings, Config, Definition, Error, ResolveError, StaticPrompter,
};
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn answers(pairs: &[(&str, &str)]) -> Bindings {
    pairs.iter().copied().collect()
}

const LANG_DEFINITION: &str = r#"
templates:
  selection_variable: lang
  templates:
    go: { path: go-tpl }
    rs: { path: rust-tpl }
  variables:
    lang:
      type: select
      values: { go: Go, rs: Rust }
"#;

// ============================================================================
// Resolution only
// ============================================================================

#[test]
fn test_select_go_resolves_go_template() {
    let def = Definition::from_yaml(LANG_DEFINITION).unwrap();
    let resolved = resolve(
        &def.templates,
        Bindings::new(),
        StaticPrompter::new(answers(&[("lang", "go")])),
        16,
    )
    .unwrap();

    assert_eq!(resolved.template_path, "go-tpl");
}

#[test]
fn test_unlisted_answer_is_unknown_selection() {
    let def = Definition::from_yaml(LANG_DEFINITION).unwrap();
    let err = resolve(
        &def.templates,
        Bindings::new(),
        StaticPrompter::new(answers(&[("lang", "py")])),
        16,
    )
    .unwrap_err();

    assert!(matches!(err, ResolveError::UnknownSelection { ref value, .. } if value == "py"));
}

#[test]
fn test_nested_definition_accumulates_bindings() {
    let def = Definition::from_yaml(
        r#"
templates:
  selection_variable: lang
  variables:
    lang: { type: select, values: { rs: Rust, go: Go } }
    name: { default: parent-name }
  templates:
    rs:
      selection_variable: kind
      variables:
        kind: { type: select, values: { bin: Binary, lib: Library }, default: lib }
      templates:
        bin:
          path: rust/bin
          variables:
            name: { default: child-name }
        lib: { path: rust/lib }
"#,
    )
    .unwrap();

    let mut prompter = StaticPrompter::new(answers(&[("lang", "rs"), ("kind", "bin")]));
    let resolved = resolve(&def.templates, Bindings::new(), &mut prompter, 16).unwrap();

    assert_eq!(resolved.template_path, "rust/bin");
    assert_eq!(
        resolved.bindings,
        answers(&[("lang", "rs"), ("kind", "bin"), ("name", "child-name")])
    );
    assert_eq!(
        prompter.asked,
        vec![
            vec!["lang".to_string(), "name".to_string()],
            vec!["kind".to_string()],
            vec!["name".to_string()],
        ]
    );
}

// ============================================================================
// Full pipeline
// ============================================================================

fn config_for(data: &Path) -> Config {
    Config::default().with_data_dir(data).with_search_path(Vec::new())
}

#[test]
fn test_basic_template_materialized() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    write(
        &data.join("definitions/basic.yaml"),
        "templates:\n  path: basic\n  variables:\n    proj: { type: text, default: app }\n",
    );
    write(&data.join("templates/basic/src/main.rs"), "// @@PROJ@@\nfn main() {}\n");
    write(&data.join("templates/basic/@@PROJ@@.txt"), "name: @@PROJ@@");
    let dest = temp.path().join("out");

    let result = init_project(
        &config_for(&data),
        "basic",
        &dest,
        StaticPrompter::new(answers(&[("proj", "myapp")])),
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(dest.join("src/main.rs")).unwrap(),
        "// myapp\nfn main() {}\n"
    );
    // File names are not substituted, only contents
    assert_eq!(
        fs::read_to_string(dest.join("@@PROJ@@.txt")).unwrap(),
        "name: myapp"
    );
    assert_eq!(
        result.files_created,
        vec![PathBuf::from("@@PROJ@@.txt"), PathBuf::from("src/main.rs")]
    );
    assert!(result.unresolved.is_empty());
}

#[test]
fn test_unknown_selection_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    write(&data.join("definitions/lang.yaml"), LANG_DEFINITION);
    write(&data.join("templates/go-tpl/main.go"), "package main\n");
    let dest = temp.path().join("out");

    let err = init_project(
        &config_for(&data),
        "lang",
        &dest,
        StaticPrompter::new(answers(&[("lang", "py")])),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Resolve(ResolveError::UnknownSelection { .. })
    ));
    assert!(!dest.exists());
}

#[test]
fn test_bundled_root_wins_over_search_path() {
    let temp = TempDir::new().unwrap();
    let bundled = temp.path().join("bundled");
    let share = temp.path().join("share");
    write(
        &bundled.join("definitions/basic.yaml"),
        "templates:\n  path: basic\n",
    );
    write(&bundled.join("templates/basic/origin.txt"), "bundled");
    write(
        &share.join("create_project/definitions/basic.yaml"),
        "templates:\n  path: other\n",
    );
    write(&share.join("create_project/templates/basic/origin.txt"), "shared");
    let dest = temp.path().join("out");

    let config = Config::default()
        .with_data_dir(&bundled)
        .with_search_path(vec![share]);
    init_project(&config, "basic", &dest, StaticPrompter::default()).unwrap();

    assert_eq!(fs::read_to_string(dest.join("origin.txt")).unwrap(), "bundled");
}

#[test]
fn test_template_found_in_later_root() {
    let temp = TempDir::new().unwrap();
    let bundled = temp.path().join("bundled");
    let share = temp.path().join("share");
    write(
        &bundled.join("definitions/web.yaml"),
        "templates:\n  path: web\n  variables:\n    port: { default: 8080 }\n",
    );
    write(
        &share.join("create_project/templates/web/config.toml"),
        "port = @@PORT@@\nhost = \"@@HOST@@\"\n",
    );
    let dest = temp.path().join("out");

    let config = Config::default()
        .with_data_dir(&bundled)
        .with_search_path(vec![share.clone()]);
    let result = init_project(&config, "web", &dest, StaticPrompter::default()).unwrap();

    assert_eq!(
        result.template_dir,
        share.join("create_project/templates/web")
    );
    assert_eq!(
        fs::read_to_string(dest.join("config.toml")).unwrap(),
        "port = 8080\nhost = \"@@HOST@@\"\n"
    );
    assert_eq!(result.unresolved.len(), 1);
    assert_eq!(result.unresolved[0].token, "@@HOST@@");
}

#[test]
fn test_shipped_definitions_parse() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/definitions");
    for entry in fs::read_dir(&data).unwrap() {
        let path = entry.unwrap().path();
        let yaml = fs::read_to_string(&path).unwrap();
        assert!(
            Definition::from_yaml(&yaml).is_ok(),
            "{} failed to parse",
            path.display()
        );
    }
}

#[test]
fn test_shipped_rust_library_template() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("demo");
    let config = Config::default().with_search_path(Vec::new());

    let result = init_project(
        &config,
        "rust",
        &dest,
        StaticPrompter::new(answers(&[("name", "demo"), ("kind", "lib")])),
    )
    .unwrap();

    assert_eq!(result.template_path, "rust/lib");
    let manifest = fs::read_to_string(dest.join("Cargo.toml")).unwrap();
    assert!(manifest.contains("name = \"demo\""));
    assert!(manifest.contains("description = \"A Rust library\""));
    assert!(dest.join(".gitignore").exists());
    assert!(result.unresolved.is_empty());
}
