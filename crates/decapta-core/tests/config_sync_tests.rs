//! Configuration synchronization against real files

use decapta_core::{ConfigOptions, Error, generate_config};
use decapta_fs::{NormalizedPath, SourceFormat};
use decapta_test_utils::{TestWorkspace, fixtures};
use pretty_assertions::assert_eq;
use serde_yaml::Value;

const CONFIG: &str = "admin/config.yml";

fn options(ws: &TestWorkspace) -> ConfigOptions {
    let mut options = ConfigOptions::new(NormalizedPath::new(ws.path("data")));
    options.output_file = NormalizedPath::new(ws.path(CONFIG));
    options
}

fn config_value(ws: &TestWorkspace) -> Value {
    serde_yaml::from_str(&ws.read(CONFIG)).unwrap()
}

fn field_names(collection: &Value) -> Vec<String> {
    collection["fields"]
        .as_sequence()
        .unwrap()
        .iter()
        .map(|field| field["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_new_config_from_template() {
    let ws = TestWorkspace::new();
    ws.write("data/people.csv", fixtures::PEOPLE_CSV);

    let run = generate_config(SourceFormat::Csv, &options(&ws)).unwrap();
    assert!(run.written);
    assert_eq!(run.outcome.summary.added, vec!["csv_people"]);

    let text = ws.read(CONFIG);
    assert!(text.starts_with("# Decap CMS configuration\n"));
    assert!(text.contains("  branch: main # branch to commit content to\n"));

    let config = config_value(&ws);
    let collections = config["collections"].as_sequence().unwrap();
    assert_eq!(collections.len(), 1);

    let people = &collections[0];
    assert_eq!(people["label"], Value::from("CSV Data (people)"));
    assert_eq!(people["folder"], Value::from("content/people"));
    assert_eq!(people["slug"], Value::from("{{slug}}"));
    assert_eq!(people["identifier_field"], Value::from("slug"));
    assert_eq!(people["editor"]["preview"], Value::Bool(false));
    assert_eq!(field_names(people), vec!["slug", "name", "decapta_data"]);
    assert_eq!(people["fields"][0]["label"], Value::from("Decapta ID"));
    assert_eq!(people["fields"][0]["required"], Value::Bool(true));
    assert_eq!(people["fields"][2]["label"], Value::from("data"));

    ws.assert_file_contains("admin/index.html", "decap-cms.js");
}

#[test]
fn test_second_run_is_byte_identical() {
    let ws = TestWorkspace::new();
    ws.write("data/people.csv", fixtures::PEOPLE_CSV);
    ws.write("data/posts.csv", fixtures::POSTS_CSV);

    generate_config(SourceFormat::Csv, &options(&ws)).unwrap();
    let first = ws.read(CONFIG);

    let run = generate_config(SourceFormat::Csv, &options(&ws)).unwrap();
    assert!(run.outcome.is_unchanged());
    assert!(run.outcome.summary.is_noop());
    assert_eq!(run.outcome.summary.unchanged, vec!["csv_people", "csv_posts"]);
    assert_eq!(ws.read(CONFIG), first);
}

#[test]
fn test_hand_edits_survive() {
    let ws = TestWorkspace::new();
    ws.write("data/people.csv", fixtures::PEOPLE_CSV);
    ws.write(CONFIG, fixtures::EDITED_CONFIG);

    let run = generate_config(SourceFormat::Csv, &options(&ws)).unwrap();
    assert_eq!(run.outcome.summary.updated, vec!["csv_people"]);

    let text = ws.read(CONFIG);
    assert!(text.starts_with("# site configuration\nbackend:\n  name: git-gateway # keep\n"));
    assert!(text.contains("  # people are maintained by hand too\n  - name: people\n"));
    assert!(text.contains("    label: Team # renamed by editor\n"));
    assert!(text.contains("    folder: content/people/\n"));

    let config = config_value(&ws);
    let people = &config["collections"][0];
    assert_eq!(people["name"], Value::from("people"));
    assert_eq!(people["create"], Value::Bool(true));
    assert_eq!(people["identifier_field"], Value::from("slug"));
    assert_eq!(field_names(people), vec!["name", "slug", "decapta_data"]);
}

#[test]
fn test_unrelated_collections_are_kept() {
    let ws = TestWorkspace::new();
    ws.write("data/people.csv", fixtures::PEOPLE_CSV);
    ws.write(CONFIG, "collections:\n  - name: pages # static pages\n    label: Pages\n    folder: content/pages\n");

    let run = generate_config(SourceFormat::Csv, &options(&ws)).unwrap();
    assert_eq!(run.outcome.summary.added, vec!["csv_people"]);

    let text = ws.read(CONFIG);
    assert!(text.starts_with("collections:\n  - name: pages # static pages\n    label: Pages\n    folder: content/pages\n  - name: csv_people\n"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let ws = TestWorkspace::new();
    ws.write("data/people.csv", fixtures::PEOPLE_CSV);

    let mut options = options(&ws);
    options.dry_run = true;
    let run = generate_config(SourceFormat::Csv, &options).unwrap();

    assert!(!run.written);
    assert!(run.outcome.previous.is_none());
    assert!(run.outcome.diff().contains("+  - name: csv_people\n"));
    ws.assert_file_not_exists(CONFIG);
    ws.assert_file_not_exists("admin/index.html");
}

#[test]
fn test_custom_template_is_used_for_new_files() {
    let ws = TestWorkspace::new();
    ws.write("data/people.csv", fixtures::PEOPLE_CSV);
    ws.write("template.yml", "backend:\n  name: test-repo\n");

    let mut options = options(&ws);
    options.template_file = Some(NormalizedPath::new(ws.path("template.yml")));
    generate_config(SourceFormat::Csv, &options).unwrap();

    let text = ws.read(CONFIG);
    assert!(text.starts_with("backend:\n  name: test-repo\ncollections:\n  - name: csv_people\n"));
}

#[test]
fn test_bundle_collections_grow_with_new_keys() {
    let ws = TestWorkspace::new();
    ws.write("data/app_en.arb", fixtures::APP_EN_ARB);
    ws.write("data/app_de.arb", fixtures::APP_DE_ARB);

    let run = generate_config(SourceFormat::Arb, &options(&ws)).unwrap();
    assert_eq!(run.outcome.summary.added, vec!["translations_de", "translations_en"]);

    let config = config_value(&ws);
    let english = &config["collections"][1];
    let file = &english["files"][0];
    assert_eq!(file["file"], Value::from("content/en.yaml"));
    assert_eq!(file["label"], Value::from("Translation (EN)"));
    assert_eq!(field_names(file), vec!["@@locale", "greeting", "farewell"]);
    assert_eq!(
        file["fields"][1]["hint"],
        Value::from("Placeholders: user (type: String, example: Bob)")
    );

    ws.write("data/app_en.arb", "{\n  \"greeting\": \"Hello\",\n  \"welcome_back\": \"Welcome back\"\n}\n");
    let run = generate_config(SourceFormat::Arb, &options(&ws)).unwrap();
    assert_eq!(run.outcome.summary.updated, vec!["translations_en"]);

    let config = config_value(&ws);
    let file = &config["collections"][1]["files"][0];
    assert_eq!(field_names(file), vec!["@@locale", "greeting", "farewell", "welcome_back"]);
    assert_eq!(file["fields"][3]["label"], Value::from("welcome back"));
}

#[test]
fn test_malformed_config_is_rejected() {
    let ws = TestWorkspace::new();
    ws.write("data/people.csv", fixtures::PEOPLE_CSV);
    ws.write(CONFIG, "collections: nope\n");

    let err = generate_config(SourceFormat::Csv, &options(&ws)).unwrap_err();
    assert!(matches!(err, Error::MalformedConfig { .. }));
    assert_eq!(ws.read(CONFIG), "collections: nope\n");
}

#[test]
fn test_unparseable_config_names_the_file() {
    let ws = TestWorkspace::new();
    ws.write(CONFIG, "a: 'open\n");
    ws.mkdir("data");

    let err = generate_config(SourceFormat::Csv, &options(&ws)).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.to_string().contains("config.yml"));
}

#[test]
fn test_block_hints_keep_trailing_spaces() {
    let ws = TestWorkspace::new();
    ws.write("data/people.csv", fixtures::PEOPLE_CSV);
    let existing = "collections:\n  - name: people\n    label: People\n    folder: content/people\n    fields:\n      - name: name\n        label: Name\n        widget: string\n        hint: |\n          first line  \n          second\n";
    ws.write(CONFIG, existing);

    let run = generate_config(SourceFormat::Csv, &options(&ws)).unwrap();
    assert_eq!(run.outcome.summary.updated, vec!["csv_people"]);

    let text = ws.read(CONFIG);
    assert!(text.starts_with(existing), "{text}");
    let hint = &config_value(&ws)["collections"][0]["fields"][0]["hint"];
    assert_eq!(hint, &Value::from("first line  \nsecond\n"));
}

#[test]
fn test_explicit_keys_leave_config_untouched() {
    let ws = TestWorkspace::new();
    ws.write("data/people.csv", fixtures::PEOPLE_CSV);
    let existing = "backend:\n  ? name\n  : git-gateway\ncollections: []\n";
    ws.write(CONFIG, existing);

    let err = generate_config(SourceFormat::Csv, &options(&ws)).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.to_string().contains("complex keys"), "{err}");
    assert_eq!(ws.read(CONFIG), existing);
}
