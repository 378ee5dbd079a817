//! Editor workflow scenarios across all crates
//!
//! Each test runs the same sequence a site maintainer would: split the
//! sources, generate the CMS configuration, let an editor change content or
//! configuration, then rebuild the sources.

use decapta_content::{Node, YamlDocument};
use decapta_core::{
    ConfigOptions, PostProcessOptions, PreProcessOptions, generate_config, post_process, pre_process,
};
use decapta_fs::{NormalizedPath, SourceFormat};
use decapta_test_utils::{TestWorkspace, fixtures};
use pretty_assertions::assert_eq;

struct Site {
    ws: TestWorkspace,
}

impl Site {
    fn new() -> Self {
        Self {
            ws: TestWorkspace::new(),
        }
    }

    fn path(&self, relative: &str) -> NormalizedPath {
        NormalizedPath::new(self.ws.path(relative))
    }

    fn pre_process(&self, format: SourceFormat, slug: &[&str]) {
        let mut options = PreProcessOptions::new(self.path("data"));
        options.content_dir = self.path("content");
        options.slug_fields = slug.iter().map(|s| s.to_string()).collect();
        let report = pre_process(format, &options).unwrap();
        assert!(report.is_success(), "pre-process failed: {:?}", report.errors);
    }

    fn config(&self, format: SourceFormat) -> decapta_core::ConfigRun {
        let mut options = ConfigOptions::new(self.path("data"));
        options.output_file = self.path("admin/config.yml");
        generate_config(format, &options).unwrap()
    }

    fn post_process(&self, format: SourceFormat) {
        let mut options = PostProcessOptions::new(self.path("out"));
        options.content_dir = self.path("content");
        let report = post_process(format, &options).unwrap();
        assert!(report.is_success(), "post-process failed: {:?}", report.errors);
    }

    /// Edit a content document the way the CMS does: change one value and
    /// leave everything else in place.
    fn edit(&self, relative: &str, key: &str, value: &str) {
        let mut doc: YamlDocument = self.ws.read(relative).parse().unwrap();
        let node = doc.root.get_mut(key).unwrap();
        *node = Node::string(value);
        self.ws.write(relative, &doc.to_yaml_string());
    }
}

#[test]
fn test_table_survives_an_editing_round() {
    let site = Site::new();
    site.ws.write("data/people.csv", fixtures::PEOPLE_CSV);

    site.pre_process(SourceFormat::Csv, &["name"]);
    let run = site.config(SourceFormat::Csv);
    assert_eq!(run.outcome.summary.added, vec!["csv_people"]);

    site.edit("content/people/1.yaml", "decapta_data", "changed, with comma");
    site.post_process(SourceFormat::Csv);

    assert_eq!(site.ws.read("out/people.csv"), "name,data\nAlice,\"changed, with comma\"\nBob,y\n");
}

#[test]
fn test_unedited_sources_are_reproduced() {
    let site = Site::new();
    site.ws.write("data/posts.csv", fixtures::POSTS_CSV);
    site.ws.write("data/app_en.arb", fixtures::APP_EN_ARB);

    site.pre_process(SourceFormat::Csv, &[]);
    site.pre_process(SourceFormat::Arb, &[]);
    site.post_process(SourceFormat::Csv);
    site.post_process(SourceFormat::Arb);

    assert_eq!(site.ws.read("out/posts.csv"), fixtures::POSTS_CSV);
    assert_eq!(site.ws.read("out/app_en.arb"), fixtures::APP_EN_ARB);
}

#[test]
fn test_config_keeps_maintainer_edits_across_source_changes() {
    let site = Site::new();
    site.ws.write("data/people.csv", fixtures::PEOPLE_CSV);
    site.config(SourceFormat::Csv);

    // The maintainer renames the collection and documents it.
    let config = site.ws.read("admin/config.yml");
    let edited = config.replace(
        "  - name: csv_people\n    label: CSV Data (people)\n",
        "  # team directory\n  - name: csv_people\n    label: Team # shown in the sidebar\n",
    );
    assert_ne!(config, edited);
    site.ws.write("admin/config.yml", &edited);

    // The table gains a column.
    site.ws.write("data/people.csv", "name,data,email\nAlice,x,a@example.com\n");
    let run = site.config(SourceFormat::Csv);
    assert_eq!(run.outcome.summary.updated, vec!["csv_people"]);

    let text = site.ws.read("admin/config.yml");
    assert!(text.contains("  # team directory\n  - name: csv_people\n    label: Team # shown in the sidebar\n"));

    let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    let names: Vec<&str> = value["collections"][0]["fields"]
        .as_sequence()
        .unwrap()
        .iter()
        .filter_map(|field| field["name"].as_str())
        .collect();
    assert_eq!(names, vec!["slug", "name", "decapta_data", "email"]);

    let again = site.config(SourceFormat::Csv);
    assert!(again.outcome.is_unchanged());
}

#[test]
fn test_translations_and_tables_share_one_config() {
    let site = Site::new();
    site.ws.write("data/people.csv", fixtures::PEOPLE_CSV);
    site.ws.write("data/app_en.arb", fixtures::APP_EN_ARB);

    site.config(SourceFormat::Csv);
    site.config(SourceFormat::Arb);

    let value: serde_yaml::Value = serde_yaml::from_str(&site.ws.read("admin/config.yml")).unwrap();
    let names: Vec<&str> = value["collections"]
        .as_sequence()
        .unwrap()
        .iter()
        .filter_map(|collection| collection["name"].as_str())
        .collect();
    assert_eq!(names, vec!["csv_people", "translations_en"]);
}
