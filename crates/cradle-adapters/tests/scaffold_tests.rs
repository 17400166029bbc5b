//! End-to-end scaffolds with the real renderer and built-in templates.

use std::path::{Path, PathBuf};

use cradle_adapters::{
    EmbeddedTemplateStore, HandlebarsRenderer, LocalFilesystem, MemoryFilesystem,
};
use cradle_core::application::{MANIFEST_FILE, TemplateExpander};
use cradle_core::domain::providers::{MANIFEST_BASE_LIBRARY, MANIFEST_SCRIPTS};
use cradle_core::domain::Metadata;
use cradle_core::prelude::*;
use serde_json::{Map, Value, json};

/// Plays `npm init --yes`: fills in version, author, license and appends a
/// field of its own, without preserving key order.
struct FakeNpm<F: Filesystem> {
    fs: F,
}

impl<F: Filesystem> Enricher for FakeNpm<F> {
    fn enrich(&self, dir: &Path, _options: &EnrichOptions) -> Result<(), EnrichError> {
        let path = dir.join(MANIFEST_FILE);
        let io = |e: CradleError| EnrichError::Spawn {
            command: "fake npm".into(),
            source: std::io::Error::other(e.to_string()),
        };

        let seeded: Map<String, Value> =
            serde_json::from_str(&self.fs.read_to_string(&path).map_err(io)?).unwrap();

        let mut enriched = Map::new();
        enriched.insert("keywords".into(), json!([]));
        for (key, value) in seeded {
            enriched.insert(key, value);
        }
        enriched.insert("version".into(), json!("1.0.0"));
        enriched.insert("author".into(), json!("Ada \"The Countess\" Lovelace"));
        enriched.insert("license".into(), json!("MIT"));

        self.fs
            .write_file(&path, &Value::Object(enriched).to_string())
            .map_err(io)
    }
}

fn memory_service(fs: &MemoryFilesystem) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(EmbeddedTemplateStore::new()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(fs.clone()),
        Box::new(FakeNpm { fs: fs.clone() }),
    )
}

fn ts_github(name: &str) -> PackageSpec {
    PackageSpec::builder(name)
        .library(LibrarySpec::new(Lang::Ts).ci(Some(CiProvider::GitHub)))
        .unattended(true)
        .build()
        .unwrap()
}

fn read_json(fs: &MemoryFilesystem, path: impl AsRef<Path>) -> Map<String, Value> {
    serde_json::from_str(&fs.read_file(path.as_ref()).unwrap()).unwrap()
}

#[test]
fn typescript_github_library_in_memory() {
    let fs = MemoryFilesystem::new();
    let report = memory_service(&fs)
        .scaffold(ts_github("widget"), Path::new("/work"))
        .unwrap();

    let root = PathBuf::from("/work/widget");
    assert_eq!(report.root, root);

    let manifest = read_json(&fs, root.join("package.json"));
    let keys: Vec<&str> = manifest.keys().map(String::as_str).collect();
    assert_eq!(
        &keys[..7],
        ["name", "version", "description", "main", "scripts", "author", "license"]
    );
    assert!(keys.contains(&"keywords"));
    assert!(keys.contains(&"neon"));

    // github mixin overlaid on the base scripts
    let scripts = manifest["scripts"].as_object().unwrap();
    assert!(scripts.contains_key("cargo-build"));
    assert!(scripts.contains_key("release"));
    assert_eq!(scripts["prepack"], "tsc && neon update");

    assert_eq!(report.package.version.as_deref(), Some("1.0.0"));
    assert_eq!(
        report.package.quoted_author.as_deref(),
        Some(r#""Ada \"The Countess\" Lovelace""#)
    );

    for file in [
        "tsconfig.json",
        "ts/index.cts",
        "ts/index.mts",
        "ts/load.cts",
        ".github/actions/setup/action.yml",
        ".github/.env",
        ".github/workflows/build.yml",
        ".github/workflows/comments.yml",
        ".github/workflows/release.yml",
        ".github/workflows/test.yml",
        ".gitignore",
        "Cargo.toml",
        "README.md",
        "src/lib.rs",
    ] {
        assert!(fs.read_file(&root.join(file)).is_some(), "missing {file}");
    }
}

#[test]
fn github_workflows_use_actions_expression_syntax() {
    let fs = MemoryFilesystem::new();
    memory_service(&fs)
        .scaffold(ts_github("widget"), Path::new("/work"))
        .unwrap();

    let build = fs
        .read_file(Path::new("/work/widget/.github/workflows/build.yml"))
        .unwrap();
    assert!(build.contains("runs-on: ${{ matrix.cfg.os }}"));
    assert!(build.contains("actions/checkout@v4"));
    assert!(!build.contains("gh_expr"));

    let env = fs.read_file(Path::new("/work/widget/.github/.env")).unwrap();
    assert!(env.contains("NODE_VERSION=20.x"));
}

#[test]
fn common_files_see_the_enriched_package() {
    let fs = MemoryFilesystem::new();
    memory_service(&fs)
        .scaffold(ts_github("@acme/my.widget"), Path::new("/work"))
        .unwrap();

    let cargo = fs.read_file(Path::new("/work/my.widget/Cargo.toml")).unwrap();
    assert!(cargo.contains(r#"name = "my_widget""#));
    assert!(cargo.contains(r#"version = "1.0.0""#));
    assert!(cargo.contains(r#"authors = ["Ada \"The Countess\" Lovelace"]"#));
    assert!(cargo.contains(r#"license = "MIT""#));

    let gitignore = fs.read_file(Path::new("/work/my.widget/.gitignore")).unwrap();
    assert!(gitignore.contains("cargo.log"));
}

#[test]
fn default_package_renders_without_library() {
    let fs = MemoryFilesystem::new();
    let spec = PackageSpec::builder("tool").build().unwrap();
    let report = memory_service(&fs).scaffold(spec, Path::new("/work")).unwrap();

    assert_eq!(report.written.len(), 5);
    let manifest = read_json(&fs, "/work/tool/package.json");
    assert_eq!(manifest["main"], "index.node");
    assert_eq!(manifest["scripts"]["test"], "cargo test");
    assert!(!manifest["scripts"].as_object().unwrap().contains_key("release"));

    let readme = fs.read_file(Path::new("/work/tool/README.md")).unwrap();
    assert!(readme.starts_with("# tool"));
    assert!(!readme.contains("## Releasing"));
}

#[test]
fn library_fragment_is_valid_json_for_every_cache_and_platform_shape() {
    let store = EmbeddedTemplateStore::new();
    let renderer = HandlebarsRenderer::new();
    let fs = MemoryFilesystem::new();
    let expander = TemplateExpander::new(&store, &renderer, &fs);

    let specs = [
        LibrarySpec::new(Lang::Js).cache(None).ci(None),
        LibrarySpec::new(Lang::Dts).platform("linux".parse().unwrap()),
        LibrarySpec::new(Lang::Ts)
            .cache(Some("npm:@acme/widget-".parse().unwrap()))
            .platform("desktop".parse().unwrap())
            .platform("x86_64-unknown-linux-gnu".parse().unwrap()),
    ];

    for lib in specs {
        let spec = PackageSpec::builder("widget").library(lib).build().unwrap();
        let context = Metadata::new(spec).to_context();
        let helpers = HelperSet::empty();

        for id in [MANIFEST_BASE_LIBRARY, MANIFEST_SCRIPTS] {
            let text = expander.expand(&id.into(), &context, &helpers).unwrap();
            let parsed: Value = serde_json::from_str(&text)
                .unwrap_or_else(|e| panic!("{id} is not JSON ({e}):\n{text}"));
            assert!(parsed.is_object());
        }
    }
}

#[test]
fn library_fragment_round_trips_to_expected_neon_section() {
    let store = EmbeddedTemplateStore::new();
    let renderer = HandlebarsRenderer::new();
    let fs = MemoryFilesystem::new();
    let expander = TemplateExpander::new(&store, &renderer, &fs);

    let spec = PackageSpec::builder("widget")
        .library(
            LibrarySpec::new(Lang::Ts)
                .cache(Some("npm:@acme/widget-".parse().unwrap()))
                .platform("linux".parse().unwrap())
                .platform("macos".parse().unwrap()),
        )
        .build()
        .unwrap();
    let text = expander
        .expand(
            &MANIFEST_BASE_LIBRARY.into(),
            &Metadata::new(spec).to_context(),
            &HelperSet::empty(),
        )
        .unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(
        parsed["neon"],
        json!({
            "type": "library",
            "org": "@acme",
            "prefix": "widget-",
            "platforms": ["linux", "macos"],
            "load": "./ts/load.cts"
        })
    );
}

#[test]
fn typescript_library_on_real_disk() {
    let dir = tempfile::tempdir().unwrap();
    let service = ScaffoldService::new(
        Box::new(EmbeddedTemplateStore::new()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(FakeNpm {
            fs: LocalFilesystem::new(),
        }),
    );

    let report = service.scaffold(ts_github("widget"), dir.path()).unwrap();

    let manifest = std::fs::read_to_string(report.root.join("package.json")).unwrap();
    assert!(manifest.starts_with("{\n  \"name\": \"widget\",\n  \"version\": \"1.0.0\""));
    assert!(manifest.ends_with("}\n"));
    for path in &report.written {
        assert!(path.is_file(), "missing {}", path.display());
    }

    let again = service.scaffold(ts_github("widget"), dir.path()).unwrap_err();
    assert!(again.to_string().contains("already exists"));
}
