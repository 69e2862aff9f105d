use scaffed::{
    api::{generate_components_in, ScaffedError},
    config::{Config, ConfigError},
    generate::{generate, GenerateError, GenerationSummary},
    materialize::MaterializeError,
    notify::Notification,
    tree::TemplateNode,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;
use walkdir::WalkDir;

const FAILS_FOR_BAD: &str = "{% if componentName == \"Bad\" %}{{ missing }}{% endif %}ok";

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn hello_config() -> Config {
    Config::new(
        "out",
        vec![TemplateNode::file(
            "[componentName].txt",
            "hello {{ componentName }}",
        )],
    )
}

/// Relative paths of everything under `root`, sorted; directories end in `/`.
fn snapshot(root: &Path) -> Vec<String> {
    let mut entries: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let relative = entry.path().strip_prefix(root).unwrap();
            let relative = relative.to_string_lossy().replace('\\', "/");
            if entry.file_type().is_dir() {
                format!("{relative}/")
            } else {
                relative
            }
        })
        .collect();
    entries.sort();
    entries
}

#[test]
fn generates_single_component() {
    let temp = TempDir::new().unwrap();
    let mut notifications: Vec<Notification> = Vec::new();

    let summary = generate(&hello_config(), temp.path(), &names(&["Foo"]), &mut notifications).unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/Foo/Foo.txt")).unwrap(),
        "hello Foo"
    );
    assert_eq!(
        summary,
        GenerationSummary {
            generated: names(&["Foo"]),
            skipped: vec![],
        }
    );
    assert_eq!(
        notifications,
        vec![Notification::FileAdded {
            path: PathBuf::from("out/Foo/Foo.txt")
        }]
    );
}

#[test]
fn repeated_name_is_skipped() {
    let temp = TempDir::new().unwrap();
    let mut notifications: Vec<Notification> = Vec::new();

    let summary = generate(
        &hello_config(),
        temp.path(),
        &names(&["Foo", "Foo"]),
        &mut notifications,
    )
    .unwrap();

    assert_eq!(summary.generated, names(&["Foo"]));
    assert_eq!(summary.skipped, names(&["Foo"]));
    assert_eq!(
        notifications,
        vec![
            Notification::FileAdded {
                path: PathBuf::from("out/Foo/Foo.txt")
            },
            Notification::ComponentSkipped {
                component: "Foo".to_string(),
                output_dir: temp.path().join("out/Foo"),
            },
        ]
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("out/Foo/Foo.txt")).unwrap(),
        "hello Foo"
    );
}

#[test]
fn second_run_only_reports_skips() {
    let temp = TempDir::new().unwrap();
    let config = Config::new(
        "src/components",
        vec![
            TemplateNode::file("[componentName].tsx", "{{ componentName }}"),
            TemplateNode::directory(
                "styles",
                vec![TemplateNode::file("[componentName].css", "")],
            ),
        ],
    );
    let batch = names(&["Button", "Modal"]);

    generate(&config, temp.path(), &batch, &mut Vec::<Notification>::new()).unwrap();
    let before = snapshot(temp.path());

    let mut notifications: Vec<Notification> = Vec::new();
    let summary = generate(&config, temp.path(), &batch, &mut notifications).unwrap();

    assert_eq!(snapshot(temp.path()), before);
    assert!(summary.generated.is_empty());
    assert_eq!(summary.skipped, batch);
    assert_eq!(notifications.len(), 2);
    assert!(notifications
        .iter()
        .all(|n| matches!(n, Notification::ComponentSkipped { .. })));
}

#[test]
fn existing_component_is_not_touched_and_siblings_are_generated() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().join("out/Foo");
    fs::create_dir_all(&existing).unwrap();
    fs::write(existing.join("notes.md"), "keep me").unwrap();
    let mut notifications: Vec<Notification> = Vec::new();

    let summary = generate(
        &hello_config(),
        temp.path(),
        &names(&["Foo", "Bar"]),
        &mut notifications,
    )
    .unwrap();

    assert_eq!(snapshot(&existing), vec!["notes.md"]);
    assert_eq!(
        fs::read_to_string(existing.join("notes.md")).unwrap(),
        "keep me"
    );
    assert!(temp.path().join("out/Bar/Bar.txt").is_file());
    assert_eq!(summary.skipped, names(&["Foo"]));
    assert_eq!(summary.generated, names(&["Bar"]));
    assert_eq!(
        notifications
            .iter()
            .filter(|n| matches!(n, Notification::ComponentSkipped { .. }))
            .count(),
        1
    );
}

#[test]
fn failure_rolls_back_the_whole_batch() {
    let temp = TempDir::new().unwrap();
    let config = Config::new(
        "out",
        vec![TemplateNode::file("[componentName].txt", FAILS_FOR_BAD)],
    );
    let mut notifications: Vec<Notification> = Vec::new();

    let error = generate(
        &config,
        temp.path(),
        &names(&["Good", "Bad"]),
        &mut notifications,
    )
    .unwrap_err();

    assert!(!temp.path().join("out/Good").exists());
    assert!(!temp.path().join("out/Bad").exists());
    assert!(temp.path().join("out").is_dir());

    let GenerateError::Materialization {
        component,
        source,
        rolled_back,
        rollback_failures,
    } = error
    else {
        panic!("Expected GenerateError::Materialization");
    };
    assert_eq!(component, "Bad");
    assert!(matches!(source, MaterializeError::Template(_)));
    assert_eq!(rolled_back.len(), 2);
    assert!(rollback_failures.is_empty());
    assert_eq!(
        notifications.last(),
        Some(&Notification::BatchFailed {
            component: "Bad".to_string()
        })
    );
}

#[test]
fn failure_stops_the_remaining_batch() {
    let temp = TempDir::new().unwrap();
    let config = Config::new(
        "out",
        vec![TemplateNode::file("[componentName].txt", FAILS_FOR_BAD)],
    );

    let result = generate(
        &config,
        temp.path(),
        &names(&["Bad", "After"]),
        &mut Vec::<Notification>::new(),
    );

    assert!(result.is_err());
    assert!(!temp.path().join("out/After").exists());
}

#[test]
fn rollback_keeps_pre_existing_directories() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("out/Existing")).unwrap();
    fs::write(temp.path().join("out/unrelated.txt"), "").unwrap();
    let config = Config::new(
        "out",
        vec![TemplateNode::file("[componentName].txt", FAILS_FOR_BAD)],
    );

    let result = generate(
        &config,
        temp.path(),
        &names(&["Existing", "Good", "Bad"]),
        &mut Vec::<Notification>::new(),
    );

    assert!(result.is_err());
    assert_eq!(snapshot(&temp.path().join("out")), vec!["Existing/", "unrelated.txt"]);
}

#[test]
fn nested_failure_removes_partial_subdirectories() {
    let temp = TempDir::new().unwrap();
    let config = Config::new(
        "out",
        vec![TemplateNode::directory(
            "a",
            vec![
                TemplateNode::file("first.txt", "fine"),
                TemplateNode::directory("b", vec![TemplateNode::file("second.txt", "{{ nope }}")]),
            ],
        )],
    );

    let result = generate(
        &config,
        temp.path(),
        &names(&["Foo"]),
        &mut Vec::<Notification>::new(),
    );

    assert!(result.is_err());
    assert!(snapshot(&temp.path().join("out")).is_empty());
}

#[test]
fn names_escaping_components_dir_are_rejected_before_writing() {
    let temp = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    let absolute = outside.path().join("Evil").to_string_lossy().into_owned();

    for name in [absolute.as_str(), "../Evil", "..", "nested/Evil", ""] {
        let mut notifications: Vec<Notification> = Vec::new();

        let error = generate(
            &hello_config(),
            temp.path(),
            &names(&["Good", name]),
            &mut notifications,
        )
        .unwrap_err();

        assert!(
            matches!(&error, GenerateError::InvalidComponentName { name: rejected } if rejected == name),
            "unexpected error for {name:?}: {error}"
        );
        assert!(notifications.is_empty());
    }

    assert!(snapshot(temp.path()).is_empty());
    assert!(!outside.path().join("Evil").exists());
}

#[test]
fn creates_missing_components_dir_with_ancestors() {
    let temp = TempDir::new().unwrap();
    let config = Config::new(
        "src/ui/components",
        vec![TemplateNode::file("index.ts", "export * from './{{ componentName }}'")],
    );

    generate(&config, temp.path(), &names(&["Card"]), &mut Vec::<Notification>::new()).unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("src/ui/components/Card/index.ts")).unwrap(),
        "export * from './Card'"
    );
}

#[test]
fn produced_tree_matches_template_tree() {
    let temp = TempDir::new().unwrap();
    let config = Config::new(
        "out",
        vec![
            TemplateNode::directory(
                "hooks",
                vec![TemplateNode::file("use[componentName].ts", "")],
            ),
            TemplateNode::file("[componentName].tsx", ""),
            TemplateNode::directory(
                "__tests__",
                vec![TemplateNode::directory(
                    "__snapshots__",
                    vec![TemplateNode::file("[componentName].snap", "")],
                )],
            ),
            TemplateNode::directory("empty", vec![]),
        ],
    );

    generate(&config, temp.path(), &names(&["Nav"]), &mut Vec::<Notification>::new()).unwrap();

    assert_eq!(
        snapshot(&temp.path().join("out/Nav")),
        vec![
            "Nav.tsx",
            "__tests__/",
            "__tests__/__snapshots__/",
            "__tests__/__snapshots__/Nav.snap",
            "empty/",
            "hooks/",
            "hooks/useNav.ts",
        ]
    );
}

#[test]
fn api_loads_config_from_root() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".scaffed")).unwrap();
    fs::write(
        temp.path().join(".scaffed/config.toml"),
        r#"
components_dir = "out"

[[files]]
file_name = "[componentName].txt"
template = "hello {{ componentName }}"
"#,
    )
    .unwrap();

    let summary = generate_components_in(
        temp.path(),
        &names(&["Foo"]),
        None,
        &mut Vec::<Notification>::new(),
    )
    .unwrap();

    assert_eq!(summary.generated, names(&["Foo"]));
    assert_eq!(
        fs::read_to_string(temp.path().join("out/Foo/Foo.txt")).unwrap(),
        "hello Foo"
    );
}

#[test]
fn api_config_failure_creates_nothing() {
    let temp = TempDir::new().unwrap();

    let error = generate_components_in(
        temp.path(),
        &names(&["Foo"]),
        None,
        &mut Vec::<Notification>::new(),
    )
    .unwrap_err();

    assert!(matches!(
        error,
        ScaffedError::Config(ConfigError::NotFound { .. })
    ));
    assert!(snapshot(temp.path()).is_empty());
}
