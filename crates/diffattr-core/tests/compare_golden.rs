use std::fs;
use std::path::Path;

use diffattr_core::{compare, Value};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Fixture {
    reference: serde_json::Value,
    test: serde_json::Value,
    differences: Vec<ExpectedDifference>,
}

#[derive(Debug, Deserialize)]
struct ExpectedDifference {
    path: String,
    #[serde(rename = "ref")]
    reference: serde_json::Value,
    test: serde_json::Value,
}

fn load_fixture(path: &Path) -> Fixture {
    let data = fs::read_to_string(path).expect("fixture should be readable");
    serde_json::from_str(&data).expect("fixture should deserialize")
}

fn fixture_paths() -> Vec<std::path::PathBuf> {
    let fixtures_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/compare");
    let mut entries: Vec<_> = fs::read_dir(&fixtures_root)
        .expect("fixtures directory must exist")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();
    entries
}

#[test]
fn compare_golden_parity() {
    let entries = fixture_paths();
    assert!(!entries.is_empty(), "expected at least one fixture under tests/fixtures/compare");

    for path in entries {
        let fixture = load_fixture(&path);
        let reference = Value::from_json_value(fixture.reference).expect("reference converts");
        let test = Value::from_json_value(fixture.test).expect("test converts");

        let actual: Vec<_> = compare(&reference, &test)
            .collect::<Result<_, _>>()
            .unwrap_or_else(|err| panic!("fixture {path:?} failed: {err}"));
        assert_eq!(
            actual.len(),
            fixture.differences.len(),
            "fixture {path:?} produced {:?}",
            actual.iter().map(|difference| difference.path.to_string()).collect::<Vec<_>>(),
        );

        for (difference, expected) in actual.iter().zip(fixture.differences) {
            assert_eq!(difference.path, expected.path.as_str(), "fixture {path:?}");
            let expected_ref = Value::from_json_value(expected.reference).expect("ref converts");
            let expected_test = Value::from_json_value(expected.test).expect("test converts");
            assert_eq!(difference.reference, &expected_ref, "fixture {path:?} at {}", expected.path);
            assert_eq!(difference.test, &expected_test, "fixture {path:?} at {}", expected.path);
        }
    }
}

#[test]
fn golden_json_rendering_matches_fixture_shape() {
    for path in fixture_paths() {
        let fixture = load_fixture(&path);
        let reference = Value::from_json_value(fixture.reference).expect("reference converts");
        let test = Value::from_json_value(fixture.test).expect("test converts");
        let actual: Vec<_> = compare(&reference, &test).collect::<Result<_, _>>().expect("compare");

        let rendered = diffattr_core::render_json(&actual).expect("render json");
        let reparsed: Vec<ExpectedDifference> =
            serde_json::from_str(&rendered).expect("rendered json parses");
        let paths: Vec<_> = reparsed.iter().map(|difference| difference.path.as_str()).collect();
        let expected: Vec<_> = actual.iter().map(|difference| difference.path.to_string()).collect();
        assert_eq!(paths, expected, "fixture {path:?}");
    }
}
