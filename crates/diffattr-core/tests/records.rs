use std::collections::BTreeSet;

use diffattr_core::{
    compare, diffable_record, report_diffable, DiffError, Diffable, Opaque, Record, Value,
};

#[derive(Debug)]
struct Example {
    attr1: i32,
    attr2: String,
}

diffable_record!(Example { attr1, attr2 });

#[derive(Debug)]
struct Settings {
    name: String,
    retries: Option<u32>,
    tags: BTreeSet<String>,
    origin: (f64, f64),
}

diffable_record!(Settings { name, retries, tags, origin });

fn example(attr1: i32, attr2: &str) -> Value {
    Example { attr1, attr2: attr2.to_owned() }.to_value()
}

fn paths(reference: &Value, test: &Value) -> Vec<String> {
    compare(reference, test)
        .map(|difference| difference.expect("comparable").path.to_string())
        .collect()
}

#[test]
fn differing_records_report_root_and_field() {
    let reference = example(1, "value1");
    let test = example(2, "value1");
    let differences: Vec<_> =
        compare(&reference, &test).collect::<Result<_, _>>().expect("comparable");

    assert_eq!(differences.len(), 2);
    assert_eq!(differences[0].path, "");
    assert_eq!(differences[0].reference, &reference);
    assert_eq!(differences[0].test, &test);
    assert_eq!(differences[1].path, ".attr1");
    assert_eq!(differences[1].reference, &Value::Int(1));
    assert_eq!(differences[1].test, &Value::Int(2));
}

#[test]
fn equal_records_report_nothing() {
    assert!(paths(&example(1, "value1"), &example(1, "value1")).is_empty());
}

#[test]
fn record_type_names_take_part_in_type_identity() {
    let reference = example(1, "value1");
    let Value::Record(record) = &reference else { unreachable!() };
    let renamed = record
        .fields()
        .fold(Record::new("Other"), |acc, (name, value)| acc.with_field(name, value.clone()));
    let test = Value::from(renamed);

    let differences: Vec<_> =
        compare(&reference, &test).collect::<Result<_, _>>().expect("comparable");
    assert_eq!(differences.len(), 1);
    assert!(differences[0].is_type_mismatch());
}

#[test]
fn nested_host_fields_extend_paths() {
    let reference = Settings {
        name: "primary".into(),
        retries: Some(3),
        tags: ["a", "b"].into_iter().map(String::from).collect(),
        origin: (0.0, 1.5),
    };
    let test = Settings {
        name: "primary".into(),
        retries: None,
        tags: ["a", "c"].into_iter().map(String::from).collect(),
        origin: (0.0, 2.5),
    };

    assert_eq!(
        paths(&reference.to_value(), &test.to_value()),
        ["", ".retries", ".tags", ".tags[1]", ".origin", ".origin[1]"]
    );
}

#[test]
fn missing_test_field_is_reported_as_none() {
    let reference = Value::from(Record::new("Example").with_field("attr1", Value::Int(1)));
    let test = Value::from(Record::new("Example"));
    let differences: Vec<_> =
        compare(&reference, &test).collect::<Result<_, _>>().expect("comparable");

    assert_eq!(differences.len(), 2);
    assert_eq!(differences[1].path, ".attr1");
    assert_eq!(differences[1].test, &Value::None);
}

#[test]
fn tuples_and_sets_compare_by_position() {
    let reference = (1, 2, 3).to_value();
    let test = (1, 2, 4).to_value();
    assert_eq!(paths(&reference, &test), ["", "[2]"]);

    let reference: BTreeSet<i32> = [1, 2, 3].into_iter().collect();
    let test: BTreeSet<i32> = [1, 2, 4].into_iter().collect();
    let reference = reference.to_value();
    let test = test.to_value();
    let differences: Vec<_> =
        compare(&reference, &test).collect::<Result<_, _>>().expect("comparable");
    assert_eq!(differences.len(), 2);
    assert_eq!(differences[1].path, "[2]");
    assert_eq!(differences[1].reference, &Value::Int(3));
    assert_eq!(differences[1].test, &Value::Int(4));
}

#[test]
fn empty_containers_report_nothing() {
    for (reference, test) in [
        (Value::map(Vec::<(String, Value)>::new()), Value::map(Vec::<(String, Value)>::new())),
        (Value::List(Vec::new()), Value::List(Vec::new())),
        (Value::set(Vec::new()), Value::set(Vec::new())),
    ] {
        assert!(paths(&reference, &test).is_empty(), "{reference}");
    }
}

#[test]
fn opaque_values_are_rejected_after_their_record() {
    let reference = Value::from(vec![Value::from(Opaque::new("Socket", "fd=3"))]);
    let test = Value::from(vec![Value::from(Opaque::new("Socket", "fd=4"))]);

    let results: Vec<_> = compare(&reference, &test).collect();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().map(|difference| difference.path.to_string()), Ok(String::new()));
    assert_eq!(results[1].as_ref().map(|difference| difference.path.to_string()), Ok("[0]".into()));
    assert_eq!(
        results[2],
        Err(DiffError::UnsupportedType { type_name: "Socket".into(), path: "[0]".into() })
    );
}

#[test]
fn report_diffable_accepts_mixed_host_types() {
    let report = report_diffable(&Example { attr1: 1, attr2: "x".into() }, &vec![1])
        .expect("comparable")
        .expect("differences");
    assert_eq!(report, "Path: , Ref: Example { attr1: 1, attr2: \"x\" }, Test: [1]");
}
