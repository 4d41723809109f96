//! Fuzzing harnesses for `diffattr-core`.
//!
//! Each public function accepts raw bytes so it can be called from a
//! `cargo fuzz` target or from a plain unit test. Loader failures are
//! swallowed; broken traversal invariants panic so the fuzzer records them.
//!
//! # Examples
//!
//! Feed a document through both loaders:
//!
//! ```
//! diffattr_fuzz::fuzz_load(b"{\"a\":[1, 2.5, null]}");
//! ```
//!
//! Compare two values built from deterministic input:
//!
//! ```
//! diffattr_fuzz::fuzz_compare(&[1, 2, 3, 4]);
//! ```
//!
//! Render a report from arbitrary bytes:
//!
//! ```
//! diffattr_fuzz::fuzz_report(b"example");
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashSet;

use arbitrary::Unstructured;
use diffattr_core::{compare, render_json, report, Opaque, Record, Value};

const MAX_DEPTH: usize = 4;
const MAX_SEQUENCE_LEN: u8 = 6;
const MAX_MAP_LEN: u8 = 6;
const MAX_FIELDS: u8 = 4;
const MAX_STRING_LEN: u8 = 12;
const RECORD_NAMES: [&str; 3] = ["Example", "Point", "Settings"];

/// Feeds arbitrary bytes through the JSON and YAML loaders.
///
/// Documents that load must compare equal to themselves.
///
/// ```
/// diffattr_fuzz::fuzz_load(b"key: [1, 2]");
/// ```
pub fn fuzz_load(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for value in [Value::from_json_str(text), Value::from_yaml_str(text)].into_iter().flatten() {
        if !contains_nan(&value) {
            assert_reflexive(&value);
        }
    }
}

/// Compares two randomly generated values and checks traversal invariants.
///
/// ```
/// diffattr_fuzz::fuzz_compare(b"seed");
/// ```
pub fn fuzz_compare(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some(reference) = random_value(&mut unstructured) else {
        return;
    };
    let Some(test) = random_value(&mut unstructured) else {
        return;
    };

    assert_reflexive(&reference);

    let mut seen = HashSet::new();
    let mut records = 0usize;
    for item in compare(&reference, &test) {
        let Ok(difference) = item else {
            break;
        };
        records += 1;
        assert!(seen.insert(difference.path.clone()), "duplicate path {}", difference.path);
        assert!(
            difference.is_type_mismatch() || difference.reference != difference.test,
            "equal pair reported at {}",
            difference.path
        );
    }
    if reference.kind() != test.kind() {
        assert_eq!(records, 1, "type mismatch must short-circuit");
    }
}

/// Renders text and JSON reports for randomly generated values.
///
/// ```
/// diffattr_fuzz::fuzz_report(b"report fuzz");
/// ```
pub fn fuzz_report(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let (Some(reference), Some(test)) =
        (random_value(&mut unstructured), random_value(&mut unstructured))
    else {
        return;
    };

    let Ok(differences) = compare(&reference, &test).collect::<Result<Vec<_>, _>>() else {
        return;
    };
    if let Ok(Some(rendered)) = report(&reference, &test) {
        assert!(!rendered.ends_with('\n'));
        assert!(rendered.lines().all(|line| line.starts_with("Path: ")));
    }
    let json = render_json(&differences);
    assert!(json.is_ok(), "records failed to serialize: {json:?}");
    if differences.is_empty() {
        assert_eq!(json.ok().as_deref(), Some("[]"));
    }
}

fn assert_reflexive(value: &Value) {
    let mut differences = compare(value, value);
    if let Some(Ok(difference)) = differences.next() {
        panic!("value differs from itself at {}", difference.path);
    }
}

fn contains_nan(value: &Value) -> bool {
    match value {
        Value::Float(number) => number.get().is_nan(),
        Value::List(items) | Value::Tuple(items) => items.iter().any(contains_nan),
        Value::Set(items) => items.iter().any(contains_nan),
        Value::Map(map) => map.values().any(contains_nan),
        Value::Record(record) => record.fields().any(|(_, value)| contains_nan(value)),
        _ => false,
    }
}

fn random_value(unstructured: &mut Unstructured<'_>) -> Option<Value> {
    value_from_unstructured(unstructured, 0).ok()
}

fn value_from_unstructured(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<Value, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return random_leaf(unstructured);
    }

    match unstructured.int_in_range::<u8>(0..=9)? {
        0..=4 => random_leaf(unstructured),
        5 => Ok(Value::List(random_items(unstructured, depth)?)),
        6 => Ok(Value::tuple(random_items(unstructured, depth)?)),
        7 => Ok(Value::set(random_items(unstructured, depth)?)),
        8 => {
            let len = unstructured.int_in_range::<u8>(0..=MAX_MAP_LEN)?;
            let mut entries = Vec::with_capacity(usize::from(len));
            for _ in 0..len {
                let key = random_string(unstructured)?;
                entries.push((key, value_from_unstructured(unstructured, depth + 1)?));
            }
            Ok(Value::map(entries))
        }
        _ => {
            let name = *unstructured.choose(&RECORD_NAMES)?;
            let len = unstructured.int_in_range::<u8>(0..=MAX_FIELDS)?;
            let mut record = Record::new(name);
            for idx in 0..len {
                let value = value_from_unstructured(unstructured, depth + 1)?;
                record.insert(format!("attr{idx}"), value);
            }
            Ok(Value::from(record))
        }
    }
}

fn random_items(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<Vec<Value>, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_SEQUENCE_LEN)?);
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(value_from_unstructured(unstructured, depth + 1)?);
    }
    Ok(items)
}

fn random_leaf(unstructured: &mut Unstructured<'_>) -> Result<Value, arbitrary::Error> {
    match unstructured.int_in_range::<u8>(0..=9)? {
        0 => Ok(Value::None),
        1 | 2 => Ok(Value::Bool(unstructured.arbitrary()?)),
        3 | 4 => Ok(Value::Int(unstructured.arbitrary()?)),
        5 | 6 => {
            let numerator = f64::from(unstructured.arbitrary::<i32>()?);
            let denominator = f64::from(unstructured.int_in_range::<u16>(1..=1024)?);
            Ok(Value::from(numerator / denominator))
        }
        7 | 8 => Ok(Value::Str(random_string(unstructured)?)),
        _ => Ok(Value::from(Opaque::new("Handle", random_string(unstructured)?))),
    }
}

fn random_string(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(0x20..=0x7e)?;
        string.push(char::from(byte));
    }
    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_handles_utf8_and_garbage() {
        fuzz_load(br"{}");
        fuzz_load(b"- 1\n- [2, 3]\n");
        fuzz_load(&[0xff, 0xfe]);
    }

    #[test]
    fn compare_harness_runs() {
        fuzz_compare(b"compare");
        fuzz_compare(&[9, 3, 5, 1, 7, 2, 8, 0, 4, 6, 1, 1, 2, 3, 5, 8, 13, 21]);
    }

    #[test]
    fn report_harness_runs() {
        fuzz_report(b"report");
    }

    #[test]
    fn report_harness_covers_many_seeds() {
        for seed in 0u8..64 {
            let bytes: Vec<u8> =
                (0..96u8).map(|idx| idx.wrapping_mul(31).wrapping_add(seed)).collect();
            fuzz_report(&bytes);
        }
    }

    #[test]
    fn generated_values_are_reflexive() {
        for seed in 0u8..64 {
            let bytes: Vec<u8> =
                (0..128u8).map(|idx| idx.wrapping_mul(seed).wrapping_add(seed)).collect();
            if let Some(value) = random_value(&mut Unstructured::new(&bytes)) {
                assert_reflexive(&value);
            }
        }
    }
}
