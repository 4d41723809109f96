use diffattr_core::{compare, diffable_record, report_diffable, Value};

#[test]
fn diffattr_core_readme_example() -> Result<(), Box<dyn std::error::Error>> {
    let reference = Value::from_json_str(r#"{"name": "svc", "ports": [80, 443]}"#)?;
    let test = Value::from_yaml_str("name: svc\nports: [80, 8443]\n")?;

    let paths = compare(&reference, &test)
        .map(|difference| difference.map(|difference| difference.path.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(paths, ["", "[ports]", "[ports][1]"]);

    let report = diffattr_core::report(&reference, &test)?.expect("documents differ");
    println!("{report}");
    assert!(report.ends_with("Path: [ports][1], Ref: 443, Test: 8443"));
    Ok(())
}

#[test]
fn diffattr_core_readme_record_example() -> Result<(), Box<dyn std::error::Error>> {
    struct Example {
        attr1: i32,
        attr2: String,
    }

    diffable_record!(Example { attr1, attr2 });

    let reference = Example { attr1: 1, attr2: "value1".into() };
    let test = Example { attr1: 2, attr2: "value1".into() };
    let report = report_diffable(&reference, &test)?.expect("records differ");
    assert_eq!(
        report,
        "Path: , Ref: Example { attr1: 1, attr2: \"value1\" }, \
         Test: Example { attr1: 2, attr2: \"value1\" }\n\
         Path: .attr1, Ref: 1, Test: 2"
    );
    Ok(())
}
