//! Plain-JSON contract consumed by the presentation layer.

use motorscout_core::HistoryCheck;

fn checks_from(json: serde_json::Value) -> Vec<HistoryCheck> {
    serde_json::from_value(json).expect("checks should deserialize")
}

#[test]
fn contradiction_serializes_for_presentation() {
    let checks = checks_from(serde_json::json!([
        { "description": "Category D write-off", "status": "alert" },
        { "description": "Never been written off", "status": "pass" }
    ]));

    let issues = motorscout_history::validate(&checks);
    let value = serde_json::to_value(&issues).unwrap();

    assert_eq!(value.as_array().map(Vec::len), Some(1));
    assert_eq!(value[0]["type"], "WRITE_OFF_CONTRADICTION");
    assert_eq!(value[0]["severity"], "high");
    assert_eq!(value[0]["details"][0]["status"], "alert");
    assert_eq!(value[0]["details"][1]["description"], "Never been written off");
    assert!(value[0]["recommendation"].as_str().is_some());
}

#[test]
fn clean_history_serializes_to_empty_array() {
    let checks = checks_from(serde_json::json!([
        { "description": "Not recorded as stolen", "status": "pass" },
        { "description": "Never been written off", "status": "pass" },
        { "description": "No outstanding finance", "status": "pass" }
    ]));
    let issues = motorscout_history::validate(&checks);
    assert_eq!(serde_json::to_string(&issues).unwrap(), "[]");
}

#[test]
fn full_report_flags_each_contradiction_once() {
    let checks = checks_from(serde_json::json!([
        { "description": "MOT expired", "status": "fail" },
        { "description": "Cat S write-off recorded", "status": "alert" },
        { "description": "Never been written off", "status": "pass" },
        { "description": "Not written off", "status": "pass" },
        { "description": "MOT passed 2025", "status": "pass" },
        { "description": "Reported stolen 2019", "status": "alert" },
        { "description": "Not recorded as stolen", "status": "pass" }
    ]));
    let issues = motorscout_history::validate(&checks);
    let kinds: Vec<String> = issues.iter().map(|i| i.issue_type.to_string()).collect();
    assert_eq!(
        kinds,
        vec![
            "WRITE_OFF_CONTRADICTION",
            "STOLEN_CONTRADICTION",
            "MOT_INCONSISTENCY"
        ]
    );
    assert_eq!(issues[0].details.len(), 3);
}
