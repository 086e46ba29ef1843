//! End-to-end runs over a synthetic review corpus.

use review_insight::analyze_review_file;
use review_insight::config::{CacheSettings, Config, ReportSettings};
use std::io::Write;
use std::path::PathBuf;

const CSV_CONTENT: &str = "\
reviewer,title,body,timestamp
alice,Love it,so easy to set up and easy to empty,2024-05-01
bob,Nice,\"very simple controls, simple to store\",2024-05-01
carol,Good buy,intuitive and easy to use,2024-05-02
dan,Hmm,too difficult to clean the filter,2024-05-02
erin,Not great,\"difficult instructions, poor manual\",2024-05-03
";

struct TestRun {
    _workspace: tempfile::TempDir,
    config: Config,
    input: PathBuf,
}

fn setup(csv: &str) -> TestRun {
    let workspace = tempfile::tempdir().unwrap();

    let input = workspace.path().join("reviews.csv");
    let mut file = std::fs::File::create(&input).unwrap();
    file.write_all(csv.as_bytes()).unwrap();

    let mut config = Config::default();
    config.cache = CacheSettings {
        enabled: true,
        dir: workspace.path().join("cache").to_string_lossy().into_owned(),
        ttl_secs: 3600,
    };
    config.report = ReportSettings {
        output_dir: workspace.path().join("reports").to_string_lossy().into_owned(),
    };

    TestRun {
        _workspace: workspace,
        config,
        input,
    }
}

#[test]
fn test_full_run_produces_artifacts() {
    let run = setup(CSV_CONTENT);
    let paths = analyze_review_file(&run.input, Some("run_one"), &run.config, 2).unwrap();

    assert!(paths.text.exists());
    assert!(paths.spreadsheet.exists());
    assert!(paths.json.exists());

    let text = std::fs::read_to_string(&paths.text).unwrap();
    assert!(text.contains("=== Product Review Analysis Report ==="));
    assert!(text.contains("Total reviews analyzed: 5"));
}

#[test]
fn test_ease_of_use_reaches_sixty_percent() {
    let run = setup(CSV_CONTENT);
    let paths = analyze_review_file(&run.input, Some("run_scenario"), &run.config, 2).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.json).unwrap()).unwrap();

    let experience = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["dimension"] == "Experience")
        .expect("experience dimension present");

    let record = &experience["categories"]["usability_ease_of_use"];
    assert_eq!(record["mention_count"], 3);
    assert_eq!(record["percentage"], 60.0);
    let examples = record["examples"].as_array().unwrap();
    assert!(!examples.is_empty() && examples.len() <= 3);
}

#[test]
fn test_rerun_within_ttl_serves_identical_results() {
    let run = setup(CSV_CONTENT);

    let first = analyze_review_file(&run.input, Some("first"), &run.config, 2).unwrap();
    let second = analyze_review_file(&run.input, Some("second"), &run.config, 2).unwrap();

    let json1: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&first.json).unwrap()).unwrap();
    let json2: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&second.json).unwrap()).unwrap();

    // Cached per-dimension results are byte-identical, run metadata
    // included; only report naming differs.
    assert_eq!(json1["results"], json2["results"]);
}

#[test]
fn test_missing_timestamp_column_fails_fast() {
    let run = setup("reviewer,title,body\nalice,Hi,easy to use\n");
    let err = analyze_review_file(&run.input, None, &run.config, 2).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("timestamp"), "unexpected error: {message}");
}

#[test]
fn test_empty_corpus_fails_fast() {
    let run = setup("reviewer,title,body,timestamp\n");
    assert!(analyze_review_file(&run.input, None, &run.config, 2).is_err());
}

#[test]
fn test_dataset_without_timestamps_still_reports() {
    // Timestamp column present but empty: loading succeeds, trend
    // analysis short-circuits, everything else still runs.
    let csv = "\
reviewer,title,body,timestamp
alice,Love it,so easy to set up and easy to empty,
bob,Nice,\"very simple controls, simple to store\",
carol,Good buy,intuitive and easy to use,
";
    let run = setup(csv);
    let paths = analyze_review_file(&run.input, Some("no_ts"), &run.config, 2).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.json).unwrap()).unwrap();
    let experience = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["dimension"] == "Experience")
        .unwrap();

    let record = &experience["categories"]["usability_ease_of_use"];
    assert!(record["sentiment"].is_object());
    assert!(record.get("trend").is_none() || record["trend"].is_null());
}
