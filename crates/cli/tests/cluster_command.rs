use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("keyword-cluster").expect("binary");
    cmd.env_remove("KEYWORD_CLUSTER_THRESHOLD")
        .env_remove("KEYWORD_CLUSTER_MAX")
        .env_remove("RUST_LOG");
    cmd
}

fn run_json(args: &[&str]) -> Value {
    let output = cli().args(args).output().expect("command run");
    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn json_output_merges_shared_token_pair() {
    let clusters = run_json(&[
        "cluster",
        "-k",
        "buy shoes, buy boots, car parts",
        "-t",
        "0.2",
        "-m",
        "2",
        "-f",
        "json",
    ]);
    let clusters = clusters.as_array().expect("array");
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0]["name"], "Cluster 1");
    assert_eq!(clusters[0]["primaryKeyword"], "car parts");
    assert_eq!(clusters[1]["primaryKeyword"], "buy shoes");
    assert_eq!(clusters[1]["secondaryKeywords"][0], "buy boots");
    assert_eq!(clusters[1]["allKeywords"].as_array().unwrap().len(), 2);
}

#[test]
fn high_threshold_keeps_singletons() {
    let clusters = run_json(&[
        "cluster",
        "-k",
        "apple pie\ncar engine",
        "-t",
        "0.9",
        "-f",
        "json",
    ]);
    let clusters = clusters.as_array().expect("array");
    assert_eq!(clusters.len(), 2);
    assert!(clusters
        .iter()
        .all(|c| c["secondaryKeywords"].as_array().unwrap().is_empty()));
}

#[test]
fn report_format_includes_merge_trace() {
    let report = run_json(&[
        "cluster",
        "-k",
        "seo tools, seo",
        "-t",
        "0.1",
        "-m",
        "1",
        "-f",
        "report",
    ]);
    assert_eq!(report["clusters"][0]["primaryKeyword"], "seo");
    assert_eq!(report["trace"]["stop"], "target_reached");
    assert_eq!(report["trace"]["steps"].as_array().unwrap().len(), 1);
}

#[test]
fn csv_upload_to_csv_export() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("keywords.csv");
    let output = temp.path().join("clusters.csv");
    fs::write(&input, "Keyword,Volume\n\"seo tools\",100\nseo,900\n").unwrap();

    cli()
        .args(["cluster", "-i"])
        .arg(&input)
        .args(["-t", "0.1", "-m", "1", "-f", "csv", "-o"])
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "Cluster,Intent,Keyword Type,Keyword,Branded\n\
         Cluster 1,N/A,Primary,\"seo\",No\n\
         Cluster 1,N/A,Secondary,\"seo tools\",No\n"
    );
}

#[test]
fn config_file_supplies_options() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("cluster.toml");
    fs::write(&config, "threshold = 0.2\nmax_clusters = 2\n").unwrap();

    cli()
        .args(["cluster", "-k", "buy shoes, buy boots, car parts", "-f", "tree", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("└── buy shoes\n    └── buy boots"));
}

#[test]
fn stdin_input_with_table_output() {
    cli()
        .args(["cluster", "-i", "-", "-t", "0.9"])
        .write_stdin("seo\nbacklinks\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Primary Keyword"))
        .stdout(predicate::str::contains("Cluster 1 | seo"));
}

#[test]
fn missing_keywords_fail_with_hint() {
    cli()
        .args(["cluster", "-k", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter some keywords or upload a file",
        ));
}

#[test]
fn invalid_max_clusters_fails() {
    cli()
        .args(["cluster", "-k", "a, b", "-m", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid max clusters"));
}

#[test]
fn excel_upload_is_rejected() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("keywords.xlsx");
    fs::write(&input, "binary").unwrap();

    cli()
        .args(["cluster", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn classify_prints_intents() {
    cli()
        .args(["classify", "-k", "how to bake, best price, nike"])
        .assert()
        .success()
        .stdout("how to bake\tinformational\nbest price\ttransactional\nnike\tnavigational\n");
}

#[test]
fn seeded_serp_runs_match() {
    let args = [
        "cluster",
        "-k",
        "seo, seo tools, car parts, car engine, pie",
        "--serp",
        "--intent",
        "--seed",
        "5",
        "-t",
        "0.3",
        "-f",
        "json",
    ];
    assert_eq!(run_json(&args), run_json(&args));
}
