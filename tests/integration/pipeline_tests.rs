//! Integration tests for the collection pipeline
//!
//! These tests use wiremock to stand in for the search API and run the
//! probe, the fetch loop and whole runs end-to-end.

use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use usnews_ranker::config::Config;
use usnews_ranker::crawler::{
    build_http_client, fetch_pages, probe, scrape, PageRange, Ranker, RunMode, RunOptions,
    RunOutcome,
};
use usnews_ranker::output::{write_output, Dataset};
use usnews_ranker::source::SourceQuery;
use usnews_ranker::store::{DirPageStore, PageStore};
use usnews_ranker::{ConfigError, OutputFormat, RankerError, Record};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/best-colleges/api/search";

fn institution(name: &str, rank: u32) -> Value {
    json!({
        "institution": { "displayName": name, "state": "NY" },
        "parent": { "sortRank": rank },
        "searchData": {
            "tuition": { "displayValue": "$60,000" },
            "acceptanceRate": { "displayValue": "10%" }
        }
    })
}

fn page_body(total_pages: u32, items: Vec<Value>, locked: Option<Vec<Value>>) -> Value {
    let mut data = json!({ "total_pages": total_pages, "items": items });
    if let Some(locked) = locked {
        data["lockedItems"] = Value::Array(locked);
    }
    json!({ "data": data })
}

async fn mount_page(server: &MockServer, page: u32, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("_page", page.to_string()))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, work_dir: &Path, format: OutputFormat) -> Config {
    let mut config = Config::default();
    config.source.api_url = format!("{}{}", server.uri(), API_PATH);
    config.run.pause_secs = 1;
    config.run.start_page = 1;
    config.run.end_page = 10;
    config.run.format = format;
    config.store.temp_dir = work_dir.join("temp").to_string_lossy().into_owned();
    config
}

fn create_test_options(config: Config, work_dir: &Path) -> RunOptions {
    RunOptions {
        config,
        output_name: "ranking".to_string(),
        output_dir: work_dir.to_path_buf(),
    }
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    let headers = reader
        .headers()
        .expect("Failed to read headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("Bad CSV row").iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

#[tokio::test]
async fn test_probe_reads_total_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 200, page_body(39, vec![], None)).await;

    let config = Config::default();
    let client = build_http_client(&config.source).unwrap();
    let query = SourceQuery::from_start_url(&config.source.start_url).unwrap();
    let api_url = format!("{}{}", server.uri(), API_PATH);

    let max_page = probe(&client, &api_url, &query).await.expect("Probe failed");
    assert_eq!(max_page, 39);
}

#[tokio::test]
async fn test_probe_sends_derived_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("_page", "1"))
        .and(query_param("program", "rankings"))
        .and(query_param("specialty", "national"))
        .and(query_param("_sort", "rank"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(4, vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::default();
    let client = build_http_client(&config.source).unwrap();
    let query = SourceQuery::from_start_url(&config.source.start_url).unwrap();
    let api_url = format!("{}{}", server.uri(), API_PATH);

    assert_eq!(probe(&client, &api_url, &query).await.unwrap(), 4);
}

#[tokio::test]
async fn test_fetch_loop_stops_at_failing_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 200, page_body(4, vec![institution("A", 1)], None)).await;
    mount_page(&server, 2, 200, page_body(4, vec![institution("B", 2)], None)).await;
    mount_page(&server, 3, 500, json!({ "error": "boom" })).await;

    // Page 4 must never be requested after page 3 fails
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("_page", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(4, vec![], None)))
        .expect(0)
        .mount(&server)
        .await;

    let work_dir = TempDir::new().unwrap();
    let mut store = DirPageStore::new(work_dir.path().join("temp"));
    let config = Config::default();
    let client = build_http_client(&config.source).unwrap();
    let query = SourceQuery::from_start_url(&config.source.start_url).unwrap();
    let api_url = format!("{}{}", server.uri(), API_PATH);

    let result = fetch_pages(
        &client,
        &api_url,
        &query,
        PageRange { start: 1, end: 4 },
        std::time::Duration::from_secs(1),
        &mut store,
    )
    .await;

    match result {
        Err(RankerError::Status { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.contains("_page=3"), "unexpected url {}", url);
        }
        other => panic!("Expected a status error, got {:?}", other),
    }

    assert_eq!(store.page_numbers().unwrap(), vec![1, 2]);
}

#[tokio::test]
async fn test_fetch_loop_pauses_after_every_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 200, page_body(2, vec![institution("A", 1)], None)).await;
    mount_page(&server, 2, 200, page_body(2, vec![institution("B", 2)], None)).await;

    let work_dir = TempDir::new().unwrap();
    let mut store = DirPageStore::new(work_dir.path().join("temp"));
    let config = Config::default();
    let client = build_http_client(&config.source).unwrap();
    let query = SourceQuery::from_start_url(&config.source.start_url).unwrap();
    let api_url = format!("{}{}", server.uri(), API_PATH);
    let pause = std::time::Duration::from_secs(1);

    let started = std::time::Instant::now();
    let stored = fetch_pages(
        &client,
        &api_url,
        &query,
        PageRange { start: 1, end: 2 },
        pause,
        &mut store,
    )
    .await
    .expect("Fetch loop failed");

    assert_eq!(stored, 2);
    // One pause per page, the last page included
    assert!(
        started.elapsed() >= pause * 2,
        "fetch loop returned after {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_run_leaves_foreign_files_in_temp_dir() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 200, page_body(1, vec![institution("A", 1)], None)).await;

    let work_dir = TempDir::new().unwrap();
    let temp_dir = work_dir.path().join("temp");
    std::fs::create_dir(&temp_dir).unwrap();
    std::fs::write(temp_dir.join("thesis.docx"), "keep me").unwrap();
    std::fs::write(temp_dir.join("0007.json"), "{}").unwrap();

    let config = create_test_config(&server, work_dir.path(), OutputFormat::Csv);
    let output = scrape(create_test_options(config, work_dir.path()))
        .await
        .expect("Run failed");

    assert!(output.is_file());
    assert!(temp_dir.join("thesis.docx").is_file());
    assert!(!temp_dir.join("0007.json").exists());
    assert!(!temp_dir.join("0001.json").exists());
}

#[tokio::test]
async fn test_temp_dir_shared_with_output_dir_is_rejected() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 200, page_body(1, vec![institution("A", 1)], None)).await;

    let work_dir = TempDir::new().unwrap();
    std::fs::write(work_dir.path().join("thesis.docx"), "keep me").unwrap();

    let mut config = create_test_config(&server, work_dir.path(), OutputFormat::Csv);
    config.store.temp_dir = work_dir.path().to_string_lossy().into_owned();

    let result = scrape(create_test_options(config, work_dir.path())).await;

    assert!(matches!(
        result,
        Err(RankerError::Config(ConfigError::Validation(_)))
    ));
    assert!(work_dir.path().join("thesis.docx").is_file());
}

#[tokio::test]
async fn test_full_run_exports_csv_in_merge_order() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        200,
        page_body(
            2,
            vec![institution("p1.item1", 1), institution("p1.item2", 2)],
            Some(vec![json!({ "institution": { "displayName": "p1.locked1" } })]),
        ),
    )
    .await;
    mount_page(
        &server,
        2,
        200,
        page_body(
            2,
            vec![institution("p2.item1", 3), institution("p2.item2", 4)],
            None,
        ),
    )
    .await;

    let work_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, work_dir.path(), OutputFormat::Csv);
    let options = create_test_options(config, work_dir.path());

    let output = scrape(options).await.expect("Run failed");

    assert_eq!(output, work_dir.path().join("ranking.csv"));
    assert!(
        !work_dir.path().join("temp").exists(),
        "Temporary page store should be removed"
    );

    let (headers, rows) = read_csv(&output);
    assert_eq!(headers[0], "Rank");
    assert_eq!(headers[4], "Acc Rate");
    assert_eq!(headers.len(), 11);

    let names: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(
        names,
        vec!["p1.item1", "p1.item2", "p2.item1", "p2.item2", "p1.locked1"]
    );

    assert_eq!(rows[0][0], "1");
    assert_eq!(rows[0][2], "NY");
    assert_eq!(rows[0][3], "60000");
    assert_eq!(rows[0][4], "0.1");
    // Locked item only carries a name
    assert_eq!(rows[4][0], "");
    assert_eq!(rows[4][3], "");
}

#[tokio::test]
async fn test_run_writes_html_and_xlsx() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        200,
        page_body(1, vec![institution("Columbia University", 12)], None),
    )
    .await;

    for format in [OutputFormat::Html, OutputFormat::Xlsx] {
        let work_dir = TempDir::new().unwrap();
        let config = create_test_config(&server, work_dir.path(), format);
        let mut ranker = Ranker::new(create_test_options(config, work_dir.path())).unwrap();

        let report = match ranker.run(RunMode::Embedded).await.expect("Run failed") {
            RunOutcome::Exported(report) => report,
            other => panic!("Expected an export, got {:?}", other),
        };

        assert_eq!(report.range, PageRange { start: 1, end: 1 });
        assert_eq!(report.records, 1);
        let bytes = std::fs::read(&report.output).unwrap();
        match format {
            OutputFormat::Html => {
                let html = String::from_utf8(bytes).unwrap();
                assert!(html.contains("<td>Columbia University</td>"));
                assert!(html.contains("<title>National</title>"));
            }
            _ => assert_eq!(&bytes[..2], b"PK"),
        }
    }
}

#[tokio::test]
async fn test_embedded_probe_failure_is_returned() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 403, json!({})).await;

    let work_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, work_dir.path(), OutputFormat::Csv);

    let result = scrape(create_test_options(config, work_dir.path())).await;

    assert!(matches!(result, Err(RankerError::Status { status: 403, .. })));
    assert!(!work_dir.path().join("ranking.csv").exists());
    assert!(!work_dir.path().join("temp").exists());
}

#[tokio::test]
async fn test_standalone_probe_failure_aborts_quietly() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 503, json!({})).await;

    let work_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, work_dir.path(), OutputFormat::Csv);
    let mut ranker = Ranker::new(create_test_options(config, work_dir.path())).unwrap();

    match ranker.run(RunMode::Standalone).await.expect("Standalone run should not fail") {
        RunOutcome::Aborted(failure) => {
            assert_eq!(failure.status, Some(503));
            assert!(failure.url.contains("_page=1"));
        }
        other => panic!("Expected an aborted run, got {:?}", other),
    }
    assert!(!work_dir.path().join("ranking.csv").exists());
}

#[tokio::test]
async fn test_standalone_interrupted_run_exports_stored_pages() {
    let server = MockServer::start().await;
    // The probe and page 1 share this mock
    mount_page(
        &server,
        1,
        200,
        page_body(3, vec![institution("First", 1)], None),
    )
    .await;
    mount_page(&server, 2, 502, json!({})).await;

    let work_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, work_dir.path(), OutputFormat::Csv);
    let mut ranker = Ranker::new(create_test_options(config, work_dir.path())).unwrap();

    let report = match ranker.run(RunMode::Standalone).await.expect("Run failed") {
        RunOutcome::Exported(report) => report,
        other => panic!("Expected an export, got {:?}", other),
    };

    assert_eq!(report.range, PageRange { start: 1, end: 3 });
    assert_eq!(report.pages_stored, 1);
    assert_eq!(report.records, 1);
    assert_eq!(report.interrupted.as_ref().and_then(|f| f.status), Some(502));

    let (_, rows) = read_csv(&report.output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "First");
}

#[tokio::test]
async fn test_embedded_interrupted_run_returns_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        200,
        page_body(2, vec![institution("First", 1)], None),
    )
    .await;
    mount_page(&server, 2, 500, json!({})).await;

    let work_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, work_dir.path(), OutputFormat::Csv);

    let result = scrape(create_test_options(config, work_dir.path())).await;

    assert!(matches!(result, Err(RankerError::Status { status: 500, .. })));
    assert!(!work_dir.path().join("ranking.csv").exists());
    assert!(!work_dir.path().join("temp").exists());
}

#[test]
fn test_csv_round_trip() {
    let mut dataset = Dataset::new("Ranking");
    dataset.push(Record {
        rank: Some(1),
        name: Some("Princeton University".to_string()),
        state: Some("NJ".to_string()),
        tuition: Some(59710.0),
        acceptance_rate: Some(0.04),
        sat_range: Some("1500-1580".to_string()),
        act_range: Some("34-35".to_string()),
        engineering_score: Some(4.6),
        business_score: None,
        cs_score: Some(4.5),
        nursing_score: None,
    });
    dataset.push(Record {
        rank: Some(2),
        name: Some("Massachusetts Institute of Technology".to_string()),
        state: Some("MA".to_string()),
        tuition: Some(1234.5),
        ..Record::default()
    });

    let work_dir = TempDir::new().unwrap();
    let path = write_output(&dataset, OutputFormat::Csv, work_dir.path(), "round").unwrap();
    let (headers, rows) = read_csv(&path);

    assert_eq!(headers, dataset.headers().to_vec());
    assert_eq!(rows.len(), 2);
    for (row, record) in rows.iter().zip(dataset.records()) {
        let expected: Vec<String> = record.cells().iter().map(|c| c.render("")).collect();
        assert_eq!(row, &expected);
    }
    assert_eq!(rows[0][3].parse::<f64>().unwrap(), 59710.0);
    assert_eq!(rows[1][3].parse::<f64>().unwrap(), 1234.5);
}
