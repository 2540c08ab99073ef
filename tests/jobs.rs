//! End-to-end job tests
//!
//! These tests use wiremock to stand in for the market site and run the
//! daily jobs against a temporary data directory.

use chrono::NaiveDate;
use maxi_market::config::{
    Config, CredentialsConfig, DataConfig, HttpConfig, SiteConfig, TransfersConfig,
};
use maxi_market::jobs;
use maxi_market::store::{read_rows, write_rows, AthleteRow, DataPaths, SnapshotRow, TransferRow};
use maxi_market::MarketError;
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str, data_dir: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            game_id: "1".to_string(),
        },
        credentials: CredentialsConfig {
            user: "coach".to_string(),
            password: "hunter2".to_string(),
        },
        http: HttpConfig {
            request_timeout_secs: 5,
            retry_attempts: 2,
            retry_delay_ms: 10,
        },
        data: DataConfig {
            data_dir: data_dir.display().to_string(),
            backup_weekday: "thursday".to_string(),
        },
        transfers: TransfersConfig::default(),
    }
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

/// A listing row in the market results table
fn listing_row(athlete_id: u32, name: &str) -> String {
    format!(
        r##"<tr>
            <td><img src="flags/fi.gif" title="Finland"></td>
            <td><a href="/user/atleta_one.php?aid={id}&tipo=aid"><font color="#32A9AF">{name}</font></a></td>
            <td>23</td>
            <td>{id}0</td>
            <td>Sprint</td>
            <td>10</td><td>11</td><td>12</td><td>13</td><td>14</td><td>15</td><td>16</td><td>17</td><td>18</td>
        </tr>"##,
        id = athlete_id,
        name = name
    )
}

fn listing_page(rows: &str, next_page: Option<u32>) -> String {
    let anchor = match next_page {
        Some(page) => format!(r#"<a href="/varie/mercato.php?p={}&bm=">next</a>"#, page),
        None => String::new(),
    };
    format!(
        r#"<html><body>
        <table class="results"><tr><th>Country</th><th>Name</th></tr>{}</table>
        {}
        </body></html>"#,
        rows, anchor
    )
}

fn profile_page(deadline: &str) -> String {
    format!(
        r#"<html><body>
        <h4 class="heading">Athlete <strong class="right">100m</strong></h4>
        <div class="col01"><strong>AC Turku</strong></div>
        <div class="col02"><strong>irrelevant</strong></div>
        <div class="col02"><strong>180 cm - 72 kg</strong></div>
        <div class="box"><strong>Good</strong></div>
        <div class="box box_right"><span>Experience:</span> <strong>Solid</strong></div>
        <div class="row gray"><span>Other:</span> <strong>x</strong></div>
        <div class="row gray"><span>Mood:</span> <strong>Calm</strong></div>
        <div class="row"><span>Deadline:</span> <strong>{}</strong></div>
        </body></html>"#,
        deadline
    )
}

fn weekly_tests_page() -> String {
    r#"<html><body><table>
    <tr><th>Weekly tests</th></tr>
    <tr><th></th><th>41</th><th>42</th></tr>
    <tr><td><img src="i.gif" title="100m"></td>
        <td align="center" class="vtip" title="880 pts">10.60</td>
        <td align="center" class="vtip" title="905 pts">10.53</td></tr>
    <tr><td><img src="i.gif" title="Long Jump"></td>
        <td align="center" class="vtip" title="860 pts">7.80</td>
        <td align="center" class="vtip" title=""></td></tr>
    </table></body></html>"#
        .to_string()
}

fn negotiation_page(date: &str, value: &str) -> String {
    format!(
        r#"<html><body><table class="results">
        <tr><th>Date</th><th>From</th><th>To</th><th>Value</th></tr>
        <tr><td colspan="4">2 negotiations</td></tr>
        <tr><td>{}</td><td>AC Turku</td><td>AC Oslo</td><td>{}</td></tr>
        <tr><td>01-01-2026</td><td>AC Oslo</td><td>AC Turku</td><td>€ 1.000</td></tr>
        </table></body></html>"#,
        date, value
    )
}

async fn mount_login(server: &MockServer, expected_logins: u64) {
    Mock::given(method("POST"))
        .and(path("/accesscontrol.php"))
        .respond_with(ResponseTemplate::new(200))
        .expect(expected_logins)
        .mount(server)
        .await;
}

async fn mount_logout(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/logout.php"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

#[tokio::test]
async fn roster_job_merges_paginated_listing() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();

    mount_login(&server, 1).await;
    mount_logout(&server).await;

    // Page 1 links to page 2; page 2 is the last page
    Mock::given(method("POST"))
        .and(path("/varie/mercato.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&listing_row(4711, "Jan"), Some(2))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/varie/mercato.php"))
        .and(query_param("p", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&listing_row(4712, "Mia"), None)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/atleta_one.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_page("")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/test_settimanali.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(weekly_tests_page()))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    jobs::roster::run_for_date(&config, run_date()).await.unwrap();

    let paths = DataPaths::new(dir.path());
    assert!(paths.roster_snapshot(run_date()).exists());

    // Two athletes, two disciplines each; the blank-trailing discipline
    // reports the previous week
    let rows: Vec<AthleteRow> = read_rows(&paths.athlete_database()).unwrap();
    assert_eq!(rows.len(), 4);

    let jan_long_jump = rows
        .iter()
        .find(|r| r.athlete_id == 4711 && r.discipline == "Long Jump")
        .unwrap();
    assert_eq!(jan_long_jump.week, 41);
    assert_eq!(jan_long_jump.result, "7.80");

    let mia_sprint = rows
        .iter()
        .find(|r| r.athlete_id == 4712 && r.discipline == "100m")
        .unwrap();
    assert_eq!(mia_sprint.week, 42);
    assert_eq!(mia_sprint.country, "Finland");
    assert_eq!(mia_sprint.care, 10);

    // Re-running on the same day is a no-op: the login mock expects
    // exactly one call, verified when the server drops
    jobs::roster::run_for_date(&config, run_date()).await.unwrap();
}

#[tokio::test]
async fn roster_job_stops_on_single_page() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();

    mount_login(&server, 1).await;
    mount_logout(&server).await;

    Mock::given(method("POST"))
        .and(path("/varie/mercato.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&listing_row(4711, "Jan"), None)),
        )
        .mount(&server)
        .await;

    // No next-page anchor on page 1, so page 2 must never be fetched
    Mock::given(method("GET"))
        .and(path("/varie/mercato.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page("", None)))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/atleta_one.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_page("")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/test_settimanali.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(weekly_tests_page()))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    jobs::roster::run_for_date(&config, run_date()).await.unwrap();

    let paths = DataPaths::new(dir.path());
    let rows: Vec<AthleteRow> = read_rows(&paths.athlete_database()).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.athlete_id == 4711));
}

#[tokio::test]
async fn roster_job_aborts_on_missing_results_table() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();

    mount_login(&server, 1).await;
    mount_logout(&server).await;

    Mock::given(method("POST"))
        .and(path("/varie/mercato.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Session expired</body></html>"),
        )
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let result = jobs::roster::run_for_date(&config, run_date()).await;
    assert!(matches!(
        result,
        Err(MarketError::MissingResultsTable { .. })
    ));

    // Nothing was published to the durable stores
    let paths = DataPaths::new(dir.path());
    assert!(!paths.roster_snapshot(run_date()).exists());
    assert!(!paths.athlete_database().exists());
}

#[tokio::test]
async fn roster_job_aborts_on_failed_login() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/accesscontrol.php"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    // No data may be fetched after a failed login
    Mock::given(method("POST"))
        .and(path("/varie/mercato.php"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let result = jobs::roster::run_for_date(&config, run_date()).await;
    assert!(matches!(result, Err(MarketError::LoginFailed { status: 403 })));
}

fn baseline_row(athlete_id: u32, deadline: &str) -> SnapshotRow {
    SnapshotRow {
        favorite_discipline: "100m".to_string(),
        name: format!("Athlete {}", athlete_id),
        athlete_id,
        age: 25,
        country: "Finland".to_string(),
        sex: "Male".to_string(),
        secondary_id: athlete_id * 10,
        specialty: "Sprint".to_string(),
        mood: "Calm".to_string(),
        experience: "Solid".to_string(),
        form: "Good".to_string(),
        height: "180".to_string(),
        weight: "72".to_string(),
        deadline: deadline.to_string(),
        care: 1,
        strength: 2,
        endurance: 3,
        speed: 4,
        agility: 5,
        jumping: 6,
        throwing: 7,
        sp1: 8,
        sp2: 9,
    }
}

#[tokio::test]
async fn transfer_job_records_completed_transfer() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());

    let date = run_date();
    let yesterday = date.pred_opt().unwrap();

    // Yesterday's baseline: athletes 101 and 202 were listed
    let baseline = vec![
        baseline_row(101, "2026-03-04 18:00:00"),
        baseline_row(202, "2026-03-01 12:00:00"),
    ];
    write_rows(&paths.open_transfers(yesterday), &baseline).unwrap();

    mount_login(&server, 1).await;
    mount_logout(&server).await;

    // Today only athlete 101 is still listed
    Mock::given(method("POST"))
        .and(path("/varie/mercato.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&listing_row(101, "Stayer"), None)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/atleta_one.php"))
        .and(query_param("aid", "101"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(profile_page("2026-03-04 18:00:00")),
        )
        .mount(&server)
        .await;

    // Athlete 202 was sold one day before its deadline
    Mock::given(method("GET"))
        .and(path("/user/trasf_one.php"))
        .and(query_param("aid", "202"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(negotiation_page("28-02-2026", "€ 125.000")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    jobs::transfers::run_for_date(&config, date).await.unwrap();

    let transfers: Vec<TransferRow> = read_rows(&paths.transfer_database()).unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].athlete_id, 202);
    assert_eq!(transfers[0].assessed_value, 125_000);

    // Today's listing became the new baseline
    let snapshot: Vec<SnapshotRow> = read_rows(&paths.open_transfers(date)).unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].athlete_id, 101);
    assert_eq!(snapshot[0].deadline, "2026-03-04 18:00:00");
}

#[tokio::test]
async fn transfer_job_assigns_zero_outside_deadline_window() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());

    let date = run_date();
    let yesterday = date.pred_opt().unwrap();

    // Deadline far from the negotiation date below
    write_rows(
        &paths.open_transfers(yesterday),
        &[baseline_row(202, "2026-02-10 12:00:00")],
    )
    .unwrap();

    mount_login(&server, 1).await;
    mount_logout(&server).await;

    Mock::given(method("POST"))
        .and(path("/varie/mercato.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page("", None)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/trasf_one.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(negotiation_page("28-02-2026", "€ 125.000")),
        )
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    jobs::transfers::run_for_date(&config, date).await.unwrap();

    let transfers: Vec<TransferRow> = read_rows(&paths.transfer_database()).unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].assessed_value, 0);
}

#[tokio::test]
async fn transfer_job_requires_yesterdays_baseline() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();

    // No login may happen when the baseline is missing
    Mock::given(method("POST"))
        .and(path("/accesscontrol.php"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let result = jobs::transfers::run_for_date(&config, run_date()).await;
    assert!(matches!(result, Err(MarketError::MissingBaseline(_))));
}
