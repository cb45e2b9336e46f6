use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_rubro, add_worker, assign, init, rbh, setup_data_dir};

/// Full walkthrough: assign, overwrite, second rubro, area rollup.
#[test]
fn test_assign_overwrite_and_area_summary() {
    let dir = setup_data_dir("ana_scenario");
    init(&dir);

    add_worker(&dir, "Ana", "ana@x.com", "Design");
    add_rubro(&dir, "Dev");

    assign(&dir, "1", "1", "8");
    rbh()
        .args(["--data-dir", &dir, "--test", "hours", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Total: 8h"));

    // Re-assigning the same (worker, rubro, year) overwrites, not adds.
    assign(&dir, "1", "1", "12");
    rbh()
        .args(["--data-dir", &dir, "--test", "hours", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Total: 12h"))
        .stdout(contains("Total: 20h").not());

    add_rubro(&dir, "QA");
    assign(&dir, "1", "2", "5");
    rbh()
        .args(["--data-dir", &dir, "--test", "hours", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Dev"))
        .stdout(contains("QA"))
        .stdout(contains("Total: 17h"));

    rbh()
        .args(["--data-dir", &dir, "--test", "hours", "area", "Design"])
        .assert()
        .success()
        .stdout(contains("Ana"))
        .stdout(contains("17"))
        .stdout(contains("2"));
}

#[test]
fn test_assign_reports_overwrite() {
    let dir = setup_data_dir("assign_overwrite_msg");
    init(&dir);

    add_worker(&dir, "Ana", "ana@x.com", "Design");
    add_rubro(&dir, "Dev");

    rbh()
        .args([
            "--data-dir", &dir, "--test", "hours", "assign", "1", "1", "8",
            "--year", "2026",
        ])
        .assert()
        .success()
        .stdout(contains("Assigned"));

    rbh()
        .args([
            "--data-dir", &dir, "--test", "hours", "assign", "1", "1", "12",
            "--year", "2026",
        ])
        .assert()
        .success()
        .stdout(contains("8h -> 12h"));
}

#[test]
fn test_years_are_independent() {
    let dir = setup_data_dir("assign_years");
    init(&dir);

    add_worker(&dir, "Ana", "ana@x.com", "Design");
    add_rubro(&dir, "Dev");

    rbh()
        .args([
            "--data-dir", &dir, "--test", "hours", "assign", "1", "1", "8",
            "--year", "2025",
        ])
        .assert()
        .success();
    rbh()
        .args([
            "--data-dir", &dir, "--test", "hours", "assign", "1", "1", "6",
            "--year", "2026",
        ])
        .assert()
        .success();

    rbh()
        .args([
            "--data-dir", &dir, "--test", "hours", "show", "1", "--year", "2025",
        ])
        .assert()
        .success()
        .stdout(contains("Total: 8h"));
    rbh()
        .args([
            "--data-dir", &dir, "--test", "hours", "show", "1", "--year", "2026",
        ])
        .assert()
        .success()
        .stdout(contains("Total: 6h"));
}

#[test]
fn test_negative_hours_rejected() {
    let dir = setup_data_dir("negative_hours");
    init(&dir);

    add_worker(&dir, "Ana", "ana@x.com", "Design");
    add_rubro(&dir, "Dev");

    rbh()
        .args([
            "--data-dir", &dir, "--test", "hours", "assign", "1", "1", "--", "-4",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid hours"));
}

#[test]
fn test_deactivated_rubro_still_listed_in_hours() {
    let dir = setup_data_dir("inactive_rubro_hours");
    init(&dir);

    add_worker(&dir, "Ana", "ana@x.com", "Design");
    add_rubro(&dir, "Dev");
    assign(&dir, "1", "1", "8");

    rbh()
        .args(["--data-dir", &dir, "--test", "rubro", "del", "1"])
        .assert()
        .success();

    // Historical reporting keeps resolving the deactivated rubro.
    rbh()
        .args(["--data-dir", &dir, "--test", "hours", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Dev"))
        .stdout(contains("Total: 8h"));

    // But it is hidden from the active rubro list.
    rbh()
        .args(["--data-dir", &dir, "--test", "rubro", "list"])
        .assert()
        .success()
        .stdout(contains("Dev").not());
    rbh()
        .args(["--data-dir", &dir, "--test", "rubro", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Dev"));
}

#[test]
fn test_overlimit_lists_only_workers_above_threshold() {
    let dir = setup_data_dir("overlimit");
    init(&dir);

    add_worker(&dir, "Ana", "ana@x.com", "Design");
    add_worker(&dir, "Bob", "bob@x.com", "Design");
    add_rubro(&dir, "Dev");
    assign(&dir, "1", "1", "120");
    assign(&dir, "2", "1", "40");

    rbh()
        .args(["--data-dir", &dir, "--test", "hours", "overlimit", "50"])
        .assert()
        .success()
        .stdout(contains("Ana"))
        .stdout(contains("Bob").not());
}

/// The same flow must behave identically on the sqlite backend.
#[test]
fn test_sqlite_backend_upsert_roundtrip() {
    let dir = setup_data_dir("sqlite_backend");

    rbh()
        .args(["--data-dir", &dir, "--backend", "sqlite", "--test", "init"])
        .assert()
        .success();

    rbh()
        .args([
            "--data-dir", &dir, "--backend", "sqlite", "--test", "worker", "add",
            "Ana", "ana@x.com", "--area", "Design",
        ])
        .assert()
        .success();
    rbh()
        .args([
            "--data-dir", &dir, "--backend", "sqlite", "--test", "rubro", "add", "Dev",
        ])
        .assert()
        .success();
    rbh()
        .args([
            "--data-dir", &dir, "--backend", "sqlite", "--test", "hours", "assign",
            "1", "1", "8",
        ])
        .assert()
        .success();
    rbh()
        .args([
            "--data-dir", &dir, "--backend", "sqlite", "--test", "hours", "assign",
            "1", "1", "12",
        ])
        .assert()
        .success();

    rbh()
        .args([
            "--data-dir", &dir, "--backend", "sqlite", "--test", "hours", "show", "1",
        ])
        .assert()
        .success()
        .stdout(contains("Total: 12h"));
}

#[test]
fn test_demo_seed() {
    let dir = setup_data_dir("demo_seed");

    rbh()
        .args(["--data-dir", &dir, "--test", "init", "--demo"])
        .assert()
        .success()
        .stdout(contains("Demo data seeded"));

    rbh()
        .args(["--data-dir", &dir, "--test", "worker", "list"])
        .assert()
        .success()
        .stdout(contains("Juan Pérez"))
        .stdout(contains("María García"));

    rbh()
        .args(["--data-dir", &dir, "--test", "hours", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Total: 30h"));
}
