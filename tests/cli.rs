use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use tempfile::TempDir;

fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}/pub?output=tsv", addr)
}

#[test]
fn update_rewrites_constant() {
    let temp_dir = TempDir::new().unwrap();
    let app_js = temp_dir.path().join("app.js");
    fs::write(&app_js, "const csvData = `old`;\nparseFlashcards(csvData);\n").unwrap();
    let url = serve_once("200 OK", "a\tb\nc\td");

    Command::cargo_bin("update-flashcards")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["--url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Downloaded 7 bytes"))
        .stdout(predicate::str::contains("Converted to CSV format (2 lines)"))
        .stdout(predicate::str::contains("Successfully updated app.js"));

    assert_eq!(
        fs::read_to_string(&app_js).unwrap(),
        "const csvData = `a|b\nc|d`;\nparseFlashcards(csvData);\n"
    );
}

#[test]
fn update_without_constant_fails_and_keeps_file() {
    let temp_dir = TempDir::new().unwrap();
    let app_js = temp_dir.path().join("app.js");
    let original = "const cards = [];\n";
    fs::write(&app_js, original).unwrap();
    let url = serve_once("200 OK", "a\tb");

    Command::cargo_bin("update-flashcards")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["--url", &url])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "✗ Error: Could not find csvData constant in app.js",
        ));

    assert_eq!(fs::read_to_string(&app_js).unwrap(), original);
}

#[test]
fn update_reports_http_failure() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("app.js"), "const csvData = `old`;").unwrap();
    let url = serve_once("404 Not Found", "");

    Command::cargo_bin("update-flashcards")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["--url", &url])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error downloading from Google Sheets"));
}

#[test]
fn update_rejects_bad_url_flag() {
    Command::cargo_bin("update-flashcards")
        .unwrap()
        .args(["--url", "ftp://example.com/sheet"])
        .assert()
        .failure();
}

#[test]
fn export_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("app.js"),
        "const csvData = `x|y\nz|w`;\n",
    )
    .unwrap();

    Command::cargo_bin("export-csvdata")
        .unwrap()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Successfully extracted csvData to _csvData.csv"))
        .stdout(predicate::str::contains("✓ Total lines: 2"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("_csvData.csv")).unwrap(),
        "x|y\nz|w"
    );
}

#[test]
fn export_missing_target_fails() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("export-csvdata")
        .unwrap()
        .current_dir(temp_dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ Error: Could not find app.js"));

    assert!(!temp_dir.path().join("_csvData.csv").exists());
}

#[test]
fn export_json_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("app.js"), "const csvData = `q|a`;").unwrap();

    Command::cargo_bin("export-csvdata")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["--output-format", "json", "--output", "backup.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"export_report\""))
        .stdout(predicate::str::contains("\"line_count\":1"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("backup.csv")).unwrap(),
        "q|a"
    );
}

#[test]
fn generate_config_writes_sample() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("export-csvdata")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("--generate-config")
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("flashsync.toml")).unwrap();
    assert!(content.contains("[source]"));
    assert!(content.contains("identifier = \"csvData\""));
}

#[test]
fn config_file_is_picked_up() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("web")).unwrap();
    fs::write(
        temp_dir.path().join("web/app.js"),
        "const deckData = `from|config`;",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("flashsync.toml"),
        "[target]\npath = \"web/app.js\"\nidentifier = \"deckData\"\n\n[export]\noutput_path = \"deck.csv\"\n",
    )
    .unwrap();

    Command::cargo_bin("export-csvdata")
        .unwrap()
        .current_dir(temp_dir.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("deck.csv")).unwrap(),
        "from|config"
    );
}
