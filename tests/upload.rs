//! End-to-end submissions through the real HTTP client against a mock
//! backend: request shape, status handling and the saved download.

use facebox_cli::api::ApiClient;
use facebox_cli::payload::{DetectForm, ResizeForm};
use facebox_cli::routes::{BatchMode, RouteSet};
use facebox_cli::workflow::{DirDownloader, Outcome, UploadController};
use mockito::Matcher;
use serde_json::json;
use std::io::Write;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(data).unwrap();
    path
}

#[test]
fn detect_zip_downloads_archive() {
    let mut server = mockito::Server::new();
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let zip = write_file(&input, "class.zip", b"zipdata");

    let mock = server
        .mock("POST", "/detectall")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "imagedata": "emlwZGF0YQ==",
            "maxfaces": 5,
            "minwidth": 200,
            "minheight": 400,
            "operation": "pad resize",
            "multiplier": 1,
            "mimetype": "application/zip",
            "filename": "class.zip",
        })))
        .with_status(200)
        .with_header("content-type", "application/zip")
        .with_body(b"PK result")
        .expect(1)
        .create();

    let api = ApiClient::new(server.url()).unwrap();
    let mut ctl = UploadController::new(api, DirDownloader::new(output.path()), RouteSet::plain());
    let outcome = ctl.submit_detect(&DetectForm {
        file: Some(zip),
        ..DetectForm::default()
    });

    mock.assert();
    match outcome {
        Outcome::Downloaded(path) => {
            assert_eq!(path, output.path().join("boxed.zip"));
            assert_eq!(std::fs::read(path).unwrap(), b"PK result");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn resize_single_uses_shrink_route() {
    let mut server = mockito::Server::new();
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let img = write_file(&input, "me.jpg", b"jpeg");

    let mock = server
        .mock("POST", "/do-shrink")
        .match_body(Matcher::Json(json!({
            "imagedata": "anBlZw==",
            "newheight": 237,
            "newwidth": 0,
            "mimetype": "image/jpeg",
            "filename": "me.jpg",
        })))
        .with_status(200)
        .with_body(b"small")
        .create();

    let api = ApiClient::new(server.url()).unwrap();
    let mut ctl = UploadController::new(api, DirDownloader::new(output.path()), RouteSet::prefixed());
    ctl.configure(BatchMode::File);
    let outcome = ctl.submit_resize(&ResizeForm {
        file: Some(img),
        new_width: 0,
        new_height: 237,
    });

    mock.assert();
    assert!(matches!(outcome, Outcome::Downloaded(_)));
}

#[test]
fn no_faces_status_text() {
    let mut server = mockito::Server::new();
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let img = write_file(&input, "empty.png", b"png");

    let _mock = server
        .mock("POST", "/do-detect")
        .with_status(421)
        .create();

    let api = ApiClient::new(server.url()).unwrap();
    let mut ctl = UploadController::new(api, DirDownloader::new(output.path()), RouteSet::prefixed());
    ctl.configure(BatchMode::File);
    let outcome = ctl.submit_detect(&DetectForm {
        file: Some(img),
        ..DetectForm::default()
    });

    assert!(matches!(outcome, Outcome::Failed(_)));
    assert_eq!(ctl.status(), "No faces detected!");
    assert!(!output.path().join("boxed.zip").exists());
}

#[test]
fn server_error_status_text() {
    let mut server = mockito::Server::new();
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let zip = write_file(&input, "bad.zip", b"not a zip");

    let _mock = server
        .mock("POST", "/detectall")
        .with_status(400)
        .with_body("Invalid zip file")
        .create();

    let api = ApiClient::new(server.url()).unwrap();
    let mut ctl = UploadController::new(api, DirDownloader::new(output.path()), RouteSet::plain());
    ctl.submit_detect(&DetectForm {
        file: Some(zip),
        ..DetectForm::default()
    });

    assert_eq!(ctl.status(), "An error occurred");
}

#[test]
fn validation_failure_makes_no_request() {
    let mut server = mockito::Server::new();
    let output = TempDir::new().unwrap();

    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create();

    let api = ApiClient::new(server.url()).unwrap();
    let mut ctl = UploadController::new(api, DirDownloader::new(output.path()), RouteSet::plain());
    let outcome = ctl.submit_resize(&ResizeForm {
        file: Some(output.path().join("whatever.zip")),
        new_width: 0,
        new_height: 0,
    });
    assert!(matches!(outcome, Outcome::Alert(_)));

    let outcome = ctl.submit_detect(&DetectForm::default());
    assert!(matches!(outcome, Outcome::Alert(_)));

    mock.assert();
}
