// tests/http_transport.rs
//
// HttpTransport against a local mock of the ISODISTORT endpoints.
// The client is blocking, so every call runs on a blocking thread.

use std::fs;
use std::path::Path;
use std::time::Duration;

use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use isoget::config::options::{Endpoints, IsoOptions, Selection};
use isoget::core::{FormData, HttpTransport, Transport};
use isoget::{form, runner, IsoError};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    fs::read_to_string(path).unwrap()
}

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn transport() -> HttpTransport {
    HttpTransport::new(Duration::from_secs(10)).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn upload_is_multipart_with_the_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/iso/isodistortuploadfile.php"))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"toProcess\""))
        .and(body_string_contains("_cell_length_a 4.14800"))
        .and(body_string_contains("name=\"input\""))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixture("upload.html")))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/iso/isodistortuploadfile.php", server.uri());
    let doc = tokio::task::spawn_blocking(move || {
        let fields = form! { "input" => "uploadsubgroupcif" };
        transport().upload(&url, &fields, "toProcess", &fixture_path("hexMnTe.cif"))
    })
    .await
    .unwrap()
    .unwrap();

    assert!(doc.contains("/tmp/isodistort_41532.iso"));
}

#[tokio::test(flavor = "multi_thread")]
async fn form_post_is_urlencoded_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/iso/isodistortform.php"))
        .and(body_string_contains("filename=%2Ftmp%2Fisodistort_41532.iso&input=uploadparentcif"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/iso/isodistortform.php", server.uri());
    let body = tokio::task::spawn_blocking(move || {
        let fields = form! {
            "filename" => "/tmp/isodistort_41532.iso",
            "input" => "uploadparentcif",
        };
        transport().post_form(&url, &fields)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(body, "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn non_success_status_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Internal Server Error</h1>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let base = server.uri();
    let (post, get) = tokio::task::spawn_blocking(move || {
        let t = transport();
        let post = t.post_form(&format!("{base}/iso/isodistortform.php"), &FormData::new());
        let get = t.fetch(&format!("{base}/iso/missing.zip"));
        (post, get)
    })
    .await
    .unwrap();

    match post {
        Err(IsoError::Http { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/iso/isodistortform.php"));
        }
        other => panic!("expected an HTTP error, got {other:?}"),
    }
    assert!(matches!(get, Err(IsoError::Http { status: 404, .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_returns_raw_bytes() {
    let server = MockServer::start().await;
    let zip = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0xff];
    Mock::given(method("GET"))
        .and(path("/iso/isodistortdownload/diffraction_41532.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(zip.clone()))
        .mount(&server)
        .await;

    let url = format!("{}/iso/isodistortdownload/diffraction_41532.zip", server.uri());
    let bytes = tokio::task::spawn_blocking(move || transport().fetch(&url))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bytes, zip);
}

async fn mount_page(server: &MockServer, route: &str, needle: &str, page: &str) {
    Mock::given(method("POST"))
        .and(path(route))
        .and(body_string_contains(needle))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixture(page)))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn full_run_over_http() {
    let server = MockServer::start().await;
    mount_page(&server, "/iso/isodistortuploadfile.php", "name=\"toProcess\"", "upload.html").await;
    mount_page(&server, "/iso/isodistortform.php", "input=uploadparentcif", "method.html").await;
    mount_page(&server, "/iso/isodistortform.php", "input=dosubgroup", "subgroup.html").await;
    mount_page(&server, "/iso/isodistortform.php", "input=distort&", "distort.html").await;
    mount_page(&server, "/iso/isodistortform.php", "origintype=topas", "output_diffraction.html").await;
    Mock::given(method("GET"))
        .and(path("/iso/isodistortdownload/diffraction_41532.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK-diffraction".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/iso/isodistortdownload/frames_41532.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK-frames".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let mut opts = IsoOptions::new(fixture_path("hexMnTe.cif"));
    opts.endpoints = Endpoints::with_base(&format!("{}/iso", server.uri()));
    opts.output = Some(tmp.path().join("run").join("MnTe.html"));
    opts.selection = Selection::Ordinal(3);
    opts.fetch_archives = true;
    opts.timeout_secs = 10;

    let summary = tokio::task::spawn_blocking(move || runner::run_default(&opts, None))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.fields.get("origintype"), Some("topas"));
    assert!(fs::read_to_string(&summary.output).unwrap().contains("Diffraction pattern"));
    assert_eq!(summary.archives.len(), 2);
    assert!(summary.failed_archives.is_empty());
    assert_eq!(fs::read(&summary.archives[0]).unwrap(), b"PK-diffraction");
    assert_eq!(fs::read(&summary.archives[1]).unwrap(), b"PK-frames");
    assert!(!tmp.path().join("run").join("diffraction_41532 (2).zip").exists());
}
