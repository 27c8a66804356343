//! Integration test: transfers against a local HTTP server.
//!
//! Covers plain fetch to a file, redirect following (relative and absolute),
//! the redirect bound, HTTP errors, retry of a throttled response, and the
//! response cache (including the redirect outcome of a cached entry).

mod common;

use mycurl_core::config::{MycurlConfig, RetryConfig};
use mycurl_core::output::OutputTarget;
use mycurl_core::transfer::{Transfer, TransferRequest};
use tempfile::tempdir;

fn body() -> Vec<u8> {
    (0u8..100).cycle().take(16 * 1024).collect()
}

fn request(url: String, output: OutputTarget, use_cache: bool) -> Transfer {
    Transfer::new(TransferRequest {
        raw_url: url,
        output,
        use_cache,
    })
    .expect("url parses")
}

fn fast_config() -> MycurlConfig {
    MycurlConfig {
        connect_timeout_secs: 5,
        timeout_secs: 10,
        retry: Some(RetryConfig {
            max_attempts: 3,
            base_delay_secs: 0.01,
            max_delay_secs: 1,
        }),
        ..MycurlConfig::default()
    }
}

#[test]
fn plain_get_writes_file_and_reports_size() {
    let server = common::http_server::start(body());
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.bin");

    let t = request(server.url("/"), OutputTarget::File(out.clone()), false);
    let report = t.run(&fast_config()).expect("transfer");

    assert_eq!(report.bytes, body().len() as u64);
    assert_eq!(report.redirects, 0);
    assert!(!report.from_cache);
    assert_eq!(std::fs::read(&out).unwrap(), body());
    assert!(report.to_string().contains(&format!("{} [bytes]", body().len())));
}

#[test]
fn relative_redirect_is_followed() {
    let server = common::http_server::start(body());
    let report = request(server.url("/dir/hop"), OutputTarget::Discard, false)
        .run(&fast_config())
        .expect("transfer");
    assert_eq!(report.redirects, 1);
    assert_eq!(report.final_url.path, "/dir/file.txt");
    assert_eq!(report.bytes, body().len() as u64);
}

#[test]
fn absolute_redirect_chain_is_followed() {
    let server = common::http_server::start(body());
    let report = request(server.url("/abs"), OutputTarget::Discard, false)
        .run(&fast_config())
        .expect("transfer");
    assert_eq!(report.redirects, 2);
    assert_eq!(report.final_url.host, "127.0.0.1");
    assert_eq!(report.final_url.path, "/dir/file.txt");
}

#[test]
fn redirect_loop_is_bounded() {
    let server = common::http_server::start(body());
    let cfg = MycurlConfig {
        max_redirects: 3,
        ..fast_config()
    };
    let err = request(server.url("/loop"), OutputTarget::Discard, false)
        .run(&cfg)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("too many redirects"), "{:#}", err);
    // initial request + 3 followed hops
    assert_eq!(server.hit_count(), 4);
}

#[test]
fn redirect_without_location_fails() {
    let server = common::http_server::start(body());
    let err = request(server.url("/no-location"), OutputTarget::Discard, false)
        .run(&fast_config())
        .unwrap_err();
    assert!(format!("{:#}", err).contains("without Location"), "{:#}", err);
}

#[test]
fn not_found_fails_without_retry() {
    let server = common::http_server::start(body());
    let err = request(server.url("/missing"), OutputTarget::Discard, false)
        .run(&fast_config())
        .unwrap_err();
    assert!(format!("{:#}", err).contains("HTTP 404"), "{:#}", err);
    assert_eq!(server.hit_count(), 1);
}

#[test]
fn throttled_response_is_retried() {
    let server = common::http_server::start(body());
    let report = request(server.url("/flaky"), OutputTarget::Discard, false)
        .run(&fast_config())
        .expect("transfer after retry");
    assert_eq!(report.bytes, body().len() as u64);
    assert_eq!(server.hit_count(), 2);
}

#[test]
fn cache_serves_second_request() {
    let server = common::http_server::start(body());
    let cache_dir = tempdir().unwrap();
    let cfg = MycurlConfig {
        cache_dir: Some(cache_dir.path().to_path_buf()),
        ..fast_config()
    };

    let first = request(server.url("/"), OutputTarget::Discard, true)
        .run(&cfg)
        .expect("first transfer");
    assert!(!first.from_cache);
    assert_eq!(server.hit_count(), 1);

    let out = cache_dir.path().join("copy.bin");
    let second = request(server.url("/"), OutputTarget::File(out.clone()), true)
        .run(&cfg)
        .expect("second transfer");
    assert!(second.from_cache);
    assert_eq!(second.bytes, first.bytes);
    assert_eq!(server.hit_count(), 1);
    assert_eq!(std::fs::read(&out).unwrap(), body());
}

#[test]
fn cached_redirect_keeps_final_url() {
    let server = common::http_server::start(body());
    let cache_dir = tempdir().unwrap();
    let cfg = MycurlConfig {
        cache_dir: Some(cache_dir.path().to_path_buf()),
        ..fast_config()
    };

    let first = request(server.url("/dir/hop"), OutputTarget::Discard, true)
        .run(&cfg)
        .expect("first transfer");
    assert!(!first.from_cache);
    assert_eq!(first.redirects, 1);
    assert_eq!(first.final_url.path, "/dir/file.txt");
    let hits = server.hit_count();
    assert_eq!(hits, 2);

    let second = request(server.url("/dir/hop"), OutputTarget::Discard, true)
        .run(&cfg)
        .expect("second transfer");
    assert!(second.from_cache);
    assert_eq!(server.hit_count(), hits);
    assert_eq!(second.final_url, first.final_url);
    assert_eq!(second.redirects, 1);
    assert_eq!(second.bytes, first.bytes);
}

#[test]
fn cache_disabled_always_fetches() {
    let server = common::http_server::start(body());
    let cache_dir = tempdir().unwrap();
    let cfg = MycurlConfig {
        cache_dir: Some(cache_dir.path().to_path_buf()),
        ..fast_config()
    };
    for _ in 0..2 {
        request(server.url("/"), OutputTarget::Discard, false)
            .run(&cfg)
            .expect("transfer");
    }
    assert_eq!(server.hit_count(), 2);
    assert_eq!(std::fs::read_dir(cache_dir.path()).unwrap().count(), 0);
}
