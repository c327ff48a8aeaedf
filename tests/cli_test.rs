#![cfg(feature = "cli")]

use httpmock::prelude::*;
use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_ptax-quote");

fn quote_server() -> MockServer {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"value":[{"cotacaoCompra":4.12,"cotacaoVenda":4.34}]}"#);
    });
    server
}

fn run(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(BIN);
    cmd.args(args)
        .env_remove("BCB_API_BASE_URL")
        .env_remove("BCB_TIMEOUT_SECONDS")
        .env_remove("BCB_MAX_RETRIES")
        .env_remove("BCB_MAX_BACK_DAYS")
        .env("RUST_LOG", "off");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to run ptax-quote binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_price_flag_selects_printed_rate() {
    let server = quote_server();
    let api = server.url("/odata");

    let cases = [
        ("compra", vec!["buy rate", "4.1200"], "4.3400"),
        ("sell", vec!["sell rate", "4.3400"], "4.1200"),
        ("both", vec!["buy=4.1200", "sell=4.3400"], "rate for"),
    ];

    for (price, wanted, unwanted) in cases {
        let output = run(
            &["--api", &api, "--currency", "EUR", "--price", price, "--retries", "1", "--backdays", "0"],
            &[],
        );
        assert!(output.status.success(), "price={} stderr={}", price, String::from_utf8_lossy(&output.stderr));

        let out = stdout(&output);
        assert!(out.starts_with("EUR "), "{}", out);
        for want in wanted {
            assert!(out.contains(want), "price={} expected {:?} in {:?}", price, want, out);
        }
        assert!(!out.contains(unwanted), "price={} did not expect {:?} in {:?}", price, unwanted, out);
    }
}

#[test]
fn test_environment_supplies_base_url() {
    let server = quote_server();
    let api = server.url("/odata");

    let output = run(&["--price", "both"], &[("BCB_API_BASE_URL", &api), ("BCB_MAX_BACK_DAYS", "0")]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("USD for "));
}

#[test]
fn test_flag_wins_over_environment() {
    let server = quote_server();
    let api = server.url("/odata");

    let output = run(
        &["--api", &api, "--backdays", "0"],
        &[("BCB_API_BASE_URL", "http://127.0.0.1:1/unreachable"), ("BCB_TIMEOUT_SECONDS", "not-a-number")],
    );

    assert!(output.status.success(), "stderr={}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("4.3400"));
}

#[test]
fn test_exit_codes_follow_error_severity() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path_contains("CotacaoMoedaAberturaOuIntermediario");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).path_contains("CotacaoDolarPeriodo");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"value":[]}"#);
    });
    let api = server.url("/odata");

    let rejected = run(&["--api", &api, "--currency", "EUR"], &[]);
    assert_eq!(rejected.status.code(), Some(1));
    assert!(stdout(&rejected).is_empty());

    let not_found = run(&["--api", &api, "--currency", "USD", "--backdays", "1"], &[]);
    assert_eq!(not_found.status.code(), Some(2));

    let invalid = run(&["--api", "not a url"], &[]);
    assert_eq!(invalid.status.code(), Some(1));
}
