use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect::<HashMap<_, _>>();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_apply_when_optional_vars_absent() {
    let cfg = ServerConfig::from_lookup(lookup(&[("API_UPSTREAM_URL", "https://repair.example.test/api/")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.upstream_url, "https://repair.example.test/api");
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS));
}

#[test]
fn overrides_are_parsed() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("API_UPSTREAM_URL", " http://10.0.0.5:8000 "),
        ("PORT", "8080"),
        ("API_PROXY_TIMEOUT_SECS", "5"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.upstream_url, "http://10.0.0.5:8000");
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(5));
}

#[test]
fn upstream_is_required() {
    assert_eq!(ServerConfig::from_lookup(lookup(&[])), Err(ConfigError::Missing("API_UPSTREAM_URL")));
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("API_UPSTREAM_URL", " / ")])),
        Err(ConfigError::Missing("API_UPSTREAM_URL"))
    );
}

#[test]
fn malformed_numbers_are_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("API_UPSTREAM_URL", "http://u"), ("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "eighty".into() });

    let err = ServerConfig::from_lookup(lookup(&[("API_UPSTREAM_URL", "http://u"), ("API_PROXY_TIMEOUT_SECS", "0")]))
        .unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "API_PROXY_TIMEOUT_SECS", value: "0".into() });
}

#[test]
fn blank_optional_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("API_UPSTREAM_URL", "http://u"), ("PORT", "  ")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
}
