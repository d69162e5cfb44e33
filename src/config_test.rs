use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults_when_unset() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.timeouts.request_secs, 30);
    assert_eq!(cfg.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("AUTHGATE_API_URL", "https://example.test/api/"),
        ("AUTHGATE_TIMEOUT_SECS", " 5 "),
        ("AUTHGATE_CONNECT_TIMEOUT_SECS", "2"),
        ("AUTHGATE_SESSION_FILE", "/tmp/session.json"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_url, "https://example.test/api");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 5, connect_secs: 2 });
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/session.json"));
}

#[test]
fn from_lookup_rejects_non_numeric_timeout() {
    let err = ClientConfig::from_lookup(lookup_from(&[("AUTHGATE_TIMEOUT_SECS", "soon")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout { var: "AUTHGATE_TIMEOUT_SECS", .. }));
    assert!(err.to_string().contains("soon"));
}

#[test]
fn from_lookup_rejects_blank_api_url() {
    let err = ClientConfig::from_lookup(lookup_from(&[("AUTHGATE_API_URL", " / ")])).unwrap_err();
    assert!(matches!(err, ConfigError::Empty { .. }));
}

#[test]
fn blank_session_file_falls_back_to_default() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("AUTHGATE_SESSION_FILE", "  ")])).unwrap();
    assert_eq!(cfg.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
}

#[test]
fn with_api_url_trims_trailing_slash() {
    let cfg = ClientConfig::default().with_api_url("http://127.0.0.1:9000/").unwrap();
    assert_eq!(cfg.api_url, "http://127.0.0.1:9000");
}

#[test]
fn no_proxy_flag_disables_system_proxy() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("AUTHGATE_NO_PROXY", "TRUE")])).unwrap();
    assert!(!cfg.system_proxy);
    let cfg = ClientConfig::from_lookup(lookup_from(&[("AUTHGATE_NO_PROXY", "off")])).unwrap();
    assert!(cfg.system_proxy);
    let cfg = ClientConfig::from_lookup(lookup_from(&[("AUTHGATE_NO_PROXY", "maybe")])).unwrap();
    assert!(cfg.system_proxy);
}
