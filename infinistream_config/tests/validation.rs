use infinistream_config::{TurbidityIcons, load_file, load_toml};
use rstest::rstest;
use std::fs;
use tempfile::tempdir;

#[test]
fn accepts_full_config() {
    let toml = r#"
[display]
turbidity_levels = [0.0, 20.0, 80.0]
slow_spinner = false
turbidity_icons = "verdict"

[webhook]
port = 9000
bind = "127.0.0.1"

[logging]
level = "debug"
rotation = "daily"
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.display.levels(), [0.0, 20.0, 80.0]);
    assert!(!cfg.display.slow_spinner);
    assert_eq!(cfg.display.turbidity_icons, TurbidityIcons::Verdict);
    assert_eq!(cfg.webhook.port, 9000);
}

#[test]
fn host_is_an_alias_for_bind() {
    let cfg = load_toml("[webhook]\nhost = \"::1\"\n").expect("parse TOML");
    assert_eq!(cfg.webhook.bind, "::1");
    cfg.validate().expect("ipv6 loopback is fine");
}

#[rstest]
#[case("[display]\nturbidity_levels = [0.0, 50.0]\n", "exactly 3 entries")]
#[case("[display]\nturbidity_levels = [0.0, 100.0, 50.0]\n", "ascending")]
#[case("[display]\nturbidity_levels = [-1.0, 50.0, 100.0]\n", ">= 0")]
#[case("[webhook]\nport = 0\n", "webhook.port must be >= 1")]
#[case("[webhook]\nbind = \"localhost\"\n", "must be an ip address")]
#[case("[logging]\nrotation = \"weekly\"\n", "never|daily|hourly")]
fn rejects_invalid_values(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject");
    assert!(
        format!("{err}").to_lowercase().contains(&needle.to_lowercase()),
        "unexpected message: {err}"
    );
}

#[test]
fn unknown_icon_family_is_a_parse_error() {
    let res = load_toml("[display]\nturbidity_icons = \"emoji\"\n");
    assert!(res.is_err());
}

#[test]
fn load_file_reports_parse_errors_with_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[webhook\nport = 1").unwrap();
    let err = load_file(&path).expect_err("broken TOML");
    assert!(format!("{err}").contains("bad.toml"));
}
