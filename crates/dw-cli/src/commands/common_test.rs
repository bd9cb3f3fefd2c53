use super::*;

#[test]
fn test_parse_version_arg() {
    assert_eq!(parse_version_arg("none").unwrap(), None);
    assert_eq!(parse_version_arg("NONE").unwrap(), None);
    assert_eq!(
        parse_version_arg("20240115093000").unwrap(),
        Version::new(20240115093000)
    );
    assert!(parse_version_arg("0").is_err());
    assert!(parse_version_arg("v3").is_err());
}

#[test]
fn test_exit_code_display_is_silent() {
    assert_eq!(ExitCode(1).to_string(), "");
}
