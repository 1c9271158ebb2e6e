use crate::helpers::{CommandExt, goreg};

#[test]
fn test_help() {
    let output = goreg().arg("--help").run();
    assert!(output.status.success(), "{output}");
    assert!(output.stdout.contains("generate"));
    assert!(output.stdout.contains("modcache"));
    assert!(output.stdout.contains("--output"));
    assert!(output.stdout.contains("--log-level"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let output = goreg().arg("--no-such-flag").run();
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2), "{output}");
}
