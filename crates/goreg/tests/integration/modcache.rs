use std::path::PathBuf;

use crate::helpers::{CommandExt, goreg};

#[test]
fn test_modcache_escapes_upper_case() {
    let cache = PathBuf::from("cache");
    let output = goreg()
        .env("GOMODCACHE", &cache)
        .args(["modcache", "github.com/BurntSushi/toml", "v1.3.2"])
        .run();

    assert!(output.status.success(), "{output}");
    let expected = cache
        .join("github.com")
        .join("!burnt!sushi")
        .join("toml@v1.3.2");
    assert_eq!(output.stdout.trim_end(), expected.display().to_string());
}

#[test]
fn test_modcache_rejects_bang() {
    let output = goreg()
        .env("GOMODCACHE", "cache")
        .args(["modcache", "github.com/a!b/c", "v1.0.0"])
        .run();

    assert_eq!(output.status.code(), Some(2), "{output}");
    assert!(output.stderr.contains("goreg failed"));
    assert!(output.stdout.is_empty());
}
