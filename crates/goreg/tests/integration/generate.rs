use std::fs;

use crate::helpers::{CommandExt, app_module, goreg, write};

#[test]
fn test_default_output_in_current_directory() {
    let module = app_module();
    let out = tempfile::tempdir().unwrap();

    let output = goreg().current_dir(out.path()).arg(module.path()).run();
    assert!(output.status.success(), "{output}");
    assert!(output.stdout.is_empty());

    let code = fs::read_to_string(out.path().join("global_generate.go")).unwrap();
    assert!(code.starts_with("// Code generated by goreg. DO NOT EDIT.\n\npackage main\n"));
    assert!(code.contains("\tappmodels \"example.com/app/models\"\n"));
    assert!(code.contains("\tappother \"example.com/app/other\"\n"));
    assert!(code.contains("\tnew(appmodels.User),\n"));
    assert!(code.contains("\tnew(appother.Address),\n"));
    assert!(!code.contains("Fixture"));
}

#[test]
fn test_root_defaults_to_current_directory() {
    let module = app_module();

    let output = goreg().current_dir(module.path()).arg("generate").run();
    assert!(output.status.success(), "{output}");

    let code = fs::read_to_string(module.path().join("global_generate.go")).unwrap();
    assert!(code.contains("new(appmodels.User),"));
}

#[test]
fn test_rerun_in_module_root_is_stable() {
    let module = app_module();

    goreg().current_dir(module.path()).run();
    let first = fs::read_to_string(module.path().join("global_generate.go")).unwrap();
    goreg().current_dir(module.path()).run();
    let second = fs::read_to_string(module.path().join("global_generate.go")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_output_package_and_var_name() {
    let module = app_module();
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("registry.go");

    let output = goreg()
        .arg("generate")
        .arg(module.path())
        .arg("--output")
        .arg(&target)
        .args(["--package", "registry", "--var-name", "Types"])
        .run();
    assert!(output.status.success(), "{output}");

    let code = fs::read_to_string(&target).unwrap();
    assert!(code.contains("package registry\n"));
    assert!(code.contains("var Types = []interface{}{\n"));
}

#[test]
fn test_print_lists_symbols() {
    let module = app_module();
    write(
        module.path(),
        "other/address.go",
        "package other\n\ntype Address struct{}\n",
    );

    let output = goreg().arg(module.path()).arg("--print").run();
    assert!(output.status.success(), "{output}");
    insta::assert_snapshot!("print_symbols", output.stdout);

    let deduped = goreg().arg(module.path()).args(["--print", "--dedup"]).run();
    assert_eq!(
        deduped.stdout,
        "example.com/app/models User\nexample.com/app/other Address\n"
    );
}

#[test]
fn test_missing_go_mod_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = goreg().current_dir(dir.path()).arg(dir.path()).run();
    assert_eq!(output.status.code(), Some(2), "{output}");
    assert!(output.stderr.contains("goreg failed"));
    assert!(output.stderr.contains("go.mod"));
    assert!(!dir.path().join("global_generate.go").exists());
}

#[test]
fn test_parse_error_fails_without_output() {
    let module = app_module();
    write(
        module.path(),
        "broken/bad.go",
        "package broken\n\ntype Bad struct {\n",
    );

    let output = goreg().current_dir(module.path()).run();
    assert_eq!(output.status.code(), Some(2), "{output}");
    assert!(output.stderr.contains("bad.go"));
    assert!(!module.path().join("global_generate.go").exists());
}

#[test]
fn test_missing_root_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = goreg().arg(dir.path().join("missing")).run();
    assert_eq!(output.status.code(), Some(2), "{output}");
    assert!(output.stderr.contains("Failed to resolve module root"));
}
