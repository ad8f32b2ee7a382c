//! Integration tests for the c-amalgamate binary

#![allow(deprecated)] // cargo_bin is the standard way to test CLI binaries

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// Help / usage
// =============================================================================

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--header-output"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_arguments_is_usage_error() {
    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_missing_source_output() {
    let dir = tempfile::tempdir().unwrap();
    let a_h = write(dir.path(), "a.h", "int a;");
    let a_c = write(dir.path(), "a.c", "int a = 1;");
    let out_h = dir.path().join("out/lib.h");

    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.args(["--headers", &a_h, "--sources", &a_c, "--header-output"])
        .arg(&out_h);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("--source-output"))
        .stderr(predicate::str::contains("Usage:"));

    assert!(!out_h.exists());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_flag_value() {
    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.args(["--headers", "\"int a;\"", "--header-output"]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("requires a value"));
}

#[test]
fn test_unreadable_input() {
    let dir = tempfile::tempdir().unwrap();
    let out_h = dir.path().join("lib.h");

    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.args(["--headers", "/nonexistent/dir/missing.h", "--header-output"])
        .arg(&out_h);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("missing.h"));
    assert!(!out_h.exists());
}

// =============================================================================
// Merging
// =============================================================================

#[test]
fn test_merges_headers_and_sources() {
    let dir = tempfile::tempdir().unwrap();
    let b_h = write(dir.path(), "b.h", "int b(void);\n");
    let a_h = write(dir.path(), "a.h", "#include \"b.h\"\n#include <stddef.h>\nint a;\n");
    let a_c = write(dir.path(), "a.c", "#include \"a.h\"\n#include \"b.h\"\nint a = 1;\n");
    let out_h = dir.path().join("dist/include/lib.h");
    let out_c = dir.path().join("dist/src/lib.c");

    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.args(["--headers", &b_h, &a_h, "--sources", &a_c])
        .args(["--header-output", path_str(&out_h)])
        .args(["--source-output", path_str(&out_c)]);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let header = fs::read_to_string(&out_h).unwrap();
    assert!(header.starts_with("// [begin] b.h\n"));
    assert!(header.contains("// [elided] #include \"b.h\"\n"));
    assert!(header.contains("\n#include <stddef.h>\n"));
    assert!(header.contains("\nint a;\n"));
    assert!(header.ends_with("// [end] a.h"));
    assert!(header.find("int b(void);").unwrap() < header.find("int a;").unwrap());

    let source = fs::read_to_string(&out_c).unwrap();
    assert!(source.contains("// [elided] #include \"a.h\"\n"));
    assert!(source.contains("// [elided] #include \"b.h\"\n"));
    assert!(source.contains("\nint a = 1;\n"));
}

#[test]
fn test_short_aliases_and_additionally() {
    let dir = tempfile::tempdir().unwrap();
    let a_h = write(
        dir.path(),
        "a.h",
        "#include \"export.h\"\n#include \"config.h\"\nEXPORT int a;",
    );
    let out_h = dir.path().join("lib.h");

    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.args(["-h", &a_h, "-A", "export.h", "-hO", path_str(&out_h)]);
    cmd.assert().success();

    let header = fs::read_to_string(&out_h).unwrap();
    assert!(header.contains("// [elided] #include \"export.h\""));
    assert!(header.contains("\n#include \"config.h\"\n"));
}

#[test]
fn test_inline_literal_exempt() {
    let dir = tempfile::tempdir().unwrap();
    let x_h = write(dir.path(), "x.h", "int x;");
    let out_h = dir.path().join("lib.h");

    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.args(["--headers", &x_h, "\"#include \"x.h\"\""])
        .args(["--header-output", path_str(&out_h)]);
    cmd.assert().success();

    let header = fs::read_to_string(&out_h).unwrap();
    assert!(header.contains("// [begin] <inline>\n#include \"x.h\"\n// [end] <inline>"));
    assert!(!header.contains("[elided]"));
}

#[test]
fn test_header_only_folds_sources() {
    let dir = tempfile::tempdir().unwrap();
    let h1 = write(dir.path(), "h1.h", "int h1;");
    let s1 = write(dir.path(), "s1.c", "#include \"h1.h\"\nint s1;");
    let out_h = dir.path().join("lib.h");
    let out_c = dir.path().join("lib.c");

    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.args(["-H", "-h", &h1, "-s", &s1])
        .args(["-hO", path_str(&out_h), "-sO", path_str(&out_c)]);
    cmd.assert().success();

    let header = fs::read_to_string(&out_h).unwrap();
    assert_eq!(
        header,
        "// [begin] h1.h\nint h1;\n// [end] h1.h\n\n\
         // [begin] s1.c\n// [elided] #include \"h1.h\"\nint s1;\n// [end] s1.c"
    );
    assert!(!out_c.exists());
}

#[test]
fn test_whitespace_only_fragments_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let blank = write(dir.path(), "blank.h", "\n   \n");
    let a_h = write(dir.path(), "a.h", "int a;");
    let out_h = dir.path().join("lib.h");

    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.args(["--headers", &blank, "\"  \"", &a_h])
        .args(["--header-output", path_str(&out_h)]);
    cmd.assert().success();

    let header = fs::read_to_string(&out_h).unwrap();
    assert_eq!(header, "// [begin] a.h\nint a;\n// [end] a.h");
}

#[test]
fn test_deterministic_output() {
    let dir = tempfile::tempdir().unwrap();
    let a_h = write(dir.path(), "a.h", "#include \"b.h\"\nint a;");
    let b_h = write(dir.path(), "b.h", "#include \"a.h\"\nint b;");
    let first = dir.path().join("first.h");
    let second = dir.path().join("second.h");

    for out in [&first, &second] {
        let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
        cmd.args(["--headers", &a_h, &b_h, "--header-output", path_str(out)]);
        cmd.assert().success();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let out_h = dir.path().join("lib.h");

    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.args(["-v", "--headers", "\"int a;\"", "--header-output", path_str(&out_h)]);

    cmd.assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote artifact"));
}

#[test]
fn test_output_flag_followed_by_flag() {
    let dir = tempfile::tempdir().unwrap();
    let out_c = dir.path().join("lib.c");

    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.current_dir(dir.path())
        .args(["\"int a;\"", "--header-output", "--sources", "\"int b;\""])
        .args(["-sO", path_str(&out_c)]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("'--header-output' requires a value"))
        .stderr(predicate::str::contains("Usage:"));

    assert!(!dir.path().join("--sources").exists());
    assert!(!out_c.exists());
}

#[test]
fn test_non_utf8_input_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let a_h = dir.path().join("a.h");
    fs::write(&a_h, b"/* \xA9 2020 */\nint a;\n").unwrap();
    let out_h = dir.path().join("lib.h");

    let mut cmd = Command::cargo_bin("c-amalgamate").unwrap();
    cmd.args(["--headers", path_str(&a_h), "--header-output", path_str(&out_h)]);
    cmd.assert().success();

    let expected: &[u8] = b"// [begin] a.h\n/* \xA9 2020 */\nint a;\n// [end] a.h";
    assert_eq!(fs::read(&out_h).unwrap(), expected);
}
