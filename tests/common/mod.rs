//! Golden-file helper for integration tests
//!
//! Snapshots live under `tests/snapshots/`. Run with
//! `SYNTREC_UPDATE_SNAPSHOTS=1` to rewrite them from the current output.

use std::fs;
use std::path::PathBuf;

const UPDATE_ENV: &str = "SYNTREC_UPDATE_SNAPSHOTS";

fn snapshot_path(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "snapshots", name]
        .iter()
        .collect()
}

/// Compare `actual` against the stored snapshot, line by line.
pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_path(name);
    if std::env::var_os(UPDATE_ENV).is_some() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("cannot read snapshot {}: {}", path.display(), err));

    let expected_lines: Vec<&str> = expected.lines().map(str::trim_end).collect();
    let actual_lines: Vec<&str> = actual.lines().map(str::trim_end).collect();
    if let Some(line_no) = expected_lines
        .iter()
        .zip(&actual_lines)
        .position(|(want, got)| want != got)
    {
        panic!(
            "snapshot {} differs at line {}.\nexpected: {}\nactual:   {}\nSet {}=1 to regenerate.",
            path.display(),
            line_no + 1,
            expected_lines[line_no],
            actual_lines[line_no],
            UPDATE_ENV
        );
    }
    assert_eq!(
        expected_lines.len(),
        actual_lines.len(),
        "snapshot {} has a different number of lines; set {}=1 to regenerate",
        path.display(),
        UPDATE_ENV
    );
}
