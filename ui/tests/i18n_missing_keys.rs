use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Translation coverage test.
///
/// - Every `t!("…")` key referenced under `src/` must exist in the
///   fallback (en-US) `gymratio-ui.ftl`.
/// - The fallback file must not define a key twice.
///
/// The parser is deliberately simple: any `key =` line outside comments is
/// a message definition; attributes, terms and continuation lines are
/// skipped.
const FTL_FILENAME: &str = "gymratio-ui.ftl";

fn parse_ftl_keys(content: &str) -> Vec<String> {
    let mut keys = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('.') || line.starts_with('-') {
            continue;
        }
        if let Some(eq_pos) = line.find('=') {
            let id = line[..eq_pos].trim();
            if !id.is_empty() && id.chars().all(valid_key_char) {
                keys.push(id.to_string());
            }
        }
    }
    keys
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Collect the literal first argument of every `t!("…")` under `src_root`.
fn referenced_keys(src_root: &Path) -> HashSet<String> {
    let mut found = HashSet::new();
    let mut stack = vec![src_root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(read_dir) = fs::read_dir(&path) {
                stack.extend(read_dir.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        let needle = "t!(\"";
        let mut rest = content.as_str();
        while let Some(pos) = rest.find(needle) {
            let after = &rest[pos + needle.len()..];
            if let Some(end) = after.find('"') {
                let key = &after[..end];
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
                rest = &after[end..];
            } else {
                break;
            }
        }
    }

    found
}

#[test]
fn fallback_covers_every_referenced_key() {
    let crate_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = fs::read_to_string(crate_root.join("i18n/en-US").join(FTL_FILENAME))
        .expect("fallback FTL file readable");
    let defined: HashSet<String> = parse_ftl_keys(&fallback).into_iter().collect();
    assert!(!defined.is_empty(), "Fallback (en-US) contains no keys.");

    let referenced = referenced_keys(&crate_root.join("src"));
    assert!(
        referenced.contains("panel-title"),
        "key scan found nothing; did the t! macro change shape?"
    );

    let missing: BTreeSet<_> = referenced.difference(&defined).cloned().collect();
    assert!(
        missing.is_empty(),
        "Referenced translation keys missing in fallback:\n  {}",
        missing.into_iter().collect::<Vec<_>>().join("\n  ")
    );
}

#[test]
fn fallback_has_no_duplicate_keys() {
    const EN_US: &str = include_str!("../i18n/en-US/gymratio-ui.ftl");

    let mut seen = HashSet::new();
    let dups: BTreeSet<_> = parse_ftl_keys(EN_US)
        .into_iter()
        .filter(|key| !seen.insert(key.clone()))
        .collect();
    assert!(dups.is_empty(), "Duplicate key definitions in en-US: {dups:?}");
}
