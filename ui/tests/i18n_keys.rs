//! Translation guards: every locale carries every fallback key exactly once,
//! and every `t!("…")` literal in `src/` resolves in the fallback bundle.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "pulseboard-ui.ftl";
const FALLBACK: &str = "en-US";

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Message ids defined in a Fluent source, with their definition count.
fn message_ids(src: &str) -> HashMap<String, usize> {
    let mut ids = HashMap::new();
    for line in src.lines() {
        // Continuation lines are indented; attributes start with '.'.
        if line.starts_with(char::is_whitespace) {
            continue;
        }
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        if let Some((id, _)) = line.split_once('=') {
            let id = id.trim();
            if !id.is_empty() && id.chars().all(valid_key_char) {
                *ids.entry(id.to_string()).or_insert(0) += 1;
            }
        }
    }
    ids
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

fn locale_dirs(i18n_root: &Path) -> Vec<String> {
    let mut dirs: Vec<String> = fs::read_dir(i18n_root)
        .map(|entries| {
            entries
                .flatten()
                .filter(|entry| entry.path().is_dir())
                .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
                .filter(|name| name.contains('-'))
                .collect()
        })
        .unwrap_or_default();
    dirs.sort();
    dirs
}

fn read_locale(locale: &str) -> String {
    let path = crate_root().join("i18n").join(locale).join(FTL_FILENAME);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("cannot read {path:?}: {err}"))
}

/// Literal first arguments of `t!(` invocations under `root`.
fn referenced_keys(root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for chunk in content.split("t!(\"").skip(1) {
            if let Some((key, _)) = chunk.split_once('"') {
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
            }
        }
    }

    found
}

#[test]
fn fallback_has_keys_and_no_duplicates() {
    let ids = message_ids(&read_locale(FALLBACK));
    assert!(!ids.is_empty(), "fallback {FALLBACK} defines no messages");
    let dups: BTreeSet<_> = ids.iter().filter(|(_, n)| **n > 1).map(|(k, _)| k).collect();
    assert!(dups.is_empty(), "duplicate ids in {FALLBACK}: {dups:?}");
}

#[test]
fn every_locale_covers_the_fallback() {
    let fallback: BTreeSet<String> = message_ids(&read_locale(FALLBACK)).into_keys().collect();
    let locales = locale_dirs(&crate_root().join("i18n"));
    assert!(locales.len() > 1, "expected at least one translation besides {FALLBACK}");

    let mut failures = Vec::new();
    for locale in locales.iter().filter(|l| l.as_str() != FALLBACK) {
        let ids = message_ids(&read_locale(locale));
        let missing: Vec<_> = fallback.iter().filter(|k| !ids.contains_key(*k)).collect();
        let dups: Vec<_> = ids.iter().filter(|(_, n)| **n > 1).map(|(k, _)| k).collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing: {missing:?}"));
        }
        if !dups.is_empty() {
            failures.push(format!("{locale} duplicates: {dups:?}"));
        }
    }

    assert!(
        failures.is_empty(),
        "translation completeness check failed:\n{}",
        failures.join("\n")
    );
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let fallback = message_ids(&read_locale(FALLBACK));
    let referenced = referenced_keys(&crate_root().join("src"));
    assert!(!referenced.is_empty());

    let missing: Vec<_> = referenced
        .iter()
        .filter(|key| !fallback.contains_key(*key))
        .collect();
    assert!(missing.is_empty(), "keys used in src/ but not defined: {missing:?}");

    let unused: Vec<_> = fallback
        .keys()
        .filter(|key| !referenced.contains(*key))
        .collect();
    if !unused.is_empty() {
        eprintln!("[i18n] {} fallback keys unused in src/: {unused:?}", unused.len());
    }
}
