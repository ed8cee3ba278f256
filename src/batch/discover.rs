use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Extension allow-list for folder-mode discovery.
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "m4a", "flac", "ogg", "aac"];

/// Enumerates audio files in `root` whose names match `pattern` with its
/// wildcard substituted by each allow-listed extension in turn. The union is
/// de-duplicated and returned in name order. An empty result is a valid
/// outcome, not an error; a missing root is.
pub fn discover_audio_files(root: &Path, pattern: &str) -> AppResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(AppError::NotFound {
            path: root.to_path_buf(),
        });
    }

    let expanded: Vec<String> = AUDIO_EXTENSIONS
        .iter()
        .map(|ext| expand_pattern(pattern, ext))
        .collect();

    let mut matches = BTreeSet::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if expanded.iter().any(|candidate| glob_match(candidate, &name)) {
            matches.insert(entry.path());
        }
    }

    Ok(matches.into_iter().collect())
}

/// `*` in the user pattern stands for "any name with an allowed extension",
/// so `*` becomes `*.mp3`, `call*` becomes `call*.mp3`, and so on.
fn expand_pattern(pattern: &str, extension: &str) -> String {
    if pattern.contains('*') {
        pattern.replace('*', &format!("*.{extension}"))
    } else {
        format!("{pattern}.{extension}")
    }
}

/// Minimal glob matcher: `*` matches any run of characters, everything else
/// is literal. Two-pointer walk with star backtracking.
fn glob_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut star_n = 0usize;

    while n < name.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            star_n = n;
            p += 1;
        } else if p < pattern.len() && pattern[p] == name[n] {
            p += 1;
            n += 1;
        } else if let Some(star_p) = star {
            p = star_p + 1;
            star_n += 1;
            n = star_n;
        } else {
            return false;
        }
    }

    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::{discover_audio_files, expand_pattern, glob_match};
    use crate::error::AppError;
    use std::path::Path;

    fn touch(path: &Path) {
        std::fs::write(path, b"").expect("touch");
    }

    #[test]
    fn allow_list_excludes_non_audio_files() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        touch(&tmp.path().join("a.mp3"));
        touch(&tmp.path().join("b.wav"));
        touch(&tmp.path().join("notes.txt"));

        let found = discover_audio_files(tmp.path(), "*").expect("discover");
        let names: Vec<_> = found
            .iter()
            .map(|path| path.file_name().expect("name").to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mp3", "b.wav"]);
    }

    #[test]
    fn missing_root_is_a_not_found_error() {
        let error =
            discover_audio_files(Path::new("/no/such/folder"), "*").expect_err("must fail");
        assert!(matches!(error, AppError::NotFound { .. }));
    }

    #[test]
    fn empty_match_set_is_ok_not_an_error() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        touch(&tmp.path().join("notes.txt"));

        let found = discover_audio_files(tmp.path(), "*").expect("discover");
        assert!(found.is_empty());
    }

    #[test]
    fn narrower_patterns_filter_by_name() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        touch(&tmp.path().join("call-one.mp3"));
        touch(&tmp.path().join("call-two.wav"));
        touch(&tmp.path().join("memo.mp3"));

        let found = discover_audio_files(tmp.path(), "call*").expect("discover");
        let names: Vec<_> = found
            .iter()
            .map(|path| path.file_name().expect("name").to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["call-one.mp3", "call-two.wav"]);
    }

    #[test]
    fn subdirectories_are_not_descended_into() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        std::fs::create_dir(tmp.path().join("nested")).expect("mkdir");
        touch(&tmp.path().join("nested/inner.mp3"));
        touch(&tmp.path().join("outer.mp3"));

        let found = discover_audio_files(tmp.path(), "*").expect("discover");
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("outer.mp3"));
    }

    #[test]
    fn pattern_expansion_substitutes_the_wildcard() {
        assert_eq!(expand_pattern("*", "mp3"), "*.mp3");
        assert_eq!(expand_pattern("call*", "wav"), "call*.wav");
        assert_eq!(expand_pattern("exact", "ogg"), "exact.ogg");
    }

    #[test]
    fn glob_matcher_handles_stars_and_literals() {
        assert!(glob_match("*.mp3", "a.mp3"));
        assert!(glob_match("call*.wav", "call-two.wav"));
        assert!(glob_match("*", "anything"));
        assert!(!glob_match("*.mp3", "a.mp3.bak"));
        assert!(!glob_match("call*.wav", "memo.wav"));
        assert!(glob_match("a*b*c", "a-x-b-y-c"));
        assert!(!glob_match("a*b*c", "a-x-b-y"));
    }
}
