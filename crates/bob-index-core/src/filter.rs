//! Classification of directories that belong to a release but are not one.
//!
//! Subtitle, sample, proof and cover folders, disc splits, and underscore
//! prefixed (hidden/incomplete) directories are "noise": they are never
//! indexed and the scanner does not descend into them.

use regex::Regex;
use std::sync::LazyLock;

/// Literal fragments that mark a path as noise.
const NOISE_FRAGMENTS: &[&str] = &[
    "/subs/",
    "/sub/",
    "/sample/",
    "/proof/",
    "/cover/",
    " complete ",
    " incomplete ",
    "imdb",
    "/_",
];

/// Disc split segments: `/cd1`, `/disc-02`, `/dvd_1`, or a bare `/cd/`.
static MULTI_DISC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:disc|cd|dvd)(?:[-_.]?[0-9]{1,2}|/)").expect("static regex")
});

/// Returns true when `candidate` is a noise directory.
///
/// Matching is case-insensitive and a trailing `/` is appended first, so a
/// final `Sample` segment is caught by the `/sample/` rule.
pub fn is_noise(candidate: &str) -> bool {
    let mut checked = candidate.to_lowercase();
    checked.push('/');

    NOISE_FRAGMENTS
        .iter()
        .any(|fragment| checked.contains(fragment))
        || MULTI_DISC.is_match(&checked)
}
