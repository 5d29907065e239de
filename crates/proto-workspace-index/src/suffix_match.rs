//! Suffix-matched path translation (§4.6a), used by the "path translation"
//! repair when every ordered strategy in §4.6 fails.

/// Finds the best directory offset in `source` (the importer's path) whose
/// trailing segments share a prefix with `target` (the unresolved import
/// path), and returns `target` translated into `source`'s directory.
///
/// Returns `None` if no offset shares even a single leading segment with
/// `target`.
pub fn suffix_matched_path(target: &str, source: &str) -> Option<String> {
    let target_segs: Vec<&str> = target.split('/').collect();
    let source_segs: Vec<&str> = source.split('/').collect();
    let len_source = source_segs.len();

    let mut best_score = 0usize;
    let mut best_start = None;
    for k in 1..len_source {
        let start = len_source - k;
        let score = common_prefix_len(&target_segs, &source_segs[start..]);
        if score >= 1 && score > best_score {
            best_score = score;
            best_start = Some(start);
        }
    }

    let start = best_start?;
    if start == 0 {
        Some(target.to_string())
    } else {
        Some(format!("{}/{target}", source_segs[..start].join("/")))
    }
}

fn common_prefix_len(a: &[&str], b: &[&str]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_via_deepest_shared_directory() {
        let result =
            suffix_matched_path("foo/v1/bar.proto", "workspace/a/foo/v1/baz.proto").unwrap();
        assert_eq!(result, "workspace/a/foo/v1/bar.proto");
    }

    #[test]
    fn no_shared_segment_returns_none() {
        assert_eq!(suffix_matched_path("x/y.proto", "a/b/c.proto"), None);
    }

    #[test]
    fn single_segment_source_has_no_offsets() {
        assert_eq!(suffix_matched_path("a/b.proto", "c.proto"), None);
    }
}
