use std::path::Path;

use super::*;

#[test]
fn empty_patterns_include_everything() {
    let filter = IncludeFilter::new(&[]).unwrap();
    assert!(filter.should_include(Path::new("anything.bin")));
    assert!(filter.should_include(Path::new("/deep/path/file.csv")));

    let all = IncludeFilter::include_all();
    assert!(all.should_include(Path::new("whatever")));
}

#[test]
fn pattern_matches_bare_file_name() {
    let filter = IncludeFilter::new(&["*.csv".to_string()]).unwrap();
    assert!(filter.should_include(Path::new("data.csv")));
    assert!(filter.should_include(Path::new("/var/data/nested/data.csv")));
    assert!(!filter.should_include(Path::new("data.json")));
}

#[test]
fn multiple_patterns_are_a_union() {
    let filter =
        IncludeFilter::new(&["*.csv".to_string(), "*.xlsx".to_string()]).unwrap();
    assert!(filter.should_include(Path::new("a.csv")));
    assert!(filter.should_include(Path::new("b.xlsx")));
    assert!(!filter.should_include(Path::new("c.pdf")));
}

#[test]
fn invalid_pattern_is_rejected() {
    let err = IncludeFilter::new(&["[".to_string()]).unwrap_err();
    assert!(matches!(err, VeriscanError::InvalidPattern { .. }));
}
