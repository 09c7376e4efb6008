use catalog_fs::NormalizedPath;
use proptest::prelude::*;
use std::path::Path;

proptest! {
    #[test]
    fn test_normalized_path_has_no_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));

        // Normalizing twice changes nothing
        let again = NormalizedPath::new(path.as_str());
        prop_assert_eq!(path, again);
    }

    #[test]
    fn test_relative_drops_the_base(base in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}", rel in "[a-z0-9-]{1,8}(/[a-z0-9-]{1,8}){0,3}") {
        let full = Path::new(&base).join(&rel);
        let relative = NormalizedPath::relative(&full, Path::new(&base));
        prop_assert_eq!(relative.map(|p| p.as_str().to_string()), Some(rel.clone()));
    }
}
