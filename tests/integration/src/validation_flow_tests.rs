//! Repository validation through a real clone

use catalog_core::{CatalogSession, GitCliFetcher};
use catalog_test_utils::catalog::TestCatalog;
use pretty_assertions::assert_eq;
use serde_json::json;

fn validate(catalog: &TestCatalog) -> catalog_core::ValidationResult {
    let remote = catalog.publish(&[]);
    CatalogSession::new(GitCliFetcher::new())
        .validate(remote.url())
        .unwrap()
}

#[test]
fn test_published_minimal_catalog_is_valid() {
    let catalog = TestCatalog::valid();

    let result = validate(&catalog);

    assert!(result.is_valid(), "{result}");
    assert_eq!(result.to_string(), "Catalog is valid");
}

#[cfg(unix)]
#[test]
fn test_executable_bits_survive_the_clone() {
    let catalog = TestCatalog::valid();
    catalog.set_executable("common/devcontainer-assets/postcreate-wrapper.sh", false);

    let result = validate(&catalog);

    assert_eq!(
        result.errors(),
        &["common/devcontainer-assets: 'postcreate-wrapper.sh' is not executable".to_string()]
    );
}

#[test]
fn test_all_findings_reported_in_one_pass() {
    let catalog = TestCatalog::valid();
    catalog.remove("common/devcontainer-assets/functions.sh");
    catalog.add_entry("python/a", "python");
    catalog.add_entry("python/b", "python");
    catalog.write_json(
        "catalog/python/b/catalog-entry.json",
        &json!({"name": "python", "description": "Dup", "extra": true}),
    );
    catalog.write_file("catalog/python/a/VERSION", "latest\n");

    let result = validate(&catalog);

    assert_eq!(
        result.errors(),
        &[
            "common/devcontainer-assets: missing required file 'functions.sh'".to_string(),
            "catalog/python/a: VERSION: invalid version 'latest': expected MAJOR.MINOR.PATCH"
                .to_string(),
            "catalog/python/b: catalog-entry.json: unknown field 'extra'".to_string(),
            "duplicate entry name 'python' in 'catalog/python/b' (already declared in 'catalog/python/a')"
                .to_string(),
        ]
    );
    assert!(result.to_string().ends_with("4 validation error(s)"));
}
