use catalog_git::Locator;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_https_locator_splits_at_dot_git(
        host in "[a-z]{1,10}",
        path in "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
        reference in "[a-zA-Z0-9][a-zA-Z0-9_/-]{0,20}",
    ) {
        let url = format!("https://{host}.example/{path}.git");
        let locator = Locator::parse(&format!("{url}@{reference}")).unwrap();
        prop_assert_eq!(locator.url(), url.as_str());
        prop_assert_eq!(locator.reference(), Some(reference.as_str()));
    }

    #[test]
    fn test_ssh_locator_keeps_user_prefix(
        host in "[a-z]{1,10}",
        org in "[a-z]{1,8}",
        repo in "[a-z]{1,8}",
        reference in proptest::option::of("[a-zA-Z0-9][a-zA-Z0-9_/-]{0,20}"),
    ) {
        let url = format!("git@{host}.example:{org}/{repo}.git");
        let input = match &reference {
            Some(r) => format!("{url}@{r}"),
            None => url.clone(),
        };
        let locator = Locator::parse(&input).unwrap();
        prop_assert_eq!(locator.url(), url.as_str());
        prop_assert_eq!(locator.reference(), reference.as_deref());

        // Display renders the locator it was parsed from
        prop_assert_eq!(locator.to_string(), input);
    }
}
