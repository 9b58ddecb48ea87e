//! Credential matching by scope specificity
//!
//! Finds the stored scope that best describes a challenge: an exact
//! host+port+realm entry outranks a host-only entry, which outranks a
//! catch-all entry. Conflicting concrete fields disqualify an entry
//! entirely.

use super::credentials::Credentials;
use super::scope::AuthScope;

/// Pick the most specific compatible credential entry for `query`.
///
/// An entry is compatible when none of its concrete fields conflicts with a
/// concrete field of the query. Its specificity is the number of fields
/// where both entry and query are concrete and equal. Ties resolve to the
/// earliest inserted entry.
pub(crate) fn match_credentials<'a>(
    entries: &'a [(AuthScope, Credentials)],
    query: &AuthScope,
) -> Option<&'a Credentials> {
    let mut best: Option<(u32, &'a Credentials)> = None;
    for (scope, credentials) in entries {
        let Some(score) = specificity(scope, query) else {
            continue;
        };
        // strict > keeps the earliest entry on equal scores
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, credentials));
        }
    }
    best.map(|(_, credentials)| credentials)
}

fn specificity(stored: &AuthScope, query: &AuthScope) -> Option<u32> {
    let mut score = 0;
    score += field_score(stored.scheme(), query.scheme())?;
    score += field_score(stored.host(), query.host())?;
    score += field_score(stored.port(), query.port())?;
    score += field_score(stored.realm(), query.realm())?;
    Some(score)
}

fn field_score<T: PartialEq>(stored: Option<T>, query: Option<T>) -> Option<u32> {
    match (stored, query) {
        (Some(stored), Some(query)) if stored == query => Some(1),
        (Some(_), Some(_)) => None,
        _ => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(name: &str) -> Credentials {
        Credentials::user_password(name, "pass")
    }

    #[test]
    fn most_specific_scope_wins() {
        let entries = vec![
            (AuthScope::host_only("h"), creds("host-only")),
            (AuthScope::host_only("h").with_realm("r"), creds("realm")),
        ];
        let query = AuthScope::host_only("h").with_realm("r");
        let found = match_credentials(&entries, &query).expect("realm entry matches");
        assert_eq!(found.principal(), "realm");
    }

    #[test]
    fn conflicting_realm_disqualifies() {
        let entries = vec![(AuthScope::host_only("h").with_realm("r"), creds("realm"))];
        let query = AuthScope::host_only("h").with_realm("other");
        assert!(match_credentials(&entries, &query).is_none());
    }

    #[test]
    fn wildcard_entry_catches_unmatched_realm() {
        let entries = vec![
            (AuthScope::host_only("h").with_realm("r"), creds("realm")),
            (AuthScope::host_only("h"), creds("host-only")),
        ];
        let query = AuthScope::host_only("h").with_realm("other");
        let found = match_credentials(&entries, &query).expect("wildcard realm entry matches");
        assert_eq!(found.principal(), "host-only");
    }

    #[test]
    fn catch_all_ranks_below_host_entry() {
        let entries = vec![
            (AuthScope::any(), creds("catch-all")),
            (AuthScope::host_only("h"), creds("host-only")),
        ];
        let query = AuthScope::host_only("h").with_realm("r");
        let found = match_credentials(&entries, &query).expect("host entry matches");
        assert_eq!(found.principal(), "host-only");
    }

    #[test]
    fn equal_scores_resolve_to_first_inserted() {
        let entries = vec![
            (AuthScope::host_only("h"), creds("first")),
            (
                AuthScope::new(None, Some("h"), None, None),
                creds("second"),
            ),
        ];
        let query = AuthScope::host_only("h");
        let found = match_credentials(&entries, &query).expect("both entries match");
        assert_eq!(found.principal(), "first");
    }

    #[test]
    fn conflicting_host_disqualifies_even_with_matching_realm() {
        let entries = vec![(
            AuthScope::host_only("elsewhere").with_realm("r"),
            creds("wrong-host"),
        )];
        let query = AuthScope::host_only("h").with_realm("r");
        assert!(match_credentials(&entries, &query).is_none());
    }
}
