use axum::http::Method;
use once_cell::sync::Lazy;

/// What a route demands from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// No identity needed
    Public,
    /// Any authenticated account
    Authenticated,
    /// Admin role required
    Admin,
}

struct PolicyRule {
    /// `None` matches any method
    method: Option<Method>,
    pattern: &'static str,
    capability: Capability,
}

/// Static route access policy, first-match-wins. Anything that matches no
/// rule requires authentication, so a forgotten route can only fail
/// closed, never open.
pub struct PolicyTable {
    rules: Vec<PolicyRule>,
}

impl PolicyTable {
    pub fn standard() -> Self {
        use Capability::*;

        let rule = |method: Option<Method>, pattern: &'static str, capability: Capability| {
            PolicyRule { method, pattern, capability }
        };

        Self {
            rules: vec![
                // Token acquisition and public probes
                rule(Some(Method::POST), "/auth/register", Public),
                rule(Some(Method::POST), "/auth/login", Public),
                rule(Some(Method::GET), "/auth/validate", Public),
                rule(Some(Method::GET), "/auth/check-user/*", Public),
                rule(Some(Method::GET), "/health", Public),
                // Approval workflow
                rule(Some(Method::GET), "/auth/pending-approvals", Admin),
                rule(Some(Method::POST), "/auth/approve-user/*", Admin),
                rule(Some(Method::POST), "/auth/reject-user/*", Admin),
                // Hotel directory: writes are admin-only, reads need a login.
                // Admin rules come first so the catch-all below cannot
                // shadow them.
                rule(Some(Method::POST), "/hotels/add", Admin),
                rule(Some(Method::POST), "/hotels/upload-csv", Admin),
                rule(Some(Method::PUT), "/hotels/*", Admin),
                rule(Some(Method::DELETE), "/hotels/*", Admin),
                rule(None, "/hotels/*", Authenticated),
            ],
        }
    }

    /// Capability demanded for a request. Falls back to `Authenticated`
    /// when nothing matches.
    pub fn required(&self, method: &Method, path: &str) -> Capability {
        for rule in &self.rules {
            let method_ok = rule.method.as_ref().map_or(true, |m| m == method);
            if method_ok && pattern_matches(rule.pattern, path) {
                return rule.capability;
            }
        }
        Capability::Authenticated
    }
}

/// Segment-wise match. A trailing `*` matches one or more remaining
/// segments; no other wildcard position is supported.
fn pattern_matches(pattern: &str, path: &str) -> bool {
    let pattern_segs: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    for (i, seg) in pattern_segs.iter().enumerate() {
        if *seg == "*" && i == pattern_segs.len() - 1 {
            return path_segs.len() > i;
        }
        match path_segs.get(i) {
            Some(p) if p == seg => continue,
            _ => return false,
        }
    }
    pattern_segs.len() == path_segs.len()
}

static STANDARD: Lazy<PolicyTable> = Lazy::new(PolicyTable::standard);

/// The table enforced by the request guard.
pub fn standard_table() -> &'static PolicyTable {
    &STANDARD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes_are_open() {
        let table = PolicyTable::standard();
        assert_eq!(table.required(&Method::POST, "/auth/login"), Capability::Public);
        assert_eq!(table.required(&Method::POST, "/auth/register"), Capability::Public);
        assert_eq!(
            table.required(&Method::GET, "/auth/check-user/alice"),
            Capability::Public
        );
        assert_eq!(table.required(&Method::GET, "/health"), Capability::Public);
    }

    #[test]
    fn approval_workflow_is_admin_only() {
        let table = PolicyTable::standard();
        assert_eq!(
            table.required(&Method::GET, "/auth/pending-approvals"),
            Capability::Admin
        );
        assert_eq!(
            table.required(&Method::POST, "/auth/approve-user/42"),
            Capability::Admin
        );
        assert_eq!(
            table.required(&Method::POST, "/auth/reject-user/42"),
            Capability::Admin
        );
    }

    #[test]
    fn hotel_writes_are_admin_reads_are_authenticated() {
        let table = PolicyTable::standard();
        assert_eq!(table.required(&Method::POST, "/hotels/add"), Capability::Admin);
        assert_eq!(table.required(&Method::PUT, "/hotels/42"), Capability::Admin);
        assert_eq!(table.required(&Method::DELETE, "/hotels/42"), Capability::Admin);
        assert_eq!(
            table.required(&Method::GET, "/hotels/all"),
            Capability::Authenticated
        );
        assert_eq!(
            table.required(&Method::GET, "/hotels/search/city"),
            Capability::Authenticated
        );
    }

    #[test]
    fn unmatched_routes_fall_back_to_authenticated() {
        let table = PolicyTable::standard();
        assert_eq!(
            table.required(&Method::GET, "/metrics"),
            Capability::Authenticated
        );
        assert_eq!(
            table.required(&Method::DELETE, "/auth/login"),
            Capability::Authenticated
        );
    }

    #[test]
    fn wildcard_requires_at_least_one_segment() {
        assert!(pattern_matches("/auth/check-user/*", "/auth/check-user/alice"));
        assert!(pattern_matches("/hotels/*", "/hotels/search/city"));
        assert!(!pattern_matches("/auth/check-user/*", "/auth/check-user"));
        assert!(!pattern_matches("/hotels/*", "/hotels"));
        assert!(!pattern_matches("/auth/login", "/auth/login/extra"));
    }
}
