//! Hypermedia link construction
//!
//! Every function here is pure: link sets are a deterministic function of
//! the base URL, the resource id, and the caller's capability tier.
//! The tiers are strictly increasing: anonymous callers see navigation
//! links only, authenticated callers may create, owners may also modify.

use serde::Serialize;
use std::collections::BTreeMap;

/// A permitted follow-up action on a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub method: &'static str,
}

/// Ordered action-name-to-link mapping, stable across calls
pub type Links = BTreeMap<&'static str, Link>;

/// Links embedded in a single report representation
pub fn report_links(
    base_url: &str,
    report_id: &str,
    is_authenticated: bool,
    is_owner: bool,
) -> Links {
    let mut links = BTreeMap::new();
    links.insert(
        "self",
        Link {
            href: format!("{base_url}/reports/{report_id}"),
            method: "GET",
        },
    );
    links.insert(
        "all",
        Link {
            href: format!("{base_url}/reports"),
            method: "GET",
        },
    );

    if is_authenticated {
        links.insert(
            "create",
            Link {
                href: format!("{base_url}/reports"),
                method: "POST",
            },
        );

        if is_owner {
            links.insert(
                "update",
                Link {
                    href: format!("{base_url}/reports/{report_id}"),
                    method: "PATCH",
                },
            );
            links.insert(
                "replace",
                Link {
                    href: format!("{base_url}/reports/{report_id}"),
                    method: "PUT",
                },
            );
            links.insert(
                "delete",
                Link {
                    href: format!("{base_url}/reports/{report_id}"),
                    method: "DELETE",
                },
            );
        }
    }

    links
}

/// Links embedded in the report collection representation
pub fn collection_links(base_url: &str, is_authenticated: bool) -> Links {
    let mut links = BTreeMap::new();
    links.insert(
        "self",
        Link {
            href: format!("{base_url}/reports"),
            method: "GET",
        },
    );
    if is_authenticated {
        links.insert(
            "create",
            Link {
                href: format!("{base_url}/reports"),
                method: "POST",
            },
        );
    }
    links
}

/// Links embedded in the auth endpoint index
pub fn auth_links(base_url: &str) -> Links {
    let mut links = BTreeMap::new();
    links.insert(
        "self",
        Link {
            href: format!("{base_url}/auth"),
            method: "GET",
        },
    );
    links.insert(
        "login",
        Link {
            href: format!("{base_url}/auth/login"),
            method: "POST",
        },
    );
    links.insert(
        "register",
        Link {
            href: format!("{base_url}/auth/register"),
            method: "POST",
        },
    );
    links.insert(
        "refresh",
        Link {
            href: format!("{base_url}/auth/refresh"),
            method: "POST",
        },
    );
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8080/api/v1";

    #[test]
    fn test_link_builder_is_pure() {
        let first = report_links(BASE, "r1", true, true);
        let second = report_links(BASE, "r1", true, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tiers_are_strict_supersets() {
        let anonymous = report_links(BASE, "r1", false, false);
        let authenticated = report_links(BASE, "r1", true, false);
        let owner = report_links(BASE, "r1", true, true);

        assert!(anonymous.len() < authenticated.len());
        assert!(authenticated.len() < owner.len());

        for (name, link) in &anonymous {
            assert_eq!(authenticated.get(name), Some(link));
        }
        for (name, link) in &authenticated {
            assert_eq!(owner.get(name), Some(link));
        }
    }

    #[test]
    fn test_tier_contents() {
        let anonymous = report_links(BASE, "r1", false, false);
        assert_eq!(anonymous.keys().copied().collect::<Vec<_>>(), vec!["all", "self"]);

        let authenticated = report_links(BASE, "r1", true, false);
        assert!(authenticated.contains_key("create"));
        assert!(!authenticated.contains_key("delete"));

        let owner = report_links(BASE, "r1", true, true);
        assert_eq!(owner.get("update").unwrap().method, "PATCH");
        assert_eq!(owner.get("replace").unwrap().method, "PUT");
        assert_eq!(owner.get("delete").unwrap().method, "DELETE");
    }

    #[test]
    fn test_owner_flag_requires_authentication() {
        // An owner tier without authentication is not a reachable state;
        // the builder degrades it to the anonymous set.
        let links = report_links(BASE, "r1", false, true);
        assert_eq!(links, report_links(BASE, "r1", false, false));
    }

    #[test]
    fn test_hrefs_use_base_url() {
        let links = report_links(BASE, "r1", false, false);
        assert_eq!(
            links.get("self").unwrap().href,
            "http://localhost:8080/api/v1/reports/r1"
        );
    }
}
