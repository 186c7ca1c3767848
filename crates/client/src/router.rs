//! Client route table and path matching.

use std::collections::BTreeMap;

use finledger_auth::{Role, RoleRequirement};

/// Access metadata attached to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub required_role: Option<RoleRequirement>,
}

impl RouteMeta {
    pub const PUBLIC: RouteMeta = RouteMeta {
        requires_auth: false,
        required_role: None,
    };

    pub const PROTECTED: RouteMeta = RouteMeta {
        requires_auth: true,
        required_role: None,
    };

    pub fn role(role: impl Into<RoleRequirement>) -> Self {
        Self {
            requires_auth: true,
            required_role: Some(role.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    /// Absolute pattern, e.g. `/entries/create/:transactionId`.
    pub path: String,
    pub name: &'static str,
    pub meta: RouteMeta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteDef,
    pub params: BTreeMap<String, String>,
}

/// A route with optional children; children inherit `requires_auth` from
/// their parent unless they declare stricter metadata.
struct RouteNode {
    segment: &'static str,
    name: &'static str,
    meta: RouteMeta,
    children: Vec<RouteNode>,
}

impl RouteNode {
    fn leaf(segment: &'static str, name: &'static str, meta: RouteMeta) -> Self {
        Self {
            segment,
            name,
            meta,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    /// The FinLedger application routes.
    pub fn finledger() -> Self {
        let child = |segment, name| RouteNode::leaf(segment, name, RouteMeta::PROTECTED);

        let tree = vec![
            RouteNode::leaf("/login", "Login", RouteMeta::PUBLIC),
            RouteNode::leaf("/register", "Register", RouteMeta::PUBLIC),
            RouteNode {
                segment: "/",
                name: "MainLayout",
                meta: RouteMeta::PROTECTED,
                children: vec![
                    child("", "Dashboard"),
                    child("transactions", "Transactions"),
                    child("transactions/create", "CreateTransaction"),
                    RouteNode::leaf("accounts", "Accounts", RouteMeta::role(Role::Manager)),
                    child("entries", "Entries"),
                    child("entries/create/:transactionId", "CreateEntry"),
                    child("payments", "Payments"),
                    child("reports", "Reports"),
                    child("profile", "Profile"),
                ],
            },
        ];

        let mut table = Self::default();
        for node in tree {
            table.flatten("", node, false);
        }
        table
    }

    fn flatten(&mut self, parent: &str, node: RouteNode, parent_requires_auth: bool) {
        let path = join(parent, node.segment);
        let mut meta = node.meta;
        meta.requires_auth |= parent_requires_auth;

        if node.children.is_empty() {
            self.routes.push(RouteDef {
                path,
                name: node.name,
                meta,
            });
            return;
        }
        for child in node.children {
            self.flatten(&path, child, meta.requires_auth);
        }
    }

    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDef> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Match a concrete path (query, fragment and trailing slash ignored).
    pub fn resolve(&self, target: &str) -> Option<RouteMatch<'_>> {
        let path = normalize(target);
        let segments: Vec<&str> = split(&path).collect();

        self.routes.iter().find_map(|route| {
            let pattern: Vec<&str> = split(&route.path).collect();
            if pattern.len() != segments.len() {
                return None;
            }

            let mut params = BTreeMap::new();
            for (expected, actual) in pattern.iter().zip(&segments) {
                match expected.strip_prefix(':') {
                    Some(name) => {
                        params.insert(name.to_string(), (*actual).to_string());
                    }
                    None if expected == actual => {}
                    None => return None,
                }
            }
            Some(RouteMatch { route, params })
        })
    }
}

/// Strip query, fragment, empty segments and trailing slashes; always
/// absolute.
pub fn normalize(target: &str) -> String {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    let segments: Vec<&str> = split(target[..end].trim()).collect();
    format!("/{}", segments.join("/"))
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn join(parent: &str, segment: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let segment = segment.trim_matches('/');
    match (parent.is_empty(), segment.is_empty()) {
        (_, true) if parent.is_empty() => "/".to_string(),
        (_, true) => parent.to_string(),
        _ => format!("{parent}/{segment}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_flattens_children_under_layout() {
        let table = RouteTable::finledger();
        let paths: Vec<&str> = table.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "/login",
                "/register",
                "/",
                "/transactions",
                "/transactions/create",
                "/accounts",
                "/entries",
                "/entries/create/:transactionId",
                "/payments",
                "/reports",
                "/profile",
            ]
        );

        assert!(!table.by_name("Login").unwrap().meta.requires_auth);
        assert!(table.by_name("Reports").unwrap().meta.requires_auth);
        assert_eq!(
            table.by_name("Accounts").unwrap().meta.required_role,
            Some(RoleRequirement::One(Role::Manager))
        );
    }

    #[test]
    fn resolves_params_and_ignores_decoration() {
        let table = RouteTable::finledger();

        let m = table.resolve("/entries/create/42?from=list").unwrap();
        assert_eq!(m.route.name, "CreateEntry");
        assert_eq!(m.params.get("transactionId").map(String::as_str), Some("42"));

        assert_eq!(table.resolve("/accounts/").unwrap().route.name, "Accounts");
        assert_eq!(table.resolve("").unwrap().route.name, "Dashboard");
        assert_eq!(table.resolve("/#top").unwrap().route.name, "Dashboard");
        assert!(table.resolve("/entries/create").is_none());
        assert!(table.resolve("/nowhere").is_none());
    }

    #[test]
    fn normalizes_paths() {
        assert_eq!(normalize("/login/"), "/login");
        assert_eq!(normalize("payments?status=PENDING"), "/payments");
        assert_eq!(normalize("///"), "/");
        assert_eq!(normalize("//login"), "/login");
        assert_eq!(normalize("entries//create/3/"), "/entries/create/3");
    }
}
