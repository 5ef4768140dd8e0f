//! The console's route table.
//!
//! Top-level sections render inside the layout shell and redirect to their first page; leaf
//! routes name the page module the console loads lazily when the route is first visited.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a route renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RouteComponent {
    /// The shared layout shell
    Layout,
    /// A lazily loaded page module
    Page { module: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RouteMeta {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Menu position; lower ranks come first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RouteRecord {
    pub path: String,
    pub name: String,
    pub component: RouteComponent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    pub meta: RouteMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub children: Vec<RouteRecord>,
}

fn section(
    path: &str,
    name: &str,
    title: &str,
    icon: &str,
    rank: u32,
    pages: &[(&str, &str, &str)],
) -> RouteRecord {
    let children: Vec<RouteRecord> = pages
        .iter()
        .map(|(slug, name, title)| RouteRecord {
            path: format!("{path}/{slug}"),
            name: name.to_string(),
            component: RouteComponent::Page {
                module: format!("views{path}/{slug}/index"),
            },
            redirect: None,
            meta: RouteMeta {
                title: title.to_string(),
                icon: None,
                rank: None,
            },
            children: Vec::new(),
        })
        .collect();

    RouteRecord {
        path: path.to_string(),
        name: name.to_string(),
        component: RouteComponent::Layout,
        redirect: children.first().map(|child| child.path.clone()),
        meta: RouteMeta {
            title: title.to_string(),
            icon: Some(icon.to_string()),
            rank: Some(rank),
        },
        children,
    }
}

/// The full route table, sections ordered by rank.
pub fn route_table() -> Vec<RouteRecord> {
    let mut routes = vec![
        section(
            "/device",
            "Device",
            "Device management",
            "ri:computer-line",
            12,
            &[
                ("category", "DeviceCategory", "Device categories"),
                ("list", "DeviceList", "Device list"),
                ("inventory", "DeviceInventory", "Inventory management"),
            ],
        ),
        section(
            "/certification",
            "Certification",
            "Certification management",
            "ri:verified-badge-line",
            11,
            &[
                ("realname", "CertificationRealname", "Realname verification review"),
                ("pilot", "CertificationPilot", "Pilot qualification review"),
                ("certificate", "CertificationCertificate", "Certificate management"),
            ],
        ),
    ];
    routes.sort_by_key(|route| route.meta.rank.unwrap_or(u32::MAX));
    routes
}

/// Depth-first lookup of a route by its full path.
pub fn find<'a>(routes: &'a [RouteRecord], path: &str) -> Option<&'a RouteRecord> {
    routes.iter().find_map(|route| {
        if route.path == path {
            Some(route)
        } else {
            find(&route.children, path)
        }
    })
}

/// Every route that renders a page, in menu order.
pub fn leaves(routes: &[RouteRecord]) -> Vec<&RouteRecord> {
    routes
        .iter()
        .flat_map(|route| {
            if route.children.is_empty() {
                vec![route]
            } else {
                leaves(&route.children)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_ordered_by_rank() {
        let routes = route_table();
        let paths: Vec<_> = routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/certification", "/device"]);

        let certification = &routes[0];
        assert_eq!(certification.component, RouteComponent::Layout);
        assert_eq!(certification.redirect.as_deref(), Some("/certification/realname"));
        assert_eq!(certification.meta.icon.as_deref(), Some("ri:verified-badge-line"));
        assert_eq!(certification.meta.rank, Some(11));

        assert_eq!(routes[1].redirect.as_deref(), Some("/device/category"));
        assert_eq!(routes[1].meta.rank, Some(12));
    }

    #[test]
    fn test_leaf_pages() {
        let routes = route_table();
        let paths: Vec<_> = leaves(&routes).into_iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/certification/realname",
                "/certification/pilot",
                "/certification/certificate",
                "/device/category",
                "/device/list",
                "/device/inventory",
            ]
        );
    }

    #[test]
    fn test_find_by_path() {
        let routes = route_table();
        let pilot = find(&routes, "/certification/pilot").unwrap();
        assert_eq!(pilot.name, "CertificationPilot");
        assert_eq!(
            pilot.component,
            RouteComponent::Page {
                module: "views/certification/pilot/index".to_string()
            }
        );
        assert!(find(&routes, "/device/unknown").is_none());
    }

    #[test]
    fn test_wire_format() {
        let routes = route_table();
        let value = serde_json::to_value(&routes[1]).unwrap();
        assert_eq!(value["component"]["kind"], "layout");
        assert_eq!(value["children"][2]["component"]["module"], "views/device/inventory/index");
        assert!(value["children"][0].get("children").is_none());
    }
}
