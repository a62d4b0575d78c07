//! Application route table.

use serde::Serialize;

/// A page route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    /// Page component mounted for this route.
    pub component: &'static str,
    /// Page renders in the split content layout.
    pub split_content: bool,
}

const ROUTES: &[Route] = &[
    Route {
        path: "/",
        name: "Home",
        component: "HomePage",
        split_content: false,
    },
    Route {
        path: "/chat",
        name: "Chat",
        component: "Chat",
        split_content: false,
    },
    Route {
        path: "/prompt-library",
        name: "Prompt Library",
        component: "PromptLibrary",
        split_content: false,
    },
    Route {
        path: "/assistants",
        name: "Assistants",
        component: "Assistants",
        split_content: true,
    },
    Route {
        path: "/collections",
        name: "Collections",
        component: "Collections",
        split_content: false,
    },
];

/// All routes in declaration order.
pub fn routes() -> &'static [Route] {
    ROUTES
}

/// Find the route for a path. A trailing slash and any query or fragment are ignored.
pub fn resolve(path: &str) -> Option<&'static Route> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    ROUTES.iter().find(|r| r.path == trimmed)
}

/// Find a route by its display name (case-insensitive).
pub fn by_name(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_exact() {
        assert_eq!(resolve("/chat").unwrap().component, "Chat");
        assert_eq!(resolve("/").unwrap().name, "Home");
    }

    #[test]
    fn test_resolve_trailing_slash_and_query() {
        assert_eq!(resolve("/assistants/").unwrap().name, "Assistants");
        assert_eq!(resolve("/chat?id=3").unwrap().name, "Chat");
        assert_eq!(resolve("/collections#top").unwrap().name, "Collections");
        assert_eq!(resolve("").unwrap().name, "Home");
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(resolve("/settings").is_none());
        assert!(resolve("/chat/extra").is_none());
    }

    #[test]
    fn test_only_assistants_split() {
        let split: Vec<_> = routes().iter().filter(|r| r.split_content).collect();
        assert_eq!(split.len(), 1);
        assert_eq!(split[0].path, "/assistants");
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("prompt library").unwrap().path, "/prompt-library");
        assert!(by_name("nope").is_none());
    }
}
