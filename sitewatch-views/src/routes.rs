//! Dashboard URL table.

use sitewatch_utils::{
    pagination::parse_one_based_page,
    parse::{decode_query_value, encode_query_value, parse_site_id, query_param},
};

/// Parameters of the site detail route (`/sites/{id}?q&p&n`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteParams {
    pub id: u64,
    /// Requested status page, 1-based.
    pub page: usize,
    /// Requested page size; `None` falls back to the configured limit.
    pub limit: Option<usize>,
    /// Free-form filter carried along in the URL.
    pub query: Option<String>,
}

impl SiteParams {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            page: 1,
            limit: None,
            query: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Site(SiteParams),
    Settings,
    NotFound,
    /// Sign-in page; `redirect` is where to return once signed in.
    Signin { redirect: Option<String> },
    Signup,
}

impl Route {
    /// Sign-in route that returns to `next` afterwards.
    pub fn signin_then(next: &Route) -> Self {
        Self::Signin {
            redirect: Some(next.path()),
        }
    }

    /// Canonical path for the route.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Site(params) => {
                let mut path = format!("/sites/{}", params.id);
                let mut query = Vec::new();
                if let Some(q) = &params.query {
                    query.push(format!("q={}", encode_query_value(q)));
                }
                if params.page != 1 {
                    query.push(format!("p={}", params.page));
                }
                if let Some(limit) = params.limit {
                    query.push(format!("n={limit}"));
                }
                if !query.is_empty() {
                    path.push('?');
                    path.push_str(&query.join("&"));
                }
                path
            }
            Self::Settings => "/settings".to_owned(),
            Self::NotFound => "/404".to_owned(),
            Self::Signin { redirect: None } => "/auth/login".to_owned(),
            Self::Signin {
                redirect: Some(next),
            } => format!("/auth/login?redirect={}", encode_query_value(next)),
            Self::Signup => "/auth/signup".to_owned(),
        }
    }
}

/// Resolve a URL path (with optional query string) to a route.
///
/// Unknown paths, and site URLs with a malformed id, resolve to
/// [`Route::NotFound`]. Malformed `p`/`n` values fall back to defaults.
pub fn resolve(url: &str) -> Route {
    const STATIC_ROUTES: [(&str, Route); 4] = [
        ("/", Route::Home),
        ("/settings", Route::Settings),
        ("/404", Route::NotFound),
        ("/auth/signup", Route::Signup),
    ];

    let (path, query) = url.trim().split_once('?').unwrap_or((url.trim(), ""));
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    if let Some(route) = STATIC_ROUTES
        .into_iter()
        .find_map(|(known, route)| (known == path).then_some(route))
    {
        return route;
    }

    if path == "/auth/login" {
        let redirect = query_param(query, "redirect")
            .filter(|value| !value.is_empty())
            .map(decode_query_value);
        return Route::Signin { redirect };
    }

    let Some(raw_id) = path.strip_prefix("/sites/") else {
        return Route::NotFound;
    };
    let Some(id) = parse_site_id(raw_id) else {
        return Route::NotFound;
    };

    let page = parse_one_based_page(query_param(query, "p")).unwrap_or(1);
    let limit = query_param(query, "n").and_then(|raw| parse_one_based_page(Some(raw)));
    let query = query_param(query, "q")
        .filter(|value| !value.is_empty())
        .map(decode_query_value);

    Route::Site(SiteParams {
        id,
        page,
        limit,
        query,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_routes() {
        assert_eq!(resolve("/"), Route::Home);
        assert_eq!(resolve(""), Route::Home);
        assert_eq!(resolve("/settings/"), Route::Settings);
        assert_eq!(resolve("/404"), Route::NotFound);
        assert_eq!(resolve("/no/such/page"), Route::NotFound);
    }

    #[test]
    fn site_route_reads_query() {
        assert_eq!(
            resolve("/sites/4?p=3&n=50"),
            Route::Site(SiteParams {
                id: 4,
                page: 3,
                limit: Some(50),
                query: None,
            })
        );
    }

    #[test]
    fn site_route_defaults_bad_query_values() {
        assert_eq!(resolve("/sites/4?p=0&n=x"), Route::Site(SiteParams::new(4)));
        assert_eq!(resolve("/sites/abc"), Route::NotFound);
    }

    #[test]
    fn paths_resolve_back() {
        let route = Route::Site(SiteParams {
            id: 9,
            page: 2,
            limit: Some(10),
            query: Some("down".to_owned()),
        });
        assert_eq!(route.path(), "/sites/9?q=down&p=2&n=10");
        assert_eq!(resolve(&route.path()), route);
        let signin = Route::Signin { redirect: None };
        assert_eq!(resolve(&signin.path()), signin);
    }

    #[test]
    fn filter_with_reserved_characters_round_trips() {
        let route = Route::Site(SiteParams {
            query: Some("a&b=c #1".to_owned()),
            ..SiteParams::new(3)
        });
        assert_eq!(route.path(), "/sites/3?q=a%26b%3Dc%20%231");
        assert_eq!(resolve(&route.path()), route);
    }

    #[test]
    fn signin_carries_return_path() {
        let next = Route::Site(SiteParams {
            page: 2,
            ..SiteParams::new(5)
        });
        let signin = Route::signin_then(&next);
        assert_eq!(signin.path(), "/auth/login?redirect=/sites/5%3Fp%3D2");

        let Route::Signin {
            redirect: Some(back),
        } = resolve(&signin.path())
        else {
            panic!("expected a sign-in route with a return path");
        };
        assert_eq!(resolve(&back), next);
    }
}
