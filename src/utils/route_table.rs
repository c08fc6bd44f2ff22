use regex::Regex;

/// Positional captures of a matched route; `None` for groups that did not take part.
pub type RouteArgs = Vec<Option<String>>;

struct Route<R> {
    name: &'static str,
    pattern: Regex,
    build: fn(RouteArgs) -> R,
}

/// Ordered (pattern, handler) table for a page that answers sub-paths of its own URL.
///
/// Patterns are matched against the part of the request path that follows the
/// page's `url_path`, in declaration order; the first match wins.
pub struct RouteTable<R> {
    routes: Vec<Route<R>>,
}

impl<R> RouteTable<R> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn route(mut self, name: &'static str, pattern: &str, build: fn(RouteArgs) -> R) -> Result<Self, regex::Error> {
        self.routes.push(Route {
            name,
            pattern: Regex::new(pattern)?,
            build,
        });
        Ok(self)
    }

    pub fn resolve(&self, remainder: &str) -> Option<R> {
        self.resolve_named(remainder).map(|(_, r)| r)
    }

    /// Like [`resolve`](Self::resolve) but also returns the route name.
    pub fn resolve_named(&self, remainder: &str) -> Option<(&'static str, R)> {
        self.routes.iter().find_map(|route| {
            let caps = route.pattern.captures(remainder)?;
            let args = caps
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()))
                .collect();
            Some((route.name, (route.build)(args)))
        })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.routes.iter().map(|r| r.name).collect()
    }
}

impl<R> Default for RouteTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Hit {
        First,
        Second(Option<String>),
    }

    fn table() -> RouteTable<Hit> {
        RouteTable::new()
            .route("first", r"^a/$", |_| Hit::First)
            .unwrap()
            .route("second", r"^a/([\w-]+)/$", |args| Hit::Second(args.into_iter().next().flatten()))
            .unwrap()
    }

    #[test]
    fn resolves_in_declaration_order() {
        let t = RouteTable::new()
            .route("broad", r"^a/.*$", |_| Hit::First)
            .unwrap()
            .route("narrow", r"^a/b/$", |_| Hit::Second(None))
            .unwrap();
        assert_eq!(t.resolve_named("a/b/"), Some(("broad", Hit::First)));
    }

    #[test]
    fn passes_captures_to_the_handler() {
        assert_eq!(table().resolve("a/hello-world/"), Some(Hit::Second(Some("hello-world".into()))));
        assert_eq!(table().resolve("a/"), Some(Hit::First));
    }

    #[test]
    fn unmatched_remainder_resolves_to_none() {
        assert_eq!(table().resolve("b/"), None);
        assert_eq!(table().resolve("a/x/y/"), None);
        assert_eq!(table().names(), vec!["first", "second"]);
    }
}
