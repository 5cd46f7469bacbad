use super::route::{PatternError, RoutePattern};
use super::RouteClass;

/// Static mapping from path patterns to route classes.
///
/// Admin patterns are checked first, then protected, then public; a path that
/// matches none of them is [`RouteClass::Open`].
#[derive(Debug, Clone, Default)]
pub struct RoutePolicy {
    admin: Vec<RoutePattern>,
    protected: Vec<RoutePattern>,
    public: Vec<RoutePattern>,
}

impl RoutePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The route table of the tour operator site.
    pub fn standard() -> Self {
        Self {
            // Customer and flight records have no per-client pages
            admin: compile(&["/users", "/bookings", "/customers/*", "/flights/*"]),
            protected: compile(&["/users/:id", "/bookings/:id"]),
            public: compile(&["/login", "/register"]),
        }
    }

    pub fn admin(mut self, pattern: &str) -> Result<Self, PatternError> {
        self.admin.push(RoutePattern::parse(pattern)?);
        Ok(self)
    }

    pub fn protected(mut self, pattern: &str) -> Result<Self, PatternError> {
        self.protected.push(RoutePattern::parse(pattern)?);
        Ok(self)
    }

    pub fn public(mut self, pattern: &str) -> Result<Self, PatternError> {
        self.public.push(RoutePattern::parse(pattern)?);
        Ok(self)
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        if self.admin.iter().any(|p| p.matches(path)) {
            RouteClass::AdminOnly
        } else if self.protected.iter().any(|p| p.matches(path)) {
            RouteClass::Protected
        } else if self.public.iter().any(|p| p.matches(path)) {
            RouteClass::Public
        } else {
            RouteClass::Open
        }
    }
}

// Only for the built-in table above, whose patterns are known to be valid.
fn compile(patterns: &[&str]) -> Vec<RoutePattern> {
    patterns
        .iter()
        .filter_map(|p| RoutePattern::parse(p).ok())
        .collect()
}
