//! Navigation route tokens.
//!
//! Store operations hand back a [`Route`] when the caller should move to a
//! different view (after create, delete, login, logout). Tokens use the
//! `name` or `name:<id>` form.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static ROUTE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]+)(?::(.+))?$").expect("valid route regex"));

/// A view the caller can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Docs,
    Article(String),
    Staff,
    Profile(String),
    Login,
    CrimeVpn,
    Subscription,
}

impl Route {
    /// Name part of the token, without any id.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Docs => "docs",
            Self::Article(_) => "article",
            Self::Staff => "staff",
            Self::Profile(_) => "profile",
            Self::Login => "login",
            Self::CrimeVpn => "crimevpn",
            Self::Subscription => "subscription",
        }
    }

    /// Record id carried by detail routes.
    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::Article(id) | Self::Profile(id) => Some(id),
            _ => None,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.argument() {
            Some(id) => write!(f, "{}:{id}", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

/// Route token that names no known view or has the wrong arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    Malformed(String),
    UnknownRoute(String),
    MissingArgument(&'static str),
    UnexpectedArgument(&'static str),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(token) => write!(f, "malformed route token `{token}`"),
            Self::UnknownRoute(name) => write!(f, "unknown route `{name}`"),
            Self::MissingArgument(name) => write!(f, "route `{name}` requires an id"),
            Self::UnexpectedArgument(name) => write!(f, "route `{name}` takes no id"),
        }
    }
}

impl Error for RouteError {}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let caps = ROUTE_TOKEN_RE
            .captures(token.trim())
            .ok_or_else(|| RouteError::Malformed(token.to_string()))?;
        let name = caps.get(1).map_or("", |m| m.as_str());
        let argument = caps.get(2).map(|m| m.as_str().to_string());

        let route = match name {
            "article" => return with_argument(argument, "article", Self::Article),
            "profile" => return with_argument(argument, "profile", Self::Profile),
            "home" => Self::Home,
            "docs" => Self::Docs,
            "staff" => Self::Staff,
            "login" => Self::Login,
            "crimevpn" => Self::CrimeVpn,
            "subscription" => Self::Subscription,
            other => return Err(RouteError::UnknownRoute(other.to_string())),
        };

        if argument.is_some() {
            return Err(RouteError::UnexpectedArgument(route.name()));
        }
        Ok(route)
    }
}

fn with_argument(
    argument: Option<String>,
    name: &'static str,
    build: fn(String) -> Route,
) -> Result<Route, RouteError> {
    argument
        .map(build)
        .ok_or(RouteError::MissingArgument(name))
}

#[cfg(test)]
mod tests {
    use super::{Route, RouteError};

    #[test]
    fn parses_detail_routes_with_ids_containing_colons() {
        let route: Route = "article:art-1:draft".parse().unwrap();
        assert_eq!(route, Route::Article("art-1:draft".to_string()));
        assert_eq!(route.to_string(), "article:art-1:draft");
    }

    #[test]
    fn display_and_parse_agree_for_plain_routes() {
        for route in [
            Route::Home,
            Route::Docs,
            Route::Staff,
            Route::Login,
            Route::CrimeVpn,
            Route::Subscription,
        ] {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn rejects_bad_arity_and_unknown_names() {
        assert_eq!(
            "profile".parse::<Route>().unwrap_err(),
            RouteError::MissingArgument("profile")
        );
        assert_eq!(
            "home:1".parse::<Route>().unwrap_err(),
            RouteError::UnexpectedArgument("home")
        );
        assert_eq!(
            "settings".parse::<Route>().unwrap_err(),
            RouteError::UnknownRoute("settings".to_string())
        );
        assert!(matches!(
            "Docs".parse::<Route>().unwrap_err(),
            RouteError::Malformed(_)
        ));
    }
}
