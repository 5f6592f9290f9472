//! Console route table

use std::fmt;
use std::str::FromStr;

use crate::error::ConsoleError;

/// A view the console can open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` and `/rules`
    Rules,
    /// `/rules/new`
    NewRule,
    /// `/transactions`
    Transactions,
    /// `/evaluate`
    Evaluate,
    /// `/results`
    Results,
    /// `/results/{userId}`
    UserResults(String),
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Rules => "Rules",
            Route::NewRule => "Create Rule",
            Route::Transactions => "Transactions",
            Route::Evaluate => "Evaluate",
            Route::Results => "Results",
            Route::UserResults(_) => "User Transactions",
        }
    }
}

impl FromStr for Route {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|seg| !seg.is_empty()).collect();

        match segments.as_slice() {
            [] | ["rules"] => Ok(Route::Rules),
            ["rules", "new"] => Ok(Route::NewRule),
            ["transactions"] => Ok(Route::Transactions),
            ["evaluate"] => Ok(Route::Evaluate),
            ["results"] => Ok(Route::Results),
            ["results", user_id] => {
                let decoded = urlencoding::decode(user_id)
                    .map_err(|_| ConsoleError::UnknownRoute(s.to_string()))?;
                Ok(Route::UserResults(decoded.into_owned()))
            }
            _ => Err(ConsoleError::UnknownRoute(s.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Rules => write!(f, "/rules"),
            Route::NewRule => write!(f, "/rules/new"),
            Route::Transactions => write!(f, "/transactions"),
            Route::Evaluate => write!(f, "/evaluate"),
            Route::Results => write!(f, "/results"),
            Route::UserResults(id) => write!(f, "/results/{}", urlencoding::encode(id)),
        }
    }
}
