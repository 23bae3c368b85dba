//! # Item Filters
//!
//! Predicates over `(session, path)` that decide whether an action applies to an
//! item. Filters never mutate anything and are safe to evaluate concurrently.
//!
//! ## Combinators
//!
//! - [`not`] / [`FilterExt::negate`] invert a filter
//! - [`FilterExt::and_then`] sequences two filters; the second runs only when the
//!   first passes
//!
//! ```rust
//! use deferred_actions::filters::{exclude_subassets, matching, FilterExt};
//!
//! # fn example() -> deferred_actions::ActionResult<()> {
//! let under_campaigns = matching("/content/dam/campaigns/.*")?;
//! let filter = under_campaigns.and_then(exclude_subassets());
//! # let _ = filter;
//! # Ok(())
//! # }
//! ```

mod assets;

pub use assets::{HasOutdatedRenditions, IsValidAsset};

use crate::constants::patterns::SUBASSETS;
use crate::error::ActionResult;
use crate::session::RepositorySession;
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// Decides whether an item path should be processed
#[async_trait]
pub trait ItemFilter: Send + Sync {
    async fn accepts(&self, session: &dyn RepositorySession, path: &str) -> ActionResult<bool>;

    /// Get the filter name for identification
    fn filter_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[async_trait]
impl<F: ItemFilter + ?Sized> ItemFilter for Box<F> {
    async fn accepts(&self, session: &dyn RepositorySession, path: &str) -> ActionResult<bool> {
        (**self).accepts(session, path).await
    }

    fn filter_name(&self) -> &'static str {
        (**self).filter_name()
    }
}

#[async_trait]
impl<F: ItemFilter + ?Sized> ItemFilter for Arc<F> {
    async fn accepts(&self, session: &dyn RepositorySession, path: &str) -> ActionResult<bool> {
        (**self).accepts(session, path).await
    }

    fn filter_name(&self) -> &'static str {
        (**self).filter_name()
    }
}

/// Evaluate `filters` in order, stopping at the first rejection
pub async fn accepts_all(
    filters: &[Box<dyn ItemFilter>],
    session: &dyn RepositorySession,
    path: &str,
) -> ActionResult<bool> {
    for filter in filters {
        if !filter.accepts(session, path).await? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Full-string regular expression match on the item path
#[derive(Debug, Clone)]
pub struct PathMatches {
    pattern: String,
    regex: Regex,
}

impl PathMatches {
    pub fn new(pattern: &str) -> ActionResult<Self> {
        Ok(Self {
            pattern: pattern.to_string(),
            regex: Regex::new(&anchored(pattern))?,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

#[async_trait]
impl ItemFilter for PathMatches {
    async fn accepts(&self, _session: &dyn RepositorySession, path: &str) -> ActionResult<bool> {
        Ok(self.is_match(path))
    }

    fn filter_name(&self) -> &'static str {
        "matching"
    }
}

fn anchored(pattern: &str) -> String {
    format!("^(?:{pattern})$")
}

/// Logical negation of another filter
#[derive(Debug, Clone)]
pub struct Not<F> {
    inner: F,
}

impl<F> Not<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

#[async_trait]
impl<F: ItemFilter> ItemFilter for Not<F> {
    async fn accepts(&self, session: &dyn RepositorySession, path: &str) -> ActionResult<bool> {
        Ok(!self.inner.accepts(session, path).await?)
    }

    fn filter_name(&self) -> &'static str {
        "not"
    }
}

/// Passes only when both filters pass; `second` is skipped when `first` rejects
#[derive(Debug, Clone)]
pub struct AndThen<A, B> {
    first: A,
    second: B,
}

#[async_trait]
impl<A: ItemFilter, B: ItemFilter> ItemFilter for AndThen<A, B> {
    async fn accepts(&self, session: &dyn RepositorySession, path: &str) -> ActionResult<bool> {
        if !self.first.accepts(session, path).await? {
            return Ok(false);
        }
        self.second.accepts(session, path).await
    }

    fn filter_name(&self) -> &'static str {
        "and_then"
    }
}

/// Combinators available on every [`ItemFilter`]
pub trait FilterExt: ItemFilter + Sized {
    fn negate(self) -> Not<Self> {
        Not::new(self)
    }

    fn and_then<B: ItemFilter>(self, second: B) -> AndThen<Self, B> {
        AndThen {
            first: self,
            second,
        }
    }

    fn boxed(self) -> Box<dyn ItemFilter>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<F: ItemFilter> FilterExt for F {}

/// True iff the whole path matches `pattern`
pub fn matching(pattern: &str) -> ActionResult<PathMatches> {
    PathMatches::new(pattern)
}

/// False iff the whole path matches `pattern`
pub fn not_matching(pattern: &str) -> ActionResult<Not<PathMatches>> {
    Ok(Not::new(PathMatches::new(pattern)?))
}

pub fn not<F: ItemFilter>(filter: F) -> Not<F> {
    Not::new(filter)
}

static SUBASSETS_MATCHER: LazyLock<PathMatches> = LazyLock::new(|| PathMatches {
    pattern: SUBASSETS.to_string(),
    regex: Regex::new(&anchored(SUBASSETS)).expect("subasset pattern is a valid regex"),
});

/// Skip anything stored below a `subassets` folder
pub fn exclude_subassets() -> Not<PathMatches> {
    Not::new(SUBASSETS_MATCHER.clone())
}
