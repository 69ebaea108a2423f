//! Interceptor phases.
//!
//! A [`Phase`] is a point in a managed component's lifecycle or invocation at
//! which interceptor methods run. Every phase routes to exactly one
//! [`Category`] of interceptor method.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::InterceptorError;

/// The closed set of interceptor phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// A business method invocation.
    Business,
    /// A business method invoked through a web service endpoint.
    BusinessWs,
    /// A remove method invocation on a stateful component.
    Remove,
    /// After dependency injection, before the first business call.
    PostConstruct,
    /// Before the container discards the instance.
    PreDestroy,
    /// After a passivated stateful instance is restored.
    Activate,
    /// Before a stateful instance is passivated.
    Passivate,
    /// A transaction has started on a stateful instance.
    AfterBegin,
    /// A transaction has completed, with its outcome known.
    AfterCompletion,
    /// A transaction is about to complete.
    BeforeCompletion,
    /// A timer has expired.
    Timeout,
}

impl Phase {
    /// All phases in declaration order.
    pub const ALL: [Phase; 11] = [
        Phase::Business,
        Phase::BusinessWs,
        Phase::Remove,
        Phase::PostConstruct,
        Phase::PreDestroy,
        Phase::Activate,
        Phase::Passivate,
        Phase::AfterBegin,
        Phase::AfterCompletion,
        Phase::BeforeCompletion,
        Phase::Timeout,
    ];

    /// The unique tag of this phase.
    pub fn tag(self) -> &'static str {
        match self {
            Phase::Business => "BUSINESS",
            Phase::BusinessWs => "BUSINESS_WS",
            Phase::Remove => "REMOVE",
            Phase::PostConstruct => "POST_CONSTRUCT",
            Phase::PreDestroy => "PRE_DESTROY",
            Phase::Activate => "ACTIVATE",
            Phase::Passivate => "PASSIVATE",
            Phase::AfterBegin => "AFTER_BEGIN",
            Phase::AfterCompletion => "AFTER_COMPLETION",
            Phase::BeforeCompletion => "BEFORE_COMPLETION",
            Phase::Timeout => "TIMEOUT",
        }
    }

    /// Parses a phase tag.
    ///
    /// # Errors
    ///
    /// Returns [`InterceptorError::InvalidPhase`] for tags outside the set.
    pub fn from_tag(tag: &str) -> Result<Self, InterceptorError> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.tag() == tag)
            .ok_or_else(|| InterceptorError::InvalidPhase(tag.to_string()))
    }

    /// The category of interceptor methods that run in this phase.
    pub fn category(self) -> Category {
        match self {
            Phase::Business | Phase::BusinessWs | Phase::Remove => Category::AroundInvoke,
            Phase::PostConstruct => Category::PostConstruct,
            Phase::PreDestroy => Category::PreDestroy,
            Phase::Activate => Category::PostActivate,
            Phase::Passivate => Category::PrePassivate,
            Phase::AfterBegin => Category::AfterBegin,
            Phase::AfterCompletion => Category::AfterCompletion,
            Phase::BeforeCompletion => Category::BeforeCompletion,
            Phase::Timeout => Category::AroundTimeout,
        }
    }

    /// True for lifecycle callbacks, false for invocation phases.
    pub fn is_lifecycle(self) -> bool {
        !matches!(
            self,
            Phase::Business | Phase::BusinessWs | Phase::Remove | Phase::Timeout
        )
    }
}

impl FromStr for Phase {
    type Err = InterceptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::from_tag(s)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
