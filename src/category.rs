//! Interceptor method categories and their marker attributes.

use std::fmt;

use crate::phase::Phase;

/// Kind of interceptor method, one per marker attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    AroundInvoke,
    PostConstruct,
    PreDestroy,
    PostActivate,
    PrePassivate,
    AfterBegin,
    BeforeCompletion,
    AfterCompletion,
    AroundTimeout,
}

impl Category {
    pub const COUNT: usize = 9;

    /// All categories, in the order the scanner discovers them.
    pub const ALL: [Category; Category::COUNT] = [
        Category::AroundInvoke,
        Category::PostConstruct,
        Category::PreDestroy,
        Category::PostActivate,
        Category::PrePassivate,
        Category::AfterBegin,
        Category::BeforeCompletion,
        Category::AfterCompletion,
        Category::AroundTimeout,
    ];

    /// Name of the marker attribute placed on methods of this category.
    pub fn marker(self) -> &'static str {
        match self {
            Category::AroundInvoke => "around_invoke",
            Category::PostConstruct => "post_construct",
            Category::PreDestroy => "pre_destroy",
            Category::PostActivate => "post_activate",
            Category::PrePassivate => "pre_passivate",
            Category::AfterBegin => "after_begin",
            Category::BeforeCompletion => "before_completion",
            Category::AfterCompletion => "after_completion",
            Category::AroundTimeout => "around_timeout",
        }
    }

    /// Looks up the category for a marker attribute name.
    pub fn from_marker(marker: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.marker() == marker)
    }

    /// Phases that route to this category.
    pub fn phases(self) -> &'static [Phase] {
        match self {
            Category::AroundInvoke => &[Phase::Business, Phase::BusinessWs, Phase::Remove],
            Category::PostConstruct => &[Phase::PostConstruct],
            Category::PreDestroy => &[Phase::PreDestroy],
            Category::PostActivate => &[Phase::Activate],
            Category::PrePassivate => &[Phase::Passivate],
            Category::AfterBegin => &[Phase::AfterBegin],
            Category::BeforeCompletion => &[Phase::BeforeCompletion],
            Category::AfterCompletion => &[Phase::AfterCompletion],
            Category::AroundTimeout => &[Phase::Timeout],
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_phase_routes_to_exactly_one_category() {
        for phase in Phase::ALL {
            let owners: Vec<_> = Category::ALL
                .into_iter()
                .filter(|c| c.phases().contains(&phase))
                .collect();
            assert_eq!(owners, vec![phase.category()], "phase {}", phase);
        }
    }

    #[test]
    fn test_marker_lookup() {
        for category in Category::ALL {
            assert_eq!(Category::from_marker(category.marker()), Some(category));
        }
        assert_eq!(Category::from_marker("around_construct"), None);
    }

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, category) in Category::ALL.into_iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
