//! Reversible actions exposed by the view-models and their argument snapshots

use std::fmt::{self, Display};
use upset_data::{AggregateBy, RenderRow, SelectionEntry, Set, SortBy};

use crate::error::ViewError;

/// Every reversible action of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AddSelection,
    RemoveSelection,
    RemoveSet,
    ApplyFirstAggregation,
    ApplySecondAggregation,
    ApplySortBy,
    ApplyFirstOverlap,
    ApplySecondOverlap,
    ApplyMinDegreeChange,
    ApplyMaxDegreeChange,
    ApplyHideEmpty,
    ApplySortBySet,
    SortByCardinality,
    SortByDeviation,
}

impl Action {
    /// Actions owned by the filter box
    pub const CONFIG_ACTIONS: [Action; 11] = [
        Action::ApplyFirstAggregation,
        Action::ApplySecondAggregation,
        Action::ApplySortBy,
        Action::ApplyFirstOverlap,
        Action::ApplySecondOverlap,
        Action::ApplyMinDegreeChange,
        Action::ApplyMaxDegreeChange,
        Action::ApplyHideEmpty,
        Action::ApplySortBySet,
        Action::SortByCardinality,
        Action::SortByDeviation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::AddSelection => "add-selection",
            Action::RemoveSelection => "remove-selection",
            Action::RemoveSet => "remove_set",
            Action::ApplyFirstAggregation => "applyFirstAggregation",
            Action::ApplySecondAggregation => "applySecondAggregation",
            Action::ApplySortBy => "applySortBy",
            Action::ApplyFirstOverlap => "applyFirstOverlap",
            Action::ApplySecondOverlap => "applySecondOverlap",
            Action::ApplyMinDegreeChange => "applyMinDegreeChange",
            Action::ApplyMaxDegreeChange => "applyMaxDegreeChange",
            Action::ApplyHideEmpty => "applyHideEmpty",
            Action::ApplySortBySet => "applySortBySet",
            Action::SortByCardinality => "sortByCardinality",
            Action::SortByDeviation => "sortByDeviation",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A captured argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ActionArg {
    Row(RenderRow),
    Index(usize),
    Selection(SelectionEntry),
    Set(Set),
    Aggregation(AggregateBy),
    Sort(SortBy),
    Count(usize),
    Bound(Option<usize>),
    Flag(bool),
}

/// Typed positional access to a handler's arguments
pub trait ArgsExt {
    fn row(&self, position: usize) -> Result<&RenderRow, ViewError>;
    fn index(&self, position: usize) -> Result<usize, ViewError>;
    fn selection(&self, position: usize) -> Result<&SelectionEntry, ViewError>;
    fn set(&self, position: usize) -> Result<&Set, ViewError>;
    fn aggregation(&self, position: usize) -> Result<AggregateBy, ViewError>;
    fn sort_order(&self, position: usize) -> Result<SortBy, ViewError>;
    fn count(&self, position: usize) -> Result<usize, ViewError>;
    fn bound(&self, position: usize) -> Result<Option<usize>, ViewError>;
    fn flag(&self, position: usize) -> Result<bool, ViewError>;
}

macro_rules! arg_accessors {
    ($($method:ident => $variant:ident : $ret:ty = $conv:expr),* $(,)?) => {
        impl ArgsExt for [ActionArg] {
            $(
                fn $method(&self, position: usize) -> Result<$ret, ViewError> {
                    match self.get(position) {
                        Some(ActionArg::$variant(value)) => Ok($conv(value)),
                        _ => Err(ViewError::ArgumentMismatch {
                            position,
                            expected: stringify!($variant),
                        }),
                    }
                }
            )*
        }
    };
}

arg_accessors!(
    row => Row: &RenderRow = |v| v,
    index => Index: usize = |v: &usize| *v,
    selection => Selection: &SelectionEntry = |v| v,
    set => Set: &Set = |v| v,
    aggregation => Aggregation: AggregateBy = |v: &AggregateBy| *v,
    sort_order => Sort: SortBy = |v: &SortBy| *v,
    count => Count: usize = |v: &usize| *v,
    bound => Bound: Option<usize> = |v: &Option<usize>| *v,
    flag => Flag: bool = |v: &bool| *v,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(Action::AddSelection.to_string(), "add-selection");
        assert_eq!(Action::RemoveSet.to_string(), "remove_set");
        assert_eq!(Action::ApplySortBySet.to_string(), "applySortBySet");
    }

    #[test]
    fn test_typed_access() {
        let args = vec![ActionArg::Index(3), ActionArg::Flag(true)];
        assert_eq!(args.index(0).unwrap(), 3);
        assert!(args.flag(1).unwrap());
    }

    #[test]
    fn test_mismatched_or_missing_argument() {
        let args = vec![ActionArg::Count(1)];
        assert!(matches!(
            args.index(0),
            Err(ViewError::ArgumentMismatch { position: 0, expected: "Index" })
        ));
        assert!(matches!(args.flag(4), Err(ViewError::ArgumentMismatch { position: 4, .. })));
    }
}
