//! Unit production expansion.

use hashbrown::HashSet;

use crate::rule::{ProductionRule, ProductionSet, Sentence};
use crate::symbol::{NonTerminal, Symbol};
use crate::token::TokenKind;
use crate::transform::{GrammarTransform, SetTransformation, TransformError};

type ExpandedPairs = HashSet<(NonTerminal, NonTerminal), ahash::RandomState>;

/// Inlines unit productions `A -> B` by substituting the bodies of `B`.
///
/// Cyclic unit chains terminate through an ignore set of `(A, B)` pairs:
/// each pair is expanded at most once, and replacement bodies that would
/// recreate an expanded pair, or collapse to `A -> A`, are dropped. A unit
/// whose target has no productions is an error. Requires a macro-free set.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitExpansion;

impl<K: TokenKind> GrammarTransform<K> for UnitExpansion {
    fn name(&self) -> &'static str {
        "unit expansion"
    }

    fn execute(
        &self,
        set: &mut ProductionSet<K>,
    ) -> Result<Vec<SetTransformation<K>>, TransformError> {
        set.ensure_macro_free()?;
        set.reset_log();
        let mut expanded = ExpandedPairs::default();
        while let Some((unit, target)) = next_unit(set, &expanded) {
            let head = unit.head().clone();
            expanded.insert((head.clone(), target.clone()));

            let bodies: Vec<Sentence<K>> = set
                .productions_of_required(&target)?
                .into_iter()
                .map(|alternative| alternative.body().clone())
                .collect();
            let replacements: Vec<ProductionRule<K>> = bodies
                .into_iter()
                .filter(|body| keep_replacement(&head, body, &expanded))
                .map(|body| ProductionRule::new(head.clone(), body))
                .collect();

            set.transformation("expand unit")
                .remove_production(unit)
                .add_missing_productions(replacements)
                .build()?;
        }
        Ok(set.log().to_vec())
    }
}

fn single_non_terminal<K: TokenKind>(body: &Sentence<K>) -> Option<&NonTerminal> {
    if body.len() != 1 {
        return None;
    }
    body.first_symbol().and_then(Symbol::as_non_terminal)
}

fn next_unit<K: TokenKind>(
    set: &ProductionSet<K>,
    expanded: &ExpandedPairs,
) -> Option<(ProductionRule<K>, NonTerminal)> {
    set.rules().iter().find_map(|rule| {
        let target = single_non_terminal(rule.body())?;
        if target == rule.head() || expanded.contains(&(rule.head().clone(), target.clone())) {
            return None;
        }
        Some((rule.clone(), target.clone()))
    })
}

fn keep_replacement<K: TokenKind>(
    head: &NonTerminal,
    body: &Sentence<K>,
    expanded: &ExpandedPairs,
) -> bool {
    let Some(target) = single_non_terminal(body) else {
        return true;
    };
    target != head && !expanded.contains(&(head.clone(), target.clone()))
}
