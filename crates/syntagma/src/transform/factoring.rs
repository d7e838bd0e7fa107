//! Left factoring.

use crate::rule::{ProductionRule, ProductionSet, Sentence};
use crate::symbol::Symbol;
use crate::token::TokenKind;
use crate::transform::{GrammarTransform, SetTransformation, TransformError};

/// Factors out common leading symbols among alternatives of one head.
///
/// Alternatives `H -> α β₁ | α β₂ | …` sharing a first symbol, terminal or
/// non-terminal, are replaced by `H -> α H′` plus one `H′ -> βᵢ` per
/// alternative, with `H′` a fresh primed non-terminal. An empty suffix
/// becomes the empty body. Runs to a fixed point, so freshly introduced
/// heads get factored too. Requires a macro-free set.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeftFactoring;

impl<K: TokenKind> GrammarTransform<K> for LeftFactoring {
    fn name(&self) -> &'static str {
        "left factoring"
    }

    fn execute(
        &self,
        set: &mut ProductionSet<K>,
    ) -> Result<Vec<SetTransformation<K>>, TransformError> {
        set.ensure_macro_free()?;
        set.reset_log();

        while let Some(members) = next_group(set) {
            factor_group(set, &members)?;
        }
        Ok(set.log().to_vec())
    }
}

/// The first group of two or more rules sharing head and first symbol, in
/// rule order.
fn next_group<K: TokenKind>(set: &ProductionSet<K>) -> Option<Vec<ProductionRule<K>>> {
    for rule in set.rules() {
        let Some(first) = rule.body().first_symbol() else {
            continue;
        };
        let members: Vec<ProductionRule<K>> = set
            .rules()
            .iter()
            .filter(|candidate| {
                candidate.head() == rule.head() && candidate.body().first_symbol() == Some(first)
            })
            .cloned()
            .collect();
        if members.len() > 1 {
            return Some(members);
        }
    }
    None
}

fn factor_group<K: TokenKind>(
    set: &mut ProductionSet<K>,
    members: &[ProductionRule<K>],
) -> Result<(), TransformError> {
    let Some(template) = members.first() else {
        return Ok(());
    };
    let Some(first) = template.body().first_symbol().cloned() else {
        return Ok(());
    };
    let derived = template.head().derived(&set.non_terminals());

    let factored = ProductionRule::new(
        template.head().clone(),
        Sentence::new([first, Symbol::NonTerminal(derived.clone())]),
    );
    let suffixes: Vec<ProductionRule<K>> = members
        .iter()
        .map(|member| ProductionRule::new(derived.clone(), member.body().suffix_from(1)))
        .collect();

    set.transformation("factor common prefix")
        .remove_productions(members.to_vec())
        .add_production(factored)
        .add_missing_productions(suffixes)
        .build()
}
