//! Duplicate removal.

use hashbrown::HashSet;

use crate::rule::{ProductionRule, ProductionSet};
use crate::token::TokenKind;
use crate::transform::{GrammarTransform, SetTransformation, TransformError};

/// Removes structurally equal repeats of a production, keeping the first
/// occurrence.
///
/// Duplicates are legal while authoring and show up routinely after macro
/// expansion, but they would inflate every later rewrite and the LR(1)
/// construction. Requires a macro-free set.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateRemoval;

impl<K: TokenKind> GrammarTransform<K> for DuplicateRemoval {
    fn name(&self) -> &'static str {
        "duplicate removal"
    }

    fn execute(
        &self,
        set: &mut ProductionSet<K>,
    ) -> Result<Vec<SetTransformation<K>>, TransformError> {
        set.ensure_macro_free()?;
        set.reset_log();
        let mut seen: HashSet<ProductionRule<K>, ahash::RandomState> = HashSet::default();
        for rule in set.snapshot() {
            if seen.insert(rule.clone()) {
                continue;
            }
            set.transformation("remove duplicate")
                .remove_production(rule)
                .note("structurally equal occurrence")
                .build()?;
        }
        Ok(set.log().to_vec())
    }
}
