//! # Transformation Pipelines
//!
//! An ordered chain of grammar transforms ending, if wanted, in an LR(1)
//! parsing table.
//!
//! ## Overview
//!
//! A [`Pipeline`] runs its stages in order against one production set and is
//! all-or-nothing: the first failing stage aborts the run with the set left
//! as that stage left it, and no table is produced. Each run yields a
//! [`PipelineReport`] carrying every transformation each stage logged, which
//! is the explainability trail for the whole preprocessing pass.
//!
//! [`Pipeline::standard`] wires the default order: macro expansion, duplicate
//! removal, unreachable removal, left-recursion removal, left factoring.
//! [`Pipeline::stage`] appends further transforms such as
//! [`UnitExpansion`](crate::transform::UnitExpansion).

use std::fmt;

use crate::error::Error;
use crate::lr::Lr1ParsingTable;
use crate::rule::ProductionSet;
use crate::token::TokenKind;
use crate::transform::{
    DuplicateRemoval, GrammarTransform, LeftFactoring, LeftRecursionRemoval, MacroExpansion,
    SetTransformation, UnreachableRemoval,
};

/// What one stage did to the set.
#[derive(Debug, Clone)]
pub struct StageReport<K> {
    name: &'static str,
    transformations: Vec<SetTransformation<K>>,
}

impl<K: TokenKind> StageReport<K> {
    /// The stage's transform name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The transformations the stage logged, in application order.
    #[must_use]
    pub fn transformations(&self) -> &[SetTransformation<K>] {
        &self.transformations
    }

    /// True when the stage left the set untouched.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.transformations.is_empty()
    }
}

/// The per-stage trail of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport<K> {
    stages: Vec<StageReport<K>>,
}

impl<K: TokenKind> PipelineReport<K> {
    /// All stage reports, in run order.
    #[must_use]
    pub fn stages(&self) -> &[StageReport<K>] {
        &self.stages
    }

    /// Total number of transformations across all stages.
    #[must_use]
    pub fn transformation_count(&self) -> usize {
        self.stages
            .iter()
            .map(|stage| stage.transformations.len())
            .sum()
    }
}

impl<K: TokenKind> fmt::Display for PipelineReport<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, stage) in self.stages.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{}: {} transformation(s)",
                stage.name,
                stage.transformations.len()
            )?;
            for transformation in &stage.transformations {
                for operation in transformation.operations() {
                    write!(f, "\n  {operation}")?;
                }
            }
        }
        Ok(())
    }
}

/// An ordered transform chain over one production set.
pub struct Pipeline<K> {
    stages: Vec<Box<dyn GrammarTransform<K>>>,
}

impl<K: TokenKind> Pipeline<K> {
    /// A pipeline with no stages.
    #[must_use]
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// The default preprocessing chain: macro expansion, duplicate removal,
    /// unreachable removal, left-recursion removal, left factoring.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .stage(MacroExpansion)
            .stage(DuplicateRemoval)
            .stage(UnreachableRemoval)
            .stage(LeftRecursionRemoval)
            .stage(LeftFactoring)
    }

    /// Append a stage.
    #[must_use]
    pub fn stage(mut self, transform: impl GrammarTransform<K> + 'static) -> Self {
        self.stages.push(Box::new(transform));
        self
    }

    /// Number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Run every stage in order against `set`.
    ///
    /// The first failing stage aborts the run; earlier stages stay applied.
    pub fn run(&self, set: &mut ProductionSet<K>) -> Result<PipelineReport<K>, Error<K>> {
        let mut stages = Vec::with_capacity(self.stages.len());
        for transform in &self.stages {
            let transformations = transform.execute(set)?;
            stages.push(StageReport {
                name: transform.name(),
                transformations,
            });
        }
        Ok(PipelineReport { stages })
    }

    /// Run every stage, augment the set, and build the parsing table.
    pub fn build_table(&self, set: &mut ProductionSet<K>) -> Result<Lr1ParsingTable<K>, Error<K>> {
        self.run(set)?;
        set.augment()?;
        Ok(Lr1ParsingTable::build(set)?)
    }
}

impl<K: TokenKind> Default for Pipeline<K> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<K: TokenKind> fmt::Debug for Pipeline<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|stage| stage.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;
    use crate::rule::{GrammarDefinition, Sentence};
    use crate::symbol::MacroSymbol;
    use crate::testing::{arithmetic_grammar, ident, non_terminal, plus, rule};
    use crate::transform::TransformError;

    #[test]
    fn test_standard_order() {
        let pipeline: Pipeline<crate::testing::DemoKind> = Pipeline::standard();
        assert_eq!(format!("{pipeline:?}"), "[\"macro expansion\", \"duplicate removal\", \"unreachable removal\", \"left recursion removal\", \"left factoring\"]");
    }

    #[test]
    fn test_run_reports_one_stage_per_transform() {
        let mut set = arithmetic_grammar();
        let report = Pipeline::standard().run(&mut set).expect("run");

        assert_eq!(report.stages().len(), 5);
        assert_eq!(report.stages()[0].name(), "macro expansion");
        assert!(report.stages()[0].is_noop());
        // The grammar is directly left-recursive, so that stage did work.
        assert!(!report.stages()[3].is_noop());
        assert!(report.transformation_count() > 0);
    }

    #[test]
    fn test_build_table_ends_with_a_usable_table() {
        let expr = non_terminal("Expr");
        let optional = MacroSymbol::optional(Sentence::new([
            Symbol::Terminal(plus()),
            Symbol::NonTerminal(expr.clone()),
        ]))
        .expect("optional");
        let mut set = GrammarDefinition::new(expr.clone())
            .rule(
                expr,
                [Symbol::Terminal(ident()), Symbol::Macro(optional)],
            )
            .into_set();

        let table = Pipeline::standard().build_table(&mut set).expect("table");
        assert!(set.is_augmented());
        assert!(!set.contains_macro());
        assert!(table.state_count() > 1);
    }

    #[test]
    fn test_failing_stage_aborts_the_run() {
        // No start symbol: unreachable removal cannot run.
        let mut set: ProductionSet<crate::testing::DemoKind> = ProductionSet::new();
        set.push(rule("A", [Symbol::Terminal(ident())]));

        let result = Pipeline::standard().run(&mut set);
        assert!(matches!(
            result,
            Err(Error::Transform(TransformError::MissingStart))
        ));
    }

    #[test]
    fn test_empty_pipeline_only_augments_and_builds() {
        let mut set = GrammarDefinition::new(non_terminal("S"))
            .rule(non_terminal("S"), [Symbol::Terminal(ident())])
            .into_set();
        let table = Pipeline::empty().build_table(&mut set).expect("table");
        assert_eq!(table.state_count(), 2);
    }
}
