//! Routing directives on declarations to their generators.
//!
//! [`Registry::dispatch`] handles one declaration. [`Registry::dispatch_package`]
//! fans out over a package's declarations in parallel and collects
//! per-declaration results, so one failing declaration does not block the rest.

use crate::declaration::{Declaration, Kind, PackageContext, Position};
use crate::error::DispatchError;
use crate::registry::{Lookup, Registry};
use crate::write::WriteDirective;
use rayon::prelude::*;
use std::path::Path;

/// Result of dispatching one declaration.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    /// Files produced by the generators, in directive order.
    pub writes: Vec<WriteDirective>,

    /// Non-fatal errors ([`DispatchError::NoGeneratorForKind`]).
    pub errors: Vec<DispatchError>,

    /// Number of generators invoked.
    pub invoked: usize,

    /// Names of directives with no registered generator.
    pub ignored: Vec<String>,
}

impl Registry {
    /// Dispatch every directive attached to `declaration`.
    ///
    /// Unknown directive names are ignored. A name registered only for other
    /// kinds is recorded as [`DispatchError::NoGeneratorForKind`] and the
    /// remaining directives still run. A generator error stops this
    /// declaration and is returned.
    pub fn dispatch(
        &self,
        target_dir: &Path,
        declaration: &Declaration,
        package: &PackageContext,
    ) -> Result<DispatchOutcome, DispatchError> {
        let mut outcome = DispatchOutcome::default();

        for directive in &declaration.directives {
            match self.lookup(&directive.name, declaration.kind) {
                Lookup::Unknown => {
                    tracing::trace!(
                        directive = %directive.name,
                        declaration = %declaration.name,
                        "ignoring unregistered directive"
                    );
                    outcome.ignored.push(directive.name.clone());
                }
                Lookup::NoShape => {
                    tracing::warn!(
                        directive = %directive.name,
                        declaration = %declaration.name,
                        kind = %declaration.kind,
                        "no generator for declaration kind"
                    );
                    outcome.errors.push(DispatchError::NoGeneratorForKind {
                        directive: directive.name.clone(),
                        declaration: declaration.qualified_name(),
                        kind: declaration.kind,
                    });
                }
                Lookup::Found(generator) => {
                    tracing::trace!(
                        directive = %directive.name,
                        declaration = %declaration.name,
                        signature = generator.signature(),
                        "invoking generator"
                    );
                    let writes = generator
                        .invoke(target_dir, directive, declaration, package)
                        .map_err(|source| DispatchError::Generator {
                            directive: directive.name.clone(),
                            declaration: declaration.qualified_name(),
                            source,
                        })?;
                    outcome.invoked += 1;
                    outcome.writes.extend(writes);
                }
            }
        }

        tracing::debug!(
            declaration = %declaration.name,
            invoked = outcome.invoked,
            writes = outcome.writes.len(),
            "dispatched declaration"
        );
        Ok(outcome)
    }

    /// Dispatch the package declaration and every member declaration.
    ///
    /// Declarations without directives are skipped. Declarations are processed
    /// in parallel; results come back in package order.
    pub fn dispatch_package(&self, target_dir: &Path, package: &PackageContext) -> BatchReport {
        let declarations: Vec<(usize, &Declaration)> = std::iter::once(&package.package)
            .chain(package.declarations.iter())
            .enumerate()
            .filter(|(_, decl)| decl.has_directives())
            .collect();

        let results = declarations
            .into_par_iter()
            .map(|(index, declaration)| DeclarationResult {
                index,
                name: declaration.qualified_name(),
                kind: declaration.kind,
                position: declaration.position.clone(),
                outcome: self.dispatch(target_dir, declaration, package),
            })
            .collect();

        BatchReport { results }
    }
}

/// Dispatch result for one declaration in a batch.
#[derive(Debug)]
pub struct DeclarationResult {
    /// Index in the package: 0 is the package itself, then members in order.
    pub index: usize,

    /// Qualified declaration name.
    pub name: String,

    pub kind: Kind,

    pub position: Position,

    pub outcome: Result<DispatchOutcome, DispatchError>,
}

/// Per-declaration results of dispatching a package.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Results in package order.
    pub results: Vec<DeclarationResult>,
}

impl BatchReport {
    /// Append the results of another batch.
    pub fn extend(&mut self, other: BatchReport) {
        self.results.extend(other.results);
    }

    /// Number of declarations whose generators failed.
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_err()).count()
    }

    /// Whether every declaration dispatched without a generator failure.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// All errors, fatal and non-fatal, with the declaration they belong to.
    pub fn errors(&self) -> Vec<(&DeclarationResult, &DispatchError)> {
        let mut errors = Vec::new();
        for result in &self.results {
            match &result.outcome {
                Ok(outcome) => errors.extend(outcome.errors.iter().map(|e| (result, e))),
                Err(error) => errors.push((result, error)),
            }
        }
        errors
    }

    /// Total write directives produced by successful declarations.
    pub fn write_count(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok())
            .map(|o| o.writes.len())
            .sum()
    }

    /// Take the write directives out of every successful declaration.
    pub fn take_writes(&mut self) -> Vec<WriteDirective> {
        self.results
            .iter_mut()
            .filter_map(|r| r.outcome.as_mut().ok())
            .flat_map(|o| std::mem::take(&mut o.writes))
            .collect()
    }
}
