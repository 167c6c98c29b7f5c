//! Shared generators and a call-recording spy for the registry tests.

use crate::{
    Declaration, Directive, GeneratorError, GeneratorResult, Kind, PackageContext,
    WriteDirective,
};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// A recorded generator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub generator: &'static str,
    pub directive: String,
    pub declaration: String,
    pub target_dir: String,
}

/// Spy that records every call made through the generators it hands out.
#[derive(Debug, Clone, Default)]
pub struct Spy {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Spy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, generator: &'static str, target_dir: &Path, directive: &Directive, decl: &Declaration) {
        self.calls.lock().unwrap().push(Call {
            generator,
            directive: directive.name.clone(),
            declaration: decl.name.clone(),
            target_dir: target_dir.display().to_string(),
        });
    }

    /// Package generator writing `<package>.<directive>`.
    pub fn package(
        &self,
        tag: &'static str,
    ) -> impl Fn(&Path, &Directive, &Declaration) -> GeneratorResult<Vec<WriteDirective>>
           + Send
           + Sync
           + 'static {
        let spy = self.clone();
        move |dir: &Path, directive: &Directive, package: &Declaration| {
            spy.record(tag, dir, directive, package);
            Ok(vec![WriteDirective::new(
                "",
                format!("{}.{}", package.name, directive.name),
                tag,
            )])
        }
    }

    /// Type generator writing `<package>/<declaration>.<directive>`.
    pub fn typed(
        &self,
        tag: &'static str,
    ) -> impl Fn(&Path, &Directive, &Declaration, &PackageContext) -> GeneratorResult<Vec<WriteDirective>>
           + Send
           + Sync
           + 'static {
        let spy = self.clone();
        move |dir: &Path, directive: &Directive, decl: &Declaration, pkg: &PackageContext| {
            spy.record(tag, dir, directive, decl);
            Ok(vec![WriteDirective::new(
                pkg.package.name.clone(),
                format!("{}.{}", decl.name, directive.name),
                tag,
            )])
        }
    }

    /// Type generator that records the call and then fails.
    pub fn failing(
        &self,
        tag: &'static str,
    ) -> impl Fn(&Path, &Directive, &Declaration, &PackageContext) -> GeneratorResult<Vec<WriteDirective>>
           + Send
           + Sync
           + 'static {
        let spy = self.clone();
        move |dir: &Path, directive: &Directive, decl: &Declaration, _: &PackageContext| {
            spy.record(tag, dir, directive, decl);
            Err(GeneratorError::message(format!("{} exploded", tag)))
        }
    }
}

/// A `models` package with no members.
pub fn package(comment: &str) -> PackageContext {
    PackageContext::new(Declaration::from_comment(Kind::Package, "models", comment))
}
