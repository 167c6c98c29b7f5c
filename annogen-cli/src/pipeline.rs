//! The generate pipeline: scan, classify, dispatch, write.

use crate::classifier::Classifier;
use crate::config::Config;
use crate::error::{ClassifyError, CliResult, WriteError};
use crate::generators;
use crate::scanner::{SourceFile, SourceScanner};
use crate::writer::{FileWriter, WriteResult};
use annogen::{BatchReport, PackageContext, Registry};
use std::path::Path;

/// Everything a generate run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Number of source files scanned.
    pub files: usize,

    /// Number of packages classified.
    pub packages: usize,

    /// Files that could not be parsed. Reported, not fatal.
    pub classify_errors: Vec<ClassifyError>,

    /// Per-declaration dispatch results, write directives already taken.
    pub batch: BatchReport,

    /// One entry per write directive, in dispatch order.
    pub writes: Vec<Result<WriteResult, WriteError>>,
}

impl RunReport {
    /// Declarations whose generators failed.
    pub fn failed_declarations(&self) -> usize {
        self.batch.failed()
    }

    pub fn failed_writes(&self) -> usize {
        self.writes.iter().filter(|w| w.is_err()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_declarations() == 0 && self.failed_writes() == 0
    }
}

/// A configured generate run.
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    registry: Registry,
}

impl Pipeline {
    pub fn new(config: Config, registry: Registry) -> Self {
        Self { config, registry }
    }

    /// Pipeline with the built-in generators, as configured.
    pub fn from_config(config: Config) -> CliResult<Self> {
        Self::with_generators(config, &Registry::new())
    }

    /// Pipeline with the built-ins plus caller generators.
    pub fn with_generators(config: Config, custom: &Registry) -> CliResult<Self> {
        let registry = generators::build_registry(&config.generators, custom)?;
        Ok(Self::new(config, registry))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Discover source files under `input`.
    pub fn scan(&self, input: &Path) -> CliResult<Vec<SourceFile>> {
        let mut scanner =
            SourceScanner::new(input).with_gitignore(self.config.scan.respect_gitignore);
        if let Some(pattern) = &self.config.scan.include {
            scanner = scanner.with_filter(pattern)?;
        }
        scanner.scan()
    }

    /// Scan and classify `input`.
    pub fn classify(&self, input: &Path) -> CliResult<(Vec<PackageContext>, Vec<ClassifyError>)> {
        let files = self.scan(input)?;
        Ok(Classifier::new().classify_all(&files))
    }

    /// Run the whole pipeline over `input`.
    pub fn run(&self, input: &Path) -> CliResult<RunReport> {
        let files = self.scan(input)?;
        let (packages, classify_errors) = Classifier::new().classify_all(&files);

        let target = &self.config.output.dir;
        let mut batch = BatchReport::default();
        for package in &packages {
            batch.extend(self.registry.dispatch_package(target, package));
        }

        let writer = FileWriter::new(target, self.config.output.dry_run);
        let writes = writer.write_all(batch.take_writes());

        tracing::info!(
            files = files.len(),
            packages = packages.len(),
            declarations = batch.results.len(),
            failed = batch.failed(),
            writes = writes.len(),
            "generate finished"
        );

        Ok(RunReport {
            files: files.len(),
            packages: packages.len(),
            classify_errors,
            batch,
            writes,
        })
    }
}
