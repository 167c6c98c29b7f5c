//! Generator registry keyed by directive name and shape.
//!
//! A directive name holds at most one generator per [`Shape`]. Registration
//! classifies each callable once, from its signature and the kind it is
//! registered for; dispatch is then a plain lookup on the declaration's kind.
//!
//! # Example
//! ```rust,ignore
//! let mut registry = Registry::new();
//! registry.register_package("manifest", manifest)?;
//! registry.register_struct("templater", templater)?;
//! registry.register_interface("templater", templater)?;
//!
//! // Layer caller generators over the defaults.
//! registry.merge(&custom, Precedence::TheirsOverOurs);
//! ```

use crate::declaration::Kind;
use crate::error::{RegistryError, RegistryResult};
use crate::generator::{Generator, PackageGenerator, TypeGenerator};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The category of declaration a registered generator handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Package,
    Struct,
    Interface,
}

impl Shape {
    /// The shape that serves declarations of `kind`, if any.
    pub fn for_kind(kind: Kind) -> Option<Self> {
        match kind {
            Kind::Package => Some(Self::Package),
            Kind::Struct => Some(Self::Struct),
            Kind::Interface => Some(Self::Interface),
            Kind::Function => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Struct => "struct",
            Self::Interface => "interface",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side wins when both registries have the same `(name, shape)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precedence {
    /// Keep the destination's entry.
    #[default]
    #[serde(rename = "ours")]
    OursOverTheirs,
    /// Replace the destination's entry with the source's.
    #[serde(rename = "theirs")]
    TheirsOverOurs,
}

/// Result of looking up a directive for a declaration kind.
#[derive(Debug)]
pub enum Lookup<'a> {
    /// No generator is registered under the name.
    Unknown,
    /// The name is registered, but not for this kind.
    NoShape,
    /// The generator to invoke.
    Found(&'a Generator),
}

/// Mapping from directive name to one generator per shape.
///
/// Built once, optionally merged, then only read. Registration takes
/// `&mut self` and dispatch takes `&self`, so a registry cannot change while
/// it is being dispatched from.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    generators: HashMap<String, BTreeMap<Shape, Generator>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator for a declaration kind.
    ///
    /// Fails with [`RegistryError::UnsupportedSignature`] when the generator's
    /// signature cannot serve `kind`, and with
    /// [`RegistryError::DuplicateGenerator`] when the `(name, shape)` pair is
    /// taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        kind: Kind,
        generator: Generator,
    ) -> RegistryResult<()> {
        let name = name.into();
        if name.trim().is_empty() || name.contains('(') {
            return Err(RegistryError::InvalidName { name });
        }

        let shape = generator
            .shape_for(kind)
            .ok_or_else(|| RegistryError::unsupported(&name, kind, generator.signature()))?;

        if self
            .generators
            .get(&name)
            .is_some_and(|entries| entries.contains_key(&shape))
        {
            return Err(RegistryError::duplicate(name, shape));
        }

        tracing::debug!(name = %name, shape = %shape, "registered generator");
        self.generators
            .entry(name)
            .or_default()
            .insert(shape, generator);
        Ok(())
    }

    /// Register a package-level generator.
    pub fn register_package<G: PackageGenerator>(
        &mut self,
        name: impl Into<String>,
        generator: G,
    ) -> RegistryResult<()> {
        self.register(name, Kind::Package, Generator::package(generator))
    }

    /// Register a generator for struct declarations.
    pub fn register_struct<G: TypeGenerator>(
        &mut self,
        name: impl Into<String>,
        generator: G,
    ) -> RegistryResult<()> {
        self.register(name, Kind::Struct, Generator::typed(generator))
    }

    /// Register a generator for interface declarations.
    pub fn register_interface<G: TypeGenerator>(
        &mut self,
        name: impl Into<String>,
        generator: G,
    ) -> RegistryResult<()> {
        self.register(name, Kind::Interface, Generator::typed(generator))
    }

    /// Get the generator registered for a name and shape.
    pub fn get(&self, name: &str, shape: Shape) -> Option<&Generator> {
        self.generators.get(name)?.get(&shape)
    }

    /// Find the generator to run for a directive on a declaration of `kind`.
    pub fn lookup(&self, name: &str, kind: Kind) -> Lookup<'_> {
        let Some(entries) = self.generators.get(name) else {
            return Lookup::Unknown;
        };
        match Shape::for_kind(kind).and_then(|shape| entries.get(&shape)) {
            Some(generator) => Lookup::Found(generator),
            None => Lookup::NoShape,
        }
    }

    /// Whether any generator is registered under the name.
    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Shapes registered under a name, in order.
    pub fn shapes(&self, name: &str) -> Vec<Shape> {
        self.generators
            .get(name)
            .map(|entries| entries.keys().copied().collect())
            .unwrap_or_default()
    }

    /// All registered directive names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.generators.keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove every generator registered under a name.
    pub fn remove(&mut self, name: &str) -> bool {
        self.generators.remove(name).is_some()
    }

    /// Number of `(name, shape)` entries.
    pub fn len(&self) -> usize {
        self.generators.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Merge `src` into this registry.
    ///
    /// For `(name, shape)` pairs present on both sides, `precedence` decides
    /// which generator survives. Everything else is copied. `src` is left
    /// untouched, and merging the same `src` again changes nothing.
    pub fn merge(&mut self, src: &Registry, precedence: Precedence) {
        for (name, theirs) in &src.generators {
            let ours = self.generators.entry(name.clone()).or_default();
            for (shape, generator) in theirs {
                match (ours.contains_key(shape), precedence) {
                    (true, Precedence::OursOverTheirs) => {
                        tracing::trace!(name = %name, shape = %shape, "merge kept existing generator");
                    }
                    _ => {
                        ours.insert(*shape, generator.clone());
                    }
                }
            }
        }
        tracing::debug!(
            entries = self.len(),
            precedence = ?precedence,
            "merged generator registry"
        );
    }

    /// Consume this registry and return it merged with `src`.
    pub fn merged(mut self, src: &Registry, precedence: Precedence) -> Self {
        self.merge(src, precedence);
        self
    }
}
