//! The validated directive type registry.
//!
//! A registry is built once from a set of [`DirectiveType`]s and never
//! mutated afterwards. Building resolves every composite's nested
//! directives into [`CompositeTemplate`]s and rejects inconsistent
//! metadata, so expansion only ever sees well-formed composites.

use std::collections::HashMap;
use std::sync::Arc;

use rubric_foundation::{Error, ErrorContext, ErrorKind, Result};

use crate::directive::{DirectiveSpec, DirectiveType};
use crate::instance::{DirectiveInstance, assign_indices};

/// A composite type's nested directives, resolved and indexed.
///
/// Templates are shared; expansion works on clones of them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompositeTemplate {
    /// Domain directives in declaration order.
    pub nested: Vec<DirectiveInstance>,
    /// Structural directives in declaration order.
    pub markers: Vec<DirectiveInstance>,
}

/// Registry of directive types.
#[derive(Clone, Debug, Default)]
pub struct DirectiveRegistry {
    types: HashMap<Arc<str>, Arc<DirectiveType>>,
    templates: HashMap<Arc<str>, CompositeTemplate>,
}

impl DirectiveRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Gets a directive type by qualified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<DirectiveType>> {
        self.types.get(name)
    }

    /// Gets a directive type by qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownDirective`] if no such type is registered.
    pub fn lookup(&self, name: &str) -> Result<&Arc<DirectiveType>> {
        self.get(name).ok_or_else(|| Error::unknown_directive(name))
    }

    /// Gets the resolved nested directives of a composite type.
    #[must_use]
    pub fn template(&self, name: &str) -> Option<&CompositeTemplate> {
        self.templates.get(name)
    }

    /// Returns true if a type with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the registered type names in lexicographic order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(AsRef::as_ref).collect();
        names.sort_unstable();
        names
    }

    /// Resolves a single spec into an instance with declaration index 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is unknown or its attributes do not
    /// resolve.
    pub fn instantiate(&self, spec: &DirectiveSpec) -> Result<DirectiveInstance> {
        let directive = self.lookup(&spec.directive)?;
        DirectiveInstance::resolve(directive.clone(), &spec.attributes)
    }

    /// Resolves a field's declared directive list, assigning declaration
    /// indices.
    ///
    /// # Errors
    ///
    /// Returns an error if any spec fails to resolve or a non-repeatable
    /// type is declared more than once.
    pub fn declare(&self, specs: &[DirectiveSpec]) -> Result<Vec<DirectiveInstance>> {
        let mut instances = specs
            .iter()
            .map(|spec| self.instantiate(spec))
            .collect::<Result<Vec<_>>>()?;
        assign_indices(&mut instances)?;
        Ok(instances)
    }
}

/// Collects directive types and validates them into a [`DirectiveRegistry`].
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    types: Vec<DirectiveType>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directive type.
    #[must_use]
    pub fn register(mut self, directive: DirectiveType) -> Self {
        self.types.push(directive);
        self
    }

    /// Adds a directive type in place.
    pub fn add(&mut self, directive: DirectiveType) {
        self.types.push(directive);
    }

    /// Validates the collected types and builds the registry.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DuplicateDirective`] for a name registered twice
    /// - [`ErrorKind::TypeMismatch`] for a default that does not fit its type
    /// - [`ErrorKind::UnknownDirective`] for a nested directive or rule
    ///   target that is not registered
    /// - attribute errors for nested directives that do not resolve
    /// - [`ErrorKind::NotRepeatable`] for a non-repeatable type nested twice
    /// - [`ErrorKind::UnknownAttribute`] for a rule whose source attribute
    ///   is not declared on the composite
    /// - [`ErrorKind::CompositeCycle`] for composites nesting each other
    pub fn build(self) -> Result<DirectiveRegistry> {
        let mut types: HashMap<Arc<str>, Arc<DirectiveType>> = HashMap::new();
        for directive in self.types {
            check_defaults(&directive)?;
            let name = directive.name.clone();
            if types.insert(name.clone(), Arc::new(directive)).is_some() {
                return Err(Error::new(ErrorKind::DuplicateDirective(name.to_string())));
            }
        }

        let mut registry = DirectiveRegistry {
            types,
            templates: HashMap::new(),
        };

        let mut templates = HashMap::new();
        for directive in registry.types.values() {
            let Some(def) = directive.composite_def() else {
                continue;
            };
            let in_composite = |err: Error| {
                err.with_context(ErrorContext::new().with_source(directive.name.as_ref()))
            };

            for rule in &def.overrides {
                registry.lookup(&rule.target).map_err(in_composite)?;
                if !directive.has_attribute(&rule.source) {
                    return Err(in_composite(Error::unknown_attribute(
                        directive.name.as_ref(),
                        rule.source.as_ref(),
                    )));
                }
            }

            let template = CompositeTemplate {
                nested: registry.declare(&def.nested).map_err(in_composite)?,
                markers: registry.declare(&def.markers).map_err(in_composite)?,
            };
            templates.insert(directive.name.clone(), template);
        }
        registry.templates = templates;

        check_acyclic(&registry)?;

        tracing::debug!(
            types = registry.types.len(),
            composites = registry.templates.len(),
            "directive registry built"
        );
        Ok(registry)
    }
}

fn check_defaults(directive: &DirectiveType) -> Result<()> {
    for descriptor in &directive.attributes {
        if let Some(default) = &descriptor.default {
            if !default.conforms_to(&descriptor.ty) {
                return Err(Error::type_mismatch(
                    format!("{}.{}", directive.name, descriptor.name),
                    descriptor.ty.clone(),
                    default.value_type(),
                ));
            }
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Depth-first search over composite nesting; any back edge is a cycle.
fn check_acyclic(registry: &DirectiveRegistry) -> Result<()> {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut path: Vec<&str> = Vec::new();

    let mut roots: Vec<&str> = registry.templates.keys().map(AsRef::as_ref).collect();
    roots.sort_unstable();

    for root in roots {
        visit(registry, root, &mut marks, &mut path)?;
    }
    Ok(())
}

fn visit<'a>(
    registry: &'a DirectiveRegistry,
    name: &'a str,
    marks: &mut HashMap<&'a str, Mark>,
    path: &mut Vec<&'a str>,
) -> Result<()> {
    match marks.get(name) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = path.iter().position(|n| *n == name).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(ToString::to_string).collect();
            cycle.push(name.to_string());
            return Err(Error::new(ErrorKind::CompositeCycle(cycle)));
        }
        None => {}
    }

    let Some(template) = registry.templates.get(name) else {
        marks.insert(name, Mark::Done);
        return Ok(());
    };

    marks.insert(name, Mark::Visiting);
    path.push(name);
    for child in template.nested.iter().chain(&template.markers) {
        visit(registry, child.name(), marks, path)?;
    }
    path.pop();
    marks.insert(name, Mark::Done);
    Ok(())
}
