//! The expansion engine.
//!
//! Turns a field's declared directive list into an ordered tree of
//! [`ExpandedNode`]s. For every composite, in order:
//!
//! 1. take a fresh working copy of its nested directives
//! 2. forward shared attributes into that copy
//! 3. apply the composite type's override rules to it
//! 4. expand each working child recursively and sort the result
//! 5. append the composite type's structural directives
//!
//! The top-level result is sorted last. Any failure aborts the whole call.

use std::sync::Arc;

use rubric_foundation::{Error, ErrorContext, ErrorKind, Origin, Result};
use rubric_schema::{DirectiveInstance, DirectiveRegistry, Occurrence, OverrideRule};
use tracing::{debug, trace};

use crate::config::ExpanderConfig;
use crate::introspect::Introspector;
use crate::node::ExpandedNode;
use crate::ordering::{DirectiveOrdering, PriorityOrdering};

/// Expands directive lists against a registry.
#[derive(Clone, Debug)]
pub struct Expander<'r> {
    introspector: Introspector<'r>,
    config: ExpanderConfig,
    ordering: Arc<dyn DirectiveOrdering>,
}

impl<'r> Expander<'r> {
    /// Creates an expander with the default configuration.
    #[must_use]
    pub fn new(registry: &'r DirectiveRegistry) -> Self {
        Self::with_config(registry, ExpanderConfig::default())
    }

    /// Creates an expander with the given configuration.
    ///
    /// Siblings are ordered by [`PriorityOrdering`] on the configured
    /// priority attribute.
    #[must_use]
    pub fn with_config(registry: &'r DirectiveRegistry, config: ExpanderConfig) -> Self {
        let ordering = Arc::new(PriorityOrdering::new(config.priority_attribute.clone()));
        Self {
            introspector: Introspector::new(registry),
            config,
            ordering,
        }
    }

    /// Replaces the sibling ordering.
    #[must_use]
    pub fn with_ordering(mut self, ordering: impl DirectiveOrdering + 'static) -> Self {
        self.ordering = Arc::new(ordering);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ExpanderConfig {
        &self.config
    }

    /// Expands a declared directive list.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::OverrideTargetMissing`] if a rule targets an attribute
    ///   the addressed child does not declare
    /// - [`ErrorKind::OverrideTypeMismatch`] if the target attribute cannot
    ///   hold the composite attribute's type
    /// - [`ErrorKind::OverrideOccurrenceMissing`] if strict occurrence
    ///   checking is on and a rule's index matches no child
    /// - [`ErrorKind::Internal`] if a composite instance's type is not the
    ///   registered definition of its name
    ///
    /// Errors carry the chain of composites being expanded.
    pub fn expand(&self, directives: &[DirectiveInstance]) -> Result<Vec<ExpandedNode>> {
        let mut stack = Vec::new();
        self.expand_list(directives.to_vec(), &mut stack)
    }

    /// Expands the directives declared on a field, naming the field in
    /// any error.
    ///
    /// # Errors
    ///
    /// Same as [`Expander::expand`].
    pub fn expand_field(
        &self,
        field: &str,
        directives: &[DirectiveInstance],
    ) -> Result<Vec<ExpandedNode>> {
        debug!(field, count = directives.len(), "expanding field directives");
        self.expand(directives).map_err(|err| {
            let context = err.context.clone().unwrap_or_default().with_field(field);
            err.with_context(context)
        })
    }

    fn expand_list(
        &self,
        directives: Vec<DirectiveInstance>,
        stack: &mut Vec<Arc<str>>,
    ) -> Result<Vec<ExpandedNode>> {
        let mut nodes = directives
            .into_iter()
            .map(|instance| self.expand_one(instance, stack))
            .collect::<Result<Vec<_>>>()?;
        nodes.sort_by(|a, b| self.ordering.compare(&a.instance, &b.instance));
        trace!(
            order = ?nodes.iter().map(ExpandedNode::name).collect::<Vec<_>>(),
            "sorted siblings"
        );
        Ok(nodes)
    }

    fn expand_one(
        &self,
        instance: DirectiveInstance,
        stack: &mut Vec<Arc<str>>,
    ) -> Result<ExpandedNode> {
        if !instance.is_composite() {
            return Ok(ExpandedNode::leaf(instance));
        }

        let introspection = self.introspector.introspect(&instance);
        let Some(parts) = introspection.composite else {
            return Err(Error::new(ErrorKind::Internal(format!(
                "composite directive {} is not the registered definition of that name",
                instance.name()
            )))
            .with_context(frames(stack)));
        };

        stack.push(instance.directive.name.clone());
        debug!(
            composite = instance.name(),
            nested = parts.nested.len(),
            rules = parts.overrides.len(),
            "expanding composite"
        );

        let mut working = parts.nested;
        self.propagate(&instance, &parts.overrides, &mut working);
        self.apply_overrides(&instance, &parts.overrides, &mut working)
            .map_err(|err| err.with_context(frames(stack)))?;

        let mut children = self.expand_list(working, stack)?;
        children.extend(parts.markers.into_iter().map(ExpandedNode::leaf));

        stack.pop();
        Ok(ExpandedNode::composite(instance, children))
    }

    /// Copies shared attribute values from the composite into every child
    /// that declares a compatible attribute of the same name.
    ///
    /// A name is skipped when the composite type does not declare it, when
    /// its value is empty (unless configured otherwise), or when one of the
    /// composite's override rules is sourced from it.
    fn propagate(
        &self,
        composite: &DirectiveInstance,
        rules: &[OverrideRule],
        children: &mut [DirectiveInstance],
    ) {
        for name in self.config.shared_attributes.iter() {
            if rules.iter().any(|rule| rule.source.as_ref() == name) {
                continue;
            }
            let Some(source) = composite.directive.attribute(name) else {
                continue;
            };
            let Some(value) = composite.get(name) else {
                continue;
            };
            if value.is_empty() && !self.config.propagate_empty_shared {
                continue;
            }

            for child in children.iter_mut() {
                if !child.directive.category.is_domain() {
                    continue;
                }
                let compatible = child
                    .directive
                    .attribute(name)
                    .is_some_and(|target| target.ty.accepts(&source.ty));
                if compatible {
                    trace!(attribute = name, child = child.name(), "propagated shared attribute");
                    child.attributes.set(name, value.clone(), Origin::Propagated);
                }
            }
        }
    }

    /// Writes each rule's source value into the addressed children.
    fn apply_overrides(
        &self,
        composite: &DirectiveInstance,
        rules: &[OverrideRule],
        children: &mut [DirectiveInstance],
    ) -> Result<()> {
        for rule in rules {
            let source = composite
                .directive
                .attribute(&rule.source)
                .ok_or_else(|| Error::unknown_attribute(composite.name(), rule.source.as_ref()))?;
            let value = composite
                .get(&rule.source)
                .ok_or_else(|| Error::missing_attribute(composite.name(), rule.source.as_ref()))?;
            let attribute = rule.target_attribute();

            let mut matched = false;
            for child in children
                .iter_mut()
                .filter(|child| rule.matches(child.name(), child.index))
            {
                matched = true;
                let Some(target) = child.directive.attribute(attribute) else {
                    return Err(Error::new(ErrorKind::OverrideTargetMissing {
                        composite: composite.name().to_string(),
                        rule: rule.source.to_string(),
                        target: rule.target.to_string(),
                        index: child.index,
                        attribute: attribute.to_string(),
                    }));
                };
                if !target.ty.accepts(&source.ty) {
                    return Err(Error::new(ErrorKind::OverrideTypeMismatch {
                        composite: composite.name().to_string(),
                        rule: rule.source.to_string(),
                        target: rule.target.to_string(),
                        attribute: attribute.to_string(),
                        expected: target.ty.clone(),
                        actual: source.ty.clone(),
                    }));
                }
                debug!(
                    composite = composite.name(),
                    rule = %rule,
                    value = %value,
                    "applied override"
                );
                child.attributes.set(attribute, value.clone(), Origin::Overridden);
            }

            if !matched {
                if let (true, Occurrence::Index(index)) =
                    (self.config.strict_occurrences, rule.occurrence)
                {
                    return Err(Error::new(ErrorKind::OverrideOccurrenceMissing {
                        composite: composite.name().to_string(),
                        rule: rule.source.to_string(),
                        target: rule.target.to_string(),
                        index,
                    }));
                }
                debug!(
                    composite = composite.name(),
                    rule = %rule,
                    "override rule matched no child"
                );
            }
        }
        Ok(())
    }
}

fn frames(stack: &[Arc<str>]) -> ErrorContext {
    stack
        .iter()
        .fold(ErrorContext::new(), |context, frame| context.with_frame(frame.as_ref()))
}
