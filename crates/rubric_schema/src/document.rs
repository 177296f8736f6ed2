//! JSON schema and field documents.
//!
//! A [`SchemaDocument`] describes directive types; a [`FieldDocument`]
//! describes the directives declared on the fields of one record type.
//! Attribute values are written as plain JSON and converted using the
//! declared attribute type, so `"Read"` becomes a symbol where a symbol
//! is expected and a string elsewhere.
//!
//! ```json
//! {
//!   "directives": [
//!     { "name": "LengthMax", "repeatable": true,
//!       "attributes": [{ "name": "value", "type": "int" },
//!                      { "name": "order", "type": "int", "default": 0 }] },
//!     { "name": "Username",
//!       "attributes": [{ "name": "maxLength", "type": "int", "default": 64 }],
//!       "nested": [{ "type": "LengthMax", "attributes": { "value": 64 } }],
//!       "overrides": [{ "attribute": "maxLength", "target": "LengthMax", "name": "value" }] }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rubric_foundation::{Error, ErrorContext, ErrorKind, Result, Type, Value};
use serde::{Deserialize, Serialize};

use crate::directive::{AttributeDescriptor, Category, DirectiveSpec, DirectiveType};
use crate::instance::DirectiveInstance;
use crate::registry::{DirectiveRegistry, RegistryBuilder};
use crate::rule::{Occurrence, OverrideRule};

// =============================================================================
// Schema Documents
// =============================================================================

/// A set of directive type definitions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Directive type definitions.
    #[serde(default)]
    pub directives: Vec<DirectiveDoc>,
}

/// One directive type definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectiveDoc {
    /// Qualified name.
    pub name: String,
    /// Broad role.
    #[serde(default)]
    pub category: Category,
    /// Whether the type may occur several times in one list.
    #[serde(default)]
    pub repeatable: bool,
    /// Declares the type composite even with nothing nested.
    #[serde(default)]
    pub composite: bool,
    /// Attribute descriptors.
    #[serde(default)]
    pub attributes: Vec<AttributeDoc>,
    /// Nested domain directives.
    #[serde(default)]
    pub nested: Vec<DirectiveUseDoc>,
    /// Nested structural directives.
    #[serde(default)]
    pub markers: Vec<DirectiveUseDoc>,
    /// Override rules on the type's own attributes.
    #[serde(default)]
    pub overrides: Vec<OverrideDoc>,
}

/// One attribute descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeDoc {
    /// Attribute name.
    pub name: String,
    /// Attribute type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Default value; absent means the attribute is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

/// A directive occurrence: type name plus explicit attribute values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectiveUseDoc {
    /// Qualified type name.
    #[serde(rename = "type")]
    pub directive: String,
    /// Explicit attribute values.
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

/// An override rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverrideDoc {
    /// The composite's own attribute.
    pub attribute: String,
    /// Target directive type.
    pub target: String,
    /// Target attribute; defaults to `attribute`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Target occurrence; defaults to 0, negative means every occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

impl SchemaDocument {
    /// Parses a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SchemaError`] if the text is not a valid document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::new(ErrorKind::SchemaError(e.to_string())))
    }

    /// Converts every definition into a [`DirectiveType`].
    ///
    /// Nested attribute values are converted using the referenced type's
    /// declared attribute types. Values naming unknown types or attributes
    /// are converted by shape and left for registry validation to reject.
    ///
    /// # Errors
    ///
    /// Returns an error if a value does not fit its declared type.
    pub fn to_types(&self) -> Result<Vec<DirectiveType>> {
        let shells = self
            .directives
            .iter()
            .map(DirectiveDoc::to_shell)
            .collect::<Result<Vec<_>>>()?;
        let by_name: HashMap<&str, &DirectiveType> =
            shells.iter().map(|t| (t.name.as_ref(), t)).collect();
        let find = |name: &str| by_name.get(name).copied();

        let mut types = Vec::with_capacity(shells.len());
        for (doc, shell) in self.directives.iter().zip(&shells) {
            let in_doc = |err: Error| err.with_context(ErrorContext::new().with_source(&doc.name));
            let mut directive = shell.clone();
            for nested in &doc.nested {
                directive = directive.with_nested(nested.to_spec(find).map_err(in_doc)?);
            }
            for marker in &doc.markers {
                directive = directive.with_marker(marker.to_spec(find).map_err(in_doc)?);
            }
            for rule in &doc.overrides {
                directive = directive.with_override(rule.to_rule());
            }
            types.push(directive);
        }
        Ok(types)
    }

    /// Converts and validates the document into a registry.
    ///
    /// # Errors
    ///
    /// Returns an error if conversion or registry validation fails.
    pub fn into_registry(&self) -> Result<DirectiveRegistry> {
        let mut builder = RegistryBuilder::new();
        for directive in self.to_types()? {
            builder.add(directive);
        }
        builder.build()
    }
}

impl DirectiveDoc {
    fn to_shell(&self) -> Result<DirectiveType> {
        let mut directive = if self.composite {
            DirectiveType::composite(self.name.as_str(), self.category)
        } else {
            DirectiveType::atomic(self.name.as_str(), self.category)
        };
        directive.repeatable = self.repeatable;

        for attribute in &self.attributes {
            let descriptor = match &attribute.default {
                Some(json) => {
                    let default = convert(json, &attribute.ty)
                        .map_err(|err| relabel(err, &self.name, &attribute.name))
                        .map_err(|err| err.with_context(ErrorContext::new().with_source(&self.name)))?;
                    AttributeDescriptor::optional(attribute.name.as_str(), attribute.ty.clone(), default)
                }
                None => AttributeDescriptor::required(attribute.name.as_str(), attribute.ty.clone()),
            };
            directive = directive.with_attribute(descriptor);
        }
        Ok(directive)
    }
}

impl DirectiveUseDoc {
    /// Converts the occurrence into a spec, typing values through `find`.
    ///
    /// # Errors
    ///
    /// Returns an error if a value does not fit its declared type.
    pub fn to_spec<'a>(&self, find: impl Fn(&str) -> Option<&'a DirectiveType>) -> Result<DirectiveSpec> {
        let directive = find(&self.directive);
        let mut spec = DirectiveSpec::new(self.directive.as_str());
        for (name, json) in &self.attributes {
            let ty = directive
                .and_then(|d| d.attribute(name))
                .map_or(Type::Any, |a| a.ty.clone());
            let value = convert(json, &ty).map_err(|err| relabel(err, &self.directive, name))?;
            spec = spec.with(name.as_str(), value);
        }
        Ok(spec)
    }
}

impl OverrideDoc {
    fn to_rule(&self) -> OverrideRule {
        let mut rule = OverrideRule::new(self.attribute.as_str(), self.target.as_str());
        if let Some(name) = &self.name {
            rule = rule.attribute(name.as_str());
        }
        rule.occurrence = match self.index {
            None => Occurrence::default(),
            Some(i) => usize::try_from(i).map_or(Occurrence::All, Occurrence::Index),
        };
        rule
    }
}

impl DirectiveRegistry {
    /// Parses, converts, and validates a JSON schema document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        SchemaDocument::from_json(json)?.into_registry()
    }
}

// =============================================================================
// Field Documents
// =============================================================================

/// The directives declared on the fields of one record type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDocument {
    /// Qualified name of the declaring record type.
    pub declaring_type: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDoc>,
}

/// One field and its directly declared directives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDoc {
    /// Field name.
    pub name: String,
    /// Directly declared directives, in declaration order.
    #[serde(default)]
    pub directives: Vec<DirectiveUseDoc>,
}

/// A field with its declared directives resolved against a registry.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclaredField {
    /// Qualified name of the declaring record type.
    pub declaring_type: Arc<str>,
    /// Field name.
    pub name: Arc<str>,
    /// Resolved directives with declaration indices.
    pub directives: Vec<DirectiveInstance>,
}

impl DeclaredField {
    /// Returns `DeclaringType#field`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}#{}", self.declaring_type, self.name)
    }
}

impl FieldDocument {
    /// Parses a field document.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SchemaError`] if the text is not a valid document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::new(ErrorKind::SchemaError(e.to_string())))
    }

    /// Resolves every field's directives against the registry.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error, tagged with the field name.
    pub fn declare(&self, registry: &DirectiveRegistry) -> Result<Vec<DeclaredField>> {
        let declaring_type: Arc<str> = self.declaring_type.as_str().into();
        self.fields
            .iter()
            .map(|field| {
                let qualified = format!("{}#{}", self.declaring_type, field.name);
                let in_field = |err: Error| {
                    let context = err.context.clone().unwrap_or_default().with_field(&qualified);
                    err.with_context(context)
                };
                let specs = field
                    .directives
                    .iter()
                    .map(|d| d.to_spec(|name| registry.get(name).map(|t| &**t)))
                    .collect::<Result<Vec<_>>>()
                    .map_err(in_field)?;
                let directives = registry.declare(&specs).map_err(in_field)?;
                Ok(DeclaredField {
                    declaring_type: declaring_type.clone(),
                    name: field.name.as_str().into(),
                    directives,
                })
            })
            .collect()
    }
}

// =============================================================================
// Value Conversion
// =============================================================================

fn json_type(json: &serde_json::Value) -> Type {
    match json {
        serde_json::Value::Bool(_) => Type::Bool,
        serde_json::Value::Number(n) if n.is_i64() => Type::Int,
        serde_json::Value::Number(_) => Type::Float,
        serde_json::Value::String(_) => Type::String,
        serde_json::Value::Array(items) => {
            Type::list(items.first().map_or(Type::Any, json_type))
        }
        serde_json::Value::Null | serde_json::Value::Object(_) => Type::Any,
    }
}

/// Names the attribute in a conversion type mismatch.
fn relabel(err: Error, directive: &str, attribute: &str) -> Error {
    match err.kind {
        ErrorKind::TypeMismatch { expected, actual, .. } => {
            Error::type_mismatch(format!("{directive}.{attribute}"), expected, actual)
        }
        kind => Error { kind, ..err },
    }
}

/// Converts a JSON value into a [`Value`] of the given type.
fn convert(json: &serde_json::Value, ty: &Type) -> Result<Value> {
    let mismatch = || Error::type_mismatch("value", ty.clone(), json_type(json));

    match (ty, json) {
        (Type::Bool | Type::Any, serde_json::Value::Bool(b)) => Ok(Value::Bool(*b)),
        (Type::Int, serde_json::Value::Number(n)) => n.as_i64().map(Value::Int).ok_or_else(mismatch),
        (Type::Any, serde_json::Value::Number(n)) => Ok(n
            .as_i64()
            .map_or_else(|| Value::Float(n.as_f64().unwrap_or(f64::NAN)), Value::Int)),
        (Type::Float, serde_json::Value::Number(n)) => {
            n.as_f64().map(Value::Float).ok_or_else(mismatch)
        }
        (Type::String | Type::Any, serde_json::Value::String(s)) => Ok(Value::from(s.as_str())),
        (Type::Symbol, serde_json::Value::String(s)) => Ok(Value::symbol(s.as_str())),
        (Type::List(element), serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| convert(item, element))
            .collect::<Result<_>>()
            .map(Value::List),
        (Type::Any, serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| convert(item, &Type::Any))
            .collect::<Result<_>>()
            .map(Value::List),
        _ => Err(mismatch()),
    }
}
