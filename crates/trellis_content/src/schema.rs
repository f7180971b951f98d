//! Schema definitions for content types.
//!
//! A schema lists the fields a content type accepts as creation data. The
//! dublin-core fields (`title`, `description`, `effective`, `expires`) map
//! onto [`Content`]'s own properties; every other field is stored as an
//! attribute.

use trellis_foundation::{Error, ErrorKind, Result, Type, Value};
use trellis_storage::Content;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Schema definition for a content type.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentSchema {
    /// Field definitions.
    pub fields: Vec<FieldSchema>,
}

impl ContentSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the schema shared by all items: a required title and an
    /// optional description.
    #[must_use]
    pub fn item() -> Self {
        Self::new()
            .with_field(FieldSchema::required("title", Type::Text))
            .with_field(FieldSchema::optional("description", Type::Text, Value::from("")))
    }

    /// Adds a field to the schema.
    #[must_use]
    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the field schema by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if the schema declares the field.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Returns the names of the required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }
}

/// Schema definition for a content field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldSchema {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: Type,
    /// Default value if not provided.
    pub default: Option<Value>,
    /// Whether the field is required.
    pub required: bool,
}

impl FieldSchema {
    /// Creates a required field with no default.
    #[must_use]
    pub fn required(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            required: true,
        }
    }

    /// Creates an optional field with a default value.
    #[must_use]
    pub fn optional(name: impl Into<String>, ty: Type, default: Value) -> Self {
        Self {
            name: name.into(),
            ty,
            default: Some(default),
            required: false,
        }
    }

    /// Creates an optional field with no default.
    #[must_use]
    pub fn optional_nil(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            required: false,
        }
    }

    /// Checks a value against the field type.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the field type does not accept the value,
    /// or `MissingArgument` for nil in a required field.
    pub fn validate(&self, value: &Value) -> Result<()> {
        if value.is_nil() && self.required && !self.ty.is_nullable() {
            return Err(Error::new(ErrorKind::MissingArgument(self.name.clone())));
        }
        if !value.is_nil() && !self.ty.accepts(&value.value_type()) {
            return Err(Error::type_mismatch(self.ty.clone(), value.value_type()));
        }
        Ok(())
    }

    /// Validates a value and stores it on the content.
    ///
    /// # Errors
    ///
    /// Fails like [`validate`](Self::validate).
    pub fn set(&self, content: &mut Content, value: &Value) -> Result<()> {
        self.validate(value)?;
        apply_field(content, &self.name, value);
        Ok(())
    }
}

/// Stores a value under a field name, routing the dublin-core fields to the
/// matching content properties.
pub(crate) fn apply_field(content: &mut Content, name: &str, value: &Value) {
    match name {
        "title" => content.set_title(value.as_str().unwrap_or_default()),
        "description" => content.set_description(value.as_str().unwrap_or_default()),
        "effective" => content.set_effective(value.as_datetime()),
        "expires" => content.set_expires(value.as_datetime()),
        _ => content.set_attribute(name, value.clone()),
    }
}
