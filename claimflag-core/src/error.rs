//! Error types for flag definition parsing

use thiserror::Error;

/// Validation failures raised while reading a flag definition.
///
/// Serialization never fails; every variant here is produced on the
/// deserialize path. Messages name the definition, key and/or value involved
/// so the author of the configuration can locate the problem directly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("No permissions found for flag definition '{definition}'. You must specify at least 1 or more permissions.")]
    MissingPermissions { definition: String },

    #[error("No linked flag specified in permission '{entry}'. You need to specify 'flag=<flagname>'.")]
    MissingFlagReference { entry: String },

    #[error("Permission '{entry}' links more than one flag. Specify exactly one 'flag=<flagname>'.")]
    DuplicateFlagReference { entry: String },

    #[error("Input '{name}' is not a valid flag to link to.")]
    UnknownFlag { name: String },

    #[error("Invalid context '{key}' with value '{value}'.")]
    InvalidContextKey { key: String, value: String },

    #[error("Invalid context '{clause}' for flag definition '{definition}'.")]
    InvalidContext { definition: String, clause: String },

    #[error("Invalid context '{key}' with value '{value}'.")]
    InvalidContextValue { key: String, value: String },

    #[error("Flag definition '{definition}' is defined more than once.")]
    DuplicateDefinition { definition: String },

    #[error("Top-level '{key}' sits beside a 'definitions' block. Move it inside 'definitions' or drop the wrapper.")]
    MixedDocumentLayout { key: String },

    #[error("Malformed clause '{clause}'. Expected 'key=value'.")]
    MalformedClause { clause: String },

    #[error("Empty clause in permission '{entry}'. Remove the extra ','.")]
    EmptyClause { entry: String },

    #[error("Missing required field '{field}'.")]
    MissingField { field: String },

    #[error("Field '{field}' must be {expected}.")]
    InvalidFieldType { field: String, expected: String },

    #[error("YAML error: {reason}")]
    Yaml { reason: String },

    #[error("Flag definition '{definition}': {source}")]
    InDefinition {
        definition: String,
        #[source]
        source: Box<DefinitionError>,
    },
}

impl DefinitionError {
    /// Attach the owning definition's display name to this error.
    ///
    /// Errors that already carry a definition name are returned unchanged.
    pub fn in_definition(self, definition: impl Into<String>) -> Self {
        match self {
            DefinitionError::InDefinition { .. }
            | DefinitionError::MissingPermissions { .. }
            | DefinitionError::DuplicateDefinition { .. }
            | DefinitionError::InvalidContext { .. } => self,
            other => DefinitionError::InDefinition {
                definition: definition.into(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with any definition wrapping removed.
    pub fn root(&self) -> &DefinitionError {
        match self {
            DefinitionError::InDefinition { source, .. } => source.root(),
            other => other,
        }
    }

    /// Display name of the definition this error belongs to, if known.
    pub fn definition(&self) -> Option<&str> {
        match self {
            DefinitionError::InDefinition { definition, .. }
            | DefinitionError::MissingPermissions { definition }
            | DefinitionError::DuplicateDefinition { definition }
            | DefinitionError::InvalidContext { definition, .. } => Some(definition),
            _ => None,
        }
    }
}

/// Result type alias for definition operations.
pub type DefinitionResult<T> = Result<T, DefinitionError>;

// =============================================================================
// TESTS
// =============================================================================
