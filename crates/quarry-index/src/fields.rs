use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed vocabulary of indexed document fields.
///
/// Every snippet document carries [`Field::ElementHandle`] plus whatever
/// usage facts the indexers extracted from its body. Query builders and
/// indexers must agree on this set, so it is an enum rather than free
/// strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Field {
    /// Workspace handle of the method the snippet was extracted from.
    ElementHandle,
    /// Declared type of the variable a snippet revolves around.
    VariableType,
    /// Name of that variable, used for highlighting on the consumer side.
    VariableName,
    /// How the variable obtained its value; see [`DefinitionKind`].
    VariableDefinition,
    /// Identifiers of all methods invoked anywhere in the snippet.
    UsedMethods,
    /// Identifiers of methods invoked on (or fed) the tracked variable.
    UsedAsTargetForMethods,
    /// Annotation types present on the snippet's declaration.
    Annotations,
    /// Transitive superclasses of the declaring type.
    AllExtendedTypes,
    /// Transitive superinterfaces of the declaring type.
    AllImplementedTypes,
    ReturnType,
    ParameterTypes,
    FieldType,
    CheckedExceptions,
    /// Simple names of every method the declaring type defines.
    AllDeclaredMethodNames,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::ElementHandle => "JAVA_ELEMENT_HANDLE",
            Field::VariableType => "VARIABLE_TYPE",
            Field::VariableName => "VARIABLE_NAME",
            Field::VariableDefinition => "VARIABLE_DEFINITION",
            Field::UsedMethods => "USED_METHODS",
            Field::UsedAsTargetForMethods => "USED_AS_TARGET_FOR_METHODS",
            Field::Annotations => "ANNOTATIONS",
            Field::AllExtendedTypes => "ALL_EXTENDED_TYPES",
            Field::AllImplementedTypes => "ALL_IMPLEMENTED_TYPES",
            Field::ReturnType => "RETURN_TYPE",
            Field::ParameterTypes => "PARAMETER_TYPES",
            Field::FieldType => "FIELD_TYPE",
            Field::CheckedExceptions => "CHECKED_EXCEPTIONS",
            Field::AllDeclaredMethodNames => "ALL_DECLARED_METHOD_NAMES",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known values of [`Field::VariableDefinition`].
///
/// Occurrence analysis records how a tracked variable came to hold its
/// value; provenance beyond these four is stored as the defining
/// method's identifier instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefinitionKind {
    /// Declared as a method parameter.
    Parameter,
    /// Declared without an initializer.
    Uninitialized,
    /// Initialized to a null literal.
    NullLiteral,
    /// Assigned from some expression.
    Assignment,
}

impl DefinitionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DefinitionKind::Parameter => "parameter",
            DefinitionKind::Uninitialized => "uninitialized",
            DefinitionKind::NullLiteral => "nulliteral",
            DefinitionKind::Assignment => "assignment",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
