use serde::{Deserialize, Serialize};

/// Syntactic category of a tree node.
///
/// This is the subset of the front end's node vocabulary that selection
/// classification and usage analysis inspect. Anything else arrives as
/// [`NodeKind::Other`] and is treated as inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    CompilationUnit,
    ImportDeclaration,
    TypeDeclaration,
    AnnotationTypeDeclaration,
    AnnotationTypeMemberDeclaration,
    MethodDeclaration,
    FieldDeclaration,
    SingleVariableDeclaration,
    VariableDeclarationStatement,
    VariableDeclarationFragment,
    Block,
    ExpressionStatement,
    SimpleName,
    SimpleType,
    ParameterizedType,
    MarkerAnnotation,
    NormalAnnotation,
    SingleMemberAnnotation,
    MethodInvocation,
    SuperMethodInvocation,
    ClassInstanceCreation,
    CastExpression,
    NullLiteral,
    Other,
}

/// Structural position of a node within its parent.
///
/// Mirrors the front end's structural-property descriptors: two nodes of
/// the same kind are distinguished by the slot of the parent they occupy
/// (a type reference in the superclass slot is classified differently
/// from the same reference in the super-interface list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChildRole {
    /// The tree root; has no parent.
    Root,
    /// The declared name of any declaration node.
    DeclarationName,
    /// The name inside a simple type reference.
    TypeName,
    /// The type name of a marker or single-member annotation.
    AnnotationTypeName,
    /// The name of a method invocation.
    InvocationName,
    Superclass,
    SuperInterface,
    ThrownException,
    ReturnType,
    /// A single-variable declaration in a method's parameter list.
    Parameter,
    /// A member declaration in a type body.
    BodyDeclaration,
    /// The receiver expression of a method invocation.
    Receiver,
    /// An element of a call's argument list.
    Argument,
    /// The initializer expression of a declaration fragment.
    Initializer,
    /// The operand of a cast expression.
    CastOperand,
    /// The base type of a parameterized type (`List` in `List<String>`).
    BaseType,
    /// A type argument of a parameterized type.
    TypeArgument,
    /// The declared type slot of a field, variable, or parameter declaration.
    DeclaredType,
    /// A declaration fragment in a field or variable declaration.
    Fragment,
    Statement,
    Body,
    Other,
}
