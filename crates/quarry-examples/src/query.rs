use quarry_ast::{ChildRole, NodeId, NodeKind, SourceTree, TypeBinding};
use quarry_index::{BooleanQuery, DefinitionKind, Field, Occur, TermClause};
use serde::{Deserialize, Serialize};

use crate::classify::SelectionContext;
use crate::config::ExamplesConfig;
use crate::resolve::WorkspaceModel;
use crate::selection::SelectedElement;

/// The nine kinds of example search the panel can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchCategory {
    VariableUsage,
    MethodInvocation,
    AnnotationUsage,
    ExtendedType,
    ImplementedType,
    ReturnType,
    ClassField,
    MethodParameter,
    CheckedException,
}

impl SearchCategory {
    /// Human-readable heading shown above the result list.
    pub fn label(self) -> &'static str {
        match self {
            SearchCategory::VariableUsage => "variable usage",
            SearchCategory::MethodInvocation => "similar method calls",
            SearchCategory::AnnotationUsage => "annotation usage",
            SearchCategory::ExtendedType => "extended type",
            SearchCategory::ImplementedType => "implemented type",
            SearchCategory::ReturnType => "return type",
            SearchCategory::ClassField => "class variable",
            SearchCategory::MethodParameter => "method parameter",
            SearchCategory::CheckedException => "checked exception",
        }
    }
}

/// A category, its boolean query, and the terms describing it to users.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub category: SearchCategory,
    pub query: BooleanQuery,
    /// Heading terms in discovery order; duplicates are kept.
    pub display_terms: Vec<String>,
}

/// How a variable occurrence participates in the call it appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallRole {
    /// The call's receiver expression.
    Receiver,
    /// An element of the argument list.
    Argument,
    /// The invoked name itself; only reachable through the name-text
    /// occurrence fallback.
    Name,
}

/// Classifies an occurrence relative to its parent call node.
pub fn call_role(tree: &SourceTree, occurrence: NodeId) -> CallRole {
    match tree.role(occurrence) {
        ChildRole::Receiver => CallRole::Receiver,
        ChildRole::Argument => CallRole::Argument,
        _ => CallRole::Name,
    }
}

/// Builds the query plan for a classified selection.
///
/// Returns `None` when the selection maps to no category, the category
/// is disabled, or a binding the plan depends on did not resolve.
pub fn build(
    tree: &SourceTree,
    ctx: &SelectionContext,
    element: &SelectedElement,
    config: &ExamplesConfig,
    workspace: &dyn WorkspaceModel,
) -> Option<QueryPlan> {
    match element {
        SelectedElement::Field { type_signature }
        | SelectedElement::LocalVariable { type_signature } => {
            variable_usage(tree, ctx, type_signature, config, workspace)
        }
        SelectedElement::Type => type_or_annotation(tree, ctx, config),
        SelectedElement::Method => method_invocation(tree, ctx, config),
        SelectedElement::Other => None,
    }
}

fn method_invocation(
    tree: &SourceTree,
    ctx: &SelectionContext,
    config: &ExamplesConfig,
) -> Option<QueryPlan> {
    if tree.kind(ctx.selected) != NodeKind::MethodInvocation {
        return None;
    }
    if !config.enabled_for(SearchCategory::MethodInvocation) {
        return None;
    }
    let binding = tree.method_binding(ctx.selected)?;
    let mut query = BooleanQuery::new();
    query.push_must(Field::UsedMethods, binding.identifier.clone());
    Some(QueryPlan {
        category: SearchCategory::MethodInvocation,
        query,
        display_terms: vec![selected_name(tree, ctx, &binding.name)],
    })
}

fn type_or_annotation(
    tree: &SourceTree,
    ctx: &SelectionContext,
    config: &ExamplesConfig,
) -> Option<QueryPlan> {
    match tree.kind(ctx.selected) {
        NodeKind::MarkerAnnotation
        | NodeKind::SingleMemberAnnotation
        | NodeKind::AnnotationTypeDeclaration
        | NodeKind::AnnotationTypeMemberDeclaration => annotation_usage(tree, ctx, config),
        NodeKind::SimpleType | NodeKind::SimpleName => type_usage(tree, ctx, config),
        _ => None,
    }
}

fn annotation_usage(
    tree: &SourceTree,
    ctx: &SelectionContext,
    config: &ExamplesConfig,
) -> Option<QueryPlan> {
    if !config.enabled_for(SearchCategory::AnnotationUsage) {
        return None;
    }
    let binding = selected_type_binding(tree, ctx)?;
    let mut query = BooleanQuery::new();
    query.push_must(Field::Annotations, binding.identifier.clone());
    Some(QueryPlan {
        category: SearchCategory::AnnotationUsage,
        query,
        display_terms: vec![selected_name(tree, ctx, &binding.name)],
    })
}

/// Positional dispatch for type references: the same simple type means a
/// different search depending on which slot of which parent it occupies.
fn type_usage(
    tree: &SourceTree,
    ctx: &SelectionContext,
    config: &ExamplesConfig,
) -> Option<QueryPlan> {
    let parent = ctx.parent?;
    let (category, field, occur) = match (tree.kind(parent), tree.role(ctx.selected)) {
        (NodeKind::TypeDeclaration, ChildRole::Superclass) => {
            (SearchCategory::ExtendedType, Field::AllExtendedTypes, Occur::Must)
        }
        (NodeKind::TypeDeclaration, ChildRole::SuperInterface) => (
            SearchCategory::ImplementedType,
            Field::AllImplementedTypes,
            Occur::Must,
        ),
        (NodeKind::MethodDeclaration, ChildRole::ThrownException) => (
            SearchCategory::CheckedException,
            Field::CheckedExceptions,
            Occur::Must,
        ),
        (NodeKind::MethodDeclaration, ChildRole::ReturnType) => {
            (SearchCategory::ReturnType, Field::ReturnType, Occur::Must)
        }
        (NodeKind::SingleVariableDeclaration, _) if tree.role(parent) == ChildRole::Parameter => {
            (SearchCategory::MethodParameter, Field::ParameterTypes, Occur::Must)
        }
        (NodeKind::FieldDeclaration, _) if tree.role(parent) == ChildRole::BodyDeclaration => {
            (SearchCategory::ClassField, Field::FieldType, Occur::Must)
        }
        // Type arguments and base types of a parameterized type only
        // score matches, they never filter.
        (NodeKind::ParameterizedType, _) => {
            (SearchCategory::ClassField, Field::FieldType, Occur::Should)
        }
        _ => return None,
    };
    if !config.enabled_for(category) {
        return None;
    }
    let binding = selected_type_binding(tree, ctx)?;
    let mut query = BooleanQuery::new();
    query.push(TermClause {
        field,
        value: binding.identifier.clone(),
        occur,
        boost: 1.0,
    });
    Some(QueryPlan {
        category,
        query,
        display_terms: vec![selected_name(tree, ctx, &binding.name)],
    })
}

fn variable_usage(
    tree: &SourceTree,
    ctx: &SelectionContext,
    type_signature: &str,
    config: &ExamplesConfig,
    workspace: &dyn WorkspaceModel,
) -> Option<QueryPlan> {
    if !config.enabled_for(SearchCategory::VariableUsage) {
        return None;
    }
    let method = ctx.scopes.method?;
    let var_type = workspace.type_from_signature(type_signature)?;

    let mut query = BooleanQuery::new();
    query.push_must(Field::VariableType, var_type.identifier.clone());
    let mut terms = vec![selected_name(tree, ctx, ""), var_type.name.clone()];

    for occurrence in occurrences_in_method(tree, ctx.simple_name, method) {
        let Some(parent) = tree.parent(occurrence) else {
            continue;
        };
        match tree.kind(parent) {
            NodeKind::ClassInstanceCreation => {
                let Some(callee) = tree.method_binding(parent) else {
                    continue;
                };
                terms.push(creation_type_text(tree, parent).unwrap_or_else(|| callee.name.clone()));
                // Receiver and argument occurrences contribute the same
                // clause; the index does not separate the two roles.
                query.push_should(Field::UsedAsTargetForMethods, callee.identifier.clone());
            }
            NodeKind::MethodInvocation => {
                let Some(callee) = tree.method_binding(parent) else {
                    continue;
                };
                terms.push(
                    invocation_name_text(tree, parent).unwrap_or_else(|| callee.name.clone()),
                );
                query.push_should(Field::UsedAsTargetForMethods, callee.identifier.clone());
            }
            NodeKind::SingleVariableDeclaration => {
                query.push_should(Field::VariableDefinition, DefinitionKind::Parameter.as_str());
            }
            NodeKind::VariableDeclarationFragment => {
                push_definition_clauses(&mut query, &mut terms, tree, parent);
            }
            _ => {}
        }
    }

    Some(QueryPlan {
        category: SearchCategory::VariableUsage,
        query,
        display_terms: terms,
    })
}

/// Linked occurrences of `name` that sit under `method`, source order.
fn occurrences_in_method(tree: &SourceTree, name: NodeId, method: NodeId) -> Vec<NodeId> {
    tree.linked_occurrences(name)
        .into_iter()
        .filter(|&occ| tree.ancestors(occ).any(|node| node == method))
        .collect()
}

/// Definition provenance of the variable declared by `fragment`.
fn push_definition_clauses(
    query: &mut BooleanQuery,
    terms: &mut Vec<String>,
    tree: &SourceTree,
    fragment: NodeId,
) {
    let initializer = tree
        .children(fragment)
        .iter()
        .copied()
        .find(|&c| tree.role(c) == ChildRole::Initializer);
    let Some(init) = initializer else {
        query.push_should(Field::VariableDefinition, DefinitionKind::Uninitialized.as_str());
        return;
    };
    let value = match tree.kind(init) {
        NodeKind::NullLiteral => DefinitionKind::NullLiteral,
        NodeKind::MethodInvocation
        | NodeKind::SuperMethodInvocation
        | NodeKind::ClassInstanceCreation => {
            push_provenance(query, terms, tree, init);
            DefinitionKind::Assignment
        }
        NodeKind::CastExpression => {
            let Some(call) = cast_call_operand(tree, init) else {
                return;
            };
            push_provenance(query, terms, tree, call);
            DefinitionKind::Assignment
        }
        _ => return,
    };
    query.push_should(Field::VariableDefinition, value.as_str());
}

/// When the defining call resolves, its identifier becomes a weighted
/// definition clause and its name a display term.
fn push_provenance(
    query: &mut BooleanQuery,
    terms: &mut Vec<String>,
    tree: &SourceTree,
    call: NodeId,
) {
    let Some(callee) = tree.method_binding(call) else {
        return;
    };
    terms.push(callee.name.clone());
    query.push_should_boosted(Field::VariableDefinition, callee.identifier.clone(), 2.0);
}

fn cast_call_operand(tree: &SourceTree, cast: NodeId) -> Option<NodeId> {
    let operand = tree
        .children(cast)
        .iter()
        .copied()
        .find(|&c| tree.role(c) == ChildRole::CastOperand)?;
    matches!(
        tree.kind(operand),
        NodeKind::MethodInvocation | NodeKind::SuperMethodInvocation | NodeKind::ClassInstanceCreation
    )
    .then_some(operand)
}

fn selected_type_binding<'t>(tree: &'t SourceTree, ctx: &SelectionContext) -> Option<&'t TypeBinding> {
    tree.type_binding(ctx.simple_name)
        .or_else(|| tree.type_binding(ctx.selected))
}

fn selected_name(tree: &SourceTree, ctx: &SelectionContext, fallback: &str) -> String {
    node_label(tree, ctx.simple_name).unwrap_or_else(|| fallback.to_string())
}

fn node_label(tree: &SourceTree, id: NodeId) -> Option<String> {
    if let Some(label) = tree.label(id) {
        return Some(label.to_string());
    }
    let text = tree.text(id);
    (!text.is_empty()).then(|| text.to_string())
}

fn creation_type_text(tree: &SourceTree, creation: NodeId) -> Option<String> {
    let ty = tree
        .children(creation)
        .iter()
        .copied()
        .find(|&c| tree.role(c) == ChildRole::DeclaredType)?;
    node_label(tree, ty).or_else(|| {
        tree.children(ty)
            .iter()
            .copied()
            .find_map(|c| node_label(tree, c))
    })
}

fn invocation_name_text(tree: &SourceTree, invocation: NodeId) -> Option<String> {
    let name = tree
        .children(invocation)
        .iter()
        .copied()
        .find(|&c| tree.role(c) == ChildRole::InvocationName)?;
    node_label(tree, name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use quarry_ast::{MethodBinding, SourceTree, TreeBuilder};

    use super::*;
    use crate::classify::classify;
    use crate::resolve::{MethodElement, WorkspaceElement};

    /// Resolves type signatures from a fixed table; everything else is
    /// out of scope for query building.
    #[derive(Default)]
    struct SignatureTable {
        types: HashMap<String, TypeBinding>,
    }

    impl SignatureTable {
        fn with(signature: &str, identifier: &str, name: &str) -> Self {
            let mut table = SignatureTable::default();
            table
                .types
                .insert(signature.to_owned(), TypeBinding::new(identifier, name));
            table
        }
    }

    impl WorkspaceModel for SignatureTable {
        fn element(&self, _handle: &str) -> Option<WorkspaceElement> {
            None
        }

        fn enclosing_method(&self, _element: &WorkspaceElement) -> Option<MethodElement> {
            None
        }

        fn syntax_tree(&self, _method: &MethodElement) -> Option<Arc<SourceTree>> {
            None
        }

        fn declaration_node(&self, _tree: &SourceTree, _method: &MethodElement) -> Option<NodeId> {
            None
        }

        fn type_from_signature(&self, signature: &str) -> Option<TypeBinding> {
            self.types.get(signature).cloned()
        }
    }

    struct Scenario {
        tree: SourceTree,
        raw: NodeId,
        element: SelectedElement,
        workspace: SignatureTable,
    }

    impl Scenario {
        fn build(&self, config: &ExamplesConfig) -> Option<QueryPlan> {
            let ctx = classify(&self.tree, Some(self.raw)).expect("scenario must classify");
            build(&self.tree, &ctx, &self.element, config, &self.workspace)
        }
    }

    /// `class Widget { Resource res; void run() { res.close(); } }` with
    /// the field occurrence selected.
    fn variable_scenario() -> Scenario {
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let block = b.node(method, NodeKind::Block, ChildRole::Body);
        let call = b.node(block, NodeKind::MethodInvocation, ChildRole::Statement);
        let var = b.declare_var("res");
        let receiver = b.name(call, ChildRole::Receiver, "res");
        b.bind_var(receiver, var);
        b.name(call, ChildRole::InvocationName, "close");
        b.bind_method(call, MethodBinding::new("Lq/Resource;.close()V", "close"));
        Scenario {
            tree: b.finish(),
            raw: receiver,
            element: SelectedElement::Field {
                type_signature: "Lq/Resource;".to_owned(),
            },
            workspace: SignatureTable::with("Lq/Resource;", "Lq/Resource;", "Resource"),
        }
    }

    /// `class A extends Base implements Closeable` with one of the two
    /// heritage names selected.
    fn heritage_scenario(slot: ChildRole) -> Scenario {
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let superclass = b.node(ty, NodeKind::SimpleType, ChildRole::Superclass);
        let super_name = b.name(superclass, ChildRole::TypeName, "Base");
        b.bind_type(super_name, TypeBinding::new("Lq/Base;", "Base"));
        let iface = b.node(ty, NodeKind::SimpleType, ChildRole::SuperInterface);
        let iface_name = b.name(iface, ChildRole::TypeName, "Closeable");
        b.bind_type(iface_name, TypeBinding::new("Ljava/io/Closeable;", "Closeable"));
        let raw = if slot == ChildRole::Superclass {
            super_name
        } else {
            iface_name
        };
        Scenario {
            tree: b.finish(),
            raw,
            element: SelectedElement::Type,
            workspace: SignatureTable::default(),
        }
    }

    fn invocation_scenario() -> Scenario {
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let block = b.node(method, NodeKind::Block, ChildRole::Body);
        let call = b.node(block, NodeKind::MethodInvocation, ChildRole::Statement);
        let name = b.name(call, ChildRole::InvocationName, "flush");
        b.bind_method(call, MethodBinding::new("Lq/Sink;.flush()V", "flush"));
        Scenario {
            tree: b.finish(),
            raw: name,
            element: SelectedElement::Method,
            workspace: SignatureTable::default(),
        }
    }

    fn annotation_scenario() -> Scenario {
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let marker = b.node(method, NodeKind::MarkerAnnotation, ChildRole::Other);
        let name = b.name(marker, ChildRole::AnnotationTypeName, "Test");
        b.bind_type(name, TypeBinding::new("Lorg/junit/Test;", "Test"));
        Scenario {
            tree: b.finish(),
            raw: name,
            element: SelectedElement::Type,
            workspace: SignatureTable::default(),
        }
    }

    fn return_type_scenario() -> Scenario {
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let ret = b.node(method, NodeKind::SimpleType, ChildRole::ReturnType);
        let name = b.name(ret, ChildRole::TypeName, "Path");
        b.bind_type(name, TypeBinding::new("Ljava/nio/file/Path;", "Path"));
        Scenario {
            tree: b.finish(),
            raw: name,
            element: SelectedElement::Type,
            workspace: SignatureTable::default(),
        }
    }

    fn class_field_scenario() -> Scenario {
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let field = b.node(ty, NodeKind::FieldDeclaration, ChildRole::BodyDeclaration);
        let field_ty = b.node(field, NodeKind::SimpleType, ChildRole::DeclaredType);
        let name = b.name(field_ty, ChildRole::TypeName, "Buffer");
        b.bind_type(name, TypeBinding::new("Lq/Buffer;", "Buffer"));
        Scenario {
            tree: b.finish(),
            raw: name,
            element: SelectedElement::Type,
            workspace: SignatureTable::default(),
        }
    }

    fn method_parameter_scenario() -> Scenario {
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let param = b.node(method, NodeKind::SingleVariableDeclaration, ChildRole::Parameter);
        let param_ty = b.node(param, NodeKind::SimpleType, ChildRole::DeclaredType);
        let name = b.name(param_ty, ChildRole::TypeName, "Charset");
        b.bind_type(name, TypeBinding::new("Ljava/nio/charset/Charset;", "Charset"));
        Scenario {
            tree: b.finish(),
            raw: name,
            element: SelectedElement::Type,
            workspace: SignatureTable::default(),
        }
    }

    fn checked_exception_scenario() -> Scenario {
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let name = b.name(method, ChildRole::ThrownException, "IOException");
        b.bind_type(name, TypeBinding::new("Ljava/io/IOException;", "IOException"));
        Scenario {
            tree: b.finish(),
            raw: name,
            element: SelectedElement::Type,
            workspace: SignatureTable::default(),
        }
    }

    fn all_scenarios() -> Vec<(SearchCategory, Scenario)> {
        vec![
            (SearchCategory::VariableUsage, variable_scenario()),
            (SearchCategory::MethodInvocation, invocation_scenario()),
            (SearchCategory::AnnotationUsage, annotation_scenario()),
            (SearchCategory::ExtendedType, heritage_scenario(ChildRole::Superclass)),
            (
                SearchCategory::ImplementedType,
                heritage_scenario(ChildRole::SuperInterface),
            ),
            (SearchCategory::ReturnType, return_type_scenario()),
            (SearchCategory::ClassField, class_field_scenario()),
            (SearchCategory::MethodParameter, method_parameter_scenario()),
            (SearchCategory::CheckedException, checked_exception_scenario()),
        ]
    }

    fn disable(config: &mut ExamplesConfig, category: SearchCategory) {
        match category {
            SearchCategory::VariableUsage => config.variable_usages = false,
            SearchCategory::MethodInvocation => config.similar_method_calls = false,
            SearchCategory::AnnotationUsage => config.annotation_usages = false,
            SearchCategory::ExtendedType => config.extended_types = false,
            SearchCategory::ImplementedType => config.implemented_types = false,
            SearchCategory::ReturnType => config.return_types = false,
            SearchCategory::ClassField => config.class_fields = false,
            SearchCategory::MethodParameter => config.method_parameters = false,
            SearchCategory::CheckedException => config.checked_exceptions = false,
        }
    }

    #[test]
    fn every_category_is_reachable() {
        let config = ExamplesConfig::default();
        for (category, scenario) in all_scenarios() {
            let plan = scenario.build(&config).unwrap_or_else(|| panic!("{category:?}"));
            assert_eq!(plan.category, category, "{category:?}");
            assert!(!plan.query.is_empty(), "{category:?}");
        }
    }

    #[test]
    fn disabling_a_category_suppresses_its_query() {
        for (category, scenario) in all_scenarios() {
            let mut config = ExamplesConfig::default();
            disable(&mut config, category);
            assert_eq!(scenario.build(&config), None, "{category:?}");
        }
    }

    #[test]
    fn superclass_slot_is_extended_never_implemented() {
        let config = ExamplesConfig::default();
        let plan = heritage_scenario(ChildRole::Superclass).build(&config).unwrap();
        assert_eq!(plan.category, SearchCategory::ExtendedType);
        let clause = &plan.query.clauses()[0];
        assert_eq!(clause.field, Field::AllExtendedTypes);
        assert_eq!(clause.value, "Lq/Base;");
        assert_eq!(clause.occur, Occur::Must);
        assert_eq!(plan.display_terms, ["Base"]);

        let plan = heritage_scenario(ChildRole::SuperInterface).build(&config).unwrap();
        assert_eq!(plan.category, SearchCategory::ImplementedType);
        assert_eq!(plan.query.clauses()[0].field, Field::AllImplementedTypes);
    }

    #[test]
    fn invocation_selection_requires_the_method_element_kind() {
        let config = ExamplesConfig::default();
        let scenario = invocation_scenario();
        let ctx = classify(&scenario.tree, Some(scenario.raw)).unwrap();

        let plan = build(&scenario.tree, &ctx, &SelectedElement::Method, &config, &scenario.workspace)
            .unwrap();
        assert_eq!(plan.category, SearchCategory::MethodInvocation);
        assert_eq!(plan.query.clauses()[0].field, Field::UsedMethods);
        assert_eq!(plan.query.clauses()[0].value, "Lq/Sink;.flush()V");
        assert_eq!(plan.display_terms, ["flush"]);

        assert_eq!(
            build(&scenario.tree, &ctx, &SelectedElement::Other, &config, &scenario.workspace),
            None
        );
    }

    #[test]
    fn unresolved_type_binding_aborts_the_plan() {
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let superclass = b.node(ty, NodeKind::SimpleType, ChildRole::Superclass);
        let name = b.name(superclass, ChildRole::TypeName, "Mystery");
        let tree = b.finish();

        let ctx = classify(&tree, Some(name)).unwrap();
        let config = ExamplesConfig::default();
        let workspace = SignatureTable::default();
        assert_eq!(build(&tree, &ctx, &SelectedElement::Type, &config, &workspace), None);
    }

    #[test]
    fn parameterized_type_argument_scores_field_type() {
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let field = b.node(ty, NodeKind::FieldDeclaration, ChildRole::BodyDeclaration);
        let outer = b.node(field, NodeKind::ParameterizedType, ChildRole::DeclaredType);
        let arg = b.node(outer, NodeKind::SimpleType, ChildRole::TypeArgument);
        let name = b.name(arg, ChildRole::TypeName, "Entry");
        b.bind_type(name, TypeBinding::new("Lq/Entry;", "Entry"));
        let tree = b.finish();

        let ctx = classify(&tree, Some(name)).unwrap();
        let workspace = SignatureTable::default();
        let plan = build(&tree, &ctx, &SelectedElement::Type, &ExamplesConfig::default(), &workspace)
            .unwrap();
        assert_eq!(plan.category, SearchCategory::ClassField);
        let clause = &plan.query.clauses()[0];
        assert_eq!(clause.field, Field::FieldType);
        assert_eq!(clause.occur, Occur::Should);

        let mut config = ExamplesConfig::default();
        config.class_fields = false;
        assert_eq!(build(&tree, &ctx, &SelectedElement::Type, &config, &workspace), None);
    }

    #[test]
    fn lone_variable_keeps_only_the_type_clause() {
        // `count;` as a bare statement: the single occurrence sits under
        // an expression statement, which contributes nothing.
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let block = b.node(method, NodeKind::Block, ChildRole::Body);
        let stmt = b.node(block, NodeKind::ExpressionStatement, ChildRole::Statement);
        let var = b.declare_var("count");
        let name = b.name(stmt, ChildRole::Other, "count");
        b.bind_var(name, var);
        let tree = b.finish();

        let ctx = classify(&tree, Some(name)).unwrap();
        let workspace = SignatureTable::with("I", "I", "int");
        let element = SelectedElement::LocalVariable {
            type_signature: "I".to_owned(),
        };
        let plan = build(&tree, &ctx, &element, &ExamplesConfig::default(), &workspace).unwrap();

        assert_eq!(plan.query.clauses().len(), 1);
        let clause = &plan.query.clauses()[0];
        assert_eq!(clause.field, Field::VariableType);
        assert_eq!(clause.value, "I");
        assert_eq!(clause.occur, Occur::Must);
        assert_eq!(plan.display_terms, ["count", "int"]);
    }

    #[test]
    fn variable_usage_needs_an_enclosing_method() {
        // A field selected at its declaration has a type scope only.
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let field = b.node(ty, NodeKind::FieldDeclaration, ChildRole::BodyDeclaration);
        let fragment = b.node(field, NodeKind::VariableDeclarationFragment, ChildRole::Fragment);
        let name = b.name(fragment, ChildRole::DeclarationName, "cache");
        let tree = b.finish();

        let ctx = classify(&tree, Some(name)).unwrap();
        let workspace = SignatureTable::with("Lq/Cache;", "Lq/Cache;", "Cache");
        let element = SelectedElement::Field {
            type_signature: "Lq/Cache;".to_owned(),
        };
        assert_eq!(build(&tree, &ctx, &element, &ExamplesConfig::default(), &workspace), None);
    }

    #[test]
    fn unresolved_variable_type_aborts_the_cycle() {
        let scenario = variable_scenario();
        let ctx = classify(&scenario.tree, Some(scenario.raw)).unwrap();
        let empty = SignatureTable::default();
        assert_eq!(
            build(&scenario.tree, &ctx, &scenario.element, &ExamplesConfig::default(), &empty),
            None
        );
    }

    #[test]
    fn receiver_occurrence_contributes_the_target_clause() {
        let plan = variable_scenario().build(&ExamplesConfig::default()).unwrap();
        let clauses = plan.query.clauses();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[1].field, Field::UsedAsTargetForMethods);
        assert_eq!(clauses[1].value, "Lq/Resource;.close()V");
        assert_eq!(clauses[1].occur, Occur::Should);
        assert_eq!(plan.display_terms, ["res", "Resource", "close"]);
    }

    #[test]
    fn argument_occurrences_share_the_target_clause_with_receivers() {
        // `process(count)`: the occurrence is an argument, and its role
        // says so, yet the generated clause is identical to the receiver
        // case above. The role distinction exists for a future index that
        // tells the two apart.
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let block = b.node(method, NodeKind::Block, ChildRole::Body);
        let call = b.node(block, NodeKind::MethodInvocation, ChildRole::Statement);
        b.name(call, ChildRole::InvocationName, "process");
        b.bind_method(call, MethodBinding::new("Lq/App;.process([I)V", "process"));
        let var = b.declare_var("count");
        let arg = b.name(call, ChildRole::Argument, "count");
        b.bind_var(arg, var);
        let tree = b.finish();

        assert_eq!(call_role(&tree, arg), CallRole::Argument);

        let ctx = classify(&tree, Some(arg)).unwrap();
        let workspace = SignatureTable::with("[I", "[I", "int[]");
        let element = SelectedElement::LocalVariable {
            type_signature: "[I".to_owned(),
        };
        let plan = build(&tree, &ctx, &element, &ExamplesConfig::default(), &workspace).unwrap();
        let target = plan
            .query
            .clauses()
            .iter()
            .find(|c| c.field == Field::UsedAsTargetForMethods)
            .unwrap();
        assert_eq!(target.value, "Lq/App;.process([I)V");
        assert_eq!(target.occur, Occur::Should);
    }

    #[test]
    fn declaration_fragments_record_their_provenance() {
        // `Resource res = open();` followed by `res.close();`
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let block = b.node(method, NodeKind::Block, ChildRole::Body);
        let stmt = b.node(block, NodeKind::VariableDeclarationStatement, ChildRole::Statement);
        let fragment = b.node(stmt, NodeKind::VariableDeclarationFragment, ChildRole::Fragment);
        let var = b.declare_var("res");
        let decl_name = b.name(fragment, ChildRole::DeclarationName, "res");
        b.bind_var(decl_name, var);
        let init = b.node(fragment, NodeKind::MethodInvocation, ChildRole::Initializer);
        b.name(init, ChildRole::InvocationName, "open");
        b.bind_method(init, MethodBinding::new("Lq/Pool;.open()Lq/Resource;", "open"));
        let call = b.node(block, NodeKind::MethodInvocation, ChildRole::Statement);
        let receiver = b.name(call, ChildRole::Receiver, "res");
        b.bind_var(receiver, var);
        b.name(call, ChildRole::InvocationName, "close");
        b.bind_method(call, MethodBinding::new("Lq/Resource;.close()V", "close"));
        let tree = b.finish();

        let ctx = classify(&tree, Some(receiver)).unwrap();
        let workspace = SignatureTable::with("Lq/Resource;", "Lq/Resource;", "Resource");
        let element = SelectedElement::LocalVariable {
            type_signature: "Lq/Resource;".to_owned(),
        };
        let plan = build(&tree, &ctx, &element, &ExamplesConfig::default(), &workspace).unwrap();

        let clauses = plan.query.clauses();
        assert_eq!(clauses.len(), 4);
        assert_eq!(clauses[0].field, Field::VariableType);
        // Declaration occurrence: weighted provenance first, then the
        // generic assignment value.
        assert_eq!(clauses[1].field, Field::VariableDefinition);
        assert_eq!(clauses[1].value, "Lq/Pool;.open()Lq/Resource;");
        assert_eq!(clauses[1].boost, 2.0);
        assert_eq!(clauses[2].value, "assignment");
        assert_eq!(clauses[2].boost, 1.0);
        // Second occurrence: the receiver of close().
        assert_eq!(clauses[3].field, Field::UsedAsTargetForMethods);
        assert_eq!(plan.display_terms, ["res", "Resource", "open", "close"]);
    }

    #[test]
    fn uninitialized_and_null_fragments_use_their_markers() {
        for (init_kind, expected) in [
            (None, "uninitialized"),
            (Some(NodeKind::NullLiteral), "nulliteral"),
        ] {
            let mut b = TreeBuilder::new("");
            let unit = b.root(NodeKind::CompilationUnit);
            let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
            let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
            let block = b.node(method, NodeKind::Block, ChildRole::Body);
            let stmt = b.node(block, NodeKind::VariableDeclarationStatement, ChildRole::Statement);
            let fragment = b.node(stmt, NodeKind::VariableDeclarationFragment, ChildRole::Fragment);
            let var = b.declare_var("res");
            let name = b.name(fragment, ChildRole::DeclarationName, "res");
            b.bind_var(name, var);
            if let Some(kind) = init_kind {
                b.node(fragment, kind, ChildRole::Initializer);
            }
            let tree = b.finish();

            let ctx = classify(&tree, Some(name)).unwrap();
            let workspace = SignatureTable::with("Lq/Resource;", "Lq/Resource;", "Resource");
            let element = SelectedElement::LocalVariable {
                type_signature: "Lq/Resource;".to_owned(),
            };
            let plan = build(&tree, &ctx, &element, &ExamplesConfig::default(), &workspace).unwrap();
            let clauses = plan.query.clauses();
            assert_eq!(clauses.len(), 2, "{expected}");
            assert_eq!(clauses[1].field, Field::VariableDefinition);
            assert_eq!(clauses[1].value, expected);
        }
    }

    #[test]
    fn cast_initializers_reach_through_to_the_call() {
        // `Resource res = (Resource) lookup();`
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let block = b.node(method, NodeKind::Block, ChildRole::Body);
        let stmt = b.node(block, NodeKind::VariableDeclarationStatement, ChildRole::Statement);
        let fragment = b.node(stmt, NodeKind::VariableDeclarationFragment, ChildRole::Fragment);
        let var = b.declare_var("res");
        let name = b.name(fragment, ChildRole::DeclarationName, "res");
        b.bind_var(name, var);
        let cast = b.node(fragment, NodeKind::CastExpression, ChildRole::Initializer);
        let call = b.node(cast, NodeKind::MethodInvocation, ChildRole::CastOperand);
        b.name(call, ChildRole::InvocationName, "lookup");
        b.bind_method(call, MethodBinding::new("Lq/Registry;.lookup()Ljava/lang/Object;", "lookup"));
        let tree = b.finish();

        let ctx = classify(&tree, Some(name)).unwrap();
        let workspace = SignatureTable::with("Lq/Resource;", "Lq/Resource;", "Resource");
        let element = SelectedElement::LocalVariable {
            type_signature: "Lq/Resource;".to_owned(),
        };
        let plan = build(&tree, &ctx, &element, &ExamplesConfig::default(), &workspace).unwrap();

        let clauses = plan.query.clauses();
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[1].value, "Lq/Registry;.lookup()Ljava/lang/Object;");
        assert_eq!(clauses[1].boost, 2.0);
        assert_eq!(clauses[2].value, "assignment");
        assert_eq!(plan.display_terms, ["res", "Resource", "lookup"]);
    }

    #[test]
    fn constructor_arguments_add_the_creation_type_as_a_term() {
        // `new Reader(buf)` with `buf` selected elsewhere in the method.
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let block = b.node(method, NodeKind::Block, ChildRole::Body);
        let creation = b.node(block, NodeKind::ClassInstanceCreation, ChildRole::Statement);
        let created = b.node(creation, NodeKind::SimpleType, ChildRole::DeclaredType);
        b.name(created, ChildRole::TypeName, "Reader");
        b.bind_method(creation, MethodBinding::new("Lq/Reader;.<init>(Lq/Buffer;)V", "Reader"));
        let var = b.declare_var("buf");
        let arg = b.name(creation, ChildRole::Argument, "buf");
        b.bind_var(arg, var);
        let tree = b.finish();

        let ctx = classify(&tree, Some(arg)).unwrap();
        let workspace = SignatureTable::with("Lq/Buffer;", "Lq/Buffer;", "Buffer");
        let element = SelectedElement::LocalVariable {
            type_signature: "Lq/Buffer;".to_owned(),
        };
        let plan = build(&tree, &ctx, &element, &ExamplesConfig::default(), &workspace).unwrap();

        assert_eq!(plan.display_terms, ["buf", "Buffer", "Reader"]);
        let target = plan
            .query
            .clauses()
            .iter()
            .find(|c| c.field == Field::UsedAsTargetForMethods)
            .unwrap();
        assert_eq!(target.value, "Lq/Reader;.<init>(Lq/Buffer;)V");
    }

    #[test]
    fn unresolved_callees_skip_their_occurrence_only() {
        // Two uses; the first call has no binding and must vanish from
        // both clauses and terms.
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let method = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let block = b.node(method, NodeKind::Block, ChildRole::Body);
        let var = b.declare_var("res");
        let broken = b.node(block, NodeKind::MethodInvocation, ChildRole::Statement);
        let first = b.name(broken, ChildRole::Receiver, "res");
        b.bind_var(first, var);
        b.name(broken, ChildRole::InvocationName, "mystery");
        let sound = b.node(block, NodeKind::MethodInvocation, ChildRole::Statement);
        let second = b.name(sound, ChildRole::Receiver, "res");
        b.bind_var(second, var);
        b.name(sound, ChildRole::InvocationName, "close");
        b.bind_method(sound, MethodBinding::new("Lq/Resource;.close()V", "close"));
        let tree = b.finish();

        let ctx = classify(&tree, Some(first)).unwrap();
        let workspace = SignatureTable::with("Lq/Resource;", "Lq/Resource;", "Resource");
        let element = SelectedElement::LocalVariable {
            type_signature: "Lq/Resource;".to_owned(),
        };
        let plan = build(&tree, &ctx, &element, &ExamplesConfig::default(), &workspace).unwrap();

        assert_eq!(plan.query.clauses().len(), 2);
        assert_eq!(plan.query.clauses()[1].value, "Lq/Resource;.close()V");
        assert_eq!(plan.display_terms, ["res", "Resource", "close"]);
    }

    #[test]
    fn occurrences_outside_the_enclosing_method_are_ignored() {
        // The same variable binding appears in two methods; only the
        // selected method's occurrences count.
        let mut b = TreeBuilder::new("");
        let unit = b.root(NodeKind::CompilationUnit);
        let ty = b.node(unit, NodeKind::TypeDeclaration, ChildRole::Other);
        let var = b.declare_var("shared");

        let here = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let here_block = b.node(here, NodeKind::Block, ChildRole::Body);
        let stmt = b.node(here_block, NodeKind::ExpressionStatement, ChildRole::Statement);
        let selected = b.name(stmt, ChildRole::Other, "shared");
        b.bind_var(selected, var);

        let elsewhere = b.node(ty, NodeKind::MethodDeclaration, ChildRole::BodyDeclaration);
        let there_block = b.node(elsewhere, NodeKind::Block, ChildRole::Body);
        let call = b.node(there_block, NodeKind::MethodInvocation, ChildRole::Statement);
        let other_use = b.name(call, ChildRole::Receiver, "shared");
        b.bind_var(other_use, var);
        b.name(call, ChildRole::InvocationName, "touch");
        b.bind_method(call, MethodBinding::new("Lq/Shared;.touch()V", "touch"));
        let tree = b.finish();

        let ctx = classify(&tree, Some(selected)).unwrap();
        let workspace = SignatureTable::with("Lq/Shared;", "Lq/Shared;", "Shared");
        let element = SelectedElement::Field {
            type_signature: "Lq/Shared;".to_owned(),
        };
        let plan = build(&tree, &ctx, &element, &ExamplesConfig::default(), &workspace).unwrap();

        // Only the mandatory type clause; the other method's call never
        // contributes.
        assert_eq!(plan.query.clauses().len(), 1);
        assert_eq!(plan.display_terms, ["shared", "Shared"]);
    }
}
