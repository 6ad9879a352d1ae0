use serde::{Deserialize, Serialize};

use crate::query::SearchCategory;

/// Per-category enablement and the result cap for the examples panel.
///
/// The embedder reads this once at the start of each selection-handling
/// cycle and passes it by reference; a change takes effect on the next
/// cycle, never on one already running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamplesConfig {
    pub variable_usages: bool,
    pub similar_method_calls: bool,
    pub annotation_usages: bool,
    pub extended_types: bool,
    pub implemented_types: bool,
    pub return_types: bool,
    pub class_fields: bool,
    pub method_parameters: bool,
    pub checked_exceptions: bool,
    /// Upper bound on hits requested from the search gateway.
    pub max_hits: usize,
}

impl Default for ExamplesConfig {
    fn default() -> Self {
        ExamplesConfig {
            variable_usages: true,
            similar_method_calls: true,
            annotation_usages: true,
            extended_types: true,
            implemented_types: true,
            return_types: true,
            class_fields: true,
            method_parameters: true,
            checked_exceptions: true,
            max_hits: 100,
        }
    }
}

impl ExamplesConfig {
    /// Every category off; callers enable the ones they want.
    pub fn disabled() -> Self {
        ExamplesConfig {
            variable_usages: false,
            similar_method_calls: false,
            annotation_usages: false,
            extended_types: false,
            implemented_types: false,
            return_types: false,
            class_fields: false,
            method_parameters: false,
            checked_exceptions: false,
            ..ExamplesConfig::default()
        }
    }

    pub fn enabled_for(&self, category: SearchCategory) -> bool {
        match category {
            SearchCategory::VariableUsage => self.variable_usages,
            SearchCategory::MethodInvocation => self.similar_method_calls,
            SearchCategory::AnnotationUsage => self.annotation_usages,
            SearchCategory::ExtendedType => self.extended_types,
            SearchCategory::ImplementedType => self.implemented_types,
            SearchCategory::ReturnType => self.return_types,
            SearchCategory::ClassField => self.class_fields,
            SearchCategory::MethodParameter => self.method_parameters,
            SearchCategory::CheckedException => self.checked_exceptions,
        }
    }
}
