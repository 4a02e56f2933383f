use crate::{
    compiler::{CompileError, IndexEmitter, RenderContext, ViewAssembler},
    config::CompilerConfig,
    metadata::ViewMetadata,
    model::ViewSpec,
    validation::{ValidationError, Validator},
};

/// Ordered SQL produced for one view: the view statement first, then its indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledView {
    pub view_name: String,
    pub statements: Vec<String>,
}

impl CompiledView {
    pub fn view_statement(&self) -> &str {
        self.statements.first().map(String::as_str).unwrap_or_default()
    }

    pub fn index_statements(&self) -> &[String] {
        self.statements.get(1..).unwrap_or_default()
    }

    pub fn into_script(self) -> String {
        self.statements.join("\n")
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewCompiler {
    config: CompilerConfig,
}

impl ViewCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Structural checks only; every problem is reported.
    pub fn validate(&self, view: &ViewSpec) -> Vec<ValidationError> {
        Validator::validate(view)
    }

    pub fn compile(&self, view: &ViewSpec) -> Result<CompiledView, CompileError> {
        let errors = self.validate(view);
        if !errors.is_empty() {
            tracing::warn!(view = %view.name, errors = errors.len(), "view rejected by validation");
            return Err(CompileError::Validation(errors));
        }

        tracing::debug!(view = %view.name, ctes = view.ctes.len(), tables = view.tables.len(), "compiling view");
        let ctx = RenderContext::new(view, &self.config);

        let mut statements = vec![ViewAssembler::assemble(view, &ctx)?];
        if view.indexing_enabled {
            statements.extend(IndexEmitter::emit(view, &ctx)?);
        }

        Ok(CompiledView { view_name: self.config.view_identifier(&view.name), statements })
    }

    pub fn metadata(&self, view: &ViewSpec) -> ViewMetadata {
        ViewMetadata::from_view(view, &self.config)
    }
}
