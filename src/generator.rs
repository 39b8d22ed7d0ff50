//! The Build → Validate → Emit pipeline.

use zendgen_core::{InternalError, SpecError};
use zendgen_emitter::Emitter;
use zendgen_registry::{ExtensionBuilder, SymbolTable, validate};

use crate::config::GeneratorConfig;
use crate::error::GenerateResult;

/// Output of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedHeader {
    /// The declaration text.
    pub text: String,
    /// Non-fatal findings, such as classes assumed to be external.
    pub warnings: Vec<SpecError>,
}

/// Runs the pipeline with one configuration.
///
/// A generator holds no state between runs; every call builds its own symbol
/// table and intern table.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the symbol table, validate it, and emit the header.
    #[tracing::instrument(skip_all)]
    pub fn generate(&self, builder: ExtensionBuilder) -> GenerateResult<GeneratedHeader> {
        let table = builder.build();
        tracing::debug!(
            namespace = %table.extension().namespace_string(),
            functions = table.functions().len(),
            classes = table.classes().len(),
            "built symbol table"
        );
        self.generate_table(&table)
    }

    /// Validate and emit an already built symbol table.
    #[tracing::instrument(skip_all)]
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate_table(&self, table: &SymbolTable) -> GenerateResult<GeneratedHeader> {
        let report = validate(table, self.config.validation_mode);
        for warning in &report.warnings {
            tracing::warn!(%warning, "treating unresolved class as external");
        }
        let warnings = report.into_result()?;

        let emitter = Emitter::new(table, self.config.emit_options());
        let text = emitter.emit()?;

        if self.config.verify_determinism {
            self.verify_determinism(table, &text)?;
        }

        tracing::debug!(bytes = text.len(), warnings = warnings.len(), "generated header");
        Ok(GeneratedHeader { text, warnings })
    }

    /// Rebuild the table from scratch, emit again, and compare.
    fn verify_determinism(&self, table: &SymbolTable, text: &str) -> Result<(), InternalError> {
        let rebuilt = SymbolTable::from_extension(table.extension().clone());
        let again = Emitter::new(&rebuilt, self.config.emit_options()).emit()?;
        if again == text {
            return Ok(());
        }

        let line = text
            .lines()
            .zip(again.lines())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| text.lines().count().min(again.lines().count()));
        Err(InternalError::NonDeterministic(format!(
            "second emission differs at line {}",
            line + 1
        )))
    }
}

/// Run the pipeline once with `config`.
pub fn generate(builder: ExtensionBuilder, config: GeneratorConfig) -> GenerateResult<GeneratedHeader> {
    Generator::new(config).generate(builder)
}
