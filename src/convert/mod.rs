pub mod fallback;
pub mod normalize;
pub mod prompt;

use crate::config::LlmConfig;
use crate::llm::LlmManager;
use crate::schema::Schema;
use tracing::{debug, info, warn};

/// Default bound on generated output length, in model tokens.
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Which path a converter uses to answer questions. Decided once at
/// construction; there is no transition back to `ModelBacked` after a
/// failed model load.
enum ConverterMode {
    ModelBacked(LlmManager),
    RuleOnly,
}

/// Text-to-SQL conversion pipeline: prompt construction, model invocation,
/// output normalization, with the rule table as fallback. `convert` never
/// returns an error to the caller.
pub struct Converter {
    mode: ConverterMode,
    schema: Schema,
}

impl Converter {
    /// Build a converter for the configured model backend. A backend that
    /// fails to construct is reported and permanently disabled; the
    /// converter then answers every question from the rule table.
    pub fn new(config: &LlmConfig, schema: Schema) -> Self {
        let mode = match LlmManager::new(config) {
            Ok(manager) => {
                info!("Model backend '{}' ready ({})", config.backend, config.model);
                ConverterMode::ModelBacked(manager)
            }
            Err(e) => {
                warn!("Model backend unavailable, using rule-based conversion: {}", e);
                ConverterMode::RuleOnly
            }
        };

        Self { mode, schema }
    }

    /// Build a model-backed converter from an already-constructed manager.
    pub fn with_manager(manager: LlmManager, schema: Schema) -> Self {
        Self {
            mode: ConverterMode::ModelBacked(manager),
            schema,
        }
    }

    /// Build a converter that only ever uses the rule table.
    pub fn rule_only(schema: Schema) -> Self {
        Self {
            mode: ConverterMode::RuleOnly,
            schema,
        }
    }

    /// Convert a question to SQL. A per-call model failure falls back to the
    /// rule table for that call only; the converter stays model-backed.
    pub async fn convert(&self, question: &str, max_length: usize) -> String {
        match &self.mode {
            ConverterMode::RuleOnly => fallback::rule_based(question),
            ConverterMode::ModelBacked(manager) => {
                let input = prompt::build(question, &self.schema);
                debug!("Model input: {}", input);

                match manager.generate(&input, max_length).await {
                    Ok(raw) => normalize::clean(&raw),
                    Err(e) => {
                        warn!("Conversion failed, using rule-based fallback: {}", e);
                        fallback::rule_based(question)
                    }
                }
            }
        }
    }

    /// Convert questions sequentially, returning one `(question, sql)` pair
    /// per input, in input order.
    pub async fn batch_convert(&self, questions: &[String]) -> Vec<(String, String)> {
        let mut results = Vec::with_capacity(questions.len());
        for question in questions {
            let sql = self.convert(question, DEFAULT_MAX_LENGTH).await;
            results.push((question.clone(), sql));
        }
        results
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// "model" or "rules", for status reporting.
    pub fn mode_name(&self) -> &'static str {
        match self.mode {
            ConverterMode::ModelBacked(_) => "model",
            ConverterMode::RuleOnly => "rules",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, SqlGenerator};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedGenerator(String);

    #[async_trait]
    impl SqlGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str, _max_length: usize) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl SqlGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str, _max_length: usize) -> Result<String, LlmError> {
            Err(LlmError::ConnectionError("model host unreachable".to_string()))
        }
    }

    /// Fails every other call, starting with the second.
    struct FlakyGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SqlGenerator for FlakyGenerator {
        async fn generate(&self, _prompt: &str, _max_length: usize) -> Result<String, LlmError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call % 2 == 1 {
                Err(LlmError::ResponseError("transient".to_string()))
            } else {
                Ok("select 1".to_string())
            }
        }
    }

    fn model_backed(generator: impl SqlGenerator + 'static) -> Converter {
        Converter::with_manager(
            LlmManager::from_generator(Box::new(generator)),
            Schema::default_ecommerce(),
        )
    }

    #[tokio::test]
    async fn model_output_is_normalized() {
        let converter = model_backed(FixedGenerator(
            "select  name from customers   where city = 'Paris'".to_string(),
        ));
        let sql = converter.convert("customers in Paris", DEFAULT_MAX_LENGTH).await;
        assert_eq!(sql, "SELECT name FROM customers WHERE city = 'Paris'");
    }

    #[tokio::test]
    async fn per_call_failure_falls_back_without_changing_mode() {
        let converter = model_backed(FailingGenerator);
        assert_eq!(converter.mode_name(), "model");

        let sql = converter.convert("Show me all customers", DEFAULT_MAX_LENGTH).await;
        assert_eq!(sql, "SELECT * FROM customers");

        // Still model-backed after the failed call.
        assert_eq!(converter.mode_name(), "model");
    }

    #[tokio::test]
    async fn failed_backend_construction_degrades_to_rules() {
        let config = LlmConfig {
            backend: "no-such-backend".to_string(),
            model: "irrelevant".to_string(),
            api_key: None,
            api_url: None,
        };
        let converter = Converter::new(&config, Schema::default_ecommerce());

        assert_eq!(converter.mode_name(), "rules");
        let sql = converter.convert("Show all customers", DEFAULT_MAX_LENGTH).await;
        assert_eq!(sql, "SELECT * FROM customers");
    }

    #[tokio::test]
    async fn batch_convert_preserves_order_and_cardinality() {
        let converter = model_backed(FlakyGenerator {
            calls: AtomicUsize::new(0),
        });
        let questions = vec![
            "a".to_string(),
            "Show me all customers".to_string(),
            "c".to_string(),
        ];

        let results = converter.batch_convert(&questions).await;

        assert_eq!(results.len(), 3);
        for (i, (question, sql)) in results.iter().enumerate() {
            assert_eq!(question, &questions[i]);
            assert!(!sql.is_empty());
        }
        // The second call failed and fell back to the rule table.
        assert_eq!(results[1].1, "SELECT * FROM customers");
    }

    #[tokio::test]
    async fn rule_only_converter_never_errors() {
        let converter = Converter::rule_only(Schema::default_ecommerce());
        assert_eq!(
            converter.convert("", DEFAULT_MAX_LENGTH).await,
            "SELECT * FROM customers LIMIT 10"
        );
    }
}
