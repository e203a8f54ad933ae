use schemars::gen::SchemaGenerator;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Trait for model response types that must satisfy a strict contract
///
/// Deserialization checks field presence and types; `validate` covers the
/// constraints serde cannot express (non-empty text, enumerated values).
pub trait StructuredResponse: DeserializeOwned + JsonSchema {
    /// Check value-level constraints after deserialization
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Generate JSON schema string for use in model prompts
    fn json_schema_string() -> String {
        let mut gen = SchemaGenerator::default();
        let schema = gen.root_schema_for::<Self>();
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
    }
}
