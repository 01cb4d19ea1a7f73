//! Per-compilation options

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilationOptions {
    /// Name reported in diagnostics
    pub filename: String,
    /// Register the built-in operator set when the compilation is created
    #[serde(default = "default_true")]
    pub builtin_operators: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            filename: "<input>".to_string(),
            builtin_operators: true,
        }
    }
}

impl CompilationOptions {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let options = CompilationOptions::from_json(r#"{ "filename": "main.tn" }"#).unwrap();
        assert_eq!(options.filename, "main.tn");
        assert!(options.builtin_operators);

        let options = CompilationOptions::from_json("{}").unwrap();
        assert_eq!(options, CompilationOptions::default());
    }

    #[test]
    fn test_disable_builtins() {
        let options = CompilationOptions::from_json(r#"{ "builtin_operators": false }"#).unwrap();
        assert!(!options.builtin_operators);
        assert_eq!(options.filename, "<input>");
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(CompilationOptions::from_json("{ filename }").is_err());
    }
}
