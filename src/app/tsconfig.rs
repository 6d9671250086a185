use crate::app::error::EmitError;
use crate::app::models::{EntrySet, OutputEntry};
use serde::{Deserialize, Serialize};

/// Relative path of the generated backend compiler config.
pub const TSCONFIG_PATH: &str = "backend/tsconfig.json";

/// Top-level tsconfig document. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigDocument {
    pub compiler_options: CompilerOptions,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompilerOptions {
    pub target: String,
    pub module: String,
    pub lib: Vec<String>,
    pub out_dir: String,
    pub root_dir: String,
    pub strict: bool,
    pub es_module_interop: bool,
    pub skip_lib_check: bool,
    pub force_consistent_casing_in_file_names: bool,
    pub resolve_json_module: bool,
    pub module_resolution: String,
}

impl ConfigDocument {
    /// The Node backend configuration: ES2020 CommonJS build from `src` to `dist`.
    pub fn backend() -> Self {
        Self {
            compiler_options: CompilerOptions {
                target: "ES2020".into(),
                module: "commonjs".into(),
                lib: vec!["ES2020".into()],
                out_dir: "./dist".into(),
                root_dir: "./src".into(),
                strict: true,
                es_module_interop: true,
                skip_lib_check: true,
                force_consistent_casing_in_file_names: true,
                resolve_json_module: true,
                module_resolution: "node".into(),
            },
            include: vec!["src/**/*".into()],
            exclude: vec!["node_modules".into(), "dist".into()],
        }
    }

    /// Pretty JSON with 2-space indentation and no trailing newline.
    pub fn render(&self) -> Result<String, EmitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds the built-in entries followed by any extras, in that order.
pub fn default_entries(extra: &[OutputEntry]) -> Result<EntrySet, EmitError> {
    let mut entries = EntrySet::new();
    entries.push(OutputEntry::new(
        TSCONFIG_PATH,
        ConfigDocument::backend().render()?,
    ))?;
    for entry in extra {
        entries.push(entry.clone())?;
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn backend_document_has_exact_fields() {
        let rendered = ConfigDocument::backend().render().unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        let expected = json!({
            "compilerOptions": {
                "target": "ES2020",
                "module": "commonjs",
                "lib": ["ES2020"],
                "outDir": "./dist",
                "rootDir": "./src",
                "strict": true,
                "esModuleInterop": true,
                "skipLibCheck": true,
                "forceConsistentCasingInFileNames": true,
                "resolveJsonModule": true,
                "moduleResolution": "node"
            },
            "include": ["src/**/*"],
            "exclude": ["node_modules", "dist"]
        });
        assert_eq!(value, expected);
    }

    #[test]
    fn renders_with_two_space_indent_in_declared_order() {
        let rendered = ConfigDocument::backend().render().unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "{");
        assert_eq!(lines[1], "  \"compilerOptions\": {");
        assert_eq!(lines[2], "    \"target\": \"ES2020\",");
        assert_eq!(lines.last(), Some(&"}"));
        assert!(!rendered.ends_with('\n'));

        let include = rendered.find("\"include\"").unwrap();
        let exclude = rendered.find("\"exclude\"").unwrap();
        assert!(rendered.find("\"compilerOptions\"").unwrap() < include);
        assert!(include < exclude);
    }

    #[test]
    fn parses_back_into_the_same_document() {
        let doc = ConfigDocument::backend();
        let parsed: ConfigDocument = serde_json::from_str(&doc.render().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn default_entries_start_with_tsconfig() {
        let extra = vec![OutputEntry::new("backend/.nvmrc", "20\n")];
        let entries = default_entries(&extra).unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path.to_string_lossy().into_owned()).collect();
        assert_eq!(paths, vec![TSCONFIG_PATH, "backend/.nvmrc"]);
    }

    #[test]
    fn default_entries_reject_shadowing_the_builtin() {
        for path in [TSCONFIG_PATH, "./backend/tsconfig.json"] {
            let extra = vec![OutputEntry::new(path, "{}")];
            assert!(
                matches!(default_entries(&extra), Err(EmitError::DuplicatePath(_))),
                "{path}"
            );
        }
    }
}
