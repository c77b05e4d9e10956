use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Language {
    pub id: &'static str,
    pub name: &'static str,
    pub extension: &'static str
}

#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
    pub language: &'static str,
    pub framework: &'static str
}

#[derive(Debug, Serialize)]
pub struct TemplateInfo {
    #[serde(flatten)]
    pub template: Template,
    pub variables: Vec<String>
}

pub const LANGUAGES: &[Language] = &[
    Language { id: "typescript", name: "TypeScript", extension: ".ts" },
    Language { id: "javascript", name: "JavaScript", extension: ".js" },
    Language { id: "python", name: "Python", extension: ".py" },
    Language { id: "rust", name: "Rust", extension: ".rs" },
    Language { id: "go", name: "Go", extension: ".go" },
    Language { id: "java", name: "Java", extension: ".java" },
    Language { id: "csharp", name: "C#", extension: ".cs" },
    Language { id: "cpp", name: "C++", extension: ".cpp" },
    Language { id: "html", name: "HTML", extension: ".html" },
    Language { id: "css", name: "CSS", extension: ".css" },
    Language { id: "sql", name: "SQL", extension: ".sql" },
    Language { id: "yaml", name: "YAML", extension: ".yaml" },
    Language { id: "json", name: "JSON", extension: ".json" },
    Language { id: "markdown", name: "Markdown", extension: ".md" }
];

pub const TEMPLATES: &[Template] = &[
    Template {
        key: "react_component",
        name: "React Component",
        description: "Generate a React functional component",
        prompt: "Create a React functional component named {componentName} that {description}. Use TypeScript and modern React patterns.",
        language: "typescript",
        framework: "react"
    },
    Template {
        key: "api_endpoint",
        name: "API Endpoint",
        description: "Generate an API endpoint",
        prompt: "Create a {method} API endpoint for {resource} that {description}. Include proper error handling and validation.",
        language: "typescript",
        framework: "nodejs"
    },
    Template {
        key: "database_model",
        name: "Database Model",
        description: "Generate a database model",
        prompt: "Create a database model for {modelName} with the following fields: {fields}. Include validation and relationships.",
        language: "typescript",
        framework: "prisma"
    },
    Template {
        key: "utility_function",
        name: "Utility Function",
        description: "Generate a utility function",
        prompt: "Create a utility function that {description}. Make it type-safe and include error handling.",
        language: "typescript",
        framework: "none"
    },
    Template {
        key: "test_suite",
        name: "Test Suite",
        description: "Generate test cases",
        prompt: "Create comprehensive tests for {target} that cover {testCases}. Use modern testing practices.",
        language: "typescript",
        framework: "jest"
    }
];

pub fn find_template(key: &str) -> Option<&'static Template> {

    TEMPLATES.iter().find(|t| t.key == key)

}

pub fn template_infos() -> Vec<TemplateInfo> {

    TEMPLATES
        .iter()
        .map(|t| TemplateInfo { template: t.clone(), variables: t.variables() })
        .collect()

}

impl Template {

    /// Placeholder names in prompt order, without duplicates.
    pub fn variables(&self) -> Vec<String> {

        let mut names: Vec<String> = Vec::new();
        let mut rest = self.prompt;

        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else { break };
            let name = &after[..end];
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
            rest = &after[end + 1..];
        }

        names

    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_template_variables_in_order() {

        let template = find_template("api_endpoint").unwrap();
        assert_eq!(template.variables(), vec!["method", "resource", "description"]);

    }

    #[test]
    fn test_every_template_has_variables() {

        for info in template_infos() {
            assert!(!info.variables.is_empty(), "{} has no placeholders", info.template.key);
        }

    }

    #[test]
    fn test_lookups() {

        assert!(LANGUAGES.iter().any(|l| l.id == "rust" && l.extension == ".rs"));
        assert!(find_template("react_component").is_some());
        assert!(find_template("missing").is_none());

    }

}
