//! Convenience operations that phrase a prompt around a piece of code and
//! then go through the regular relay path.

use std::collections::HashMap;

use crate::catalog::find_template;
use crate::error::RelayError;
use crate::models::{
    ExplainRequest, GenerationRequest, ImproveRequest, RefactorRequest, TemplateRequest, TestsRequest
};

pub fn improve(request: ImproveRequest) -> Result<GenerationRequest, RelayError> {

    let code = required("code", &request.code)?;
    let instructions = required("instructions", &request.instructions)?;
    let language = language_or_detect(request.language, code);

    let prompt = format!(
        "Improve the following {} based on these instructions: {}\n\nCode:\n{}",
        language, instructions, code
    );

    Ok(derived(prompt, language, None, "code_improvement"))

}

pub fn explain(request: ExplainRequest) -> Result<GenerationRequest, RelayError> {

    let code = required("code", &request.code)?;
    let language = language_or_detect(request.language, code);

    let prompt = format!(
        "Explain the following {} in detail. Provide a clear explanation and suggest potential improvements:\n\nCode:\n{}",
        language, code
    );

    Ok(derived(prompt, language, None, "code_explanation"))

}

pub fn generate_tests(request: TestsRequest) -> Result<GenerationRequest, RelayError> {

    let code = required("code", &request.code)?;
    let language = language_or_detect(request.language, code);
    let framework = request.framework.filter(|f| !f.trim().is_empty());

    let prompt = format!(
        "Generate comprehensive tests for the following {}. Use {}:\n\nCode:\n{}",
        language,
        framework.as_deref().unwrap_or("appropriate testing framework"),
        code
    );

    Ok(derived(prompt, language, framework, "test_generation"))

}

pub fn refactor(request: RefactorRequest) -> Result<GenerationRequest, RelayError> {

    let code = required("code", &request.code)?;
    let refactor_type = required("refactorType", &request.refactor_type)?;
    let language = language_or_detect(request.language, code);

    let prompt = format!(
        "Refactor the following {} to {}. Maintain functionality while improving code quality:\n\nCode:\n{}",
        language, refactor_type, code
    );

    Ok(derived(prompt, language, None, "code_refactoring"))

}

pub fn from_template(request: TemplateRequest) -> Result<GenerationRequest, RelayError> {

    let template = find_template(&request.template)
        .ok_or_else(|| RelayError::TemplateNotFound(request.template.clone()))?;

    let prompt = fill_placeholders(template.prompt, &request.variables);

    Ok(GenerationRequest {
        prompt: Some(prompt),
        language: Some(template.language.to_string()),
        framework: Some(template.framework.to_string()),
        context: None
    })

}

// single left-to-right pass; substituted values are never rescanned and
// unknown placeholders are left untouched
pub fn fill_placeholders(template: &str, variables: &HashMap<String, String>) -> String {

    let mut prompt = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else { break };
        let name = &after[..end];

        prompt.push_str(&rest[..start]);
        match variables.get(name) {
            Some(value) => prompt.push_str(value),
            None => prompt.push_str(&rest[start..start + end + 2])
        }
        rest = &after[end + 1..];
    }

    prompt.push_str(rest);
    prompt

}

/// Best-effort guess from a few telltale tokens, `typescript` otherwise.
pub fn detect_language(code: &str) -> &'static str {

    let rules: [(&[&str], &'static str); 7] = [
        (&["import React", "export default"], "typescript"),
        (&["def ", "import "], "python"),
        (&["func ", "package "], "go"),
        (&["fn ", "use "], "rust"),
        (&["public class", "import java"], "java"),
        (&["SELECT", "INSERT"], "sql"),
        (&["<html", "<!DOCTYPE"], "html")
    ];

    for (needles, language) in rules {
        if needles.iter().any(|n| code.contains(n)) {
            return language;
        }
    }

    if code.contains('{') && code.contains('}') {
        return "json";
    }

    "typescript"

}

// blank check only, the value is embedded as submitted
fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, RelayError> {

    if value.trim().is_empty() {
        return Err(RelayError::InvalidInput(format!("{} is required", field)));
    }

    Ok(value)

}

fn language_or_detect(language: Option<String>, code: &str) -> String {

    language
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| detect_language(code).to_string())

}

fn derived(prompt: String, language: String, framework: Option<String>, context: &str) -> GenerationRequest {

    GenerationRequest {
        prompt: Some(prompt),
        language: Some(language),
        framework,
        context: Some(context.to_string())
    }

}
