// ABOUTME: Placeholder substitution for `{name}` tokens in prompt templates
// ABOUTME: Single-pass rendering so substituted values are never re-expanded

use crate::PromptKind;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid");
}

/// Replace every `{name}` occurrence with its value. Unknown tokens are left as-is.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let map: HashMap<&str, &str> = values.iter().copied().collect();
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| match map.get(&caps[1]) {
            Some(value) => (*value).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Like [`render`], but each name in `fields` that has no value renders as the empty string
pub fn render_with_fields(template: &str, fields: &[&str], values: &[(&str, &str)]) -> String {
    let mut all: Vec<(&str, &str)> = values.to_vec();
    for field in fields {
        if !values.iter().any(|(name, _)| name == field) {
            all.push((*field, ""));
        }
    }
    render(template, &all)
}

/// Distinct placeholder names in order of first appearance
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Fill a template with free-form admin test input.
///
/// PRD templates read the input as `key: value` lines and substitute `{key}`,
/// matching the key case-insensitively. Every other kind substitutes `{input}`.
pub fn substitute_test_input(kind: PromptKind, template: &str, input: &str) -> String {
    if kind != PromptKind::PrdGeneration {
        return render(template, &[("input", input)]);
    }

    let mut pairs: HashMap<String, String> = HashMap::new();
    for line in input.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if !key.is_empty() && !value.is_empty() {
            pairs.insert(key.to_lowercase(), value.to_string());
        }
    }

    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            match pairs.get(&caps[1].to_lowercase()) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_replaces_every_occurrence() {
        let out = render("{title} / {title} / {other}", &[("title", "앱")]);
        assert_eq!(out, "앱 / 앱 / {other}");
    }

    #[test]
    fn test_render_does_not_reexpand_values() {
        let out = render("{a} {b}", &[("a", "{b}"), ("b", "x")]);
        assert_eq!(out, "{b} x");
    }

    #[test]
    fn test_render_ignores_json_braces() {
        let template = r#"응답 예시: {"title": "..."} 제목: {title}"#;
        let out = render(template, &[("title", "T")]);
        assert_eq!(out, r#"응답 예시: {"title": "..."} 제목: T"#);
    }

    #[test]
    fn test_render_with_fields_blanks_missing_values() {
        let out = render_with_fields(
            "{title}|{constraints}|{extra}",
            &["title", "constraints"],
            &[("title", "T")],
        );
        assert_eq!(out, "T||{extra}");
    }

    #[test]
    fn test_placeholders_are_distinct_and_ordered() {
        assert_eq!(
            placeholders("{b} {a} {b} {{ {c}"),
            vec!["b".to_string(), "a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_prd_test_input_uses_key_value_lines() {
        let template = "제목: {title}\n대상: {targetAudience}\n기타: {objectives}";
        let input = "Title: 할 일 앱\ntargetAudience: 대학생\n잘못된 줄\nobjectives:";
        let out = substitute_test_input(PromptKind::PrdGeneration, template, input);
        assert_eq!(out, "제목: 할 일 앱\n대상: 대학생\n기타: {objectives}");
    }

    #[test]
    fn test_other_kinds_substitute_input() {
        let out = substitute_test_input(PromptKind::ChatRefinement, "요청: {input} ({input})", "x");
        assert_eq!(out, "요청: x (x)");
    }
}
