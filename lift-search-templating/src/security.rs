//! Security validation for template content
//!
//! Built-in control templates are trusted. Templates supplied through
//! configuration are validated as untrusted before they are used for
//! rendering, to bound their size and complexity.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, TemplatingError};

/// Maximum allowed template size in bytes for untrusted templates
pub const MAX_TEMPLATE_SIZE: usize = 100_000;

/// Maximum allowed nesting depth of control structures
pub const MAX_TEMPLATE_RECURSION_DEPTH: usize = 10;

/// Maximum allowed distinct template variables per template
pub const MAX_TEMPLATE_VARIABLES: usize = 1000;

/// Validates template content for security risks
///
/// # Arguments
///
/// * `template_content` - The template content to validate
/// * `is_trusted` - Whether this template comes from a trusted source
///
/// # Returns
///
/// Ok if the template is safe to render, error if it poses security risks
pub fn validate_template_security(template_content: &str, is_trusted: bool) -> Result<()> {
    if is_trusted {
        // Even trusted templates should have reasonable size limits
        if template_content.len() > MAX_TEMPLATE_SIZE * 10 {
            return Err(TemplatingError::Security(format!(
                "Template too large: {} bytes (max allowed for trusted: {})",
                template_content.len(),
                MAX_TEMPLATE_SIZE * 10
            )));
        }
        return Ok(());
    }

    if template_content.len() > MAX_TEMPLATE_SIZE {
        return Err(TemplatingError::Security(format!(
            "Template too large: {} bytes (max allowed: {MAX_TEMPLATE_SIZE})",
            template_content.len()
        )));
    }

    let variable_count = count_template_variables(template_content);
    if variable_count > MAX_TEMPLATE_VARIABLES {
        return Err(TemplatingError::Security(format!(
            "Too many template variables: {variable_count} (max allowed: {MAX_TEMPLATE_VARIABLES})"
        )));
    }

    let max_nesting = check_template_nesting_depth(template_content);
    if max_nesting > MAX_TEMPLATE_RECURSION_DEPTH {
        return Err(TemplatingError::Security(format!(
            "Template nesting too deep: {max_nesting} levels (max allowed: {MAX_TEMPLATE_RECURSION_DEPTH})"
        )));
    }

    Ok(())
}

fn variable_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*(\w+)").expect("valid variable regex"))
}

fn open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{%-?\s*(if|unless|for|capture|case|tablerow)\b").expect("valid open regex")
    })
}

fn close_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{%-?\s*(endif|endunless|endfor|endcapture|endcase|endtablerow)\b")
            .expect("valid close regex")
    })
}

/// Count the number of distinct template variables in a template
fn count_template_variables(template: &str) -> usize {
    let mut variables = std::collections::HashSet::new();
    for cap in variable_re().captures_iter(template) {
        variables.insert(cap[1].to_string());
    }
    variables.len()
}

/// Check the maximum nesting depth of template control structures
fn check_template_nesting_depth(template: &str) -> usize {
    let mut max_depth = 0;
    let mut current_depth: usize = 0;
    let mut pos = 0;

    while pos < template.len() {
        let open = open_re().find_at(template, pos);
        let close = close_re().find_at(template, pos);
        match (open, close) {
            (Some(o), Some(c)) if o.start() < c.start() => {
                current_depth += 1;
                max_depth = max_depth.max(current_depth);
                pos = o.end();
            }
            (_, Some(c)) => {
                current_depth = current_depth.saturating_sub(1);
                pos = c.end();
            }
            (Some(o), None) => {
                current_depth += 1;
                max_depth = max_depth.max(current_depth);
                pos = o.end();
            }
            (None, None) => break,
        }
    }

    max_depth
}
