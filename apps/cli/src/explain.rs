//! Text rendering of a spec tree for `sift explain`.

use std::fmt::Write;

use sift_factory::{GroupSpec, InputSpec, NodeSpec};

const INDENT: &str = "  ";

/// Renders one line per node, children indented under their group.
pub fn render(spec: &GroupSpec) -> String {
    let mut out = String::new();
    render_group(&mut out, spec, 0);
    out
}

fn render_group(out: &mut String, spec: &GroupSpec, depth: usize) {
    for (name, node) in &spec.inputs {
        let pad = INDENT.repeat(depth);
        match node {
            NodeSpec::Input(input) => line(out, &pad, name, "input", &input_flags(input)),
            NodeSpec::List(input) => line(out, &pad, name, "list", &input_flags(input)),
            NodeSpec::Group { inputs } => {
                line(out, &pad, name, "group", &[]);
                render_group(out, inputs, depth + 1);
            }
            NodeSpec::OptionalGroup { inputs } => {
                line(out, &pad, name, "optional_group", &[]);
                render_group(out, inputs, depth + 1);
            }
            NodeSpec::Collection(collection) => {
                let mut flags = vec![presence(collection.required)];
                if let Some(count) = collection.count {
                    flags.push(format!("count={count}"));
                }
                line(out, &pad, name, "collection", &flags);
                render_group(out, &collection.input_filter, depth + 1);
            }
        }
    }
}

fn line(out: &mut String, pad: &str, name: &str, kind: &str, flags: &[String]) {
    let _ = write!(out, "{pad}{name} ({kind})");
    if !flags.is_empty() {
        let _ = write!(out, " [{}]", flags.join(", "));
    }
    out.push('\n');
}

fn presence(required: bool) -> String {
    if required { "required" } else { "optional" }.to_string()
}

fn input_flags(input: &InputSpec) -> Vec<String> {
    let mut flags = vec![presence(input.required)];
    for (set, flag) in [
        (input.allow_empty, "allow_empty"),
        (input.continue_if_empty, "continue_if_empty"),
        (input.break_on_failure, "break_on_failure"),
        (input.fallback_value.is_some(), "fallback"),
        (input.error_message.is_some(), "error_message"),
    ] {
        if set {
            flags.push(flag.to_string());
        }
    }
    if !input.filters.is_empty() {
        let names: Vec<_> = input.filters.iter().map(|f| f.name.as_str()).collect();
        flags.push(format!("filters: {}", names.join(" > ")));
    }
    if !input.validators.is_empty() {
        let names: Vec<_> = input.validators.iter().map(|v| v.name.as_str()).collect();
        flags.push(format!("validators: {}", names.join(" > ")));
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_nested_tree() {
        let spec = GroupSpec::from_yaml(
            r"
email:
  filters: [{name: string_trim}]
  validators: [{name: not_empty}, {name: email_address}]
tags:
  type: list
  required: false
address:
  type: optional_group
  inputs:
    city: {allow_empty: true}
lines:
  type: collection
  required: true
  count: 2
  input_filter:
    sku: {fallback_value: none}
",
        )
        .unwrap();

        assert_eq!(
            render(&spec),
            "email (input) [required, filters: string_trim, validators: not_empty > email_address]\n\
             tags (list) [optional]\n\
             address (optional_group)\n\
             \x20 city (input) [required, allow_empty]\n\
             lines (collection) [required, count=2]\n\
             \x20 sku (input) [required, fallback]\n"
        );
    }

    #[test]
    fn empty_spec_renders_nothing() {
        assert_eq!(render(&GroupSpec::default()), "");
    }
}
