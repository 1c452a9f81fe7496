//! Parser for textual message definitions.
//!
//! A definition is a sequence of field lines, one per non-blank,
//! non-comment line: `<type-spec> <name>`. The type-spec is a primitive
//! keyword, a `package/Type` reference, or a bare `Type` reference that
//! the resolver later qualifies against the enclosing definition's
//! package, optionally followed by `[]` (variable array) or `[N]` (fixed
//! array). `#` starts a comment that runs to the end of the line.
//! Constant declarations (lines containing `=`) are not supported.

use std::str::FromStr;

use crate::error::DynamicError;
use crate::schema::{Arity, PrimitiveType, split_type_name};

/// A field declaration before nested references are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedField {
    pub name: String,
    pub field_type: ParsedFieldType,
    pub arity: Arity,
}

/// A field's declared type before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedFieldType {
    Primitive(PrimitiveType),
    /// A message type reference: `package/Type`, or a bare `Type` to be
    /// qualified against the enclosing definition's package.
    Reference(String),
}

/// The outcome of parsing one definition.
#[derive(Debug, Clone)]
pub struct ParsedDefinition {
    pub package: String,
    pub name: String,
    pub fields: Vec<ParsedField>,
}

impl ParsedDefinition {
    /// Referenced type names in first-appearance order, bare names still
    /// unqualified.
    pub fn references(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for field in &self.fields {
            if let ParsedFieldType::Reference(r) = &field.field_type {
                if !seen.contains(&r.as_str()) {
                    seen.push(r);
                }
            }
        }
        seen
    }
}

/// Parse definition text for the given type name.
///
/// Field order is line order. Fails with `Parse` (carrying the 1-based
/// line number) on any malformed line.
pub fn parse(type_name: &str, source: &str) -> Result<ParsedDefinition, DynamicError> {
    let (package, name) = split_type_name(type_name)?;

    let mut fields: Vec<ParsedField> = Vec::new();
    for (line_idx, raw_line) in source.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let field = parse_field(type_name, line, line_idx + 1)?;
        if fields.iter().any(|f| f.name == field.name) {
            return Err(parse_error(
                type_name,
                line_idx + 1,
                format!("duplicate field name '{}'", field.name),
            ));
        }
        fields.push(field);
    }

    Ok(ParsedDefinition {
        package: package.to_owned(),
        name: name.to_owned(),
        fields,
    })
}

fn parse_field(type_name: &str, line: &str, line_num: usize) -> Result<ParsedField, DynamicError> {
    // Constant declarations are out of scope for this codec.
    if line.contains('=') {
        return Err(parse_error(
            type_name,
            line_num,
            "constant declarations are not supported".to_owned(),
        ));
    }

    let mut tokens = line.split_whitespace();
    let (Some(type_spec), Some(name), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(parse_error(
            type_name,
            line_num,
            format!("expected '<type> <name>', found '{}'", line),
        ));
    };

    if !is_identifier(name) {
        return Err(parse_error(
            type_name,
            line_num,
            format!("invalid field name '{}'", name),
        ));
    }

    let (base, arity) =
        split_array_suffix(type_spec).map_err(|reason| parse_error(type_name, line_num, reason))?;

    let field_type = if let Ok(primitive) = PrimitiveType::from_str(base) {
        ParsedFieldType::Primitive(primitive)
    } else if base == "Header" {
        // Bare Header is shorthand for the standard header type.
        ParsedFieldType::Reference("std_msgs/Header".to_owned())
    } else if base.contains('/') {
        split_type_name(base).map_err(|_| {
            parse_error(
                type_name,
                line_num,
                format!("malformed type reference '{}'", base),
            )
        })?;
        ParsedFieldType::Reference(base.to_owned())
    } else if is_identifier(base) {
        ParsedFieldType::Reference(base.to_owned())
    } else {
        return Err(parse_error(
            type_name,
            line_num,
            format!("unrecognized type '{}'", base),
        ));
    };

    Ok(ParsedField {
        name: name.to_owned(),
        field_type,
        arity,
    })
}

/// Split an optional `[]` / `[N]` suffix off a type-spec token.
fn split_array_suffix(type_spec: &str) -> Result<(&str, Arity), String> {
    let Some(open) = type_spec.find('[') else {
        return Ok((type_spec, Arity::Scalar));
    };
    let (base, suffix) = type_spec.split_at(open);
    if suffix == "[]" {
        return Ok((base, Arity::Variable));
    }
    let inner = suffix
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| format!("malformed array suffix '{}'", suffix))?;
    let len = inner
        .parse::<usize>()
        .map_err(|_| format!("malformed array length '{}'", inner))?;
    Ok((base, Arity::Fixed(len)))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_error(type_name: &str, line: usize, reason: String) -> DynamicError {
    DynamicError::Parse {
        type_name: type_name.to_owned(),
        line,
        reason,
    }
}
