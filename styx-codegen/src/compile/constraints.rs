//! Runtime checks on caller-provided values.

use styx_ir::{Cardinality, DefaultValue, GroupConstraint, Param, ParamBody, StructBody};

use super::{SymbolTable, access};
use crate::{
    Result,
    language::{CompareOp, LanguageProvider, LineBuffer},
};

/// Value range checks for every member, then group cardinality checks.
pub(crate) fn compile_constraint_checks(
    lang: &dyn LanguageProvider,
    symbols: &SymbolTable<'_>,
    body: &StructBody,
    via_self: bool,
) -> Result<LineBuffer> {
    let mut buf = Vec::new();

    for param in body.iter_params() {
        let name = symbols.var(param.id)?;
        let symbol = access(lang, name, via_self);
        let is_set = if param.nullable {
            lang.param_var_is_set_by_user(param, &symbol)
        } else {
            None
        };
        for (violation, message) in value_checks(lang, param, name, &symbol) {
            let condition = match &is_set {
                Some(is_set) => {
                    lang.expr_conditions_join_and(&[is_set.clone(), lang.expr_parens(&violation)])
                }
                None => violation,
            };
            buf.extend(lang.if_else_block(
                &condition,
                lang.raise_constraint_violation(&message),
                None,
            ));
        }
    }

    for constraint in &body.constraints {
        buf.extend(group_check(lang, symbols, constraint, via_self)?);
    }

    Ok(buf)
}

/// Violation conditions and messages for a parameter's declared bounds.
///
/// Lists are checked for their length; numeric scalars for their range.
fn value_checks(
    lang: &dyn LanguageProvider,
    param: &Param,
    name: &str,
    symbol: &str,
) -> Vec<(String, String)> {
    let mut checks = Vec::new();

    if let Some(list) = &param.list {
        let len = lang.expr_len(symbol);
        if let Some(min) = list.count_min {
            checks.push((
                lang.expr_compare(&len, CompareOp::Lt, &min.to_string()),
                format!("Parameter `{name}` must contain at least {min} value(s)"),
            ));
        }
        if let Some(max) = list.count_max {
            checks.push((
                lang.expr_compare(&len, CompareOp::Gt, &max.to_string()),
                format!("Parameter `{name}` must contain at most {max} value(s)"),
            ));
        }
        return checks;
    }

    let (min, max) = match &param.body {
        ParamBody::Int(int) => (
            int.min.map(|v| (lang.expr_int(v), v.to_string())),
            int.max.map(|v| (lang.expr_int(v), v.to_string())),
        ),
        ParamBody::Float(float) => (
            float.min.map(|v| (float_literal(lang, v), v.to_string())),
            float.max.map(|v| (float_literal(lang, v), v.to_string())),
        ),
        ParamBody::String(_)
        | ParamBody::Bool(_)
        | ParamBody::File(_)
        | ParamBody::Struct(_)
        | ParamBody::StructUnion(_) => (None, None),
    };

    match (min, max) {
        (Some((min_expr, min)), Some((max_expr, max))) => checks.push((
            lang.expr_conditions_join_or(&[
                lang.expr_compare(symbol, CompareOp::Lt, &min_expr),
                lang.expr_compare(symbol, CompareOp::Gt, &max_expr),
            ]),
            format!("Parameter `{name}` must be between {min} and {max} (inclusive)"),
        )),
        (Some((min_expr, min)), None) => checks.push((
            lang.expr_compare(symbol, CompareOp::Lt, &min_expr),
            format!("Parameter `{name}` must be at least {min}"),
        )),
        (None, Some((max_expr, max))) => checks.push((
            lang.expr_compare(symbol, CompareOp::Gt, &max_expr),
            format!("Parameter `{name}` must be at most {max}"),
        )),
        (None, None) => {}
    }
    checks
}

fn float_literal(lang: &dyn LanguageProvider, value: f64) -> String {
    lang.expr_literal(&DefaultValue::Float(value))
}

/// Cardinality check over the "is set" state of a constraint's members.
fn group_check(
    lang: &dyn LanguageProvider,
    symbols: &SymbolTable<'_>,
    constraint: &GroupConstraint,
    via_self: bool,
) -> Result<LineBuffer> {
    if constraint.kind == Cardinality::None || constraint.members.is_empty() {
        return Ok(Vec::new());
    }

    let mut predicates = Vec::with_capacity(constraint.members.len());
    let mut names = Vec::with_capacity(constraint.members.len());
    for id in &constraint.members {
        let param = symbols.param(*id)?;
        let name = symbols.var(*id)?;
        let symbol = access(lang, name, via_self);
        predicates.push(
            lang.param_var_is_set_by_user(param, &symbol)
                .unwrap_or_else(|| lang.expr_bool(true)),
        );
        names.push(format!("`{name}`"));
    }
    let names = names.join(", ");
    let count = lang.expr_count_true(&predicates);
    let total = predicates.len().to_string();

    let (violation, message) = match constraint.kind {
        Cardinality::None => return Ok(Vec::new()),
        Cardinality::ExactlyOne => (
            lang.expr_compare(&count, CompareOp::Ne, "1"),
            format!("Exactly one of {names} must be set"),
        ),
        Cardinality::AtMostOne => (
            lang.expr_compare(&count, CompareOp::Gt, "1"),
            format!("At most one of {names} may be set"),
        ),
        Cardinality::AtLeastOne => (
            lang.expr_compare(&count, CompareOp::Lt, "1"),
            format!("At least one of {names} must be set"),
        ),
        Cardinality::AllOrNone => (
            lang.expr_conditions_join_and(&[
                lang.expr_compare(&count, CompareOp::Gt, "0"),
                lang.expr_compare(&count, CompareOp::Lt, &total),
            ]),
            format!("Either all or none of {names} must be set"),
        ),
    };

    Ok(lang.if_else_block(&violation, lang.raise_constraint_violation(&message), None))
}
