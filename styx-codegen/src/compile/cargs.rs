//! Command-line argument building.
//!
//! Each conditional group becomes one append into the argument buffer,
//! guarded by an `if` when any referenced parameter is optional. The guard
//! is an `or` over those parameters' "is set" predicates. With a single
//! optional occurrence the guard alone decides; with several, each value is
//! additionally substituted by an empty value when unset, so partially
//! provided groups still render correctly.

use styx_ir::{StructBody, Token};

use super::{CARGS, EXECUTION, SymbolTable, access};
use crate::{
    Result,
    language::{LanguageProvider, LineBuffer, MStr},
};

pub(crate) fn compile_cargs_building(
    lang: &dyn LanguageProvider,
    symbols: &SymbolTable<'_>,
    body: &StructBody,
    via_self: bool,
) -> Result<LineBuffer> {
    let mut buf = lang.cargs_declare(CARGS);

    for group in &body.groups {
        let mut conditions: Vec<String> = Vec::new();
        let mut plain: Vec<MStr> = Vec::with_capacity(group.cargs.len());
        let mut guarded: Vec<MStr> = Vec::with_capacity(group.cargs.len());

        for carg in &group.cargs {
            let mut carg_plain = Vec::with_capacity(carg.tokens.len());
            let mut carg_guarded = Vec::with_capacity(carg.tokens.len());
            for token in &carg.tokens {
                match token {
                    Token::Literal(text) => {
                        let mstr = MStr::single(lang.expr_str(text));
                        carg_guarded.push(mstr.clone());
                        carg_plain.push(mstr);
                    }
                    Token::Param(id) => {
                        let param = symbols.param(*id)?;
                        let symbol = access(lang, symbols.var(*id)?, via_self);
                        let mstr = lang.param_var_to_mstr(param, &symbol, EXECUTION);
                        match lang.param_var_is_set_by_user(param, &symbol) {
                            Some(condition) => {
                                let expr = lang.expr_ternary(
                                    &condition,
                                    &mstr.expr,
                                    &lang.mstr_empty_literal_like(&mstr),
                                );
                                carg_guarded.push(MStr::new(expr, mstr.is_list));
                                conditions.push(condition);
                            }
                            None => carg_guarded.push(mstr.clone()),
                        }
                        carg_plain.push(mstr);
                    }
                }
            }
            plain.push(join_word(lang, carg_plain));
            guarded.push(join_word(lang, carg_guarded));
        }

        let values = if conditions.len() > 1 { &guarded } else { &plain };
        let append = lang.mstr_cargs_add(CARGS, values);
        if conditions.is_empty() {
            buf.extend(append);
        } else {
            buf.extend(lang.if_else_block(&lang.expr_conditions_join_or(&conditions), append, None));
        }
    }

    Ok(buf)
}

/// One command-line word from its tokens.
fn join_word(lang: &dyn LanguageProvider, mut tokens: Vec<MStr>) -> MStr {
    if tokens.len() == 1 {
        tokens.remove(0)
    } else {
        lang.mstr_concat(&tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, stub::StubProvider};

    fn build(iface: &styx_ir::Interface, via_self: bool) -> LineBuffer {
        let symbols = SymbolTable::build(&StubProvider, iface).unwrap();
        let body = iface.command.as_struct().unwrap();
        compile_cargs_building(&StubProvider, &symbols, body, via_self).unwrap()
    }

    #[test]
    fn test_guard_forms() {
        let lines = build(&fixtures::guards(), false);

        assert_eq!(
            lines[..6],
            [
                "cargs = []",
                "cargs.extend([\"-i\", input])",
                "if out is not None:",
                "    cargs.extend([\"-o\", out])",
                "if a is not None or b is not None:",
                "    cargs.extend([\"-r\", (str(a) if a is not None else \"\") + \"x\" + (str(b) if b is not None else \"\")])",
            ]
        );
    }

    #[test]
    fn test_members_read_through_self() {
        let lines = build(&fixtures::round_trip(), true);

        assert_eq!(
            lines,
            [
                "cargs = []",
                "cargs.extend([\"round_trip\"])",
                "if self.verbose is not None:",
                "    cargs.extend([*flag(self.verbose)])",
                "cargs.extend([self.name])",
            ]
        );
    }

    #[test]
    fn test_no_groups_only_declares() {
        let iface = fixtures::interface("bare", StructBody::default());
        assert_eq!(build(&iface, false), ["cargs = []"]);
    }
}
