//! Descriptor checks run before any code is emitted.
//!
//! The checks are split by category so the pipeline can report each as its
//! own lint; [`validate`] runs all of them and fails on the first error.

use std::collections::HashSet;

use styx_ir::{Interface, Param, ParamBody, ParamIndex, StructBody};

use crate::{CompileError, Result};

/// Every error that would abort compilation of `interface`.
pub fn check_interface(interface: &Interface) -> Vec<CompileError> {
    let mut errors = structure_errors(interface);
    if errors.is_empty() {
        errors.extend(reference_errors(interface));
        errors.extend(template_errors(interface));
    }
    errors
}

/// Fail with the first error [`check_interface`] finds.
pub fn validate(interface: &Interface) -> Result<()> {
    match check_interface(interface).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Tree shape errors: non-struct root or union alternatives, duplicate
/// parameter or output ids.
pub fn structure_errors(interface: &Interface) -> Vec<CompileError> {
    let mut errors = Vec::new();
    let command = &interface.command;
    if command.as_struct().is_none() {
        errors.push(CompileError::ExpectedStruct {
            name: command.name.clone(),
        });
    }
    for param in command.iter_params_recursively() {
        if let ParamBody::StructUnion(union) = &param.body {
            for alt in union.alts.iter().filter(|alt| alt.as_struct().is_none()) {
                errors.push(CompileError::ExpectedStruct {
                    name: alt.name.clone(),
                });
            }
        }
    }
    if let Err(err) = ParamIndex::new(command) {
        errors.push(err.into());
    }
    errors.extend(duplicate_output_ids(interface));
    errors
}

/// Output ids used by more than one output or captured stream, once each.
fn duplicate_output_ids(interface: &Interface) -> Vec<CompileError> {
    let streams = [
        &interface.stdout_as_string_output,
        &interface.stderr_as_string_output,
    ];
    let ids = streams
        .into_iter()
        .flatten()
        .map(|stream| stream.id)
        .chain(structs(&interface.command).flat_map(|(_, body)| body.outputs.iter().map(|o| o.id)));

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    ids.filter(|id| !seen.insert(*id) && reported.insert(*id))
        .map(|id| CompileError::DuplicateOutputId { id })
        .collect()
}

/// References from command-line words, constraints and output templates
/// that do not name a parameter of the enclosing struct.
pub fn reference_errors(interface: &Interface) -> Vec<CompileError> {
    let mut errors = Vec::new();
    for (param, body) in structs(&interface.command) {
        for id in body
            .groups
            .iter()
            .flat_map(|group| &group.cargs)
            .flat_map(|carg| carg.param_refs())
        {
            if body.member(id).is_none() {
                errors.push(CompileError::MalformedReference {
                    context: format!("command line of '{}'", param.name),
                    id,
                });
            }
        }
        for constraint in &body.constraints {
            for id in &constraint.members {
                if body.member(*id).is_none() {
                    errors.push(CompileError::MalformedReference {
                        context: format!("constraint in '{}'", param.name),
                        id: *id,
                    });
                }
            }
        }
        for output in &body.outputs {
            for reference in output.param_refs() {
                if body.member(reference.id).is_none() {
                    errors.push(CompileError::MalformedReference {
                        context: format!("output '{}'", output.name),
                        id: reference.id,
                    });
                }
            }
        }
    }
    errors
}

/// Output templates substituting a parameter that has no single string form.
///
/// Unresolvable references are left to [`reference_errors`].
pub fn template_errors(interface: &Interface) -> Vec<CompileError> {
    let mut errors = Vec::new();
    for (_, body) in structs(&interface.command) {
        for output in &body.outputs {
            for reference in output.param_refs() {
                let Some(param) = body.member(reference.id) else {
                    continue;
                };
                if let Some(kind) = unsupported_template_kind(param) {
                    errors.push(CompileError::UnsupportedTemplateType {
                        output: output.name.clone(),
                        param: param.name.clone(),
                        kind: kind.to_string(),
                    });
                }
            }
        }
    }
    errors
}

/// Kind name of a parameter that cannot appear in an output template.
pub(crate) fn unsupported_template_kind(param: &Param) -> Option<&'static str> {
    if param.is_list() {
        return Some("list");
    }
    match &param.body {
        ParamBody::String(_) | ParamBody::Int(_) | ParamBody::Float(_) | ParamBody::File(_) => {
            None
        }
        body @ (ParamBody::Bool(_) | ParamBody::Struct(_) | ParamBody::StructUnion(_)) => {
            Some(body.kind_name())
        }
    }
}

/// Every struct node of the tree, root first.
fn structs(root: &Param) -> impl Iterator<Item = (&Param, &StructBody)> {
    root.iter_params_recursively()
        .filter_map(|param| param.as_struct().map(|body| (param, body)))
}

#[cfg(test)]
mod tests {
    use styx_ir::{
        Carg, Cardinality, GroupConstraint, Output, OutputId, OutputToken, Package, ParamId,
        StdStreamOutput,
    };

    use super::*;

    fn interface(body: StructBody) -> Interface {
        Interface {
            uid: "uid".into(),
            package: Package {
                name: "pkg".into(),
                ..Package::default()
            },
            command: Param::structure(0, "tool", body),
            stdout_as_string_output: None,
            stderr_as_string_output: None,
        }
    }

    #[test]
    fn test_valid_interface_passes() {
        let body = StructBody::default()
            .param(Param::file(1, "input"))
            .group(vec![Carg::param(1)])
            .output(Output::new(1, "out", vec![OutputToken::param_without(1, &[".nii.gz"])]));
        assert!(validate(&interface(body)).is_ok());
    }

    #[test]
    fn test_carg_reference_to_unknown_id() {
        let body = StructBody::default()
            .param(Param::string(1, "x"))
            .group(vec![Carg::param(9)]);
        let errors = check_interface(&interface(body));
        assert_eq!(
            errors,
            vec![CompileError::MalformedReference {
                context: "command line of 'tool'".into(),
                id: ParamId(9),
            }]
        );
    }

    #[test]
    fn test_reference_into_nested_struct_is_malformed() {
        let inner = StructBody::default().param(Param::string(2, "deep"));
        let body = StructBody::default()
            .param(Param::structure(1, "sub", inner))
            .constraint(GroupConstraint::new(Cardinality::ExactlyOne, [2]));
        let errors = reference_errors(&interface(body));
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            CompileError::MalformedReference { id: ParamId(2), .. }
        ));
    }

    #[test]
    fn test_bool_in_output_template_rejected() {
        let body = StructBody::default()
            .param(Param::flag(1, "verbose", "-v"))
            .output(Output::new(1, "log", vec![OutputToken::param(1)]));
        let err = validate(&interface(body)).unwrap_err();
        assert_eq!(
            err,
            CompileError::UnsupportedTemplateType {
                output: "log".into(),
                param: "verbose".into(),
                kind: "bool".into(),
            }
        );
    }

    #[test]
    fn test_list_in_output_template_rejected() {
        let body = StructBody::default()
            .param(Param::file(1, "inputs").list(Default::default()))
            .output(Output::new(1, "out", vec![OutputToken::param(1)]));
        let errors = template_errors(&interface(body));
        assert!(matches!(
            &errors[0],
            CompileError::UnsupportedTemplateType { kind, .. } if kind == "list"
        ));
    }

    #[test]
    fn test_non_struct_union_alternative() {
        let body = StructBody::default().param(Param::union(1, "mode", vec![Param::string(2, "oops")]));
        assert_eq!(
            validate(&interface(body)),
            Err(CompileError::ExpectedStruct {
                name: "oops".into()
            })
        );
    }

    #[test]
    fn test_duplicate_ids() {
        let body = StructBody::default()
            .param(Param::string(1, "a"))
            .param(Param::string(1, "b"));
        assert_eq!(
            validate(&interface(body)),
            Err(CompileError::DuplicateId { id: ParamId(1) })
        );
    }

    #[test]
    fn test_root_must_be_struct() {
        let mut iface = interface(StructBody::default());
        iface.command = Param::string(0, "tool");
        assert!(matches!(
            validate(&iface),
            Err(CompileError::ExpectedStruct { .. })
        ));
    }

    #[test]
    fn test_stream_sharing_output_id_rejected() {
        let body = StructBody::default()
            .param(Param::string(1, "name"))
            .output(Output::new(1, "out", vec![OutputToken::param(1)]));
        let mut iface = interface(body);
        iface.stdout_as_string_output = Some(StdStreamOutput {
            id: OutputId(1),
            name: "log".into(),
            docs: Default::default(),
        });
        assert_eq!(
            structure_errors(&iface),
            vec![CompileError::DuplicateOutputId { id: OutputId(1) }]
        );
    }

    #[test]
    fn test_nested_output_reusing_root_output_id_rejected() {
        let inner = StructBody::default()
            .param(Param::file(3, "mask_in"))
            .output(Output::new(1, "mask", vec![OutputToken::param(3)]));
        let body = StructBody::default()
            .param(Param::string(1, "name"))
            .param(Param::structure(2, "opts", inner))
            .output(Output::new(1, "out", vec![OutputToken::param(1)]));
        assert_eq!(
            validate(&interface(body)),
            Err(CompileError::DuplicateOutputId { id: OutputId(1) })
        );
    }

    #[test]
    fn test_repeated_output_id_reported_once() {
        let body = StructBody::default()
            .param(Param::string(1, "name"))
            .output(Output::new(4, "a", vec![OutputToken::param(1)]))
            .output(Output::new(4, "b", vec![OutputToken::param(1)]))
            .output(Output::new(4, "c", vec![OutputToken::param(1)]));
        assert_eq!(structure_errors(&interface(body)).len(), 1);
    }
}
