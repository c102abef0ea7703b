//! End-to-end compilation scenarios for the Python backend.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::collections::HashSet;

use styx_codegen::{
    CompileError,
    builder::TypeRef,
    compile::compile_interface,
    testing::{PythonChecker, check_in_temp, fixtures},
};
use styx_codegen_python::{LanguageCodegen, PythonCodegen, PythonProvider};
use styx_ir::{Carg, Output, OutputToken, Param, StructBody};

fn compile(interface: &styx_ir::Interface) -> String {
    PythonCodegen::new()
        .compile(interface)
        .expect("descriptor should compile")
}

#[test]
fn test_round_trip_module() {
    let source = compile(&fixtures::round_trip());
    insta::assert_snapshot!(source, @r#"
    # This file was auto generated by Styx.
    # Do not edit this file directly.

    import dataclasses
    import pathlib
    import typing

    from styxdefs import *


    ROUND_TRIP_METADATA = Metadata(
        id="round_trip.uid",
        name="round_trip",
        package="styx-tests",
    )


    class RoundTripOutputs(typing.NamedTuple):
        """Output object returned when calling `round_trip(...)`."""
        root: OutputPathType
        """Output root folder. This is the root folder for all outputs."""
        out: OutputPathType
        """Result file."""


    def round_trip(
        name: str,
        verbose: bool | None = None,
        runner: Runner | None = None,
    ) -> RoundTripOutputs:
        """
        Run round_trip.

        Args:
            name: Job name.
            verbose:
            runner: Command runner.

        Returns:
            NamedTuple of outputs (described in `RoundTripOutputs`).
        """
        runner = runner or get_global_runner()
        execution = runner.start_execution(ROUND_TRIP_METADATA)
        cargs = []
        cargs.append("round_trip")
        if verbose is not None:
            cargs.extend((["-v"] if verbose else []))
        cargs.append(name)
        ret = RoundTripOutputs(
            root=execution.output_file("."),
            out=execution.output_file(name + ".out"),
        )
        execution.run(cargs)
        return ret


    __all__ = [
        "ROUND_TRIP_METADATA",
        "round_trip",
        "RoundTripOutputs",
    ]
    "#);
}

#[test]
fn test_infrastructure_names_are_never_reused() {
    let module = compile_interface(&PythonProvider, &fixtures::name_collisions()).unwrap();
    let function = module.function("collide").expect("root function");

    let names: Vec<&str> = function.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "runner_2",
            "execution_2",
            "cargs_2",
            "ret_2",
            "my_param",
            "my_param_2",
            "class_2",
            "runner",
        ]
    );
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len());

    let source = compile(&fixtures::name_collisions());
    assert!(source.contains(
        "cargs.extend([runner_2, execution_2, cargs_2, ret_2, my_param, my_param_2, class_2])"
    ));
}

#[test]
fn test_children_are_emitted_before_parents() {
    let module = compile_interface(&PythonProvider, &fixtures::nested_union()).unwrap();
    let pos = |name: &str| module.position(name).expect(name);

    assert!(pos("FastOutputs") < pos("Fast"));
    assert!(pos("Fast") < pos("NestedOutputs"));
    assert!(pos("Slow") < pos("NestedOutputs"));
    assert!(pos("NestedOutputs") < pos("nested"));
    assert_eq!(pos("nested"), module.items.len() - 1);
}

#[test]
fn test_guard_forms() {
    let source = compile(&fixtures::guards());

    // No optional parameter: no guard
    assert!(source.contains("    cargs.extend([\"-i\", input])\n"));
    assert!(!source.contains("if input"));

    // One optional parameter: guard with the plain value inside
    assert!(source.contains(
        "    if out is not None:\n        cargs.extend([\"-o\", out])\n"
    ));

    // Two optional parameters: each value is null-safe
    assert!(source.contains(
        "    if a is not None or b is not None:\n        cargs.extend([\"-r\", \
         (str(a) if a is not None else \"\") + \"x\" + (str(b) if b is not None else \"\")])\n"
    ));

    // One optional parameter referenced twice counts twice
    assert!(source.contains(
        "    if p is not None or p is not None:\n        cargs.extend([\"--pair\", \
         (p if p is not None else \"\"), (p if p is not None else \"\")])\n"
    ));
}

#[test]
fn test_output_is_optional_iff_a_reference_is_nullable() {
    let body = StructBody::default()
        .param(Param::string(1, "prefix").nullable())
        .param(Param::string(2, "stem"))
        .output(Output::new(
            1,
            "maybe",
            vec![OutputToken::param(1), OutputToken::literal(".txt")],
        ))
        .output(Output::new(
            2,
            "always",
            vec![OutputToken::param(2), OutputToken::literal(".txt")],
        ));
    let interface = fixtures::interface("opt", body);

    let module = compile_interface(&PythonProvider, &interface).unwrap();
    let record = module.output_record("OptOutputs").expect("record");
    assert!(record.get_field("maybe").unwrap().ty.is_optional());
    assert!(!record.get_field("always").unwrap().ty.is_optional());

    let source = compile(&interface);
    assert!(source.contains("    maybe: OutputPathType | None\n"));
    assert!(source.contains(
        "maybe=(execution.output_file(prefix + \".txt\") if prefix is not None else None),"
    ));
    assert!(source.contains("always=execution.output_file(stem + \".txt\"),"));
}

#[test]
fn test_template_projection() {
    let source = compile(&fixtures::nested_union());
    assert!(source.contains(
        "result=execution.output_file(pathlib.Path(self.input).name\
         .removesuffix(\".nii.gz\").removesuffix(\".nii\") + \"_fast.nii.gz\"),"
    ));
}

#[test]
fn test_bool_in_template_rejected_before_emission() {
    let err = PythonCodegen::new()
        .compile(&fixtures::flag_in_output_path())
        .unwrap_err();
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
fn test_union_output_field_only_counts_alternatives_with_outputs() {
    let module = compile_interface(&PythonProvider, &fixtures::nested_union()).unwrap();
    let record = module.output_record("NestedOutputs").expect("record");

    assert_eq!(
        record.get_field("mode").unwrap().ty,
        TypeRef::optional(TypeRef::named("FastOutputs"))
    );

    let source = compile(&fixtures::nested_union());
    assert!(source.contains("    mode: FastOutputs | None\n"));
    assert!(source.contains(
        "mode=(mode.outputs(execution) if hasattr(mode, \"outputs\") else None),"
    ));
    assert!(source.contains("    mode: Fast | Slow,\n"));
}

#[test]
fn test_sub_struct_classes() {
    let source = compile(&fixtures::nested_struct());

    assert!(source.contains("@dataclasses.dataclass\nclass Roi:\n"));
    assert!(source.contains("        cargs.extend([\"--roi\", self.label])\n"));
    assert!(source.contains("            mask=execution.output_file(self.label + \"_mask.nii\"),\n"));
    assert!(source.contains(
        "        if self.threshold is not None:\n            cargs.extend([\"-t\", str(self.threshold)])\n"
    ));

    assert!(source.contains("    if opts is not None:\n        cargs.extend(opts.run(execution))\n"));
    assert!(source.contains("    cargs.extend([a for i in roi for a in i.run(execution)])\n"));
    assert!(source.contains("        roi=[i.outputs(execution) for i in roi],\n"));
    assert!(source.contains("    roi: list[RoiOutputs]\n"));
    assert!(!source.contains("OptsOutputs"));
}

#[test]
fn test_value_and_group_constraints() {
    let source = compile(&fixtures::constrained());

    assert!(source.contains(
        "    if level is not None and (level < 0 or level > 9):\n        \
         raise StyxValidationError(\"Parameter `level` must be between 0 and 9 (inclusive)\")\n"
    ));
    assert!(source.contains(
        "    if len(files) < 1:\n        \
         raise StyxValidationError(\"Parameter `files` must contain at least 1 value(s)\")\n"
    ));
    assert!(source.contains(
        "    if [left is not None, right is not None].count(True) != 1:\n        \
         raise StyxValidationError(\"Exactly one of `left`, `right` must be set\")\n"
    ));
    assert!(source.contains("    cargs.extend([execution.input_file(i) for i in files])\n"));
}

#[test]
fn test_captured_stdout() {
    let source = compile(&fixtures::std_streams());

    assert!(source.contains("    stdout: list[str]\n"));
    assert!(source.contains("        stdout=[],\n"));
    assert!(source.contains(
        "    execution.run(\n        cargs,\n        handle_stdout=lambda s: ret.stdout.append(s),\n    )\n"
    ));
}

#[test]
fn test_digit_leading_record_fields_get_letter_prefix() {
    let roi = StructBody::default()
        .param(Param::string(3, "label"))
        .group(vec![Carg::param(3)])
        .output(Output::new(2, "roi_mask", vec![OutputToken::param(3)]));
    let body = StructBody::default()
        .param(Param::string(1, "stem"))
        .param(Param::structure(2, "3d_roi", roi))
        .group(vec![Carg::param(1)])
        .group(vec![Carg::param(2)])
        .output(Output::new(
            1,
            "3d_mask",
            vec![OutputToken::param(1), OutputToken::literal(".nii")],
        ));
    let interface = fixtures::interface("digits", body);

    let module = compile_interface(&PythonProvider, &interface).unwrap();
    let record = module.output_record("DigitsOutputs").expect("record");
    let fields: Vec<&str> = record.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, vec!["root", "v_3d_mask", "v_3d_roi"]);

    let source = compile(&interface);
    assert!(source.contains("    v_3d_mask: OutputPathType\n"));
    assert!(source.contains("v_3d_mask=execution.output_file(stem + \".nii\"),"));
    assert!(!source.contains("    _3d_mask:"));
}

#[test]
#[ignore = "requires python3"]
fn test_generated_modules_compile() {
    for interface in [
        fixtures::round_trip(),
        fixtures::nested_union(),
        fixtures::nested_struct(),
        fixtures::guards(),
        fixtures::constrained(),
        fixtures::name_collisions(),
        fixtures::std_streams(),
    ] {
        let source = compile(&interface);
        check_in_temp(&PythonChecker, "wrapper.py", &source).expect("python should parse it");
    }
}
