//! Unit tests for code generation.

use super::*;
use crate::ast::{BaseType, Expr, ExprKind, Param, Stmt, StmtKind, VarType};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::token::Span;

fn dummy_span() -> Span {
    Span::new(0, 0, 1, 1)
}

/// Compiles Fenc source (with no built-in assembly) and returns the output.
fn compile(source: &str) -> String {
    let tokens = Lexer::new(source.as_bytes())
        .tokenize()
        .unwrap_or_else(|e| panic!("Lexer failed on {:?}: {}", source, e));
    let program = Parser::new(tokens)
        .parse()
        .unwrap_or_else(|e| panic!("Parser failed on {:?}: {}", source, e));
    Codegen::new("")
        .compile(&program)
        .unwrap_or_else(|e| panic!("Codegen failed on {:?}: {}", source, e))
}

/// Compiles Fenc source expecting a codegen error.
fn compile_err(source: &str) -> CodegenError {
    let tokens = Lexer::new(source.as_bytes())
        .tokenize()
        .unwrap_or_else(|e| panic!("Lexer failed on {:?}: {}", source, e));
    let program = Parser::new(tokens)
        .parse()
        .unwrap_or_else(|e| panic!("Parser failed on {:?}: {}", source, e));
    match Codegen::new("").compile(&program) {
        Ok(asm) => panic!(
            "Expected codegen to fail for {:?}, but it produced {} bytes",
            source,
            asm.len()
        ),
        Err(e) => e,
    }
}

/// Asserts that `needles` appear in `haystack` in the given order.
fn assert_contains_in_order(haystack: &str, needles: &[&str]) {
    let mut position = 0;
    for needle in needles {
        match haystack[position..].find(needle) {
            Some(found) => position += found + needle.len(),
            None => panic!(
                "Expected {:?} after byte {} in output:\n{}",
                needle, position, haystack
            ),
        }
    }
}

// ===================
// Program scaffolding
// ===================

#[test]
fn test_entry_stub() {
    let asm = compile("fnc main() > int { return 0; }");
    assert_contains_in_order(
        &asm,
        &[
            "[bits 64]",
            "segment .text",
            "\tglobal _start",
            "_start:",
            "\tmov rdi, [rsp]",
            "\tlea rsi, [rsp + 8]",
            "\tlea rdx, [rsp + rdi*8+8+8]",
            "\tcall main",
            "\tmov rdi, rax",
            "\tmov rax, 60",
            "\tsyscall",
        ],
    );
}

#[test]
fn test_segment_order() {
    let asm = compile("fnc main() > int { return 0; }");
    assert_contains_in_order(&asm, &["segment .text", "segment .data", "segment .bss"]);
    // .bss is present but empty.
    assert!(asm.ends_with("segment .bss\n"));
}

#[test]
fn test_builtin_assembly_is_spliced_after_entry_stub() {
    let tokens = Lexer::new(b"fnc main() > int { return 0; }")
        .tokenize()
        .unwrap();
    let program = Parser::new(tokens).parse().unwrap();
    let asm = Codegen::new("printint:\n\tret\n")
        .compile(&program)
        .unwrap();

    assert_contains_in_order(&asm, &["\tsyscall\n", "printint:\n\tret\n", "main:"]);
}

#[test]
fn test_identity_return() {
    let asm = compile("fnc main(argc: int, argv: long, envp: long) > int { return 0; }");
    assert!(asm.contains("main:"));
    assert!(asm.contains("push rbp"));
    assert!(asm.contains("mov rax, 0"));
    assert!(asm.contains("jmp .retpoint"));
    assert!(asm.contains(".retpoint:"));
}

#[test]
fn test_compilation_is_deterministic() {
    let source = "fnc main() > int { var s: str = \"x\"; if 1 == 1 { printint(3); }; return 0; }";
    let first = compile(source);
    let second = compile(source);
    assert_eq!(first, second);
}

// ===================
// Frames and variables
// ===================

#[test]
fn test_empty_frame_for_no_locals() {
    let asm = compile("fnc main() > int { return 0; }");
    assert!(asm.contains("sub rsp, 0"));
    assert!(asm.contains("add rsp, 0"));
}

#[test]
fn test_frame_size_is_sum_of_local_sizes() {
    let asm = compile(
        "fnc main() > int { var a: int = 1; var b: long = 2; var c: bool = true; return 0; }",
    );
    // 4 + 8 + 1 bytes; sub and add match.
    assert!(asm.contains("sub rsp, 13"));
    assert!(asm.contains("add rsp, 13"));
}

#[test]
fn test_var_decl_stores_at_type_width() {
    let asm = compile("fnc main() > int { var a: int = 1; var b: long = 2; return 0; }");
    assert_contains_in_order(
        &asm,
        &[
            "\tmov rax, 1\n\tmov dword [rbp - 4], eax\n",
            "\tmov rax, 2\n\tmov qword [rbp - 12], rax\n",
        ],
    );
}

#[test]
fn test_str_variable_is_pointer_sized() {
    let asm = compile("fnc main() > int { var s: str = \"x\"; return 0; }");
    assert!(asm.contains("mov qword [rbp - 8], rax"));
}

#[test]
fn test_var_read_loads_at_type_width() {
    let asm = compile("fnc main() > int { var a: int = 7; return a; }");
    assert!(asm.contains("mov eax, dword [rbp - 4]"));
}

#[test]
fn test_reassignment_stores_into_existing_slot() {
    let asm = compile("fnc main() > int { var n: int = 0; n = 5; return n; }");
    assert_contains_in_order(
        &asm,
        &["\tmov dword [rbp - 4], eax\n", "\tmov rax, 5\n\tmov [rbp - 4], eax\n"],
    );
}

#[test]
fn test_duplicate_variable_is_error() {
    let error = compile_err("fnc main() > int { var n: int = 0; var n: int = 1; return 0; }");
    assert_eq!(error.kind(), CodegenErrorKind::DuplicateVariable);
    assert!(error.message().contains("already declared"));
}

#[test]
fn test_undefined_variable_read_is_error() {
    let error = compile_err("fnc main() > int { return n; }");
    assert_eq!(error.kind(), CodegenErrorKind::UndefinedVariable);
    assert!(error.message().contains("Undefined variable: n"));
}

#[test]
fn test_reassigning_undeclared_variable_is_error() {
    let error = compile_err("fnc main() > int { n = 3; return 0; }");
    assert_eq!(error.kind(), CodegenErrorKind::UndefinedVariable);
    assert!(error.message().contains("undeclared variable: n"));
}

#[test]
fn test_initializer_cannot_read_its_own_slot() {
    let error = compile_err("fnc main() > int { var x: int = x; return 0; }");
    assert_eq!(error.kind(), CodegenErrorKind::UndefinedVariable);
}

// ===================
// Parameters
// ===================

#[test]
fn test_parameters_spill_in_declaration_order() {
    let asm = compile("fnc f(a: int, b: long, c: bool) > int { return 0; } \
                       fnc main() > int { return 0; }");
    assert_contains_in_order(
        &asm,
        &[
            "f:\n",
            "\tsub rsp, 13\n",
            "\tmov dword [rbp - 4], edi\n",
            "\tmov qword [rbp - 12], rsi\n",
            "\tmov byte [rbp - 13], dl\n",
        ],
    );
}

#[test]
fn test_six_parameters_use_all_argument_registers() {
    let asm = compile(
        "fnc f(a: long, b: long, c: long, d: long, e: long, g: long) > int { return 0; } \
         fnc main() > int { return 0; }",
    );
    for reg in ["rdi", "rsi", "rdx", "rcx", "r8", "r9"] {
        assert!(
            asm.contains(&format!(", {}\n", reg)),
            "register {} not spilled:\n{}",
            reg,
            asm
        );
    }
}

#[test]
fn test_seven_parameters_is_error() {
    let error = compile_err(
        "fnc f(a: int, b: int, c: int, d: int, e: int, g: int, h: int) > int { return 0; }",
    );
    assert_eq!(error.kind(), CodegenErrorKind::TooManyParameters);
    assert!(error.message().contains("No more than 6 arguments"));
}

#[test]
fn test_parameter_spill_happens_before_body() {
    let asm = compile("fnc f(n: int) > int { return n; } fnc main() > int { return 0; }");
    assert_contains_in_order(
        &asm,
        &[
            "f:\n\tpush rbp\n\tmov rbp, rsp\n\tsub rsp, 4\n\tmov dword [rbp - 4], edi\n",
            "\tmov eax, dword [rbp - 4]\n\tjmp .retpoint\n",
        ],
    );
}

// ===================
// Binary operations
// ===================

#[test]
fn test_multiplication_is_emitted_before_addition() {
    // 1 + 2 * 3: the multiplication materializes first, then the addition.
    let asm = compile("fnc main() > int { return 1 + 2 * 3; }");
    assert_contains_in_order(
        &asm,
        &[
            "\tmov rax, 1\n\tpush rax\n",
            "\tmov rax, 2\n\tpush rax\n",
            "\tmov rax, 3\n",
            "\timul rax, rbx\n",
            "\tadd rbx, rax\n",
            "\tmov rax, rbx\n\tjmp .retpoint\n",
        ],
    );
}

#[test]
fn test_subtraction_chain_folds_left() {
    // (1 - 2) - 3: the first subtraction completes before 3 is loaded.
    let asm = compile("fnc main() > int { return 1 - 2 - 3; }");
    assert_contains_in_order(
        &asm,
        &[
            "\tmov rax, 1\n\tpush rax\n\tmov rax, 2\n",
            "\tsub rax, rbx\n",
            "\tmov rax, 3\n",
            "\tsub rax, rbx\n",
        ],
    );
}

#[test]
fn test_division_preserves_rdx() {
    let asm = compile("fnc main() > int { return 6 / 2; }");
    assert_contains_in_order(
        &asm,
        &[
            "\tpush rdx\n\txor rdx, rdx\n\tidiv rbx\n\tmov rbx, rax\n\tpop rdx\n",
        ],
    );
}

#[test]
fn test_modulo_takes_remainder_from_rdx() {
    let asm = compile("fnc main() > int { return 7 % 3; }");
    assert_contains_in_order(
        &asm,
        &[
            "\tpush rdx\n\txor rdx, rdx\n\tidiv rbx\n\tmov rbx, rdx\n\tpop rdx\n",
        ],
    );
}

#[test]
fn test_comparisons_set_byte_and_zero_extend() {
    for (source_op, set_instr) in [
        ("<", "setl"),
        (">", "setg"),
        ("==", "sete"),
        ("!=", "setne"),
        ("<=", "setle"),
    ] {
        let asm = compile(&format!(
            "fnc main() > int {{ return 1 {} 2; }}",
            source_op
        ));
        assert_contains_in_order(
            &asm,
            &[
                "\tcmp rax, rbx\n",
                &format!("\t{} al\n", set_instr),
                "\tmovzx rbx, al\n",
            ],
        );
    }
}

#[test]
fn test_boolean_literals() {
    let asm = compile("fnc main() > int { var t: bool = true; var f: bool = false; return 0; }");
    assert_contains_in_order(
        &asm,
        &["\tmov rax, 1\n\tmov byte [rbp - 1], al\n", "\tmov rax, 0\n\tmov byte [rbp - 2], al\n"],
    );
}

// ===================
// Control flow
// ===================

#[test]
fn test_while_loop_labels() {
    let asm = compile(
        "fnc main() > int { var n: int = 0; while n < 10 { n = n + 1; }; return 0; }",
    );
    assert_contains_in_order(
        &asm,
        &[
            ".WHILE0:\n",
            "\tcmp eax, 0\n\tje .ENDWHILE0\n",
            "\tjmp .WHILE0\n",
            ".ENDWHILE0:\n",
        ],
    );
}

#[test]
fn test_if_else_labels_and_retpoints() {
    let asm = compile("fnc main() > int { if 1 == 1 { return 1; } else { return 0; }; }");
    assert_contains_in_order(
        &asm,
        &[
            "\tcmp eax, 0\n\tje .ELSE0\n",
            "\tjmp .retpoint\n",
            "\tjmp .ENDIF0\n",
            ".ELSE0:\n",
            "\tjmp .retpoint\n",
            ".ENDIF0:\n",
        ],
    );
    assert_eq!(asm.matches("jmp .retpoint").count(), 2);
}

#[test]
fn test_if_without_else_has_empty_else_block() {
    let asm = compile("fnc main() > int { if true { printint(1); }; return 0; }");
    assert!(asm.contains(".ELSE0:\n.ENDIF0:\n"));
}

#[test]
fn test_sequential_ifs_get_distinct_labels() {
    let asm = compile(
        "fnc main() > int { if true { printint(1); }; if true { printint(2); }; return 0; }",
    );
    assert_contains_in_order(&asm, &[".ELSE0:", ".ENDIF0:", ".ELSE1:", ".ENDIF1:"]);
}

#[test]
fn test_nested_ifs_get_distinct_labels() {
    let asm = compile(
        "fnc main() > int { if true { if true { printint(1); }; }; return 0; }",
    );
    // Outer claims 0, inner claims 1; the inner pair sits between the
    // outer's je and its .ELSE0 label.
    assert_contains_in_order(
        &asm,
        &["\tje .ELSE0\n", "\tje .ELSE1\n", ".ELSE1:\n", ".ENDIF1:\n", ".ELSE0:\n", ".ENDIF0:\n"],
    );
}

#[test]
fn test_nested_whiles_get_distinct_labels() {
    let asm = compile(
        "fnc main() > int { while true { while false { printint(1); }; }; return 0; }",
    );
    assert_contains_in_order(
        &asm,
        &[".WHILE0:", ".WHILE1:", ".ENDWHILE1:", ".ENDWHILE0:"],
    );
}

#[test]
fn test_if_and_while_counters_are_independent() {
    let asm = compile(
        "fnc main() > int { if true { printint(1); }; while false { printint(2); }; return 0; }",
    );
    assert!(asm.contains(".ENDIF0:"));
    assert!(asm.contains(".ENDWHILE0:"));
}

#[test]
fn test_locals_declared_in_blocks_count_toward_frame_size() {
    let asm = compile(
        "fnc main() > int { if true { var a: long = 1; }; var b: int = 2; return 0; }",
    );
    assert!(asm.contains("sub rsp, 12"));
    assert!(asm.contains("add rsp, 12"));
}

// ===================
// Function calls
// ===================

#[test]
fn test_call_moves_argument_into_parameter_register() {
    let asm = compile("fnc main() > int { printint(42); return 0; }");
    assert_contains_in_order(&asm, &["\tmov rax, 42\n", "\tmov edi, eax\n", "\tcall printint\n"]);
}

#[test]
fn test_call_valued_arguments_are_emitted_first() {
    let asm = compile(
        "fnc g() > int { return 3; } \
         fnc f(a: int, b: int) > int { return a; } \
         fnc main() > int { return f(1, g()); }",
    );
    // g() runs and lands in esi before the literal 1 is loaded into edi.
    assert_contains_in_order(
        &asm,
        &[
            "main:",
            "\tcall g\n",
            "\tmov esi, eax\n",
            "\tmov rax, 1\n",
            "\tmov edi, eax\n",
            "\tcall f\n",
        ],
    );
}

#[test]
fn test_syscall_builtin_uses_qword_registers() {
    let asm = compile("fnc main() > int { __syscall3(60, 0, 0); return 0; }");
    assert_contains_in_order(
        &asm,
        &["\tmov rdi, rax\n", "\tmov rsi, rax\n", "\tmov rdx, rax\n", "\tcall __syscall3\n"],
    );
}

#[test]
fn test_call_arity_mismatch_is_error() {
    let error = compile_err("fnc main() > int { printint(); return 0; }");
    assert_eq!(error.kind(), CodegenErrorKind::ArityMismatch);
    assert_eq!(
        error.message(),
        "Unexpected number of arguments on function call"
    );
}

#[test]
fn test_call_with_excess_arguments_is_error() {
    let error = compile_err("fnc main() > int { printint(1, 2); return 0; }");
    assert_eq!(error.kind(), CodegenErrorKind::ArityMismatch);
}

#[test]
fn test_call_with_more_than_six_arguments_is_error() {
    let error = compile_err("fnc main() > int { printint(1, 2, 3, 4, 5, 6, 7); return 0; }");
    assert_eq!(error.kind(), CodegenErrorKind::TooManyArguments);
}

#[test]
fn test_undefined_function_is_error() {
    let error = compile_err("fnc main() > int { missing(); return 0; }");
    assert_eq!(error.kind(), CodegenErrorKind::UndefinedFunction);
    assert!(error.message().contains("Undefined function: missing"));
}

#[test]
fn test_forward_reference_is_rejected() {
    let error = compile_err(
        "fnc main() > int { return later(); } fnc later() > int { return 1; }",
    );
    assert_eq!(error.kind(), CodegenErrorKind::UndefinedFunction);
}

#[test]
fn test_call_after_declaration_resolves() {
    let asm = compile(
        "fnc earlier() > int { return 1; } fnc main() > int { return earlier(); }",
    );
    assert!(asm.contains("call earlier"));
}

#[test]
fn test_recursive_call_resolves() {
    let asm = compile("fnc spin(n: int) > int { return spin(n); } \
                       fnc main() > int { return 0; }");
    assert!(asm.contains("call spin"));
}

// ===================
// String literals
// ===================

#[test]
fn test_string_literal_bytes_and_label() {
    let asm = compile("fnc main() > int { var s: str = \"hi\"; return 0; }");
    assert!(asm.contains("\tmov rax, V0\n"));
    assert!(asm.contains("\tV0 db 0x68,0x69,0x00\n"));
}

#[test]
fn test_empty_string_literal_is_just_nul() {
    let asm = compile("fnc main() > int { var s: str = \"\"; return 0; }");
    assert!(asm.contains("\tV0 db 0x00\n"));
}

#[test]
fn test_string_literals_are_labeled_in_source_order() {
    let asm = compile(
        "fnc main() > int { var a: str = \"a\"; var b: str = \"b\"; return 0; }",
    );
    assert_contains_in_order(
        &asm,
        &["\tmov rax, V0\n", "\tmov rax, V1\n", "\tV0 db 0x61,0x00\n", "\tV1 db 0x62,0x00\n"],
    );
}

#[test]
fn test_string_literal_control_bytes_are_verbatim() {
    let asm = compile("fnc main() > int { var s: str = \"\x01\x02\x1f\"; return 0; }");
    assert!(asm.contains("\tV0 db 0x01,0x02,0x1f,0x00\n"));
}

#[test]
fn test_string_literal_emits_utf8_bytes() {
    let asm = compile("fnc main() > int { var s: str = \"é\"; return 0; }");
    assert!(asm.contains("\tV0 db 0xc3,0xa9,0x00\n"));
}

#[test]
fn test_string_literal_non_utf8_bytes_are_emitted() {
    // Sources are byte strings; a literal may hold bytes no UTF-8 decoder
    // would accept.
    let mut source = b"fnc main() > int { var s: str = \"".to_vec();
    source.extend([0x80, 0xff]);
    source.extend_from_slice(b"\"; return 0; }");

    let tokens = Lexer::new(&source).tokenize().unwrap();
    let program = Parser::new(tokens).parse().unwrap();
    let asm = Codegen::new("").compile(&program).unwrap();

    assert!(asm.contains("\tV0 db 0x80,0xff,0x00\n"));
}

// ===================
// Pointer paths (grammar extensions the generator already supports)
// ===================

fn single_function_program(body: Vec<Stmt>) -> crate::ast::Program {
    crate::ast::Program {
        functions: vec![crate::ast::FnDef {
            name: "main".to_string(),
            params: vec![Param {
                name: "s".to_string(),
                ty: VarType::pointer(BaseType::Char, 1),
                span: dummy_span(),
            }],
            return_type: VarType::scalar(BaseType::Int),
            body,
            span: dummy_span(),
        }],
    }
}

#[test]
fn test_var_read_with_deref_promotes_byte_loads() {
    let body = vec![Stmt::new(
        StmtKind::Return(Expr::new(
            ExprKind::VarRead {
                name: "s".to_string(),
                derefs: 1,
            },
            dummy_span(),
        )),
        dummy_span(),
    )];
    let asm = Codegen::new("").compile(&single_function_program(body)).unwrap();

    assert_contains_in_order(
        &asm,
        &[
            "\tmov rax, qword [rbp - 8]\n",
            "\tmov al, byte [rax]\n",
            "\tmovzx rax, al\n",
        ],
    );
}

#[test]
fn test_pointer_reassignment_stores_through_slot() {
    let body = vec![
        Stmt::new(
            StmtKind::Assign {
                name: "s".to_string(),
                deref: true,
                value: Expr::new(ExprKind::IntLiteral(65), dummy_span()),
            },
            dummy_span(),
        ),
        Stmt::new(
            StmtKind::Return(Expr::new(ExprKind::IntLiteral(0), dummy_span())),
            dummy_span(),
        ),
    ];
    let asm = Codegen::new("").compile(&single_function_program(body)).unwrap();

    assert_contains_in_order(
        &asm,
        &[
            "\tmov rax, 65\n",
            "\tmov rbx, [rbp - 8]\n",
            "\tmov byte [rbx], al\n",
            "\tmov [rbp - 8], rbx\n",
        ],
    );
}
