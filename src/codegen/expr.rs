//! Expression code generation.
//!
//! Every expression leaves its result in the accumulator register of its
//! type's width (`rax`/`eax`/`al`); consumers promote as needed.

use super::Codegen;
use super::error::CodegenError;
use super::frame::Frame;
use super::regs::{MAX_PARAMS, param_reg, return_reg, size_word};
use crate::ast::{BinaryOp, Expr, ExprKind};
use crate::token::Span;

/// Returns the instruction sequence for a binary operator.
///
/// On entry `rax` holds the left operand and `rbx` the right operand; on
/// exit the result is in `rbx`. Comparison operators produce 0/1 through
/// the byte sub-register and zero-extend. DIV and MOD preserve `rdx`
/// around the `idiv`, which uses it for the high half of the dividend.
fn operation_sequence(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "\tadd rbx, rax\n",
        BinaryOp::Sub => {
            "\tsub rax, rbx\n\
             \tmov rbx, rax\n"
        }
        BinaryOp::Mul => {
            "\timul rax, rbx\n\
             \tmov rbx, rax\n"
        }
        BinaryOp::Div => {
            "\tpush rdx\n\
             \txor rdx, rdx\n\
             \tidiv rbx\n\
             \tmov rbx, rax\n\
             \tpop rdx\n"
        }
        BinaryOp::Mod => {
            "\tpush rdx\n\
             \txor rdx, rdx\n\
             \tidiv rbx\n\
             \tmov rbx, rdx\n\
             \tpop rdx\n"
        }
        BinaryOp::Lt => {
            "\tcmp rax, rbx\n\
             \tsetl al\n\
             \tmovzx rbx, al\n"
        }
        BinaryOp::Gt => {
            "\tcmp rax, rbx\n\
             \tsetg al\n\
             \tmovzx rbx, al\n"
        }
        BinaryOp::Eq => {
            "\tcmp rax, rbx\n\
             \tsete al\n\
             \tmovzx rbx, al\n"
        }
        BinaryOp::Neq => {
            "\tcmp rax, rbx\n\
             \tsetne al\n\
             \tmovzx rbx, al\n"
        }
        BinaryOp::Lte => {
            "\tcmp rax, rbx\n\
             \tsetle al\n\
             \tmovzx rbx, al\n"
        }
    }
}

impl Codegen {
    /// Compiles an expression, leaving its result in the accumulator.
    pub(super) fn compile_expr(
        &mut self,
        expr: &Expr,
        frame: &mut Frame,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        match &expr.kind {
            ExprKind::IntLiteral(value) => {
                out.push_str(&format!("\tmov rax, {}\n", value));
                Ok(())
            }
            ExprKind::BoolLiteral(value) => {
                out.push_str(if *value {
                    "\tmov rax, 1\n"
                } else {
                    "\tmov rax, 0\n"
                });
                Ok(())
            }
            ExprKind::StringLiteral(value) => {
                self.compile_string(value, out);
                Ok(())
            }
            ExprKind::VarRead { name, derefs } => {
                self.compile_var_read(name, *derefs, expr.span, frame, out)
            }
            ExprKind::Call { callee, args } => {
                self.compile_call(callee, args, expr.span, frame, out)
            }
            ExprKind::Binary { op, lhs, rhs } => self.compile_binary(*op, lhs, rhs, frame, out),
        }
    }

    /// Compiles a string literal.
    ///
    /// The literal's bytes join the data-segment pool; the expression value
    /// is the address of its `V{i}` label.
    fn compile_string(&mut self, value: &[u8], out: &mut String) {
        let label = self.strings.len();
        self.strings.push(value.to_vec());
        out.push_str(&format!("\tmov rax, V{}\n", label));
    }

    /// Compiles a variable read, applying pointer-dereference steps.
    ///
    /// The slot is loaded into the accumulator width of the declared type.
    /// Each dereference step loads through the current accumulator; when a
    /// step lands on byte width the value is promoted with `movzx` so the
    /// next indirection (or the consumer) sees a clean 64-bit register.
    fn compile_var_read(
        &mut self,
        name: &str,
        derefs: u8,
        span: Span,
        frame: &mut Frame,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        let local = frame
            .lookup(name)
            .ok_or_else(|| CodegenError::undefined_variable(name, span))?;

        let mut ty = local.ty;
        let mut loaded_reg = return_reg(ty);
        out.push_str(&format!(
            "\tmov {}, {} [rbp - {}]\n",
            loaded_reg,
            size_word(ty),
            local.rbp_offset,
        ));

        for _ in 0..derefs {
            ty = ty.deref();
            out.push_str(&format!(
                "\tmov {}, {} [{}]\n",
                return_reg(ty),
                size_word(ty),
                loaded_reg,
            ));
            loaded_reg = return_reg(ty);
            if loaded_reg == "al" {
                out.push_str("\tmovzx rax, al\n");
            }
        }

        Ok(())
    }

    /// Compiles a binary operation.
    ///
    /// The lowering is a conventional left-to-right evaluation: the left
    /// operand is computed and parked on the stack while the right operand
    /// runs, then both land in the `(rax, rbx)` pair for the operator
    /// sequence. Parking on the stack (rather than in `rbx`) keeps nested
    /// operations from clobbering each other's operands.
    fn compile_binary(
        &mut self,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
        frame: &mut Frame,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        self.compile_expr(lhs, frame, out)?;
        out.push_str("\tpush rax\n");
        self.compile_expr(rhs, frame, out)?;
        out.push_str("\tmov rbx, rax\n");
        out.push_str("\tpop rax\n");
        out.push_str(operation_sequence(op));
        out.push_str("\tmov rax, rbx\n");
        Ok(())
    }

    /// Compiles a function call.
    ///
    /// Arguments are emitted in two passes: call-valued arguments first,
    /// each moved into its positional parameter register as soon as its
    /// value is in the accumulator, then the remaining arguments. An inner
    /// call clobbers parameter registers wholesale, so it must not run
    /// after plain arguments have been loaded.
    fn compile_call(
        &mut self,
        callee: &str,
        args: &[Expr],
        span: Span,
        frame: &mut Frame,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        if args.len() > MAX_PARAMS {
            return Err(CodegenError::too_many_arguments(span));
        }

        let signature = self
            .signatures
            .get(callee)
            .ok_or_else(|| CodegenError::undefined_function(callee, span))?
            .clone();

        if args.len() != signature.len() {
            return Err(CodegenError::arity_mismatch(span));
        }

        // Pass 1: call-valued arguments.
        for (slot, arg) in args.iter().enumerate() {
            if arg.is_call() {
                self.compile_expr(arg, frame, out)?;
                out.push_str(&format!(
                    "\tmov {}, {}\n",
                    param_reg(signature[slot], slot),
                    return_reg(signature[slot]),
                ));
            }
        }

        // Pass 2: everything else.
        for (slot, arg) in args.iter().enumerate() {
            if !arg.is_call() {
                self.compile_expr(arg, frame, out)?;
                out.push_str(&format!(
                    "\tmov {}, {}\n",
                    param_reg(signature[slot], slot),
                    return_reg(signature[slot]),
                ));
            }
        }

        out.push_str(&format!("\tcall {}\n", callee));
        Ok(())
    }
}
