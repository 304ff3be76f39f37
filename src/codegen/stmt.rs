//! Statement code generation.

use super::Codegen;
use super::error::CodegenError;
use super::frame::Frame;
use super::regs::{return_reg, size_word};
use crate::ast::{Expr, Stmt, StmtKind};
use crate::token::Span;

impl Codegen {
    /// Compiles a single statement into `out`.
    pub(super) fn compile_stmt(
        &mut self,
        stmt: &Stmt,
        frame: &mut Frame,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.compile_expr(expr, frame, out),
            StmtKind::Return(expr) => {
                self.compile_expr(expr, frame, out)?;
                out.push_str("\tjmp .retpoint\n");
                Ok(())
            }
            StmtKind::VarDecl { name, ty, init } => {
                self.compile_var_decl(name, *ty, init, stmt.span, frame, out)
            }
            StmtKind::Assign { name, deref, value } => {
                self.compile_assign(name, *deref, value, stmt.span, frame, out)
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => self.compile_if(condition, then_branch, else_branch.as_deref(), frame, out),
            StmtKind::While { condition, body } => {
                self.compile_while(condition, body, frame, out)
            }
        }
    }

    /// Compiles a variable declaration.
    ///
    /// The initializer runs first; only then does the declaration claim its
    /// frame slot and store the accumulator into it. Claiming the slot
    /// afterwards also keeps `var x: int = x;` an error rather than a read
    /// of the uninitialized slot.
    fn compile_var_decl(
        &mut self,
        name: &str,
        ty: crate::ast::VarType,
        init: &Expr,
        span: Span,
        frame: &mut Frame,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        self.compile_expr(init, frame, out)?;
        let offset = frame.declare(name, ty, span)?;
        out.push_str(&format!(
            "\tmov {} [rbp - {}], {}\n",
            size_word(ty),
            offset,
            return_reg(ty),
        ));
        Ok(())
    }

    /// Compiles a reassignment.
    ///
    /// A plain reassignment stores the accumulator into the existing slot.
    /// A pointer reassignment (`deref`) loads the pointer from the slot
    /// into `rbx`, stores the value through it at the pointee's width, and
    /// writes the pointer back.
    fn compile_assign(
        &mut self,
        name: &str,
        deref: bool,
        value: &Expr,
        span: Span,
        frame: &mut Frame,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        let local = frame
            .lookup(name)
            .ok_or_else(|| CodegenError::reassign_undeclared_variable(name, span))?;

        self.compile_expr(value, frame, out)?;

        if deref {
            let pointee = local.ty.deref();
            out.push_str(&format!("\tmov rbx, [rbp - {}]\n", local.rbp_offset));
            out.push_str(&format!(
                "\tmov {} [rbx], {}\n",
                size_word(pointee),
                return_reg(pointee),
            ));
            out.push_str(&format!("\tmov [rbp - {}], rbx\n", local.rbp_offset));
        } else {
            out.push_str(&format!(
                "\tmov [rbp - {}], {}\n",
                local.rbp_offset,
                return_reg(local.ty),
            ));
        }
        Ok(())
    }

    /// Compiles an `if` statement.
    ///
    /// ```text
    ///     <cond>
    ///     cmp eax, 0
    ///     je .ELSE{n}
    ///     <then body>
    ///     jmp .ENDIF{n}
    /// .ELSE{n}:
    ///     <else body or empty>
    /// .ENDIF{n}:
    /// ```
    ///
    /// The label number is claimed before the branches are compiled so a
    /// nested `if` mints its own pair.
    fn compile_if(
        &mut self,
        condition: &Expr,
        then_branch: &[Stmt],
        else_branch: Option<&[Stmt]>,
        frame: &mut Frame,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        let label = frame.next_if_label();

        self.compile_expr(condition, frame, out)?;
        out.push_str(&format!("\tcmp eax, 0\n\tje .ELSE{}\n", label));

        for stmt in then_branch {
            self.compile_stmt(stmt, frame, out)?;
        }
        out.push_str(&format!("\tjmp .ENDIF{}\n", label));

        out.push_str(&format!(".ELSE{}:\n", label));
        if let Some(else_branch) = else_branch {
            for stmt in else_branch {
                self.compile_stmt(stmt, frame, out)?;
            }
        }
        out.push_str(&format!(".ENDIF{}:\n", label));

        Ok(())
    }

    /// Compiles a `while` statement.
    ///
    /// ```text
    /// .WHILE{n}:
    ///     <cond>
    ///     cmp eax, 0
    ///     je .ENDWHILE{n}
    ///     <body>
    ///     jmp .WHILE{n}
    /// .ENDWHILE{n}:
    /// ```
    fn compile_while(
        &mut self,
        condition: &Expr,
        body: &[Stmt],
        frame: &mut Frame,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        let label = frame.next_while_label();

        out.push_str(&format!(".WHILE{}:\n", label));
        self.compile_expr(condition, frame, out)?;
        out.push_str(&format!("\tcmp eax, 0\n\tje .ENDWHILE{}\n", label));

        for stmt in body {
            self.compile_stmt(stmt, frame, out)?;
        }

        out.push_str(&format!("\tjmp .WHILE{}\n", label));
        out.push_str(&format!(".ENDWHILE{}:\n", label));

        Ok(())
    }
}
