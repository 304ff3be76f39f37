//! Built-in function support.
//!
//! Built-ins are implemented by hand-written assembly stubs shipped next to
//! the compiler. The driver reads the files listed in [`BUILTIN_SOURCES`]
//! from [`BUILTIN_DIR`] and passes their concatenated text to
//! [`Codegen::new`](super::Codegen::new); this module seeds the signature
//! registry with the symbols those stubs define.

use crate::ast::{BaseType, VarType};
use std::collections::HashMap;

/// Directory the built-in assembly stubs are read from, relative to the
/// compiler's working directory.
pub const BUILTIN_DIR: &str = "builtin";

/// Built-in assembly sources, spliced into the text segment in this order.
pub const BUILTIN_SOURCES: [&str; 2] = ["printint.asm", "syscalls.asm"];

/// Symbols the built-in stubs define, matching the seeded signatures.
///
/// When adding a builtin here, also update [`seed_signatures`]; the sync
/// test `test_builtin_names_matches_seeded_signatures` keeps the two lists
/// aligned.
pub const BUILTIN_NAMES: [&str; 6] = [
    "printint",
    "__syscall1",
    "__syscall2",
    "__syscall3",
    "__syscall4",
    "__syscall5",
];

/// Seeds the signature registry with the built-in functions.
///
/// `printint` takes a single `int`. The `__syscall{n}` family takes `n`
/// arguments of type `any`, which matches anything at call-check time; the
/// stubs shuffle the incoming parameter registers into the kernel's
/// syscall register order.
pub(super) fn seed_signatures(signatures: &mut HashMap<String, Vec<VarType>>) {
    signatures.insert(
        "printint".to_string(),
        vec![VarType::scalar(BaseType::Int)],
    );

    for arg_count in 1..=5 {
        signatures.insert(
            format!("__syscall{}", arg_count),
            vec![VarType::scalar(BaseType::Any); arg_count],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_matches_seeded_signatures() {
        let mut signatures = HashMap::new();
        seed_signatures(&mut signatures);

        assert_eq!(signatures.len(), BUILTIN_NAMES.len());
        for name in BUILTIN_NAMES {
            assert!(
                signatures.contains_key(name),
                "builtin '{}' is not seeded",
                name
            );
        }
    }

    #[test]
    fn test_printint_takes_one_int() {
        let mut signatures = HashMap::new();
        seed_signatures(&mut signatures);

        assert_eq!(
            signatures["printint"],
            vec![VarType::scalar(BaseType::Int)]
        );
    }

    #[test]
    fn test_syscall_arities() {
        let mut signatures = HashMap::new();
        seed_signatures(&mut signatures);

        for arg_count in 1..=5usize {
            let name = format!("__syscall{}", arg_count);
            assert_eq!(signatures[&name].len(), arg_count, "{}", name);
            assert!(
                signatures[&name]
                    .iter()
                    .all(|ty| *ty == VarType::scalar(BaseType::Any))
            );
        }
    }
}
