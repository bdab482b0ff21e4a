//! Embedded Python interpreter session
//!
//! Owns one RustPython interpreter and one persistent global scope. The
//! session is an init-once/reuse resource: construct it once, then feed
//! it any number of executions. The namespace is intentionally NOT reset
//! between runs — functions and helper classes defined by one submission
//! remain visible to the next. That reuse is what lets the structure
//! builder bind node names in one step and reference them in the next.
//!
//! No Python object ever crosses the session's API surface: callers get
//! host strings (`repr`/`str` forms) or unit, and errors arrive as
//! [`HarnessError`] with the interpreter's message and traceback.
//!
//! All interpreter calls are synchronous and sequential; the session is
//! a single shared mutable resource with no isolation between calls.

use rustpython_vm::{
    builtins::PyBaseExceptionRef, compiler::Mode, scope::Scope, AsObject, Interpreter, PyObjectRef,
    Settings, VirtualMachine,
};

use crate::error::HarnessError;

/// An embedded Python interpreter with a persistent global namespace.
pub struct Session {
    pub(crate) interp: Interpreter,
    pub(crate) scope: Scope,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with the native stdlib modules registered.
    ///
    /// Construction is the readiness point: once this returns, both
    /// evaluation entrypoints may be used.
    pub fn new() -> Self {
        let interp = Interpreter::with_init(Settings::default(), |vm| {
            vm.add_native_modules(rustpython_stdlib::get_module_inits());
        });
        let scope = interp.enter(|vm| vm.new_scope_with_builtins());
        Self { interp, scope }
    }

    /// Execute statements in the session's global namespace.
    pub fn exec(&self, source: &str) -> Result<(), HarnessError> {
        self.interp.enter(|vm| {
            let code = vm
                .compile(source, Mode::Exec, "<submission>".to_owned())
                .map_err(|err| HarnessError::Compile {
                    message: err.to_string(),
                })?;
            vm.run_code_obj(code, self.scope.clone())
                .map_err(|exc| python_error(vm, exc))?;
            Ok(())
        })
    }

    /// Evaluate an expression and return its `repr()` text, or `None`
    /// when the expression evaluated to Python `None`.
    pub fn eval_repr(&self, expr: &str) -> Result<Option<String>, HarnessError> {
        self.interp.enter(|vm| {
            let value = eval_in(vm, &self.scope, expr)?;
            if vm.is_none(&value) {
                return Ok(None);
            }
            let repr = value.repr(vm).map_err(|exc| python_error(vm, exc))?;
            Ok(Some(repr.as_str().to_owned()))
        })
    }

    /// Evaluate an expression and return its `str()` text, or `None`
    /// when the expression evaluated to Python `None`.
    pub fn eval_str(&self, expr: &str) -> Result<Option<String>, HarnessError> {
        self.interp.enter(|vm| {
            let value = eval_in(vm, &self.scope, expr)?;
            if vm.is_none(&value) {
                return Ok(None);
            }
            let text = value.str(vm).map_err(|exc| python_error(vm, exc))?;
            Ok(Some(text.as_str().to_owned()))
        })
    }
}

/// Compile and run one expression in the given scope.
fn eval_in(vm: &VirtualMachine, scope: &Scope, expr: &str) -> Result<PyObjectRef, HarnessError> {
    let code = vm
        .compile(expr, Mode::Eval, "<invocation>".to_owned())
        .map_err(|err| HarnessError::Compile {
            message: err.to_string(),
        })?;
    vm.run_code_obj(code, scope.clone())
        .map_err(|exc| python_error(vm, exc))
}

/// Convert an interpreter exception into a [`HarnessError`], capturing
/// the message and the formatted traceback.
pub(crate) fn python_error(vm: &VirtualMachine, exc: PyBaseExceptionRef) -> HarnessError {
    let message = exc
        .as_object()
        .str(vm)
        .map(|s| s.as_str().to_owned())
        .unwrap_or_else(|_| "unknown interpreter error".to_owned());

    // String implements py_io::Write via write_fmt.
    let mut traceback = String::new();
    let _ = vm.write_exception(&mut traceback, &exc);

    HarnessError::Python { message, traceback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_then_eval_repr() {
        let session = Session::new();
        session.exec("x = 40 + 2").unwrap();
        assert_eq!(session.eval_repr("x").unwrap(), Some("42".to_string()));
    }

    #[test]
    fn test_none_result_is_absent() {
        let session = Session::new();
        assert_eq!(session.eval_repr("None").unwrap(), None);
    }

    #[test]
    fn test_namespace_persists_across_runs() {
        let session = Session::new();
        session.exec("def double(n):\n    return n * 2").unwrap();
        // A later execution sees the earlier definition.
        assert_eq!(
            session.eval_repr("double(21)").unwrap(),
            Some("42".to_string())
        );
    }

    #[test]
    fn test_compile_error() {
        let session = Session::new();
        let err = session.exec("def broken(:").unwrap_err();
        assert!(matches!(err, HarnessError::Compile { .. }));
    }

    #[test]
    fn test_runtime_error_carries_message() {
        let session = Session::new();
        let err = session.eval_repr("1 / 0").unwrap_err();
        match err {
            HarnessError::Python { message, .. } => {
                assert!(message.to_lowercase().contains("division"));
            }
            other => panic!("expected Python error, got {other:?}"),
        }
    }

    #[test]
    fn test_str_and_repr_differ_for_strings() {
        let session = Session::new();
        assert_eq!(
            session.eval_repr("'hi'").unwrap(),
            Some("'hi'".to_string())
        );
        assert_eq!(session.eval_str("'hi'").unwrap(), Some("hi".to_string()));
    }
}
