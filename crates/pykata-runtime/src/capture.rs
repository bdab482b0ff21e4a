//! Run-mode stdout capture
//!
//! Run mode executes a submission once, with no test cases, and reports
//! whatever it printed. `sys.stdout` is swapped for an in-memory writer
//! object for the duration of the execution and restored afterwards —
//! including when the execution raises — so later evaluations print to
//! the real stdout again.

use std::sync::{Arc, Mutex};

use rustpython_vm::{function::FuncArgs, AsObject, PyObjectRef, PyResult, VirtualMachine};

use crate::error::HarnessError;
use crate::session::{python_error, Session};

/// Placeholder line reported when the submission printed nothing.
pub const NO_OUTPUT_PLACEHOLDER: &str =
    "Code executed successfully. No output detected. Use print() to display output here.";

/// Execute `source` with stdout captured, returning the printed lines.
///
/// Blank lines are dropped. When nothing was printed, a single
/// fixed placeholder line is returned instead.
pub fn capture_output(session: &Session, source: &str) -> Result<Vec<String>, HarnessError> {
    let captured = exec_captured(session, source)?;

    let lines: Vec<String> = captured
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect();

    if lines.is_empty() {
        return Ok(vec![NO_OUTPUT_PLACEHOLDER.to_string()]);
    }
    Ok(lines)
}

/// Run `source` with `sys.stdout` redirected into a buffer. The previous
/// stdout object is restored on every path out, success or error.
fn exec_captured(session: &Session, source: &str) -> Result<String, HarnessError> {
    session.interp.enter(|vm| {
        let buffer = Arc::new(Mutex::new(String::new()));

        let saved_stdout = vm.sys_module.get_attr("stdout", vm).ok();
        let writer = build_writer(vm, Arc::clone(&buffer));
        let _ = vm.sys_module.set_attr("stdout", writer, vm);

        let result = vm
            .compile(source, rustpython_vm::compiler::Mode::Exec, "<run>".to_owned())
            .map_err(|err| HarnessError::Compile {
                message: err.to_string(),
            })
            .and_then(|code| {
                vm.run_code_obj(code, session.scope.clone())
                    .map(|_| ())
                    .map_err(|exc| python_error(vm, exc))
            });

        // Restore before inspecting the result so an error cannot leave
        // the redirect in place.
        if let Some(old) = saved_stdout {
            let _ = vm.sys_module.set_attr("stdout", old, vm);
        }

        result?;
        let captured = buffer
            .lock()
            .map(|text| text.clone())
            .unwrap_or_default();
        Ok(captured)
    })
}

/// Build a minimal Python object with `write(s)` and `flush()` methods
/// that appends everything written to the shared buffer.
fn build_writer(vm: &VirtualMachine, buffer: Arc<Mutex<String>>) -> PyObjectRef {
    let write_buffer = Arc::clone(&buffer);
    let write_fn = vm.new_function(
        "write",
        move |args: FuncArgs, vm: &VirtualMachine| -> PyResult<PyObjectRef> {
            let data: String = args
                .args
                .first()
                .and_then(|o| o.str(vm).ok())
                .map(|s| s.as_str().to_owned())
                .unwrap_or_default();
            if let Ok(mut buf) = write_buffer.lock() {
                buf.push_str(&data);
            }
            Ok(vm.ctx.new_int(data.len()).into())
        },
    );

    let flush_fn = vm.new_function(
        "flush",
        move |_args: FuncArgs, vm: &VirtualMachine| -> PyResult<PyObjectRef> {
            Ok(vm.ctx.none())
        },
    );

    let ns = vm.new_module("<capture>", vm.ctx.new_dict(), None);
    let _ = ns.set_attr("write", write_fn, vm);
    let _ = ns.set_attr("flush", flush_fn, vm);
    let _ = ns.set_attr("closed", vm.ctx.new_bool(false), vm);
    let _ = ns.set_attr("encoding", vm.ctx.new_str("utf-8"), vm);
    ns.into()
}
