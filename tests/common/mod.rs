use snowman::mach::Runtime;
use std::cell::RefCell;
use std::io::{Cursor, Write};
use std::rc::Rc;

/// Shared buffer standing in for the interpreter's output channel, so a
/// test can keep reading what the runtime wrote.
#[derive(Clone, Default)]
pub struct Output(Rc<RefCell<Vec<u8>>>);

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Output {
    pub fn take(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).to_string()
    }
}

pub fn runtime_with_input(input: &str) -> (Runtime, Output) {
    let output = Output::default();
    let runtime = Runtime::with_io(
        Box::new(Cursor::new(input.as_bytes().to_vec())),
        Box::new(output.clone()),
    );
    (runtime, output)
}

pub fn runtime() -> (Runtime, Output) {
    runtime_with_input("")
}

/// Runs a program on a fresh runtime and returns it with everything it
/// printed. Panics on fatal errors; non-fatal ones stay collected on the
/// runtime for the test to inspect.
pub fn exec(code: &str) -> (Runtime, String) {
    let (mut runtime, output) = runtime();
    runtime.run(code).unwrap();
    (runtime, output.take())
}

/// Runs a program and asserts the machine line it leaves behind.
pub fn assert_debug(code: &str, expected: &str) {
    let (runtime, _) = exec(code);
    assert_eq!(runtime.debug(), expected, "for program {:?}", code);
}
