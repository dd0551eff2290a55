use super::{Kind, Opcode, Val};
use crate::error;
use crate::lang::{tokenize, Error, Token};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Nesting bound for block execution. Each nested block costs one native
/// stack frame, so the limit turns runaway recursion into a fatal error
/// instead of a crash.
const MAX_DEPTH: usize = 512;

/// The eight slots laid out on the ring walked by the `@` operator.
const RING: [usize; 8] = [0, 1, 2, 4, 7, 6, 5, 3];

/// Snapshot of the register file taken at a subroutine boundary.
struct Frame {
    vars: [Val; 8],
    active: [bool; 8],
}

/// How `retrieve` treats active slots ahead of the wanted operand.
#[derive(Clone, Copy)]
pub(super) enum Skip {
    /// Pass over this many active slots without inspecting them.
    Ahead(usize),
    /// Pass over any slot that is undefined or of the wrong type.
    Lenient,
}

/// ## The Snowman interpreter
///
/// Owns the eight registers and their active flags, the permavar map, the
/// subroutine stack, and the I/O channels. One `Runtime` runs one program;
/// permavars and registers persist across `run` calls, which is what the
/// REPL relies on.
pub struct Runtime {
    pub(super) vars: [Val; 8],
    pub(super) active: [bool; 8],
    pub(super) saved_active: [bool; 8],
    frames: Vec<Frame>,
    pub(super) permavars: BTreeMap<usize, Val>,
    pub(super) active_permavar: usize,
    pub(super) args: Vec<Val>,
    errors: Vec<Error>,
    depth: usize,
    interrupted: Arc<AtomicBool>,
    /// When set, every token echoes itself and the machine state.
    pub trace: bool,
    pub(super) input: Box<dyn BufRead>,
    pub(super) output: Box<dyn Write>,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new()
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::with_io(
            Box::new(std::io::BufReader::new(std::io::stdin())),
            Box::new(std::io::stdout()),
        )
    }

    /// A runtime reading `vg` lines from `input` and printing to `output`.
    pub fn with_io(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Runtime {
        Runtime {
            vars: Default::default(),
            active: [false; 8],
            saved_active: [false; 8],
            frames: Vec::new(),
            permavars: BTreeMap::new(),
            active_permavar: 0,
            args: Vec::new(),
            errors: Vec::new(),
            depth: 0,
            interrupted: Arc::new(AtomicBool::new(false)),
            trace: false,
            input,
            output,
        }
    }

    /// Appends one command-line argument, surfaced to programs by `va`.
    pub fn add_arg(&mut self, arg: &str) {
        self.args.push(Val::from_text(arg));
    }

    /// Flag polled between tokens; setting it aborts the run with a fatal
    /// error. Handed to the ctrlc handler by the terminal front end.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    /// Non-fatal errors recorded so far, oldest first.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    /// Tokenizes and evaluates `code` against the current machine state.
    /// Non-fatal errors are recorded and execution continues; the returned
    /// error is always fatal and ends the whole program, however deeply
    /// nested the block that raised it.
    pub fn run(&mut self, code: &str) -> Result<(), Error> {
        let tokens = tokenize(code)?;
        self.execute(&tokens)
    }

    fn execute(&mut self, tokens: &[Token]) -> Result<(), Error> {
        if self.depth >= MAX_DEPTH {
            return Err(error!(TooDeep, "run"));
        }
        self.depth += 1;
        let result = self.token_loop(tokens);
        self.depth -= 1;
        result
    }

    fn token_loop(&mut self, tokens: &[Token]) -> Result<(), Error> {
        for token in tokens {
            if self.interrupted.load(Ordering::SeqCst) {
                self.interrupted.store(false, Ordering::SeqCst);
                return Err(error!(Interrupted, "run"));
            }
            if let Err(e) = self.eval_token(token) {
                let e = e.in_context(&token.to_string());
                if e.is_fatal() {
                    return Err(e);
                }
                self.errors.push(e);
            }
            if self.trace {
                let state = self.debug();
                let _ = writeln!(self.output, "<[T]> {}", token);
                let _ = write!(self.output, "<[D]> {}", state);
            }
        }
        Ok(())
    }

    fn eval_token(&mut self, token: &Token) -> Result<(), Error> {
        match token {
            Token::Number(s) => match s.parse::<i32>() {
                Ok(n) => {
                    self.store(Val::Num(f64::from(n)));
                    Ok(())
                }
                Err(_) => {
                    // recover with a zero so the program can keep going
                    self.store(Val::Num(0.0));
                    Err(error!(BadNumber))
                }
            },
            Token::Str(s) => {
                self.store(Val::from_text(s));
                Ok(())
            }
            Token::Block(s) => {
                self.store(Val::Block(s.clone()));
                Ok(())
            }
            Token::Permavar(s) => {
                self.active_permavar = Token::permavar_key(s);
                Ok(())
            }
            Token::SubStart => {
                self.open_frame();
                Ok(())
            }
            Token::SubEnd => self.close_frame(),
            Token::Letters(s) => {
                let (key, consume) = decode_letters(s)?;
                match Opcode::from_letters(&key) {
                    Some(op) => self.exec(op, consume),
                    None => Err(error!(UnknownToken)),
                }
            }
            Token::Char(c) => match Opcode::from_char(*c) {
                Some(op) => self.exec(op, false),
                None => Err(error!(UnknownToken)),
            },
        }
    }

    /// Publishes a result: the first active slot holding `Undefined`
    /// receives the value. With no such slot the value is discarded; this
    /// is the language's only output sink, so programs keep an empty active
    /// slot ready.
    pub(super) fn store(&mut self, val: Val) {
        for i in 0..8 {
            if self.active[i] && matches!(self.vars[i], Val::Undefined) {
                self.vars[i] = val;
                return;
            }
        }
    }

    /// Gathers operands from the active slots in index order.
    ///
    /// A slot that is undefined or fails the type check raises a non-fatal
    /// error (the operator's use was wrong) unless the skip mode is
    /// `Lenient`. Running out of active slots before `count` values are
    /// found is fatal: the slot configuration itself cannot supply the
    /// operator, so nothing later in the program can be trusted to.
    pub(super) fn retrieve(
        &mut self,
        kind: Option<Kind>,
        count: usize,
        consume: bool,
        skip: Skip,
    ) -> Result<Vec<Val>, Error> {
        let lenient = matches!(skip, Skip::Lenient);
        let mut ahead = match skip {
            Skip::Ahead(n) => n,
            Skip::Lenient => 0,
        };
        let mut out = Vec::with_capacity(count);
        for i in 0..8 {
            if !self.active[i] {
                continue;
            }
            if ahead > 0 {
                ahead -= 1;
                continue;
            }
            let usable = match kind {
                Some(k) => self.vars[i].kind() == Some(k),
                None => self.vars[i].kind().is_some(),
            };
            if usable {
                let val = if consume {
                    std::mem::replace(&mut self.vars[i], Val::Undefined)
                } else {
                    self.vars[i].clone()
                };
                out.push(val);
                if out.len() == count {
                    return Ok(out);
                }
            } else if !lenient {
                return Err(error!(WrongType));
            }
        }
        Err(error!(NotEnough))
    }

    pub(super) fn take_num(&mut self, consume: bool, skip: usize) -> Result<f64, Error> {
        match self.retrieve(Some(Kind::Num), 1, consume, Skip::Ahead(skip))?.pop() {
            Some(Val::Num(n)) => Ok(n),
            _ => Err(error!(InternalError)),
        }
    }

    pub(super) fn take_arr(&mut self, consume: bool, skip: usize) -> Result<Vec<Val>, Error> {
        match self.retrieve(Some(Kind::Arr), 1, consume, Skip::Ahead(skip))?.pop() {
            Some(Val::Arr(a)) => Ok(a),
            _ => Err(error!(InternalError)),
        }
    }

    pub(super) fn take_block(&mut self, consume: bool, skip: usize) -> Result<String, Error> {
        match self.retrieve(Some(Kind::Block), 1, consume, Skip::Ahead(skip))?.pop() {
            Some(Val::Block(b)) => Ok(b),
            _ => Err(error!(InternalError)),
        }
    }

    pub(super) fn take_any(&mut self, consume: bool, skip: usize) -> Result<Val, Error> {
        match self.retrieve(None, 1, consume, Skip::Ahead(skip))?.pop() {
            Some(v) => Ok(v),
            None => Err(error!(InternalError)),
        }
    }

    /// The first defined active value, whatever slot it sits in. Used to
    /// read a value "returned" by a block.
    pub(super) fn take_result(&mut self, consume: bool) -> Result<Val, Error> {
        match self.retrieve(None, 1, consume, Skip::Lenient)?.pop() {
            Some(v) => Ok(v),
            None => Err(error!(InternalError)),
        }
    }

    /// A block's returned value read as a boolean, always consuming.
    pub(super) fn take_flag(&mut self) -> Result<bool, Error> {
        Ok(self.take_result(true)?.truthy())
    }

    fn open_frame(&mut self) {
        let vars = std::mem::take(&mut self.vars);
        let active = std::mem::replace(&mut self.active, [false; 8]);
        self.frames.push(Frame { vars, active });
    }

    fn close_frame(&mut self) -> Result<(), Error> {
        match self.frames.pop() {
            Some(frame) => {
                self.vars = frame.vars;
                self.active = frame.active;
                Ok(())
            }
            None => Err(error!(NoSubroutine)),
        }
    }

    /// Advances every active flag one step along the ring a,b,c,e,h,g,f,d.
    pub(super) fn rotate_active(&mut self) {
        let old = self.active;
        for i in 0..8 {
            self.active[RING[(i + 1) % 8]] = old[RING[i]];
        }
    }

    pub(super) fn print_text(&mut self, text: &str) {
        let _ = write!(self.output, "{}", text);
        let _ = self.output.flush();
    }

    pub(super) fn read_input_line(&mut self) -> String {
        let mut line = String::new();
        let _ = self.input.read_line(&mut line);
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        line
    }

    /// Renders the registers and every defined permavar on one line:
    /// `{* 7 }` is an active slot holding 7, `{  }` an inactive empty one,
    /// and `==!=5` the permavar named `==!` holding 5.
    pub fn debug(&self) -> String {
        let mut s = String::new();
        for i in 0..8 {
            s.push('{');
            if self.active[i] {
                s.push('*');
            }
            s.push(' ');
            s.push_str(&self.vars[i].inspect());
            s.push_str(" } ");
        }
        for (key, val) in &self.permavars {
            s.push_str(&"=".repeat(key / 2));
            s.push(if key % 2 == 0 { '+' } else { '!' });
            s.push('=');
            s.push_str(&val.inspect());
            s.push(' ');
        }
        s.pop();
        s.push('\n');
        s
    }
}

fn decode_letters(s: &str) -> Result<(String, bool), Error> {
    let c: Vec<char> = s.chars().collect();
    match c.len() {
        2 if c[0].is_ascii_lowercase() => {
            // the second letter's case is the consume modifier
            let consume = c[1].is_ascii_uppercase();
            Ok((s.to_ascii_lowercase(), consume))
        }
        3 if c[0].is_ascii_uppercase() => {
            let consume = if c[1].is_ascii_lowercase() && c[2].is_ascii_uppercase() {
                true
            } else if c[1].is_ascii_uppercase() && c[2].is_ascii_lowercase() {
                false
            } else {
                return Err(error!(BadCase));
            };
            Ok((s.to_ascii_uppercase(), consume))
        }
        _ => Err(error!(UnknownToken)),
    }
}
