use super::{Opcode, Runtime, Val};
use crate::error;
use crate::lang::Error;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

type Result<T> = std::result::Result<T, Error>;

/// Digit alphabet shared by the base-conversion operators.
const DIGITS: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
/// Fractional digits emitted by `nb` before giving up.
const TOBASE_PRECISION: usize = 10;
/// A fractional part smaller than this is treated as zero.
const TOBASE_EPSILON: f64 = 0.00001;

impl Runtime {
    /// Runs one operator. `consume` is the per-token modifier decoded from
    /// letter case; operands taken before a failure stay taken.
    pub(super) fn exec(&mut self, op: Opcode, consume: bool) -> Result<()> {
        use Opcode::*;
        match op {
            // register rotation
            Swap(a, b) => self.vars.swap(a, b),
            Cycle(a, b, c) => {
                self.vars.swap(a, b);
                self.vars.swap(b, c);
            }

            // active flags
            Toggle2(a, b) => {
                self.active[a] = !self.active[a];
                self.active[b] = !self.active[b];
            }
            Toggle3(a, b, c) => {
                self.active[a] = !self.active[a];
                self.active[b] = !self.active[b];
                self.active[c] = !self.active[c];
            }
            InvertActive => {
                for flag in self.active.iter_mut() {
                    *flag = !*flag;
                }
            }
            RotateActive => self.rotate_active(),
            ReflectActive => {
                // four steps: a point reflection of the eight-slot ring
                for _ in 0..4 {
                    self.rotate_active();
                }
            }
            ClearActive => self.active = [false; 8],
            SaveActive => self.saved_active = self.active,
            RestoreActive => self.active = self.saved_active,

            // permavars
            SetPermavar => {
                let v = self.take_result(true)?;
                self.permavars.insert(self.active_permavar, v);
            }
            GetPermavar => {
                let v = self
                    .permavars
                    .entry(self.active_permavar)
                    .or_insert(Val::Undefined)
                    .clone();
                self.store(v);
            }

            // numbers
            Increment => {
                let a = self.take_num(consume, 0)?;
                self.store(Val::Num(a + 1.0));
            }
            Decrement => {
                let a = self.take_num(consume, 0)?;
                self.store(Val::Num(a - 1.0));
            }
            Abs => {
                let a = self.take_num(consume, 0)?;
                self.store(Val::Num(a.abs()));
            }
            Floor => {
                let a = self.take_num(consume, 0)?;
                self.store(Val::Num(a.floor()));
            }
            Ceil => {
                let a = self.take_num(consume, 0)?;
                self.store(Val::Num(a.ceil()));
            }
            Round => {
                let a = self.take_num(consume, 0)?;
                self.store(Val::Num(a.round()));
            }
            BitNot => {
                let a = self.take_num(consume, 0)?;
                self.store(Val::Num(!(a.round() as i64) as f64));
            }
            BitOr => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::Num((a.round() as i64 | b.round() as i64) as f64));
            }
            BitAnd => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::Num((a.round() as i64 & b.round() as i64) as f64));
            }
            BitXor => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::Num((a.round() as i64 ^ b.round() as i64) as f64));
            }
            Add => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::Num(a + b));
            }
            Sub => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::Num(a - b));
            }
            Mul => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::Num(a * b));
            }
            Div => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::Num(a / b));
            }
            Mod => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::Num(a % b));
            }
            Less => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::from_bool(a < b));
            }
            Greater => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::from_bool(a > b));
            }
            Range => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                let mut arr = Vec::new();
                let mut i = a;
                if a > b {
                    while i > b {
                        arr.push(Val::Num(i));
                        i -= 1.0;
                    }
                } else {
                    while i < b {
                        arr.push(Val::Num(i));
                        i += 1.0;
                    }
                }
                self.store(Val::Arr(arr));
            }
            Power => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                self.store(Val::Num(a.powf(b)));
            }
            ToBase => {
                let a = self.take_num(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                let base = b.round() as i64;
                if base <= 0 {
                    return Err(error!(BadCount; "negative or 0 base, stopping execution of operator"));
                }
                if base > 36 {
                    return Err(error!(BadCount; "base beyond the digit alphabet, stopping execution of operator"));
                }
                self.store(Val::from_text(&to_base(a, base)));
            }

            // arrays
            Sort => {
                let mut a = self.take_arr(consume, 0)?;
                a.sort_by(|x, y| x.compare(y));
                self.store(Val::Arr(a));
            }
            SortBy => {
                let mut a = self.take_arr(consume, 0)?;
                let block = self.take_block(consume, 1)?;
                // insertion sort: every comparison is one sequential run of
                // the block, answering "is the left operand smaller?"
                for i in 1..a.len() {
                    let mut j = i;
                    while j > 0 {
                        self.store(a[j].clone());
                        self.store(a[j - 1].clone());
                        self.run(&block)?;
                        if self.take_flag()? {
                            a.swap(j - 1, j);
                            j -= 1;
                        } else {
                            break;
                        }
                    }
                }
                self.store(Val::Arr(a));
            }
            Fold => {
                let a = self.take_arr(consume, 0)?;
                let block = self.take_block(consume, 1)?;
                if a.is_empty() {
                    self.store(Val::Num(0.0)); // this is just arbitrary
                } else {
                    for (i, v) in a.into_iter().enumerate() {
                        self.store(v);
                        if i > 0 {
                            self.run(&block)?;
                        }
                    }
                }
            }
            Concat => {
                let mut a = self.take_arr(consume, 0)?;
                let b = self.take_arr(consume, 1)?;
                a.extend(b);
                self.store(Val::Arr(a));
            }
            Difference => {
                let a = self.take_arr(consume, 0)?;
                let b = self.take_arr(consume, 1)?;
                let out: Vec<Val> = a.into_iter().filter(|v| !b.contains(v)).collect();
                self.store(Val::Arr(out));
            }
            Union => {
                let a = self.take_arr(consume, 0)?;
                let b = self.take_arr(consume, 1)?;
                let mut out = Vec::new();
                for v in a.into_iter().chain(b.into_iter()) {
                    if !out.contains(&v) {
                        out.push(v);
                    }
                }
                self.store(Val::Arr(out));
            }
            Intersection => {
                let a = self.take_arr(consume, 0)?;
                let b = self.take_arr(consume, 1)?;
                let mut out = Vec::new();
                for v in a {
                    if b.contains(&v) && !out.contains(&v) {
                        out.push(v);
                    }
                }
                self.store(Val::Arr(out));
            }
            Repeat => {
                let a = self.take_arr(consume, 0)?;
                let n = self.take_num(consume, 1)?;
                // fractional repeat counts fill a partial copy
                let total = if a.is_empty() {
                    0
                } else {
                    (a.len() as f64 * n.max(0.0)) as usize
                };
                let mut out = Vec::with_capacity(total.min(65536));
                for i in 0..total {
                    out.push(a[i % a.len()].clone());
                }
                self.store(Val::Arr(out));
            }
            Join => {
                let a = self.take_arr(consume, 0)?;
                let sep = self.take_arr(consume, 1)?;
                if a.len() < 2 {
                    self.store(Val::Arr(a));
                } else {
                    let last = a.len() - 1;
                    let mut out = Vec::new();
                    for (i, v) in a.into_iter().enumerate() {
                        out.push(v);
                        if i < last {
                            out.extend(sep.iter().cloned());
                        }
                    }
                    self.store(Val::Arr(out));
                }
            }
            Split => {
                let a = self.take_arr(consume, 0)?;
                let sep = self.take_arr(consume, 1)?;
                let mut out = Vec::new();
                let mut chunk = Vec::new();
                let mut i = 0;
                while i < a.len() {
                    if !sep.is_empty() && a.get(i..i + sep.len()) == Some(&sep[..]) {
                        out.push(Val::Arr(std::mem::take(&mut chunk)));
                        i += sep.len();
                    } else {
                        chunk.push(a[i].clone());
                        i += 1;
                    }
                }
                out.push(Val::Arr(chunk));
                self.store(Val::Arr(out));
            }
            Group => {
                let a = self.take_arr(consume, 0)?;
                let n = self.take_num(consume, 1)?.round() as i64;
                if n <= 0 {
                    return Err(error!(BadCount; "negative or 0 group size, stopping execution of operator"));
                }
                let out: Vec<Val> = a.chunks(n as usize).map(|c| Val::Arr(c.to_vec())).collect();
                self.store(Val::Arr(out));
            }
            Each => {
                let a = self.take_arr(consume, 0)?;
                let block = self.take_block(consume, 1)?;
                for v in a {
                    self.store(v);
                    self.run(&block)?;
                }
            }
            Map => {
                let a = self.take_arr(consume, 0)?;
                let block = self.take_block(consume, 1)?;
                let mut out = Vec::new();
                for v in a {
                    self.store(v);
                    self.run(&block)?;
                    out.push(self.take_result(consume)?);
                }
                self.store(Val::Arr(out));
            }
            Nth => {
                let a = self.take_arr(consume, 0)?;
                let step = self.take_num(consume, 1)?.round() as i64;
                if step == 0 {
                    return Err(error!(BadCount; "zero step, stopping execution of operator"));
                }
                let mut out = Vec::new();
                let mut i: i64 = if step < 0 { a.len() as i64 - 1 } else { 0 };
                while i >= 0 && i < a.len() as i64 {
                    out.push(a[i as usize].clone());
                    i += step;
                }
                self.store(Val::Arr(out));
            }
            Select => {
                let a = self.take_arr(consume, 0)?;
                let block = self.take_block(consume, 1)?;
                let mut out = Vec::new();
                for v in a {
                    self.store(v.clone());
                    self.run(&block)?;
                    if self.take_result(consume)?.truthy() {
                        out.push(v);
                    }
                }
                self.store(Val::Arr(out));
            }
            SelectIndex => {
                let a = self.take_arr(consume, 0)?;
                let block = self.take_block(consume, 1)?;
                let mut out = Vec::new();
                for (i, v) in a.into_iter().enumerate() {
                    self.store(v);
                    self.run(&block)?;
                    if self.take_result(consume)?.truthy() {
                        out.push(Val::Num(i as f64));
                    }
                }
                self.store(Val::Arr(out));
            }
            Below => {
                let a = self.take_arr(consume, 0)?;
                let n = self.take_num(consume, 1)?.round().max(0.0) as usize;
                let out: Vec<Val> = a.into_iter().take(n).collect();
                self.store(Val::Arr(out));
            }
            Above => {
                let a = self.take_arr(consume, 0)?;
                let n = self.take_num(consume, 1)?.round() as i64;
                let start = n.saturating_add(1).max(0) as usize;
                let out: Vec<Val> = a.into_iter().skip(start).collect();
                self.store(Val::Arr(out));
            }
            At => {
                let a = self.take_arr(consume, 0)?;
                // index truncates toward zero; out of range yields 0
                let idx = self.take_num(consume, 1)? as i64;
                let v = if idx >= 0 && (idx as usize) < a.len() {
                    a[idx as usize].clone()
                } else {
                    Val::Num(0.0)
                };
                self.store(v);
            }
            Length => {
                let a = self.take_arr(consume, 0)?;
                self.store(Val::Num(a.len() as f64));
            }
            Zip => {
                let a = self.take_arr(consume, 0)?;
                let mut rows = Vec::new();
                for v in &a {
                    match v {
                        Val::Arr(inner) => rows.push(inner),
                        _ => return Err(error!(NotAnArray)),
                    }
                }
                let longest = rows.iter().map(|r| r.len()).max().unwrap_or(0);
                let mut out = Vec::new();
                for j in 0..longest {
                    // ragged rows pad by omission
                    let column: Vec<Val> =
                        rows.iter().filter_map(|r| r.get(j)).cloned().collect();
                    out.push(Val::Arr(column));
                }
                self.store(Val::Arr(out));
            }
            Splice => {
                let a = self.take_arr(consume, 0)?;
                let start = self.take_num(consume, 1)?.round().max(0.0);
                let len = self.take_num(consume, 2)?.round().max(0.0);
                let repl = self.take_arr(consume, 3)?;
                let begin = (start as usize).min(a.len());
                let end = ((start + len) as usize).min(a.len()).max(begin);
                let mut out: Vec<Val> = a[..begin].to_vec();
                out.extend(repl);
                out.extend(a[end..].iter().cloned());
                self.store(Val::Arr(out));
            }
            Flatten => {
                let a = self.take_arr(consume, 0)?;
                let mut count = self.take_num(consume, 1)?.round() as i64;
                let infinite = count == 0;
                let mut cur = a;
                let mut changed = true;
                while changed {
                    if !infinite {
                        if count == 0 {
                            break;
                        }
                        count -= 1;
                    }
                    changed = false;
                    let mut next = Vec::new();
                    for v in cur {
                        match v {
                            Val::Arr(inner) => {
                                changed = true;
                                next.extend(inner);
                            }
                            other => next.push(other),
                        }
                    }
                    cur = next;
                }
                self.store(Val::Arr(cur));
            }
            Shuffle => {
                let mut a = self.take_arr(consume, 0)?;
                a.shuffle(&mut rand::thread_rng());
                self.store(Val::Arr(a));
            }

            // text
            FromBase => {
                let a = self.take_arr(consume, 0)?;
                let b = self.take_num(consume, 1)?;
                let base = b.round() as i64;
                if base <= 0 {
                    return Err(error!(BadCount; "negative or 0 base, stopping execution of operator"));
                }
                let text = Val::to_text(&a)?;
                self.store(Val::Num(from_base(&text, base)));
            }
            Print => {
                let a = self.take_arr(consume, 0)?;
                let text = Val::to_text(&a)?;
                self.print_text(&text);
            }
            Match => {
                let a = self.take_arr(consume, 0)?;
                let b = self.take_arr(consume, 1)?;
                let text = Val::to_text(&a)?;
                let pattern = Val::to_text(&b)?;
                let re = Regex::new(&pattern).map_err(|_| error!(BadRegex))?;
                let out: Vec<Val> = re
                    .find_iter(&text)
                    .map(|m| Val::from_text(m.as_str()))
                    .collect();
                self.store(Val::Arr(out));
            }
            Replace => {
                let a = self.take_arr(consume, 0)?;
                let b = self.take_arr(consume, 1)?;
                let c = self.take_arr(consume, 2)?;
                let text = Val::to_text(&a)?;
                let pattern = Val::to_text(&b)?;
                let repl = Val::to_text(&c)?;
                let re = Regex::new(&pattern).map_err(|_| error!(BadRegex))?;
                let result = re.replace_all(&text, repl.as_str());
                self.store(Val::from_text(&result));
            }
            ReplaceBlock => {
                let a = self.take_arr(consume, 0)?;
                let b = self.take_arr(consume, 1)?;
                let block = self.take_block(consume, 2)?;
                let text = Val::to_text(&a)?;
                let pattern = Val::to_text(&b)?;
                let re = Regex::new(&pattern).map_err(|_| error!(BadRegex))?;
                let mut result = String::new();
                let mut last = 0;
                let matches: Vec<(usize, usize)> =
                    re.find_iter(&text).map(|m| (m.start(), m.end())).collect();
                for (start, end) in matches {
                    result.push_str(&text[last..start]);
                    self.store(Val::from_text(&text[start..end]));
                    self.run(&block)?;
                    let replaced = self.take_arr(true, 0)?;
                    result.push_str(&Val::to_text(&replaced)?);
                    last = end;
                }
                result.push_str(&text[last..]);
                self.store(Val::from_text(&result));
            }

            // blocks
            BlockRepeat => {
                let block = self.take_block(consume, 0)?;
                let n = self.take_num(consume, 1)?.round() as i64;
                for _ in 0..n.max(0) {
                    self.run(&block)?;
                }
            }
            While => {
                let body = self.take_block(consume, 0)?;
                let cond = self.take_block(consume, 1)?;
                loop {
                    self.run(&cond)?;
                    if !self.take_flag()? {
                        break;
                    }
                    self.run(&body)?;
                }
            }
            If => {
                let then_block = self.take_block(consume, 0)?;
                let else_block = self.take_block(consume, 1)?;
                let c = self.take_any(consume, 2)?;
                if c.truthy() {
                    self.run(&then_block)?;
                } else {
                    self.run(&else_block)?;
                }
            }
            DoWhile => {
                let block = self.take_block(consume, 0)?;
                loop {
                    self.run(&block)?;
                    if !self.take_flag()? {
                        break;
                    }
                }
            }
            Execute => {
                let block = self.take_block(consume, 0)?;
                self.run(&block)?;
            }

            // any type
            Not => {
                let v = self.take_any(consume, 0)?;
                self.store(Val::from_bool(!v.truthy()));
            }
            And => {
                let a = self.take_any(consume, 0)?;
                let b = self.take_any(consume, 1)?;
                self.store(Val::from_bool(a.truthy() && b.truthy()));
            }
            Or => {
                let a = self.take_any(consume, 0)?;
                let b = self.take_any(consume, 1)?;
                self.store(Val::from_bool(a.truthy() || b.truthy()));
            }
            Equal => {
                let a = self.take_any(consume, 0)?;
                let b = self.take_any(consume, 1)?;
                self.store(Val::from_bool(a == b));
            }
            Duplicate => {
                let v = self.take_any(consume, 0)?;
                self.store(v.clone());
                self.store(v);
            }
            Wrap => {
                let v = self.take_any(consume, 0)?;
                self.store(Val::Arr(vec![v]));
            }
            Inspect => {
                let v = self.take_any(consume, 0)?;
                self.store(Val::from_text(&v.inspect()));
            }

            // void
            Nop => {}
            GetLine => {
                let line = self.read_input_line();
                self.store(Val::from_text(&line));
            }
            Random => {
                self.store(Val::Num(rand::thread_rng().gen::<f64>()));
            }
            Time => {
                self.store(Val::Num(chrono::Utc::now().timestamp() as f64));
            }
            GetArgs => {
                self.store(Val::Arr(self.args.clone()));
            }
        }
        Ok(())
    }
}

/// Renders `n` in `base` (2..=36): digits for the integer part, then up to
/// `TOBASE_PRECISION` fractional digits while anything above the epsilon
/// remains.
fn to_base(n: f64, base: i64) -> String {
    let digits: Vec<char> = DIGITS.chars().collect();
    let mut int_part = n.floor() as i64;
    let neg = int_part < 0;
    if neg {
        int_part = -int_part;
    }
    let mut s = String::new();
    while int_part > 0 {
        s.insert(0, digits[(int_part % base) as usize]);
        int_part /= base;
    }
    if neg {
        s.insert(0, '-');
    }
    let mut frac = n - n.floor();
    if frac > TOBASE_EPSILON {
        s.push('.');
        let mut count = 0;
        while count < TOBASE_PRECISION && frac > TOBASE_EPSILON {
            frac *= base as f64;
            let digit = frac.floor() as usize;
            s.push(digits[digit.min(35)]);
            frac -= digit as f64;
            count += 1;
        }
    }
    s
}

/// Parses text in `base`: optional sign, optional single point, digits from
/// the shared alphabet. Any digit outside the base collapses the result to
/// zero.
fn from_base(text: &str, base: i64) -> f64 {
    let mut chars: Vec<char> = text.chars().collect();
    let neg = chars.first() == Some(&'-');
    if neg {
        chars.remove(0);
    }
    let sub_pos: isize = match chars.iter().position(|&c| c == '.') {
        Some(p) => {
            chars.remove(p);
            p as isize - 1
        }
        None => chars.len() as isize - 1,
    };
    let digits: Vec<char> = DIGITS.chars().collect();
    let mut num = 0.0;
    for (i, c) in chars.iter().enumerate() {
        let c = c.to_ascii_lowercase();
        match digits.iter().position(|&d| d == c) {
            Some(d) if (d as i64) < base => {
                num += d as f64 * (base as f64).powi((sub_pos - i as isize) as i32);
            }
            _ => {
                num = 0.0;
                break;
            }
        }
    }
    if neg {
        -num
    } else {
        num
    }
}
