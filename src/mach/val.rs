use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

/// A Snowman value. `Arr` and `Block` own their payloads outright; cloning
/// a value deep-copies, so no two live values ever share storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Undefined,
    Num(f64),
    Arr(Vec<Val>),
    Block(String),
}

impl Default for Val {
    fn default() -> Val {
        Val::Undefined
    }
}

/// The concrete types an operand can be required to have. `Undefined` is
/// never a valid operand, so it has no kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Num,
    Arr,
    Block,
}

impl Val {
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Val::Undefined => None,
            Val::Num(_) => Some(Kind::Num),
            Val::Arr(_) => Some(Kind::Arr),
            Val::Block(_) => Some(Kind::Block),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Val::Undefined => 0,
            Val::Num(_) => 1,
            Val::Arr(_) => 2,
            Val::Block(_) => 3,
        }
    }

    /// Total order used by sort and the set operators: variant tag first,
    /// then numeric order, element-wise lexicographic order, or block text.
    pub fn compare(&self, other: &Val) -> Ordering {
        match (self, other) {
            (Val::Num(a), Val::Num(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Val::Arr(a), Val::Arr(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.compare(y) {
                        Ordering::Equal => {}
                        ord => return ord,
                    }
                }
                a.len().cmp(&b.len())
            }
            (Val::Block(a), Val::Block(b)) => a.cmp(b),
            (Val::Undefined, Val::Undefined) => Ordering::Equal,
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// `0`, `:;`, `[]`, and undefined are false; everything else is true.
    pub fn truthy(&self) -> bool {
        match self {
            Val::Undefined => false,
            Val::Num(n) => *n != 0.0,
            Val::Arr(a) => !a.is_empty(),
            Val::Block(b) => !b.is_empty(),
        }
    }

    pub fn from_bool(b: bool) -> Val {
        Val::Num(if b { 1.0 } else { 0.0 })
    }

    /// Builds a text array: one number per character, holding its scalar
    /// value.
    pub fn from_text(s: &str) -> Val {
        Val::Arr(s.chars().map(|c| Val::Num(c as u32 as f64)).collect())
    }

    /// Decodes a text array back into a string. Any non-numeric element
    /// makes the array unusable as text.
    pub fn to_text(arr: &[Val]) -> Result<String> {
        let mut s = String::new();
        for v in arr {
            match v {
                Val::Num(n) => {
                    s.push(char::from_u32(*n as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
                }
                _ => return Err(error!(BadArgument)),
            }
        }
        Ok(s)
    }

    /// Display rendering: numbers print in shortest round-trip form, arrays
    /// as bracketed space-separated elements, blocks with their delimiters,
    /// undefined as nothing at all.
    pub fn inspect(&self) -> String {
        match self {
            Val::Undefined => String::new(),
            Val::Num(n) => n.to_string(),
            Val::Arr(a) => {
                if a.is_empty() {
                    "[]".to_string()
                } else {
                    let elems: Vec<String> = a.iter().map(Val::inspect).collect();
                    format!("[{}]", elems.join(" "))
                }
            }
            Val::Block(b) => format!(":{};", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect() {
        assert_eq!(Val::Undefined.inspect(), "");
        assert_eq!(Val::Num(7.0).inspect(), "7");
        assert_eq!(Val::Num(2.5).inspect(), "2.5");
        assert_eq!(Val::Arr(vec![]).inspect(), "[]");
        let a = Val::Arr(vec![Val::Num(1.0), Val::Arr(vec![Val::Num(2.0)])]);
        assert_eq!(a.inspect(), "[1 [2]]");
        assert_eq!(Val::Block("1na".to_string()).inspect(), ":1na;");
    }

    #[test]
    fn test_compare_across_variants() {
        assert_eq!(
            Val::Undefined.compare(&Val::Num(-100.0)),
            Ordering::Less
        );
        assert_eq!(
            Val::Num(1e9).compare(&Val::Arr(vec![])),
            Ordering::Less
        );
        assert_eq!(
            Val::Block(String::new()).compare(&Val::Arr(vec![Val::Num(1.0)])),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_arrays_lexicographic() {
        let a = Val::Arr(vec![Val::Num(1.0), Val::Num(2.0)]);
        let b = Val::Arr(vec![Val::Num(1.0), Val::Num(3.0)]);
        let c = Val::Arr(vec![Val::Num(1.0)]);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(a.compare(&c), Ordering::Greater);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_truthy() {
        assert!(!Val::Undefined.truthy());
        assert!(!Val::Num(0.0).truthy());
        assert!(!Val::Arr(vec![]).truthy());
        assert!(!Val::Block(String::new()).truthy());
        assert!(Val::Num(-1.0).truthy());
        assert!(Val::Arr(vec![Val::Undefined]).truthy());
    }

    #[test]
    fn test_text_round_trip() {
        let v = Val::from_text("Hi!");
        assert_eq!(
            v,
            Val::Arr(vec![Val::Num(72.0), Val::Num(105.0), Val::Num(33.0)])
        );
        if let Val::Arr(a) = v {
            assert_eq!(Val::to_text(&a).unwrap(), "Hi!");
        }
        assert!(Val::to_text(&[Val::Block(String::new())]).is_err());
    }
}
