/// Every operator the evaluator can dispatch. Rotation and toggle variants
/// carry the slot indices they act on; the pairs and triples are part of the
/// language, not parameters a program can choose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Opcode {
    // register rotation
    Swap(usize, usize),
    Cycle(usize, usize, usize),
    // active flags
    Toggle2(usize, usize),
    Toggle3(usize, usize, usize),
    InvertActive,
    RotateActive,
    ReflectActive,
    ClearActive,
    SaveActive,
    RestoreActive,
    // permavars
    SetPermavar,
    GetPermavar,
    // numbers
    Increment,
    Decrement,
    Abs,
    Floor,
    Ceil,
    Round,
    BitNot,
    BitOr,
    BitAnd,
    BitXor,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Less,
    Greater,
    Range,
    Power,
    ToBase,
    // arrays
    Sort,
    SortBy,
    Fold,
    Concat,
    Difference,
    Union,
    Intersection,
    Repeat,
    Join,
    Split,
    Group,
    Each,
    Map,
    Nth,
    Select,
    SelectIndex,
    Below,
    Above,
    At,
    Length,
    Zip,
    Splice,
    Flatten,
    Shuffle,
    // text
    FromBase,
    Print,
    Match,
    Replace,
    ReplaceBlock,
    // blocks
    BlockRepeat,
    While,
    If,
    DoWhile,
    Execute,
    // any type
    Not,
    And,
    Or,
    Equal,
    Duplicate,
    Wrap,
    Inspect,
    // void
    Nop,
    GetLine,
    Random,
    Time,
    GetArgs,
}

impl Opcode {
    /// Single-character operators.
    pub fn from_char(c: char) -> Option<Opcode> {
        use Opcode::*;
        let op = match c {
            // slot swaps and cycles
            '/' => Swap(2, 5),
            '\\' => Swap(0, 7),
            '_' => Swap(5, 7),
            '[' => Swap(0, 5),
            ']' => Swap(2, 7),
            '|' => Swap(1, 6),
            '-' => Swap(3, 4),
            '\'' => Swap(1, 3),
            '`' => Swap(1, 4),
            ',' => Swap(4, 6),
            '.' => Swap(3, 6),
            '^' => Cycle(1, 3, 4),
            '>' => Cycle(5, 4, 0),
            '<' => Cycle(2, 3, 7),
            // active flags
            '(' => Toggle2(0, 5),
            ')' => Toggle2(2, 7),
            '{' => Toggle3(1, 3, 6),
            '}' => Toggle3(1, 4, 6),
            '~' => InvertActive,
            '@' => RotateActive,
            '%' => ReflectActive,
            '?' => ClearActive,
            '$' => SaveActive,
            '&' => RestoreActive,
            // permavars
            '*' => SetPermavar,
            '#' => GetPermavar,
            _ => return None,
        };
        Some(op)
    }

    /// Letter operators, keyed by canonical form: all-lowercase for pairs,
    /// all-uppercase for triples. The consume modifier is decoded from the
    /// original capitalization before lookup.
    pub fn from_letters(key: &str) -> Option<Opcode> {
        use Opcode::*;
        let op = match key {
            // numbers
            "NIN" => Increment,
            "NDE" => Decrement,
            "NAB" => Abs,
            "nf" => Floor,
            "nc" => Ceil,
            "NRO" => Round,
            "NBN" => BitNot,
            "NBO" => BitOr,
            "NBA" => BitAnd,
            "NBX" => BitXor,
            "na" => Add,
            "ns" => Sub,
            "nm" => Mul,
            "nd" => Div,
            "NMO" => Mod,
            "nl" => Less,
            "ng" => Greater,
            "nr" => Range,
            "np" => Power,
            "nb" => ToBase,
            // arrays
            "ASO" => Sort,
            "ASB" => SortBy,
            "af" => Fold,
            "ac" => Concat,
            "ad" => Difference,
            "AOR" => Union,
            "AAN" => Intersection,
            "ar" => Repeat,
            "aj" => Join,
            "as" => Split,
            "ag" => Group,
            "ae" => Each,
            "am" => Map,
            "an" => Nth,
            "ASE" => Select,
            "ASI" => SelectIndex,
            "AAL" => Below,
            "AAG" => Above,
            "aa" => At,
            "al" => Length,
            "az" => Zip,
            "ASP" => Splice,
            "AFL" => Flatten,
            "ASH" => Shuffle,
            // text
            "sb" => FromBase,
            "sp" => Print,
            "sm" => Match,
            "sr" => Replace,
            "SRB" => ReplaceBlock,
            // blocks
            "br" => BlockRepeat,
            "bw" => While,
            "bi" => If,
            "bd" => DoWhile,
            "be" => Execute,
            // any type
            "no" => Not,
            "bo" => And,
            "or" => Or,
            "eq" => Equal,
            "du" => Duplicate,
            "wr" => Wrap,
            "ts" => Inspect,
            // void
            "vn" => Nop,
            "vg" => GetLine,
            "vr" => Random,
            "vt" => Time,
            "va" => GetArgs,
            _ => return None,
        };
        Some(op)
    }
}
