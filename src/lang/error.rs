pub struct Error {
    code: ErrorCode,
    context: String,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $ctx:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_context($ctx)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $ctx:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_context($ctx)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            context: String::new(),
            message: String::new(),
        }
    }

    /// Attaches the phase or token the error was raised for. The first
    /// context sticks; an error surfacing out of a nested block keeps the
    /// token that actually failed.
    pub fn in_context(mut self, context: &str) -> Error {
        if self.context.is_empty() {
            self.context = context.to_string();
        }
        self
    }

    pub fn message(mut self, message: &str) -> Error {
        self.message = message.to_string();
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Fatal errors abort the whole run; non-fatal errors abort only the
    /// current token and execution continues.
    pub fn is_fatal(&self) -> bool {
        use ErrorCode::*;
        match self.code {
            Premature | BadNesting | BadPermavar | UnknownToken | NotEnough | BadArgument
            | TooDeep | Interrupted | InternalError => true,
            WrongType | BadNumber | BadCase | BadRegex | BadCount | NotAnArray
            | NoSubroutine => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorCode {
    Premature,
    BadNesting,
    BadPermavar,
    UnknownToken,
    NotEnough,
    WrongType,
    BadNumber,
    BadCase,
    BadRegex,
    BadCount,
    NotAnArray,
    NoSubroutine,
    BadArgument,
    TooDeep,
    Interrupted,
    InternalError,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let text = if self.message.is_empty() {
            match self.code {
                Premature => "letter operator terminated prematurely?",
                BadNesting => "invalid block nesting?",
                BadPermavar => "invalid permavar name?",
                UnknownToken => "unrecognized token?",
                NotEnough => "not enough variables, stopping execution of operator",
                WrongType => "wrong type, stopping execution of operator",
                BadNumber => "invalid number, using 0 instead",
                BadCase => "bad letter function capitalization, ignoring token",
                BadRegex => "regex error, stopping execution of operator",
                BadCount => "negative or 0 argument, stopping execution of operator",
                NotAnArray => "array elements are not arrays, stopping execution of operator",
                NoSubroutine => "no subroutines left on stack, ignoring `))' instruction",
                BadArgument => "bad argument?",
                TooDeep => "recursion limit exceeded, aborting",
                Interrupted => "interrupted",
                InternalError => "internal error",
            }
        } else {
            self.message.as_str()
        };
        if self.context.is_empty() {
            write!(f, "{}", text)
        } else {
            write!(f, "at {}: {}", self.context, text)
        }
    }
}
