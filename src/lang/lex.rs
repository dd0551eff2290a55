use super::token::Token;
use super::Error;
use crate::error;

/// Splits source text into tokens, one per instruction.
///
/// Tokenization never looks at interpreter state; the same token list feeds
/// both execution and the minifier. All errors raised here are fatal.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    Lexer {
        chars: source.chars().peekable(),
        tokens: Vec::new(),
    }
    .lex()
}

/// Re-emits tokens as compact source. Adjacent number tokens get a single
/// separating space so the output tokenizes back to the same program.
pub fn minify(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev_number = false;
    for token in tokens {
        let is_number = matches!(token, Token::Number(_));
        if prev_number && is_number {
            out.push(' ');
        }
        out.push_str(&token.to_string());
        prev_number = is_number;
    }
    out
}

fn is_printable(c: char) -> bool {
    ('!'..='~').contains(&c)
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn lex(mut self) -> Result<Vec<Token>, Error> {
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                self.number();
                continue;
            }
            self.chars.next();
            if c.is_ascii_lowercase() {
                self.letters(c, 2)?;
            } else if c.is_ascii_uppercase() {
                self.letters(c, 3)?;
            } else if c == '"' {
                self.string();
            } else if c == ':' {
                self.block();
            } else if c == '=' {
                self.permavar()?;
            } else if c == ';' {
                return Err(error!(BadNesting, "tokenize"));
            } else if is_printable(c) {
                self.punct(c);
            }
            // anything else is line noise
        }
        Ok(self.tokens)
    }

    // A digit run closes at the first non-digit, ignored characters
    // included, so `3 4` is two literals.
    fn number(&mut self) {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            s.push(c);
            self.chars.next();
        }
        self.tokens.push(Token::Number(s));
    }

    // Letter operators span ignored characters; a printable non-letter
    // before the operator is complete cannot be recovered from.
    fn letters(&mut self, first: char, len: usize) -> Result<(), Error> {
        let mut s = first.to_string();
        while s.len() < len {
            match self.chars.next() {
                Some(c) if c.is_ascii_alphabetic() => s.push(c),
                Some(c) if is_printable(c) => return Err(error!(Premature, "tokenize")),
                Some(_) => continue,
                None => break,
            }
        }
        self.tokens.push(Token::Letters(s));
        Ok(())
    }

    // `\"` keeps the quote, `\\` keeps one backslash; a backslash before
    // anything else stays in the text verbatim.
    fn string(&mut self) {
        let mut s = String::new();
        let mut escaping = false;
        loop {
            match self.chars.next() {
                Some('"') if escaping => {
                    s.push('"');
                    escaping = false;
                }
                Some('"') => break,
                Some('\\') if escaping => {
                    s.push('\\');
                    escaping = false;
                }
                Some('\\') => escaping = true,
                Some(c) => {
                    if escaping {
                        s.push('\\');
                        escaping = false;
                    }
                    s.push(c);
                }
                None => {
                    if escaping {
                        s.push('\\');
                    }
                    break;
                }
            }
        }
        self.tokens.push(Token::Str(s));
    }

    // Nesting depth counts unescaped `:` and `;`; an unescaped `"` toggles
    // string mode, which suspends depth tracking. The token closes when
    // depth returns to zero.
    fn block(&mut self) {
        let mut s = String::new();
        let mut depth = 1usize;
        let mut string_mode = false;
        let mut escaping = false;
        while let Some(c) = self.chars.next() {
            if c == ':' && !string_mode {
                depth += 1;
            } else if c == ';' && !string_mode {
                depth -= 1;
                if depth == 0 {
                    self.tokens.push(Token::Block(s));
                    return;
                }
            } else if c == '"' && !escaping {
                string_mode = !string_mode;
            }
            escaping = c == '\\' && string_mode;
            s.push(c);
        }
        // end of input: flush what accumulated
        self.tokens.push(Token::Block(s));
    }

    fn permavar(&mut self) -> Result<(), Error> {
        let mut s = "=".to_string();
        loop {
            match self.chars.next() {
                Some(c) if c == '+' || c == '!' => {
                    s.push(c);
                    break;
                }
                Some('=') => s.push('='),
                Some(c) if is_printable(c) => return Err(error!(BadPermavar, "tokenize")),
                Some(_) => continue,
                None => break,
            }
        }
        self.tokens.push(Token::Permavar(s));
        Ok(())
    }

    // Comment openers and subroutine markers collapse with the previously
    // emitted token, so ignored characters may sit between the two halves.
    fn punct(&mut self, c: char) {
        match c {
            '/' if self.tokens.last() == Some(&Token::Char('/')) => {
                self.tokens.pop();
                for c in self.chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '[' if self.tokens.last() == Some(&Token::Char('[')) => {
                self.tokens.pop();
                let mut prev_bracket = false;
                for c in self.chars.by_ref() {
                    if c == ']' {
                        if prev_bracket {
                            break;
                        }
                        prev_bracket = true;
                    } else {
                        prev_bracket = false;
                    }
                }
            }
            '(' if self.tokens.last() == Some(&Token::Char('(')) => {
                self.tokens.pop();
                self.tokens.push(Token::SubStart);
            }
            ')' if self.tokens.last() == Some(&Token::Char(')')) => {
                self.tokens.pop();
                self.tokens.push(Token::SubEnd);
            }
            '+' => self.tokens.push(Token::Permavar("+".to_string())),
            '!' => self.tokens.push(Token::Permavar("!".to_string())),
            _ => self.tokens.push(Token::Char(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_spans_noise() {
        // the two slashes are separate tokens joined across ignored space
        let tokens = tokenize("/ / ignored\n7").unwrap();
        assert_eq!(tokens, vec![Token::Number("7".to_string())]);
    }

    #[test]
    fn test_block_comment_needs_adjacent_brackets() {
        let tokens = tokenize("[[ stuff ] ]]7").unwrap();
        assert_eq!(tokens, vec![Token::Number("7".to_string())]);
    }

    #[test]
    fn test_subroutine_collapse_spans_noise() {
        let tokens = tokenize("( (").unwrap();
        assert_eq!(tokens, vec![Token::SubStart]);
    }

    #[test]
    fn test_string_mode_suspends_nesting() {
        let tokens = tokenize(":\";\"7;").unwrap();
        assert_eq!(tokens, vec![Token::Block("\";\"7".to_string())]);
    }
}
