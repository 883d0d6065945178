//! Script evaluation for the editor contents.
//!
//! Scripts are a small, side-effect-free data language rather than general
//! purpose code: they can bind numbers with `let`, build arrays and objects,
//! and evaluate arithmetic through `meval`. Nothing a script does can reach
//! the filesystem, the network or the host process.
//!
//! ```text
//! // comments run to the end of the line
//! let n = 100;
//! return {
//!     sine: [sin(i / 10) for i in 0..n],
//!     "fixed": [3, 1, 2],
//! };
//! ```

use meval::{Context, Expr};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Upper bound on elements a single `for` comprehension may generate
pub const MAX_GENERATED_ELEMENTS: usize = 1_000_000;

/// `<expr> for <ident> in <start>..<end>` inside square brackets
static COMPREHENSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.+?)\s+for\s+([A-Za-z_][A-Za-z0-9_]*)\s+in\s+(.+?)\s*\.\.\s*(.+)$")
        .expect("Invalid regex pattern")
});

/// `let <ident> = ` at the start of a statement
static LET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^let\s+([A-Za-z_][A-Za-z0-9_]*)\s*=").expect("Invalid regex pattern")
});

/// Structured result of evaluating a script
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Array(Vec<ScriptValue>),
    /// Object entries in source order
    Object(Vec<(String, ScriptValue)>),
}

impl ScriptValue {
    /// Build an array of numbers
    pub fn numbers(values: &[f64]) -> Self {
        ScriptValue::Array(values.iter().copied().map(ScriptValue::Number).collect())
    }
}

/// Errors raised while evaluating a script
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScriptError {
    #[error("Unexpected end of script")]
    UnexpectedEnd,

    #[error("Unexpected '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("Expected {expected} at position {position}")]
    Expected {
        expected: &'static str,
        position: usize,
    },

    #[error("Unterminated string starting at position {0}")]
    UnterminatedString(usize),

    #[error("Parse error in '{expression}': {message}")]
    Parse { expression: String, message: String },

    #[error("Evaluation error in '{expression}': {message}")]
    Eval { expression: String, message: String },

    #[error("Range {start}..{end} would generate more than {limit} elements")]
    RangeTooLarge { start: i64, end: i64, limit: usize },
}

/// Turns editor text into a structured value.
///
/// The host only depends on this trait, so alternative evaluators can be
/// swapped in without touching the chart.
pub trait ScriptEvaluator {
    fn evaluate(&self, source: &str) -> Result<ScriptValue, ScriptError>;

    /// Display name of the language; the editor shows it unless settings name another mode
    fn language(&self) -> &'static str;
}

/// The default evaluator: data literals plus `meval` arithmetic
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpressionScript;

impl ScriptEvaluator for ExpressionScript {
    fn evaluate(&self, source: &str) -> Result<ScriptValue, ScriptError> {
        let stripped = strip_comments(source);
        let mut parser = Parser::new(&stripped);
        parser.script()
    }

    fn language(&self) -> &'static str {
        "script"
    }
}

/// Replace `//` comments with spaces so positions in errors stay meaningful
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == '/' && chars.peek() == Some(&'/') {
            out.push(' ');
            for next in chars.by_ref() {
                if next == '\n' {
                    out.push('\n');
                    break;
                }
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }

    out
}

/// Recursive-descent parser over the comment-free script text
struct Parser<'a> {
    src: &'a str,
    pos: usize,
    bindings: HashMap<String, f64>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            bindings: HashMap::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, c: char, expected: &'static str) -> Result<(), ScriptError> {
        self.skip_whitespace();
        match self.peek() {
            Some(found) if found == c => {
                self.bump();
                Ok(())
            }
            Some(_) => Err(ScriptError::Expected {
                expected,
                position: self.pos,
            }),
            None => Err(ScriptError::UnexpectedEnd),
        }
    }

    /// True when `word` starts at the cursor and is not a prefix of a longer identifier
    fn at_keyword(&self, word: &str) -> bool {
        let rest = self.rest();
        rest.starts_with(word)
            && !rest[word.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }

    fn script(&mut self) -> Result<ScriptValue, ScriptError> {
        loop {
            self.skip_whitespace();
            let Some(caps) = LET_REGEX.captures(self.rest()) else {
                break;
            };
            let name = caps[1].to_string();
            self.pos += caps[0].len();
            let value = self.number_expression()?;
            tracing::trace!("let {} = {}", name, value);
            self.bindings.insert(name, value);
            self.expect(';', "';' after let binding")?;
        }

        self.skip_whitespace();
        if self.at_keyword("return") {
            self.pos += "return".len();
        }

        self.skip_whitespace();
        let value = if self.peek().is_none() || self.peek() == Some(';') {
            ScriptValue::Null
        } else {
            self.value()?
        };

        self.skip_whitespace();
        if self.peek() == Some(';') {
            self.bump();
            self.skip_whitespace();
        }
        match self.peek() {
            None => Ok(value),
            Some(found) => Err(ScriptError::UnexpectedChar {
                found,
                position: self.pos,
            }),
        }
    }

    fn value(&mut self) -> Result<ScriptValue, ScriptError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ScriptError::UnexpectedEnd),
            Some('[') => self.array(),
            Some('{') => self.object(),
            Some('"') => self.string().map(ScriptValue::Text),
            Some(_) if self.at_keyword("null") || self.at_keyword("undefined") => {
                let word = if self.at_keyword("null") { "null" } else { "undefined" };
                self.pos += word.len();
                Ok(ScriptValue::Null)
            }
            Some(_) if self.at_keyword("true") => {
                self.pos += "true".len();
                Ok(ScriptValue::Bool(true))
            }
            Some(_) if self.at_keyword("false") => {
                self.pos += "false".len();
                Ok(ScriptValue::Bool(false))
            }
            Some(_) => self.number_expression().map(ScriptValue::Number),
        }
    }

    fn array(&mut self) -> Result<ScriptValue, ScriptError> {
        self.expect('[', "'['")?;
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.bump();
            return Ok(ScriptValue::Array(Vec::new()));
        }

        // A comprehension is a single raw expression spanning the whole brackets
        let start = self.pos;
        let raw = self.raw_expression();
        self.skip_whitespace();
        let literal = raw.trim_start().starts_with(['"', '[', '{']);
        if self.peek() == Some(']') && !literal {
            if let Some(caps) = COMPREHENSION_REGEX.captures(raw.trim()) {
                self.bump();
                return self.comprehension(&caps[1], &caps[2], &caps[3], &caps[4]);
            }
        }
        self.pos = start;

        let mut items = Vec::new();
        loop {
            items.push(self.value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {
                    self.skip_whitespace();
                    if self.peek() == Some(']') {
                        self.bump();
                        break;
                    }
                }
                Some(']') => break,
                Some(_) => {
                    return Err(ScriptError::Expected {
                        expected: "',' or ']'",
                        position: self.pos - 1,
                    })
                }
                None => return Err(ScriptError::UnexpectedEnd),
            }
        }
        Ok(ScriptValue::Array(items))
    }

    fn comprehension(
        &self,
        body: &str,
        var: &str,
        start: &str,
        end: &str,
    ) -> Result<ScriptValue, ScriptError> {
        let start = self.eval_text(start)?.floor() as i64;
        let end = self.eval_text(end)?.floor() as i64;
        let count = end.saturating_sub(start).max(0);
        if count as u64 > MAX_GENERATED_ELEMENTS as u64 {
            return Err(ScriptError::RangeTooLarge {
                start,
                end,
                limit: MAX_GENERATED_ELEMENTS,
            });
        }

        let body = body.trim();
        let expr = parse_expr(body)?;
        let mut items = Vec::with_capacity(count as usize);
        let mut ctx = self.context();
        for i in start..end {
            ctx.var(var, i as f64);
            let value = expr
                .eval_with_context(&ctx)
                .map_err(|e| ScriptError::Eval {
                    expression: body.to_string(),
                    message: e.to_string(),
                })?;
            items.push(ScriptValue::Number(value));
        }
        Ok(ScriptValue::Array(items))
    }

    fn object(&mut self) -> Result<ScriptValue, ScriptError> {
        self.expect('{', "'{'")?;
        let mut entries = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                None => return Err(ScriptError::UnexpectedEnd),
                _ => {}
            }

            let key = self.key()?;
            self.expect(':', "':' after object key")?;
            let value = self.value()?;
            entries.push((key, value));

            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some('}') => break,
                Some(_) => {
                    return Err(ScriptError::Expected {
                        expected: "',' or '}'",
                        position: self.pos - 1,
                    })
                }
                None => return Err(ScriptError::UnexpectedEnd),
            }
        }
        Ok(ScriptValue::Object(entries))
    }

    fn key(&mut self) -> Result<String, ScriptError> {
        self.skip_whitespace();
        if self.peek() == Some('"') {
            return self.string();
        }

        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        if self.pos == start {
            return Err(ScriptError::Expected {
                expected: "object key",
                position: start,
            });
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn string(&mut self) -> Result<String, ScriptError> {
        let start = self.pos;
        self.expect('"', "'\"'")?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(ScriptError::UnterminatedString(start)),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => return Err(ScriptError::UnterminatedString(start)),
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// Collect expression text up to a top-level `,` `]` `}` `;` or the end
    fn raw_expression(&mut self) -> &'a str {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '(' => depth += 1,
                ')' if depth > 0 => depth -= 1,
                ',' | ']' | '}' | ';' if depth == 0 => break,
                _ => {}
            }
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn number_expression(&mut self) -> Result<f64, ScriptError> {
        self.skip_whitespace();
        let position = self.pos;
        let raw = self.raw_expression();
        if raw.trim().is_empty() {
            return match self.peek() {
                Some(found) => Err(ScriptError::UnexpectedChar { found, position }),
                None => Err(ScriptError::UnexpectedEnd),
            };
        }
        self.eval_text(raw)
    }

    fn context(&self) -> Context<'static> {
        let mut ctx = Context::new();
        for (name, value) in &self.bindings {
            ctx.var(name, *value);
        }
        ctx
    }

    fn eval_text(&self, text: &str) -> Result<f64, ScriptError> {
        let text = text.trim();
        let expr = parse_expr(text)?;
        expr.eval_with_context(&self.context())
            .map_err(|e| ScriptError::Eval {
                expression: text.to_string(),
                message: e.to_string(),
            })
    }
}

fn parse_expr(text: &str) -> Result<Expr, ScriptError> {
    text.parse::<Expr>().map_err(|e| ScriptError::Parse {
        expression: text.to_string(),
        message: e.to_string(),
    })
}
