//! Argument Parser
//!
//! Splits the text following a command name into whitespace separated
//! tokens and validates integer parameters against their declared range.

use core::fmt;

/// Cursor over the unconsumed part of a command line
#[derive(Clone, Copy, Debug)]
pub struct Args<'a> {
    rest: &'a str,
}

impl<'a> Args<'a> {
    /// Wrap the remaining argument text
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    /// Take the next token and trim the whitespace after it
    pub fn read_token(&mut self) -> Option<&'a str> {
        let text = self.rest.trim_start();
        if text.is_empty() {
            self.rest = text;
            return None;
        }
        let end = text.find(char::is_whitespace).unwrap_or(text.len());
        let (token, rest) = text.split_at(end);
        self.rest = rest.trim_start();
        Some(token)
    }

    /// Take the next token as a decimal integer
    ///
    /// A token that is not an integer is still consumed.
    ///
    /// # Errors
    ///
    /// [`ArgError::Missing`] when no token is left,
    /// [`ArgError::NotInteger`] when the token does not parse.
    pub fn read_int(&mut self) -> Result<i32, ArgError> {
        let token = self.read_token().ok_or(ArgError::Missing)?;
        token.parse().map_err(|_| ArgError::NotInteger)
    }

    /// Take a leading integer from the next token, `sscanf("%d")` style
    ///
    /// `7abc` reads as 7. The whole token is consumed on success; a token
    /// with no leading integer is left in place for the next reader.
    ///
    /// # Errors
    ///
    /// [`ArgError::Missing`] when no token is left,
    /// [`ArgError::NotInteger`] when the token has no integer prefix.
    pub fn read_int_prefix(&mut self) -> Result<i32, ArgError> {
        let mut peek = *self;
        let token = peek.read_token().ok_or(ArgError::Missing)?;
        let sign = usize::from(token.starts_with(['+', '-']));
        let digits = token[sign..].bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(ArgError::NotInteger);
        }
        let value = token[..sign + digits].parse().map_err(|_| ArgError::NotInteger)?;
        *self = peek;
        Ok(value)
    }

    /// Text not consumed yet
    #[must_use]
    pub const fn remainder(&self) -> &'a str {
        self.rest
    }

    /// Check whether every token has been consumed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rest.trim().is_empty()
    }
}

/// Tokenizer failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgError {
    /// No token left
    Missing,
    /// Token present but not a decimal integer
    NotInteger,
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing argument"),
            Self::NotInteger => f.write_str("not an integer"),
        }
    }
}

/// How the parse result and the range check combine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ValidationRule {
    /// Reject when the token fails to parse OR is out of range
    #[default]
    Strict,
    /// Reject only when the token fails to parse AND the fallback value is
    /// out of range.
    ///
    /// Bug-compatible with the shipped console: integers are read with
    /// [`Args::read_int_prefix`], so `7abc` reads as 7 and a token with no
    /// leading integer stays in place and also fails every later
    /// parameter. A failed read silently takes the parameter default and a
    /// parsed value is never range checked. Values that do not fit the
    /// radio's byte-wide argument are still rejected.
    Legacy,
}

/// Declared name, inclusive range and fallback of an integer parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSpec {
    /// Name used in diagnostics
    pub name: &'static str,
    /// Lowest accepted value
    pub min: i32,
    /// Highest accepted value
    pub max: i32,
    /// Value assumed when the token is unusable (legacy rule only)
    pub default: i32,
}

impl ParamSpec {
    /// Check whether `value` lies inside the declared range
    #[must_use]
    pub const fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Read this parameter from `args`
    ///
    /// # Errors
    ///
    /// Returns a [`ParamError`] naming this parameter when the rule rejects
    /// the token.
    pub fn read(&'static self, args: &mut Args<'_>, rule: ValidationRule) -> Result<u8, ParamError> {
        let value = match rule {
            ValidationRule::Strict => match args.read_int() {
                Ok(value) if self.contains(value) => value,
                Ok(value) => return Err(self.error(ParamErrorKind::OutOfRange(value))),
                Err(ArgError::Missing) => return Err(self.error(ParamErrorKind::Missing)),
                Err(ArgError::NotInteger) => return Err(self.error(ParamErrorKind::NotInteger)),
            },
            ValidationRule::Legacy => match args.read_int_prefix() {
                Ok(value) => value,
                Err(_) if self.contains(self.default) => self.default,
                Err(ArgError::Missing) => return Err(self.error(ParamErrorKind::Missing)),
                Err(ArgError::NotInteger) => return Err(self.error(ParamErrorKind::NotInteger)),
            },
        };
        u8::try_from(value).map_err(|_| self.error(ParamErrorKind::OutOfRange(value)))
    }

    const fn error(&'static self, kind: ParamErrorKind) -> ParamError {
        ParamError { param: self, kind }
    }
}

/// Why a parameter was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamErrorKind {
    /// No token supplied
    Missing,
    /// Token is not an integer
    NotInteger,
    /// Parsed value outside the declared range
    OutOfRange(i32),
}

impl ParamErrorKind {
    /// Parse failures as opposed to range failures
    #[must_use]
    pub const fn is_parse(self) -> bool {
        matches!(self, Self::Missing | Self::NotInteger)
    }
}

/// A rejected parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamError {
    /// The parameter that failed
    pub param: &'static ParamSpec,
    /// What went wrong
    pub kind: ParamErrorKind,
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Incorrect or missing {}, expected int {}-{}",
            self.param.name, self.param.min, self.param.max
        )
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ParamError {
    fn format(&self, f: defmt::Formatter) {
        match self.kind {
            ParamErrorKind::Missing => defmt::write!(f, "{=str}: missing", self.param.name),
            ParamErrorKind::NotInteger => defmt::write!(f, "{=str}: not an integer", self.param.name),
            ParamErrorKind::OutOfRange(v) => {
                defmt::write!(f, "{=str}: {=i32} out of range", self.param.name, v);
            }
        }
    }
}
