//! Token definitions for UniiScript.
//!
//! A [`Token`] pairs a [`TokenKind`] with an optional [`TokenValue`] payload
//! and the [`Span`] of its lexeme.
//!
//! The kinds are laid out in five contiguous families so that family
//! membership is a discriminant range check:
//!
//! | Family | Range |
//! |---|---|
//! | sentinel | `Illegal` (always `0`) |
//! | keywords | `Var ..= Export` |
//! | operators | `Add ..= Assign` |
//! | delimiters | `LeftParen ..= Ellipsis` |
//! | literals | `Ident ..= Eof` |

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use usc_util::Span;

/// The kind of a token.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TokenKind {
    /// Produced for any lexical error.
    #[default]
    Illegal = 0,

    // ==================== KEYWORDS ====================
    /// `var`
    Var,
    /// `const`
    Const,
    /// `func`
    Func,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `switch`
    Switch,
    /// `case`
    Case,
    /// `default`
    Default,
    /// `fallthrough`
    Fallthrough,
    /// `while`
    While,
    /// `do`
    Do,
    /// `for`
    For,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `goto`
    Goto,
    /// `label`
    Label,
    /// `class`
    Class,
    /// `abstract`
    Abstract,
    /// `interface`
    Interface,
    /// `enum`
    Enum,
    /// `static`
    Static,
    /// `public`
    Public,
    /// `private`
    Private,
    /// `protected`
    Protected,
    /// `import`
    Import,
    /// `export`
    Export,

    // ==================== ARITHMETIC ====================
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    ModAssign,
    /// `**=`
    PowAssign,
    /// `++`
    Inc,
    /// `--`
    Dec,

    // ==================== BITWISE ====================
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `~`
    BitNot,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `&=`
    BitAndAssign,
    /// `|=`
    BitOrAssign,
    /// `^=`
    BitXorAssign,
    /// `<<=`
    ShiftLeftAssign,
    /// `>>=`
    ShiftRightAssign,

    // ==================== LOGICAL / COMPARISON ====================
    /// `&&`
    And,
    /// `||`
    Or,
    /// `^^`
    Xor,
    /// `!`
    Not,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `?`
    Question,
    /// `=`
    Assign,

    // ==================== DELIMITERS ====================
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,

    // ==================== LITERALS ====================
    /// Identifier.
    Ident,
    /// String literal.
    Str,
    /// Character literal.
    Char,
    /// Integer literal.
    Int,
    /// Float literal.
    Float,
    /// End of input.
    Eof,
}

static_assertions::assert_eq_size!(TokenKind, u8);
static_assertions::const_assert_eq!(TokenKind::Illegal as u8, 0);
static_assertions::const_assert_eq!(TokenKind::Export as u8 - TokenKind::Var as u8 + 1, 27);

impl TokenKind {
    /// Every keyword, in discriminant order.
    pub const KEYWORDS: [TokenKind; 27] = [
        TokenKind::Var,
        TokenKind::Const,
        TokenKind::Func,
        TokenKind::Return,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::Switch,
        TokenKind::Case,
        TokenKind::Default,
        TokenKind::Fallthrough,
        TokenKind::While,
        TokenKind::Do,
        TokenKind::For,
        TokenKind::Break,
        TokenKind::Continue,
        TokenKind::Goto,
        TokenKind::Label,
        TokenKind::Class,
        TokenKind::Abstract,
        TokenKind::Interface,
        TokenKind::Enum,
        TokenKind::Static,
        TokenKind::Public,
        TokenKind::Private,
        TokenKind::Protected,
        TokenKind::Import,
        TokenKind::Export,
    ];

    /// Canonical text of the kind.
    ///
    /// Keywords and symbols render as their source text. Literal kinds
    /// render as a lowercase class name (`ident`, `string`, `char`,
    /// `integer`, `float`), end of input as `EOF` and the error sentinel as
    /// `illegal`.
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Illegal => "illegal",

            TokenKind::Var => "var",
            TokenKind::Const => "const",
            TokenKind::Func => "func",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::Fallthrough => "fallthrough",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Goto => "goto",
            TokenKind::Label => "label",
            TokenKind::Class => "class",
            TokenKind::Abstract => "abstract",
            TokenKind::Interface => "interface",
            TokenKind::Enum => "enum",
            TokenKind::Static => "static",
            TokenKind::Public => "public",
            TokenKind::Private => "private",
            TokenKind::Protected => "protected",
            TokenKind::Import => "import",
            TokenKind::Export => "export",

            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::Mod => "%",
            TokenKind::Pow => "**",
            TokenKind::AddAssign => "+=",
            TokenKind::SubAssign => "-=",
            TokenKind::MulAssign => "*=",
            TokenKind::DivAssign => "/=",
            TokenKind::ModAssign => "%=",
            TokenKind::PowAssign => "**=",
            TokenKind::Inc => "++",
            TokenKind::Dec => "--",

            TokenKind::BitAnd => "&",
            TokenKind::BitOr => "|",
            TokenKind::BitXor => "^",
            TokenKind::BitNot => "~",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::BitAndAssign => "&=",
            TokenKind::BitOrAssign => "|=",
            TokenKind::BitXorAssign => "^=",
            TokenKind::ShiftLeftAssign => "<<=",
            TokenKind::ShiftRightAssign => ">>=",

            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Xor => "^^",
            TokenKind::Not => "!",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Question => "?",
            TokenKind::Assign => "=",

            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",

            TokenKind::Ident => "ident",
            TokenKind::Str => "string",
            TokenKind::Char => "char",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Eof => "EOF",
        }
    }

    /// DJB2 hash of [`as_str`](Self::as_str).
    pub fn hash(self) -> i64 {
        usc_util::hash(self.as_str())
    }

    /// Returns true for reserved words.
    #[inline]
    pub const fn is_keyword(self) -> bool {
        let d = self as u8;
        d >= TokenKind::Var as u8 && d <= TokenKind::Export as u8
    }

    /// Returns true for arithmetic, bitwise, logical, comparison and
    /// assignment operators (including `?`).
    #[inline]
    pub const fn is_operator(self) -> bool {
        let d = self as u8;
        d >= TokenKind::Add as u8 && d <= TokenKind::Assign as u8
    }

    /// Returns true for brackets and separators.
    #[inline]
    pub const fn is_delimiter(self) -> bool {
        let d = self as u8;
        d >= TokenKind::LeftParen as u8 && d <= TokenKind::Ellipsis as u8
    }

    /// Returns true for kinds that carry a [`TokenValue`] payload.
    #[inline]
    pub const fn is_literal(self) -> bool {
        let d = self as u8;
        d >= TokenKind::Ident as u8 && d <= TokenKind::Float as u8
    }

    /// Returns true for operators that assign (`=`, `+=`, `<<=`, ...).
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::AddAssign
                | TokenKind::SubAssign
                | TokenKind::MulAssign
                | TokenKind::DivAssign
                | TokenKind::ModAssign
                | TokenKind::PowAssign
                | TokenKind::BitAndAssign
                | TokenKind::BitOrAssign
                | TokenKind::BitXorAssign
                | TokenKind::ShiftLeftAssign
                | TokenKind::ShiftRightAssign
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static KEYWORD_TABLE: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    TokenKind::KEYWORDS
        .iter()
        .map(|&kind| (kind.as_str(), kind))
        .collect()
});

/// Looks up the keyword spelled `ident`.
///
/// # Examples
///
/// ```
/// use usc_lex::token::{keyword_from_ident, TokenKind};
///
/// assert_eq!(keyword_from_ident("fallthrough"), Some(TokenKind::Fallthrough));
/// assert_eq!(keyword_from_ident("Var"), None);
/// ```
pub fn keyword_from_ident(ident: &str) -> Option<TokenKind> {
    KEYWORD_TABLE.get(ident).copied()
}

/// Payload carried by literal tokens.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TokenValue {
    /// Operators, delimiters, end of input and illegal tokens.
    #[default]
    None,
    /// Identifiers and keywords: the spelling and its DJB2 hash.
    Ident {
        /// Source spelling.
        name: String,
        /// `usc_util::hash(name)`.
        hash: i64,
    },
    /// Integer literal value.
    Int(i64),
    /// Float literal value.
    Float(f64),
    /// Character literal byte, after escape resolution.
    Char(u8),
    /// String literal contents, after escape resolution.
    Str(String),
}

impl TokenValue {
    /// Builds an identifier payload, hashing `name`.
    pub fn ident(name: impl Into<String>) -> Self {
        let name = name.into();
        let hash = usc_util::hash(&name);
        TokenValue::Ident { name, hash }
    }

    /// Returns true if there is no payload.
    pub fn is_none(&self) -> bool {
        matches!(self, TokenValue::None)
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::None => Ok(()),
            TokenValue::Ident { name, .. } => f.write_str(name),
            TokenValue::Int(n) => write!(f, "{}", n),
            TokenValue::Float(x) => write!(f, "{:?}", x),
            TokenValue::Char(b) => write!(f, "'{}'", b.escape_ascii()),
            TokenValue::Str(s) => write!(f, "{:?}", s),
        }
    }
}

/// A classified lexical unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// Kind of the token.
    pub kind: TokenKind,
    /// Literal payload, or [`TokenValue::None`].
    pub value: TokenValue,
    /// Byte range and starting position of the lexeme.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, value: TokenValue, span: Span) -> Self {
        Self { kind, value, span }
    }

    /// Line of the first byte (1-based).
    #[inline]
    pub fn line(&self) -> u32 {
        self.span.line
    }

    /// Column of the first byte (1-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.span.column
    }

    /// Returns true for the end-of-input token.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Returns true for an illegal token.
    #[inline]
    pub fn is_illegal(&self) -> bool {
        self.kind == TokenKind::Illegal
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_none() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {}", self.kind, self.value)
        }
    }
}
