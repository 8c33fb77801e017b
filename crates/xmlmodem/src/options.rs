/// Configuration options for the SAX parser.
///
/// Both options are scanner-level behaviors but are exposed here, on the
/// parser's constructor, for convenience.
///
/// # Examples
///
/// ```rust
/// use xmlmodem::{ParserOptions, SaxParser};
///
/// let mut parser = SaxParser::new(ParserOptions {
///     skip_whitespace: false,
///     ..Default::default()
/// });
/// parser.parse("<a>  </a>").unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Whether to suppress character-data runs that consist entirely of
    /// whitespace, such as the indentation between tags of a pretty-printed
    /// document.
    ///
    /// CDATA sections are always delivered, and so is whitespace produced by
    /// character references (`&#32;`) — both are explicitly marked content.
    ///
    /// # Default
    ///
    /// `true`
    pub skip_whitespace: bool,

    /// Whether to fold element and attribute names to ASCII uppercase.
    ///
    /// # Default
    ///
    /// `false`
    pub fold_case: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            skip_whitespace: true,
            fold_case: false,
        }
    }
}
