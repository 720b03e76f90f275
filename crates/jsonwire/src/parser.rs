//! Recursive-descent JSON parser driving a [`Visitor`].
//!
//! Grammar:
//!
//! ```text
//! value   := OBJECT | ARRAY | IDENT | INT | NUMERIC | STRING
//! OBJECT  := '{' ( pair ( ',' pair )* )? '}'
//! pair    := (IDENT|STRING) ':' value
//! ARRAY   := '[' ( value ( ',' value )* )? ']'
//! ```
//!
//! The parser owns no output: every construct is forwarded to the borrowed
//! visitor as it is recognized, so a failed parse may leave partial effects
//! behind. Callers that care (the transcode entry points do) discard the
//! visitor's output on error.

use bstr::BString;

use crate::error::{Error, LexError, ParseError, SyntaxError};
use crate::lexer::{Lexer, Token};
use crate::visitor::Visitor;

/// Parses one complete JSON value from `source`, driving `visitor`, and
/// requires end of input afterwards.
///
/// # Errors
///
/// Returns the first lexical, grammatical, or visitor error encountered;
/// parsing never resumes after an error.
pub fn parse<V: Visitor>(source: &[u8], visitor: &mut V) -> Result<(), Error> {
    let mut parser = Parser {
        lexer: Lexer::new(source),
        visitor,
    };
    let token = parser.lexer.next_token();
    parser.value(token)?;

    let token = parser.lexer.next_token();
    if token == Token::Eof {
        Ok(())
    } else {
        Err(parser.syntax(ParseError::ExpectedEof(token)))
    }
}

struct Parser<'src, 'vis, V> {
    lexer: Lexer<'src>,
    visitor: &'vis mut V,
}

impl<V: Visitor> Parser<'_, '_, V> {
    fn syntax(&self, source: impl Into<SyntaxError>) -> Error {
        Error::syntax(source, self.lexer.position())
    }

    fn value(&mut self, token: Token) -> Result<(), Error> {
        match token {
            Token::LBrace => self.object(),
            Token::LBracket => self.array(),
            Token::Identifier => {
                match self.lexer.lexeme() {
                    b"null" => self.visitor.add_null()?,
                    b"true" => self.visitor.add_bool(true)?,
                    b"false" => self.visitor.add_bool(false)?,
                    b"undefined" => self.visitor.add_undefined()?,
                    other => {
                        let lexeme = BString::from(other);
                        return Err(self.syntax(ParseError::UnknownIdentifier(lexeme)));
                    }
                }
                Ok(())
            }
            Token::Integer | Token::Numeric => {
                self.visitor.add_number(self.lexer.lexeme())?;
                Ok(())
            }
            Token::String => {
                self.visitor.add_string(self.lexer.lexeme())?;
                Ok(())
            }
            Token::IllegalString => Err(self.syntax(LexError::IllegalString)),
            Token::Unknown => Err(self.syntax(LexError::UnknownChar)),
            other => Err(self.syntax(ParseError::ExpectedValue(other))),
        }
    }

    /// Parses an object body; the opening brace has been consumed.
    fn object(&mut self) -> Result<(), Error> {
        let mut token = self.lexer.next_token();
        if token == Token::RBrace {
            self.visitor.add_empty_object()?;
            return Ok(());
        }
        self.visitor.start_object()?;

        loop {
            // Either a string or an identifier labels the field.
            match token {
                Token::Identifier | Token::String => {
                    self.visitor.push_label(self.lexer.lexeme())?;
                }
                Token::IllegalString => return Err(self.syntax(LexError::IllegalString)),
                Token::Unknown => return Err(self.syntax(LexError::UnknownChar)),
                other => return Err(self.syntax(ParseError::ExpectedLabel(other))),
            }

            let colon = self.lexer.next_token();
            if colon != Token::Colon {
                return Err(self.syntax(ParseError::ExpectedColon(colon)));
            }

            let value = self.lexer.next_token();
            self.value(value)?;

            match self.lexer.next_token() {
                Token::Comma => token = self.lexer.next_token(),
                Token::RBrace => {
                    self.visitor.end_object()?;
                    return Ok(());
                }
                other => return Err(self.syntax(ParseError::ExpectedCommaOrCloseObject(other))),
            }
        }
    }

    /// Parses an array body; the opening bracket has been consumed.
    fn array(&mut self) -> Result<(), Error> {
        let mut token = self.lexer.next_token();
        if token == Token::RBracket {
            self.visitor.add_empty_array()?;
            return Ok(());
        }
        self.visitor.start_array()?;

        loop {
            self.value(token)?;

            match self.lexer.next_token() {
                Token::Comma => token = self.lexer.next_token(),
                Token::RBracket => {
                    self.visitor.end_array()?;
                    return Ok(());
                }
                other => return Err(self.syntax(ParseError::ExpectedCommaOrCloseArray(other))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::*;
    use crate::error::VisitError;

    /// Records events as compact strings.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Recorder {
        fn push(&mut self, event: impl Into<String>) -> crate::visitor::VisitResult {
            self.events.push(event.into());
            Ok(())
        }
    }

    impl Visitor for Recorder {
        fn push_label(&mut self, label: &[u8]) -> crate::visitor::VisitResult {
            self.push(alloc::format!("label({})", bstr::BStr::new(label)))
        }
        fn start_object(&mut self) -> crate::visitor::VisitResult {
            self.push("{")
        }
        fn end_object(&mut self) -> crate::visitor::VisitResult {
            self.push("}")
        }
        fn start_array(&mut self) -> crate::visitor::VisitResult {
            self.push("[")
        }
        fn end_array(&mut self) -> crate::visitor::VisitResult {
            self.push("]")
        }
        fn add_empty_object(&mut self) -> crate::visitor::VisitResult {
            self.push("{}")
        }
        fn add_empty_array(&mut self) -> crate::visitor::VisitResult {
            self.push("[]")
        }
        fn add_bool(&mut self, value: bool) -> crate::visitor::VisitResult {
            self.push(alloc::format!("bool({value})"))
        }
        fn add_number(&mut self, lexeme: &[u8]) -> crate::visitor::VisitResult {
            self.push(alloc::format!("number({})", bstr::BStr::new(lexeme)))
        }
        fn add_string(&mut self, value: &[u8]) -> crate::visitor::VisitResult {
            self.push(alloc::format!("string({})", bstr::BStr::new(value)))
        }
        fn add_null(&mut self) -> crate::visitor::VisitResult {
            self.push("null")
        }
        fn add_undefined(&mut self) -> crate::visitor::VisitResult {
            self.push("undefined")
        }
    }

    fn events(source: &[u8]) -> Vec<String> {
        let mut recorder = Recorder::default();
        parse(source, &mut recorder).unwrap();
        recorder.events
    }

    fn parse_err(source: &[u8]) -> Error {
        parse(source, &mut Recorder::default()).unwrap_err()
    }

    #[test]
    fn scalar_roots() {
        assert_eq!(events(b"null"), ["null"]);
        assert_eq!(events(b"true"), ["bool(true)"]);
        assert_eq!(events(b"false"), ["bool(false)"]);
        assert_eq!(events(b"undefined"), ["undefined"]);
        assert_eq!(events(b"42"), ["number(42)"]);
        assert_eq!(events(b"-1.5e3"), ["number(-1.5E3)"]);
        assert_eq!(events(b"\"hi\""), ["string(hi)"]);
    }

    #[test]
    fn nested_compounds_in_source_order() {
        assert_eq!(
            events(br#"{"a":1,"b":[true,null,"x"]}"#),
            [
                "{",
                "label(a)",
                "number(1)",
                "label(b)",
                "[",
                "bool(true)",
                "null",
                "string(x)",
                "]",
                "}",
            ]
        );
    }

    #[test]
    fn empty_compounds_use_the_short_events() {
        assert_eq!(events(b"{}"), ["{}"]);
        assert_eq!(events(b"[]"), ["[]"]);
        assert_eq!(events(b"[{},[]]"), ["[", "{}", "[]", "]"]);
    }

    #[test]
    fn identifier_labels_are_allowed() {
        assert_eq!(
            events(b"{key:1}"),
            ["{", "label(key)", "number(1)", "}"]
        );
    }

    #[test]
    fn trailing_comma_is_an_error() {
        let err = parse_err(br#"{"":"",}"#);
        assert!(matches!(
            err,
            Error::Syntax {
                source: SyntaxError::Parse(ParseError::ExpectedLabel(Token::RBrace)),
                ..
            }
        ));
    }

    #[test]
    fn missing_colon_reports_position() {
        let err = parse_err(b"{\"a\" 1}");
        assert_eq!(
            alloc::string::ToString::to_string(&err),
            "expected colon (got INTEGER) at 1:6"
        );
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = parse_err(b"[nil]");
        assert!(matches!(
            err,
            Error::Syntax {
                source: SyntaxError::Parse(ParseError::UnknownIdentifier(_)),
                ..
            }
        ));
    }

    #[test]
    fn trailing_input_is_rejected() {
        let err = parse_err(b"1 2");
        assert!(matches!(
            err,
            Error::Syntax {
                source: SyntaxError::Parse(ParseError::ExpectedEof(Token::Integer)),
                ..
            }
        ));
    }

    #[test]
    fn illegal_string_surfaces_as_lex_error() {
        let err = parse_err(b"[\"a\x01\"]");
        assert!(matches!(
            err,
            Error::Syntax {
                source: SyntaxError::Lex(LexError::IllegalString),
                ..
            }
        ));
    }

    #[test]
    fn parens_are_not_values() {
        let err = parse_err(b"(1)");
        assert!(matches!(
            err,
            Error::Syntax {
                source: SyntaxError::Parse(ParseError::ExpectedValue(Token::LParen)),
                ..
            }
        ));
    }

    #[test]
    fn visitor_errors_propagate() {
        struct Failing;
        impl Visitor for Failing {
            fn push_label(&mut self, _: &[u8]) -> crate::visitor::VisitResult {
                Err(VisitError::IllegalSequence)
            }
            fn start_object(&mut self) -> crate::visitor::VisitResult {
                Ok(())
            }
            fn end_object(&mut self) -> crate::visitor::VisitResult {
                Ok(())
            }
            fn start_array(&mut self) -> crate::visitor::VisitResult {
                Ok(())
            }
            fn end_array(&mut self) -> crate::visitor::VisitResult {
                Ok(())
            }
            fn add_bool(&mut self, _: bool) -> crate::visitor::VisitResult {
                Ok(())
            }
            fn add_number(&mut self, _: &[u8]) -> crate::visitor::VisitResult {
                Ok(())
            }
            fn add_string(&mut self, _: &[u8]) -> crate::visitor::VisitResult {
                Ok(())
            }
            fn add_null(&mut self) -> crate::visitor::VisitResult {
                Ok(())
            }
            fn add_undefined(&mut self) -> crate::visitor::VisitResult {
                Ok(())
            }
        }

        let err = parse(br#"{"a":1}"#, &mut Failing).unwrap_err();
        assert_eq!(err, Error::Visit(VisitError::IllegalSequence));
    }
}
