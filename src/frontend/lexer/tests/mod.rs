//! Lexer 单元测试
//!
//! 测试动作脚本的分词功能
#![allow(unused_imports)]
use crate::frontend::lexer::tokens::TokenKind;
use crate::frontend::lexer::{tokenize, LexError};

#[cfg(test)]
mod lexer_basic_tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let tokens = tokenize("").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        let tokens = tokenize("   \t\n\r   ").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_single_word() {
        let tokens = tokenize("loc").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[0].text, "loc");
    }

    #[test]
    fn test_word_sequence() {
        let tokens = tokenize("loc div &home with world,2,2,2").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["loc", "div", "&home", "with", "world,2,2,2"]);
    }

    #[test]
    fn test_line_comment() {
        let tokens = tokenize("loc # trailing words are ignored\ndiv").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["loc", "div"]);
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("a\n  bc").unwrap();
        assert_eq!(tokens[0].span.start.line, 1);
        assert_eq!(tokens[0].span.start.column, 1);
        assert_eq!(tokens[1].span.start.line, 2);
        assert_eq!(tokens[1].span.start.column, 3);
    }
}

#[cfg(test)]
mod lexer_quote_tests {
    use super::*;

    #[test]
    fn test_double_quoted() {
        let tokens = tokenize("print \"hello world\"").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Quoted);
        assert_eq!(tokens[1].text, "hello world");
    }

    #[test]
    fn test_single_quoted() {
        let tokens = tokenize("'a b'").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Quoted);
        assert_eq!(tokens[0].text, "a b");
    }

    #[test]
    fn test_escapes() {
        let tokens = tokenize(r#""line\nbreak \"quoted\"""#).unwrap();
        assert_eq!(tokens[0].text, "line\nbreak \"quoted\"");
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("\"no end").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn test_invalid_escape() {
        let err = tokenize(r#""bad \q escape""#).unwrap_err();
        assert!(matches!(err, LexError::InvalidEscape { .. }));
    }
}

#[cfg(test)]
mod lexer_block_tests {
    use super::*;

    #[test]
    fn test_braces_are_standalone() {
        let tokens = tokenize("set x to {literal a}").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::OpenBrace,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::CloseBrace,
            ]
        );
    }

    #[test]
    fn test_brace_glued_to_word() {
        let tokens = tokenize("{a}").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["{", "a", "}"]);
    }
}
