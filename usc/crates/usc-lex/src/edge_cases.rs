//! Edge case tests for usc-lex
