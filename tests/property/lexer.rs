// Property tests for lexer invariants:
// 1. No panics on arbitrary input
// 2. Token spans are in bounds, ordered and non-overlapping
// 3. Every successful lex ends with exactly one Eof

use noir::lexer::lex;
use noir::lexer::token::Token;
use proptest::prelude::*;

// Strategy: short runs of Noir-flavored fragments, valid or not
fn arb_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("x".to_string()),
        Just(": Int = ".to_string()),
        Just("::".to_string()),
        Just("\n".to_string()),
        Just("for i in 0 to 3:".to_string()),
        Just("\"str\"".to_string()),
        Just("'c'".to_string()),
        Just("// note".to_string()),
        (0..1000i64).prop_map(|n| n.to_string()),
        (0..100u32, 0..99999999u32).prop_map(|(a, b)| format!("{a}.{b}")),
        "[a-z+*/%<>=!()\\[\\], .-]{1,6}",
    ]
}

fn arb_source() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_fragment(), 0..20).prop_map(|parts| parts.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn lexer_does_not_panic(source in "\\PC{0,64}") {
        let _ = lex(&source);
    }

    #[test]
    fn spans_are_ordered_and_in_bounds(source in arb_source()) {
        if let Ok(tokens) = lex(&source) {
            let mut prev_end = 0;
            for tok in &tokens {
                prop_assert!(tok.span.start >= prev_end);
                prop_assert!(tok.span.start <= tok.span.end);
                prop_assert!(tok.span.end <= source.len());
                prop_assert!(tok.span.line >= 1 && tok.span.column >= 1);
                prev_end = tok.span.end;
            }
        }
    }

    #[test]
    fn successful_lex_ends_with_single_eof(source in arb_source()) {
        if let Ok(tokens) = lex(&source) {
            let eofs = tokens.iter().filter(|t| t.node == Token::Eof).count();
            prop_assert_eq!(eofs, 1);
            prop_assert_eq!(&tokens.last().unwrap().node, &Token::Eof);
        }
    }

    #[test]
    fn integer_literals_round_trip(n in 0..i64::MAX) {
        let tokens = lex(&n.to_string()).unwrap();
        prop_assert_eq!(&tokens[0].node, &Token::IntLit(n));
    }
}
