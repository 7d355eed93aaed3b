//! The PGN driver: a token stream applied to a graph and its tags.

use super::lexer::{Lexer, Location, Token, TokenKind};
use crate::graph::Graph;
use tabiya_core::GameTags;
use thiserror::Error;

/// The first syntax error found in a PGN stream.
///
/// Later tokens are still consumed so the stream drains, but they change
/// no state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("syntax error on line {line} column {column}")]
pub struct PgnError {
    pub line: u32,
    pub column: u32,
}

/// Parses a single game into `graph` and `tags`, both of which are reset
/// first.
///
/// A trailing result token sets the `Result` tag; movetext without one is
/// accepted and leaves the default `"*"`.
pub fn read_game(graph: &mut Graph, tags: &mut GameTags, text: &str) -> Result<(), PgnError> {
    run(graph, tags, text, None)
}

/// Parses a concatenation of games, invoking `on_game` after each game's
/// result token with the populated graph and tags; both are then reset
/// for the next game.
///
/// Parsing stops producing state changes (and callbacks) at the first
/// syntax error, which is returned once the stream is drained.
pub fn for_each_game(
    graph: &mut Graph,
    tags: &mut GameTags,
    text: &str,
    mut on_game: impl FnMut(&mut Graph, &mut GameTags),
) -> Result<(), PgnError> {
    run(graph, tags, text, Some(&mut on_game))
}

fn run(
    graph: &mut Graph,
    tags: &mut GameTags,
    text: &str,
    mut on_game: Option<&mut dyn FnMut(&mut Graph, &mut GameTags)>,
) -> Result<(), PgnError> {
    graph.reset();
    tags.reset();

    let mut lexer = Lexer::new(text);
    let mut error: Option<PgnError> = None;
    let mut record = |error: &mut Option<PgnError>, location: Location| {
        if error.is_none() {
            *error = Some(PgnError {
                line: location.line,
                column: location.column,
            });
        }
    };

    while let Some(token) = lexer.next_token() {
        match token.kind {
            TokenKind::TagOpen => {
                match read_tag_pair(&mut lexer) {
                    Some((key, value)) => {
                        if error.is_none() {
                            tags.set(key, &unescape(value));
                        }
                    }
                    // a malformed pair is reported at its opening bracket
                    None => record(&mut error, token.location),
                }
            }
            TokenKind::Symbol(symbol) => {
                if error.is_none() {
                    match graph.move_from_san(symbol) {
                        Ok(mv) => graph.make_move(mv),
                        Err(_) => record(&mut error, token.location),
                    }
                }
            }
            TokenKind::GameResult(result) => {
                if error.is_none() {
                    tags.set("Result", result);
                    if let Some(on_game) = on_game.as_mut() {
                        on_game(graph, tags);
                        graph.reset();
                        tags.reset();
                    }
                }
            }
            // move numbers and their dots are presentational
            TokenKind::Integer | TokenKind::Dot => {}
            TokenKind::TagClose | TokenKind::Quoted(_) | TokenKind::Unterminated => {
                record(&mut error, token.location)
            }
        }
    }

    match error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn read_tag_pair<'a>(lexer: &mut Lexer<'a>) -> Option<(&'a str, &'a str)> {
    let key = match lexer.next_token() {
        Some(Token {
            kind: TokenKind::Symbol(key),
            ..
        }) => key,
        _ => return None,
    };
    let value = match lexer.next_token() {
        Some(Token {
            kind: TokenKind::Quoted(value),
            ..
        }) => value,
        _ => return None,
    };
    match lexer.next_token() {
        Some(Token {
            kind: TokenKind::TagClose,
            ..
        }) => Some((key, value)),
        _ => None,
    }
}

/// Strips the backslash escapes a quoted tag value may carry.
fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_tags_and_moves() {
        let pgn = "[Event \"Test Match\"]\n[Result \"1-0\"]\n\n1. e4 e5 2. Nf3 1-0\n";
        let mut graph = Graph::new();
        let mut tags = GameTags::new();
        read_game(&mut graph, &mut tags, pgn).unwrap();
        assert_eq!(tags.get("Event"), "Test Match");
        assert_eq!(tags.get("Result"), "1-0");
        assert_eq!(graph.ply(), 3);
    }

    #[test]
    fn unescapes_tag_values() {
        let pgn = r#"[Event "The \"Big\" One"]
[Site "A \\ B"]

*
"#;
        let mut graph = Graph::new();
        let mut tags = GameTags::new();
        read_game(&mut graph, &mut tags, pgn).unwrap();
        assert_eq!(tags.get("Event"), "The \"Big\" One");
        assert_eq!(tags.get("Site"), "A \\ B");
    }

    #[test]
    fn empty_and_trivial_streams_parse() {
        let mut graph = Graph::new();
        let mut tags = GameTags::new();
        for text in ["", "*", "1. *"] {
            read_game(&mut graph, &mut tags, text).unwrap();
            assert_eq!(graph.ply(), 0);
            assert_eq!(tags.get("Result"), "*");
        }
    }

    #[test]
    fn error_positions() {
        let mut graph = Graph::new();
        let mut tags = GameTags::new();
        let mut err = |text| read_game(&mut graph, &mut tags, text).unwrap_err();
        assert_eq!(err("foo").to_string(), "syntax error on line 1 column 1");
        assert_eq!(err("[").to_string(), "syntax error on line 1 column 1");
        assert_eq!(
            err("1. e4 e5\nbar").to_string(),
            "syntax error on line 2 column 1"
        );
        assert_eq!(
            err("1. e4 e5\n2. baz").to_string(),
            "syntax error on line 2 column 4"
        );
        // a well-formed token naming an illegal move is also a syntax error
        assert_eq!(
            err("1. e4 e5\n2. Rd4").to_string(),
            "syntax error on line 2 column 4"
        );
    }

    #[test]
    fn first_error_wins_and_stream_drains() {
        let mut graph = Graph::new();
        let mut tags = GameTags::new();
        let result = read_game(&mut graph, &mut tags, "1. bogus e5 also bad\n[Event \"x\"]");
        assert_eq!(
            result.unwrap_err().to_string(),
            "syntax error on line 1 column 4"
        );
        // nothing after the error was applied
        assert_eq!(tags.get("Event"), "?");
        assert_eq!(graph.ply(), 0);
    }

    #[test]
    fn multiple_games_invoke_the_callback() {
        let pgn = "[White \"First\"]\n\n1. e4 e5 1-0\n\n[White \"Second\"]\n\n1. d4 d5 0-1\n";
        let mut graph = Graph::new();
        let mut tags = GameTags::new();
        let mut seen = Vec::new();
        for_each_game(&mut graph, &mut tags, pgn, |graph, tags| {
            seen.push((tags.get("White").to_string(), tags.get("Result").to_string(), graph.ply()));
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![
                ("First".to_string(), "1-0".to_string(), 2),
                ("Second".to_string(), "0-1".to_string(), 2),
            ]
        );
        // the reader reset after the last game
        assert_eq!(graph.ply(), 0);
    }
}
