//! The PGN writer.

use crate::graph::Graph;
use std::fmt::Write;
use tabiya_core::GameTags;

const MANDATORY_KEYS: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];
const OPTIONAL_KEYS: [&str; 3] = ["WhiteElo", "BlackElo", "ECO"];
const MAX_LINE_LENGTH: usize = 79;

/// Renders a game as PGN.
///
/// With tags, the seven mandatory tag pairs come first in fixed order,
/// then the optional pairs whose value is set. With a graph, the movetext
/// follows (after a separating blank line if tags were written), ending
/// with the result token and wrapped so no line exceeds 79 characters.
/// Either part may be omitted by passing `None`.
pub fn write_game(graph: Option<&mut Graph>, tags: Option<&GameTags>) -> String {
    let mut out = String::new();
    if let Some(tags) = tags {
        for key in MANDATORY_KEYS {
            write_tag_pair(&mut out, key, tags.get(key));
        }
        for key in OPTIONAL_KEYS {
            let value = tags.get(key);
            if value != "?" {
                write_tag_pair(&mut out, key, value);
            }
        }
        if graph.is_some() {
            out.push('\n');
        }
    }
    if let Some(graph) = graph {
        let movetext_start = out.len();
        let mut ply = 0usize;
        graph.for_each_move_made(|graph, mv| {
            if ply != 0 {
                out.push(' ');
            }
            if ply % 2 == 0 {
                let _ = write!(out, "{}. ", ply / 2 + 1);
            }
            out.push_str(&graph.move_to_san(mv));
            ply += 1;
        });
        if out.len() > movetext_start {
            out.push(' ');
        }
        out.push_str(tags.map_or("*", |tags| tags.get("Result")));
        wrap_movetext(&mut out, movetext_start);
        out.push('\n');
    }
    out
}

impl Graph {
    /// Renders this game as PGN; see [`write_game`].
    pub fn to_pgn(&mut self, tags: Option<&GameTags>) -> String {
        write_game(Some(self), tags)
    }
}

fn write_tag_pair(out: &mut String, key: &str, value: &str) {
    out.push('[');
    out.push_str(key);
    out.push_str(" \"");
    for c in value.chars() {
        if c == '\\' || c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push_str("\"]\n");
}

/// Replaces the space nearest before every 79-character boundary with a
/// newline. Any realistic movetext has a space in each 79-byte window, so
/// the backward scan always finds one.
fn wrap_movetext(out: &mut String, movetext_start: usize) {
    let mut bytes = std::mem::take(out).into_bytes();
    let mut line_end = movetext_start + MAX_LINE_LENGTH;
    while line_end < bytes.len() {
        while bytes[line_end] != b' ' {
            line_end -= 1;
        }
        bytes[line_end] = b'\n';
        line_end += MAX_LINE_LENGTH + 1;
    }
    *out = String::from_utf8(bytes).expect("replacing a space with a newline keeps UTF-8 intact");
}
