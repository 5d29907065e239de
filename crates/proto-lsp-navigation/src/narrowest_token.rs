//! Narrowest-Token Finder (C3, §4.1).

use proto_ast::SemanticToken;

/// Returns the first token in `tokens` (assumed sorted by `(line,
/// start_column)`) whose span contains `(target_line, target_column)`,
/// carries an AST node, isn't bare punctuation, and is tagged `"proto"`.
///
/// `target_column` is treated inclusively at the token's far end, so a
/// caret placed immediately after the last character of an identifier
/// still selects it — common editor behavior.
pub fn find_narrowest_token(
    tokens: &[SemanticToken],
    target_line: u32,
    target_column: u32,
) -> Option<&SemanticToken> {
    for token in tokens {
        if token.line > target_line {
            break;
        }
        if token.line != target_line {
            continue;
        }
        if token.start_column > target_column {
            break;
        }
        if token.length == 0 || token.node.is_none() || token.is_punctuation {
            continue;
        }
        if token.language != "proto" {
            continue;
        }
        if target_column <= token.end_column() {
            return Some(token);
        }
    }
    None
}
