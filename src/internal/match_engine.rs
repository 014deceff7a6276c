use log::trace;

use crate::{TokenKind, TokenMatch};

use super::MatchContext;

/// Finds the first pattern in registration order that matches at the current position of the
/// context.
///
/// A pattern is accepted only if its match starts exactly at `context.index` and is not empty.
/// The first accepted pattern wins, even if a later pattern would match a longer text.
/// If `expected` is given, only patterns of that kind are tried.
///
/// Returns the kind of the winning pattern and the length of its match in bytes.
pub(crate) fn find_match<K: TokenKind>(
    context: &MatchContext<'_, K>,
    expected: Option<K>,
) -> Option<(K, usize)> {
    context
        .patterns
        .iter()
        .filter(|pattern| expected.map_or(true, |kind| pattern.kind() == kind))
        .find_map(|pattern| {
            pattern
                .matches_at(context.text, context.index)
                .map(|length| (pattern.kind(), length))
        })
}

/// Executes [find_match] and builds the resulting [TokenMatch] from the current position of the
/// context. The context itself is not modified.
pub(crate) fn try_match<K: TokenKind>(
    context: &MatchContext<'_, K>,
    expected: Option<K>,
) -> Option<TokenMatch<K>> {
    let (kind, length) = find_match(context, expected)?;
    let start = context.index;
    let token_match = TokenMatch::new(
        kind,
        &context.text[start..start + length],
        start,
        context.line_number,
        context.line_index,
    );
    trace!("Matched: {:?}", token_match);
    Some(token_match)
}
