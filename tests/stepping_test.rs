use patlex::{Position, SteppingCursor, Tokenizer, TokenizerBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    NewLine,
    Space,
    Number,
    Ident,
    Assign,
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tokenizer() -> Tokenizer<Kind> {
    TokenizerBuilder::new()
        .add_pattern(Kind::NewLine, r"\r\n|\r|\n")
        .add_pattern(Kind::Space, r"[ \t]+")
        .add_pattern(Kind::Number, r"\d+")
        .add_pattern(Kind::Ident, r"[a-zA-Z_]\w*")
        .add_pattern(Kind::Assign, r"=")
        .build()
        .unwrap()
}

fn state(cursor: &SteppingCursor<'_, Kind>) -> (usize, Position, usize) {
    (cursor.index(), cursor.position(), cursor.history().len())
}

#[test]
fn retreat_restores_every_state() {
    init();
    let tokenizer = tokenizer();
    let input = "a = 1\r\nbc = 23\rd\n";
    let mut cursor = tokenizer.create_stepping_cursor(input);

    let mut states = vec![state(&cursor)];
    while cursor.advance().is_some() {
        states.push(state(&cursor));
    }
    assert!(!cursor.has_next());
    assert_eq!(cursor.index(), input.len());
    assert_eq!(cursor.position(), Position::new(4, 0));

    // Walk back and compare with the states recorded on the way forward.
    states.pop();
    while let Some(expected) = states.pop() {
        cursor.retreat();
        assert_eq!(state(&cursor), expected);
    }
    assert!(cursor.current().is_none());
    assert_eq!(cursor.position(), Position::new(1, 0));
}

#[test]
fn retreat_then_advance_differently() {
    init();
    let tokenizer = tokenizer();
    let mut cursor = tokenizer.create_stepping_cursor("x = 42");
    assert!(cursor.advance_kind(Kind::Ident).is_some());
    assert!(cursor.advance_kind(Kind::Space).is_some());
    assert_eq!(
        cursor.advance_kind(Kind::Assign).map(|t| t.index()),
        Some(2)
    );

    // Speculate: the next token is not a number, back off.
    assert!(cursor.advance_kind(Kind::Number).is_none());
    assert_eq!(cursor.current().map(|t| t.kind()), Some(Kind::Assign));
    assert_eq!(cursor.retreat().map(|t| t.kind()), Some(Kind::Space));
    assert_eq!(cursor.index(), 2);
    assert_eq!(cursor.line_text(), "x = 42");

    assert!(cursor.peek_matches(Kind::Assign));
    cursor.advance();
    cursor.advance();
    assert_eq!(cursor.advance().map(|t| t.text()), Some("42"));
    assert_eq!(
        cursor
            .history()
            .iter()
            .map(|t| t.kind())
            .collect::<Vec<_>>(),
        vec![
            Kind::Ident,
            Kind::Space,
            Kind::Assign,
            Kind::Space,
            Kind::Number
        ]
    );
}

#[test]
fn cursor_works_on_a_snapshot() {
    init();
    let mut tokenizer = tokenizer();
    let mut cursor = tokenizer.create_stepping_cursor("a 1");

    // Changing the tokenizer doesn't affect the running cursor.
    tokenizer.remove_pattern(Kind::Number);
    tokenizer.clear_hooks();
    assert!(!tokenizer.has_pattern_kind(Kind::Number));

    assert_eq!(cursor.patterns().len(), 5);
    assert!(cursor.advance().is_some());
    assert!(cursor.advance().is_some());
    assert_eq!(cursor.advance().map(|t| t.kind()), Some(Kind::Number));

    // A new cursor sees the change.
    let mut cursor = tokenizer.create_stepping_cursor("a 1");
    assert_eq!(cursor.by_ref().count(), 2);
    assert!(cursor.has_next());
}

#[test]
fn reset_starts_over() {
    init();
    let tokenizer = tokenizer();
    let mut cursor = tokenizer.create_stepping_cursor("a\nb");
    assert_eq!(cursor.by_ref().count(), 3);
    assert_eq!(cursor.position(), Position::new(2, 1));
    cursor.reset();
    assert_eq!(state(&cursor), (0, Position::new(1, 0), 0));
    assert_eq!(cursor.line_text(), "a");
    assert_eq!(cursor.advance().map(|t| t.text()), Some("a"));
}

#[test]
fn hooks_are_not_applied() {
    init();
    let tokenizer = TokenizerBuilder::new()
        .add_pattern(Kind::Space, r"[ \t]+")
        .add_pattern(Kind::Ident, r"\w+")
        .pre_insert_hook(|token_match| token_match.cancel())
        .build()
        .unwrap();
    assert!(tokenizer.tokenize("a b").unwrap().is_empty());
    assert_eq!(tokenizer.create_stepping_cursor("a b").count(), 3);
}
