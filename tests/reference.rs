//! Tests for reference-expression templates and placeholder autocomplete.
use seerflow::reference::autocomplete::{
    Key, KeyAction, SuggestionList, active_token, insert_variable, suggestions,
};
use seerflow::reference::{RefSyntax, Segment, Template, translate};

#[test]
fn test_translate_dollar_to_brace() {
    assert_eq!(
        translate(
            "Hello ${user_name}, about ${inputs.topic}",
            RefSyntax::Dollar,
            RefSyntax::Brace
        ),
        "Hello {{user_name}}, about {{inputs.topic}}"
    );
}

#[test]
fn test_translate_round_trip_recovers_original() {
    // Syntax duality: Dollar -> Brace -> Dollar is the identity for
    // identifiers free of brace characters.
    for original in [
        "${summary}",
        "plain text, no references",
        "Hello ${a} and ${inputs.b}!",
        "${ spaced }",
        "",
    ] {
        let there = translate(original, RefSyntax::Dollar, RefSyntax::Brace);
        let back = translate(&there, RefSyntax::Brace, RefSyntax::Dollar);
        assert_eq!(back, original, "round trip changed {:?}", original);
    }
}

#[test]
fn test_parse_is_total_on_malformed_input() {
    // Unclosed openers and stray closers stay literal; nothing ever fails.
    for malformed in ["${unclosed", "Hello {{partial", "no } opener", "}}", "${"] {
        let rendered = Template::parse(malformed, RefSyntax::Dollar).render(RefSyntax::Dollar);
        assert_eq!(rendered, malformed);
        let rendered = Template::parse(malformed, RefSyntax::Brace).render(RefSyntax::Brace);
        assert_eq!(rendered, malformed);
    }
}

#[test]
fn test_template_segments_and_references() {
    let template = Template::parse("a ${x} b ${ y } c", RefSyntax::Dollar);
    assert_eq!(
        template.segments(),
        &[
            Segment::Literal("a ".to_string()),
            Segment::Reference("x".to_string()),
            Segment::Literal(" b ".to_string()),
            Segment::Reference(" y ".to_string()),
            Segment::Literal(" c".to_string()),
        ]
    );
    // References are trimmed for resolution but stored verbatim.
    let refs: Vec<&str> = template.references().collect();
    assert_eq!(refs, vec!["x", "y"]);
}

#[test]
fn test_autocomplete_partial_matching() {
    let variables = vec![
        "email_summary".to_string(),
        "email_count".to_string(),
        "user_name".to_string(),
    ];
    let text = "Hello {{em";
    let token = active_token(text, text.len()).expect("token should be active");
    assert_eq!(token.partial, "em");
    assert_eq!(
        suggestions(&token.partial, &variables),
        vec!["email_summary", "email_count"]
    );
}

#[test]
fn test_autocomplete_case_insensitive_and_order_preserving() {
    let variables = vec!["Email_Summary".to_string(), "email_count".to_string()];
    assert_eq!(
        suggestions("EM", &variables),
        vec!["Email_Summary", "email_count"]
    );
}

#[test]
fn test_autocomplete_inactive_after_close() {
    let text = "Hello {{email_summary}} and more";
    assert_eq!(active_token(text, text.len()), None);
    // A new opener after the closed one re-activates.
    let text = "Hello {{a}} {{us";
    let token = active_token(text, text.len()).expect("second token active");
    assert_eq!(token.partial, "us");
}

#[test]
fn test_autocomplete_insertion() {
    let text = "Hello {{em";
    let (new_text, cursor) = insert_variable(text, text.len(), "email_summary");
    assert_eq!(new_text, "Hello {{email_summary}}");
    assert_eq!(cursor, new_text.len());
}

#[test]
fn test_autocomplete_insertion_preserves_suffix() {
    let text = "Hello {{em world";
    let cursor = "Hello {{em".len();
    let (new_text, new_cursor) = insert_variable(text, cursor, "email_count");
    assert_eq!(new_text, "Hello {{email_count}} world");
    assert_eq!(new_cursor, "Hello {{email_count}}".len());
}

#[test]
fn test_autocomplete_with_mid_character_cursor() {
    // A cursor offset inside a multibyte character clamps down to the nearest
    // boundary instead of panicking.
    let text = "hé {{x";
    assert_eq!(active_token(text, 2), None);
    let token = active_token(text, text.len()).expect("token active at end");
    assert_eq!(token.partial, "x");

    let text = "héllo {{ré";
    let (new_text, cursor) = insert_variable(text, text.len() - 1, "résultats");
    assert_eq!(new_text, "héllo {{résultats}}é");
    assert_eq!(cursor, "héllo {{résultats}}".len());
}

#[test]
fn test_keyboard_highlight_clamping() {
    let mut list = SuggestionList::new(3);
    assert_eq!(list.handle(Key::ArrowUp), KeyAction::Highlight(0));
    assert_eq!(list.handle(Key::ArrowDown), KeyAction::Highlight(1));
    assert_eq!(list.handle(Key::ArrowDown), KeyAction::Highlight(2));
    assert_eq!(list.handle(Key::ArrowDown), KeyAction::Highlight(2));
    assert_eq!(list.handle(Key::Enter { shift: false }), KeyAction::Commit(2));
}

#[test]
fn test_keyboard_escape_and_shift_enter() {
    let mut list = SuggestionList::new(2);
    assert_eq!(list.handle(Key::Escape), KeyAction::Dismiss);
    // Shift+Enter commits by default...
    assert_eq!(list.handle(Key::Enter { shift: true }), KeyAction::Commit(0));
    // ...but passes through when the caller opts in (multi-line fields).
    let mut list = SuggestionList::new(2).with_shift_enter_passthrough();
    assert_eq!(
        list.handle(Key::Enter { shift: true }),
        KeyAction::PassThrough
    );
    assert_eq!(list.handle(Key::Enter { shift: false }), KeyAction::Commit(0));
}

#[test]
fn test_keyboard_empty_list_passes_through() {
    let mut list = SuggestionList::new(0);
    assert_eq!(list.handle(Key::Enter { shift: false }), KeyAction::PassThrough);
    assert_eq!(list.handle(Key::ArrowDown), KeyAction::PassThrough);
}
