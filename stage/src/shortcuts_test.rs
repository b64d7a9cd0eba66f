use super::*;

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Default::default() }
}

fn key(name: &str) -> Key {
    Key(name.into())
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_bare_key_lowercases() {
    let s = Shortcut::parse("H").unwrap();
    assert_eq!(s.key_name(), "h");
    assert_eq!(s.modifiers(), Modifiers::default());
}

#[test]
fn parse_modifier_combo() {
    let s = Shortcut::parse("ctrl+plus").unwrap();
    assert_eq!(s.key_name(), "plus");
    assert_eq!(s.modifiers(), ctrl());
}

#[test]
fn parse_accepts_spacing_and_aliases() {
    let s = Shortcut::parse(" Control + Shift + 2 ").unwrap();
    assert_eq!(s.key_name(), "2");
    assert_eq!(s.modifiers(), Modifiers { ctrl: true, shift: true, ..Default::default() });
}

#[test]
fn parse_rejects_empty() {
    assert_eq!(Shortcut::parse("  "), Err(ShortcutError::Empty));
}

#[test]
fn parse_rejects_trailing_plus() {
    assert_eq!(Shortcut::parse("ctrl+"), Err(ShortcutError::MissingKey("ctrl+".into())));
}

#[test]
fn parse_rejects_unknown_modifier() {
    assert_eq!(Shortcut::parse("hyper+h"), Err(ShortcutError::UnknownModifier("hyper".into())));
}

#[test]
fn display_round_trips_through_parse() {
    for raw in ["h", "ctrl+plus", "ctrl+minus", "shift+1", "ctrl+alt+shift+meta+x"] {
        let parsed = Shortcut::parse(raw).unwrap();
        assert_eq!(parsed.to_string(), raw);
        assert_eq!(Shortcut::parse(&parsed.to_string()).unwrap(), parsed);
    }
}

// =============================================================
// Matching
// =============================================================

#[test]
fn matches_exact_modifiers_only() {
    let s = Shortcut::key("h");
    assert!(s.matches(&key("h"), Modifiers::default()));
    assert!(s.matches(&key("H"), Modifiers::default()));
    assert!(!s.matches(&key("h"), ctrl()));
    assert!(!s.matches(&key("j"), Modifiers::default()));
}

#[test]
fn ctrl_plus_matches_equals_and_shifted_plus() {
    let s = Shortcut::parse("ctrl+plus").unwrap();
    assert!(s.matches(&key("="), ctrl()));
    assert!(s.matches(&key("+"), Modifiers { ctrl: true, shift: true, ..Default::default() }));
    assert!(!s.matches(&key("="), Modifiers::default()));
}

#[test]
fn shift_digit_matches_shifted_symbol() {
    let s = Shortcut::parse("shift+1").unwrap();
    assert!(s.matches(&key("!"), shift()));
    assert!(s.matches(&key("1"), shift()));
    assert!(!s.matches(&key("1"), Modifiers::default()));
}

// =============================================================
// Default bindings
// =============================================================

#[test]
fn default_bindings_cover_every_action() {
    let bindings = default_bindings();
    let labels: Vec<&str> = bindings.iter().map(|b| b.label).collect();
    assert_eq!(
        labels,
        vec!["Move", "Pan Image", "Zoom In", "Zoom Out", "Zoom to fit", "Zoom to actual size"]
    );
}

#[test]
fn resolve_pan_toggle() {
    let bindings = default_bindings();
    let action = resolve(&bindings, &key("h"), Modifiers::default());
    assert_eq!(action, Some(&ToolAction::Toggle(PAN_ZOOM_TOOL_ID.into())));
}

#[test]
fn resolve_zoom_and_fit() {
    let bindings = default_bindings();
    assert_eq!(resolve(&bindings, &key("-"), ctrl()), Some(&ToolAction::Zoom(ZoomDirection::Out)));
    assert_eq!(resolve(&bindings, &key("="), ctrl()), Some(&ToolAction::Zoom(ZoomDirection::In)));
    assert_eq!(resolve(&bindings, &key("!"), shift()), Some(&ToolAction::SizeToFit));
    assert_eq!(resolve(&bindings, &key("@"), shift()), Some(&ToolAction::SizeToOriginal));
}

#[test]
fn resolve_unbound_key_is_none() {
    let bindings = default_bindings();
    assert_eq!(resolve(&bindings, &key("q"), Modifiers::default()), None);
    assert_eq!(resolve(&bindings, &key("h"), ctrl()), None);
}
