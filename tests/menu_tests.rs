#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::io::Cursor;

use labcommitr::shortcuts::auto_assign;
use labcommitr::tui::keys::{Key, ScriptedKeys};
use labcommitr::tui::terminal::Screen;
use labcommitr::tui::{Select, SelectItem};
use labcommitr::{MenuAction, get_menu_options};

#[test]
fn test_menu_options_count() {
    assert_eq!(get_menu_options().len(), 6);
}

#[test]
fn test_menu_shortcuts_are_unique_letters() {
    let options = get_menu_options();
    let mut keys: Vec<char> = options.iter().map(|o| o.shortcut).collect();
    assert!(keys.iter().all(char::is_ascii_lowercase));

    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), options.len());
}

#[test]
fn test_menu_commit_is_first_and_quit_last() {
    let options = get_menu_options();
    assert_eq!(options.first().unwrap().action, MenuAction::Commit);
    assert_eq!(options.last().unwrap().action, MenuAction::Quit);
}

#[test]
fn test_menu_shortcut_selects_action() {
    let options = get_menu_options();
    let configured: BTreeMap<String, String> = options
        .iter()
        .map(|o| (o.shortcut.to_string(), o.action.to_string()))
        .collect();
    let keys: Vec<String> = options.iter().map(|o| o.action.to_string()).collect();
    let items = options
        .iter()
        .map(|o| SelectItem::new(o.action, o.label).with_key(o.action.to_string()))
        .collect();

    let mut screen = Screen::with_width(Cursor::new(Vec::new()), None);
    let mut input = ScriptedKeys::new([Key::Char('R')]);
    let choice = Select::new("What would you like to do?", items)
        .with_shortcuts(auto_assign(&keys, &configured), true)
        .prompt_with(&mut screen, &mut input)
        .unwrap();

    assert_eq!(choice, Some(MenuAction::Revert));
    assert_eq!(screen.rendered_lines(), 1);
}
