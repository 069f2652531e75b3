//! Key chord parsing and matching.
//!
//! Parses chord strings like "ctrl+s" or "ctrl+pageup" from config and
//! matches them against crossterm KeyEvents at runtime. [`Keymap`] holds the
//! parsed global bindings and answers which [`Command`] a key triggers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::config::KeymapConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub key: KeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// Global commands reachable from the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    NewTab,
    CloseTab,
    NextTab,
    PrevTab,
    Open,
    Save,
    TimerMenu,
    TimerRestart,
    Delete,
    Quote,
    Hemingway,
    TabBar,
    Quit,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::NewTab => "new_tab",
            Command::CloseTab => "close_tab",
            Command::NextTab => "next_tab",
            Command::PrevTab => "prev_tab",
            Command::Open => "open",
            Command::Save => "save",
            Command::TimerMenu => "timer_menu",
            Command::TimerRestart => "timer_restart",
            Command::Delete => "delete",
            Command::Quote => "quote",
            Command::Hemingway => "hemingway",
            Command::TabBar => "tab_bar",
            Command::Quit => "quit",
        }
    }
}

pub fn parse_key_chord(input: &str) -> Option<KeyChord> {
    let trimmed = input.trim().to_lowercase();
    if trimmed.is_empty() {
        return None;
    }

    // "ctrl++" binds the plus key itself.
    let (body, plus_key) = match trimmed.strip_suffix("++") {
        Some(rest) => (rest.to_string(), true),
        None => (trimmed.clone(), false),
    };
    let parts: Vec<&str> = body
        .split('+')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();

    let mut chord = KeyChord {
        key: if plus_key {
            KeyCode::Char('+')
        } else {
            KeyCode::Null
        },
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    for part in parts {
        match part {
            "ctrl" | "control" => chord.ctrl = true,
            "alt" | "option" => chord.alt = true,
            "shift" => chord.shift = true,
            "meta" | "cmd" | "super" => chord.meta = true,
            key => {
                if chord.key != KeyCode::Null {
                    return None;
                }
                chord.key = parse_key(key)?;
            }
        }
    }

    if chord.key == KeyCode::Null {
        return None;
    }

    Some(chord)
}

fn parse_key(key: &str) -> Option<KeyCode> {
    match key {
        "esc" | "escape" => Some(KeyCode::Esc),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "space" | "spacebar" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        _ => {
            if let Some(number) = key.strip_prefix('f') {
                if let Ok(n) = number.parse::<u8>() {
                    return (1..=12).contains(&n).then_some(KeyCode::F(n));
                }
            }
            let mut chars = key.chars();
            let first = chars.next()?;
            if chars.next().is_none() {
                Some(KeyCode::Char(first))
            } else {
                None
            }
        }
    }
}

pub fn matches_chord(event: KeyEvent, chord: &KeyChord) -> bool {
    if normalize_code(event.code) != chord.key {
        return false;
    }

    let modifiers = event.modifiers;
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let meta = modifiers.contains(KeyModifiers::SUPER) || modifiers.contains(KeyModifiers::META);

    ctrl == chord.ctrl && alt == chord.alt && shift == chord.shift && meta == chord.meta
}

// Terminals report ctrl+letter with either case depending on the protocol.
fn normalize_code(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(ch) => KeyCode::Char(ch.to_ascii_lowercase()),
        other => other,
    }
}

/// Parsed global bindings plus the chords that are swallowed outright.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<(KeyChord, Command)>,
    suppressed: Vec<KeyChord>,
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let entries = [
            (Command::NewTab, &config.new_tab),
            (Command::CloseTab, &config.close_tab),
            (Command::NextTab, &config.next_tab),
            (Command::PrevTab, &config.prev_tab),
            (Command::Open, &config.open),
            (Command::Save, &config.save),
            (Command::TimerMenu, &config.timer_menu),
            (Command::TimerRestart, &config.timer_restart),
            (Command::Delete, &config.delete),
            (Command::Quote, &config.quote),
            (Command::Hemingway, &config.hemingway),
            (Command::TabBar, &config.tab_bar),
            (Command::Quit, &config.quit),
        ];
        let mut bindings = Vec::with_capacity(entries.len());
        for (command, raw) in entries {
            match parse_key_chord(raw) {
                Some(chord) => bindings.push((chord, command)),
                None => warn!(command = command.name(), chord = %raw, "invalid key binding"),
            }
        }
        let suppressed = config
            .suppressed
            .iter()
            .filter_map(|raw| {
                let chord = parse_key_chord(raw);
                if chord.is_none() {
                    warn!(chord = %raw, "invalid suppressed chord");
                }
                chord
            })
            .collect();
        Self {
            bindings,
            suppressed,
        }
    }

    pub fn command_for(&self, event: KeyEvent) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(chord, _)| matches_chord(event, chord))
            .map(|(_, command)| *command)
    }

    pub fn is_suppressed(&self, event: KeyEvent) -> bool {
        self.suppressed
            .iter()
            .any(|chord| matches_chord(event, chord))
    }

    /// First chord bound to `command`, for help text.
    pub fn chord_for(&self, command: Command) -> Option<&KeyChord> {
        self.bindings
            .iter()
            .find(|(_, bound)| *bound == command)
            .map(|(chord, _)| chord)
    }
}

/// Human-readable chord, e.g. `Ctrl+S`.
pub fn chord_label(chord: &KeyChord) -> String {
    let mut parts: Vec<String> = Vec::new();
    if chord.ctrl {
        parts.push("Ctrl".to_string());
    }
    if chord.alt {
        parts.push("Alt".to_string());
    }
    if chord.shift {
        parts.push("Shift".to_string());
    }
    if chord.meta {
        parts.push("Meta".to_string());
    }
    let key = match chord.key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(ch) => ch.to_ascii_uppercase().to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    };
    parts.push(key);
    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::{chord_label, matches_chord, parse_key_chord, Command, Keymap};
    use crate::config::KeymapConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn parse_key_chord_accepts_named_keys() {
        let chord = parse_key_chord("ctrl+pageup").expect("chord");
        assert_eq!(chord.key, KeyCode::PageUp);
        assert!(chord.ctrl);

        let chord = parse_key_chord("Ctrl+Delete").expect("chord");
        assert_eq!(chord.key, KeyCode::Delete);
    }

    #[test]
    fn parse_key_chord_rejects_two_keys_or_none() {
        assert!(parse_key_chord("ctrl+a+b").is_none());
        assert!(parse_key_chord("ctrl").is_none());
        assert!(parse_key_chord("").is_none());
        assert!(parse_key_chord("ctrl+bogus").is_none());
    }

    #[test]
    fn matches_chord_ignores_letter_case() {
        let chord = parse_key_chord("ctrl+s").expect("chord");
        assert!(matches_chord(ctrl(KeyCode::Char('s')), &chord));
        assert!(matches_chord(ctrl(KeyCode::Char('S')), &chord));
        assert!(!matches_chord(
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE),
            &chord
        ));
    }

    #[test]
    fn default_keymap_resolves_commands() {
        let keymap = Keymap::from_config(&KeymapConfig::default());

        assert_eq!(
            keymap.command_for(ctrl(KeyCode::Char('s'))),
            Some(Command::Save)
        );
        assert_eq!(
            keymap.command_for(ctrl(KeyCode::PageDown)),
            Some(Command::NextTab)
        );
        assert_eq!(
            keymap.command_for(ctrl(KeyCode::Delete)),
            Some(Command::Delete)
        );
        assert!(keymap.is_suppressed(ctrl(KeyCode::Char('h'))));
        assert!(keymap.command_for(ctrl(KeyCode::Char('h'))).is_none());
    }

    #[test]
    fn invalid_binding_is_dropped() {
        let config = KeymapConfig {
            save: "ctrl+nonsense".to_string(),
            ..KeymapConfig::default()
        };
        let keymap = Keymap::from_config(&config);

        assert!(keymap.chord_for(Command::Save).is_none());
        assert!(keymap.chord_for(Command::Quit).is_some());
    }

    #[test]
    fn labels_are_readable() {
        let chord = parse_key_chord("ctrl+pagedown").expect("chord");
        assert_eq!(chord_label(&chord), "Ctrl+PgDn");
        let chord = parse_key_chord("ctrl+t").expect("chord");
        assert_eq!(chord_label(&chord), "Ctrl+T");
    }
}
