use super::{load_config, local_config_path, user_config_path, Config};
use crate::test_utils::{env_lock, EnvVarGuard};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create config dir");
    }
    fs::write(path, contents).expect("write config");
}

struct IsolatedHome {
    _home: TempDir,
    _config_home: TempDir,
    _home_guard: EnvVarGuard,
    _config_guard: EnvVarGuard,
}

fn isolated_home() -> IsolatedHome {
    let home = TempDir::new().expect("temp home");
    let config_home = TempDir::new().expect("temp config");
    let home_guard = EnvVarGuard::set("HOME", home.path());
    let config_guard = EnvVarGuard::set("XDG_CONFIG_HOME", config_home.path());
    IsolatedHome {
        _home: home,
        _config_home: config_home,
        _home_guard: home_guard,
        _config_guard: config_guard,
    }
}

#[test]
fn load_config_uses_defaults_when_empty() {
    let _guard = env_lock();
    let _home = isolated_home();

    let cwd = TempDir::new().expect("temp cwd");
    let config = load_config(cwd.path(), None);

    assert_eq!(config, Config::default());
    assert_eq!(config.keymap.save, "ctrl+s");
    assert_eq!(config.keymap.next_tab, "ctrl+pagedown");
    assert_eq!(config.keymap.suppressed.len(), 3);
    assert_eq!(config.storage.notes_dir, Path::new("data"));
    assert_eq!(config.storage.extension, "txt");
    assert_eq!(config.storage.session_path(), Path::new("data/session.toml"));
    assert_eq!(config.storage.quotes_path(), Path::new("data/quotes.txt"));
    assert_eq!(
        config.timer.presets,
        vec![
            Duration::from_secs(30),
            Duration::from_secs(180),
            Duration::from_secs(420),
            Duration::from_secs(660),
        ]
    );
    assert_eq!(config.timer.restart_window, Duration::from_secs(2));
    assert_eq!(config.quotes.reminder_after, 3);
    assert_eq!(config.quotes.window, Duration::from_secs(900));
    assert_eq!(config.log.level, "info");
    assert!(config.log.path.is_none());
}

#[test]
fn load_config_merges_user_and_local() {
    let _guard = env_lock();
    let _home = isolated_home();

    let user_path = user_config_path().expect("user config path");
    write_config(
        &user_path,
        r#"
[keymap]
save = "ctrl+x"
quit = "ctrl+e"

[storage]
notes_dir = "user-notes"
extension = ".md"

[timer]
presets = [60, 120]
"#,
    );

    let cwd = TempDir::new().expect("temp cwd");
    write_config(
        &local_config_path(cwd.path()),
        r#"
[keymap]
save = "ctrl+y"

[storage]
notes_dir = "local-notes"

[quotes]
reminderAfter = 5
"#,
    );

    let config = load_config(cwd.path(), None);

    assert_eq!(config.keymap.save, "ctrl+y");
    assert_eq!(config.keymap.quit, "ctrl+e");
    assert_eq!(config.keymap.open, "ctrl+o");
    assert_eq!(config.storage.notes_dir, Path::new("local-notes"));
    assert_eq!(config.storage.extension, "md");
    assert_eq!(
        config.storage.session_path(),
        Path::new("local-notes/session.toml")
    );
    assert_eq!(
        config.timer.presets,
        vec![Duration::from_secs(60), Duration::from_secs(120)]
    );
    assert_eq!(config.quotes.reminder_after, 5);
}

#[test]
fn explicit_config_file_wins() {
    let _guard = env_lock();
    let _home = isolated_home();

    let cwd = TempDir::new().expect("temp cwd");
    write_config(
        &local_config_path(cwd.path()),
        "[timer]\nrestart_window_ms = 1500\n",
    );
    let extra = cwd.path().join("extra.toml");
    write_config(
        &extra,
        "[timer]\nrestart_window_ms = 500\n\n[log]\npath = \"/tmp/n.log\"\n",
    );

    let config = load_config(cwd.path(), Some(&extra));

    assert_eq!(config.timer.restart_window, Duration::from_millis(500));
    assert_eq!(config.log.path.as_deref(), Some(Path::new("/tmp/n.log")));
}

#[test]
fn unparsable_config_is_ignored() {
    let _guard = env_lock();
    let _home = isolated_home();

    let cwd = TempDir::new().expect("temp cwd");
    write_config(&local_config_path(cwd.path()), "[keymap\nsave = ");

    let config = load_config(cwd.path(), None);

    assert_eq!(config, Config::default());
}

#[test]
fn zero_presets_fall_back_to_defaults() {
    let _guard = env_lock();
    let _home = isolated_home();

    let cwd = TempDir::new().expect("temp cwd");
    write_config(&local_config_path(cwd.path()), "[timer]\npresets = [0]\n");

    let config = load_config(cwd.path(), None);

    assert_eq!(config.timer.presets.len(), 4);
}
