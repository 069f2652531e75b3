use super::{
    format_remaining, parse_duration, preset_label, Countdown, MenuOutcome, RestartOutcome,
    TickOutcome, TimerMachine, TimerState,
};
use crate::error::NoteError;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

const RESTART_WINDOW: Duration = Duration::from_secs(2);

fn secs(value: u64) -> Duration {
    Duration::from_secs(value)
}

fn machine() -> TimerMachine {
    TimerMachine::new(vec![secs(30), secs(180), secs(420), secs(660)], RESTART_WINDOW)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn parse_duration_accepts_seconds_and_minutes() {
    assert_eq!(parse_duration("90").expect("seconds"), secs(90));
    assert_eq!(parse_duration("2m").expect("minutes"), secs(120));
    assert_eq!(parse_duration(" 5M ").expect("upper case"), secs(300));
}

#[test]
fn parse_duration_rejects_everything_else() {
    for text in ["abc", "", "m", "1.5", "2 m", "2h", "-3", "0", "0m", "1m30"] {
        assert!(
            matches!(parse_duration(text), Err(NoteError::InvalidDuration(_))),
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn invalid_custom_duration_stays_configuring() {
    let mut timer = machine();
    let now = Instant::now();
    assert!(timer.open_menu());

    let result = timer.submit_custom("abc", now);

    assert!(matches!(result, Err(NoteError::InvalidDuration(_))));
    assert!(timer.is_configuring());
}

#[test]
fn menu_navigation_and_preset_selection() {
    let mut timer = machine();
    let now = Instant::now();
    timer.open_menu();

    timer.menu_key(key(KeyCode::Down), now);
    timer.menu_key(key(KeyCode::Down), now);
    timer.menu_key(key(KeyCode::Up), now);
    assert!(matches!(
        timer.state(),
        TimerState::Configuring { selected: 1, .. }
    ));

    let outcome = timer.menu_key(key(KeyCode::Enter), now);

    assert_eq!(outcome, MenuOutcome::Started(secs(180)));
    assert_eq!(
        timer.state(),
        &TimerState::Running(Countdown::start(now, secs(180)))
    );
}

#[test]
fn typing_digits_jumps_to_custom_field() {
    let mut timer = machine();
    let now = Instant::now();
    timer.open_menu();

    for ch in "2m".chars() {
        timer.menu_key(key(KeyCode::Char(ch)), now);
    }
    let outcome = timer.menu_key(key(KeyCode::Enter), now);

    assert_eq!(outcome, MenuOutcome::Started(secs(120)));
}

#[test]
fn invalid_custom_entry_through_keys_keeps_menu_open() {
    let mut timer = machine();
    let now = Instant::now();
    timer.open_menu();
    for _ in 0..4 {
        timer.menu_key(key(KeyCode::Down), now);
    }
    for ch in "abc".chars() {
        timer.menu_key(key(KeyCode::Char(ch)), now);
    }

    let outcome = timer.menu_key(key(KeyCode::Enter), now);

    assert_eq!(outcome, MenuOutcome::InvalidDuration("abc".to_string()));
    assert!(timer.is_configuring());
}

#[test]
fn escape_from_menu_returns_to_idle() {
    let mut timer = machine();
    timer.open_menu();

    let outcome = timer.menu_key(key(KeyCode::Esc), Instant::now());

    assert_eq!(outcome, MenuOutcome::Cancelled);
    assert_eq!(timer.state(), &TimerState::Idle);
}

#[test]
fn escape_from_menu_keeps_running_countdown() {
    let mut timer = machine();
    let now = Instant::now();
    timer.start(secs(90), now);
    timer.open_menu();

    timer.close_menu();

    assert_eq!(
        timer.state(),
        &TimerState::Running(Countdown::start(now, secs(90)))
    );
}

#[test]
fn restart_resets_deadline_and_double_press_stops() {
    let mut timer = machine();
    let t0 = Instant::now();
    timer.start(secs(90), t0);

    let t10 = t0 + secs(10);
    assert_eq!(timer.restart(t10), RestartOutcome::Restarted(secs(90)));
    assert_eq!(
        timer.state(),
        &TimerState::Running(Countdown::start(t10, secs(90)))
    );

    assert_eq!(timer.restart(t10 + secs(1)), RestartOutcome::Stopped);
    assert_eq!(timer.state(), &TimerState::Idle);
}

#[test]
fn restart_after_window_restarts_again() {
    let mut timer = machine();
    let t0 = Instant::now();
    timer.start(secs(90), t0);
    timer.restart(t0 + secs(10));

    let later = t0 + secs(12);
    assert_eq!(timer.restart(later), RestartOutcome::Restarted(secs(90)));
    assert_eq!(
        timer.state(),
        &TimerState::Running(Countdown::start(later, secs(90)))
    );
}

#[test]
fn tick_finishes_at_deadline_once() {
    let mut timer = machine();
    let t0 = Instant::now();
    timer.start(secs(30), t0);

    assert_eq!(timer.tick(t0 + secs(29)), TickOutcome::Unchanged);
    assert_eq!(timer.tick(t0 + secs(30)), TickOutcome::Expired);
    assert_eq!(timer.tick(t0 + secs(31)), TickOutcome::Unchanged);
    assert!(matches!(timer.state(), TimerState::Finished { .. }));

    let alert = timer.display(t0 + secs(31), secs(5)).expect("alert visible");
    assert!(alert.alert);
    assert!(timer.display(t0 + secs(40), secs(5)).is_none());
}

#[test]
fn countdown_behind_open_menu_still_expires() {
    let mut timer = machine();
    let t0 = Instant::now();
    timer.start(secs(30), t0);
    assert!(timer.open_menu());

    assert_eq!(timer.tick(t0 + secs(29)), TickOutcome::Unchanged);
    assert!(timer.is_configuring());
    assert_eq!(timer.tick(t0 + secs(35)), TickOutcome::Expired);

    assert_eq!(timer.state(), &TimerState::Finished { at: t0 + secs(35) });
    let alert = timer.display(t0 + secs(36), secs(5)).expect("alert visible");
    assert!(alert.alert);
    assert_eq!(timer.tick(t0 + secs(36)), TickOutcome::Unchanged);
}

#[test]
fn open_menu_without_countdown_never_expires() {
    let mut timer = machine();
    let t0 = Instant::now();
    assert!(timer.open_menu());

    assert_eq!(timer.tick(t0 + secs(3600)), TickOutcome::Unchanged);
    assert!(timer.is_configuring());
}

#[test]
fn finished_timer_restarts_or_reopens_menu() {
    let mut timer = machine();
    let t0 = Instant::now();
    timer.start(secs(30), t0);
    timer.tick(t0 + secs(30));

    assert_eq!(timer.restart(t0 + secs(31)), RestartOutcome::Restarted(secs(30)));

    timer.tick(t0 + secs(61));
    assert!(timer.open_menu());
    assert!(timer.is_configuring());
}

#[test]
fn restart_from_fresh_idle_has_nothing_to_restart() {
    let mut timer = machine();
    assert_eq!(timer.restart(Instant::now()), RestartOutcome::NothingToRestart);
    assert_eq!(timer.state(), &TimerState::Idle);
}

#[test]
fn starting_supersedes_previous_deadline() {
    let mut timer = machine();
    let t0 = Instant::now();
    timer.start(secs(660), t0);
    timer.open_menu();

    let outcome = timer.menu_key(key(KeyCode::Enter), t0 + secs(5));

    assert_eq!(outcome, MenuOutcome::Started(secs(30)));
    assert_eq!(
        timer.state(),
        &TimerState::Running(Countdown::start(t0 + secs(5), secs(30)))
    );
}

#[test]
fn display_formatting() {
    assert_eq!(format_remaining(secs(90)), "01:30");
    assert_eq!(format_remaining(Duration::from_millis(89_100)), "01:30");
    assert_eq!(format_remaining(Duration::ZERO), "00:00");
    assert_eq!(preset_label(secs(30)), "30s");
    assert_eq!(preset_label(secs(420)), "7m");
}
