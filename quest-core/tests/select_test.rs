use std::time::Duration;
use quest_core::config::SequencerConfig;
use quest_core::event::{Control, OutputEvent, PromptOption, Tone};
use quest_core::process::ms;
use quest_core::puzzle::{ConfirmOnly, MultiSelectAll, NextButton, PickOne, ResultsScreen, TapThrough};
use quest_core::{
    Game, InputEvent, Line, Outcome, Process, ProcessCx, ProcessRegistry, PuzzleInput, SceneId,
    SceneManager, Sequencer, Session,
};

const SCRIPT: &str = r#"
[game]
id = "select"
title = "Select"
start = 1
targets = [2, 3, 4, 5, 6, 9]

[[missions]]
key = "pick"
label = "Pick"

[[missions]]
key = "gate"
label = "Gate"

[[scenes]]
id = 1
process = "pick"

[[scenes]]
id = 2
process = "multi"

[[scenes]]
id = 3
process = "confirm"

[[scenes]]
id = 4
process = "tap"

[[scenes]]
id = 5
process = "gate"

[[scenes]]
id = 6
process = "results"

[[scenes]]
id = 7
process = "dynamic"

[[scenes]]
id = 9
lines = [{ text = "done" }]
"#;

struct Gated(NextButton);

impl Process for Gated {
    fn start(&mut self, _cx: &mut ProcessCx<'_>) -> Outcome {
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Value(v) => {
                self.0.judge(cx, "gate", v > 0);
                Outcome::Stay
            }
            PuzzleInput::Next => self.0.press(),
            _ => Outcome::Stay,
        }
    }
}

fn offered(session: &Session) -> Vec<PromptOption> {
    let mut options = vec![PromptOption::new("x", "X")];
    if session.flag("more") {
        options.push(PromptOption::new("y", "Y"));
    }
    options
}

fn game() -> Game {
    let mut manager = SceneManager::new();
    manager.load_str("select", SCRIPT).unwrap();
    let mut r = ProcessRegistry::new();
    r.register("pick", || {
        PickOne::new("Which?", SceneId(2))
            .option("a", "A")
            .option("b", "B")
            .option("c", "C")
            .correct("a")
            .wrong("b", "not b")
            .otherwise("try again")
            .count_misses("misses")
            .mission("pick")
            .reward_with(|s, _| vec![Line::narration(format!("misses: {}", s.counter("misses")))])
    });
    r.register("multi", || {
        MultiSelectAll::new("All", SceneId(3))
            .item("one", "One")
            .item("two", "Two")
            .incomplete("select everything")
    });
    r.register("confirm", || ConfirmOnly::new("OK?", SceneId(4)));
    r.register("tap", || {
        TapThrough::new("Intruder", SceneId(5))
            .after(ms(300))
            .on_reveal("intruder")
            .on_tap("alert")
            .reward(Line::said("Boss", "stay calm"))
    });
    r.register("gate", || Gated(NextButton::passed(SceneId(6))));
    r.register("results", || ResultsScreen::new("Results", "pass", "retry").with_rating(5).then(SceneId(9)));
    r.register("dynamic", || PickOne::new("Dyn", SceneId(9)).options_with(offered).correct("y"));
    let defaults = SequencerConfig { char_delay_ms: 5, line_break: "\n".into(), toast_ms: 100 };
    Game::new(manager.finish().unwrap(), r, defaults).unwrap()
}

fn input(seq: &mut Sequencer, session: &mut Session, p: PuzzleInput) {
    seq.feed(session, InputEvent::Puzzle(p)).unwrap();
}

fn finish_lines(seq: &mut Sequencer, session: &mut Session) {
    seq.run_timers(session, Duration::from_secs(10)).unwrap();
    while seq.advance(session).unwrap() == quest_core::Advance::Advanced {
        seq.run_timers(session, Duration::from_secs(10)).unwrap();
        if seq.has_process() {
            break;
        }
    }
}

#[test]
fn pick_one_toasts_wrong_and_rewards_right() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.start(&mut session).unwrap();

    let events = session.drain();
    assert!(events.iter().any(|e| matches!(e, OutputEvent::Prompt(p) if matches!(&p.control, Control::Options(o) if o.len() == 3))));
    assert!(events.contains(&OutputEvent::HideDialogue));

    input(&mut seq, &mut session, PuzzleInput::Pick("b".into()));
    assert_eq!(session.toast(), Some("not b"));
    input(&mut seq, &mut session, PuzzleInput::Pick("c".into()));
    assert_eq!(session.toast(), Some("try again"));
    input(&mut seq, &mut session, PuzzleInput::Pick("zzz".into()));
    assert_eq!(session.counter("misses"), 2);

    input(&mut seq, &mut session, PuzzleInput::Pick("a".into()));
    assert!(session.missions.passed("pick"));
    seq.run_timers(&mut session, Duration::from_secs(1)).unwrap();
    assert_eq!(seq.display_text(), "misses: 2");
    seq.advance(&mut session).unwrap();
    assert_eq!(seq.current_id(), Some(SceneId(2)));
}

#[test]
fn multi_select_requires_every_item() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(2)).unwrap();

    input(&mut seq, &mut session, PuzzleInput::Toggle("one".into()));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    assert_eq!(session.toast(), Some("select everything"));
    assert_eq!(seq.current_id(), Some(SceneId(2)));

    input(&mut seq, &mut session, PuzzleInput::Toggle("two".into()));
    input(&mut seq, &mut session, PuzzleInput::Toggle("two".into()));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    assert_eq!(seq.current_id(), Some(SceneId(2)));

    input(&mut seq, &mut session, PuzzleInput::Toggle("two".into()));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    assert_eq!(seq.current_id(), Some(SceneId(3)));

    input(&mut seq, &mut session, PuzzleInput::Confirm);
    assert_eq!(seq.current_id(), Some(SceneId(4)));
}

#[test]
fn tap_through_waits_for_its_delay() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(4)).unwrap();
    session.drain();

    input(&mut seq, &mut session, PuzzleInput::Dismiss);
    assert_eq!(seq.current_id(), Some(SceneId(4)));

    seq.tick(&mut session, ms(300)).unwrap();
    let events = session.drain();
    assert!(events.contains(&OutputEvent::Effect { name: "intruder".into() }));

    input(&mut seq, &mut session, PuzzleInput::Dismiss);
    assert!(session.drain().contains(&OutputEvent::Effect { name: "alert".into() }));
    finish_lines(&mut seq, &mut session);
    assert_eq!(seq.current_id(), Some(SceneId(5)));
}

#[test]
fn gated_next_follows_last_evaluation() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(5)).unwrap();

    input(&mut seq, &mut session, PuzzleInput::Next);
    assert_eq!(seq.current_id(), Some(SceneId(5)));

    input(&mut seq, &mut session, PuzzleInput::Value(1));
    input(&mut seq, &mut session, PuzzleInput::Value(0));
    assert!(!session.missions.passed("gate"));
    input(&mut seq, &mut session, PuzzleInput::Next);
    assert_eq!(seq.current_id(), Some(SceneId(5)));

    input(&mut seq, &mut session, PuzzleInput::Value(2));
    let events = session.drain();
    assert!(events.contains(&OutputEvent::Enable { id: "next".into(), enabled: true }));
    input(&mut seq, &mut session, PuzzleInput::Next);
    assert_eq!(seq.current_id(), Some(SceneId(6)));
}

#[test]
fn results_screen_scores_and_rates() {
    let game = game();
    let mut session = game.session();
    session.record("pick", true);
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(6)).unwrap();

    let events = session.drain();
    let summary = events.iter().find_map(|e| match e {
        OutputEvent::Results(s) => Some(s.clone()),
        _ => None,
    }).unwrap();
    assert_eq!(summary.percent, 50);
    assert_eq!(summary.verdict, "retry");

    input(&mut seq, &mut session, PuzzleInput::Confirm);
    assert!(session.drain().contains(&OutputEvent::Message { tone: Tone::Error, text: "별점을 선택해주세요.".into() }));

    input(&mut seq, &mut session, PuzzleInput::Hover(4));
    input(&mut seq, &mut session, PuzzleInput::Leave);
    input(&mut seq, &mut session, PuzzleInput::Value(3));
    let events = session.drain();
    assert_eq!(events, vec![
        OutputEvent::Rating { value: 4, committed: false },
        OutputEvent::Rating { value: 0, committed: false },
        OutputEvent::Rating { value: 3, committed: true },
    ]);
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    assert!(session.drain().iter().any(|e| matches!(e, OutputEvent::Message { tone: Tone::Success, .. })));

    input(&mut seq, &mut session, PuzzleInput::Next);
    assert_eq!(seq.current_id(), Some(SceneId(9)));
}

#[test]
fn options_can_depend_on_the_session() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();

    seq.show_scene(&mut session, SceneId(7)).unwrap();
    input(&mut seq, &mut session, PuzzleInput::Pick("y".into()));
    assert_eq!(seq.current_id(), Some(SceneId(7)));

    session.set_flag("more", true);
    seq.show_scene(&mut session, SceneId(7)).unwrap();
    input(&mut seq, &mut session, PuzzleInput::Pick("y".into()));
    assert_eq!(seq.current_id(), Some(SceneId(9)));
}
