use quest_core::config::SequencerConfig;
use quest_core::event::{OutputEvent, Tone};
use quest_core::process::ms;
use quest_core::puzzle::rules::PressOrder;
use quest_core::puzzle::Gate;
use quest_core::{Game, InputEvent, ProcessRegistry, PuzzleInput, SceneId, SceneManager, Sequencer, Session};
use quest_games::stage::{ChoiceStage, Intro, Lock, OrderStage, SliderStage, SlotStage, TextStage, Verdicts};

const SCRIPT: &str = r#"
[game]
id = "stages"
title = "Stages"
start = 1

[[missions]]
key = "m"
label = "M"

[[scenes]]
id = 1
process = "choice"

[[scenes]]
id = 2
process = "slider"

[[scenes]]
id = 3
process = "text"

[[scenes]]
id = 4
process = "order"

[[scenes]]
id = 5
process = "slots"

[[scenes]]
id = 6
process = "intro"

[[scenes]]
id = 9
lines = [{ text = "done" }]
"#;

fn verdicts() -> Verdicts {
    Verdicts::new("yes", "no")
}

fn game() -> Game {
    let mut manager = SceneManager::new();
    manager.load_str("stages", SCRIPT).unwrap();
    let mut r = ProcessRegistry::new();
    r.register("choice", || {
        ChoiceStage::new("m", "Pick", Gate::Answered, SceneId(9))
            .option("a", "A")
            .option("b", "B")
            .correct("a", verdicts())
            .lock(Lock::OnAnswer)
    })
    .register("slider", || {
        SliderStage::new("m", "Slide", Gate::Passed, SceneId(9))
            .range(0, 10, 2)
            .readout(|v| vec![("value", v.to_string())])
            .rule(|v| if v >= 6 { Ok(()) } else { Err(format!("{v} is low")) }, "yes")
    })
    .register("text", || {
        TextStage::new("m", "Type", Gate::Passed, SceneId(9))
            .exact_len(2)
            .rule(|s| s == "ok", verdicts())
            .lock(Lock::OnPass)
    })
    .register("order", || {
        OrderStage::new("m", "Order", PressOrder::ascending([("big", 9), ("small", 1)]), Gate::Passed, SceneId(9))
            .switch("big", "Big")
            .switch("small", "Small")
            .verdicts(verdicts())
    })
    .register("slots", || {
        SlotStage::new("m", "Slots", &["x", "y"], Gate::Passed, SceneId(9))
            .item("x", "X")
            .item("y", "Y")
            .verdicts(verdicts())
    })
    .register("intro", || Intro::new("Intro", ms(500), SceneId(9)));
    let defaults = SequencerConfig { char_delay_ms: 5, line_break: "\n".into(), toast_ms: 100 };
    Game::new(manager.finish().unwrap(), r, defaults).unwrap()
}

fn at(scene: u32) -> (Sequencer, Session) {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(scene)).unwrap();
    session.drain();
    (seq, session)
}

fn input(seq: &mut Sequencer, session: &mut Session, p: PuzzleInput) {
    seq.feed(session, InputEvent::Puzzle(p)).unwrap();
}

fn messages(session: &mut Session) -> Vec<(Tone, String)> {
    session.drain().into_iter().filter_map(|e| match e {
        OutputEvent::Message { tone, text } => Some((tone, text)),
        _ => None,
    }).collect()
}

#[test]
fn answer_lock_keeps_the_first_verdict() {
    let (mut seq, mut session) = at(1);
    input(&mut seq, &mut session, PuzzleInput::Pick("b".into()));
    input(&mut seq, &mut session, PuzzleInput::Pick("a".into()));
    assert_eq!(messages(&mut session), vec![(Tone::Error, "no".to_string())]);
    assert!(!session.missions.passed("m"));
    input(&mut seq, &mut session, PuzzleInput::Next);
    assert_eq!(seq.current_id(), Some(SceneId(9)));
}

#[test]
fn slider_reports_the_rule_message_on_check() {
    let (mut seq, mut session) = at(2);
    input(&mut seq, &mut session, PuzzleInput::Pick("plus".into()));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    let events = session.drain();
    assert!(events.contains(&OutputEvent::Readout { label: "value".into(), value: "2".into() }));
    assert!(events.contains(&OutputEvent::Message { tone: Tone::Error, text: "2 is low".into() }));

    input(&mut seq, &mut session, PuzzleInput::Value(40));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    assert_eq!(messages(&mut session), vec![(Tone::Success, "yes".to_string())]);

    // passing gate closes again on a later failure
    input(&mut seq, &mut session, PuzzleInput::Value(0));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    input(&mut seq, &mut session, PuzzleInput::Next);
    assert_eq!(seq.current_id(), Some(SceneId(2)));
}

#[test]
fn text_stage_locks_after_a_pass() {
    let (mut seq, mut session) = at(3);
    input(&mut seq, &mut session, PuzzleInput::Text("o".into()));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    assert!(messages(&mut session).is_empty());

    input(&mut seq, &mut session, PuzzleInput::Text("no".into()));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    input(&mut seq, &mut session, PuzzleInput::Text("ok".into()));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    input(&mut seq, &mut session, PuzzleInput::Text("no".into()));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    assert_eq!(messages(&mut session), vec![
        (Tone::Error, "no".to_string()),
        (Tone::Success, "yes".to_string()),
    ]);
    assert!(session.missions.passed("m"));
    input(&mut seq, &mut session, PuzzleInput::Next);
    assert_eq!(seq.current_id(), Some(SceneId(9)));
}

#[test]
fn wrong_switch_starts_the_order_over() {
    let (mut seq, mut session) = at(4);
    input(&mut seq, &mut session, PuzzleInput::Pick("big".into()));
    assert_eq!(messages(&mut session), vec![(Tone::Error, "no".to_string())]);
    input(&mut seq, &mut session, PuzzleInput::Pick("small".into()));
    input(&mut seq, &mut session, PuzzleInput::Pick("reset".into()));
    input(&mut seq, &mut session, PuzzleInput::Pick("big".into()));
    assert!(!session.missions.passed("m"));
    input(&mut seq, &mut session, PuzzleInput::Pick("small".into()));
    input(&mut seq, &mut session, PuzzleInput::Pick("big".into()));
    assert!(session.missions.passed("m"));
}

#[test]
fn slots_judge_when_full_and_clear() {
    let (mut seq, mut session) = at(5);
    input(&mut seq, &mut session, PuzzleInput::Pick("y".into()));
    input(&mut seq, &mut session, PuzzleInput::Pick("y".into()));
    assert!(messages(&mut session).is_empty());
    input(&mut seq, &mut session, PuzzleInput::Pick("x".into()));
    assert_eq!(messages(&mut session), vec![(Tone::Error, "no".to_string())]);

    input(&mut seq, &mut session, PuzzleInput::Pick("clear".into()));
    assert!(session.drain().contains(&OutputEvent::Readout { label: "slots".into(), value: "_ → _".into() }));
    input(&mut seq, &mut session, PuzzleInput::Pick("x".into()));
    input(&mut seq, &mut session, PuzzleInput::Pick("y".into()));
    assert!(session.missions.passed("m"));
    input(&mut seq, &mut session, PuzzleInput::Next);
    assert_eq!(seq.current_id(), Some(SceneId(9)));
}

#[test]
fn intro_opens_once_and_waits_for_the_doors() {
    let (mut seq, mut session) = at(6);
    input(&mut seq, &mut session, PuzzleInput::Pick("start".into()));
    input(&mut seq, &mut session, PuzzleInput::Confirm);
    let doors = session.drain().into_iter()
        .filter(|e| *e == OutputEvent::Effect { name: "doors_open".into() })
        .count();
    assert_eq!(doors, 1);

    seq.tick(&mut session, ms(499)).unwrap();
    assert_eq!(seq.current_id(), Some(SceneId(6)));
    seq.tick(&mut session, ms(1)).unwrap();
    assert_eq!(seq.current_id(), Some(SceneId(9)));
}
