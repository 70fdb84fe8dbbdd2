use std::time::Duration;
use quest_core::config::SequencerConfig;
use quest_core::executor::cursor::Phase;
use quest_core::process::ms;
use quest_core::{
    Advance, Game, InputEvent, Line, Outcome, OutputEvent, Process, ProcessCx, ProcessRegistry,
    PuzzleInput, Scene, SceneId, SceneManager, SequencerError, Session,
};

const SCRIPT: &str = r#"
[game]
id = "test"
title = "Test"
start = 1
targets = [5]

[[missions]]
key = "m1"
label = "Mission one"

[[scenes]]
id = 1
background = "bg/one.png"
lines = [
    { speaker = "A", portrait = "a.png", text = "hi" },
    { text = "a\nb" },
]
next = 2

[[scenes]]
id = 2
lines = [{ text = "pick" }]
choices = [
    { label = "left", next = 3, effect = { set_flag = { key = "left", value = true } } },
    { label = "right", next = 4, effect = { play_music = { path = "bgm.ogg" } } },
]

[[scenes]]
id = 3
process = "panel"

[[scenes]]
id = 4
lines = [{ text = "end" }]

[[scenes]]
id = 5
lines = [{ text = "after" }]

[[scenes]]
id = 6
next = 4
"#;

#[derive(Default)]
struct Panel;

impl Process for Panel {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        cx.schedule(ms(100), 1);
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Pick(id) if id == "go" => {
                cx.pass("m1");
                Outcome::Splice(Scene::transient(vec![Line::narration("reward")], SceneId(5)))
            }
            PuzzleInput::Pick(id) if id == "jump" => Outcome::Goto(SceneId(5)),
            PuzzleInput::Pick(id) if id == "lost" => Outcome::Goto(SceneId(42)),
            PuzzleInput::Pick(_) => {
                cx.toast("nope");
                Outcome::Stay
            }
            _ => Outcome::Stay,
        }
    }

    fn on_timer(&mut self, cx: &mut ProcessCx<'_>, _tag: u32) -> Outcome {
        cx.session.set_flag("fired", true);
        Outcome::Stay
    }
}

fn config() -> SequencerConfig {
    SequencerConfig { char_delay_ms: 10, line_break: "<br>".into(), toast_ms: 100 }
}

fn game() -> Game {
    let mut manager = SceneManager::new();
    manager.load_str("test", SCRIPT).unwrap();
    let graph = manager.finish().unwrap();
    let mut registry = ProcessRegistry::new();
    registry.register("panel", Panel::default);
    Game::new(graph, registry, config()).unwrap()
}

fn drain_all(seq: &mut quest_core::Sequencer, session: &mut Session) -> Vec<OutputEvent> {
    seq.run_timers(session, Duration::from_secs(60)).unwrap();
    session.drain()
}

fn count(events: &[OutputEvent], ev: &OutputEvent) -> usize {
    events.iter().filter(|e| *e == ev).count()
}

#[test]
fn reveals_one_character_per_tick() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.start(&mut session).unwrap();

    let events = session.drain();
    assert!(events.contains(&OutputEvent::SetBackground { image: "bg/one.png".into() }));
    assert!(events.contains(&OutputEvent::ShowLine { speaker: Some("A".into()), portrait: Some("a.png".into()) }));
    assert_eq!(seq.phase(), Phase::Typing);
    assert_eq!(seq.display_text(), "h");

    seq.tick(&mut session, ms(10)).unwrap();
    assert_eq!(seq.display_text(), "hi");
    assert_eq!(seq.phase(), Phase::WaitingForTap);
    let events = session.drain();
    assert_eq!(count(&events, &OutputEvent::LineComplete), 1);
    assert_eq!(seq.next_deadline(), None);
}

#[test]
fn skip_renders_full_text_and_completes_once() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.start(&mut session).unwrap();
    seq.tick(&mut session, ms(10)).unwrap();
    assert_eq!(seq.advance(&mut session).unwrap(), Advance::Advanced);
    session.drain();

    assert_eq!(seq.phase(), Phase::Typing);
    assert_eq!(seq.advance(&mut session).unwrap(), Advance::Skipped);
    assert_eq!(seq.display_text(), "a<br>b");
    assert_eq!(seq.phase(), Phase::WaitingForTap);
    assert_eq!(seq.cursor().line_index, 1);

    // the cancelled step never fires a second completion
    let events = drain_all(&mut seq, &mut session);
    assert_eq!(count(&events, &OutputEvent::LineComplete), 1);
    assert_eq!(seq.pending_timers(), 0);
}

#[test]
fn tap_on_terminal_line_is_a_no_op() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(4)).unwrap();
    let events = drain_all(&mut seq, &mut session);
    assert_eq!(count(&events, &OutputEvent::End), 1);
    assert!(seq.is_finished());

    let before = seq.cursor().clone();
    for _ in 0..3 {
        assert_eq!(seq.advance(&mut session).unwrap(), Advance::Terminal);
    }
    assert_eq!(session.pending_events(), 0);
    assert_eq!(seq.cursor(), &before);
}

#[test]
fn unknown_scene_leaves_cursor_alone() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(4)).unwrap();
    drain_all(&mut seq, &mut session);

    let before = seq.cursor().clone();
    let err = seq.show_scene(&mut session, SceneId(99)).unwrap_err();
    assert_eq!(err, SequencerError::UnknownScene(SceneId(99)));
    assert_eq!(seq.cursor(), &before);
    assert_eq!(session.pending_events(), 0);
}

#[test]
fn choices_apply_effects_and_branch() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();

    seq.show_scene(&mut session, SceneId(2)).unwrap();
    assert_eq!(seq.select_choice(&mut session, 0), Err(SequencerError::NotShowingChoices));
    drain_all(&mut seq, &mut session);

    seq.advance(&mut session).unwrap();
    assert_eq!(seq.phase(), Phase::ShowingChoices);
    let events = session.drain();
    assert!(events.contains(&OutputEvent::ShowChoices { options: vec!["left".into(), "right".into()] }));

    assert_eq!(
        seq.select_choice(&mut session, 5),
        Err(SequencerError::NoSuchChoice { index: 5, available: 2 })
    );
    seq.feed(&mut session, InputEvent::ChoiceMade { index: 0 }).unwrap();
    assert!(session.flag("left"));
    assert_eq!(seq.current_id(), Some(SceneId(3)));
    assert_eq!(seq.phase(), Phase::InProcess);
    assert!(seq.has_process());
}

#[test]
fn music_choice_emits_event() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(2)).unwrap();
    drain_all(&mut seq, &mut session);
    seq.advance(&mut session).unwrap();

    seq.select_choice(&mut session, 1).unwrap();
    let events = session.drain();
    assert!(events.contains(&OutputEvent::PlayMusic { path: "bgm.ogg".into() }));
    assert_eq!(seq.current_id(), Some(SceneId(4)));
}

#[test]
fn spliced_scene_runs_like_a_declared_one() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(3)).unwrap();
    session.drain();

    seq.feed(&mut session, InputEvent::Puzzle(PuzzleInput::Pick("go".into()))).unwrap();
    assert!(session.missions.passed("m1"));
    assert_eq!(seq.current_id(), None);
    assert!(!seq.has_process());

    drain_all(&mut seq, &mut session);
    assert_eq!(seq.display_text(), "reward");
    seq.advance(&mut session).unwrap();
    assert_eq!(seq.current_id(), Some(SceneId(5)));
    assert!(!session.flag("fired"));
}

#[test]
fn scene_timers_die_with_the_scene() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();

    seq.show_scene(&mut session, SceneId(3)).unwrap();
    seq.tick(&mut session, ms(50)).unwrap();
    seq.feed(&mut session, InputEvent::Puzzle(PuzzleInput::Pick("jump".into()))).unwrap();
    drain_all(&mut seq, &mut session);
    assert!(!session.flag("fired"));

    // left alone, the same timer does fire
    seq.show_scene(&mut session, SceneId(3)).unwrap();
    seq.tick(&mut session, ms(100)).unwrap();
    assert!(session.flag("fired"));
}

#[test]
fn newer_toast_replaces_older() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();

    seq.toast(&mut session, "one");
    seq.tick(&mut session, ms(50)).unwrap();
    seq.toast(&mut session, "two");
    seq.tick(&mut session, ms(60)).unwrap();
    assert_eq!(session.toast(), Some("two"));
    assert_eq!(count(&session.drain(), &OutputEvent::HideToast), 0);

    seq.tick(&mut session, ms(50)).unwrap();
    assert_eq!(session.toast(), None);
    assert_eq!(count(&session.drain(), &OutputEvent::HideToast), 1);
}

#[test]
fn toast_outlives_scene_change() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();

    seq.show_scene(&mut session, SceneId(3)).unwrap();
    seq.feed(&mut session, InputEvent::Puzzle(PuzzleInput::Pick("wrong".into()))).unwrap();
    assert_eq!(session.toast(), Some("nope"));
    seq.feed(&mut session, InputEvent::Puzzle(PuzzleInput::Pick("jump".into()))).unwrap();
    let events = drain_all(&mut seq, &mut session);
    assert_eq!(count(&events, &OutputEvent::HideToast), 1);
}

#[test]
fn empty_scene_continues_to_successor() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(6)).unwrap();
    assert_eq!(seq.current_id(), Some(SceneId(4)));
    assert_eq!(seq.transitions(), 2);
}

#[test]
fn taps_are_ignored_while_a_process_runs() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(3)).unwrap();
    assert_eq!(seq.advance(&mut session).unwrap(), Advance::Ignored);
    assert_eq!(seq.phase(), Phase::InProcess);
}

#[test]
fn game_rejects_unregistered_process() {
    let mut manager = SceneManager::new();
    manager.load_str("test", SCRIPT).unwrap();
    let graph = manager.finish().unwrap();
    let err = Game::new(graph, ProcessRegistry::new(), config()).err().unwrap();
    assert!(err.to_string().contains("panel"));
}

#[test]
fn two_sessions_do_not_share_state() {
    let game = game();
    let mut a = game.session();
    let mut b = game.session();
    let mut seq_a = game.default_sequencer();
    let mut seq_b = game.default_sequencer();

    seq_a.show_scene(&mut a, SceneId(3)).unwrap();
    seq_b.show_scene(&mut b, SceneId(3)).unwrap();
    seq_a.feed(&mut a, InputEvent::Puzzle(PuzzleInput::Pick("go".into()))).unwrap();
    assert!(a.missions.passed("m1"));
    assert!(!b.missions.passed("m1"));
}

#[test]
fn process_survives_a_jump_to_an_unknown_scene() {
    let game = game();
    let mut session = game.session();
    let mut seq = game.default_sequencer();
    seq.show_scene(&mut session, SceneId(3)).unwrap();

    let err = seq.feed(&mut session, InputEvent::Puzzle(PuzzleInput::Pick("lost".into()))).err().unwrap();
    assert_eq!(err, SequencerError::UnknownScene(SceneId(42)));
    assert!(seq.has_process());
    assert_eq!(seq.current_id(), Some(SceneId(3)));

    seq.feed(&mut session, InputEvent::Puzzle(PuzzleInput::Pick("jump".into()))).unwrap();
    assert_eq!(seq.current_id(), Some(SceneId(5)));
}
