use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use quest_core::config::SequencerConfig;
use quest_core::{Driver, Game, InputEvent, OutputEvent, ProcessRegistry, Renderer, SceneManager};

fn make_script(scenes: u32) -> String {
    let mut buf = String::with_capacity(scenes as usize * 120);
    buf.push_str("[game]\nid = \"bench\"\ntitle = \"Bench\"\nstart = 1\n");
    for i in 1..=scenes {
        buf.push_str(&format!("\n[[scenes]]\nid = {i}\n"));
        match i % 4 {
            0 if i < scenes => buf.push_str(&format!(
                "lines = [{{ text = \"pick {i}\" }}]\nchoices = [{{ label = \"a\", next = {n} }}, {{ label = \"b\", next = {n} }}]\n",
                n = i + 1,
            )),
            1 => buf.push_str(&format!(
                "background = \"bg{i}.png\"\nlines = [{{ speaker = \"ch1\", text = \"dialogue number {i}\" }}, {{ text = \"narration {i}\" }}]\n"
            )),
            2 => buf.push_str(&format!(
                "lines = [{{ speaker = \"ch2\", text = \"a somewhat longer line of dialogue for scene {i}\" }}]\n"
            )),
            _ => {}
        }
        if i < scenes && i % 4 != 0 {
            buf.push_str(&format!("next = {}\n", i + 1));
        }
    }
    buf
}

fn make_game(scenes: u32) -> Game {
    let mut manager = SceneManager::new();
    manager.load_str("bench", &make_script(scenes)).unwrap();
    let config = SequencerConfig { char_delay_ms: 1, line_break: "\n".into(), toast_ms: 10 };
    Game::new(manager.finish().unwrap(), ProcessRegistry::new(), config).unwrap()
}

struct NullRenderer;
impl Renderer for NullRenderer {
    fn render(&mut self, out: &OutputEvent) -> Option<InputEvent> {
        match out {
            OutputEvent::ShowChoices { .. } => Some(InputEvent::ChoiceMade { index: 0 }),
            OutputEvent::LineComplete => Some(InputEvent::Tap),
            _ => None,
        }
    }
}

fn bench_sequencer(c: &mut Criterion) {
    const SCENES: u32 = 2_000;
    let mut group = c.benchmark_group("sequencer");
    group.sample_size(10);

    group.bench_function("play 2k scenes", |b| {
        b.iter_batched(|| make_game(SCENES),
        |game| {
            let mut drv = Driver::new(&game, game.default_sequencer(), NullRenderer);
            drv.run().unwrap();
        },
        BatchSize::SmallInput);
    });
    group.finish();
}

criterion_group!(benches, bench_sequencer);
criterion_main!(benches);
