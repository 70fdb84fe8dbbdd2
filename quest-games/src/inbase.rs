//! inbase Smart Puzzle Quest: six stages through one day at home.

use quest_core::config::SequencerConfig;
use quest_core::process::ms;
use quest_core::puzzle::rules::{butler_answer, door_password, PressOrder};
use quest_core::puzzle::{ConfirmOnly, Gate, ResultsScreen};
use quest_core::{ProcessRegistry, SceneId};

use crate::stage::{ChoiceStage, Intro, Lock, OrderStage, SliderStage, SlotStage, TextStage, Verdicts};

pub const ID: &str = "inbase_room";
pub const SCRIPT: &str = include_str!("../content/inbase_room.toml");

pub const MASTER: &str = "축하합니다! inbase와 함께 모든 퍼즐을 해결했습니다. 당신은 스마트홈 마스터입니다.";
pub const MISSED: &str = "몇 가지 퍼즐을 놓쳤습니다. 다시 도전하여 완벽한 하루를 만들어 보세요!";

/// Switch id, label and wattage.
pub const SWITCHES: [(&str, &str, u32); 4] = [
    ("tv", "TV", 50),
    ("speaker", "스피커", 30),
    ("stand", "스탠드", 10),
    ("purifier", "공기청정기", 20),
];

pub const SLEEP_ORDER: [&str; 3] = ["lock", "lights", "heat"];

pub fn defaults() -> SequencerConfig {
    SequencerConfig::default()
}

pub fn registry() -> ProcessRegistry {
    let mut r = ProcessRegistry::new();
    r.register("intro", || Intro::new("inbase", ms(1200), SceneId(2)))
        .register("guide", || ConfirmOnly::new("안내", SceneId(3)).label("탐험 시작"))
        .register("s1", || {
            TextStage::new("s1", "현관 보안 인증", Gate::Passed, SceneId(4))
                .body("가족의 기념일로 현관문을 여세요.")
                .placeholder("비밀번호 4자리")
                .exact_len(4)
                .rule(door_password, Verdicts::new(
                    "정답입니다! 현관문이 열립니다.",
                    "비밀번호가 틀렸습니다. 다시 확인하세요.",
                ))
                .lock(Lock::OnPass)
        })
        .register("s2", || {
            let mut stage = OrderStage::new(
                "s2",
                "거실 조명 문제",
                PressOrder::ascending(SWITCHES.iter().map(|(id, _, w)| (*id, *w))),
                Gate::Passed,
                SceneId(5),
            )
            .verdicts(Verdicts::new(
                "정답입니다! 거실 조명이 켜집니다.",
                "순서가 잘못되었습니다. 다시 시도해보세요.",
            ));
            for (id, label, watt) in SWITCHES {
                stage = stage.switch(id, &format!("{label} ({watt}W)"));
            }
            stage
        })
        .register("s3", || {
            SliderStage::new("s3", "아이 방 안전 확인", Gate::Passed, SceneId(6))
                .body("조명을 밝혀 아이의 상태를 확인하세요.")
                .range(0, 100, 5)
                .readout(|v| vec![
                    ("blur", format!("{:.1}px", 8.0 - f64::from(v) / 100.0 * 8.0)),
                    ("brightness", format!("{:.2}", 0.5 + f64::from(v) / 100.0 * 0.5)),
                ])
                .rule(
                    |v| if v > 80 { Ok(()) } else { Err(String::new()) },
                    "아이의 상태를 확인했습니다!",
                )
                .live()
                .lock(Lock::OnPass)
        })
        .register("s4", || {
            ChoiceStage::new("s4", "주방 가스 누출", Gate::Passed, SceneId(7))
                .body("가스 냄새가 납니다! 알맞은 기능을 고르세요.")
                .option("valve", "가스 차단")
                .option("cctv", "CCTV")
                .option("calendar", "일정")
                .option("report", "리포트")
                .correct("valve", Verdicts::new(
                    "정답입니다! 가스가 안전하게 차단되었습니다.",
                    "오답입니다. 밸브 모양을 찾아보세요.",
                ))
        })
        .register("s5", || {
            SlotStage::new("s5", "취침 모드 퍼즐", &SLEEP_ORDER, Gate::Passed, SceneId(8))
                .item("lock", "현관 잠금")
                .item("lights", "조명 소등")
                .item("heat", "보일러 절전")
                .verdicts(Verdicts::new(
                    "정답입니다! 취침 모드가 활성화되었습니다.",
                    "조합이 잘못되었습니다. 다시 배치해보세요.",
                ))
        })
        .register("s6", || {
            TextStage::new("s6", "AI 집사 시험", Gate::Passed, SceneId(9))
                .body("inbase가 지키는 가치와 그 주인공을 한 문장으로 답하세요.")
                .placeholder("정답 입력")
                .rule(butler_answer, Verdicts::new(
                    "훌륭합니다! 당신은 inbase의 진정한 의미를 이해했습니다.",
                    "정답이 아닙니다. 키워드를 조합해 보세요.",
                ))
        })
        .register("results", || ResultsScreen::new("결과", MASTER, MISSED).then(SceneId(10)))
        .register("summary", || ResultsScreen::new("요약", MASTER, MISSED).with_rating(5));
    r
}
