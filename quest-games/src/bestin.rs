//! BESTIN care room: five quiz pages that restore a smart home, then results and feedback.

use quest_core::config::SequencerConfig;
use quest_core::process::ms;
use quest_core::puzzle::rules::{curtain, curtain_lux, predicted_co2, ventilation_passes, voice_command, CurtainVerdict};
use quest_core::puzzle::{ConfirmOnly, Gate, ResultsScreen};
use quest_core::{ProcessRegistry, SceneId};

use crate::stage::{ChoiceStage, Intro, Lock, SliderStage, TextStage, Verdicts};

pub const ID: &str = "bestin_care_room";
pub const SCRIPT: &str = include_str!("../content/bestin_care_room.toml");

pub const PASS: &str = "합격";
pub const RETRY: &str = "재도전";

pub fn defaults() -> SequencerConfig {
    SequencerConfig::default()
}

pub fn registry() -> ProcessRegistry {
    let mut r = ProcessRegistry::new();
    r.register("intro", || Intro::new("BESTIN CARE ROOM", ms(1200), SceneId(2)))
        .register("guide", || ConfirmOnly::new("안내", SceneId(3)).label("퍼즐 시작"))
        .register("p1", || {
            ChoiceStage::new("p1", "퍼즐 1: 출입 기록", Gate::Answered, SceneId(4))
                .body("오늘의 출입 기록 중 수상한 기록을 찾으세요.")
                .option("a_face", "사용자 A - 얼굴 인식")
                .option("a_phone", "사용자 A - 스마트폰 인증")
                .option("b_finger", "사용자 B - 지문")
                .option("delivery", "택배 기사 - 임시 출입 권한")
                .correct("a_phone", Verdicts::new(
                    "정답입니다!",
                    "틀렸습니다. 사용자 A의 스마트폰 인증 기록이 의심됩니다.",
                ))
                .lock(Lock::OnAnswer)
        })
        .register("p2", || {
            SliderStage::new("p2", "퍼즐 2: 환기 시스템", Gate::Passed, SceneId(5))
                .body("CO₂ 농도 1200ppm. 환기 시간을 정하세요.")
                .range(0, 10, 1)
                .readout(|minutes| vec![
                    ("환기 시간", format!("{minutes}분")),
                    ("예상 CO₂", format!("{}ppm", predicted_co2(minutes))),
                ])
                .rule(
                    |minutes| if ventilation_passes(minutes) {
                        Ok(())
                    } else {
                        Err("CO₂ 수치가 아직 높습니다. 조금 더 환기해 주세요.".to_string())
                    },
                    "정답입니다! 환기를 3분 이상 유지하세요.",
                )
        })
        .register("p3", || {
            SliderStage::new("p3", "퍼즐 3: 전동 커튼", Gate::Passed, SceneId(6))
                .body("적절한 빛이 들어오도록 커튼을 여세요.")
                .range(0, 100, 5)
                .readout(|percent| vec![
                    ("커튼", format!("{percent}%")),
                    ("조도", format!("{}lx", curtain_lux(percent))),
                ])
                .rule(
                    |percent| match curtain(percent) {
                        CurtainVerdict::Pass => Ok(()),
                        CurtainVerdict::TooDark => Err("조도가 부족합니다. 조금 더 열어주세요.".to_string()),
                        CurtainVerdict::TooBright => Err("역광이 너무 강합니다. 덜 열어주세요.".to_string()),
                    },
                    "정답입니다! 적절한 빛이 들어왔습니다.",
                )
        })
        .register("p4", || {
            ChoiceStage::new("p4", "퍼즐 4: 정비 기록", Gate::Answered, SceneId(7))
                .body("가장 마지막으로 교체한 부품은 무엇일까요?")
                .option("filter", "에어컨 필터")
                .option("boiler", "보일러 필터")
                .option("purifier", "공기청정기 필터")
                .option("hood", "주방 후드 필터")
                .correct("filter", Verdicts::new(
                    "정답입니다! 마지막으로 교체한 것은 에어컨 필터입니다.",
                    "틀렸습니다. 정답은 에어컨 필터입니다.",
                ))
                .lock(Lock::OnAnswer)
        })
        .register("p5", || {
            TextStage::new("p5", "퍼즐 5: AI 복구", Gate::Answered, SceneId(8))
                .body("AI 집사를 깨우는 음성 명령을 입력하세요.")
                .placeholder("음성 명령")
                .rule(voice_command, Verdicts::new(
                    "정답입니다! AI 집사가 복구되었습니다.",
                    "명령이 올바르지 않습니다. 다시 입력해 주세요.",
                ))
                .lock(Lock::OnAnswer)
        })
        .register("results", || ResultsScreen::new("결과", PASS, RETRY).then(SceneId(9)))
        .register("summary", || ResultsScreen::new("요약", PASS, RETRY).with_rating(5));
    r
}
