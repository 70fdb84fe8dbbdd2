use quest_core::puzzle::rules::*;

#[test]
fn ventilation_threshold() {
    assert!(ventilation_passes(3));
    assert_eq!(predicted_co2(3), 600);
    assert!(!ventilation_passes(2));
    assert_eq!(predicted_co2(2), 800);
    assert_eq!(predicted_co2(0), 1200);
    assert_eq!(predicted_co2(10), 0);
}

#[test]
fn curtain_window() {
    assert_eq!(curtain(40), CurtainVerdict::Pass);
    assert_eq!(curtain(50), CurtainVerdict::Pass);
    assert_eq!(curtain(39), CurtainVerdict::TooDark);
    assert_eq!(curtain(51), CurtainVerdict::TooBright);
    assert_eq!(curtain_lux(45), 315);
}

#[test]
fn door_password_is_exact() {
    assert!(door_password("0421"));
    assert!(!door_password("1234"));
    assert!(!door_password(" 0421"));
    assert!(!door_password("04210"));
}

#[test]
fn voice_command_ignores_spacing_and_punctuation() {
    assert!(voice_command("베스틴, 집을 열어줘!"));
    assert!(voice_command("  \"베스틴\" 집을열어줘 "));
    assert!(voice_command("헤이 베스틴 집을 열어줘 부탁해"));
    assert!(!voice_command("베스틴 문 열어줘"));
    assert!(!voice_command("집을 열어줘"));
    assert_eq!(normalize_voice("베스틴, 집을 열어줘!"), "베스틴집을열어줘");
}

#[test]
fn butler_needs_every_keyword_and_a_name() {
    assert!(butler_answer("보안 편의 안전 절약 AI"));
    assert!(butler_answer("절약안전편의보안 집사"));
    assert!(!butler_answer("보안 편의 안전 절약"));
    assert!(!butler_answer("보안 편의 안전 ai"));
}

#[test]
fn kelvin_scale_and_labels() {
    assert_eq!(kelvin(0), 5700);
    assert_eq!(kelvin(100), 3000);
    assert_eq!(kelvin(50), 4350);
    assert_eq!(kelvin_label(5700), "차가운 흰색");
    assert_eq!(kelvin_label(4350), "중성 백색");
    assert_eq!(kelvin_label(3600), "따뜻한 백색");
    assert_eq!(kelvin_label(kelvin(90)), SUNSET);
    assert_eq!(slider_for_kelvin(5700), 0);
    assert_eq!(slider_for_kelvin(3000), 100);
    assert_eq!(slider_for_kelvin(kelvin(37)), 37);
}

#[test]
fn press_order_resets_on_mistake() {
    let mut order = PressOrder::ascending([("tv", 50), ("speaker", 30), ("stand", 10), ("purifier", 20)]);
    assert_eq!(order.press("stand"), Press::Correct);
    assert_eq!(order.press("purifier"), Press::Correct);
    assert_eq!(order.press("tv"), Press::Wrong);
    assert!(order.pressed().is_empty());

    for id in ["stand", "purifier", "speaker"] {
        assert_eq!(order.press(id), Press::Correct);
    }
    assert_eq!(order.press("tv"), Press::Complete);
    assert!(order.is_complete());
}

#[test]
fn slot_board_judges_when_full() {
    let mut board = SlotBoard::new(vec!["lock".into(), "lights".into(), "heat".into()]);
    assert_eq!(board.place("lights"), None);
    assert_eq!(board.place("lights"), None);
    assert_eq!(board.place("lock"), None);
    assert_eq!(board.place("heat"), Some(false));

    board.clear();
    assert!(!board.is_full());
    board.place("lock");
    board.place("lights");
    assert_eq!(board.place("heat"), Some(true));
}
