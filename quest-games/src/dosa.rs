//! LABS QUEST: wake the four guardians hidden in a smart home, then find the intruder.
//!
//! Scene 3 is a hub the player leaves only by passing all four direction missions.
//! From scene 3 on the background follows the `elec`, `tiger` and `vent` flags.

use std::time::Duration;
use log::{debug, info};

use quest_core::config::SequencerConfig;
use quest_core::event::{Control, Prompt, PromptOption};
use quest_core::executor::timer::TimerHandle;
use quest_core::process::ms;
use quest_core::puzzle::rules::{kelvin, kelvin_label, slider_for_kelvin, KELVIN_COOL, SUNSET};
use quest_core::puzzle::{PickOne, TapThrough};
use quest_core::{Outcome, Process, ProcessCx, ProcessRegistry, PuzzleInput, Scene, SceneId, Session};

pub const ID: &str = "dosa";
pub const SCRIPT: &str = include_str!("../content/dosa.toml");

pub const PARKING_CODE: &str = "1345";
pub const DIRECTIONS: [&str; 4] = ["south", "north", "west", "east"];

const AMBIENT: &str = "ambient_kelvin";

const SUNSET_HOLD: u32 = 1;
const CLOSE_AND_CHECK: u32 = 2;
const COUNTDOWN: u32 = 3;
const FINALE: u32 = 4;

const HOLD: Duration = Duration::from_millis(1000);
const SETTLE: Duration = Duration::from_millis(1200);
const TICK: Duration = Duration::from_millis(1000);

pub fn defaults() -> SequencerConfig {
    SequencerConfig { char_delay_ms: 26, line_break: "\n".into(), toast_ms: 1800 }
}

pub fn registry() -> ProcessRegistry {
    let mut r = ProcessRegistry::new();
    r.register("living_room", LivingRoom::new)
        .register("gauge_complete", || {
            TapThrough::new("침입자", SceneId(5))
                .body("베란다를 통해 누군가 들어왔습니다! 화면을 터치하여 상황을 확인하세요.")
                .after(ms(3000))
                .on_reveal("intruder")
        })
        .register("infiltration", || {
            PickOne::new("침입자 찾기", SceneId(6))
                .body("스마트홈의 침입자가 누군지 알아내라.")
                .body("07:45 AM - 사용자 A (얼굴 인식)")
                .body("08:12 AM - 택배 기사 (임시 출입 권한)")
                .body("08:50 AM - 사용자 A (스마트폰 인증)")
                .body("12:03 PM - 사용자 B (지문)")
                .body("05:20 PM - 사용자 A (스마트폰 인증)")
                .body("07:10 PM - 사용자 A (스마트폰 인증)")
                .option("A", "사용자A")
                .option("Delivery", "택배 기사")
                .option("B", "사용자B")
                .correct("A")
                .otherwise("틀렸습니다. 다시 생각해보세요.")
                .mission("center")
        })
        .background(background);
    r
}

/// `assets/images/{elecon|elecoff}_{tigeron|tigeroff}_{venton|ventoff}.png` from scene 3 on.
pub fn background(scene: &Scene, session: &Session) -> Option<String> {
    let id = scene.id?;
    if id < SceneId(3) {
        return None;
    }
    let on = |flag: &str, name: &str| format!("{}{}", name, if session.flag(flag) { "on" } else { "off" });
    Some(format!(
        "assets/images/{}_{}_{}.png",
        on("elec", "elec"),
        on("tiger", "tiger"),
        on("vent", "vent"),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Room,
    Note,
    Wallpad,
    Lighting,
    Ventilation,
    Parking,
    Outlet,
    Car,
}

/// The living-room hub: note, wallpad quadrants and the toy car.
pub struct LivingRoom {
    panel: Panel,
    slider: i32,
    sunset_hold: Option<TimerHandle>,
    countdown: Option<u32>,
    finale: bool,
}

impl LivingRoom {
    pub fn new() -> Self {
        Self {
            panel: Panel::Room,
            slider: 0,
            sunset_hold: None,
            countdown: None,
            finale: false,
        }
    }

    fn ambient(session: &Session) -> u32 {
        session.var(AMBIENT)
            .and_then(|v| v.parse().ok())
            .unwrap_or(KELVIN_COOL)
    }

    fn open(&mut self, cx: &mut ProcessCx<'_>, panel: Panel) {
        debug!("panel {:?} -> {:?}", self.panel, panel);
        self.panel = panel;
        let prompt = match panel {
            Panel::Room => Prompt::new(
                "거실",
                Control::Options(vec![
                    PromptOption::new("note", "액자"),
                    PromptOption::new("wallpad", "월패드"),
                    PromptOption::new("car", "장난감 자동차"),
                ]),
            ),
            Panel::Note => Prompt::new("쪽지", Control::None)
                .body("방을 노을빛으로 물들이면 사방신 주작이 깨어난다.")
                .body("현무의 물결은 잔잔해야 한다. 3초간 방에 전기가 흐르지 않도록 유지해라.")
                .body("철마차가 떠난 시각을 기억하라. 그럼 백호가 움직일 것이다.")
                .body("청룡이 나타날 수 있도록, 깨끗한 하늘과 같은 환경을 만들어라.")
                .action("close", "닫기"),
            Panel::Wallpad => Prompt::new(
                "월패드",
                Control::Options(vec![
                    PromptOption::new("lighting", "조명"),
                    PromptOption::new("ventilation", "환기"),
                    PromptOption::new("parking", "주차"),
                    PromptOption::new("outlet", "콘센트"),
                ]),
            )
            .action("close", "닫기"),
            Panel::Lighting => {
                self.slider = slider_for_kelvin(Self::ambient(cx.session));
                let k = kelvin(self.slider);
                Prompt::new("조명", Control::Slider { min: 0, max: 100, value: self.slider, step: 3 })
                    .body(format!("색온도 {}K · {}", k, kelvin_label(k)))
                    .action("close", "닫기")
            }
            Panel::Ventilation => Prompt::new(
                "환기 제어",
                Control::Options(vec![PromptOption::new("vent", "환기 전원")]),
            )
            .body(if cx.session.flag("vent") { "환기 ON" } else { "환기 OFF" })
            .body("이미지를 탭/클릭하면 환기 상태가 전환됩니다. (OFF ↔ ON)")
            .action("close", "닫기"),
            Panel::Parking => Prompt::new("월패드", Control::None)
                .body(format!("주차 기록: 마지막 출차 {}:{}", &PARKING_CODE[..2], &PARKING_CODE[2..]))
                .action("close", "닫기"),
            Panel::Outlet => Prompt::new(
                "콘센트 제어",
                Control::Options(vec![PromptOption::new("all_off", "전체끄기")]),
            )
            .body("모든 전원을 끄고 3초간 유지하세요.")
            .action("close", "닫기"),
            Panel::Car => Prompt::new(
                "가장 마지막 \"철마차\"가 떠난 시간과 분을 기억하라.",
                Control::Text { placeholder: "비밀번호 입력".into() },
            )
            .body("그럼 백호가 움직일 것이다.")
            .action("close", "닫기"),
        };
        cx.prompt(prompt);
        if panel == Panel::Lighting {
            self.watch_sunset(cx);
        }
    }

    fn close(&mut self, cx: &mut ProcessCx<'_>) {
        if self.panel == Panel::Lighting {
            if let Some(h) = self.sunset_hold.take() {
                cx.cancel(h);
            }
            let k = kelvin(self.slider);
            cx.session.set_var(AMBIENT, k.to_string());
            cx.readout("ambient", k);
        }
        cx.close_prompt();
        self.open(cx, Panel::Room);
    }

    fn awaken(&mut self, cx: &mut ProcessCx<'_>, mission: &str, creature: &str, toast: &str) {
        info!("'{}' awakened", mission);
        cx.pass(mission);
        cx.effect(creature);
        cx.toast(toast);
    }

    fn pick(&mut self, cx: &mut ProcessCx<'_>, id: &str) -> Outcome {
        match (self.panel, id) {
            (Panel::Room, "note") => self.open(cx, Panel::Note),
            (Panel::Room, "wallpad") => self.open(cx, Panel::Wallpad),
            (Panel::Room, "car") => {
                if cx.session.missions.passed("west") {
                    debug!("car already unlocked");
                } else {
                    self.open(cx, Panel::Car);
                }
            }
            (Panel::Wallpad, "lighting") => self.open(cx, Panel::Lighting),
            (Panel::Wallpad, "ventilation") => self.open(cx, Panel::Ventilation),
            (Panel::Wallpad, "parking") => self.open(cx, Panel::Parking),
            (Panel::Wallpad, "outlet") => self.open(cx, Panel::Outlet),
            (Panel::Ventilation, "vent") => self.toggle_vent(cx),
            (Panel::Outlet, "all_off") => self.all_off(cx),
            (_, "close") => self.close(cx),
            _ => debug!("'{}' does nothing on {:?}", id, self.panel),
        }
        Outcome::Stay
    }

    fn slide(&mut self, cx: &mut ProcessCx<'_>, value: i32) {
        self.slider = value.clamp(0, 100);
        let k = kelvin(self.slider);
        let label = kelvin_label(k);
        cx.readout("색온도", format!("{}K · {}", k, label));
        self.watch_sunset(cx);
    }

    /// Starts the hold while the slider sits in the sunset band, cancels it otherwise.
    fn watch_sunset(&mut self, cx: &mut ProcessCx<'_>) {
        if kelvin_label(kelvin(self.slider)) == SUNSET && !cx.session.missions.passed("south") {
            if self.sunset_hold.is_none() {
                self.sunset_hold = Some(cx.schedule(HOLD, SUNSET_HOLD));
            }
        } else if let Some(h) = self.sunset_hold.take() {
            cx.cancel(h);
        }
    }

    fn toggle_vent(&mut self, cx: &mut ProcessCx<'_>) {
        let before = cx.session.flag("vent");
        cx.session.set_flag("vent", !before);
        cx.refresh_background();
        cx.toast(if before { "환기 OFF" } else { "환기 ON" });

        if !before && !cx.session.missions.passed("east") {
            self.awaken(cx, "east", "blue_dragon", "청룡의 힘이 깨어났습니다!");
            cx.schedule(SETTLE, CLOSE_AND_CHECK);
        }
    }

    fn all_off(&mut self, cx: &mut ProcessCx<'_>) {
        if self.countdown.is_some() {
            return;
        }
        cx.session.set_flag("elec", false);
        cx.refresh_background();
        self.countdown = Some(3);
        cx.readout("outlet", "3초...");
        cx.toast("3초...");
        cx.schedule(TICK, COUNTDOWN);
    }

    fn count_down(&mut self, cx: &mut ProcessCx<'_>) {
        let Some(left) = self.countdown else {
            return;
        };
        match left {
            3 | 2 => {
                let text = format!("{}초...", left - 1);
                cx.readout("outlet", &text);
                cx.toast(text);
            }
            1 => {
                cx.readout("outlet", "완료!");
                cx.toast("완료!");
            }
            _ => {
                self.countdown = None;
                if !cx.session.missions.passed("north") {
                    self.awaken(cx, "north", "black_tortoise", "현무의 힘이 깨어났습니다!");
                }
                cx.schedule(SETTLE, CLOSE_AND_CHECK);
                return;
            }
        }
        self.countdown = Some(left - 1);
        cx.schedule(TICK, COUNTDOWN);
    }

    fn unlock_car(&mut self, cx: &mut ProcessCx<'_>, code: &str) {
        if code.trim() != PARKING_CODE {
            cx.toast("비밀번호가 틀렸습니다.");
            return;
        }
        cx.session.set_flag("tiger", true);
        cx.refresh_background();
        if !cx.session.missions.passed("west") {
            self.awaken(cx, "west", "white_tiger", "백호의 힘이 깨어났습니다!");
        }
        self.close(cx);
        self.check(cx);
    }

    /// All four guardians awake: head for the finale once.
    fn check(&mut self, cx: &mut ProcessCx<'_>) {
        let done = cx.session.missions.all_passed(DIRECTIONS) && !cx.session.missions.passed("center");
        if done && !self.finale {
            info!("All four guardians awake");
            self.finale = true;
            cx.schedule(ms(500), FINALE);
        }
    }
}

impl Default for LivingRoom {
    fn default() -> Self {
        Self::new()
    }
}

impl Process for LivingRoom {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        self.open(cx, Panel::Room);
        self.check(cx);
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Pick(id) => self.pick(cx, &id),
            PuzzleInput::Dismiss if self.panel != Panel::Room => {
                self.close(cx);
                Outcome::Stay
            }
            PuzzleInput::Value(v) if self.panel == Panel::Lighting => {
                self.slide(cx, v);
                Outcome::Stay
            }
            PuzzleInput::Text(code) if self.panel == Panel::Car => {
                self.unlock_car(cx, &code);
                Outcome::Stay
            }
            PuzzleInput::Confirm if self.panel == Panel::Outlet => {
                self.all_off(cx);
                Outcome::Stay
            }
            PuzzleInput::Toggle(_) | PuzzleInput::Confirm if self.panel == Panel::Ventilation => {
                self.toggle_vent(cx);
                Outcome::Stay
            }
            _ => Outcome::Stay,
        }
    }

    fn on_timer(&mut self, cx: &mut ProcessCx<'_>, tag: u32) -> Outcome {
        match tag {
            SUNSET_HOLD => {
                self.sunset_hold = None;
                let k = kelvin(self.slider);
                if kelvin_label(k) == SUNSET && !cx.session.missions.passed("south") {
                    self.awaken(cx, "south", "phoenix", "주작의 힘이 깨어났습니다!");
                    cx.session.set_var(AMBIENT, k.to_string());
                    cx.readout("ambient", k);
                    cx.schedule(SETTLE, CLOSE_AND_CHECK);
                }
            }
            CLOSE_AND_CHECK => {
                if self.panel != Panel::Room {
                    self.close(cx);
                }
                self.check(cx);
            }
            COUNTDOWN => self.count_down(cx),
            FINALE => return Outcome::Goto(SceneId(4)),
            _ => {}
        }
        Outcome::Stay
    }
}
