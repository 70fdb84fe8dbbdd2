//! 원더랜드: a new hire's first day running a smart home under a grumpy mentor.
//!
//! Every puzzle is a pick among household actions; wrong picks earn a toast from the mentor.

use log::debug;

use quest_core::config::SequencerConfig;
use quest_core::event::{Control, Prompt, PromptOption};
use quest_core::puzzle::select::then;
use quest_core::puzzle::{ConfirmOnly, MultiSelectAll, PickOne, TapThrough};
use quest_core::{Line, Outcome, Process, ProcessCx, ProcessRegistry, PuzzleInput, SceneId, Session};

pub const ID: &str = "wonderland";
pub const SCRIPT: &str = include_str!("../content/wonderland.toml");

const MENTOR: &str = "언덕 매니저";
const OWNER: &str = "주인";
const STEP6_ATTEMPTS: &str = "step6_attempts";
const BRIEFING: &str = "briefing";

pub fn defaults() -> SequencerConfig {
    SequencerConfig { char_delay_ms: 20, line_break: "\n".into(), toast_ms: 2000 }
}

fn mentor(face: &str, text: &str) -> Line {
    Line::said(MENTOR, text).with_portrait(format!("assets/images/manager_{face}.png"))
}

fn owner(face: &str, text: &str) -> Line {
    Line::said(OWNER, text).with_portrait(format!("assets/images/owner_{face}.png"))
}

fn scold(text: &str) -> String {
    format!("{MENTOR}: {text}")
}

pub fn registry() -> ProcessRegistry {
    let mut r = ProcessRegistry::new();
    r.register("step6", || {
        PickOne::new("무엇을 할까?", SceneId(7))
            .option("curtain", "커튼 열기")
            .option("news", "뉴스 켜기")
            .option("bus", "버스 도착예정 시간 알려주기")
            .correct("curtain")
            .otherwise(scold("지금 그게 아니라니까! 다시 생각해봐."))
            .count_misses(STEP6_ATTEMPTS)
            .reward_with(curtain_reaction)
    })
    .register("step7", || {
        PickOne::new("무엇을 할까?", SceneId(8))
            .option("coffee", "커피 내리기")
            .option("lightOff", "주방 전등 끄기")
            .option("gas", "가스 밸브 잠그기")
            .correct("coffee")
            .otherwise(scold("음… 아닌 것 같은데? 다시 해보자."))
            .reward(owner("sleepy", "역시 원더야~~ 말안해도 척척이네 ㅎㅎ 고마워 ㅎㅎ"))
    })
    .register("step8", Cctv::new)
    .register("step9", || {
        PickOne::new("무엇을 할까?", SceneId(10))
            .option("weather", "오늘 날씨 브리핑하기")
            .option("news", "오늘 뉴스 브리핑하기")
            .option("elevator", "엘리베이터 호출하기")
            .correct("weather")
            .correct("news")
            .otherwise(scold("아직 할 일이 남았잖아. 다시 생각해."))
            .on_accept(|s, id| s.set_var(BRIEFING, id))
            .reward_with(|_, id| briefing(id))
    })
    .register("step10", || {
        PickOne::new("무엇을 할까?", SceneId(11))
            .options_with(remaining_briefing)
            .correct("weather")
            .correct("news")
            .otherwise(scold("아직 끝나지 않았잖아! 다시 생각해."))
            .reward_with(|_, id| briefing(id))
    })
    .register("step11", || {
        PickOne::new("무엇을 할까?", SceneId(12))
            .option("elevator", "엘리베이터 호출하기")
            .option("bus", "버스 도착 예정 시간 알려주기")
            .correct("elevator")
            .otherwise(scold("쯧, 집중을 안하네, 안해.. 아까 주인이 주차장에서 차를 찾았잖냐! 쯧쯧.."))
            .reward(Line::said("윈더", "엘리베이터가 현재 7층에 도착했습니다."))
            .reward(owner("sleepy", "땡큐~"))
    })
    .register("step12", || {
        MultiSelectAll::new("외출 준비", SceneId(13))
            .item("lights", "일괄소등")
            .item("gas", "가스닫기")
            .item("ventilation", "환기끄기")
            .item("heating", "난방 외출 모드")
            .item("plug", "스마트 콘센트 전력 차단")
            .item("security", "외출 방범 모드 켜기")
            .incomplete(scold("아직 덜 선택했다! 모두 선택해야 해."))
    })
    .register("step13", || {
        TapThrough::new("침입자", SceneId(14))
            .on_reveal("intruder")
            .on_tap("alert")
            .reward(Line::said("원더", "어, 이럴땐 어떡하죠, 언덕 매니저님?!!!"))
            .reward(mentor("happy", "쯧쯧.. 침착하게 기다려라. 아까 방범모드를 켜놨으니, 경비실과 주인에게 이미 연락이 갔을 거야. 곧 경비원이 확인해보러 올거다. 우리는 이 상황을 잘 기억해놨다가 알려주기만 하면 돼."))
    })
    .register("step15", || {
        PickOne::new("독서 조명", SceneId(16))
            .option("softWhite", "밝고 부드러운 주백색")
            .option("warmWhite", "은은한 따뜻한 백색")
            .option("coolBright", "밝고 차가운 집중등")
            .correct("softWhite")
            .wrong("warmWhite", scold("지금 책읽다 자라는거냐?"))
            .wrong("coolBright", scold("윽! 야! 밝기가 너무 세잖아!"))
            .reward(mentor("stern", "그래, 눈 안아프겠네. 어휴, 오늘 처음으로 사람 같은 판단했네."))
    })
    .register("step16", || ConfirmOnly::new("환기", SceneId(17)))
    .register("step17", || {
        MultiSelectAll::new("취침 모드", SceneId(18))
            .item("lightWarm", "조명 : 은은한 따뜻한 백색")
            .item("boiler", "보일러 : 취침모드")
            .incomplete(scold("둘 다 선택해야 하지 않겠냐?"))
    });
    r
}

fn curtain_reaction(session: &Session, _: &str) -> Vec<Line> {
    let reaction = match session.counter(STEP6_ATTEMPTS) {
        0 => "뭐, 나쁘지 않네.",
        1..=2 => "에휴.. 벌써부터 헤매면 어떡하냐, 너.",
        _ => "야.. 이걸 이렇게 틀리냐? 쯧쯧.. 넌 짐 쌀 준비해라.",
    };
    vec![
        owner("sleepy", "고마워! 빛을 보니까 잠이 좀 깬다."),
        mentor("happy", reaction),
    ]
}

pub fn briefing(kind: &str) -> Vec<Line> {
    match kind {
        "weather" => vec![
            Line::said("윈더", "오늘 최저 기온은 25도, 최고 기온은 33도입니다. 오후에 비소식이 있으니, 우산 챙겨가세요."),
            owner("sleepy", "맞다 우산!!"),
        ],
        "news" => vec![
            Line::said("윈더", "오늘의 주요 뉴스는 …"),
            owner("sleepy", "…후.. 출근하면서 주식 좀 봐야겠다.."),
        ],
        _ => Vec::new(),
    }
}

/// The briefing not yet given, or both when neither was.
fn remaining_briefing(session: &Session) -> Vec<PromptOption> {
    let weather = PromptOption::new("weather", "오늘 날씨 브리핑하기");
    let news = PromptOption::new("news", "오늘 뉴스 브리핑하기");
    let mut options = match session.var(BRIEFING) {
        Some("weather") => vec![news],
        Some("news") => vec![weather],
        _ => vec![weather, news],
    };
    options.push(PromptOption::new("lights", "일괄소등"));
    options.push(PromptOption::new("elevator", "엘리베이터 호출하기"));
    options
}

const ZONES: [&str; 4] = ["A", "B", "C", "D"];

/// Step 8: pick the CCTV, then browse the parking zones and name the car's.
pub struct Cctv {
    browsing: bool,
    zone: usize,
}

impl Cctv {
    pub fn new() -> Self {
        Self { browsing: false, zone: 0 }
    }

    fn menu(&self, cx: &mut ProcessCx<'_>) {
        cx.prompt(Prompt::new(
            "무엇을 할까?",
            Control::Options(vec![
                PromptOption::new("cctv", "주차장 CCTV 확인하기"),
                PromptOption::new("elevator", "엘리베이터 호출하기"),
                PromptOption::new("lightsOff", "일괄 소등"),
            ]),
        ));
    }

    fn browse(&mut self, cx: &mut ProcessCx<'_>) {
        self.browsing = true;
        let zones = ZONES.iter().map(|z| PromptOption::new(*z, format!("{z}구역"))).collect();
        cx.prompt(
            Prompt::new("주차장 CCTV", Control::Options(zones))
                .action("prev", "←")
                .action("next", "→"),
        );
        self.show_zone(cx);
    }

    fn show_zone(&self, cx: &mut ProcessCx<'_>) {
        cx.readout("cctv", format!("assets/images/cctv/{}.png", ZONES[self.zone]));
    }

    pub fn zone(&self) -> &str {
        ZONES[self.zone]
    }
}

impl Default for Cctv {
    fn default() -> Self {
        Self::new()
    }
}

impl Process for Cctv {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        self.menu(cx);
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        let id = match input {
            PuzzleInput::Pick(id) => id,
            PuzzleInput::Next if self.browsing => "next".to_string(),
            _ => return Outcome::Stay,
        };
        if !self.browsing {
            if id == "cctv" {
                self.browse(cx);
            } else {
                cx.toast(scold("지금 주차장을 찾아야지! 다시 선택해."));
            }
            return Outcome::Stay;
        }
        match id.as_str() {
            "prev" => {
                self.zone = (self.zone + ZONES.len() - 1) % ZONES.len();
                self.show_zone(cx);
            }
            "next" => {
                self.zone = (self.zone + 1) % ZONES.len();
                self.show_zone(cx);
            }
            "A" => {
                cx.close_prompt();
                return then(
                    vec![
                        Line::said("원더", "A구역 12 기둥 옆에 위치해있습니다."),
                        owner("happy", "헐? 고마워~"),
                    ],
                    SceneId(9),
                );
            }
            z if ZONES.contains(&z) => cx.toast(scold("그쪽은 아닌 것 같아. 다른 구역을 확인해봐.")),
            other => debug!("cctv ignores '{}'", other),
        }
        Outcome::Stay
    }
}
