use crate::event::{Control, OutputEvent, Prompt, Tone};
use crate::process::{Outcome, Process, ProcessCx, PuzzleInput};
use crate::runtime::{RatingError, StarRating};
use crate::scene::SceneId;

/// End-of-game panel: completion percent, the pass/fail list, a verdict and
/// optionally the star-rating widget.
pub struct ResultsScreen {
    title: String,
    pass_verdict: String,
    retry_verdict: String,
    rating: Option<StarRating>,
    submitted: Option<u8>,
    next: Option<SceneId>,
}

impl ResultsScreen {
    pub fn new(title: impl Into<String>, pass_verdict: impl Into<String>, retry_verdict: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pass_verdict: pass_verdict.into(),
            retry_verdict: retry_verdict.into(),
            rating: None,
            submitted: None,
            next: None,
        }
    }

    pub fn with_rating(mut self, max: u8) -> Self {
        self.rating = Some(StarRating::new(max));
        self
    }

    /// Scene shown on "next"; without one, "next" ends the game.
    pub fn then(mut self, next: SceneId) -> Self {
        self.next = Some(next);
        self
    }

    pub fn submitted(&self) -> Option<u8> {
        self.submitted
    }

    fn rated(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) {
        let Some(rating) = self.rating.as_mut() else {
            return;
        };
        let result = match input {
            PuzzleInput::Hover(v) => rating.hover(v).map(|shown| (shown, false)),
            PuzzleInput::Leave => Ok((rating.leave(), false)),
            PuzzleInput::Value(v) => {
                let v = u8::try_from(v).unwrap_or(0);
                rating.commit(v).map(|c| (c, true))
            }
            _ => return,
        };
        match result {
            Ok((value, committed)) => cx.emit(OutputEvent::Rating { value, committed }),
            Err(e) => log::debug!("rating input ignored: {}", e),
        }
    }

    fn submit(&mut self, cx: &mut ProcessCx<'_>) {
        let Some(rating) = &self.rating else {
            return;
        };
        match rating.submit() {
            Ok(value) => {
                log::info!("Feedback submitted: {} stars", value);
                self.submitted = Some(value);
                cx.message(Tone::Success, format!("감사합니다! {}점 피드백이 제출되었습니다.", value));
            }
            Err(RatingError::Unrated) => cx.message(Tone::Error, "별점을 선택해주세요."),
            Err(e) => log::warn!("submit refused: {}", e),
        }
    }
}

impl Process for ResultsScreen {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        let summary = cx.session.missions.summary(&self.pass_verdict, &self.retry_verdict);
        log::info!("Results: {}% ({}/{})", summary.percent, summary.correct, summary.total);

        let control = match &self.rating {
            Some(r) => Control::Stars { max: r.max() },
            None => Control::None,
        };
        let mut prompt = Prompt::new(self.title.clone(), control)
            .body(format!("{}%", summary.percent))
            .body(summary.verdict.clone());
        if self.rating.is_some() {
            prompt = prompt.action("submit", "피드백 보내기");
        }
        prompt = prompt.action("next", if self.next.is_some() { "다음" } else { "처음으로" });

        cx.emit(OutputEvent::Results(summary));
        cx.prompt(prompt);
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Confirm => {
                self.submit(cx);
                Outcome::Stay
            }
            PuzzleInput::Next => match self.next {
                Some(next) => Outcome::Goto(next),
                None => Outcome::End,
            },
            other => {
                self.rated(cx, other);
                Outcome::Stay
            }
        }
    }
}
