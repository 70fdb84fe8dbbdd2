//! Authored scene data.
//!
//! Scenes are loaded once and shared as `Arc<Scene>`; the sequencer only moves its
//! cursor over them and never mutates a definition.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Ordinal scene identifier as written in the scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub u32);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for SceneId {
    fn from(v: u32) -> Self {
        SceneId(v)
    }
}

/// One unit of dialogue. A missing speaker means narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub portrait: Option<String>,
    pub text: String,
}

impl Line {
    pub fn narration(text: impl Into<String>) -> Self {
        Self { speaker: None, portrait: None, text: text.into() }
    }

    pub fn said(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self { speaker: Some(speaker.into()), portrait: None, text: text.into() }
    }

    pub fn with_portrait(mut self, portrait: impl Into<String>) -> Self {
        self.portrait = Some(portrait.into());
        self
    }
}

/// Side effect attached to a choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Sets a boolean session flag consulted by later scenes.
    SetFlag { key: String, value: bool },
    /// Asks the front end to start background music.
    PlayMusic { path: String },
    /// Runs a hook the game registered in its process registry.
    Hook { name: String },
}

/// A player-selectable branch shown after a scene's last line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    #[serde(default)]
    pub effect: Option<Effect>,
    #[serde(default)]
    pub next: Option<SceneId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    /// `None` only for transient scenes spliced in at runtime.
    #[serde(default)]
    pub id: Option<SceneId>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub process: Option<String>,
    #[serde(default)]
    pub next: Option<SceneId>,
}

impl Scene {
    /// A scene that shows `lines` and then continues at `next`.
    ///
    /// The sequencer treats it exactly like a declared scene.
    pub fn transient(lines: Vec<Line>, next: SceneId) -> Self {
        Self {
            lines,
            next: Some(next),
            ..Self::default()
        }
    }

    /// Whether anything follows the last line.
    pub fn has_continuation(&self) -> bool {
        !self.choices.is_empty() || self.process.is_some() || self.next.is_some()
    }

    /// The successor of a scene that moves on without waiting for the player.
    pub fn passes_through(&self) -> Option<SceneId> {
        if self.lines.is_empty() && self.choices.is_empty() && self.process.is_none() {
            self.next
        } else {
            None
        }
    }

    /// Every scene id this scene can lead to.
    pub fn successors(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.next
            .into_iter()
            .chain(self.choices.iter().filter_map(|c| c.next))
    }
}

/// Header of a game script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMeta {
    pub id: String,
    pub title: String,
    pub start: SceneId,
    /// Scenes a process may jump to; checked like successor links.
    #[serde(default)]
    pub targets: Vec<SceneId>,
    /// Session flags set before the first scene.
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
}

/// One entry of the mission board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDef {
    pub key: String,
    pub label: String,
}

/// The immutable, indexed scene set of one game.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    pub meta: GameMeta,
    pub missions: Vec<MissionDef>,
    scenes: FxHashMap<SceneId, Arc<Scene>>,
}

impl SceneGraph {
    pub(crate) fn new(
        meta: GameMeta,
        missions: Vec<MissionDef>,
        scenes: FxHashMap<SceneId, Arc<Scene>>,
    ) -> Self {
        Self { meta, missions, scenes }
    }

    pub fn get(&self, id: SceneId) -> Option<Arc<Scene>> {
        self.scenes.get(&id).cloned()
    }

    pub fn start(&self) -> SceneId {
        self.meta.start
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scene ids in ascending order.
    pub fn ids(&self) -> Vec<SceneId> {
        let mut ids: Vec<_> = self.scenes.keys().copied().collect();
        ids.sort();
        ids
    }

    /// `(from, to)` pairs whose target does not exist. `from` is `None` for script-level targets.
    pub fn broken_links(&self) -> Vec<(Option<SceneId>, SceneId)> {
        let mut broken = Vec::new();
        if !self.scenes.contains_key(&self.meta.start) {
            broken.push((None, self.meta.start));
        }
        for target in &self.meta.targets {
            if !self.scenes.contains_key(target) {
                broken.push((None, *target));
            }
        }
        for id in self.ids() {
            let scene = &self.scenes[&id];
            for to in scene.successors() {
                if !self.scenes.contains_key(&to) {
                    broken.push((Some(id), to));
                }
            }
        }
        broken
    }

    /// Loops made only of scenes that pass straight through, each listed from where it is entered.
    pub fn empty_cycles(&self) -> Vec<Vec<SceneId>> {
        let mut cycles = Vec::new();
        let mut seen = FxHashSet::default();
        for start in self.ids() {
            let mut path: Vec<SceneId> = Vec::new();
            let mut at = start;
            while !seen.contains(&at) {
                if let Some(pos) = path.iter().position(|p| *p == at) {
                    cycles.push(path[pos..].to_vec());
                    break;
                }
                let Some(next) = self.scenes.get(&at).and_then(|s| s.passes_through()) else {
                    break;
                };
                path.push(at);
                at = next;
            }
            seen.extend(path);
        }
        cycles
    }

    /// Process keys referenced by any scene.
    pub fn process_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.scenes.values()
            .filter_map(|s| s.process.as_deref())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Hook names referenced by any choice.
    pub fn hook_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenes.values()
            .flat_map(|s| s.choices.iter())
            .filter_map(|c| match &c.effect {
                Some(Effect::Hook { name }) => Some(name.as_str()),
                _ => None,
            })
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
