use std::fmt;

/// Key names that only ever act as modifiers
const MODIFIER_KEYS: [&str; 4] = ["Control", "Meta", "Alt", "Shift"];

/// A single key-down or key-up as seen by the quiz, independent of the terminal backend
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
    /// Primary key name, e.g. `s`, `F4`, `Enter`, or a modifier name like `Control`
    pub key: String,
    /// Set by terminals that report auto-repeat
    pub repeat: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.meta || self.alt || self.shift
    }
}

/// Keys pressed together, rendered as `Ctrl+Cmd+Alt+Shift+KEY`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChordString(String);

impl ChordString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn components(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.split('+').count()
        }
    }

    /// At least a modifier and a key. Modifier-only chords are filtered out by [`judgeable`].
    pub fn is_candidate(&self) -> bool {
        self.components() >= 2
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ChordString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChordString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ChordString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Comparison form of a chord or answer string. Equal keys mean equivalent shortcuts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_modifier_key(key: &str) -> bool {
    MODIFIER_KEYS.contains(&key)
}

/// Lowercases, drops whitespace, folds `cmd` into `ctrl` and sorts the `+` separated parts
pub fn normalize(raw: &str) -> CanonicalKey {
    let squashed: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let aliased = squashed.replace("cmd", "ctrl");

    let mut parts: Vec<&str> = aliased.split('+').collect();
    parts.sort_unstable();

    CanonicalKey(parts.join("+"))
}

/// Chord for a key press, or `None` while only modifiers are held or too few keys are down
pub fn judgeable(press: &KeyPress) -> Option<ChordString> {
    if press.key.is_empty() || is_modifier_key(&press.key) {
        return None;
    }
    let chord = build_chord(press);
    chord.is_candidate().then_some(chord)
}

pub fn build_chord(press: &KeyPress) -> ChordString {
    let mut keys: Vec<String> = Vec::with_capacity(5);

    if press.ctrl {
        keys.push("Ctrl".into());
    }
    if press.meta {
        keys.push("Cmd".into());
    }
    if press.alt {
        keys.push("Alt".into());
    }
    if press.shift {
        keys.push("Shift".into());
    }

    if !press.key.is_empty() && !is_modifier_key(&press.key) {
        keys.push(press.key.to_uppercase());
    }

    ChordString(keys.join("+"))
}
