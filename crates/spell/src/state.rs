//! Spell accounting state threaded through the period recurrence.

use serde::Serialize;

/// |X3| at or below this value means no spell is established.
pub const SPELL_THRESHOLD: f64 = 0.5;

/// Polarity of the established spell encoded in X3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Spell {
    /// `|X3| <= 0.5`.
    None,
    /// `X3 > 0.5`.
    Wet,
    /// `X3 < -0.5`.
    Dry,
}

/// The four drought-accounting series carried from one period to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpellState {
    /// Potential wet spell (`>= 0`).
    pub x1: f64,
    /// Potential dry spell (`<= 0`).
    pub x2: f64,
    /// Established spell: positive wet, negative dry.
    pub x3: f64,
    /// Effective wetness or dryness accumulated against `x3`.
    pub uaccum: f64,
}

impl SpellState {
    /// The start-of-record state.
    pub const ZERO: SpellState = SpellState {
        x1: 0.0,
        x2: 0.0,
        x3: 0.0,
        uaccum: 0.0,
    };

    /// All-NaN state.
    pub const MISSING: SpellState = SpellState {
        x1: f64::NAN,
        x2: f64::NAN,
        x3: f64::NAN,
        uaccum: f64::NAN,
    };

    pub fn new(x1: f64, x2: f64, x3: f64, uaccum: f64) -> Self {
        Self { x1, x2, x3, uaccum }
    }

    /// Returns `true` if all four series are finite.
    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.x2.is_finite() && self.x3.is_finite() && self.uaccum.is_finite()
    }

    /// Classifies the established spell from X3.
    ///
    /// Returns [`Spell::None`] for NaN.
    pub fn spell(&self) -> Spell {
        if self.x3 > SPELL_THRESHOLD {
            Spell::Wet
        } else if self.x3 < -SPELL_THRESHOLD {
            Spell::Dry
        } else {
            Spell::None
        }
    }

    /// Applies the entry normalization used before each accounting step.
    ///
    /// X1 is floored at 0 and X2 capped at 0. A spell with `|X3| < 0.5`
    /// carries neither X3 nor accumulation, and an accumulation with the
    /// same sign as X3 is dropped: accumulation only ever erodes a spell.
    pub fn normalized(&self) -> Self {
        let mut s = Self {
            x1: self.x1.max(0.0),
            x2: self.x2.min(0.0),
            x3: self.x3,
            uaccum: self.uaccum,
        };
        if s.x3.abs() < SPELL_THRESHOLD {
            s.x3 = 0.0;
            s.uaccum = 0.0;
        }
        if s.x3 * s.uaccum > 0.0 {
            s.uaccum = 0.0;
        }
        s
    }
}

impl Default for SpellState {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Which branch of the accounting decision tree produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellTransition {
    /// A non-finite input; every output is NaN.
    Missing,
    /// No spell was established and none began.
    Quiescent,
    /// No spell was established and a new one began.
    Started,
    /// The established spell decayed to `|X3| <= 0.5` this period.
    Collapsed,
    /// The Z-index alone crossed the effective end threshold.
    EndedEarly,
    /// Accumulated effective wetness/dryness reached probability 1.
    Ended,
    /// The spell-end probability fell back to 0.
    Reaffirmed,
    /// `0 < PROB_SPELL_END < 1`; the spell may be ending.
    Eroding,
}

/// The output of one accounting step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccountingResult {
    /// State to carry into the next period.
    pub state: SpellState,
    /// Probability in `[0, 1]` that the established spell has ended, NaN
    /// for a missing period.
    pub prob_spell_end: f64,
    /// Which branch of the accounting produced this result.
    pub transition: SpellTransition,
}

impl AccountingResult {
    /// The all-NaN record returned for non-finite input.
    pub fn missing() -> Self {
        Self {
            state: SpellState::MISSING,
            prob_spell_end: f64::NAN,
            transition: SpellTransition::Missing,
        }
    }

    /// Returns `true` if this is the all-NaN record.
    pub fn is_missing(&self) -> bool {
        self.transition == SpellTransition::Missing
    }

    /// Potential wet spell after this period.
    pub fn x1(&self) -> f64 {
        self.state.x1
    }

    /// Potential dry spell after this period.
    pub fn x2(&self) -> f64 {
        self.state.x2
    }

    /// Established spell after this period.
    pub fn x3(&self) -> f64 {
        self.state.x3
    }

    /// Accumulated effective wetness/dryness after this period.
    pub fn uaccum(&self) -> f64 {
        self.state.uaccum
    }

    /// The modified Palmer index for this period.
    pub fn pmdi(&self) -> f64 {
        crate::pmdi::select_pmdi(
            self.state.x1,
            self.state.x2,
            self.state.x3,
            self.prob_spell_end,
        )
    }
}
