//! "Did you mean" suggestions via Levenshtein distance

use strsim::levenshtein;

/// Distance used when a command does not override it
pub const DEFAULT_SUGGEST_DISTANCE: usize = 2;

/// Per-command suggestion threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestDistance {
    #[default]
    Default,
    /// Never suggest anything
    Disabled,
    /// Suggest candidates at most this far from the input
    Max(usize),
}

impl SuggestDistance {
    /// Effective threshold, `None` when suggestions are disabled
    pub fn threshold(self) -> Option<usize> {
        match self {
            SuggestDistance::Default => Some(DEFAULT_SUGGEST_DISTANCE),
            SuggestDistance::Disabled => None,
            SuggestDistance::Max(d) => Some(d),
        }
    }
}

/// Collects candidates close to a mistyped token
pub struct Suggester {
    source: String,
    threshold: Option<usize>,
    results: Vec<(String, usize)>,
}

impl Suggester {
    pub fn new(source: impl Into<String>, distance: SuggestDistance) -> Self {
        Suggester {
            source: source.into(),
            threshold: distance.threshold(),
            results: Vec::new(),
        }
    }

    /// Score one candidate; candidates must be applied in declaration order
    pub fn apply(&mut self, candidate: &str) {
        let Some(threshold) = self.threshold else {
            return;
        };
        let distance = levenshtein(&self.source, candidate);
        if distance <= threshold {
            self.results.push((candidate.to_string(), distance));
        }
    }

    /// Matches ordered by distance; ties keep declaration order
    pub fn results(mut self) -> Vec<String> {
        // stable sort keeps declaration order within equal distances
        self.results.sort_by_key(|(_, d)| *d);
        self.results.into_iter().map(|(s, _)| s).collect()
    }
}

/// Rank `candidates` against `source`
pub fn suggest<'a>(
    source: &str,
    distance: SuggestDistance,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut suggester = Suggester::new(source, distance);
    for candidate in candidates {
        suggester.apply(candidate);
    }
    suggester.results()
}
