use std::fmt::{Display, Formatter, Result as FmtResult};

/// Whether a map has point-of-interest/label data in the label index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LabelIndex {
    Yes,
    No,
    /// Kept for reports that cannot decide. Counting label files never
    /// produces a negative count, so nothing currently yields this state.
    #[default]
    Unknown,
}
impl LabelIndex {
    pub fn from_count(count: usize) -> Self {
        if count > 0 { Self::Yes } else { Self::No }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelIndex::Yes => "yes",
            LabelIndex::No => "no",
            LabelIndex::Unknown => "?",
        }
    }
}
impl Display for LabelIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, LabelIndex::No, "no")]
    #[case(1, LabelIndex::Yes, "yes")]
    #[case(17, LabelIndex::Yes, "yes")]
    fn test_from_count(#[case] count: usize, #[case] expected: LabelIndex, #[case] display: &str) {
        let index = LabelIndex::from_count(count);
        assert_eq!(index, expected);
        assert_eq!(index.to_string(), display);
    }

    #[test]
    fn unknown_displays_question_mark() {
        assert_eq!(LabelIndex::Unknown.to_string(), "?");
    }
}
