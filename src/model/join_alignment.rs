use std::fmt;

/// How the join list lines up with the table list. Every table after the
/// driving one should own exactly one join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinAlignment {
    Aligned,
    /// Tables without a join.
    MissingJoins(usize),
    /// Joins without a table.
    SurplusJoins(usize),
}

impl JoinAlignment {
    pub fn of(table_count: usize, join_count: usize) -> Self {
        let expected = table_count.saturating_sub(1);
        match join_count.cmp(&expected) {
            std::cmp::Ordering::Equal => JoinAlignment::Aligned,
            std::cmp::Ordering::Less => JoinAlignment::MissingJoins(expected - join_count),
            std::cmp::Ordering::Greater => JoinAlignment::SurplusJoins(join_count - expected),
        }
    }

    pub fn is_aligned(&self) -> bool {
        matches!(self, JoinAlignment::Aligned)
    }
}

impl fmt::Display for JoinAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinAlignment::Aligned => write!(f, "aligned"),
            JoinAlignment::MissingJoins(n) => write!(f, "{} table(s) without a join", n),
            JoinAlignment::SurplusJoins(n) => write!(f, "{} join(s) without a table", n),
        }
    }
}
