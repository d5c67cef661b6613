use crate::dates::Urgency;
use crate::models::TodoPriority;

#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Matches every todo; the empty filter string.
    All,
    Filter(Filter),
    Not(Box<Query>),
    Binary {
        op: Operator,
        left: Box<Query>,
        right: Box<Query>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Linked to a project with this name.
    Project(String),
    /// Linked to a project carrying this tag.
    Tag(String),
    Completed(bool),
    Priority(TodoPriority),
    /// Due-date urgency tier, evaluated against "now" at query time.
    Due(Urgency),
}
