use crate::dates::Urgency;
use crate::query::{Filter, Operator, Query};
use chrono::{Days, NaiveDateTime, NaiveTime};
use sqlx::{QueryBuilder, Sqlite};

/// Translates a [`Query`] AST into a SQL WHERE clause with bound values.
///
/// Due-date tiers become calendar-day boundaries computed from `now`, so
/// SQL filtering agrees exactly with [`crate::dates::classify_at`].
pub struct SqlQueryBuilder;

impl SqlQueryBuilder {
    pub fn build_where_clause(
        query: &Query,
        builder: &mut QueryBuilder<'_, Sqlite>,
        now: NaiveDateTime,
    ) {
        match query {
            Query::All => {
                builder.push("1 = 1");
            }
            Query::Filter(filter) => Self::push_filter(filter, builder, now),
            Query::Not(inner) => {
                builder.push("NOT (");
                Self::build_where_clause(inner, builder, now);
                builder.push(")");
            }
            Query::Binary { op, left, right } => {
                builder.push("(");
                Self::build_where_clause(left, builder, now);
                builder.push(match op {
                    Operator::And => ") AND (",
                    Operator::Or => ") OR (",
                });
                Self::build_where_clause(right, builder, now);
                builder.push(")");
            }
        }
    }

    fn push_filter(filter: &Filter, builder: &mut QueryBuilder<'_, Sqlite>, now: NaiveDateTime) {
        match filter {
            Filter::Completed(done) => {
                builder.push("t.is_completed = ");
                builder.push_bind(*done);
            }
            Filter::Priority(priority) => {
                builder.push("t.priority = ");
                builder.push_bind(priority.clone());
            }
            Filter::Project(name) => {
                builder.push(
                    "EXISTS (SELECT 1 FROM todo_projects tp \
                     JOIN projects p ON p.id = tp.project_id \
                     WHERE tp.todo_id = t.id AND p.name = ",
                );
                builder.push_bind(name.clone());
                builder.push(")");
            }
            Filter::Tag(tag) => {
                builder.push(
                    "EXISTS (SELECT 1 FROM todo_projects tp \
                     JOIN project_tags pt ON pt.project_id = tp.project_id \
                     JOIN tags tg ON tg.id = pt.tag_id \
                     WHERE tp.todo_id = t.id AND tg.name = ",
                );
                builder.push_bind(tag.clone());
                builder.push(")");
            }
            Filter::Due(tier) => Self::push_due_filter(*tier, builder, now),
        }
    }

    fn push_due_filter(tier: Urgency, builder: &mut QueryBuilder<'_, Sqlite>, now: NaiveDateTime) {
        let today_start = now.date().and_time(NaiveTime::MIN);
        let tomorrow_start = today_start + Days::new(1);
        let soon_end = today_start + Days::new(4);

        match tier {
            Urgency::Overdue => {
                builder.push("(t.due_at IS NOT NULL AND t.due_at < ");
                builder.push_bind(today_start);
                builder.push(")");
            }
            Urgency::Today => {
                builder.push("(t.due_at >= ");
                builder.push_bind(today_start);
                builder.push(" AND t.due_at < ");
                builder.push_bind(tomorrow_start);
                builder.push(")");
            }
            Urgency::Soon => {
                builder.push("(t.due_at >= ");
                builder.push_bind(tomorrow_start);
                builder.push(" AND t.due_at < ");
                builder.push_bind(soon_end);
                builder.push(")");
            }
            Urgency::Later => {
                builder.push("(t.due_at >= ");
                builder.push_bind(soon_end);
                builder.push(")");
            }
            Urgency::None => {
                builder.push("t.due_at IS NULL");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoPriority;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn sql_for(query: &Query) -> String {
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
        SqlQueryBuilder::build_where_clause(query, &mut builder, now());
        builder.sql().to_string()
    }

    #[test]
    fn all_matches_everything() {
        assert_eq!(sql_for(&Query::All), "1 = 1");
    }

    #[test]
    fn binary_operators_parenthesize_both_sides() {
        let query = Query::Binary {
            op: Operator::And,
            left: Box::new(Query::Filter(Filter::Completed(false))),
            right: Box::new(Query::Not(Box::new(Query::Filter(Filter::Priority(
                TodoPriority::Low,
            ))))),
        };
        let sql = sql_for(&query);
        assert!(sql.contains("t.is_completed ="));
        assert!(sql.contains(") AND ("));
        assert!(sql.contains("NOT (t.priority ="));
    }

    #[test]
    fn due_none_needs_no_binds() {
        assert_eq!(
            sql_for(&Query::Filter(Filter::Due(Urgency::None))),
            "t.due_at IS NULL"
        );
    }

    #[test]
    fn due_tiers_bound_on_day_boundaries() {
        for tier in [Urgency::Overdue, Urgency::Today, Urgency::Soon, Urgency::Later] {
            let sql = sql_for(&Query::Filter(Filter::Due(tier)));
            assert!(sql.contains("t.due_at"), "{tier}: {sql}");
        }
    }
}
