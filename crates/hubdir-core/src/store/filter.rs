use sqlx::{QueryBuilder, Sqlite};

/// Predicate over top-level document members.
///
/// Compiled into parameterised SQL over `json_extract`; field paths and
/// values are always bound, never spliced into the statement text.
/// Substring matches run through the `REGEXP` function registered on every
/// connection by [`DocumentStore::connect`](super::DocumentStore::connect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// Exact string equality on `field`.
    Eq { field: String, value: String },
    /// Literal, case-insensitive substring match on the first of `fields`
    /// the document has. Case folding covers all of Unicode. Documents with
    /// none of the members never match.
    ContainsIgnoreCase { fields: Vec<String>, needle: String },
    /// Every inner filter matches. Empty matches everything.
    And(Vec<Filter>),
    /// At least one inner filter matches. Empty matches nothing.
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains_ignore_case(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::ContainsIgnoreCase {
            fields: vec![field.into()],
            needle: needle.into(),
        }
    }

    /// Like [`Filter::contains_ignore_case`], but reads the first member of
    /// `fields` present in the document, the way a mapping with fallbacks
    /// would.
    pub fn first_contains_ignore_case<I, S>(fields: I, needle: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ContainsIgnoreCase {
            fields: fields.into_iter().map(Into::into).collect(),
            needle: needle.into(),
        }
    }

    pub fn and_all(filters: Vec<Filter>) -> Self {
        Self::And(filters)
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Self::Or(filters)
    }

    /// Conjunction of `self` and `other`, with [`Filter::All`] as identity.
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), f) => {
                left.push(f);
                Filter::And(left)
            }
            (f, Filter::And(mut right)) => {
                right.insert(0, f);
                Filter::And(right)
            }
            (left, right) => Filter::And(vec![left, right]),
        }
    }

    pub(crate) fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        match self {
            Filter::All => {
                qb.push("1 = 1");
            }
            Filter::Eq { field, value } => {
                qb.push("json_extract(body, ");
                qb.push_bind(json_path(field));
                qb.push(") = ");
                qb.push_bind(value.clone());
            }
            Filter::ContainsIgnoreCase { fields, needle } => {
                match fields.as_slice() {
                    [] => {
                        qb.push("1 = 0");
                        return;
                    }
                    [field] => push_extract(qb, field),
                    [first, rest @ ..] => {
                        qb.push("coalesce(");
                        push_extract(qb, first);
                        for field in rest {
                            qb.push(", ");
                            push_extract(qb, field);
                        }
                        qb.push(")");
                    }
                }
                qb.push(" REGEXP ");
                qb.push_bind(literal_pattern(needle));
            }
            Filter::And(parts) => push_joined(qb, parts, " AND ", "1 = 1"),
            Filter::Or(parts) => push_joined(qb, parts, " OR ", "1 = 0"),
        }
    }
}

fn push_joined<'args>(
    qb: &mut QueryBuilder<'args, Sqlite>,
    parts: &[Filter],
    separator: &str,
    empty: &str,
) {
    if parts.is_empty() {
        qb.push(empty);
        return;
    }
    qb.push("(");
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        part.push_sql(qb);
    }
    qb.push(")");
}

fn push_extract<'args>(qb: &mut QueryBuilder<'args, Sqlite>, field: &str) {
    qb.push("json_extract(body, ");
    qb.push_bind(json_path(field));
    qb.push(")");
}

/// Case-insensitive pattern matching `needle` verbatim.
fn literal_pattern(needle: &str) -> String {
    format!("(?i){}", regex::escape(needle))
}

/// JSON path of a top-level member. Quoting keeps dots and spaces in member
/// names from being read as path syntax.
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', ""))
}
