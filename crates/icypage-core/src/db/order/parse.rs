use crate::{db::order::OrderDirection, error::ValidationError};

///
/// OrderClause
///
/// One parsed `<field> [asc|desc]` clause. The field name is untrusted until
/// it passes `validate_ordering`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderClause {
    pub field: String,
    pub direction: OrderDirection,
    /// Trimmed source text, kept for diagnostics.
    pub clause: String,
}

/// Parse a comma-separated ordering string such as `"name, createdAt desc"`.
///
/// Empty clauses are skipped. Direction tokens are case-insensitive and
/// default to ascending. Field existence is not checked here.
pub fn parse_ordering(text: &str) -> Result<Vec<OrderClause>, ValidationError> {
    text.split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(parse_clause)
        .collect()
}

fn parse_clause(clause: &str) -> Result<OrderClause, ValidationError> {
    let tokens: Vec<&str> = clause.split_whitespace().collect();

    let (field, direction) = match tokens.as_slice() {
        [field] => (*field, OrderDirection::Asc),
        [field, direction] => (*field, parse_direction(direction, clause)?),
        _ => {
            return Err(ValidationError::MalformedClause {
                clause: clause.to_string(),
            });
        }
    };

    Ok(OrderClause {
        field: field.to_string(),
        direction,
        clause: clause.to_string(),
    })
}

fn parse_direction(token: &str, clause: &str) -> Result<OrderDirection, ValidationError> {
    if token.eq_ignore_ascii_case("asc") {
        Ok(OrderDirection::Asc)
    } else if token.eq_ignore_ascii_case("desc") {
        Ok(OrderDirection::Desc)
    } else {
        Err(ValidationError::InvalidDirection {
            token: token.to_string(),
            clause: clause.to_string(),
        })
    }
}
