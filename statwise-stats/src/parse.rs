//! Parsing of pasted or typed text into engine inputs.
//!
//! Tokens are separated by whitespace or commas. Matrix rows are separated
//! by newlines.

use crate::error::StatsError;

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}

fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a sample, dropping tokens that are not finite numbers.
pub fn parse_sample(text: &str) -> Vec<f64> {
    tokens(text).filter_map(parse_finite).collect()
}

/// Parse category labels separated by whitespace or commas.
pub fn parse_categories(text: &str) -> Vec<String> {
    tokens(text).map(str::to_string).collect()
}

/// Parse a participants × items matrix, one participant per line.
///
/// Blank lines are skipped. A single non-numeric token rejects the whole
/// matrix, as do rows of differing length.
pub fn parse_item_matrix(text: &str) -> Result<Vec<Vec<f64>>, StatsError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let row = tokens(line)
            .map(|token| {
                parse_finite(token).ok_or_else(|| StatsError::MalformedInput {
                    token: token.to_string(),
                    line: idx + 1,
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if let Some(first) = rows.first()
            && first.len() != row.len()
        {
            return Err(StatsError::DimensionMismatch {
                expected: first.len(),
                actual: row.len(),
            });
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(StatsError::insufficient(1, 0));
    }

    Ok(rows)
}
