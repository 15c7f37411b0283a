use std::num::ParseIntError;

use thiserror::Error;

/// Failures that abort the current parse outright.
///
/// Malformed statements are not reported here; they become
/// [`Statement::Bad`](super::Statement::Bad) and parsing carries on.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse {literal} to integer: {source}")]
    IntegerLiteral {
        literal: String,
        #[source]
        source: ParseIntError,
    },
}
