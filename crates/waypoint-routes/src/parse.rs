use crate::route::Route;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a JSON array of route declarations.
pub fn parse_routes(json: &str) -> Result<Vec<Route>, ParseError> {
    Ok(serde_json::from_str(json)?)
}
