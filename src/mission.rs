// Mission payload returned by the Millenium Falcon computer.

use serde::Deserialize;

use crate::error::Result;

/// Response sent back by the backend for a `/r2d2` query.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Mission {
    /// Probability (in percent) that the mission will succeed.
    pub probability: f64,
}

impl Mission {
    /// Parse a mission from a JSON response body. Unknown fields are ignored,
    /// a missing or non-numeric `probability` is an error.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// The probability rendered as `NN.NN%`.
    pub fn formatted(&self) -> String {
        format_probability(self.probability)
    }
}

pub fn format_probability(probability: f64) -> String {
    format!("{:.2}%", probability)
}
