use std::fmt::{Display, Formatter};
use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Shortest augmenting paths found by breadth-first search.
    #[default]
    EdmondsKarp,
    /// Blocking flows on level graphs.
    Dinic,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Algorithm::EdmondsKarp => write!(f, "edmonds-karp"),
            Algorithm::Dinic => write!(f, "dinic"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "edmonds-karp" | "edmonds_karp" | "ek" => Ok(Algorithm::EdmondsKarp),
            "dinic" => Ok(Algorithm::Dinic),
            _ => Err(format!(
                "unknown algorithm `{s}`, expected `edmonds-karp` or `dinic`"
            )),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub algorithm: Algorithm,
    /// Abort a solve that is still running after this many milliseconds.
    pub timeout_ms: Option<u64>,
}

impl SolverConfig {
    pub fn from_json_str(contents: &str) -> Result<SolverConfig> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<SolverConfig> {
        SolverConfig::from_json_str(&read_to_string(path)?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod test {
    use super::{Algorithm, SolverConfig};
    use std::time::Duration;

    #[test]
    fn defaults() {
        let config = SolverConfig::from_json_str("{}").unwrap();
        assert_eq!(config.algorithm, Algorithm::EdmondsKarp);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn parse() {
        let config =
            SolverConfig::from_json_str(r#"{"algorithm": "dinic", "timeout_ms": 250}"#).unwrap();
        assert_eq!(config.algorithm, Algorithm::Dinic);
        assert_eq!(config.timeout(), Some(Duration::from_millis(250)));
        assert!(SolverConfig::from_json_str(r#"{"algo": "dinic"}"#).is_err());
    }

    #[test]
    fn algorithm_names() {
        assert_eq!("dinic".parse::<Algorithm>(), Ok(Algorithm::Dinic));
        assert_eq!("Edmonds-Karp".parse::<Algorithm>(), Ok(Algorithm::EdmondsKarp));
        assert!("simplex".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::Dinic.to_string(), "dinic");
    }
}
