use crate::forms::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: Option<String>,
    /// A file path, relative to the configuration file, or `stdout`.
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

/// The `config` section of the summary of one role.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub role: String,
    pub threshold: String,
    pub seats: u32,
    #[serde(rename = "formalVotes")]
    pub formal_votes: u64,
    #[serde(rename = "informalVotes")]
    pub informal_votes: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    pub name: String,
    pub seats: Option<u32>,
    pub excluded: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    pub seats: Option<u32>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<u32>,
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
    pub roles: Option<Vec<RoleConfig>>,
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
}

impl FormsConfig {
    /// The tiebreak mode named in the file, if any.
    pub fn tiebreak_mode(&self, seed: u32) -> FormsResult<Option<TieBreakMode>> {
        match self.tiebreak_mode.as_deref() {
            None => Ok(None),
            Some("random") => Ok(Some(TieBreakMode::Random(seed))),
            Some("stopCounting") => Ok(Some(TieBreakMode::StopCounting)),
            Some(x) => whatever!(
                "Unknown tiebreakMode {:?}: expected \"random\" or \"stopCounting\"",
                x
            ),
        }
    }
}

pub fn parse_config(contents: &str) -> FormsResult<FormsConfig> {
    serde_json::from_str(contents).context(ParsingJsonSnafu {})
}

pub fn read_config(path: &str) -> FormsResult<FormsConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let config = parse_config(
            r#"{
              "filePath": "responses.csv",
              "inputType": "csv",
              "seats": 1,
              "randomSeed": 2022,
              "tiebreakMode": "stopCounting",
              "roles": [
                { "name": "Secretary" },
                { "name": "Committee", "seats": 2, "excluded": ["Dana"] }
              ],
              "outputSettings": { "contestName": "Club elections", "outputPath": "summary.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.file_path.as_deref(), Some("responses.csv"));
        assert_eq!(config.random_seed, Some(2022));
        let roles = config.roles.clone().unwrap();
        assert_eq!(roles[0].seats, None);
        assert_eq!(roles[1].excluded, Some(vec!["Dana".to_string()]));
        assert_eq!(
            config.tiebreak_mode(0).unwrap(),
            Some(TieBreakMode::StopCounting)
        );
        assert_eq!(
            config.output_settings.unwrap().contest_name.as_deref(),
            Some("Club elections")
        );
    }

    #[test]
    fn empty_config() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, FormsConfig::default());
        assert_eq!(config.tiebreak_mode(3).unwrap(), None);
    }

    #[test]
    fn bad_tiebreak_mode() {
        let config = parse_config(r#"{"tiebreakMode": "coin"}"#).unwrap();
        assert!(config.tiebreak_mode(3).is_err());
        assert!(parse_config(r#"{"seats": "two"}"#).is_err());
    }
}
