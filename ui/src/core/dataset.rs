//! Loading of the two embedded survey datasets.
//!
//! Both CSV files ship inside the binary (`ui/data/`, via `rust-embed`). The
//! loader renames the raw survey columns into the record shapes of
//! [`crate::core::record`] and coerces the numeric fields. Each dataset loads
//! independently: a failure is logged and only the views that depend on the
//! failed dataset stay empty. There is no retry.

use rust_embed::Embed;
use serde::de::DeserializeOwned;

use super::error::DatasetError;
use super::record::{Dataset, SurveyRow, WellbeingResponse};

pub const SURVEY_FILE: &str = "dataset1.csv";
pub const WELLBEING_FILE: &str = "dataset2-output.csv";

#[derive(Embed)]
#[folder = "data"]
struct Datasets;

/// Everything the story pages need, as far as it could be loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryData {
    pub survey: Option<Dataset<SurveyRow>>,
    pub wellbeing: Option<Dataset<WellbeingResponse>>,
}

pub fn parse_survey_csv(text: &str) -> Result<Dataset<SurveyRow>, DatasetError> {
    parse_records(SURVEY_FILE, text)
}

pub fn parse_wellbeing_csv(text: &str) -> Result<Dataset<WellbeingResponse>, DatasetError> {
    parse_records(WELLBEING_FILE, text)
}

/// Load both bundled datasets. Never fails as a whole; see module docs.
pub fn load_bundle() -> StoryData {
    let survey = load_embedded(SURVEY_FILE)
        .and_then(|text| parse_survey_csv(&text))
        .inspect(|rows| tracing::info!(rows = rows.len(), "loaded {SURVEY_FILE}"))
        .map_err(|err| tracing::error!("{err}"))
        .ok();

    let wellbeing = load_embedded(WELLBEING_FILE)
        .and_then(|text| parse_wellbeing_csv(&text))
        .inspect(|rows| tracing::info!(rows = rows.len(), "loaded {WELLBEING_FILE}"))
        .map_err(|err| tracing::error!("{err}"))
        .ok();

    StoryData { survey, wellbeing }
}

fn load_embedded(name: &'static str) -> Result<String, DatasetError> {
    let file = Datasets::get(name).ok_or(DatasetError::Missing(name))?;
    std::str::from_utf8(&file.data)
        .map(str::to_owned)
        .map_err(|source| DatasetError::Encoding { name, source })
}

fn parse_records<R: DeserializeOwned>(
    name: &'static str,
    text: &str,
) -> Result<Dataset<R>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(|source| DatasetError::Parse { name, source })?;

    Ok(Dataset::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURVEY: &str = "\
ID,gender,category,value,indicators,amount,STATUS
1,All,education,Bachelor's degree or higher,Sometimes feels lonely,120,
2,Women,education,Bachelor's degree or higher,Always or often feels lonely,F,E
";

    #[test]
    fn survey_columns_are_renamed_and_coerced() {
        let rows = parse_survey_csv(SURVEY).unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.loneliness, "Sometimes feels lonely");
        assert_eq!(first.amount, Some(120));

        let second = &rows[1];
        assert_eq!(second.amount, None);
        assert_eq!(second.status, "E");
    }

    #[test]
    fn wellbeing_ignores_unused_columns() {
        let text = "\
RecordedDate,BFF_15_5,BFF_15_6,Dem_islolation,Scale_PSS10_UCLA_13,Scale_PSS10_UCLA_3,Expl_Distress_18,Expl_Distress_19,OECD_people_1
2020-04-01,Agree,Disagree,Isolated,Sometimes,Fairly often,Slightly agree,Agree,7
";
        let rows = parse_wellbeing_csv(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].covid, "Isolated");
        assert_eq!(rows[0].trust, Some(7));
    }

    #[test]
    fn missing_columns_are_a_load_failure() {
        let err = parse_wellbeing_csv("BFF_15_5\nAgree\n").unwrap_err();
        assert!(matches!(err, DatasetError::Parse { name, .. } if name == WELLBEING_FILE));
    }

    #[test]
    fn bundled_datasets_load() {
        let data = load_bundle();
        assert!(data.survey.is_some_and(|rows| !rows.is_empty()));
        assert!(data.wellbeing.is_some_and(|rows| !rows.is_empty()));
    }
}
