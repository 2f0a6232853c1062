use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{RecipeError, Result};
use crate::schema::JsonSource;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The location of a recipe on the web
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebLocation {
    pub url: String,
    /// When the page was last read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval_date: Option<NaiveDate>,
}

/// Where a recipe came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// Full name of the recipe's author
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<WebLocation>,
}

impl Source {
    pub fn new(author: impl Into<String>, location: Option<WebLocation>) -> Self {
        Source {
            author: author.into(),
            location,
        }
    }

    pub fn from_schema(source: JsonSource) -> Result<Source> {
        let location = source
            .location
            .map(|location| -> Result<WebLocation> {
                let retrieval_date = location
                    .retrieval_date
                    .as_deref()
                    .map(parse_date)
                    .transpose()?;
                Ok(WebLocation {
                    url: location.url,
                    retrieval_date,
                })
            })
            .transpose()?;
        Ok(Source::new(source.author, location))
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| {
        RecipeError::Schema(format!("invalid retrievalDate '{}': {}", text, e))
    })
}
