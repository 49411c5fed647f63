use serde::{Deserialize, Serialize};
use validator::Validate;

/// Scholar profile as harvested and indexed for discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Identifier assigned by the harvest source
    #[validate(length(min = 1, max = 255))]
    pub id: String,

    #[validate(length(min = 1, max = 500))]
    pub name: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub overview: String,

    #[serde(default)]
    pub subject_areas: Vec<String>,

    pub organization: Option<String>,

    pub position_type: Option<String>,

    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: String::new(),
            overview: String::new(),
            subject_areas: Vec::new(),
            organization: None,
            position_type: None,
            keywords: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    pub fn with_subject_areas(mut self, areas: Vec<impl Into<String>>) -> Self {
        self.subject_areas = areas.into_iter().map(|a| a.into()).collect();
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_position_type(mut self, position_type: impl Into<String>) -> Self {
        self.position_type = Some(position_type.into());
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<impl Into<String>>) -> Self {
        self.keywords = keywords.into_iter().map(|k| k.into()).collect();
        self
    }
}
