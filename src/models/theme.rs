use crate::models::{DefaultEntity, Named};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Site branding: colors and style variants for one organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default)]
    pub organization: String,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub colors: Vec<Style>,

    #[serde(default)]
    pub variants: Vec<Style>,
}

/// CSS custom property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub key: String,
    pub value: String,
}

impl Theme {
    pub fn new(name: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            organization: organization.into(),
            active: false,
            colors: Vec::new(),
            variants: Vec::new(),
        }
    }
}

impl Named for Theme {
    fn name(&self) -> &str {
        &self.name
    }
}

impl DefaultEntity for Theme {
    const KIND: &'static str = "theme";

    fn id(&self) -> Uuid {
        self.id
    }

    fn overwrite_with(&mut self, incoming: Self) {
        let Theme {
            id: _,
            name,
            organization,
            active,
            colors,
            variants,
        } = incoming;

        self.name = name;
        self.organization = organization;
        self.active = active;
        self.colors = colors;
        self.variants = variants;
    }
}
