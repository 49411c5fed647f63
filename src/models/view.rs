use crate::models::{DefaultEntity, Named};
use crate::search::FacetSort;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Layout {
    #[default]
    List,
    Grid,
}

/// Facet shown in a view's sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewFacet {
    /// Label shown to users
    pub name: String,
    pub field: String,
    #[serde(default)]
    pub sort: FacetSort,
    #[serde(default = "default_facet_page_size")]
    pub page_size: u32,
}

/// Fixed restriction applied to every query a view issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    pub field: String,
    pub value: String,
}

/// Alphabetical browse page over one collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryView {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[validate(length(min = 1))]
    pub name: String,

    pub collection: String,

    #[serde(default)]
    pub layout: Layout,

    #[serde(default)]
    pub template: String,

    #[serde(default)]
    pub styles: Vec<String>,

    /// Field the A-Z index is built on
    pub index_field: String,

    #[serde(default)]
    pub facets: Vec<ViewFacet>,

    #[serde(default)]
    pub filters: Vec<ViewFilter>,
}

/// Search page over one collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryView {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[validate(length(min = 1))]
    pub name: String,

    pub collection: String,

    #[serde(default)]
    pub layout: Layout,

    #[serde(default)]
    pub template: String,

    #[serde(default)]
    pub styles: Vec<String>,

    /// Fields the free-text query runs against
    #[serde(default)]
    pub search_fields: Vec<String>,

    #[serde(default)]
    pub facets: Vec<ViewFacet>,

    #[serde(default)]
    pub filters: Vec<ViewFilter>,
}

impl Named for DirectoryView {
    fn name(&self) -> &str {
        &self.name
    }
}

impl DefaultEntity for DirectoryView {
    const KIND: &'static str = "directory_view";

    fn id(&self) -> Uuid {
        self.id
    }

    fn overwrite_with(&mut self, incoming: Self) {
        let DirectoryView {
            id: _,
            name,
            collection,
            layout,
            template,
            styles,
            index_field,
            facets,
            filters,
        } = incoming;

        self.name = name;
        self.collection = collection;
        self.layout = layout;
        self.template = template;
        self.styles = styles;
        self.index_field = index_field;
        self.facets = facets;
        self.filters = filters;
    }
}

impl Named for DiscoveryView {
    fn name(&self) -> &str {
        &self.name
    }
}

impl DefaultEntity for DiscoveryView {
    const KIND: &'static str = "discovery_view";

    fn id(&self) -> Uuid {
        self.id
    }

    fn overwrite_with(&mut self, incoming: Self) {
        let DiscoveryView {
            id: _,
            name,
            collection,
            layout,
            template,
            styles,
            search_fields,
            facets,
            filters,
        } = incoming;

        self.name = name;
        self.collection = collection;
        self.layout = layout;
        self.template = template;
        self.styles = styles;
        self.search_fields = search_fields;
        self.facets = facets;
        self.filters = filters;
    }
}

fn default_facet_page_size() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISCOVERY_YAML: &str = r#"
- name: People
  collection: persons
  layout: GRID
  searchFields: [name, overview]
  facets:
    - name: Subject Area
      field: subjectArea
      sort: INDEX
    - name: Organization
      field: organization
      pageSize: 5
  filters:
    - field: positionType
      value: Faculty
"#;

    #[test]
    fn test_decode_discovery_views() {
        let views: Vec<DiscoveryView> = serde_yaml::from_str(DISCOVERY_YAML).unwrap();
        let view = &views[0];

        assert_eq!(view.layout, Layout::Grid);
        assert_eq!(view.facets[0].sort, FacetSort::Index);
        assert_eq!(view.facets[0].page_size, 10);
        assert_eq!(view.facets[1].sort, FacetSort::Count);
        assert_eq!(view.facets[1].page_size, 5);
        assert_eq!(view.filters[0].value, "Faculty");
    }

    #[test]
    fn test_overwrite_discovery_view() {
        let mut views: Vec<DiscoveryView> = serde_yaml::from_str(DISCOVERY_YAML).unwrap();
        let mut existing = views.remove(0);
        let id = existing.id;

        let mut incoming = existing.clone();
        incoming.id = Uuid::new_v4();
        incoming.layout = Layout::List;
        incoming.facets.clear();

        existing.overwrite_with(incoming);
        assert_eq!(existing.id, id);
        assert_eq!(existing.layout, Layout::List);
        assert!(existing.facets.is_empty());
    }

    #[test]
    fn test_layout_strings() {
        assert_eq!(Layout::Grid.to_string(), "GRID");
        assert_eq!("LIST".parse::<Layout>().unwrap(), Layout::List);
    }
}
