//! Search document structures and indexing

use crate::models::Person;
use crate::search::error::{SearchError, SearchResult};
use tantivy::schema::*;
use tantivy::TantivyDocument;

/// Faceted fields: client-facing name and the schema field backing it
const FACET_FIELDS: &[(&str, &str)] = &[
    ("subjectArea", "subject_area"),
    ("organization", "organization"),
    ("positionType", "position_type"),
    ("keyword", "keyword"),
];

/// Fields the free-text query searches
pub(crate) const TEXT_FIELDS: &[&str] = &["name", "title", "overview", "keywords"];

/// Whether clients may facet or filter on `name`
pub fn is_facet_field(name: &str) -> bool {
    facet_index_field(name).is_some()
}

/// Schema field backing the client-facing facet `name`
pub fn facet_index_field(name: &str) -> Option<&'static str> {
    FACET_FIELDS
        .iter()
        .find(|(client, _)| *client == name)
        .map(|(_, index)| *index)
}

/// Client-facing facet names in schema order
pub fn facet_fields() -> impl Iterator<Item = &'static str> {
    FACET_FIELDS.iter().map(|(client, _)| *client)
}

/// Hierarchical facet for a value: `/<index field>/<value>`
pub(crate) fn facet_value(index_field: &str, value: &str) -> Facet {
    Facet::from_path(vec![index_field, value])
}

/// Trait for documents that can be indexed and searched
pub trait SearchDocument {
    /// Convert to Tantivy document
    fn to_tantivy_doc(&self, schema: &Schema) -> SearchResult<TantivyDocument>;

    /// Get document ID
    fn document_id(&self) -> String;
}

/// Person document for search indexing
#[derive(Debug, Clone)]
pub struct PersonDocument {
    person: Person,
}

impl PersonDocument {
    /// Rebuild the person from the stored source field
    pub fn from_stored(doc: &TantivyDocument, schema: &Schema) -> SearchResult<Person> {
        let field = schema
            .get_field("source")
            .map_err(|e| SearchError::UnknownField(e.to_string()))?;

        let source = doc
            .get_first(field)
            .and_then(|v| v.as_str())
            .ok_or_else(|| SearchError::CorruptDocument("missing source".to_string()))?;

        serde_json::from_str(source).map_err(|e| SearchError::CorruptDocument(e.to_string()))
    }
}

impl From<&Person> for PersonDocument {
    fn from(person: &Person) -> Self {
        Self {
            person: person.clone(),
        }
    }
}

impl From<Person> for PersonDocument {
    fn from(person: Person) -> Self {
        Self { person }
    }
}

impl SearchDocument for PersonDocument {
    fn to_tantivy_doc(&self, schema: &Schema) -> SearchResult<TantivyDocument> {
        let person = &self.person;
        let mut doc = TantivyDocument::new();

        if let Ok(field) = schema.get_field("id") {
            doc.add_text(field, &person.id);
        }

        if let Ok(field) = schema.get_field("name") {
            doc.add_text(field, &person.name);
        }

        if let Ok(field) = schema.get_field("title") {
            doc.add_text(field, &person.title);
        }

        if let Ok(field) = schema.get_field("overview") {
            doc.add_text(field, &person.overview);
        }

        if let Ok(field) = schema.get_field("keywords") {
            for keyword in &person.keywords {
                doc.add_text(field, keyword);
            }
        }

        if let Ok(field) = schema.get_field("subject_area") {
            for area in &person.subject_areas {
                doc.add_facet(field, facet_value("subject_area", area));
            }
        }

        if let (Ok(field), Some(organization)) =
            (schema.get_field("organization"), person.organization.as_ref())
        {
            doc.add_facet(field, facet_value("organization", organization));
        }

        if let (Ok(field), Some(position_type)) =
            (schema.get_field("position_type"), person.position_type.as_ref())
        {
            doc.add_facet(field, facet_value("position_type", position_type));
        }

        if let Ok(field) = schema.get_field("keyword") {
            for keyword in &person.keywords {
                doc.add_facet(field, facet_value("keyword", keyword));
            }
        }

        // Whole record, so hits can be returned without a repository lookup
        if let Ok(field) = schema.get_field("source") {
            let source = serde_json::to_string(person)
                .map_err(|e| SearchError::IndexingFailed(e.to_string()))?;
            doc.add_text(field, source);
        }

        Ok(doc)
    }

    fn document_id(&self) -> String {
        self.person.id.clone()
    }
}

/// Build the search schema for persons
pub fn build_person_schema() -> Schema {
    let mut schema_builder = Schema::builder();

    schema_builder.add_text_field("id", STRING | STORED);

    schema_builder.add_text_field("name", TEXT);
    schema_builder.add_text_field("title", TEXT);
    schema_builder.add_text_field("overview", TEXT);
    schema_builder.add_text_field("keywords", TEXT);

    for (_, index_field) in FACET_FIELDS {
        schema_builder.add_facet_field(index_field, INDEXED);
    }

    schema_builder.add_text_field("source", STORED);

    schema_builder.build()
}
