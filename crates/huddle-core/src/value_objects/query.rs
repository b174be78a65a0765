//! Collection queries - equality filters, ordering, and limits

use serde_json::Value;
use std::cmp::Ordering;

use super::document::Document;

/// Sort direction of an ordered query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Equality filter on a single field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

/// Ordering clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Query over one collection
///
/// Without an `order_by` clause results come back ordered by document id.
/// With one, documents lacking the ordered field are excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    /// Query returning every document of `collection`
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    /// Add an equality filter
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a document satisfies the collection, filters, and order field presence
    pub fn matches(&self, document: &Document) -> bool {
        if document.reference.collection() != self.collection {
            return false;
        }
        if let Some(order) = &self.order_by {
            if !document.fields.contains_key(&order.field) {
                return false;
            }
        }
        self.filters
            .iter()
            .all(|filter| document.get(&filter.field) == Some(&filter.value))
    }

    /// Evaluate the query against a set of documents
    pub fn apply<'a, I>(&self, documents: I) -> Vec<Document>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut results: Vec<Document> = documents
            .into_iter()
            .filter(|doc| self.matches(doc))
            .cloned()
            .collect();

        results.sort_by(|a, b| self.compare(a, b));

        if let Some(limit) = self.limit {
            results.truncate(limit);
        }
        results
    }

    fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let by_field = match &self.order_by {
            Some(order) => {
                let ord = compare_values(
                    a.get(&order.field).unwrap_or(&Value::Null),
                    b.get(&order.field).unwrap_or(&Value::Null),
                );
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            }
            None => Ordering::Equal,
        };
        by_field.then_with(|| a.id().cmp(b.id()))
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values: null < bool < number < string < array < object
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(x, y)| compare_values(x, y))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
