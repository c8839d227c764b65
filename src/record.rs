use std::collections::{HashMap, HashSet};

/// A field value as carried through the pipeline. Every field starts out as
/// a `Scalar`; merging datasets promotes a field to `Multi` when more than
/// one source supplies a differing value for the same key.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// The first value regardless of shape. Scoring reads fields through
    /// this, so a merge conflict never changes which value gets scored.
    pub fn first(&self) -> &str {
        match self {
            FieldValue::Scalar(v) => v,
            FieldValue::Multi(vs) => vs.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Flatten to a single string for persistence; multi-values join with `|`.
    pub fn flattened(&self) -> String {
        match self {
            FieldValue::Scalar(v) => v.clone(),
            FieldValue::Multi(vs) => vs.join("|"),
        }
    }

    /// Append every value of `other`, promoting self to `Multi`. Duplicates
    /// are kept here; `Record::dedup_multi_values` collapses them afterwards.
    pub(crate) fn extend_from(&mut self, other: FieldValue) {
        let mut values = match std::mem::replace(self, FieldValue::Multi(Vec::new())) {
            FieldValue::Scalar(v) => vec![v],
            FieldValue::Multi(vs) => vs,
        };
        match other {
            FieldValue::Scalar(v) => values.push(v),
            FieldValue::Multi(vs) => values.extend(vs),
        }
        *self = FieldValue::Multi(values);
    }
}

/// An insertion-ordered mapping from field name to value. Field order is
/// significant: it is the column order of the source file header and the
/// column order of everything written downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field. Replacing keeps the field's position.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn set_scalar(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name, FieldValue::Scalar(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// First value of a field, if the field exists.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(FieldValue::first)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn into_fields(self) -> Vec<(String, FieldValue)> {
        self.fields
    }

    /// Collapse exact-duplicate entries in every multi-valued field while
    /// preserving first-seen order. A list reduced to a single element
    /// becomes a scalar again, so merging equal values never list-wraps.
    pub fn dedup_multi_values(&mut self) {
        for (_, value) in &mut self.fields {
            if let FieldValue::Multi(values) = value {
                let mut seen = HashSet::new();
                values.retain(|v| seen.insert(v.clone()));
                if values.len() == 1 {
                    *value = FieldValue::Scalar(values.remove(0));
                }
            }
        }
    }
}

/// A dataset keyed by a primary-key column value, insertion order preserved.
/// Inserting at an existing key replaces the record without moving it.
#[derive(Debug, Clone, Default)]
pub struct KeyedDataset {
    order: Vec<String>,
    records: HashMap<String, Record>,
}

impl KeyedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, record: Record) {
        let key = key.into();
        if self.records.insert(key.clone(), record).is_none() {
            self.order.push(key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.records.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.order
            .iter()
            .filter_map(|k| self.records.get(k).map(|r| (k.as_str(), r)))
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.records.values_mut()
    }

    /// Consume into `(key, record)` pairs in insertion order.
    pub fn into_entries(self) -> Vec<(String, Record)> {
        let KeyedDataset { order, mut records } = self;
        order
            .into_iter()
            .filter_map(|k| records.remove(&k).map(|r| (k, r)))
            .collect()
    }

    /// Consume into records in insertion order, discarding keys.
    pub fn into_records(self) -> Vec<Record> {
        self.into_entries().into_iter().map(|(_, r)| r).collect()
    }
}
