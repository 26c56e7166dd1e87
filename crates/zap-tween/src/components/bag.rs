use crate::api::host::Tweenable;
use crate::api::types::ObjectId;
use crate::extensions::value::Value;

/// Plain object with named values, such as a UI transform's `content_size`
/// or a material's `color`.
///
/// Properties keep the kind they were inserted with; writes of another
/// kind are rejected.
#[derive(Debug, Clone)]
pub struct PropertyBag {
    pub id: ObjectId,
    props: Vec<(String, Value)>,
}

impl PropertyBag {
    pub fn new(id: ObjectId) -> Self {
        Self { id, props: Vec::new() }
    }

    /// Add or replace a property.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a property, regardless of its previous kind.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.props.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.props.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.props.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl Tweenable for PropertyBag {
    fn property(&self, name: &str) -> Option<Value> {
        self.get(name)
    }

    fn set_property(&mut self, name: &str, value: Value) -> bool {
        match self.props.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) if v.same_kind(&value) => {
                *v = value;
                true
            }
            _ => false,
        }
    }
}
