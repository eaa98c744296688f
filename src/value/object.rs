use indexmap::map::{IndexMap, IntoIter};

use super::Value;

/// Keyed record of output values, preserving field insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct Object<S> {
    key_value_list: IndexMap<String, Value<S>>,
}

impl<S> Default for Object<S> {
    fn default() -> Self {
        Self {
            key_value_list: IndexMap::new(),
        }
    }
}

impl<S> Object<S> {
    /// Creates a new [`Object`] with a fixed number of preallocated slots for
    /// field-value pairs.
    pub fn with_capacity(size: usize) -> Self {
        Self {
            key_value_list: IndexMap::with_capacity(size),
        }
    }

    /// Adds a new field with a value.
    ///
    /// If there is already a field for the given key and both values are
    /// objects, they are merged. Otherwise the existing value is replaced and
    /// returned.
    pub fn add_field<K>(&mut self, k: K, value: Value<S>) -> Option<Value<S>>
    where
        K: Into<String>,
    {
        let key: String = k.into();
        match (value, self.key_value_list.get_mut(&key)) {
            (Value::Object(obj_val), Some(Value::Object(existing_obj))) => {
                for (key, val) in obj_val {
                    existing_obj.add_field(key, val);
                }
                None
            }
            (non_obj_val, _) => self.key_value_list.insert(key, non_obj_val),
        }
    }

    /// Removes a field, returning its value.
    pub fn remove_field(&mut self, key: &str) -> Option<Value<S>> {
        self.key_value_list.shift_remove(key)
    }

    /// Checks whether this [`Object`] already contains a field with the given
    /// name.
    pub fn contains_field(&self, key: &str) -> bool {
        self.key_value_list.contains_key(key)
    }

    /// Returns an iterator over all field-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value<S>)> {
        self.key_value_list.iter()
    }

    /// Returns the current number of fields.
    pub fn field_count(&self) -> usize {
        self.key_value_list.len()
    }

    /// Returns the value of the given field, if any.
    pub fn get_field_value(&self, key: &str) -> Option<&Value<S>> {
        self.key_value_list.get(key)
    }
}

impl<S> IntoIterator for Object<S> {
    type Item = (String, Value<S>);
    type IntoIter = IntoIter<String, Value<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.key_value_list.into_iter()
    }
}

impl<S> From<Object<S>> for Value<S> {
    fn from(o: Object<S>) -> Self {
        Self::Object(o)
    }
}

impl<K, S> FromIterator<(K, Value<S>)> for Object<S>
where
    K: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, Value<S>)>,
    {
        let iter = iter.into_iter();
        let mut ret = Self::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            ret.add_field(k, v);
        }
        ret
    }
}
