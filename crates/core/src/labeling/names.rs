use std::collections::BTreeMap;


/// Built-in canonical key -> localized display name pairs.
const DEFAULT_NAMES: &[(&str, &str)] = &[
    ("head", "頭部"),
    ("neck", "頸部"),
    ("chest", "胸部"),
    ("obliques", "側腹"),
    ("abs", "腹肌"),
    ("biceps", "二頭肌"),
    ("triceps", "三頭肌"),
    ("front_deltoids", "前三角肌"),
    ("back_deltoids", "後三角肌"),
    ("trapezius", "斜方肌"),
    ("upper_back", "上背"),
    ("lower_back", "下背"),
    ("forearm", "前臂"),
    ("gluteal", "臀部"),
    ("abductor", "外展肌"),
    ("abductors", "外展肌"),
    ("hamstring", "大腿後側"),
    ("quadriceps", "股四頭肌"),
    ("knees", "膝蓋"),
    ("calves", "小腿"),
    ("left_soleus", "比目魚肌(左)"),
    ("right_soleus", "比目魚肌(右)"),
];

pub const DEFAULT_LEFT_MARKER: &str = "左";
pub const DEFAULT_RIGHT_MARKER: &str = "右";

/// Immutable lookup from region key to display name, plus side markers.
///
/// Built once (default or from config) and handed to the labeler; never a
/// global, so tests can swap in their own table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    names: BTreeMap<String, String>,
    left_marker: String,
    right_marker: String,
}

impl Default for NameTable {
    fn default() -> Self {
        Self {
            names: DEFAULT_NAMES.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            left_marker: DEFAULT_LEFT_MARKER.to_string(),
            right_marker: DEFAULT_RIGHT_MARKER.to_string(),
        }
    }
}

impl NameTable {
    /// An empty table with the given side markers.
    pub fn new(left_marker: impl Into<String>, right_marker: impl Into<String>) -> Self {
        Self {
            names: BTreeMap::new(),
            left_marker: left_marker.into(),
            right_marker: right_marker.into(),
        }
    }

    /// Builder-style helper to add or replace one name.
    pub fn with_name(mut self, key: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(key.into(), name.into());
        self
    }

    /// Overlay `overrides` on top of the current names.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, name) in overrides {
            self.names.insert(key.into(), name.into());
        }
        self
    }

    /// Localized name for `key`, if known.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Localized name for `key`, falling back to the key itself.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    pub fn left_marker(&self) -> &str {
        &self.left_marker
    }

    pub fn right_marker(&self) -> &str {
        &self.right_marker
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
