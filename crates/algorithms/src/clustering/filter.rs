use spatialkit_core::{AttributeValue, FeatureCollection, Properties};

/// Feature selection for [`get_cluster`]
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterFilter {
    /// Features having this property
    Key(String),
    /// Features having all of these properties
    Keys(Vec<String>),
    /// Features whose properties match all of these values
    Properties(Properties),
}

impl ClusterFilter {
    fn matches(&self, properties: &Properties) -> bool {
        match self {
            ClusterFilter::Key(key) => properties.contains_key(key),
            ClusterFilter::Keys(keys) => keys.iter().all(|k| properties.contains_key(k)),
            ClusterFilter::Properties(wanted) => wanted.iter().all(|(k, v)| properties.get(k) == Some(v)),
        }
    }
}

impl From<&str> for ClusterFilter {
    fn from(key: &str) -> Self {
        ClusterFilter::Key(key.to_string())
    }
}

impl From<Vec<String>> for ClusterFilter {
    fn from(keys: Vec<String>) -> Self {
        ClusterFilter::Keys(keys)
    }
}

impl From<Properties> for ClusterFilter {
    fn from(properties: Properties) -> Self {
        ClusterFilter::Properties(properties)
    }
}

/// Features of `fc` matching `filter`, in input order
pub fn get_cluster(fc: &FeatureCollection, filter: impl Into<ClusterFilter>) -> FeatureCollection {
    let filter = filter.into();
    fc.iter().filter(|f| filter.matches(&f.properties)).cloned().collect()
}

/// Call `callback` once per distinct value of `property`.
///
/// Clusters are visited in order of first appearance with the cluster's
/// features, the shared value and the visit index. Features without the
/// property are skipped.
pub fn cluster_each<F>(fc: &FeatureCollection, property: &str, mut callback: F)
where
    F: FnMut(FeatureCollection, &AttributeValue, usize),
{
    let mut bins: Vec<(&AttributeValue, FeatureCollection)> = Vec::new();
    for feature in fc {
        let Some(value) = feature.get_property(property) else {
            continue;
        };
        match bins.iter_mut().find(|(v, _)| *v == value) {
            Some((_, members)) => members.push(feature.clone()),
            None => bins.push((value, vec![feature.clone()].into())),
        }
    }

    for (index, (value, members)) in bins.into_iter().enumerate() {
        callback(members, value, index);
    }
}
