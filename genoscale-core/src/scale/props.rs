//! Scale property bags, as they arrive from an already-parsed declarative
//! specification. Every field is optional; resolution fills in defaults.

use serde::{Deserialize, Serialize};

use super::ScaleType;
use crate::types::LocusBound;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScaleProps {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<ScaleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<RangeElement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<ZoomSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_inner: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_outer: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exponent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,
    /// Named assembly for locus scales. The default assembly is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,
}

impl ScaleProps {
    pub fn with_type(scale_type: ScaleType) -> Self {
        Self {
            scale_type: Some(scale_type),
            ..Default::default()
        }
    }

    /// Zoom is enabled by `zoom: true` or by a zoom parameter object.
    pub fn is_zoom_enabled(&self) -> bool {
        self.zoom.as_ref().is_some_and(ZoomSpec::is_enabled)
    }

    pub fn is_reversed(&self) -> bool {
        self.reverse.unwrap_or(false)
    }
}

/// An explicit domain: numbers, loci or categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainSpec {
    Numbers(Vec<f64>),
    Loci(Vec<LocusBound>),
    Categories(Vec<String>),
}

impl DomainSpec {
    pub fn is_empty(&self) -> bool {
        match self {
            DomainSpec::Numbers(v) => v.is_empty(),
            DomainSpec::Loci(v) => v.is_empty(),
            DomainSpec::Categories(v) => v.is_empty(),
        }
    }
}

impl From<[f64; 2]> for DomainSpec {
    fn from(interval: [f64; 2]) -> Self {
        DomainSpec::Numbers(interval.to_vec())
    }
}

/// A range element is either a literal or the name of a parameter whose value
/// is read whenever the range is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeElement {
    Value(f64),
    Expr { expr: String },
}

impl RangeElement {
    pub fn expr(name: impl Into<String>) -> Self {
        RangeElement::Expr { expr: name.into() }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, RangeElement::Expr { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoomSpec {
    Enabled(bool),
    Params(ZoomParams),
}

impl ZoomSpec {
    pub fn is_enabled(&self) -> bool {
        match self {
            ZoomSpec::Enabled(enabled) => *enabled,
            ZoomSpec::Params(_) => true,
        }
    }

    pub fn extent(&self) -> Option<&DomainSpec> {
        match self {
            ZoomSpec::Params(params) => params.extent.as_ref(),
            ZoomSpec::Enabled(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoomParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<DomainSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_props() {
        let props: ScaleProps = serde_json::from_str(
            r#"{
                "type": "locus",
                "domain": [{"chrom": "chr1"}, {"chrom": "chr2", "pos": 5}],
                "range": [0, {"expr": "width"}],
                "zoom": {"extent": [0, 100]},
                "paddingInner": 0.1
            }"#,
        )
        .unwrap();

        assert_eq!(props.scale_type, Some(ScaleType::Locus));
        assert_eq!(
            props.domain,
            Some(DomainSpec::Loci(vec![
                LocusBound::chrom("chr1"),
                LocusBound::at("chr2", 5)
            ]))
        );
        assert_eq!(
            props.range,
            Some(vec![RangeElement::Value(0.0), RangeElement::expr("width")])
        );
        assert!(props.is_zoom_enabled());
        assert_eq!(
            props.zoom.as_ref().and_then(ZoomSpec::extent),
            Some(&DomainSpec::Numbers(vec![0.0, 100.0]))
        );
        assert_eq!(props.padding_inner, Some(0.1));
    }

    #[test]
    fn test_categorical_domain() {
        let props: ScaleProps = serde_json::from_str(r#"{"domain": ["a", "b"], "zoom": false}"#).unwrap();
        assert_eq!(
            props.domain,
            Some(DomainSpec::Categories(vec!["a".into(), "b".into()]))
        );
        assert!(!props.is_zoom_enabled());
    }
}
