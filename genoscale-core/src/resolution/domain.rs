//! Accumulated domains: a numeric extent for quantitative, index and locus
//! data, or an insertion-ordered set of categories for nominal and ordinal data.

use std::collections::HashSet;

use crate::error::{Result, ScaleError};
use crate::genome::CoordinateSpace;
use crate::scale::{Domain, DomainSpec};
use crate::types::DataType;

/// Identifies one domain a data collector can compute: the encoded field and
/// whether its values are treated as categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainKey {
    pub field: String,
    pub discrete: bool,
}

impl DomainKey {
    pub fn new(field: impl Into<String>, data_type: DataType) -> Self {
        Self {
            field: field.into(),
            discrete: data_type.is_discrete(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainArray {
    /// Min/max of the finite values seen so far
    Quantitative(Option<[f64; 2]>),
    Ordinal(Vec<String>),
    Nominal(Vec<String>),
}

impl DomainArray {
    /// Empty domain for a data type. Index and locus data accumulate extents.
    pub fn empty(data_type: DataType) -> Self {
        match data_type {
            DataType::Nominal => DomainArray::Nominal(Vec::new()),
            DataType::Ordinal => DomainArray::Ordinal(Vec::new()),
            DataType::Quantitative | DataType::Index | DataType::Locus => {
                DomainArray::Quantitative(None)
            }
        }
    }

    pub fn from_numbers(data_type: DataType, values: &[f64]) -> Self {
        let mut domain = Self::empty(data_type);
        domain.extend_numbers(values.iter().copied());
        domain
    }

    pub fn from_categories<I, S>(data_type: DataType, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut domain = Self::empty(data_type);
        domain.extend_categories(values)?;
        Ok(domain)
    }

    /// Converts an explicit domain. Loci are linearized through the genome;
    /// numbers become categories on discrete data.
    pub fn from_spec(
        data_type: DataType,
        spec: &DomainSpec,
        genome: Option<&CoordinateSpace>,
    ) -> Result<Self> {
        match spec {
            DomainSpec::Numbers(values) if data_type.is_discrete() => {
                Self::from_categories(data_type, values.iter().map(|v| v.to_string()))
            }
            DomainSpec::Numbers(values) => Ok(Self::from_numbers(data_type, values)),
            DomainSpec::Categories(values) => Self::from_categories(data_type, values.iter().cloned()),
            DomainSpec::Loci(_) => {
                let interval = super::complex::from_complex_interval(genome, spec)?;
                Ok(Self::from_numbers(data_type, &interval))
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DomainArray::Quantitative(_) => "quantitative",
            DomainArray::Ordinal(_) => "ordinal",
            DomainArray::Nominal(_) => "nominal",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DomainArray::Quantitative(extent) => extent.is_none(),
            DomainArray::Ordinal(values) | DomainArray::Nominal(values) => values.is_empty(),
        }
    }

    pub fn extent(&self) -> Option<[f64; 2]> {
        match self {
            DomainArray::Quantitative(extent) => *extent,
            _ => None,
        }
    }

    pub fn categories(&self) -> Option<&[String]> {
        match self {
            DomainArray::Ordinal(values) | DomainArray::Nominal(values) => Some(values),
            DomainArray::Quantitative(_) => None,
        }
    }

    /// NaN and infinite values are ignored.
    pub fn extend_numbers(&mut self, values: impl IntoIterator<Item = f64>) {
        if let DomainArray::Quantitative(extent) = self {
            for value in values.into_iter().filter(|v| v.is_finite()) {
                *extent = Some(match *extent {
                    Some([lo, hi]) => [lo.min(value), hi.max(value)],
                    None => [value, value],
                });
            }
        }
    }

    pub fn extend_categories<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let kind = self.kind();
        let existing = match self {
            DomainArray::Ordinal(existing) | DomainArray::Nominal(existing) => existing,
            DomainArray::Quantitative(_) => {
                return Err(ScaleError::IncompatibleDomains {
                    existing: kind,
                    requested: "categorical",
                })
            }
        };
        let mut seen: HashSet<String> = existing.iter().cloned().collect();
        for value in values {
            let value = value.into();
            if seen.insert(value.clone()) {
                existing.push(value);
            }
        }
        Ok(())
    }

    /// Unions another domain of the same kind into this one.
    pub fn extend_all(&mut self, other: &DomainArray) -> Result<()> {
        match (&*self, other) {
            (DomainArray::Quantitative(_), DomainArray::Quantitative(extent)) => {
                if let Some([lo, hi]) = extent {
                    self.extend_numbers([*lo, *hi]);
                }
                Ok(())
            }
            (DomainArray::Ordinal(_), DomainArray::Ordinal(values))
            | (DomainArray::Nominal(_), DomainArray::Nominal(values)) => {
                self.extend_categories(values.iter().cloned())
            }
            _ => Err(ScaleError::IncompatibleDomains {
                existing: self.kind(),
                requested: other.kind(),
            }),
        }
    }

    /// Widens a quantitative extent so that it contains zero.
    pub fn include_zero(&mut self) {
        if let DomainArray::Quantitative(Some(_)) = self {
            self.extend_numbers([0.0]);
        }
    }

    /// The scale domain, or `None` while nothing has been accumulated.
    pub fn to_domain(&self) -> Option<Domain> {
        match self {
            DomainArray::Quantitative(extent) => extent.map(Domain::Continuous),
            DomainArray::Ordinal(values) | DomainArray::Nominal(values) if !values.is_empty() => {
                Some(Domain::Discrete(values.clone()))
            }
            _ => None,
        }
    }
}
