//! Domain aggregation across the active members of a resolution.

use std::rc::Rc;

use super::domain::{DomainArray, DomainKey};
use super::member::{DataCollector, ScaleResolutionMember};
use crate::error::Result;
use crate::genome::CoordinateSpace;
use crate::scale::{Domain, Scale};
use crate::types::DataType;

#[derive(Debug, Default)]
pub struct ScaleDomainAggregator {
    configured: Option<Option<DomainArray>>,
    initial_domain: Option<Domain>,
}

impl ScaleDomainAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached configured domain. Call when members or their
    /// properties change.
    pub fn invalidate(&mut self) {
        self.configured = None;
    }

    /// The reset target for zooming
    pub fn initial_domain_snapshot(&self) -> Option<&Domain> {
        self.initial_domain.as_ref()
    }

    pub fn set_initial_domain_snapshot(&mut self, domain: Domain) {
        self.initial_domain = Some(domain);
    }

    /// Union of the explicit domains of the active members. Loci are
    /// linearized through `genome`.
    pub fn configured_domain(
        &mut self,
        members: &[&ScaleResolutionMember],
        data_type: DataType,
        genome: Option<&CoordinateSpace>,
    ) -> Result<Option<DomainArray>> {
        if let Some(cached) = &self.configured {
            return Ok(cached.clone());
        }

        let mut union: Option<DomainArray> = None;
        for member in members {
            let Some(spec) = member
                .channel_def
                .scale
                .as_ref()
                .and_then(|scale| scale.domain.as_ref())
            else {
                continue;
            };
            let member_type = member.channel_def.data_type.unwrap_or(data_type);
            let domain = DomainArray::from_spec(member_type, spec, genome)?;
            match &mut union {
                Some(acc) => acc.extend_all(&domain)?,
                None => union = Some(domain),
            }
        }

        self.configured = Some(union.clone());
        Ok(union)
    }

    pub fn has_configured_domain(
        &mut self,
        members: &[&ScaleResolutionMember],
        data_type: DataType,
        genome: Option<&CoordinateSpace>,
    ) -> Result<bool> {
        Ok(self.configured_domain(members, data_type, genome)?.is_some())
    }

    /// Union of the data domains. Each collector is asked once per distinct
    /// domain key, however many members share it.
    pub fn data_domain(
        &self,
        members: &[&ScaleResolutionMember],
        data_type: DataType,
    ) -> Result<Option<DomainArray>> {
        let mut requests: Vec<(Rc<dyn DataCollector>, Vec<DomainKey>)> = Vec::new();

        for member in members {
            let Some(key) = member.domain_key(data_type) else {
                continue;
            };
            let Some(collector) = member.view.upgrade().and_then(|view| view.collector()) else {
                continue;
            };
            match requests.iter_mut().find(|(c, _)| Rc::ptr_eq(c, &collector)) {
                Some((_, keys)) => {
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
                None => requests.push((collector, vec![key])),
            }
        }

        let mut union: Option<DomainArray> = None;
        for (collector, keys) in &requests {
            for key in keys {
                let Some(domain) = collector.domain(key, data_type) else {
                    continue;
                };
                match &mut union {
                    Some(acc) => acc.extend_all(&domain)?,
                    None => union = Some(domain),
                }
            }
        }
        Ok(union)
    }

    /// The configured domain, or else the genome extent for locus data, or
    /// else the data domain when `extract_data` is set.
    pub fn configured_or_default_domain(
        &mut self,
        members: &[&ScaleResolutionMember],
        data_type: DataType,
        genome: Option<&CoordinateSpace>,
        extract_data: bool,
    ) -> Result<Option<DomainArray>> {
        if let Some(configured) = self.configured_domain(members, data_type, genome)? {
            return Ok(Some(configured));
        }
        if data_type == DataType::Locus {
            if let Some(genome) = genome {
                return Ok(Some(DomainArray::from_numbers(data_type, &genome.extent())));
            }
        }
        if extract_data {
            self.data_domain(members, data_type)
        } else {
            Ok(None)
        }
    }

    /// Records the first real domain as the zoom reset target. Returns `true`
    /// when the domain was uninitialized before, in which case the caller
    /// must notify listeners itself.
    pub fn capture_initial_domain(&mut self, scale: &Scale, was_initialized: bool) -> bool {
        let domain = scale.domain();
        if self.initial_domain.is_none() && scale.is_continuous() {
            if domain.span().is_some_and(|span| span > 0.0) {
                self.initial_domain = Some(domain.clone());
            }
        }

        if !was_initialized {
            self.initial_domain = Some(domain);
            return true;
        }
        false
    }
}
