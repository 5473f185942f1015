//! Owns the live scale of a resolution. Every domain and range mutation goes
//! through the manager so that listeners hear about it exactly once.

use std::fmt;
use std::sync::Arc;

use super::params::{evaluate_range, DynamicRange, ParamStore};
use crate::error::{Result, ScaleError};
use crate::genome::GenomeStore;
use crate::scale::{Domain, Scale, ScaleProps, ScaleType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleEventKind {
    Domain,
    Range,
}

/// Passed to listeners. The scale is borrowed for the duration of the call.
#[derive(Debug)]
pub struct ScaleEvent<'a> {
    pub kind: ScaleEventKind,
    pub scale: &'a Scale,
}

pub type ScaleListener = Box<dyn FnMut(&ScaleEvent<'_>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct ScaleInstanceManager {
    scale: Option<Scale>,
    props: ScaleProps,
    params: ParamStore,
    dynamic_range: Option<DynamicRange>,
    listeners: Vec<(ListenerId, ScaleEventKind, ScaleListener)>,
    next_listener: u64,
    domain_notifications_suppressed: u32,
}

impl ScaleInstanceManager {
    pub fn new(params: ParamStore) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn scale(&self) -> Option<&Scale> {
        self.scale.as_ref()
    }

    pub fn props(&self) -> &ScaleProps {
        &self.props
    }

    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Instantiates the scale with an optional initial domain. The range is
    /// configured from `props` and reported with a single range event. The
    /// initial domain is not reported.
    pub fn create_scale(
        &mut self,
        props: ScaleProps,
        domain: Option<&Domain>,
        genomes: Option<&GenomeStore>,
    ) -> Result<&Scale> {
        let scale_type = props.scale_type.unwrap_or(ScaleType::Null);
        let genome = if scale_type == ScaleType::Locus {
            let store = genomes.ok_or(crate::error::GenomeError::NoGenome)?;
            Some(store.get(props.assembly.as_deref())?)
        } else {
            None
        };

        let mut scale = Scale::create(scale_type, genome)?;
        scale.disable_implicit_domain();
        scale.apply_props(&props);
        if let Some(domain) = domain {
            scale.set_domain(domain)?;
        }
        self.scale = Some(scale);
        self.props = props;

        self.configure_range()?;
        self.notify(ScaleEventKind::Range);

        match self.scale.as_ref() {
            Some(scale) => Ok(scale),
            None => Err(ScaleError::Uninitialized),
        }
    }

    /// Re-applies properties to the existing scale. The scale keeps its
    /// identity, domain and genome.
    pub fn reconfigure_scale(&mut self, props: ScaleProps) -> Result<()> {
        match self.scale.as_mut() {
            None | Some(Scale::Null) => return Ok(()),
            Some(scale) => scale.apply_props(&props),
        }
        self.props = props;
        if self.configure_range()? {
            self.notify(ScaleEventKind::Range);
        }
        Ok(())
    }

    /// Evaluates the configured range and applies it. Returns whether a range
    /// was set.
    fn configure_range(&mut self) -> Result<bool> {
        self.dynamic_range = None;
        let Some(elements) = self.props.range.clone() else {
            return Ok(false);
        };
        let reverse = self.props.is_reversed();

        let values = if elements.iter().any(|e| e.is_dynamic()) {
            let mut dynamic = DynamicRange::new(elements, reverse);
            let values = dynamic.evaluate(&self.params)?;
            self.dynamic_range = Some(dynamic);
            values
        } else {
            evaluate_range(&elements, reverse, &self.params)?
        };

        if let Some(scale) = self.scale.as_mut() {
            scale.set_range(&values);
        }
        Ok(true)
    }

    /// Re-evaluates a parameter-driven range if any referenced parameter has
    /// changed. Returns whether the range was updated.
    pub fn refresh_dynamic_range(&mut self) -> Result<bool> {
        let Some(dynamic) = self.dynamic_range.as_mut() else {
            return Ok(false);
        };
        if !dynamic.is_stale(&self.params) {
            return Ok(false);
        }
        let values = dynamic.evaluate(&self.params)?;
        if let Some(scale) = self.scale.as_mut() {
            scale.set_range(&values);
        }
        self.notify(ScaleEventKind::Range);
        Ok(true)
    }

    /// Replaces the range directly.
    pub fn set_range(&mut self, values: &[f64]) -> Result<()> {
        let scale = self.scale.as_mut().ok_or(ScaleError::Uninitialized)?;
        scale.set_range(values);
        self.dynamic_range = None;
        self.notify(ScaleEventKind::Range);
        Ok(())
    }

    /// Sets the domain and notifies, unless notifications are suppressed.
    pub fn set_domain(&mut self, domain: &Domain) -> Result<()> {
        let scale = self.scale.as_mut().ok_or(ScaleError::Uninitialized)?;
        scale.set_domain(domain)?;
        if self.domain_notifications_suppressed == 0 {
            self.notify(ScaleEventKind::Domain);
        }
        Ok(())
    }

    /// Runs `f` without emitting domain events. Nested calls are allowed.
    pub fn with_domain_notifications_suppressed<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.domain_notifications_suppressed += 1;
        let result = f(self);
        self.domain_notifications_suppressed -= 1;
        result
    }

    pub fn add_listener(&mut self, kind: ScaleEventKind, listener: ScaleListener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, kind, listener));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self, kind: ScaleEventKind) {
        let Some(scale) = self.scale.as_ref() else {
            return;
        };
        let event = ScaleEvent { kind, scale };
        for (_, listener_kind, listener) in self.listeners.iter_mut() {
            if *listener_kind == kind {
                listener(&event);
            }
        }
    }

    pub fn genome(&self) -> Option<Arc<crate::genome::CoordinateSpace>> {
        self.scale.as_ref().and_then(|scale| scale.genome().cloned())
    }
}

impl fmt::Debug for ScaleInstanceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleInstanceManager")
            .field("scale", &self.scale)
            .field("props", &self.props)
            .field("listeners", &self.listeners.len())
            .field("domain_notifications_suppressed", &self.domain_notifications_suppressed)
            .finish()
    }
}
