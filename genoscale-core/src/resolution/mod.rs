//! Scale resolution: one scale shared by every view that encodes the same
//! channel.
//!
//! A [`ScaleResolution`] collects members, settles the data type and the
//! merged scale properties, unions their domains, and owns the resulting
//! scale. Interaction (zoom, pan, animated transitions) goes through it too,
//! so the scale it holds is the single source of truth for dependents.
//!
//! Life cycle: no scale → scale created (domain may still be `[0, 0]`) →
//! domain initialized → zoomed (continuous scales only).

pub mod aggregator;
pub mod complex;
pub mod domain;
pub mod indexer;
pub mod manager;
pub mod member;
pub mod params;
pub mod props;
pub mod zoom;

use std::rc::Rc;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::{GenomeError, Result, ScaleError};
use crate::genome::{CoordinateSpace, GenomeStore};
use crate::scale::{Domain, DomainSpec, Scale, ScaleProps, ScaleType};
use crate::types::{Channel, DataType};

pub use aggregator::ScaleDomainAggregator;
pub use complex::ComplexValue;
pub use domain::{DomainArray, DomainKey};
pub use indexer::CategoricalIndexer;
pub use manager::{ListenerId, ScaleEvent, ScaleEventKind, ScaleInstanceManager, ScaleListener};
pub use member::{ChannelDef, DataCollector, MemberId, MemberView, ScaleResolutionMember};
pub use params::ParamStore;
pub use zoom::DomainTransition;

/// Schedules frames for animated domain changes. The host calls
/// [`ScaleResolution::advance_transition`] once per frame until it returns
/// `false`.
pub trait Animator {
    fn request_transition(&self);
    fn request_render(&self);
}

pub struct ScaleResolution {
    channel: Channel,
    data_type: Option<DataType>,
    name: Option<String>,
    members: Vec<(MemberId, ScaleResolutionMember)>,
    next_member: u64,
    manager: ScaleInstanceManager,
    aggregator: ScaleDomainAggregator,
    indexer: CategoricalIndexer,
    genomes: Option<Arc<GenomeStore>>,
    animator: Option<Rc<dyn Animator>>,
    config: EngineConfig,
    transition: Option<DomainTransition>,
}

impl ScaleResolution {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            data_type: None,
            name: None,
            members: Vec::new(),
            next_member: 0,
            manager: ScaleInstanceManager::default(),
            aggregator: ScaleDomainAggregator::new(),
            indexer: CategoricalIndexer::new(),
            genomes: None,
            animator: None,
            config: EngineConfig::default(),
            transition: None,
        }
    }

    pub fn with_genomes(mut self, genomes: Arc<GenomeStore>) -> Self {
        self.genomes = Some(genomes);
        self
    }

    pub fn with_animator(mut self, animator: Rc<dyn Animator>) -> Self {
        self.animator = Some(animator);
        self
    }

    /// Parameters that dynamic range elements refer to
    pub fn with_params(mut self, params: ParamStore) -> Self {
        self.manager = ScaleInstanceManager::new(params);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = &ScaleResolutionMember> {
        self.members.iter().map(|(_, member)| member)
    }

    /// Adds a member. Its data type must agree with the established one
    /// unless it encodes a secondary channel; a member without a type adopts
    /// the established type.
    pub fn register_member(&mut self, member: ScaleResolutionMember) -> Result<MemberId> {
        let channel = member.channel;
        let def = &member.channel_def;
        let adapt = def.data_type.is_none() && self.data_type.is_some();

        if channel != Channel::Sample && def.data_type.is_none() && !channel.is_secondary() && !adapt {
            return Err(ScaleError::MissingDataType { channel });
        }

        let data_type = if channel == Channel::Sample {
            Some(DataType::Nominal)
        } else {
            def.data_type
        };

        let name = def.scale.as_ref().and_then(|scale| scale.name.clone());
        if let (Some(existing), Some(requested)) = (&self.name, &name) {
            if existing != requested {
                return Err(ScaleError::ConflictingScaleName {
                    existing: existing.clone(),
                    requested: requested.clone(),
                });
            }
        }

        if !adapt {
            if let (Some(existing), Some(requested)) = (self.data_type, data_type) {
                if existing != requested && !channel.is_secondary() {
                    return Err(ScaleError::IncompatibleDataTypes {
                        channel: self.channel,
                        existing,
                        requested,
                    });
                }
            }
            if self.data_type.is_none() {
                self.data_type = data_type;
            }
        }
        if name.is_some() {
            self.name = name;
        }

        let id = MemberId(self.next_member);
        self.next_member += 1;
        self.members.push((id, member));
        self.aggregator.invalidate();
        Ok(id)
    }

    /// Removes a member. Returns `true` when the resolution became empty and
    /// can be discarded.
    pub fn unregister_member(&mut self, id: MemberId) -> bool {
        let before = self.members.len();
        self.members.retain(|(member_id, _)| *member_id != id);
        let removed = self.members.len() != before;
        if removed {
            self.aggregator.invalidate();
        }
        removed && self.members.is_empty()
    }

    /// The coordinate space of a locus resolution
    pub fn genome(&self) -> Option<Arc<CoordinateSpace>> {
        if self.data_type != Some(DataType::Locus) {
            return None;
        }
        self.manager.genome().or_else(|| {
            let assembly = self
                .members()
                .filter_map(|member| member.channel_def.scale.as_ref())
                .find_map(|scale| scale.assembly.as_deref());
            self.genomes.as_ref()?.get(assembly).ok()
        })
    }

    /// Merged properties and the domain to apply.
    fn scale_props(&mut self, extract_data: bool) -> Result<(ScaleProps, Option<Domain>)> {
        let data_type = self.data_type.ok_or(ScaleError::Uninitialized)?;
        let genome = self.genome();
        if data_type == DataType::Locus && genome.is_none() {
            return Err(GenomeError::NoGenome.into());
        }

        let Self {
            channel,
            members,
            aggregator,
            indexer,
            ..
        } = self;
        let all: Vec<&ScaleResolutionMember> = members.iter().map(|(_, m)| m).collect();
        let active: Vec<&ScaleResolutionMember> = all.iter().copied().filter(|m| m.is_active()).collect();

        let explicit = aggregator.has_configured_domain(&active, data_type, genome.as_deref())?;
        let props = props::resolve_scale_props(*channel, data_type, &all, explicit)?;
        let scale_type = props.scale_type.unwrap_or(ScaleType::Null);
        if scale_type == ScaleType::Null {
            return Ok((props, None));
        }

        let resolved = aggregator.configured_or_default_domain(&active, data_type, genome.as_deref(), extract_data)?;

        let domain = if scale_type.is_discrete() {
            let values = match resolved.as_ref().and_then(DomainArray::categories) {
                Some(values) => {
                    indexer.add_all(values);
                    indexer.ordered(values)
                }
                None => indexer.domain().to_vec(),
            };
            Some(Domain::Discrete(values))
        } else {
            resolved.and_then(|mut domain| {
                if props.zero == Some(true)
                    && matches!(scale_type, ScaleType::Linear | ScaleType::Pow | ScaleType::Sqrt)
                {
                    domain.include_zero();
                }
                domain.to_domain()
            })
        };

        Ok((props, domain))
    }

    /// Creates the scale on first use.
    pub fn initialize_scale(&mut self) -> Result<&Scale> {
        if self.manager.scale().is_none() {
            let (props, domain) = self.scale_props(false)?;
            let genomes = self.genomes.clone();
            self.manager.create_scale(props, domain.as_ref(), genomes.as_deref())?;
            if let (Some(scale), Some(_)) = (self.manager.scale(), domain) {
                self.aggregator.capture_initial_domain(scale, true);
            }
        }
        self.manager.scale().ok_or(ScaleError::Uninitialized)
    }

    pub fn scale(&mut self) -> Result<&Scale> {
        self.initialize_scale()
    }

    /// The scale if it has been created
    pub fn current_scale(&self) -> Option<&Scale> {
        self.manager.scale()
    }

    pub fn props(&self) -> &ScaleProps {
        self.manager.props()
    }

    pub fn domain(&mut self) -> Result<Domain> {
        Ok(self.scale()?.domain())
    }

    pub fn data_domain(&self) -> Result<Option<DomainArray>> {
        let data_type = self.data_type.ok_or(ScaleError::Uninitialized)?;
        let active: Vec<&ScaleResolutionMember> = self.members().filter(|m| m.is_active()).collect();
        self.aggregator.data_domain(&active, data_type)
    }

    /// Categories seen so far, in their stable order
    pub fn categorical_indexer(&self) -> &CategoricalIndexer {
        &self.indexer
    }

    pub fn initial_domain_snapshot(&self) -> Option<&Domain> {
        self.aggregator.initial_domain_snapshot()
    }

    /// Recomputes the merged properties, the domain and the range.
    pub fn reconfigure(&mut self) -> Result<()> {
        if self.manager.scale().is_none() {
            return Ok(());
        }
        self.aggregator.invalidate();
        let (props, domain) = self.scale_props(true)?;
        let resolved = domain.is_some();
        self.reconfigure_with(resolved, move |manager| {
            manager.reconfigure_scale(props)?;
            match domain {
                Some(domain) => manager.set_domain(&domain),
                None => Ok(()),
            }
        })
    }

    /// Recomputes only the domain, typically after new data has arrived.
    pub fn reconfigure_domain(&mut self) -> Result<()> {
        if self.manager.scale().is_none() {
            return Ok(());
        }
        let (_, domain) = self.scale_props(true)?;
        let resolved = domain.is_some();
        self.reconfigure_with(resolved, move |manager| match domain {
            Some(domain) => manager.set_domain(&domain),
            None => Ok(()),
        })
    }

    /// `resolved` tells whether a domain was found at all. Until the first
    /// one is, the placeholder domain is neither captured nor announced.
    fn reconfigure_with<F>(&mut self, resolved: bool, apply: F) -> Result<()>
    where
        F: FnOnce(&mut ScaleInstanceManager) -> Result<()>,
    {
        // A continuous domain counts as initialized once it has a reset target.
        let (was_initialized, previous) = match self.manager.scale() {
            None | Some(Scale::Null) => return Ok(()),
            Some(scale) if scale.is_continuous() => {
                (self.aggregator.initial_domain_snapshot().is_some(), scale.domain())
            }
            Some(scale) => (scale.domain().is_initialized(), scale.domain()),
        };
        let was_zoomed = self.is_zoomed_by_user();

        self.manager.with_domain_notifications_suppressed(apply)?;
        if !was_initialized && !resolved {
            return Ok(());
        }

        let (captured, current) = match self.manager.scale() {
            Some(scale) => (
                self.aggregator.capture_initial_domain(scale, was_initialized),
                scale.domain(),
            ),
            None => return Ok(()),
        };
        if captured {
            self.manager.notify(ScaleEventKind::Domain);
            return Ok(());
        }
        if current == previous {
            return Ok(());
        }

        if was_zoomed {
            // The zoomed view stays. The new domain becomes the reset target.
            self.aggregator.set_initial_domain_snapshot(current);
            self.restore_domain(&previous)
        } else if self.is_zooming_supported() {
            self.restore_domain(&previous)?;
            self.aggregator.set_initial_domain_snapshot(current.clone());
            match current.as_interval() {
                Some(target) => self.zoom_to_interval(target, self.config.domain_transition_ms),
                None => Ok(()),
            }
        } else {
            self.manager.notify(ScaleEventKind::Domain);
            Ok(())
        }
    }

    fn restore_domain(&mut self, domain: &Domain) -> Result<()> {
        self.manager
            .with_domain_notifications_suppressed(|manager| manager.set_domain(domain))
    }

    /// Re-evaluates ranges that refer to parameters. Returns whether the
    /// range changed.
    pub fn sync_params(&mut self) -> Result<bool> {
        self.manager.refresh_dynamic_range()
    }

    /// Sets the range directly, with one range event.
    pub fn set_range(&mut self, values: &[f64]) -> Result<()> {
        self.initialize_scale()?;
        self.manager.set_range(values)
    }

    pub fn add_event_listener(&mut self, kind: ScaleEventKind, listener: ScaleListener) -> ListenerId {
        self.manager.add_listener(kind, listener)
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.manager.remove_listener(id)
    }

    /// Continuous scales have a pan/zoom transform.
    pub fn is_zooming_supported(&self) -> bool {
        self.manager
            .scale()
            .is_some_and(|scale| scale.scale_type().supports_zoom())
    }

    /// Zooming is supported and enabled in the properties.
    pub fn is_zoomable(&self) -> bool {
        self.is_zooming_supported() && self.manager.props().is_zoom_enabled()
    }

    /// Like [`is_zoomed`](Self::is_zoomed), but a running transition towards
    /// the reset target counts as following the data.
    fn is_zoomed_by_user(&self) -> bool {
        match (&self.transition, self.aggregator.initial_domain_snapshot()) {
            (Some(transition), Some(snapshot)) if self.is_zoomable() => {
                Domain::Continuous(transition.target()) != *snapshot
            }
            _ => self.is_zoomed(),
        }
    }

    /// The domain differs from the reset target.
    pub fn is_zoomed(&self) -> bool {
        if !self.is_zoomable() {
            return false;
        }
        match (self.manager.scale(), self.aggregator.initial_domain_snapshot()) {
            (Some(scale), Some(snapshot)) => scale.domain() != *snapshot,
            _ => false,
        }
    }

    /// Bounds that zooming and panning may not cross.
    pub fn zoom_extent(&self) -> Result<[f64; 2]> {
        const UNBOUNDED: [f64; 2] = [f64::NEG_INFINITY, f64::INFINITY];

        let Some(scale) = self.manager.scale().filter(|scale| scale.is_continuous()) else {
            return Ok(UNBOUNDED);
        };
        let props = self.manager.props();

        if let Some(extent) = props.zoom.as_ref().and_then(|zoom| zoom.extent()) {
            let genome = self.genome();
            if let [lo, hi, ..] = complex::from_complex_interval(genome.as_deref(), extent)?[..] {
                return Ok([lo, hi]);
            }
        }

        if props.is_zoom_enabled() {
            if let Some(genome) = scale.genome() {
                return Ok(genome.extent());
            }
        }

        Ok(self
            .aggregator
            .initial_domain_snapshot()
            .and_then(Domain::as_interval)
            .unwrap_or(UNBOUNDED))
    }

    /// Pans by `pan` range units, then zooms by `scale_factor` around the
    /// range position `anchor`. The result is clamped to the zoom extent.
    /// Returns whether the domain changed.
    pub fn zoom(&mut self, scale_factor: f64, anchor: f64, pan: f64) -> Result<bool> {
        if !self.is_zooming_supported() {
            return Ok(false);
        }
        let extent = self.zoom_extent()?;
        let reverse = self.manager.props().is_reversed();
        let scale = self.scale()?;

        let (Some(old), Some(transform)) = (scale.domain().as_interval(), scale.zoom_transform()) else {
            return Ok(false);
        };

        let anchor = scale.invert(anchor)? + scale.align().unwrap_or(0.0);
        let range = scale.range();
        let range_span = match (range.first(), range.last()) {
            (Some(first), Some(last)) => (last - first).abs(),
            _ => 0.0,
        };
        let mut delta = if range_span > 0.0 { pan / range_span } else { 0.0 };
        if reverse {
            delta = -delta;
        }

        let panned = zoom::pan(old, delta, transform);
        let zoomed = zoom::zoom(panned, Some(anchor), scale_factor, transform);
        let new = zoom::clamp_range(zoomed, extent[0], extent[1]);

        self.transition = None;
        if new == old {
            return Ok(false);
        }
        log::trace!("Zooming {} from {:?} to {:?}", self.channel, old, new);
        self.manager.set_domain(&Domain::Continuous(new))?;
        Ok(true)
    }

    /// Zooms to a numeric or locus interval. A positive duration animates the
    /// change; it snaps when the duration is zero or there is no animator.
    pub fn zoom_to(&mut self, domain: &DomainSpec, duration_ms: f64) -> Result<()> {
        self.initialize_scale()?;
        if !self.is_zooming_supported() {
            let scale_type = self.manager.scale().map_or(ScaleType::Null, Scale::scale_type);
            return Err(ScaleError::ZoomNotSupported(scale_type));
        }
        let genome = self.genome();
        match complex::from_complex_interval(genome.as_deref(), domain)?[..] {
            [lo, hi, ..] => self.zoom_to_interval([lo, hi], duration_ms),
            _ => Err(ScaleError::IncompatibleDomain(self.scale()?.scale_type())),
        }
    }

    /// Zooms using the configured default duration.
    pub fn zoom_to_animated(&mut self, domain: &DomainSpec) -> Result<()> {
        self.zoom_to(domain, self.config.zoom_transition_ms)
    }

    fn zoom_to_interval(&mut self, target: [f64; 2], duration_ms: f64) -> Result<()> {
        self.transition = None;
        let from = self
            .manager
            .scale()
            .and_then(|scale| scale.domain().as_interval())
            .ok_or(ScaleError::Uninitialized)?;

        match self.animator.clone() {
            Some(animator) if duration_ms > 0.0 => {
                self.transition = Some(DomainTransition::new(from, target, duration_ms));
                animator.request_transition();
            }
            animator => {
                self.manager.set_domain(&Domain::Continuous(target))?;
                if let Some(animator) = animator {
                    animator.request_render();
                }
            }
        }
        Ok(())
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Advances an animated domain change to `now_ms`. The first call after
    /// a transition starts marks time zero. Returns whether more frames are
    /// needed.
    pub fn advance_transition(&mut self, now_ms: f64) -> Result<bool> {
        let Some(mut transition) = self.transition.take() else {
            return Ok(false);
        };
        let (domain, finished) = transition.step(now_ms);
        self.manager.set_domain(&Domain::Continuous(domain))?;
        if !finished {
            self.transition = Some(transition);
        }
        Ok(!finished)
    }

    /// Returns to the initial domain. Returns whether anything changed.
    pub fn reset_zoom(&mut self) -> Result<bool> {
        if !self.is_zooming_supported() {
            let scale_type = self.manager.scale().map_or(ScaleType::Null, Scale::scale_type);
            return Err(ScaleError::ZoomNotSupported(scale_type));
        }
        self.transition = None;
        let (Some(scale), Some(snapshot)) = (self.manager.scale(), self.aggregator.initial_domain_snapshot()) else {
            return Ok(false);
        };
        if scale.domain() == *snapshot {
            return Ok(false);
        }
        let snapshot = snapshot.clone();
        self.manager.set_domain(&snapshot)?;
        Ok(true)
    }

    /// Extent span divided by domain span for zoomable scales, else 1.
    pub fn zoom_level(&self) -> f64 {
        if !self.is_zoomable() {
            return 1.0;
        }
        let extent = match self.zoom_extent() {
            Ok(extent) => extent,
            Err(_) => return 1.0,
        };
        match self.manager.scale().and_then(|scale| scale.domain().span()) {
            Some(span) if span > 0.0 => (extent[1] - extent[0]) / span,
            _ => 1.0,
        }
    }

    pub fn to_complex(&self, value: f64) -> ComplexValue {
        complex::to_complex(self.genome().as_deref(), value)
    }

    pub fn from_complex(&self, value: &ComplexValue) -> Result<f64> {
        complex::from_complex(self.genome().as_deref(), value)
    }

    pub fn from_complex_interval(&self, interval: &DomainSpec) -> Result<Vec<f64>> {
        complex::from_complex_interval(self.genome().as_deref(), interval)
    }

    /// The current domain as loci on locus scales, numbers elsewhere.
    pub fn complex_domain(&mut self) -> Result<[ComplexValue; 2]> {
        let scale = self.scale()?;
        let interval = scale
            .domain()
            .as_interval()
            .ok_or(ScaleError::NotInvertible(scale.scale_type()))?;
        Ok(complex::complex_domain(self.genome().as_deref(), interval))
    }

    /// Inverts a range value and converts it to its complex form.
    pub fn invert_to_complex(&mut self, value: f64) -> Result<ComplexValue> {
        let inverted = self.scale()?.invert(value)?;
        Ok(self.to_complex(inverted))
    }
}

impl std::fmt::Debug for ScaleResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaleResolution")
            .field("channel", &self.channel)
            .field("data_type", &self.data_type)
            .field("name", &self.name)
            .field("members", &self.members.len())
            .field("scale", &self.manager.scale())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::ContigSize;
    use crate::scale::ZoomSpec;
    use std::cell::{Cell, RefCell};

    struct Collector {
        values: RefCell<Vec<f64>>,
    }

    impl DataCollector for Collector {
        fn domain(&self, _key: &DomainKey, data_type: DataType) -> Option<DomainArray> {
            Some(DomainArray::from_numbers(data_type, &self.values.borrow()))
        }
    }

    struct View {
        collector: Rc<Collector>,
    }

    impl MemberView for View {
        fn name(&self) -> &str {
            "view"
        }

        fn collector(&self) -> Option<Rc<dyn DataCollector>> {
            Some(self.collector.clone())
        }
    }

    fn view(values: &[f64]) -> Rc<View> {
        Rc::new(View {
            collector: Rc::new(Collector {
                values: RefCell::new(values.to_vec()),
            }),
        })
    }

    fn member(view: &Rc<View>, data_type: DataType) -> ScaleResolutionMember {
        ScaleResolutionMember::new(view, Channel::X, ChannelDef::field("value", data_type))
    }

    #[test]
    fn test_missing_type() {
        let v = view(&[]);
        let mut resolution = ScaleResolution::new(Channel::X);
        let err = resolution
            .register_member(ScaleResolutionMember::new(&v, Channel::X, ChannelDef::default()))
            .unwrap_err();
        assert_eq!(err, ScaleError::MissingDataType { channel: Channel::X });
    }

    #[test]
    fn test_type_agreement() {
        let v = view(&[]);
        let mut resolution = ScaleResolution::new(Channel::X);
        resolution.register_member(member(&v, DataType::Quantitative)).unwrap();

        let err = resolution.register_member(member(&v, DataType::Nominal)).unwrap_err();
        assert!(matches!(err, ScaleError::IncompatibleDataTypes { .. }));

        let secondary = ScaleResolutionMember::new(&v, Channel::X2, ChannelDef::field("end", DataType::Nominal));
        assert!(resolution.register_member(secondary).is_ok());

        let typeless = ScaleResolutionMember::new(&v, Channel::X, ChannelDef::default());
        assert!(resolution.register_member(typeless).is_ok());
        assert_eq!(resolution.data_type(), Some(DataType::Quantitative));
    }

    #[test]
    fn test_conflicting_names() {
        let v = view(&[]);
        let named = |name: &str| {
            ScaleResolutionMember::new(
                &v,
                Channel::X,
                ChannelDef::field("value", DataType::Quantitative).with_scale(ScaleProps {
                    name: Some(name.to_string()),
                    ..Default::default()
                }),
            )
        };
        let mut resolution = ScaleResolution::new(Channel::X);
        resolution.register_member(named("a")).unwrap();
        assert_eq!(
            resolution.register_member(named("b")).unwrap_err(),
            ScaleError::ConflictingScaleName {
                existing: "a".into(),
                requested: "b".into()
            }
        );
        assert_eq!(resolution.name(), Some("a"));
    }

    #[test]
    fn test_unregister_reports_empty() {
        let v = view(&[]);
        let mut resolution = ScaleResolution::new(Channel::X);
        let a = resolution.register_member(member(&v, DataType::Quantitative)).unwrap();
        let b = resolution.register_member(member(&v, DataType::Quantitative)).unwrap();
        assert!(!resolution.unregister_member(a));
        assert!(!resolution.unregister_member(a));
        assert!(resolution.unregister_member(b));
    }

    #[test]
    fn test_zero_is_included_for_quantitative_data() {
        let v = view(&[5.0, 10.0]);
        let mut resolution = ScaleResolution::new(Channel::Y);
        resolution.register_member(member(&v, DataType::Quantitative)).unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure().unwrap();
        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([0.0, 10.0]));
    }

    #[test]
    fn test_first_domain_notifies_once() {
        let v = view(&[0.0, 100.0]);
        let mut resolution = ScaleResolution::new(Channel::X);
        resolution.register_member(member(&v, DataType::Index)).unwrap();
        resolution.initialize_scale().unwrap();

        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        resolution.add_event_listener(
            ScaleEventKind::Domain,
            Box::new(move |_: &ScaleEvent<'_>| counter.set(counter.get() + 1)),
        );

        resolution.reconfigure_domain().unwrap();
        assert_eq!(count.get(), 1);
        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([0.0, 100.0]));
        assert_eq!(
            resolution.initial_domain_snapshot(),
            Some(&Domain::Continuous([0.0, 100.0]))
        );
    }

    #[test]
    fn test_zoom_and_reset() {
        let v = view(&[0.0, 100.0]);
        let mut resolution = ScaleResolution::new(Channel::X);
        resolution.register_member(member(&v, DataType::Index)).unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure_domain().unwrap();

        assert!(resolution.is_zoomable());
        assert!(!resolution.is_zoomed());
        assert_eq!(resolution.zoom_level(), 1.0);

        // range position 0 inverts to -0.5, the band's left edge; align puts
        // the anchor back at 0
        assert!(resolution.zoom(0.5, 0.0, 0.0).unwrap());
        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([0.0, 50.0]));
        assert!(resolution.is_zoomed());
        assert_eq!(resolution.zoom_level(), 2.0);

        assert!(resolution.reset_zoom().unwrap());
        assert!(!resolution.is_zoomed());
        assert!(!resolution.reset_zoom().unwrap());
    }

    #[test]
    fn test_zoom_is_clamped_to_extent() {
        let v = view(&[0.0, 100.0]);
        let mut resolution = ScaleResolution::new(Channel::X);
        resolution.register_member(member(&v, DataType::Index)).unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure_domain().unwrap();

        // zooming out of the full extent changes nothing
        assert!(!resolution.zoom(2.0, 0.5, 0.0).unwrap());
        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([0.0, 100.0]));

        resolution.zoom(0.5, 0.5, 0.0).unwrap();
        // pan to the left past the start
        resolution.zoom(1.0, 0.5, 1.0).unwrap();
        let [lo, hi] = resolution.domain().unwrap().as_interval().unwrap();
        assert_eq!(lo, 0.0);
        assert!((hi - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoomed_domain_survives_new_data() {
        let v = view(&[0.0, 100.0]);
        let mut resolution = ScaleResolution::new(Channel::X);
        resolution.register_member(member(&v, DataType::Index)).unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure_domain().unwrap();
        resolution.zoom(0.5, 0.5, 0.0).unwrap();
        let zoomed = resolution.domain().unwrap();

        *v.collector.values.borrow_mut() = vec![0.0, 200.0];
        resolution.reconfigure_domain().unwrap();
        assert_eq!(resolution.domain().unwrap(), zoomed);
        assert_eq!(
            resolution.initial_domain_snapshot(),
            Some(&Domain::Continuous([0.0, 200.0]))
        );
    }

    #[test]
    fn test_unzoomed_domain_follows_new_data() {
        let v = view(&[0.0, 100.0]);
        let mut resolution = ScaleResolution::new(Channel::Y);
        resolution.register_member(member(&v, DataType::Quantitative)).unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure_domain().unwrap();

        *v.collector.values.borrow_mut() = vec![0.0, 50.0];
        resolution.reconfigure_domain().unwrap();
        // no animator, so the transition snaps
        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([0.0, 50.0]));
    }

    struct FrameCounter {
        transitions: Cell<usize>,
        renders: Cell<usize>,
    }

    impl Animator for FrameCounter {
        fn request_transition(&self) {
            self.transitions.set(self.transitions.get() + 1);
        }

        fn request_render(&self) {
            self.renders.set(self.renders.get() + 1);
        }
    }

    #[test]
    fn test_animated_zoom_to() {
        let animator = Rc::new(FrameCounter {
            transitions: Cell::new(0),
            renders: Cell::new(0),
        });
        let v = view(&[0.0, 1000.0]);
        let mut resolution = ScaleResolution::new(Channel::X).with_animator(animator.clone());
        resolution.register_member(member(&v, DataType::Index)).unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure_domain().unwrap();

        resolution.zoom_to(&[100.0, 200.0].into(), 500.0).unwrap();
        assert_eq!(animator.transitions.get(), 1);
        assert!(resolution.advance_transition(0.0).unwrap());
        assert!(resolution.advance_transition(250.0).unwrap());
        assert!(!resolution.advance_transition(500.0).unwrap());
        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([100.0, 200.0]));
        assert!(!resolution.is_transitioning());

        resolution.zoom_to(&[0.0, 10.0].into(), 0.0).unwrap();
        assert_eq!(animator.renders.get(), 1);
    }

    #[test]
    fn test_zoom_interrupts_transition() {
        let animator = Rc::new(FrameCounter {
            transitions: Cell::new(0),
            renders: Cell::new(0),
        });
        let v = view(&[0.0, 1000.0]);
        let mut resolution = ScaleResolution::new(Channel::X).with_animator(animator);
        resolution.register_member(member(&v, DataType::Index)).unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure_domain().unwrap();

        resolution.zoom_to(&[100.0, 200.0].into(), 500.0).unwrap();
        resolution.zoom(0.5, 0.5, 0.0).unwrap();
        assert!(!resolution.is_transitioning());
        assert!(!resolution.advance_transition(100.0).unwrap());
    }

    #[test]
    fn test_discrete_scales_do_not_zoom() {
        let v = view(&[]);
        let mut resolution = ScaleResolution::new(Channel::Color);
        resolution
            .register_member(ScaleResolutionMember::new(
                &v,
                Channel::Color,
                ChannelDef::field("value", DataType::Nominal).with_scale(ScaleProps {
                    domain: Some(DomainSpec::Categories(vec!["a".into(), "b".into()])),
                    ..Default::default()
                }),
            ))
            .unwrap();
        resolution.initialize_scale().unwrap();
        assert!(!resolution.zoom(0.5, 0.5, 0.0).unwrap());
        assert_eq!(
            resolution.zoom_to(&[0.0, 1.0].into(), 0.0),
            Err(ScaleError::ZoomNotSupported(ScaleType::Ordinal))
        );
        assert_eq!(resolution.zoom_level(), 1.0);
    }

    #[test]
    fn test_locus_resolution() {
        let mut store = GenomeStore::new();
        store.add(CoordinateSpace::from_sizes(
            "test",
            vec![ContigSize::new("chr1", 100), ContigSize::new("chr2", 200)],
        ));
        let v = view(&[]);
        let mut resolution = ScaleResolution::new(Channel::X).with_genomes(Arc::new(store));
        resolution.register_member(member(&v, DataType::Locus)).unwrap();

        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([0.0, 300.0]));
        assert_eq!(resolution.zoom_extent().unwrap(), [0.0, 300.0]);

        let target = DomainSpec::Loci(vec![crate::types::LocusBound::chrom("chr2")]);
        resolution.zoom_to(&target, 0.0).unwrap();
        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([100.0, 300.0]));
        assert_eq!(resolution.zoom_level(), 1.5);

        let [begin, end] = resolution.complex_domain().unwrap();
        assert_eq!(begin, ComplexValue::Locus(crate::types::Locus::new("chr2", 0)));
        assert_eq!(end, ComplexValue::Locus(crate::types::Locus::new("chr2", 200)));
    }

    #[test]
    fn test_locus_without_genome() {
        let v = view(&[]);
        let mut resolution = ScaleResolution::new(Channel::X);
        resolution.register_member(member(&v, DataType::Locus)).unwrap();
        assert_eq!(
            resolution.initialize_scale().unwrap_err(),
            ScaleError::Genome(GenomeError::NoGenome)
        );
    }

    #[test]
    fn test_explicit_zoom_extent() {
        let v = view(&[0.0, 100.0]);
        let mut resolution = ScaleResolution::new(Channel::X);
        resolution
            .register_member(ScaleResolutionMember::new(
                &v,
                Channel::X,
                ChannelDef::field("value", DataType::Quantitative).with_scale(ScaleProps {
                    zoom: Some(ZoomSpec::Params(crate::scale::ZoomParams {
                        extent: Some(DomainSpec::Numbers(vec![-50.0, 150.0])),
                    })),
                    ..Default::default()
                }),
            ))
            .unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure_domain().unwrap();
        assert_eq!(resolution.zoom_extent().unwrap(), [-50.0, 150.0]);
        assert_eq!(resolution.zoom_level(), 2.0);
    }

    #[test]
    fn test_categorical_order_is_stable() {
        let v = view(&[]);
        let mut resolution = ScaleResolution::new(Channel::Color);
        let mut def = ChannelDef::field("value", DataType::Nominal);
        def.scale = Some(ScaleProps {
            domain: Some(DomainSpec::Categories(vec!["b".into(), "a".into()])),
            ..Default::default()
        });
        let id = resolution
            .register_member(ScaleResolutionMember::new(&v, Channel::Color, def))
            .unwrap();
        resolution.initialize_scale().unwrap();
        assert_eq!(
            resolution.domain().unwrap(),
            Domain::Discrete(vec!["b".into(), "a".into()])
        );

        let mut def = ChannelDef::field("value", DataType::Nominal);
        def.scale = Some(ScaleProps {
            domain: Some(DomainSpec::Categories(vec!["c".into(), "a".into(), "b".into()])),
            ..Default::default()
        });
        resolution.unregister_member(id);
        resolution
            .register_member(ScaleResolutionMember::new(&v, Channel::Color, def))
            .unwrap();
        resolution.reconfigure().unwrap();
        assert_eq!(
            resolution.domain().unwrap(),
            Domain::Discrete(vec!["b".into(), "a".into(), "c".into()])
        );
        assert_eq!(resolution.categorical_indexer().index("c"), Some(2));
    }

    #[test]
    fn test_dynamic_range() {
        let params = ParamStore::new();
        params.set("width", 400.0);
        let v = view(&[0.0, 10.0]);
        let mut resolution = ScaleResolution::new(Channel::X).with_params(params.clone());
        resolution
            .register_member(ScaleResolutionMember::new(
                &v,
                Channel::X,
                ChannelDef::field("value", DataType::Index).with_scale(ScaleProps {
                    range: Some(vec![
                        crate::scale::RangeElement::Value(0.0),
                        crate::scale::RangeElement::expr("width"),
                    ]),
                    ..Default::default()
                }),
            ))
            .unwrap();
        assert_eq!(resolution.scale().unwrap().range(), vec![0.0, 400.0]);

        params.set("width", 800.0);
        assert!(resolution.sync_params().unwrap());
        assert_eq!(resolution.scale().unwrap().range(), vec![0.0, 800.0]);
        assert!(!resolution.sync_params().unwrap());
    }
    fn counter() -> Rc<FrameCounter> {
        Rc::new(FrameCounter {
            transitions: Cell::new(0),
            renders: Cell::new(0),
        })
    }

    fn finish_transition(resolution: &mut ScaleResolution, mut now: f64) {
        while resolution.advance_transition(now).unwrap() {
            now += 16.0;
        }
    }

    #[test]
    fn test_new_data_retargets_running_transition() {
        let animator = counter();
        let v = view(&[0.0, 100.0]);
        let mut resolution = ScaleResolution::new(Channel::X).with_animator(animator.clone());
        resolution.register_member(member(&v, DataType::Index)).unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure_domain().unwrap();

        *v.collector.values.borrow_mut() = vec![0.0, 200.0];
        resolution.reconfigure_domain().unwrap();
        resolution.advance_transition(0.0).unwrap();
        resolution.advance_transition(100.0).unwrap();
        assert!(resolution.is_transitioning());

        *v.collector.values.borrow_mut() = vec![0.0, 300.0];
        resolution.reconfigure_domain().unwrap();
        assert_eq!(animator.transitions.get(), 2);
        finish_transition(&mut resolution, 1000.0);

        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([0.0, 300.0]));
        assert!(!resolution.is_zoomed());
    }

    #[test]
    fn test_user_transition_survives_new_data() {
        let v = view(&[0.0, 1000.0]);
        let mut resolution = ScaleResolution::new(Channel::X).with_animator(counter());
        resolution.register_member(member(&v, DataType::Index)).unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure_domain().unwrap();

        resolution.zoom_to(&[100.0, 200.0].into(), 500.0).unwrap();
        resolution.advance_transition(0.0).unwrap();
        resolution.advance_transition(100.0).unwrap();

        *v.collector.values.borrow_mut() = vec![0.0, 2000.0];
        resolution.reconfigure_domain().unwrap();
        finish_transition(&mut resolution, 200.0);

        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([100.0, 200.0]));
        assert_eq!(
            resolution.initial_domain_snapshot(),
            Some(&Domain::Continuous([0.0, 2000.0]))
        );
        assert!(resolution.is_zoomed());
    }

    #[test]
    fn test_first_data_after_empty_reconfigure_is_immediate() {
        let animator = counter();
        let v = view(&[]);
        let mut resolution = ScaleResolution::new(Channel::X).with_animator(animator.clone());
        resolution.register_member(member(&v, DataType::Index)).unwrap();
        resolution.initialize_scale().unwrap();
        resolution.reconfigure_domain().unwrap();
        assert_eq!(resolution.initial_domain_snapshot(), None);

        *v.collector.values.borrow_mut() = vec![0.0, 1000.0];
        resolution.reconfigure_domain().unwrap();
        assert_eq!(animator.transitions.get(), 0);
        assert_eq!(resolution.domain().unwrap(), Domain::Continuous([0.0, 1000.0]));
        assert_eq!(
            resolution.initial_domain_snapshot(),
            Some(&Domain::Continuous([0.0, 1000.0]))
        );
    }
}
