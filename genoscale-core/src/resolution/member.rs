//! Members are (view, channel) registrations that share a scale resolution.
//!
//! The resolution only holds a weak reference to the view. A view that has
//! been dropped simply stops contributing.

use std::fmt;
use std::rc::{Rc, Weak};

use super::domain::{DomainArray, DomainKey};
use crate::scale::ScaleProps;
use crate::types::{Channel, DataType};

/// What the resolution needs to know about a registered view.
pub trait MemberView {
    fn name(&self) -> &str;

    /// Hidden views do not contribute to domains.
    fn is_configured_visible(&self) -> bool {
        true
    }

    /// Whether the view's data has been loaded.
    fn is_data_initialized(&self) -> bool {
        true
    }

    /// Collector that computes data domains for this view, if any.
    fn collector(&self) -> Option<Rc<dyn DataCollector>> {
        None
    }
}

/// Computes per-field domains over a view's data. Views sharing a collector
/// share its domains, so each field is queried once per collector.
pub trait DataCollector {
    fn domain(&self, key: &DomainKey, data_type: DataType) -> Option<DomainArray>;
}

/// The part of an encoding that matters for scale resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelDef {
    pub field: Option<String>,
    pub data_type: Option<DataType>,
    pub scale: Option<ScaleProps>,
    /// The encoded values take no part in the data domain.
    pub domain_inert: bool,
}

impl ChannelDef {
    pub fn field(field: impl Into<String>, data_type: DataType) -> Self {
        Self {
            field: Some(field.into()),
            data_type: Some(data_type),
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: ScaleProps) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn has_explicit_domain(&self) -> bool {
        self.scale
            .as_ref()
            .and_then(|scale| scale.domain.as_ref())
            .is_some_and(|domain| !domain.is_empty())
    }
}

pub struct ScaleResolutionMember {
    pub view: Weak<dyn MemberView>,
    pub channel: Channel,
    pub channel_def: ChannelDef,
    pub contributes_to_domain: bool,
}

impl ScaleResolutionMember {
    pub fn new<V: MemberView + 'static>(view: &Rc<V>, channel: Channel, channel_def: ChannelDef) -> Self {
        let view: Rc<dyn MemberView> = view.clone();
        Self {
            view: Rc::downgrade(&view),
            channel,
            channel_def,
            contributes_to_domain: true,
        }
    }

    pub fn without_domain_contribution(mut self) -> Self {
        self.contributes_to_domain = false;
        self
    }

    /// Visible, and either loaded or carrying an explicit domain. Explicit
    /// domains count before the data arrives.
    pub fn is_active(&self) -> bool {
        let Some(view) = self.view.upgrade() else {
            return false;
        };
        view.is_configured_visible()
            && (view.is_data_initialized() || self.channel_def.has_explicit_domain())
    }

    pub fn view_name(&self) -> Option<String> {
        self.view.upgrade().map(|view| view.name().to_string())
    }

    /// Domain key the member's data contributes under, if any.
    pub fn domain_key(&self, data_type: DataType) -> Option<DomainKey> {
        if !self.contributes_to_domain || self.channel_def.domain_inert {
            return None;
        }
        self.channel_def
            .field
            .as_ref()
            .map(|field| DomainKey::new(field.clone(), data_type))
    }
}

impl fmt::Debug for ScaleResolutionMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleResolutionMember")
            .field("view", &self.view_name())
            .field("channel", &self.channel)
            .field("channel_def", &self.channel_def)
            .field("contributes_to_domain", &self.contributes_to_domain)
            .finish()
    }
}

/// Handle returned on registration, used to unregister the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct View {
        visible: Cell<bool>,
        loaded: Cell<bool>,
    }

    impl MemberView for View {
        fn name(&self) -> &str {
            "track"
        }

        fn is_configured_visible(&self) -> bool {
            self.visible.get()
        }

        fn is_data_initialized(&self) -> bool {
            self.loaded.get()
        }
    }

    fn view(visible: bool, loaded: bool) -> Rc<View> {
        Rc::new(View {
            visible: Cell::new(visible),
            loaded: Cell::new(loaded),
        })
    }

    #[test]
    fn test_activity() {
        let loaded = view(true, true);
        let member = ScaleResolutionMember::new(&loaded, Channel::X, ChannelDef::field("a", DataType::Quantitative));
        assert!(member.is_active());

        loaded.visible.set(false);
        assert!(!member.is_active());

        let pending = view(true, false);
        let member = ScaleResolutionMember::new(&pending, Channel::X, ChannelDef::field("a", DataType::Quantitative));
        assert!(!member.is_active());

        let explicit = ScaleResolutionMember::new(
            &pending,
            Channel::X,
            ChannelDef::field("a", DataType::Quantitative).with_scale(ScaleProps {
                domain: Some([0.0, 1.0].into()),
                ..Default::default()
            }),
        );
        assert!(explicit.is_active());
    }

    #[test]
    fn test_dropped_view_is_inactive() {
        let member = {
            let view = view(true, true);
            ScaleResolutionMember::new(&view, Channel::Y, ChannelDef::default())
        };
        assert!(!member.is_active());
        assert_eq!(member.view_name(), None);
    }

    #[test]
    fn test_domain_key() {
        let view = view(true, true);
        let mut def = ChannelDef::field("category", DataType::Nominal);
        let member = ScaleResolutionMember::new(&view, Channel::Color, def.clone());
        assert_eq!(
            member.domain_key(DataType::Nominal),
            Some(DomainKey::new("category", DataType::Nominal))
        );

        def.domain_inert = true;
        let inert = ScaleResolutionMember::new(&view, Channel::Color, def);
        assert_eq!(inert.domain_key(DataType::Nominal), None);
    }
}
