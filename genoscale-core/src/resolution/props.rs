//! Merging the scale properties of all members and filling in defaults by
//! channel and data type.

use super::member::ScaleResolutionMember;
use crate::error::{Result, ScaleError};
use crate::scale::{RangeElement, ScaleProps, ScaleType, ZoomSpec};
use crate::types::{Channel, DataType};

/// Keeps the first defined value of each property. Later members that
/// disagree are reported and ignored. Domains are resolved separately.
pub fn merge_scale_props<'a>(props: impl IntoIterator<Item = &'a ScaleProps>) -> ScaleProps {
    let mut merged = ScaleProps::default();

    macro_rules! merge {
        ($source:expr, $($field:ident),+) => {
            $(
                match (&merged.$field, &$source.$field) {
                    (None, Some(value)) => merged.$field = Some(value.clone()),
                    (Some(existing), Some(value)) if existing != value => {
                        log::warn!(
                            "Conflicting scale property {}: {:?} vs. {:?}. Using {:?}.",
                            stringify!($field),
                            existing,
                            value,
                            existing
                        );
                    }
                    _ => {}
                }
            )+
        };
    }

    for source in props {
        merge!(
            source,
            scale_type,
            name,
            range,
            reverse,
            zoom,
            align,
            padding,
            padding_inner,
            padding_outer,
            exponent,
            base,
            zero,
            assembly
        );
    }

    merged
}

/// Default scale family for a data type on a channel.
pub fn default_scale_type(channel: Channel, data_type: DataType) -> Result<ScaleType> {
    use DataType::*;
    use ScaleType as S;

    if matches!(data_type, Index | Locus) {
        return if matches!(channel, Channel::X | Channel::Y) {
            Ok(if data_type == Index { S::Index } else { S::Locus })
        } else {
            Err(ScaleError::IncompatibleChannel { channel, data_type })
        };
    }

    let scale_type = match (channel.primary(), data_type) {
        (Channel::Sample, _) => Some(S::Null),
        (Channel::X | Channel::Y, Quantitative) => Some(S::Linear),
        (Channel::X | Channel::Y, _) => Some(S::Band),
        (Channel::Size | Channel::Opacity | Channel::FillOpacity | Channel::StrokeOpacity, Nominal) => None,
        (Channel::Size | Channel::Opacity | Channel::FillOpacity | Channel::StrokeOpacity, Ordinal) => {
            Some(S::Point)
        }
        (Channel::Color | Channel::Fill | Channel::Stroke | Channel::Shape, Nominal | Ordinal) => {
            Some(S::Ordinal)
        }
        (Channel::Shape, Quantitative) => None,
        (Channel::StrokeWidth | Channel::Angle, Nominal | Ordinal) => None,
        (Channel::Dx | Channel::Dy, Quantitative) => Some(S::Null),
        (Channel::Dx | Channel::Dy, _) => None,
        (_, Quantitative) => Some(S::Linear),
        (_, _) => Some(S::Ordinal),
    };

    scale_type.ok_or(ScaleError::IncompatibleChannel { channel, data_type })
}

/// Merged properties with defaults applied. `explicit_domain` tells whether
/// any member configures a domain.
pub fn resolve_scale_props(
    channel: Channel,
    data_type: DataType,
    members: &[&ScaleResolutionMember],
    explicit_domain: bool,
) -> Result<ScaleProps> {
    let mut props = merge_scale_props(members.iter().filter_map(|m| m.channel_def.scale.as_ref()));

    let scale_type = match props.scale_type {
        Some(scale_type) => scale_type,
        None => default_scale_type(channel, data_type)?,
    };
    props.scale_type = Some(scale_type);

    if scale_type == ScaleType::Null {
        return Ok(ScaleProps::with_type(ScaleType::Null));
    }

    if channel.is_positional() && props.range.is_none() {
        props.range = Some(vec![RangeElement::Value(0.0), RangeElement::Value(1.0)]);
    }

    if channel.primary() == Channel::Y && scale_type.is_discrete() && props.reverse.is_none() {
        props.reverse = Some(true);
    }

    if props.zoom.is_none() && matches!(scale_type, ScaleType::Index | ScaleType::Locus) {
        props.zoom = Some(ZoomSpec::Enabled(true));
    }

    if props.zero.is_none()
        && data_type == DataType::Quantitative
        && matches!(scale_type, ScaleType::Linear | ScaleType::Pow | ScaleType::Sqrt)
    {
        props.zero = Some(!explicit_domain);
    }

    Ok(props)
}
