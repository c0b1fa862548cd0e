//! Argument shaping: collapsing one call's values into one payload.

use flashbox_core::{ArgumentStyle, Payload};

/// Collapses the positional values of one flash call into a single payload
/// per the configured argument style.
///
/// Shaping never fails; an empty value list yields null under `single` and
/// `auto`, the empty string under `join`, and an empty array under `array`.
pub(crate) fn shape_values(style: ArgumentStyle, separator: &str, values: &[Payload]) -> Payload {
    match style {
        ArgumentStyle::Single => values.first().cloned().unwrap_or(Payload::Null),
        ArgumentStyle::Join => Payload::String(
            values
                .iter()
                .map(join_fragment)
                .collect::<Vec<_>>()
                .join(separator),
        ),
        ArgumentStyle::Array => Payload::Array(values.to_vec()),
        ArgumentStyle::Auto => match values {
            [] => Payload::Null,
            [one] => one.clone(),
            many => Payload::Array(many.to_vec()),
        },
    }
}

/// String form of one payload for the `join` style.
///
/// Strings join verbatim (no surrounding quotes), null joins as the empty
/// string, everything else joins as its compact JSON rendering.
fn join_fragment(value: &Payload) -> String {
    match value {
        Payload::String(s) => s.clone(),
        Payload::Null => String::new(),
        other => other.to_string(),
    }
}
