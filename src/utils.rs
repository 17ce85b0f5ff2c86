use crate::error::{Result, TscError};
use byte_unit::{Byte, Unit, UnitType};
use chrono::{DateTime, Utc};
use roxmltree::{Document, Node};

/// Server booleans: anything other than `true` (any case) is false
#[must_use]
pub fn string_to_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Parses the `2016-08-11T21:22:40Z` timestamps the server emits
///
/// # Errors
///
/// Returns [`TscError::MalformedResponse`] if the value is not a valid timestamp
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| TscError::MalformedResponse(format!("invalid datetime {value:?}: {e}")))
}

/// Parses a base-10 integer attribute
///
/// # Errors
///
/// Returns [`TscError::MalformedResponse`] if the value is not numeric
pub fn parse_int(field: &str, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|_| TscError::MalformedResponse(format!("{field} is not an integer: {value:?}")))
}

/// Formats a size reported in megabytes, e.g. `1.23 GB`
#[must_use]
pub fn format_megabytes(megabytes: u64) -> String {
    match Byte::from_u64_with_unit(megabytes, Unit::MB) {
        Some(size) => format!("{:#.2}", size.get_appropriate_unit(UnitType::Decimal)),
        None => format!("{megabytes} MB"),
    }
}

pub(crate) fn parse_document(body: &str) -> Result<Document<'_>> {
    Ok(Document::parse(body)?)
}

/// Returns the first descendant of `node` named `name` in namespace `ns`
pub(crate) fn find<'a, 'input>(node: Node<'a, 'input>, ns: &str, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| n.has_tag_name((ns, name)))
}

/// Returns the first direct child of `node` named `name` in namespace `ns`
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, ns: &str, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((ns, name)))
}

pub(crate) fn find_all<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    ns: &'a str,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants().filter(move |n| n.has_tag_name((ns, name)))
}

pub(crate) fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

pub(crate) fn bool_attr(node: Node<'_, '_>, name: &str) -> Option<bool> {
    node.attribute(name).map(string_to_bool)
}

pub(crate) fn int_attr(node: Node<'_, '_>, name: &str) -> Result<Option<i64>> {
    node.attribute(name)
        .map(|value| parse_int(name, value))
        .transpose()
}

pub(crate) fn datetime_attr(node: Node<'_, '_>, name: &str) -> Result<Option<DateTime<Utc>>> {
    node.attribute(name).map(parse_datetime).transpose()
}

pub(crate) fn required_attr(node: Node<'_, '_>, name: &str) -> Result<String> {
    attr(node, name).ok_or_else(|| {
        TscError::MalformedResponse(format!(
            "<{}> element has no {name} attribute",
            node.tag_name().name()
        ))
    })
}
