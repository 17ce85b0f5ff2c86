use crate::error::{Result, TscError};
use crate::utils::{find, parse_document, parse_int, required_attr};

/// Paging metadata sent back with every listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationItem {
    pub page_number: u32,
    pub page_size: u32,
    pub total_available: u64,
}

impl PaginationItem {
    /// Reads the `<pagination>` element of a listing response
    ///
    /// # Errors
    ///
    /// Returns [`TscError::MalformedResponse`] if the element or one of its
    /// attributes is missing or not numeric
    pub fn from_response(body: &str, ns: &str) -> Result<Self> {
        Self::optional_from_response(body, ns)?.ok_or_else(|| {
            TscError::MalformedResponse("response has no <pagination> element".into())
        })
    }

    /// Like [`Self::from_response`], for listings the server does not page
    pub(crate) fn optional_from_response(body: &str, ns: &str) -> Result<Option<Self>> {
        let doc = parse_document(body)?;
        let Some(node) = find(doc.root(), ns, "pagination") else {
            return Ok(None);
        };

        let number = |name: &str| -> Result<i64> {
            let value = parse_int(name, &required_attr(node, name)?)?;
            if value < 0 {
                return Err(TscError::MalformedResponse(format!(
                    "{name} cannot be negative: {value}"
                )));
            }
            Ok(value)
        };

        Ok(Some(Self {
            page_number: to_u32("pageNumber", number("pageNumber")?)?,
            page_size: to_u32("pageSize", number("pageSize")?)?,
            total_available: number("totalAvailable")?.unsigned_abs(),
        }))
    }

    /// One page holding all `count` items
    pub(crate) fn single_page(count: usize) -> Self {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        Self {
            page_number: 1,
            page_size: count.max(1),
            total_available: u64::from(count),
        }
    }

    /// Whether pages after this one still hold items
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.page_number) * u64::from(self.page_size) < self.total_available
    }
}

fn to_u32(name: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| TscError::MalformedResponse(format!("{name} is out of range: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NAMESPACE;

    fn pagination(number: u32, size: u32, total: u64) -> String {
        format!(
            r#"<tsResponse xmlns="{NAMESPACE}"><pagination pageNumber="{number}" pageSize="{size}" totalAvailable="{total}"/></tsResponse>"#
        )
    }

    #[test]
    fn test_parse_pagination() {
        let item = PaginationItem::from_response(&pagination(2, 100, 250), NAMESPACE).unwrap();
        assert_eq!(2, item.page_number);
        assert_eq!(100, item.page_size);
        assert_eq!(250, item.total_available);
        assert!(item.has_more());
    }

    #[test]
    fn test_last_page_has_no_more() {
        let item = PaginationItem::from_response(&pagination(3, 2, 5), NAMESPACE).unwrap();
        assert!(!item.has_more());
        let item = PaginationItem::from_response(&pagination(1, 100, 0), NAMESPACE).unwrap();
        assert!(!item.has_more());
    }

    #[test]
    fn test_single_page_has_no_more() {
        let item = PaginationItem::single_page(3);
        assert_eq!(3, item.total_available);
        assert!(!item.has_more());
        assert!(!PaginationItem::single_page(0).has_more());
    }

    #[test]
    fn test_missing_pagination_is_malformed() {
        let body = format!(r#"<tsResponse xmlns="{NAMESPACE}"/>"#);
        assert!(matches!(
            PaginationItem::from_response(&body, NAMESPACE),
            Err(TscError::MalformedResponse(_))
        ));
    }
}
