//! Paging, filtering and sorting for list calls.
//!
//! Filters and sorts are kept in insertion order with duplicates dropped,
//! and are emitted as one `filter` / `sort` query parameter each:
//!
//! ```text
//! pageNumber=2&pageSize=100&filter=name:eq:Sales,tags:in:[a,b]&sort=updatedAt:desc
//! ```

use crate::error::ValidationError;
use crate::macros::string_enum;
use crate::validators::is_int_in_range;

string_enum! {
    /// Fields the server can filter and sort on
    Field("field") {
        CreatedAt => "createdAt",
        LastLogin => "lastLogin",
        Name => "name",
        OwnerName => "ownerName",
        SiteRole => "siteRole",
        Tags => "tags",
        UpdatedAt => "updatedAt",
    }
}

string_enum! {
    Operator("operator") {
        Equals => "eq",
        GreaterThan => "gt",
        GreaterThanOrEqual => "gte",
        LessThan => "lt",
        LessThanOrEqual => "lte",
        In => "in",
    }
}

string_enum! {
    Direction("direction") {
        Asc => "asc",
        Desc => "desc",
    }
}

string_enum! {
    Resolution("resolution") {
        High => "high",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl FilterValue {
    fn encode(&self) -> String {
        match self {
            Self::One(value) => value.clone(),
            Self::Many(values) => format!("[{}]", values.join(",")),
        }
    }
}

/// `field:operator:value`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    field: Field,
    operator: Operator,
    value: FilterValue,
}

impl Filter {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `In` is given a single value or any
    /// other operator is given a list
    pub fn new(field: Field, operator: Operator, value: FilterValue) -> Result<Self, ValidationError> {
        match (operator, &value) {
            (Operator::In, FilterValue::One(_)) => {
                return Err(ValidationError::new("value", "the in operator takes a list of values"));
            }
            (Operator::In, FilterValue::Many(values)) if values.is_empty() => {
                return Err(ValidationError::new("value", "the in operator needs at least one value"));
            }
            (op, FilterValue::Many(_)) if op != Operator::In => {
                return Err(ValidationError::new(
                    "value",
                    format!("the {op} operator takes a single value"),
                ));
            }
            _ => {}
        }
        Ok(Self {
            field,
            operator,
            value,
        })
    }

    /// Shorthand for an `eq` filter
    #[must_use]
    pub fn equals(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            operator: Operator::Equals,
            value: FilterValue::One(value.into()),
        }
    }

    #[must_use]
    pub fn field(&self) -> Field {
        self.field
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    fn encode(&self) -> String {
        format!("{}:{}:{}", self.field, self.operator, self.value.encode())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sort {
    pub field: Field,
    pub direction: Direction,
}

impl Sort {
    #[must_use]
    pub fn new(field: Field, direction: Direction) -> Self {
        Self { field, direction }
    }

    fn encode(&self) -> String {
        format!("{}:{}", self.field, self.direction)
    }
}

/// Options of a paged list call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    page_number: u32,
    page_size: Option<u32>,
    filters: Vec<Filter>,
    sorts: Vec<Sort>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: None,
            filters: Vec::new(),
            sorts: Vec::new(),
        }
    }
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if either value is zero
    pub fn with_page(page_number: u32, page_size: u32) -> Result<Self, ValidationError> {
        let mut options = Self::default();
        options.set_page_number(page_number)?;
        options.set_page_size(page_size)?;
        Ok(options)
    }

    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `page_number` is zero
    pub fn set_page_number(&mut self, page_number: u32) -> Result<(), ValidationError> {
        is_int_in_range("page_number", i64::from(page_number), 1, i64::from(u32::MAX))?;
        self.page_number = page_number;
        Ok(())
    }

    #[must_use]
    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `page_size` is zero
    pub fn set_page_size(&mut self, page_size: u32) -> Result<(), ValidationError> {
        is_int_in_range("page_size", i64::from(page_size), 1, i64::from(u32::MAX))?;
        self.page_size = Some(page_size);
        Ok(())
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Appends a filter unless an identical one is already present
    pub fn add_filter(&mut self, filter: Filter) -> &mut Self {
        if !self.filters.contains(&filter) {
            self.filters.push(filter);
        }
        self
    }

    #[must_use]
    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    /// Appends a sort unless an identical one is already present
    pub fn add_sort(&mut self, sort: Sort) -> &mut Self {
        if !self.sorts.contains(&sort) {
            self.sorts.push(sort);
        }
        self
    }

    /// Copy of these options pointing at another page
    pub(crate) fn for_page(&self, page_number: u32, page_size: Option<u32>) -> Self {
        Self {
            page_number,
            page_size: self.page_size.or(page_size),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![("pageNumber".to_string(), self.page_number.to_string())];
        if let Some(page_size) = self.page_size {
            query.push(("pageSize".to_string(), page_size.to_string()));
        }
        if !self.filters.is_empty() {
            let filters: Vec<String> = self.filters.iter().map(Filter::encode).collect();
            query.push(("filter".to_string(), filters.join(",")));
        }
        if !self.sorts.is_empty() {
            let sorts: Vec<String> = self.sorts.iter().map(Sort::encode).collect();
            query.push(("sort".to_string(), sorts.join(",")));
        }
        query
    }
}

/// Options of a view image request
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRequestOptions {
    pub resolution: Option<Resolution>,
}

impl ImageRequestOptions {
    #[must_use]
    pub fn high_resolution() -> Self {
        Self {
            resolution: Some(Resolution::High),
        }
    }

    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.resolution
            .map(|resolution| vec![("resolution".to_string(), resolution.to_string())])
            .unwrap_or_default()
    }
}
