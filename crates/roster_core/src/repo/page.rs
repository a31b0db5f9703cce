//! Offset pagination for member queries.
//!
//! # Invariants
//! - `page` is zero-based.
//! - `size >= 1` for any request that reaches SQL.
//! - `total_pages = ceil(total_elements / size)`.

use crate::model::validation::ValidationError;
use serde::Serialize;

/// Member columns that may be used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSortProperty {
    Id,
    Username,
    Age,
}

impl MemberSortProperty {
    pub(crate) fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Username => "username",
            Self::Age => "age",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub property: MemberSortProperty,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(property: MemberSortProperty) -> Self {
        Self {
            property,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(property: MemberSortProperty) -> Self {
        Self {
            property,
            direction: SortDirection::Desc,
        }
    }

    /// `ORDER BY` body; `id ASC` is appended so equal keys page stably.
    pub(crate) fn order_by_sql(sort: Option<Self>) -> String {
        match sort {
            Some(Sort {
                property: MemberSortProperty::Id,
                direction,
            }) => format!("id {}", direction.keyword()),
            Some(sort) => format!(
                "{} {}, id ASC",
                sort.property.column(),
                sort.direction.keyword()
            ),
            None => "id ASC".to_string(),
        }
    }
}

/// Which slice of a result set to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort>,
}

impl PageRequest {
    /// Unsorted request for `page` (zero-based) of `size` items.
    ///
    /// # Errors
    /// - `ZeroPageSize` when `size == 0`.
    pub fn of(page: u32, size: u32) -> Result<Self, ValidationError> {
        let request = Self {
            page,
            size,
            sort: None,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.size == 0 {
            return Err(ValidationError::ZeroPageSize);
        }
        Ok(())
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the total count of the unpaged query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.number) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// Converts the content while keeping page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
