//! Page requests and result pages exchanged between routes, services and
//! repositories.
//!
//! A [`PageRequest`] is an immutable value: services forward it to the
//! repository untouched and re-wrap the returned [`Page`] with [`Page::map`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::types::TypeConstraintError;

/// Page size used when the caller does not provide one.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Largest page size accepted from callers.
pub const MAX_PAGE_SIZE: usize = 100;

/// Largest zero-based page index accepted from callers.
pub const MAX_PAGE_INDEX: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Direction::Asc),
            "DESC" => Ok(Direction::Desc),
            _ => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort direction `{s}`"
            ))),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

/// Client properties a page can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    Cpf,
    Income,
    BirthDate,
    Children,
}

impl FromStr for SortField {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "cpf" => Ok(SortField::Cpf),
            "income" => Ok(SortField::Income),
            "birthDate" | "birth_date" => Ok(SortField::BirthDate),
            "children" => Ok(SortField::Children),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "cannot order by `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl Sort {
    pub fn new(field: SortField, direction: Direction) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, Direction::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, Direction::Desc)
    }
}

/// Zero-based page index, page size and optional ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRequest {
    page: usize,
    size: usize,
    sort: Option<Sort>,
}

impl PageRequest {
    /// Requests page `page` (zero-based) holding at most `size` elements.
    ///
    /// The offset `page * size` must fit a signed 64-bit SQL `OFFSET`.
    pub fn of(page: usize, size: usize) -> Result<Self, TypeConstraintError> {
        if size == 0 {
            return Err(TypeConstraintError::InvalidValue(
                "page size must be greater than zero".to_string(),
            ));
        }
        let offset_fits = page
            .checked_mul(size)
            .is_some_and(|offset| i64::try_from(offset).is_ok());
        if !offset_fits {
            return Err(TypeConstraintError::InvalidValue(format!(
                "page {page} of size {size} is out of range"
            )));
        }
        Ok(Self {
            page,
            size,
            sort: None,
        })
    }

    /// Same as [`PageRequest::of`] with an explicit ordering.
    pub fn sorted(page: usize, size: usize, sort: Sort) -> Result<Self, TypeConstraintError> {
        Ok(Self::of(page, size)?.with_sort(sort))
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// Number of elements preceding this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// An ordered slice of results together with the total element count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    request: Option<PageRequest>,
    total_elements: usize,
}

impl<T> Page<T> {
    /// Builds the page answering `request`.
    ///
    /// A non-empty page whose window reaches past `total` is treated as the
    /// last one, so the total becomes `offset + content.len()`.
    pub fn new(content: Vec<T>, request: PageRequest, total: usize) -> Self {
        let total_elements =
            if !content.is_empty() && request.offset().saturating_add(request.size()) > total {
                request.offset().saturating_add(content.len())
            } else {
                total
            };

        Self {
            content,
            request: Some(request),
            total_elements,
        }
    }

    /// A single page holding every element.
    pub fn unpaged(content: Vec<T>) -> Self {
        let total_elements = content.len();
        Self {
            content,
            request: None,
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }

    pub fn request(&self) -> Option<&PageRequest> {
        self.request.as_ref()
    }

    pub fn total_elements(&self) -> usize {
        self.total_elements
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Zero-based index of this page.
    pub fn number(&self) -> usize {
        self.request.map_or(0, |r| r.page())
    }

    pub fn size(&self) -> usize {
        self.request.map_or(self.content.len(), |r| r.size())
    }

    pub fn total_pages(&self) -> usize {
        match self.size() {
            0 => 1,
            size => self.total_elements.div_ceil(size),
        }
    }

    pub fn is_first(&self) -> bool {
        self.number() == 0
    }

    pub fn is_last(&self) -> bool {
        self.number().saturating_add(1) >= self.total_pages()
    }

    /// Converts every element, keeping order, request and total unchanged.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            request: self.request,
            total_elements: self.total_elements,
        }
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Page", 10)?;
        state.serialize_field("content", &self.content)?;
        state.serialize_field("totalElements", &self.total_elements)?;
        state.serialize_field("totalPages", &self.total_pages())?;
        state.serialize_field("size", &self.size())?;
        state.serialize_field("number", &self.number())?;
        state.serialize_field("numberOfElements", &self.number_of_elements())?;
        state.serialize_field("sort", &self.request.and_then(|r| r.sort()))?;
        state.serialize_field("first", &self.is_first())?;
        state.serialize_field("last", &self.is_last())?;
        state.serialize_field("empty", &self.is_empty())?;
        state.end()
    }
}
