use serde::Deserialize;
use validator::Validate;

use crate::domain::types::cpf_like_pattern;
use crate::forms::FormError;
use crate::pagination::{
    DEFAULT_PAGE_SIZE, Direction, MAX_PAGE_INDEX, MAX_PAGE_SIZE, PageRequest, Sort, SortField,
};

fn default_lines_per_page() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_direction() -> String {
    Direction::Asc.to_string()
}

fn default_order_by() -> String {
    "name".to_string()
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Paging parameters accepted by every client listing.
pub struct PageQuery {
    /// Zero-based page index.
    #[serde(default)]
    #[validate(range(max = MAX_PAGE_INDEX))]
    pub page: usize,
    #[serde(default = "default_lines_per_page")]
    #[validate(range(min = 1, max = MAX_PAGE_SIZE))]
    pub lines_per_page: usize,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            lines_per_page: default_lines_per_page(),
            direction: default_direction(),
            order_by: default_order_by(),
        }
    }
}

impl PageQuery {
    /// Validates the parameters and builds the matching [`PageRequest`].
    pub fn to_page_request(&self) -> Result<PageRequest, FormError> {
        self.validate()?;
        let sort = Sort::new(
            self.order_by.parse::<SortField>()?,
            self.direction.parse::<Direction>()?,
        );
        Ok(PageRequest::sorted(self.page, self.lines_per_page, sort)?)
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Income filter for `/clients/income` and `/clients/incomeGreaterThan`.
pub struct IncomeQuery {
    #[validate(range(min = 0.0))]
    pub income: f64,
}

#[derive(Debug, Deserialize, Validate)]
/// CPF fragment for `/clients/cpf`.
pub struct CpfQuery {
    #[validate(length(min = 1, max = 11))]
    pub cpf: String,
}

impl CpfQuery {
    /// Validates the fragment and wraps it into a `LIKE` pattern.
    pub fn to_pattern(&self) -> Result<String, FormError> {
        self.validate()?;
        Ok(cpf_like_pattern(&self.cpf))
    }
}
