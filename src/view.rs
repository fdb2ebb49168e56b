use serde::{Deserialize, Serialize};

use crate::catalog::{category_view, is_empty_menu};
use crate::data::{Category, Dish};

/// Placeholder cards shown per section while the menu loads.
pub const SKELETON_COUNT: usize = 3;

/// Outcome of the one-shot fetch. `Loading` is the only non-terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum FetchStatus {
    Loading,
    Error(String),
    Success(Vec<Dish>),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionContent<'a> {
    Skeleton(usize),
    DishList(Vec<&'a Dish>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<'a> {
    pub category: Category,
    pub content: SectionContent<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RenderPlan<'a> {
    ErrorPanel(&'a str),
    EmptyMenuPanel,
    Sections(Vec<Section<'a>>),
}

/// Section for one category, or `None` when the category is left out of the page.
pub fn plan_section(status: &FetchStatus, category: Category) -> Option<Section<'_>> {
    let content = match status {
        FetchStatus::Loading => SectionContent::Skeleton(SKELETON_COUNT),
        FetchStatus::Success(dishes) => {
            let view = category_view(dishes, category);
            if view.is_empty() {
                return None;
            }
            SectionContent::DishList(view)
        }
        FetchStatus::Error(_) => return None,
    };
    Some(Section { category, content })
}

pub fn render_plan(status: &FetchStatus) -> RenderPlan<'_> {
    match status {
        FetchStatus::Error(message) => RenderPlan::ErrorPanel(message),
        FetchStatus::Success(dishes) if is_empty_menu(dishes) => RenderPlan::EmptyMenuPanel,
        FetchStatus::Loading | FetchStatus::Success(_) => {
            let sections = Category::ALL
                .iter()
                .filter_map(|&category| plan_section(status, category))
                .collect::<Vec<_>>();
            tracing::debug!(sections = sections.len(), "computed menu sections");
            RenderPlan::Sections(sections)
        }
    }
}
