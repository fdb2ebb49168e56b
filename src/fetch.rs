use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::DishCatalog;
use crate::data::{Category, Dish, DishError, DishId};
use crate::view::{render_plan, FetchStatus, RenderPlan};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Source(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid dish record: {0}")]
    Invalid(#[from] DishError),
}

/// Anything able to hand us the current list of dishes.
#[async_trait]
pub trait DishSource: Send + Sync {
    async fn fetch_dishes(&self) -> Result<Vec<Dish>, FetchError>;
}

/// Stand-in for the real kitchen API until it exists.
#[derive(Debug, Clone)]
pub struct MockDishSource {
    delay: Duration,
}

impl MockDishSource {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockDishSource {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

fn sample(
    id: i64,
    name: &str,
    description: &str,
    price: f64,
    category: Category,
    available: bool,
) -> Dish {
    Dish {
        id: DishId::Int(id),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.into(),
        available,
        image_url: String::new(),
    }
}

pub fn sample_dishes() -> Vec<Dish> {
    vec![
        sample(
            1,
            "Salade Belle Vue",
            "Salade fraîche avec tomates, concombres et olives.",
            8.5,
            Category::Starter,
            true,
        ),
        sample(
            2,
            "Poulet rôti aux herbes",
            "Poulet fermier rôti, accompagné de légumes de saison.",
            15.0,
            Category::Main,
            true,
        ),
        sample(
            3,
            "Tarte aux fraises",
            "Tarte maison aux fraises fraîches.",
            6.0,
            Category::Dessert,
            false,
        ),
        sample(
            4,
            "Jus d'orange frais",
            "Jus pressé minute.",
            3.5,
            Category::Drink,
            true,
        ),
    ]
}

#[async_trait]
impl DishSource for MockDishSource {
    async fn fetch_dishes(&self) -> Result<Vec<Dish>, FetchError> {
        tokio::time::sleep(self.delay).await;
        Ok(sample_dishes())
    }
}

async fn fetch_catalog(
    source: &dyn DishSource,
    timeout: Duration,
) -> Result<DishCatalog, FetchError> {
    let dishes = tokio::time::timeout(timeout, source.fetch_dishes())
        .await
        .map_err(|_| FetchError::Timeout(timeout))??;
    Ok(DishCatalog::validated(dishes)?)
}

/// Runs one fetch and folds every failure into `FetchStatus::Error`.
pub async fn fetch_status(source: &dyn DishSource, timeout: Duration) -> FetchStatus {
    tracing::info!("fetching dishes");
    match fetch_catalog(source, timeout).await {
        Ok(catalog) => {
            tracing::info!(dishes = catalog.dishes().len(), "dishes fetched");
            FetchStatus::Success(catalog.into_dishes())
        }
        Err(e) => {
            tracing::warn!("fail to fetch dishes: {e}");
            FetchStatus::Error(e.to_string())
        }
    }
}

/// Current status of the menu. Starts out loading; every completed fetch
/// replaces whatever was there before.
#[derive(Debug, Clone)]
pub struct MenuState {
    status: FetchStatus,
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuState {
    pub fn new() -> Self {
        Self {
            status: FetchStatus::Loading,
        }
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn begin_fetch(&mut self) {
        self.status = FetchStatus::Loading;
    }

    pub fn complete(&mut self, status: FetchStatus) {
        self.status = status;
    }

    pub fn plan(&self) -> RenderPlan<'_> {
        render_plan(&self.status)
    }
}
