use crate::data::{Category, Dish, DishError};

/// Dishes of `category` that can be ordered right now, in the order they were given.
pub fn category_view(dishes: &[Dish], category: Category) -> Vec<&Dish> {
    dishes
        .iter()
        .filter(|dish| dish.available && dish.category() == Some(category))
        .collect()
}

/// Only true when there are no records at all. A menu where every dish is
/// unavailable is not empty.
pub fn is_empty_menu(dishes: &[Dish]) -> bool {
    dishes.is_empty()
}

/// Owns the dish list of one successful fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DishCatalog {
    dishes: Vec<Dish>,
}

impl DishCatalog {
    pub fn new(dishes: Vec<Dish>) -> Self {
        Self { dishes }
    }

    /// Builds the catalog only if every record is well formed.
    pub fn validated(dishes: Vec<Dish>) -> Result<Self, DishError> {
        for dish in &dishes {
            dish.validate()?;
        }
        Ok(Self::new(dishes))
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn into_dishes(self) -> Vec<Dish> {
        self.dishes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DishBuilder;

    fn dish(id: i64, category: &str, available: bool) -> Dish {
        DishBuilder::default()
            .id(id)
            .name(format!("dish {id}"))
            .price(5.0)
            .category(category)
            .available(available)
            .build()
            .unwrap()
    }

    fn ids(view: &[&Dish]) -> Vec<String> {
        view.iter().map(|dish| dish.id.to_string()).collect()
    }

    #[test]
    fn view_keeps_matching_available_dishes_in_order() {
        let dishes = vec![
            dish(1, "main", true),
            dish(2, "starter", true),
            dish(3, "main", false),
            dish(4, "main", true),
            dish(5, "plat principal", true),
        ];

        let view = category_view(&dishes, Category::Main);
        assert_eq!(ids(&view), ["1", "4", "5"]);
        for dish in &view {
            assert!(dish.available);
            assert_eq!(dish.category(), Some(Category::Main));
        }

        // recomputing yields the same sequence
        assert_eq!(category_view(&dishes, Category::Main), view);
    }

    #[test]
    fn view_of_nothing_is_empty() {
        assert!(category_view(&[], Category::Drink).is_empty());

        let dishes = vec![dish(1, "starter", true)];
        assert!(category_view(&dishes, Category::Drink).is_empty());
    }

    #[test]
    fn unknown_categories_never_show_up() {
        let dishes = vec![dish(1, "fromage", true), dish(2, "", true)];
        for category in Category::ALL {
            assert!(category_view(&dishes, category).is_empty());
        }
    }

    #[test]
    fn duplicate_ids_are_kept() {
        let dishes = vec![dish(7, "dessert", true), dish(7, "dessert", true)];
        assert_eq!(category_view(&dishes, Category::Dessert).len(), 2);
    }

    #[test]
    fn empty_menu_only_without_records() {
        assert!(is_empty_menu(&[]));
        assert!(!is_empty_menu(&[dish(1, "dessert", false)]));
        assert!(!is_empty_menu(&[dish(1, "fromage", true)]));
    }

    #[test]
    fn validated_rejects_bad_price() {
        let mut bad = dish(2, "main", true);
        bad.price = -3.0;

        assert!(DishCatalog::validated(vec![dish(1, "main", true)]).is_ok());
        assert!(DishCatalog::validated(vec![dish(1, "main", true), bad]).is_err());
    }
}
