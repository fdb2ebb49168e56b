//! Everything the page needs for display that is not part of the render
//! decision: section titles, price labels, badges and the fixed copy.

use serde::Serialize;

use crate::data::{Category, Dish, DishId};
use crate::view::{RenderPlan, SectionContent};

pub const PAGE_TITLE: &str = "Notre Menu";
pub const PAGE_INTRO: &str = "Découvrez notre sélection de plats préparés avec des ingrédients \
frais et de qualité par notre équipe de chefs passionnés.";

pub const COMMITMENTS_HEADING: &str = "Nos Engagements Qualité";
pub const COMMITMENTS: [Commitment; 3] = [
    Commitment {
        title: "Ingrédients Frais",
        text: "Nous sélectionnons chaque jour les meilleurs produits locaux et de saison.",
    },
    Commitment {
        title: "Préparation Minute",
        text: "Tous nos plats sont préparés à la commande pour garantir fraîcheur et saveur.",
    },
    Commitment {
        title: "Chef Expérimenté",
        text: "Notre équipe culinaire allie tradition et innovation pour votre plaisir.",
    },
];

pub const ERROR_HEADING: &str = "Erreur";
pub const EMPTY_MENU_HEADING: &str = "Menu en préparation";
pub const EMPTY_MENU_TEXT: &str =
    "Notre équipe met à jour le menu. Revenez bientôt pour découvrir nos délicieux plats !";

pub fn display_name(category: Category) -> &'static str {
    match category {
        Category::Starter => "Entrées",
        Category::Main => "Plats Principaux",
        Category::Dessert => "Desserts",
        Category::Drink => "Boissons",
    }
}

/// Always two decimals followed by the euro sign, e.g. `6.00€`. Exact ties
/// at the cent round away from zero and `-0.0` prints as `0.00€`.
pub fn price_label(price: f64) -> String {
    let price = if price == 0.0 { 0.0 } else { round_cent_tie(price) };
    format!("{price:.2}€")
}

// `{:.2}` rounds exact halves to even (10.125 -> 10.12).
fn round_cent_tie(price: f64) -> f64 {
    let half_cents = price * 200.0;
    // zero residue means the product above was computed without rounding
    let exact = price.mul_add(200.0, -half_cents) == 0.0;
    if exact && half_cents.fract() == 0.0 && half_cents % 2.0 != 0.0 {
        (half_cents + half_cents.signum()) / 200.0
    } else {
        price
    }
}

/// One entry of the quality block shown under the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Commitment {
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Available,
    Unavailable,
}

impl Badge {
    pub fn for_dish(dish: &Dish) -> Self {
        if dish.available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Disponible",
            Self::Unavailable => "Indisponible",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishCard {
    pub id: DishId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub has_image: bool,
    pub badge: Badge,
    pub badge_label: &'static str,
}

impl From<&Dish> for DishCard {
    fn from(dish: &Dish) -> Self {
        let badge = Badge::for_dish(dish);
        Self {
            id: dish.id.clone(),
            name: dish.name.clone(),
            description: dish.description.clone(),
            price: price_label(dish.price),
            has_image: dish.has_image(),
            badge,
            badge_label: badge.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Skeleton { count: usize },
    Dishes { dishes: Vec<DishCard> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSection {
    pub category: Category,
    pub title: &'static str,
    #[serde(flatten)]
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageBody {
    Error {
        heading: &'static str,
        message: String,
    },
    Empty {
        heading: &'static str,
        text: &'static str,
    },
    Sections {
        sections: Vec<PageSection>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuPage {
    pub title: &'static str,
    pub intro: &'static str,
    pub body: PageBody,
    pub commitments_heading: &'static str,
    pub commitments: &'static [Commitment],
}

impl MenuPage {
    pub fn from_plan(plan: &RenderPlan<'_>) -> Self {
        let body = match plan {
            RenderPlan::ErrorPanel(message) => PageBody::Error {
                heading: ERROR_HEADING,
                message: message.to_string(),
            },
            RenderPlan::EmptyMenuPanel => PageBody::Empty {
                heading: EMPTY_MENU_HEADING,
                text: EMPTY_MENU_TEXT,
            },
            RenderPlan::Sections(sections) => PageBody::Sections {
                sections: sections
                    .iter()
                    .map(|section| PageSection {
                        category: section.category,
                        title: display_name(section.category),
                        body: match &section.content {
                            SectionContent::Skeleton(count) => {
                                SectionBody::Skeleton { count: *count }
                            }
                            SectionContent::DishList(dishes) => SectionBody::Dishes {
                                dishes: dishes.iter().map(|&dish| DishCard::from(dish)).collect(),
                            },
                        },
                    })
                    .collect(),
            },
        };

        Self {
            title: PAGE_TITLE,
            intro: PAGE_INTRO,
            body,
            commitments_heading: COMMITMENTS_HEADING,
            commitments: &COMMITMENTS,
        }
    }
}
