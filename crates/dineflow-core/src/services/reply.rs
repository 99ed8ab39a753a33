// ============================================================================
// DineFlow Core - Deterministic Reply Dispatcher
// File: crates/dineflow-core/src/services/reply.rs
// ============================================================================
//! Maps a diner's free-text question onto a handful of menu items without
//! calling a language model. Rules are tried in a fixed order and the first
//! match wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use dineflow_shared::constants::MAX_REPLY_CARDS;

use crate::domain::MenuItem;

const GENERIC_PROMPT: &str =
    "What are you in the mood for? Ask me about vegan options, our most popular dishes, or a cuisine like Italian.";
const VEGAN_FOUND: &str = "Good news! These dishes are vegan.";
const VEGAN_ADVISORY: &str =
    "We don't have dishes tagged vegan yet, but many can be made plant-based. Ask us to swap out dairy or meat for vegetables.";
const POPULAR_FOUND: &str = "These are our guests' favourites.";
const POPULAR_EMPTY: &str = "We're still finding out what guests love most. Have a look through the menu or ask about a cuisine.";

const CHIP_ITALIAN: &str = "Italian dishes";
const CHIP_VEGAN: &str = "Vegan options";
const CHIP_POPULAR: &str = "Most popular";

const POPULAR_TAGS: [&str; 3] = ["popular", "bestseller", "signature"];

struct CuisineRule {
    label: &'static str,
    query: Regex,
    item: Regex,
}

static CUISINES: Lazy<Vec<CuisineRule>> = Lazy::new(|| {
    vec![
        cuisine(
            "Italian",
            r"\b(italian|italy|pizzas?|pastas?)\b",
            r"pizza|pasta|risotto|lasagn|gnocchi|margherita|carbonara|tiramisu|bruschetta|italian",
        ),
        cuisine(
            "Japanese",
            r"\b(japanese|japan|sushis?|ramens?)\b",
            r"sushi|ramen|teriyaki|tempura|miso|gyoza|udon|sashimi|japanese",
        ),
        cuisine(
            "Mexican",
            r"\b(mexican|mexico|tacos?|burritos?)\b",
            r"taco|burrito|quesadilla|nacho|enchilada|guacamole|mexican",
        ),
    ]
});

static VEGAN_QUERY: Lazy<Regex> = Lazy::new(|| pattern(r"vegan|plant"));
static POPULAR_QUERY: Lazy<Regex> = Lazy::new(|| pattern(r"popular|recommend|best"));

fn cuisine(label: &'static str, query: &str, item: &str) -> CuisineRule {
    CuisineRule {
        label,
        query: pattern(query),
        item: pattern(item),
    }
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("reply patterns compile")
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplyIntent {
    /// Label of the matched cuisine rule.
    Cuisine(&'static str),
    Vegan,
    Popular,
    General,
}

/// Card shown under a chat bubble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub tags: Vec<String>,
}

impl From<&MenuItem> for CardView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price_cents: item.price_cents,
            currency: item.currency.clone(),
            tags: item.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    pub chips: Vec<String>,
    pub cards: Vec<CardView>,
}

pub struct ReplyDispatcher;

impl ReplyDispatcher {
    pub fn classify(query: &str) -> ReplyIntent {
        let query = query.to_lowercase();

        if let Some(rule) = CUISINES.iter().find(|rule| rule.query.is_match(&query)) {
            debug!("Reply intent: cuisine {}", rule.label);
            return ReplyIntent::Cuisine(rule.label);
        }
        if VEGAN_QUERY.is_match(&query) {
            debug!("Reply intent: vegan");
            return ReplyIntent::Vegan;
        }
        if POPULAR_QUERY.is_match(&query) {
            debug!("Reply intent: popular");
            return ReplyIntent::Popular;
        }

        debug!("Reply intent: general");
        ReplyIntent::General
    }

    /// Never fails; an empty menu yields zero cards.
    pub fn reply(query: &str, items: &[MenuItem]) -> ChatReply {
        match Self::classify(query) {
            ReplyIntent::Cuisine(label) => {
                let rule = CUISINES.iter().find(|rule| rule.label == label);
                let cards = match rule {
                    Some(rule) => pick(items, |item| {
                        let haystack = format!(
                            "{} {}",
                            item.name.to_lowercase(),
                            item.description.as_deref().unwrap_or("").to_lowercase()
                        );
                        rule.item.is_match(&haystack)
                    }),
                    None => Vec::new(),
                };
                let text = if cards.is_empty() {
                    format!("No {} picks on today's menu, but ask me what else we have.", label)
                } else {
                    format!("Here are our {} picks.", label)
                };
                ChatReply {
                    text,
                    chips: chips(&[CHIP_VEGAN, CHIP_POPULAR]),
                    cards,
                }
            }
            ReplyIntent::Vegan => {
                let cards = pick(items, |item| item.has_tag("vegan"));
                let text = if cards.is_empty() { VEGAN_ADVISORY } else { VEGAN_FOUND };
                ChatReply {
                    text: text.to_string(),
                    chips: chips(&[CHIP_POPULAR, CHIP_ITALIAN]),
                    cards,
                }
            }
            ReplyIntent::Popular => {
                let cards = pick(items, |item| POPULAR_TAGS.iter().any(|tag| item.has_tag(tag)));
                let text = if cards.is_empty() { POPULAR_EMPTY } else { POPULAR_FOUND };
                ChatReply {
                    text: text.to_string(),
                    chips: chips(&[CHIP_VEGAN, CHIP_ITALIAN]),
                    cards,
                }
            }
            ReplyIntent::General => ChatReply {
                text: GENERIC_PROMPT.to_string(),
                chips: chips(&[CHIP_ITALIAN, CHIP_VEGAN, CHIP_POPULAR]),
                cards: pick(items, |_| true),
            },
        }
    }
}

fn pick<F>(items: &[MenuItem], predicate: F) -> Vec<CardView>
where
    F: Fn(&MenuItem) -> bool,
{
    items
        .iter()
        .filter(|item| predicate(item))
        .take(MAX_REPLY_CARDS)
        .map(CardView::from)
        .collect()
}

fn chips(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}
