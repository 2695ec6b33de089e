use rand::Rng;

use crate::SessionId;

const ADJECTIVES: &[&str] = &[
    "Swift", "Brave", "Clever", "Mighty", "Silent", "Golden", "Wild", "Noble",
    "Fierce", "Gentle", "Quick", "Wise", "Bold", "Proud", "Cunning", "Sly",
];

const NOUNS: &[&str] = &[
    "Circle", "Cross", "Corner", "Diagonal", "Row", "Column", "Square", "Grid",
    "Stroke", "Ring", "Cell", "Line", "Mark", "Edge", "Centre", "Board",
];

pub fn generate_session_id() -> SessionId {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let suffix: u16 = rng.random_range(0..1000);
    SessionId::new(format!("{} {} {:03}", adjective, noun, suffix))
}
