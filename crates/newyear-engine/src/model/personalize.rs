//! Personalized copy derived from the reflection answers.
//!
//! Every helper accepts a missing record and falls back to fixed text, so a
//! view never renders an empty or undefined field.

use super::reflection::ReflectionData;

/// A wish card shown on the reveal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishCard {
    pub emoji: &'static str,
    pub wish: &'static str,
}

const fn card(emoji: &'static str, wish: &'static str) -> WishCard {
    WishCard { emoji, wish }
}

const GENERIC_WISHES: [WishCard; 3] = [
    card("✨", "Endless magic and wonder"),
    card("💫", "Dreams becoming reality"),
    card("🌟", "Success in all you do"),
];

/// Headline for the reveal stage, keyed on (2025 highlight, 2026 goal).
pub fn tagline(reflections: Option<&ReflectionData>) -> &'static str {
    let Some(r) = reflections else {
        return "Your Year of Magic Awaits";
    };
    match (r.highlight2025.as_str(), r.goal2026.as_str()) {
        ("career", "wealth") => "The Achiever's Dream Year",
        ("career", "success") => "Your Year of Triumph",
        ("love", "love") => "The Year Love Finds You",
        ("love", "peace") => "The Year of Heart & Soul",
        ("travel", "travel") => "The Ultimate Adventure Year",
        ("health", "health") => "Your Year of Transformation",
        ("friends", "love") => "The Year of Connection",
        ("growth", "peace") => "The Year of Inner Mastery",
        ("growth", "success") => "The Year of Breakthrough",
        _ => "Your Year of Endless Possibilities",
    }
}

/// One card per answered lesson, goal and wish.
pub fn wishes(reflections: Option<&ReflectionData>) -> Vec<WishCard> {
    let Some(r) = reflections else {
        return GENERIC_WISHES.to_vec();
    };

    let lesson = match r.lesson2025.as_str() {
        "patience" => Some(card("🌸", "Perfect timing for everything")),
        "self-love" => Some(card("💝", "Deeper self-appreciation")),
        "courage" => Some(card("🦁", "Fearless confidence")),
        "balance" => Some(card("⚖️", "Harmony in all areas")),
        "gratitude" => Some(card("🙏", "Abundance of blessings")),
        "resilience" => Some(card("💪", "Unshakeable strength")),
        _ => None,
    };
    let goal = match r.goal2026.as_str() {
        "wealth" => Some(card("💰", "Financial freedom & prosperity")),
        "love" => Some(card("💕", "Deep & meaningful love")),
        "health" => Some(card("🏋️", "Vibrant health & energy")),
        "travel" => Some(card("🌍", "Life-changing adventures")),
        "peace" => Some(card("🧘", "Deep inner peace")),
        "success" => Some(card("🏆", "Unstoppable success")),
        _ => None,
    };
    let wish = match r.wish2026.as_str() {
        "happiness" => Some(card("😊", "Overflowing happiness")),
        "family" => Some(card("👨‍👩‍👧‍👦", "Family bonds strengthened")),
        "career" => Some(card("🚀", "Career skyrockets")),
        "creativity" => Some(card("🎨", "Creative breakthroughs")),
        "adventure" => Some(card("🎢", "Thrilling new experiences")),
        "wisdom" => Some(card("🦉", "Profound wisdom")),
        _ => None,
    };

    let cards: Vec<WishCard> = [lesson, goal, wish].into_iter().flatten().collect();
    if cards.is_empty() {
        vec![card("✨", "Magic in every moment")]
    } else {
        cards
    }
}

/// Closing line on the celebration stage.
pub fn celebration_wish(reflections: Option<&ReflectionData>, user_name: &str) -> String {
    let goal_line = reflections.and_then(|r| match r.goal2026.as_str() {
        "wealth" => Some("May 2026 bring you endless prosperity! 💰"),
        "love" => Some("Love will find you in 2026! 💕"),
        "health" => Some("Your body and mind will thrive! 💪"),
        "travel" => Some("Epic adventures await in 2026! ✈️"),
        "peace" => Some("Inner peace will be yours! 🧘"),
        "success" => Some("Victory is in your stars! 🏆"),
        _ => None,
    });
    match goal_line {
        Some(line) => line.to_string(),
        None => format!("Wishing you an amazing 2026, {user_name}!"),
    }
}

/// Short label for a goal/wish tag on the celebration badge row.
pub fn wish_label(tag: &str) -> &str {
    match tag {
        "love" => "Love",
        "wealth" | "money" => "Wealth",
        "travel" => "Travel",
        "health" => "Health",
        "success" => "Success",
        "happiness" => "Joy",
        "peace" => "Peace",
        "family" => "Family",
        "career" => "Career",
        "creativity" => "Creativity",
        "adventure" => "Adventure",
        "wisdom" => "Wisdom",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maya() -> ReflectionData {
        ReflectionData::new("career", "patience", "wealth", "happiness")
    }

    #[test]
    fn tagline_uses_combo_or_fallback() {
        assert_eq!(tagline(Some(&maya())), "The Achiever's Dream Year");
        let other = ReflectionData::new("friends", "courage", "travel", "wisdom");
        assert_eq!(tagline(Some(&other)), "Your Year of Endless Possibilities");
        assert_eq!(tagline(None), "Your Year of Magic Awaits");
    }

    #[test]
    fn wishes_follow_answers() {
        let cards = wishes(Some(&maya()));
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].wish, "Perfect timing for everything");
        assert_eq!(cards[2].wish, "Overflowing happiness");
    }

    #[test]
    fn missing_record_gets_generic_wishes() {
        assert_eq!(wishes(None).len(), 3);
        let junk = ReflectionData::new("?", "?", "?", "?");
        assert_eq!(wishes(Some(&junk)), vec![card("✨", "Magic in every moment")]);
    }

    #[test]
    fn celebration_wish_falls_back_to_name() {
        assert_eq!(celebration_wish(Some(&maya()), "Maya"), "May 2026 bring you endless prosperity! 💰");
        assert_eq!(celebration_wish(None, "Maya"), "Wishing you an amazing 2026, Maya!");
    }

    #[test]
    fn unknown_label_passes_through() {
        assert_eq!(wish_label("happiness"), "Joy");
        assert_eq!(wish_label("zen"), "zen");
    }
}
