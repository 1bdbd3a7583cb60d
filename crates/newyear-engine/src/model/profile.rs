/// Name used until (and unless) the visitor types one.
pub const DEFAULT_NAME: &str = "Friend";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
}

impl UserProfile {
    /// Build a profile from raw text-field input. Whitespace-only input falls back to the default.
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self { name: trimmed.to_string() }
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self { name: DEFAULT_NAME.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_falls_back() {
        assert_eq!(UserProfile::from_input("").name, "Friend");
        assert_eq!(UserProfile::from_input("   ").name, "Friend");
        assert_eq!(UserProfile::from_input("\t\n").name, "Friend");
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(UserProfile::from_input("  Ana  ").name, "Ana");
        assert_eq!(UserProfile::from_input("Ana"), UserProfile { name: "Ana".into() });
    }
}
