//! Fake account details for generated tweets.

use rand::seq::IndexedRandom;
use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "happy", "tech", "digital", "social", "cyber", "online", "web", "cloud", "smart", "future",
];

const NOUNS: &[&str] = &[
    "user",
    "fan",
    "guru",
    "ninja",
    "expert",
    "enthusiast",
    "lover",
    "pro",
    "master",
    "geek",
];

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Susan", "Richard", "Jessica", "Joseph", "Sarah", "Thomas", "Karen",
    "Charles", "Nancy", "Emma", "Olivia", "Noah", "Liam", "Sophia", "Ava", "Jackson", "Aiden",
    "Lucas", "Chloe",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Jones", "Brown", "Davis", "Miller", "Wilson", "Moore",
    "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris", "Martin", "Thompson", "Garcia",
    "Martinez", "Robinson", "Clark", "Rodriguez", "Lewis", "Lee", "Walker", "Hall", "Allen",
    "Young", "King", "Wright",
];

pub(crate) const PROFILE_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?q=80&w=100&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1494790108377-be9c29b29330?q=80&w=100&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1570295999919-56ceb5ecca61?q=80&w=100&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1568602471122-7832951cc4c5?q=80&w=100&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?q=80&w=100&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1599566150163-29194dcaad36?q=80&w=100&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?q=80&w=100&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?q=80&w=100&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?q=80&w=100&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1607746882042-944635dfe10e?q=80&w=100&auto=format&fit=crop",
];

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// `adjective + noun`, followed by nothing, a number in 1..=999, or one in 1..=99.
pub(crate) fn username<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = pick(rng, ADJECTIVES);
    let noun = pick(rng, NOUNS);
    let suffixes = [
        String::new(),
        rng.random_range(1..=999).to_string(),
        rng.random_range(1..=99).to_string(),
    ];
    let suffix = suffixes.choose(rng).map_or("", String::as_str);
    format!("{adjective}{noun}{suffix}")
}

pub(crate) fn display_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

pub(crate) fn profile_image<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, PROFILE_IMAGES)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn username_is_adjective_noun_and_optional_number() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let name = username(&mut rng);
            let adjective = ADJECTIVES
                .iter()
                .find(|a| name.starts_with(**a))
                .unwrap_or_else(|| panic!("no adjective prefix in {name}"));
            let rest = &name[adjective.len()..];
            let noun = NOUNS
                .iter()
                .find(|n| rest.starts_with(**n))
                .unwrap_or_else(|| panic!("no noun in {name}"));
            let digits = &rest[noun.len()..];
            if !digits.is_empty() {
                let n: u32 = digits.parse().unwrap();
                assert!((1..=999).contains(&n), "suffix out of range in {name}");
            }
        }
    }

    #[test]
    fn display_name_has_first_and_last() {
        let mut rng = StdRng::seed_from_u64(7);
        let name = display_name(&mut rng);
        let (first, last) = name.split_once(' ').unwrap();
        assert!(FIRST_NAMES.contains(&first));
        assert!(LAST_NAMES.contains(&last));
    }

    #[test]
    fn profile_image_comes_from_fixed_list() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(PROFILE_IMAGES.contains(&profile_image(&mut rng)));
    }
}
