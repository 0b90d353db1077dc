/// A reward that can be bought with points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub icon: &'static str,
    pub name: &'static str,
    pub cost: i64,
}

/// The fixed reward catalog, cheapest first.
pub const CATALOG: &[Reward] = &[
    Reward { icon: "☕", name: "Coffee Break", cost: 40 },
    Reward { icon: "🍦", name: "Ice Cream", cost: 50 },
    Reward { icon: "🎮", name: "Game Time", cost: 100 },
    Reward { icon: "📚", name: "New Book", cost: 120 },
    Reward { icon: "🎬", name: "Movie Night", cost: 150 },
    Reward { icon: "🎁", name: "Special Gift", cost: 300 },
];

/// Looks up a catalog reward by name, ignoring case.
pub fn find_reward(name: &str) -> Option<&'static Reward> {
    let name = name.trim();
    CATALOG.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}
