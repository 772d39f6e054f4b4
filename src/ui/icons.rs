//! Glyphs prefixed to headers, sections and status lines

pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const DATABASE: &str = "🗄️";
    pub const PERSON: &str = "👤";
    pub const CARD: &str = "💳";
    pub const CART: &str = "🛒";
    pub const GLOBE: &str = "🌍";
    pub const SPARKLE: &str = "✨";
    pub const EMPTY: &str = "∅";
}
