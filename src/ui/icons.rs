pub struct Icons;

impl Icons {
    pub const FILE: &str = "📄";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const EMPTY: &str = "∅";
    pub const DATABASE: &str = "🗄️";
    pub const CLOCK: &str = "⏱️";
}
