pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const WARN: &str = "⚠️";
    pub const FILE: &str = "📄";
    pub const PACKAGE: &str = "📦";
    pub const BOOK: &str = "📚";
    pub const FOLDER: &str = "📂";
    pub const SKIP: &str = "⏭️";
}
