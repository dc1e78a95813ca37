pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, header, muted, section, status, success, summary_row, warn};
pub use progress::{ProgressManager, Spinner};
pub use table::{stats_table, TableBuilder};
pub use theme::{theme, Theme};
