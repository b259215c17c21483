pub mod analysis;
pub mod bar;
pub mod chart;
pub mod pair;
pub mod timeframe;

pub use analysis::*;
pub use bar::*;
pub use chart::*;
pub use pair::*;
pub use timeframe::*;
