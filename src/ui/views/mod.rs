mod applications;
mod warmup;

pub use applications::ApplicationsView;
pub use warmup::WarmupView;
